//! Token unit tests against a freshly deployed `all` fixture
//!
//! The suite only runs on development chains; on any other chain (selected
//! with `OURTOKEN_CHAIN_ID`) every test returns early after reporting the skip.

use ourtoken_config::{HarnessConfig, INITIAL_SUPPLY};
use ourtoken_devchain::{
    parse_ether, DevChain, Deployments, ReceiptAssertions, RevertAssertions, Signer, TokenHandle,
};
use ourtoken_primitives::{Address, U256};
use ourtoken_token::Event;

struct Fixture {
    chain: DevChain,
    deployer: Signer,
    user1: Signer,
    /// Token acting as the deployer
    token: TokenHandle,
    /// Token acting as `user1`
    player_token: TokenHandle,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> Option<Fixture> {
    setup_with(HarnessConfig::from_env().expect("harness config"))
}

fn setup_with(config: HarnessConfig) -> Option<Fixture> {
    init_tracing();
    if !config.is_development() {
        eprintln!(
            "skipping Token unit tests: chain {} is not a development chain",
            config.chain_id
        );
        return None;
    }

    let mut chain = DevChain::from_config(&config).expect("dev chain");
    let deployer = chain.signer(0).expect("deployer").clone();
    let user1 = chain.signer(1).expect("user1").clone();

    let mut deployments = Deployments::with_default_scripts();
    deployments.fixture(&mut chain, &["all"]).expect("fixture");
    let address = deployments.get("Token").expect("Token deployment").address;

    let token = TokenHandle::at(&chain, address, deployer.clone()).expect("token");
    let player_token = token.connect(user1.clone());
    Some(Fixture {
        chain,
        deployer,
        user1,
        token,
        player_token,
    })
}

/// Whole tokens scaled by 10^18
fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(18)
}

#[test]
fn skipped_on_live_network() {
    let sepolia = HarnessConfig {
        chain_id: 11155111,
        ..Default::default()
    };
    assert!(setup_with(sepolia).is_none());
}

#[test]
fn was_deployed() {
    let Some(f) = setup() else { return };
    assert!(!f.token.address().is_zero());
    assert_eq!(f.chain.contract_name(&f.token.address()), Some("Token"));
}

mod constructor {
    use super::*;

    #[test]
    fn has_initial_supply() {
        let Some(f) = setup() else { return };
        let total_supply = f.token.total_supply(&f.chain).unwrap();
        assert_eq!(total_supply.to_string(), INITIAL_SUPPLY);
    }

    #[test]
    fn initial_supply_belongs_to_deployer() {
        let Some(f) = setup() else { return };
        assert_eq!(
            f.token.balance_of(&f.chain, f.deployer.address()).unwrap(),
            f.token.total_supply(&f.chain).unwrap()
        );
    }

    #[test]
    fn has_name_and_symbol() {
        let Some(f) = setup() else { return };
        assert_eq!(f.token.name(&f.chain).unwrap(), "OurToken");
        assert_eq!(f.token.symbol(&f.chain).unwrap(), "OT");
        assert_eq!(f.token.decimals(&f.chain).unwrap(), 8);
    }
}

mod transfers {
    use super::*;

    #[test]
    fn transfers_tokens_to_an_address() {
        let Some(mut f) = setup() else { return };
        let tokens_to_send = parse_ether("10").unwrap();
        f.token
            .transfer(&mut f.chain, f.user1.address(), tokens_to_send)
            .unwrap()
            .assert_success();
        assert_eq!(
            f.token.balance_of(&f.chain, f.user1.address()).unwrap(),
            tokens_to_send
        );
    }

    #[test]
    fn emits_transfer_event() {
        let Some(mut f) = setup() else { return };
        let receipt = f
            .token
            .transfer(&mut f.chain, f.user1.address(), ether(10))
            .unwrap();
        receipt.assert_emitted("Transfer").assert_event(&Event::Transfer {
            from: f.deployer.address(),
            to: f.user1.address(),
            value: ether(10),
        });
    }

    #[test]
    fn rejects_transfer_over_balance() {
        let Some(mut f) = setup() else { return };
        let result = f
            .player_token
            .transfer(&mut f.chain, f.deployer.address(), ether(1));
        result.expect_custom_error("ERC20InsufficientBalance");
    }

    #[test]
    fn rejects_transfer_to_zero_address() {
        let Some(mut f) = setup() else { return };
        let result = f.token.transfer(&mut f.chain, Address::ZERO, ether(1));
        result.expect_custom_error("ERC20InvalidReceiver");
    }
}

mod allowances {
    use super::*;

    #[test]
    fn approves_other_address_to_spend() {
        let Some(mut f) = setup() else { return };
        let tokens_to_spend = parse_ether("5").unwrap();
        f.token
            .approve(&mut f.chain, f.user1.address(), tokens_to_spend)
            .unwrap();
        f.player_token
            .transfer_from(
                &mut f.chain,
                f.deployer.address(),
                f.user1.address(),
                tokens_to_spend,
            )
            .unwrap();
        assert_eq!(
            f.player_token.balance_of(&f.chain, f.user1.address()).unwrap(),
            tokens_to_spend
        );
    }

    #[test]
    fn unapproved_spender_cannot_transfer() {
        let Some(mut f) = setup() else { return };
        let result = f.player_token.transfer_from(
            &mut f.chain,
            f.deployer.address(),
            f.user1.address(),
            ether(20),
        );
        result.expect_custom_error("ERC20InsufficientAllowance");
    }

    #[test]
    fn emits_approval_event() {
        let Some(mut f) = setup() else { return };
        f.token
            .approve(&mut f.chain, f.user1.address(), ether(20))
            .unwrap()
            .assert_emitted("Approval");
    }

    #[test]
    fn sets_allowance_exactly() {
        let Some(mut f) = setup() else { return };
        f.token
            .approve(&mut f.chain, f.user1.address(), ether(20))
            .unwrap();
        let allowance = f
            .token
            .allowance(&f.chain, f.deployer.address(), f.user1.address())
            .unwrap();
        assert_eq!(allowance, ether(20));
        assert_eq!(allowance.to_string(), "20000000000000000000");
    }

    #[test]
    fn cannot_go_over_allowance() {
        let Some(mut f) = setup() else { return };
        f.token
            .approve(&mut f.chain, f.user1.address(), ether(20))
            .unwrap();
        let result = f.player_token.transfer_from(
            &mut f.chain,
            f.deployer.address(),
            f.user1.address(),
            ether(40),
        );
        let args = result.expect_custom_error("ERC20InsufficientAllowance");
        assert_eq!(args[1].clone().into_uint(), Some(ether(20)));
        assert_eq!(args[2].clone().into_uint(), Some(ether(40)));

        // Nothing moved and the allowance is intact.
        assert_eq!(
            f.token.balance_of(&f.chain, f.user1.address()).unwrap(),
            U256::zero()
        );
        assert_eq!(
            f.token
                .allowance(&f.chain, f.deployer.address(), f.user1.address())
                .unwrap(),
            ether(20)
        );
    }

    #[test]
    fn spending_allowance_does_not_emit_approval() {
        let Some(mut f) = setup() else { return };
        f.token
            .approve(&mut f.chain, f.user1.address(), ether(20))
            .unwrap();
        let receipt = f
            .player_token
            .transfer_from(&mut f.chain, f.deployer.address(), f.user1.address(), ether(5))
            .unwrap();
        assert!(receipt.events_named("Approval").is_empty());
        assert_eq!(
            f.token
                .allowance(&f.chain, f.deployer.address(), f.user1.address())
                .unwrap(),
            ether(15)
        );
    }
}
