//! Contracts the development chain can host

use ourtoken_abi::{decode, ParamType, Token as AbiToken};
use ourtoken_primitives::{Address, U256};
use ourtoken_token::{dispatch, Log, Revert, Token};

/// Successful execution
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Execution {
    /// Return data
    pub output: Vec<u8>,
    /// Emitted logs
    pub logs: Vec<Log>,
}

/// Deployed contract state driven by calldata
pub trait Contract: Send + Sync {
    /// Artifact name this contract was created from
    fn name(&self) -> &str;

    /// Execute `input` from `caller`; `address` is the contract's own address
    fn execute(
        &mut self,
        address: Address,
        caller: Address,
        input: &[u8],
    ) -> Result<Execution, Revert>;

    /// Clone into a new box
    fn clone_box(&self) -> Box<dyn Contract>;
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl Contract for Token {
    fn name(&self) -> &str {
        TokenArtifact::NAME
    }

    fn execute(
        &mut self,
        address: Address,
        caller: Address,
        input: &[u8],
    ) -> Result<Execution, Revert> {
        let out = dispatch(self, caller, input)?;
        Ok(Execution {
            output: out.output,
            logs: out.events.iter().map(|e| e.to_log(address)).collect(),
        })
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }
}

/// Deployable contract code: constructor input in, contract instance out
pub trait Artifact {
    /// Contract name the deployment is recorded under
    fn contract_name(&self) -> &'static str;

    /// Constructor parameter types
    fn constructor_inputs(&self) -> Vec<ParamType>;

    /// Run the constructor
    fn instantiate(
        &self,
        address: Address,
        deployer: Address,
        input: &[u8],
    ) -> Result<(Box<dyn Contract>, Execution), Revert>;
}

/// The token's artifact
///
/// Constructor: `(string name, string symbol, uint8 decimals, uint256 initialSupply)`.
/// The whole initial supply is minted to the deployer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenArtifact;

impl TokenArtifact {
    /// Contract name
    pub const NAME: &'static str = "Token";

    /// Encode constructor arguments
    pub fn constructor_args(
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: U256,
    ) -> Vec<AbiToken> {
        vec![
            AbiToken::String(name.to_string()),
            AbiToken::String(symbol.to_string()),
            AbiToken::Uint(U256::from(decimals)),
            AbiToken::Uint(initial_supply),
        ]
    }
}

impl Artifact for TokenArtifact {
    fn contract_name(&self) -> &'static str {
        Self::NAME
    }

    fn constructor_inputs(&self) -> Vec<ParamType> {
        vec![ParamType::String, ParamType::String, ParamType::Uint(8), ParamType::Uint(256)]
    }

    fn instantiate(
        &self,
        address: Address,
        deployer: Address,
        input: &[u8],
    ) -> Result<(Box<dyn Contract>, Execution), Revert> {
        let mut args = decode(&self.constructor_inputs(), input)
            .map_err(|_| Revert::default())?
            .into_iter();
        let mut next = || args.next().ok_or_else(Revert::default);

        let name = next()?.into_string().ok_or_else(Revert::default)?;
        let symbol = next()?.into_string().ok_or_else(Revert::default)?;
        let decimals = next()?
            .into_uint()
            .and_then(|d| u8::try_from(d.low_u64()).ok())
            .ok_or_else(Revert::default)?;
        let supply = next()?.into_uint().ok_or_else(Revert::default)?;

        let (token, event) = Token::deploy(deployer, name, symbol, decimals, supply)?;
        let execution = Execution {
            output: Vec::new(),
            logs: vec![event.to_log(address)],
        };
        Ok((Box::new(token), execution))
    }
}
