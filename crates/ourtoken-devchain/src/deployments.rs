//! Tagged deploy scripts and cached fixtures

use std::collections::{BTreeMap, HashMap};

use ourtoken_config::{initial_supply, DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
use ourtoken_primitives::{Address, BlockNumber, H256};

use crate::{Checkpoint, DevChain, DevChainError, DevChainResult, Signer, TokenArtifact};

/// Accounts scripts deploy from
#[derive(Clone, Debug)]
pub struct NamedAccounts {
    /// First development signer
    pub deployer: Signer,
}

impl NamedAccounts {
    /// Resolve named accounts on `chain`
    pub fn from_chain(chain: &DevChain) -> DevChainResult<Self> {
        Ok(Self {
            deployer: chain.signer(0)?.clone(),
        })
    }
}

/// Recorded deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Name the deployment is looked up by
    pub name: String,
    /// Artifact the contract was created from
    pub contract_name: String,
    /// Contract address
    pub address: Address,
    /// Deploying account
    pub deployer: Address,
    /// Creation transaction
    pub tx_hash: H256,
    /// Block the creation was mined in
    pub block_number: BlockNumber,
}

/// A deploy step selectable by tag
pub trait DeployScript {
    /// Script name, for logging
    fn name(&self) -> &str;

    /// Tags this script runs under
    fn tags(&self) -> &[&'static str];

    /// Deploy onto `chain`, returning what was deployed
    fn run(
        &self,
        chain: &mut DevChain,
        accounts: &NamedAccounts,
    ) -> DevChainResult<Vec<Deployment>>;
}

/// Deploys the token with the configured name, symbol, decimals and supply
#[derive(Clone, Copy, Debug, Default)]
pub struct DeployToken;

impl DeployScript for DeployToken {
    fn name(&self) -> &str {
        "deploy_token"
    }

    fn tags(&self) -> &[&'static str] {
        &["all", "token"]
    }

    fn run(
        &self,
        chain: &mut DevChain,
        accounts: &NamedAccounts,
    ) -> DevChainResult<Vec<Deployment>> {
        let deployer = &accounts.deployer;
        tracing::info!(
            network = chain.network_name(),
            deployer = %deployer.address(),
            "deploying token"
        );

        let args =
            TokenArtifact::constructor_args(TOKEN_NAME, TOKEN_SYMBOL, DECIMALS, initial_supply()?);
        let receipt = chain.deploy(deployer, &TokenArtifact, &args)?;
        let address = receipt
            .contract_address
            .ok_or_else(|| DevChainError::UnknownDeployment(TokenArtifact::NAME.to_string()))?;

        tracing::info!(%address, tx = %receipt.tx_hash, "token deployed");
        Ok(vec![Deployment {
            name: TokenArtifact::NAME.to_string(),
            contract_name: TokenArtifact::NAME.to_string(),
            address,
            deployer: deployer.address(),
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
        }])
    }
}

/// Deployment registry bound to one chain
///
/// A fixture runs the scripts carrying any of its tags once, then checkpoints
/// the chain. Requesting the same fixture again restores that checkpoint
/// instead of redeploying. Checkpoints are independent of the chain's
/// snapshot stack, so `revert_to` never invalidates a cached fixture.
#[derive(Default)]
pub struct Deployments {
    scripts: Vec<Box<dyn DeployScript>>,
    records: BTreeMap<String, Deployment>,
    fixtures: HashMap<Vec<String>, (Checkpoint, BTreeMap<String, Deployment>)>,
}

impl Deployments {
    /// Empty registry with no scripts
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the token deploy script
    pub fn with_default_scripts() -> Self {
        let mut deployments = Self::new();
        deployments.register(DeployToken);
        deployments
    }

    /// Add a deploy script
    pub fn register(&mut self, script: impl DeployScript + 'static) {
        self.scripts.push(Box::new(script));
    }

    /// Deploy (or restore) everything tagged with any of `tags`
    pub fn fixture(&mut self, chain: &mut DevChain, tags: &[&str]) -> DevChainResult<()> {
        let mut key: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        key.sort();
        key.dedup();

        if let Some((checkpoint, records)) = self.fixtures.get(&key) {
            chain.restore(checkpoint);
            self.records = records.clone();
            tracing::debug!(tags = ?key, "fixture restored from checkpoint");
            return Ok(());
        }

        let accounts = NamedAccounts::from_chain(chain)?;
        for script in &self.scripts {
            if !script.tags().iter().any(|tag| key.iter().any(|k| k == tag)) {
                continue;
            }
            tracing::debug!(script = script.name(), "running deploy script");
            for deployment in script.run(chain, &accounts)? {
                self.records.insert(deployment.name.clone(), deployment);
            }
        }

        self.fixtures.insert(key, (chain.checkpoint(), self.records.clone()));
        Ok(())
    }

    /// Look up a deployment by name
    pub fn get(&self, name: &str) -> DevChainResult<&Deployment> {
        self.records
            .get(name)
            .ok_or_else(|| DevChainError::UnknownDeployment(name.to_string()))
    }

    /// All recorded deployments, by name
    pub fn all(&self) -> impl Iterator<Item = &Deployment> {
        self.records.values()
    }
}
