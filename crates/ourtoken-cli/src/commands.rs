//! Command implementations

use serde_json::json;

use ourtoken_config::{is_development_chain, HarnessConfig};
use ourtoken_devchain::{format_units, Deployments, DevChain, TokenHandle};

use crate::{output::Output, CliError};

/// List the known networks
pub fn networks(config: &HarnessConfig, json: bool) -> Result<(), CliError> {
    let table = config.network_table()?;
    tracing::debug!(networks = table.len(), "listing networks");
    let mut rows = Vec::with_capacity(table.len());
    let mut lines = Vec::with_capacity(table.len());
    for (chain_id, info) in table.iter() {
        let development = is_development_chain(chain_id);
        rows.push(json!({
            "chain_id": chain_id,
            "name": info.name,
            "development": development,
        }));
        lines.push(format!(
            "{:>10}  {}{}",
            chain_id,
            info.name,
            if development { "  (development)" } else { "" }
        ));
    }

    Output::new(json)
        .field_value("networks", json!(rows))
        .field_u64("active_chain_id", config.chain_id)
        .message(&lines.join("\n"))
        .print();
    Ok(())
}

/// Run the `all` fixture on an in-process chain and describe the token
pub fn deploy(config: &HarnessConfig, json: bool) -> Result<(), CliError> {
    let mut chain = DevChain::from_config(config)?;
    if let Err(e) = chain.require_development() {
        tracing::warn!(
            chain_id = chain.chain_id(),
            "refusing to deploy outside a development chain"
        );
        return Err(e.into());
    }
    let mut deployments = Deployments::with_default_scripts();
    deployments.fixture(&mut chain, &["all"])?;
    let deployment = deployments.get("Token")?;
    tracing::info!(
        network = chain.network_name(),
        address = %deployment.address,
        block = deployment.block_number,
        "token fixture ready"
    );
    let token = TokenHandle::at(&chain, deployment.address, chain.signer(0)?.clone())?;

    let name = token.name(&chain)?;
    let symbol = token.symbol(&chain)?;
    let decimals = token.decimals(&chain)?;
    let total_supply = token.total_supply(&chain)?;

    Output::new(json)
        .field("network", chain.network_name())
        .field_u64("chain_id", chain.chain_id())
        .field("address", &deployment.address.to_hex())
        .field("deployer", &deployment.deployer.to_hex())
        .field("tx_hash", &deployment.tx_hash.to_hex())
        .field("name", &name)
        .field("symbol", &symbol)
        .field_u64("decimals", u64::from(decimals))
        .field("total_supply", &total_supply.to_string())
        .message(&format!(
            "Deployed {} ({}) to {} on {}\nDeployer: {}\nDecimals: {}\nTotal supply: {} ({} {})",
            name,
            symbol,
            deployment.address,
            chain.network_name(),
            deployment.deployer,
            decimals,
            total_supply,
            format_units(total_supply, decimals),
            symbol
        ))
        .print();
    Ok(())
}

/// Print the effective configuration
pub fn show_config(config: &HarnessConfig, show: bool, json: bool) -> Result<(), CliError> {
    if !show {
        Output::new(json)
            .message("Use --show to display the effective configuration")
            .print();
        return Ok(());
    }

    let network = config
        .network_name()
        .unwrap_or_else(|_| "unknown".to_string());
    Output::new(json)
        .field_value("config", serde_json::to_value(config)?)
        .field("network", &network)
        .message(&format!(
            "# network: {}\n{}",
            network,
            toml::to_string_pretty(config)?
        ))
        .print();
    Ok(())
}
