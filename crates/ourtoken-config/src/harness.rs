//! Harness configuration: which chain is active and how many dev accounts exist

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use ourtoken_primitives::ChainId;

use crate::network::{is_development_chain, NetworkConfig, NetworkInfo, HARDHAT_CHAIN_ID};
use crate::{ConfigError, ConfigResult};

/// Environment variable selecting the active chain id
pub const CHAIN_ID_ENV: &str = "OURTOKEN_CHAIN_ID";

/// Harness configuration, usually loaded from `ourtoken.toml`
///
/// ```toml
/// chain_id = 31337
/// accounts = 10
///
/// [networks.5]
/// name = "goerli"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Active chain id
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,
    /// Number of development signers
    #[serde(default = "default_accounts")]
    pub accounts: usize,
    /// Extra network entries, keyed by decimal chain id
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkInfo>,
}

fn default_chain_id() -> ChainId {
    HARDHAT_CHAIN_ID
}

fn default_accounts() -> usize {
    10
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            accounts: default_accounts(),
            networks: BTreeMap::new(),
        }
    }
}

impl HarnessConfig {
    /// Parse from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.network_table()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        tracing::debug!(path = %path.display(), "loading harness config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Defaults, with [`CHAIN_ID_ENV`] applied if set
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply [`CHAIN_ID_ENV`] on top of this config
    pub fn with_env_overrides(mut self) -> ConfigResult<Self> {
        if let Ok(value) = std::env::var(CHAIN_ID_ENV) {
            self.chain_id = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: CHAIN_ID_ENV,
                value,
            })?;
        }
        Ok(self)
    }

    /// Built-in table merged with the configured extra entries
    pub fn network_table(&self) -> ConfigResult<NetworkConfig> {
        let mut table = NetworkConfig::builtin();
        for (key, info) in &self.networks {
            let chain_id: ChainId = key
                .parse()
                .map_err(|_| ConfigError::UnknownNetwork(key.clone()))?;
            table.insert(chain_id, info.clone());
        }
        Ok(table)
    }

    /// Display name of the active chain
    pub fn network_name(&self) -> ConfigResult<String> {
        self.network_table()?
            .name_of(self.chain_id)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::UnknownNetwork(self.chain_id.to_string()))
    }

    /// Whether the active chain is a development chain
    pub fn is_development(&self) -> bool {
        is_development_chain(self.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that touch CHAIN_ID_ENV
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_chain_env<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        match value {
            Some(value) => std::env::set_var(CHAIN_ID_ENV, value),
            None => std::env::remove_var(CHAIN_ID_ENV),
        }
        let result = f();
        std::env::remove_var(CHAIN_ID_ENV);
        result
    }

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.accounts, 10);
        assert!(config.is_development());
        assert_eq!(config.network_name().unwrap(), "hardhat");
    }

    #[test]
    fn test_from_toml_with_extra_network() {
        let config = HarnessConfig::from_toml(
            r#"
            chain_id = 5
            accounts = 3

            [networks.5]
            name = "goerli"
            "#,
        )
        .unwrap();
        assert_eq!(config.chain_id, 5);
        assert_eq!(config.accounts, 3);
        assert!(!config.is_development());
        assert_eq!(config.network_name().unwrap(), "goerli");
        assert_eq!(config.network_table().unwrap().len(), 3);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(matches!(
            HarnessConfig::from_toml("rpc_url = \"http://localhost:8545\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_non_numeric_network_key() {
        let result = HarnessConfig::from_toml(
            r#"
            [networks.goerli]
            name = "goerli"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::UnknownNetwork(key)) if key == "goerli"));
    }

    #[test]
    fn test_unknown_active_chain() {
        let config = HarnessConfig {
            chain_id: 1,
            ..Default::default()
        };
        assert!(matches!(config.network_name(), Err(ConfigError::UnknownNetwork(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chain_id = 11155111").unwrap();

        let config = HarnessConfig::load(file.path()).unwrap();
        assert_eq!(config.network_name().unwrap(), "sepolia");
        assert!(!config.is_development());
    }

    #[test]
    fn test_load_missing_file() {
        let result = HarnessConfig::load(Path::new("/nonexistent/ourtoken.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_serialize_roundtrip_through_toml() {
        let config = HarnessConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("chain_id = 31337"));
        assert_eq!(HarnessConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_env_selects_live_network() {
        let config = with_chain_env(Some("11155111"), HarnessConfig::from_env).unwrap();
        assert_eq!(config.chain_id, 11155111);
        assert!(!config.is_development());
        assert_eq!(config.network_name().unwrap(), "sepolia");
    }

    #[test]
    fn test_env_overrides_file_value() {
        let base = HarnessConfig::from_toml("chain_id = 11155111\naccounts = 2").unwrap();
        let config = with_chain_env(Some(" 31337 "), || base.with_env_overrides()).unwrap();
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.accounts, 2);
        assert!(config.is_development());
    }

    #[test]
    fn test_env_unset_keeps_config() {
        let config = with_chain_env(None, HarnessConfig::from_env).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_env_rejects_non_numeric_chain_id() {
        let result = with_chain_env(Some("abc"), HarnessConfig::from_env);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { var, value }) if var == CHAIN_ID_ENV && value == "abc"
        ));
    }
}
