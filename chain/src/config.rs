//! Host configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use womansplain_identity::VerificationPolicy;
use womansplain_types::ProtocolParams;

use crate::error::ChainError;

/// Attribute-verification policy section of the host config.
///
/// Forwarded verbatim to the identity hub — the ledgers never enforce it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum age the proof must attest to.
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,

    /// ISO country codes the proof must not originate from.
    #[serde(default)]
    pub forbidden_countries: Vec<String>,

    /// Whether the hub should run its sanctions-list check.
    #[serde(default)]
    pub ofac_check: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
            forbidden_countries: Vec::new(),
            ofac_check: false,
        }
    }
}

impl From<PolicyConfig> for VerificationPolicy {
    fn from(c: PolicyConfig) -> Self {
        Self {
            minimum_age: c.minimum_age,
            forbidden_countries: c.forbidden_countries,
            ofac_check: c.ofac_check,
        }
    }
}

/// Configuration for a Womansplain transaction host.
///
/// Can be loaded from a TOML file via [`ChainConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Scope seed namespacing identity proofs to this deployment
    /// (≤31 bytes, validated at registry construction).
    #[serde(default = "default_scope_seed")]
    pub scope_seed: String,

    /// The address the question ledger presents when awarding points.
    #[serde(default = "default_ledger_address")]
    pub ledger_address: String,

    /// Where to persist snapshots, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Attribute-verification policy forwarded to the hub.
    /// Kept last so TOML serialization emits plain values before the table.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Protocol parameters (fixed at deployment, not read from TOML).
    #[serde(skip)]
    pub params: ProtocolParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_minimum_age() -> u32 {
    18
}

fn default_scope_seed() -> String {
    "proof-of-womanhood".to_string()
}

fn default_ledger_address() -> String {
    format!("0x{}", "f".repeat(40))
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ChainConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ChainError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChainError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ChainError> {
        toml::from_str(s).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ChainConfig is always serializable to TOML")
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            scope_seed: default_scope_seed(),
            policy: PolicyConfig::default(),
            ledger_address: default_ledger_address(),
            snapshot_path: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ProtocolParams::womansplain_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ChainConfig::from_toml_str("").unwrap();
        assert_eq!(config.scope_seed, "proof-of-womanhood");
        assert_eq!(config.policy.minimum_age, 18);
        assert!(!config.policy.ofac_check);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let config = ChainConfig::from_toml_str(
            r#"
            scope_seed = "womansplain-devnet"
            log_format = "json"

            [policy]
            minimum_age = 21
            forbidden_countries = ["XX"]
            "#,
        )
        .unwrap();
        assert_eq!(config.scope_seed, "womansplain-devnet");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.policy.minimum_age, 21);
        assert_eq!(config.policy.forbidden_countries, vec!["XX"]);
    }

    #[test]
    fn toml_roundtrip() {
        let config = ChainConfig::default();
        let rendered = config.to_toml_string();
        let parsed = ChainConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.scope_seed, config.scope_seed);
        assert_eq!(parsed.ledger_address, config.ledger_address);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(ChainConfig::from_toml_str("scope_seed = [").is_err());
    }
}
