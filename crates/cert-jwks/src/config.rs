//! Environment configuration.
//!
//! Every variable is optional. Values here are defaults that command-line
//! flags override.

use jwks_core::{JwksOptions, KeyUsage};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

pub const KEY_USAGE_VAR: &str = "CERT_JWKS_KEY_USAGE";
pub const INCLUDE_CERTIFICATE_VAR: &str = "CERT_JWKS_INCLUDE_CERTIFICATE";
pub const INCLUDE_CHAIN_VAR: &str = "CERT_JWKS_INCLUDE_CHAIN";
pub const COMPRESS_VAR: &str = "CERT_JWKS_COMPRESS";
pub const JSON_LOGS_VAR: &str = "CERT_JWKS_JSON_LOGS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Build options used when a flag is not given on the command line.
    pub defaults: JwksOptions,
    /// Emit log lines as JSON.
    pub json_logs: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid boolean for {name}: '{value}' (expected true/false, 1/0 or yes/no)")]
    InvalidBool { name: String, value: String },

    #[error("Invalid key usage in CERT_JWKS_KEY_USAGE: '{0}'")]
    InvalidKeyUsage(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let key_usage = vars
            .get(KEY_USAGE_VAR)
            .map(|value| {
                value
                    .parse::<KeyUsage>()
                    .map_err(|_| ConfigError::InvalidKeyUsage(value.clone()))
            })
            .transpose()?;

        let defaults = JwksOptions {
            key_usage,
            include_certificate: parse_bool(vars, INCLUDE_CERTIFICATE_VAR)?,
            include_certificate_chain: parse_bool(vars, INCLUDE_CHAIN_VAR)?,
            compress: parse_bool(vars, COMPRESS_VAR)?,
        };

        let json_logs = parse_bool(vars, JSON_LOGS_VAR)?.unwrap_or(false);

        Ok(Config {
            defaults,
            json_logs,
        })
    }
}

fn parse_bool(vars: &HashMap<String, String>, name: &str) -> Result<Option<bool>, ConfigError> {
    let Some(value) = vars.get(name) else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: value.clone(),
        }),
    }
}
