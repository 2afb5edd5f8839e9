//! # Configuration Management
//!
//! Centralized configuration for the packet codec library.
//!
//! Wire semantics are fixed by the protocols and never configurable; what
//! this module governs is decode *policy* around diagnostics (how much of
//! an offending buffer is rendered into error hex dumps) and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//!
//! ## Security Considerations
//! - The hex-dump cap bounds error-message size against adversarial
//!   multi-megabyte captures

use crate::error::{ProtocolError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::RwLock;
use tracing::Level;

/// Default number of bytes rendered into error hex dumps
pub const DEFAULT_MAX_DUMP_BYTES: usize = 64;

/// Process-wide decode policy consulted by the header parsers.
static DECODE_POLICY: Lazy<RwLock<DecodeConfig>> =
    Lazy::new(|| RwLock::new(DecodeConfig::default()));

/// Install `config` as the process-wide decode policy.
///
/// The header parsers consult the installed policy when rendering
/// diagnostics, so this takes effect for every subsequent decode in the
/// process.
///
/// # Errors
///
/// Fails with [`ProtocolError::Config`] when the policy lock is poisoned.
pub fn install_decode_policy(config: DecodeConfig) -> Result<()> {
    let mut policy = DECODE_POLICY
        .write()
        .map_err(|e| ProtocolError::Config(format!("Decode policy lock poisoned: {e}")))?;
    *policy = config;
    Ok(())
}

/// Snapshot of the process-wide decode policy.
///
/// Falls back to the defaults when the policy lock is poisoned, so decode
/// error paths stay infallible.
pub fn decode_policy() -> DecodeConfig {
    DECODE_POLICY
        .read()
        .map(|policy| policy.clone())
        .unwrap_or_default()
}

/// Main configuration structure for the codec
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Decode diagnostics configuration
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::Config(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.decode.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }

    /// Install this configuration's decode section as the process-wide
    /// decode policy.
    ///
    /// Logging is applied separately through
    /// [`crate::utils::logging::init_with_config`].
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::Config`] on invalid settings or a
    /// poisoned policy lock.
    pub fn install(&self) -> Result<()> {
        self.validate_strict()?;
        install_decode_policy(self.decode.clone())
    }
}

/// Decode diagnostics configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecodeConfig {
    /// Maximum number of bytes rendered into error hex dumps
    pub max_dump_bytes: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_dump_bytes: DEFAULT_MAX_DUMP_BYTES,
        }
    }
}

impl DecodeConfig {
    /// Validate decode configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_dump_bytes == 0 {
            errors.push("Hex dump cap must be greater than 0".to_string());
        } else if self.max_dump_bytes > 4096 {
            errors.push(format!(
                "Hex dump cap very large: {} bytes (maximum recommended: 4096)",
                self.max_dump_bytes
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("packet-protocol"),
            log_level: Level::INFO,
            log_to_console: true,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CodecConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.validate_strict().is_ok());
    }

    #[test]
    fn example_config_round_trips() {
        let example = CodecConfig::example_config();
        let parsed = CodecConfig::from_toml(&example).expect("example config should parse");
        assert_eq!(parsed.decode.max_dump_bytes, DEFAULT_MAX_DUMP_BYTES);
        assert_eq!(parsed.logging.log_level, Level::INFO);
    }

    #[test]
    fn zero_dump_cap_fails_validation() {
        let config = CodecConfig::from_toml("[decode]\nmax_dump_bytes = 0\n").unwrap();
        assert!(config.validate_strict().is_err());
    }

    #[test]
    fn installed_dump_cap_truncates_decode_diagnostics() {
        use crate::protocol::eap::EapPacket;
        use bytes::Bytes;

        let config =
            CodecConfig::from_toml("[decode]\nmax_dump_bytes = 2\n").unwrap();
        config.install().unwrap();

        let buf = Bytes::from_static(&[0x01, 0x00, 0x00]);
        let err = EapPacket::decode(&buf, 0, 3).unwrap_err();
        match err {
            ProtocolError::MalformedHeader { dump, .. } => {
                assert_eq!(dump, "01 00 ..");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        install_decode_policy(DecodeConfig::default()).unwrap();
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let result = CodecConfig::from_toml("[logging]\napp_name = \"x\"\nlog_level = \"loud\"\nlog_to_console = true\n");
        assert!(result.is_err());
    }
}
