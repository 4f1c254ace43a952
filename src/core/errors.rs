/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry operation result
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Lifecycle operation result
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Packed array decode result
pub type PackResult<T> = Result<T, PackError>;

/// Configuration load result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Capacity and layout violations raised at registration time
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RegistryError {
    #[error(
        "Permission '{name}' value {value} exceeds the maximum value {mask} for {bits} access bits{}",
        required_bits_hint(.required_bits)
    )]
    #[diagnostic(
        code(registry::capacity_exceeded),
        help("Increase accessBits or choose a smaller permission value.")
    )]
    CapacityExceeded {
        name: String,
        value: u32,
        mask: u32,
        bits: u32,
        required_bits: Option<u32>,
    },

    #[error(
        "No free bit left to auto-assign permission '{name}' (maximum value {mask}, {bits} access bits)"
    )]
    #[diagnostic(
        code(registry::auto_assign_exhausted),
        help("Increase accessBits or give the permission an explicit value.")
    )]
    AutoAssignExhausted { name: String, mask: u32, bits: u32 },

    #[error("Invalid access bit width {0}: must be between 1 and {max}", max = crate::core::limits::MAX_ACCESS_BITS)]
    #[diagnostic(
        code(registry::invalid_access_bits),
        help("A 32-bit bitmask needs at least one access bit and one group bit.")
    )]
    InvalidAccessBits(u32),
}

fn required_bits_hint(required_bits: &Option<u32>) -> String {
    match required_bits {
        Some(bits) => format!(" (requires at least {} bits)", bits),
        None => String::new(),
    }
}

/// Deprecation and migration misuse
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LifecycleError {
    #[error("Group '{0}' not found")]
    #[diagnostic(
        code(lifecycle::group_not_found),
        help("Register the group before deprecating it or defining migrations for it.")
    )]
    GroupNotFound(String),
}

/// Malformed packed array input
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PackError {
    #[error("Invalid packed string: unknown width prefix {0:?}")]
    #[diagnostic(
        code(packing::invalid_prefix),
        help("Packed strings start with 'A' (8-bit), 'B' (16-bit) or 'C' (32-bit).")
    )]
    InvalidPrefix(String),

    #[error("Invalid packed string: {0}")]
    #[diagnostic(
        code(packing::invalid_base64),
        help("Check that the url-safe flag matches the one used when packing.")
    )]
    InvalidBase64(String),

    #[error("Invalid packed string: {len} bytes is not a multiple of the {width}-byte element size")]
    #[diagnostic(code(packing::invalid_length), help("The payload was truncated or corrupted."))]
    InvalidLength { len: usize, width: usize },
}

/// Configuration parsing and schema construction failures
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse), help("Configuration must be a JSON object."))]
    Parse(String),

    #[error("Invalid permission schema: {0}")]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Unified error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum PermbitsError {
    #[error("Registry error: {0}")]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Lifecycle error: {0}")]
    #[diagnostic(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Pack error: {0}")]
    #[diagnostic(transparent)]
    Pack(#[from] PackError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
