/*!
 * Configuration Module
 * JSON configuration for building a codec once at setup
 */

mod loader;
mod types;

pub use types::{CodecConfig, GroupSpec};
