/*!
 * Configuration Loader
 * Parse JSON configuration and build codecs from it
 */

use super::types::CodecConfig;
use crate::codec::BitmaskCodec;
use crate::core::ConfigResult;
use log::info;

impl CodecConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> ConfigResult<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a codec; capacity violations surface as [`crate::core::ConfigError::Registry`]
    pub fn build(self) -> ConfigResult<BitmaskCodec> {
        let mut builder = BitmaskCodec::builder();

        for (name, value) in self.permissions {
            builder = builder.declare(name, value);
        }
        if let Some(bits) = self.access_bits {
            builder = builder.access_bits(bits);
        }
        if let Some(mask) = self.access_mask {
            builder = builder.access_mask(mask);
        }
        for (name, spec) in self.groups {
            builder = builder.group_definition(name, spec.into_definition());
        }
        for (name, members) in self.permission_sets {
            builder = builder.permission_set(name, members);
        }
        if let Some(standard) = self.standard_access {
            builder = builder.standard_access(standard);
        }

        let codec = builder.build()?;
        info!(
            "Loaded codec: {} permissions, {} groups, {} sets, {} access bits",
            codec.registry().len(),
            codec.registry().groups().len(),
            codec.sets().len(),
            codec.layout().access_bits()
        );
        Ok(codec)
    }
}

impl BitmaskCodec {
    pub fn from_config(config: CodecConfig) -> ConfigResult<Self> {
        config.build()
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        CodecConfig::from_json_str(json)?.build()
    }
}
