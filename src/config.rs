//! Tuning knobs for building and querying a [`ZOrderIndex`](crate::ZOrderIndex).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// A bounding box narrower than this on either axis cannot be indexed.
    /// Default: 0.01
    pub min_extent: f32,

    /// A code range is emitted without further splitting once it spans at most
    /// `area * waste_factor + waste_slack` codes.
    /// Default: 1.1
    pub waste_factor: f64,

    /// Default: 4
    pub waste_slack: u64,

    /// Query rectangles are snapped outward to blocks of roughly
    /// `max(width, height) / block_divisor` grid cells.
    /// Default: 8
    pub block_divisor: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_extent: 0.01,
            waste_factor: 1.1,
            waste_slack: 4,
            block_divisor: 8,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_extent.is_finite() || self.min_extent < 0.0 {
            return Err(Error::InvalidConfig {
                field: "min_extent",
                reason: "must be finite and non-negative",
            });
        }
        if !self.waste_factor.is_finite() || self.waste_factor < 1.0 {
            return Err(Error::InvalidConfig {
                field: "waste_factor",
                reason: "must be finite and at least 1.0",
            });
        }
        if self.block_divisor == 0 {
            return Err(Error::InvalidConfig {
                field: "block_divisor",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
