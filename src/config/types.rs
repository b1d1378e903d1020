//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::common::errors::{Result, TraderError};
use crate::common::types::{Quantity, Symbol};

pub const RAINFOREST_RESIN: &str = "RAINFOREST_RESIN";
pub const KELP: &str = "KELP";
pub const SQUID_INK: &str = "SQUID_INK";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Settings shared by every product
    #[serde(default)]
    pub trader: TraderSettings,
    /// Per-product strategy parameters
    #[serde(default = "default_products")]
    pub products: HashMap<Symbol, ProductParams>,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trader: TraderSettings::default(),
            products: default_products(),
            settings: AppSettings::default(),
        }
    }
}

impl AppConfig {
    /// Check every product's parameters
    pub fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            return Err(TraderError::Configuration(
                "at least one product must be configured".to_string(),
            ));
        }
        for (symbol, params) in &self.products {
            params.validate(symbol)?;
        }
        Ok(())
    }

    /// Parameters for a single product
    pub fn product(&self, symbol: &str) -> Option<&ProductParams> {
        self.products.get(symbol)
    }
}

/// Strategy parameters for one product
///
/// Static for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductParams {
    /// Fraction of the filtered spread a quote must be mispriced by before
    /// it is taken
    #[serde(default)]
    pub take_width: Decimal,
    /// Levels thinner than this are ignored by the filtered best prices
    #[serde(default)]
    pub min_volume: Quantity,
    /// Externally pinned reference price
    #[serde(default)]
    pub forced_fair_value: Option<Decimal>,
    /// Symmetric limit on the absolute position
    #[serde(default = "default_position_limit")]
    pub position_limit: Quantity,
}

impl Default for ProductParams {
    fn default() -> Self {
        Self {
            take_width: Decimal::ZERO,
            min_volume: 0,
            forced_fair_value: None,
            position_limit: default_position_limit(),
        }
    }
}

impl ProductParams {
    pub fn new(take_width: Decimal, min_volume: Quantity) -> Self {
        Self {
            take_width,
            min_volume,
            ..Self::default()
        }
    }

    pub fn with_forced_fair_value(mut self, fair_value: Decimal) -> Self {
        self.forced_fair_value = Some(fair_value);
        self
    }

    pub fn with_position_limit(mut self, limit: Quantity) -> Self {
        self.position_limit = limit;
        self
    }

    pub fn validate(&self, symbol: &str) -> Result<()> {
        let invalid = |reason: String| TraderError::InvalidParameters {
            product: symbol.to_string(),
            reason,
        };

        if self.take_width < Decimal::ZERO {
            return Err(invalid(format!("take_width {} is negative", self.take_width)));
        }
        if self.min_volume < 0 {
            return Err(invalid(format!("min_volume {} is negative", self.min_volume)));
        }
        if self.position_limit <= 0 {
            return Err(invalid(format!(
                "position_limit {} must be positive",
                self.position_limit
            )));
        }
        Ok(())
    }
}

fn default_position_limit() -> Quantity {
    50
}

fn default_products() -> HashMap<Symbol, ProductParams> {
    HashMap::from([
        (
            RAINFOREST_RESIN.to_string(),
            ProductParams::new(dec!(0.5), 10).with_forced_fair_value(dec!(10000)),
        ),
        (KELP.to_string(), ProductParams::new(dec!(1), 20)),
        (SQUID_INK.to_string(), ProductParams::new(dec!(1), 20)),
    ])
}

/// Settings shared by every product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderSettings {
    /// Auxiliary value handed back to the environment unchanged
    #[serde(default = "default_conversions")]
    pub conversions: i64,
    /// Upper bound on one flushed tick log line
    #[serde(default = "default_max_log_length")]
    pub max_log_length: usize,
}

impl Default for TraderSettings {
    fn default() -> Self {
        Self {
            conversions: default_conversions(),
            max_log_length: default_max_log_length(),
        }
    }
}

fn default_conversions() -> i64 {
    1
}

fn default_max_log_length() -> usize {
    3750
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
