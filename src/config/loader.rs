//! Configuration loader

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::Result;

/// Load configuration from defaults, file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_, `__` separated,
///    e.g. `APP__PRODUCTS__KELP__TAKE_WIDTH=2`)
/// 2. Configuration file (TOML format)
/// 3. Built-in defaults
///
/// Product tables merge per key, so a file that only tunes `KELP` keeps the
/// default parameters of every other product.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    let config = normalize_symbols(config);
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML string, on top of the defaults
pub fn load_from_str(toml: &str) -> Result<AppConfig> {
    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    let config = normalize_symbols(config);
    config.validate()?;
    Ok(config)
}

/// Product keys are matched against exchange symbols, which are upper case.
/// Keys coming through the environment are lower-cased by the config crate;
/// when both spellings exist the lower-cased override wins.
fn normalize_symbols(mut config: AppConfig) -> AppConfig {
    let mut products = HashMap::with_capacity(config.products.len());
    for (symbol, params) in config.products {
        let upper = symbol.to_ascii_uppercase();
        if upper == symbol && products.contains_key(&upper) {
            continue;
        }
        products.insert(upper, params);
    }
    config.products = products;
    config
}
