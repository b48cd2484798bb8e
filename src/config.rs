//! Order engine settings.
//!
//! Loaded from the optional `config/config.toml` (section `[orders]`) and
//! overridden by `GROCERY__ORDERS__*` environment variables.

use ::config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderConfig {
    /// Flat shipping fee charged on every order.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: Decimal,
    /// Upper bound on lines in one order request.
    #[serde(default = "default_max_items_per_order")]
    pub max_items_per_order: usize,
}

fn default_shipping_fee() -> Decimal {
    Decimal::new(1_500_000, 2)
}

fn default_max_items_per_order() -> usize {
    100
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            shipping_fee: default_shipping_fee(),
            max_items_per_order: default_max_items_per_order(),
        }
    }
}

impl OrderConfig {
    /// Load from `config/config.toml`, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from a specific file (optional), then environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("GROCERY").separator("__"))
            .build()?;

        match settings.get::<OrderConfig>("orders") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(OrderConfig::default()),
            Err(err) => Err(ConfigError::Message(format!(
                "orders configuration is invalid: {}",
                err
            ))),
        }
    }
}
