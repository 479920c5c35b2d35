use crate::currency::Currency;
use crate::pricing::delivery::DeliveryTariff;
use crate::pricing::models::AdjustmentBase;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "price-calc";
pub const ENV_PREFIX: &str = "PRICE_CALC";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rates: RatesConfig,
    pub delivery: DeliveryTariff,
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Live lookup against the exchange rate API
    Api,
    /// Rates listed under `[[rates.fixed]]`
    Fixed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RatesConfig {
    pub source: RateSource,
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub fixed: Vec<FixedRateConfig>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            source: RateSource::Api,
            base_url: "https://open.er-api.com/v6".to_string(),
            api_key: String::new(),
            timeout_seconds: 5,
            fixed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FixedRateConfig {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub adjustment_base: AdjustmentBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Load configuration from defaults, an optional TOML file and the environment.
///
/// Without an explicit path, `price-calc.toml` in the working directory is
/// used when present. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    validate_rates(&cfg.rates)?;

    let tariff = &cfg.delivery;
    if tariff.volumetric_divisor <= Decimal::ZERO {
        anyhow::bail!("delivery.volumetric_divisor must be greater than zero");
    }
    if tariff.air_rate_per_kg < Decimal::ZERO || tariff.sea_rate_per_kg < Decimal::ZERO {
        anyhow::bail!("delivery per-kg rates cannot be negative");
    }
    if tariff.handling_fee < Decimal::ZERO {
        anyhow::bail!("delivery.handling_fee cannot be negative");
    }

    if cfg.logging.level.trim().is_empty() {
        anyhow::bail!("logging.level cannot be empty");
    }

    Ok(())
}

/// Check the rate source settings on their own.
///
/// Used again when a command overrides the configured source.
pub fn validate_rates(rates: &RatesConfig) -> anyhow::Result<()> {
    match rates.source {
        RateSource::Api => {
            if rates.timeout_seconds == 0 {
                anyhow::bail!("rates.timeout_seconds must be greater than zero");
            }
            if let Err(e) = reqwest::Url::parse(&rates.base_url) {
                anyhow::bail!("rates.base_url '{}' is not a valid URL: {}", rates.base_url, e);
            }
        }
        RateSource::Fixed => {
            if rates.fixed.is_empty() {
                anyhow::bail!(
                    "rates.source = \"fixed\" requires at least one [[rates.fixed]] entry"
                );
            }
        }
    }

    for entry in &rates.fixed {
        if entry.rate <= Decimal::ZERO {
            anyhow::bail!(
                "Fixed rate {} → {} must be positive, got {}",
                entry.from,
                entry.to,
                entry.rate
            );
        }
    }

    Ok(())
}

impl RatesConfig {
    /// Copy of these settings switched to the `[[rates.fixed]]` table
    pub fn offline(&self) -> anyhow::Result<RatesConfig> {
        let rates = RatesConfig {
            source: RateSource::Fixed,
            ..self.clone()
        };
        validate_rates(&rates).map_err(|e| anyhow::anyhow!("--offline: {}", e))?;
        Ok(rates)
    }
}

/// Mask an API key for safe display
///
/// Shows first 4 and last 4 characters
/// Example: "cf5d8f6a9b86c63a5aaf8c29" -> "cf5d...8c29"
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let len = key.chars().count();
    if len <= 8 {
        return "***".to_string();
    }

    let prefix: String = key.chars().take(4).collect();
    let suffix: String = key.chars().skip(len - 4).collect();

    format!("{}...{}", prefix, suffix)
}
