use anyhow::Result;
use colored::Colorize;
use price_calculator::config::{mask_api_key, Config, RateSource};
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    let sanitized = sanitize_secrets(cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; print a summary of it
pub fn validate(cfg: &Config) -> Result<()> {
    info!("Configuration validation successful");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());

    match cfg.rates.source {
        RateSource::Api => {
            println!("  {}: live API ({})", "Rates".cyan(), cfg.rates.base_url);
            println!("    Timeout: {}s", cfg.rates.timeout_seconds);
            let key = if cfg.rates.api_key.is_empty() {
                "not set".dimmed().to_string()
            } else {
                mask_api_key(&cfg.rates.api_key)
            };
            println!("    API Key: {}", key);
        }
        RateSource::Fixed => {
            println!("  {}: fixed", "Rates".cyan());
        }
    }
    for entry in &cfg.rates.fixed {
        println!("    {} → {} = {}", entry.from, entry.to, entry.rate.normalize());
    }
    println!();

    println!("  {}:", "Delivery".cyan());
    println!("    Volumetric divisor: {}", cfg.delivery.volumetric_divisor.normalize());
    println!("    Air: {} CAD/kg", cfg.delivery.air_rate_per_kg.normalize());
    println!("    Sea: {} CAD/kg", cfg.delivery.sea_rate_per_kg.normalize());
    println!("    Handling fee: {} CAD", cfg.delivery.handling_fee.normalize());
    println!();

    println!(
        "  {}: {:?}",
        "Adjustment base".cyan(),
        cfg.pricing.adjustment_base
    );
    println!(
        "  {}: {} ({:?})",
        "Log Level".cyan(),
        cfg.logging.level,
        cfg.logging.format
    );

    Ok(())
}

/// Sanitize secrets in configuration for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.rates.api_key = mask_api_key(&sanitized.rates.api_key);
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_secrets_masks_api_key() {
        let mut cfg = Config::default();
        cfg.rates.api_key = "cf5d8f6a9b86c63a5aaf8c29".to_string();

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.rates.api_key, "cf5d...8c29");
        assert_eq!(cfg.rates.api_key, "cf5d8f6a9b86c63a5aaf8c29");
    }

    #[test]
    fn test_sanitized_config_serializes_to_toml() {
        let sanitized = sanitize_secrets(&Config::default());
        let toml_string = toml::to_string_pretty(&sanitized).unwrap();
        assert!(toml_string.contains("[rates]"));
        assert!(toml_string.contains("adjustment_base = \"taxed\""));
    }
}
