use clap::{Args, Parser, Subcommand};
use price_calculator::pricing::{AdjustmentBase, ShippingMode};
use price_calculator::Currency;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "price-calc", version, about = "Price calculator (CAD/USD)")]
pub struct Cli {
    /// Configuration file path (defaults to ./price-calc.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute an itemized price
    Quote(QuoteArgs),

    /// Look up a single exchange rate
    Rate {
        /// Currency to convert from
        base: Currency,

        /// Currency to convert to
        target: Currency,

        /// Amount to convert
        #[arg(short, long)]
        amount: Option<Decimal>,

        /// Use the configured fixed rates instead of the live API
        #[arg(long)]
        offline: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Base price
    #[arg(short, long)]
    pub price: Decimal,

    /// Currency of the base price
    #[arg(long, default_value = "CAD")]
    pub from: Currency,

    /// Currency of the final price
    #[arg(long, default_value = "USD")]
    pub to: Currency,

    /// Discount percentage
    #[arg(long, conflicts_with = "markup")]
    pub discount: Option<Decimal>,

    /// Markup percentage
    #[arg(long)]
    pub markup: Option<Decimal>,

    /// Tax rate as a fraction (0.13 for 13%)
    #[arg(long, default_value = "0")]
    pub tax: Decimal,

    /// Apply discount/markup to the pre-tax base or the taxed amount
    #[arg(long)]
    pub adjust_on: Option<AdjustmentBase>,

    /// Advertising cost in USD
    #[arg(long)]
    pub ad: Option<Decimal>,

    /// List advertising as excluded
    #[arg(long)]
    pub exclude_ad: bool,

    /// Flat delivery cost in CAD
    #[arg(long, conflicts_with = "mode")]
    pub delivery_cost: Option<Decimal>,

    /// Shipping mode for a computed delivery fee
    #[arg(long)]
    pub mode: Option<ShippingMode>,

    /// Parcel length (cm)
    #[arg(long, default_value = "0")]
    pub length: Decimal,

    /// Parcel width (cm)
    #[arg(long, default_value = "0")]
    pub width: Decimal,

    /// Parcel height (cm)
    #[arg(long, default_value = "0")]
    pub height: Decimal,

    /// Real weight (kg)
    #[arg(long, default_value = "0")]
    pub real_weight: Decimal,

    /// List delivery as excluded
    #[arg(long)]
    pub exclude_delivery: bool,

    /// Use the configured fixed rates instead of the live API
    #[arg(long)]
    pub offline: bool,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_quote_defaults() {
        let cli = Cli::try_parse_from(["price-calc", "quote", "--price", "100"]).unwrap();

        match cli.command {
            Commands::Quote(args) => {
                assert_eq!(args.price, Decimal::new(100, 0));
                assert_eq!(args.from, Currency::Cad);
                assert_eq!(args.to, Currency::Usd);
                assert!(args.tax.is_zero());
                assert!(args.mode.is_none());
                assert!(!args.json);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_parsing_quote_full() {
        let args = vec![
            "price-calc", "quote", "--price", "19.99", "--from", "usd", "--to", "cad",
            "--markup", "15", "--tax", "0.13", "--adjust-on", "base", "--mode", "sea",
            "--length", "30", "--width", "20", "--height", "10", "--ad", "5", "--exclude-ad",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Quote(args) => {
                assert_eq!(args.from, Currency::Usd);
                assert_eq!(args.to, Currency::Cad);
                assert_eq!(args.markup, Some(Decimal::new(15, 0)));
                assert_eq!(args.adjust_on, Some(AdjustmentBase::Base));
                assert_eq!(args.mode, Some(ShippingMode::Sea));
                assert!(args.exclude_ad);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_rejects_discount_with_markup() {
        let args = vec!["price-calc", "quote", "--price", "1", "--discount", "5", "--markup", "5"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_rejects_unsupported_currency() {
        let args = vec!["price-calc", "quote", "--price", "1", "--to", "EUR"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_rate() {
        let cli = Cli::try_parse_from(["price-calc", "rate", "USD", "CAD", "--offline"]).unwrap();

        match cli.command {
            Commands::Rate {
                base,
                target,
                offline,
                amount,
            } => {
                assert_eq!(base, Currency::Usd);
                assert_eq!(target, Currency::Cad);
                assert!(offline);
                assert!(amount.is_none());
            }
            _ => panic!("Expected Rate command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let cli = Cli::try_parse_from(["price-calc", "config", "show"]).unwrap();

        match cli.command {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }
}
