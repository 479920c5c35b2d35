use anyhow::Result;
use colored::Colorize;
use price_calculator::config::Config;
use price_calculator::pricing::convert_amount;
use price_calculator::rates::build_provider;
use price_calculator::{Currency, Money};
use rust_decimal::Decimal;
use tracing::info;

/// Execute the rate command
///
/// Prints the `base → target` rate, and the converted amount when one is given
pub async fn execute(
    cfg: &Config,
    base: Currency,
    target: Currency,
    amount: Option<Decimal>,
    offline: bool,
) -> Result<()> {
    let rates_config = if offline {
        cfg.rates.offline()?
    } else {
        cfg.rates.clone()
    };
    let provider = build_provider(&rates_config)?;
    info!(provider = provider.name(), base = %base, target = %target, "Looking up rate");

    let rate = convert_amount(provider.as_ref(), Money::new(Decimal::ONE, base), target).await?;
    println!(
        "1 {} = {} {}",
        base,
        rate.amount.normalize().to_string().green().bold(),
        target
    );

    if let Some(amount) = amount {
        let converted = Money::new(amount, base).convert(rate.amount, target)?;
        println!("{} = {}", Money::new(amount, base), converted.to_string().bold());
    }

    Ok(())
}
