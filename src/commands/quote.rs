use crate::cli::QuoteArgs;
use anyhow::Result;
use colored::Colorize;
use price_calculator::config::Config;
use price_calculator::pricing::{
    Adjustment, Delivery, Dimensions, EngineConfig, LineItem, PriceBreakdown, PricingEngine,
    PricingRequest, Stage,
};
use price_calculator::rates::build_provider;
use price_calculator::Money;
use tracing::info;

/// Execute the quote command
pub async fn execute(cfg: &Config, args: &QuoteArgs) -> Result<()> {
    let request = build_request(args);

    let mut engine_config = EngineConfig::from(cfg);
    if let Some(base) = args.adjust_on {
        engine_config.adjustment_base = base;
    }
    let engine = PricingEngine::new(engine_config);

    let rates_config = if args.offline {
        cfg.rates.offline()?
    } else {
        cfg.rates.clone()
    };
    let provider = build_provider(&rates_config)?;
    info!(provider = provider.name(), "Computing quote");

    let breakdown = engine.quote(&request, provider.as_ref()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print_breakdown(&breakdown);
    }

    Ok(())
}

/// Map command-line inputs onto a pricing request
pub fn build_request(args: &QuoteArgs) -> PricingRequest {
    let adjustment = match (args.discount, args.markup) {
        (Some(p), _) => Adjustment::DiscountPercent(p),
        (None, Some(p)) => Adjustment::MarkupPercent(p),
        (None, None) => Adjustment::None,
    };

    let delivery = match (args.delivery_cost, args.mode) {
        (Some(cost_cad), _) => Some(Delivery::FixedCost { cost_cad }),
        (None, Some(mode)) => Some(Delivery::Computed {
            dimensions: Dimensions::new(args.length, args.width, args.height),
            real_weight_kg: args.real_weight,
            mode,
        }),
        (None, None) => None,
    };

    PricingRequest::new(Money::new(args.price, args.from), args.to)
        .with_adjustment(adjustment)
        .with_tax_rate(args.tax)
        .with_delivery(Stage::toggled(delivery, !args.exclude_delivery))
        .with_advertising(Stage::toggled(args.ad, !args.exclude_ad))
}

fn print_breakdown(breakdown: &PriceBreakdown) {
    println!("{}", "Input Summary".bold());
    for item in &breakdown.items {
        println!("  - {}", render_item(item));
        if let Some(details) = &item.delivery {
            println!(
                "      {} {} kg, {} {} kg, {} {} kg",
                "real weight".dimmed(),
                details.real_weight_kg.normalize(),
                "formula weight".dimmed(),
                details.formula_weight_kg.normalize(),
                "charged".dimmed(),
                details.charged_weight_kg.normalize()
            );
        }
    }
    println!("  {}", "---".dimmed());
    println!(
        "  {} {}",
        "Final Price:".bold(),
        breakdown.total.to_string().green().bold()
    );
}

fn render_item(item: &LineItem) -> String {
    if !item.included {
        return format!("{}: {}", item.label.cyan(), "Excluded".dimmed());
    }
    match item.source {
        Some(source) => format!(
            "{}: {} → {}",
            item.label.cyan(),
            source.to_string().bold(),
            item.amount
        ),
        None if item.amount.amount.is_sign_negative() && !item.amount.amount.is_zero() => {
            format!("{}: −{}", item.label.cyan(), item.amount.negate())
        }
        None => format!("{}: +{}", item.label.cyan(), item.amount),
    }
}
