use crate::config::Config;
use crate::currency::{checked_add, checked_mul, percent_of, Currency, Money};
use crate::error::Result;
use crate::pricing::delivery::{DeliveryTariff, DELIVERY_CURRENCY};
use crate::pricing::models::{
    Adjustment, AdjustmentBase, LineItem, LineKind, PriceBreakdown, PricingRequest, Stage,
    ADVERTISING_CURRENCY,
};
use crate::rates::{ConversionTable, RateProvider};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Engine settings shared by every computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub adjustment_base: AdjustmentBase,
    pub tariff: DeliveryTariff,
}

impl From<&Config> for EngineConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            adjustment_base: cfg.pricing.adjustment_base,
            tariff: cfg.delivery.clone(),
        }
    }
}

/// Turns a [`PricingRequest`] into an itemized [`PriceBreakdown`].
///
/// Stages run in a fixed order: convert base price, tax, discount/markup,
/// delivery, advertising. Each stage that applies adds one line item and the
/// total is the sum of their signed amounts.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the required rates through `provider`, then compute.
    pub async fn quote(
        &self,
        request: &PricingRequest,
        provider: &dyn RateProvider,
    ) -> Result<PriceBreakdown> {
        request.validate()?;

        let rates =
            ConversionTable::resolve(provider, request.base_currency(), request.target_currency)
                .await?;
        let breakdown = self.compute(request, &rates)?;

        info!(
            provider = provider.name(),
            base = %request.base_price,
            target = %breakdown.target,
            total = %breakdown.total,
            "Price computed"
        );
        Ok(breakdown)
    }

    /// Compute a breakdown from already resolved rates.
    ///
    /// `rates` must hold base → target, CAD → target and USD → target even
    /// when a stage using them is excluded; a missing pair fails the whole
    /// computation.
    pub fn compute(
        &self,
        request: &PricingRequest,
        rates: &ConversionTable,
    ) -> Result<PriceBreakdown> {
        request.validate()?;

        let target = request.target_currency;
        let base_rate = rates.rate(request.base_currency(), target)?;
        let delivery_rate = rates.rate(DELIVERY_CURRENCY, target)?;
        let advertising_rate = rates.rate(ADVERTISING_CURRENCY, target)?;

        let mut items = Vec::with_capacity(5);

        // Base price
        let base_converted = request.base_price.convert(base_rate, target)?;
        items.push(LineItem::new(
            LineKind::BasePrice,
            "Base Price",
            Some(request.base_price),
            base_converted,
        ));

        // Tax
        let tax_amount = if request.tax_rate > Decimal::ZERO {
            let amount = checked_mul(base_converted.amount, request.tax_rate, "tax")?;
            items.push(LineItem::new(
                LineKind::Tax,
                format!("Tax ({}%)", as_percent(request.tax_rate)?),
                None,
                Money::new(amount, target),
            ));
            amount
        } else {
            Decimal::ZERO
        };
        let taxed = checked_add(base_converted.amount, tax_amount, "taxed price")?;

        // Discount / markup
        let basis = match self.config.adjustment_base {
            AdjustmentBase::Base => base_converted.amount,
            AdjustmentBase::Taxed => taxed,
        };
        match request.adjustment {
            Adjustment::None => {}
            Adjustment::DiscountPercent(p) => {
                let amount = percent_of(basis, p, "discount")?;
                items.push(LineItem::new(
                    LineKind::Discount,
                    format!("Discount ({}%)", p.normalize()),
                    None,
                    Money::new(-amount, target),
                ));
            }
            Adjustment::MarkupPercent(p) => {
                let amount = percent_of(basis, p, "markup")?;
                items.push(LineItem::new(
                    LineKind::Markup,
                    format!("Markup ({}%)", p.normalize()),
                    None,
                    Money::new(amount, target),
                ));
            }
        }

        // Delivery
        match &request.delivery {
            Stage::Omitted => {}
            Stage::Excluded(_) => {
                items.push(LineItem::excluded(LineKind::Delivery, "Delivery", target))
            }
            Stage::Included(delivery) => {
                let (cost_cad, details) = self.config.tariff.cost(delivery)?;
                let source = Money::new(cost_cad, DELIVERY_CURRENCY);
                let label = match &details {
                    Some(d) => format!("Delivery ({})", d.mode),
                    None => "Delivery".to_string(),
                };
                let converted = source.convert(delivery_rate, target)?;
                let mut item = LineItem::new(LineKind::Delivery, label, Some(source), converted);
                item.delivery = details;
                items.push(item);
            }
        }

        // Advertising
        match &request.advertising {
            Stage::Omitted => {}
            Stage::Excluded(_) => {
                items.push(LineItem::excluded(LineKind::Advertising, "Advertising", target))
            }
            Stage::Included(cost_usd) => {
                let source = Money::new(*cost_usd, ADVERTISING_CURRENCY);
                items.push(LineItem::new(
                    LineKind::Advertising,
                    "Advertising",
                    Some(source),
                    source.convert(advertising_rate, target)?,
                ));
            }
        }

        let mut breakdown = PriceBreakdown {
            target,
            items,
            total: Money::zero(target),
        };
        breakdown.total = breakdown.items_total()?;

        debug!(
            items = breakdown.items.len(),
            total = %breakdown.total,
            adjustment_base = ?self.config.adjustment_base,
            "Breakdown assembled"
        );
        Ok(breakdown)
    }
}

/// 0.13 -> 13
fn as_percent(fraction: Decimal) -> Result<Decimal> {
    Ok(checked_mul(fraction, Decimal::ONE_HUNDRED, "tax percent")?.normalize())
}

/// Convenience for callers that only need the rate for one pair
pub async fn convert_amount(
    provider: &dyn RateProvider,
    amount: Money,
    target: Currency,
) -> Result<Money> {
    if amount.currency == target {
        return Ok(amount);
    }
    let rate = provider.lookup(amount.currency, target).await?;
    amount.convert(rate, target)
}
