use crate::{
    config::FixedRateConfig,
    currency::Currency,
    error::{PricingError, Result},
    rates::RateProvider,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Rates taken from configuration, for quoting without network access
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl FixedRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(entries: &[FixedRateConfig]) -> Result<Self> {
        entries.iter().try_fold(Self::new(), |rates, entry| {
            rates.with_rate(entry.from, entry.to, entry.rate)
        })
    }

    pub fn with_rate(mut self, base: Currency, target: Currency, rate: Decimal) -> Result<Self> {
        if rate <= Decimal::ZERO {
            return Err(PricingError::Config(format!(
                "fixed rate {} → {} must be positive, got {}",
                base, target, rate
            )));
        }
        self.rates.insert((base, target), rate);
        Ok(self)
    }
}

#[async_trait]
impl RateProvider for FixedRates {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn lookup(&self, base: Currency, target: Currency) -> Result<Decimal> {
        if base == target {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(&(base, target))
            .copied()
            .ok_or_else(|| PricingError::rate_unavailable(base, target, "no fixed rate configured"))
    }
}
