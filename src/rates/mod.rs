//! Exchange rate lookup
//!
//! The engine never talks to a rate source directly. A [`RateProvider`] is
//! asked for the handful of pairs a computation needs, the answers are
//! collected into a [`ConversionTable`], and the engine reads from that table.

pub mod exchange_api;
pub mod fixed;

use crate::config::{RateSource, RatesConfig};
use crate::currency::Currency;
use crate::error::{PricingError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub use exchange_api::ExchangeRateApi;
pub use fixed::FixedRates;

/// A source of currency conversion rates.
///
/// `lookup` returns how many units of `target` one unit of `base` buys.
/// Implementations may assume `base != target`; identity pairs are answered
/// by the caller without a lookup.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Provider name (e.g. "exchange-api", "fixed")
    fn name(&self) -> &str;

    async fn lookup(&self, base: Currency, target: Currency) -> Result<Decimal>;
}

/// Rates resolved for a single computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionTable {
    rates: BTreeMap<(Currency, Currency), Decimal>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rate. Identity pairs are ignored, they are always 1.
    pub fn insert(&mut self, base: Currency, target: Currency, rate: Decimal) -> Result<()> {
        if base == target {
            return Ok(());
        }
        if rate <= Decimal::ZERO {
            return Err(PricingError::rate_unavailable(
                base,
                target,
                format!("rate must be positive, got {}", rate),
            ));
        }
        self.rates.insert((base, target), rate);
        Ok(())
    }

    pub fn with_rate(mut self, base: Currency, target: Currency, rate: Decimal) -> Result<Self> {
        self.insert(base, target, rate)?;
        Ok(self)
    }

    pub fn contains(&self, base: Currency, target: Currency) -> bool {
        base == target || self.rates.contains_key(&(base, target))
    }

    /// Rate for `base → target`; exactly 1 when the currencies match
    pub fn rate(&self, base: Currency, target: Currency) -> Result<Decimal> {
        if base == target {
            return Ok(Decimal::ONE);
        }
        self.rates.get(&(base, target)).copied().ok_or_else(|| {
            PricingError::rate_unavailable(base, target, "pair missing from conversion table")
        })
    }

    /// Fetch every pair a computation from `base` into `target` may need:
    /// base → target, CAD → target and USD → target.
    ///
    /// Each distinct non-identity pair is looked up once. The first failure
    /// aborts resolution.
    pub async fn resolve(
        provider: &dyn RateProvider,
        base: Currency,
        target: Currency,
    ) -> Result<Self> {
        let mut table = Self::new();

        for from in [base, Currency::Cad, Currency::Usd] {
            if table.contains(from, target) {
                continue;
            }

            let rate = match provider.lookup(from, target).await {
                Ok(rate) => rate,
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        base = %from,
                        target = %target,
                        error = %e,
                        "Exchange rate lookup failed"
                    );
                    return Err(e);
                }
            };

            debug!(
                provider = provider.name(),
                base = %from,
                target = %target,
                rate = %rate,
                "Resolved exchange rate"
            );
            table.insert(from, target, rate)?;
        }

        Ok(table)
    }
}

/// Build the provider selected by configuration
pub fn build_provider(config: &RatesConfig) -> Result<Box<dyn RateProvider>> {
    match config.source {
        RateSource::Api => Ok(Box::new(ExchangeRateApi::new(config)?)),
        RateSource::Fixed => Ok(Box::new(FixedRates::from_config(&config.fixed)?)),
    }
}
