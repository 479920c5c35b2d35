use crate::{
    config::{mask_api_key, RatesConfig},
    currency::Currency,
    error::{PricingError, Result},
    rates::RateProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Response body of `GET /latest/{base}`
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, serde_json::Number>>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

/// Live exchange rates from an open.er-api.com compatible service
pub struct ExchangeRateApi {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ExchangeRateApi {
    pub fn new(config: &RatesConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PricingError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &RatesConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn latest_url(&self, base: Currency) -> String {
        format!("{}/latest/{}", self.base_url, base.code())
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    fn name(&self) -> &str {
        "exchange-api"
    }

    async fn lookup(&self, base: Currency, target: Currency) -> Result<Decimal> {
        if base == target {
            return Ok(Decimal::ONE);
        }

        let url = self.latest_url(base);
        debug!(url = %url, api_key = %mask_api_key(&self.api_key), "Fetching exchange rates");

        let mut request = self.client.get(&url).timeout(self.timeout);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PricingError::rate_unavailable(base, target, e.to_string()))?;

        // Check for HTTP errors
        if !response.status().is_success() {
            let status = response.status();
            return Err(PricingError::rate_unavailable(
                base,
                target,
                format!("rate service returned {}", status),
            ));
        }

        let body: LatestRatesResponse = response.json().await.map_err(|e| {
            PricingError::rate_unavailable(base, target, format!("malformed response: {}", e))
        })?;

        parse_rate(body, base, target)
    }
}

fn parse_rate(body: LatestRatesResponse, base: Currency, target: Currency) -> Result<Decimal> {
    if body.result.as_deref() != Some("success") {
        let reason = match body.error_type {
            Some(kind) => format!("unexpected API response: {}", kind),
            None => "unexpected API response".to_string(),
        };
        return Err(PricingError::rate_unavailable(base, target, reason));
    }

    let rates = body
        .rates
        .ok_or_else(|| PricingError::rate_unavailable(base, target, "response has no rates"))?;

    let number = rates.get(target.code()).ok_or_else(|| {
        PricingError::rate_unavailable(
            base,
            target,
            format!("target currency '{}' not found in rates", target),
        )
    })?;

    // Parse the textual form so 0.73 stays 0.73
    let text = number.to_string();
    let rate = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| {
            PricingError::rate_unavailable(base, target, format!("invalid rate '{}': {}", text, e))
        })?;

    if rate <= Decimal::ZERO {
        return Err(PricingError::rate_unavailable(
            base,
            target,
            format!("rate must be positive, got {}", rate),
        ));
    }

    Ok(rate)
}
