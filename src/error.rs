use crate::currency::Currency;
use thiserror::Error;

/// Pricing error types
#[derive(Debug, Error)]
pub enum PricingError {
    /// Currency code outside the supported set
    #[error("Unsupported currency: {0} (only CAD and USD are supported)")]
    UnsupportedCurrency(String),

    /// Rate provider could not supply a required pair
    #[error("Exchange rate {base} → {target} unavailable: {reason}")]
    RateUnavailable {
        base: Currency,
        target: Currency,
        reason: String,
    },

    /// Negative amount, percentage, weight or dimension
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Arithmetic between two different currencies without conversion
    #[error("Currency mismatch: cannot combine {left} with {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// Decimal arithmetic overflowed
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PricingError {
    pub fn rate_unavailable(base: Currency, target: Currency, reason: impl Into<String>) -> Self {
        Self::RateUnavailable {
            base,
            target,
            reason: reason.into(),
        }
    }

    /// Short machine-readable name, used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedCurrency(_) => "unsupported_currency",
            Self::RateUnavailable { .. } => "rate_unavailable",
            Self::InvalidInput { .. } => "invalid_input",
            Self::CurrencyMismatch { .. } => "currency_mismatch",
            Self::Overflow(_) => "overflow",
            Self::Config(_) => "config_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PricingError::UnsupportedCurrency("EUR".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported currency: EUR (only CAD and USD are supported)"
        );

        let error = PricingError::rate_unavailable(Currency::Cad, Currency::Usd, "timeout");
        assert_eq!(error.to_string(), "Exchange rate CAD → USD unavailable: timeout");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(PricingError::Overflow("total").kind(), "overflow");
        assert_eq!(
            PricingError::rate_unavailable(Currency::Usd, Currency::Cad, "x").kind(),
            "rate_unavailable"
        );
        assert_eq!(PricingError::Config("bad".to_string()).kind(), "config_error");
    }
}
