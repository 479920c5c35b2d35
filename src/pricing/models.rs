use crate::currency::{Currency, Money};
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency advertising costs are quoted in
pub const ADVERTISING_CURRENCY: Currency = Currency::Usd;

/// Discount or markup on the converted price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "percent", rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    None,
    DiscountPercent(Decimal),
    MarkupPercent(Decimal),
}

/// Amount a discount or markup percentage is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentBase {
    /// The converted base price, before tax
    Base,
    /// The converted base price with tax added
    #[default]
    Taxed,
}

impl FromStr for AdjustmentBase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" | "pre-tax" => Ok(AdjustmentBase::Base),
            "taxed" | "post-tax" => Ok(AdjustmentBase::Taxed),
            other => Err(format!(
                "unknown adjustment base '{}' (expected 'base' or 'taxed')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMode {
    Air,
    Sea,
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingMode::Air => f.write_str("Air"),
            ShippingMode::Sea => f.write_str("Sea"),
        }
    }
}

impl FromStr for ShippingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(ShippingMode::Air),
            "sea" => Ok(ShippingMode::Sea),
            other => Err(format!("unknown shipping mode '{}' (expected 'air' or 'sea')", other)),
        }
    }
}

/// Parcel dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: Decimal,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
}

impl Dimensions {
    pub fn new(length_cm: Decimal, width_cm: Decimal, height_cm: Decimal) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Delivery {
    /// Flat delivery cost in CAD
    FixedCost { cost_cad: Decimal },
    /// Cost derived from parcel size and weight
    Computed {
        dimensions: Dimensions,
        real_weight_kg: Decimal,
        mode: ShippingMode,
    },
}

/// An optional pricing stage.
///
/// `Omitted` stages produce no line item. `Excluded` stages are listed as
/// excluded and contribute nothing, whatever their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Stage<T> {
    Omitted,
    Excluded(T),
    Included(T),
}

impl<T> Default for Stage<T> {
    fn default() -> Self {
        Stage::Omitted
    }
}

impl<T> Stage<T> {
    /// Build from a value and an include toggle
    pub fn toggled(value: Option<T>, include: bool) -> Self {
        match (value, include) {
            (None, _) => Stage::Omitted,
            (Some(v), true) => Stage::Included(v),
            (Some(v), false) => Stage::Excluded(v),
        }
    }

    pub fn included(&self) -> Option<&T> {
        match self {
            Stage::Included(v) => Some(v),
            _ => None,
        }
    }
}

/// Input bundle for one price computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub base_price: Money,
    pub target_currency: Currency,
    #[serde(default)]
    pub adjustment: Adjustment,
    /// Fraction, e.g. 0.13 for 13%
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Advertising cost in USD
    #[serde(default)]
    pub advertising: Stage<Decimal>,
    #[serde(default)]
    pub delivery: Stage<Delivery>,
}

impl PricingRequest {
    pub fn new(base_price: Money, target_currency: Currency) -> Self {
        Self {
            base_price,
            target_currency,
            adjustment: Adjustment::None,
            tax_rate: Decimal::ZERO,
            advertising: Stage::Omitted,
            delivery: Stage::Omitted,
        }
    }

    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = adjustment;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn with_advertising(mut self, advertising: Stage<Decimal>) -> Self {
        self.advertising = advertising;
        self
    }

    pub fn with_delivery(mut self, delivery: Stage<Delivery>) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn base_currency(&self) -> Currency {
        self.base_price.currency
    }

    /// Reject negative inputs. Excluded stages are not checked.
    pub fn validate(&self) -> Result<()> {
        non_negative("base price", self.base_price.amount)?;
        non_negative("tax rate", self.tax_rate)?;

        match self.adjustment {
            Adjustment::None => {}
            Adjustment::DiscountPercent(p) => non_negative("discount percent", p)?,
            Adjustment::MarkupPercent(p) => non_negative("markup percent", p)?,
        }

        if let Some(cost) = self.advertising.included() {
            non_negative("advertising cost", *cost)?;
        }

        match self.delivery.included() {
            Some(Delivery::FixedCost { cost_cad }) => non_negative("delivery cost", *cost_cad)?,
            Some(Delivery::Computed {
                dimensions,
                real_weight_kg,
                ..
            }) => {
                non_negative("length", dimensions.length_cm)?;
                non_negative("width", dimensions.width_cm)?;
                non_negative("height", dimensions.height_cm)?;
                non_negative("real weight", *real_weight_kg)?;
            }
            None => {}
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::InvalidInput {
            field,
            reason: format!("must be >= 0, got {}", value),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    BasePrice,
    Tax,
    Discount,
    Markup,
    Delivery,
    Advertising,
}

/// Weights behind a computed delivery cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub mode: ShippingMode,
    pub real_weight_kg: Decimal,
    pub formula_weight_kg: Decimal,
    pub charged_weight_kg: Decimal,
}

/// One row of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineKind,
    pub label: String,
    /// Amount before conversion, in its own currency
    pub source: Option<Money>,
    /// Signed contribution to the total, in the target currency
    pub amount: Money,
    pub included: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryDetails>,
}

impl LineItem {
    pub fn new(
        kind: LineKind,
        label: impl Into<String>,
        source: Option<Money>,
        amount: Money,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            source,
            amount,
            included: true,
            delivery: None,
        }
    }

    pub fn excluded(kind: LineKind, label: impl Into<String>, target: Currency) -> Self {
        Self {
            kind,
            label: label.into(),
            source: None,
            amount: Money::zero(target),
            included: false,
            delivery: None,
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.included {
            return write!(f, "{}: Excluded", self.label);
        }
        match self.source {
            Some(source) => write!(f, "{}: {} → {}", self.label, source, self.amount),
            None if self.amount.amount.is_sign_negative() && !self.amount.amount.is_zero() => {
                write!(f, "{}: −{}", self.label, self.amount.negate())
            }
            None => write!(f, "{}: +{}", self.label, self.amount),
        }
    }
}

/// Itemized result of a computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub target: Currency,
    pub items: Vec<LineItem>,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn item(&self, kind: LineKind) -> Option<&LineItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Sum of every line item's signed contribution
    pub fn items_total(&self) -> Result<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(self.target), |acc, item| acc.checked_add(item.amount))
    }
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "- {}", item)?;
            if let Some(details) = &item.delivery {
                writeln!(
                    f,
                    "  real weight {} kg, formula weight {} kg, charged {} kg",
                    details.real_weight_kg.normalize(),
                    details.formula_weight_kg.normalize(),
                    details.charged_weight_kg.normalize()
                )?;
            }
        }
        write!(f, "Final Price: {}", self.total)
    }
}
