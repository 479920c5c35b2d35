//! Delivery fee calculation
//!
//! The billable weight is the greater of the real weight and the volumetric
//! ("formula") weight `L × W × H / divisor`, rounded up to a whole kilogram.
//! The fee is `charged_weight × rate_per_kg + handling_fee`, in CAD.

use crate::currency::{checked_add, checked_div, checked_mul, Currency};
use crate::error::Result;
use crate::pricing::models::{Delivery, DeliveryDetails, Dimensions, ShippingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency delivery fees are quoted in
pub const DELIVERY_CURRENCY: Currency = Currency::Cad;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryTariff {
    pub volumetric_divisor: Decimal,
    pub air_rate_per_kg: Decimal,
    pub sea_rate_per_kg: Decimal,
    pub handling_fee: Decimal,
}

impl Default for DeliveryTariff {
    fn default() -> Self {
        Self {
            volumetric_divisor: Decimal::new(500, 0),
            air_rate_per_kg: Decimal::new(845, 2),
            sea_rate_per_kg: Decimal::new(445, 2),
            handling_fee: Decimal::new(15, 0),
        }
    }
}

impl DeliveryTariff {
    pub fn rate_per_kg(&self, mode: ShippingMode) -> Decimal {
        match mode {
            ShippingMode::Air => self.air_rate_per_kg,
            ShippingMode::Sea => self.sea_rate_per_kg,
        }
    }

    /// Volumetric weight in kg
    pub fn formula_weight(&self, dimensions: &Dimensions) -> Result<Decimal> {
        let area = checked_mul(dimensions.length_cm, dimensions.width_cm, "formula weight")?;
        let volume = checked_mul(area, dimensions.height_cm, "formula weight")?;
        checked_div(volume, self.volumetric_divisor, "formula weight")
    }

    /// Delivery cost in CAD, with weight details when the cost was computed
    pub fn cost(&self, delivery: &Delivery) -> Result<(Decimal, Option<DeliveryDetails>)> {
        match *delivery {
            Delivery::FixedCost { cost_cad } => Ok((cost_cad, None)),
            Delivery::Computed {
                dimensions,
                real_weight_kg,
                mode,
            } => {
                let formula_weight_kg = self.formula_weight(&dimensions)?;
                let charged_weight_kg = charged_weight(formula_weight_kg, real_weight_kg);
                let freight =
                    checked_mul(charged_weight_kg, self.rate_per_kg(mode), "delivery cost")?;
                let cost = checked_add(freight, self.handling_fee, "delivery cost")?;

                let details = DeliveryDetails {
                    mode,
                    real_weight_kg,
                    formula_weight_kg,
                    charged_weight_kg,
                };
                Ok((cost, Some(details)))
            }
        }
    }
}

/// `ceil(max(formula, real))`; exact integers are not rounded up
pub fn charged_weight(formula_weight_kg: Decimal, real_weight_kg: Decimal) -> Decimal {
    formula_weight_kg.max(real_weight_kg).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(l: i64, w: i64, h: i64) -> Dimensions {
        Dimensions::new(Decimal::new(l, 0), Decimal::new(w, 0), Decimal::new(h, 0))
    }

    #[test]
    fn test_formula_weight_uses_divisor_500() {
        let tariff = DeliveryTariff::default();
        assert_eq!(tariff.formula_weight(&dims(50, 50, 40)).unwrap(), Decimal::new(200, 0));
    }

    #[test]
    fn test_charged_weight_rounds_up() {
        assert_eq!(charged_weight(Decimal::new(41, 1), Decimal::ZERO), Decimal::new(5, 0));
        assert_eq!(charged_weight(Decimal::ONE, Decimal::new(23, 1)), Decimal::new(3, 0));
    }

    #[test]
    fn test_charged_weight_exact_integer_not_rounded() {
        assert_eq!(charged_weight(Decimal::new(40, 1), Decimal::ZERO), Decimal::new(4, 0));
        assert_eq!(charged_weight(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_air_cost_for_large_parcel() {
        let tariff = DeliveryTariff::default();
        let (cost, details) = tariff
            .cost(&Delivery::Computed {
                dimensions: dims(50, 50, 40),
                real_weight_kg: Decimal::ZERO,
                mode: ShippingMode::Air,
            })
            .unwrap();

        assert_eq!(cost, Decimal::new(17050, 1));
        let details = details.unwrap();
        assert_eq!(details.charged_weight_kg, Decimal::new(200, 0));
        assert_eq!(details.formula_weight_kg, Decimal::new(200, 0));
    }

    #[test]
    fn test_sea_cost_uses_real_weight_when_heavier() {
        let tariff = DeliveryTariff::default();
        let (cost, _) = tariff
            .cost(&Delivery::Computed {
                dimensions: dims(10, 10, 10),
                real_weight_kg: Decimal::new(25, 1),
                mode: ShippingMode::Sea,
            })
            .unwrap();

        // formula 2 kg, real 2.5 kg -> 3 kg * 4.45 + 15
        assert_eq!(cost, Decimal::new(2835, 2));
    }

    #[test]
    fn test_empty_parcel_pays_handling_fee() {
        let tariff = DeliveryTariff::default();
        let (cost, _) = tariff
            .cost(&Delivery::Computed {
                dimensions: Dimensions::default(),
                real_weight_kg: Decimal::ZERO,
                mode: ShippingMode::Air,
            })
            .unwrap();
        assert_eq!(cost, Decimal::new(15, 0));
    }

    #[test]
    fn test_fixed_cost_passes_through() {
        let tariff = DeliveryTariff::default();
        let (cost, details) = tariff
            .cost(&Delivery::FixedCost {
                cost_cad: Decimal::new(10, 0),
            })
            .unwrap();
        assert_eq!(cost, Decimal::new(10, 0));
        assert!(details.is_none());
    }
}
