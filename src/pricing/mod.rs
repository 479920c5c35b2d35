pub mod delivery;
pub mod engine;
pub mod models;

pub use delivery::{charged_weight, DeliveryTariff};
pub use engine::{convert_amount, EngineConfig, PricingEngine};
pub use models::{
    Adjustment, AdjustmentBase, Delivery, DeliveryDetails, Dimensions, LineItem, LineKind,
    PriceBreakdown, PricingRequest, ShippingMode, Stage,
};
