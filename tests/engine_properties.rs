/// Property tests for the pricing engine
use price_calculator::pricing::{
    charged_weight, Adjustment, Delivery, Dimensions, LineKind, PricingEngine, PricingRequest,
    ShippingMode, Stage,
};
use price_calculator::rates::ConversionTable;
use price_calculator::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn table() -> ConversionTable {
    ConversionTable::new()
        .with_rate(Currency::Cad, Currency::Usd, Decimal::new(73, 2))
        .unwrap()
        .with_rate(Currency::Usd, Currency::Cad, Decimal::new(137, 2))
        .unwrap()
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Cad), Just(Currency::Usd)]
}

fn mode() -> impl Strategy<Value = ShippingMode> {
    prop_oneof![Just(ShippingMode::Air), Just(ShippingMode::Sea)]
}

fn cents(value: u32) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn adjusted_total(base: Decimal, adjustment: Adjustment) -> Decimal {
    let request = PricingRequest::new(Money::new(base, Currency::Usd), Currency::Usd)
        .with_tax_rate(Decimal::new(13, 2))
        .with_adjustment(adjustment);
    PricingEngine::default()
        .compute(&request, &table())
        .unwrap()
        .total
        .amount
}

proptest! {
    #[test]
    fn same_currency_keeps_base_price(price in 0u32..10_000_000, cur in currency()) {
        let base = Money::new(cents(price), cur);
        let request = PricingRequest::new(base, cur);

        let breakdown = PricingEngine::default().compute(&request, &table()).unwrap();

        prop_assert_eq!(breakdown.item(LineKind::BasePrice).unwrap().amount, base);
    }

    #[test]
    fn discount_is_strictly_decreasing(
        price in 1u32..10_000_000,
        p in 0u32..20_000,
        q in 0u32..20_000,
    ) {
        prop_assume!(p != q);
        let (low, high) = (p.min(q), p.max(q));
        let base = cents(price);

        let a = adjusted_total(base, Adjustment::DiscountPercent(cents(low)));
        let b = adjusted_total(base, Adjustment::DiscountPercent(cents(high)));
        prop_assert!(a > b);
    }

    #[test]
    fn markup_is_strictly_increasing(
        price in 1u32..10_000_000,
        p in 0u32..20_000,
        q in 0u32..20_000,
    ) {
        prop_assume!(p != q);
        let (low, high) = (p.min(q), p.max(q));
        let base = cents(price);

        let a = adjusted_total(base, Adjustment::MarkupPercent(cents(low)));
        let b = adjusted_total(base, Adjustment::MarkupPercent(cents(high)));
        prop_assert!(a < b);
    }

    #[test]
    fn charged_weight_is_whole_and_covers_weights(
        formula in 0u32..1_000_000,
        real in 0u32..1_000_000,
    ) {
        let formula = cents(formula);
        let real = cents(real);
        let charged = charged_weight(formula, real);

        prop_assert!(charged.fract().is_zero());
        prop_assert!(charged >= Decimal::ZERO);
        prop_assert!(charged >= formula && charged >= real);
        prop_assert!(charged - formula.max(real) < Decimal::ONE);
    }

    #[test]
    fn excluded_stages_contribute_nothing(
        price in 0u32..10_000_000,
        ad in 0u32..10_000_000,
        fixed in 0u32..10_000_000,
        target in currency(),
    ) {
        let base = Money::new(cents(price), Currency::Cad);
        let plain = PricingRequest::new(base, target);
        let excluded = plain
            .clone()
            .with_advertising(Stage::Excluded(cents(ad)))
            .with_delivery(Stage::Excluded(Delivery::FixedCost { cost_cad: cents(fixed) }));

        let engine = PricingEngine::default();
        let plain_total = engine.compute(&plain, &table()).unwrap().total;
        let excluded_total = engine.compute(&excluded, &table()).unwrap().total;
        prop_assert_eq!(plain_total, excluded_total);
    }

    #[test]
    fn total_is_sum_of_items(
        price in 0u32..10_000_000,
        tax in 0u32..100,
        discount in 0u32..10_000,
        ad in 0u32..100_000,
        side in 0u32..20_000,
        real in 0u32..50_000,
        ship in mode(),
        from in currency(),
        target in currency(),
    ) {
        let request = PricingRequest::new(Money::new(cents(price), from), target)
            .with_tax_rate(cents(tax))
            .with_adjustment(Adjustment::DiscountPercent(cents(discount)))
            .with_advertising(Stage::Included(cents(ad)))
            .with_delivery(Stage::Included(Delivery::Computed {
                dimensions: Dimensions::new(cents(side), cents(side), cents(side)),
                real_weight_kg: cents(real),
                mode: ship,
            }));

        let breakdown = PricingEngine::default().compute(&request, &table()).unwrap();
        prop_assert_eq!(breakdown.items_total().unwrap(), breakdown.total);
        prop_assert_eq!(breakdown.total.currency, target);
    }
}

#[test]
fn reference_example_totals_112_30() {
    let base = Money::new(Decimal::new(100, 0), Currency::Usd);
    let request = PricingRequest::new(base, Currency::Usd)
        .with_delivery(Stage::Included(Delivery::FixedCost {
            cost_cad: Decimal::new(10, 0),
        }))
        .with_advertising(Stage::Included(Decimal::new(5, 0)));

    let breakdown = PricingEngine::default().compute(&request, &table()).unwrap();
    assert_eq!(breakdown.total.amount, Decimal::new(11230, 2));
    assert_eq!(breakdown.total.to_string(), "112.30 USD");
}

#[test]
fn reference_example_air_delivery_1705() {
    let request = PricingRequest::new(Money::zero(Currency::Cad), Currency::Cad).with_delivery(
        Stage::Included(Delivery::Computed {
            dimensions: Dimensions::new(
                Decimal::new(50, 0),
                Decimal::new(50, 0),
                Decimal::new(40, 0),
            ),
            real_weight_kg: Decimal::ZERO,
            mode: ShippingMode::Air,
        }),
    );

    let breakdown = PricingEngine::default().compute(&request, &table()).unwrap();
    let delivery = breakdown.item(LineKind::Delivery).unwrap();
    assert_eq!(delivery.source.unwrap().amount, Decimal::new(17050, 1));
    assert_eq!(
        delivery.delivery.unwrap().formula_weight_kg,
        Decimal::new(200, 0)
    );
}
