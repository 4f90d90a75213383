//! Property tests for payload invariants.

use klarna_order_bridge::{
    OrderSerializer,
    calculators::Strategy,
    models::{Country, LineItem, Order, Shipment, ShippingMethod},
    money::Money,
    serializer::payload::OrderLineType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn line_item(index: usize, cents: i64, quantity: u32, tax_cents: i64) -> LineItem {
    LineItem {
        sku: format!("SKU-{index}"),
        name: format!("Item {index}"),
        quantity,
        price: Decimal::new(cents, 2),
        promo_total: Decimal::ZERO,
        included_tax_total: Decimal::ZERO,
        additional_tax_total: Decimal::new(tax_cents, 2),
        image_url: None,
        product_url: None,
    }
}

fn shipment(index: usize, cents: i64, tax_cents: i64) -> Shipment {
    Shipment {
        number: format!("H{index}"),
        shipping_method: ShippingMethod { name: "Ground".to_owned() },
        cost: Decimal::new(cents, 2),
        promo_total: Decimal::ZERO,
        included_tax_total: Decimal::ZERO,
        additional_tax_total: Decimal::new(tax_cents, 2),
        tracking: None,
        tracking_url: None,
    }
}

prop_compose! {
    fn arb_order()(
        items in prop::collection::vec((0_i64..100_000, 1_u32..10, 0_i64..5_000), 0..8),
        shipments in prop::collection::vec((0_i64..10_000, 0_i64..1_000), 0..4),
        total in 0_i64..10_000_000,
        number in "R[0-9]{3,9}",
    ) -> Order {
        Order {
            number,
            email: Some("buyer@example.com".to_owned()),
            currency: "USD".to_owned(),
            display_total: Money::new(Decimal::new(total, 2), "USD"),
            billing_address: None,
            shipping_address: None,
            line_items: items
                .into_iter()
                .enumerate()
                .map(|(i, (cents, qty, tax))| line_item(i, cents, qty, tax))
                .collect(),
            shipments: shipments
                .into_iter()
                .enumerate()
                .map(|(i, (cents, tax))| shipment(i, cents, tax))
                .collect(),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_order_lines_are_items_then_shipments(order in arb_order(), region in "us|uk|de|se") {
        let payload = OrderSerializer::new(&order, region.as_str()).to_hash();

        prop_assert_eq!(payload.order_lines.len(), order.line_items.len() + order.shipments.len());

        let (items, shipments) = payload.order_lines.split_at(order.line_items.len());
        prop_assert!(items.iter().all(|line| line.line_type == OrderLineType::Physical));
        prop_assert!(shipments.iter().all(|line| line.line_type == OrderLineType::ShippingFee));
        for (line, item) in items.iter().zip(&order.line_items) {
            prop_assert_eq!(&line.reference, &item.sku);
        }
        for (line, shipment) in shipments.iter().zip(&order.shipments) {
            prop_assert_eq!(&line.reference, &shipment.number);
        }
    }

    #[test]
    fn test_line_total_is_quantity_times_unit_price_less_discount(
        order in arb_order(),
        region in "us|uk|de",
    ) {
        let payload = OrderSerializer::new(&order, region.as_str()).to_hash();

        for line in &payload.order_lines {
            prop_assert_eq!(
                line.total_amount,
                i64::from(line.quantity) * line.unit_price - line.total_discount_amount,
                "line {}", &line.reference
            );
        }
        let line_tax: i64 = payload.order_lines.iter().map(|line| line.total_tax_amount).sum();
        prop_assert_eq!(payload.order_tax_amount, Some(line_tax));
    }

    #[test]
    fn test_order_amount_is_display_total_cents(order in arb_order()) {
        let payload = OrderSerializer::us(&order).to_hash();

        prop_assert_eq!(payload.order_amount, order.display_total.cents());
        prop_assert_eq!(&payload.merchant_reference1, &order.number);
    }

    #[test]
    fn test_us_token_in_any_case_selects_us(token in "[uU][sS]") {
        let order = Order {
            number: "R1".to_owned(),
            email: None,
            currency: "USD".to_owned(),
            display_total: Money::new(Decimal::ZERO, "USD"),
            billing_address: None,
            shipping_address: None,
            line_items: vec![],
            shipments: vec![],
        };

        prop_assert!(matches!(OrderSerializer::new(&order, token.as_str()).strategy(), Strategy::Us(_)));
    }

    #[test]
    fn test_other_tokens_select_uk(token in "[a-z]{2,3}") {
        prop_assume!(token != "us");
        let order = Order {
            number: "R1".to_owned(),
            email: None,
            currency: "GBP".to_owned(),
            display_total: Money::new(Decimal::ZERO, "GBP"),
            billing_address: None,
            shipping_address: None,
            line_items: vec![],
            shipments: vec![],
        };

        prop_assert!(matches!(OrderSerializer::new(&order, token.as_str()).strategy(), Strategy::Uk(_)));
    }

    #[test]
    fn test_purchase_country_prefers_billing(billing in "[A-Z]{2}", shipping in "[A-Z]{2}") {
        let address = |iso: &str| klarna_order_bridge::models::Address {
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            company: None,
            address1: "1 Road".to_owned(),
            address2: None,
            city: "Town".to_owned(),
            zipcode: "00000".to_owned(),
            phone: None,
            state: None,
            country: Country { iso: iso.to_owned() },
        };
        let order = Order {
            number: "R1".to_owned(),
            email: None,
            currency: "USD".to_owned(),
            display_total: Money::new(Decimal::ZERO, "USD"),
            billing_address: Some(address(&billing)),
            shipping_address: Some(address(&shipping)),
            line_items: vec![],
            shipments: vec![],
        };

        prop_assert_eq!(OrderSerializer::us(&order).to_hash().purchase_country, billing);
    }
}
