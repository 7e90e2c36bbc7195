//! Integration tests for catalog pricing

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{EUR, USD},
};
use testresult::TestResult;

use storefront::{
    discounts::{Discount, DiscountType},
    pricing::{PricingResponse, PricingResult, price_catalog},
    products::Product,
};

const PRODUCTS: &str = include_str!("fixtures/products.json");
const DISCOUNTS: &str = include_str!("fixtures/discounts.json");

fn catalog() -> TestResult<(Vec<Product>, Vec<Discount>)> {
    Ok((
        serde_json::from_str(PRODUCTS)?,
        serde_json::from_str(DISCOUNTS)?,
    ))
}

fn june() -> TestResult<Timestamp> {
    Ok("2026-06-01T12:00:00Z".parse()?)
}

#[test]
fn catalog_is_priced_in_product_order() -> TestResult {
    let (products, discounts) = catalog()?;
    let priced = price_catalog(&products, &discounts, june()?)?;

    let names: Vec<&str> = priced
        .iter()
        .map(|(product, _)| product.name.as_str())
        .collect();

    assert_eq!(names, ["Desk Lamp", "Notebook", "Headphones"]);

    Ok(())
}

#[test]
fn percentage_discount_applies_and_unmet_minimum_is_skipped() -> TestResult {
    let (products, discounts) = catalog()?;
    let priced = price_catalog(&products, &discounts, june()?)?;
    let (_, lamp) = priced.first().ok_or("lamp missing")?;

    assert_eq!(lamp.original_price, Money::from_minor(4_000, USD));
    assert_eq!(lamp.final_price, Money::from_minor(3_000, USD));
    assert_eq!(lamp.savings, Money::from_minor(1_000, USD));
    assert_eq!(lamp.discount_percentage, Decimal::new(25, 0));
    assert_eq!(lamp.applied_discounts.len(), 1);
    assert_eq!(
        lamp.applied_discounts.first().map(|d| d.label.as_str()),
        Some("25%")
    );

    Ok(())
}

#[test]
fn disabled_and_unrecognised_discounts_leave_price_unchanged() -> TestResult {
    let (products, discounts) = catalog()?;
    let priced = price_catalog(&products, &discounts, june()?)?;
    let (notebook, result) = priced.get(1).ok_or("notebook missing")?;

    assert!(!notebook.in_stock());
    assert!(!result.is_discounted());
    assert_eq!(result.final_price, Money::from_minor(550, USD));
    assert_eq!(result.discount_percentage, Decimal::ZERO);

    Ok(())
}

#[test]
fn fixed_amount_is_capped_and_expired_discount_ignored() -> TestResult {
    let (products, discounts) = catalog()?;
    let priced = price_catalog(&products, &discounts, june()?)?;
    let (_, headphones) = priced.get(2).ok_or("headphones missing")?;

    assert_eq!(headphones.original_price, Money::from_minor(12_000, EUR));
    assert_eq!(headphones.final_price, Money::from_minor(10_500, EUR));
    assert_eq!(headphones.discount_percentage, Decimal::new(125, 1));

    Ok(())
}

#[test]
fn discounts_stack_against_the_running_price() -> TestResult {
    let (products, discounts) = catalog()?;
    let january: Timestamp = "2026-01-15T00:00:00Z".parse()?;
    let priced = price_catalog(&products, &discounts, january)?;
    let (_, headphones) = priced.get(2).ok_or("headphones missing")?;

    // 15 off, then 10% of the remaining 105.
    assert_eq!(headphones.final_price, Money::from_minor(9_450, EUR));
    assert_eq!(headphones.applied_discounts.len(), 2);

    Ok(())
}

#[test]
fn primary_image_is_preferred() -> TestResult {
    let (products, _) = catalog()?;
    let lamp = products.first().ok_or("lamp missing")?;

    assert_eq!(
        lamp.primary_image().map(|image| image.id.as_str()),
        Some("101")
    );

    Ok(())
}

#[test]
fn backend_pricing_response_is_recomputed() -> TestResult {
    let response: PricingResponse = serde_json::from_str(
        r#"{
            "productId": 1,
            "originalPrice": 40,
            "finalPrice": 30,
            "appliedDiscounts": [{
                "id": 10,
                "productId": 1,
                "discountType": "PERCENTAGE",
                "discountValue": 25,
                "startDate": "2026-01-01",
                "endDate": "2026-12-31",
                "active": true
            }]
        }"#,
    )?;

    let result = PricingResult::from_response(&response, USD)?;

    assert_eq!(response.product_id.as_deref(), Some("1"));
    assert_eq!(result.savings, Money::from_minor(1_000, USD));
    assert_eq!(result.discount_percentage, Decimal::new(25, 0));
    assert_eq!(
        result
            .applied_discounts
            .first()
            .map(|applied| applied.discount_type),
        Some(DiscountType::Percentage)
    );

    Ok(())
}
