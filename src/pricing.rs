//! Pricing

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::{
        Discount, DiscountError, DiscountType, calculate_discount_percentage, calculate_savings,
    },
    ids::Id,
    products::Product,
};

/// Errors that can occur while pricing a product.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The product's currency code is not an ISO 4217 code.
    #[error("unknown currency code `{0}`")]
    UnknownCurrency(String),

    /// Errors bubbled up from discount calculations.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A discount that reduced a price, and by how much.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount<'a> {
    /// Id of the discount
    pub discount_id: Id,

    /// Discount kind
    pub discount_type: DiscountType,

    /// Display label, e.g. `15%`
    pub label: String,

    /// Amount taken off
    pub amount: Money<'a, Currency>,
}

/// Derived price of a product line after discounts.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult<'a> {
    /// Price before any discount
    pub original_price: Money<'a, Currency>,

    /// Price after every applied discount
    pub final_price: Money<'a, Currency>,

    /// `original_price - final_price`
    pub savings: Money<'a, Currency>,

    /// Savings as a percentage of the original price
    pub discount_percentage: Decimal,

    /// Discounts that reduced the price, in application order
    pub applied_discounts: SmallVec<[AppliedDiscount<'a>; 3]>,
}

/// Pricing computed by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    /// Product the pricing belongs to
    #[serde(default, deserialize_with = "crate::ids::deserialize_option")]
    pub product_id: Option<Id>,

    /// Price before discounts, in major units
    pub original_price: Decimal,

    /// Price after discounts, in major units
    pub final_price: Decimal,

    /// Discounts the service applied
    #[serde(default)]
    pub applied_discounts: Vec<Discount>,
}

impl<'a> PricingResult<'a> {
    /// Prices `quantity` units of `unit_price`, stacking every active discount in order.
    ///
    /// Each discount is calculated against the price left by the ones before it, so the final
    /// price never drops below zero. Discounts that take nothing off are not recorded.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Discount`]: a discount amount overflowed.
    /// - [`PricingError::Money`]: money arithmetic failed.
    pub fn calculate<'d>(
        unit_price: Money<'a, Currency>,
        quantity: u32,
        discounts: impl IntoIterator<Item = &'d Discount>,
        now: Timestamp,
    ) -> Result<Self, PricingError> {
        let currency = unit_price.currency();
        let unit_minor = unit_price.to_minor_units();
        let subtotal_minor = unit_minor
            .checked_mul(i64::from(quantity))
            .ok_or(DiscountError::Overflow)?;

        let mut line_minor = subtotal_minor;
        let mut applied_discounts = SmallVec::new();

        for discount in discounts {
            if !discount.is_active(now) {
                debug!(discount_id = %discount.id, "skipping inactive discount");
                continue;
            }

            let amount = discount.amount_on_minor(
                subtotal_minor,
                line_minor,
                unit_minor,
                quantity,
                currency,
            )?;

            if amount == 0 {
                continue;
            }

            line_minor -= amount;

            applied_discounts.push(AppliedDiscount {
                discount_id: discount.id.clone(),
                discount_type: discount.discount_type,
                label: discount.label(),
                amount: Money::from_minor(amount, currency),
            });
        }

        let original_price = Money::from_minor(subtotal_minor, currency);
        let final_price = Money::from_minor(line_minor, currency);

        Self::from_prices(original_price, final_price, applied_discounts)
    }

    /// Converts pricing computed by the product service, recomputing the derived fields.
    ///
    /// The applied discount amounts are not part of the response; each entry records the
    /// amount that discount would take off the original price on its own.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Discount`]: a discount amount overflowed.
    /// - [`PricingError::Money`]: money arithmetic failed.
    pub fn from_response(
        response: &PricingResponse,
        currency: &'a Currency,
    ) -> Result<Self, PricingError> {
        let original_price = Money::from_decimal(response.original_price, currency);
        let final_price = Money::from_decimal(response.final_price, currency);

        let applied_discounts = response
            .applied_discounts
            .iter()
            .map(|discount| -> Result<_, PricingError> {
                Ok(AppliedDiscount {
                    discount_id: discount.id.clone(),
                    discount_type: discount.discount_type,
                    label: discount.label(),
                    amount: discount.amount_for(original_price, 1)?,
                })
            })
            .collect::<Result<SmallVec<_>, _>>()?;

        Self::from_prices(original_price, final_price, applied_discounts)
    }

    fn from_prices(
        original_price: Money<'a, Currency>,
        final_price: Money<'a, Currency>,
        applied_discounts: SmallVec<[AppliedDiscount<'a>; 3]>,
    ) -> Result<Self, PricingError> {
        let savings = calculate_savings(original_price, final_price)?;
        let discount_percentage = calculate_discount_percentage(&original_price, &savings);

        Ok(Self {
            original_price,
            final_price,
            savings,
            discount_percentage,
            applied_discounts,
        })
    }

    /// Whether any discount reduced the price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.applied_discounts.is_empty()
    }
}

/// Prices a single unit of `product` using the discounts attached to it.
///
/// Discounts for other products are ignored.
///
/// # Errors
///
/// Returns a [`PricingError`] if the currency is unknown or the calculation fails.
pub fn price_product<'d>(
    product: &Product,
    discounts: impl IntoIterator<Item = &'d Discount>,
    now: Timestamp,
) -> Result<PricingResult<'static>, PricingError> {
    let unit_price = product.unit_price()?;

    PricingResult::calculate(
        unit_price,
        1,
        discounts
            .into_iter()
            .filter(|discount| discount.product_id == product.id),
        now,
    )
}

/// Prices every product in a catalog listing.
///
/// Results are returned in product order. The first failure fails the whole listing.
///
/// # Errors
///
/// Returns the first [`PricingError`] encountered.
pub fn price_catalog<'p>(
    products: &'p [Product],
    discounts: &[Discount],
    now: Timestamp,
) -> Result<Vec<(&'p Product, PricingResult<'static>)>, PricingError> {
    let mut by_product: FxHashMap<&str, Vec<&Discount>> = FxHashMap::default();

    for discount in discounts {
        by_product
            .entry(discount.product_id.as_str())
            .or_default()
            .push(discount);
    }

    products
        .iter()
        .map(|product| {
            let attached = by_product
                .get(product.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            price_product(product, attached.iter().copied(), now).map(|result| (product, result))
        })
        .collect()
}
