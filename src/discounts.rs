//! Discounts

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ids::Id, timestamps};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// A discount amount could not be represented in minor units.
    #[error("discount amount overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How a discount reduces a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Percentage of the price
    Percentage,

    /// Fixed amount off each unit
    FixedAmount,

    /// Every second unit is free
    BuyOneGetOne,

    /// Any type this crate does not recognise
    #[serde(other)]
    Unknown,
}

/// A time-boxed price reduction attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Discount id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Product the discount is attached to
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub product_id: Id,

    /// Discount kind
    pub discount_type: DiscountType,

    /// Percentage points for [`DiscountType::Percentage`], major units for
    /// [`DiscountType::FixedAmount`], ignored otherwise
    pub discount_value: Decimal,

    /// Start of the discount window
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub start_date: Timestamp,

    /// End of the discount window
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub end_date: Timestamp,

    /// Smallest line subtotal the discount applies to
    #[serde(default)]
    pub min_purchase_amount: Option<Decimal>,

    /// Largest amount the discount may take off a line
    #[serde(default)]
    pub max_discount_amount: Option<Decimal>,

    /// Whether the discount is switched on
    pub active: bool,
}

impl Discount {
    /// Whether the discount is switched on and has not yet ended.
    ///
    /// The start date is not checked: a discount that is switched on but has not started yet
    /// still counts as active. Use [`Discount::is_applicable`] to also
    /// require the window to have opened.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.active && self.end_date > now
    }

    /// [`Discount::is_active`] against the current time.
    #[must_use]
    pub fn is_active_now(&self) -> bool {
        self.is_active(Timestamp::now())
    }

    /// Whether the discount window has opened.
    #[must_use]
    pub fn has_started(&self, now: Timestamp) -> bool {
        self.start_date <= now
    }

    /// Active and already started.
    #[must_use]
    pub fn is_applicable(&self, now: Timestamp) -> bool {
        self.is_active(now) && self.has_started(now)
    }

    /// Human readable discount value, e.g. `15%`, `$9.50` or `BOGO`.
    #[must_use]
    pub fn label(&self) -> String {
        format_discount_value(self.discount_type, self.discount_value)
    }

    /// Amount this discount takes off `quantity` units of `unit_price`.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::Overflow`]: the line total or discount does not fit in minor units.
    pub fn amount_for<'a>(
        &self,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let currency = unit_price.currency();
        let unit_minor = unit_price.to_minor_units();
        let subtotal_minor = unit_minor
            .checked_mul(i64::from(quantity))
            .ok_or(DiscountError::Overflow)?;

        let amount = self.amount_on_minor(
            subtotal_minor,
            subtotal_minor,
            unit_minor,
            quantity,
            currency,
        )?;

        Ok(Money::from_minor(amount, currency))
    }

    /// Discount in minor units for a line whose price has already been reduced to `line_minor`.
    ///
    /// The minimum purchase is checked against the undiscounted `subtotal_minor`; the result is
    /// capped by the maximum discount and never exceeds `line_minor`.
    pub(crate) fn amount_on_minor(
        &self,
        subtotal_minor: i64,
        line_minor: i64,
        unit_minor: i64,
        quantity: u32,
        currency: &Currency,
    ) -> Result<i64, DiscountError> {
        if let Some(minimum) = self.min_purchase_amount
            && subtotal_minor < to_minor(minimum, currency)?
        {
            return Ok(0);
        }

        let raw = match self.discount_type {
            DiscountType::Percentage => percent_of_minor(self.discount_value, line_minor)?,
            DiscountType::FixedAmount => to_minor(self.discount_value, currency)?
                .checked_mul(i64::from(quantity))
                .ok_or(DiscountError::Overflow)?,
            DiscountType::BuyOneGetOne => unit_minor
                .checked_mul(i64::from(quantity / 2))
                .ok_or(DiscountError::Overflow)?,
            DiscountType::Unknown => 0,
        };

        let capped = match self.max_discount_amount {
            Some(maximum) => raw.min(to_minor(maximum, currency)?),
            None => raw,
        };

        Ok(capped.min(line_minor).max(0))
    }
}

/// Formats a discount value for display.
///
/// Percentages keep their significant digits (`15%`, `12.5%`), fixed amounts are rendered as
/// US dollars with two decimals and buy-one-get-one discounts are always `BOGO`.
#[must_use]
pub fn format_discount_value(discount_type: DiscountType, value: Decimal) -> String {
    match discount_type {
        DiscountType::Percentage => format!("{}%", value.normalize()),
        DiscountType::FixedAmount => format!(
            "${:.2}",
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        DiscountType::BuyOneGetOne => "BOGO".to_string(),
        DiscountType::Unknown => value.normalize().to_string(),
    }
}

/// Amount saved going from `original` to `final_price`.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the two amounts use different currencies.
pub fn calculate_savings<'a>(
    original: Money<'a, Currency>,
    final_price: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, MoneyError> {
    original.sub(final_price)
}

/// `amount` as a percentage of `original`; zero when `original` is not positive.
#[must_use]
pub fn calculate_discount_percentage(
    original: &Money<'_, Currency>,
    amount: &Money<'_, Currency>,
) -> Decimal {
    if *original.amount() <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    amount
        .amount()
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(*original.amount()))
        .unwrap_or(Decimal::ZERO)
}

/// Converts a major unit amount to minor units of `currency`, rounding half away from zero.
///
/// # Errors
///
/// - [`DiscountError::Overflow`]: the amount does not fit in `i64` minor units.
pub(crate) fn to_minor(amount: Decimal, currency: &Currency) -> Result<i64, DiscountError> {
    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(DiscountError::Overflow)?;

    amount
        .checked_mul(Decimal::from(scale))
        .ok_or(DiscountError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::Overflow)
}

/// Calculate `percent` percent of a minor unit amount, rounding half away from zero.
fn percent_of_minor(percent: Decimal, minor: i64) -> Result<i64, DiscountError> {
    let Some(applied) = Decimal::from(minor).checked_mul(percent) else {
        return Err(DiscountError::Overflow);
    };

    let Some(applied) = applied.checked_div(Decimal::ONE_HUNDRED) else {
        return Err(DiscountError::Overflow);
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::Overflow)
}
