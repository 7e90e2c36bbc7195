//! Presentation
//!
//! Static lookup tables mapping enumerated backend values to a display name, a color token and
//! an icon name. Every mapping is total: values this crate does not recognise fall back to
//! [`Presentation::UNKNOWN`].

use serde::Serialize;

use crate::{
    discounts::DiscountType,
    loyalty::{BenefitType, TransactionType},
    shipping::ShippingStatus,
    tiers::Tier,
};

/// Named color used when rendering a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    /// Neutral gray, used for unknown values
    Gray,
    /// Amber
    Amber,
    /// Slate
    Slate,
    /// Yellow
    Yellow,
    /// Indigo
    Indigo,
    /// Cyan
    Cyan,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Red
    Red,
    /// Orange
    Orange,
    /// Purple
    Purple,
    /// Teal
    Teal,
    /// Pink
    Pink,
}

impl ColorToken {
    /// Token name, e.g. `amber`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorToken::Gray => "gray",
            ColorToken::Amber => "amber",
            ColorToken::Slate => "slate",
            ColorToken::Yellow => "yellow",
            ColorToken::Indigo => "indigo",
            ColorToken::Cyan => "cyan",
            ColorToken::Green => "green",
            ColorToken::Blue => "blue",
            ColorToken::Red => "red",
            ColorToken::Orange => "orange",
            ColorToken::Purple => "purple",
            ColorToken::Teal => "teal",
            ColorToken::Pink => "pink",
        }
    }

    /// ANSI escape that starts this color in a terminal.
    #[must_use]
    pub const fn ansi(self) -> &'static str {
        match self {
            ColorToken::Gray => "\x1b[90m",
            ColorToken::Amber => "\x1b[33m",
            ColorToken::Slate => "\x1b[37m",
            ColorToken::Yellow => "\x1b[93m",
            ColorToken::Indigo => "\x1b[94m",
            ColorToken::Cyan => "\x1b[96m",
            ColorToken::Green => "\x1b[32m",
            ColorToken::Blue => "\x1b[34m",
            ColorToken::Red => "\x1b[31m",
            ColorToken::Orange => "\x1b[38;5;208m",
            ColorToken::Purple => "\x1b[35m",
            ColorToken::Teal => "\x1b[36m",
            ColorToken::Pink => "\x1b[95m",
        }
    }
}

/// How a value is shown to an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Presentation {
    /// Human readable name
    pub display_name: &'static str,

    /// Color token
    pub color: ColorToken,

    /// Icon name
    pub icon: &'static str,
}

impl Presentation {
    /// Fallback for values without a mapping.
    pub const UNKNOWN: Presentation = Presentation::new("Unknown", ColorToken::Gray, "help-circle");

    const fn new(display_name: &'static str, color: ColorToken, icon: &'static str) -> Self {
        Self {
            display_name,
            color,
            icon,
        }
    }
}

/// Values that have a [`Presentation`].
pub trait Presentable {
    /// Display name, color and icon for this value.
    fn presentation(&self) -> Presentation;
}

/// Presentation of a membership tier.
#[must_use]
pub const fn tier_presentation(tier: Tier) -> Presentation {
    match tier {
        Tier::Bronze => Presentation::new("Bronze", ColorToken::Amber, "medal"),
        Tier::Silver => Presentation::new("Silver", ColorToken::Slate, "award"),
        Tier::Gold => Presentation::new("Gold", ColorToken::Yellow, "trophy"),
        Tier::Platinum => Presentation::new("Platinum", ColorToken::Indigo, "crown"),
        Tier::Diamond => Presentation::new("Diamond", ColorToken::Cyan, "gem"),
    }
}

/// Presentation of a raw tier code such as `"GOLD"`.
#[must_use]
pub fn tier_code_presentation(code: &str) -> Presentation {
    code.parse::<Tier>()
        .map_or(Presentation::UNKNOWN, tier_presentation)
}

/// Presentation of a discount type.
#[must_use]
pub const fn discount_type_presentation(discount_type: DiscountType) -> Presentation {
    match discount_type {
        DiscountType::Percentage => Presentation::new("Percentage", ColorToken::Blue, "percent"),
        DiscountType::FixedAmount => {
            Presentation::new("Fixed Amount", ColorToken::Green, "dollar-sign")
        }
        DiscountType::BuyOneGetOne => {
            Presentation::new("Buy One Get One", ColorToken::Purple, "gift")
        }
        DiscountType::Unknown => Presentation::UNKNOWN,
    }
}

/// Presentation of a loyalty transaction type.
#[must_use]
pub const fn transaction_type_presentation(transaction_type: TransactionType) -> Presentation {
    match transaction_type {
        TransactionType::Earn => {
            Presentation::new("Points Earned", ColorToken::Green, "plus-circle")
        }
        TransactionType::Redeem => {
            Presentation::new("Points Redeemed", ColorToken::Blue, "minus-circle")
        }
        TransactionType::Expire => Presentation::new("Points Expired", ColorToken::Red, "clock"),
        TransactionType::Adjustment => {
            Presentation::new("Adjustment", ColorToken::Orange, "sliders")
        }
        TransactionType::Bonus => Presentation::new("Bonus Points", ColorToken::Purple, "star"),
        TransactionType::Referral => {
            Presentation::new("Referral Bonus", ColorToken::Teal, "users")
        }
        TransactionType::Unknown => Presentation::UNKNOWN,
    }
}

/// Presentation of a tier benefit type.
#[must_use]
pub const fn benefit_type_presentation(benefit_type: BenefitType) -> Presentation {
    match benefit_type {
        BenefitType::Discount => Presentation::new("Discount", ColorToken::Green, "percent"),
        BenefitType::FreeShipping => Presentation::new("Free Shipping", ColorToken::Blue, "truck"),
        BenefitType::PrioritySupport => {
            Presentation::new("Priority Support", ColorToken::Purple, "headphones")
        }
        BenefitType::ExclusiveAccess => {
            Presentation::new("Exclusive Access", ColorToken::Indigo, "lock")
        }
        BenefitType::BirthdayBonus => Presentation::new("Birthday Bonus", ColorToken::Pink, "cake"),
        BenefitType::PointsMultiplier => {
            Presentation::new("Points Multiplier", ColorToken::Yellow, "zap")
        }
        BenefitType::EarlyAccess => Presentation::new("Early Access", ColorToken::Teal, "clock"),
        BenefitType::Unknown => Presentation::UNKNOWN,
    }
}

/// Presentation of a shipping status.
#[must_use]
pub const fn shipping_status_presentation(status: ShippingStatus) -> Presentation {
    match status {
        ShippingStatus::Pending => Presentation::new("Pending", ColorToken::Yellow, "clock"),
        ShippingStatus::Processing => Presentation::new("Processing", ColorToken::Blue, "loader"),
        ShippingStatus::Shipped => Presentation::new("Shipped", ColorToken::Indigo, "package"),
        ShippingStatus::InTransit => Presentation::new("In Transit", ColorToken::Purple, "truck"),
        ShippingStatus::OutForDelivery => {
            Presentation::new("Out for Delivery", ColorToken::Orange, "map-pin")
        }
        ShippingStatus::Delivered => {
            Presentation::new("Delivered", ColorToken::Green, "check-circle")
        }
        ShippingStatus::Returned => Presentation::new("Returned", ColorToken::Amber, "rotate-ccw"),
        ShippingStatus::Cancelled => Presentation::new("Cancelled", ColorToken::Red, "x-circle"),
        ShippingStatus::Failed => {
            Presentation::new("Delivery Failed", ColorToken::Red, "alert-triangle")
        }
        ShippingStatus::Unknown => Presentation::UNKNOWN,
    }
}

impl Presentable for Tier {
    fn presentation(&self) -> Presentation {
        tier_presentation(*self)
    }
}

impl Presentable for DiscountType {
    fn presentation(&self) -> Presentation {
        discount_type_presentation(*self)
    }
}

impl Presentable for TransactionType {
    fn presentation(&self) -> Presentation {
        transaction_type_presentation(*self)
    }
}

impl Presentable for BenefitType {
    fn presentation(&self) -> Presentation {
        benefit_type_presentation(*self)
    }
}

impl Presentable for ShippingStatus {
    fn presentation(&self) -> Presentation {
        shipping_status_presentation(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_presentations_are_stable() {
        for tier in Tier::ALL {
            assert_eq!(tier.presentation(), tier.presentation());
            assert_ne!(tier.presentation(), Presentation::UNKNOWN);
        }

        assert_eq!(Tier::Gold.presentation().display_name, "Gold");
        assert_eq!(Tier::Gold.presentation().color, ColorToken::Yellow);
    }

    #[test]
    fn unknown_variants_fall_back() {
        assert_eq!(DiscountType::Unknown.presentation(), Presentation::UNKNOWN);
        assert_eq!(TransactionType::Unknown.presentation(), Presentation::UNKNOWN);
        assert_eq!(BenefitType::Unknown.presentation(), Presentation::UNKNOWN);
        assert_eq!(ShippingStatus::Unknown.presentation(), Presentation::UNKNOWN);
        assert_eq!(tier_code_presentation("COPPER"), Presentation::UNKNOWN);
    }

    #[test]
    fn tier_codes_map_like_tiers() {
        assert_eq!(tier_code_presentation("platinum"), Tier::Platinum.presentation());
    }

    #[test]
    fn every_known_status_has_a_mapping() {
        for status in ShippingStatus::ALL {
            assert_ne!(
                status.presentation(),
                Presentation::UNKNOWN,
                "{status:?} has no presentation"
            );
        }
    }

    #[test]
    fn fallback_is_gray_help_icon() {
        assert_eq!(Presentation::UNKNOWN.display_name, "Unknown");
        assert_eq!(Presentation::UNKNOWN.color.as_str(), "gray");
        assert_eq!(Presentation::UNKNOWN.icon, "help-circle");
    }

    #[test]
    fn discount_type_names() {
        assert_eq!(
            DiscountType::BuyOneGetOne.presentation().display_name,
            "Buy One Get One"
        );
        assert_eq!(DiscountType::FixedAmount.presentation().icon, "dollar-sign");
    }
}
