//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{
        auth::{AuthConfig, AuthContext},
        endpoints::ServiceEndpoints,
        errors::{ApiError, decode_response},
        fanout::{fan_out, fan_out_until},
    },
    discounts::{
        Discount, DiscountError, DiscountType, calculate_discount_percentage, calculate_savings,
        format_discount_value,
    },
    ids::Id,
    loyalty::{
        BenefitType, LoyaltyAccount, LoyaltyTransaction, RedemptionError, Reward, TierBenefit,
        TransactionType, unlocked_benefits,
    },
    presentation::{ColorToken, Presentable, Presentation},
    pricing::{
        AppliedDiscount, PricingError, PricingResponse, PricingResult, price_catalog, price_product,
    },
    products::{Product, ProductImage},
    shipping::{Shipment, ShippingAddress, ShippingStatus, next_status_options},
    tiers::{Tier, TierProgress, calculate_tier_progress},
};
