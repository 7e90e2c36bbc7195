//! Loyalty
//!
//! Read-only view models for the loyalty service: accounts, point transactions, rewards and
//! tier benefits.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use thiserror::Error;

use crate::{
    ids::Id,
    tiers::{Tier, TierProgress, calculate_tier_progress},
    timestamps,
};

/// Highest loyalty score the service reports.
pub const MAX_LOYALTY_SCORE: u8 = 100;

/// A customer's loyalty account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyAccount {
    /// Owning user
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub user_id: Id,

    /// Accumulated points
    pub total_points: u64,

    /// Current membership tier
    pub membership_level: Tier,

    /// When the customer joined the programme
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub join_date: Timestamp,

    /// Last earn or redeem activity
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub last_activity: Timestamp,

    /// Engagement score within `0..=100`
    #[serde(default, deserialize_with = "deserialize_score")]
    pub loyalty_score: Option<u8>,
}

impl LoyaltyAccount {
    /// Progress of this account toward its next tier.
    #[must_use]
    pub fn tier_progress(&self) -> TierProgress {
        calculate_tier_progress(self.total_points, self.membership_level)
    }
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = Option::<u8>::deserialize(deserializer)?;

    match score {
        Some(value) if value > MAX_LOYALTY_SCORE => Err(D::Error::custom(format!(
            "loyalty score {value} exceeds {MAX_LOYALTY_SCORE}"
        ))),
        _ => Ok(score),
    }
}

/// Kind of point movement on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Points earned from a purchase
    Earn,

    /// Points spent on a reward
    Redeem,

    /// Points that lapsed
    Expire,

    /// Manual correction
    Adjustment,

    /// Promotional bonus
    Bonus,

    /// Points for referring a customer
    Referral,

    /// Any type this crate does not recognise
    #[serde(other)]
    Unknown,
}

/// A single point movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTransaction {
    /// Transaction id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Account owner
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub user_id: Id,

    /// Movement kind
    pub transaction_type: TransactionType,

    /// Points moved, signed as reported
    pub points: i64,

    /// Free text description
    #[serde(default)]
    pub description: Option<String>,

    /// When the movement happened
    #[serde(deserialize_with = "timestamps::deserialize")]
    pub created_at: Timestamp,
}

/// A reward that can be bought with points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Reward id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Reward name
    pub name: String,

    /// Reward description
    #[serde(default)]
    pub description: Option<String>,

    /// Points required to redeem
    pub points_cost: u64,

    /// Lowest tier allowed to redeem
    #[serde(default)]
    pub minimum_tier: Option<Tier>,

    /// Units left; unlimited when absent
    #[serde(default)]
    pub stock: Option<u32>,

    /// Whether the reward is offered
    pub active: bool,
}

/// Reasons a reward cannot be redeemed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedemptionError {
    /// The reward is switched off.
    #[error("reward is not active")]
    Inactive,

    /// No units left.
    #[error("reward is out of stock")]
    OutOfStock,

    /// The account's tier is below the reward's minimum.
    #[error("requires {required} tier, account is {current}")]
    TierTooLow {
        /// Minimum tier
        required: Tier,

        /// Account tier
        current: Tier,
    },

    /// Not enough points.
    #[error("insufficient points: need {required}, have {available}")]
    InsufficientPoints {
        /// Reward cost
        required: u64,

        /// Account balance
        available: u64,
    },
}

impl Reward {
    /// Checks whether `account` may redeem this reward.
    ///
    /// # Errors
    ///
    /// Returns the first [`RedemptionError`] that applies, checked in declaration order.
    pub fn check_redeemable(&self, account: &LoyaltyAccount) -> Result<(), RedemptionError> {
        if !self.active {
            return Err(RedemptionError::Inactive);
        }

        if self.stock == Some(0) {
            return Err(RedemptionError::OutOfStock);
        }

        if let Some(required) = self.minimum_tier
            && account.membership_level < required
        {
            return Err(RedemptionError::TierTooLow {
                required,
                current: account.membership_level,
            });
        }

        if account.total_points < self.points_cost {
            return Err(RedemptionError::InsufficientPoints {
                required: self.points_cost,
                available: account.total_points,
            });
        }

        Ok(())
    }
}

/// Kind of perk attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenefitType {
    /// Percentage off purchases
    Discount,

    /// Free shipping
    FreeShipping,

    /// Priority customer support
    PrioritySupport,

    /// Members-only products or events
    ExclusiveAccess,

    /// Birthday points bonus
    BirthdayBonus,

    /// Multiplier on earned points
    PointsMultiplier,

    /// Early access to sales
    EarlyAccess,

    /// Any type this crate does not recognise
    #[serde(other)]
    Unknown,
}

/// A perk granted from a given tier upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBenefit {
    /// Benefit id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Lowest tier granted the benefit
    pub tier: Tier,

    /// Benefit kind
    pub benefit_type: BenefitType,

    /// Benefit description
    pub description: String,

    /// Benefit magnitude, e.g. a percentage or multiplier
    #[serde(default)]
    pub value: Option<Decimal>,

    /// Whether the benefit is offered
    pub active: bool,
}

/// Active benefits available to `tier`, including those of every lower tier.
pub fn unlocked_benefits(
    benefits: &[TierBenefit],
    tier: Tier,
) -> impl Iterator<Item = &TierBenefit> {
    benefits
        .iter()
        .filter(move |benefit| benefit.active && benefit.tier <= tier)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn account(points: u64, tier: Tier) -> LoyaltyAccount {
        LoyaltyAccount {
            user_id: "u-1".to_string(),
            total_points: points,
            membership_level: tier,
            join_date: Timestamp::UNIX_EPOCH,
            last_activity: Timestamp::UNIX_EPOCH,
            loyalty_score: None,
        }
    }

    fn reward(cost: u64, minimum_tier: Option<Tier>) -> Reward {
        Reward {
            id: "r-1".to_string(),
            name: "Tote bag".to_string(),
            description: None,
            points_cost: cost,
            minimum_tier,
            stock: None,
            active: true,
        }
    }

    #[test]
    fn decodes_crm_account() -> TestResult {
        let decoded: LoyaltyAccount = serde_json::from_str(
            r#"{
                "userId": 12,
                "totalPoints": 3000,
                "membershipLevel": "GOLD",
                "joinDate": "2023-05-01T09:00:00",
                "lastActivity": "2025-02-11T17:45:00Z",
                "loyaltyScore": 72
            }"#,
        )?;

        assert_eq!(decoded.user_id, "12");
        assert_eq!(decoded.loyalty_score, Some(72));
        assert_eq!(decoded.tier_progress().points_needed_for_next_tier, 2_000);

        Ok(())
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let decoded = serde_json::from_str::<LoyaltyAccount>(
            r#"{
                "userId": "u-1",
                "totalPoints": 0,
                "membershipLevel": "BRONZE",
                "joinDate": "2023-05-01",
                "lastActivity": "2023-05-01",
                "loyaltyScore": 101
            }"#,
        );

        assert!(decoded.is_err());
    }

    #[test]
    fn unknown_transaction_types_decode_to_unknown() -> TestResult {
        let decoded: TransactionType = serde_json::from_str("\"CHARGEBACK\"")?;

        assert_eq!(decoded, TransactionType::Unknown);

        Ok(())
    }

    #[test]
    fn redeemable_when_every_check_passes() {
        assert_eq!(
            reward(500, Some(Tier::Silver)).check_redeemable(&account(800, Tier::Gold)),
            Ok(())
        );
    }

    #[test]
    fn redemption_checks_run_in_order() {
        let mut inactive = reward(500, Some(Tier::Diamond));
        inactive.active = false;

        let mut sold_out = reward(500, Some(Tier::Diamond));
        sold_out.stock = Some(0);

        let poor = account(100, Tier::Bronze);

        assert_eq!(inactive.check_redeemable(&poor), Err(RedemptionError::Inactive));
        assert_eq!(sold_out.check_redeemable(&poor), Err(RedemptionError::OutOfStock));
        assert_eq!(
            reward(500, Some(Tier::Diamond)).check_redeemable(&poor),
            Err(RedemptionError::TierTooLow {
                required: Tier::Diamond,
                current: Tier::Bronze,
            })
        );
        assert_eq!(
            reward(500, None).check_redeemable(&poor),
            Err(RedemptionError::InsufficientPoints {
                required: 500,
                available: 100,
            })
        );
    }

    #[test]
    fn unlocked_benefits_include_lower_tiers_only() {
        let benefit = |id: &str, tier: Tier, active: bool| TierBenefit {
            id: id.to_string(),
            tier,
            benefit_type: BenefitType::FreeShipping,
            description: String::new(),
            value: None,
            active,
        };

        let benefits = [
            benefit("b-1", Tier::Bronze, true),
            benefit("b-2", Tier::Gold, true),
            benefit("b-3", Tier::Silver, false),
            benefit("b-4", Tier::Diamond, true),
        ];

        let unlocked: Vec<_> = unlocked_benefits(&benefits, Tier::Gold)
            .map(|benefit| benefit.id.as_str())
            .collect();

        assert_eq!(unlocked, vec!["b-1", "b-2"]);
    }
}
