//! Membership Tiers

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Loyalty membership level, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Entry tier
    Bronze,

    /// Second tier
    Silver,

    /// Third tier
    Gold,

    /// Fourth tier
    Platinum,

    /// Highest tier, has no successor
    Diamond,
}

impl Tier {
    /// Every tier, lowest first.
    pub const ALL: [Tier; 5] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
    ];

    /// Minimum point total required to hold this tier.
    #[must_use]
    pub const fn threshold(self) -> u64 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 500,
            Tier::Gold => 2_000,
            Tier::Platinum => 5_000,
            Tier::Diamond => 10_000,
        }
    }

    /// The tier above this one, or `None` for [`Tier::Diamond`].
    #[must_use]
    pub const fn next(self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => Some(Tier::Diamond),
            Tier::Diamond => None,
        }
    }

    /// Highest tier whose threshold is covered by `points`.
    #[must_use]
    pub fn for_points(points: u64) -> Tier {
        Tier::ALL
            .into_iter()
            .rev()
            .find(|tier| tier.threshold() <= points)
            .unwrap_or(Tier::Bronze)
    }

    /// Backend code for this tier, e.g. `GOLD`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Diamond => "DIAMOND",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not a known tier code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown membership tier `{0}`")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();

        Tier::ALL
            .into_iter()
            .find(|tier| tier.code() == code)
            .ok_or_else(|| UnknownTier(value.to_string()))
    }
}

/// Progress of a point balance through its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProgress {
    /// Tier the progress is measured within
    pub current_tier: Tier,

    /// Next tier, equal to `current_tier` once the top tier is reached
    pub next_tier: Tier,

    /// Point balance the progress was calculated for
    pub current_points: u64,

    /// Threshold of `current_tier`
    pub tier_start_points: u64,

    /// Threshold of `next_tier`
    pub next_tier_points: u64,

    /// Points earned since reaching `current_tier`; negative for inconsistent inputs
    pub points_in_current_tier: i64,

    /// Points still required to reach `next_tier`
    pub points_needed_for_next_tier: i64,

    /// Progress through the tier span, within `0..=100`
    pub progress_percentage: Decimal,
}

impl TierProgress {
    /// Whether the account already holds the highest tier.
    #[must_use]
    pub fn is_max_tier(&self) -> bool {
        self.next_tier == self.current_tier
    }

    /// Whether the point balance reaches the threshold of the tier it was measured in.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.current_points >= self.tier_start_points
    }
}

/// Calculates how far `current_points` has progressed from `current_tier` toward the next tier.
///
/// Points are not validated against the tier: a balance below the tier's own threshold yields a
/// negative `points_in_current_tier` and a progress of zero.
pub fn calculate_tier_progress(current_points: u64, current_tier: Tier) -> TierProgress {
    let tier_start_points = current_tier.threshold();

    let Some(next_tier) = current_tier.next() else {
        return TierProgress {
            current_tier,
            next_tier: current_tier,
            current_points,
            tier_start_points,
            next_tier_points: tier_start_points,
            points_in_current_tier: signed(current_points)
                .saturating_sub(signed(tier_start_points)),
            points_needed_for_next_tier: 0,
            progress_percentage: Decimal::ONE_HUNDRED,
        };
    };

    let next_tier_points = next_tier.threshold();
    let points_in_current_tier = signed(current_points).saturating_sub(signed(tier_start_points));
    let span = next_tier_points - tier_start_points;

    let progress_percentage = (Decimal::from(points_in_current_tier) * Decimal::ONE_HUNDRED)
        .checked_div(Decimal::from(span))
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    if points_in_current_tier < 0 {
        warn!(
            current_points,
            tier = %current_tier,
            tier_start_points,
            "point balance is below the threshold of its tier"
        );
    }

    TierProgress {
        current_tier,
        next_tier,
        current_points,
        tier_start_points,
        next_tier_points,
        points_in_current_tier,
        points_needed_for_next_tier: signed(next_tier_points)
            .saturating_sub(signed(current_points)),
        progress_percentage,
    }
}

fn signed(points: u64) -> i64 {
    i64::try_from(points).unwrap_or(i64::MAX)
}
