//! `statuses` command.

use std::io::Write;

use clap::{Args, ValueEnum};
use serde::Serialize;
use storefront::{
    discounts::DiscountType,
    loyalty::{BenefitType, TransactionType},
    presentation::{Presentable, Presentation},
    shipping::ShippingStatus,
    tiers::Tier,
};

use crate::cli::{CliError, render::Report};

const DISCOUNT_TYPES: [DiscountType; 3] = [
    DiscountType::Percentage,
    DiscountType::FixedAmount,
    DiscountType::BuyOneGetOne,
];

const TRANSACTION_TYPES: [TransactionType; 6] = [
    TransactionType::Earn,
    TransactionType::Redeem,
    TransactionType::Expire,
    TransactionType::Adjustment,
    TransactionType::Bonus,
    TransactionType::Referral,
];

const BENEFIT_TYPES: [BenefitType; 7] = [
    BenefitType::Discount,
    BenefitType::FreeShipping,
    BenefitType::PrioritySupport,
    BenefitType::ExclusiveAccess,
    BenefitType::BirthdayBonus,
    BenefitType::PointsMultiplier,
    BenefitType::EarlyAccess,
];

/// Status family to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Tier,
    Discount,
    Transaction,
    Benefit,
    Shipping,
}

#[derive(Debug, Args)]
pub(crate) struct StatusesArgs {
    /// Only list this family; all families when omitted
    #[arg(long, value_enum)]
    kind: Option<Kind>,
}

pub(crate) fn run(args: &StatusesArgs, out: &mut impl Write) -> Result<(), CliError> {
    let mut report = Report::new(["Kind", "Value", "Display name", "Color", "Icon"]);
    let wanted = |kind: Kind| args.kind.is_none_or(|only| only == kind);

    if wanted(Kind::Tier) {
        push_all(
            &mut report,
            "tier",
            Tier::ALL.iter().map(|tier| (tier.code().to_string(), tier)),
        );
    }

    if wanted(Kind::Discount) {
        push_all(
            &mut report,
            "discount",
            DISCOUNT_TYPES.iter().map(|value| (code(value), value)),
        );
    }

    if wanted(Kind::Transaction) {
        push_all(
            &mut report,
            "transaction",
            TRANSACTION_TYPES.iter().map(|value| (code(value), value)),
        );
    }

    if wanted(Kind::Benefit) {
        push_all(
            &mut report,
            "benefit",
            BENEFIT_TYPES.iter().map(|value| (code(value), value)),
        );
    }

    if wanted(Kind::Shipping) {
        push_all(
            &mut report,
            "shipping",
            ShippingStatus::ALL.iter().map(|value| (code(value), value)),
        );
    }

    let row = push(&mut report, "any", "<unrecognised>", Presentation::UNKNOWN);
    report.color(row, 2, Presentation::UNKNOWN.color);

    report.write_to(out)
}

/// Wire code of a unit variant, e.g. `BUY_ONE_GET_ONE`.
fn code(value: &impl Serialize) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(code)) => code,
        _ => String::from("?"),
    }
}

fn push_all<'v, P>(
    report: &mut Report,
    kind: &str,
    values: impl Iterator<Item = (String, &'v P)>,
) where
    P: Presentable + 'v,
{
    for (code, value) in values {
        let presentation = value.presentation();
        let row = push(report, kind, &code, presentation);

        report.color(row, 2, presentation.color);
    }
}

fn push(report: &mut Report, kind: &str, code: &str, presentation: Presentation) -> usize {
    report.row([
        kind.to_string(),
        code.to_string(),
        presentation.display_name.to_string(),
        presentation.color.as_str().to_string(),
        presentation.icon.to_string(),
    ])
}
