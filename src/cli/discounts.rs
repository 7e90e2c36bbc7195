//! `discounts` command.

use std::{io::Write, path::PathBuf};

use clap::Args;
use jiff::Timestamp;
use storefront::{
    discounts::Discount,
    presentation::{ColorToken, discount_type_presentation},
};

use crate::cli::{
    CliError, at_or_now, parse_timestamp, read_json,
    render::{Report, label},
};

#[derive(Debug, Args)]
pub(crate) struct DiscountsArgs {
    /// JSON export of `/products/discounts`
    #[arg(long)]
    file: PathBuf,

    /// Evaluate validity at this instant instead of now
    #[arg(long, value_parser = parse_timestamp)]
    at: Option<Timestamp>,
}

pub(crate) fn run(args: &DiscountsArgs, out: &mut impl Write) -> Result<(), CliError> {
    let discounts: Vec<Discount> = read_json(&args.file)?;

    discounts_report(&discounts, at_or_now(args.at)).write_to(out)
}

/// Validity column text and color.
fn validity(discount: &Discount, now: Timestamp) -> (&'static str, ColorToken) {
    if !discount.active {
        ("Disabled", ColorToken::Gray)
    } else if !discount.is_active(now) {
        ("Expired", ColorToken::Red)
    } else if !discount.has_started(now) {
        ("Scheduled", ColorToken::Blue)
    } else {
        ("Active", ColorToken::Green)
    }
}

fn discounts_report(discounts: &[Discount], now: Timestamp) -> Report {
    let mut report = Report::new(["Discount", "Product", "Type", "Value", "Ends", "Status"]);

    for discount in discounts {
        let presentation = discount_type_presentation(discount.discount_type);
        let (status, color) = validity(discount, now);

        let row = report.row([
            discount.id.clone(),
            discount.product_id.clone(),
            label(presentation),
            discount.label(),
            discount.end_date.strftime("%Y-%m-%d %H:%M").to_string(),
            status.to_string(),
        ]);

        report.color(row, 2, presentation.color);
        report.color(row, 5, color);
    }

    report
}
