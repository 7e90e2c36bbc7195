//! `pricing` command.

use std::{io::Write, path::PathBuf};

use clap::Args;
use jiff::Timestamp;
use storefront::{
    discounts::Discount,
    presentation::ColorToken,
    pricing::{PricingResult, price_catalog},
    products::Product,
};

use crate::cli::{CliError, at_or_now, parse_timestamp, read_json, render::Report};

#[derive(Debug, Args)]
pub(crate) struct PricingArgs {
    /// JSON export of `/products`
    #[arg(long)]
    products: PathBuf,

    /// JSON export of `/products/discounts`
    #[arg(long)]
    discounts: PathBuf,

    /// Price at this instant instead of now
    #[arg(long, value_parser = parse_timestamp)]
    at: Option<Timestamp>,
}

pub(crate) fn run(args: &PricingArgs, out: &mut impl Write) -> Result<(), CliError> {
    let products: Vec<Product> = read_json(&args.products)?;
    let discounts: Vec<Discount> = read_json(&args.discounts)?;

    let priced = price_catalog(&products, &discounts, at_or_now(args.at))?;

    pricing_report(&priced).write_to(out)
}

fn pricing_report(priced: &[(&Product, PricingResult<'_>)]) -> Report {
    let mut report =
        Report::new(["Product", "Price", "Final", "Savings", "Off", "Discounts"]).numeric(1..5);

    for (product, result) in priced {
        let applied = result
            .applied_discounts
            .iter()
            .map(|discount| discount.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let row = report.row([
            product.name.clone(),
            result.original_price.to_string(),
            result.final_price.to_string(),
            result.savings.to_string(),
            format!("{}%", result.discount_percentage.round_dp(1).normalize()),
            applied,
        ]);

        if result.is_discounted() {
            report.color(row, 2, ColorToken::Green);
        }
    }

    report
}
