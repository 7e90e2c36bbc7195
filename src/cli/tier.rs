//! `tier` command.

use std::io::Write;

use clap::Args;
use storefront::{
    presentation::tier_presentation,
    tiers::{Tier, TierProgress, calculate_tier_progress},
};

use crate::cli::{
    CliError,
    render::{Report, label, progress_bar},
};

#[derive(Debug, Args)]
pub(crate) struct TierArgs {
    /// Current point balance
    #[arg(long)]
    points: u64,

    /// Tier currently held; derived from the balance when omitted
    #[arg(long, value_enum)]
    tier: Option<Tier>,
}

pub(crate) fn run(args: &TierArgs, out: &mut impl Write) -> Result<(), CliError> {
    let tier = args.tier.unwrap_or_else(|| Tier::for_points(args.points));
    let progress = calculate_tier_progress(args.points, tier);

    progress_report(&progress).write_to(out)
}

fn progress_report(progress: &TierProgress) -> Report {
    let current = tier_presentation(progress.current_tier);
    let mut report = Report::new(["", ""]);

    let row = report.row(["Tier".to_string(), label(current)]);
    report.color(row, 1, current.color);

    report.row(["Points".to_string(), progress.current_points.to_string()]);
    report.row([
        "Tier starts at".to_string(),
        progress.tier_start_points.to_string(),
    ]);

    if progress.is_max_tier() {
        report.row(["Next tier".to_string(), "Maximum tier reached".to_string()]);
    } else {
        let next = tier_presentation(progress.next_tier);

        let row = report.row(["Next tier".to_string(), label(next)]);
        report.color(row, 1, next.color);

        report.row([
            "Next tier at".to_string(),
            progress.next_tier_points.to_string(),
        ]);
        report.row([
            "Points needed".to_string(),
            progress.points_needed_for_next_tier.to_string(),
        ]);
    }

    report.row([
        "Progress".to_string(),
        progress_bar(progress.progress_percentage),
    ]);

    report
}
