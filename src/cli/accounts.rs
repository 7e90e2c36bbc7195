//! `accounts` command.

use std::{io::Write, path::PathBuf};

use clap::Args;
use storefront::{loyalty::LoyaltyAccount, presentation::tier_presentation};

use crate::cli::{
    CliError, read_json,
    render::{Report, progress_bar},
};

#[derive(Debug, Args)]
pub(crate) struct AccountsArgs {
    /// JSON export of `/crm`
    #[arg(long)]
    file: PathBuf,
}

pub(crate) fn run(args: &AccountsArgs, out: &mut impl Write) -> Result<(), CliError> {
    let accounts: Vec<LoyaltyAccount> = read_json(&args.file)?;

    accounts_report(&accounts).write_to(out)
}

fn accounts_report(accounts: &[LoyaltyAccount]) -> Report {
    let mut report =
        Report::new(["User", "Tier", "Points", "Next tier", "Needed", "Progress"]).numeric(2..3);

    for account in accounts {
        let progress = account.tier_progress();

        let current = tier_presentation(progress.current_tier);
        let (next, needed) = if progress.is_max_tier() {
            ("-".to_string(), "-".to_string())
        } else {
            (
                tier_presentation(progress.next_tier).display_name.to_string(),
                progress.points_needed_for_next_tier.to_string(),
            )
        };

        let row = report.row([
            account.user_id.clone(),
            current.display_name.to_string(),
            account.total_points.to_string(),
            next,
            needed,
            progress_bar(progress.progress_percentage),
        ]);

        report.color(row, 1, current.color);
    }

    report
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn lists_each_account_with_its_progress() -> TestResult {
        let accounts: Vec<LoyaltyAccount> = serde_json::from_str(
            r#"[
                {
                    "userId": 7,
                    "totalPoints": 3000,
                    "membershipLevel": "GOLD",
                    "joinDate": "2025-01-10",
                    "lastActivity": "2026-02-01T09:30:00"
                },
                {
                    "userId": "u-8",
                    "totalPoints": 15000,
                    "membershipLevel": "DIAMOND",
                    "joinDate": "2024-06-01",
                    "lastActivity": "2026-02-03"
                }
            ]"#,
        )?;

        let mut out = Vec::new();

        accounts_report(&accounts).write_to(&mut out)?;

        let rendered = String::from_utf8_lossy(&out);

        assert!(rendered.contains("Platinum"));
        assert!(rendered.contains("u-8"));
        assert!(rendered.contains("100%"));

        Ok(())
    }

    #[test]
    fn inconsistent_balance_renders_zero_progress() -> TestResult {
        let accounts: Vec<LoyaltyAccount> = serde_json::from_str(
            r#"[{
                "userId": "u-9",
                "totalPoints": 1250,
                "membershipLevel": "GOLD",
                "joinDate": "2025-01-10",
                "lastActivity": "2026-02-01"
            }]"#,
        )?;

        let mut out = Vec::new();

        accounts_report(&accounts).write_to(&mut out)?;

        let rendered = String::from_utf8_lossy(&out);

        assert!(rendered.contains("u-9"));
        assert!(rendered.contains(" 0%"));
        assert!(rendered.contains("3750"));

        Ok(())
    }
}
