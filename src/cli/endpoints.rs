//! `endpoints` command.

use std::io::Write;

use clap::Args;
use storefront::{
    api::{auth::AuthConfig, endpoints::ServiceEndpoints},
    presentation::ColorToken,
    tiers::Tier,
};

use crate::cli::{CliError, render::Report};

#[derive(Debug, Args)]
pub(crate) struct EndpointsArgs {
    #[command(flatten)]
    endpoints: ServiceEndpoints,

    #[command(flatten)]
    auth: AuthConfig,
}

pub(crate) fn run(args: &EndpointsArgs, out: &mut impl Write) -> Result<(), CliError> {
    endpoints_report(&args.endpoints, &args.auth).write_to(out)
}

fn endpoints_report(endpoints: &ServiceEndpoints, auth: &AuthConfig) -> Report {
    let mut report = Report::new(["Resource", "URL"]);

    let rows = [
        ("Products", endpoints.products()),
        ("Product discounts", endpoints.product_discounts("{productId}")),
        ("Product pricing", endpoints.product_pricing("{productId}")),
        ("Discounts", endpoints.discounts()),
        ("Loyalty accounts", endpoints.crm()),
        ("Loyalty score", endpoints.loyalty_score("{userId}")),
        ("Rewards", endpoints.rewards()),
        ("Transactions", endpoints.user_transactions("{userId}")),
        ("Tier benefits", endpoints.tier_benefits_for(Tier::Gold)),
        ("Shipments", endpoints.shippings()),
        ("Shipment status", endpoints.shipping_status("{shippingId}")),
        ("Login", endpoints.login()),
    ];

    for (resource, url) in rows {
        report.row([resource.to_string(), url]);
    }

    let (state, color) = if auth.context().is_authenticated() {
        ("Bearer token configured", ColorToken::Green)
    } else {
        ("No token: protected requests will fail", ColorToken::Red)
    };

    let row = report.row(["Authentication".to_string(), state.to_string()]);
    report.color(row, 1, color);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(token: Option<&str>) -> String {
        let auth = AuthConfig {
            auth_token: token.map(str::to_string),
        };
        let mut out = Vec::new();

        assert!(
            endpoints_report(&ServiceEndpoints::default(), &auth)
                .write_to(&mut out)
                .is_ok()
        );

        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn token_is_never_printed() {
        let rendered = render(Some("s3cr3t-token"));

        assert!(rendered.contains("Bearer token configured"));
        assert!(!rendered.contains("s3cr3t-token"));
    }

    #[test]
    fn missing_token_is_reported() {
        assert!(render(Some("   ")).contains("No token"));
    }

    #[test]
    fn lists_default_service_urls() {
        let rendered = render(None);

        assert!(rendered.contains("http://localhost:8098/api/loyalty/crm"));
        assert!(rendered.contains("http://localhost:8097/api/shipping/shippings"));
    }
}
