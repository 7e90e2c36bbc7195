//! Service endpoints

use clap::Args;

use crate::tiers::Tier;

/// Default product service base URL.
pub const DEFAULT_PRODUCT_URL: &str = "http://localhost:8099/api/products";

/// Default loyalty service base URL.
pub const DEFAULT_LOYALTY_URL: &str = "http://localhost:8098/api/loyalty";

/// Default shipping service base URL.
pub const DEFAULT_SHIPPING_URL: &str = "http://localhost:8097/api/shipping";

/// Default user service base URL.
pub const DEFAULT_USER_URL: &str = "http://localhost:8096/api/users";

/// Default auth service base URL.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8096/api/auth";

/// Base URLs of the backend services.
#[derive(Debug, Clone, Args)]
pub struct ServiceEndpoints {
    /// Product service base URL
    #[arg(
        long = "product-service-url",
        env = "PRODUCT_SERVICE_URL",
        default_value = DEFAULT_PRODUCT_URL
    )]
    pub product: String,

    /// Loyalty service base URL
    #[arg(
        long = "loyalty-service-url",
        env = "LOYALTY_SERVICE_URL",
        default_value = DEFAULT_LOYALTY_URL
    )]
    pub loyalty: String,

    /// Shipping service base URL
    #[arg(
        long = "shipping-service-url",
        env = "SHIPPING_SERVICE_URL",
        default_value = DEFAULT_SHIPPING_URL
    )]
    pub shipping: String,

    /// User service base URL
    #[arg(
        long = "user-service-url",
        env = "USER_SERVICE_URL",
        default_value = DEFAULT_USER_URL
    )]
    pub user: String,

    /// Authentication base URL
    #[arg(
        long = "auth-url",
        env = "AUTH_URL",
        default_value = DEFAULT_AUTH_URL
    )]
    pub auth: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT_URL.to_string(),
            loyalty: DEFAULT_LOYALTY_URL.to_string(),
            shipping: DEFAULT_SHIPPING_URL.to_string(),
            user: DEFAULT_USER_URL.to_string(),
            auth: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

impl ServiceEndpoints {
    /// `GET`: product listing.
    #[must_use]
    pub fn products(&self) -> String {
        join(&self.product, "")
    }

    /// `PUT` / `DELETE`: a single product.
    #[must_use]
    pub fn product(&self, id: &str) -> String {
        join(&self.product, id)
    }

    /// `POST` multipart: create a product together with its images.
    #[must_use]
    pub fn products_with_images(&self) -> String {
        join(&self.product, "with-images")
    }

    /// `GET` / `POST`: all discounts.
    #[must_use]
    pub fn discounts(&self) -> String {
        join(&self.product, "discounts")
    }

    /// `PUT` / `DELETE`: a single discount.
    #[must_use]
    pub fn discount(&self, id: &str) -> String {
        join(&self.product, &format!("discounts/{id}"))
    }

    /// `GET`: discounts attached to a product.
    #[must_use]
    pub fn product_discounts(&self, product_id: &str) -> String {
        join(&self.product, &format!("{product_id}/discounts"))
    }

    /// `GET`: backend-computed pricing for a product.
    #[must_use]
    pub fn product_pricing(&self, product_id: &str) -> String {
        join(&self.product, &format!("{product_id}/pricing"))
    }

    /// `GET`: loyalty accounts.
    #[must_use]
    pub fn crm(&self) -> String {
        join(&self.loyalty, "crm")
    }

    /// `GET`: loyalty score of a user.
    #[must_use]
    pub fn loyalty_score(&self, user_id: &str) -> String {
        join(&self.loyalty, &format!("crm/{user_id}/loyalty-score"))
    }

    /// `GET` / `POST`: rewards.
    #[must_use]
    pub fn rewards(&self) -> String {
        join(&self.loyalty, "rewards")
    }

    /// `GET`: point transactions.
    #[must_use]
    pub fn transactions(&self) -> String {
        join(&self.loyalty, "transactions")
    }

    /// `GET`: point transactions of a user.
    #[must_use]
    pub fn user_transactions(&self, user_id: &str) -> String {
        join(&self.loyalty, &format!("transactions/user/{user_id}"))
    }

    /// `GET` / `POST`: tier benefits.
    #[must_use]
    pub fn tier_benefits(&self) -> String {
        join(&self.loyalty, "tier-benefits")
    }

    /// `GET`: benefits of a tier.
    #[must_use]
    pub fn tier_benefits_for(&self, tier: Tier) -> String {
        join(&self.loyalty, &format!("tier-benefits/tier/{}", tier.code()))
    }

    /// `GET` / `POST`: shipments.
    #[must_use]
    pub fn shippings(&self) -> String {
        join(&self.shipping, "shippings")
    }

    /// `GET`: a single shipment.
    #[must_use]
    pub fn shipping(&self, id: &str) -> String {
        join(&self.shipping, &format!("shippings/{id}"))
    }

    /// `PATCH`: status of a shipment.
    #[must_use]
    pub fn shipping_status(&self, id: &str) -> String {
        join(&self.shipping, &format!("shippings/{id}/status"))
    }

    /// `POST`: sign in.
    #[must_use]
    pub fn login(&self) -> String {
        join(&self.auth, "login")
    }
}
