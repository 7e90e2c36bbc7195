//! Storefront
//!
//! Calculation layer and service boundary for the storefront admin dashboard: loyalty tier
//! progress, discount validity and pricing, and the presentation of backend status values.

pub mod api;
pub mod discounts;
pub mod ids;
pub mod loyalty;
pub mod prelude;
pub mod presentation;
pub mod pricing;
pub mod products;
pub mod shipping;
pub mod tiers;
pub mod timestamps;
