//! Service boundary
//!
//! Everything needed to talk to the backend services except the transport itself: where the
//! services live, how calls are authenticated, how responses map to errors, and how per-key
//! requests are fanned out.

pub mod auth;
pub mod endpoints;
pub mod errors;
pub mod fanout;
