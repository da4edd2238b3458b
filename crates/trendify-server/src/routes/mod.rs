//! Trendify API Routes
//!
//! - /trendify/flows - Flow catalogue and invocation
//! - /trendify/users/:user_id/generations - Saved generation history
//! - /trendify/webhooks/:gateway - Billing webhooks (signature-authenticated)

pub mod flows;
pub mod generations;
pub mod swagger;
pub mod webhooks;
