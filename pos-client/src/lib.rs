//! HTTP client for the external POS platform's REST API
//!
//! Thin request/response marshalers implementing the gateway traits from
//! `shared`. One trait method is one HTTP call; no business rules live
//! here. The simulation engine consumes these through trait objects so
//! tests can substitute deterministic fakes.

mod cash;
mod catalog;
mod client;
mod config;
mod error;
mod gift_cards;
mod http;
mod orders;
mod payments;
mod refunds;

pub use client::PlatformClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
