//! Rust client for the Smartlead API.
//!
//! Smartlead is an email-outreach service. This crate exposes one async
//! method per API endpoint (campaigns, email accounts, leads, webhooks and
//! client accounts) on top of a small dispatch core that authenticates every
//! call, keeps requests under the API's rate limits and normalizes errors.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use smartlead::{Client, StatisticsQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smartlead::Error> {
//!     let client = Client::builder("your-api-key").build()?;
//!
//!     let stats = client
//!         .get_campaign_statistics(50318, &StatisticsQuery::default())
//!         .await?;
//!     println!("{:#}", stats);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate limiting
//!
//! All calls made through one [`Client`] (and its clones) are spaced by at
//! least one second by default. See [`RateLimiter`] for the tuning knobs.

mod client;
mod credential;
mod endpoints;
mod error;
mod paginate;
mod rate_limiter;
mod request;
mod types;
mod version;

pub use client::{Client, ClientBuilder};
pub use credential::Credential;
pub use error::{Error, Result};
pub use paginate::{paginate, Page, MAX_PAGE_SIZE};
pub use rate_limiter::{RateLimiter, DEFAULT_GRACE_INTERVAL, DEFAULT_MIN_INTERVAL};
pub use request::{format_query_value, Method, Payload, RequestDescriptor};
pub use types::*;
pub use version::SDK_VERSION;
