//! Asynchronous client for the G-Core CDN API
//!
//! The crate is split in two layers:
//!
//! - [`Client`] is the dispatch core. It resolves paths against the base URL,
//!   attaches the bearer token, sends requests and turns failure statuses
//!   into [`Error::Api`].
//! - [`CommonClient`] and [`ResellerClient`] wrap a [`Client`] and expose the
//!   typed services available to each account type.
//!
//! ```rust,no_run
//! use gcore_cdn::{AuthOptions, ClientConfig, CommonClient};
//!
//! # async fn run() -> gcore_cdn::Result<()> {
//! let cdn = CommonClient::new(ClientConfig::from_env()?)?;
//! cdn.authenticate(&AuthOptions::new("user@example.com", "secret")).await?;
//!
//! for resource in cdn.resources().list().await?.iter() {
//!     println!("{} {}", resource.id, resource.cname);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod services;
pub mod time;
pub mod transport;

pub use client::{AuthOptions, Client, CommonClient, LOGIN_PATH, NO_BODY, ResellerClient, Token};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, Error, Result, is_failure_status};
pub use query::{serialize_query, with_query};
pub use response::{ApiResponse, RawResponse};
pub use time::GcoreTime;
