//! HTTP client layer for the STS Clearance Hub backend.
//!
//! - [`retry`] -- timeout and retry-with-backoff wrappers applied to every
//!   resource fetch.
//! - [`api`] -- the [`TransferApi`](api::TransferApi) boundary trait and its
//!   reqwest implementation.
//! - [`config`] -- environment-driven client configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod retry;

pub use api::{HttpTransferApi, TransferApi};
pub use config::ClientConfig;
pub use error::ApiError;
pub use retry::{fetch_with_policy, with_retry, with_timeout, RetryPolicy};
