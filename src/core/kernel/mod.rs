//! Transport kernel shared by all trading agencies.
//!
//! The kernel is exchange-agnostic: it knows how to move signed HTTP
//! requests and stream JSON responses, and nothing about what the bytes
//! mean. Three pieces:
//!
//! - [`RestClient`] / [`ReqwestRest`]: the HTTP adapter. One
//!   [`ResponseContext`] per call, explicit timeout, no automatic retries.
//! - [`ResponseContext`]: incremental JSON accumulator fed by the
//!   transport's byte stream; raw bytes kept for diagnostics.
//! - [`Signer`] / [`NonceSource`]: pluggable per-exchange authentication
//!   with a mutex-guarded monotonic nonce counter.
//!
//! Exchange specifics (endpoint paths, signing messages, success-flag
//! conventions) live under `crate::exchanges`.

pub mod response;
pub mod rest;
pub mod signer;

pub use response::{ResponseContext, ResponseOutcome, ResponseState};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{nonce_as_seconds, NonceSource, SignedRequest, Signer};
