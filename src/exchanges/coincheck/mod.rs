//! Coincheck exchange support.
//!
//! REST API with HMAC-SHA256 request signing over the concatenation of
//! nonce, full URL, and body. Public market data needs no credentials; account
//! reads run on the query tier, order writes on the trade tier, and JPY
//! withdrawal management on the withdraw tier.

pub mod builder;
pub mod connector;
pub mod endpoints;
pub mod rest;
pub mod signer;

pub use builder::build_coincheck;
pub use connector::CoincheckAgency;
pub use rest::CoincheckRestClient;
pub use signer::CoincheckSigner;
