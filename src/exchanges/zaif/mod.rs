//! Zaif exchange support.
//!
//! Public market data lives under versioned GET paths; every private
//! operation is a POST to the single `/tapi` endpoint, selected by a
//! `method` field in the signed body. Signing is HMAC-SHA512 over the
//! final body bytes with the nonce embedded as seconds with three
//! decimals.

pub mod builder;
pub mod connector;
pub mod endpoints;
pub mod rest;
pub mod signer;

pub use builder::build_zaif;
pub use connector::ZaifAgency;
pub use rest::ZaifRestClient;
pub use signer::ZaifSigner;
