//! koinx: trading agencies for the Coincheck and Zaif exchanges.
//!
//! The crate is layered the same way for every exchange: a signing kernel
//! (`core::kernel`) handles nonces, request signatures, and streaming
//! response parsing; per-exchange modules (`exchanges::*`) bind the kernel
//! to each API's paths, encodings, and success conventions; and the
//! [`TradingAgency`](core::traits::TradingAgency) facade presents one
//! uniform surface over both.
//!
//! ```no_run
//! use koinx::core::config::AgencyConfig;
//! use koinx::utils::factory::create_agency;
//!
//! # async fn example() -> Result<(), koinx::core::errors::AgencyError> {
//! let config = AgencyConfig {
//!     exchange_name: "coincheck".to_string(),
//!     base_url: None,
//!     credentials_file: None,
//! };
//! let agency = create_agency(&config)?;
//! let ticker = agency.get_ticker("btc_jpy").await?;
//! println!("{ticker}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod exchanges;
pub mod utils;

pub use crate::core::config::{AgencyConfig, AppConfig, ConfigError};
pub use crate::core::credentials::CredentialStore;
pub use crate::core::errors::AgencyError;
pub use crate::core::polling::{spawn_ticker_poll, TickerPoll};
pub use crate::core::traits::TradingAgency;
pub use crate::core::types::{
    CredentialTier, OrderKind, OrderRequest, OrderSide, PaginationParams, SortOrder,
};
pub use crate::utils::factory::create_agency;
