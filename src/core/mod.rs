pub mod config;
pub mod credentials;
pub mod errors;
pub mod kernel;
pub mod polling;
pub mod traits;
pub mod types;
