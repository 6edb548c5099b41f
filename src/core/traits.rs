use crate::core::errors::AgencyError;
use crate::core::types::{OrderRequest, PaginationParams};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

/// The per-exchange trading agency: credentials, base URL, and the REST
/// operations composed over the kernel.
///
/// All operations return the exchange's parsed JSON body as an opaque
/// [`Value`]; callers (CLI, GUI) render it themselves. An `Ok` always
/// carries a payload; the implementation has already verified HTTP status
/// *and* the exchange's own success convention before returning.
#[async_trait]
pub trait TradingAgency: Send + Sync {
    fn exchange_name(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Smallest base-currency amount the exchange accepts for `pair`.
    fn minimum_order_amount(&self, pair: &str) -> Decimal;

    /// Generic passthrough to a public endpoint. `command` must name an
    /// entry in the exchange's endpoint catalog.
    async fn query(
        &self,
        method: &str,
        command: &str,
        params: &Value,
    ) -> Result<Value, AgencyError>;

    /// Generic passthrough to a signed endpoint, with the tier resolved
    /// from the catalog entry.
    async fn execute(
        &self,
        method: &str,
        command: &str,
        params: &Value,
    ) -> Result<Value, AgencyError>;

    // -- market data (public, no credentials) --

    async fn get_ticker(&self, pair: &str) -> Result<Value, AgencyError>;

    async fn get_trades(
        &self,
        pair: &str,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError>;

    async fn get_order_book(&self, pair: &str) -> Result<Value, AgencyError>;

    // -- trading (trade tier) --

    async fn new_order(&self, order: &OrderRequest) -> Result<Value, AgencyError>;

    async fn cancel_order(&self, order_id: &str) -> Result<Value, AgencyError>;

    // -- account and order reads (query tier) --

    async fn get_open_orders(&self, pair: Option<&str>) -> Result<Value, AgencyError>;

    async fn get_order_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError>;

    async fn get_balance(&self) -> Result<Value, AgencyError>;
}
