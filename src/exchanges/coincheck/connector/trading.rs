use super::CoincheckAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::{OrderKind, OrderRequest};
use crate::exchanges::coincheck::endpoints;
use serde_json::Value;
use tracing::trace;

impl<R: RestClient> CoincheckAgency<R> {
    /// Place an order, enforcing the exchange minimum locally first. A
    /// below-minimum order never reaches the wire.
    pub(super) async fn place_order(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        // market_buy is quoted in JPY, so the base-amount floor does not
        // apply to it.
        if !matches!(order.kind, OrderKind::MarketBuy) {
            let minimum = endpoints::minimum_order_amount(&order.pair);
            if let Some(amount) = order.amount {
                if amount < minimum {
                    return Err(AgencyError::InvalidParameters(format!(
                        "order amount {amount} is below the {} minimum of {minimum}",
                        order.pair
                    )));
                }
            }
        }
        trace!(pair = %order.pair, kind = order.kind.as_str(), "placing order");
        self.rest.new_order(order).await
    }

    pub async fn get_cancellation_status(&self, order_id: &str) -> Result<Value, AgencyError> {
        self.rest.get_cancellation_status(order_id).await
    }
}
