use super::ZaifAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::OrderRequest;
use crate::exchanges::zaif::endpoints;
use serde_json::Value;
use tracing::trace;

impl<R: RestClient> ZaifAgency<R> {
    /// Place a limit order, enforcing the exchange minimum locally first.
    /// A below-minimum order never reaches the wire.
    pub(super) async fn place_order(&self, order: &OrderRequest) -> Result<Value, AgencyError> {
        let minimum = endpoints::minimum_order_amount(&order.pair);
        if let Some(amount) = order.amount {
            if amount < minimum {
                return Err(AgencyError::InvalidParameters(format!(
                    "order amount {amount} is below the {} minimum of {minimum}",
                    order.pair
                )));
            }
        }
        trace!(pair = %order.pair, kind = order.kind.as_str(), "placing order");
        self.rest.trade(order).await
    }
}
