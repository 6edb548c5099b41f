use super::ZaifAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::{PaginationParams, SortOrder};
use serde_json::Value;

impl<R: RestClient> ZaifAgency<R> {
    /// Full account snapshot including funds, rights, and open order count.
    pub async fn get_info(&self) -> Result<Value, AgencyError> {
        self.rest.get_info().await
    }

    pub async fn get_personal_info(&self) -> Result<Value, AgencyError> {
        self.rest.get_personal_info().await
    }

    pub async fn get_id_info(&self) -> Result<Value, AgencyError> {
        self.rest.get_id_info().await
    }

    /// tapi trade_history, with the common pagination vocabulary mapped
    /// onto Zaif's: limit becomes count, the sort order is uppercased, and
    /// the cursor ids become from_id/end_id.
    pub(super) async fn history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        let mut params = Vec::new();
        if let Some(p) = pagination {
            if let Some(limit) = p.limit {
                params.push(("count".to_string(), limit.to_string()));
            }
            let order = match p.order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            params.push(("order".to_string(), order.to_string()));
            if let Some(from_id) = &p.starting_after {
                params.push(("from_id".to_string(), from_id.clone()));
            }
            if let Some(end_id) = &p.ending_before {
                params.push(("end_id".to_string(), end_id.clone()));
            }
        }
        self.rest.trade_history(&params).await
    }
}
