use super::CoincheckAgency;
use crate::core::errors::AgencyError;
use crate::core::kernel::RestClient;
use crate::core::types::PaginationParams;
use serde_json::Value;

impl<R: RestClient> CoincheckAgency<R> {
    pub async fn get_account_info(&self) -> Result<Value, AgencyError> {
        self.rest.get_account_info().await
    }

    // JPY withdrawal management. These run on the withdraw tier, which
    // most deployments leave unconfigured.

    pub async fn get_bank_accounts(&self) -> Result<Value, AgencyError> {
        self.rest.get_bank_accounts().await
    }

    pub async fn add_bank_account(
        &self,
        bank_name: &str,
        branch_name: &str,
        bank_account_type: &str,
        number: &str,
        name: &str,
    ) -> Result<Value, AgencyError> {
        self.rest
            .add_bank_account(bank_name, branch_name, bank_account_type, number, name)
            .await
    }

    pub async fn remove_bank_account(&self, bank_account_id: i64) -> Result<Value, AgencyError> {
        self.rest.remove_bank_account(bank_account_id).await
    }

    pub async fn get_withdraws_history(
        &self,
        pagination: Option<&PaginationParams>,
    ) -> Result<Value, AgencyError> {
        self.rest.get_withdraws_history(pagination).await
    }

    pub async fn withdraw_request(
        &self,
        bank_account_id: i64,
        amount: &str,
        currency: &str,
    ) -> Result<Value, AgencyError> {
        self.rest
            .withdraw_request(bank_account_id, amount, currency)
            .await
    }

    pub async fn withdraw_cancel(&self, withdraw_id: i64) -> Result<Value, AgencyError> {
        self.rest.withdraw_cancel(withdraw_id).await
    }
}
