use async_trait::async_trait;
use koinx::core::errors::AgencyError;
use koinx::core::kernel::RestClient;
use koinx::core::types::CredentialTier;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// One observed transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub auth: Option<CredentialTier>,
}

/// Recording transport: every call is logged and answered with a canned
/// body, so tests can assert on paths, encodings, and credential tiers
/// without a network.
pub struct MockRest {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    response: Value,
}

impl MockRest {
    pub fn new(response: Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn ok() -> Self {
        Self::new(json!({"success": true}))
    }

    /// Shared handle to the call log, usable after the mock moves into an
    /// agency.
    pub fn call_log(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.record(RecordedCall {
            method: "GET".to_string(),
            endpoint: endpoint.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: None,
            auth,
        });
        Ok(self.response.clone())
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &[u8],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.record(RecordedCall {
            method: "POST".to_string(),
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            body: Some(String::from_utf8_lossy(body).into_owned()),
            auth,
        });
        Ok(self.response.clone())
    }

    async fn delete(
        &self,
        endpoint: &str,
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.record(RecordedCall {
            method: "DELETE".to_string(),
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            body: None,
            auth,
        });
        Ok(self.response.clone())
    }
}
