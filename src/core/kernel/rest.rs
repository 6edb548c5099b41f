use crate::core::errors::AgencyError;
use crate::core::kernel::response::{ResponseContext, ResponseOutcome, ResponseState};
use crate::core::kernel::signer::Signer;
use crate::core::types::CredentialTier;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Default per-request timeout. The exchanges answer well inside this; a
/// hung connection must not stall a trading session indefinitely.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP transport interface used by the trading agencies.
///
/// `auth` names the credential tier a call must be signed with; `None`
/// means a public endpoint. Implementations perform no retries; a blind
/// retry against an order-submission endpoint risks placing the order
/// twice, so retry policy stays with the caller.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET `endpoint` with the given query parameters.
    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError>;

    /// POST `endpoint` with a form-encoded body.
    async fn post(
        &self,
        endpoint: &str,
        body: &[u8],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError>;

    /// DELETE `endpoint`.
    async fn delete(
        &self,
        endpoint: &str,
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError>;
}

/// Configuration for the REST transport.
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    pub base_url: String,
    /// Exchange name, used in tracing spans only.
    pub exchange_name: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: "koinx/0.1".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for [`ReqwestRest`] instances.
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, AgencyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| AgencyError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// [`RestClient`] implementation on top of reqwest.
///
/// Each call owns a fresh [`ResponseContext`]; headers and buffers never
/// leak from one request into the next.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Full request URL: base, endpoint path, form-encoded query string.
    /// The signed URL and the sent URL must be the same bytes (Coincheck
    /// signs the full URI), so this string is built once and used for both.
    fn build_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, AgencyError> {
        let joined = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let url = if query.is_empty() {
            reqwest::Url::parse(&joined)
        } else {
            reqwest::Url::parse_with_params(&joined, query.iter().copied())
        }
        .map_err(|e| AgencyError::InvalidParameters(format!("invalid request URL: {e}")))?;
        Ok(url.to_string())
    }

    #[instrument(
        skip(self, body),
        fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint)
    )]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: &[u8],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        let url = self.build_url(endpoint, query)?;
        let mut request = self.client.request(method.clone(), &url);

        let mut outgoing_body = (!body.is_empty()).then(|| body.to_vec());

        if let Some(tier) = auth {
            let signer = self.signer.as_ref().ok_or_else(|| {
                AgencyError::Auth("authentication required but no signer configured".to_string())
            })?;
            let signed = signer.sign_request(tier, method.as_str(), &url, body)?;
            for (key, value) in signed.headers {
                request = request.header(&key, &value);
            }
            if signed.body.is_some() {
                outgoing_body = signed.body;
            }
        }

        if let Some(bytes) = outgoing_body {
            request = request
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(bytes);
        }

        let response = request.send().await.map_err(|e| AgencyError::Transport {
            message: format!("request failed: {e}"),
        })?;

        let status = response.status();
        let mut context = ResponseContext::new();
        context.set_http_status(status.as_u16());

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => context.push_chunk(&bytes),
                Err(e) => {
                    context.fail_transport(format!("body stream failed: {e}"));
                    break;
                }
            }
        }
        if context.state() != ResponseState::TransportError {
            context.finish();
        }

        trace!(
            status = status.as_u16(),
            bytes = context.raw_bytes().len(),
            "response received"
        );

        // A 2xx status is required before the parsed value counts as a
        // result. Exchanges return structured error bodies on failure; the
        // raw body rides along in the error for diagnostics.
        if !status.is_success() {
            return Err(AgencyError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(context.raw_bytes()).into_owned(),
            });
        }

        match context.into_outcome() {
            Some(ResponseOutcome::Complete(value)) => Ok(value),
            Some(ResponseOutcome::ParseError { message, raw }) => {
                Err(AgencyError::Parse { message, raw })
            }
            Some(ResponseOutcome::TransportError { message }) => {
                Err(AgencyError::Transport { message })
            }
            None => Err(AgencyError::Transport {
                message: "response ended in a non-terminal state".to_string(),
            }),
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.make_request(Method::GET, endpoint, query, &[], auth)
            .await
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &[u8],
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.make_request(Method::POST, endpoint, &[], body, auth)
            .await
    }

    async fn delete(
        &self,
        endpoint: &str,
        auth: Option<CredentialTier>,
    ) -> Result<Value, AgencyError> {
        self.make_request(Method::DELETE, endpoint, &[], &[], auth)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ReqwestRest {
        let config =
            RestClientConfig::new("https://coincheck.com/".to_string(), "coincheck".to_string());
        RestClientBuilder::new(config).build().unwrap()
    }

    #[test]
    fn url_joins_base_and_endpoint_once() {
        let rest = client();
        assert_eq!(
            rest.build_url("/api/ticker", &[]).unwrap(),
            "https://coincheck.com/api/ticker"
        );
        assert_eq!(
            rest.build_url("api/ticker", &[]).unwrap(),
            "https://coincheck.com/api/ticker"
        );
    }

    #[test]
    fn url_appends_query_in_order() {
        let rest = client();
        assert_eq!(
            rest.build_url("/api/trades", &[("pair", "btc_jpy"), ("limit", "10")])
                .unwrap(),
            "https://coincheck.com/api/trades?pair=btc_jpy&limit=10"
        );
    }

    #[test]
    fn query_values_are_form_encoded() {
        let rest = client();
        assert_eq!(
            rest.build_url("/api/trades", &[("cursor", "a&b=c")]).unwrap(),
            "https://coincheck.com/api/trades?cursor=a%26b%3Dc"
        );
    }

    #[tokio::test]
    async fn signed_call_without_signer_is_an_auth_error() {
        let rest = client();
        let result = rest
            .get("/api/accounts/balance", &[], Some(CredentialTier::Query))
            .await;
        assert!(matches!(result, Err(AgencyError::Auth(_))));
    }
}
