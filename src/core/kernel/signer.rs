use crate::core::errors::AgencyError;
use crate::core::types::CredentialTier;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Authentication material produced for one request.
///
/// Coincheck-style schemes only add headers. Zaif-style schemes also
/// rewrite the POST body (the nonce is a body field there), so a non-empty
/// `body` replaces whatever the caller was about to send.
#[derive(Debug, Clone, Default)]
pub struct SignedRequest {
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Pluggable request-signing interface, one implementation per exchange.
///
/// `url` is the full request URL including the query string; `body` is the
/// raw bytes the caller intends to send (empty for GET/DELETE). The signer
/// selects the credential pair for `tier` itself, so the transport never
/// touches key material.
pub trait Signer: Send + Sync {
    fn sign_request(
        &self,
        tier: CredentialTier,
        method: &str,
        url: &str,
        body: &[u8],
    ) -> Result<SignedRequest, AgencyError>;
}

/// Strictly increasing nonce source shared by all signed requests of one
/// agency.
///
/// Seeded from the wall clock in milliseconds, then forced monotonic: if
/// the clock has not advanced since the previous call (or moved backwards),
/// the counter steps by one instead. Two threads signing within the same
/// millisecond can therefore never observe a duplicate; the exchange would
/// reject the second request as a replay.
#[derive(Debug)]
pub struct NonceSource {
    last: Mutex<u64>,
}

impl Default for NonceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource {
    pub fn new() -> Self {
        Self { last: Mutex::new(0) }
    }

    /// Next nonce in milliseconds-since-epoch scale.
    pub fn next(&self) -> u64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        let mut last = self.last.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *last = now_ms.max(*last + 1);
        *last
    }
}

/// Render a millisecond nonce as fractional seconds with exactly three
/// decimal places (`1616926800.123`), the format Zaif's `/tapi` accepts.
pub fn nonce_as_seconds(nonce_ms: u64) -> String {
    format!("{}.{:03}", nonce_ms / 1000, nonce_ms % 1000)
}
