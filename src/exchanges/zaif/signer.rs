use crate::core::credentials::CredentialStore;
use crate::core::errors::AgencyError;
use crate::core::kernel::{nonce_as_seconds, NonceSource, SignedRequest, Signer};
use crate::core::types::CredentialTier;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::sync::Arc;

type HmacSha512 = Hmac<Sha512>;

/// Zaif request authentication.
///
/// Unlike Coincheck, the nonce travels inside the POST body, not in a
/// header: the final body is `nonce=<seconds.millis>&<caller body>`, and
/// the signature is lowercase-hex HMAC-SHA512 over exactly those final
/// body bytes. Headers are `key` and `sign`. The rewritten body is
/// returned in [`SignedRequest::body`] so the transport sends the same
/// bytes that were signed.
pub struct ZaifSigner {
    credentials: Arc<CredentialStore>,
    nonce: Arc<NonceSource>,
}

impl ZaifSigner {
    pub fn new(credentials: Arc<CredentialStore>, nonce: Arc<NonceSource>) -> Self {
        Self { credentials, nonce }
    }

    /// HMAC-SHA512 over the final body bytes. Pure.
    pub fn signature(api_secret: &str, body: &[u8]) -> Result<String, AgencyError> {
        let mut mac = HmacSha512::new_from_slice(api_secret.as_bytes())
            .map_err(|e| AgencyError::Auth(format!("invalid secret key: {e}")))?;
        mac.update(body);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// The body as sent: nonce first, then the caller's parameters.
    pub fn final_body(nonce_ms: u64, body: &[u8]) -> Vec<u8> {
        let nonce = nonce_as_seconds(nonce_ms);
        let mut out = format!("nonce={nonce}").into_bytes();
        if !body.is_empty() {
            out.push(b'&');
            out.extend_from_slice(body);
        }
        out
    }
}

impl Signer for ZaifSigner {
    fn sign_request(
        &self,
        tier: CredentialTier,
        _method: &str,
        _url: &str,
        body: &[u8],
    ) -> Result<SignedRequest, AgencyError> {
        let creds = self.credentials.get(tier)?;
        let nonce_ms = self.nonce.next();
        let final_body = Self::final_body(nonce_ms, body);
        let signature = Self::signature(creds.api_secret(), &final_body)?;
        Ok(SignedRequest {
            headers: vec![
                ("key".to_string(), creds.api_key().to_string()),
                ("sign".to_string(), signature),
            ],
            body: Some(final_body),
        })
    }
}
