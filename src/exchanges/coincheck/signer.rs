use crate::core::credentials::CredentialStore;
use crate::core::errors::AgencyError;
use crate::core::kernel::{NonceSource, SignedRequest, Signer};
use crate::core::types::CredentialTier;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Coincheck request authentication.
///
/// Signing message: ASCII-decimal nonce, then the full request URI, then
/// the raw POST body (nothing for GET/DELETE), concatenated with no
/// separators. Signature: lowercase-hex HMAC-SHA256 keyed by the API
/// secret. Emitted as three headers: `ACCESS-KEY`, `ACCESS-NONCE`,
/// `ACCESS-SIGNATURE`.
pub struct CoincheckSigner {
    credentials: Arc<CredentialStore>,
    nonce: Arc<NonceSource>,
}

impl CoincheckSigner {
    pub fn new(credentials: Arc<CredentialStore>, nonce: Arc<NonceSource>) -> Self {
        Self { credentials, nonce }
    }

    /// The signature for a fixed nonce. Pure: same inputs, same bytes out.
    pub fn signature(
        api_secret: &str,
        nonce_ms: u64,
        url: &str,
        body: &[u8],
    ) -> Result<String, AgencyError> {
        let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
            .map_err(|e| AgencyError::Auth(format!("invalid secret key: {e}")))?;
        mac.update(nonce_ms.to_string().as_bytes());
        mac.update(url.as_bytes());
        mac.update(body);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn auth_headers(
        api_key: &str,
        api_secret: &str,
        nonce_ms: u64,
        url: &str,
        body: &[u8],
    ) -> Result<Vec<(String, String)>, AgencyError> {
        let signature = Self::signature(api_secret, nonce_ms, url, body)?;
        Ok(vec![
            ("ACCESS-KEY".to_string(), api_key.to_string()),
            ("ACCESS-NONCE".to_string(), nonce_ms.to_string()),
            ("ACCESS-SIGNATURE".to_string(), signature),
        ])
    }
}

impl Signer for CoincheckSigner {
    fn sign_request(
        &self,
        tier: CredentialTier,
        _method: &str,
        url: &str,
        body: &[u8],
    ) -> Result<SignedRequest, AgencyError> {
        let creds = self.credentials.get(tier)?;
        let nonce_ms = self.nonce.next();
        let headers =
            Self::auth_headers(creds.api_key(), creds.api_secret(), nonce_ms, url, body)?;
        Ok(SignedRequest {
            headers,
            body: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_api_secret";

    #[test]
    fn signature_matches_known_vector() {
        // HMAC-SHA256("test_api_secret",
        //   "1616926800000https://coincheck.com/api/accounts/balance")
        let sig = CoincheckSigner::signature(
            SECRET,
            1_616_926_800_000,
            "https://coincheck.com/api/accounts/balance",
            b"",
        )
        .unwrap();
        assert_eq!(
            sig,
            "6175161fcf60f748eb76b747bd4a24bb4e775de0bb0f2479c3db4d805598b080"
        );
    }

    #[test]
    fn post_body_is_part_of_the_message() {
        let sig = CoincheckSigner::signature(
            SECRET,
            1_616_926_800_000,
            "https://coincheck.com/api/exchange/orders",
            b"pair=btc_jpy&order_type=buy&rate=4000000&amount=0.005",
        )
        .unwrap();
        assert_eq!(
            sig,
            "f58dcd790510ada5d3c86296e2e305d44deab15c45f0a055edc5d9baec53c853"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let a = CoincheckSigner::signature(SECRET, 42, "https://coincheck.com/api/ticker", b"")
            .unwrap();
        let b = CoincheckSigner::signature(SECRET, 42, "https://coincheck.com/api/ticker", b"")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn headers_carry_key_nonce_signature() {
        let headers = CoincheckSigner::auth_headers(
            "test_api_key",
            SECRET,
            1_616_926_800_000,
            "https://coincheck.com/api/accounts/balance",
            b"",
        )
        .unwrap();
        assert_eq!(headers[0].0, "ACCESS-KEY");
        assert_eq!(headers[0].1, "test_api_key");
        assert_eq!(headers[1].0, "ACCESS-NONCE");
        assert_eq!(headers[1].1, "1616926800000");
        assert_eq!(headers[2].0, "ACCESS-SIGNATURE");
        assert_eq!(headers[2].1.len(), 64);
    }

    #[test]
    fn signing_with_a_missing_tier_fails() {
        let signer = CoincheckSigner::new(
            Arc::new(CredentialStore::empty()),
            Arc::new(NonceSource::new()),
        );
        let result = signer.sign_request(
            CredentialTier::Trade,
            "POST",
            "https://coincheck.com/api/exchange/orders",
            b"",
        );
        assert!(matches!(
            result,
            Err(AgencyError::MissingCredentials {
                tier: CredentialTier::Trade
            })
        ));
    }
}
