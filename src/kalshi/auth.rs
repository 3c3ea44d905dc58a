use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderMap, HeaderValue};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::BlindedSigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::errors::{ConfigError, VenueError};

pub const HEADER_KEY: &str = "KALSHI-ACCESS-KEY";
pub const HEADER_TIMESTAMP: &str = "KALSHI-ACCESS-TIMESTAMP";
pub const HEADER_SIGNATURE: &str = "KALSHI-ACCESS-SIGNATURE";

/// API-key credentials for Kalshi's portfolio endpoints.
///
/// Requests are signed with RSA-PSS (SHA-256, salt = digest length) over
/// `{timestamp_ms}{METHOD}{path}`, path without query string.
pub struct KalshiAuth {
    key_id: String,
    signing_key: BlindedSigningKey<Sha256>,
}

impl fmt::Debug for KalshiAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KalshiAuth")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl KalshiAuth {
    /// Accepts PKCS#8 or PKCS#1 PEM. Literal `\n` sequences (common when the
    /// key is stored in a one-line env var) are unescaped first.
    pub fn from_pem(key_id: impl Into<String>, pem: &str) -> Result<Self, ConfigError> {
        let pem = pem.trim().replace("\\n", "\n");
        let key = RsaPrivateKey::from_pkcs8_pem(&pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
            .map_err(|e| ConfigError::InvalidKey(e.to_string()))?;

        Ok(Self {
            key_id: key_id.into(),
            signing_key: BlindedSigningKey::<Sha256>::new(key),
        })
    }

    pub fn signing_message(timestamp_ms: i64, method: &str, path: &str) -> String {
        let path = path.split('?').next().unwrap_or(path);
        format!("{timestamp_ms}{}{path}", method.to_uppercase())
    }

    /// Base64 signature for one request.
    pub fn sign(&self, timestamp_ms: i64, method: &str, path: &str) -> String {
        let message = Self::signing_message(timestamp_ms, method, path);
        let signature = self
            .signing_key
            .sign_with_rng(&mut rand::thread_rng(), message.as_bytes());
        BASE64.encode(signature.to_bytes())
    }

    /// The three auth headers for a request made now.
    pub fn headers(&self, method: &str, path: &str) -> Result<HeaderMap, VenueError> {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let signature = self.sign(timestamp_ms, method, path);

        let value = |s: &str| {
            HeaderValue::from_str(s).map_err(|e| VenueError::Auth(format!("bad header value: {e}")))
        };

        let mut headers = HeaderMap::new();
        headers.insert(HEADER_KEY, value(&self.key_id)?);
        headers.insert(HEADER_TIMESTAMP, value(&timestamp_ms.to_string())?);
        headers.insert(HEADER_SIGNATURE, value(&signature)?);
        Ok(headers)
    }
}
