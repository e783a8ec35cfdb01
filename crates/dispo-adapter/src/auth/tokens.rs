/*
[INPUT]:  Access/refresh token pairs from the auth endpoints
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When changing token storage or expiry derivation
*/

use std::sync::{Arc, RwLock};

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Duration, Utc};

/// Fallback lifetime when the access token carries no readable `exp` claim.
/// Matches the service's advertised "24h" access token lifetime.
const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Stored token pair with derived expiry
#[derive(Debug, Clone)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Thread-safe store for the session's token pair
#[derive(Debug, Clone)]
pub struct TokenStore {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenStore {
    /// Create a new empty token store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a token pair. Expiry is read from the access token's JWT `exp`
    /// claim when present, else the default lifetime is assumed.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) {
        let expires_at = decode_expiry(access_token)
            .unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_TTL_SECONDS));

        let token_data = TokenData {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_at,
        };

        let mut guard = self.data.write().unwrap();
        *guard = Some(token_data);
    }

    /// Get the current access token if available
    pub fn access_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.access_token.clone())
    }

    /// Get the current refresh token if available
    pub fn refresh_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.refresh_token.clone())
    }

    /// Check if the access token is expired (or missing)
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap();
        match guard.as_ref() {
            Some(data) => Utc::now() > data.expires_at,
            None => true,
        }
    }

    /// Get the full token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap();
        guard.clone()
    }

    /// Clear the stored tokens
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the `exp` claim (seconds since epoch) from a JWT access token
fn decode_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;

    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn make_test_jwt(exp: i64) -> String {
        let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});
        let payload = serde_json::json!({"sub": "user-1", "exp": exp});

        let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
        let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());

        format!("{header_b64}.{payload_b64}.signature")
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TokenStore::new();
        assert!(store.access_token().is_none());
        assert!(store.is_expired());
    }

    #[test]
    fn test_set_and_get_tokens() {
        let store = TokenStore::new();
        let future = (Utc::now() + Duration::hours(1)).timestamp();
        store.set_tokens(&make_test_jwt(future), "refresh-token");

        assert!(store.access_token().is_some());
        assert_eq!(store.refresh_token(), Some("refresh-token".to_string()));
        assert!(!store.is_expired());
    }

    #[test]
    fn test_expiry_read_from_jwt() {
        let store = TokenStore::new();
        let past = (Utc::now() - Duration::hours(1)).timestamp();
        store.set_tokens(&make_test_jwt(past), "refresh-token");

        assert!(store.is_expired());
    }

    #[test]
    fn test_opaque_token_falls_back_to_default_ttl() {
        let store = TokenStore::new();
        store.set_tokens("not-a-jwt", "refresh-token");

        let data = store.token_data().unwrap();
        assert!(data.expires_at > Utc::now());
        assert!(!store.is_expired());
    }

    #[test]
    fn test_clear_tokens() {
        let store = TokenStore::new();
        store.set_tokens("not-a-jwt", "refresh-token");

        store.clear();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.is_expired());
    }
}
