//! OAuth2 access tokens for the FCM API
//!
//! Uses the service-account JWT bearer flow: a self-signed RS256 assertion is
//! exchanged at the key's `token_uri` for a short-lived access token. The token
//! is cached until shortly before it expires.

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tokio::sync::Mutex;

use super::credentials::ServiceAccountKey;
use super::error::FcmError;
use super::types::{JwtClaims, TokenResponse};

/// OAuth2 scope required by `messages:send`
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before Google would reject them
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    /// Unix seconds
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS < self.expires_at
    }
}

pub struct TokenSource {
    client_email: String,
    key_id: String,
    token_uri: String,
    signing_key: EncodingKey,
    http: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(key: &ServiceAccountKey, http: reqwest::Client) -> Result<Self, FcmError> {
        Ok(Self {
            client_email: key.client_email.clone(),
            key_id: key.private_key_id.clone(),
            token_uri: key.token_uri.clone(),
            signing_key: EncodingKey::from_rsa_pem(key.private_key.as_bytes())?,
            http,
            cache: Mutex::new(None),
        })
    }

    /// Returns a cached token, or exchanges a fresh assertion for a new one.
    ///
    /// The cache lock is held across the exchange so concurrent callers wait for
    /// a single refresh.
    pub async fn access_token(&self) -> Result<String, FcmError> {
        let mut cache = self.cache.lock().await;
        let now = Timestamp::now().as_second();

        if let Some(token) = cache.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.access_token.clone());
        }

        tracing::debug!(token_uri = %self.token_uri, "Requesting OAuth2 access token");
        let fresh = self.exchange(now).await?;
        let access_token = fresh.access_token.clone();
        *cache = Some(fresh);

        Ok(access_token)
    }

    fn assertion(&self, now: i64) -> Result<String, FcmError> {
        let mut header = Header::new(Algorithm::RS256);
        if !self.key_id.is_empty() {
            header.kid = Some(self.key_id.clone());
        }
        let claims = JwtClaims {
            iss: &self.client_email,
            sub: &self.client_email,
            scope: FCM_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        Ok(jsonwebtoken::encode(&header, &claims, &self.signing_key)?)
    }

    async fn exchange(&self, now: i64) -> Result<CachedToken, FcmError> {
        let assertion = self.assertion(now)?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|source| FcmError::Transport {
                endpoint: "token",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FcmError::TokenRequest {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await.map_err(|source| FcmError::Decode {
            endpoint: "token",
            source,
        })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};
    use serde::Deserialize;

    const FIXTURE: &str = include_str!("../../../tests/fixtures/service-account.json");

    #[derive(Debug, Deserialize)]
    struct DecodedClaims {
        iss: String,
        sub: String,
        scope: String,
        aud: String,
        iat: i64,
        exp: i64,
    }

    fn source() -> TokenSource {
        let key = ServiceAccountKey::from_json(FIXTURE).unwrap();
        TokenSource::new(&key, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn test_cached_token_freshness() {
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: 1_000,
        };
        assert!(token.is_fresh(900));
        assert!(!token.is_fresh(940));
        assert!(!token.is_fresh(1_000));
    }

    #[test]
    fn test_assertion_header_and_claims() {
        let source = source();
        let jwt = source.assertion(1_700_000_000).unwrap();

        let header = jsonwebtoken::decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(
            header.kid.as_deref(),
            Some("0123456789abcdef0123456789abcdef01234567")
        );

        let public_key = include_bytes!("../../../tests/fixtures/service-account.pub.pem");
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let data = jsonwebtoken::decode::<DecodedClaims>(
            &jwt,
            &DecodingKey::from_rsa_pem(public_key).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(
            data.claims.iss,
            "firebase-adminsdk@notify-test.iam.gserviceaccount.com"
        );
        assert_eq!(data.claims.sub, data.claims.iss);
        assert_eq!(data.claims.scope, FCM_SCOPE);
        assert_eq!(data.claims.aud, "https://oauth2.googleapis.com/token");
        assert_eq!(data.claims.exp - data.claims.iat, ASSERTION_LIFETIME_SECS);
    }
}
