//! Bearer-token credentials for the data-modeling service.

use super::error::{DataModelingError, DmResult};
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are refreshed this long before the issuer says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A pre-issued bearer token
    Token(String),
    /// OAuth 2.0 client-credentials grant
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
        scopes: Vec<String>,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
            Credentials::ClientCredentials {
                token_url,
                client_id,
                scopes,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("client_secret", &"***")
                .field("scopes", scopes)
                .finish(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: String,
    expires_at: Option<Instant>,
}

/// Hands out bearer tokens, fetching and caching them when needed.
pub struct TokenProvider {
    credentials: Credentials,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            credentials,
            http,
            cached: Mutex::new(None),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn bearer_token(&self) -> DmResult<String> {
        let (token_url, client_id, client_secret, scopes) = match &self.credentials {
            Credentials::Token(token) => return Ok(token.clone()),
            Credentials::ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scopes,
            } => (token_url, client_id, client_secret, scopes),
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at.is_none_or(|at| Instant::now() < at) {
                return Ok(token.token.clone());
            }
        }

        debug!("Fetching access token from {}", token_url);
        let scope = scopes.join(" ");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("scope", scope.as_str()),
        ];
        let response = self.http.post(token_url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataModelingError::Auth(format!(
                "token request failed with status {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = token
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN));
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            token: token.access_token,
            expires_at,
        });
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::ClientCredentials {
            token_url: "https://login.example.com/token".into(),
            client_id: "my-client".into(),
            client_secret: "hunter2".into(),
            scopes: vec!["https://westeurope-1.cognitedata.com/.default".into()],
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("my-client"));
        assert!(!debug.contains("hunter2"));

        let debug = format!("{:?}", Credentials::Token("secret-token".into()));
        assert!(!debug.contains("secret-token"));
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider = TokenProvider::new(Credentials::Token("abc".into()), reqwest::Client::new());
        assert_eq!(provider.bearer_token().await.unwrap(), "abc");
    }
}
