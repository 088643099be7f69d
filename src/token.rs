use crate::api::{error_message, parse_token_response};
use crate::credentials::Credentials;
use crate::headers::add_token_headers;
use crate::{Result, SpotifyError};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Tokens are refreshed this long before the service says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// OAuth client-credentials flow against the accounts service.
///
/// The bearer token is cached and reused until shortly before it expires.
pub struct TokenManager {
    client: Arc<dyn HttpClient + Send + Sync>,
    accounts_url: String,
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(
        client: Arc<dyn HttpClient + Send + Sync>,
        accounts_url: String,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            accounts_url,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, requesting a new one when needed.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let (access_token, expires_in) = self.fetch_token().await?;
        let expires_at = Instant::now() + Duration::from_secs(expires_in);

        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(CachedToken {
                access_token: access_token.clone(),
                expires_at,
            });
        }

        Ok(access_token)
    }

    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock().ok()?;
        cached
            .as_ref()
            .filter(|token| Instant::now() + EXPIRY_MARGIN < token.expires_at)
            .map(|token| token.access_token.clone())
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// Returns the token and its lifetime in seconds.
    pub async fn fetch_token(&self) -> Result<(String, u64)> {
        let token_url = format!("{}/api/token", self.accounts_url);
        log::debug!("Requesting access token from {token_url}");

        let url = token_url
            .parse::<Url>()
            .map_err(|e| SpotifyError::Upstream(format!("invalid URL {token_url}: {e}")))?;
        let mut request = Request::new(Method::Post, url);
        add_token_headers(
            &mut request,
            &self.credentials.client_id,
            &self.credentials.client_secret,
        );
        request.set_body("grant_type=client_credentials");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| SpotifyError::Upstream(e.to_string()))?;

        let status: u16 = response.status().into();
        let body = response
            .body_string()
            .await
            .map_err(|e| SpotifyError::Upstream(e.to_string()))?;

        log::debug!("Token response status: {status}");

        match status {
            200..=299 => {}
            400 | 401 => {
                return Err(SpotifyError::Auth(
                    error_message(&body).unwrap_or_else(|| format!("status {status}")),
                ))
            }
            _ => {
                return Err(SpotifyError::Upstream(format!(
                    "token request failed with status {status}: {}",
                    error_message(&body).unwrap_or(body)
                )))
            }
        }

        let token = parse_token_response(&body)?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(SpotifyError::Parse(format!(
                "unexpected token type '{}'",
                token.token_type
            )));
        }

        Ok((token.access_token, token.expires_in))
    }
}
