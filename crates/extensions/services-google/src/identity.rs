//! OAuth identity: refresh-token sign-in and the userinfo endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use highlighter_protocols::{AccessToken, AdapterError, AuthError, IdentityProvider, UserInfo};

use crate::http::{error_message, read_json, transport_error};

/// Seconds shaved off `expires_in` so a token is never used right at expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Identity adapter settings.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub token_url: String,
    pub userinfo_url: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
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
    token: AccessToken,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at.is_none_or(|at| Instant::now() < at)
    }
}

/// Google OAuth identity.
///
/// Interactive sign-in exchanges the configured refresh token for an access
/// token. Silent lookups only ever return an unexpired token from a previous
/// sign-in and never touch the network.
pub struct GoogleIdentity {
    client: Client,
    settings: IdentitySettings,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleIdentity {
    pub fn new(settings: IdentitySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
            cached: Mutex::new(None),
        }
    }

    fn silent_token(&self) -> Option<AccessToken> {
        let mut cached = self.cached.lock();
        match cached.as_ref() {
            Some(entry) if entry.is_fresh() => Some(entry.token.clone()),
            Some(_) => {
                debug!("Cached access token expired");
                *cached = None;
                None
            }
            None => None,
        }
    }

    async fn exchange_refresh_token(&self) -> Result<AccessToken, AuthError> {
        let (Some(client_id), Some(refresh_token)) = (
            self.settings.client_id.as_deref(),
            self.settings.refresh_token.as_deref(),
        ) else {
            return Err(AuthError::Denied(
                "no OAuth client or refresh token is configured".to_string(),
            ));
        };

        // The serializer is not Send; finish it before the request is awaited.
        let body = {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.append_pair("grant_type", "refresh_token")
                .append_pair("client_id", client_id)
                .append_pair("refresh_token", refresh_token);
            if let Some(secret) = self.settings.client_secret.as_deref() {
                form.append_pair("client_secret", secret);
            }
            form.finish()
        };

        let response = self
            .client
            .post(&self.settings.token_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() == 400 || status.as_u16() == 401 {
            let body = response.text().await.map_err(transport_error)?;
            let message = error_message(&body);
            if message == "invalid_grant" || message == "invalid_client" {
                return Err(AuthError::Denied(format!(
                    "the sign-in grant was rejected ({})",
                    message
                )));
            }
            return Err(AdapterError::from_status(status.as_u16(), message).into());
        }

        let token: TokenResponse = read_json(response).await?;
        let expires_at = token
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN));
        let access = AccessToken::new(token.access_token);
        *self.cached.lock() = Some(CachedToken {
            token: access.clone(),
            expires_at,
        });
        info!("Obtained access token");
        Ok(access)
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentity {
    fn name(&self) -> &str {
        "google"
    }

    async fn get_token(&self, interactive: bool) -> Result<AccessToken, AuthError> {
        if let Some(token) = self.silent_token() {
            return Ok(token);
        }
        if !interactive {
            return Err(AuthError::NotAuthenticated);
        }
        self.exchange_refresh_token().await
    }

    async fn get_user_info(&self, token: &AccessToken) -> Result<UserInfo, AuthError> {
        let response = self
            .client
            .get(&self.settings.userinfo_url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(transport_error)?;
        Ok(read_json(response).await?)
    }

    async fn invalidate(&self, token: &AccessToken) -> Result<(), AuthError> {
        let mut cached = self.cached.lock();
        if cached.as_ref().is_some_and(|c| &c.token == token) {
            *cached = None;
            debug!("Dropped cached access token");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
