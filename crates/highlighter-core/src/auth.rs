//! Auth session state machine.
//!
//! ```text
//! Unauthenticated --authenticate--> TokenCached --invalidate--> TokenInvalidated
//!        ^                                                          |
//!        +------------------------ authenticate --------------------+
//! ```
//!
//! Only [`AuthSession::authenticate`] and [`AuthSession::invalidate`] change
//! state. Neither is ever triggered by a failed API call on its own.
//!
//! The identity provider owns the token and its expiry. The session state
//! records the last explicit transition; auth checks and token lookups always ask
//! the provider, so an expired token is never reported as signed in.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use highlighter_protocols::{AccessToken, AuthError, IdentityProvider, UserInfo};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    TokenCached,
    TokenInvalidated,
}

/// Terminal outcome of an interactive sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn,
    /// The user cancelled or refused. Not an error.
    Denied(String),
}

enum Slot {
    Unauthenticated,
    Cached(AccessToken),
    Invalidated,
}

/// Session over an identity provider. Shared by all invocations.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    slot: RwLock<Slot>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            slot: RwLock::new(Slot::Unauthenticated),
        }
    }

    pub fn state(&self) -> AuthState {
        match *self.slot.read() {
            Slot::Unauthenticated => AuthState::Unauthenticated,
            Slot::Cached(_) => AuthState::TokenCached,
            Slot::Invalidated => AuthState::TokenInvalidated,
        }
    }

    fn last_granted(&self) -> Option<AccessToken> {
        match &*self.slot.read() {
            Slot::Cached(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Read-only check. Never prompts and never changes state.
    pub async fn check_auth(&self) -> Result<bool, AuthError> {
        match self.provider.get_token(false).await {
            Ok(_) => Ok(true),
            Err(AuthError::NotAuthenticated) | Err(AuthError::Denied(_)) => {
                if self.state() == AuthState::TokenCached {
                    debug!("Provider no longer holds a valid token");
                }
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// A token usable for API calls, without prompting.
    pub async fn token(&self) -> Result<AccessToken, AuthError> {
        self.provider.get_token(false).await
    }

    /// Interactive sign-in. Caches the token on success.
    pub async fn authenticate(&self) -> Result<SignInOutcome, AuthError> {
        debug!("Starting interactive sign-in via {}", self.provider.name());
        match self.provider.get_token(true).await {
            Ok(token) => {
                *self.slot.write() = Slot::Cached(token);
                info!("Signed in");
                Ok(SignInOutcome::SignedIn)
            }
            Err(AuthError::Denied(reason)) => {
                info!("Sign-in denied: {}", reason);
                Ok(SignInOutcome::Denied(reason))
            }
            Err(AuthError::NotAuthenticated) => {
                Ok(SignInOutcome::Denied("no token was granted".to_string()))
            }
            Err(e) => {
                warn!("Sign-in failed: {}", e);
                Err(e)
            }
        }
    }

    /// Forget the cached token, both here and at the provider.
    pub async fn invalidate(&self) -> Result<(), AuthError> {
        let token = match self.provider.get_token(false).await {
            Ok(token) => Some(token),
            Err(_) => self.last_granted(),
        };
        if let Some(token) = token {
            self.provider.invalidate(&token).await?;
        }
        *self.slot.write() = Slot::Invalidated;
        info!("Signed out");
        Ok(())
    }

    /// Profile of the signed-in user.
    pub async fn user_info(&self) -> Result<UserInfo, AuthError> {
        let token = self.token().await?;
        self.provider.get_user_info(&token).await
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
