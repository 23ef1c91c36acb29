//! CheckAuth and Authenticate handlers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use highlighter_protocols::{ErrorCode, Reply, ReplyPayload, Request, RequestKind};

use crate::auth::{AuthSession, SignInOutcome};
use crate::context::InvocationContext;
use crate::handler::{Handler, HandlerResult};

pub struct CheckAuthHandler {
    auth: Arc<AuthSession>,
}

impl CheckAuthHandler {
    pub fn new(auth: Arc<AuthSession>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Handler for CheckAuthHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::CheckAuth
    }

    async fn handle(&self, _request: Request, _ctx: &InvocationContext) -> HandlerResult {
        let authenticated = self.auth.check_auth().await?;
        Ok(Some(Reply::success(ReplyPayload::AuthStatus { authenticated })))
    }
}

pub struct AuthenticateHandler {
    auth: Arc<AuthSession>,
}

impl AuthenticateHandler {
    pub fn new(auth: Arc<AuthSession>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Handler for AuthenticateHandler {
    fn kind(&self) -> RequestKind {
        RequestKind::Authenticate
    }

    async fn handle(&self, _request: Request, _ctx: &InvocationContext) -> HandlerResult {
        match self.auth.authenticate().await? {
            SignInOutcome::SignedIn => {
                // Profile is cosmetic; a failed lookup does not undo the sign-in.
                let user = match self.auth.user_info().await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        warn!("Signed in but could not fetch user info: {}", e);
                        None
                    }
                };
                Ok(Some(Reply::success(ReplyPayload::SignIn {
                    success: true,
                    user,
                })))
            }
            SignInOutcome::Denied(reason) => Ok(Some(
                Reply::failure(ErrorCode::AuthDenied, format!("Sign-in was denied: {}", reason))
                    .with_payload(ReplyPayload::SignIn {
                        success: false,
                        user: None,
                    }),
            )),
        }
    }
}
