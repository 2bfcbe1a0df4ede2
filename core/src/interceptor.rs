//! Bearer-token injection and global 401 handling.

use std::sync::Arc;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, AUTHORIZATION};
use crate::notify::Navigator;
use crate::session::SessionStore;

/// Routes under this prefix are served without authentication.
pub const PUBLIC_PREFIX: &str = "/public/";

#[derive(Clone)]
pub struct AuthInterceptor {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>, login_path: impl Into<String>) -> Self {
        Self {
            session,
            navigator,
            login_path: login_path.into(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Attach `authorization: Bearer <token>` when a token is stored.
    ///
    /// `path` must still be relative to the base URL so the public prefix
    /// check sees `/public/...`.
    pub fn before_send(&self, request: &mut HttpRequest) {
        if request.path.starts_with(PUBLIC_PREFIX) {
            return;
        }
        if let Some(token) = self.session.token() {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
    }

    /// Clear the session and send the user to the login route on 401.
    pub fn after_receive(&self, response: &HttpResponse) -> Result<(), ApiError> {
        if response.status != 401 {
            return Ok(());
        }
        tracing::warn!(login_path = %self.login_path, "session rejected by server, logging out");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear session token");
        }
        self.navigator.navigate(&self.login_path);
        Err(ApiError::Unauthorized)
    }
}
