//! Explicit session context passed to every remote call.
//!
//! A context is created when the agent signs in, lives in the host's cookie
//! session and is cleared on sign-out. Nothing reads the token from global
//! state.

use serde::{Deserialize, Serialize};

/// Session storage key holding the bearer token.
pub const SESSION_TOKEN_KEY: &str = "token";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    token: Option<String>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Blank tokens are treated as no token at all.
    pub fn signed_in(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }
}
