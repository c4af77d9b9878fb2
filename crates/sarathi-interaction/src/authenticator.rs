//! Couples the login client with the session store.

use std::sync::Arc;

use sarathi_core::session::{SessionRecord, SessionStore};
use tracing::info;

use crate::auth_client::{AuthClient, LoginError, LoginRequest, LoginSuccess};

/// Sign-in and sign-out flows over [`AuthClient`] and [`SessionStore`].
pub struct Authenticator {
    client: AuthClient,
    session: Arc<SessionStore>,
}

impl Authenticator {
    /// Creates an authenticator for the given client and session store.
    pub fn new(client: AuthClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Verifies credentials and records the issued session.
    ///
    /// The store is only touched on success; a failed attempt leaves any
    /// existing session alone.
    ///
    /// # Errors
    ///
    /// Propagates the classified [`LoginError`] from the client.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginSuccess, LoginError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = self.client.login(&request).await?;

        let record = SessionRecord {
            token: body.auth_token.clone(),
            token_kind: body.token_type.clone(),
            principal_id: body.email.clone(),
            issued_at: body.timestamp.clone(),
            lifetime_seconds: body.expires_in,
        };
        self.session.record_login(&record);
        info!(principal = %body.email, expires_in = body.expires_in, "signed in");

        Ok(body)
    }

    /// Clears the stored session. The remembered email survives.
    pub fn sign_out(&self) {
        self.session.clear();
        info!("signed out");
    }

    /// The session store this authenticator writes to.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Remembers `email` for pre-filling the next login prompt.
    pub fn remember_email(&self, email: &str) {
        self.session.remember_email(email);
    }

    /// The email remembered from a previous login, if any.
    pub fn remembered_email(&self) -> Option<String> {
        self.session.remembered_email()
    }

    /// Stops remembering the login email.
    pub fn forget_email(&self) {
        self.session.forget_email();
    }
}
