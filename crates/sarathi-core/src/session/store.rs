//! Session lifecycle over a durable key-value store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::kv::KeyValueStore;
use super::record::{SessionRecord, keys};

/// Token scheme assumed when none was recorded.
pub const DEFAULT_TOKEN_KIND: &str = "Bearer";

/// Reads and maintains the persisted authentication record.
///
/// The store is deliberately forgiving: a record with missing or malformed
/// expiry metadata still counts as authenticated, because the server remains
/// the final authority on every request. Only a token that is provably past
/// its declared lifetime is rejected, and rejecting it also purges the
/// record so later reads observe a signed-out state.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a session store over the given key-value backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persists a freshly issued session record as a unit.
    pub fn record_login(&self, record: &SessionRecord) {
        self.store.set(keys::AUTH_TOKEN, &record.token);
        self.store.set(keys::USER_EMAIL, &record.principal_id);
        self.store.set(keys::LOGIN_TIME, &record.issued_at);
        self.store
            .set(keys::TOKEN_EXPIRY, &record.lifetime_seconds.to_string());
        self.store.set(keys::TOKEN_TYPE, &record.token_kind);
        info!(principal = %record.principal_id, "session recorded");
    }

    /// Whether a usable session exists right now.
    ///
    /// A session that turns out to be expired is purged as a side effect,
    /// so the first failed check also signs the principal out.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Validity check against an explicit clock, for tests and callers that
    /// already hold a timestamp.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        if self.token().is_none() {
            return false;
        }

        // Expiry metadata is advisory. If any of it is absent or does not
        // parse, the token stands and the server gets the final word.
        let (Some(issued_raw), Some(lifetime_raw)) = (
            self.store.get(keys::LOGIN_TIME),
            self.store.get(keys::TOKEN_EXPIRY),
        ) else {
            return true;
        };

        let Ok(lifetime_seconds) = lifetime_raw.trim().parse::<i64>() else {
            warn!(value = %lifetime_raw, "stored token lifetime is not a number, keeping session");
            return true;
        };

        let Ok(issued_at) = DateTime::parse_from_rfc3339(&issued_raw) else {
            warn!(value = %issued_raw, "stored login time does not parse, keeping session");
            return true;
        };

        let elapsed = now
            .signed_duration_since(issued_at.with_timezone(&Utc))
            .num_seconds();
        if elapsed > lifetime_seconds {
            info!(elapsed, lifetime_seconds, "session expired, purging record");
            self.clear();
            return false;
        }

        debug!(elapsed, lifetime_seconds, "session still valid");
        true
    }

    /// The value for an HTTP `Authorization` header, or an empty string
    /// when no token is stored.
    pub fn authorization_header(&self) -> String {
        match self.token() {
            Some(token) => {
                let kind = self
                    .token_kind()
                    .unwrap_or_else(|| DEFAULT_TOKEN_KIND.to_string());
                format!("{kind} {token}")
            }
            None => String::new(),
        }
    }

    /// Removes the session record. The remembered login email survives.
    ///
    /// Clearing an empty store is a no-op, so this is safe to call from
    /// multiple teardown paths.
    pub fn clear(&self) {
        self.store.remove(keys::AUTH_TOKEN);
        self.store.remove(keys::USER_EMAIL);
        self.store.remove(keys::LOGIN_TIME);
        self.store.remove(keys::TOKEN_EXPIRY);
        self.store.remove(keys::TOKEN_TYPE);
    }

    /// The stored bearer token, if any. An empty string counts as absent.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(keys::AUTH_TOKEN)
            .filter(|token| !token.is_empty())
    }

    /// The stored token scheme, if any.
    pub fn token_kind(&self) -> Option<String> {
        self.store
            .get(keys::TOKEN_TYPE)
            .filter(|kind| !kind.is_empty())
    }

    /// The signed-in principal, if a session exists.
    pub fn principal(&self) -> Option<String> {
        self.store
            .get(keys::USER_EMAIL)
            .filter(|email| !email.is_empty())
    }

    /// Remembers an email for pre-filling the next login.
    pub fn remember_email(&self, email: &str) {
        self.store.set(keys::REMEMBERED_EMAIL, email);
    }

    /// The email remembered from a previous login, if any.
    pub fn remembered_email(&self) -> Option<String> {
        self.store
            .get(keys::REMEMBERED_EMAIL)
            .filter(|email| !email.is_empty())
    }

    /// Drops the remembered email.
    pub fn forget_email(&self) {
        self.store.remove(keys::REMEMBERED_EMAIL);
    }
}
