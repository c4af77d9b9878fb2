//! The authentication record persisted between runs.

/// Storage keys for the persisted session record.
///
/// The names are part of the on-disk format; changing one silently discards
/// every previously stored session.
pub mod keys {
    /// The bearer token itself.
    pub const AUTH_TOKEN: &str = "authToken";
    /// Token scheme used in the Authorization header ("Bearer", ...).
    pub const TOKEN_TYPE: &str = "tokenType";
    /// The signed-in principal (their email).
    pub const USER_EMAIL: &str = "userEmail";
    /// Server-declared issue time, ISO 8601.
    pub const LOGIN_TIME: &str = "loginTime";
    /// Token lifetime in seconds, stored as a decimal string.
    pub const TOKEN_EXPIRY: &str = "tokenExpiry";
    /// Email remembered across logouts for login convenience.
    pub const REMEMBERED_EMAIL: &str = "rememberedEmail";
}

/// The durable authentication record.
///
/// Written as a unit when a login succeeds and removed as a unit on logout
/// or detected expiry. The fields mirror what the login endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Opaque bearer token issued by the server.
    pub token: String,
    /// Token scheme, e.g. "Bearer".
    pub token_kind: String,
    /// Identity of the signed-in principal.
    pub principal_id: String,
    /// Issue timestamp as the server reported it (ISO 8601).
    pub issued_at: String,
    /// Declared validity window in seconds, counted from `issued_at`.
    pub lifetime_seconds: i64,
}
