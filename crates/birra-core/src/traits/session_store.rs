//! Session store trait.

use crate::{Credentials, Result, TokenPair};

/// Storage key holding the JSON-encoded [`TokenPair`].
pub const AUTH_TOKENS_KEY: &str = "authTokens";

/// Storage key holding the JSON-encoded [`Credentials`].
pub const AUTH_USER_KEY: &str = "authUser";

/// Process-wide holder of the current session.
///
/// A session exists while a token pair is stored. Stored credentials alone
/// do not make the user authenticated. There is no local expiry tracking:
/// the backend's answer to an authenticated call is the only validity check.
///
/// Implementations are shared between tasks, so every method takes `&self`
/// and does its own locking.
pub trait SessionStore: Send + Sync {
    /// Returns the current token pair, if any.
    fn get(&self) -> Result<Option<TokenPair>>;

    /// Replace the current token pair.
    fn set(&self, pair: &TokenPair) -> Result<()>;

    /// Returns the credentials captured at sign-in, if any.
    fn credentials(&self) -> Result<Option<Credentials>>;

    /// Replace the stored credentials.
    fn set_credentials(&self, credentials: &Credentials) -> Result<()>;

    /// Remove both the token pair and the credentials.
    ///
    /// Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;

    /// Returns true when a token pair is stored.
    fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get()?.is_some())
    }
}
