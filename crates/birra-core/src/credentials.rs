//! Sign-in credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Username and password used for the credential exchange.
///
/// The same value is kept in the session store after a successful sign-in,
/// serialized exactly like the exchange request body. It identifies the
/// session owner and is never re-sent automatically.
///
/// # Security
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use birra_core::Credentials;
///
/// let creds = Credentials::new("alice", "secret");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when building the credential exchange request.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
