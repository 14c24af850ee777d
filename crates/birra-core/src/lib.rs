//! birra-core - Core types and traits for the Birracraft back-office client.
//!
//! Everything a consumer needs to describe a session and a request lives
//! here. Network access lives in `birra-http`; persisted session storage
//! in `birra-file`.

pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use store::MemorySessionStore;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{DataClient, SessionStore};
pub use types::{BaseUrl, Method, RawResponse, RequestDescriptor};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
