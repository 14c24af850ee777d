//! Core traits for session storage and data access.

mod data_client;
mod session_store;

pub use data_client::DataClient;
pub use session_store::{AUTH_TOKENS_KEY, AUTH_USER_KEY, SessionStore};
