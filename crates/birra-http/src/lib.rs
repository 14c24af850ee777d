//! birra-http - HTTP clients for the Birracraft back-office API.
//!
//! [`TokenClient`] obtains and refreshes bearer tokens, [`ApiClient`] runs
//! session-protected calls with one refresh-and-retry on 401, and
//! [`PublicClient`] runs the calls that need no session. [`Resources`]
//! layers typed CRUD helpers over any [`DataClient`](birra_core::DataClient).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use birra_core::{BaseUrl, Credentials, MemorySessionStore};
//! use birra_core::models::Customer;
//! use birra_http::{ApiClient, Resources, TokenClient};
//!
//! # async fn example() -> Result<(), birra_core::Error> {
//! let base = BaseUrl::default();
//! let store = Arc::new(MemorySessionStore::new());
//!
//! let tokens = TokenClient::new(base.clone(), store.clone())?;
//! tokens.login(&Credentials::new("alice", "secret")).await?;
//!
//! let api = ApiClient::new(base, store)?;
//! let customers: Vec<Customer> = api.list().await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod endpoints;
mod http;
mod public;
mod resources;
mod token;

pub use api::ApiClient;
pub use endpoints::{TOKEN, TOKEN_REFRESH};
pub use public::PublicClient;
pub use resources::Resources;
pub use token::{RefreshOutcome, TokenClient};
