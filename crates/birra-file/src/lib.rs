//! birra-file - Persistent session storage for the birra clients.
//!
//! [`FileSessionStore`] keeps the same two entries as the in-memory store
//! in a single JSON document, so a session survives between command-line
//! invocations.

mod store;

pub use store::FileSessionStore;
