//! Core request/response types.
//!
//! These types validate at construction time, so a client never sees a
//! malformed base URL or an unknown method.

mod base_url;
mod request;
mod response;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use request::{Method, RequestDescriptor};
pub use response::RawResponse;
