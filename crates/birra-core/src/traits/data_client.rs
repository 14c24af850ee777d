//! Authenticated data access trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::{RequestDescriptor, Result};

/// The chokepoint through which session-protected calls flow.
///
/// Implementations attach the current bearer token and are responsible for
/// recovering from an expired access token. The returned value is the
/// decoded JSON body, whatever the HTTP status was.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Perform the call described by `request`.
    async fn call(&self, request: RequestDescriptor) -> Result<Value>;
}
