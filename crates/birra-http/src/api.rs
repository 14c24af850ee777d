//! Authenticated data client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use birra_core::error::AuthError;
use birra_core::{BaseUrl, DataClient, RequestDescriptor, Result, SessionStore, TokenPair};

use crate::http::HttpClient;
use crate::token::{RefreshOutcome, TokenClient};

/// The chokepoint for session-protected calls.
///
/// Every call carries the stored access token. When the backend answers
/// `401 Unauthorized` the client refreshes the pair once and resends the
/// request once; whatever the second answer is, it is returned. A rejected
/// refresh surfaces as [`AuthError::SessionExpired`] with the store cleared.
///
/// Clients are cheap to clone and share one refresh lock, so concurrent
/// calls that all hit a 401 trigger a single refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiInner>,
}

struct ApiInner {
    http: HttpClient,
    tokens: TokenClient,
    store: Arc<dyn SessionStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Create a data client for the given backend and session store.
    pub fn new(base: BaseUrl, store: Arc<dyn SessionStore>) -> Result<Self> {
        let http = HttpClient::new(base)?;
        let tokens = TokenClient::from_parts(http.clone(), store.clone());

        Ok(Self {
            inner: Arc::new(ApiInner {
                http,
                tokens,
                store,
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// Returns the backend this client talks to.
    pub fn base(&self) -> &BaseUrl {
        self.inner.http.base()
    }

    /// Returns the token client sharing this client's store.
    pub fn tokens(&self) -> &TokenClient {
        &self.inner.tokens
    }

    /// Perform `request` with the pair currently in the store.
    pub async fn call(&self, request: RequestDescriptor) -> Result<Value> {
        let stored = self.inner.store.get()?;
        self.execute(request, stored.clone(), stored).await
    }

    /// Perform `request` with an explicitly supplied pair.
    ///
    /// The pair is what the first attempt sends. On a 401 it is the pair
    /// that gets refreshed, and the refreshed pair is written to the store.
    pub async fn call_with_pair(
        &self,
        request: RequestDescriptor,
        pair: Option<TokenPair>,
    ) -> Result<Value> {
        let observed = self.inner.store.get()?;
        self.execute(request, pair, observed).await
    }

    /// Send once; on 401 refresh and send once more.
    ///
    /// `observed` is the stored pair as read before the first send.
    #[instrument(skip(self, request, pair, observed), fields(base = %self.inner.http.base(), method = %request.method, endpoint = %request.endpoint))]
    async fn execute(
        &self,
        request: RequestDescriptor,
        pair: Option<TokenPair>,
        observed: Option<TokenPair>,
    ) -> Result<Value> {
        let token = pair.as_ref().map(|p| p.access.as_str());
        let response = self.inner.http.send_authed(&request, token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return HttpClient::decode_json(response).await;
        }

        debug!("Access token rejected");
        let fresh = self
            .refreshed_pair(pair.as_ref(), observed.as_ref())
            .await?;

        debug!("Retrying with refreshed token");
        let response = self
            .inner
            .http
            .send_authed(&request, Some(fresh.access.as_str()))
            .await?;
        HttpClient::decode_json(response).await
    }

    /// Obtain a pair to replace `rejected`, refreshing at most once across
    /// all clones of this client.
    ///
    /// When the store no longer holds `observed`, another call refreshed
    /// while this one was in flight and its pair is reused.
    async fn refreshed_pair(
        &self,
        rejected: Option<&TokenPair>,
        observed: Option<&TokenPair>,
    ) -> Result<TokenPair> {
        let _guard = self.inner.refresh_lock.lock().await;

        let stored = self.inner.store.get()?;
        if let Some(stored) = stored.as_ref()
            && observed != Some(stored)
        {
            debug!("Session already refreshed by another call");
            return Ok(stored.clone());
        }

        match self.inner.tokens.refresh(rejected.or(stored.as_ref())).await? {
            RefreshOutcome::Refreshed(pair) => Ok(pair),
            RefreshOutcome::SessionExpired => Err(AuthError::SessionExpired.into()),
        }
    }

    /// GET `endpoint`.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.call(RequestDescriptor::get(endpoint)).await
    }

    /// POST a JSON body to `endpoint`.
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.call(RequestDescriptor::post(endpoint).with_body(body))
            .await
    }

    /// PUT a JSON body to `endpoint`.
    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.call(RequestDescriptor::put(endpoint).with_body(body))
            .await
    }

    /// PATCH `endpoint` with a partial JSON body.
    pub async fn patch(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.call(RequestDescriptor::patch(endpoint).with_body(body))
            .await
    }

    /// DELETE `endpoint`.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.call(RequestDescriptor::delete(endpoint)).await
    }
}

#[async_trait]
impl DataClient for ApiClient {
    async fn call(&self, request: RequestDescriptor) -> Result<Value> {
        ApiClient::call(self, request).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.inner.http.base())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
