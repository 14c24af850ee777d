//! Credential and refresh-token exchanges.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use birra_core::error::AuthError;
use birra_core::{BaseUrl, Credentials, RawResponse, Result, SessionStore, TokenPair};

use crate::endpoints::{RefreshRequest, RefreshResponse, TOKEN, TOKEN_REFRESH};
use crate::http::HttpClient;

/// Result of a refresh-token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The backend issued a new pair; it is already stored.
    Refreshed(TokenPair),
    /// The refresh token was rejected or missing. The store has been
    /// cleared and the user must sign in again.
    SessionExpired,
}

/// Performs the two token-producing exchanges and keeps the store current.
#[derive(Clone)]
pub struct TokenClient {
    http: HttpClient,
    store: Arc<dyn SessionStore>,
}

impl TokenClient {
    /// Create a token client for the given backend and session store.
    pub fn new(base: BaseUrl, store: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self::from_parts(HttpClient::new(base)?, store))
    }

    pub(crate) fn from_parts(http: HttpClient, store: Arc<dyn SessionStore>) -> Self {
        Self { http, store }
    }

    /// Returns the backend this client talks to.
    pub fn base(&self) -> &BaseUrl {
        self.http.base()
    }

    /// Exchange credentials for a token pair.
    ///
    /// On `200 OK` the pair and the credentials are written to the store.
    /// Any other status leaves the store untouched; the caller decides what
    /// a non-200 answer means from the returned status.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, if a 200 answer does
    /// not carry a token pair, or if the store cannot be written.
    #[instrument(skip(self, credentials), fields(base = %self.http.base(), username = %credentials.username()))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<RawResponse> {
        let response = self.http.post_raw(TOKEN, credentials, false).await?;

        if response.is_ok() {
            let pair: TokenPair = response.json()?;
            self.store.set(&pair)?;
            self.store.set_credentials(credentials)?;
            info!("Signed in");
        } else {
            debug!(status = response.status, "Credential exchange rejected");
        }

        Ok(response)
    }

    /// Exchange credentials and fail unless a session was established.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any non-200 answer, in
    /// addition to the errors of [`TokenClient::authenticate`].
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        let response = self.authenticate(credentials).await?;
        if !response.is_ok() {
            return Err(AuthError::InvalidCredentials {
                status: response.status,
            }
            .into());
        }
        response.json()
    }

    /// Exchange the refresh token of `current` for a new pair.
    ///
    /// A rejected exchange ends the session: the store is cleared and
    /// [`RefreshOutcome::SessionExpired`] is returned. With no current pair
    /// there is nothing to exchange and the outcome is the same, without a
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport, decoding, or storage failures.
    #[instrument(skip(self, current), fields(base = %self.http.base()))]
    pub async fn refresh(&self, current: Option<&TokenPair>) -> Result<RefreshOutcome> {
        let Some(current) = current else {
            warn!("No session to refresh");
            self.store.clear()?;
            return Ok(RefreshOutcome::SessionExpired);
        };

        info!("Refreshing session");

        let request = RefreshRequest {
            refresh: current.refresh.as_str(),
        };
        let response = self.http.post_raw(TOKEN_REFRESH, &request, false).await?;

        if !response.is_ok() {
            warn!(status = response.status, "Session expired");
            self.store.clear()?;
            return Ok(RefreshOutcome::SessionExpired);
        }

        let refreshed: RefreshResponse = response.json()?;
        let pair = current.rotate(refreshed.access, refreshed.refresh);
        self.store.set(&pair)?;

        debug!("Session refreshed successfully");
        Ok(RefreshOutcome::Refreshed(pair))
    }

    /// End the session locally.
    pub fn logout(&self) -> Result<()> {
        info!("Signing out");
        self.store.clear()
    }
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient")
            .field("base", self.http.base())
            .field("store", &"[REDACTED]")
            .finish()
    }
}
