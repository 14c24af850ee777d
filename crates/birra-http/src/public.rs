//! Unauthenticated data client.

use serde::Serialize;
use tracing::{debug, instrument};

use birra_core::models::{NewPassword, NewUser, PasswordResetRequest};
use birra_core::{BaseUrl, RawResponse, Result};

use crate::endpoints::{USER, USER_RESET_PASS, USER_SET_NEW_PASS};
use crate::http::HttpClient;

/// Client for the calls that establish or recover a session.
///
/// No auth header, no retry, no session store. Callers branch on the
/// returned status.
#[derive(Debug, Clone)]
pub struct PublicClient {
    http: HttpClient,
}

impl PublicClient {
    pub fn new(base: BaseUrl) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }

    /// POST `payload` to `endpoint`.
    pub async fn call<B>(&self, endpoint: &str, payload: &B) -> Result<RawResponse>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.http.post_raw(endpoint, payload, true).await?;
        debug!(endpoint, status = response.status, "Unauthenticated call finished");
        Ok(response)
    }

    /// Register a new account. `201 Created` means an activation mail went out.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn register(&self, user: &NewUser) -> Result<RawResponse> {
        self.call(USER, user).await
    }

    /// Ask for a password-reset mail. `200 OK` means it was sent.
    #[instrument(skip(self))]
    pub async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<RawResponse> {
        self.call(USER_RESET_PASS, request).await
    }

    /// Set a new password after following the reset link.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn set_new_password(&self, request: &NewPassword) -> Result<RawResponse> {
        self.call(USER_SET_NEW_PASS, request).await
    }
}
