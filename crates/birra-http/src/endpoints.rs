//! Endpoint paths and wire bodies of the token and account endpoints.

use serde::{Deserialize, Serialize};

use birra_core::{AccessToken, RefreshToken};

/// Credential exchange.
pub const TOKEN: &str = "/auth/token/";

/// Refresh-token exchange.
pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";

/// Account registration.
pub const USER: &str = "/user/";

/// Password-reset mail request.
pub const USER_RESET_PASS: &str = "/user/reset_pass/";

/// Password-reset completion.
pub const USER_SET_NEW_PASS: &str = "/user/set_new_pass/";

/// Quotas of one payment.
pub const QUOTA_LIST_BY_PAYMENT: &str = "/quota/list_by_payment/";

/// Report generation trigger.
pub const REPORT: &str = "/report/report/";

/// Profile lookup by username.
pub fn user_by_username(username: &str) -> String {
    format!("{}{}/get_user_by_username/", USER, username)
}

/// Request body for the refresh-token exchange.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from the refresh-token exchange.
///
/// The refresh token is only present when the backend rotates it.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
    #[serde(default)]
    pub refresh: Option<RefreshToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_endpoint() {
        assert_eq!(user_by_username("alice"), "/user/alice/get_user_by_username/");
    }

    #[test]
    fn refresh_response_without_rotation() {
        let response: RefreshResponse = serde_json::from_str(r#"{"access":"A2"}"#).unwrap();
        assert_eq!(response.access.as_str(), "A2");
        assert!(response.refresh.is_none());
    }
}
