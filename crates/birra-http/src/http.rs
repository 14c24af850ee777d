//! HTTP transport shared by the token, data, and public clients.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use birra_core::error::{DecodeError, InvalidInputError, TransportError};
use birra_core::{BaseUrl, Error, Method, RawResponse, RequestDescriptor, Result};

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// JSON-over-HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpClient {
    /// Create a new client for the given backend.
    pub fn new(base: BaseUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("birra/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, base })
    }

    /// Returns the backend this client talks to.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Send a described request with bearer auth.
    ///
    /// `token` is `None` when there is no session; the header is still sent
    /// with an empty bearer value and the backend is expected to reject it.
    #[instrument(skip(self, request, token), fields(base = %self.base, method = %request.method, endpoint = %request.endpoint))]
    pub async fn send_authed(
        &self,
        request: &RequestDescriptor,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = self.base.endpoint_url(&request.endpoint);
        debug!(%url, "Authenticated request");

        let mut builder = self
            .client
            .request(reqwest_method(request.method), &url)
            .headers(Self::auth_headers(token.unwrap_or_default())?);

        if let Some(body) = &request.body {
            trace!(?body, "request body");
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        trace!(status = %response.status(), "response");
        Ok(response)
    }

    /// POST a JSON body without auth and keep the status alongside the body.
    ///
    /// `accept` adds `Accept: application/json`; the credential exchange
    /// sends only the content type.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post_raw<B>(&self, endpoint: &str, body: &B, accept: bool) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base.endpoint_url(endpoint);
        debug!(%url, "Unauthenticated POST");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if accept {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport_error)?;
        trace!(status, len = bytes.len(), "response");

        Ok(RawResponse::from_bytes(status, &bytes))
    }

    /// Decode a response body as JSON, whatever its status.
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn decode_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| DecodeError::new(format!("HTTP {}", status), e.to_string()).into())
    }

    /// Create the JSON and authorization headers of a protected call.
    fn auth_headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            InvalidInputError::AccessToken {
                reason: e.to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = BaseUrl::new("http://localhost:8680/api").unwrap();
        let client = HttpClient::new(base.clone()).unwrap();
        assert_eq!(client.base(), &base);
    }

    #[test]
    fn auth_headers_carry_bearer() {
        let headers = HttpClient::auth_headers("A1").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer A1");
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn auth_headers_without_session() {
        let headers = HttpClient::auth_headers("").unwrap();
        assert!(headers[AUTHORIZATION].to_str().unwrap().starts_with("Bearer"));
    }

    #[test]
    fn auth_headers_reject_control_characters() {
        let err = HttpClient::auth_headers("A1\nInjected: yes").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::AccessToken { .. })
        ));
        assert!(err.to_string().contains("access token"));
    }
}
