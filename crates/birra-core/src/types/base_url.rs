//! Backend base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Default backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8680/api";

/// A validated backend base URL, prefixed to every endpoint.
///
/// # Example
///
/// ```
/// use birra_core::BaseUrl;
///
/// let base = BaseUrl::new("http://localhost:8680/api/").unwrap();
/// assert_eq!(base.endpoint_url("/auth/token/"),
///            "http://localhost:8680/api/auth/token/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, is not absolute, or
    /// does not use `http`/`https`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Endpoints always carry their own leading slash.
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint such as `/customer/5/`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let base = BaseUrl::default();
        assert_eq!(base.host(), Some("localhost"));
        assert_eq!(
            base.endpoint_url("/auth/token/"),
            "http://localhost:8680/api/auth/token/"
        );
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let base = BaseUrl::new("https://admin.example.com/api/").unwrap();
        assert_eq!(
            base.endpoint_url("/container/5/"),
            "https://admin.example.com/api/container/5/"
        );
    }

    #[test]
    fn root_base_joins_endpoints() {
        let base = BaseUrl::new("http://127.0.0.1:9000").unwrap();
        assert_eq!(base.endpoint_url("/customer/"), "http://127.0.0.1:9000/customer/");
        assert_eq!(base.endpoint_url("customer/"), "http://127.0.0.1:9000/customer/");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(BaseUrl::new("ftp://example.com").is_err());
        assert!(BaseUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(BaseUrl::new("/api").is_err());
    }
}
