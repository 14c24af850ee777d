//! Resolved runtime configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use birra_core::{BaseUrl, SessionStore};
use birra_file::FileSessionStore;
use birra_http::{ApiClient, PublicClient, TokenClient};

/// Where to talk to and where to keep the session.
#[derive(Debug, Clone)]
pub struct Config {
    pub base: BaseUrl,
    pub session_file: PathBuf,
}

impl Config {
    /// Resolve flags (already merged with their environment variables by
    /// clap) against the defaults.
    pub fn resolve(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<Self> {
        let base = match base_url {
            Some(url) => BaseUrl::new(url).context("Invalid base URL")?,
            None => BaseUrl::default(),
        };

        let session_file = match session_file {
            Some(path) => path,
            None => default_session_path()?,
        };

        tracing::debug!(base = %base, session_file = %session_file.display(), "Resolved configuration");

        Ok(Self { base, session_file })
    }

    pub fn store(&self) -> Arc<FileSessionStore> {
        Arc::new(FileSessionStore::open(&self.session_file))
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(self.base.clone(), self.dyn_store()).context("Failed to build API client")
    }

    pub fn token_client(&self) -> Result<TokenClient> {
        TokenClient::new(self.base.clone(), self.dyn_store())
            .context("Failed to build token client")
    }

    pub fn public_client(&self) -> Result<PublicClient> {
        PublicClient::new(self.base.clone()).context("Failed to build client")
    }

    fn dyn_store(&self) -> Arc<dyn SessionStore> {
        self.store()
    }
}

/// `session.json` in the platform data directory.
fn default_session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "birra").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config =
            Config::resolve(Some("https://erp.example.com/api/"), Some("/tmp/s.json".into()))
                .unwrap();
        assert_eq!(config.base.as_str(), "https://erp.example.com/api");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn default_base_url_is_local_backend() {
        let config = Config::resolve(None, Some("/tmp/s.json".into())).unwrap();
        assert_eq!(config.base.as_str(), "http://localhost:8680/api");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Config::resolve(Some("ftp://example.com"), Some("/tmp/s.json".into())).is_err());
    }
}
