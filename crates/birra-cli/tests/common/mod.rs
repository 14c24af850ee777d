use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;

use birra_core::{Credentials, SessionStore, TokenPair};
use birra_file::FileSessionStore;

/// An isolated session file for one test.
pub struct Sandbox {
    _dir: TempDir,
    pub session_file: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let session_file = dir.path().join("session.json");
        Self {
            _dir: dir,
            session_file,
        }
    }

    /// Sandbox with a stored session for alice.
    pub fn logged_in(access: &str, refresh: &str) -> Self {
        let sandbox = Self::new();
        let store = sandbox.store();
        store.set(&TokenPair::new(access, refresh)).unwrap();
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();
        sandbox
    }

    pub fn store(&self) -> FileSessionStore {
        FileSessionStore::open(&self.session_file)
    }
}

/// Run the CLI binary against `base_url` with the sandbox's session file.
pub async fn run_cli(args: &[&str], base_url: &str, session_file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_birra"))
        .args(args)
        .env("BIRRA_BASE_URL", base_url)
        .env("BIRRA_SESSION_FILE", session_file)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BIRRA_PASSWORD")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], base_url: &str, session_file: &Path) -> String {
    let output = run_cli(args, base_url, session_file).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
