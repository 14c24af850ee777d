//! JSON-file session store.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use birra_core::error::StorageError;
use birra_core::traits::{AUTH_TOKENS_KEY, AUTH_USER_KEY};
use birra_core::{Credentials, Result, SessionStore, TokenPair};

/// Key used when the document itself cannot be parsed.
const DOCUMENT: &str = "<document>";

type Document = BTreeMap<String, String>;

/// A session store backed by one JSON file.
///
/// The file holds `{"authTokens": "<json>", "authUser": "<json>"}`. Every
/// read-modify-write takes an exclusive lock on a sibling `<name>.lock` file and
/// replaces the document with a rename, so concurrent processes never see
/// a half-written session. On unix the document is readable by its owner
/// only.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Use the document at `path`. Nothing is created until the first write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// The document path with `suffix` appended to the full file name.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Run `f` with the lock file held exclusively.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(StorageError::from)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(StorageError::from)?;
        lock_file.lock_exclusive().map_err(StorageError::from)?;

        let result = f();

        lock_file.unlock().map_err(StorageError::from)?;
        result
    }

    fn load(&self) -> Result<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(StorageError::from(e).into()),
        };
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt {
                key: DOCUMENT.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save(&self, document: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| StorageError::Corrupt {
            key: DOCUMENT.to_string(),
            reason: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(StorageError::from)?;
        restrict_permissions(&file)?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(StorageError::from)?;
        drop(file);
        fs::rename(&temp_path, &self.path).map_err(StorageError::from)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let document = self.locked(|| self.load())?;
        let Some(raw) = document.get(key) else {
            return Ok(None);
        };
        let value = serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.locked(|| {
            let mut document = self.load()?;
            document.insert(key.to_string(), raw);
            self.save(&document)
        })
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| StorageError::from(e).into())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<TokenPair>> {
        self.read(AUTH_TOKENS_KEY)
    }

    fn set(&self, pair: &TokenPair) -> Result<()> {
        self.write(AUTH_TOKENS_KEY, pair)
    }

    fn credentials(&self) -> Result<Option<Credentials>> {
        self.read(AUTH_USER_KEY)
    }

    fn set_credentials(&self, credentials: &Credentials) -> Result<()> {
        self.write(AUTH_USER_KEY, credentials)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        self.locked(|| match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e).into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birra_core::Error;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::open(dir.path().join("session.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.get().unwrap().is_none());
        assert!(store.credentials().unwrap().is_none());
        assert!(!store.is_authenticated().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn session_survives_reopening() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(&TokenPair::new("A1", "R1")).unwrap();
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get().unwrap(), Some(TokenPair::new("A1", "R1")));
        assert_eq!(
            reopened.credentials().unwrap(),
            Some(Credentials::new("alice", "secret"))
        );
    }

    #[test]
    fn entries_are_json_strings_under_fixed_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(&TokenPair::new("A1", "R1")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let document: serde_json::Value = serde_json::from_str(&content).unwrap();
        let tokens = document[AUTH_TOKENS_KEY].as_str().unwrap();
        let tokens: serde_json::Value = serde_json::from_str(tokens).unwrap();

        assert_eq!(tokens["access"], "A1");
        assert_eq!(tokens["refresh"], "R1");
        assert!(document.get(AUTH_USER_KEY).is_none());
    }

    #[test]
    fn set_replaces_only_its_own_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();
        store.set(&TokenPair::new("A1", "R1")).unwrap();
        store.set(&TokenPair::new("A2", "R2")).unwrap();

        assert_eq!(store.get().unwrap(), Some(TokenPair::new("A2", "R2")));
        assert!(store.credentials().unwrap().is_some());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(&TokenPair::new("A1", "R1")).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn helper_files_extend_the_document_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.lock_path(), dir.path().join("session.json.lock"));
        assert_eq!(store.temp_path(), dir.path().join("session.json.tmp"));
    }

    #[test]
    fn documents_named_like_helper_files_keep_their_contents() {
        let dir = TempDir::new().unwrap();

        for name in ["session.lock", "session.tmp"] {
            let store = FileSessionStore::open(dir.path().join(name));
            store.set(&TokenPair::new("A1", "R1")).unwrap();
            store
                .set_credentials(&Credentials::new("alice", "secret"))
                .unwrap();

            assert_ne!(store.lock_path(), store.path());
            assert_ne!(store.temp_path(), store.path());
            assert_eq!(store.get().unwrap(), Some(TokenPair::new("A1", "R1")));
            assert!(store.credentials().unwrap().is_some());
        }
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::open(dir.path().join("nested/deeper/session.json"));

        store.set(&TokenPair::new("A1", "R1")).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();

        let err = store.get().unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[test]
    fn corrupt_entry_names_its_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"authTokens": "{\"access\": 1}"}"#).unwrap();

        match store.get().unwrap_err() {
            Error::Storage(StorageError::Corrupt { key, .. }) => assert_eq!(key, AUTH_TOKENS_KEY),
            other => panic!("expected corrupt entry, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(&TokenPair::new("A1", "R1")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn concurrent_writers_keep_document_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = FileSessionStore::open(&path);
                std::thread::spawn(move || {
                    store
                        .set(&TokenPair::new(format!("A{i}"), format!("R{i}")))
                        .unwrap();
                    store
                        .set_credentials(&Credentials::new(format!("user{i}"), "pw"))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = FileSessionStore::open(&path);
        assert!(store.get().unwrap().is_some());
        assert!(store.credentials().unwrap().is_some());
    }
}
