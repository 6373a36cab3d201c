//! Credential providers.
//!
//! The admin client only ever reads credentials. Writing them belongs to the
//! login/session flow, which for this crate is the CLI's `auth` commands.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

/// Key under which the session stores its authorization data.
pub const AUTHORIZATION_KEY: &str = "authorizationData";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to access credential store {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("credential store {path} is not valid JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Opaque access token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Empty or whitespace-only tokens are treated as no credential at all.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(**redacted**)")
    }
}

/// Value shape stored under [`AUTHORIZATION_KEY`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorizationData {
    pub token: String,
}

/// Source of the current access token, consulted on every request.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}

/// Fixed credential, or none for anonymous access.
#[derive(Clone, Debug, Default)]
pub struct StaticCredential(Option<Credential>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Credential::new(token))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}

/// Persistent name/value store kept as a JSON object on disk.
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a named value. A missing file reads as an empty store.
    pub fn get(&self, name: &str) -> Result<Option<Value>, CredentialError> {
        Ok(self.load()?.remove(name))
    }

    pub fn set(&self, name: &str, value: Value) -> Result<(), CredentialError> {
        let mut entries = self.load()?;
        entries.insert(name.to_owned(), value);
        self.save(&entries)
    }

    pub fn remove(&self, name: &str) -> Result<(), CredentialError> {
        let mut entries = self.load()?;
        if entries.remove(name).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    pub fn store_token(&self, token: &str) -> Result<(), CredentialError> {
        let data = AuthorizationData {
            token: token.trim().to_owned(),
        };
        let value = serde_json::to_value(data).map_err(|source| self.json_error(source))?;
        self.set(AUTHORIZATION_KEY, value)
    }

    fn load(&self) -> Result<Map<String, Value>, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|source| self.json_error(source))
    }

    /// Replace the store atomically: readers see either the old or the new
    /// contents, never a partial write. The file is owner-only on Unix.
    fn save(&self, entries: &Map<String, Value>) -> Result<(), CredentialError> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
                parent
            }
            None => Path::new("."),
        };
        let data = serde_json::to_vec_pretty(entries).map_err(|source| self.json_error(source))?;
        let mut staged = NamedTempFile::new_in(parent).map_err(|source| self.io_error(source))?;
        staged
            .write_all(&data)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> CredentialError {
        CredentialError::Json {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CredentialProvider for FileCredentialStore {
    fn credential(&self) -> Option<Credential> {
        let value = match self.get(AUTHORIZATION_KEY) {
            Ok(value) => value?,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable credential store");
                return None;
            }
        };
        let data: AuthorizationData = match serde_json::from_value(value) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, key = AUTHORIZATION_KEY, "malformed authorization data");
                return None;
            }
        };
        Credential::new(data.token)
    }
}
