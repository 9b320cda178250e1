//! Session token persistence.
//!
//! The bearer token lives under a single key in `session.yml` next to the
//! configuration file. The in-memory copy is authoritative for the running
//! client; the file only carries it across restarts.

use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "session.yml";

/// Errors that can occur while persisting the session token.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to write the session file
    #[error("Failed to write session to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to remove the session file
    #[error("Failed to remove session file {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the session
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),
}

#[derive(Serialize, Deserialize)]
struct FileSpec {
    access_token: String,
}

/// Holds at most one bearer token and mirrors it to disk.
///
#[derive(Debug, Default)]
pub struct TokenStore {
    token: Option<String>,
    file_path: Option<PathBuf>,
}

impl TokenStore {
    /// Return a store that never touches the disk.
    ///
    pub fn in_memory() -> Self {
        TokenStore::default()
    }

    /// Return a store backed by the session file in `dir_path`, picking up a
    /// previously saved token. An unreadable file counts as logged out.
    ///
    pub fn open(dir_path: &Path) -> Self {
        let file_path = dir_path.join(FILE_NAME);
        let token = if file_path.exists() {
            match fs::read_to_string(&file_path)
                .map_err(|e| e.to_string())
                .and_then(|contents| {
                    serde_yaml::from_str::<FileSpec>(&contents).map_err(|e| e.to_string())
                }) {
                Ok(data) => Some(data.access_token),
                Err(e) => {
                    warn!("Ignoring unreadable session file {:?}: {}", file_path, e);
                    None
                }
            }
        } else {
            None
        };
        TokenStore {
            token,
            file_path: Some(file_path),
        }
    }

    /// Store the token, replacing any previous one.
    ///
    pub fn save(&mut self, token: &str) -> Result<(), SessionError> {
        self.token = Some(token.to_owned());
        let file_path = match &self.file_path {
            Some(path) => path,
            None => return Ok(()),
        };
        let content = serde_yaml::to_string(&FileSpec {
            access_token: token.to_owned(),
        })
        .map_err(|e| SessionError::SerializationFailed(e.to_string()))?;
        let mut file = open_private(file_path).map_err(|e| SessionError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| SessionError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| SessionError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forget the token and remove the session file.
    ///
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.token = None;
        match &self.file_path {
            Some(path) if path.exists() => {
                fs::remove_file(path).map_err(|e| SessionError::RemoveFailed {
                    path: path.clone(),
                    source: e,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.get().map_or(false, |token| !token.is_empty())
    }
}

/// Open the session file for writing, readable by its owner only.
///
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to newly created files
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
