//! Session storage implementation
//!
//! This module persists the session context to a TOML file between
//! invocations, including serialization, deserialization and cleanup.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::config::SessionConfig;
use crate::utils::errors::Result;
use super::context::SessionContext;

/// File-based session storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Create a new session storage instance
    pub fn new(config: &SessionConfig) -> Self {
        Self::at(&config.file_path)
    }

    /// Storage backed by an explicit file
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save session context, creating parent directories as needed
    pub async fn save_context(&self, context: &SessionContext) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let serialized = toml::to_string_pretty(context)?;
        tokio::fs::write(&self.path, serialized).await?;

        debug!(path = %self.path.display(), authenticated = context.is_authenticated(), "Session saved");
        Ok(())
    }

    /// Load session context; `None` when no session was saved
    pub async fn load_context(&self) -> Result<Option<SessionContext>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match toml::from_str::<SessionContext>(&data) {
            Ok(context) => Ok(Some(context)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                self.delete_context().await?;
                Ok(None)
            }
        }
    }

    /// Delete the saved session, if any
    pub async fn delete_context(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "Session deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
