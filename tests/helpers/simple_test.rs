//! Simple test infrastructure for basic testing
//!
//! Logging setup plus a temp directory for session files

use std::path::PathBuf;
use std::sync::Once;
use BookHotel::config::Settings;
use BookHotel::state::SessionStorage;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("BookHotel=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Simple test context for basic testing
pub struct SimpleTestContext {
    pub temp_dir: tempfile::TempDir,
}

impl SimpleTestContext {
    /// Create a new simple test context
    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        init_test_env();
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.temp_dir.path().join("session").join("session.toml")
    }

    pub fn storage(&self) -> SessionStorage {
        SessionStorage::at(self.session_path())
    }

    /// Settings pointing the session file into the temp directory
    pub fn settings(&self, base_url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = base_url.to_string();
        settings.session.file_path = self.session_path().to_string_lossy().into_owned();
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_context_creation() {
        let ctx = SimpleTestContext::new().expect("Failed to create simple test context");
        assert!(ctx.temp_dir.path().exists());
        assert!(ctx.session_path().starts_with(ctx.temp_dir.path()));
    }
}
