use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error};

use super::error::ConfigError;

/// The fixed system instruction sent ahead of every user input.
///
/// Loaded once at startup and treated as opaque text. Cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct SystemPrompt(Arc<str>);

impl SystemPrompt {
    /// Wraps an in-memory instruction.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// Reads the instruction from a UTF-8 file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            error!(path = %path.display(), "System prompt file not found");
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::PromptUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), bytes = text.len(), "Loaded system prompt");
        Ok(Self(text.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SystemPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SystemPrompt")
            .field(&format!("{} bytes", self.0.len()))
            .finish()
    }
}
