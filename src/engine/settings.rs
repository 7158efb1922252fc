//! Engine settings.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the resource directory, relative to the working directory.
pub const DEFAULT_RESOURCE_FOLDER: &str = "tmp";

/// Settings controlling a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Emit per-iteration progress at `info` instead of `debug`.
    pub verbose_logging_enabled: bool,
    /// Base for relative paths; the process working directory when unset.
    pub working_dir: Option<PathBuf>,
    /// Resource directory mounted into every sandbox. Recreated on every run.
    pub resource_folder: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            verbose_logging_enabled: false,
            working_dir: None,
            resource_folder: DEFAULT_RESOURCE_FOLDER.to_string(),
        }
    }
}

impl EngineSettings {
    pub fn with_verbose_logging(mut self, enabled: bool) -> Self {
        self.verbose_logging_enabled = enabled;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Resolves the working directory.
    pub fn resolve_working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Absolute path of the resource directory under `working_dir`.
    ///
    /// The folder must name a directory strictly below `working_dir`, since it
    /// is wiped on every run. Empty folders and `.`/`..` components are
    /// rejected with `InvalidInput`.
    pub fn resource_dir(&self, working_dir: &Path) -> std::io::Result<PathBuf> {
        let folder = Path::new(self.resource_folder.trim_matches('/'));
        let mut components = folder.components().peekable();
        let nested = components.peek().is_some()
            && components.all(|c| matches!(c, Component::Normal(_)));

        if !nested {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "resource folder {:?} must be a relative directory below the working directory",
                    self.resource_folder
                ),
            ));
        }

        Ok(working_dir.join(folder))
    }
}
