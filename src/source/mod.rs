//! Bot source acquisition.
//!
//! Resolves a [`SourceLocation`] into raw bytes. Nothing is cached or retried
//! here: the engine owns the source cache and treats any failure as fatal.

pub mod github;
pub mod local;

pub use github::{GithubConfig, GithubSource, GITHUB_API_BASE};
pub use local::{read_local_source, resolve_relative};

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::RetrievalError;
use crate::models::SourceLocation;

/// Turns a source location into the bot's raw source bytes.
#[async_trait]
pub trait SourceAcquirer: Send + Sync {
    async fn acquire(&self, location: &SourceLocation) -> Result<Vec<u8>, RetrievalError>;
}

/// Default acquirer: local files or GitHub, chosen by the location kind.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    /// Base for local paths; the process working directory when unset.
    working_dir: Option<PathBuf>,
    github: GithubSource,
}

impl SourceFetcher {
    pub fn new(working_dir: Option<PathBuf>, github: GithubSource) -> Self {
        Self {
            working_dir,
            github,
        }
    }

    fn base_dir(&self) -> Result<PathBuf, RetrievalError> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(RetrievalError::WorkingDirectory),
        }
    }
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new(None, GithubSource::default())
    }
}

#[async_trait]
impl SourceAcquirer for SourceFetcher {
    async fn acquire(&self, location: &SourceLocation) -> Result<Vec<u8>, RetrievalError> {
        match location {
            SourceLocation::Local { path } => {
                let base = self.base_dir()?;
                debug!(path = %path, base = %base.display(), "Reading local bot source");
                read_local_source(&base, path).await
            }
            SourceLocation::Remote { owner, repo, path } => {
                self.github.download(owner, repo, path).await
            }
        }
    }
}
