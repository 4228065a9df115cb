//! Content Provider — supplies the resume document and home-page data.
//!
//! Providers never fail: a document that cannot be read or parsed is logged
//! and replaced by `ResumeDocument::load_failure()`, which pages render as-is.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::content::document::{parse_document, DocumentError, ResumeDocument};
use crate::content::profile::Profile;
use crate::content::projects::Project;

/// Carried in `AppState` as `Arc<dyn ContentProvider>`.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn load_resume(&self) -> ResumeDocument;

    fn profile(&self) -> Profile {
        Profile::placeholder()
    }

    fn projects(&self) -> Vec<Project> {
        Project::placeholders()
    }
}

/// Reads the resume from a markdown file on every request.
pub struct FileContentProvider {
    path: PathBuf,
}

impl FileContentProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<ResumeDocument, DocumentError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_document(&raw)
    }
}

#[async_trait]
impl ContentProvider for FileContentProvider {
    async fn load_resume(&self) -> ResumeDocument {
        match self.read().await {
            Ok(doc) => {
                debug!(path = %self.path.display(), "resume document loaded");
                doc
            }
            Err(e) => {
                error!(path = %self.path.display(), "Failed to read resume document: {e}");
                ResumeDocument::load_failure()
            }
        }
    }
}

/// Serves a fixed, in-memory document.
pub struct StaticContentProvider {
    document: ResumeDocument,
}

impl StaticContentProvider {
    pub fn new(document: ResumeDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl ContentProvider for StaticContentProvider {
    async fn load_resume(&self) -> ResumeDocument {
        self.document.clone()
    }
}
