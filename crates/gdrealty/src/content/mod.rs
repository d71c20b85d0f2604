//! Read-only content behind the pages.
//!
//! Pages never reach for content directly; they ask a [`ContentSource`].
//! The site ships with [`CatalogSource`], backed either by the built-in
//! catalog or by a JSON content file. A CMS-backed source can be swapped in
//! without touching page code.

pub mod catalog;
pub mod file;
pub mod model;

use std::path::Path;
use std::sync::Arc;

pub use model::{
    format_price, title_case_slug, AboutEntry, BlogListing, BlogPost, Catalog, FloorPlan,
    MediaItem, Project, TeamMember,
};

use crate::error::Result;

/// A provider of site content.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync + std::fmt::Debug {
    /// Human-readable description of where the content comes from.
    fn origin(&self) -> &str;

    /// All projects, in display order.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// One project by id.
    async fn project(&self, id: u32) -> Result<Option<Project>>;

    /// All blog posts, newest first.
    async fn posts(&self) -> Result<Vec<BlogPost>>;

    /// Team members.
    async fn team(&self) -> Result<Vec<TeamMember>>;

    /// About page entries.
    async fn about(&self) -> Result<Vec<AboutEntry>>;
}

/// Content source serving an in-memory [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogSource {
    origin: String,
    catalog: Arc<Catalog>,
}

impl CatalogSource {
    /// Serve `catalog`, described by `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            origin: origin.into(),
            catalog: Arc::new(catalog),
        }
    }

    /// Serve the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new("built-in", catalog::builtin())
    }

    /// Serve a JSON content file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog = file::load(path)?;
        Ok(Self::new(path.display().to_string(), catalog))
    }

    /// Serve the file at `path` if given, otherwise the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is given and cannot be loaded.
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait::async_trait]
impl ContentSource for CatalogSource {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.catalog.projects.clone())
    }

    async fn project(&self, id: u32) -> Result<Option<Project>> {
        Ok(self.catalog.project(id).cloned())
    }

    async fn posts(&self) -> Result<Vec<BlogPost>> {
        Ok(self.catalog.posts.clone())
    }

    async fn team(&self) -> Result<Vec<TeamMember>> {
        Ok(self.catalog.team.clone())
    }

    async fn about(&self) -> Result<Vec<AboutEntry>> {
        Ok(self.catalog.about.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_source() {
        let source = CatalogSource::builtin();
        assert_eq!(source.origin(), "built-in");
        assert_eq!(source.projects().await.unwrap().len(), 2);
        assert!(source.project(1).await.unwrap().is_some());
        assert!(source.project(99).await.unwrap().is_none());
        assert_eq!(source.posts().await.unwrap().len(), 6);
        assert_eq!(source.team().await.unwrap().len(), 2);
        assert_eq!(source.about().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_source_is_object_safe() {
        let source: Arc<dyn ContentSource> = Arc::new(CatalogSource::builtin());
        assert!(source.project(2).await.unwrap().is_some());
    }

    #[test]
    fn test_from_optional_file_none_is_builtin() {
        let source = CatalogSource::from_optional_file(None).unwrap();
        assert_eq!(source.catalog(), &catalog::builtin());
    }

    #[test]
    fn test_from_file_origin_is_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        file::save(&catalog::builtin(), &path).unwrap();

        let source = CatalogSource::from_file(&path).unwrap();
        assert!(source.origin().ends_with("content.json"));
    }
}
