//! JSON content files.
//!
//! A content file is the JSON form of a [`Catalog`]. `gdrealty content
//! export` writes the built-in catalog in this format as a starting point.

use std::path::Path;

use tracing::{debug, info};

use super::model::Catalog;
use crate::error::{Error, Result};

/// Read and validate a catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid catalog JSON,
/// or fails [`Catalog::validate`].
pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    debug!("Reading content file {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|source| Error::ContentRead {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog: Catalog = serde_json::from_str(&raw).map_err(|source| Error::ContentParse {
        path: path.to_path_buf(),
        source,
    })?;
    catalog.validate()?;

    info!(
        projects = catalog.projects.len(),
        posts = catalog.posts.len(),
        "Loaded content from {}",
        path.display()
    );
    Ok(catalog)
}

/// Serialize a catalog as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(catalog: &Catalog) -> Result<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Write a catalog to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn save(catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(path, to_json(catalog)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::catalog;

    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("content.json");

        let original = catalog::builtin();
        save(&original, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/content.json").unwrap_err();
        assert!(matches!(err, Error::ContentRead { .. }));
        assert!(err.to_string().contains("/nonexistent/content.json"));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::ContentParse { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, r#"{"projects": []}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.is_content_error());
        assert!(err.to_string().contains("no projects"));
    }

    #[test]
    fn test_optional_sections_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(
            &path,
            r#"{"projects": [{
                "id": 7, "title": "Cabin", "location": "Lakeside", "price": 300000,
                "bedrooms": 1, "bathrooms": 1, "sqft": 600,
                "summary": "s", "description": "d", "cover": "/images/cabin.jpg"
            }]}"#,
        )
        .unwrap();

        let loaded = load(&path).unwrap();
        assert!(loaded.posts.is_empty());
        let cabin = loaded.project(7).unwrap();
        assert_eq!(cabin.parking, 0);
        assert!(cabin.year_built.is_none());
        assert_eq!(cabin.gallery().len(), 1);
    }
}
