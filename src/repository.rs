use super::error::ResolveError;
use super::models::{Catalog, MapEntry, Scale, Scenario};

use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Read-only access to the catalog, with its relative paths anchored at an asset root.
#[derive(Debug, Clone)]
pub struct Repository {
    catalog: &'static Catalog,
    root: Rc<Path>,
}

impl Repository {

    pub fn new(catalog: &'static Catalog, root: impl AsRef<Path>) -> Self {
        Self { catalog, root: Rc::from(root.as_ref()) }
    }

    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn asset_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn comparisons(&self, scenario: Scenario, scale: Scale) -> Vec<&'static MapEntry> {
        let catalog: &'static Catalog = self.catalog;
        catalog.comparisons(scenario, scale).collect()
    }

    /// Reads a catalog document in full. Invalid UTF-8 counts as unreadable.
    pub fn read_document(&self, relative: &str) -> Result<(PathBuf, String), ResolveError> {
        let path = self.asset_path(relative);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok((path, content)),
            Err(error) => Err(ResolveError::asset_unreadable(path, error)),
        }
    }

    /// Catalog assets that are not regular files under the root right now.
    pub fn missing_assets(&self) -> Vec<PathBuf> {
        let mut missing: Vec<PathBuf> = self.catalog
            .asset_paths()
            .map(|relative| self.asset_path(relative))
            .filter(|path| !path.is_file())
            .collect();
        missing.sort();
        missing
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_CATALOG;
    use tempfile::tempdir;

    #[test]
    fn asset_paths_are_anchored_at_the_root() {
        let repository = Repository::new(&APP_CATALOG, "/srv/climate");
        assert_eq!(
            repository.asset_path("assets/map1.html"),
            PathBuf::from("/srv/climate/assets/map1.html")
        );
    }

    #[test]
    fn read_document_returns_exact_contents() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        let html = "<html>\n<body>Pres-Mid ✓</body>\r\n</html>";
        std::fs::write(dir.path().join("assets/map1.html"), html).unwrap();

        let repository = Repository::new(&APP_CATALOG, dir.path());
        let (path, content) = repository.read_document("assets/map1.html").unwrap();

        assert_eq!(path, dir.path().join("assets/map1.html"));
        assert_eq!(content, html);
    }

    #[test]
    fn unreadable_documents_are_reported_with_their_path() {
        let dir = tempdir().unwrap();
        let repository = Repository::new(&APP_CATALOG, dir.path());

        let error = repository.read_document("assets/map2.html").unwrap_err();
        match error {
            ResolveError::AssetUnreadable { path, source } => {
                assert_eq!(path, dir.path().join("assets/map2.html"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/map3.html"), [0xff, 0xfe, 0x00]).unwrap();

        let repository = Repository::new(&APP_CATALOG, dir.path());
        assert!(matches!(
            repository.read_document("assets/map3.html"),
            Err(ResolveError::AssetUnreadable { .. })
        ));
    }

    #[test]
    fn missing_assets_lists_every_absent_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/map1.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("assets/decadal_July.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let repository = Repository::new(&APP_CATALOG, dir.path());
        let missing = repository.missing_assets();

        assert_eq!(missing.len(), 16 - 2);
        assert!(!missing.contains(&dir.path().join("assets/map1.html")));
        assert!(!missing.contains(&dir.path().join("assets/decadal_July.png")));
        assert!(missing.contains(&dir.path().join("assets/map4.html")));
    }
}
