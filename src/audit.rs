use super::config::Config;
use super::models::Catalog;
use super::repository::Repository;
use super::resolver::ResolverSet;

use anyhow::{bail, Result};

/// Checks the catalog against the configured asset root before any window exists.
///
/// Missing files only fail the check when `strict_assets` is set; otherwise the
/// affected selections render an error when chosen.
pub fn check_assets(config: &Config, catalog: &'static Catalog) -> Result<()> {
    let repository = Repository::new(catalog, &config.assets_root);
    log::info!("Serving assets from {root}", root = repository.root().display());

    let incomplete = ResolverSet::new(&repository).incomplete_controls();
    if let Some((view, key)) = incomplete.first() {
        bail!("Control {control} offers {key:?}, which the catalog cannot resolve", control = view.control_id());
    }

    let missing = repository.missing_assets();
    for path in &missing {
        log::warn!("Missing asset {path}", path = path.display());
    }

    if config.strict_assets && !missing.is_empty() {
        bail!("{count} catalog asset(s) missing under {root}", count = missing.len(), root = repository.root().display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_CATALOG;
    use std::path::Path;
    use tempfile::tempdir;

    fn config(root: &Path, strict_assets: bool) -> Config {
        Config { assets_root: root.to_path_buf(), strict_assets, verbose: false }
    }

    #[test]
    fn strict_audit_refuses_missing_assets() {
        let dir = tempdir().unwrap();

        let error = check_assets(&config(dir.path(), true), &APP_CATALOG).unwrap_err();

        assert!(error.to_string().starts_with("16 catalog asset(s) missing"), "{error}");
    }

    #[test]
    fn lenient_audit_tolerates_missing_assets() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/map1.html"), "<html></html>").unwrap();

        assert!(check_assets(&config(dir.path(), false), &APP_CATALOG).is_ok());
    }

    #[test]
    fn strict_audit_accepts_a_complete_asset_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        for path in APP_CATALOG.asset_paths() {
            std::fs::write(dir.path().join(path), b"fixture").unwrap();
        }

        assert!(check_assets(&config(dir.path(), true), &APP_CATALOG).is_ok());
    }
}
