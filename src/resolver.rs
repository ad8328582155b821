use super::error::ResolveError;
use super::models::{Analysis, DisplaySize, MapEntry, Month, Scale, View};
use super::repository::Repository;

use std::path::PathBuf;

/// What a render region should show for the current selection.
#[derive(Debug)]
pub enum ContentDescriptor {
    ImageReference {
        asset: &'static str,
        path: PathBuf,
        size: DisplaySize,
    },
    EmbeddedDocument {
        asset: &'static str,
        path: PathBuf,
        content: String,
        size: DisplaySize,
    },
    Error(ResolveError),
}

impl ContentDescriptor {
    pub const fn asset(&self) -> Option<&'static str> {
        match self {
            Self::ImageReference { asset, .. } | Self::EmbeddedDocument { asset, .. } => Some(*asset),
            Self::Error(_) => None,
        }
    }

    pub const fn size(&self) -> Option<DisplaySize> {
        match self {
            Self::ImageReference { size, .. } | Self::EmbeddedDocument { size, .. } => Some(*size),
            Self::Error(_) => None,
        }
    }

    pub const fn error(&self) -> Option<&ResolveError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<ContentDescriptor, ResolveError>> for ContentDescriptor {
    fn from(result: Result<ContentDescriptor, ResolveError>) -> Self {
        result.unwrap_or_else(Self::Error)
    }
}

/// Maps the selection of one control to the content of its region.
///
/// Holds no state besides the injected repository, so resolving the same
/// key twice yields the same asset.
#[derive(Debug, Clone)]
pub struct Resolver {
    view: View,
    repository: Repository,
}

impl Resolver {

    pub const fn new(view: View, repository: Repository) -> Self {
        Self { view, repository }
    }

    pub const fn view(&self) -> View {
        self.view
    }

    /// Keys offered by the control, in display order.
    pub fn options(&self) -> Vec<&'static str> {
        match self.view.analysis {
            Analysis::Seasonal => Month::all().iter().map(Month::key).collect(),
            Analysis::Global(scale) => self.comparison_options(scale),
        }
    }

    fn comparison_options(&self, scale: Scale) -> Vec<&'static str> {
        self.repository
            .comparisons(self.view.scenario, scale)
            .into_iter()
            .map(|entry| entry.key)
            .collect()
    }

    pub fn default_option(&self) -> Option<&'static str> {
        self.options().first().copied()
    }

    /// Human description of a decade comparison. Months have none.
    pub fn summary(&self, key: &str) -> Option<&'static str> {
        match self.view.analysis {
            Analysis::Seasonal => None,
            Analysis::Global(scale) => self.comparison(key, scale).map(|entry| entry.summary),
        }
    }

    pub fn try_resolve(&self, key: &str) -> Result<ContentDescriptor, ResolveError> {
        match self.view.analysis {
            Analysis::Seasonal => self.resolve_seasonal(key),
            Analysis::Global(scale) => self.resolve_map(key, scale),
        }
    }

    /// Like [`Self::try_resolve`], with failures folded into [`ContentDescriptor::Error`].
    pub fn resolve(&self, key: &str) -> ContentDescriptor {
        let result = self.try_resolve(key);
        match &result {
            Ok(descriptor) => log::debug!("{view}: `{key}` -> {asset:?}", view = self.view, asset = descriptor.asset()),
            Err(error) => log::warn!("{view}: {error}", view = self.view),
        }
        result.into()
    }

    fn resolve_seasonal(&self, key: &str) -> Result<ContentDescriptor, ResolveError> {
        let asset = self.repository
            .catalog()
            .seasonal_path(key, self.view.scenario)
            .ok_or_else(|| self.key_not_found(key))?;

        Ok(ContentDescriptor::ImageReference {
            asset,
            path: self.repository.asset_path(asset),
            size: self.view.analysis.output_kind().display_size(),
        })
    }

    fn resolve_map(&self, key: &str, scale: Scale) -> Result<ContentDescriptor, ResolveError> {
        let entry = self.comparison(key, scale).ok_or_else(|| self.key_not_found(key))?;

        let (path, content) = self.repository.read_document(entry.path)?;

        Ok(ContentDescriptor::EmbeddedDocument {
            asset: entry.path,
            path,
            content,
            size: self.view.analysis.output_kind().display_size(),
        })
    }

    fn comparison(&self, key: &str, scale: Scale) -> Option<&'static MapEntry> {
        self.repository
            .catalog()
            .map_entry(key)
            .filter(|entry| entry.scenario == self.view.scenario && entry.scale == scale)
    }

    fn is_backed_by_catalog(&self, key: &str) -> bool {
        match self.view.analysis {
            Analysis::Seasonal => self.repository.catalog().seasonal_path(key, self.view.scenario).is_some(),
            Analysis::Global(scale) => self.comparison(key, scale).is_some(),
        }
    }

    fn key_not_found(&self, key: &str) -> ResolveError {
        ResolveError::key_not_found(self.view.name(), key)
    }

}

/// The resolvers behind every control of the dashboard.
#[derive(Debug, Clone)]
pub struct ResolverSet {
    resolvers: Vec<Resolver>,
}

impl ResolverSet {

    pub fn new(repository: &Repository) -> Self {
        let resolvers = View::all()
            .into_iter()
            .map(|view| Resolver::new(view, repository.clone()))
            .collect();

        Self { resolvers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolver> {
        self.resolvers.iter()
    }

    pub fn get(&self, view: View) -> Option<&Resolver> {
        self.resolvers.iter().find(|resolver| resolver.view == view)
    }

    pub fn by_control_id(&self, control_id: &str) -> Option<&Resolver> {
        View::parse_control_id(control_id).and_then(|view| self.get(view))
    }

    /// Controls whose option list is empty or offers a key the catalog cannot resolve.
    pub fn incomplete_controls(&self) -> Vec<(View, Option<&'static str>)> {
        let mut incomplete = Vec::new();

        for resolver in &self.resolvers {
            let options = resolver.options();
            if options.is_empty() {
                incomplete.push((resolver.view, None));
            }

            for key in options {
                if !resolver.is_backed_by_catalog(key) {
                    incomplete.push((resolver.view, Some(key)));
                }
            }
        }

        incomplete
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_CATALOG;
    use crate::models::{Length, Scenario};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn view(scenario: Scenario, analysis: Analysis) -> View {
        View::new(scenario, analysis)
    }

    fn write_assets(root: &Path) {
        let assets = root.join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        for entry in APP_CATALOG.maps {
            let html = format!("<html><body><h1>{key}</h1><p>{summary}</p></body></html>\n", key = entry.key, summary = entry.summary);
            std::fs::write(root.join(entry.path), html).unwrap();
        }
    }

    fn fixture() -> (TempDir, ResolverSet) {
        let dir = tempdir().unwrap();
        write_assets(dir.path());
        let repository = Repository::new(&APP_CATALOG, dir.path());
        let resolvers = ResolverSet::new(&repository);
        (dir, resolvers)
    }

    #[test]
    fn seasonal_585_july_is_the_decadal_july_image() {
        let (dir, resolvers) = fixture();
        let resolver = resolvers.by_control_id("seasonal-585").unwrap();

        match resolver.try_resolve("July").unwrap() {
            ContentDescriptor::ImageReference { asset, path, size } => {
                assert_eq!(asset, "assets/decadal_July.png");
                assert_eq!(path, dir.path().join("assets/decadal_July.png"));
                assert_eq!(size.height, Length::Pixels(2000));
                assert_eq!(size.width, Length::Percent(90));
            }
            other => panic!("expected an image, got {other:?}"),
        }
    }

    #[test]
    fn every_month_and_scenario_resolves_to_its_catalog_image() {
        let (_dir, resolvers) = fixture();

        for &scenario in Scenario::all() {
            let resolver = resolvers.get(view(scenario, Analysis::Seasonal)).unwrap();
            for &month in Month::all() {
                let expected = match scenario {
                    Scenario::Ssp585 => format!("assets/decadal_{month}.png"),
                    Scenario::Ssp245 => format!("assets/decadal_{month}_245.png"),
                };
                let descriptor = resolver.resolve(month.key());
                assert_eq!(descriptor.asset(), Some(expected.as_str()), "{month} / {scenario}");
                assert!(matches!(descriptor, ContentDescriptor::ImageReference { .. }));
            }
        }
    }

    #[test]
    fn country_245_pres_end_embeds_map4() {
        let (dir, resolvers) = fixture();
        let expected = std::fs::read_to_string(dir.path().join("assets/map4.html")).unwrap();
        let resolver = resolvers.by_control_id("country-245").unwrap();

        match resolver.try_resolve("Pres-End(245_National)").unwrap() {
            ContentDescriptor::EmbeddedDocument { asset, content, size, .. } => {
                assert_eq!(asset, "assets/map4.html");
                assert_eq!(content, expected);
                assert_eq!(size.height, Length::Pixels(750));
                assert_eq!(size.width, Length::Percent(100));
            }
            other => panic!("expected a document, got {other:?}"),
        }
    }

    #[test]
    fn every_comparison_embeds_its_file_verbatim() {
        let (dir, resolvers) = fixture();

        for resolver in resolvers.iter().filter(|resolver| resolver.view().analysis != Analysis::Seasonal) {
            for key in resolver.options() {
                let path = APP_CATALOG.map_entry(key).unwrap().path;
                let expected = std::fs::read(dir.path().join(path)).unwrap();

                match resolver.resolve(key) {
                    ContentDescriptor::EmbeddedDocument { content, .. } => {
                        assert_eq!(content.as_bytes(), expected.as_slice(), "{key}");
                    }
                    other => panic!("{key}: expected a document, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn resolving_twice_gives_identical_descriptors() {
        let (_dir, resolvers) = fixture();

        for resolver in resolvers.iter() {
            let key = resolver.default_option().unwrap();
            let first = resolver.resolve(key);
            let second = resolver.resolve(key);

            assert_eq!(first.asset(), second.asset());
            match (first, second) {
                (
                    ContentDescriptor::EmbeddedDocument { content: first, .. },
                    ContentDescriptor::EmbeddedDocument { content: second, .. },
                ) => assert_eq!(first, second),
                (
                    ContentDescriptor::ImageReference { path: first, .. },
                    ContentDescriptor::ImageReference { path: second, .. },
                ) => assert_eq!(first, second),
                (first, _) => panic!("unexpected descriptor {first:?}"),
            }
        }
    }

    #[test]
    fn unknown_keys_are_key_not_found_for_every_resolver() {
        let (_dir, resolvers) = fixture();

        for resolver in resolvers.iter() {
            for key in ["", "February", "Pres-Mid(126_National)", "january"] {
                match resolver.resolve(key) {
                    ContentDescriptor::Error(ResolveError::KeyNotFound { resolver: name, key: missing }) => {
                        assert_eq!(name, resolver.view().name());
                        assert_eq!(missing, key);
                    }
                    other => panic!("{}: expected KeyNotFound for {key:?}, got {other:?}", resolver.view()),
                }
            }
        }
    }

    #[test]
    fn comparisons_belong_to_their_own_control() {
        let (_dir, resolvers) = fixture();
        let country_585 = resolvers.by_control_id("country-585").unwrap();
        let state_585 = resolvers.by_control_id("state-585").unwrap();

        assert!(matches!(
            country_585.try_resolve("Pres-Mid(245_National)"),
            Err(ResolveError::KeyNotFound { .. })
        ));
        assert!(matches!(
            state_585.try_resolve("Pres-Mid(585_National)"),
            Err(ResolveError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn missing_documents_become_error_descriptors() {
        let dir = tempdir().unwrap();
        let repository = Repository::new(&APP_CATALOG, dir.path());
        let resolvers = ResolverSet::new(&repository);
        let resolver = resolvers.by_control_id("state-245").unwrap();

        let descriptor = resolver.resolve("Pres-Mid(245_Regional)");
        match descriptor.error() {
            Some(ResolveError::AssetUnreadable { path, .. }) => {
                assert_eq!(path, &dir.path().join("assets/State_map_245_1.html"));
            }
            other => panic!("expected AssetUnreadable, got {other:?}"),
        }
        assert_eq!(descriptor.size(), None);
    }

    #[test]
    fn options_follow_the_catalog_table() {
        let (_dir, resolvers) = fixture();
        let options = |control_id: &str| resolvers.by_control_id(control_id).unwrap().options();

        assert_eq!(options("seasonal-585"), ["January", "April", "July", "October"]);
        assert_eq!(options("seasonal-245"), ["January", "April", "July", "October"]);
        assert_eq!(options("country-585"), ["Pres-Mid(585_National)", "Pres-End(585_National)"]);
        assert_eq!(options("country-245"), ["Pres-Mid(245_National)", "Pres-End(245_National)"]);
        assert_eq!(options("state-585"), ["Pres-Mid(585_Regional)", "Pres-End(585_Regional)"]);
        assert_eq!(options("state-245"), ["Pres-Mid(245_Regional)", "Pres-End(245_Regional)"]);
    }

    #[test]
    fn comparisons_are_summarised_and_months_are_not() {
        let (_dir, resolvers) = fixture();
        let state_245 = resolvers.by_control_id("state-245").unwrap();
        let seasonal_245 = resolvers.by_control_id("seasonal-245").unwrap();

        assert_eq!(
            state_245.summary("Pres-End(245_Regional)"),
            Some("Present (2015–2024) vs end-century (2090–2099)")
        );
        assert_eq!(state_245.summary("Pres-End(585_Regional)"), None);
        assert_eq!(seasonal_245.summary("April"), None);
    }

    #[test]
    fn every_offered_option_is_backed_by_the_catalog() {
        let (_dir, resolvers) = fixture();
        assert!(resolvers.incomplete_controls().is_empty());
    }
}
