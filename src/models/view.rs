use super::content::DisplaySize;
use super::selection::{Scale, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analysis {
    Seasonal,
    Global(Scale),
}

impl Analysis {
    pub const ALL: [Self; 3] = [
        Self::Seasonal,
        Self::Global(Scale::National),
        Self::Global(Scale::Regional),
    ];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Seasonal => "seasonal",
            Self::Global(scale) => scale.slug(),
        }
    }

    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        match self {
            Self::Seasonal => "Choose a Month:",
            Self::Global(_) => "Choose the Decades for Comparison:",
        }
    }

    #[must_use]
    pub const fn output_kind(&self) -> OutputKind {
        match self {
            Self::Seasonal => OutputKind::ImageReference,
            Self::Global(_) => OutputKind::EmbeddedDocument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    ImageReference,
    EmbeddedDocument,
}

impl OutputKind {
    #[must_use]
    pub const fn display_size(&self) -> DisplaySize {
        match self {
            Self::ImageReference => DisplaySize::SEASONAL_IMAGE,
            Self::EmbeddedDocument => DisplaySize::MAP_DOCUMENT,
        }
    }
}

/// One selection control wired to one render region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct View {
    pub scenario: Scenario,
    pub analysis: Analysis,
}

impl View {
    pub const COUNT: usize = Scenario::COUNT * Analysis::ALL.len();

    #[must_use]
    pub const fn new(scenario: Scenario, analysis: Analysis) -> Self {
        Self { scenario, analysis }
    }

    #[must_use]
    pub fn all() -> [Self; Self::COUNT] {
        let mut views = [Self::new(Scenario::Ssp585, Analysis::Seasonal); Self::COUNT];
        let mut index = 0;
        for &analysis in &Analysis::ALL {
            for &scenario in Scenario::all() {
                views[index] = Self::new(scenario, analysis);
                index += 1;
            }
        }
        views
    }

    /// Resolver name, e.g. `seasonal_585`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}_{}", self.analysis.slug(), self.scenario.slug())
    }

    #[must_use]
    pub fn control_id(&self) -> String {
        format!("{}-{}", self.analysis.slug(), self.scenario.slug())
    }

    #[must_use]
    pub fn region_id(&self) -> String {
        format!("{}-content-{}", self.analysis.slug(), self.scenario.slug())
    }

    #[must_use]
    pub fn parse_control_id(control_id: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|view| view.control_id() == control_id)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{name}", name = self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiring_matches_the_published_table() {
        let wiring: Vec<_> = View::all()
            .iter()
            .map(|view| (view.control_id(), view.name(), view.region_id(), view.analysis.output_kind()))
            .collect();

        let expected = [
            ("seasonal-585", "seasonal_585", "seasonal-content-585", OutputKind::ImageReference),
            ("seasonal-245", "seasonal_245", "seasonal-content-245", OutputKind::ImageReference),
            ("country-585", "country_585", "country-content-585", OutputKind::EmbeddedDocument),
            ("country-245", "country_245", "country-content-245", OutputKind::EmbeddedDocument),
            ("state-585", "state_585", "state-content-585", OutputKind::EmbeddedDocument),
            ("state-245", "state_245", "state-content-245", OutputKind::EmbeddedDocument),
        ];

        assert_eq!(wiring.len(), expected.len());
        for ((control, name, region, kind), (expected_control, expected_name, expected_region, expected_kind)) in wiring.iter().zip(expected) {
            assert_eq!(control, expected_control);
            assert_eq!(name, expected_name);
            assert_eq!(region, expected_region);
            assert_eq!(*kind, expected_kind);
        }
    }

    #[test]
    fn control_ids_parse_back_to_their_view() {
        for view in View::all() {
            assert_eq!(View::parse_control_id(&view.control_id()), Some(view));
        }
        assert_eq!(View::parse_control_id("seasonal-dropdown-585"), None);
    }
}
