use super::selection::{Scale, Scenario};

#[derive(Debug)]
pub struct MapEntry {
    pub key: &'static str,
    pub scenario: Scenario,
    pub scale: Scale,
    pub summary: &'static str,
    pub path: &'static str,
}

/// The asset tables baked in by `build.rs`.
#[derive(Debug)]
pub struct Catalog {
    pub maps: &'static [MapEntry],
    pub maps_index: phf::Map<&'static str, usize>,
    pub seasonal: phf::Map<&'static str, phf::Map<&'static str, &'static str>>,
}

impl Catalog {

    pub fn map_entry(&self, key: &str) -> Option<&MapEntry> {
        self.maps_index
            .get(key)
            .and_then(|&index| self.maps.get(index))
    }

    pub fn seasonal_path(&self, month: &str, scenario: Scenario) -> Option<&'static str> {
        self.seasonal
            .get(month)
            .and_then(|scenarios| scenarios.get(scenario.key()))
            .copied()
    }

    /// Decade comparisons offered for a scenario and scale, in table order.
    pub fn comparisons(&self, scenario: Scenario, scale: Scale) -> impl Iterator<Item = &MapEntry> {
        self.maps
            .iter()
            .filter(move |entry| entry.scenario == scenario && entry.scale == scale)
    }

    /// Every relative asset path the catalog references.
    pub fn asset_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        let maps = self.maps.iter().map(|entry| entry.path);
        let images = self.seasonal
            .values()
            .flat_map(|scenarios| scenarios.values().copied());
        maps.chain(images)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_CATALOG;

    #[test]
    fn map_entries_carry_their_scenario_and_scale() {
        let entry = APP_CATALOG.map_entry("Pres-End(245_Regional)").unwrap();

        assert_eq!(entry.scenario, Scenario::Ssp245);
        assert_eq!(entry.scale, Scale::Regional);
        assert_eq!(entry.path, "assets/State_map_245_2.html");
        assert_eq!(APP_CATALOG.map_entry("Pres-Mid(585_National)").map(|entry| entry.path), Some("assets/map1.html"));
        assert!(APP_CATALOG.map_entry("Pres-Mid(585_national)").is_none());
    }

    #[test]
    fn seasonal_lookup_is_keyed_by_month_then_scenario() {
        assert_eq!(APP_CATALOG.seasonal_path("October", Scenario::Ssp585), Some("assets/decadal_October.png"));
        assert_eq!(APP_CATALOG.seasonal_path("October", Scenario::Ssp245), Some("assets/decadal_October_245.png"));
        assert_eq!(APP_CATALOG.seasonal_path("Oct", Scenario::Ssp585), None);
    }

    #[test]
    fn comparisons_keep_table_order() {
        let keys: Vec<_> = APP_CATALOG
            .comparisons(Scenario::Ssp585, Scale::Regional)
            .map(|entry| entry.key)
            .collect();

        assert_eq!(keys, ["Pres-Mid(585_Regional)", "Pres-End(585_Regional)"]);
    }

    #[test]
    fn every_asset_is_referenced_once() {
        let mut paths: Vec<_> = APP_CATALOG.asset_paths().collect();
        paths.sort_unstable();
        paths.dedup();

        assert_eq!(paths.len(), 16);
        assert!(paths.iter().all(|path| path.starts_with("assets/")));
    }
}
