//! The sorted station list shared by every view.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::domain::{Station, StationId, compare_names};

use super::client::{StationDirectory, StationSource};
use super::error::CatalogError;

/// Process-wide station list, sorted by name.
///
/// Cloning is cheap and every clone sees the same list. The list is only
/// ever replaced as a whole, so readers never observe a partial load.
#[derive(Clone, Default)]
pub struct StationCatalog {
    inner: Arc<RwLock<Arc<[Station]>>>,
}

impl StationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from already-built stations (sorted on the way in).
    pub fn from_stations(mut stations: Vec<Station>) -> Self {
        sort_stations(&mut stations);
        let catalog = Self::new();
        catalog.replace(stations);
        catalog
    }

    /// Fetch the directory and replace the station list.
    ///
    /// On failure the current list is left untouched and the error is
    /// returned. Nothing is retried.
    pub async fn load<S: StationSource>(&self, source: &S) -> Result<usize, CatalogError> {
        let directory = source.fetch_directory().await?;
        let stations = build_stations(directory);
        let count = stations.len();

        self.replace(stations);
        info!(count, "loaded station catalog");

        Ok(count)
    }

    /// Snapshot of the current list.
    pub fn stations(&self) -> Arc<[Station]> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Find the station with exactly this name.
    ///
    /// Returns `None` if no station, or more than one, carries the name.
    pub fn find_by_name(&self, name: &str) -> Option<Station> {
        let stations = self.stations();
        let mut matches = stations.iter().filter(|s| s.name == name);

        let found = matches.next()?;
        if matches.next().is_some() {
            warn!(name, "station name is ambiguous");
            return None;
        }

        Some(found.clone())
    }

    pub fn len(&self) -> usize {
        self.stations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations().is_empty()
    }

    fn replace(&self, stations: Vec<Station>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = stations.into();
    }
}

/// Build the sorted station list from the raw directory.
///
/// Keys that are not valid ids are skipped. If two keys parse to the same
/// id (e.g. `"01"` and `"1"`), the first in key order wins.
pub fn build_stations(directory: StationDirectory) -> Vec<Station> {
    let mut seen = HashSet::new();

    let mut stations: Vec<Station> = directory
        .into_iter()
        .filter_map(|(key, record)| {
            let id = match StationId::parse(&key) {
                Ok(id) => id,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping station with invalid id");
                    return None;
                }
            };

            if !seen.insert(id) {
                warn!(key = %key, %id, "skipping duplicate station id");
                return None;
            }

            Some(Station::new(id, record.name))
        })
        .collect();

    sort_stations(&mut stations);
    stations
}

fn sort_stations(stations: &mut [Station]) {
    stations.sort_by(|a, b| compare_names(&a.name, &b.name).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::client::StationRecord;
    use crate::test_support::STATIONS_JSON;

    struct FixedSource(Result<StationDirectory, u16>);

    impl StationSource for FixedSource {
        async fn fetch_directory(&self) -> Result<StationDirectory, CatalogError> {
            match &self.0 {
                Ok(directory) => Ok(directory.clone()),
                Err(status) => Err(CatalogError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    fn directory(entries: &[(&str, &str)]) -> StationDirectory {
        entries
            .iter()
            .map(|(key, name)| {
                (
                    key.to_string(),
                    StationRecord {
                        name: name.to_string(),
                    },
                )
            })
            .collect()
    }

    fn names(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn build_sorts_by_name() {
        let directory: StationDirectory = serde_json::from_str(STATIONS_JSON).unwrap();
        let stations = build_stations(directory);

        assert_eq!(
            names(&stations),
            [
                "14 St - Union Sq",
                "96 St",
                "astoria Blvd",
                "Fulton St",
                "Times Sq - 42 St"
            ]
        );
    }

    #[test]
    fn build_converts_keys_to_ids() {
        let stations = build_stations(directory(&[("127", "Times Sq - 42 St"), ("7", "B")]));
        let times_sq = stations.iter().find(|s| s.name == "Times Sq - 42 St").unwrap();
        assert_eq!(times_sq.id, StationId::new(127));
    }

    #[test]
    fn build_skips_invalid_keys() {
        let stations = build_stations(directory(&[("A32", "Bad"), ("", "Empty"), ("5", "Good")]));
        assert_eq!(names(&stations), ["Good"]);
    }

    #[test]
    fn build_keeps_first_duplicate_id() {
        let stations = build_stations(directory(&[("01", "First"), ("1", "Second")]));
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "First");
        assert_eq!(stations[0].id, StationId::new(1));
    }

    #[test]
    fn find_by_name_is_exact() {
        let catalog = StationCatalog::from_stations(vec![
            Station::new(StationId::new(1), "Canal St"),
            Station::new(StationId::new(2), "Spring St"),
        ]);

        assert_eq!(catalog.find_by_name("Canal St").unwrap().id, StationId::new(1));
        assert!(catalog.find_by_name("canal st").is_none());
        assert!(catalog.find_by_name("Canal").is_none());
        assert!(catalog.find_by_name("").is_none());
    }

    #[test]
    fn find_by_name_rejects_ambiguous() {
        let catalog = StationCatalog::from_stations(vec![
            Station::new(StationId::new(1), "Canal St"),
            Station::new(StationId::new(2), "Canal St"),
            Station::new(StationId::new(3), "Houston St"),
        ]);

        assert!(catalog.find_by_name("Canal St").is_none());
        assert!(catalog.find_by_name("Houston St").is_some());
    }

    #[tokio::test]
    async fn load_replaces_list() {
        let catalog = StationCatalog::from_stations(vec![Station::new(StationId::new(9), "Old")]);
        let source = FixedSource(Ok(directory(&[("2", "B"), ("1", "A")])));

        let count = catalog.load(&source).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(names(&catalog.stations()), ["A", "B"]);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_list() {
        let catalog = StationCatalog::from_stations(vec![Station::new(StationId::new(9), "Old")]);

        let result = catalog.load(&FixedSource(Err(500))).await;

        assert!(matches!(result, Err(CatalogError::Api { status: 500, .. })));
        assert_eq!(names(&catalog.stations()), ["Old"]);
    }

    #[tokio::test]
    async fn failed_first_load_stays_empty() {
        let catalog = StationCatalog::new();
        assert!(catalog.load(&FixedSource(Err(404))).await.is_err());
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[tokio::test]
    async fn clones_share_the_list() {
        let catalog = StationCatalog::new();
        let view = catalog.clone();

        catalog
            .load(&FixedSource(Ok(directory(&[("1", "A")]))))
            .await
            .unwrap();

        assert_eq!(view.len(), 1);
    }
}
