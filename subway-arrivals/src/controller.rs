//! Station selection to displayed arrivals.
//!
//! The controller owns one [`ArrivalsState`] and moves it through
//! `Idle -> Loading -> Loaded | Failed`. A new selection from any state goes
//! back to `Loading`.
//!
//! Every accepted selection gets a generation number. A fetch result is only
//! applied if its generation is still the latest, and an in-flight fetch is
//! dropped as soon as a newer selection is made. The last selection always
//! wins, whatever order the responses come back in.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::arrivals::{ArrivalsError, ArrivalsSource};
use crate::catalog::StationCatalog;
use crate::domain::{Arrivals, Direction, Station};

/// Where the arrivals pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalsStatus {
    /// No station selected yet
    Idle,
    /// Fetch outstanding for the selected station
    Loading,
    /// Arrivals fetched for the selected station
    Loaded,
    /// Fetch for the selected station failed
    Failed,
}

/// Snapshot of the arrivals pipeline.
///
/// `north` and `south` are only ever non-empty while `status` is `Loaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalsState {
    pub status: ArrivalsStatus,
    pub station: Option<Station>,
    pub north: Vec<String>,
    pub south: Vec<String>,
}

impl ArrivalsState {
    /// Nothing selected.
    pub fn idle() -> Self {
        Self {
            status: ArrivalsStatus::Idle,
            station: None,
            north: Vec::new(),
            south: Vec::new(),
        }
    }

    fn loading(station: Station) -> Self {
        Self {
            status: ArrivalsStatus::Loading,
            station: Some(station),
            north: Vec::new(),
            south: Vec::new(),
        }
    }

    fn loaded(station: Station, arrivals: Arrivals) -> Self {
        Self {
            status: ArrivalsStatus::Loaded,
            station: Some(station),
            north: arrivals.north,
            south: arrivals.south,
        }
    }

    fn failed(station: Station) -> Self {
        Self {
            status: ArrivalsStatus::Failed,
            station: Some(station),
            north: Vec::new(),
            south: Vec::new(),
        }
    }

    /// Whether the loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        self.status == ArrivalsStatus::Loading
    }

    /// Timestamps for one direction.
    pub fn times(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
        }
    }
}

impl Default for ArrivalsState {
    fn default() -> Self {
        Self::idle()
    }
}

/// An accepted selection, used to match a fetch result to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    generation: u64,
    station: Station,
}

impl Selection {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn station(&self) -> &Station {
        &self.station
    }
}

/// What happened to a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result is now the displayed state
    Applied,
    /// A newer selection was made; the result was dropped
    Superseded,
}

/// Drives [`ArrivalsState`] in response to station selections.
pub struct ArrivalsController<S> {
    catalog: StationCatalog,
    source: S,
    state: Mutex<ArrivalsState>,
    generation: watch::Sender<u64>,
}

impl<S: ArrivalsSource> ArrivalsController<S> {
    /// Create an idle controller over a catalog and an arrivals source.
    pub fn new(catalog: StationCatalog, source: S) -> Self {
        let (generation, _) = watch::channel(0);

        Self {
            catalog,
            source,
            state: Mutex::new(ArrivalsState::idle()),
            generation,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ArrivalsState {
        self.lock_state().clone()
    }

    /// Accept a selection by station name.
    ///
    /// If the name matches exactly one station, the state moves to
    /// `Loading` with both lists cleared and a ticket for
    /// [`fetch_arrivals`](Self::fetch_arrivals) is returned. Otherwise
    /// nothing changes and `None` is returned.
    pub fn select_station(&self, name: &str) -> Option<Selection> {
        let Some(station) = self.catalog.find_by_name(name) else {
            debug!(name, "ignoring selection of unknown station");
            return None;
        };

        let mut state = self.lock_state();

        let mut generation = 0;
        self.generation.send_modify(|current| {
            *current += 1;
            generation = *current;
        });

        *state = ArrivalsState::loading(station.clone());
        info!(station = %station.name, id = %station.id, generation, "station selected");

        Some(Selection {
            generation,
            station,
        })
    }

    /// Fetch arrivals for an accepted selection and apply the result.
    ///
    /// The request is abandoned as soon as a newer selection is made.
    pub async fn fetch_arrivals(&self, selection: &Selection) -> FetchOutcome {
        let mut generations = self.generation.subscribe();
        let current = *generations.borrow();
        if current != selection.generation {
            return FetchOutcome::Superseded;
        }

        let result = tokio::select! {
            result = self.source.fetch_arrivals(selection.station.id) => result,
            () = superseded(&mut generations, selection.generation) => {
                debug!(
                    station = %selection.station.name,
                    generation = selection.generation,
                    "abandoning superseded arrivals fetch"
                );
                return FetchOutcome::Superseded;
            }
        };

        self.complete(selection, result)
    }

    /// Apply a finished fetch, unless a newer selection has been made since.
    pub fn complete(
        &self,
        selection: &Selection,
        result: Result<Arrivals, ArrivalsError>,
    ) -> FetchOutcome {
        let mut state = self.lock_state();

        let current = *self.generation.borrow();
        if current != selection.generation {
            debug!(
                station = %selection.station.name,
                generation = selection.generation,
                current,
                "dropping stale arrivals"
            );
            return FetchOutcome::Superseded;
        }

        let station = selection.station.clone();
        *state = match result {
            Ok(arrivals) => {
                debug!(
                    station = %station.name,
                    north = arrivals.north.len(),
                    south = arrivals.south.len(),
                    empty = arrivals.is_empty(),
                    "arrivals loaded"
                );
                ArrivalsState::loaded(station, arrivals)
            }
            Err(e) => {
                warn!(station = %station.name, id = %station.id, error = %e, "failed to fetch arrivals");
                ArrivalsState::failed(station)
            }
        };

        FetchOutcome::Applied
    }

    /// Select a station by name and fetch its arrivals.
    ///
    /// Returns `None` if the name did not resolve to a station.
    pub async fn select_and_fetch(&self, name: &str) -> Option<FetchOutcome> {
        let selection = self.select_station(name)?;
        Some(self.fetch_arrivals(&selection).await)
    }

    fn lock_state(&self) -> MutexGuard<'_, ArrivalsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves once the latest generation differs from `generation`.
async fn superseded(generations: &mut watch::Receiver<u64>, generation: u64) {
    let closed = generations
        .wait_for(|current| *current != generation)
        .await
        .is_err();

    if closed {
        // The sender lives as long as the controller, so this never ends.
        std::future::pending::<()>().await;
    }
}
