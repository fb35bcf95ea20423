//! Explicit load state for region datasets.
//!
//! `Unloaded → Loading → Ready | Failed`. Queries are answered only in `Ready`;
//! every other state reads as "no regions available". A failed slot may be
//! retried (`Failed → Loading`).

use std::fmt;
use std::sync::Arc;

use crate::proj::GeoPoint;

use super::contain::find_containing_region;
use super::load::{load_with_report, LoadCfg, LoadError, RegionSource};
use super::types::RegionCollection;

/// Load state of a single dataset.
#[derive(Clone, Debug, Default)]
pub enum DatasetState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<RegionCollection>),
    Failed(LoadError),
}

impl DatasetState {
    fn label(&self) -> &'static str {
        match self {
            DatasetState::Unloaded => "unloaded",
            DatasetState::Loading => "loading",
            DatasetState::Ready(_) => "ready",
            DatasetState::Failed(_) => "failed",
        }
    }
}

/// Rejected state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateError {
    pub from: &'static str,
    pub to: &'static str,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal dataset transition {} → {}", self.from, self.to)
    }
}

impl std::error::Error for StateError {}

/// One named dataset and its load state.
#[derive(Clone, Debug)]
pub struct DatasetSlot {
    pub source_id: String,
    state: DatasetState,
}

impl DatasetSlot {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            state: DatasetState::Unloaded,
        }
    }

    #[inline]
    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, DatasetState::Ready(_))
    }

    /// `Unloaded | Failed → Loading`.
    pub fn begin_load(&mut self) -> Result<(), StateError> {
        match self.state {
            DatasetState::Unloaded | DatasetState::Failed(_) => {
                self.state = DatasetState::Loading;
                Ok(())
            }
            _ => Err(StateError {
                from: self.state.label(),
                to: "loading",
            }),
        }
    }

    /// `Loading → Ready | Failed`, depending on `outcome`.
    pub fn complete(
        &mut self,
        outcome: Result<RegionCollection, LoadError>,
    ) -> Result<(), StateError> {
        if !matches!(self.state, DatasetState::Loading) {
            let to = if outcome.is_ok() { "ready" } else { "failed" };
            return Err(StateError {
                from: self.state.label(),
                to,
            });
        }
        self.state = match outcome {
            Ok(collection) => DatasetState::Ready(Arc::new(collection)),
            Err(err) => DatasetState::Failed(err),
        };
        Ok(())
    }

    /// Shared handle to the collection, if `Ready`.
    pub fn collection(&self) -> Option<Arc<RegionCollection>> {
        match &self.state {
            DatasetState::Ready(c) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    /// Containment query; `None` both for "no match" and "not ready".
    pub fn find(&self, q: GeoPoint) -> Option<&str> {
        match &self.state {
            DatasetState::Ready(c) => find_containing_region(c, q),
            _ => None,
        }
    }
}

/// Insertion-ordered set of named datasets.
#[derive(Clone, Debug, Default)]
pub struct Atlas {
    slots: Vec<DatasetSlot>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, source_id: &str) -> Option<&DatasetSlot> {
        self.slots.iter().find(|s| s.source_id == source_id)
    }

    pub fn slots(&self) -> &[DatasetSlot] {
        &self.slots
    }

    fn slot_mut_or_insert(&mut self, source_id: &str) -> &mut DatasetSlot {
        let idx = match self.slots.iter().position(|s| s.source_id == source_id) {
            Some(i) => i,
            None => {
                self.slots.push(DatasetSlot::new(source_id));
                self.slots.len() - 1
            }
        };
        &mut self.slots[idx]
    }

    /// Fetch, parse and install a dataset, returning the skipped feature indices.
    ///
    /// The load failure is both stored in the slot and returned; the caller decides
    /// whether to retry or carry on with the dataset absent.
    pub fn load(
        &mut self,
        source: &dyn RegionSource,
        source_id: &str,
        cfg: &LoadCfg,
    ) -> Result<Result<Vec<usize>, LoadError>, StateError> {
        let slot = self.slot_mut_or_insert(source_id);
        slot.begin_load()?;
        let (outcome, result) = match load_with_report(source, source_id, cfg) {
            Ok(report) => (Ok(report.collection), Ok(report.skipped)),
            Err(err) => (Err(err.clone()), Err(err)),
        };
        slot.complete(outcome)?;
        Ok(result)
    }

    /// Query a single dataset by identifier.
    pub fn find(&self, source_id: &str, q: GeoPoint) -> Option<&str> {
        self.slot(source_id)?.find(q)
    }

    /// Query every ready dataset in insertion order; first match wins.
    pub fn find_any(&self, q: GeoPoint) -> Option<(&str, &str)> {
        self.slots
            .iter()
            .find_map(|s| s.find(q).map(|name| (s.source_id.as_str(), name)))
    }
}
