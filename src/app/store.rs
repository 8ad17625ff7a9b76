//! View state store: the mirrored vehicle list, the creation draft, and the
//! status filter.
//!
//! The store never edits a vehicle. [`ViewStore::set_vehicles`] is the only
//! write path for the list, and the handler only calls it with the result of a
//! successful list fetch, so the held list is always either empty or a verbatim
//! snapshot of the latest fetch that resolved.

use crate::domain::{Draft, DraftPatch, StatusFilter, Vehicle};

/// Local state created on mount and dropped on unmount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStore {
    vehicles: Vec<Vehicle>,
    draft: Draft,
    filter: StatusFilter,
}

impl ViewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held list wholesale.
    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) {
        tracing::debug!(
            previous = self.vehicles.len(),
            current = vehicles.len(),
            "vehicle list replaced"
        );
        self.vehicles = vehicles;
    }

    /// Shallow-merges `patch` into the draft; absent fields keep their value.
    pub fn update_draft(&mut self, patch: DraftPatch) {
        if let Some(name) = patch.name {
            self.draft.name = name;
        }
        if let Some(status) = patch.status {
            self.draft.status = status;
        }
    }

    /// Resets the draft to an empty name with status `Inactive`.
    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Vehicles passing the active filter, in fetch order.
    ///
    /// Computed on every call; nothing is cached between list or filter
    /// changes.
    #[must_use]
    pub fn filtered_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| self.filter.matches(v)).collect()
    }

    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }
}
