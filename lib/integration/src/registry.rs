//! Client-side mirror of the member's integrations.
//!
//! The registry never patches itself after a write. It is only ever replaced
//! wholesale with a full list fetched from the server.

use crate::record::Integration;
use peakwave_core::IntegrationId;

/// Ordered list of integrations in server response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationRegistry {
    items: Vec<Integration>,
    loaded: bool,
}

impl IntegrationRegistry {
    /// Creates an empty, never-loaded registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole sequence with a freshly fetched list.
    pub fn replace(&mut self, items: Vec<Integration>) {
        self.items = items;
        self.loaded = true;
    }

    /// Drops every record, e.g. on logout.
    pub fn clear(&mut self) {
        self.items.clear();
        self.loaded = false;
    }

    /// Returns true once a list has been fetched.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns all integrations.
    #[must_use]
    pub fn all(&self) -> &[Integration] {
        &self.items
    }

    /// Returns the number of integrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no integrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an integration by ID.
    #[must_use]
    pub fn get(&self, id: IntegrationId) -> Option<&Integration> {
        self.items.iter().find(|integration| integration.id == id)
    }

    /// Returns active integrations in list order.
    pub fn active(&self) -> impl Iterator<Item = &Integration> {
        self.items.iter().filter(|integration| integration.is_active)
    }

    /// Returns the number of active integrations.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

/// Aggregate result of testing every active integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSummary {
    /// Tests the server reported as passing.
    pub success_count: usize,
    /// Tests that failed for any reason.
    pub fail_count: usize,
}

impl TestSummary {
    /// Records one outcome.
    pub fn record(&mut self, passed: bool) {
        if passed {
            self.success_count += 1;
        } else {
            self.fail_count += 1;
        }
    }

    /// Returns the number of tests run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.fail_count
    }

    /// Returns true if every test passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.fail_count == 0
    }
}
