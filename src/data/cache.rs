//! Process-lifetime cache for normalized observation tables.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{ObservationRequest, ObservationTable};

/// Cache keyed by the full request tuple (series, window, frequency, units).
///
/// Entries live until the process exits; the upstream data is append-only or
/// slowly revised, and staleness within one interactive session is accepted.
/// Concurrent callers may race to populate the same key; the later `put`
/// overwrites with an identical table, so no coordination beyond the inner
/// lock is needed.
#[derive(Debug, Default)]
pub struct ObservationCache {
    inner: Mutex<HashMap<ObservationRequest, ObservationTable>>,
}

impl ObservationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, request: &ObservationRequest) -> Option<ObservationTable> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(request).cloned()
    }

    pub fn put(&self, request: ObservationRequest, table: ObservationTable) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(request, table);
    }

    pub fn len(&self) -> usize {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
