//! Viewer state as an immutable value with pure transitions.
//!
//! [`ViewerState`] holds everything the view depends on: the loaded
//! records, the filter, the sort directive, the selected record and the
//! transient copy acknowledgment. Each transition consumes the state and
//! returns the next one; the record list itself is shared behind an `Arc`
//! and only ever replaced wholesale.
//!
//! The visible list is re-derived from `(records, filter, sort)` by
//! [`ViewerState::view`]; [`ViewCache`] memoises it on those inputs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::ingest::{Diagnostic, IngestOutcome};
use crate::core::log_record::LogRecord;
use crate::core::query::{self, FilterKey, FilterState, SortDirective};
use crate::util::constants::COPY_ACK_SECS;
use crate::util::error::Result;

/// Complete state of the log viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    records: Arc<Vec<LogRecord>>,
    /// Bumped on every load so caches can tell record lists apart.
    generation: u64,
    source_name: Option<String>,
    filter: FilterState,
    sort: SortDirective,
    /// Index into `records` (not into the view).
    selected: Option<usize>,
    copy_ack: Option<Instant>,
}

/// Inputs that determine the derived view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewKey {
    pub generation: u64,
    pub filter: FilterKey,
    pub sort: SortDirective,
}

impl ViewerState {
    // ── Accessors ───────────────────────────────────────────────

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// File name of the loaded file, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    /// Index of the selected record within [`ViewerState::records`].
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&LogRecord> {
        self.records.get(self.selected?)
    }

    /// Whether the "Copied!" acknowledgment should be shown at `now`.
    pub fn copy_ack_visible(&self, now: Instant) -> bool {
        self.copy_ack
            .is_some_and(|at| now.saturating_duration_since(at) < copy_ack_duration())
    }

    /// When the acknowledgment expires, if one is showing.
    pub fn copy_ack_deadline(&self) -> Option<Instant> {
        self.copy_ack.map(|at| at + copy_ack_duration())
    }

    // ── Transitions ─────────────────────────────────────────────

    /// Replace the record list with a freshly loaded one.
    ///
    /// Filter and sort carry over; the selection is cleared because it
    /// referred to the previous list.
    #[must_use]
    pub fn loaded(self, source_name: impl Into<String>, records: Vec<LogRecord>) -> Self {
        Self {
            records: Arc::new(records),
            generation: self.generation.wrapping_add(1),
            source_name: Some(source_name.into()),
            selected: None,
            ..self
        }
    }

    /// Apply the result of loading `source_name`.
    ///
    /// On success the records are replaced (see [`ViewerState::loaded`]) and
    /// the dropped-unit diagnostics are handed back. On failure the state is
    /// returned untouched along with the error, so the previous list stays
    /// on screen.
    pub fn apply_load(
        self,
        source_name: &str,
        result: Result<IngestOutcome>,
    ) -> (Self, Result<Vec<Diagnostic>>) {
        match result {
            Ok(outcome) => (
                self.loaded(source_name, outcome.records),
                Ok(outcome.diagnostics),
            ),
            Err(e) => (self, Err(e)),
        }
    }

    #[must_use]
    pub fn with_filter(self, filter: FilterState) -> Self {
        Self { filter, ..self }
    }

    #[must_use]
    pub fn with_sort(self, sort: SortDirective) -> Self {
        Self { sort, ..self }
    }

    /// Apply a column-header click: same key flips, new key ascends.
    #[must_use]
    pub fn with_sort_toggled(self, key: &str) -> Self {
        let sort = self.sort.toggled(key);
        self.with_sort(sort)
    }

    /// Select the record at `index`; out-of-range indices are ignored.
    #[must_use]
    pub fn selected(self, index: usize) -> Self {
        if index < self.records.len() {
            Self {
                selected: Some(index),
                ..self
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn cleared_selection(self) -> Self {
        Self {
            selected: None,
            ..self
        }
    }

    /// Record a successful copy at `now`.
    #[must_use]
    pub fn with_copy_ack(self, now: Instant) -> Self {
        Self {
            copy_ack: Some(now),
            ..self
        }
    }

    /// Drop the acknowledgment once its display time has passed.
    #[must_use]
    pub fn expire_copy_ack(self, now: Instant) -> Self {
        if self.copy_ack.is_some() && !self.copy_ack_visible(now) {
            Self {
                copy_ack: None,
                ..self
            }
        } else {
            self
        }
    }

    // ── Derived view ────────────────────────────────────────────

    /// Indices of the visible records, filtered and sorted.
    pub fn view(&self) -> Vec<usize> {
        query::derive_view(&self.records, &self.filter, &self.sort)
    }

    pub fn view_key(&self) -> ViewKey {
        ViewKey {
            generation: self.generation,
            filter: self.filter.key(),
            sort: self.sort.clone(),
        }
    }
}

fn copy_ack_duration() -> Duration {
    Duration::from_secs(COPY_ACK_SECS)
}

/// Memoised view: recomputed only when the records, filter or sort change.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<ViewKey>,
    view: Vec<usize>,
}

impl ViewCache {
    /// Return the view for `state`, recomputing it if its inputs changed.
    pub fn get(&mut self, state: &ViewerState) -> &[usize] {
        let key = state.view_key();
        if self.key.as_ref() != Some(&key) {
            self.view = state.view();
            self.key = Some(key);
        }
        &self.view
    }

    /// The most recently computed view, without checking freshness.
    pub fn current(&self) -> &[usize] {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::SortDirection;
    use crate::util::error::LogSleuthError;
    use serde_json::{json, Value};

    fn rec(value: Value) -> LogRecord {
        match value {
            Value::Object(map) => LogRecord::from_object(map),
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn sample() -> ViewerState {
        ViewerState::default().loaded(
            "a.log",
            vec![
                rec(json!({"level": "ERROR", "message": "boom"})),
                rec(json!({"level": "INFO", "message": "fine"})),
            ],
        )
    }

    #[test]
    fn test_initial_state_is_empty_and_unsorted() {
        let s = ViewerState::default();
        assert!(s.records().is_empty());
        assert_eq!(s.sort().key, None);
        assert_eq!(s.sort().direction, SortDirection::Ascending);
        assert!(s.view().is_empty());
    }

    #[test]
    fn test_load_replaces_records_and_clears_selection() {
        let s = sample().selected(1);
        assert_eq!(s.selected_record().unwrap().message_text(), "fine");
        let gen = s.generation();
        let s = s.loaded("b.log", vec![rec(json!({"message": "new"}))]);
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.selected_index(), None);
        assert_eq!(s.source_name(), Some("b.log"));
        assert_ne!(s.generation(), gen);
    }

    #[test]
    fn test_failed_load_keeps_previous_records() {
        let s = sample().selected(0);
        let gen = s.generation();
        let err = crate::core::ingest::ingest("broken.json", "{\"level\": ").unwrap_err();

        let (s, result) = s.apply_load("broken.json", Err(err));
        assert!(matches!(result, Err(LogSleuthError::MalformedJson(_))));
        assert_eq!(s.records().len(), 2);
        assert_eq!(s.generation(), gen);
        assert_eq!(s.source_name(), Some("a.log"));
        assert_eq!(s.selected_index(), Some(0));
    }

    #[test]
    fn test_successful_load_replaces_records_and_returns_diagnostics() {
        let s = sample();
        let gen = s.generation();
        let outcome = crate::core::ingest::ingest("b.log", "{\"message\":\"new\"}\n{oops\n");

        let (s, result) = s.apply_load("b.log", outcome);
        let diagnostics = result.unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, Some(2));
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.records()[0].message_text(), "new");
        assert_ne!(s.generation(), gen);
    }

    #[test]
    fn test_load_keeps_filter_and_sort() {
        let s = sample()
            .with_filter(FilterState::new("boom"))
            .with_sort_toggled("level");
        let s = s.loaded("b.log", vec![rec(json!({"message": "boom again"}))]);
        assert_eq!(s.filter().text_search, "boom");
        assert_eq!(s.sort().key.as_deref(), Some("level"));
        assert_eq!(s.view(), vec![0]);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let s = sample().selected(5);
        assert_eq!(s.selected_index(), None);
        let s = s.selected(0).cleared_selection();
        assert_eq!(s.selected_index(), None);
    }

    #[test]
    fn test_copy_ack_expires_after_two_seconds() {
        let t0 = Instant::now();
        let s = sample().with_copy_ack(t0);
        assert!(s.copy_ack_visible(t0 + Duration::from_millis(1999)));
        assert!(!s.copy_ack_visible(t0 + Duration::from_secs(2)));

        let s = s.expire_copy_ack(t0 + Duration::from_secs(1));
        assert!(s.copy_ack_deadline().is_some());
        let s = s.expire_copy_ack(t0 + Duration::from_secs(3));
        assert!(s.copy_ack_deadline().is_none());
    }

    #[test]
    fn test_view_cache_tracks_inputs() {
        let mut cache = ViewCache::default();
        let s = sample();
        assert_eq!(cache.get(&s), &[0, 1]);

        let s = s.with_filter(FilterState::new("info"));
        assert_eq!(cache.get(&s), &[1]);

        let s = s.with_filter(FilterState::default()).with_sort_toggled("level");
        assert_eq!(cache.get(&s), &[0, 1]);
        let s = s.with_sort_toggled("level");
        assert_eq!(cache.get(&s), &[1, 0]);
        assert_eq!(cache.current(), &[1, 0]);
    }
}
