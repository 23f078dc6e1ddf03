//! In-memory filtering and sorting of loaded records.
//!
//! [`derive_view`] is the whole query engine: a pure function of the record
//! list, the [`FilterState`] and the [`SortDirective`], returning indices
//! into the record list in display order. It has no hidden state, so the
//! caller may memoise it on those three inputs.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::core::log_record::{value_text, LogRecord};

// ── Filter ──────────────────────────────────────────────────────────────

/// Holds the active free-text filter.
///
/// An empty search matches every record. Matching is a case-insensitive
/// substring test against each top-level field value by default.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Free-form text search, as typed.
    pub text_search: String,

    /// Pre-computed lowercase version of `text_search`. Updated by
    /// [`FilterState::update_search_cache`].
    pub text_search_lower: String,

    /// Whether text search is case-sensitive.
    pub case_sensitive: bool,

    /// Interpret `text_search` as a regular expression.
    pub use_regex: bool,

    /// Compiled pattern when `use_regex` is set and the pattern is valid.
    pub compiled_regex: Option<Regex>,
}

/// The user-visible inputs of a [`FilterState`], comparable for memoisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub text_search: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
}

impl FilterState {
    /// A case-insensitive substring filter for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let mut state = Self {
            text_search: text.into(),
            ..Self::default()
        };
        state.update_search_cache();
        state
    }

    /// Refresh the derived caches after modifying the search inputs.
    ///
    /// An invalid regex leaves `compiled_regex` empty, which matches nothing.
    pub fn update_search_cache(&mut self) {
        self.text_search_lower = self.text_search.to_lowercase();
        self.compiled_regex = if self.use_regex && !self.text_search.is_empty() {
            match RegexBuilder::new(&self.text_search)
                .case_insensitive(!self.case_sensitive)
                .build()
            {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::debug!("Invalid search pattern {:?}: {}", self.text_search, e);
                    None
                }
            }
        } else {
            None
        };
    }

    /// `true` if a regex search is requested but the pattern does not compile.
    pub fn has_invalid_regex(&self) -> bool {
        self.use_regex && !self.text_search.is_empty() && self.compiled_regex.is_none()
    }

    /// Test whether at least one top-level field value of `record` matches.
    ///
    /// Nested objects and arrays are compared through their compact JSON
    /// text; top-level field names are not searched.
    pub fn matches(&self, record: &LogRecord) -> bool {
        if self.text_search.is_empty() {
            return true;
        }

        let texts = record.fields.values().map(value_text);
        if self.use_regex {
            return match &self.compiled_regex {
                Some(re) => texts.into_iter().any(|t| re.is_match(&t)),
                None => false,
            };
        }

        if self.case_sensitive {
            let q = self.text_search.as_str();
            texts.into_iter().any(|t| t.contains(q))
        } else {
            let q = self.text_search_lower.as_str();
            texts.into_iter().any(|t| t.to_lowercase().contains(q))
        }
    }

    /// Byte ranges of `text` that the search matches, for highlighting.
    ///
    /// Ranges are non-overlapping, in order, and always fall on char
    /// boundaries of `text`.
    pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
        if self.text_search.is_empty() {
            return Vec::new();
        }
        if self.use_regex {
            return match &self.compiled_regex {
                Some(re) => re
                    .find_iter(text)
                    .filter(|m| !m.is_empty())
                    .map(|m| m.range())
                    .collect(),
                None => Vec::new(),
            };
        }
        if self.case_sensitive {
            return text
                .match_indices(self.text_search.as_str())
                .map(|(start, s)| start..start + s.len())
                .collect();
        }

        // Lowercasing can change byte lengths (e.g. U+0130), so map each
        // byte of the lowered text back to its source char.
        let mut lowered = String::with_capacity(text.len());
        let mut low_to_orig: Vec<usize> = Vec::with_capacity(text.len() + 1);
        for (orig_pos, ch) in text.char_indices() {
            for lc in ch.to_lowercase() {
                low_to_orig.extend(std::iter::repeat(orig_pos).take(lc.len_utf8()));
                lowered.push(lc);
            }
        }
        low_to_orig.push(text.len());

        let mut ranges: Vec<Range<usize>> = Vec::new();
        for (start, s) in lowered.match_indices(self.text_search_lower.as_str()) {
            let orig_start = low_to_orig[start];
            // Widen to the whole source char holding the last matched byte.
            let last = low_to_orig[start + s.len() - 1];
            let orig_end = last + text[last..].chars().next().map_or(0, char::len_utf8);
            match ranges.last_mut() {
                Some(last) if last.end > orig_start => last.end = last.end.max(orig_end),
                _ => ranges.push(orig_start..orig_end),
            }
        }
        ranges
    }

    /// Returns `true` if the filter is in its default (pass-all) state.
    pub fn is_empty(&self) -> bool {
        self.text_search.is_empty()
    }

    pub fn key(&self) -> FilterKey {
        FilterKey {
            text_search: self.text_search.clone(),
            case_sensitive: self.case_sensitive,
            use_regex: self.use_regex,
        }
    }
}

// ── Sort ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow for this direction.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25B2}",
            SortDirection::Descending => "\u{25BC}",
        }
    }
}

/// Which field the view is sorted by, and in which direction.
///
/// The default has no key: records keep their filtered (input) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SortDirective {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// The directive after the user selects `key`.
    ///
    /// Selecting the current key flips the direction; any other key starts
    /// ascending.
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        match &self.key {
            Some(current) if current == key => Self {
                key: self.key.clone(),
                direction: self.direction.reversed(),
            },
            _ => Self::new(key, SortDirection::Ascending),
        }
    }

    /// The direction if the view is sorted by `key`.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match &self.key {
            Some(current) if current == key => Some(self.direction),
            _ => None,
        }
    }
}

/// Total order over JSON values of any type.
///
/// Values rank by type first (null, bool, number, string, array, object).
/// Within a type: numbers compare numerically, strings by bytes, arrays
/// element-wise, objects as sequences of `(key, value)` pairs in key order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ord = compare_values(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            let mut xs: Vec<_> = x.iter().collect();
            let mut ys: Vec<_> = y.iter().collect();
            xs.sort_by(|l, r| l.0.cmp(r.0));
            ys.sort_by(|l, r| l.0.cmp(r.0));
            for ((lk, lv), (rk, rv)) in xs.iter().zip(&ys) {
                let ord = lk.cmp(rk).then_with(|| compare_values(lv, rv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Compare two possibly-missing sort values.
///
/// Missing values sort after present ones in both directions; only the
/// order among present values is reversed for [`SortDirection::Descending`].
pub fn compare_sort_values(
    a: Option<&Value>,
    b: Option<&Value>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ── View derivation ─────────────────────────────────────────────────────

/// Filter then sort `records`, returning indices in display order.
pub fn derive_view(records: &[LogRecord], filter: &FilterState, sort: &SortDirective) -> Vec<usize> {
    let mut view: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(i, _)| i)
        .collect();
    sort_view(&mut view, records, sort);
    view
}

/// Sort `view` (indices into `records`) by the directive.
///
/// The sort is stable: records with equal keys keep their relative order.
pub fn sort_view(view: &mut Vec<usize>, records: &[LogRecord], sort: &SortDirective) {
    let Some(key) = sort.key.as_deref() else {
        return;
    };

    // Resolve each key once rather than on every comparison.
    let mut keyed: Vec<(usize, Option<Cow<'_, Value>>)> = view
        .iter()
        .map(|&i| (i, records[i].sort_value(key)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_sort_values(a.as_deref(), b.as_deref(), sort.direction));

    view.clear();
    view.extend(keyed.into_iter().map(|(i, _)| i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> LogRecord {
        match value {
            Value::Object(map) => LogRecord::from_object(map),
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn levels(records: &[LogRecord], view: &[usize]) -> Vec<String> {
        view.iter().map(|&i| records[i].level_text().to_string()).collect()
    }

    #[test]
    fn test_default_matches_all() {
        let f = FilterState::default();
        assert!(f.matches(&rec(json!({"level": "INFO"}))));
        assert!(f.matches(&rec(json!({}))));
    }

    #[test]
    fn test_text_search_case_insensitive() {
        let f = FilterState::new("error");
        assert!(f.matches(&rec(json!({"level": "ERROR"}))));
        assert!(!f.matches(&rec(json!({"level": "INFO"}))));
    }

    #[test]
    fn test_text_search_case_sensitive() {
        let mut f = FilterState::new("error");
        f.case_sensitive = true;
        f.update_search_cache();
        assert!(!f.matches(&rec(json!({"level": "ERROR"}))));
        assert!(f.matches(&rec(json!({"message": "an error"}))));
    }

    #[test]
    fn test_search_reaches_nested_values_not_keys() {
        let f = FilterState::new("userid");
        assert!(!f.matches(&rec(json!({"UserId": 5}))));
        assert!(f.matches(&rec(json!({"Properties": {"UserId": 5}}))));
        let f = FilterState::new("42");
        assert!(f.matches(&rec(json!({"instant": {"epochSecond": 1420}}))));
    }

    #[test]
    fn test_regex_search() {
        let mut f = FilterState::new(r"crash(ed|ing)");
        f.use_regex = true;
        f.update_search_cache();
        assert!(f.matches(&rec(json!({"message": "App CRASHED"}))));
        assert!(!f.matches(&rec(json!({"message": "App is running"}))));
    }

    #[test]
    fn test_regex_invalid_pattern_matches_nothing() {
        let mut f = FilterState::new("[invalid(");
        f.use_regex = true;
        f.update_search_cache();
        assert!(f.has_invalid_regex());
        assert!(!f.matches(&rec(json!({"message": "anything"}))));
    }

    #[test]
    fn test_match_ranges_case_insensitive() {
        let f = FilterState::new("err");
        assert_eq!(f.match_ranges("ERROR: err"), vec![0..3, 7..10]);
        assert!(FilterState::default().match_ranges("anything").is_empty());
    }

    #[test]
    fn test_match_ranges_map_back_through_lowercasing() {
        // U+0130 lowercases to two chars (three bytes) from a two-byte source.
        let f = FilterState::new("x");
        let text = "\u{130}x";
        assert_eq!(f.match_ranges(text), vec![2..3]);
        assert_eq!(&text[2..3], "x");
    }

    #[test]
    fn test_match_ranges_regex() {
        let mut f = FilterState::new(r"\d+");
        f.use_regex = true;
        f.update_search_cache();
        assert_eq!(f.match_ranges("a12b3"), vec![1..3, 4..5]);
    }

    #[test]
    fn test_toggle_same_key_flips_direction() {
        let s = SortDirective::default().toggled("level");
        assert_eq!(s, SortDirective::new("level", SortDirection::Ascending));
        let s = s.toggled("level");
        assert_eq!(s.direction, SortDirection::Descending);
        let s = s.toggled("thread");
        assert_eq!(s, SortDirective::new("thread", SortDirection::Ascending));
    }

    #[test]
    fn test_no_key_keeps_input_order() {
        let records = vec![
            rec(json!({"level": "b"})),
            rec(json!({"level": "a"})),
            rec(json!({"level": "c"})),
        ];
        let view = derive_view(&records, &FilterState::default(), &SortDirective::default());
        assert_eq!(view, vec![0, 1, 2]);
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let records = vec![
            rec(json!({"n": 10})),
            rec(json!({"n": 9})),
            rec(json!({"n": 100.5})),
        ];
        let sort = SortDirective::new("n", SortDirection::Ascending);
        assert_eq!(derive_view(&records, &FilterState::default(), &sort), vec![1, 0, 2]);
    }

    #[test]
    fn test_missing_values_sort_last_both_directions() {
        let records = vec![
            rec(json!({"message": "x"})),
            rec(json!({"level": "B"})),
            rec(json!({"level": "A"})),
        ];
        let f = FilterState::default();
        let asc = derive_view(&records, &f, &SortDirective::new("level", SortDirection::Ascending));
        assert_eq!(asc, vec![2, 1, 0]);
        let desc = derive_view(&records, &f, &SortDirective::new("level", SortDirection::Descending));
        assert_eq!(desc, vec![1, 2, 0]);
    }

    #[test]
    fn test_equal_keys_are_stable() {
        let records = vec![
            rec(json!({"level": "INFO", "message": "1"})),
            rec(json!({"level": "ERROR", "message": "2"})),
            rec(json!({"level": "INFO", "message": "3"})),
        ];
        let f = FilterState::default();
        let view = derive_view(&records, &f, &SortDirective::new("level", SortDirection::Descending));
        assert_eq!(view, vec![0, 2, 1]);
    }

    #[test]
    fn test_instant_objects_sort_by_epoch() {
        let records = vec![
            rec(json!({"instant": {"epochSecond": 100, "nanoOfSecond": 0}})),
            rec(json!({"instant": {"epochSecond": 99, "nanoOfSecond": 5}})),
        ];
        let sort = SortDirective::new("instant", SortDirection::Ascending);
        assert_eq!(derive_view(&records, &FilterState::default(), &sort), vec![1, 0]);
    }

    #[test]
    fn test_canonical_level_sorts_mixed_dialects() {
        let records = vec![
            rec(json!({"Level": "Warning", "MessageTemplate": "w"})),
            rec(json!({"level": "ERROR", "message": "e"})),
        ];
        let sort = SortDirective::new("level", SortDirection::Ascending);
        let view = derive_view(&records, &FilterState::default(), &sort);
        assert_eq!(levels(&records, &view), vec!["ERROR", "Warning"]);
    }

    #[test]
    fn test_mixed_types_rank_by_type() {
        assert_eq!(compare_values(&json!(5), &json!("5")), Ordering::Less);
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!([1, 2]), &json!([1, 3])), Ordering::Less);
    }
}
