//! Filter and selection layer
//!
//! Keeps three index spaces consistent:
//! - original indices: positions in the [`RowStore`]
//! - display indices: positions in the filtered, ranked view
//! - the selection set: original indices marked by the user
//!
//! Every mutation that changes the row set goes through this type so the
//! filter, the selection set and the labels are updated together.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use crate::fuzzy;
use crate::rows::{RowStore, RowStoreError};

/// View template used when none is configured
pub const DEFAULT_VIEW_TEMPLATE: &str = "{}";

#[derive(Debug, Clone)]
pub struct Picker {
    rows: RowStore,
    view_template: String,
    /// Rendered label per original index
    labels: Vec<String>,
    /// Display index → original index
    filter: Vec<usize>,
    selections: BTreeSet<usize>,
    cursor: usize,
    query: String,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(RowStore::new())
    }
}

impl Picker {
    pub fn new(rows: RowStore) -> Self {
        let mut picker = Self {
            rows,
            view_template: DEFAULT_VIEW_TEMPLATE.to_string(),
            labels: Vec::new(),
            filter: Vec::new(),
            selections: BTreeSet::new(),
            cursor: 0,
            query: String::new(),
        };
        picker.relabel();
        picker.reset_filter();
        picker
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Replace all rows from a file and reset filter, selections and cursor.
    ///
    /// On failure the picker is left empty but consistent.
    pub fn load(&mut self, path: &Path, delimiter: char) -> Result<usize, RowStoreError> {
        let result = self.rows.load(path, delimiter);
        self.after_reload();
        result
    }

    /// Replace all rows from a reader and reset filter, selections and cursor
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        delimiter: char,
    ) -> Result<usize, RowStoreError> {
        let result = self.rows.load_reader(reader, delimiter);
        self.after_reload();
        result
    }

    fn after_reload(&mut self) {
        self.selections.clear();
        self.query.clear();
        self.relabel();
        self.reset_filter();
        self.cursor = 0;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn view_template(&self) -> &str {
        &self.view_template
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Labels in original-index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels in display order
    pub fn display_labels(&self) -> Vec<&str> {
        self.filter
            .iter()
            .filter_map(|&idx| self.labels.get(idx).map(String::as_str))
            .collect()
    }

    /// Display index → original index mapping
    pub fn filter(&self) -> &[usize] {
        &self.filter
    }

    pub fn selections(&self) -> &BTreeSet<usize> {
        &self.selections
    }

    pub fn is_selected(&self, original: usize) -> bool {
        self.selections.contains(&original)
    }

    pub fn len(&self) -> usize {
        self.filter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inclusive cursor range, `None` when nothing is displayed
    pub fn cursor_bounds(&self) -> Option<(usize, usize)> {
        if self.filter.is_empty() {
            None
        } else {
            Some((0, self.filter.len() - 1))
        }
    }

    /// Resolve a display index to its original index
    pub fn original_index(&self, display_idx: usize) -> Option<usize> {
        self.filter.get(display_idx).copied()
    }

    /// Original index under the cursor
    pub fn focused(&self) -> Option<usize> {
        self.original_index(self.cursor)
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Move the cursor to `display_idx`, clamped to the displayed range
    pub fn set_cursor(&mut self, display_idx: usize) {
        self.cursor = display_idx.min(self.filter.len().saturating_sub(1));
    }

    /// Move the cursor by `delta` rows, clamped to the displayed range
    pub fn move_cursor(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.set_cursor(target);
    }

    // ========================================================================
    // View template and filtering
    // ========================================================================

    /// Set the active view template and recompute every label
    pub fn set_view_template(&mut self, template: &str) {
        self.view_template = template.to_string();
        self.relabel();
        if !self.query.is_empty() {
            self.rerank();
        }
    }

    /// Display every row in original order
    pub fn reset_filter(&mut self) {
        self.query.clear();
        self.filter = (0..self.rows.len()).collect();
        self.clamp_cursor();
    }

    /// Rank every row's label against `query` and reset the cursor.
    ///
    /// Rows are never excluded; the score only orders them.
    pub fn apply_query(&mut self, query: &str) {
        if query.is_empty() {
            self.reset_filter();
        } else {
            self.query = query.to_string();
            self.filter = fuzzy::rank(query, &self.labels);
        }
        self.cursor = 0;
        tracing::trace!(query, displayed = self.filter.len(), "Applied query");
    }

    fn rerank(&mut self) {
        self.filter = fuzzy::rank(&self.query, &self.labels);
        self.clamp_cursor();
    }

    fn relabel(&mut self) {
        self.labels = self.rows.menu_entries(&self.view_template);
    }

    fn clamp_cursor(&mut self) {
        self.set_cursor(self.cursor);
    }

    // ========================================================================
    // Selections
    // ========================================================================

    /// Flip selection of the row at `display_idx`; false when out of range
    pub fn toggle_selection(&mut self, display_idx: usize) -> bool {
        let Some(original) = self.original_index(display_idx) else {
            return false;
        };
        if !self.selections.remove(&original) {
            self.selections.insert(original);
        }
        true
    }

    /// Select every currently displayed row
    pub fn select_all(&mut self) {
        self.selections.extend(self.filter.iter().copied());
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// Flip membership of displayed rows only; hidden selections stay
    pub fn invert_selections(&mut self) {
        for &original in &self.filter {
            if !self.selections.remove(&original) {
                self.selections.insert(original);
            }
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Delete the row shown at `display_idx` from every index space at once.
    ///
    /// Returns the removed original index, `None` when out of range.
    pub fn delete_at(&mut self, display_idx: usize) -> Option<usize> {
        let original = self.original_index(display_idx)?;

        self.selections = std::mem::take(&mut self.selections)
            .into_iter()
            .filter(|&idx| idx != original)
            .map(|idx| if idx > original { idx - 1 } else { idx })
            .collect();

        self.filter.remove(display_idx);
        for idx in &mut self.filter {
            if *idx > original {
                *idx -= 1;
            }
        }

        self.rows.erase(original);
        if original < self.labels.len() {
            self.labels.remove(original);
        }
        self.clamp_cursor();

        tracing::debug!(display_idx, original, remaining = self.rows.len(), "Deleted row");
        Some(original)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Text produced by `select`.
    ///
    /// With no selections: the focused row through the view template.
    /// Otherwise one line per selected row in ascending original order.
    pub fn selection_output(&self) -> Option<String> {
        if self.selections.is_empty() {
            let focused = self.focused()?;
            return Some(self.rows.substitute(&self.view_template, focused));
        }

        Some(
            self.selections
                .iter()
                .map(|&idx| self.rows.substitute(&self.view_template, idx))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker_with(lines: &[&str]) -> Picker {
        let mut rows = RowStore::new();
        for line in lines {
            rows.add_line(line, '|');
        }
        Picker::new(rows)
    }

    fn assert_consistent(picker: &Picker) {
        let n = picker.rows().len();
        let mut seen = BTreeSet::new();
        for &idx in picker.filter() {
            assert!(idx < n, "filter entry {} out of range {}", idx, n);
            assert!(seen.insert(idx), "duplicate filter entry {}", idx);
        }
        for &idx in picker.selections() {
            assert!(idx < n, "selection {} out of range {}", idx, n);
        }
        assert_eq!(picker.labels().len(), n);
        if picker.is_empty() {
            assert_eq!(picker.cursor(), 0);
        } else {
            assert!(picker.cursor() < picker.len());
        }
    }

    #[test]
    fn test_starts_with_identity_filter() {
        let picker = picker_with(&["a", "b", "c"]);
        assert_eq!(picker.filter(), &[0, 1, 2]);
        assert_eq!(picker.display_labels(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_query_is_reset() {
        let mut picker = picker_with(&["alpha", "beta", "gamma"]);
        picker.apply_query("gam");
        assert_eq!(picker.filter()[0], 2);

        picker.set_cursor(2);
        picker.apply_query("");
        assert_eq!(picker.filter(), &[0, 1, 2]);
        assert_eq!(picker.cursor(), 0);
    }

    #[test]
    fn test_query_ranks_without_excluding() {
        let mut picker = picker_with(&["zzz", "main.rs", "yyy"]);
        picker.apply_query("main");
        assert_eq!(picker.len(), 3);
        assert_eq!(picker.filter(), &[1, 0, 2]);
        assert_eq!(picker.cursor(), 0);
    }

    #[test]
    fn test_view_template_changes_labels() {
        let mut picker = picker_with(&["a|1", "b|2"]);
        picker.set_view_template("{1}");
        assert_eq!(picker.display_labels(), vec!["1", "2"]);
    }

    #[test]
    fn test_toggle_selection_resolves_display_index() {
        let mut picker = picker_with(&["zzz", "main.rs"]);
        picker.apply_query("main");
        assert!(picker.toggle_selection(0));
        assert!(picker.is_selected(1));
        assert!(picker.toggle_selection(0));
        assert!(!picker.is_selected(1));
        assert!(!picker.toggle_selection(9));
    }

    #[test]
    fn test_invert_only_touches_displayed_rows() {
        let mut picker = picker_with(&["a", "b", "c"]);
        picker.select_all();
        // Restrict the view by deleting nothing but pretending a subset is shown
        picker.filter = vec![0, 1];
        picker.invert_selections();
        assert_eq!(picker.selections().iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_delete_last_moves_cursor_to_new_last() {
        let mut picker = picker_with(&["r0", "r1", "r2", "r3", "r4"]);
        picker.set_cursor(4);
        assert_eq!(picker.delete_at(4), Some(4));
        assert_eq!(picker.len(), 4);
        assert_eq!(picker.cursor(), 3);
        assert_consistent(&picker);
    }

    #[test]
    fn test_delete_middle_keeps_cursor() {
        let mut picker = picker_with(&["r0", "r1", "r2", "r3", "r4"]);
        picker.set_cursor(2);
        picker.delete_at(2);
        assert_eq!(picker.cursor(), 2);
        assert_eq!(picker.display_labels(), vec!["r0", "r1", "r3", "r4"]);
        assert_consistent(&picker);
    }

    #[test]
    fn test_delete_reindexes_selections_and_filter() {
        let mut picker = picker_with(&["r0", "r1", "r2", "r3"]);
        picker.selections.extend([0, 1, 3]);
        picker.filter = vec![3, 1, 2, 0];

        // Display index 1 is original row 1
        assert_eq!(picker.delete_at(1), Some(1));
        assert_eq!(picker.filter(), &[2, 1, 0]);
        assert_eq!(
            picker.selections().iter().copied().collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(picker.rows().row(2), vec!["r3"]);
        assert_consistent(&picker);
    }

    #[test]
    fn test_delete_out_of_range_fails() {
        let mut picker = picker_with(&["only"]);
        assert_eq!(picker.delete_at(3), None);
        assert_eq!(picker.len(), 1);

        assert_eq!(picker.delete_at(0), Some(0));
        assert!(picker.is_empty());
        assert_eq!(picker.cursor(), 0);
        assert_eq!(picker.delete_at(0), None);
    }

    #[test]
    fn test_selection_output() {
        let mut picker = picker_with(&["a|1", "b|2", "c|3"]);
        picker.set_view_template("{0}");
        picker.set_cursor(1);
        assert_eq!(picker.selection_output().as_deref(), Some("b"));

        picker.toggle_selection(2);
        picker.toggle_selection(0);
        assert_eq!(picker.selection_output().as_deref(), Some("a\nc"));

        let empty = Picker::default();
        assert_eq!(empty.selection_output(), None);
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut picker = picker_with(&["a", "b", "c"]);
        picker.move_cursor(10);
        assert_eq!(picker.cursor(), 2);
        picker.move_cursor(-10);
        assert_eq!(picker.cursor(), 0);
        assert_eq!(picker.cursor_bounds(), Some((0, 2)));
        assert_eq!(Picker::default().cursor_bounds(), None);
    }
}
