//! Draft store for the matching view.
//!
//! All operations are total: no validation against committed data and no
//! failure cases. Callers validate records at the boundary (see
//! [`crate::assignment`]) before handing them to the store.

use std::collections::HashSet;

use serde::Serialize;

use crate::assignment::DraftAssignment;
use crate::key::{AssignmentKey, AssignmentRecord};
use crate::matching::selection::SelectionState;

/// State owned by one mounted matching view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftMatchingState {
    hide_list: Vec<String>,
    show_list: Vec<String>,
    /// Insertion order. Duplicate keys may coexist; reconciliation keeps
    /// the last one.
    assignments: Vec<DraftAssignment>,
    #[serde(flatten)]
    selection: SelectionState,
    /// Bumped whenever `assignments` changes. Used for memoization.
    #[serde(skip)]
    assignments_revision: u64,
}

impl DraftMatchingState {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn hide_list(&self) -> &[String] {
        &self.hide_list
    }

    pub fn show_list(&self) -> &[String] {
        &self.show_list
    }

    pub fn assignments(&self) -> &[DraftAssignment] {
        &self.assignments
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn active_position_codes(&self) -> &[String] {
        self.selection.active_position_codes()
    }

    pub fn active_applicant_utorid(&self) -> Option<&str> {
        self.selection.active_applicant_utorid()
    }

    pub fn assignments_revision(&self) -> u64 {
        self.assignments_revision
    }

    /// Explicit visibility for `utorid`, if the user set one.
    ///
    /// `Some(true)` when forced visible (the show list wins over the hide
    /// list), `Some(false)` when hidden, `None` when neither list names it.
    pub fn visibility_override(&self, utorid: &str) -> Option<bool> {
        if self.show_list.iter().any(|u| u == utorid) {
            Some(true)
        } else if self.hide_list.iter().any(|u| u == utorid) {
            Some(false)
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Visibility lists
    // -----------------------------------------------------------------------

    pub fn set_hide_list(&mut self, utorids: Vec<String>) {
        self.hide_list = utorids;
    }

    pub fn set_show_list(&mut self, utorids: Vec<String>) {
        self.show_list = utorids;
    }

    // -----------------------------------------------------------------------
    // Draft assignments
    // -----------------------------------------------------------------------

    /// Append `draft`. Same-key drafts are not collapsed here.
    pub fn add_draft_assignment(&mut self, draft: DraftAssignment) {
        self.assignments.push(draft);
        self.bump();
    }

    /// Remove every draft sharing `target`'s key.
    pub fn remove_draft_assignment<R: AssignmentRecord + ?Sized>(&mut self, target: &R) {
        let key = target.assignment_key();
        self.retain_assignments(|draft| draft.assignment_key() != key);
    }

    /// Remove every draft sharing a key with any of `targets`, in one pass.
    pub fn remove_draft_assignments<R: AssignmentRecord>(&mut self, targets: &[R]) {
        let keys: HashSet<AssignmentKey> = targets.iter().map(|t| t.assignment_key()).collect();
        if keys.is_empty() {
            return;
        }
        self.retain_assignments(|draft| !keys.contains(&draft.assignment_key()));
    }

    /// Drop all drafts. Visibility lists and selection are untouched.
    pub fn clear_draft_assignments(&mut self) {
        if !self.assignments.is_empty() {
            self.assignments.clear();
            self.bump();
        }
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn add_active_position_code(&mut self, code: impl Into<String>) {
        self.selection.add_active_position_code(code);
    }

    pub fn remove_active_position_code(&mut self, code: &str) {
        self.selection.remove_active_position_code(code);
    }

    pub fn set_active_applicant_utorid(&mut self, utorid: Option<String>) {
        self.selection.set_active_applicant_utorid(utorid);
    }

    fn retain_assignments(&mut self, keep: impl FnMut(&DraftAssignment) -> bool) {
        let before = self.assignments.len();
        self.assignments.retain(keep);
        if self.assignments.len() != before {
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.assignments_revision = self.assignments_revision.wrapping_add(1);
    }
}
