//! Highlight state for the matching view.

use serde::Serialize;

/// Which positions and which applicant are currently highlighted.
///
/// Orthogonal to reconciliation: nothing here affects the merged view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Highlighted position codes, in insertion order, never duplicated.
    active_position_codes: Vec<String>,
    /// At most one highlighted applicant.
    active_applicant_utorid: Option<String>,
}

impl SelectionState {
    pub fn active_position_codes(&self) -> &[String] {
        &self.active_position_codes
    }

    pub fn active_applicant_utorid(&self) -> Option<&str> {
        self.active_applicant_utorid.as_deref()
    }

    /// Insert `code` unless it is already active.
    pub fn add_active_position_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.active_position_codes.contains(&code) {
            self.active_position_codes.push(code);
        }
    }

    /// Drop every occurrence of `code`. No-op when absent.
    pub fn remove_active_position_code(&mut self, code: &str) {
        self.active_position_codes.retain(|c| c != code);
    }

    /// Replace the active applicant; `None` clears it.
    pub fn set_active_applicant_utorid(&mut self, utorid: Option<String>) {
        self.active_applicant_utorid = utorid;
    }
}
