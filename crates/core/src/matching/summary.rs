//! Views derived from the reconciled assignment list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::key::AssignmentRecord;
use crate::matching::reconcile::ReconciledAssignment;

/// Totals for one position across the reconciled view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSummary {
    pub position_code: String,
    /// Sum of `hours_assigned` over entries whose status counts toward
    /// hours. Drafts without a status contribute nothing.
    pub assigned_hours: f64,
    pub assignment_count: usize,
    pub draft_count: usize,
}

/// Group `assignments` by position code, sorted by code.
pub fn summarize_positions(assignments: &[ReconciledAssignment]) -> Vec<PositionSummary> {
    let mut by_code: BTreeMap<&str, PositionSummary> = BTreeMap::new();

    for assignment in assignments {
        let code = assignment.position_code();
        let summary = by_code.entry(code).or_insert_with(|| PositionSummary {
            position_code: code.to_string(),
            assigned_hours: 0.0,
            assignment_count: 0,
            draft_count: 0,
        });

        summary.assignment_count += 1;
        if assignment.is_draft() {
            summary.draft_count += 1;
        }
        if assignment.status().is_some_and(|s| s.counts_toward_hours()) {
            summary.assigned_hours += assignment.hours_assigned().unwrap_or(0.0);
        }
    }

    by_code.into_values().collect()
}

/// Entries in `assignments` belonging to `utorid`, in view order.
pub fn assignments_for_applicant<'a>(
    assignments: &'a [ReconciledAssignment],
    utorid: &str,
) -> Vec<&'a ReconciledAssignment> {
    assignments.iter().filter(|a| a.utorid() == utorid).collect()
}
