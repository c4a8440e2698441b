//! Draft matching: the state behind the assignment matching view.
//!
//! [`DraftMatchingState`] owns the drafts, visibility overrides and
//! highlight selection. [`reconcile`] merges committed assignments with the
//! drafts, and [`summary`] derives the per-position and per-applicant views
//! the matching tables render.

pub mod reconcile;
pub mod selection;
pub mod store;
pub mod summary;

pub use reconcile::{reconcile, ReconciledAssignment, ReconciliationCache};
pub use selection::SelectionState;
pub use store::DraftMatchingState;
pub use summary::{assignments_for_applicant, summarize_positions, PositionSummary};
