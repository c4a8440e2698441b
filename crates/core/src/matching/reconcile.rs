//! Merge committed assignments with drafts into one view.
//!
//! One entry per [`AssignmentKey`]. A draft replaces a committed record with
//! the same key outright: fields the draft leaves unset stay unset and are
//! never borrowed from the committed record. Among duplicates on the same
//! side, the later one in input order wins.
//!
//! Output order follows the first time each key was seen. Callers should
//! rely on key membership and per-key content, not on position.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::assignment::{AssignmentStatus, CommittedAssignment, DraftAssignment};
use crate::key::{AssignmentKey, AssignmentRecord};
use crate::matching::store::DraftMatchingState;
use crate::types::DbId;

/// One entry of the merged view, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciledAssignment {
    Committed(CommittedAssignment),
    Draft(DraftAssignment),
}

impl ReconciledAssignment {
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }

    pub fn id(&self) -> Option<DbId> {
        match self {
            Self::Committed(a) => Some(a.id),
            Self::Draft(d) => d.id,
        }
    }

    pub fn status(&self) -> Option<AssignmentStatus> {
        match self {
            Self::Committed(a) => Some(a.status),
            Self::Draft(d) => d.status,
        }
    }

    pub fn hours_assigned(&self) -> Option<f64> {
        match self {
            Self::Committed(a) => a.hours_assigned,
            Self::Draft(d) => d.hours_assigned,
        }
    }
}

impl AssignmentRecord for ReconciledAssignment {
    fn position_code(&self) -> &str {
        match self {
            Self::Committed(a) => a.position_code(),
            Self::Draft(d) => d.position_code(),
        }
    }

    fn utorid(&self) -> &str {
        match self {
            Self::Committed(a) => a.utorid(),
            Self::Draft(d) => d.utorid(),
        }
    }
}

/// The record's own fields plus a `draft` flag.
#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(flatten)]
    record: &'a T,
    draft: bool,
}

impl Serialize for ReconciledAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Committed(a) => Tagged {
                record: a,
                draft: false,
            }
            .serialize(serializer),
            Self::Draft(d) => Tagged {
                record: d,
                draft: true,
            }
            .serialize(serializer),
        }
    }
}

/// Merge `committed` and `drafts`, drafts winning on key conflicts.
pub fn reconcile(
    committed: &[CommittedAssignment],
    drafts: &[DraftAssignment],
) -> Vec<ReconciledAssignment> {
    let mut merged: IndexMap<AssignmentKey, ReconciledAssignment> =
        IndexMap::with_capacity(committed.len() + drafts.len());

    for assignment in committed {
        merged.insert(
            assignment.assignment_key(),
            ReconciledAssignment::Committed(assignment.clone()),
        );
    }
    for draft in drafts {
        merged.insert(
            draft.assignment_key(),
            ReconciledAssignment::Draft(draft.clone()),
        );
    }

    merged.into_values().collect()
}

/// Memoized [`reconcile`] for one draft store.
///
/// Reuses the previous output while the committed snapshot is the same
/// `Arc` and the store's assignment revision has not moved. Pair each cache
/// with a single [`DraftMatchingState`]; revisions from different stores
/// are not comparable.
#[derive(Debug, Default)]
pub struct ReconciliationCache {
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    committed: Arc<Vec<CommittedAssignment>>,
    revision: u64,
    output: Arc<Vec<ReconciledAssignment>>,
}

impl ReconciliationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the merged view, recomputing only when an input changed.
    pub fn get(
        &mut self,
        committed: &Arc<Vec<CommittedAssignment>>,
        state: &DraftMatchingState,
    ) -> Arc<Vec<ReconciledAssignment>> {
        let revision = state.assignments_revision();
        if let Some(entry) = &self.entry {
            if Arc::ptr_eq(&entry.committed, committed) && entry.revision == revision {
                return Arc::clone(&entry.output);
            }
        }

        let output = Arc::new(reconcile(committed, state.assignments()));
        self.entry = Some(CacheEntry {
            committed: Arc::clone(committed),
            revision,
            output: Arc::clone(&output),
        });
        output
    }
}
