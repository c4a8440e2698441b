//! Merge identity for assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an assignment: the (position, applicant) pair.
///
/// Compared field-wise, so codes or utorids containing any character can
/// never collide with a different pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub position_code: String,
    pub utorid: String,
}

impl AssignmentKey {
    pub fn new(position_code: impl Into<String>, utorid: impl Into<String>) -> Self {
        Self {
            position_code: position_code.into(),
            utorid: utorid.into(),
        }
    }
}

/// Human-readable form for logs. Not an identity: use the struct itself.
impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.position_code, self.utorid)
    }
}

/// Anything that names a position code and an applicant utorid.
pub trait AssignmentRecord {
    fn position_code(&self) -> &str;

    fn utorid(&self) -> &str;

    fn assignment_key(&self) -> AssignmentKey {
        AssignmentKey::new(self.position_code(), self.utorid())
    }
}

impl AssignmentRecord for AssignmentKey {
    fn position_code(&self) -> &str {
        &self.position_code
    }

    fn utorid(&self) -> &str {
        &self.utorid
    }

    fn assignment_key(&self) -> AssignmentKey {
        self.clone()
    }
}
