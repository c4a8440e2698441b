//! Assignment records seen by the matching view.
//!
//! [`CommittedAssignment`] mirrors a persisted row; [`DraftAssignment`] is a
//! locally proposed pairing that has not been saved yet and may be only
//! partially filled in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::key::AssignmentRecord;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Lifecycle status of an applicant-to-position assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Applied,
    Assigned,
    StagedAssigned,
    StagedRejected,
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
    Cancelled,
    Unassignable,
    Hidden,
}

impl AssignmentStatus {
    /// Whether hours on an assignment with this status are charged to the
    /// position's budget.
    pub fn counts_toward_hours(self) -> bool {
        matches!(
            self,
            Self::Assigned | Self::StagedAssigned | Self::Pending | Self::Accepted
        )
    }
}

/// Status of the most recent offer sent for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Provisional,
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

/// The position side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub position_code: String,
}

impl PositionRef {
    pub fn new(position_code: impl Into<String>) -> Self {
        Self {
            id: None,
            position_code: position_code.into(),
        }
    }
}

/// The applicant side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub utorid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ApplicantRef {
    pub fn new(utorid: impl Into<String>) -> Self {
        Self {
            id: None,
            utorid: utorid.into(),
            first_name: None,
            last_name: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted, authoritative assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedAssignment {
    pub id: DbId,
    pub position: PositionRef,
    pub applicant: ApplicantRef,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_assigned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_offer_status: Option<OfferStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_offer_recent_activity_date: Option<Timestamp>,
}

impl CommittedAssignment {
    /// Check the fields the merge relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_position_code(&self.position.position_code)?;
        validate_utorid(&self.applicant.utorid)?;
        if let Some(hours) = self.hours_assigned {
            validate_hours(hours)?;
        }
        Ok(())
    }
}

/// A proposed assignment that only exists in the matching view.
///
/// Every descriptive field is optional: a draft carries exactly what the
/// user filled in and nothing is inherited from a committed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub position: PositionRef,
    pub applicant: ApplicantRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_assigned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_offer_status: Option<OfferStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_offer_recent_activity_date: Option<Timestamp>,
}

impl DraftAssignment {
    /// A bare draft pairing `utorid` with `position_code`.
    pub fn new(position_code: impl Into<String>, utorid: impl Into<String>) -> Self {
        Self {
            id: None,
            position: PositionRef::new(position_code),
            applicant: ApplicantRef::new(utorid),
            status: None,
            hours_assigned: None,
            active_offer_status: None,
            active_offer_recent_activity_date: None,
        }
    }

    pub fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours_assigned = Some(hours);
        self
    }

    /// Check the fields the merge relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_position_code(&self.position.position_code)?;
        validate_utorid(&self.applicant.utorid)?;
        if let Some(hours) = self.hours_assigned {
            validate_hours(hours)?;
        }
        Ok(())
    }
}

impl AssignmentRecord for CommittedAssignment {
    fn position_code(&self) -> &str {
        &self.position.position_code
    }

    fn utorid(&self) -> &str {
        &self.applicant.utorid
    }
}

impl AssignmentRecord for DraftAssignment {
    fn position_code(&self) -> &str {
        &self.position.position_code
    }

    fn utorid(&self) -> &str {
        &self.applicant.utorid
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A position code must contain at least one non-whitespace character.
pub fn validate_position_code(position_code: &str) -> Result<(), CoreError> {
    if position_code.trim().is_empty() {
        return Err(CoreError::Validation(
            "position_code must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// A utorid must contain at least one non-whitespace character.
pub fn validate_utorid(utorid: &str) -> Result<(), CoreError> {
    if utorid.trim().is_empty() {
        return Err(CoreError::Validation("utorid must not be empty".to_string()));
    }
    Ok(())
}

/// Assigned hours must be a finite, non-negative number.
pub fn validate_hours(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(CoreError::Validation(format!(
            "hours_assigned must be a non-negative number, got {hours}"
        )));
    }
    Ok(())
}
