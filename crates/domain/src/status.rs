// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::stage::ApprovalStage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of an annual activity calendar.
///
/// `PendingPresident` is retained for backward compatibility: the submit path
/// now moves drafts straight to `PendingStudentAffairs`, but stored documents
/// may still carry the old intermediate status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalendarStatus {
    /// Initial state; fully editable by the Gymkhana.
    #[default]
    Draft,
    /// Awaiting President action (legacy; unreachable via submission).
    PendingPresident,
    /// Awaiting the Student Affairs office's chain selection.
    PendingStudentAffairs,
    /// Awaiting the Joint Registrar SA.
    PendingJointRegistrar,
    /// Awaiting the Associate Dean SA.
    PendingAssociateDean,
    /// Awaiting the Dean SA.
    PendingDean,
    /// Terminal: approved; events have been materialized.
    Approved,
    /// Terminal but editable: editing returns the calendar to `Draft`.
    Rejected,
}

impl CalendarStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingPresident => "pending_president",
            Self::PendingStudentAffairs => "pending_student_affairs",
            Self::PendingJointRegistrar => "pending_joint_registrar",
            Self::PendingAssociateDean => "pending_associate_dean",
            Self::PendingDean => "pending_dean",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the approver stage required to act on this status, if pending.
    ///
    /// This is the single status-to-approver routing table shared with the
    /// proposal workflow; a `None` means the status is not awaiting anyone.
    #[must_use]
    pub const fn required_stage(&self) -> Option<ApprovalStage> {
        match self {
            Self::PendingPresident => Some(ApprovalStage::President),
            Self::PendingStudentAffairs => Some(ApprovalStage::StudentAffairs),
            Self::PendingJointRegistrar => Some(ApprovalStage::JointRegistrarSa),
            Self::PendingAssociateDean => Some(ApprovalStage::AssociateDeanSa),
            Self::PendingDean => Some(ApprovalStage::DeanSa),
            Self::Draft | Self::Approved | Self::Rejected => None,
        }
    }

    /// Returns the pending status owned by a given stage.
    #[must_use]
    pub const fn for_stage(stage: ApprovalStage) -> Self {
        match stage {
            ApprovalStage::President => Self::PendingPresident,
            ApprovalStage::StudentAffairs => Self::PendingStudentAffairs,
            ApprovalStage::JointRegistrarSa => Self::PendingJointRegistrar,
            ApprovalStage::AssociateDeanSa => Self::PendingAssociateDean,
            ApprovalStage::DeanSa => Self::PendingDean,
        }
    }
}

impl FromStr for CalendarStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_president" => Ok(Self::PendingPresident),
            "pending_student_affairs" => Ok(Self::PendingStudentAffairs),
            "pending_joint_registrar" => Ok(Self::PendingJointRegistrar),
            "pending_associate_dean" => Ok(Self::PendingAssociateDean),
            "pending_dean" => Ok(Self::PendingDean),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidField {
                field: String::from("status"),
                message: format!("Unknown calendar status: {s}"),
            }),
        }
    }
}

impl std::fmt::Display for CalendarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle states of an event proposal.
///
/// Mirrors the calendar state machine with one extra state:
/// `RevisionRequested` routes control back to the original submitter without
/// terminating the approval cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Awaiting the Gymkhana President (entry state for standard proposals).
    PendingPresident,
    /// Awaiting the Student Affairs office's chain selection (entry state
    /// for mega-event proposals).
    PendingStudentAffairs,
    /// Awaiting the Joint Registrar SA.
    PendingJointRegistrar,
    /// Awaiting the Associate Dean SA.
    PendingAssociateDean,
    /// Awaiting the Dean SA.
    PendingDean,
    /// Terminal: approved; the event may proceed to expense settlement.
    Approved,
    /// Terminal but editable: editing resubmits the proposal.
    Rejected,
    /// An approver asked the submitter to revise and resubmit.
    RevisionRequested,
}

impl ProposalStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPresident => "pending_president",
            Self::PendingStudentAffairs => "pending_student_affairs",
            Self::PendingJointRegistrar => "pending_joint_registrar",
            Self::PendingAssociateDean => "pending_associate_dean",
            Self::PendingDean => "pending_dean",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::RevisionRequested => "revision_requested",
        }
    }

    /// Returns the approver stage required to act on this status, if pending.
    #[must_use]
    pub const fn required_stage(&self) -> Option<ApprovalStage> {
        match self {
            Self::PendingPresident => Some(ApprovalStage::President),
            Self::PendingStudentAffairs => Some(ApprovalStage::StudentAffairs),
            Self::PendingJointRegistrar => Some(ApprovalStage::JointRegistrarSa),
            Self::PendingAssociateDean => Some(ApprovalStage::AssociateDeanSa),
            Self::PendingDean => Some(ApprovalStage::DeanSa),
            Self::Approved | Self::Rejected | Self::RevisionRequested => None,
        }
    }

    /// Returns the pending status owned by a given stage.
    #[must_use]
    pub const fn for_stage(stage: ApprovalStage) -> Self {
        match stage {
            ApprovalStage::President => Self::PendingPresident,
            ApprovalStage::StudentAffairs => Self::PendingStudentAffairs,
            ApprovalStage::JointRegistrarSa => Self::PendingJointRegistrar,
            ApprovalStage::AssociateDeanSa => Self::PendingAssociateDean,
            ApprovalStage::DeanSa => Self::PendingDean,
        }
    }
}

impl FromStr for ProposalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_president" => Ok(Self::PendingPresident),
            "pending_student_affairs" => Ok(Self::PendingStudentAffairs),
            "pending_joint_registrar" => Ok(Self::PendingJointRegistrar),
            "pending_associate_dean" => Ok(Self::PendingAssociateDean),
            "pending_dean" => Ok(Self::PendingDean),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "revision_requested" => Ok(Self::RevisionRequested),
            _ => Err(DomainError::InvalidField {
                field: String::from("status"),
                message: format!("Unknown proposal status: {s}"),
            }),
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle states of a materialized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Materialized and awaiting its proposal.
    #[default]
    Upcoming,
    /// A proposal has been submitted and is working through its chain.
    ProposalSubmitted,
    /// The proposal was approved; expenses may be settled after the event.
    ProposalApproved,
    /// The expense was approved; the event lifecycle is closed.
    Completed,
    /// The event was cancelled; no further submissions are accepted.
    Cancelled,
}

impl EventStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::ProposalSubmitted => "proposal_submitted",
            Self::ProposalApproved => "proposal_approved",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approval states of an expense record. Binary by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseApprovalStatus {
    /// Awaiting administrative approval.
    #[default]
    Pending,
    /// Approved; the record is immutable.
    Approved,
}

impl ExpenseApprovalStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for ExpenseApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review states of an amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentStatus {
    /// Awaiting administrative review.
    #[default]
    Pending,
    /// Approved; the change has been applied to the target.
    Approved,
    /// Rejected; the target was left untouched.
    Rejected,
}

impl AmendmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for AmendmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of change an amendment proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentType {
    /// Patch the mutable fields of an existing event.
    Edit,
    /// Insert a fresh event under the most recently approved calendar.
    NewEvent,
}

impl AmendmentType {
    /// Converts this type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::NewEvent => "new_event",
        }
    }

    /// Parses an amendment type from its string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if the string is not a known type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "edit" => Ok(Self::Edit),
            "new_event" => Ok(Self::NewEvent),
            _ => Err(DomainError::InvalidField {
                field: String::from("amendment_type"),
                message: format!("Unknown amendment type: {s} (expected 'edit' or 'new_event')"),
            }),
        }
    }
}

impl std::fmt::Display for AmendmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
