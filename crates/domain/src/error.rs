// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::academic_year::AcademicYear;
use crate::stage::{ApprovalStage, CHAIN_STAGE_LABELS, STAGE_LABELS};
use crate::status::{AmendmentStatus, CalendarStatus, EventStatus, ProposalStatus};

/// Errors that can occur during domain validation and workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Academic year string does not match the `YYYY-YY` format.
    InvalidAcademicYear(String),
    /// A calendar already exists for the academic year.
    DuplicateAcademicYear(AcademicYear),
    /// The calendar is locked and cannot be edited directly.
    CalendarLocked,
    /// Lock toggle would not change the lock state.
    LockStateUnchanged {
        /// The lock state the calendar is already in.
        locked: bool,
    },
    /// The actor's role may not edit calendars.
    NotCalendarEditor {
        /// Label of the role that attempted the edit.
        role: String,
    },
    /// The calendar is not in a state the actor may edit.
    CalendarNotEditable {
        /// The current calendar status.
        status: CalendarStatus,
    },
    /// Only a specific sub-role may perform this submission.
    WrongSubmitter {
        /// Label of the required submitter.
        required: &'static str,
    },
    /// Calendars can only be submitted from the draft state.
    SubmitFromNonDraft {
        /// The current calendar status.
        status: CalendarStatus,
    },
    /// A calendar must contain at least one event before submission.
    NoEventsToSubmit,
    /// The entity is not pending approval.
    NotPendingApproval {
        /// Label of the current status.
        status: String,
    },
    /// The actor does not match the approver required for the current stage.
    WrongApprover {
        /// The stage whose approver must act.
        required: ApprovalStage,
    },
    /// Approval at the Student Affairs stage requires a chain selection.
    ChainSelectionRequired,
    /// The supplied approval chain selection is invalid.
    InvalidChainSelection {
        /// Why the selection was rejected.
        reason: String,
    },
    /// A stage label could not be parsed.
    UnknownStage(String),
    /// The event already has an active proposal submission.
    DuplicateProposal {
        /// The event that already carries a proposal.
        event_id: String,
    },
    /// Proposals cannot be raised against cancelled or completed events.
    EventNotOpenForProposal {
        /// The current event status.
        status: EventStatus,
    },
    /// The proposal submission window has not opened yet.
    ProposalWindowNotOpen {
        /// The date the window opens.
        opens_on: time::Date,
    },
    /// The proposal is not in a state the actor may edit.
    ProposalNotEditable {
        /// The current proposal status.
        status: ProposalStatus,
    },
    /// Expenses may only be submitted once the event's proposal is approved.
    EventNotAwaitingExpense {
        /// The current event status.
        status: EventStatus,
    },
    /// The event already has an expense record.
    DuplicateExpense {
        /// The event that already carries an expense.
        event_id: String,
    },
    /// Approved expenses are immutable.
    ExpenseImmutable,
    /// The expense has already been approved.
    ExpenseAlreadyApproved,
    /// Edit amendments must reference an existing event.
    AmendmentEventRequired,
    /// No approved calendar exists to attach a new-event amendment to.
    NoApprovedCalendar,
    /// The amendment has already been reviewed.
    AmendmentNotPending {
        /// The current amendment status.
        status: AmendmentStatus,
    },
    /// The amendment's proposed changes are insufficient to apply.
    InvalidAmendmentChanges {
        /// Why the changes cannot be applied.
        reason: String,
    },
    /// A field failed validation.
    InvalidField {
        /// The field that was invalid.
        field: String,
        /// Why the field was rejected.
        message: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAcademicYear(value) => {
                write!(
                    f,
                    "Invalid academic year '{value}': expected YYYY-YY with consecutive years (e.g. 2025-26)"
                )
            }
            Self::DuplicateAcademicYear(year) => {
                write!(
                    f,
                    "A calendar for academic year {} already exists",
                    year.value()
                )
            }
            Self::CalendarLocked => {
                write!(
                    f,
                    "Calendar is locked: direct edits are blocked, raise an amendment instead"
                )
            }
            Self::LockStateUnchanged { locked } => {
                if *locked {
                    write!(f, "Calendar is already locked")
                } else {
                    write!(f, "Calendar is already unlocked")
                }
            }
            Self::NotCalendarEditor { role } => {
                write!(f, "Role '{role}' may not edit calendars")
            }
            Self::CalendarNotEditable { status } => {
                write!(
                    f,
                    "Calendar cannot be edited while in status '{}'",
                    status.as_str()
                )
            }
            Self::WrongSubmitter { required } => {
                write!(f, "Only the {required} may perform this submission")
            }
            Self::SubmitFromNonDraft { status } => {
                write!(
                    f,
                    "Only draft calendars can be submitted (current status: '{}')",
                    status.as_str()
                )
            }
            Self::NoEventsToSubmit => {
                write!(
                    f,
                    "Calendar must contain at least one event before submission"
                )
            }
            Self::NotPendingApproval { status } => {
                write!(
                    f,
                    "Entity is not pending approval (current status: '{status}')"
                )
            }
            Self::WrongApprover { required } => {
                write!(f, "This stage must be acted on by {}", required.label())
            }
            Self::ChainSelectionRequired => {
                write!(
                    f,
                    "Approval at the Student Affairs stage requires next approval stages; valid stages: {CHAIN_STAGE_LABELS}"
                )
            }
            Self::InvalidChainSelection { reason } => {
                write!(
                    f,
                    "Invalid approval chain selection: {reason}; valid stages: {CHAIN_STAGE_LABELS}"
                )
            }
            Self::UnknownStage(value) => {
                write!(
                    f,
                    "Unknown approval stage '{value}'; known stages: {STAGE_LABELS}"
                )
            }
            Self::DuplicateProposal { event_id } => {
                write!(f, "Event '{event_id}' already has a submitted proposal")
            }
            Self::EventNotOpenForProposal { status } => {
                write!(
                    f,
                    "Proposals cannot be submitted for an event in status '{}'",
                    status.as_str()
                )
            }
            Self::ProposalWindowNotOpen { opens_on } => {
                write!(
                    f,
                    "Proposal submission window has not opened yet (opens on {opens_on})"
                )
            }
            Self::ProposalNotEditable { status } => {
                write!(
                    f,
                    "Proposal cannot be edited while in status '{}'",
                    status.as_str()
                )
            }
            Self::EventNotAwaitingExpense { status } => {
                write!(
                    f,
                    "Expenses may only be submitted for events with an approved proposal (current status: '{}')",
                    status.as_str()
                )
            }
            Self::DuplicateExpense { event_id } => {
                write!(f, "Event '{event_id}' already has an expense record")
            }
            Self::ExpenseImmutable => {
                write!(f, "Approved expenses are immutable")
            }
            Self::ExpenseAlreadyApproved => {
                write!(f, "Expense has already been approved")
            }
            Self::AmendmentEventRequired => {
                write!(f, "Edit amendments must reference an existing event")
            }
            Self::NoApprovedCalendar => {
                write!(f, "No approved calendar exists to attach the new event to")
            }
            Self::AmendmentNotPending { status } => {
                write!(
                    f,
                    "Amendment has already been reviewed (current status: '{}')",
                    status.as_str()
                )
            }
            Self::InvalidAmendmentChanges { reason } => {
                write!(f, "Amendment changes cannot be applied: {reason}")
            }
            Self::InvalidField { field, message } => {
                write!(f, "Invalid value for field '{field}': {message}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
