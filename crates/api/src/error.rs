// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Expected business-rule outcomes (not found / forbidden / bad request)
//! travel as structured results with a status code and an actionable
//! message; only genuinely unexpected failures map to an internal error.

use gymkhana_domain::DomainError;
use gymkhana_persistence::PersistenceError;
use serde::Serialize;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor's role does not satisfy the workflow gate.
    Forbidden {
        /// A human-readable description of the gate.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } | Self::Forbidden { .. } => 403,
            Self::DomainRuleViolation { .. } | Self::InvalidInput { .. } => 400,
            Self::ResourceNotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    /// Returns the structured `{success, status_code, message}` body.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            status_code: self.status_code(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Forbidden { message } => write!(f, "{message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// The structured error body returned across the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Always false for errors.
    pub success: bool,
    /// The HTTP status code.
    pub status_code: u16,
    /// The actionable error message.
    pub message: String,
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. The Forbidden arm covers the authorization-shaped rules
/// (locked calendars, stage and submitter mismatches, immutable records);
/// everything else is a bad request.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::CalendarLocked
        | DomainError::NotCalendarEditor { .. }
        | DomainError::WrongSubmitter { .. }
        | DomainError::WrongApprover { .. }
        | DomainError::ExpenseImmutable => ApiError::Forbidden { message },
        DomainError::InvalidAcademicYear(_) => ApiError::InvalidInput {
            field: String::from("academic_year"),
            message,
        },
        DomainError::DuplicateAcademicYear(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_academic_year"),
            message,
        },
        DomainError::LockStateUnchanged { .. } => ApiError::DomainRuleViolation {
            rule: String::from("lock_toggle"),
            message,
        },
        DomainError::CalendarNotEditable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("calendar_edit_state"),
            message,
        },
        DomainError::SubmitFromNonDraft { .. } => ApiError::DomainRuleViolation {
            rule: String::from("submit_from_draft"),
            message,
        },
        DomainError::NoEventsToSubmit => ApiError::DomainRuleViolation {
            rule: String::from("non_empty_calendar"),
            message,
        },
        DomainError::NotPendingApproval { .. } => ApiError::DomainRuleViolation {
            rule: String::from("pending_approval"),
            message,
        },
        DomainError::ChainSelectionRequired
        | DomainError::InvalidChainSelection { .. }
        | DomainError::UnknownStage(_) => ApiError::InvalidInput {
            field: String::from("next_approval_stages"),
            message,
        },
        DomainError::DuplicateProposal { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_proposal_per_event"),
            message,
        },
        DomainError::EventNotOpenForProposal { .. } => ApiError::DomainRuleViolation {
            rule: String::from("event_accepts_proposals"),
            message,
        },
        DomainError::ProposalWindowNotOpen { .. } => ApiError::DomainRuleViolation {
            rule: String::from("proposal_window"),
            message,
        },
        DomainError::ProposalNotEditable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("proposal_edit_state"),
            message,
        },
        DomainError::EventNotAwaitingExpense { .. } => ApiError::DomainRuleViolation {
            rule: String::from("expense_after_proposal_approval"),
            message,
        },
        DomainError::DuplicateExpense { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_expense_per_event"),
            message,
        },
        DomainError::ExpenseAlreadyApproved => ApiError::DomainRuleViolation {
            rule: String::from("no_reapproval"),
            message,
        },
        DomainError::AmendmentEventRequired => ApiError::InvalidInput {
            field: String::from("event_id"),
            message,
        },
        DomainError::NoApprovedCalendar => ApiError::DomainRuleViolation {
            rule: String::from("approved_calendar_exists"),
            message,
        },
        DomainError::AmendmentNotPending { .. } => ApiError::DomainRuleViolation {
            rule: String::from("amendment_pending"),
            message,
        },
        DomainError::InvalidAmendmentChanges { .. } => ApiError::InvalidInput {
            field: String::from("proposed_changes"),
            message,
        },
        DomainError::InvalidField { field, .. } => ApiError::InvalidInput { field, message },
        DomainError::DateArithmeticOverflow { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Stale status-guarded replacements surface as bad requests (the entity is
/// no longer in the state the caller observed); everything else is an
/// internal failure the caller may retry at its own policy.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}' does not exist"),
        },
        PersistenceError::StatusConflict { .. } => ApiError::DomainRuleViolation {
            rule: String::from("stale_status"),
            message: err.to_string(),
        },
        PersistenceError::DuplicateId { .. }
        | PersistenceError::Serialization(_)
        | PersistenceError::Backend(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
