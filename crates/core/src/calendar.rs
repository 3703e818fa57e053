// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar workflow transitions.
//!
//! Owns the annual activity calendar from draft through submission, the
//! dynamic approval chain, and the materialization of immutable event
//! records on final approval. Functions here are pure: they take the current
//! document, validate the transition, and return the new document plus the
//! approval-log record; the orchestration layer persists both.

use gymkhana_audit::{LogAction, LogRecord};
use gymkhana_domain::{
    AcademicYear, Actor, ApprovalStage, Calendar, CalendarEvent, CalendarStatus, ChainAdvance,
    DomainError, Event, advance, begin_chain, ensure_current_approver, overlapping_pairs,
    proposal_due_date, select_chain, validate_calendar_events,
};
use time::OffsetDateTime;

/// Input for creating a calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalendar {
    /// The validated academic year.
    pub academic_year: AcademicYear,
    /// Initial event drafts (may be empty; submission requires at least one).
    pub events: Vec<CalendarEvent>,
}

/// A calendar transition together with its approval-log record.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTransition {
    /// The calendar after the transition.
    pub calendar: Calendar,
    /// The log record describing the transition.
    pub log: LogRecord,
}

/// A pair of embedded drafts whose scheduled ranges conflict.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOverlap {
    /// The earlier-indexed draft.
    pub first: CalendarEvent,
    /// The later-indexed draft.
    pub second: CalendarEvent,
}

/// The outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Overlapping drafts were found and the override flag was not set.
    /// The calendar was NOT mutated; the caller must re-invoke with
    /// `allow_overlapping_dates` to proceed.
    Conflicts(Vec<EventOverlap>),
    /// The calendar moved to the Student Affairs stage.
    Submitted(CalendarTransition),
}

/// The outcome of an approval, including any materialized events.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarApproval {
    /// The calendar after the approval.
    pub calendar: Calendar,
    /// Events materialized by final approval (empty at intermediate stages).
    pub events: Vec<Event>,
    /// The log record describing the approval.
    pub log: LogRecord,
}

/// Creates a draft calendar.
///
/// # Arguments
///
/// * `input` - The academic year and initial drafts
/// * `created_by` - Actor id of the creating administrator
/// * `year_taken` - Whether a calendar already exists for the year
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::DuplicateAcademicYear` if the year is taken
/// * `DomainError::InvalidField` if a draft fails validation
pub fn create(
    input: NewCalendar,
    created_by: &str,
    year_taken: bool,
    now: OffsetDateTime,
) -> Result<Calendar, DomainError> {
    if year_taken {
        return Err(DomainError::DuplicateAcademicYear(input.academic_year));
    }

    validate_calendar_events(&input.events)?;

    Ok(Calendar::new(
        input.academic_year,
        input.events,
        created_by.to_string(),
        now,
    ))
}

/// Replaces a calendar's embedded drafts.
///
/// The General Secretary may edit drafts and rejected calendars; the
/// President may additionally edit at `pending_president` (legacy documents
/// only; the submission path no longer produces that status). Editing a
/// rejected calendar clears its rejection metadata and returns it to draft.
///
/// # Arguments
///
/// * `calendar` - The current document
/// * `events` - The replacement drafts
/// * `actor` - The editing actor
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::CalendarLocked` if the calendar is locked
/// * `DomainError::NotCalendarEditor` if the actor's role may not edit
/// * `DomainError::CalendarNotEditable` if the status forbids the edit
/// * `DomainError::InvalidField` if a draft fails validation
pub fn update_events(
    calendar: &Calendar,
    events: Vec<CalendarEvent>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<Calendar, DomainError> {
    if calendar.is_locked {
        return Err(DomainError::CalendarLocked);
    }

    let editable: bool = if actor.is_general_secretary() {
        matches!(
            calendar.status,
            CalendarStatus::Draft | CalendarStatus::Rejected
        )
    } else if actor.is_president() {
        matches!(
            calendar.status,
            CalendarStatus::Draft | CalendarStatus::Rejected | CalendarStatus::PendingPresident
        )
    } else {
        return Err(DomainError::NotCalendarEditor {
            role: actor.descriptor_label().to_string(),
        });
    };

    if !editable {
        return Err(DomainError::CalendarNotEditable {
            status: calendar.status,
        });
    }

    validate_calendar_events(&events)?;

    let mut updated: Calendar = calendar.clone();
    if updated.status == CalendarStatus::Rejected {
        updated.clear_rejection();
        updated.status = CalendarStatus::Draft;
    }
    updated.events = events;
    updated.updated_at = now;

    Ok(updated)
}

/// Toggles the business-level edit lock.
///
/// # Arguments
///
/// * `calendar` - The current document
/// * `locked` - The target lock state
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `DomainError::LockStateUnchanged` if the calendar is already in
/// the target state (guards against no-op double toggles).
pub fn set_locked(
    calendar: &Calendar,
    locked: bool,
    now: OffsetDateTime,
) -> Result<Calendar, DomainError> {
    if calendar.is_locked == locked {
        return Err(DomainError::LockStateUnchanged { locked });
    }

    let mut updated: Calendar = calendar.clone();
    updated.is_locked = locked;
    updated.updated_at = now;

    Ok(updated)
}

/// Submits a draft calendar for approval.
///
/// Runs the overlap detector pairwise over the embedded drafts. Conflicts
/// are reported without mutating anything unless `allow_overlapping_dates`
/// is set. The President stage is submit-only: a successful submission moves
/// straight to `pending_student_affairs`.
///
/// # Arguments
///
/// * `calendar` - The current document
/// * `actor` - The submitting actor (must be the Gymkhana President)
/// * `allow_overlapping_dates` - Whether schedule conflicts are acceptable
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NoEventsToSubmit` if the calendar has no drafts
///   (checked first, whoever submits)
/// * `DomainError::WrongSubmitter` if the actor is not the President
/// * `DomainError::SubmitFromNonDraft` if the calendar is not a draft
pub fn submit(
    calendar: &Calendar,
    actor: &Actor,
    allow_overlapping_dates: bool,
    now: OffsetDateTime,
) -> Result<SubmitOutcome, DomainError> {
    if calendar.events.is_empty() {
        return Err(DomainError::NoEventsToSubmit);
    }

    if !actor.is_president() {
        return Err(DomainError::WrongSubmitter {
            required: "Gymkhana President",
        });
    }

    if calendar.status != CalendarStatus::Draft {
        return Err(DomainError::SubmitFromNonDraft {
            status: calendar.status,
        });
    }

    let ranges: Vec<_> = calendar
        .events
        .iter()
        .map(CalendarEvent::date_range)
        .collect();
    let conflicts: Vec<(usize, usize)> = overlapping_pairs(&ranges);

    if !conflicts.is_empty() && !allow_overlapping_dates {
        let overlaps: Vec<EventOverlap> = conflicts
            .into_iter()
            .map(|(i, j)| EventOverlap {
                first: calendar.events[i].clone(),
                second: calendar.events[j].clone(),
            })
            .collect();
        return Ok(SubmitOutcome::Conflicts(overlaps));
    }

    let mut updated: Calendar = calendar.clone();
    updated.status = CalendarStatus::PendingStudentAffairs;
    updated.current_approval_stage = Some(ApprovalStage::StudentAffairs);
    updated.submitted_by = Some(actor.id.clone());
    updated.submitted_at = Some(now);
    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Submitted,
        actor.id.clone(),
        None,
    );

    Ok(SubmitOutcome::Submitted(CalendarTransition {
        calendar: updated,
        log,
    }))
}

/// Approves the calendar at its current stage.
///
/// At the Student Affairs stage a chain selection is mandatory and becomes
/// the immutable `custom_approval_chain` for the rest of the cycle. Later
/// stages advance by chain index, falling back to the static table for
/// legacy documents. Completing the chain approves the calendar and
/// materializes one immutable event per embedded draft, each with the
/// precomputed proposal due date.
///
/// # Arguments
///
/// * `calendar` - The current document
/// * `actor` - The approving actor
/// * `next_stages` - The chain selection (mandatory at Student Affairs)
/// * `comments` - Optional approval comments
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the calendar is not pending
/// * `DomainError::WrongApprover` if the actor does not own the stage
/// * `DomainError::ChainSelectionRequired` / `InvalidChainSelection` /
///   `UnknownStage` for bad chain selections
pub fn approve(
    calendar: &Calendar,
    actor: &Actor,
    next_stages: Option<&[String]>,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<CalendarApproval, DomainError> {
    let stage: ApprovalStage = ensure_current_approver(calendar.status, actor)?;

    let mut updated: Calendar = calendar.clone();
    let mut materialized: Vec<Event> = Vec::new();

    if stage == ApprovalStage::StudentAffairs {
        let labels: &[String] = next_stages.ok_or(DomainError::ChainSelectionRequired)?;
        let chain: Vec<ApprovalStage> = select_chain(labels)?;
        let (first_stage, first_status, index) = begin_chain::<CalendarStatus>(&chain)?;

        updated.custom_approval_chain = chain;
        updated.current_chain_index = Some(index);
        updated.status = first_status;
        updated.current_approval_stage = Some(first_stage);
    } else {
        match advance(
            calendar.status,
            &calendar.custom_approval_chain,
            calendar.current_chain_index,
        )? {
            ChainAdvance::Next {
                status,
                stage: next_stage,
                chain_index,
            } => {
                updated.status = status;
                updated.current_approval_stage = Some(next_stage);
                updated.current_chain_index = chain_index;
            }
            ChainAdvance::Complete => {
                updated.status = CalendarStatus::Approved;
                updated.current_approval_stage = None;
                updated.current_chain_index = None;
                updated.approved_by = Some(actor.id.clone());
                updated.approved_at = Some(now);

                for draft in &calendar.events {
                    let due: time::Date = proposal_due_date(draft.start_date)?;
                    materialized.push(Event::materialize(
                        Some(calendar.id.clone()),
                        draft,
                        due,
                        now,
                    ));
                }
            }
        }
    }

    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        stage.label().to_string(),
        LogAction::Approved,
        actor.id.clone(),
        comments,
    );

    Ok(CalendarApproval {
        calendar: updated,
        events: materialized,
        log,
    })
}

/// Rejects the calendar at its current stage.
///
/// Rejection is terminal but editable: the document keeps its rejection
/// metadata until an edit returns it to draft.
///
/// # Arguments
///
/// * `calendar` - The current document
/// * `actor` - The rejecting actor
/// * `reason` - The rejection reason (required)
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the calendar is not pending
/// * `DomainError::WrongApprover` if the actor does not own the stage
/// * `DomainError::InvalidField` if the reason is empty
pub fn reject(
    calendar: &Calendar,
    actor: &Actor,
    reason: String,
    now: OffsetDateTime,
) -> Result<CalendarTransition, DomainError> {
    let stage: ApprovalStage = ensure_current_approver(calendar.status, actor)?;

    if reason.trim().is_empty() {
        return Err(DomainError::InvalidField {
            field: String::from("reason"),
            message: String::from("A rejection reason is required"),
        });
    }

    let mut updated: Calendar = calendar.clone();
    updated.status = CalendarStatus::Rejected;
    updated.current_approval_stage = None;
    updated.rejected_by = Some(actor.id.clone());
    updated.rejected_at = Some(now);
    updated.rejection_reason = Some(reason.clone());
    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        stage.label().to_string(),
        LogAction::Rejected,
        actor.id.clone(),
        Some(reason),
    );

    Ok(CalendarTransition {
        calendar: updated,
        log,
    })
}
