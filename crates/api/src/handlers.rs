// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each mutating handler follows the same shape: fetch the current
//! documents, authorize, run the pure workflow transition, persist the
//! results (status-guarded where the transition advanced a status), then
//! append the approval-log entry. Appending the log after the entity write
//! means a crash can never leave an audit entry without its state change; a
//! failed log append is reported but does not roll the entity back.

use gymkhana::{amendment, calendar, expense, proposal};
use gymkhana_audit::{ApprovalLogEntry, EntityRef, LogRecord};
use gymkhana_domain::{
    AcademicYear, Actor, Amendment, AmendmentStatus, AmendmentType, Calendar, CalendarStatus,
    Clock, Event, EventStatus, Expense, ExpenseApprovalStatus, Proposal, ProposalStatus,
    proposal_due_date, proposal_window, validate_days_until_due,
};
use gymkhana_persistence::Store;
use time::{Date, Duration, OffsetDateTime};
use tracing::error;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AmendmentInfo, AmendmentResponse, ApprovalLogInfo, ApproveCalendarRequest, ApproveCalendarResponse,
    ApproveExpenseRequest, ApproveExpenseResponse, ApproveProposalRequest,
    ApproveProposalResponse, CalendarEventInfo, CalendarEventInput, CalendarInfo,
    CalendarResponse, ConflictInfo, CreateAmendmentRequest, CreateCalendarRequest,
    CreateProposalRequest, EventInfo, ExpenseInfo, ExpenseResponse, PendingProposalInfo,
    PendingProposalsQuery, ProposalInfo, ProposalResponse, RejectCalendarRequest,
    RejectProposalRequest, RequestRevisionRequest, ReviewAmendmentRequest,
    ReviewAmendmentResponse, SubmitCalendarRequest, SubmitCalendarResponse, SubmitExpenseRequest,
    UpdateCalendarRequest, UpdateExpenseRequest, UpdateProposalRequest, bills, expense_lines,
};

/// Appends an approval-log entry alongside an already-committed entity write.
///
/// The entity write and the log append are logically independent; if the
/// append fails the transition stands and the failure is reported.
fn append_log_entry<S: Store>(
    store: &mut S,
    entity: EntityRef,
    record: LogRecord,
    now: OffsetDateTime,
) {
    let entry: ApprovalLogEntry = ApprovalLogEntry::new(entity, record, now);
    if let Err(err) = store.append_log(entry) {
        error!(%err, "approval log append failed; entity transition already committed");
    }
}

fn fetch_calendar<S: Store>(store: &S, id: &str) -> Result<Calendar, ApiError> {
    store
        .find_calendar(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Calendar"),
            message: format!("Calendar '{id}' does not exist"),
        })
}

fn fetch_event<S: Store>(store: &S, id: &str) -> Result<Event, ApiError> {
    store
        .find_event(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event '{id}' does not exist"),
        })
}

fn fetch_proposal<S: Store>(store: &S, id: &str) -> Result<Proposal, ApiError> {
    store
        .find_proposal(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Proposal"),
            message: format!("Proposal '{id}' does not exist"),
        })
}

fn fetch_expense<S: Store>(store: &S, id: &str) -> Result<Expense, ApiError> {
    store
        .find_expense(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Expense"),
            message: format!("Expense '{id}' does not exist"),
        })
}

fn fetch_amendment<S: Store>(store: &S, id: &str) -> Result<Amendment, ApiError> {
    store
        .find_amendment(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Amendment"),
            message: format!("Amendment '{id}' does not exist"),
        })
}

// ---------------------------------------------------------------------------
// Calendar operations
// ---------------------------------------------------------------------------

/// Creates a draft calendar for an academic year.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the year
/// string is invalid, a calendar for the year already exists, or a draft
/// fails validation.
pub fn create_calendar<S: Store>(
    store: &mut S,
    request: CreateCalendarRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    AuthorizationService::authorize_create_calendar(actor)?;

    let academic_year: AcademicYear =
        AcademicYear::parse(&request.academic_year).map_err(translate_domain_error)?;
    let year_taken: bool = store
        .find_calendar_by_year(&academic_year)
        .map_err(translate_persistence_error)?
        .is_some();

    let events = request
        .events
        .into_iter()
        .map(CalendarEventInput::into_domain)
        .collect();

    let created: Calendar = calendar::create(
        calendar::NewCalendar {
            academic_year,
            events,
        },
        &actor.id,
        year_taken,
        clock.now_utc(),
    )
    .map_err(translate_domain_error)?;

    let stored: Calendar = store
        .insert_calendar(created)
        .map_err(translate_persistence_error)?;

    Ok(CalendarResponse {
        calendar: CalendarInfo::from(&stored),
        message: format!(
            "Calendar for {} created",
            stored.academic_year.value()
        ),
    })
}

/// Returns a calendar by id.
///
/// # Errors
///
/// Returns an error if the calendar does not exist.
pub fn get_calendar_by_id<S: Store>(store: &S, id: &str) -> Result<CalendarInfo, ApiError> {
    Ok(CalendarInfo::from(&fetch_calendar(store, id)?))
}

/// Returns the calendar for an academic year.
///
/// # Errors
///
/// Returns an error if the year string is invalid or no calendar exists.
pub fn get_calendar_by_year<S: Store>(
    store: &S,
    academic_year: &str,
) -> Result<CalendarInfo, ApiError> {
    let year: AcademicYear =
        AcademicYear::parse(academic_year).map_err(translate_domain_error)?;
    let calendar: Calendar = store
        .find_calendar_by_year(&year)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Calendar"),
            message: format!("No calendar exists for academic year {academic_year}"),
        })?;
    Ok(CalendarInfo::from(&calendar))
}

/// Lists all calendars.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn get_calendars<S: Store>(store: &S) -> Result<Vec<CalendarInfo>, ApiError> {
    Ok(store
        .list_calendars()
        .map_err(translate_persistence_error)?
        .iter()
        .map(CalendarInfo::from)
        .collect())
}

/// Replaces a calendar's embedded drafts.
///
/// # Errors
///
/// Returns an error if the calendar does not exist, is locked, or the actor
/// or status forbids the edit.
pub fn update_calendar<S: Store>(
    store: &mut S,
    id: &str,
    request: UpdateCalendarRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    let current: Calendar = fetch_calendar(store, id)?;

    let events = request
        .events
        .into_iter()
        .map(CalendarEventInput::into_domain)
        .collect();
    let updated: Calendar = calendar::update_events(&current, events, actor, clock.now_utc())
        .map_err(translate_domain_error)?;

    store
        .replace_calendar(&updated, Some(current.status))
        .map_err(translate_persistence_error)?;

    Ok(CalendarResponse {
        calendar: CalendarInfo::from(&updated),
        message: String::from("Calendar events updated"),
    })
}

fn set_calendar_lock<S: Store>(
    store: &mut S,
    id: &str,
    locked: bool,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    let current: Calendar = fetch_calendar(store, id)?;
    let updated: Calendar =
        calendar::set_locked(&current, locked, clock.now_utc()).map_err(translate_domain_error)?;

    store
        .replace_calendar(&updated, None)
        .map_err(translate_persistence_error)?;

    Ok(CalendarResponse {
        calendar: CalendarInfo::from(&updated),
        message: if locked {
            String::from("Calendar locked")
        } else {
            String::from("Calendar unlocked")
        },
    })
}

/// Locks a calendar against direct edits.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the
/// calendar does not exist, or it is already locked.
pub fn lock_calendar<S: Store>(
    store: &mut S,
    id: &str,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    AuthorizationService::authorize_lock_calendar(actor)?;
    set_calendar_lock(store, id, true, clock)
}

/// Unlocks a calendar for direct edits.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the
/// calendar does not exist, or it is already unlocked.
pub fn unlock_calendar<S: Store>(
    store: &mut S,
    id: &str,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    AuthorizationService::authorize_unlock_calendar(actor)?;
    set_calendar_lock(store, id, false, clock)
}

/// Submits a draft calendar for approval.
///
/// When overlapping drafts are found and the override flag is not set, the
/// response describes the conflicting pairs and nothing is persisted; the
/// caller must re-invoke with `allow_overlapping_dates` to proceed.
///
/// # Errors
///
/// Returns an error if the calendar does not exist, the actor is not the
/// President, the calendar is not a draft, or it has no events.
pub fn submit_calendar<S: Store>(
    store: &mut S,
    id: &str,
    request: SubmitCalendarRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<SubmitCalendarResponse, ApiError> {
    let current: Calendar = fetch_calendar(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    match calendar::submit(&current, actor, request.allow_overlapping_dates, now)
        .map_err(translate_domain_error)?
    {
        calendar::SubmitOutcome::Conflicts(overlaps) => Ok(SubmitCalendarResponse {
            submitted: false,
            conflicts: overlaps
                .iter()
                .map(|overlap| ConflictInfo {
                    first: CalendarEventInfo::from(&overlap.first),
                    second: CalendarEventInfo::from(&overlap.second),
                })
                .collect(),
            calendar: None,
            message: String::from(
                "Submission withheld: events have overlapping dates; re-submit with allow_overlapping_dates to proceed",
            ),
        }),
        calendar::SubmitOutcome::Submitted(transition) => {
            store
                .replace_calendar(&transition.calendar, Some(current.status))
                .map_err(translate_persistence_error)?;
            append_log_entry(
                store,
                EntityRef::Calendar(transition.calendar.id.clone()),
                transition.log,
                now,
            );

            Ok(SubmitCalendarResponse {
                submitted: true,
                conflicts: Vec::new(),
                calendar: Some(CalendarInfo::from(&transition.calendar)),
                message: String::from("Calendar submitted for approval"),
            })
        }
    }
}

/// Approves a calendar at its current stage.
///
/// # Errors
///
/// Returns an error if the calendar does not exist, is not pending, the
/// actor does not own the stage, or the chain selection is invalid.
pub fn approve_calendar<S: Store>(
    store: &mut S,
    id: &str,
    request: ApproveCalendarRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ApproveCalendarResponse, ApiError> {
    let current: Calendar = fetch_calendar(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let approval = calendar::approve(
        &current,
        actor,
        request.next_approval_stages.as_deref(),
        request.comments,
        now,
    )
    .map_err(translate_domain_error)?;

    store
        .replace_calendar(&approval.calendar, Some(current.status))
        .map_err(translate_persistence_error)?;

    let mut materialized: Vec<EventInfo> = Vec::with_capacity(approval.events.len());
    for event in approval.events {
        let stored: Event = store
            .insert_event(event)
            .map_err(translate_persistence_error)?;
        materialized.push(EventInfo::from(&stored));
    }

    append_log_entry(
        store,
        EntityRef::Calendar(approval.calendar.id.clone()),
        approval.log,
        now,
    );

    let message: String = if approval.calendar.status == CalendarStatus::Approved {
        format!(
            "Calendar approved; {} events materialized",
            materialized.len()
        )
    } else {
        format!(
            "Calendar advanced to '{}'",
            approval.calendar.status.as_str()
        )
    };

    Ok(ApproveCalendarResponse {
        calendar: CalendarInfo::from(&approval.calendar),
        materialized_events: materialized,
        message,
    })
}

/// Rejects a calendar at its current stage.
///
/// # Errors
///
/// Returns an error if the calendar does not exist, is not pending, the
/// actor does not own the stage, or the reason is empty.
pub fn reject_calendar<S: Store>(
    store: &mut S,
    id: &str,
    request: RejectCalendarRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<CalendarResponse, ApiError> {
    let current: Calendar = fetch_calendar(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let transition = calendar::reject(&current, actor, request.reason, now)
        .map_err(translate_domain_error)?;

    store
        .replace_calendar(&transition.calendar, Some(current.status))
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Calendar(transition.calendar.id.clone()),
        transition.log,
        now,
    );

    Ok(CalendarResponse {
        calendar: CalendarInfo::from(&transition.calendar),
        message: String::from("Calendar rejected"),
    })
}

/// Returns the approval history for an entity.
///
/// # Errors
///
/// Returns an error if the entity kind is unknown or the query fails.
pub fn get_approval_history<S: Store>(
    store: &S,
    entity_kind: &str,
    entity_id: &str,
) -> Result<Vec<ApprovalLogInfo>, ApiError> {
    let entity: EntityRef = match entity_kind {
        "calendar" => EntityRef::Calendar(entity_id.to_string()),
        "proposal" => EntityRef::Proposal(entity_id.to_string()),
        "expense" => EntityRef::Expense(entity_id.to_string()),
        "amendment" => EntityRef::Amendment(entity_id.to_string()),
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("entity_kind"),
                message: format!(
                    "Unknown entity kind '{entity_kind}'; expected calendar, proposal, expense, or amendment"
                ),
            });
        }
    };

    Ok(store
        .logs_for_entity(&entity)
        .map_err(translate_persistence_error)?
        .iter()
        .map(ApprovalLogInfo::from)
        .collect())
}

// ---------------------------------------------------------------------------
// Proposal operations
// ---------------------------------------------------------------------------

/// Submits a proposal for an event.
///
/// # Errors
///
/// Returns an error if the event does not exist or the workflow rejects the
/// submission (duplicate, closed event, wrong submitter, window not open).
pub fn create_proposal<S: Store>(
    store: &mut S,
    request: CreateProposalRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ProposalResponse, ApiError> {
    let event: Event = fetch_event(store, &request.event_id)?;
    let now: OffsetDateTime = clock.now_utc();

    let creation = proposal::create(
        &event,
        proposal::NewProposal {
            objectives: request.objectives,
            expense_breakdown: expense_lines(request.expense_breakdown),
        },
        actor,
        clock.today_utc(),
        now,
    )
    .map_err(translate_domain_error)?;

    let stored: Proposal = store
        .insert_proposal(creation.proposal)
        .map_err(translate_persistence_error)?;

    let mut updated_event: Event = creation.event;
    updated_event.proposal_id = Some(stored.id.clone());
    store
        .replace_event(&updated_event)
        .map_err(translate_persistence_error)?;

    append_log_entry(
        store,
        EntityRef::Proposal(stored.id.clone()),
        creation.log,
        now,
    );

    Ok(ProposalResponse {
        proposal: ProposalInfo::from(&stored),
        message: String::from("Proposal submitted"),
    })
}

/// Edits a proposal, resubmitting it when edited after rejection/revision.
///
/// # Errors
///
/// Returns an error if the proposal or its event does not exist, or the
/// actor/status combination forbids the edit.
pub fn update_proposal<S: Store>(
    store: &mut S,
    id: &str,
    request: UpdateProposalRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ProposalResponse, ApiError> {
    let current: Proposal = fetch_proposal(store, id)?;
    let event: Event = fetch_event(store, &current.event_id)?;
    let now: OffsetDateTime = clock.now_utc();

    let update = proposal::update(
        &current,
        &event,
        proposal::UpdateProposal {
            objectives: request.objectives,
            expense_breakdown: request.expense_breakdown.map(expense_lines),
        },
        actor,
        now,
    )
    .map_err(translate_domain_error)?;

    store
        .replace_proposal(&update.proposal, Some(current.status))
        .map_err(translate_persistence_error)?;

    let resubmitted: bool = update.log.is_some();
    if let Some(record) = update.log {
        append_log_entry(store, EntityRef::Proposal(update.proposal.id.clone()), record, now);
    }

    Ok(ProposalResponse {
        proposal: ProposalInfo::from(&update.proposal),
        message: if resubmitted {
            String::from("Proposal revised and resubmitted")
        } else {
            String::from("Proposal updated")
        },
    })
}

/// Approves a proposal at its current stage.
///
/// # Errors
///
/// Returns an error if the proposal or its event does not exist, the
/// proposal is not pending, the actor does not own the stage, or the chain
/// selection is invalid.
pub fn approve_proposal<S: Store>(
    store: &mut S,
    id: &str,
    request: ApproveProposalRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ApproveProposalResponse, ApiError> {
    let current: Proposal = fetch_proposal(store, id)?;
    let event: Event = fetch_event(store, &current.event_id)?;
    let now: OffsetDateTime = clock.now_utc();

    let approval = proposal::approve(
        &current,
        &event,
        actor,
        request.next_approval_stages.as_deref(),
        request.comments,
        now,
    )
    .map_err(translate_domain_error)?;

    store
        .replace_proposal(&approval.proposal, Some(current.status))
        .map_err(translate_persistence_error)?;

    let event_info: Option<EventInfo> = match approval.event {
        Some(updated_event) => {
            store
                .replace_event(&updated_event)
                .map_err(translate_persistence_error)?;
            Some(EventInfo::from(&updated_event))
        }
        None => None,
    };

    append_log_entry(
        store,
        EntityRef::Proposal(approval.proposal.id.clone()),
        approval.log,
        now,
    );

    let message: String = if event_info.is_some() {
        String::from("Proposal approved")
    } else {
        format!(
            "Proposal advanced to '{}'",
            approval.proposal.status.as_str()
        )
    };

    Ok(ApproveProposalResponse {
        proposal: ProposalInfo::from(&approval.proposal),
        event: event_info,
        message,
    })
}

/// Rejects a proposal at its current stage.
///
/// # Errors
///
/// Returns an error if the proposal does not exist, is not pending, the
/// actor does not own the stage, or the reason is empty.
pub fn reject_proposal<S: Store>(
    store: &mut S,
    id: &str,
    request: RejectProposalRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ProposalResponse, ApiError> {
    let current: Proposal = fetch_proposal(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let transition = proposal::reject(&current, actor, request.reason, now)
        .map_err(translate_domain_error)?;

    store
        .replace_proposal(&transition.proposal, Some(current.status))
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Proposal(transition.proposal.id.clone()),
        transition.log,
        now,
    );

    Ok(ProposalResponse {
        proposal: ProposalInfo::from(&transition.proposal),
        message: String::from("Proposal rejected"),
    })
}

/// Sends a proposal back to its submitter for revision.
///
/// # Errors
///
/// Returns an error if the proposal does not exist, is not pending, or the
/// actor does not own the stage.
pub fn request_revision<S: Store>(
    store: &mut S,
    id: &str,
    request: RequestRevisionRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ProposalResponse, ApiError> {
    let current: Proposal = fetch_proposal(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let transition = proposal::request_revision(&current, actor, request.comments, now)
        .map_err(translate_domain_error)?;

    store
        .replace_proposal(&transition.proposal, Some(current.status))
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Proposal(transition.proposal.id.clone()),
        transition.log,
        now,
    );

    Ok(ProposalResponse {
        proposal: ProposalInfo::from(&transition.proposal),
        message: String::from("Revision requested"),
    })
}

/// Returns a proposal by id.
///
/// # Errors
///
/// Returns an error if the proposal does not exist.
pub fn get_proposal_by_id<S: Store>(store: &S, id: &str) -> Result<ProposalInfo, ApiError> {
    Ok(ProposalInfo::from(&fetch_proposal(store, id)?))
}

/// Returns the proposal linked to an event.
///
/// # Errors
///
/// Returns an error if no proposal exists for the event.
pub fn get_proposal_by_event<S: Store>(
    store: &S,
    event_id: &str,
) -> Result<ProposalInfo, ApiError> {
    let proposal: Proposal = store
        .find_proposal_by_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Proposal"),
            message: format!("No proposal exists for event '{event_id}'"),
        })?;
    Ok(ProposalInfo::from(&proposal))
}

/// Lists standard events with no submitted proposal whose start falls within
/// the horizon, annotated with their window position.
///
/// # Errors
///
/// Returns an error if the horizon is negative or the query fails.
pub fn get_pending_proposals<S: Store>(
    store: &S,
    query: PendingProposalsQuery,
    clock: &dyn Clock,
) -> Result<Vec<PendingProposalInfo>, ApiError> {
    validate_days_until_due(query.days_until_due).map_err(translate_domain_error)?;

    let today: Date = clock.today_utc();
    let horizon: Date = today
        .checked_add(Duration::days(query.days_until_due))
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("days_until_due"),
            message: String::from("Horizon is too far in the future"),
        })?;

    let events: Vec<Event> = store
        .list_events_starting_between(today, horizon)
        .map_err(translate_persistence_error)?;

    let mut pending: Vec<PendingProposalInfo> = Vec::new();
    for event in events {
        if event.is_mega_event
            || event.proposal_submitted
            || event.status != EventStatus::Upcoming
        {
            continue;
        }

        // Due dates are cached; compute for display when a record lacks one
        let due: Date = match event.proposal_due_date {
            Some(due) => due,
            None => proposal_due_date(event.scheduled_start_date)
                .map_err(translate_domain_error)?,
        };
        let window = proposal_window(today, event.scheduled_start_date, due);

        pending.push(PendingProposalInfo {
            event: EventInfo::from(&event),
            days_until_event_start: window.days_until_event_start,
            days_until_proposal_due: window.days_until_proposal_due,
            is_proposal_window_open: window.is_window_open,
        });
    }

    pending.sort_by_key(|info| info.days_until_event_start);
    Ok(pending)
}

/// Lists proposals awaiting the acting actor's stage.
///
/// # Errors
///
/// Returns an error if the actor sits at no approval stage.
pub fn get_proposals_for_approval<S: Store>(
    store: &S,
    actor: &Actor,
) -> Result<Vec<ProposalInfo>, ApiError> {
    let stage = actor
        .approval_stage()
        .ok_or_else(|| ApiError::Unauthorized {
            action: String::from("get_proposals_for_approval"),
            required_role: String::from("an approval stage"),
        })?;

    let status: ProposalStatus = ProposalStatus::for_stage(stage);
    Ok(store
        .list_proposals_with_status(&[status])
        .map_err(translate_persistence_error)?
        .iter()
        .map(ProposalInfo::from)
        .collect())
}

// ---------------------------------------------------------------------------
// Expense operations
// ---------------------------------------------------------------------------

/// Submits the expense record for an event.
///
/// # Errors
///
/// Returns an error if the event does not exist or the workflow rejects the
/// submission (wrong submitter, event not settled, duplicate, bad bills).
pub fn submit_expense<S: Store>(
    store: &mut S,
    request: SubmitExpenseRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ExpenseResponse, ApiError> {
    let event: Event = fetch_event(store, &request.event_id)?;
    let now: OffsetDateTime = clock.now_utc();

    let proposal: Option<Proposal> = store
        .find_proposal_by_event(&event.id)
        .map_err(translate_persistence_error)?;
    let has_existing: bool = store
        .find_expense_by_event(&event.id)
        .map_err(translate_persistence_error)?
        .is_some();

    let creation = expense::submit(
        &event,
        proposal.as_ref(),
        expense::NewExpense {
            bills: bills(request.bills),
        },
        actor,
        has_existing,
        now,
    )
    .map_err(translate_domain_error)?;

    let stored: Expense = store
        .insert_expense(creation.expense)
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Expense(stored.id.clone()),
        creation.log,
        now,
    );

    Ok(ExpenseResponse {
        expense: ExpenseInfo::from(&stored),
        message: String::from("Expense submitted"),
    })
}

/// Replaces the bills of a pending expense record.
///
/// # Errors
///
/// Returns an error if the expense does not exist, is already approved, or
/// the actor/bills fail validation.
pub fn update_expense<S: Store>(
    store: &mut S,
    id: &str,
    request: UpdateExpenseRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ExpenseResponse, ApiError> {
    let current: Expense = fetch_expense(store, id)?;

    let updated: Expense = expense::update(&current, bills(request.bills), actor, clock.now_utc())
        .map_err(translate_domain_error)?;

    store
        .replace_expense(&updated, Some(ExpenseApprovalStatus::Pending))
        .map_err(translate_persistence_error)?;

    Ok(ExpenseResponse {
        expense: ExpenseInfo::from(&updated),
        message: String::from("Expense updated"),
    })
}

/// Approves a pending expense record, completing its event.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the
/// expense or event does not exist, or the expense is already approved.
pub fn approve_expense<S: Store>(
    store: &mut S,
    id: &str,
    request: ApproveExpenseRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ApproveExpenseResponse, ApiError> {
    AuthorizationService::authorize_approve_expense(actor)?;

    let current: Expense = fetch_expense(store, id)?;
    let event: Event = fetch_event(store, &current.event_id)?;
    let now: OffsetDateTime = clock.now_utc();

    let approval = expense::approve(&current, &event, actor, request.comments, now)
        .map_err(translate_domain_error)?;

    store
        .replace_expense(&approval.expense, Some(ExpenseApprovalStatus::Pending))
        .map_err(translate_persistence_error)?;
    store
        .replace_event(&approval.event)
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Expense(approval.expense.id.clone()),
        approval.log,
        now,
    );

    Ok(ApproveExpenseResponse {
        expense: ExpenseInfo::from(&approval.expense),
        event: EventInfo::from(&approval.event),
        message: String::from("Expense approved; event completed"),
    })
}

/// Returns an expense record by id.
///
/// # Errors
///
/// Returns an error if the expense does not exist.
pub fn get_expense_by_id<S: Store>(
    store: &S,
    id: &str,
) -> Result<ExpenseInfo, ApiError> {
    Ok(ExpenseInfo::from(&fetch_expense(
        store, id,
    )?))
}

/// Returns the expense record linked to an event.
///
/// # Errors
///
/// Returns an error if no expense exists for the event.
pub fn get_expense_by_event<S: Store>(
    store: &S,
    event_id: &str,
) -> Result<ExpenseInfo, ApiError> {
    let expense: Expense = store
        .find_expense_by_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Expense"),
            message: format!("No expense exists for event '{event_id}'"),
        })?;
    Ok(ExpenseInfo::from(&expense))
}

// ---------------------------------------------------------------------------
// Amendment operations
// ---------------------------------------------------------------------------

/// Raises an amendment against a locked calendar or event.
///
/// # Errors
///
/// Returns an error if the actor is not the General Secretary, the target
/// event is missing for an edit, the amendment type is unknown, or no
/// approved calendar exists for a new event.
pub fn create_amendment<S: Store>(
    store: &mut S,
    request: CreateAmendmentRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<AmendmentResponse, ApiError> {
    let amendment_type: AmendmentType =
        AmendmentType::parse(&request.amendment_type).map_err(translate_domain_error)?;
    let now: OffsetDateTime = clock.now_utc();

    let target_event: Option<Event> = match &request.event_id {
        Some(event_id) => Some(fetch_event(store, event_id)?),
        None => None,
    };
    let latest_approved: Option<Calendar> = store
        .latest_approved_calendar()
        .map_err(translate_persistence_error)?;

    let creation = amendment::create(
        amendment::NewAmendment {
            amendment_type,
            event_id: request.event_id,
            proposed_changes: request.proposed_changes.into_domain(),
            reason: request.reason,
        },
        target_event.as_ref(),
        latest_approved.as_ref(),
        actor,
        now,
    )
    .map_err(translate_domain_error)?;

    let stored: Amendment = store
        .insert_amendment(creation.amendment)
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Amendment(stored.id.clone()),
        creation.log,
        now,
    );

    Ok(AmendmentResponse {
        amendment: AmendmentInfo::from(&stored),
        message: String::from("Amendment submitted for review"),
    })
}

/// Approves a pending amendment, applying its change immediately.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the
/// amendment or its target does not exist, it was already reviewed, or a
/// new event lacks required fields.
pub fn approve_amendment<S: Store>(
    store: &mut S,
    id: &str,
    request: ReviewAmendmentRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ReviewAmendmentResponse, ApiError> {
    AuthorizationService::authorize_review_amendment(actor)?;

    let current: Amendment = fetch_amendment(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let target_event: Option<Event> = match &current.event_id {
        Some(event_id) => Some(fetch_event(store, event_id)?),
        None => None,
    };

    let review = amendment::approve(&current, target_event.as_ref(), actor, request.comments, now)
        .map_err(translate_domain_error)?;

    store
        .replace_amendment(&review.amendment, Some(AmendmentStatus::Pending))
        .map_err(translate_persistence_error)?;

    let event_info: Option<EventInfo> = match review.effect {
        Some(amendment::AmendmentEffect::Patched(event)) => {
            store
                .replace_event(&event)
                .map_err(translate_persistence_error)?;
            Some(EventInfo::from(&event))
        }
        Some(amendment::AmendmentEffect::Created(event)) => {
            let stored: Event = store
                .insert_event(event)
                .map_err(translate_persistence_error)?;
            Some(EventInfo::from(&stored))
        }
        None => None,
    };

    append_log_entry(
        store,
        EntityRef::Amendment(review.amendment.id.clone()),
        review.log,
        now,
    );

    Ok(ReviewAmendmentResponse {
        amendment: AmendmentInfo::from(&review.amendment),
        event: event_info,
        message: String::from("Amendment approved and applied"),
    })
}

/// Rejects a pending amendment without touching its target.
///
/// # Errors
///
/// Returns an error if the actor lacks administrative authority, the
/// amendment does not exist, or it was already reviewed.
pub fn reject_amendment<S: Store>(
    store: &mut S,
    id: &str,
    request: ReviewAmendmentRequest,
    actor: &Actor,
    clock: &dyn Clock,
) -> Result<ReviewAmendmentResponse, ApiError> {
    AuthorizationService::authorize_review_amendment(actor)?;

    let current: Amendment = fetch_amendment(store, id)?;
    let now: OffsetDateTime = clock.now_utc();

    let review = amendment::reject(&current, actor, request.comments, now)
        .map_err(translate_domain_error)?;

    store
        .replace_amendment(&review.amendment, Some(AmendmentStatus::Pending))
        .map_err(translate_persistence_error)?;
    append_log_entry(
        store,
        EntityRef::Amendment(review.amendment.id.clone()),
        review.log,
        now,
    );

    Ok(ReviewAmendmentResponse {
        amendment: AmendmentInfo::from(&review.amendment),
        event: None,
        message: String::from("Amendment rejected"),
    })
}

/// Lists amendments awaiting review.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn get_pending_amendments<S: Store>(
    store: &S,
) -> Result<Vec<AmendmentInfo>, ApiError> {
    Ok(store
        .list_pending_amendments()
        .map_err(translate_persistence_error)?
        .iter()
        .map(AmendmentInfo::from)
        .collect())
}
