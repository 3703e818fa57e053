// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Amendment workflow transitions.
//!
//! The only sanctioned bypass of the calendar edit lock: the General
//! Secretary raises an amendment, an administrator reviews it, and approval
//! applies the change immediately (patching an event or inserting a fresh
//! one). Rejection records the decision without touching the target.

use gymkhana_audit::{LogAction, LogRecord};
use gymkhana_domain::{
    Actor, Amendment, AmendmentStatus, AmendmentType, Calendar, CalendarEvent, DomainError, Event,
    ProposedChanges, proposal_due_date,
};
use time::{Date, OffsetDateTime};

/// Input for raising an amendment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAmendment {
    /// Whether this edits an existing event or adds a new one.
    pub amendment_type: AmendmentType,
    /// The target event (required for edits).
    pub event_id: Option<String>,
    /// The proposed field changes.
    pub proposed_changes: ProposedChanges,
    /// Why the amendment is being raised.
    pub reason: Option<String>,
}

/// The outcome of raising an amendment.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentCreation {
    /// The new amendment document (id assigned by the store).
    pub amendment: Amendment,
    /// The log record describing the submission.
    pub log: LogRecord,
}

/// The side effect applied by an approved amendment.
#[derive(Debug, Clone, PartialEq)]
pub enum AmendmentEffect {
    /// The target event was patched in place.
    Patched(Event),
    /// A fresh event was materialized under the amendment's calendar.
    Created(Event),
}

/// The outcome of reviewing an amendment.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentReview {
    /// The amendment after the review.
    pub amendment: Amendment,
    /// The applied side effect (approvals only).
    pub effect: Option<AmendmentEffect>,
    /// The log record describing the review.
    pub log: LogRecord,
}

/// Raises an amendment.
///
/// Edit amendments inherit their calendar from the target event; new-event
/// amendments attach to the most recently approved calendar.
///
/// # Arguments
///
/// * `input` - The amendment content
/// * `target_event` - The target event (resolved by the caller for edits)
/// * `latest_approved_calendar` - The newest approved calendar (for
///   new-event amendments)
/// * `actor` - The requesting actor (must be the General Secretary)
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::WrongSubmitter` if the actor is not the General Secretary
/// * `DomainError::AmendmentEventRequired` for edits without a target
/// * `DomainError::NoApprovedCalendar` for new events with nothing approved
pub fn create(
    input: NewAmendment,
    target_event: Option<&Event>,
    latest_approved_calendar: Option<&Calendar>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<AmendmentCreation, DomainError> {
    if !actor.is_general_secretary() {
        return Err(DomainError::WrongSubmitter {
            required: "General Secretary",
        });
    }

    let (calendar_id, event_id) = match input.amendment_type {
        AmendmentType::Edit => {
            let event: &Event = target_event.ok_or(DomainError::AmendmentEventRequired)?;
            (event.calendar_id.clone(), Some(event.id.clone()))
        }
        AmendmentType::NewEvent => {
            let calendar: &Calendar =
                latest_approved_calendar.ok_or(DomainError::NoApprovedCalendar)?;
            (Some(calendar.id.clone()), None)
        }
    };

    let amendment: Amendment = Amendment {
        id: String::new(),
        calendar_id,
        amendment_type: input.amendment_type,
        event_id,
        proposed_changes: input.proposed_changes,
        reason: input.reason,
        status: AmendmentStatus::Pending,
        requested_by: actor.id.clone(),
        reviewed_by: None,
        reviewed_at: None,
        review_comments: None,
        created_at: now,
    };

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Submitted,
        actor.id.clone(),
        None,
    );

    Ok(AmendmentCreation { amendment, log })
}

/// Builds the fresh event a new-event amendment materializes.
fn build_new_event(amendment: &Amendment, now: OffsetDateTime) -> Result<Event, DomainError> {
    let changes: &ProposedChanges = &amendment.proposed_changes;

    let title: String = changes
        .title
        .clone()
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| DomainError::InvalidAmendmentChanges {
            reason: String::from("a new event requires a title"),
        })?;
    let start_date: Date =
        changes
            .start_date
            .ok_or_else(|| DomainError::InvalidAmendmentChanges {
                reason: String::from("a new event requires a start date"),
            })?;
    let end_date: Date = changes
        .end_date
        .ok_or_else(|| DomainError::InvalidAmendmentChanges {
            reason: String::from("a new event requires an end date"),
        })?;

    let draft: CalendarEvent = CalendarEvent {
        title,
        category: changes
            .category
            .clone()
            .unwrap_or_else(|| String::from("general")),
        start_date,
        end_date,
        estimated_budget: changes.estimated_budget.unwrap_or(0.0),
        description: changes.description.clone(),
    };

    let due: Date = proposal_due_date(start_date)?;
    Ok(Event::materialize(
        amendment.calendar_id.clone(),
        &draft,
        due,
        now,
    ))
}

/// Approves a pending amendment, applying its change immediately.
///
/// # Arguments
///
/// * `amendment` - The current document
/// * `target_event` - The target event (resolved by the caller for edits)
/// * `actor` - The reviewing administrator
/// * `comments` - Optional review comments
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::AmendmentNotPending` if already reviewed
/// * `DomainError::AmendmentEventRequired` for edits without a target
/// * `DomainError::InvalidAmendmentChanges` if a new event lacks required
///   fields
pub fn approve(
    amendment: &Amendment,
    target_event: Option<&Event>,
    actor: &Actor,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<AmendmentReview, DomainError> {
    if amendment.status != AmendmentStatus::Pending {
        return Err(DomainError::AmendmentNotPending {
            status: amendment.status,
        });
    }

    let effect: AmendmentEffect = match amendment.amendment_type {
        AmendmentType::Edit => {
            let event: &Event = target_event.ok_or(DomainError::AmendmentEventRequired)?;
            let mut patched: Event = event.clone();
            patched.apply_changes(&amendment.proposed_changes);
            AmendmentEffect::Patched(patched)
        }
        AmendmentType::NewEvent => AmendmentEffect::Created(build_new_event(amendment, now)?),
    };

    let mut updated: Amendment = amendment.clone();
    updated.status = AmendmentStatus::Approved;
    updated.reviewed_by = Some(actor.id.clone());
    updated.reviewed_at = Some(now);
    updated.review_comments = comments.clone();

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Approved,
        actor.id.clone(),
        comments,
    );

    Ok(AmendmentReview {
        amendment: updated,
        effect: Some(effect),
        log,
    })
}

/// Rejects a pending amendment.
///
/// Rejection only records the decision; the target entity is untouched.
///
/// # Arguments
///
/// * `amendment` - The current document
/// * `actor` - The reviewing administrator
/// * `comments` - Optional review comments
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `DomainError::AmendmentNotPending` if already reviewed.
pub fn reject(
    amendment: &Amendment,
    actor: &Actor,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<AmendmentReview, DomainError> {
    if amendment.status != AmendmentStatus::Pending {
        return Err(DomainError::AmendmentNotPending {
            status: amendment.status,
        });
    }

    let mut updated: Amendment = amendment.clone();
    updated.status = AmendmentStatus::Rejected;
    updated.reviewed_by = Some(actor.id.clone());
    updated.reviewed_at = Some(now);
    updated.review_comments = comments.clone();

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Rejected,
        actor.id.clone(),
        comments,
    );

    Ok(AmendmentReview {
        amendment: updated,
        effect: None,
        log,
    })
}
