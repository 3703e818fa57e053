// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expense workflow transitions.
//!
//! Post-event billing with a binary approval state. The budget estimate is
//! snapshotted from the proposal's total expenditure (falling back to the
//! event's estimated budget), and the total is always recomputed as the sum
//! of submitted bills; caller-supplied totals are never trusted.

use gymkhana_audit::{LogAction, LogRecord};
use gymkhana_domain::{
    Actor, Bill, DomainError, Event, EventStatus, Expense, ExpenseApprovalStatus, Proposal,
    validate_bills,
};
use time::OffsetDateTime;

/// Input for submitting an expense record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The bills to settle.
    pub bills: Vec<Bill>,
}

/// The outcome of an expense submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseCreation {
    /// The new expense document (id assigned by the store).
    pub expense: Expense,
    /// The log record describing the submission.
    pub log: LogRecord,
}

/// The outcome of an expense approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseApproval {
    /// The expense after the approval.
    pub expense: Expense,
    /// The event, flipped to `completed` and back-linked to the expense.
    pub event: Event,
    /// The log record describing the approval.
    pub log: LogRecord,
}

/// Submits the expense record for an event.
///
/// Exactly one expense exists per event; duplicates are rejected before any
/// state changes.
///
/// # Arguments
///
/// * `event` - The event being settled
/// * `proposal` - The event's proposal, if one is linked (estimate source)
/// * `input` - The bills
/// * `actor` - The submitting actor (must be the General Secretary)
/// * `has_existing_expense` - Whether the event already has an expense
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::WrongSubmitter` if the actor is not the General Secretary
/// * `DomainError::EventNotAwaitingExpense` unless the event's proposal is
///   approved
/// * `DomainError::DuplicateExpense` if an expense already exists
/// * `DomainError::InvalidField` if the bill list fails validation
pub fn submit(
    event: &Event,
    proposal: Option<&Proposal>,
    input: NewExpense,
    actor: &Actor,
    has_existing_expense: bool,
    now: OffsetDateTime,
) -> Result<ExpenseCreation, DomainError> {
    if !actor.is_general_secretary() {
        return Err(DomainError::WrongSubmitter {
            required: "General Secretary",
        });
    }

    if event.status != EventStatus::ProposalApproved {
        return Err(DomainError::EventNotAwaitingExpense {
            status: event.status,
        });
    }

    if has_existing_expense {
        return Err(DomainError::DuplicateExpense {
            event_id: event.id.clone(),
        });
    }

    validate_bills(&input.bills)?;

    let estimated_budget: f64 =
        proposal.map_or(event.estimated_budget, |proposal| proposal.total_expenditure);

    let mut expense: Expense = Expense {
        id: String::new(),
        event_id: event.id.clone(),
        bills: input.bills,
        estimated_budget,
        total_expenditure: 0.0,
        budget_variance: 0.0,
        approval_status: ExpenseApprovalStatus::Pending,
        submitted_by: actor.id.clone(),
        approved_by: None,
        approved_at: None,
        approval_comments: None,
        created_at: now,
        updated_at: now,
    };
    expense.recompute_totals();

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Submitted,
        actor.id.clone(),
        None,
    );

    Ok(ExpenseCreation { expense, log })
}

/// Replaces the bills of a pending expense record.
///
/// Approved expenses are immutable. A successful edit returns the record to
/// pending and clears any prior approver metadata.
///
/// # Arguments
///
/// * `expense` - The current document
/// * `bills` - The replacement bills
/// * `actor` - The editing actor (must be the General Secretary)
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::WrongSubmitter` if the actor is not the General Secretary
/// * `DomainError::ExpenseImmutable` if the expense is already approved
/// * `DomainError::InvalidField` if the bill list fails validation
pub fn update(
    expense: &Expense,
    bills: Vec<Bill>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<Expense, DomainError> {
    if !actor.is_general_secretary() {
        return Err(DomainError::WrongSubmitter {
            required: "General Secretary",
        });
    }

    if expense.approval_status == ExpenseApprovalStatus::Approved {
        return Err(DomainError::ExpenseImmutable);
    }

    validate_bills(&bills)?;

    let mut updated: Expense = expense.clone();
    updated.bills = bills;
    updated.recompute_totals();
    updated.reset_approval();
    updated.updated_at = now;

    Ok(updated)
}

/// Approves a pending expense record.
///
/// Approval closes the event lifecycle: the event flips to `completed` and
/// gains the expense back-link. Re-approval is rejected.
///
/// # Arguments
///
/// * `expense` - The current document
/// * `event` - The event being settled
/// * `actor` - The approving administrator
/// * `comments` - Optional approval comments
/// * `now` - The current instant
///
/// # Errors
///
/// Returns `DomainError::ExpenseAlreadyApproved` if the expense has already
/// been approved.
pub fn approve(
    expense: &Expense,
    event: &Event,
    actor: &Actor,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<ExpenseApproval, DomainError> {
    if expense.approval_status == ExpenseApprovalStatus::Approved {
        return Err(DomainError::ExpenseAlreadyApproved);
    }

    let mut updated: Expense = expense.clone();
    updated.approval_status = ExpenseApprovalStatus::Approved;
    updated.approved_by = Some(actor.id.clone());
    updated.approved_at = Some(now);
    updated.approval_comments = comments.clone();
    updated.updated_at = now;

    let mut updated_event: Event = event.clone();
    updated_event.status = EventStatus::Completed;
    updated_event.expense_id = Some(expense.id.clone());

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Approved,
        actor.id.clone(),
        comments,
    );

    Ok(ExpenseApproval {
        expense: updated,
        event: updated_event,
        log,
    })
}
