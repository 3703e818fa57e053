// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the expense workflow transitions.

use super::helpers::{
    admin, dean, general_secretary, pending_expense, pending_proposal, test_now, upcoming_event,
};
use crate::expense::{self, NewExpense};
use gymkhana_audit::LogAction;
use gymkhana_domain::{
    Bill, DomainError, EventStatus, ExpenseApprovalStatus, ProposalStatus,
};

fn bills() -> Vec<Bill> {
    vec![
        Bill {
            description: String::from("Sound system"),
            amount: 30_000.0,
            bill_number: Some(String::from("INV-104")),
            vendor: Some(String::from("Acme Audio")),
        },
        Bill {
            description: String::from("Catering"),
            amount: 12_500.0,
            bill_number: None,
            vendor: None,
        },
    ]
}

fn approved_event() -> gymkhana_domain::Event {
    let mut event = upcoming_event();
    event.status = EventStatus::ProposalApproved;
    event.proposal_submitted = true;
    event.proposal_id = Some(String::from("prop_1"));
    event
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_requires_proposal_approved_event() {
    let result = expense::submit(
        &upcoming_event(),
        None,
        NewExpense { bills: bills() },
        &general_secretary(),
        false,
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::EventNotAwaitingExpense {
            status: EventStatus::Upcoming
        }
    ));
}

#[test]
fn test_submit_requires_general_secretary() {
    let result = expense::submit(
        &approved_event(),
        None,
        NewExpense { bills: bills() },
        &admin(),
        false,
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::WrongSubmitter { .. }
    ));
}

#[test]
fn test_exactly_one_expense_per_event() {
    let result = expense::submit(
        &approved_event(),
        None,
        NewExpense { bills: bills() },
        &general_secretary(),
        true,
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::DuplicateExpense { .. }
    ));
}

#[test]
fn test_total_is_sum_of_bills() {
    let created = expense::submit(
        &approved_event(),
        Some(&pending_proposal(ProposalStatus::Approved)),
        NewExpense { bills: bills() },
        &general_secretary(),
        false,
        test_now(),
    )
    .expect("submission succeeds");

    assert!((created.expense.total_expenditure - 42_500.0).abs() < f64::EPSILON);
    assert_eq!(created.expense.approval_status, ExpenseApprovalStatus::Pending);
    assert_eq!(created.log.action, LogAction::Submitted);
}

#[test]
fn test_estimate_snapshots_proposal_total() {
    let created = expense::submit(
        &approved_event(),
        Some(&pending_proposal(ProposalStatus::Approved)),
        NewExpense { bills: bills() },
        &general_secretary(),
        false,
        test_now(),
    )
    .expect("submission succeeds");

    // The proposal fixture's total expenditure is 42,000
    assert!((created.expense.estimated_budget - 42_000.0).abs() < f64::EPSILON);
    assert!((created.expense.budget_variance - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_estimate_falls_back_to_event_budget() {
    let created = expense::submit(
        &approved_event(),
        None,
        NewExpense { bills: bills() },
        &general_secretary(),
        false,
        test_now(),
    )
    .expect("submission succeeds");

    // The event fixture's estimated budget is 50,000
    assert!((created.expense.estimated_budget - 50_000.0).abs() < f64::EPSILON);
}

#[test]
fn test_submit_requires_at_least_one_bill() {
    let result = expense::submit(
        &approved_event(),
        None,
        NewExpense { bills: Vec::new() },
        &general_secretary(),
        false,
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::InvalidField { .. }
    ));
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_update_recomputes_total_and_resets_approval() {
    let mut expense = pending_expense();
    expense.approved_by = Some(String::from("admin-1"));

    let updated = expense::update(&expense, bills(), &general_secretary(), test_now())
        .expect("update succeeds");

    assert!((updated.total_expenditure - 42_500.0).abs() < f64::EPSILON);
    assert_eq!(updated.approval_status, ExpenseApprovalStatus::Pending);
    assert_eq!(updated.approved_by, None);
    assert_eq!(updated.approved_at, None);
}

#[test]
fn test_approved_expense_is_immutable() {
    let mut approved = pending_expense();
    approved.approval_status = ExpenseApprovalStatus::Approved;

    let result = expense::update(&approved, bills(), &general_secretary(), test_now());

    assert!(matches!(result.unwrap_err(), DomainError::ExpenseImmutable));
}

#[test]
fn test_update_requires_general_secretary() {
    let result = expense::update(&pending_expense(), bills(), &dean(), test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::WrongSubmitter { .. }
    ));
}

// ============================================================================
// Approval
// ============================================================================

#[test]
fn test_approve_completes_the_event() {
    let approved = expense::approve(
        &pending_expense(),
        &approved_event(),
        &admin(),
        Some(String::from("settled")),
        test_now(),
    )
    .expect("approval succeeds");

    assert_eq!(
        approved.expense.approval_status,
        ExpenseApprovalStatus::Approved
    );
    assert_eq!(approved.expense.approved_by, Some(String::from("admin-1")));
    assert_eq!(approved.event.status, EventStatus::Completed);
    assert_eq!(approved.event.expense_id, Some(String::from("exp_1")));
    assert_eq!(approved.log.action, LogAction::Approved);
    assert_eq!(approved.log.stage, "Admin");
}

#[test]
fn test_no_reapproval() {
    let approved = expense::approve(
        &pending_expense(),
        &approved_event(),
        &admin(),
        None,
        test_now(),
    )
    .expect("first approval succeeds");

    let result = expense::approve(
        &approved.expense,
        &approved.event,
        &admin(),
        None,
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::ExpenseAlreadyApproved
    ));
}
