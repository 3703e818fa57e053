// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for field validation and derived financial recomputation.

use crate::{
    Bill, CalendarEvent, DomainError, ExpenseLine, Proposal, ProposalStatus, validate_bills,
    validate_calendar_events, validate_days_until_due, validate_expense_breakdown,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

fn draft_event(title: &str) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        category: String::from("cultural"),
        start_date: date!(2026 - 03 - 01),
        end_date: date!(2026 - 03 - 03),
        estimated_budget: 50_000.0,
        description: None,
    }
}

fn bill(amount: f64) -> Bill {
    Bill {
        description: String::from("Sound system"),
        amount,
        bill_number: None,
        vendor: None,
    }
}

#[test]
fn test_valid_calendar_events_pass() {
    assert!(validate_calendar_events(&[draft_event("Spring Fest")]).is_ok());
}

#[test]
fn test_empty_title_is_rejected() {
    let result = validate_calendar_events(&[draft_event("  ")]);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::InvalidField { .. }
    ));
}

#[test]
fn test_negative_budget_is_rejected() {
    let mut event = draft_event("Spring Fest");
    event.estimated_budget = -1.0;
    assert!(validate_calendar_events(&[event]).is_err());
}

#[test]
fn test_non_finite_budget_is_rejected() {
    let mut event = draft_event("Spring Fest");
    event.estimated_budget = f64::NAN;
    assert!(validate_calendar_events(&[event]).is_err());
}

#[test]
fn test_empty_bill_list_is_rejected() {
    assert!(validate_bills(&[]).is_err());
}

#[test]
fn test_negative_bill_amount_is_rejected() {
    assert!(validate_bills(&[bill(-200.0)]).is_err());
    assert!(validate_bills(&[bill(200.0)]).is_ok());
}

#[test]
fn test_empty_expense_breakdown_is_permitted() {
    assert!(validate_expense_breakdown(&[]).is_ok());
}

#[test]
fn test_negative_horizon_is_rejected() {
    assert!(validate_days_until_due(-1).is_err());
    assert!(validate_days_until_due(0).is_ok());
    assert!(validate_days_until_due(30).is_ok());
}

#[test]
fn test_financial_snapshot_is_derived_from_breakdown() {
    let now: OffsetDateTime = datetime!(2026-02-01 10:00 UTC);
    let mut proposal = Proposal {
        id: String::from("prop_1"),
        event_id: String::from("evt_1"),
        objectives: String::from("Annual fest"),
        expense_breakdown: vec![
            ExpenseLine {
                description: String::from("Stage"),
                amount: 30_000.0,
            },
            ExpenseLine {
                description: String::from("Catering"),
                amount: 25_000.0,
            },
        ],
        status: ProposalStatus::PendingPresident,
        current_approval_stage: None,
        custom_approval_chain: Vec::new(),
        current_chain_index: None,
        // Caller-supplied totals must be overwritten by the recomputation
        total_expenditure: 1.0,
        event_budget_at_submission: 0.0,
        budget_deflection: 999.0,
        revision_count: 0,
        submitted_by: String::from("gs-1"),
        rejected_by: None,
        rejected_at: None,
        rejection_reason: None,
        created_at: now,
        updated_at: now,
    };

    proposal.capture_financials(50_000.0);

    assert!((proposal.total_expenditure - 55_000.0).abs() < f64::EPSILON);
    assert!((proposal.event_budget_at_submission - 50_000.0).abs() < f64::EPSILON);
    assert!((proposal.budget_deflection - 5_000.0).abs() < f64::EPSILON);
}
