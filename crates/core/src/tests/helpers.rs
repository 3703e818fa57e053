// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use gymkhana_domain::{
    AcademicYear, Actor, Calendar, CalendarEvent, Event, EventStatus, Expense,
    ExpenseApprovalStatus, Proposal, ProposalStatus, Role, SubRole,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-02-20 09:00 UTC)
}

pub fn admin() -> Actor {
    Actor::new(String::from("admin-1"), Role::Admin, None)
}

pub fn president() -> Actor {
    Actor::new(
        String::from("president-1"),
        Role::Gymkhana,
        Some(SubRole::President),
    )
}

pub fn general_secretary() -> Actor {
    Actor::new(
        String::from("gs-1"),
        Role::Gymkhana,
        Some(SubRole::GeneralSecretary),
    )
}

pub fn sa_office() -> Actor {
    Actor::new(String::from("sa-1"), Role::StudentAffairs, None)
}

pub fn joint_registrar() -> Actor {
    Actor::new(
        String::from("jr-1"),
        Role::StudentAffairs,
        Some(SubRole::JointRegistrar),
    )
}

pub fn dean() -> Actor {
    Actor::new(
        String::from("dean-1"),
        Role::StudentAffairs,
        Some(SubRole::Dean),
    )
}

pub fn draft_event(title: &str, start: Date, end: Date) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        category: String::from("cultural"),
        start_date: start,
        end_date: end,
        estimated_budget: 50_000.0,
        description: None,
    }
}

/// A draft calendar for 2025-26 with two non-overlapping events.
pub fn draft_calendar() -> Calendar {
    let mut calendar = Calendar::new(
        AcademicYear::parse("2025-26").expect("valid year"),
        vec![
            draft_event(
                "Spring Fest",
                date!(2026 - 03 - 11),
                date!(2026 - 03 - 13),
            ),
            draft_event(
                "Sports Meet",
                date!(2026 - 04 - 02),
                date!(2026 - 04 - 05),
            ),
        ],
        String::from("admin-1"),
        test_now(),
    );
    calendar.id = String::from("cal_1");
    calendar
}

/// A materialized standard event starting 2026-03-11 (due 2026-02-18).
pub fn upcoming_event() -> Event {
    Event {
        id: String::from("evt_1"),
        calendar_id: Some(String::from("cal_1")),
        title: String::from("Spring Fest"),
        category: String::from("cultural"),
        scheduled_start_date: date!(2026 - 03 - 11),
        scheduled_end_date: date!(2026 - 03 - 13),
        estimated_budget: 50_000.0,
        description: None,
        status: EventStatus::Upcoming,
        proposal_due_date: Some(date!(2026 - 02 - 18)),
        proposal_submitted: false,
        proposal_id: None,
        expense_id: None,
        is_mega_event: false,
        mega_event_series_id: None,
        created_at: test_now(),
    }
}

/// A mega event in the flagship series, no owning calendar.
pub fn mega_event() -> Event {
    let mut event = upcoming_event();
    event.id = String::from("evt_mega_1");
    event.calendar_id = None;
    event.title = String::from("Convocation Gala");
    event.is_mega_event = true;
    event.mega_event_series_id = Some(String::from("series_gala"));
    event
}

pub fn pending_proposal(status: ProposalStatus) -> Proposal {
    Proposal {
        id: String::from("prop_1"),
        event_id: String::from("evt_1"),
        objectives: String::from("Run the annual spring festival"),
        expense_breakdown: vec![gymkhana_domain::ExpenseLine {
            description: String::from("Stage and sound"),
            amount: 42_000.0,
        }],
        status,
        current_approval_stage: status.required_stage(),
        custom_approval_chain: Vec::new(),
        current_chain_index: None,
        total_expenditure: 42_000.0,
        event_budget_at_submission: 50_000.0,
        budget_deflection: -8_000.0,
        revision_count: 0,
        submitted_by: String::from("gs-1"),
        rejected_by: None,
        rejected_at: None,
        rejection_reason: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn pending_expense() -> Expense {
    Expense {
        id: String::from("exp_1"),
        event_id: String::from("evt_1"),
        bills: vec![gymkhana_domain::Bill {
            description: String::from("Sound system"),
            amount: 30_000.0,
            bill_number: Some(String::from("INV-104")),
            vendor: None,
        }],
        estimated_budget: 42_000.0,
        total_expenditure: 30_000.0,
        budget_variance: -12_000.0,
        approval_status: ExpenseApprovalStatus::Pending,
        submitted_by: String::from("gs-1"),
        approved_by: None,
        approved_at: None,
        approval_comments: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}
