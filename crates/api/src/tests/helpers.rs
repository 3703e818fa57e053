// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use gymkhana_domain::{Actor, FixedClock, Role, SubRole};
use gymkhana_persistence::{MemoryStore, Store};
use time::macros::{date, datetime};

use crate::{
    ApproveCalendarRequest, CalendarEventInput, CreateCalendarRequest, CreateProposalRequest,
    ExpenseLineInput, SubmitCalendarRequest, approve_calendar, create_calendar, create_proposal,
    submit_calendar,
};

/// A clock pinned to 2026-02-20, after the fixture events' proposal windows
/// open.
pub fn test_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-02-20 09:00 UTC))
}

/// A clock pinned before the fixture events' proposal windows open.
pub fn early_clock() -> FixedClock {
    FixedClock::new(datetime!(2026-01-05 09:00 UTC))
}

pub fn admin() -> Actor {
    Actor::new(String::from("admin-1"), Role::Admin, None)
}

pub fn super_admin() -> Actor {
    Actor::new(String::from("root-1"), Role::SuperAdmin, None)
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

pub fn event_input(title: &str, start: time::Date, end: time::Date) -> CalendarEventInput {
    CalendarEventInput {
        title: title.to_string(),
        category: String::from("cultural"),
        start_date: start,
        end_date: end,
        estimated_budget: 50_000.0,
        description: None,
    }
}

/// The standard two-event creation request for 2025-26.
pub fn create_request() -> CreateCalendarRequest {
    CreateCalendarRequest {
        academic_year: String::from("2025-26"),
        events: vec![
            event_input("Spring Fest", date!(2026 - 03 - 11), date!(2026 - 03 - 13)),
            event_input("Sports Meet", date!(2026 - 04 - 02), date!(2026 - 04 - 05)),
        ],
    }
}

pub fn proposal_request(event_id: &str) -> CreateProposalRequest {
    CreateProposalRequest {
        event_id: event_id.to_string(),
        objectives: String::from("Run the annual spring festival"),
        expense_breakdown: vec![ExpenseLineInput {
            description: String::from("Stage and sound"),
            amount: 42_000.0,
        }],
    }
}

/// Creates and fully approves a calendar through the chain `[Dean SA]`,
/// returning the ids of the materialized events.
pub fn seed_approved_calendar(store: &mut MemoryStore) -> (String, Vec<String>) {
    let clock = test_clock();

    let created = create_calendar(store, create_request(), &admin(), &clock)
        .expect("calendar creation succeeds");
    let calendar_id = created.calendar.id;

    submit_calendar(
        store,
        &calendar_id,
        SubmitCalendarRequest::default(),
        &president(),
        &clock,
    )
    .expect("submission succeeds");

    approve_calendar(
        store,
        &calendar_id,
        ApproveCalendarRequest {
            comments: None,
            next_approval_stages: Some(vec![String::from("Dean SA")]),
        },
        &sa_office(),
        &clock,
    )
    .expect("SA approval succeeds");

    let done = approve_calendar(
        store,
        &calendar_id,
        ApproveCalendarRequest::default(),
        &dean(),
        &clock,
    )
    .expect("Dean approval succeeds");

    let event_ids = done
        .materialized_events
        .iter()
        .map(|event| event.id.clone())
        .collect();
    (calendar_id, event_ids)
}

/// Seeds an approved calendar and submits + fully approves a proposal for
/// its first event, returning `(event_id, proposal_id)`.
pub fn seed_approved_proposal(store: &mut MemoryStore) -> (String, String) {
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(store);
    let event_id = event_ids.first().expect("events materialized").clone();

    let created = create_proposal(
        store,
        proposal_request(&event_id),
        &general_secretary(),
        &clock,
    )
    .expect("proposal submission succeeds");
    let proposal_id = created.proposal.id;

    crate::approve_proposal(
        store,
        &proposal_id,
        crate::ApproveProposalRequest::default(),
        &president(),
        &clock,
    )
    .expect("president approval succeeds");

    crate::approve_proposal(
        store,
        &proposal_id,
        crate::ApproveProposalRequest {
            comments: None,
            next_approval_stages: Some(vec![String::from("Dean SA")]),
        },
        &sa_office(),
        &clock,
    )
    .expect("SA approval succeeds");

    crate::approve_proposal(
        store,
        &proposal_id,
        crate::ApproveProposalRequest::default(),
        &dean(),
        &clock,
    )
    .expect("Dean approval succeeds");

    (event_id, proposal_id)
}

/// Seeds a mega event directly into the store (mega events are maintained
/// out of band, not materialized from calendars).
pub fn seed_mega_event(store: &mut MemoryStore) -> String {
    let event = gymkhana_domain::Event {
        id: String::new(),
        calendar_id: None,
        title: String::from("Convocation Gala"),
        category: String::from("cultural"),
        scheduled_start_date: date!(2026 - 03 - 11),
        scheduled_end_date: date!(2026 - 03 - 13),
        estimated_budget: 200_000.0,
        description: None,
        status: gymkhana_domain::EventStatus::Upcoming,
        proposal_due_date: None,
        proposal_submitted: false,
        proposal_id: None,
        expense_id: None,
        is_mega_event: true,
        mega_event_series_id: Some(String::from("series_gala")),
        created_at: datetime!(2026-01-01 00:00 UTC),
    };
    store
        .insert_event(event)
        .expect("mega event insert succeeds")
        .id
}
