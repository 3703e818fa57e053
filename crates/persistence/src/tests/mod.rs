// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use gymkhana_domain::{AcademicYear, Calendar, CalendarEvent, Event, EventStatus};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-02-20 09:00 UTC)
}

pub fn test_calendar(year: &str) -> Calendar {
    Calendar::new(
        AcademicYear::parse(year).expect("valid year"),
        vec![CalendarEvent {
            title: String::from("Spring Fest"),
            category: String::from("cultural"),
            start_date: date!(2026 - 03 - 11),
            end_date: date!(2026 - 03 - 13),
            estimated_budget: 50_000.0,
            description: None,
        }],
        String::from("admin-1"),
        test_now(),
    )
}

pub fn test_event(title: &str, start: time::Date) -> Event {
    Event {
        id: String::new(),
        calendar_id: Some(String::from("cal_000001")),
        title: title.to_string(),
        category: String::from("cultural"),
        scheduled_start_date: start,
        scheduled_end_date: start,
        estimated_budget: 10_000.0,
        description: None,
        status: EventStatus::Upcoming,
        proposal_due_date: None,
        proposal_submitted: false,
        proposal_id: None,
        expense_id: None,
        is_mega_event: false,
        mega_event_series_id: None,
        created_at: test_now(),
    }
}
