// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Proposal submission-window scheduling.
//!
//! Every materialized event carries a proposal due date computed once, at
//! materialization time, as `scheduled_start_date - 21 days`. The submission
//! window opens on the due date; nothing here pushes notifications or runs
//! sweeps, windows are evaluated lazily against the injected clock.

use crate::error::DomainError;
use time::{Date, Duration};

/// Days before an event's start by which its proposal falls due.
pub const PROPOSAL_LEAD_DAYS: i64 = 21;

/// Computes the proposal due date for an event start date.
///
/// # Arguments
///
/// * `scheduled_start` - The event's first day
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the subtraction leaves
/// the representable date range.
pub fn proposal_due_date(scheduled_start: Date) -> Result<Date, DomainError> {
    scheduled_start
        .checked_sub(Duration::days(PROPOSAL_LEAD_DAYS))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing the proposal due date"),
        })
}

/// Returns whether the submission window is open: `today >= due`.
#[must_use]
pub fn window_open(today: Date, due: Date) -> bool {
    today >= due
}

/// A pending event's position relative to its proposal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalWindow {
    /// Whole days until the event starts (negative once started).
    pub days_until_event_start: i64,
    /// Whole days until the proposal falls due (negative once due).
    pub days_until_proposal_due: i64,
    /// Whether a proposal may be submitted today.
    pub is_window_open: bool,
}

/// Annotates an event's schedule relative to `today`.
///
/// # Arguments
///
/// * `today` - The current day per the injected clock
/// * `scheduled_start` - The event's first day
/// * `due` - The event's cached proposal due date
#[must_use]
pub fn proposal_window(today: Date, scheduled_start: Date, due: Date) -> ProposalWindow {
    ProposalWindow {
        days_until_event_start: (scheduled_start - today).whole_days(),
        days_until_proposal_due: (due - today).whole_days(),
        is_window_open: window_open(today, due),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_due_date_is_twenty_one_days_before_start() {
        let due = proposal_due_date(date!(2026 - 03 - 22)).unwrap();
        assert_eq!(due, date!(2026 - 03 - 01));
    }

    #[test]
    fn test_due_date_crosses_month_and_year() {
        let due = proposal_due_date(date!(2026 - 01 - 10)).unwrap();
        assert_eq!(due, date!(2025 - 12 - 20));
    }

    #[test]
    fn test_window_opens_on_due_date() {
        let due = date!(2026 - 03 - 01);
        assert!(!window_open(date!(2026 - 02 - 28), due));
        assert!(window_open(due, due));
        assert!(window_open(date!(2026 - 03 - 05), due));
    }

    #[test]
    fn test_window_annotation() {
        let window = proposal_window(
            date!(2026 - 03 - 01),
            date!(2026 - 03 - 11),
            date!(2026 - 02 - 18),
        );

        assert_eq!(window.days_until_event_start, 10);
        assert_eq!(window.days_until_proposal_due, -11);
        assert!(window.is_window_open);
    }

    #[test]
    fn test_window_annotation_before_open() {
        let window = proposal_window(
            date!(2026 - 02 - 01),
            date!(2026 - 03 - 11),
            date!(2026 - 02 - 18),
        );

        assert_eq!(window.days_until_event_start, 38);
        assert_eq!(window.days_until_proposal_due, 17);
        assert!(!window.is_window_open);
    }
}
