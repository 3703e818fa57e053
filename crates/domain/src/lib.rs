// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod academic_year;
mod actor;
mod chain;
mod clock;
mod date_range;
mod error;
mod scheduling;
mod stage;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use academic_year::AcademicYear;
pub use actor::{Actor, Role, SubRole};
pub use chain::{
    ChainAdvance, ChainedStatus, StaticStep, advance, begin_chain, ensure_current_approver,
    select_chain,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::{DateRange, conflicts_with, overlapping_pairs};
pub use error::DomainError;
pub use scheduling::{
    PROPOSAL_LEAD_DAYS, ProposalWindow, proposal_due_date, proposal_window, window_open,
};
pub use stage::{ApprovalStage, CHAIN_STAGE_LABELS, CHAIN_STAGES, STAGE_LABELS};
pub use status::{
    AmendmentStatus, AmendmentType, CalendarStatus, EventStatus, ExpenseApprovalStatus,
    ProposalStatus,
};

// Re-export public types
pub use types::{
    Amendment, Bill, Calendar, CalendarEvent, Event, Expense, ExpenseLine, Proposal,
    ProposedChanges,
};
pub use validation::{
    validate_bills, validate_calendar_events, validate_days_until_due, validate_expense_breakdown,
};
