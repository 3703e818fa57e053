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

pub mod amendment;
pub mod calendar;
pub mod expense;
pub mod proposal;

#[cfg(test)]
mod tests;

// Re-export the transition outcome types at the crate root
pub use amendment::{AmendmentCreation, AmendmentEffect, AmendmentReview, NewAmendment};
pub use calendar::{
    CalendarApproval, CalendarTransition, EventOverlap, NewCalendar, SubmitOutcome,
};
pub use expense::{ExpenseApproval, ExpenseCreation, NewExpense};
pub use proposal::{
    NewProposal, ProposalApproval, ProposalCreation, ProposalTransition, ProposalUpdate,
    UpdateProposal,
};
