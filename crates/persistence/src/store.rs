// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The document-persistence collaborator interface.
//!
//! The workflow core addresses its store by document id and simple
//! equality/range filters; entities are JSON-serializable documents with
//! ISO-8601 dates. Status-changing replacements take an expected-status
//! witness so the backend can perform an atomic compare-and-swap: two
//! concurrent approvals of the same entity cannot both succeed and
//! double-advance a chain.

use gymkhana_audit::{ApprovalLogEntry, EntityRef};
use gymkhana_domain::{
    AcademicYear, Amendment, AmendmentStatus, Calendar, CalendarStatus, Event, Expense,
    ExpenseApprovalStatus, Proposal, ProposalStatus,
};
use time::Date;

use crate::error::PersistenceError;

/// The document store backing the workflows.
///
/// Implementations must make each method atomic with respect to the others;
/// the status-guarded `replace_*` methods are the concurrency control the
/// workflows rely on.
#[allow(clippy::missing_errors_doc)]
pub trait Store {
    // -- Calendars ---------------------------------------------------------

    /// Inserts a calendar, assigning an id if the document has none.
    fn insert_calendar(&mut self, calendar: Calendar) -> Result<Calendar, PersistenceError>;

    /// Replaces a calendar. When `expected_status` is given, the replacement
    /// only succeeds if the stored document is still in that status.
    fn replace_calendar(
        &mut self,
        calendar: &Calendar,
        expected_status: Option<CalendarStatus>,
    ) -> Result<(), PersistenceError>;

    /// Looks up a calendar by id.
    fn find_calendar(&self, id: &str) -> Result<Option<Calendar>, PersistenceError>;

    /// Looks up the calendar for an academic year.
    fn find_calendar_by_year(
        &self,
        academic_year: &AcademicYear,
    ) -> Result<Option<Calendar>, PersistenceError>;

    /// Lists all calendars.
    fn list_calendars(&self) -> Result<Vec<Calendar>, PersistenceError>;

    /// Returns the most recently approved calendar, if any.
    fn latest_approved_calendar(&self) -> Result<Option<Calendar>, PersistenceError>;

    // -- Events ------------------------------------------------------------

    /// Inserts an event, assigning an id if the document has none.
    fn insert_event(&mut self, event: Event) -> Result<Event, PersistenceError>;

    /// Replaces an event.
    fn replace_event(&mut self, event: &Event) -> Result<(), PersistenceError>;

    /// Looks up an event by id.
    fn find_event(&self, id: &str) -> Result<Option<Event>, PersistenceError>;

    /// Lists events whose scheduled start falls within `[from, to]`.
    fn list_events_starting_between(
        &self,
        from: Date,
        to: Date,
    ) -> Result<Vec<Event>, PersistenceError>;

    // -- Proposals ---------------------------------------------------------

    /// Inserts a proposal, assigning an id if the document has none.
    fn insert_proposal(&mut self, proposal: Proposal) -> Result<Proposal, PersistenceError>;

    /// Replaces a proposal, optionally guarded on the stored status.
    fn replace_proposal(
        &mut self,
        proposal: &Proposal,
        expected_status: Option<ProposalStatus>,
    ) -> Result<(), PersistenceError>;

    /// Looks up a proposal by id.
    fn find_proposal(&self, id: &str) -> Result<Option<Proposal>, PersistenceError>;

    /// Looks up the proposal linked to an event.
    fn find_proposal_by_event(&self, event_id: &str)
    -> Result<Option<Proposal>, PersistenceError>;

    /// Lists proposals whose status is one of `statuses`.
    fn list_proposals_with_status(
        &self,
        statuses: &[ProposalStatus],
    ) -> Result<Vec<Proposal>, PersistenceError>;

    // -- Expenses ----------------------------------------------------------

    /// Inserts an expense, assigning an id if the document has none.
    fn insert_expense(&mut self, expense: Expense) -> Result<Expense, PersistenceError>;

    /// Replaces an expense, optionally guarded on the stored approval state.
    fn replace_expense(
        &mut self,
        expense: &Expense,
        expected_status: Option<ExpenseApprovalStatus>,
    ) -> Result<(), PersistenceError>;

    /// Looks up an expense by id.
    fn find_expense(&self, id: &str) -> Result<Option<Expense>, PersistenceError>;

    /// Looks up the expense linked to an event.
    fn find_expense_by_event(&self, event_id: &str) -> Result<Option<Expense>, PersistenceError>;

    // -- Amendments --------------------------------------------------------

    /// Inserts an amendment, assigning an id if the document has none.
    fn insert_amendment(&mut self, amendment: Amendment) -> Result<Amendment, PersistenceError>;

    /// Replaces an amendment, optionally guarded on the stored status.
    fn replace_amendment(
        &mut self,
        amendment: &Amendment,
        expected_status: Option<AmendmentStatus>,
    ) -> Result<(), PersistenceError>;

    /// Looks up an amendment by id.
    fn find_amendment(&self, id: &str) -> Result<Option<Amendment>, PersistenceError>;

    /// Lists amendments awaiting review.
    fn list_pending_amendments(&self) -> Result<Vec<Amendment>, PersistenceError>;

    // -- Approval log ------------------------------------------------------

    /// Appends an entry to the approval log, assigning its id.
    ///
    /// The log is append-only; no update or delete operations exist.
    fn append_log(&mut self, entry: ApprovalLogEntry)
    -> Result<ApprovalLogEntry, PersistenceError>;

    /// Lists the log entries for an entity, in append order.
    fn logs_for_entity(
        &self,
        entity: &EntityRef,
    ) -> Result<Vec<ApprovalLogEntry>, PersistenceError>;
}
