// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory document store.
//!
//! Backs the test suites and the bundled server. Every method runs to
//! completion while holding `&mut self`, so the status-guarded replacements
//! are atomic by construction.

use std::collections::BTreeMap;

use gymkhana_audit::{ApprovalLogEntry, EntityRef};
use gymkhana_domain::{
    AcademicYear, Amendment, AmendmentStatus, Calendar, CalendarStatus, Event, Expense,
    ExpenseApprovalStatus, Proposal, ProposalStatus,
};
use time::Date;
use tracing::debug;

use crate::error::PersistenceError;
use crate::store::Store;

/// An in-memory document store with per-collection id sequences.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    calendars: BTreeMap<String, Calendar>,
    events: BTreeMap<String, Event>,
    proposals: BTreeMap<String, Proposal>,
    expenses: BTreeMap<String, Expense>,
    amendments: BTreeMap<String, Amendment>,
    logs: Vec<ApprovalLogEntry>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of approval-log entries.
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.logs.len()
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{:06}", self.next_id)
    }
}

/// Inserts a document into a collection, assigning an id when absent.
fn insert_document<T>(
    collection: &mut BTreeMap<String, T>,
    entity: &'static str,
    id: String,
    value: T,
) -> Result<(), PersistenceError> {
    if collection.contains_key(&id) {
        return Err(PersistenceError::DuplicateId { entity, id });
    }
    collection.insert(id, value);
    Ok(())
}

/// Replaces a stored document after an optional status comparison.
fn replace_document<T, S, F>(
    collection: &mut BTreeMap<String, T>,
    entity: &'static str,
    id: &str,
    value: T,
    expected_status: Option<S>,
    status_of: F,
) -> Result<(), PersistenceError>
where
    S: PartialEq + std::fmt::Display,
    F: Fn(&T) -> S,
{
    let stored: &mut T = collection
        .get_mut(id)
        .ok_or_else(|| PersistenceError::NotFound {
            entity,
            id: id.to_string(),
        })?;

    if let Some(expected) = expected_status {
        let found: S = status_of(stored);
        if found != expected {
            return Err(PersistenceError::StatusConflict {
                entity,
                id: id.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    *stored = value;
    Ok(())
}

impl Store for MemoryStore {
    fn insert_calendar(&mut self, mut calendar: Calendar) -> Result<Calendar, PersistenceError> {
        if calendar.id.is_empty() {
            calendar.id = self.allocate_id("cal");
        }
        debug!(id = %calendar.id, year = %calendar.academic_year, "inserting calendar");
        insert_document(
            &mut self.calendars,
            "calendar",
            calendar.id.clone(),
            calendar.clone(),
        )?;
        Ok(calendar)
    }

    fn replace_calendar(
        &mut self,
        calendar: &Calendar,
        expected_status: Option<CalendarStatus>,
    ) -> Result<(), PersistenceError> {
        replace_document(
            &mut self.calendars,
            "calendar",
            &calendar.id,
            calendar.clone(),
            expected_status,
            |stored| stored.status,
        )
    }

    fn find_calendar(&self, id: &str) -> Result<Option<Calendar>, PersistenceError> {
        Ok(self.calendars.get(id).cloned())
    }

    fn find_calendar_by_year(
        &self,
        academic_year: &AcademicYear,
    ) -> Result<Option<Calendar>, PersistenceError> {
        Ok(self
            .calendars
            .values()
            .find(|calendar| &calendar.academic_year == academic_year)
            .cloned())
    }

    fn list_calendars(&self) -> Result<Vec<Calendar>, PersistenceError> {
        Ok(self.calendars.values().cloned().collect())
    }

    fn latest_approved_calendar(&self) -> Result<Option<Calendar>, PersistenceError> {
        Ok(self
            .calendars
            .values()
            .filter(|calendar| calendar.status == CalendarStatus::Approved)
            .max_by_key(|calendar| calendar.approved_at)
            .cloned())
    }

    fn insert_event(&mut self, mut event: Event) -> Result<Event, PersistenceError> {
        if event.id.is_empty() {
            event.id = self.allocate_id("evt");
        }
        debug!(id = %event.id, title = %event.title, "inserting event");
        insert_document(&mut self.events, "event", event.id.clone(), event.clone())?;
        Ok(event)
    }

    fn replace_event(&mut self, event: &Event) -> Result<(), PersistenceError> {
        let stored: &mut Event =
            self.events
                .get_mut(&event.id)
                .ok_or_else(|| PersistenceError::NotFound {
                    entity: "event",
                    id: event.id.clone(),
                })?;
        *stored = event.clone();
        Ok(())
    }

    fn find_event(&self, id: &str) -> Result<Option<Event>, PersistenceError> {
        Ok(self.events.get(id).cloned())
    }

    fn list_events_starting_between(
        &self,
        from: Date,
        to: Date,
    ) -> Result<Vec<Event>, PersistenceError> {
        Ok(self
            .events
            .values()
            .filter(|event| {
                event.scheduled_start_date >= from && event.scheduled_start_date <= to
            })
            .cloned()
            .collect())
    }

    fn insert_proposal(&mut self, mut proposal: Proposal) -> Result<Proposal, PersistenceError> {
        if proposal.id.is_empty() {
            proposal.id = self.allocate_id("prop");
        }
        debug!(id = %proposal.id, event = %proposal.event_id, "inserting proposal");
        insert_document(
            &mut self.proposals,
            "proposal",
            proposal.id.clone(),
            proposal.clone(),
        )?;
        Ok(proposal)
    }

    fn replace_proposal(
        &mut self,
        proposal: &Proposal,
        expected_status: Option<ProposalStatus>,
    ) -> Result<(), PersistenceError> {
        replace_document(
            &mut self.proposals,
            "proposal",
            &proposal.id,
            proposal.clone(),
            expected_status,
            |stored| stored.status,
        )
    }

    fn find_proposal(&self, id: &str) -> Result<Option<Proposal>, PersistenceError> {
        Ok(self.proposals.get(id).cloned())
    }

    fn find_proposal_by_event(
        &self,
        event_id: &str,
    ) -> Result<Option<Proposal>, PersistenceError> {
        Ok(self
            .proposals
            .values()
            .find(|proposal| proposal.event_id == event_id)
            .cloned())
    }

    fn list_proposals_with_status(
        &self,
        statuses: &[ProposalStatus],
    ) -> Result<Vec<Proposal>, PersistenceError> {
        Ok(self
            .proposals
            .values()
            .filter(|proposal| statuses.contains(&proposal.status))
            .cloned()
            .collect())
    }

    fn insert_expense(&mut self, mut expense: Expense) -> Result<Expense, PersistenceError> {
        if expense.id.is_empty() {
            expense.id = self.allocate_id("exp");
        }
        debug!(id = %expense.id, event = %expense.event_id, "inserting expense");
        insert_document(
            &mut self.expenses,
            "expense",
            expense.id.clone(),
            expense.clone(),
        )?;
        Ok(expense)
    }

    fn replace_expense(
        &mut self,
        expense: &Expense,
        expected_status: Option<ExpenseApprovalStatus>,
    ) -> Result<(), PersistenceError> {
        replace_document(
            &mut self.expenses,
            "expense",
            &expense.id,
            expense.clone(),
            expected_status,
            |stored| stored.approval_status,
        )
    }

    fn find_expense(&self, id: &str) -> Result<Option<Expense>, PersistenceError> {
        Ok(self.expenses.get(id).cloned())
    }

    fn find_expense_by_event(&self, event_id: &str) -> Result<Option<Expense>, PersistenceError> {
        Ok(self
            .expenses
            .values()
            .find(|expense| expense.event_id == event_id)
            .cloned())
    }

    fn insert_amendment(
        &mut self,
        mut amendment: Amendment,
    ) -> Result<Amendment, PersistenceError> {
        if amendment.id.is_empty() {
            amendment.id = self.allocate_id("amd");
        }
        debug!(id = %amendment.id, "inserting amendment");
        insert_document(
            &mut self.amendments,
            "amendment",
            amendment.id.clone(),
            amendment.clone(),
        )?;
        Ok(amendment)
    }

    fn replace_amendment(
        &mut self,
        amendment: &Amendment,
        expected_status: Option<AmendmentStatus>,
    ) -> Result<(), PersistenceError> {
        replace_document(
            &mut self.amendments,
            "amendment",
            &amendment.id,
            amendment.clone(),
            expected_status,
            |stored| stored.status,
        )
    }

    fn find_amendment(&self, id: &str) -> Result<Option<Amendment>, PersistenceError> {
        Ok(self.amendments.get(id).cloned())
    }

    fn list_pending_amendments(&self) -> Result<Vec<Amendment>, PersistenceError> {
        Ok(self
            .amendments
            .values()
            .filter(|amendment| amendment.status == AmendmentStatus::Pending)
            .cloned()
            .collect())
    }

    fn append_log(
        &mut self,
        mut entry: ApprovalLogEntry,
    ) -> Result<ApprovalLogEntry, PersistenceError> {
        if entry.id.is_empty() {
            entry.id = self.allocate_id("log");
        }
        debug!(id = %entry.id, kind = entry.entity.kind(), action = %entry.action, "appending approval log entry");
        self.logs.push(entry.clone());
        Ok(entry)
    }

    fn logs_for_entity(
        &self,
        entity: &EntityRef,
    ) -> Result<Vec<ApprovalLogEntry>, PersistenceError> {
        Ok(self
            .logs
            .iter()
            .filter(|entry| &entry.entity == entity)
            .cloned()
            .collect())
    }
}
