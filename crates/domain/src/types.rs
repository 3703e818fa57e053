// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::academic_year::AcademicYear;
use crate::date_range::DateRange;
use crate::stage::ApprovalStage;
use crate::status::{
    AmendmentStatus, AmendmentType, CalendarStatus, EventStatus, ExpenseApprovalStatus,
    ProposalStatus,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// An event draft embedded in an annual activity calendar.
///
/// Drafts are editable while the calendar is a draft; final approval of the
/// calendar materializes each draft into an immutable `Event` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The event title.
    pub title: String,
    /// The event category (cultural, sports, technical, ...).
    pub category: String,
    /// The first scheduled day.
    pub start_date: Date,
    /// The last scheduled day (inclusive).
    pub end_date: Date,
    /// The estimated budget for the event.
    pub estimated_budget: f64,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Returns the draft's scheduled range, or `None` if the dates are
    /// inverted (such drafts are excluded from overlap comparisons).
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// An annual activity calendar document.
///
/// Owned exclusively by the calendar workflow; every mutation flows through
/// its operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    /// Document identifier, assigned by the store.
    pub id: String,
    /// The academic year; unique across calendars.
    pub academic_year: AcademicYear,
    /// The calendar's position in the approval state machine.
    pub status: CalendarStatus,
    /// Business-level edit lock; amendments are the only bypass.
    pub is_locked: bool,
    /// The embedded event drafts.
    pub events: Vec<CalendarEvent>,
    /// The stage currently required to act, while pending.
    pub current_approval_stage: Option<ApprovalStage>,
    /// The chain selected at the Student Affairs stage for this cycle.
    pub custom_approval_chain: Vec<ApprovalStage>,
    /// Index of the chain stage that owns the current status.
    pub current_chain_index: Option<usize>,
    /// Actor id of the submitting President.
    pub submitted_by: Option<String>,
    /// When the calendar was submitted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
    /// Actor id of the final approver.
    pub approved_by: Option<String>,
    /// When final approval was granted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// Actor id of the rejecting approver.
    pub rejected_by: Option<String>,
    /// When the rejection was recorded.
    #[serde(with = "time::serde::rfc3339::option")]
    pub rejected_at: Option<OffsetDateTime>,
    /// The rejection reason supplied by the approver.
    pub rejection_reason: Option<String>,
    /// Actor id of the creating administrator.
    pub created_by: String,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Calendar {
    /// Creates a fresh draft calendar.
    ///
    /// # Arguments
    ///
    /// * `academic_year` - The validated academic year
    /// * `events` - Initial event drafts (may be empty)
    /// * `created_by` - Actor id of the creating administrator
    /// * `now` - Creation timestamp
    #[must_use]
    pub fn new(
        academic_year: AcademicYear,
        events: Vec<CalendarEvent>,
        created_by: String,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: String::new(),
            academic_year,
            status: CalendarStatus::Draft,
            is_locked: false,
            events,
            current_approval_stage: None,
            custom_approval_chain: Vec::new(),
            current_chain_index: None,
            submitted_by: None,
            submitted_at: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Clears rejection metadata and the spent approval cycle.
    ///
    /// Called when a rejected calendar is edited back into a draft; the next
    /// submission starts a fresh cycle with a fresh chain selection.
    pub fn clear_rejection(&mut self) {
        self.rejected_by = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        self.current_approval_stage = None;
        self.custom_approval_chain.clear();
        self.current_chain_index = None;
    }
}

/// A materialized event record.
///
/// Immutable once created apart from its status and workflow back-links;
/// post-approval edits go through the amendment workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Document identifier, assigned by the store.
    pub id: String,
    /// The owning calendar; `None` for mega events.
    pub calendar_id: Option<String>,
    /// The event title.
    pub title: String,
    /// The event category.
    pub category: String,
    /// The first scheduled day.
    pub scheduled_start_date: Date,
    /// The last scheduled day (inclusive).
    pub scheduled_end_date: Date,
    /// The estimated budget carried over from the calendar draft.
    pub estimated_budget: f64,
    /// Optional free-form description.
    pub description: Option<String>,
    /// The event's lifecycle status.
    pub status: EventStatus,
    /// Proposal due date, computed once at materialization and cached.
    /// Backfilled lazily for records created without one.
    pub proposal_due_date: Option<Date>,
    /// Whether a proposal has been submitted for this event.
    pub proposal_submitted: bool,
    /// Back-link to the active proposal.
    pub proposal_id: Option<String>,
    /// Back-link to the expense record.
    pub expense_id: Option<String>,
    /// Whether this event belongs to a recurring flagship series.
    pub is_mega_event: bool,
    /// The flagship series this event belongs to, if any.
    pub mega_event_series_id: Option<String>,
    /// When the record was materialized.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Event {
    /// Materializes an event record from a calendar draft.
    ///
    /// # Arguments
    ///
    /// * `calendar_id` - The owning calendar's id, if any
    /// * `draft` - The embedded draft being materialized
    /// * `proposal_due_date` - The precomputed due date
    /// * `now` - Materialization timestamp
    #[must_use]
    pub fn materialize(
        calendar_id: Option<String>,
        draft: &CalendarEvent,
        proposal_due_date: Date,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: String::new(),
            calendar_id,
            title: draft.title.clone(),
            category: draft.category.clone(),
            scheduled_start_date: draft.start_date,
            scheduled_end_date: draft.end_date,
            estimated_budget: draft.estimated_budget,
            description: draft.description.clone(),
            status: EventStatus::Upcoming,
            proposal_due_date: Some(proposal_due_date),
            proposal_submitted: false,
            proposal_id: None,
            expense_id: None,
            is_mega_event: false,
            mega_event_series_id: None,
            created_at: now,
        }
    }

    /// Applies an approved amendment's changes to the mutable fields.
    ///
    /// The cached proposal due date is deliberately not recomputed when the
    /// schedule moves.
    pub fn apply_changes(&mut self, changes: &ProposedChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(start_date) = changes.start_date {
            self.scheduled_start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            self.scheduled_end_date = end_date;
        }
        if let Some(estimated_budget) = changes.estimated_budget {
            self.estimated_budget = estimated_budget;
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
    }
}

/// A single line in a proposal's expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    /// What the money is for.
    pub description: String,
    /// The line amount.
    pub amount: f64,
}

/// An event proposal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Document identifier, assigned by the store.
    pub id: String,
    /// The event this proposal belongs to (1:1 with an active submission).
    pub event_id: String,
    /// The proposal's objectives.
    pub objectives: String,
    /// The itemized expense breakdown.
    pub expense_breakdown: Vec<ExpenseLine>,
    /// The proposal's position in the approval state machine.
    pub status: ProposalStatus,
    /// The stage currently required to act, while pending.
    pub current_approval_stage: Option<ApprovalStage>,
    /// The chain selected at the Student Affairs stage for this cycle.
    pub custom_approval_chain: Vec<ApprovalStage>,
    /// Index of the chain stage that owns the current status.
    pub current_chain_index: Option<usize>,
    /// Derived: sum of the expense breakdown. Never taken from the caller.
    pub total_expenditure: f64,
    /// The event's estimated budget captured at submission time.
    pub event_budget_at_submission: f64,
    /// Derived: `total_expenditure - event_budget_at_submission`.
    pub budget_deflection: f64,
    /// How many times the proposal has been revised and resubmitted.
    pub revision_count: u32,
    /// Actor id of the original submitter.
    pub submitted_by: String,
    /// Actor id of the rejecting approver.
    pub rejected_by: Option<String>,
    /// When the rejection was recorded.
    #[serde(with = "time::serde::rfc3339::option")]
    pub rejected_at: Option<OffsetDateTime>,
    /// The rejection reason supplied by the approver.
    pub rejection_reason: Option<String>,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Proposal {
    /// Recomputes the derived financial fields.
    ///
    /// The totals are always derived from the breakdown and the event budget
    /// snapshot so variance reporting stays stable even though the event's
    /// estimated budget is never mutated after materialization.
    ///
    /// # Arguments
    ///
    /// * `event_budget` - The event's estimated budget at this submission
    pub fn capture_financials(&mut self, event_budget: f64) {
        self.total_expenditure = self.expense_breakdown.iter().map(|line| line.amount).sum();
        self.event_budget_at_submission = event_budget;
        self.budget_deflection = self.total_expenditure - self.event_budget_at_submission;
    }

    /// Clears rejection metadata and the spent approval cycle.
    ///
    /// Called when a rejected or revision-requested proposal is edited for
    /// resubmission.
    pub fn clear_rejection(&mut self) {
        self.rejected_by = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        self.current_approval_stage = None;
        self.custom_approval_chain.clear();
        self.current_chain_index = None;
    }
}

/// A single bill attached to an expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// What the bill covers.
    pub description: String,
    /// The billed amount.
    pub amount: f64,
    /// Optional bill or invoice number.
    pub bill_number: Option<String>,
    /// Optional vendor name.
    pub vendor: Option<String>,
}

/// A post-event expense settlement document. Exactly one exists per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Document identifier, assigned by the store.
    pub id: String,
    /// The event this expense settles.
    pub event_id: String,
    /// The submitted bills.
    pub bills: Vec<Bill>,
    /// Budget snapshot: the proposal's total expenditure, falling back to
    /// the event's estimated budget.
    pub estimated_budget: f64,
    /// Derived: sum of the bill amounts. Never taken from the caller.
    pub total_expenditure: f64,
    /// Derived: `total_expenditure - estimated_budget`.
    pub budget_variance: f64,
    /// The binary approval state.
    pub approval_status: ExpenseApprovalStatus,
    /// Actor id of the submitting General Secretary.
    pub submitted_by: String,
    /// Actor id of the approving administrator.
    pub approved_by: Option<String>,
    /// When approval was granted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// Comments recorded at approval.
    pub approval_comments: Option<String>,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Expense {
    /// Recomputes the derived totals from the bill list.
    pub fn recompute_totals(&mut self) {
        self.total_expenditure = self.bills.iter().map(|bill| bill.amount).sum();
        self.budget_variance = self.total_expenditure - self.estimated_budget;
    }

    /// Clears approver metadata and returns the record to pending.
    ///
    /// Every successful edit invalidates any prior approval.
    pub fn reset_approval(&mut self) {
        self.approval_status = ExpenseApprovalStatus::Pending;
        self.approved_by = None;
        self.approved_at = None;
        self.approval_comments = None;
    }
}

/// The field patch carried by an amendment.
///
/// For edits, present fields overwrite the target event's values; for new
/// events, title and both dates are required at review time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProposedChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement category.
    pub category: Option<String>,
    /// Replacement start date.
    pub start_date: Option<Date>,
    /// Replacement end date.
    pub end_date: Option<Date>,
    /// Replacement estimated budget.
    pub estimated_budget: Option<f64>,
    /// Replacement description.
    pub description: Option<String>,
}

/// An out-of-band change request against a locked calendar or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amendment {
    /// Document identifier, assigned by the store.
    pub id: String,
    /// The calendar the amendment applies to (`None` when the target event
    /// has no owning calendar).
    pub calendar_id: Option<String>,
    /// Whether this edits an existing event or adds a new one.
    pub amendment_type: AmendmentType,
    /// The target event; required for edits.
    pub event_id: Option<String>,
    /// The proposed field changes.
    pub proposed_changes: ProposedChanges,
    /// Why the amendment was raised.
    pub reason: Option<String>,
    /// The amendment's review state.
    pub status: AmendmentStatus,
    /// Actor id of the requesting General Secretary.
    pub requested_by: String,
    /// Actor id of the reviewing administrator.
    pub reviewed_by: Option<String>,
    /// When the review was recorded.
    #[serde(with = "time::serde::rfc3339::option")]
    pub reviewed_at: Option<OffsetDateTime>,
    /// Comments recorded at review.
    pub review_comments: Option<String>,
    /// When the document was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
