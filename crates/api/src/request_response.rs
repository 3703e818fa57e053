// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! DTOs are distinct from domain types and represent the API contract:
//! statuses, stages, and roles travel as strings; dates are ISO-8601.

use gymkhana_domain::{
    Amendment, Bill, Calendar, CalendarEvent, Event, Expense, ExpenseLine, Proposal,
    ProposedChanges,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// An embedded event draft as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventInput {
    /// The event title.
    pub title: String,
    /// The event category.
    pub category: String,
    /// The first scheduled day.
    pub start_date: Date,
    /// The last scheduled day (inclusive).
    pub end_date: Date,
    /// The estimated budget.
    pub estimated_budget: f64,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl CalendarEventInput {
    /// Converts the input into the domain draft type.
    #[must_use]
    pub fn into_domain(self) -> CalendarEvent {
        CalendarEvent {
            title: self.title,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            estimated_budget: self.estimated_budget,
            description: self.description,
        }
    }
}

/// Request to create a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCalendarRequest {
    /// The academic year in `YYYY-YY` format.
    pub academic_year: String,
    /// Initial event drafts.
    #[serde(default)]
    pub events: Vec<CalendarEventInput>,
}

/// Request to replace a calendar's embedded drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCalendarRequest {
    /// The replacement drafts.
    pub events: Vec<CalendarEventInput>,
}

/// Request to submit a calendar for approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubmitCalendarRequest {
    /// Whether schedule conflicts between drafts are acceptable.
    #[serde(default)]
    pub allow_overlapping_dates: bool,
}

/// Request to approve a calendar at its current stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApproveCalendarRequest {
    /// Optional approval comments.
    pub comments: Option<String>,
    /// The onward chain selection; mandatory at the Student Affairs stage.
    pub next_approval_stages: Option<Vec<String>>,
}

/// Request to reject a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectCalendarRequest {
    /// The rejection reason.
    pub reason: String,
}

/// A proposal expense line as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLineInput {
    /// What the money is for.
    pub description: String,
    /// The line amount.
    pub amount: f64,
}

impl ExpenseLineInput {
    fn into_domain(self) -> ExpenseLine {
        ExpenseLine {
            description: self.description,
            amount: self.amount,
        }
    }
}

/// Converts caller expense lines into domain lines.
#[must_use]
pub fn expense_lines(inputs: Vec<ExpenseLineInput>) -> Vec<ExpenseLine> {
    inputs
        .into_iter()
        .map(ExpenseLineInput::into_domain)
        .collect()
}

/// Request to submit a proposal for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProposalRequest {
    /// The target event's id.
    pub event_id: String,
    /// The proposal's objectives.
    pub objectives: String,
    /// The itemized expense breakdown.
    #[serde(default)]
    pub expense_breakdown: Vec<ExpenseLineInput>,
}

/// Request to edit a proposal. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateProposalRequest {
    /// Replacement objectives.
    pub objectives: Option<String>,
    /// Replacement expense breakdown.
    pub expense_breakdown: Option<Vec<ExpenseLineInput>>,
}

/// Request to approve a proposal at its current stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApproveProposalRequest {
    /// Optional approval comments.
    pub comments: Option<String>,
    /// The onward chain selection; mandatory at the Student Affairs stage.
    pub next_approval_stages: Option<Vec<String>>,
}

/// Request to reject a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectProposalRequest {
    /// The rejection reason.
    pub reason: String,
}

/// Request to send a proposal back for revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestRevisionRequest {
    /// What should be revised.
    pub comments: Option<String>,
}

/// Query parameters for the pending-proposals report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProposalsQuery {
    /// Look-ahead horizon in days.
    pub days_until_due: i64,
}

/// A bill as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillInput {
    /// What the bill covers.
    pub description: String,
    /// The billed amount.
    pub amount: f64,
    /// Optional bill or invoice number.
    pub bill_number: Option<String>,
    /// Optional vendor name.
    pub vendor: Option<String>,
}

impl BillInput {
    fn into_domain(self) -> Bill {
        Bill {
            description: self.description,
            amount: self.amount,
            bill_number: self.bill_number,
            vendor: self.vendor,
        }
    }
}

/// Converts caller bills into domain bills.
#[must_use]
pub fn bills(inputs: Vec<BillInput>) -> Vec<Bill> {
    inputs.into_iter().map(BillInput::into_domain).collect()
}

/// Request to submit an event's expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitExpenseRequest {
    /// The settled event's id.
    pub event_id: String,
    /// The bills.
    pub bills: Vec<BillInput>,
}

/// Request to replace an expense record's bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    /// The replacement bills.
    pub bills: Vec<BillInput>,
}

/// Request to approve an expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApproveExpenseRequest {
    /// Optional approval comments.
    pub comments: Option<String>,
}

/// The field patch carried by an amendment, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProposedChangesInput {
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

impl ProposedChangesInput {
    /// Converts the input into the domain patch type.
    #[must_use]
    pub fn into_domain(self) -> ProposedChanges {
        ProposedChanges {
            title: self.title,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            estimated_budget: self.estimated_budget,
            description: self.description,
        }
    }
}

/// Request to raise an amendment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAmendmentRequest {
    /// `"edit"` or `"new_event"`.
    pub amendment_type: String,
    /// The target event (required for edits).
    pub event_id: Option<String>,
    /// The proposed field changes.
    #[serde(default)]
    pub proposed_changes: ProposedChangesInput,
    /// Why the amendment is being raised.
    pub reason: Option<String>,
}

/// Request to review (approve or reject) an amendment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReviewAmendmentRequest {
    /// Optional review comments.
    pub comments: Option<String>,
}

// ---------------------------------------------------------------------------
// Response views
// ---------------------------------------------------------------------------

/// An embedded event draft view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventInfo {
    /// The event title.
    pub title: String,
    /// The event category.
    pub category: String,
    /// The first scheduled day.
    pub start_date: Date,
    /// The last scheduled day (inclusive).
    pub end_date: Date,
    /// The estimated budget.
    pub estimated_budget: f64,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl From<&CalendarEvent> for CalendarEventInfo {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            category: event.category.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            estimated_budget: event.estimated_budget,
            description: event.description.clone(),
        }
    }
}

/// A calendar view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInfo {
    /// Document id.
    pub id: String,
    /// The academic year.
    pub academic_year: String,
    /// Current status string.
    pub status: String,
    /// Whether the calendar is locked against direct edits.
    pub is_locked: bool,
    /// The embedded drafts.
    pub events: Vec<CalendarEventInfo>,
    /// Label of the stage currently required to act.
    pub current_approval_stage: Option<String>,
    /// The chain selected at Student Affairs.
    pub custom_approval_chain: Vec<String>,
    /// Index of the chain stage that owns the current status.
    pub current_chain_index: Option<usize>,
    /// Actor id of the submitting President.
    pub submitted_by: Option<String>,
    /// Actor id of the final approver.
    pub approved_by: Option<String>,
    /// When final approval was granted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// Actor id of the rejecting approver.
    pub rejected_by: Option<String>,
    /// The rejection reason.
    pub rejection_reason: Option<String>,
}

impl From<&Calendar> for CalendarInfo {
    fn from(calendar: &Calendar) -> Self {
        Self {
            id: calendar.id.clone(),
            academic_year: calendar.academic_year.value().to_string(),
            status: calendar.status.as_str().to_string(),
            is_locked: calendar.is_locked,
            events: calendar.events.iter().map(CalendarEventInfo::from).collect(),
            current_approval_stage: calendar
                .current_approval_stage
                .map(|stage| stage.label().to_string()),
            custom_approval_chain: calendar
                .custom_approval_chain
                .iter()
                .map(|stage| stage.label().to_string())
                .collect(),
            current_chain_index: calendar.current_chain_index,
            submitted_by: calendar.submitted_by.clone(),
            approved_by: calendar.approved_by.clone(),
            approved_at: calendar.approved_at,
            rejected_by: calendar.rejected_by.clone(),
            rejection_reason: calendar.rejection_reason.clone(),
        }
    }
}

/// A materialized event view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Document id.
    pub id: String,
    /// The owning calendar, if any.
    pub calendar_id: Option<String>,
    /// The event title.
    pub title: String,
    /// The event category.
    pub category: String,
    /// The first scheduled day.
    pub scheduled_start_date: Date,
    /// The last scheduled day (inclusive).
    pub scheduled_end_date: Date,
    /// The estimated budget.
    pub estimated_budget: f64,
    /// Current status string.
    pub status: String,
    /// The cached proposal due date.
    pub proposal_due_date: Option<Date>,
    /// Whether a proposal has been submitted.
    pub proposal_submitted: bool,
    /// Back-link to the active proposal.
    pub proposal_id: Option<String>,
    /// Back-link to the expense record.
    pub expense_id: Option<String>,
    /// Whether this event belongs to a flagship series.
    pub is_mega_event: bool,
}

impl From<&Event> for EventInfo {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            calendar_id: event.calendar_id.clone(),
            title: event.title.clone(),
            category: event.category.clone(),
            scheduled_start_date: event.scheduled_start_date,
            scheduled_end_date: event.scheduled_end_date,
            estimated_budget: event.estimated_budget,
            status: event.status.as_str().to_string(),
            proposal_due_date: event.proposal_due_date,
            proposal_submitted: event.proposal_submitted,
            proposal_id: event.proposal_id.clone(),
            expense_id: event.expense_id.clone(),
            is_mega_event: event.is_mega_event,
        }
    }
}

/// A proposal view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalInfo {
    /// Document id.
    pub id: String,
    /// The proposal's event.
    pub event_id: String,
    /// The proposal's objectives.
    pub objectives: String,
    /// Current status string.
    pub status: String,
    /// Label of the stage currently required to act.
    pub current_approval_stage: Option<String>,
    /// The chain selected at Student Affairs.
    pub custom_approval_chain: Vec<String>,
    /// Index of the chain stage that owns the current status.
    pub current_chain_index: Option<usize>,
    /// Sum of the expense breakdown.
    pub total_expenditure: f64,
    /// The event budget captured at submission.
    pub event_budget_at_submission: f64,
    /// `total_expenditure - event_budget_at_submission`.
    pub budget_deflection: f64,
    /// How many times the proposal was revised.
    pub revision_count: u32,
    /// The rejection reason, if rejected.
    pub rejection_reason: Option<String>,
}

impl From<&Proposal> for ProposalInfo {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: proposal.id.clone(),
            event_id: proposal.event_id.clone(),
            objectives: proposal.objectives.clone(),
            status: proposal.status.as_str().to_string(),
            current_approval_stage: proposal
                .current_approval_stage
                .map(|stage| stage.label().to_string()),
            custom_approval_chain: proposal
                .custom_approval_chain
                .iter()
                .map(|stage| stage.label().to_string())
                .collect(),
            current_chain_index: proposal.current_chain_index,
            total_expenditure: proposal.total_expenditure,
            event_budget_at_submission: proposal.event_budget_at_submission,
            budget_deflection: proposal.budget_deflection,
            revision_count: proposal.revision_count,
            rejection_reason: proposal.rejection_reason.clone(),
        }
    }
}

/// An expense view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInfo {
    /// Document id.
    pub id: String,
    /// The settled event.
    pub event_id: String,
    /// The number of bills.
    pub bill_count: usize,
    /// The budget estimate snapshot.
    pub estimated_budget: f64,
    /// Sum of the bill amounts.
    pub total_expenditure: f64,
    /// `total_expenditure - estimated_budget`.
    pub budget_variance: f64,
    /// The binary approval state string.
    pub approval_status: String,
    /// Actor id of the approving administrator.
    pub approved_by: Option<String>,
}

impl From<&Expense> for ExpenseInfo {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            event_id: expense.event_id.clone(),
            bill_count: expense.bills.len(),
            estimated_budget: expense.estimated_budget,
            total_expenditure: expense.total_expenditure,
            budget_variance: expense.budget_variance,
            approval_status: expense.approval_status.as_str().to_string(),
            approved_by: expense.approved_by.clone(),
        }
    }
}

/// An amendment view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmendmentInfo {
    /// Document id.
    pub id: String,
    /// The calendar the amendment applies to.
    pub calendar_id: Option<String>,
    /// The amendment type string.
    pub amendment_type: String,
    /// The target event (edits only).
    pub event_id: Option<String>,
    /// The review state string.
    pub status: String,
    /// Actor id of the requesting General Secretary.
    pub requested_by: String,
    /// Actor id of the reviewing administrator.
    pub reviewed_by: Option<String>,
    /// Comments recorded at review.
    pub review_comments: Option<String>,
}

impl From<&Amendment> for AmendmentInfo {
    fn from(amendment: &Amendment) -> Self {
        Self {
            id: amendment.id.clone(),
            calendar_id: amendment.calendar_id.clone(),
            amendment_type: amendment.amendment_type.as_str().to_string(),
            event_id: amendment.event_id.clone(),
            status: amendment.status.as_str().to_string(),
            requested_by: amendment.requested_by.clone(),
            reviewed_by: amendment.reviewed_by.clone(),
            review_comments: amendment.review_comments.clone(),
        }
    }
}

/// An approval-log entry view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLogInfo {
    /// Entry id.
    pub id: String,
    /// The entity kind ("calendar", "proposal", "expense", "amendment").
    pub entity_kind: String,
    /// The entity id.
    pub entity_id: String,
    /// Label of the role that acted.
    pub stage: String,
    /// The action string.
    pub action: String,
    /// Id of the acting actor.
    pub performed_by: String,
    /// Comments supplied with the action.
    pub comments: Option<String>,
    /// When the transition was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl From<&gymkhana_audit::ApprovalLogEntry> for ApprovalLogInfo {
    fn from(entry: &gymkhana_audit::ApprovalLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            entity_kind: entry.entity.kind().to_string(),
            entity_id: entry.entity.id().to_string(),
            stage: entry.stage.clone(),
            action: entry.action.as_str().to_string(),
            performed_by: entry.performed_by.clone(),
            comments: entry.comments.clone(),
            recorded_at: entry.recorded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Operation responses
// ---------------------------------------------------------------------------

/// Response carrying a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// The calendar.
    pub calendar: CalendarInfo,
    /// A success message.
    pub message: String,
}

/// A conflicting pair of drafts reported by the overlap detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictInfo {
    /// The earlier-indexed draft.
    pub first: CalendarEventInfo,
    /// The later-indexed draft.
    pub second: CalendarEventInfo,
}

/// Response to a submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitCalendarResponse {
    /// Whether the calendar was submitted.
    pub submitted: bool,
    /// The conflicting pairs, when submission was withheld.
    pub conflicts: Vec<ConflictInfo>,
    /// The calendar after submission (absent on a conflict report).
    pub calendar: Option<CalendarInfo>,
    /// A human-readable outcome message.
    pub message: String,
}

/// Response to a calendar approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveCalendarResponse {
    /// The calendar after the approval.
    pub calendar: CalendarInfo,
    /// Events materialized by final approval.
    pub materialized_events: Vec<EventInfo>,
    /// A success message.
    pub message: String,
}

/// Response carrying a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalResponse {
    /// The proposal.
    pub proposal: ProposalInfo,
    /// A success message.
    pub message: String,
}

/// Response to a proposal approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveProposalResponse {
    /// The proposal after the approval.
    pub proposal: ProposalInfo,
    /// The event, present when final approval flipped its status.
    pub event: Option<EventInfo>,
    /// A success message.
    pub message: String,
}

/// One row of the pending-proposals report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingProposalInfo {
    /// The event awaiting a proposal.
    pub event: EventInfo,
    /// Whole days until the event starts.
    pub days_until_event_start: i64,
    /// Whole days until the proposal falls due (negative once due).
    pub days_until_proposal_due: i64,
    /// Whether a proposal may be submitted today.
    pub is_proposal_window_open: bool,
}

/// Response carrying an expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    /// The expense record.
    pub expense: ExpenseInfo,
    /// A success message.
    pub message: String,
}

/// Response to an expense approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveExpenseResponse {
    /// The expense after the approval.
    pub expense: ExpenseInfo,
    /// The completed event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// Response carrying an amendment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmendmentResponse {
    /// The amendment.
    pub amendment: AmendmentInfo,
    /// A success message.
    pub message: String,
}

/// Response to an amendment review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAmendmentResponse {
    /// The amendment after the review.
    pub amendment: AmendmentInfo,
    /// The affected event (patched or freshly created), approvals only.
    pub event: Option<EventInfo>,
    /// A success message.
    pub message: String,
}
