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
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthorizationService;
pub use error::{
    ApiError, AuthError, ErrorBody, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    approve_amendment, approve_calendar, approve_expense, approve_proposal, create_amendment,
    create_calendar, create_proposal, get_approval_history, get_calendar_by_id,
    get_calendar_by_year, get_calendars, get_expense_by_event, get_expense_by_id,
    get_pending_amendments, get_pending_proposals, get_proposal_by_event, get_proposal_by_id,
    get_proposals_for_approval, lock_calendar, reject_amendment, reject_calendar, reject_proposal,
    request_revision, submit_calendar, submit_expense, unlock_calendar, update_calendar,
    update_expense, update_proposal,
};
pub use request_response::{
    AmendmentInfo, AmendmentResponse, ApprovalLogInfo, ApproveCalendarRequest,
    ApproveCalendarResponse, ApproveExpenseRequest, ApproveExpenseResponse,
    ApproveProposalRequest, ApproveProposalResponse, BillInput, CalendarEventInfo,
    CalendarEventInput, CalendarInfo, CalendarResponse, ConflictInfo, CreateAmendmentRequest,
    CreateCalendarRequest, CreateProposalRequest, EventInfo, ExpenseInfo, ExpenseLineInput,
    ExpenseResponse, PendingProposalInfo, PendingProposalsQuery, ProposalInfo, ProposalResponse,
    ProposedChangesInput, RejectCalendarRequest, RejectProposalRequest, RequestRevisionRequest,
    ReviewAmendmentRequest, ReviewAmendmentResponse, SubmitCalendarRequest,
    SubmitCalendarResponse, SubmitExpenseRequest, UpdateCalendarRequest, UpdateExpenseRequest,
    UpdateProposalRequest,
};
