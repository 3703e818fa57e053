// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Proposal workflow transitions.
//!
//! Mirrors the calendar's dynamic-chain mechanics with an extra
//! `revision_requested` state and a submission window gated on the event's
//! cached proposal due date. Standard proposals are submitted by the General
//! Secretary and enter at the President stage; mega-event proposals are
//! submitted by the President and enter directly at Student Affairs.

use gymkhana_audit::{LogAction, LogRecord};
use gymkhana_domain::{
    Actor, ApprovalStage, ChainAdvance, DomainError, Event, EventStatus, ExpenseLine, Proposal,
    ProposalStatus, advance, begin_chain, ensure_current_approver, proposal_due_date, select_chain,
    validate_expense_breakdown, window_open,
};
use time::{Date, OffsetDateTime};

/// Input for submitting a proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProposal {
    /// The proposal's objectives.
    pub objectives: String,
    /// The itemized expense breakdown.
    pub expense_breakdown: Vec<ExpenseLine>,
}

/// Input for editing a proposal. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProposal {
    /// Replacement objectives.
    pub objectives: Option<String>,
    /// Replacement expense breakdown.
    pub expense_breakdown: Option<Vec<ExpenseLine>>,
}

/// The outcome of a proposal submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalCreation {
    /// The new proposal document (id assigned by the store).
    pub proposal: Proposal,
    /// The event with its submission flags and cached due date updated.
    /// The proposal back-link is bound after the store assigns an id.
    pub event: Event,
    /// The log record describing the submission.
    pub log: LogRecord,
}

/// The outcome of a proposal edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalUpdate {
    /// The proposal after the edit.
    pub proposal: Proposal,
    /// The log record, present when the edit resubmitted the proposal.
    pub log: Option<LogRecord>,
}

/// The outcome of a proposal approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalApproval {
    /// The proposal after the approval.
    pub proposal: Proposal,
    /// The event, present when final approval flipped its status.
    pub event: Option<Event>,
    /// The log record describing the approval.
    pub log: LogRecord,
}

/// A rejection or revision request together with its log record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalTransition {
    /// The proposal after the transition.
    pub proposal: Proposal,
    /// The log record describing the transition.
    pub log: LogRecord,
}

/// Returns the submitter gate and entry stage for an event's proposals.
const fn submission_route(event: &Event) -> (&'static str, ApprovalStage) {
    if event.is_mega_event {
        ("Gymkhana President", ApprovalStage::StudentAffairs)
    } else {
        ("General Secretary", ApprovalStage::President)
    }
}

fn ensure_submitter(event: &Event, actor: &Actor) -> Result<ApprovalStage, DomainError> {
    let (required, entry) = submission_route(event);
    let permitted: bool = if event.is_mega_event {
        actor.is_president()
    } else {
        actor.is_general_secretary()
    };

    if !permitted {
        return Err(DomainError::WrongSubmitter { required });
    }

    Ok(entry)
}

fn validate_objectives(objectives: &str) -> Result<(), DomainError> {
    if objectives.trim().is_empty() {
        return Err(DomainError::InvalidField {
            field: String::from("objectives"),
            message: String::from("Proposal objectives cannot be empty"),
        });
    }
    Ok(())
}

/// Submits a proposal for an event.
///
/// The submission window opens once `today >= proposal_due_date`; the due
/// date is backfilled onto events that predate due-date caching.
///
/// # Arguments
///
/// * `event` - The target event
/// * `input` - The proposal content
/// * `actor` - The submitting actor
/// * `today` - The current day per the injected clock
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::EventNotOpenForProposal` for cancelled/completed events
/// * `DomainError::DuplicateProposal` if the event already has a submission
/// * `DomainError::WrongSubmitter` if the actor may not submit for the event
/// * `DomainError::ProposalWindowNotOpen` before the due date
pub fn create(
    event: &Event,
    input: NewProposal,
    actor: &Actor,
    today: Date,
    now: OffsetDateTime,
) -> Result<ProposalCreation, DomainError> {
    if matches!(event.status, EventStatus::Cancelled | EventStatus::Completed) {
        return Err(DomainError::EventNotOpenForProposal {
            status: event.status,
        });
    }

    if event.proposal_submitted {
        return Err(DomainError::DuplicateProposal {
            event_id: event.id.clone(),
        });
    }

    let entry_stage: ApprovalStage = ensure_submitter(event, actor)?;

    // Lazily backfill the cached due date for records created without one
    let due: Date = match event.proposal_due_date {
        Some(due) => due,
        None => proposal_due_date(event.scheduled_start_date)?,
    };

    if !window_open(today, due) {
        return Err(DomainError::ProposalWindowNotOpen { opens_on: due });
    }

    validate_objectives(&input.objectives)?;
    validate_expense_breakdown(&input.expense_breakdown)?;

    let mut proposal: Proposal = Proposal {
        id: String::new(),
        event_id: event.id.clone(),
        objectives: input.objectives,
        expense_breakdown: input.expense_breakdown,
        status: ProposalStatus::for_stage(entry_stage),
        current_approval_stage: Some(entry_stage),
        custom_approval_chain: Vec::new(),
        current_chain_index: None,
        total_expenditure: 0.0,
        event_budget_at_submission: 0.0,
        budget_deflection: 0.0,
        revision_count: 0,
        submitted_by: actor.id.clone(),
        rejected_by: None,
        rejected_at: None,
        rejection_reason: None,
        created_at: now,
        updated_at: now,
    };
    proposal.capture_financials(event.estimated_budget);

    let mut updated_event: Event = event.clone();
    updated_event.proposal_submitted = true;
    updated_event.status = EventStatus::ProposalSubmitted;
    updated_event.proposal_due_date = Some(due);

    let log: LogRecord = LogRecord::new(
        actor.descriptor_label().to_string(),
        LogAction::Submitted,
        actor.id.clone(),
        None,
    );

    Ok(ProposalCreation {
        proposal,
        event: updated_event,
        log,
    })
}

/// Edits a proposal.
///
/// The General Secretary may edit a standard proposal while it awaits
/// revision or after rejection; doing so resubmits it at the President
/// stage, clears the spent chain, and increments the revision count. The
/// President may edit a standard proposal in place while it sits at the
/// President stage, and may edit a mega-event proposal at the President
/// stage or for resubmission after revision/rejection.
///
/// # Arguments
///
/// * `proposal` - The current document
/// * `event` - The proposal's event
/// * `input` - The replacement fields
/// * `actor` - The editing actor
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::WrongSubmitter` if the actor may not edit this proposal
/// * `DomainError::ProposalNotEditable` if the status forbids the edit
pub fn update(
    proposal: &Proposal,
    event: &Event,
    input: UpdateProposal,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<ProposalUpdate, DomainError> {
    let resubmit: bool = if actor.is_general_secretary() && !event.is_mega_event {
        if !matches!(
            proposal.status,
            ProposalStatus::RevisionRequested | ProposalStatus::Rejected
        ) {
            return Err(DomainError::ProposalNotEditable {
                status: proposal.status,
            });
        }
        true
    } else if actor.is_president() {
        let editable: &[ProposalStatus] = if event.is_mega_event {
            &[
                ProposalStatus::PendingPresident,
                ProposalStatus::RevisionRequested,
                ProposalStatus::Rejected,
            ]
        } else {
            &[ProposalStatus::PendingPresident]
        };
        if !editable.contains(&proposal.status) {
            return Err(DomainError::ProposalNotEditable {
                status: proposal.status,
            });
        }
        proposal.status != ProposalStatus::PendingPresident
    } else {
        let (required, _) = submission_route(event);
        return Err(DomainError::WrongSubmitter { required });
    };

    let mut updated: Proposal = proposal.clone();
    if let Some(objectives) = input.objectives {
        validate_objectives(&objectives)?;
        updated.objectives = objectives;
    }
    if let Some(breakdown) = input.expense_breakdown {
        validate_expense_breakdown(&breakdown)?;
        updated.expense_breakdown = breakdown;
    }
    updated.capture_financials(event.estimated_budget);

    let log: Option<LogRecord> = if resubmit {
        let (_, entry_stage) = submission_route(event);
        updated.clear_rejection();
        updated.status = ProposalStatus::for_stage(entry_stage);
        updated.current_approval_stage = Some(entry_stage);
        updated.revision_count += 1;
        Some(LogRecord::new(
            actor.descriptor_label().to_string(),
            LogAction::Submitted,
            actor.id.clone(),
            Some(format!("Revision {}", updated.revision_count)),
        ))
    } else {
        None
    };

    updated.updated_at = now;

    Ok(ProposalUpdate {
        proposal: updated,
        log,
    })
}

/// Approves the proposal at its current stage.
///
/// Chain semantics are identical to the calendar's: a mandatory chain
/// selection at Student Affairs, advancement by chain index afterwards, and
/// the static fallback for legacy documents. Final approval flips the event
/// to `proposal_approved`.
///
/// # Arguments
///
/// * `proposal` - The current document
/// * `event` - The proposal's event
/// * `actor` - The approving actor
/// * `next_stages` - The chain selection (mandatory at Student Affairs)
/// * `comments` - Optional approval comments
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the proposal is not pending
/// * `DomainError::WrongApprover` if the actor does not own the stage
/// * `DomainError::ChainSelectionRequired` / `InvalidChainSelection` /
///   `UnknownStage` for bad chain selections
pub fn approve(
    proposal: &Proposal,
    event: &Event,
    actor: &Actor,
    next_stages: Option<&[String]>,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<ProposalApproval, DomainError> {
    let stage: ApprovalStage = ensure_current_approver(proposal.status, actor)?;

    let mut updated: Proposal = proposal.clone();
    let mut updated_event: Option<Event> = None;

    if stage == ApprovalStage::StudentAffairs {
        let labels: &[String] = next_stages.ok_or(DomainError::ChainSelectionRequired)?;
        let chain: Vec<ApprovalStage> = select_chain(labels)?;
        let (first_stage, first_status, index) = begin_chain::<ProposalStatus>(&chain)?;

        updated.custom_approval_chain = chain;
        updated.current_chain_index = Some(index);
        updated.status = first_status;
        updated.current_approval_stage = Some(first_stage);
    } else {
        match advance(
            proposal.status,
            &proposal.custom_approval_chain,
            proposal.current_chain_index,
        )? {
            ChainAdvance::Next {
                status,
                stage: next_stage,
                chain_index,
            } => {
                updated.status = status;
                updated.current_approval_stage = Some(next_stage);
                updated.current_chain_index = chain_index;
            }
            ChainAdvance::Complete => {
                updated.status = ProposalStatus::Approved;
                updated.current_approval_stage = None;
                updated.current_chain_index = None;

                let mut approved_event: Event = event.clone();
                approved_event.status = EventStatus::ProposalApproved;
                updated_event = Some(approved_event);
            }
        }
    }

    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        stage.label().to_string(),
        LogAction::Approved,
        actor.id.clone(),
        comments,
    );

    Ok(ProposalApproval {
        proposal: updated,
        event: updated_event,
        log,
    })
}

/// Rejects the proposal at its current stage.
///
/// # Arguments
///
/// * `proposal` - The current document
/// * `actor` - The rejecting actor
/// * `reason` - The rejection reason (required)
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the proposal is not pending
/// * `DomainError::WrongApprover` if the actor does not own the stage
/// * `DomainError::InvalidField` if the reason is empty
pub fn reject(
    proposal: &Proposal,
    actor: &Actor,
    reason: String,
    now: OffsetDateTime,
) -> Result<ProposalTransition, DomainError> {
    let stage: ApprovalStage = ensure_current_approver(proposal.status, actor)?;

    if reason.trim().is_empty() {
        return Err(DomainError::InvalidField {
            field: String::from("reason"),
            message: String::from("A rejection reason is required"),
        });
    }

    let mut updated: Proposal = proposal.clone();
    updated.status = ProposalStatus::Rejected;
    updated.current_approval_stage = None;
    updated.rejected_by = Some(actor.id.clone());
    updated.rejected_at = Some(now);
    updated.rejection_reason = Some(reason.clone());
    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        stage.label().to_string(),
        LogAction::Rejected,
        actor.id.clone(),
        Some(reason),
    );

    Ok(ProposalTransition {
        proposal: updated,
        log,
    })
}

/// Asks the submitter to revise and resubmit.
///
/// Distinguished from rejection only by the logged action and by which
/// party is expected to act next: control returns to the original submitter
/// (the General Secretary, or the President for mega events).
///
/// # Arguments
///
/// * `proposal` - The current document
/// * `actor` - The requesting approver
/// * `comments` - What should be revised
/// * `now` - The current instant
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the proposal is not pending
/// * `DomainError::WrongApprover` if the actor does not own the stage
pub fn request_revision(
    proposal: &Proposal,
    actor: &Actor,
    comments: Option<String>,
    now: OffsetDateTime,
) -> Result<ProposalTransition, DomainError> {
    let stage: ApprovalStage = ensure_current_approver(proposal.status, actor)?;

    let mut updated: Proposal = proposal.clone();
    updated.status = ProposalStatus::RevisionRequested;
    updated.current_approval_stage = None;
    updated.updated_at = now;

    let log: LogRecord = LogRecord::new(
        stage.label().to_string(),
        LogAction::RevisionRequested,
        actor.id.clone(),
        comments,
    );

    Ok(ProposalTransition {
        proposal: updated,
        log,
    })
}
