// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shared approval-chain state machine.
//!
//! Calendars and proposals traverse structurally identical approval chains:
//! a fixed prefix (President for proposals, submission for calendars), a
//! mandatory Student Affairs stage that selects the onward chain at run time,
//! and the dynamically chosen post-SA stages. This module implements that
//! traversal once, parameterized over the status enum, so both workflows are
//! guaranteed identical semantics.
//!
//! ## Invariants
//!
//! - A chain is selected exactly once per approval cycle, at the Student
//!   Affairs stage, and is immutable until the cycle is reset.
//! - Chain members must be drawn from the post-SA stages, without duplicates.
//! - Documents predating chain support advance through a static fallback
//!   table (the "direct-to-Dean" path).

use crate::actor::Actor;
use crate::error::DomainError;
use crate::stage::{ApprovalStage, CHAIN_STAGES};
use crate::status::{CalendarStatus, ProposalStatus};

/// A status enum that participates in the shared approval-chain traversal.
pub trait ChainedStatus: Copy {
    /// Returns the approver stage required to act on this status, if pending.
    fn required_stage(self) -> Option<ApprovalStage>;

    /// Returns the pending status owned by a given stage.
    fn for_stage(stage: ApprovalStage) -> Self;

    /// Returns the string label of this status, for error messages.
    fn status_label(self) -> &'static str;

    /// Returns the next step for documents without a stored chain.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ChainSelectionRequired` at the Student Affairs
    /// stage (a chain must be chosen there) and
    /// `DomainError::NotPendingApproval` for non-pending statuses.
    fn static_step(self) -> Result<StaticStep<Self>, DomainError>;
}

/// The outcome of a static (chain-less) advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticStep<S> {
    /// Advance to the given pending status.
    Next(S),
    /// The chain is exhausted; the entity is fully approved.
    Complete,
}

/// The outcome of advancing an approval chain by one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainAdvance<S> {
    /// Move to the next pending stage.
    Next {
        /// The new pending status.
        status: S,
        /// The stage that must act next.
        stage: ApprovalStage,
        /// The new chain index (`None` when advancing without a chain).
        chain_index: Option<usize>,
    },
    /// The final stage has approved; the entity is fully approved.
    Complete,
}

impl ChainedStatus for CalendarStatus {
    fn required_stage(self) -> Option<ApprovalStage> {
        Self::required_stage(&self)
    }

    fn for_stage(stage: ApprovalStage) -> Self {
        Self::for_stage(stage)
    }

    fn status_label(self) -> &'static str {
        self.as_str()
    }

    fn static_step(self) -> Result<StaticStep<Self>, DomainError> {
        match self {
            Self::PendingPresident => Ok(StaticStep::Next(Self::PendingStudentAffairs)),
            Self::PendingStudentAffairs => Err(DomainError::ChainSelectionRequired),
            Self::PendingJointRegistrar | Self::PendingAssociateDean => {
                Ok(StaticStep::Next(Self::PendingDean))
            }
            Self::PendingDean => Ok(StaticStep::Complete),
            Self::Draft | Self::Approved | Self::Rejected => {
                Err(DomainError::NotPendingApproval {
                    status: self.as_str().to_string(),
                })
            }
        }
    }
}

impl ChainedStatus for ProposalStatus {
    fn required_stage(self) -> Option<ApprovalStage> {
        Self::required_stage(&self)
    }

    fn for_stage(stage: ApprovalStage) -> Self {
        Self::for_stage(stage)
    }

    fn status_label(self) -> &'static str {
        self.as_str()
    }

    fn static_step(self) -> Result<StaticStep<Self>, DomainError> {
        match self {
            Self::PendingPresident => Ok(StaticStep::Next(Self::PendingStudentAffairs)),
            Self::PendingStudentAffairs => Err(DomainError::ChainSelectionRequired),
            Self::PendingJointRegistrar | Self::PendingAssociateDean => {
                Ok(StaticStep::Next(Self::PendingDean))
            }
            Self::PendingDean => Ok(StaticStep::Complete),
            Self::Approved | Self::Rejected | Self::RevisionRequested => {
                Err(DomainError::NotPendingApproval {
                    status: self.as_str().to_string(),
                })
            }
        }
    }
}

/// Verifies that the entity is pending approval and that the actor is the
/// required approver for its current stage.
///
/// # Arguments
///
/// * `status` - The entity's current status
/// * `actor` - The actor attempting to act
///
/// # Returns
///
/// The stage the actor is acting at.
///
/// # Errors
///
/// * `DomainError::NotPendingApproval` if the status has no required approver
/// * `DomainError::WrongApprover` if the actor does not match the stage
pub fn ensure_current_approver<S: ChainedStatus>(
    status: S,
    actor: &Actor,
) -> Result<ApprovalStage, DomainError> {
    let stage: ApprovalStage =
        status
            .required_stage()
            .ok_or_else(|| DomainError::NotPendingApproval {
                status: status.status_label().to_string(),
            })?;

    if !actor.matches_stage(stage) {
        return Err(DomainError::WrongApprover { required: stage });
    }

    Ok(stage)
}

/// Validates a chain selection supplied at the Student Affairs stage.
///
/// The selection must be a non-empty, duplicate-free list of chain-eligible
/// stage labels.
///
/// # Arguments
///
/// * `labels` - The stage labels chosen by the Student Affairs office
///
/// # Errors
///
/// * `DomainError::ChainSelectionRequired` if the selection is empty
/// * `DomainError::UnknownStage` if a label is not a known stage
/// * `DomainError::InvalidChainSelection` if a stage is not chain-eligible
///   or appears more than once
pub fn select_chain(labels: &[String]) -> Result<Vec<ApprovalStage>, DomainError> {
    if labels.is_empty() {
        return Err(DomainError::ChainSelectionRequired);
    }

    let mut chain: Vec<ApprovalStage> = Vec::with_capacity(labels.len());
    for label in labels {
        let stage: ApprovalStage = ApprovalStage::parse(label)?;

        if !stage.is_chain_stage() {
            return Err(DomainError::InvalidChainSelection {
                reason: format!("'{}' is not a selectable stage", stage.label()),
            });
        }

        if chain.contains(&stage) {
            return Err(DomainError::InvalidChainSelection {
                reason: format!("stage '{}' appears more than once", stage.label()),
            });
        }

        chain.push(stage);
    }

    // Defensive: CHAIN_STAGES bounds the selection size
    debug_assert!(chain.len() <= CHAIN_STAGES.len());

    Ok(chain)
}

/// Starts a freshly selected chain at its first stage.
///
/// # Arguments
///
/// * `chain` - The validated chain selection
///
/// # Returns
///
/// The first stage, its pending status, and the initial chain index (0).
///
/// # Errors
///
/// Returns `DomainError::ChainSelectionRequired` if the chain is empty.
pub fn begin_chain<S: ChainedStatus>(
    chain: &[ApprovalStage],
) -> Result<(ApprovalStage, S, usize), DomainError> {
    let first: ApprovalStage = chain
        .first()
        .copied()
        .ok_or(DomainError::ChainSelectionRequired)?;
    Ok((first, S::for_stage(first), 0))
}

/// Advances an approval past its current stage.
///
/// When a chain is stored, advancement is by chain index; otherwise the
/// static fallback table is consulted (legacy documents approved before
/// chain support).
///
/// # Arguments
///
/// * `current` - The entity's current (pending) status
/// * `chain` - The stored custom approval chain (possibly empty)
/// * `chain_index` - The index of the stage that just acted, if chained
///
/// # Errors
///
/// * `DomainError::ChainSelectionRequired` if a chain must be selected first
/// * `DomainError::NotPendingApproval` if the status cannot advance
pub fn advance<S: ChainedStatus>(
    current: S,
    chain: &[ApprovalStage],
    chain_index: Option<usize>,
) -> Result<ChainAdvance<S>, DomainError> {
    if let Some(index) = chain_index {
        if !chain.is_empty() {
            let next: usize = index + 1;
            return Ok(chain.get(next).map_or(ChainAdvance::Complete, |stage| {
                ChainAdvance::Next {
                    status: S::for_stage(*stage),
                    stage: *stage,
                    chain_index: Some(next),
                }
            }));
        }
    }

    match current.static_step()? {
        StaticStep::Next(status) => {
            let stage: ApprovalStage =
                status
                    .required_stage()
                    .ok_or_else(|| DomainError::NotPendingApproval {
                        status: status.status_label().to_string(),
                    })?;
            Ok(ChainAdvance::Next {
                status,
                stage,
                chain_index: None,
            })
        }
        StaticStep::Complete => Ok(ChainAdvance::Complete),
    }
}
