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

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A typed reference to the entity an approval-log entry describes.
///
/// The log spans every workflow, so the reference is a tagged union over the
/// entity kind rather than a bare foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// An annual activity calendar.
    Calendar(String),
    /// An event proposal.
    Proposal(String),
    /// A post-event expense record.
    Expense(String),
    /// An out-of-band amendment.
    Amendment(String),
}

impl EntityRef {
    /// Returns the referenced entity's id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Calendar(id) | Self::Proposal(id) | Self::Expense(id) | Self::Amendment(id) => id,
        }
    }

    /// Returns the entity kind as a string.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Calendar(_) => "calendar",
            Self::Proposal(_) => "proposal",
            Self::Expense(_) => "expense",
            Self::Amendment(_) => "amendment",
        }
    }
}

/// The action a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    /// The entity was submitted into its approval cycle.
    Submitted,
    /// The current stage approved.
    Approved,
    /// The current stage rejected.
    Rejected,
    /// The current stage asked the submitter to revise and resubmit.
    RevisionRequested,
}

impl LogAction {
    /// Converts this action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::RevisionRequested => "revision_requested",
        }
    }
}

impl std::fmt::Display for LogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The transition detail produced by a workflow operation.
///
/// Workflow transitions produce a record; the orchestration layer binds it to
/// the entity reference and timestamp when appending to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Label of the role that acted (e.g. "President", "Dean SA").
    pub stage: String,
    /// The action performed.
    pub action: LogAction,
    /// Id of the actor who performed the action.
    pub performed_by: String,
    /// Comments supplied with the action.
    pub comments: Option<String>,
}

impl LogRecord {
    /// Creates a new log record.
    ///
    /// # Arguments
    ///
    /// * `stage` - Label of the role that acted
    /// * `action` - The action performed
    /// * `performed_by` - Id of the acting actor
    /// * `comments` - Comments supplied with the action
    #[must_use]
    pub const fn new(
        stage: String,
        action: LogAction,
        performed_by: String,
        comments: Option<String>,
    ) -> Self {
        Self {
            stage,
            action,
            performed_by,
            comments,
        }
    }
}

/// One immutable entry in the append-only approval log.
///
/// Every transition across the four workflows produces exactly one entry.
/// Entries are never updated or deleted; they are the sole historical
/// record, while entity status fields reflect only the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLogEntry {
    /// Entry identifier, assigned by the store.
    pub id: String,
    /// The entity the entry describes.
    pub entity: EntityRef,
    /// Label of the role that acted.
    pub stage: String,
    /// The action performed.
    pub action: LogAction,
    /// Id of the actor who performed the action.
    pub performed_by: String,
    /// Comments supplied with the action.
    pub comments: Option<String>,
    /// When the transition was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl ApprovalLogEntry {
    /// Binds a transition record to its entity and timestamp.
    ///
    /// Once created, an entry is immutable.
    ///
    /// # Arguments
    ///
    /// * `entity` - The entity the record describes
    /// * `record` - The transition record produced by the workflow
    /// * `recorded_at` - When the transition was recorded
    #[must_use]
    pub fn new(entity: EntityRef, record: LogRecord, recorded_at: OffsetDateTime) -> Self {
        Self {
            id: String::new(),
            entity,
            stage: record.stage,
            action: record.action,
            performed_by: record.performed_by,
            comments: record.comments,
            recorded_at,
        }
    }
}
