// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A named approver stage in the event-approval workflows.
///
/// Stages identify the single role that must act before a pending status can
/// advance. The post-Student-Affairs stages (`JointRegistrarSa`,
/// `AssociateDeanSa`, `DeanSa`) are the only stages eligible for inclusion in
/// a custom approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStage {
    /// Gymkhana President (submission stage for calendars, first approval
    /// stage for standard proposals).
    #[serde(rename = "President")]
    President,
    /// The Student Affairs office, which selects the onward approval chain.
    #[serde(rename = "Student Affairs")]
    StudentAffairs,
    /// Joint Registrar, Student Affairs.
    #[serde(rename = "Joint Registrar SA")]
    JointRegistrarSa,
    /// Associate Dean, Student Affairs.
    #[serde(rename = "Associate Dean SA")]
    AssociateDeanSa,
    /// Dean, Student Affairs.
    #[serde(rename = "Dean SA")]
    DeanSa,
}

/// The stages eligible for custom approval chains, in seniority order.
pub const CHAIN_STAGES: [ApprovalStage; 3] = [
    ApprovalStage::JointRegistrarSa,
    ApprovalStage::AssociateDeanSa,
    ApprovalStage::DeanSa,
];

/// Comma-separated labels of the chain-eligible stages, for error messages.
pub const CHAIN_STAGE_LABELS: &str = "Joint Registrar SA, Associate Dean SA, Dean SA";

/// Comma-separated labels of all stages, for error messages.
pub const STAGE_LABELS: &str =
    "President, Student Affairs, Joint Registrar SA, Associate Dean SA, Dean SA";

impl ApprovalStage {
    /// Returns the display label of this stage.
    ///
    /// Labels are also the wire representation used in approval chains and
    /// approval-log entries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::President => "President",
            Self::StudentAffairs => "Student Affairs",
            Self::JointRegistrarSa => "Joint Registrar SA",
            Self::AssociateDeanSa => "Associate Dean SA",
            Self::DeanSa => "Dean SA",
        }
    }

    /// Parses a stage from its display label.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownStage` if the label is not recognized.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        match label {
            "President" => Ok(Self::President),
            "Student Affairs" => Ok(Self::StudentAffairs),
            "Joint Registrar SA" => Ok(Self::JointRegistrarSa),
            "Associate Dean SA" => Ok(Self::AssociateDeanSa),
            "Dean SA" => Ok(Self::DeanSa),
            _ => Err(DomainError::UnknownStage(label.to_string())),
        }
    }

    /// Returns whether this stage may appear in a custom approval chain.
    #[must_use]
    pub const fn is_chain_stage(&self) -> bool {
        matches!(
            self,
            Self::JointRegistrarSa | Self::AssociateDeanSa | Self::DeanSa
        )
    }
}

impl std::str::FromStr for ApprovalStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
