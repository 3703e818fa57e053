// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::stage::ApprovalStage;
use serde::{Deserialize, Serialize};

/// Top-level roles recognized by the workflow core.
///
/// Roles arrive on the actor descriptor supplied by the authentication
/// collaborator; this core authorizes against them but never authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Hostel/campus administrator.
    Admin,
    /// Super administrator; holds every Admin capability.
    SuperAdmin,
    /// Gymkhana office bearer (sub-role selects which one).
    Gymkhana,
    /// Student Affairs; without a sub-role this is the SA office itself,
    /// with a sub-role it is one of the SA approvers.
    StudentAffairs,
}

impl Role {
    /// Parses a role from its snake_case string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            "gymkhana" => Ok(Self::Gymkhana),
            "student_affairs" => Ok(Self::StudentAffairs),
            _ => Err(DomainError::InvalidField {
                field: String::from("role"),
                message: format!("Unknown role: {s}"),
            }),
        }
    }

    /// Returns the snake_case string form of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Gymkhana => "gymkhana",
            Self::StudentAffairs => "student_affairs",
        }
    }
}

/// Sub-roles refining `Role::Gymkhana` and `Role::StudentAffairs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubRole {
    /// Gymkhana General Secretary; submits proposals, expenses, amendments.
    GeneralSecretary,
    /// Gymkhana President; submits calendars and mega-event proposals.
    President,
    /// Joint Registrar, Student Affairs.
    JointRegistrar,
    /// Associate Dean, Student Affairs.
    AssociateDean,
    /// Dean, Student Affairs.
    Dean,
}

impl SubRole {
    /// Parses a sub-role from its snake_case string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if the string is not a known
    /// sub-role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "general_secretary" => Ok(Self::GeneralSecretary),
            "president" => Ok(Self::President),
            "joint_registrar" => Ok(Self::JointRegistrar),
            "associate_dean" => Ok(Self::AssociateDean),
            "dean" => Ok(Self::Dean),
            _ => Err(DomainError::InvalidField {
                field: String::from("sub_role"),
                message: format!("Unknown sub-role: {s}"),
            }),
        }
    }

    /// Returns the snake_case string form of this sub-role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralSecretary => "general_secretary",
            Self::President => "president",
            Self::JointRegistrar => "joint_registrar",
            Self::AssociateDean => "associate_dean",
            Self::Dean => "dean",
        }
    }
}

/// The actor descriptor supplied per-operation by the auth collaborator.
///
/// The core trusts this descriptor for authorization decisions; producing it
/// (session validation, credential checks) is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's unique identifier.
    pub id: String,
    /// The actor's role.
    pub role: Role,
    /// The actor's sub-role, if any.
    pub sub_role: Option<SubRole>,
}

impl Actor {
    /// Creates a new actor descriptor.
    #[must_use]
    pub const fn new(id: String, role: Role, sub_role: Option<SubRole>) -> Self {
        Self { id, role, sub_role }
    }

    /// Returns whether the actor holds administrative authority.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::SuperAdmin)
    }

    /// Returns whether the actor is the Gymkhana General Secretary.
    #[must_use]
    pub const fn is_general_secretary(&self) -> bool {
        matches!(self.role, Role::Gymkhana)
            && matches!(self.sub_role, Some(SubRole::GeneralSecretary))
    }

    /// Returns whether the actor is the Gymkhana President.
    #[must_use]
    pub const fn is_president(&self) -> bool {
        matches!(self.role, Role::Gymkhana) && matches!(self.sub_role, Some(SubRole::President))
    }

    /// Returns whether the actor satisfies the approver required for a stage.
    ///
    /// Matching is strict: each stage is a distinct desk, so a Dean does not
    /// satisfy the Student Affairs office stage and vice versa.
    #[must_use]
    pub const fn matches_stage(&self, stage: ApprovalStage) -> bool {
        match stage {
            ApprovalStage::President => self.is_president(),
            ApprovalStage::StudentAffairs => {
                matches!(self.role, Role::StudentAffairs) && self.sub_role.is_none()
            }
            ApprovalStage::JointRegistrarSa => {
                matches!(self.role, Role::StudentAffairs)
                    && matches!(self.sub_role, Some(SubRole::JointRegistrar))
            }
            ApprovalStage::AssociateDeanSa => {
                matches!(self.role, Role::StudentAffairs)
                    && matches!(self.sub_role, Some(SubRole::AssociateDean))
            }
            ApprovalStage::DeanSa => {
                matches!(self.role, Role::StudentAffairs)
                    && matches!(self.sub_role, Some(SubRole::Dean))
            }
        }
    }

    /// Returns the approval stage this actor sits at, if any.
    ///
    /// Used to answer "which pending entities await this actor".
    #[must_use]
    pub const fn approval_stage(&self) -> Option<ApprovalStage> {
        match (self.role, self.sub_role) {
            (Role::Gymkhana, Some(SubRole::President)) => Some(ApprovalStage::President),
            (Role::StudentAffairs, None) => Some(ApprovalStage::StudentAffairs),
            (Role::StudentAffairs, Some(SubRole::JointRegistrar)) => {
                Some(ApprovalStage::JointRegistrarSa)
            }
            (Role::StudentAffairs, Some(SubRole::AssociateDean)) => {
                Some(ApprovalStage::AssociateDeanSa)
            }
            (Role::StudentAffairs, Some(SubRole::Dean)) => Some(ApprovalStage::DeanSa),
            _ => None,
        }
    }

    /// Returns a human-readable label describing the acting party.
    ///
    /// Used as the `stage` field of approval-log entries for actions that are
    /// not tied to a pending stage (submissions, admin reviews).
    #[must_use]
    pub const fn descriptor_label(&self) -> &'static str {
        match (self.role, self.sub_role) {
            (Role::Admin, _) => "Admin",
            (Role::SuperAdmin, _) => "Super Admin",
            (Role::Gymkhana, Some(SubRole::GeneralSecretary)) => "General Secretary",
            (Role::Gymkhana, Some(SubRole::President)) => "President",
            (Role::Gymkhana, _) => "Gymkhana",
            (Role::StudentAffairs, Some(SubRole::JointRegistrar)) => "Joint Registrar SA",
            (Role::StudentAffairs, Some(SubRole::AssociateDean)) => "Associate Dean SA",
            (Role::StudentAffairs, Some(SubRole::Dean)) => "Dean SA",
            (Role::StudentAffairs, _) => "Student Affairs",
        }
    }
}
