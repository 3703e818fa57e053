// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization checks for administratively gated operations.
//!
//! The actor descriptor is produced by an external authentication
//! collaborator; this module only decides whether a descriptor may perform
//! an operation. Stage-specific gates (who approves which pending status,
//! who submits what) are workflow rules and live in the core transitions;
//! the checks here cover the flat admin-only operations.

use gymkhana_domain::Actor;

use crate::error::AuthError;

/// Authorization service for role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &Actor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }

    /// Checks if an actor may create a calendar.
    ///
    /// Only Admin and `SuperAdmin` actors may create calendars.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks administrative authority.
    pub fn authorize_create_calendar(actor: &Actor) -> Result<(), AuthError> {
        Self::require_admin(actor, "create_calendar")
    }

    /// Checks if an actor may lock a calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks administrative authority.
    pub fn authorize_lock_calendar(actor: &Actor) -> Result<(), AuthError> {
        Self::require_admin(actor, "lock_calendar")
    }

    /// Checks if an actor may unlock a calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks administrative authority.
    pub fn authorize_unlock_calendar(actor: &Actor) -> Result<(), AuthError> {
        Self::require_admin(actor, "unlock_calendar")
    }

    /// Checks if an actor may approve an expense record.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks administrative authority.
    pub fn authorize_approve_expense(actor: &Actor) -> Result<(), AuthError> {
        Self::require_admin(actor, "approve_expense")
    }

    /// Checks if an actor may review (approve or reject) an amendment.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks administrative authority.
    pub fn authorize_review_amendment(actor: &Actor) -> Result<(), AuthError> {
        Self::require_admin(actor, "review_amendment")
    }
}
