// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for status routing and actor/stage matching.

use crate::{
    Actor, ApprovalStage, CalendarStatus, EventStatus, ProposalStatus, Role, SubRole,
};
use std::str::FromStr;

// ============================================================================
// Status <-> Stage Routing
// ============================================================================

#[test]
fn test_calendar_routing_covers_every_pending_status() {
    assert_eq!(
        CalendarStatus::PendingPresident.required_stage(),
        Some(ApprovalStage::President)
    );
    assert_eq!(
        CalendarStatus::PendingStudentAffairs.required_stage(),
        Some(ApprovalStage::StudentAffairs)
    );
    assert_eq!(
        CalendarStatus::PendingJointRegistrar.required_stage(),
        Some(ApprovalStage::JointRegistrarSa)
    );
    assert_eq!(
        CalendarStatus::PendingAssociateDean.required_stage(),
        Some(ApprovalStage::AssociateDeanSa)
    );
    assert_eq!(
        CalendarStatus::PendingDean.required_stage(),
        Some(ApprovalStage::DeanSa)
    );
}

#[test]
fn test_terminal_statuses_have_no_approver() {
    assert_eq!(CalendarStatus::Draft.required_stage(), None);
    assert_eq!(CalendarStatus::Approved.required_stage(), None);
    assert_eq!(CalendarStatus::Rejected.required_stage(), None);
    assert_eq!(ProposalStatus::Approved.required_stage(), None);
    assert_eq!(ProposalStatus::Rejected.required_stage(), None);
    assert_eq!(ProposalStatus::RevisionRequested.required_stage(), None);
}

#[test]
fn test_stage_to_status_is_inverse_of_routing() {
    for stage in [
        ApprovalStage::President,
        ApprovalStage::StudentAffairs,
        ApprovalStage::JointRegistrarSa,
        ApprovalStage::AssociateDeanSa,
        ApprovalStage::DeanSa,
    ] {
        assert_eq!(
            CalendarStatus::for_stage(stage).required_stage(),
            Some(stage)
        );
        assert_eq!(
            ProposalStatus::for_stage(stage).required_stage(),
            Some(stage)
        );
    }
}

#[test]
fn test_status_string_round_trip() {
    for status in [
        CalendarStatus::Draft,
        CalendarStatus::PendingPresident,
        CalendarStatus::PendingStudentAffairs,
        CalendarStatus::PendingJointRegistrar,
        CalendarStatus::PendingAssociateDean,
        CalendarStatus::PendingDean,
        CalendarStatus::Approved,
        CalendarStatus::Rejected,
    ] {
        assert_eq!(
            CalendarStatus::from_str(status.as_str()).expect("round trip"),
            status
        );
    }

    assert_eq!(
        ProposalStatus::from_str("revision_requested").expect("parses"),
        ProposalStatus::RevisionRequested
    );
    assert!(CalendarStatus::from_str("revision_requested").is_err());
}

#[test]
fn test_stage_label_round_trip() {
    for stage in [
        ApprovalStage::President,
        ApprovalStage::StudentAffairs,
        ApprovalStage::JointRegistrarSa,
        ApprovalStage::AssociateDeanSa,
        ApprovalStage::DeanSa,
    ] {
        assert_eq!(ApprovalStage::parse(stage.label()).expect("round trip"), stage);
    }
}

#[test]
fn test_event_status_strings() {
    assert_eq!(EventStatus::ProposalSubmitted.as_str(), "proposal_submitted");
    assert_eq!(EventStatus::ProposalApproved.as_str(), "proposal_approved");
}

// ============================================================================
// Actor / Stage Matching
// ============================================================================

fn actor(role: Role, sub_role: Option<SubRole>) -> Actor {
    Actor::new(String::from("actor-1"), role, sub_role)
}

#[test]
fn test_president_matches_only_president_stage() {
    let president = actor(Role::Gymkhana, Some(SubRole::President));

    assert!(president.matches_stage(ApprovalStage::President));
    assert!(!president.matches_stage(ApprovalStage::StudentAffairs));
    assert!(!president.matches_stage(ApprovalStage::DeanSa));
}

#[test]
fn test_sa_office_does_not_match_dean_stage() {
    let office = actor(Role::StudentAffairs, None);

    assert!(office.matches_stage(ApprovalStage::StudentAffairs));
    assert!(!office.matches_stage(ApprovalStage::DeanSa));
}

#[test]
fn test_dean_does_not_match_sa_office_stage() {
    let dean = actor(Role::StudentAffairs, Some(SubRole::Dean));

    assert!(dean.matches_stage(ApprovalStage::DeanSa));
    assert!(!dean.matches_stage(ApprovalStage::StudentAffairs));
}

#[test]
fn test_general_secretary_matches_no_stage() {
    let gs = actor(Role::Gymkhana, Some(SubRole::GeneralSecretary));

    assert_eq!(gs.approval_stage(), None);
    assert!(!gs.matches_stage(ApprovalStage::President));
}

#[test]
fn test_admin_holds_admin_authority() {
    assert!(actor(Role::Admin, None).is_admin());
    assert!(actor(Role::SuperAdmin, None).is_admin());
    assert!(!actor(Role::Gymkhana, Some(SubRole::President)).is_admin());
}

#[test]
fn test_descriptor_labels() {
    assert_eq!(
        actor(Role::Gymkhana, Some(SubRole::GeneralSecretary)).descriptor_label(),
        "General Secretary"
    );
    assert_eq!(
        actor(Role::StudentAffairs, Some(SubRole::Dean)).descriptor_label(),
        "Dean SA"
    );
    assert_eq!(actor(Role::SuperAdmin, None).descriptor_label(), "Super Admin");
}
