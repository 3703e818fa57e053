// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the calendar workflow transitions.

use super::helpers::{
    admin, dean, draft_calendar, draft_event, general_secretary, joint_registrar, president,
    sa_office, test_now,
};
use crate::calendar::{self, NewCalendar, SubmitOutcome};
use gymkhana_audit::LogAction;
use gymkhana_domain::{
    AcademicYear, ApprovalStage, CalendarStatus, DomainError,
};
use time::macros::date;

fn new_calendar_input() -> NewCalendar {
    NewCalendar {
        academic_year: AcademicYear::parse("2025-26").expect("valid year"),
        events: Vec::new(),
    }
}

fn submitted_calendar() -> gymkhana_domain::Calendar {
    let outcome = calendar::submit(&draft_calendar(), &president(), false, test_now())
        .expect("submission succeeds");
    match outcome {
        SubmitOutcome::Submitted(transition) => transition.calendar,
        SubmitOutcome::Conflicts(_) => panic!("fixture events do not overlap"),
    }
}

// ============================================================================
// Creation and Locking
// ============================================================================

#[test]
fn test_create_initializes_unlocked_draft() {
    let created = calendar::create(new_calendar_input(), "admin-1", false, test_now())
        .expect("creation succeeds");

    assert_eq!(created.status, CalendarStatus::Draft);
    assert!(!created.is_locked);
    assert_eq!(created.created_by, "admin-1");
    assert!(created.custom_approval_chain.is_empty());
}

#[test]
fn test_create_rejects_duplicate_academic_year() {
    let result = calendar::create(new_calendar_input(), "admin-1", true, test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::DuplicateAcademicYear(_)
    ));
}

#[test]
fn test_lock_toggle_guards_against_noops() {
    let unlocked = draft_calendar();

    let locked = calendar::set_locked(&unlocked, true, test_now()).expect("lock succeeds");
    assert!(locked.is_locked);

    let result = calendar::set_locked(&locked, true, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::LockStateUnchanged { locked: true }
    ));

    let result = calendar::set_locked(&unlocked, false, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::LockStateUnchanged { locked: false }
    ));
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_locked_calendar_rejects_edits() {
    let mut locked = draft_calendar();
    locked.is_locked = true;

    let result = calendar::update_events(&locked, Vec::new(), &general_secretary(), test_now());

    assert!(matches!(result.unwrap_err(), DomainError::CalendarLocked));
}

#[test]
fn test_gs_may_edit_draft_but_not_pending() {
    let draft = draft_calendar();
    let events = vec![draft_event(
        "Tech Expo",
        date!(2026 - 05 - 01),
        date!(2026 - 05 - 02),
    )];

    let updated = calendar::update_events(&draft, events.clone(), &general_secretary(), test_now())
        .expect("draft edit succeeds");
    assert_eq!(updated.events.len(), 1);

    let pending = submitted_calendar();
    let result = calendar::update_events(&pending, events, &general_secretary(), test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::CalendarNotEditable {
            status: CalendarStatus::PendingStudentAffairs
        }
    ));
}

#[test]
fn test_president_may_edit_legacy_pending_president() {
    let mut legacy = draft_calendar();
    legacy.status = CalendarStatus::PendingPresident;
    let events = vec![draft_event(
        "Tech Expo",
        date!(2026 - 05 - 01),
        date!(2026 - 05 - 02),
    )];

    let updated = calendar::update_events(&legacy, events.clone(), &president(), test_now())
        .expect("legacy edit succeeds");
    assert_eq!(updated.status, CalendarStatus::PendingPresident);

    let result = calendar::update_events(&legacy, events, &general_secretary(), test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::CalendarNotEditable { .. }
    ));
}

#[test]
fn test_editing_rejected_calendar_resets_to_draft() {
    let mut rejected = draft_calendar();
    rejected.status = CalendarStatus::Rejected;
    rejected.rejected_by = Some(String::from("dean-1"));
    rejected.rejected_at = Some(test_now());
    rejected.rejection_reason = Some(String::from("budget too high"));
    rejected.custom_approval_chain = vec![ApprovalStage::DeanSa];
    rejected.current_chain_index = Some(0);

    let updated = calendar::update_events(
        &rejected,
        rejected.events.clone(),
        &general_secretary(),
        test_now(),
    )
    .expect("rejected edit succeeds");

    assert_eq!(updated.status, CalendarStatus::Draft);
    assert_eq!(updated.rejection_reason, None);
    assert_eq!(updated.rejected_by, None);
    assert!(updated.custom_approval_chain.is_empty());
    assert_eq!(updated.current_chain_index, None);
}

#[test]
fn test_admin_role_may_not_edit() {
    let result =
        calendar::update_events(&draft_calendar(), Vec::new(), &admin(), test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::NotCalendarEditor { .. }
    ));
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_requires_president() {
    let result = calendar::submit(&draft_calendar(), &general_secretary(), false, test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::WrongSubmitter { .. }
    ));
}

#[test]
fn test_submit_requires_at_least_one_event_for_any_actor() {
    let mut empty = draft_calendar();
    empty.events.clear();

    for actor in [president(), general_secretary(), admin()] {
        let result = calendar::submit(&empty, &actor, false, test_now());
        assert!(matches!(result.unwrap_err(), DomainError::NoEventsToSubmit));
    }
}

#[test]
fn test_submit_requires_draft_status() {
    let pending = submitted_calendar();

    let result = calendar::submit(&pending, &president(), false, test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::SubmitFromNonDraft { .. }
    ));
}

#[test]
fn test_submit_reports_conflicts_without_mutating() {
    let mut clashing = draft_calendar();
    clashing.events = vec![
        draft_event("Spring Fest", date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        draft_event("Film Night", date!(2026 - 01 - 03), date!(2026 - 01 - 10)),
    ];

    let outcome = calendar::submit(&clashing, &president(), false, test_now())
        .expect("conflict report is not an error");

    match outcome {
        SubmitOutcome::Conflicts(overlaps) => {
            assert_eq!(overlaps.len(), 1);
            assert_eq!(overlaps[0].first.title, "Spring Fest");
            assert_eq!(overlaps[0].second.title, "Film Night");
        }
        SubmitOutcome::Submitted(_) => panic!("expected a conflict report"),
    }
}

#[test]
fn test_submit_with_override_accepts_conflicts() {
    let mut clashing = draft_calendar();
    clashing.events = vec![
        draft_event("Spring Fest", date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        draft_event("Film Night", date!(2026 - 01 - 03), date!(2026 - 01 - 10)),
    ];

    let outcome = calendar::submit(&clashing, &president(), true, test_now())
        .expect("override submission succeeds");

    assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
}

#[test]
fn test_submit_jumps_straight_to_student_affairs() {
    let submitted = submitted_calendar();

    assert_eq!(submitted.status, CalendarStatus::PendingStudentAffairs);
    assert_eq!(
        submitted.current_approval_stage,
        Some(ApprovalStage::StudentAffairs)
    );
    assert_eq!(submitted.submitted_by, Some(String::from("president-1")));
}

#[test]
fn test_submit_produces_submitted_log_record() {
    let outcome = calendar::submit(&draft_calendar(), &president(), false, test_now())
        .expect("submission succeeds");

    let SubmitOutcome::Submitted(transition) = outcome else {
        panic!("expected submission");
    };
    assert_eq!(transition.log.action, LogAction::Submitted);
    assert_eq!(transition.log.stage, "President");
    assert_eq!(transition.log.performed_by, "president-1");
}

// ============================================================================
// Approval Chain
// ============================================================================

#[test]
fn test_student_affairs_approval_requires_chain_selection() {
    let pending = submitted_calendar();

    let result = calendar::approve(&pending, &sa_office(), None, None, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ChainSelectionRequired
    ));

    let result = calendar::approve(&pending, &sa_office(), Some(&[]), None, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ChainSelectionRequired
    ));
}

#[test]
fn test_duplicate_chain_selection_is_rejected() {
    let pending = submitted_calendar();
    let stages = vec![String::from("Dean SA"), String::from("Dean SA")];

    let result = calendar::approve(&pending, &sa_office(), Some(&stages), None, test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::InvalidChainSelection { .. }
    ));
}

#[test]
fn test_full_chain_walk_materializes_events() {
    let pending = submitted_calendar();
    let stages = vec![String::from("Joint Registrar SA"), String::from("Dean SA")];

    // Student Affairs selects the chain
    let at_jr = calendar::approve(&pending, &sa_office(), Some(&stages), None, test_now())
        .expect("SA approval succeeds");
    assert_eq!(
        at_jr.calendar.status,
        CalendarStatus::PendingJointRegistrar
    );
    assert_eq!(at_jr.calendar.current_chain_index, Some(0));
    assert!(at_jr.events.is_empty());

    // Joint Registrar advances to the Dean
    let at_dean = calendar::approve(&at_jr.calendar, &joint_registrar(), None, None, test_now())
        .expect("JR approval succeeds");
    assert_eq!(at_dean.calendar.status, CalendarStatus::PendingDean);
    assert_eq!(at_dean.calendar.current_chain_index, Some(1));

    // Dean completes the chain and materializes events
    let done = calendar::approve(&at_dean.calendar, &dean(), None, None, test_now())
        .expect("Dean approval succeeds");
    assert_eq!(done.calendar.status, CalendarStatus::Approved);
    assert_eq!(done.calendar.current_chain_index, None);
    assert_eq!(done.calendar.current_approval_stage, None);
    assert_eq!(done.calendar.approved_by, Some(String::from("dean-1")));

    assert_eq!(done.events.len(), 2);
    for (event, draft) in done.events.iter().zip(&pending.events) {
        assert_eq!(event.calendar_id, Some(String::from("cal_1")));
        assert_eq!(event.scheduled_start_date, draft.start_date);
        assert_eq!(
            event.proposal_due_date,
            Some(draft.start_date - time::Duration::days(21))
        );
        assert!(!event.proposal_submitted);
    }
}

#[test]
fn test_chain_selection_is_ignored_after_student_affairs() {
    let pending = submitted_calendar();
    let stages = vec![String::from("Dean SA")];

    let at_dean = calendar::approve(&pending, &sa_office(), Some(&stages), None, test_now())
        .expect("SA approval succeeds");

    // A late selection must not rewrite the chain chosen at Student Affairs
    let late_stages = vec![String::from("Joint Registrar SA")];
    let done = calendar::approve(
        &at_dean.calendar,
        &dean(),
        Some(&late_stages),
        None,
        test_now(),
    )
    .expect("Dean approval succeeds");

    assert_eq!(done.calendar.status, CalendarStatus::Approved);
    assert_eq!(
        done.calendar.custom_approval_chain,
        vec![ApprovalStage::DeanSa]
    );
}

#[test]
fn test_wrong_approver_is_rejected() {
    let pending = submitted_calendar();
    let stages = vec![String::from("Dean SA")];

    let at_dean = calendar::approve(&pending, &sa_office(), Some(&stages), None, test_now())
        .expect("SA approval succeeds");

    let result = calendar::approve(&at_dean.calendar, &sa_office(), None, None, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::WrongApprover {
            required: ApprovalStage::DeanSa
        }
    ));

    let result = calendar::approve(&at_dean.calendar, &joint_registrar(), None, None, test_now());
    assert!(matches!(
        result.unwrap_err(),
        DomainError::WrongApprover { .. }
    ));
}

#[test]
fn test_legacy_document_advances_direct_to_dean() {
    let mut legacy = submitted_calendar();
    legacy.status = CalendarStatus::PendingJointRegistrar;
    legacy.current_approval_stage = Some(ApprovalStage::JointRegistrarSa);
    legacy.custom_approval_chain.clear();
    legacy.current_chain_index = None;

    let advanced = calendar::approve(&legacy, &joint_registrar(), None, None, test_now())
        .expect("legacy approval succeeds");

    assert_eq!(advanced.calendar.status, CalendarStatus::PendingDean);
    assert_eq!(advanced.calendar.current_chain_index, None);
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_reject_records_metadata_and_clears_stage() {
    let pending = submitted_calendar();

    let rejected = calendar::reject(
        &pending,
        &sa_office(),
        String::from("clashes with exams"),
        test_now(),
    )
    .expect("rejection succeeds");

    assert_eq!(rejected.calendar.status, CalendarStatus::Rejected);
    assert_eq!(rejected.calendar.current_approval_stage, None);
    assert_eq!(
        rejected.calendar.rejection_reason,
        Some(String::from("clashes with exams"))
    );
    assert_eq!(rejected.log.action, LogAction::Rejected);
}

#[test]
fn test_second_rejection_is_rejected() {
    let pending = submitted_calendar();

    let rejected = calendar::reject(&pending, &sa_office(), String::from("no"), test_now())
        .expect("first rejection succeeds");

    let result = calendar::reject(
        &rejected.calendar,
        &sa_office(),
        String::from("again"),
        test_now(),
    );

    assert!(matches!(
        result.unwrap_err(),
        DomainError::NotPendingApproval { .. }
    ));
}

#[test]
fn test_reject_requires_a_reason() {
    let pending = submitted_calendar();

    let result = calendar::reject(&pending, &sa_office(), String::from("  "), test_now());

    assert!(matches!(
        result.unwrap_err(),
        DomainError::InvalidField { .. }
    ));
}
