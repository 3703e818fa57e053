// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Proposal operation tests.

use gymkhana_persistence::MemoryStore;

use super::helpers::{
    dean, early_clock, general_secretary, president, proposal_request, sa_office,
    seed_approved_calendar, seed_mega_event, test_clock,
};
use crate::{
    ApiError, ApproveProposalRequest, PendingProposalsQuery, RejectProposalRequest,
    RequestRevisionRequest, UpdateProposalRequest, approve_proposal, create_proposal,
    get_approval_history, get_pending_proposals, get_proposal_by_event, get_proposal_by_id,
    get_proposals_for_approval, reject_proposal, request_revision, update_proposal,
};

#[test]
fn test_proposal_lifecycle_to_approval() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);
    let event_id = event_ids[0].clone();

    let created = create_proposal(
        &mut store,
        proposal_request(&event_id),
        &general_secretary(),
        &clock,
    )
    .expect("submission succeeds");
    let proposal_id = created.proposal.id.clone();
    assert_eq!(created.proposal.status, "pending_president");

    // The event now carries the back-link
    let linked = get_proposal_by_event(&store, &event_id).expect("linked proposal");
    assert_eq!(linked.id, proposal_id);

    let at_sa = approve_proposal(
        &mut store,
        &proposal_id,
        ApproveProposalRequest::default(),
        &president(),
        &clock,
    )
    .expect("president approval succeeds");
    assert_eq!(at_sa.proposal.status, "pending_student_affairs");

    let at_dean = approve_proposal(
        &mut store,
        &proposal_id,
        ApproveProposalRequest {
            comments: None,
            next_approval_stages: Some(vec![String::from("Dean SA")]),
        },
        &sa_office(),
        &clock,
    )
    .expect("SA approval succeeds");
    assert_eq!(at_dean.proposal.status, "pending_dean");

    let done = approve_proposal(
        &mut store,
        &proposal_id,
        ApproveProposalRequest::default(),
        &dean(),
        &clock,
    )
    .expect("Dean approval succeeds");
    assert_eq!(done.proposal.status, "approved");
    assert_eq!(
        done.event.expect("event flipped").status,
        "proposal_approved"
    );

    let history =
        get_approval_history(&store, "proposal", &proposal_id).expect("history query succeeds");
    assert_eq!(history.len(), 4);
}

#[test]
fn test_submission_before_window_is_rejected() {
    let mut store = MemoryStore::new();
    let (_, event_ids) = seed_approved_calendar(&mut store);

    // Event starts 2026-03-11; its window opens 2026-02-18
    let result = create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &early_clock(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "proposal_window"
    ));
}

#[test]
fn test_duplicate_submission_is_rejected() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);

    create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    )
    .expect("first submission succeeds");

    let result = create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation { rule, .. } if rule == "single_proposal_per_event"
    ));
}

#[test]
fn test_mega_event_proposal_is_submitted_by_president_at_sa() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let event_id = seed_mega_event(&mut store);

    // The GS may not submit for a mega event
    let gs_attempt = create_proposal(
        &mut store,
        proposal_request(&event_id),
        &general_secretary(),
        &clock,
    );
    assert!(matches!(gs_attempt.unwrap_err(), ApiError::Forbidden { .. }));

    let created = create_proposal(&mut store, proposal_request(&event_id), &president(), &clock)
        .expect("president submission succeeds");
    assert_eq!(created.proposal.status, "pending_student_affairs");

    // The due date was lazily backfilled onto the event
    let proposal = get_proposal_by_id(&store, &created.proposal.id).expect("proposal exists");
    assert_eq!(proposal.event_id, event_id);
}

#[test]
fn test_revision_cycle_resets_chain_and_counts() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);

    let created = create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    )
    .expect("submission succeeds");
    let proposal_id = created.proposal.id;

    let revision = request_revision(
        &mut store,
        &proposal_id,
        RequestRevisionRequest {
            comments: Some(String::from("tighten the budget")),
        },
        &president(),
        &clock,
    )
    .expect("revision request succeeds");
    assert_eq!(revision.proposal.status, "revision_requested");

    let resubmitted = update_proposal(
        &mut store,
        &proposal_id,
        UpdateProposalRequest {
            objectives: Some(String::from("Run the festival on a leaner budget")),
            expense_breakdown: None,
        },
        &general_secretary(),
        &clock,
    )
    .expect("resubmission succeeds");
    assert_eq!(resubmitted.proposal.status, "pending_president");
    assert_eq!(resubmitted.proposal.revision_count, 1);

    let history =
        get_approval_history(&store, "proposal", &proposal_id).expect("history query succeeds");
    let actions: Vec<&str> = history.iter().map(|entry| entry.action.as_str()).collect();
    assert_eq!(actions, vec!["submitted", "revision_requested", "submitted"]);
}

#[test]
fn test_rejected_proposal_can_be_edited_by_gs_only() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);

    let created = create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    )
    .expect("submission succeeds");
    let proposal_id = created.proposal.id;

    reject_proposal(
        &mut store,
        &proposal_id,
        RejectProposalRequest {
            reason: String::from("over budget"),
        },
        &president(),
        &clock,
    )
    .expect("rejection succeeds");

    // The dean has no business editing
    let dean_attempt = update_proposal(
        &mut store,
        &proposal_id,
        UpdateProposalRequest::default(),
        &dean(),
        &clock,
    );
    assert!(matches!(dean_attempt.unwrap_err(), ApiError::Forbidden { .. }));

    let resubmitted = update_proposal(
        &mut store,
        &proposal_id,
        UpdateProposalRequest::default(),
        &general_secretary(),
        &clock,
    )
    .expect("GS edit succeeds");
    assert_eq!(resubmitted.proposal.status, "pending_president");
    assert_eq!(resubmitted.proposal.rejection_reason, None);
}

#[test]
fn test_pending_proposals_report() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);
    // A mega event inside the horizon must not appear
    seed_mega_event(&mut store);

    // Both fixture events start within 60 days of 2026-02-20
    let report = get_pending_proposals(&store, PendingProposalsQuery { days_until_due: 60 }, &clock)
        .expect("report succeeds");
    assert_eq!(report.len(), 2);

    // Spring Fest (starts 03-11, due 02-18): window open on 02-20
    let spring = report
        .iter()
        .find(|row| row.event.title == "Spring Fest")
        .expect("spring fest listed");
    assert_eq!(spring.days_until_event_start, 19);
    assert_eq!(spring.days_until_proposal_due, -2);
    assert!(spring.is_proposal_window_open);

    // Sports Meet (starts 04-02, due 03-12): window not yet open
    let sports = report
        .iter()
        .find(|row| row.event.title == "Sports Meet")
        .expect("sports meet listed");
    assert!(!sports.is_proposal_window_open);
    assert_eq!(sports.days_until_proposal_due, 20);

    // Once a proposal is submitted the event drops off the report
    create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    )
    .expect("submission succeeds");
    let after = get_pending_proposals(&store, PendingProposalsQuery { days_until_due: 60 }, &clock)
        .expect("report succeeds");
    assert_eq!(after.len(), 1);

    // Negative horizons are rejected
    let bad = get_pending_proposals(&store, PendingProposalsQuery { days_until_due: -3 }, &clock);
    assert!(matches!(bad.unwrap_err(), ApiError::InvalidInput { .. }));
}

#[test]
fn test_proposals_for_approval_match_actor_stage() {
    let mut store = MemoryStore::new();
    let clock = test_clock();
    let (_, event_ids) = seed_approved_calendar(&mut store);

    create_proposal(
        &mut store,
        proposal_request(&event_ids[0]),
        &general_secretary(),
        &clock,
    )
    .expect("submission succeeds");

    // Awaiting the President, so the President sees it and the Dean does not
    let presidents_queue =
        get_proposals_for_approval(&store, &president()).expect("query succeeds");
    assert_eq!(presidents_queue.len(), 1);

    let deans_queue = get_proposals_for_approval(&store, &dean()).expect("query succeeds");
    assert!(deans_queue.is_empty());

    // An actor with no stage is rejected outright
    let gs_queue = get_proposals_for_approval(&store, &general_secretary());
    assert!(matches!(
        gs_queue.unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
}
