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
#![allow(clippy::multiple_crate_versions)]

//! Thin HTTP pass-through for the Gymkhana Events System.
//!
//! Authentication lives with an external collaborator; each request carries
//! the already-authenticated actor descriptor in `x-actor-id`,
//! `x-actor-role`, and `x-actor-sub-role` headers. This binary only maps
//! JSON bodies onto the API operations and API errors onto HTTP responses.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use gymkhana_api::{
    ApiError, ApproveCalendarRequest, ApproveExpenseRequest, ApproveProposalRequest,
    CreateAmendmentRequest, CreateCalendarRequest, CreateProposalRequest, PendingProposalsQuery,
    RejectCalendarRequest, RejectProposalRequest, RequestRevisionRequest, ReviewAmendmentRequest,
    SubmitCalendarRequest, SubmitExpenseRequest, UpdateCalendarRequest, UpdateExpenseRequest,
    UpdateProposalRequest,
};
use gymkhana_domain::{Actor, Role, SubRole, SystemClock};
use gymkhana_persistence::MemoryStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Gymkhana Server - HTTP server for the Gymkhana Events System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

type SharedStore = Arc<Mutex<MemoryStore>>;

/// Reads the actor descriptor handed over by the auth collaborator.
fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let header = |name: &str| -> Result<Option<String>, ApiError> {
        headers
            .get(name)
            .map(|value| {
                value
                    .to_str()
                    .map(str::to_string)
                    .map_err(|_| ApiError::InvalidInput {
                        field: name.to_string(),
                        message: String::from("Header value is not valid UTF-8"),
                    })
            })
            .transpose()
    };

    let id: String = header("x-actor-id")?.ok_or_else(|| ApiError::InvalidInput {
        field: String::from("x-actor-id"),
        message: String::from("Missing actor id header"),
    })?;
    let role_str: String = header("x-actor-role")?.ok_or_else(|| ApiError::InvalidInput {
        field: String::from("x-actor-role"),
        message: String::from("Missing actor role header"),
    })?;

    let role: Role =
        Role::parse(&role_str).map_err(gymkhana_api::translate_domain_error)?;
    let sub_role: Option<SubRole> = header("x-actor-sub-role")?
        .map(|value| SubRole::parse(&value).map_err(gymkhana_api::translate_domain_error))
        .transpose()?;

    Ok(Actor::new(id, role, sub_role))
}

/// Maps an API result onto an HTTP response with the structured error body.
fn respond<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => {
            let status: StatusCode = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(err.body())).into_response()
        }
    }
}

macro_rules! with_actor {
    ($headers:expr, $actor:ident => $body:expr) => {
        match actor_from_headers(&$headers) {
            Ok($actor) => $body,
            Err(err) => respond::<()>(Err(err)),
        }
    };
}

// ---------------------------------------------------------------------------
// Calendar routes
// ---------------------------------------------------------------------------

async fn create_calendar(
    AxumState(store): AxumState<SharedStore>,
    headers: HeaderMap,
    Json(request): Json<CreateCalendarRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::create_calendar(&mut *store, request, &actor, &SystemClock))
    })
}

async fn list_calendars(AxumState(store): AxumState<SharedStore>) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_calendars(&*store))
}

async fn get_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_calendar_by_id(&*store, &id))
}

async fn get_calendar_by_year(
    AxumState(store): AxumState<SharedStore>,
    Path(year): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_calendar_by_year(&*store, &year))
}

async fn update_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateCalendarRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::update_calendar(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn submit_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SubmitCalendarRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::submit_calendar(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn approve_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ApproveCalendarRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::approve_calendar(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn reject_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RejectCalendarRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::reject_calendar(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn lock_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::lock_calendar(&mut *store, &id, &actor, &SystemClock))
    })
}

async fn unlock_calendar(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::unlock_calendar(&mut *store, &id, &actor, &SystemClock))
    })
}

async fn approval_history(
    AxumState(store): AxumState<SharedStore>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_approval_history(&*store, &kind, &id))
}

// ---------------------------------------------------------------------------
// Proposal routes
// ---------------------------------------------------------------------------

async fn create_proposal(
    AxumState(store): AxumState<SharedStore>,
    headers: HeaderMap,
    Json(request): Json<CreateProposalRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::create_proposal(&mut *store, request, &actor, &SystemClock))
    })
}

async fn get_proposal(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_proposal_by_id(&*store, &id))
}

async fn get_proposal_by_event(
    AxumState(store): AxumState<SharedStore>,
    Path(event_id): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_proposal_by_event(&*store, &event_id))
}

async fn update_proposal(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateProposalRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::update_proposal(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn approve_proposal(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ApproveProposalRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::approve_proposal(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn reject_proposal(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RejectProposalRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::reject_proposal(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn request_revision(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RequestRevisionRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::request_revision(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn pending_proposals(
    AxumState(store): AxumState<SharedStore>,
    Query(query): Query<PendingProposalsQuery>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_pending_proposals(
        &*store,
        query,
        &SystemClock,
    ))
}

async fn proposals_for_approval(
    AxumState(store): AxumState<SharedStore>,
    headers: HeaderMap,
) -> Response {
    with_actor!(headers, actor => {
        let store = store.lock().await;
        respond(gymkhana_api::get_proposals_for_approval(&*store, &actor))
    })
}

// ---------------------------------------------------------------------------
// Expense routes
// ---------------------------------------------------------------------------

async fn submit_expense(
    AxumState(store): AxumState<SharedStore>,
    headers: HeaderMap,
    Json(request): Json<SubmitExpenseRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::submit_expense(&mut *store, request, &actor, &SystemClock))
    })
}

async fn get_expense(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_expense_by_id(&*store, &id))
}

async fn get_expense_by_event(
    AxumState(store): AxumState<SharedStore>,
    Path(event_id): Path<String>,
) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_expense_by_event(&*store, &event_id))
}

async fn update_expense(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdateExpenseRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::update_expense(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn approve_expense(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ApproveExpenseRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::approve_expense(&mut *store, &id, request, &actor, &SystemClock))
    })
}

// ---------------------------------------------------------------------------
// Amendment routes
// ---------------------------------------------------------------------------

async fn create_amendment(
    AxumState(store): AxumState<SharedStore>,
    headers: HeaderMap,
    Json(request): Json<CreateAmendmentRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::create_amendment(&mut *store, request, &actor, &SystemClock))
    })
}

async fn approve_amendment(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ReviewAmendmentRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::approve_amendment(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn reject_amendment(
    AxumState(store): AxumState<SharedStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ReviewAmendmentRequest>,
) -> Response {
    with_actor!(headers, actor => {
        let mut store = store.lock().await;
        respond(gymkhana_api::reject_amendment(&mut *store, &id, request, &actor, &SystemClock))
    })
}

async fn pending_amendments(AxumState(store): AxumState<SharedStore>) -> Response {
    let store = store.lock().await;
    respond(gymkhana_api::get_pending_amendments(&*store))
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/calendars", post(create_calendar).get(list_calendars))
        .route("/calendars/year/{year}", get(get_calendar_by_year))
        .route("/calendars/{id}", get(get_calendar))
        .route("/calendars/{id}/events", put(update_calendar))
        .route("/calendars/{id}/submit", post(submit_calendar))
        .route("/calendars/{id}/approve", post(approve_calendar))
        .route("/calendars/{id}/reject", post(reject_calendar))
        .route("/calendars/{id}/lock", post(lock_calendar))
        .route("/calendars/{id}/unlock", post(unlock_calendar))
        .route("/history/{kind}/{id}", get(approval_history))
        .route("/proposals", post(create_proposal))
        .route("/proposals/pending", get(pending_proposals))
        .route("/proposals/for-approval", get(proposals_for_approval))
        .route("/proposals/by-event/{event_id}", get(get_proposal_by_event))
        .route("/proposals/{id}", get(get_proposal).put(update_proposal))
        .route("/proposals/{id}/approve", post(approve_proposal))
        .route("/proposals/{id}/reject", post(reject_proposal))
        .route("/proposals/{id}/request-revision", post(request_revision))
        .route("/expenses", post(submit_expense))
        .route("/expenses/by-event/{event_id}", get(get_expense_by_event))
        .route("/expenses/{id}", get(get_expense).put(update_expense))
        .route("/expenses/{id}/approve", post(approve_expense))
        .route("/amendments", post(create_amendment))
        .route("/amendments/pending", get(pending_amendments))
        .route("/amendments/{id}/approve", post(approve_amendment))
        .route("/amendments/{id}/reject", post(reject_amendment))
        .with_state(store)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();
    let store: SharedStore = Arc::new(Mutex::new(MemoryStore::new()));

    let addr: String = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("gymkhana server listening on {addr}");

    axum::serve(listener, router(store)).await?;

    Ok(())
}
