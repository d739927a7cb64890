use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::catalog::{roles, Status};
use super::domain::{Decision, RegistrationSubmission};
use super::filter::CandidateFilter;
use super::repository::DecisionOutcome;
use super::service::{RegistryService, RegistryServiceError};
use crate::storage::KeyValueStore;

/// Router builder exposing the registration, membership, and statistics
/// endpoints over a shared service.
pub fn registry_router<S>(service: Arc<RegistryService<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/registrations",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route(
            "/api/v1/registrations/:id/decision",
            post(decision_handler::<S>),
        )
        .route("/api/v1/members", get(members_handler::<S>))
        .route("/api/v1/members/export", get(export_members_handler::<S>))
        .route("/api/v1/members/:id/team", put(assign_team_handler::<S>))
        .route("/api/v1/statistics", get(statistics_handler::<S>))
        .with_state(service)
}

/// Raw submission payload; validated before it reaches the store.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionPayload {
    #[serde(default)]
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) role_id: Option<u32>,
    #[serde(default)]
    pub(crate) reason_to_apply: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionPayload {
    pub(crate) decision: Decision,
    #[serde(default)]
    pub(crate) note: Option<String>,
    #[serde(default)]
    pub(crate) actor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamPayload {
    #[serde(default)]
    pub(crate) team: String,
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
    axum::Json(payload): axum::Json<SubmissionPayload>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let submission = match validate_submission(payload) {
        Ok(submission) => submission,
        Err(problems) => {
            let payload = json!({ "errors": problems });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.submit(submission, Local::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let filter = match build_filter(&query) {
        Ok(filter) => filter,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.list_candidates(&filter) {
        Ok(candidates) => {
            let payload = json!({ "total": candidates.len(), "candidates": candidates });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn decision_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(id): Path<i64>,
    axum::Json(payload): axum::Json<DecisionPayload>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let outcome = service.decide(
        id,
        payload.decision,
        payload.note.as_deref(),
        payload.actor.as_deref(),
        Local::now(),
    );

    match outcome {
        Ok(DecisionOutcome::Applied(candidate)) => {
            let payload = json!({ "applied": true, "candidate": candidate });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        // Unknown ids are a silent no-op in the store; report success with
        // nothing applied rather than a 404.
        Ok(DecisionOutcome::NotFound) => {
            let payload = json!({ "applied": false });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(DecisionOutcome::Conflict(candidate)) => {
            let payload = json!({
                "error": "application already settled",
                "status": candidate.status.label(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn members_handler<S>(State(service): State<Arc<RegistryService<S>>>) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.list_members() {
        Ok(members) => {
            let payload = json!({ "total": members.len(), "members": members });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn assign_team_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
    Path(id): Path<i64>,
    axum::Json(payload): axum::Json<TeamPayload>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let team = payload.team.trim();
    if team.is_empty() {
        let payload = json!({ "error": "team must not be blank" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    match service.assign_team(id, team) {
        Ok(()) => {
            let payload = json!({ "updated": true });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn export_members_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.export_members_csv() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"members.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn statistics_handler<S>(
    State(service): State<Arc<RegistryService<S>>>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.statistics() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: RegistryServiceError) -> Response {
    warn!(%error, "registry operation failed");
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

fn validate_submission(payload: SubmissionPayload) -> Result<RegistrationSubmission, Vec<String>> {
    let mut problems = Vec::new();

    let full_name = payload.full_name.trim().to_string();
    if full_name.is_empty() {
        problems.push("full_name is required".to_string());
    } else if full_name.chars().count() > 100 {
        problems.push("full_name must be at most 100 characters".to_string());
    }

    let email = payload.email.trim().to_string();
    if !is_plausible_email(&email) {
        problems.push("email must be a valid address".to_string());
    }

    let role_id = match payload.role_id {
        Some(id) if roles().iter().any(|role| role.id == id) => Some(id),
        Some(id) => {
            problems.push(format!("role_id {id} does not reference a known role"));
            None
        }
        None => {
            problems.push("role_id is required".to_string());
            None
        }
    };

    let reason_to_apply = payload.reason_to_apply.trim().to_string();
    if reason_to_apply.is_empty() {
        problems.push("reason_to_apply is required".to_string());
    } else if reason_to_apply.chars().count() > 500 {
        problems.push("reason_to_apply must be at most 500 characters".to_string());
    }

    match (problems.is_empty(), role_id) {
        (true, Some(role_id)) => Ok(RegistrationSubmission {
            full_name,
            email,
            role_id,
            reason_to_apply,
        }),
        _ => Err(problems),
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn build_filter(query: &ListQuery) -> Result<CandidateFilter, String> {
    let status = match query.status.as_deref().map(str::trim) {
        None => None,
        Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(
            Status::parse(raw).ok_or_else(|| format!("unknown status filter '{raw}'"))?,
        ),
    };

    let role_id = match query.role.as_deref().map(str::trim) {
        None => None,
        Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| format!("role filter '{raw}' is not a role id"))?,
        ),
    };

    Ok(CandidateFilter {
        text: query.q.clone(),
        status,
        role_id,
    })
}
