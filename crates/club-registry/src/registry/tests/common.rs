use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

use crate::registry::domain::{CandidateRegistration, Decision, RegistrationSubmission};
use crate::registry::repository::DecisionOutcome;
use crate::registry::service::RegistryService;
use crate::storage::InMemoryStore;

pub(super) fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::default())
}

pub(super) fn service() -> RegistryService<InMemoryStore> {
    RegistryService::new(store())
}

pub(super) fn service_on(store: Arc<InMemoryStore>) -> RegistryService<InMemoryStore> {
    RegistryService::new(store)
}

/// Fixed local timestamp on an afternoon well clear of DST transitions.
pub(super) fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 20, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submission(name: &str, email: &str, role_id: u32) -> RegistrationSubmission {
    RegistrationSubmission {
        full_name: name.to_string(),
        email: email.to_string(),
        role_id,
        reason_to_apply: format!("{name} wants to help run the club"),
    }
}

/// Submits one candidate per call with a distinct timestamp so ids stay
/// readable in assertions.
pub(super) fn seed_candidates(
    service: &RegistryService<InMemoryStore>,
) -> Vec<CandidateRegistration> {
    let fixtures = [
        ("Ana Pham", "ana.pham@club.example", 1),
        ("Bao Le", "bao.le@club.example", 2),
        ("Chi Nguyen", "chi.nguyen@club.example", 2),
        ("Dana Tran", "dana@club.example", 4),
    ];

    fixtures
        .iter()
        .enumerate()
        .map(|(index, (name, email, role_id))| {
            service
                .submit(submission(name, email, *role_id), at(9, index as u32))
                .expect("submission stored")
        })
        .collect()
}

pub(super) fn approve(
    service: &RegistryService<InMemoryStore>,
    id: i64,
) -> CandidateRegistration {
    match service
        .decide(id, Decision::Approve, None, None, at(10, 0))
        .expect("decision stored")
    {
        DecisionOutcome::Applied(record) => record,
        other => panic!("expected applied outcome, got {other:?}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
