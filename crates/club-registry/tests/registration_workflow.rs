//! Integration scenarios for the registration intake and decision workflow,
//! exercised through the public service facade and the HTTP router.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use serde_json::json;
use tower::ServiceExt;

use club_registry::registry::{
    registry_router, CandidateFilter, Decision, DecisionOutcome, RegistrationSubmission,
    RegistryService, Status,
};
use club_registry::storage::{InMemoryStore, JsonFileStore};

fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 4, 10, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn submission(name: &str, email: &str, role_id: u32) -> RegistrationSubmission {
    RegistrationSubmission {
        full_name: name.to_string(),
        email: email.to_string(),
        role_id,
        reason_to_apply: format!("{name} wants to join"),
    }
}

#[test]
fn intake_decision_and_audit_trail_end_to_end() {
    let service = RegistryService::new(Arc::new(InMemoryStore::default()));

    let ana = service
        .submit(submission("Ana Pham", "ana@club.example", 1), at(9, 0))
        .expect("submission stored");
    let bao = service
        .submit(submission("Bao Le", "bao@club.example", 2), at(9, 1))
        .expect("submission stored");

    assert_ne!(ana.id, bao.id);
    assert_eq!(ana.status, Status::Pending);

    let approved = match service
        .decide(ana.id, Decision::Approve, None, None, at(10, 15))
        .expect("decision stored")
    {
        DecisionOutcome::Applied(record) => record,
        other => panic!("expected applied outcome, got {other:?}"),
    };
    assert_eq!(approved.status, Status::Approved);
    assert_eq!(
        approved.action_log.as_deref(),
        Some("Admin approved at 10:15 10/4/2026")
    );

    let rejected = match service
        .decide(
            bao.id,
            Decision::Reject,
            Some("no open slots"),
            Some("Quang"),
            at(10, 20),
        )
        .expect("decision stored")
    {
        DecisionOutcome::Applied(record) => record,
        other => panic!("expected applied outcome, got {other:?}"),
    };
    assert_eq!(rejected.note, "no open slots");
    assert_eq!(
        rejected.action_log.as_deref(),
        Some("Quang rejected at 10:20 10/4/2026, reason: no open slots")
    );

    // Terminal decisions are idempotent per call but keep auditing.
    for _ in 0..2 {
        service
            .decide(ana.id, Decision::Approve, None, None, at(11, 0))
            .expect("decision stored");
    }
    let all = service
        .list_candidates(&CandidateFilter::default())
        .expect("listing loads");
    let ana_now = all.iter().find(|record| record.id == ana.id).expect("present");
    assert_eq!(ana_now.status, Status::Approved);
    assert_eq!(
        ana_now
            .action_log
            .as_deref()
            .map(|log| log.lines().count()),
        Some(3)
    );
}

#[test]
fn collections_survive_process_restarts_on_the_file_store() {
    let dir = tempfile::tempdir().expect("temp dir");

    let seeded = {
        let service = RegistryService::new(Arc::new(JsonFileStore::new(dir.path())));
        let record = service
            .submit(submission("Chi Nguyen", "chi@club.example", 3), at(9, 30))
            .expect("submission stored");
        service
            .decide(record.id, Decision::Approve, None, None, at(9, 45))
            .expect("decision stored");
        service.list_members().expect("roster persists");
        record
    };

    // A fresh service over the same directory sees the same state.
    let reopened = RegistryService::new(Arc::new(JsonFileStore::new(dir.path())));
    let candidates = reopened
        .list_candidates(&CandidateFilter::default())
        .expect("listing loads");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, seeded.id);
    assert_eq!(candidates[0].status, Status::Approved);

    let members = reopened.list_members().expect("roster loads");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].team.as_deref(), Some("Team Media"));
}

#[tokio::test]
async fn http_surface_covers_the_whole_pipeline() {
    let service = Arc::new(RegistryService::new(Arc::new(InMemoryStore::default())));
    let router = registry_router(service.clone());

    let submit = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/registrations")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "full_name": "Dana Tran",
                        "email": "dana@club.example",
                        "role_id": 5,
                        "reason_to_apply": "event logistics",
                    }))
                    .expect("body encodes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(submit.status(), axum::http::StatusCode::CREATED);
    let body = axum::body::to_bytes(submit.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let record: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    let id = record["id"].as_i64().expect("id assigned");

    let decide = router
        .clone()
        .oneshot(
            axum::http::Request::post(format!("/api/v1/registrations/{id}/decision"))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "decision": "approve" })).expect("body encodes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(decide.status(), axum::http::StatusCode::OK);

    let members = router
        .oneshot(
            axum::http::Request::get("/api/v1/members")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let body = axum::body::to_bytes(members.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let roster: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(roster["total"], 1);
    assert_eq!(roster["members"][0]["team"], "Team Event");
}
