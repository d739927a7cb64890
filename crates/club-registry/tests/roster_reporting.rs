//! Integration scenarios for membership reconciliation, statistics, and the
//! CSV exports.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use club_registry::registry::{
    Decision, RegistrationSubmission, RegistryService, UNASSIGNED_TEAM,
};
use club_registry::storage::InMemoryStore;

fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 4, 17, hour, minute, 0)
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

fn seeded_service() -> (RegistryService<InMemoryStore>, Vec<i64>) {
    let service = RegistryService::new(Arc::new(InMemoryStore::default()));
    let fixtures = [
        ("Ana Pham", "ana@club.example", 1u32),
        ("Bao Le", "bao@club.example", 2),
        ("Chi Nguyen", "chi@club.example", 2),
        ("Dana Tran", "dana@club.example", 4),
        ("En Vo", "en@club.example", 5),
    ];
    let ids = fixtures
        .iter()
        .enumerate()
        .map(|(index, (name, email, role_id))| {
            service
                .submit(submission(name, email, *role_id), at(8, index as u32))
                .expect("submission stored")
                .id
        })
        .collect();
    (service, ids)
}

#[test]
fn roster_grows_only_with_approvals_and_keeps_assignments() {
    let (service, ids) = seeded_service();

    for id in [ids[0], ids[1]] {
        service
            .decide(id, Decision::Approve, None, None, at(9, 0))
            .expect("decision stored");
    }
    service
        .decide(ids[3], Decision::Reject, Some("late"), None, at(9, 5))
        .expect("decision stored");

    let roster = service.list_members().expect("roster loads");
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].team.as_deref(), Some("Team Design"));
    assert_eq!(roster[1].team.as_deref(), Some("Team Development"));

    service
        .assign_team(ids[0], "Team Sponsorships")
        .expect("assignment stored");
    service
        .decide(ids[2], Decision::Approve, None, None, at(9, 30))
        .expect("decision stored");

    let roster = service.list_members().expect("roster loads");
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].team.as_deref(), Some("Team Sponsorships"));
}

#[test]
fn statistics_snapshot_matches_the_pipeline_state() {
    let (service, ids) = seeded_service();

    service
        .decide(ids[0], Decision::Approve, None, None, at(9, 0))
        .expect("decision stored");
    service
        .decide(ids[1], Decision::Approve, None, None, at(9, 1))
        .expect("decision stored");
    service
        .decide(ids[4], Decision::Reject, None, None, at(9, 2))
        .expect("decision stored");
    service.list_members().expect("roster persists");

    let snapshot = service.statistics().expect("statistics compute");
    assert_eq!(snapshot.total_applications, 5);
    assert_eq!(snapshot.approved_rate, 40);
    assert_eq!(snapshot.rejected_rate, 20);
    assert_eq!(snapshot.pending_rate, 40);

    let development = snapshot
        .roles
        .iter()
        .find(|bucket| bucket.role == "Development")
        .expect("bucket exists");
    assert_eq!(
        (development.total, development.approved, development.pending),
        (2, 1, 1)
    );

    let design_team = snapshot
        .teams
        .iter()
        .find(|team| team.team == "Team Design")
        .expect("bucket exists");
    assert_eq!(design_team.count, 1);
    assert_eq!(design_team.percentage, 50);

    let unassigned = snapshot
        .teams
        .iter()
        .find(|team| team.team == UNASSIGNED_TEAM)
        .expect("seeded bucket");
    assert_eq!(unassigned.count, 0);
}

#[test]
fn member_export_lists_the_roster_with_team_labels() {
    let (service, ids) = seeded_service();
    service
        .decide(ids[1], Decision::Approve, None, None, at(9, 0))
        .expect("decision stored");
    service.list_members().expect("roster persists");
    service
        .assign_team(ids[1], "Team Backend")
        .expect("assignment stored");

    let bytes = service.export_members_csv().expect("export renders");
    let text = String::from_utf8(bytes).expect("utf-8 csv");
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("Full Name,Email,Team,Created At"));
    let row = lines.next().expect("one member row");
    assert!(row.starts_with("Bao Le,bao@club.example,Team Backend,"));
    assert!(row.contains("17/4/2026"));
    assert_eq!(lines.next(), None);
}

#[test]
fn candidate_export_covers_every_application() {
    let (service, _) = seeded_service();

    let bytes = service.export_candidates_csv().expect("export renders");
    let text = String::from_utf8(bytes).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Full Name,Email,Role");
    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&"Dana Tran,dana@club.example,Marketing"));
}
