use crate::infra::file_backed_service;
use chrono::Local;
use clap::{Args, ValueEnum};
use club_registry::config::AppConfig;
use club_registry::error::AppError;
use club_registry::registry::{
    CandidateFilter, Decision, DecisionOutcome, RegistrationStatistics, RegistrationSubmission,
    RegistryService, Status,
};
use club_registry::storage::InMemoryStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also print the member roster CSV at the end of the walkthrough.
    #[arg(long)]
    pub(crate) show_csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Which collection to export
    #[arg(value_enum)]
    pub(crate) collection: ExportCollection,
    /// Output file path (defaults to <collection>.csv)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub(crate) enum ExportCollection {
    Members,
    Candidates,
}

impl ExportCollection {
    fn default_path(self) -> PathBuf {
        match self {
            ExportCollection::Members => PathBuf::from("members.csv"),
            ExportCollection::Candidates => PathBuf::from("candidates.csv"),
        }
    }
}

/// Seeds an in-memory registry and walks the whole pipeline: intake,
/// decisions, reconciliation, team assignment, and statistics.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = RegistryService::new(Arc::new(InMemoryStore::default()));

    println!("Club registry demo");

    println!("\nIntake");
    let applicants = [
        ("Ana Pham", "ana.pham@club.example", 1),
        ("Bao Le", "bao.le@club.example", 2),
        ("Chi Nguyen", "chi.nguyen@club.example", 2),
        ("Dana Tran", "dana.tran@club.example", 4),
        ("En Vo", "en.vo@club.example", 5),
    ];
    let mut ids = Vec::new();
    for (name, email, role_id) in applicants {
        let record = service.submit(
            RegistrationSubmission {
                full_name: name.to_string(),
                email: email.to_string(),
                role_id,
                reason_to_apply: format!("{name} wants to help run the club"),
            },
            Local::now(),
        )?;
        println!(
            "- #{} {} -> {} ({})",
            record.id,
            record.full_name,
            record.role.name,
            record.status.label()
        );
        ids.push(record.id);
    }

    println!("\nDecisions");
    for (id, decision, note) in [
        (ids[0], Decision::Approve, None),
        (ids[1], Decision::Approve, None),
        (ids[3], Decision::Reject, Some("duplicate application")),
    ] {
        match service.decide(id, decision, note, None, Local::now())? {
            DecisionOutcome::Applied(record) => {
                println!("- #{} {} -> {}", record.id, record.full_name, record.status.label());
                if let Some(log) = &record.action_log {
                    println!("  audit: {log}");
                }
            }
            other => println!("- #{id} -> unexpected outcome {other:?}"),
        }
    }

    let pending = service.list_candidates(&CandidateFilter {
        status: Some(Status::Pending),
        ..CandidateFilter::default()
    })?;
    println!("\nStill pending: {}", pending.len());
    for record in &pending {
        println!("- #{} {} ({})", record.id, record.full_name, record.role.name);
    }

    println!("\nMember roster");
    let roster = service.list_members()?;
    for member in &roster {
        println!(
            "- #{} {} -> {}",
            member.registration.id,
            member.registration.full_name,
            member.team_label()
        );
    }

    service.assign_team(ids[0], "Team Sponsorships")?;
    println!("\nReassigned #{} to Team Sponsorships", ids[0]);

    let snapshot = service.statistics()?;
    render_statistics(&snapshot);

    if args.show_csv {
        let bytes = service.export_members_csv()?;
        println!("\nRoster CSV\n{}", String::from_utf8_lossy(&bytes));
    }

    Ok(())
}

/// Prints the statistics snapshot for the persisted registry.
pub(crate) fn run_stats_report() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = file_backed_service(&config.storage);

    let snapshot = service.statistics()?;
    render_statistics(&snapshot);
    Ok(())
}

/// Writes a collection export next to the current working directory.
pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = file_backed_service(&config.storage);

    let bytes = match args.collection {
        ExportCollection::Members => service.export_members_csv()?,
        ExportCollection::Candidates => service.export_candidates_csv()?,
    };

    let path = args
        .out
        .unwrap_or_else(|| args.collection.default_path());
    std::fs::write(&path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn render_statistics(snapshot: &RegistrationStatistics) {
    println!("\nRegistration statistics");
    println!(
        "- {} applications | {}% approved | {}% rejected | {}% pending",
        snapshot.total_applications,
        snapshot.approved_rate,
        snapshot.rejected_rate,
        snapshot.pending_rate
    );

    println!("\nApplications by role");
    for bucket in &snapshot.roles {
        println!(
            "- {}: {} total ({} approved, {} rejected, {} pending)",
            bucket.role, bucket.total, bucket.approved, bucket.rejected, bucket.pending
        );
    }

    println!("\nMembers by team");
    for team in &snapshot.teams {
        println!("- {}: {} members ({}%)", team.team, team.count, team.percentage);
    }
}
