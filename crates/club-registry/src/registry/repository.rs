use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::catalog::{resolve_role, Status};
use super::domain::{CandidateRegistration, Decision, Member, RegistrationSubmission};
use super::reconcile::reconcile;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the candidate collection.
pub const CANDIDATES_KEY: &str = "candidates";
/// Storage key of the membership overlay.
pub const MEMBERS_KEY: &str = "members";

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed '{key}' payload: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize '{key}' payload: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of a decision on a candidate id.
///
/// A missing id is not an error: the store treats it as a silent no-op and
/// callers report success. `Conflict` marks an attempt to flip an already
/// settled application to the opposite outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    Applied(CandidateRegistration),
    NotFound,
    Conflict(CandidateRegistration),
}

/// Owns the candidate collection: submissions, decisions, and reads.
pub struct CandidateRepository<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> CandidateRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<CandidateRegistration>, RepositoryError> {
        load_collection(self.store.as_ref(), CANDIDATES_KEY)
    }

    /// Appends a new pending application. The id is derived from the
    /// submission timestamp and bumped past the current maximum so ids stay
    /// unique and monotonic even for same-millisecond submissions.
    pub fn add(
        &self,
        submission: RegistrationSubmission,
        submitted_at: DateTime<Local>,
    ) -> Result<CandidateRegistration, RepositoryError> {
        let mut records = self.list()?;
        let record = CandidateRegistration {
            id: next_id(&records, submitted_at),
            full_name: submission.full_name,
            email: submission.email,
            role: resolve_role(submission.role_id),
            reason_to_apply: submission.reason_to_apply,
            status: Status::Pending,
            note: String::new(),
            created_at: submitted_at,
            action_log: None,
        };
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    /// Applies an approve/reject decision.
    ///
    /// Pending applications transition; re-applying the current terminal
    /// status leaves it in place but still appends an audit line; flipping a
    /// settled application is refused without touching the record. The
    /// existing note survives unless the caller supplies a non-empty one.
    pub fn decide(
        &self,
        id: i64,
        decision: Decision,
        note: Option<&str>,
        actor: &str,
        decided_at: DateTime<Local>,
    ) -> Result<DecisionOutcome, RepositoryError> {
        let mut records = self.list()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(DecisionOutcome::NotFound);
        };

        let target = decision.status();
        if record.status.is_terminal() && record.status != target {
            return Ok(DecisionOutcome::Conflict(record.clone()));
        }

        record.status = target;
        let note = note.map(str::trim).filter(|note| !note.is_empty());
        if let Some(note) = note {
            record.note = note.to_string();
        }
        let line = audit_line(actor, decision, note, decided_at);
        record.action_log = Some(match record.action_log.take() {
            Some(log) => format!("{log}\n{line}"),
            None => line,
        });

        let updated = record.clone();
        self.save(&records)?;
        Ok(DecisionOutcome::Applied(updated))
    }

    fn save(&self, records: &[CandidateRegistration]) -> Result<(), RepositoryError> {
        store_collection(self.store.as_ref(), CANDIDATES_KEY, records)
    }
}

/// Owns the membership overlay: reconciled reads and team assignment.
pub struct MemberRepository<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> MemberRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The raw persisted overlay, without reconciling against candidates.
    pub fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        load_collection(self.store.as_ref(), MEMBERS_KEY)
    }

    /// Merges the overlay with the approved candidates and persists the
    /// result, so membership survives later edits to the source records.
    pub fn reconcile_with(
        &self,
        candidates: &[CandidateRegistration],
    ) -> Result<Vec<Member>, RepositoryError> {
        let prior = self.list()?;
        let merged = reconcile(candidates, prior);
        self.save(&merged)?;
        Ok(merged)
    }

    /// Overwrites the team of every member with the given id. Ids absent from
    /// the overlay leave it untouched; the call still reports success.
    pub fn assign_team(&self, id: i64, team: &str) -> Result<(), RepositoryError> {
        let mut members = self.list()?;
        for member in &mut members {
            if member.registration.id == id {
                member.team = Some(team.to_string());
            }
        }
        self.save(&members)?;
        Ok(())
    }

    fn save(&self, members: &[Member]) -> Result<(), RepositoryError> {
        store_collection(self.store.as_ref(), MEMBERS_KEY, members)
    }
}

fn next_id(records: &[CandidateRegistration], submitted_at: DateTime<Local>) -> i64 {
    let stamp = submitted_at.timestamp_millis();
    match records.iter().map(|record| record.id).max() {
        Some(max) if stamp <= max => max + 1,
        _ => stamp,
    }
}

fn audit_line(
    actor: &str,
    decision: Decision,
    note: Option<&str>,
    decided_at: DateTime<Local>,
) -> String {
    let stamp = decided_at.format("%H:%M %-d/%-m/%Y");
    match note {
        Some(reason) => format!("{actor} {} at {stamp}, reason: {reason}", decision.verb()),
        None => format!("{actor} {} at {stamp}", decision.verb()),
    }
}

fn load_collection<S, T>(store: &S, key: &'static str) -> Result<Vec<T>, RepositoryError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match store.read(key)? {
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|source| RepositoryError::Malformed { key, source }),
        None => Ok(Vec::new()),
    }
}

fn store_collection<S, T>(store: &S, key: &'static str, records: &[T]) -> Result<(), RepositoryError>
where
    S: KeyValueStore,
    T: Serialize,
{
    let payload =
        serde_json::to_string(records).map_err(|source| RepositoryError::Encode { key, source })?;
    store.write(key, &payload)?;
    Ok(())
}
