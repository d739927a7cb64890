use std::sync::Arc;

use chrono::{DateTime, Local};

use super::domain::{
    CandidateRegistration, Decision, Member, RegistrationSubmission, DEFAULT_ACTOR,
};
use super::export::{self, ExportError};
use super::filter::{filter_candidates, CandidateFilter};
use super::repository::{CandidateRepository, DecisionOutcome, MemberRepository, RepositoryError};
use super::stats::{self, RegistrationStatistics};
use crate::storage::KeyValueStore;

/// Facade composing both repositories over one shared backend. Every read
/// re-derives from the persisted source of truth; nothing is cached.
pub struct RegistryService<S> {
    candidates: CandidateRepository<S>,
    members: MemberRepository<S>,
}

impl<S: KeyValueStore> RegistryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            candidates: CandidateRepository::new(store.clone()),
            members: MemberRepository::new(store),
        }
    }

    /// Records a new pending application and returns the stored record.
    pub fn submit(
        &self,
        submission: RegistrationSubmission,
        submitted_at: DateTime<Local>,
    ) -> Result<CandidateRegistration, RegistryServiceError> {
        Ok(self.candidates.add(submission, submitted_at)?)
    }

    /// Applies an admin decision; a blank or missing actor falls back to the
    /// default audit actor.
    pub fn decide(
        &self,
        id: i64,
        decision: Decision,
        note: Option<&str>,
        actor: Option<&str>,
        decided_at: DateTime<Local>,
    ) -> Result<DecisionOutcome, RegistryServiceError> {
        let actor = actor
            .map(str::trim)
            .filter(|actor| !actor.is_empty())
            .unwrap_or(DEFAULT_ACTOR);
        Ok(self.candidates.decide(id, decision, note, actor, decided_at)?)
    }

    /// The candidate collection narrowed by the given filter, in stored order.
    pub fn list_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<CandidateRegistration>, RegistryServiceError> {
        let all = self.candidates.list()?;
        Ok(filter_candidates(&all, filter))
    }

    /// The reconciled member roster. This read persists the merge, so newly
    /// approved candidates become durable members the first time the roster
    /// is consulted.
    pub fn list_members(&self) -> Result<Vec<Member>, RegistryServiceError> {
        let candidates = self.candidates.list()?;
        Ok(self.members.reconcile_with(&candidates)?)
    }

    pub fn assign_team(&self, id: i64, team: &str) -> Result<(), RegistryServiceError> {
        Ok(self.members.assign_team(id, team)?)
    }

    /// Statistics over the candidate collection and the raw membership
    /// overlay. Reads only; the roster endpoint is the reconciling read.
    pub fn statistics(&self) -> Result<RegistrationStatistics, RegistryServiceError> {
        let candidates = self.candidates.list()?;
        let members = self.members.list()?;
        Ok(stats::compute(&candidates, &members))
    }

    /// CSV bytes of the reconciled member roster.
    pub fn export_members_csv(&self) -> Result<Vec<u8>, RegistryServiceError> {
        let members = self.list_members()?;
        Ok(export::members_csv(&members)?)
    }

    /// CSV bytes of the full candidate listing.
    pub fn export_candidates_csv(&self) -> Result<Vec<u8>, RegistryServiceError> {
        let candidates = self.candidates.list()?;
        Ok(export::candidates_csv(&candidates)?)
    }
}

/// Error raised by the registry facade.
#[derive(Debug, thiserror::Error)]
pub enum RegistryServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
