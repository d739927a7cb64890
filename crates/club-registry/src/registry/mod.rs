//! Candidate registration, membership reconciliation, and reporting.
//!
//! The candidate collection is the source of truth; the membership overlay
//! and the statistics snapshot are re-derived from it on every read.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod filter;
pub mod reconcile;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use catalog::{role_name, roles, Role, Status, UNKNOWN_ROLE_NAME};
pub use domain::{
    default_team, CandidateRegistration, Decision, Member, RegistrationSubmission, DEFAULT_ACTOR,
};
pub use export::{candidates_csv, members_csv, ExportError};
pub use filter::{filter_candidates, CandidateFilter};
pub use reconcile::reconcile;
pub use repository::{
    CandidateRepository, DecisionOutcome, MemberRepository, RepositoryError, CANDIDATES_KEY,
    MEMBERS_KEY,
};
pub use router::registry_router;
pub use service::{RegistryService, RegistryServiceError};
pub use stats::{RegistrationStatistics, RoleStatistics, TeamStatistics, UNASSIGNED_TEAM};
