use std::collections::HashSet;

use super::catalog::Status;
use super::domain::{default_team, CandidateRegistration, Member};

/// Merges the persisted membership overlay with the approved candidates.
///
/// Prior members come first, keeping their stored order and any manually
/// assigned team. Approved candidates not yet recorded are appended with the
/// role-derived default team. Entries whose candidate no longer qualifies (or
/// no longer exists) are tolerated, not purged: once a member, always a
/// member.
pub fn reconcile(candidates: &[CandidateRegistration], prior: Vec<Member>) -> Vec<Member> {
    let mut seen: HashSet<i64> = prior.iter().map(|member| member.registration.id).collect();
    let mut merged = prior;

    for candidate in candidates {
        if candidate.status != Status::Approved || seen.contains(&candidate.id) {
            continue;
        }
        seen.insert(candidate.id);
        merged.push(Member {
            team: Some(default_team(&candidate.role)),
            registration: candidate.clone(),
        });
    }

    merged
}
