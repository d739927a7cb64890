use serde::{Deserialize, Serialize};

use super::catalog::{roles, Status};
use super::domain::{default_team, CandidateRegistration, Member};

/// Bucket label for members without any team, explicit or derived. Seeded so
/// reports always show the row even when every member has a team.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

/// Per-role application counts. Every catalog role gets a bucket even with
/// zero applicants; unresolved role names get a bucket of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStatistics {
    pub role: String,
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

/// Per-team member counts with an integer share of the total roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: String,
    pub count: usize,
    pub percentage: u32,
}

/// Full snapshot produced by [`compute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatistics {
    pub total_applications: usize,
    pub approved_rate: u32,
    pub rejected_rate: u32,
    pub pending_rate: u32,
    pub roles: Vec<RoleStatistics>,
    pub teams: Vec<TeamStatistics>,
}

/// Pure aggregation over snapshots of both collections; no store access, no
/// caching, always a full recompute.
pub fn compute(candidates: &[CandidateRegistration], members: &[Member]) -> RegistrationStatistics {
    let total = candidates.len();
    let approved = count_status(candidates, Status::Approved);
    let rejected = count_status(candidates, Status::Rejected);
    let pending = count_status(candidates, Status::Pending);

    let mut role_buckets: Vec<RoleStatistics> = roles()
        .into_iter()
        .map(|role| RoleStatistics {
            role: role.name,
            total: 0,
            approved: 0,
            rejected: 0,
            pending: 0,
        })
        .collect();

    for candidate in candidates {
        let index = match role_buckets
            .iter()
            .position(|bucket| bucket.role == candidate.role.name)
        {
            Some(index) => index,
            None => {
                role_buckets.push(RoleStatistics {
                    role: candidate.role.name.clone(),
                    total: 0,
                    approved: 0,
                    rejected: 0,
                    pending: 0,
                });
                role_buckets.len() - 1
            }
        };
        let bucket = &mut role_buckets[index];
        bucket.total += 1;
        match candidate.status {
            Status::Approved => bucket.approved += 1,
            Status::Rejected => bucket.rejected += 1,
            Status::Pending => bucket.pending += 1,
        }
    }

    let mut team_buckets: Vec<(String, usize)> = Vec::new();
    team_buckets.push((UNASSIGNED_TEAM.to_string(), 0));
    for role in roles() {
        team_buckets.push((default_team(&role), 0));
    }

    for member in members {
        let label = member.team_label();
        let index = match team_buckets.iter().position(|(team, _)| *team == label) {
            Some(index) => index,
            None => {
                team_buckets.push((label, 0));
                team_buckets.len() - 1
            }
        };
        team_buckets[index].1 += 1;
    }

    let roster_size = members.len();
    let teams = team_buckets
        .into_iter()
        .map(|(team, count)| TeamStatistics {
            team,
            count,
            percentage: rate(count, roster_size),
        })
        .collect();

    RegistrationStatistics {
        total_applications: total,
        approved_rate: rate(approved, total),
        rejected_rate: rate(rejected, total),
        pending_rate: rate(pending, total),
        roles: role_buckets,
        teams,
    }
}

fn count_status(candidates: &[CandidateRegistration], status: Status) -> usize {
    candidates
        .iter()
        .filter(|candidate| candidate.status == status)
        .count()
}

/// Rounded percentage, 0 when the denominator is 0.
fn rate(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}
