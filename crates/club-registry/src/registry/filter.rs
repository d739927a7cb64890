use super::catalog::Status;
use super::domain::CandidateRegistration;

/// Search criteria over the candidate collection. `None` (and blank text)
/// means the dimension passes everything; the three predicates intersect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    pub text: Option<String>,
    pub status: Option<Status>,
    pub role_id: Option<u32>,
}

/// Returns the matching subset in input order. Text matches the full name or
/// the email, case-insensitively.
pub fn filter_candidates(
    candidates: &[CandidateRegistration],
    filter: &CandidateFilter,
) -> Vec<CandidateRegistration> {
    let needle = filter
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    candidates
        .iter()
        .filter(|candidate| {
            if let Some(needle) = &needle {
                let name_hit = candidate.full_name.to_lowercase().contains(needle);
                let email_hit = candidate.email.to_lowercase().contains(needle);
                if !name_hit && !email_hit {
                    return false;
                }
            }
            if let Some(status) = filter.status {
                if candidate.status != status {
                    return false;
                }
            }
            if let Some(role_id) = filter.role_id {
                if candidate.role.id != role_id {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}
