use super::domain::{CandidateRegistration, Member};

/// Column headers of the member roster export.
pub const MEMBER_EXPORT_HEADERS: [&str; 4] = ["Full Name", "Email", "Team", "Created At"];
/// Column headers of the candidate listing export.
pub const CANDIDATE_EXPORT_HEADERS: [&str; 3] = ["Full Name", "Email", "Role"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to render csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Buffer(String),
}

/// Renders the member roster as CSV bytes. Members without an assigned team
/// are exported under their role-derived default label.
pub fn members_csv(members: &[Member]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(MEMBER_EXPORT_HEADERS)?;
    for member in members {
        let team = member.team_label();
        let created = member
            .registration
            .created_at
            .format("%-d/%-m/%Y %H:%M")
            .to_string();
        writer.write_record([
            member.registration.full_name.as_str(),
            member.registration.email.as_str(),
            team.as_str(),
            created.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|source| ExportError::Buffer(source.to_string()))
}

/// Renders the candidate listing as CSV bytes.
pub fn candidates_csv(candidates: &[CandidateRegistration]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CANDIDATE_EXPORT_HEADERS)?;
    for candidate in candidates {
        writer.write_record([
            candidate.full_name.as_str(),
            candidate.email.as_str(),
            candidate.role.name.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|source| ExportError::Buffer(source.to_string()))
}
