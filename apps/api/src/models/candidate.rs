use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, RecordError};
use crate::status::CandidateStatus;

const RECORD: &str = "candidate";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: CandidateStatus,
    pub cv_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    pub id: u64,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub cv_url: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawCandidate> for Candidate {
    type Error = RecordError;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        let full_name = non_blank(raw.full_name)
            .or_else(|| non_blank(raw.name))
            .or_else(|| {
                let joined = [raw.first_name, raw.last_name]
                    .into_iter()
                    .flatten()
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                non_blank(Some(joined))
            })
            .ok_or_else(|| RecordError::missing(RECORD, "fullName"))?;

        let email = non_blank(raw.email).ok_or_else(|| RecordError::missing(RECORD, "email"))?;
        if !email.contains('@') {
            return Err(RecordError::invalid(RECORD, "email", format!("'{email}' is not an address")));
        }

        // Candidates created before status tracking carry no status at all.
        let status = match non_blank(raw.status) {
            Some(s) => s.to_ascii_lowercase().parse::<CandidateStatus>()?,
            None => CandidateStatus::New,
        };

        Ok(Candidate {
            id: raw.id,
            full_name,
            email,
            phone: non_blank(raw.phone),
            status,
            cv_url: non_blank(raw.cv_url).or_else(|| non_blank(raw.resume_url)),
            created_at: raw.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ApplicationStatus;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Candidate, RecordError> {
        Candidate::try_from(serde_json::from_value::<RawCandidate>(value).unwrap())
    }

    #[test]
    fn test_name_falls_back_to_first_and_last() {
        let candidate = parse(json!({
            "id": 1, "firstName": "Ada", "lastName": " Lovelace ",
            "email": "ada@example.com", "status": "interviewing"
        }))
        .unwrap();
        assert_eq!(candidate.full_name, "Ada Lovelace");
        assert_eq!(
            candidate.status,
            CandidateStatus::Application(ApplicationStatus::Interviewing)
        );
    }

    #[test]
    fn test_missing_status_defaults_to_new() {
        let candidate = parse(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })).unwrap();
        assert_eq!(candidate.status, CandidateStatus::New);
    }

    #[test]
    fn test_candidate_requires_email() {
        let err = parse(json!({ "id": 1, "name": "Ada" })).unwrap_err();
        assert!(matches!(err, RecordError::MissingField { field: "email", .. }));

        let err = parse(json!({ "id": 1, "name": "Ada", "email": "nope" })).unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "email", .. }));
    }

    #[test]
    fn test_resume_url_alias() {
        let candidate = parse(json!({
            "id": 1, "name": "Ada", "email": "ada@example.com",
            "resumeUrl": "https://files.example.com/cv/1.pdf"
        }))
        .unwrap();
        assert_eq!(candidate.cv_url.as_deref(), Some("https://files.example.com/cv/1.pdf"));
    }
}
