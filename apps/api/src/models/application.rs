use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, RecordError};
use crate::status::ApplicationStatus;

const RECORD: &str = "application";

/// A candidate's submission against one job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: u64,
    pub job_id: u64,
    pub candidate_id: u64,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub job_title: Option<String>,
    pub status: ApplicationStatus,
    pub screening_score: Option<f64>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub offer: Option<OfferTerms>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub salary: f64,
    pub currency: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidateRef {
    pub id: Option<u64>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobRef {
    pub id: Option<u64>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApplication {
    pub id: u64,
    pub job_id: Option<u64>,
    pub candidate_id: Option<u64>,
    pub application_status: Option<String>,
    pub status: Option<String>,
    pub candidate: Option<RawCandidateRef>,
    pub job: Option<RawJobRef>,
    pub screening_score: Option<f64>,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub offer_salary: Option<f64>,
    pub offer_currency: Option<String>,
    pub offer_start_date: Option<NaiveDate>,
}

impl TryFrom<RawApplication> for Application {
    type Error = RecordError;

    fn try_from(raw: RawApplication) -> Result<Self, Self::Error> {
        let job_id = raw
            .job_id
            .or_else(|| raw.job.as_ref().and_then(|j| j.id))
            .ok_or_else(|| RecordError::missing(RECORD, "jobId"))?;
        let candidate_id = raw
            .candidate_id
            .or_else(|| raw.candidate.as_ref().and_then(|c| c.id))
            .ok_or_else(|| RecordError::missing(RECORD, "candidateId"))?;

        let status_raw = raw
            .application_status
            .or(raw.status)
            .ok_or_else(|| RecordError::missing(RECORD, "applicationStatus"))?;
        let status = ApplicationStatus::from_wire(&status_raw)?;

        if let Some(score) = raw.screening_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(RecordError::invalid(
                    RECORD,
                    "screeningScore",
                    format!("{score} is outside 0-100"),
                ));
            }
        }

        let applied_at = raw
            .applied_at
            .or(raw.created_at)
            .ok_or_else(|| RecordError::missing(RECORD, "appliedAt"))?;

        let offer = match (raw.offer_salary, raw.offer_start_date) {
            (Some(salary), Some(start_date)) => Some(OfferTerms {
                salary,
                currency: non_blank(raw.offer_currency).unwrap_or_else(|| "USD".to_string()),
                start_date,
            }),
            _ => None,
        };

        let (candidate_name, candidate_email) = match raw.candidate {
            Some(c) => (non_blank(c.full_name.or(c.name)), non_blank(c.email)),
            None => (None, None),
        };

        Ok(Application {
            id: raw.id,
            job_id,
            candidate_id,
            candidate_name,
            candidate_email,
            job_title: non_blank(raw.job.and_then(|j| j.title)),
            status,
            screening_score: raw.screening_score,
            applied_at,
            updated_at: raw.updated_at,
            offer,
        })
    }
}

/// Body of `PATCH /applications/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_start_date: Option<NaiveDate>,
}

impl ApplicationPatch {
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            application_status: Some(status),
            ..Self::default()
        }
    }

    pub fn offer(terms: &OfferTerms) -> Self {
        Self {
            application_status: Some(ApplicationStatus::Offer),
            offer_salary: Some(terms.salary),
            offer_currency: Some(terms.currency.clone()),
            offer_start_date: Some(terms.start_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Application, RecordError> {
        let raw: RawApplication = serde_json::from_value(value).unwrap();
        Application::try_from(raw)
    }

    #[test]
    fn test_flat_application_parses() {
        let app = parse(json!({
            "id": 7,
            "jobId": 3,
            "candidateId": 11,
            "applicationStatus": "screening_passed",
            "screeningScore": 82.5,
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(app.id, 7);
        assert_eq!(app.job_id, 3);
        assert_eq!(app.candidate_id, 11);
        assert_eq!(app.status, ApplicationStatus::ScreeningPassed);
        assert_eq!(app.screening_score, Some(82.5));
        assert!(app.offer.is_none());
    }

    #[test]
    fn test_nested_refs_and_legacy_status_field() {
        let app = parse(json!({
            "id": 8,
            "status": "reviewing",
            "candidate": { "id": 4, "fullName": "Dana Ortiz", "email": "dana@example.com" },
            "job": { "id": 2, "title": "Platform Engineer" },
            "appliedAt": "2026-03-02T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(app.status, ApplicationStatus::Screening);
        assert_eq!(app.candidate_id, 4);
        assert_eq!(app.job_id, 2);
        assert_eq!(app.candidate_name.as_deref(), Some("Dana Ortiz"));
        assert_eq!(app.job_title.as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_unknown_status_is_rejected_at_the_edge() {
        let err = parse(json!({
            "id": 9, "jobId": 1, "candidateId": 1,
            "applicationStatus": "on_hold",
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .unwrap_err();
        assert!(matches!(err, RecordError::UnknownStatus(_)));
    }

    #[test]
    fn test_missing_job_reference_is_reported() {
        let err = parse(json!({
            "id": 9, "candidateId": 1,
            "applicationStatus": "submitted",
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("jobId"));
    }

    #[test]
    fn test_out_of_range_score_is_invalid() {
        let err = parse(json!({
            "id": 9, "jobId": 1, "candidateId": 1,
            "applicationStatus": "screening",
            "screeningScore": 140,
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "screeningScore", .. }));
    }

    #[test]
    fn test_offer_terms_are_collected() {
        let app = parse(json!({
            "id": 10, "jobId": 1, "candidateId": 1,
            "applicationStatus": "offer",
            "offerSalary": 95000.0,
            "offerStartDate": "2026-12-01",
            "createdAt": "2026-03-01T09:00:00Z"
        }))
        .unwrap();
        let offer = app.offer.unwrap();
        assert_eq!(offer.salary, 95000.0);
        assert_eq!(offer.currency, "USD");
    }

    #[test]
    fn test_status_patch_serializes_only_status() {
        let body = serde_json::to_value(ApplicationPatch::status(ApplicationStatus::Offer)).unwrap();
        assert_eq!(body, json!({ "applicationStatus": "offer" }));
    }
}
