//! Offer pre-flight validation.
//!
//! Checked before anything is sent upstream; a draft that fails here never
//! produces a request.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::models::application::OfferTerms;

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferError {
    #[error("Salary must be a positive amount")]
    NonPositiveSalary,

    #[error("Start date {0} must be after today")]
    StartDateNotInFuture(NaiveDate),

    #[error("Currency '{0}' is not a three-letter code")]
    InvalidCurrency(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferDraft {
    pub salary: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub start_date: NaiveDate,
}

impl OfferDraft {
    pub fn validate(self, today: NaiveDate) -> Result<OfferTerms, OfferError> {
        if !self.salary.is_finite() || self.salary <= 0.0 {
            return Err(OfferError::NonPositiveSalary);
        }
        if self.start_date <= today {
            return Err(OfferError::StartDateNotInFuture(self.start_date));
        }

        let currency = match self.currency.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CURRENCY.to_string(),
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                code.to_ascii_uppercase()
            }
            Some(code) => return Err(OfferError::InvalidCurrency(code.to_string())),
        };

        Ok(OfferTerms {
            salary: self.salary,
            currency,
            start_date: self.start_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn draft(salary: f64, start: NaiveDate) -> OfferDraft {
        OfferDraft {
            salary,
            currency: None,
            start_date: start,
        }
    }

    #[test]
    fn test_valid_offer_defaults_currency() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let terms = draft(120_000.0, start).validate(today()).unwrap();
        assert_eq!(terms.currency, "USD");
        assert_eq!(terms.start_date, start);
    }

    #[test]
    fn test_zero_or_negative_salary_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        assert_eq!(draft(0.0, start).validate(today()), Err(OfferError::NonPositiveSalary));
        assert_eq!(draft(-5.0, start).validate(today()), Err(OfferError::NonPositiveSalary));
        assert_eq!(draft(f64::NAN, start).validate(today()), Err(OfferError::NonPositiveSalary));
    }

    #[test]
    fn test_start_date_must_be_strictly_future() {
        assert_eq!(
            draft(50_000.0, today()).validate(today()),
            Err(OfferError::StartDateNotInFuture(today()))
        );
    }

    #[test]
    fn test_currency_is_normalized_or_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let mut offer = draft(80_000.0, start);
        offer.currency = Some(" eur ".into());
        assert_eq!(offer.clone().validate(today()).unwrap().currency, "EUR");

        offer.currency = Some("euro".into());
        assert_eq!(
            offer.validate(today()),
            Err(OfferError::InvalidCurrency("euro".into()))
        );
    }
}
