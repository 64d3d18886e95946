use serde::Serialize;

use crate::models::screening::ScreeningResult;

/// Scores at or above this are flagged for fast-track approval.
pub const STRONG_THRESHOLD: f64 = 80.0;
/// Scores below this are flagged as likely rejections.
pub const REVIEW_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Review,
    Weak,
}

pub fn band_for(score: f64) -> ScoreBand {
    if score >= STRONG_THRESHOLD {
        ScoreBand::Strong
    } else if score >= REVIEW_THRESHOLD {
        ScoreBand::Review
    } else {
        ScoreBand::Weak
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningView {
    #[serde(flatten)]
    pub result: ScreeningResult,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub strong: usize,
    pub review: usize,
    pub weak: usize,
    pub average_score: Option<f64>,
}

/// Review queue: highest score first, ties broken by application id.
pub fn review_queue(results: Vec<ScreeningResult>) -> Vec<ScreeningView> {
    let mut views: Vec<ScreeningView> = results
        .into_iter()
        .map(|result| ScreeningView {
            band: band_for(result.score),
            result,
        })
        .collect();
    views.sort_by(|a, b| {
        b.result
            .score
            .total_cmp(&a.result.score)
            .then(a.result.application_id.cmp(&b.result.application_id))
    });
    views
}

pub fn summarize(views: &[ScreeningView]) -> ScreeningSummary {
    let mut summary = ScreeningSummary {
        total: views.len(),
        ..ScreeningSummary::default()
    };
    for view in views {
        match view.band {
            ScoreBand::Strong => summary.strong += 1,
            ScoreBand::Review => summary.review += 1,
            ScoreBand::Weak => summary.weak += 1,
        }
    }
    if !views.is_empty() {
        let sum: f64 = views.iter().map(|v| v.result.score).sum();
        summary.average_score = Some((sum / views.len() as f64 * 10.0).round() / 10.0);
    }
    summary
}
