//! Express Entry draw history and how a score compares against it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One round of invitations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw_number: u32,
    pub draw_date: NaiveDate,
    pub round_type: String,
    pub invitations: u32,
    pub crs_cutoff: u32,
}

/// Newest first; equal dates fall back to the higher draw number.
pub fn sort_newest_first(draws: &mut [DrawRecord]) {
    draws.sort_by(|a, b| {
        b.draw_date
            .cmp(&a.draw_date)
            .then_with(|| b.draw_number.cmp(&a.draw_number))
    });
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOutlook {
    pub draws_considered: usize,
    pub draws_cleared: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_cutoff: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_draw_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_cutoff: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cutoff: Option<f32>,
}

impl DrawOutlook {
    /// Compare `score` with the `lookback` most recent draws.
    pub fn evaluate(score: u32, draws: &[DrawRecord], lookback: usize) -> Self {
        let mut recent = draws.to_vec();
        sort_newest_first(&mut recent);
        recent.truncate(lookback);

        if recent.is_empty() {
            return Self {
                draws_considered: 0,
                draws_cleared: 0,
                latest_cutoff: None,
                latest_draw_date: None,
                lowest_cutoff: None,
                average_cutoff: None,
            };
        }

        let cleared = recent
            .iter()
            .filter(|draw| draw.crs_cutoff <= score)
            .count();
        let total: u64 = recent.iter().map(|draw| u64::from(draw.crs_cutoff)).sum();
        let average = total as f32 / recent.len() as f32;

        Self {
            draws_considered: recent.len(),
            draws_cleared: cleared,
            latest_cutoff: recent.first().map(|draw| draw.crs_cutoff),
            latest_draw_date: recent.first().map(|draw| draw.draw_date),
            lowest_cutoff: recent.iter().map(|draw| draw.crs_cutoff).min(),
            average_cutoff: Some((average * 10.0).round() / 10.0),
        }
    }

    pub fn clears_latest(&self, score: u32) -> bool {
        self.latest_cutoff
            .map(|cutoff| cutoff <= score)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(number: u32, date: (i32, u32, u32), cutoff: u32) -> DrawRecord {
        DrawRecord {
            draw_number: number,
            draw_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            round_type: "General".to_string(),
            invitations: 2000,
            crs_cutoff: cutoff,
        }
    }

    #[test]
    fn counts_cleared_draws_within_lookback() {
        let draws = vec![
            draw(300, (2024, 6, 1), 520),
            draw(302, (2024, 7, 1), 480),
            draw(301, (2024, 6, 15), 500),
            draw(299, (2024, 5, 1), 400),
        ];

        let outlook = DrawOutlook::evaluate(500, &draws, 3);

        assert_eq!(outlook.draws_considered, 3);
        assert_eq!(outlook.draws_cleared, 2);
        assert_eq!(outlook.latest_cutoff, Some(480));
        assert_eq!(outlook.lowest_cutoff, Some(480));
        assert_eq!(outlook.average_cutoff, Some(500.0));
        assert!(outlook.clears_latest(500));
    }

    #[test]
    fn empty_history_has_no_cutoffs() {
        let outlook = DrawOutlook::evaluate(600, &[], 10);

        assert_eq!(outlook.draws_considered, 0);
        assert!(outlook.latest_cutoff.is_none());
        assert!(!outlook.clears_latest(600));
    }
}
