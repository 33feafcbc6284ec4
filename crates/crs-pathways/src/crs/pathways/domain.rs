use serde::{Deserialize, Serialize};

/// Immigration stream as published by the datastore. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub province: String,
    pub program: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub key_requirements: Option<String>,
    #[serde(default)]
    pub crs_cutoff: Option<u32>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl ProgramRecord {
    /// Absent cutoffs admit every score.
    pub fn effective_cutoff(&self) -> u32 {
        self.crs_cutoff.unwrap_or(0)
    }
}

/// Qualitative chance of an invitation within the next six months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceTier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ChanceTier {
    pub fn from_margin(margin: i64) -> Self {
        match margin {
            80.. => ChanceTier::VeryHigh,
            50..=79 => ChanceTier::High,
            30..=49 => ChanceTier::Medium,
            10..=29 => ChanceTier::Low,
            _ => ChanceTier::VeryLow,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ChanceTier::VeryLow => "very low",
            ChanceTier::Low => "low",
            ChanceTier::Medium => "medium",
            ChanceTier::High => "high",
            ChanceTier::VeryHigh => "very high",
        }
    }
}

/// Eligible program annotated with the applicant's margin over its cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayMatch {
    #[serde(flatten)]
    pub program: ProgramRecord,
    pub chance_next_6_months: ChanceTier,
    pub buffer: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayReport {
    pub matches: Vec<PathwayMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<PathwayMatch>,
    pub recommended_actions: Vec<String>,
}
