//! Comprehensive Ranking System points engine.
//!
//! Scoring is a pure function of an [`ApplicantProfile`], a [`PointsTable`] and the
//! [`ScoringConfig`] caps. Missing reference data never fails a calculation; it is
//! reported through [`ScoreDiagnostics`] so callers can tell a genuine zero from a
//! degraded one.

mod config;
pub mod domain;
mod rules;
pub mod table;

pub use config::{AdditionalBonuses, LanguageCaps, ScoringConfig};
pub use domain::{
    ApplicantProfile, CanadianCredential, EducationLevel, LanguageBands, LanguageSkill,
    ProfileError, SpouseProfile,
};
pub use rules::{
    additional_points, language_points, skill_points, transferability_points,
};
pub use table::{
    age_level_key, work_level_key, CoverageGap, Factor, PointsReferenceRow, PointsTable,
    TableError,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Stateless scorer applying the configured caps to a profile.
#[derive(Debug, Clone, Default)]
pub struct PointsEngine {
    config: ScoringConfig,
}

impl PointsEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &ApplicantProfile, table: &PointsTable) -> ScoreResult {
        if table.is_empty() {
            warn!("points reference table is empty; returning a zero score");
            return ScoreResult::missing_reference_data();
        }

        let scored = rules::score_profile(profile, table, &self.config);
        let total = scored.subtotals.sum().min(self.config.max_total);

        ScoreResult {
            total,
            subtotals: scored.subtotals,
            components: scored.components,
            diagnostics: ScoreDiagnostics {
                missing_reference_data: false,
                unmatched_lookups: scored.unmatched,
            },
        }
    }
}

/// Section factor a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Age,
    Education,
    Language,
    CanadianWorkExperience,
    SpouseEducation,
    SpouseLanguage,
    Transferability,
    SiblingInCanada,
    FrenchProficiency,
    CanadianEducation,
    JobOffer,
    ProvincialNomination,
}

/// Discrete contribution to a score, kept for transparent breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubtotals {
    pub core_human_capital: u32,
    pub spouse: u32,
    pub transferability: u32,
    pub additional: u32,
}

impl ScoreSubtotals {
    pub fn sum(&self) -> u32 {
        self.core_human_capital + self.spouse + self.transferability + self.additional
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedLookup {
    pub factor: Factor,
    pub level_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDiagnostics {
    pub missing_reference_data: bool,
    pub unmatched_lookups: Vec<UnmatchedLookup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: u32,
    pub subtotals: ScoreSubtotals,
    pub components: Vec<ScoreComponent>,
    pub diagnostics: ScoreDiagnostics,
}

impl ScoreResult {
    fn missing_reference_data() -> Self {
        Self {
            total: 0,
            subtotals: ScoreSubtotals::default(),
            components: Vec::new(),
            diagnostics: ScoreDiagnostics {
                missing_reference_data: true,
                unmatched_lookups: Vec::new(),
            },
        }
    }

    /// True when any part of the score fell back to zero for lack of reference data.
    pub fn is_degraded(&self) -> bool {
        self.diagnostics.missing_reference_data || !self.diagnostics.unmatched_lookups.is_empty()
    }

    pub fn points_for(&self, factor: ScoreFactor) -> u32 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
