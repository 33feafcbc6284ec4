use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cache::ReferenceCache;
use super::calculator::{
    ApplicantProfile, PointsEngine, PointsReferenceRow, PointsTable, ProfileError, ScoreResult,
    ScoringConfig, TableError,
};
use super::draws::{sort_newest_first, DrawOutlook, DrawRecord};
use super::pathways::{build_report, PathwayReport, ProgramRecord};
use super::reference::{ReferenceStore, StoreError};

pub const DEFAULT_DRAW_LOOKBACK: usize = 10;

/// Service composing the reference store, the injected cache, and the points engine.
pub struct AssessmentService<S> {
    store: Arc<S>,
    cache: Arc<ReferenceCache>,
    engine: Arc<PointsEngine>,
    draw_lookback: usize,
}

/// Full answer for one applicant: score, ranked pathways and draw comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub score: ScoreResult,
    #[serde(flatten)]
    pub pathways: PathwayReport,
    pub draw_outlook: DrawOutlook,
}

impl<S> AssessmentService<S>
where
    S: ReferenceStore + 'static,
{
    pub fn new(store: Arc<S>, cache: Arc<ReferenceCache>, config: ScoringConfig) -> Self {
        Self {
            store,
            cache,
            engine: Arc::new(PointsEngine::new(config)),
            draw_lookback: DEFAULT_DRAW_LOOKBACK,
        }
    }

    pub fn with_draw_lookback(mut self, draw_lookback: usize) -> Self {
        self.draw_lookback = draw_lookback;
        self
    }

    pub fn engine(&self) -> &PointsEngine {
        &self.engine
    }

    /// Validated points grid, served from cache while fresh.
    pub fn points_table(&self) -> Result<Arc<PointsTable>, AssessmentServiceError> {
        self.cache.points_table(|| -> Result<PointsTable, AssessmentServiceError> {
            let rows = self.store.points_reference()?;
            let table = PointsTable::from_rows(rows)?;
            if table.is_empty() {
                warn!("points reference table loaded with no rows");
            } else {
                for gap in table.coverage_gaps() {
                    warn!(
                        factor = %gap.factor,
                        level_key = %gap.level_key,
                        "points table has no row for level"
                    );
                }
            }
            Ok(table)
        })
    }

    pub fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, AssessmentServiceError> {
        let table = self.points_table()?;
        Ok(table.rows().cloned().collect())
    }

    pub fn active_programs(&self) -> Result<Vec<ProgramRecord>, AssessmentServiceError> {
        let programs = self
            .cache
            .programs(|| self.store.programs().map_err(AssessmentServiceError::from))?;
        Ok(programs
            .iter()
            .filter(|program| program.is_active)
            .cloned()
            .collect())
    }

    /// Draw history, newest first.
    pub fn draws(&self) -> Result<Vec<DrawRecord>, AssessmentServiceError> {
        let draws = self
            .cache
            .draws(|| self.store.draws().map_err(AssessmentServiceError::from))?;
        let mut draws = Vec::clone(&draws);
        sort_newest_first(&mut draws);
        Ok(draws)
    }

    /// Score a profile without matching it against programs.
    pub fn score(&self, profile: &ApplicantProfile) -> Result<ScoreResult, AssessmentServiceError> {
        profile.validate()?;
        let table = self.points_table()?;
        Ok(self.engine.score(profile, &table))
    }

    pub fn assess(&self, profile: &ApplicantProfile) -> Result<Assessment, AssessmentServiceError> {
        let score = self.score(profile)?;
        let programs = self.active_programs()?;
        let draws = self.draws()?;

        let pathways = build_report(score.total, profile.has_french_nclc7_plus, &programs);
        let draw_outlook = DrawOutlook::evaluate(score.total, &draws, self.draw_lookback);

        debug!(
            total = score.total,
            degraded = score.is_degraded(),
            matches = pathways.matches.len(),
            "assessment complete"
        );

        Ok(Assessment {
            score,
            pathways,
            draw_outlook,
        })
    }

    /// Drop every cached table so the next request reads the store again.
    pub fn refresh(&self) {
        self.cache.invalidate_all();
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Table(#[from] TableError),
}
