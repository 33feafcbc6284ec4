use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::crs::cache::{ManualClock, ReferenceCache};
use crate::crs::calculator::{
    ApplicantProfile, EducationLevel, Factor, LanguageBands, PointsReferenceRow, ScoringConfig,
};
use crate::crs::draws::DrawRecord;
use crate::crs::pathways::ProgramRecord;
use crate::crs::reference::{
    standard_draws, standard_points_rows, standard_programs, ReferenceStore, StoreError,
};
use crate::crs::{assessment_router, AssessmentService};

pub(super) const TTL: Duration = Duration::from_secs(300);

/// Single 25-year-old with a bachelor's degree, CLB 9 across the board, no Canadian work.
pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 25,
        education: EducationLevel::Bachelors,
        language: LanguageBands::uniform(9),
        canadian_work_years: 0,
        foreign_work_years: 3,
        has_sibling_in_canada: false,
        has_french_nclc7_plus: false,
        canadian_credential: None,
        has_job_offer: false,
        has_provincial_nomination: false,
        spouse: None,
    }
}

/// Nothing but a provincial nomination.
pub(super) fn nominee_only_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 50,
        education: EducationLevel::LessThanSecondary,
        language: LanguageBands::uniform(0),
        foreign_work_years: 0,
        has_provincial_nomination: true,
        ..profile()
    }
}

pub(super) fn program(province: &str, name: &str, cutoff: Option<u32>) -> ProgramRecord {
    ProgramRecord {
        province: province.to_string(),
        program: name.to_string(),
        summary: format!("{name} summary"),
        url: None,
        status: "open".to_string(),
        key_requirements: None,
        crs_cutoff: cutoff,
        is_active: true,
    }
}

/// In-memory store counting how often each table is fetched.
pub(super) struct CountingStore {
    pub(super) rows: Vec<PointsReferenceRow>,
    pub(super) programs: Vec<ProgramRecord>,
    pub(super) draws: Vec<DrawRecord>,
    pub(super) points_loads: AtomicUsize,
    pub(super) program_loads: AtomicUsize,
}

impl CountingStore {
    pub(super) fn standard() -> Self {
        Self::with_tables(standard_points_rows(), standard_programs(), standard_draws())
    }

    pub(super) fn with_tables(
        rows: Vec<PointsReferenceRow>,
        programs: Vec<ProgramRecord>,
        draws: Vec<DrawRecord>,
    ) -> Self {
        Self {
            rows,
            programs,
            draws,
            points_loads: AtomicUsize::new(0),
            program_loads: AtomicUsize::new(0),
        }
    }

    pub(super) fn points_loads(&self) -> usize {
        self.points_loads.load(Ordering::SeqCst)
    }

    pub(super) fn program_loads(&self) -> usize {
        self.program_loads.load(Ordering::SeqCst)
    }
}

impl ReferenceStore for CountingStore {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError> {
        self.points_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }

    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError> {
        self.program_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.programs.clone())
    }

    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError> {
        Ok(self.draws.clone())
    }
}

pub(super) struct UnavailableStore;

impl ReferenceStore for UnavailableStore {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError> {
        Err(StoreError::Unavailable("datastore offline".to_string()))
    }

    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError> {
        Err(StoreError::Unavailable("datastore offline".to_string()))
    }

    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError> {
        Err(StoreError::Unavailable("datastore offline".to_string()))
    }
}

/// Row for a factor the engine never looks up, so the table is non-empty but unhelpful.
pub(super) fn unrelated_rows() -> Vec<PointsReferenceRow> {
    vec![PointsReferenceRow::new(
        Factor::Other("arranged_employment".to_string()),
        "noc_00",
        200,
        200,
    )]
}

pub(super) fn build_service<S>(store: Arc<S>) -> (AssessmentService<S>, ManualClock)
where
    S: ReferenceStore + 'static,
{
    let clock = ManualClock::new();
    let cache = Arc::new(ReferenceCache::with_clock(TTL, Arc::new(clock.clone())));
    let service = AssessmentService::new(store, cache, ScoringConfig::standard());
    (service, clock)
}

pub(super) fn router_for<S>(store: S) -> axum::Router
where
    S: ReferenceStore + 'static,
{
    let (service, _) = build_service(Arc::new(store));
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
