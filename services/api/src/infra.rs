use crs_pathways::config::ReferenceConfig;
use crs_pathways::crs::calculator::{
    CanadianCredential, EducationLevel, PointsReferenceRow, ScoringConfig,
};
use crs_pathways::crs::{
    AssessmentService, CsvReferenceStore, DrawRecord, ProgramRecord, ReferenceCache,
    ReferenceStore, StandardReferenceStore, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store selected at startup: CSV exports when a data directory is configured.
pub(crate) enum ConfiguredStore {
    Standard(StandardReferenceStore),
    Csv(CsvReferenceStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &ReferenceConfig) -> Self {
        match &config.data_dir {
            Some(dir) => {
                info!(data_dir = %dir.display(), "serving reference tables from CSV exports");
                Self::Csv(CsvReferenceStore::new(dir))
            }
            None => {
                info!("serving built-in reference tables");
                Self::Standard(StandardReferenceStore)
            }
        }
    }
}

impl ReferenceStore for ConfiguredStore {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError> {
        match self {
            Self::Standard(store) => store.points_reference(),
            Self::Csv(store) => store.points_reference(),
        }
    }

    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError> {
        match self {
            Self::Standard(store) => store.programs(),
            Self::Csv(store) => store.programs(),
        }
    }

    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError> {
        match self {
            Self::Standard(store) => store.draws(),
            Self::Csv(store) => store.draws(),
        }
    }
}

pub(crate) fn build_service(config: &ReferenceConfig) -> AssessmentService<ConfiguredStore> {
    let store = Arc::new(ConfiguredStore::from_config(config));
    let cache = Arc::new(ReferenceCache::new(config.cache_ttl));
    AssessmentService::new(store, cache, ScoringConfig::standard())
        .with_draw_lookback(config.draw_lookback)
}

pub(crate) fn parse_education(raw: &str) -> Result<EducationLevel, String> {
    let wanted = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    EducationLevel::ALL
        .into_iter()
        .find(|level| level.level_key() == wanted)
        .ok_or_else(|| {
            let known: Vec<&str> = EducationLevel::ALL
                .iter()
                .map(|level| level.level_key())
                .collect();
            format!("unknown education level '{raw}' (expected one of {})", known.join(", "))
        })
}

pub(crate) fn parse_credential(raw: &str) -> Result<CanadianCredential, String> {
    match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "short" | "one_or_two_year" => Ok(CanadianCredential::OneOrTwoYear),
        "long" | "three_year_or_longer" => Ok(CanadianCredential::ThreeYearOrLonger),
        _ => Err(format!(
            "unknown Canadian credential '{raw}' (expected short or long)"
        )),
    }
}
