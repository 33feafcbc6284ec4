//! Express Entry assessment: CRS scoring, provincial pathway matching and draw comparison.
//!
//! Reference tables are read through a [`ReferenceStore`] and held in a [`ReferenceCache`]
//! with an injected clock, so the scoring core stays pure and testable without a datastore.

pub mod cache;
pub mod calculator;
pub mod draws;
pub mod pathways;
pub mod reference;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::{Clock, ManualClock, ReferenceCache, SystemClock, TtlCell};
pub use calculator::{
    ApplicantProfile, PointsEngine, PointsTable, ProfileError, ScoreResult, ScoringConfig,
};
pub use draws::{DrawOutlook, DrawRecord};
pub use pathways::{ChanceTier, PathwayMatch, PathwayReport, ProgramRecord};
pub use reference::{
    CsvReferenceStore, ReferenceImportError, ReferenceImporter, ReferenceStore,
    StandardReferenceStore, StoreError,
};
pub use router::assessment_router;
pub use service::{Assessment, AssessmentService, AssessmentServiceError};
