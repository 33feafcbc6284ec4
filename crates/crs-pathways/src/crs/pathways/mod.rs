//! Provincial pathway matching against a computed CRS total.

mod advice;
pub mod domain;
mod matcher;

pub use advice::recommended_actions;
pub use domain::{ChanceTier, PathwayMatch, PathwayReport, ProgramRecord};
pub use matcher::{best_match, chance_tier, match_pathways};

/// Filter, rank and annotate programs for a score, with guidance attached.
pub fn build_report(
    score: u32,
    has_french_nclc7_plus: bool,
    programs: &[ProgramRecord],
) -> PathwayReport {
    let matches = match_pathways(score, has_french_nclc7_plus, programs);
    let best_match = best_match(&matches);
    let recommended_actions = recommended_actions(score, has_french_nclc7_plus, &matches);

    PathwayReport {
        matches,
        best_match,
        recommended_actions,
    }
}
