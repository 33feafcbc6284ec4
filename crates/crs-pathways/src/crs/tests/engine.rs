use super::common::*;

use crate::crs::calculator::{
    CanadianCredential, EducationLevel, LanguageBands, PointsEngine, PointsTable, ScoreFactor,
    ScoringConfig, SpouseProfile,
};
use crate::crs::pathways::{build_report, ChanceTier};
use crate::crs::reference::standard_points_rows;

fn engine() -> PointsEngine {
    PointsEngine::new(ScoringConfig::standard())
}

fn standard_table() -> PointsTable {
    PointsTable::from_rows(standard_points_rows()).expect("standard grid is unique")
}

#[test]
fn single_applicant_with_clb9_scores_grid_language_and_transferability() {
    let result = engine().score(&profile(), &standard_table());

    assert_eq!(result.points_for(ScoreFactor::Age), 110);
    assert_eq!(result.points_for(ScoreFactor::Education), 120);
    assert_eq!(result.points_for(ScoreFactor::Language), 124);
    assert_eq!(result.points_for(ScoreFactor::CanadianWorkExperience), 0);
    assert_eq!(result.subtotals.transferability, 50);
    assert_eq!(result.subtotals.additional, 0);
    assert_eq!(result.total, 404);
    assert!(!result.is_degraded());
}

#[test]
fn nomination_alone_is_worth_six_hundred() {
    let result = engine().score(&nominee_only_profile(), &standard_table());

    assert_eq!(result.total, 600);
    assert_eq!(result.subtotals.additional, 600);

    let report = build_report(
        result.total,
        false,
        &[program("Ontario", "Human Capital Priorities", Some(500))],
    );
    let best = report.best_match.expect("one eligible program");
    assert_eq!(best.buffer, 100);
    assert_eq!(best.chance_next_6_months, ChanceTier::VeryHigh);
}

#[test]
fn unmatched_grid_rows_score_zero_and_are_reported() {
    let table = PointsTable::from_rows(unrelated_rows()).expect("single row");
    let result = engine().score(&nominee_only_profile(), &table);

    assert_eq!(result.total, 600);
    assert!(result.is_degraded());
    assert!(!result.diagnostics.missing_reference_data);
    assert_eq!(result.diagnostics.unmatched_lookups.len(), 3);
}

#[test]
fn empty_reference_table_degrades_to_zero() {
    let table = PointsTable::from_rows(Vec::new()).expect("empty table");
    let mut applicant = profile();
    applicant.age = 32;

    let result = engine().score(&applicant, &table);

    assert_eq!(result.total, 0);
    assert!(result.components.is_empty());
    assert!(result.diagnostics.missing_reference_data);
    assert!(result.is_degraded());
}

#[test]
fn total_is_clamped_to_configured_maximum() {
    let applicant = crate::crs::calculator::ApplicantProfile {
        education: EducationLevel::Doctoral,
        language: LanguageBands::uniform(12),
        canadian_work_years: 8,
        has_sibling_in_canada: true,
        has_french_nclc7_plus: true,
        canadian_credential: Some(CanadianCredential::ThreeYearOrLonger),
        has_job_offer: true,
        has_provincial_nomination: true,
        ..profile()
    };

    let result = engine().score(&applicant, &standard_table());

    assert!(result.subtotals.sum() > 1200);
    assert_eq!(result.total, 1200);
}

#[test]
fn spouse_lowers_principal_caps_and_adds_spouse_factors() {
    let applicant = crate::crs::calculator::ApplicantProfile {
        language: LanguageBands::uniform(12),
        spouse: Some(SpouseProfile {
            education: EducationLevel::Masters,
            language: LanguageBands::uniform(12),
        }),
        ..profile()
    };

    let result = engine().score(&applicant, &standard_table());

    assert_eq!(result.points_for(ScoreFactor::Age), 100);
    assert_eq!(result.points_for(ScoreFactor::Education), 112);
    assert_eq!(result.points_for(ScoreFactor::Language), 128);
    assert_eq!(result.points_for(ScoreFactor::SpouseEducation), 10);
    assert_eq!(result.points_for(ScoreFactor::SpouseLanguage), 20);
    assert_eq!(result.subtotals.spouse, 30);
}

#[test]
fn scoring_is_idempotent() {
    let table = standard_table();
    let applicant = profile();

    let first = engine().score(&applicant, &table);
    let second = engine().score(&applicant, &table);

    assert_eq!(first, second);
}

#[test]
fn french_lifts_medium_matches_to_high() {
    let programs = [program("Ontario", "French-Speaking Skilled Worker", Some(370))];

    let without = build_report(404, false, &programs);
    let with = build_report(404, true, &programs);

    assert_eq!(without.matches[0].chance_next_6_months, ChanceTier::Medium);
    assert_eq!(with.matches[0].chance_next_6_months, ChanceTier::High);
    assert_eq!(with.matches[0].buffer, 34);
}
