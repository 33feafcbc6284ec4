use chrono::NaiveDate;

use super::{ReferenceStore, StoreError};
use crate::crs::calculator::{age_level_key, EducationLevel, Factor, PointsReferenceRow};
use crate::crs::draws::DrawRecord;
use crate::crs::pathways::ProgramRecord;

/// `(age, with spouse, without spouse)`; 20-29 collapses to one row.
const AGE_POINTS: [(u32, u32, u32); 20] = [
    (17, 0, 0),
    (18, 90, 99),
    (19, 95, 105),
    (20, 100, 110),
    (30, 95, 105),
    (31, 90, 99),
    (32, 85, 94),
    (33, 80, 88),
    (34, 75, 83),
    (35, 70, 77),
    (36, 65, 72),
    (37, 60, 66),
    (38, 55, 61),
    (39, 50, 55),
    (40, 45, 50),
    (41, 35, 39),
    (42, 25, 28),
    (43, 15, 17),
    (44, 5, 6),
    (45, 0, 0),
];

const EDUCATION_POINTS: [(EducationLevel, u32, u32); 8] = [
    (EducationLevel::LessThanSecondary, 0, 0),
    (EducationLevel::Secondary, 28, 30),
    (EducationLevel::OneYearPostSecondary, 84, 90),
    (EducationLevel::TwoYearPostSecondary, 91, 98),
    (EducationLevel::Bachelors, 112, 120),
    (EducationLevel::TwoOrMoreCredentials, 119, 128),
    (EducationLevel::Masters, 126, 135),
    (EducationLevel::Doctoral, 140, 150),
];

const SPOUSE_EDUCATION_POINTS: [(EducationLevel, u32); 8] = [
    (EducationLevel::LessThanSecondary, 0),
    (EducationLevel::Secondary, 2),
    (EducationLevel::OneYearPostSecondary, 6),
    (EducationLevel::TwoYearPostSecondary, 7),
    (EducationLevel::Bachelors, 8),
    (EducationLevel::TwoOrMoreCredentials, 9),
    (EducationLevel::Masters, 10),
    (EducationLevel::Doctoral, 10),
];

const CANADIAN_WORK_POINTS: [(&str, u32, u32); 6] = [
    ("none", 0, 0),
    ("1_year", 35, 40),
    ("2_years", 46, 53),
    ("3_years", 56, 64),
    ("4_years", 63, 72),
    ("5_plus", 70, 80),
];

/// Published core human capital grid, one row per bucket.
pub fn standard_points_rows() -> Vec<PointsReferenceRow> {
    let mut rows = Vec::new();

    for (age, with_spouse, no_spouse) in AGE_POINTS {
        rows.push(PointsReferenceRow::new(
            Factor::Age,
            &age_level_key(age),
            with_spouse,
            no_spouse,
        ));
    }

    for (level, with_spouse, no_spouse) in EDUCATION_POINTS {
        rows.push(PointsReferenceRow::new(
            Factor::Education,
            level.level_key(),
            with_spouse,
            no_spouse,
        ));
    }

    for (level, points) in SPOUSE_EDUCATION_POINTS {
        rows.push(PointsReferenceRow::new(
            Factor::SpouseEducation,
            level.level_key(),
            points,
            0,
        ));
    }

    for (level_key, with_spouse, no_spouse) in CANADIAN_WORK_POINTS {
        rows.push(PointsReferenceRow::new(
            Factor::CanadianWorkExperience,
            level_key,
            with_spouse,
            no_spouse,
        ));
    }

    rows
}

fn program(
    province: &str,
    name: &str,
    summary: &str,
    url: &str,
    key_requirements: &str,
    crs_cutoff: Option<u32>,
    is_active: bool,
) -> ProgramRecord {
    ProgramRecord {
        province: province.to_string(),
        program: name.to_string(),
        summary: summary.to_string(),
        url: Some(url.to_string()),
        status: if is_active { "open" } else { "paused" }.to_string(),
        key_requirements: Some(key_requirements.to_string()),
        crs_cutoff,
        is_active,
    }
}

/// Bundled snapshot of enhanced provincial streams, used without a data directory.
pub fn standard_programs() -> Vec<ProgramRecord> {
    vec![
        program(
            "Ontario",
            "Human Capital Priorities Stream",
            "Targeted invitations from the federal Express Entry pool",
            "https://www.ontario.ca/page/oinp-express-entry-human-capital-priorities-stream",
            "Express Entry profile, CLB 7, bachelor's degree or higher",
            Some(462),
            true,
        ),
        program(
            "Ontario",
            "French-Speaking Skilled Worker Stream",
            "Express Entry candidates with strong French and English",
            "https://www.ontario.ca/page/oinp-express-entry-french-speaking-skilled-worker-stream",
            "NCLC 7 in French, CLB 6 in English",
            Some(300),
            true,
        ),
        program(
            "British Columbia",
            "Skills Immigration - Express Entry BC",
            "Job-offer driven stream aligned with Express Entry",
            "https://www.welcomebc.ca/immigrate-to-b-c/skills-immigration",
            "Indeterminate full-time job offer in B.C.",
            Some(415),
            true,
        ),
        program(
            "Alberta",
            "Alberta Express Entry Stream",
            "Notification of interest issued from the federal pool",
            "https://www.alberta.ca/aaip-alberta-express-entry-stream",
            "Active Express Entry profile with ties to Alberta",
            Some(300),
            true,
        ),
        program(
            "Saskatchewan",
            "International Skilled Worker - Express Entry",
            "Provincial points grid; no CRS minimum",
            "https://www.saskatchewan.ca/residents/moving-to-saskatchewan/live-in-saskatchewan/by-immigrating/saskatchewan-immigrant-nominee-program",
            "60 of 110 provincial points, in-demand occupation",
            None,
            true,
        ),
        program(
            "Nova Scotia",
            "Labour Market Priorities",
            "Occupation-targeted letters of interest",
            "https://liveinnovascotia.com/nova-scotia-nominee-program/labour-market-priorities",
            "Express Entry profile matching the announced occupation",
            Some(400),
            true,
        ),
        program(
            "New Brunswick",
            "Express Entry Stream",
            "Expression of interest for candidates with provincial connections",
            "https://www.welcomenb.ca/content/wel-bien/en/immigrating_to_nb/nb_provincial_nomineeprogram.html",
            "Connection to New Brunswick, CLB 7",
            Some(350),
            false,
        ),
        program(
            "Manitoba",
            "Skilled Worker Overseas - Human Capital",
            "Provincial ranking score; CRS not used",
            "https://immigratemanitoba.com/immigrate/skilled-worker-overseas",
            "Established connection to Manitoba",
            None,
            true,
        ),
    ]
}

fn draw(
    draw_number: u32,
    date: (i32, u32, u32),
    round_type: &str,
    invitations: u32,
    crs_cutoff: u32,
) -> Option<DrawRecord> {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2).map(|draw_date| DrawRecord {
        draw_number,
        draw_date,
        round_type: round_type.to_string(),
        invitations,
        crs_cutoff,
    })
}

/// Bundled snapshot of recent rounds of invitations.
pub fn standard_draws() -> Vec<DrawRecord> {
    [
        draw(298, (2024, 5, 30), "Canadian Experience Class", 3000, 522),
        draw(299, (2024, 5, 31), "Provincial Nominee Program", 2985, 676),
        draw(300, (2024, 6, 19), "Provincial Nominee Program", 1499, 663),
        draw(301, (2024, 7, 2), "Provincial Nominee Program", 920, 739),
        draw(302, (2024, 7, 8), "French language proficiency", 3200, 420),
        draw(303, (2024, 7, 16), "Provincial Nominee Program", 1391, 670),
        draw(304, (2024, 7, 17), "Trade occupations", 1800, 436),
        draw(305, (2024, 7, 30), "Provincial Nominee Program", 964, 662),
        draw(306, (2024, 7, 31), "Canadian Experience Class", 5000, 535),
        draw(307, (2024, 8, 13), "Provincial Nominee Program", 763, 690),
        draw(308, (2024, 8, 14), "Canadian Experience Class", 3200, 507),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// In-process store serving the bundled tables.
#[derive(Debug, Clone, Default)]
pub struct StandardReferenceStore;

impl ReferenceStore for StandardReferenceStore {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError> {
        Ok(standard_points_rows())
    }

    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError> {
        Ok(standard_programs())
    }

    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError> {
        Ok(standard_draws())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::calculator::PointsTable;

    #[test]
    fn standard_grid_has_no_gaps_or_duplicates() {
        let table = PointsTable::from_rows(standard_points_rows()).expect("unique levels");

        assert!(table.coverage_gaps().is_empty());
        assert_eq!(table.points(&Factor::Age, "20-29", false), 110);
        assert_eq!(table.points(&Factor::Age, "45+", true), 0);
        assert_eq!(table.points(&Factor::Education, "masters", false), 135);
        assert_eq!(
            table.points(&Factor::CanadianWorkExperience, "5_plus", true),
            70
        );
    }

    #[test]
    fn bundled_draws_parse() {
        assert_eq!(standard_draws().len(), 11);
    }
}
