use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::EducationLevel;

/// Scoring factor a reference row belongs to. Unknown datastore factors are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Factor {
    Age,
    Education,
    CanadianWorkExperience,
    SpouseEducation,
    Other(String),
}

impl Factor {
    pub fn as_str(&self) -> &str {
        match self {
            Factor::Age => "age",
            Factor::Education => "education",
            Factor::CanadianWorkExperience => "canadian_work_experience",
            Factor::SpouseEducation => "spouse_education",
            Factor::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for Factor {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "age" => Factor::Age,
            "education" => Factor::Education,
            "canadian_work_experience" | "work_experience" => Factor::CanadianWorkExperience,
            "spouse_education" => Factor::SpouseEducation,
            _ => Factor::Other(value),
        }
    }
}

impl From<Factor> for String {
    fn from(value: Factor) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(factor, level)` entry of the points grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsReferenceRow {
    pub factor: Factor,
    pub level_key: String,
    pub points_with_spouse: u32,
    pub points_no_spouse: u32,
}

impl PointsReferenceRow {
    pub fn new(factor: Factor, level_key: &str, with_spouse: u32, no_spouse: u32) -> Self {
        Self {
            factor,
            level_key: level_key.to_string(),
            points_with_spouse: with_spouse,
            points_no_spouse: no_spouse,
        }
    }

    pub fn points(&self, has_spouse: bool) -> u32 {
        if has_spouse {
            self.points_with_spouse
        } else {
            self.points_no_spouse
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate points row for factor '{factor}' level '{level_key}'")]
    DuplicateLevel { factor: Factor, level_key: String },
}

/// Level key the table is missing for a bucket the resolvers can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub factor: Factor,
    pub level_key: String,
}

/// Points grid keyed by `(factor, level_key)`; keys are unique per factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsTable {
    rows: BTreeMap<(Factor, String), PointsReferenceRow>,
}

impl PointsTable {
    pub fn from_rows(rows: Vec<PointsReferenceRow>) -> Result<Self, TableError> {
        let mut indexed = BTreeMap::new();
        for row in rows {
            let key = (row.factor.clone(), row.level_key.clone());
            if indexed.contains_key(&key) {
                return Err(TableError::DuplicateLevel {
                    factor: row.factor,
                    level_key: row.level_key,
                });
            }
            indexed.insert(key, row);
        }

        Ok(Self { rows: indexed })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &PointsReferenceRow> {
        self.rows.values()
    }

    pub fn lookup(&self, factor: &Factor, level_key: &str) -> Option<&PointsReferenceRow> {
        self.rows.get(&(factor.clone(), level_key.to_string()))
    }

    /// Points for an exact `(factor, level_key)` match; zero when the row is missing.
    pub fn points(&self, factor: &Factor, level_key: &str, has_spouse: bool) -> u32 {
        match self.lookup(factor, level_key) {
            Some(row) => row.points(has_spouse),
            None => {
                warn!(%factor, level_key, "no points row for level; scoring zero");
                0
            }
        }
    }

    /// Level keys a valid applicant can resolve to that have no row.
    pub fn coverage_gaps(&self) -> Vec<CoverageGap> {
        let mut expected: BTreeSet<(Factor, String)> = BTreeSet::new();
        for age in 0..=45 {
            expected.insert((Factor::Age, age_level_key(age)));
        }
        for years in 0..=5 {
            expected.insert((
                Factor::CanadianWorkExperience,
                work_level_key(years).to_string(),
            ));
        }
        for level in EducationLevel::ALL {
            expected.insert((Factor::Education, level.level_key().to_string()));
            expected.insert((Factor::SpouseEducation, level.level_key().to_string()));
        }

        expected
            .into_iter()
            .filter(|key| !self.rows.contains_key(key))
            .map(|(factor, level_key)| CoverageGap { factor, level_key })
            .collect()
    }
}

/// Age bucket: `17_or_less`, `20-29`, `45+`, otherwise the age itself.
pub fn age_level_key(age: u32) -> String {
    match age {
        0..=17 => "17_or_less".to_string(),
        20..=29 => "20-29".to_string(),
        45.. => "45+".to_string(),
        other => other.to_string(),
    }
}

/// Work-experience bucket for whole years.
pub fn work_level_key(years: u32) -> &'static str {
    match years {
        0 => "none",
        1 => "1_year",
        2 => "2_years",
        3 => "3_years",
        4 => "4_years",
        _ => "5_plus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets_cover_documented_ranges() {
        for age in 0..=17 {
            assert_eq!(age_level_key(age), "17_or_less");
        }
        for age in 20..=29 {
            assert_eq!(age_level_key(age), "20-29");
        }
        for age in [45, 46, 60, 120] {
            assert_eq!(age_level_key(age), "45+");
        }
        assert_eq!(age_level_key(18), "18");
        assert_eq!(age_level_key(19), "19");
        assert_eq!(age_level_key(32), "32");
        assert_eq!(age_level_key(44), "44");
    }

    #[test]
    fn work_buckets_follow_whole_years() {
        assert_eq!(work_level_key(0), "none");
        assert_eq!(work_level_key(1), "1_year");
        assert_eq!(work_level_key(2), "2_years");
        assert_eq!(work_level_key(3), "3_years");
        assert_eq!(work_level_key(4), "4_years");
        assert_eq!(work_level_key(5), "5_plus");
        assert_eq!(work_level_key(17), "5_plus");
    }

    #[test]
    fn factor_names_are_normalized() {
        assert_eq!(Factor::from("Age".to_string()), Factor::Age);
        assert_eq!(
            Factor::from("work-experience".to_string()),
            Factor::CanadianWorkExperience
        );
        assert_eq!(
            Factor::from("language".to_string()),
            Factor::Other("language".to_string())
        );
    }

    #[test]
    fn duplicate_levels_are_rejected() {
        let err = PointsTable::from_rows(vec![
            PointsReferenceRow::new(Factor::Age, "20-29", 100, 110),
            PointsReferenceRow::new(Factor::Age, "20-29", 90, 99),
        ])
        .expect_err("duplicate rejected");

        assert_eq!(
            err,
            TableError::DuplicateLevel {
                factor: Factor::Age,
                level_key: "20-29".to_string(),
            }
        );
    }

    #[test]
    fn unmatched_lookup_scores_zero() {
        let table =
            PointsTable::from_rows(vec![PointsReferenceRow::new(Factor::Age, "20-29", 100, 110)])
                .expect("table builds");

        assert_eq!(table.points(&Factor::Age, "20-29", false), 110);
        assert_eq!(table.points(&Factor::Age, "20-29", true), 100);
        assert_eq!(table.points(&Factor::Age, "32", false), 0);
    }

    #[test]
    fn coverage_gaps_list_missing_buckets() {
        let table =
            PointsTable::from_rows(vec![PointsReferenceRow::new(Factor::Age, "20-29", 100, 110)])
                .expect("table builds");

        let gaps = table.coverage_gaps();
        assert!(gaps
            .iter()
            .any(|gap| gap.factor == Factor::Age && gap.level_key == "45+"));
        assert!(!gaps
            .iter()
            .any(|gap| gap.factor == Factor::Age && gap.level_key == "20-29"));
    }
}
