use serde::{Deserialize, Serialize};

/// Caps and fixed awards applied on top of the points grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub max_total: u32,
    pub language: LanguageCaps,
    pub transferability_cap: u32,
    pub bonuses: AdditionalBonuses,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            max_total: 1200,
            language: LanguageCaps {
                single_per_skill: 34,
                single_section: 136,
                with_spouse_per_skill: 32,
                with_spouse_section: 128,
                spouse_per_skill: 5,
                spouse_section: 20,
            },
            transferability_cap: 100,
            bonuses: AdditionalBonuses {
                sibling_in_canada: 15,
                french_nclc7_plus: 50,
                canadian_education_short: 15,
                canadian_education_long: 30,
                job_offer: 50,
                provincial_nomination: 600,
            },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCaps {
    pub single_per_skill: u32,
    pub single_section: u32,
    pub with_spouse_per_skill: u32,
    pub with_spouse_section: u32,
    pub spouse_per_skill: u32,
    pub spouse_section: u32,
}

impl LanguageCaps {
    /// `(per_skill, section)` for the principal applicant.
    pub fn principal(&self, has_spouse: bool) -> (u32, u32) {
        if has_spouse {
            (self.with_spouse_per_skill, self.with_spouse_section)
        } else {
            (self.single_per_skill, self.single_section)
        }
    }

    pub fn spouse(&self) -> (u32, u32) {
        (self.spouse_per_skill, self.spouse_section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalBonuses {
    pub sibling_in_canada: u32,
    pub french_nclc7_plus: u32,
    pub canadian_education_short: u32,
    pub canadian_education_long: u32,
    pub job_offer: u32,
    pub provincial_nomination: u32,
}
