use serde::{Deserialize, Deserializer, Serialize};

/// Highest CLB band a language test can map to.
pub const MAX_LANGUAGE_BAND: u8 = 12;
pub const MAX_AGE: u32 = 120;
pub const MAX_WORK_YEARS: u32 = 60;

/// Applicant attributes supplied by the caller. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(deserialize_with = "whole_number")]
    pub age: u32,
    pub education: EducationLevel,
    pub language: LanguageBands,
    #[serde(default, deserialize_with = "whole_number")]
    pub canadian_work_years: u32,
    #[serde(default, deserialize_with = "whole_number")]
    pub foreign_work_years: u32,
    #[serde(default)]
    pub has_sibling_in_canada: bool,
    #[serde(default)]
    pub has_french_nclc7_plus: bool,
    #[serde(default)]
    pub canadian_credential: Option<CanadianCredential>,
    #[serde(default)]
    pub has_job_offer: bool,
    #[serde(default)]
    pub has_provincial_nomination: bool,
    #[serde(default)]
    pub spouse: Option<SpouseProfile>,
}

impl ApplicantProfile {
    pub fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }

    /// Range checks that the type system cannot express.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age > MAX_AGE {
            return Err(ProfileError::AgeOutOfRange(self.age));
        }
        if self.canadian_work_years > MAX_WORK_YEARS {
            return Err(ProfileError::WorkYearsOutOfRange {
                field: "canadian_work_years",
                years: self.canadian_work_years,
            });
        }
        if self.foreign_work_years > MAX_WORK_YEARS {
            return Err(ProfileError::WorkYearsOutOfRange {
                field: "foreign_work_years",
                years: self.foreign_work_years,
            });
        }

        self.language.validate("applicant")?;
        if let Some(spouse) = &self.spouse {
            spouse.language.validate("spouse")?;
        }

        Ok(())
    }
}

/// Mirrored subset of attributes scored for an accompanying spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseProfile {
    pub education: EducationLevel,
    pub language: LanguageBands,
}

/// Highest completed education, keyed the same way as the points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    LessThanSecondary,
    Secondary,
    OneYearPostSecondary,
    TwoYearPostSecondary,
    Bachelors,
    TwoOrMoreCredentials,
    Masters,
    Doctoral,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 8] = [
        EducationLevel::LessThanSecondary,
        EducationLevel::Secondary,
        EducationLevel::OneYearPostSecondary,
        EducationLevel::TwoYearPostSecondary,
        EducationLevel::Bachelors,
        EducationLevel::TwoOrMoreCredentials,
        EducationLevel::Masters,
        EducationLevel::Doctoral,
    ];

    pub const fn level_key(self) -> &'static str {
        match self {
            EducationLevel::LessThanSecondary => "less_than_secondary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::OneYearPostSecondary => "one_year_post_secondary",
            EducationLevel::TwoYearPostSecondary => "two_year_post_secondary",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::TwoOrMoreCredentials => "two_or_more_credentials",
            EducationLevel::Masters => "masters",
            EducationLevel::Doctoral => "doctoral",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::LessThanSecondary => "Less than secondary school",
            EducationLevel::Secondary => "Secondary diploma",
            EducationLevel::OneYearPostSecondary => "One-year post-secondary program",
            EducationLevel::TwoYearPostSecondary => "Two-year post-secondary program",
            EducationLevel::Bachelors => "Bachelor's degree or three-year program",
            EducationLevel::TwoOrMoreCredentials => "Two or more post-secondary credentials",
            EducationLevel::Masters => "Master's or professional degree",
            EducationLevel::Doctoral => "Doctoral degree",
        }
    }
}

/// CLB band per skill for the first official language test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageBands {
    #[serde(deserialize_with = "whole_number")]
    pub listening: u8,
    #[serde(deserialize_with = "whole_number")]
    pub reading: u8,
    #[serde(deserialize_with = "whole_number")]
    pub writing: u8,
    #[serde(deserialize_with = "whole_number")]
    pub speaking: u8,
}

impl LanguageBands {
    pub const fn uniform(band: u8) -> Self {
        Self {
            listening: band,
            reading: band,
            writing: band,
            speaking: band,
        }
    }

    pub fn skills(&self) -> [(LanguageSkill, u8); 4] {
        [
            (LanguageSkill::Listening, self.listening),
            (LanguageSkill::Reading, self.reading),
            (LanguageSkill::Writing, self.writing),
            (LanguageSkill::Speaking, self.speaking),
        ]
    }

    /// Single highest band across the four skills.
    pub fn highest(&self) -> u8 {
        self.listening
            .max(self.reading)
            .max(self.writing)
            .max(self.speaking)
    }

    fn validate(&self, subject: &'static str) -> Result<(), ProfileError> {
        for (skill, band) in self.skills() {
            if band > MAX_LANGUAGE_BAND {
                return Err(ProfileError::LanguageBandOutOfRange {
                    subject,
                    skill,
                    band,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageSkill {
    Listening,
    Reading,
    Writing,
    Speaking,
}

/// Length of a Canadian post-secondary credential. Longer credentials win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanadianCredential {
    OneOrTwoYear,
    ThreeYearOrLonger,
}

/// Rejected applicant input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("age {0} is outside the accepted range 0..=120")]
    AgeOutOfRange(u32),
    #[error("{field} of {years} exceeds 60 years")]
    WorkYearsOutOfRange { field: &'static str, years: u32 },
    #[error("{subject} {skill:?} band {band} exceeds CLB 12")]
    LanguageBandOutOfRange {
        subject: &'static str,
        skill: LanguageSkill,
        band: u8,
    },
}

/// Accepts any JSON number that is a non-negative whole value and fits `T`.
pub(crate) fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {raw}"
        )));
    }

    T::try_from(raw as u64)
        .map_err(|_| serde::de::Error::custom(format!("{raw} is too large for this field")))
}
