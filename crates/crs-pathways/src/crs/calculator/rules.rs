use super::config::{AdditionalBonuses, ScoringConfig};
use super::domain::{ApplicantProfile, CanadianCredential, LanguageBands};
use super::table::{age_level_key, work_level_key, Factor, PointsTable};
use super::{ScoreComponent, ScoreFactor, ScoreSubtotals, UnmatchedLookup};

/// Share of the per-skill maximum awarded at each minimum band, highest first.
const LANGUAGE_STEPS: [(u8, f64); 4] = [(10, 1.0), (9, 0.91), (8, 0.68), (7, 0.50)];

/// Points for one skill, rounded half away from zero.
pub fn skill_points(band: u8, per_skill_max: u32) -> u32 {
    LANGUAGE_STEPS
        .iter()
        .find(|(minimum, _)| band >= *minimum)
        .map(|(_, share)| (f64::from(per_skill_max) * share).round() as u32)
        .unwrap_or(0)
}

/// Sum of the four skills, capped at the section maximum.
pub fn language_points(bands: &LanguageBands, per_skill_max: u32, section_cap: u32) -> u32 {
    let sum: u32 = bands
        .skills()
        .iter()
        .map(|(_, band)| skill_points(*band, per_skill_max))
        .sum();
    sum.min(section_cap)
}

pub fn transferability_points(bands: &LanguageBands, canadian_work_years: u32, cap: u32) -> u32 {
    let language = match bands.highest() {
        9.. => 50,
        7..=8 => 25,
        _ => 0,
    };
    let work = match canadian_work_years {
        2.. => 50,
        1 => 25,
        0 => 0,
    };
    (language + work).min(cap)
}

pub(crate) struct AdditionalAward {
    pub factor: ScoreFactor,
    pub points: u32,
    pub notes: &'static str,
}

pub(crate) fn additional_awards(
    profile: &ApplicantProfile,
    bonuses: &AdditionalBonuses,
) -> Vec<AdditionalAward> {
    let mut awards = Vec::new();

    if profile.has_sibling_in_canada {
        awards.push(AdditionalAward {
            factor: ScoreFactor::SiblingInCanada,
            points: bonuses.sibling_in_canada,
            notes: "sibling living in Canada",
        });
    }

    if profile.has_french_nclc7_plus {
        awards.push(AdditionalAward {
            factor: ScoreFactor::FrenchProficiency,
            points: bonuses.french_nclc7_plus,
            notes: "French at NCLC 7 or higher",
        });
    }

    match profile.canadian_credential {
        Some(CanadianCredential::ThreeYearOrLonger) => awards.push(AdditionalAward {
            factor: ScoreFactor::CanadianEducation,
            points: bonuses.canadian_education_long,
            notes: "Canadian credential of three years or longer",
        }),
        Some(CanadianCredential::OneOrTwoYear) => awards.push(AdditionalAward {
            factor: ScoreFactor::CanadianEducation,
            points: bonuses.canadian_education_short,
            notes: "one- or two-year Canadian credential",
        }),
        None => {}
    }

    if profile.has_job_offer {
        awards.push(AdditionalAward {
            factor: ScoreFactor::JobOffer,
            points: bonuses.job_offer,
            notes: "qualifying offer of employment",
        });
    }

    if profile.has_provincial_nomination {
        awards.push(AdditionalAward {
            factor: ScoreFactor::ProvincialNomination,
            points: bonuses.provincial_nomination,
            notes: "provincial or territorial nomination",
        });
    }

    awards
}

pub fn additional_points(profile: &ApplicantProfile, bonuses: &AdditionalBonuses) -> u32 {
    additional_awards(profile, bonuses)
        .iter()
        .map(|award| award.points)
        .sum()
}

struct GridScorer<'a> {
    table: &'a PointsTable,
    has_spouse: bool,
    unmatched: Vec<UnmatchedLookup>,
}

impl GridScorer<'_> {
    fn points(&mut self, factor: Factor, level_key: &str) -> u32 {
        if self.table.lookup(&factor, level_key).is_none() {
            self.unmatched.push(UnmatchedLookup {
                factor: factor.clone(),
                level_key: level_key.to_string(),
            });
        }
        self.table.points(&factor, level_key, self.has_spouse)
    }
}

pub(crate) struct ProfileScore {
    pub components: Vec<ScoreComponent>,
    pub subtotals: ScoreSubtotals,
    pub unmatched: Vec<UnmatchedLookup>,
}

pub(crate) fn score_profile(
    profile: &ApplicantProfile,
    table: &PointsTable,
    config: &ScoringConfig,
) -> ProfileScore {
    let has_spouse = profile.has_spouse();
    let mut grid = GridScorer {
        table,
        has_spouse,
        unmatched: Vec::new(),
    };
    let mut components = Vec::new();

    let age_key = age_level_key(profile.age);
    let age = grid.points(Factor::Age, &age_key);
    components.push(ScoreComponent {
        factor: ScoreFactor::Age,
        points: age,
        notes: format!("age {} resolved to level '{age_key}'", profile.age),
    });

    let education = grid.points(Factor::Education, profile.education.level_key());
    components.push(ScoreComponent {
        factor: ScoreFactor::Education,
        points: education,
        notes: profile.education.label().to_string(),
    });

    let (per_skill, section) = config.language.principal(has_spouse);
    let language = language_points(&profile.language, per_skill, section);
    components.push(ScoreComponent {
        factor: ScoreFactor::Language,
        points: language,
        notes: format!(
            "CLB L{} R{} W{} S{} (cap {section})",
            profile.language.listening,
            profile.language.reading,
            profile.language.writing,
            profile.language.speaking
        ),
    });

    let work_key = work_level_key(profile.canadian_work_years);
    let canadian_work = grid.points(Factor::CanadianWorkExperience, work_key);
    components.push(ScoreComponent {
        factor: ScoreFactor::CanadianWorkExperience,
        points: canadian_work,
        notes: format!(
            "{} year(s) of Canadian work resolved to level '{work_key}'",
            profile.canadian_work_years
        ),
    });

    let mut spouse_total = 0;
    if let Some(spouse) = &profile.spouse {
        let spouse_education = grid.points(Factor::SpouseEducation, spouse.education.level_key());
        components.push(ScoreComponent {
            factor: ScoreFactor::SpouseEducation,
            points: spouse_education,
            notes: spouse.education.label().to_string(),
        });

        let (per_skill, section) = config.language.spouse();
        let spouse_language = language_points(&spouse.language, per_skill, section);
        components.push(ScoreComponent {
            factor: ScoreFactor::SpouseLanguage,
            points: spouse_language,
            notes: format!("spouse language capped at {section}"),
        });

        spouse_total = spouse_education + spouse_language;
    }

    let transferability = transferability_points(
        &profile.language,
        profile.canadian_work_years,
        config.transferability_cap,
    );
    if transferability > 0 {
        components.push(ScoreComponent {
            factor: ScoreFactor::Transferability,
            points: transferability,
            notes: format!(
                "highest band CLB {} with {} year(s) Canadian work",
                profile.language.highest(),
                profile.canadian_work_years
            ),
        });
    }

    let mut additional = 0;
    for award in additional_awards(profile, &config.bonuses) {
        additional += award.points;
        components.push(ScoreComponent {
            factor: award.factor,
            points: award.points,
            notes: award.notes.to_string(),
        });
    }

    ProfileScore {
        components,
        subtotals: ScoreSubtotals {
            core_human_capital: age + education + language + canadian_work,
            spouse: spouse_total,
            transferability,
            additional,
        },
        unmatched: grid.unmatched,
    }
}
