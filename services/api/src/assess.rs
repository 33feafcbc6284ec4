use crate::infra::{build_service, parse_credential, parse_education, ConfiguredStore};
use clap::Args;
use crs_pathways::config::AppConfig;
use crs_pathways::crs::calculator::{
    CanadianCredential, EducationLevel, LanguageBands, SpouseProfile,
};
use crs_pathways::crs::{ApplicantProfile, Assessment, AssessmentService};
use crs_pathways::error::AppError;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReferenceArgs {
    /// Read reference tables from CSV exports in this directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DrawsArgs {
    #[command(flatten)]
    pub(crate) reference: ReferenceArgs,
    /// Number of draws to list, newest first
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    #[command(flatten)]
    pub(crate) reference: ReferenceArgs,
    /// JSON file holding the full applicant profile; profile flags are ignored when set
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Applicant age in years
    #[arg(long, required_unless_present = "profile")]
    pub(crate) age: Option<u32>,
    /// Highest completed education (e.g. bachelors, masters)
    #[arg(long, value_parser = parse_education, default_value = "secondary")]
    pub(crate) education: EducationLevel,
    /// CLB band applied to all four skills unless overridden per skill
    #[arg(long, default_value_t = 7)]
    pub(crate) clb: u8,
    #[arg(long)]
    pub(crate) listening: Option<u8>,
    #[arg(long)]
    pub(crate) reading: Option<u8>,
    #[arg(long)]
    pub(crate) writing: Option<u8>,
    #[arg(long)]
    pub(crate) speaking: Option<u8>,
    /// Years of skilled work experience in Canada
    #[arg(long, default_value_t = 0)]
    pub(crate) canadian_work_years: u32,
    /// Years of skilled work experience abroad
    #[arg(long, default_value_t = 0)]
    pub(crate) foreign_work_years: u32,
    #[arg(long)]
    pub(crate) sibling_in_canada: bool,
    /// French at NCLC 7 or higher in all four skills
    #[arg(long)]
    pub(crate) french: bool,
    /// Canadian post-secondary credential: short (1-2 years) or long (3+ years)
    #[arg(long, value_parser = parse_credential)]
    pub(crate) canadian_credential: Option<CanadianCredential>,
    #[arg(long)]
    pub(crate) job_offer: bool,
    #[arg(long)]
    pub(crate) provincial_nomination: bool,
    /// Accompanying spouse's highest education; adds a spouse to the profile
    #[arg(long, value_parser = parse_education)]
    pub(crate) spouse_education: Option<EducationLevel>,
    /// Spouse CLB band applied to all four skills
    #[arg(long, default_value_t = 0)]
    pub(crate) spouse_clb: u8,
    /// Print the assessment as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn profile(&self) -> Result<ApplicantProfile, AppError> {
        if let Some(path) = &self.profile {
            let raw = fs::read_to_string(path)?;
            let profile = serde_json::from_str(&raw).map_err(io::Error::from)?;
            return Ok(profile);
        }

        let Some(age) = self.age else {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--age is required unless --profile is given",
            )));
        };

        Ok(ApplicantProfile {
            age,
            education: self.education,
            language: LanguageBands {
                listening: self.listening.unwrap_or(self.clb),
                reading: self.reading.unwrap_or(self.clb),
                writing: self.writing.unwrap_or(self.clb),
                speaking: self.speaking.unwrap_or(self.clb),
            },
            canadian_work_years: self.canadian_work_years,
            foreign_work_years: self.foreign_work_years,
            has_sibling_in_canada: self.sibling_in_canada,
            has_french_nclc7_plus: self.french,
            canadian_credential: self.canadian_credential,
            has_job_offer: self.job_offer,
            has_provincial_nomination: self.provincial_nomination,
            spouse: self.spouse_education.map(|education| SpouseProfile {
                education,
                language: LanguageBands::uniform(self.spouse_clb),
            }),
        })
    }
}

fn service_for(args: &ReferenceArgs) -> Result<AssessmentService<ConfiguredStore>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = &args.data_dir {
        config.reference.data_dir = Some(dir.clone());
    }
    Ok(build_service(&config.reference))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let service = service_for(&args.reference)?;
    let profile = args.profile()?;
    let assessment = service.assess(&profile)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&assessment).map_err(io::Error::from)?;
        println!("{rendered}");
    } else {
        render_assessment(&assessment);
    }
    Ok(())
}

pub(crate) fn run_programs(args: ReferenceArgs) -> Result<(), AppError> {
    let service = service_for(&args)?;
    let programs = service.active_programs()?;

    println!("Active provincial programs ({})", programs.len());
    for program in programs {
        let cutoff = program
            .crs_cutoff
            .map(|cutoff| cutoff.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!(
            "- {} | {} | CRS cutoff {} | {}",
            program.province, program.program, cutoff, program.status
        );
        if let Some(requirements) = &program.key_requirements {
            println!("    requirements: {requirements}");
        }
    }
    Ok(())
}

pub(crate) fn run_draws(args: DrawsArgs) -> Result<(), AppError> {
    let service = service_for(&args.reference)?;
    let draws = service.draws()?;

    println!("Recent Express Entry draws");
    for draw in draws.iter().take(args.limit) {
        println!(
            "- #{} {} | {} | {} invitations | CRS {}",
            draw.draw_number, draw.draw_date, draw.round_type, draw.invitations, draw.crs_cutoff
        );
    }
    Ok(())
}

fn render_assessment(assessment: &Assessment) {
    let score = &assessment.score;
    println!("CRS estimate: {}", score.total);
    println!(
        "- core/human capital {} | spouse {} | transferability {} | additional {}",
        score.subtotals.core_human_capital,
        score.subtotals.spouse,
        score.subtotals.transferability,
        score.subtotals.additional
    );
    for component in &score.components {
        println!(
            "    - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }
    if score.diagnostics.missing_reference_data {
        println!("  Warning: points reference table is empty; score is not meaningful");
    }
    for lookup in &score.diagnostics.unmatched_lookups {
        println!(
            "  Warning: no reference row for {} '{}'; scored as 0",
            lookup.factor, lookup.level_key
        );
    }

    let pathways = &assessment.pathways;
    if pathways.matches.is_empty() {
        println!("\nNo active program accepts this score");
    } else {
        println!("\nEligible pathways ({})", pathways.matches.len());
        for entry in &pathways.matches {
            println!(
                "- {} | {} | buffer {:+} | chance {}",
                entry.program.province,
                entry.program.program,
                entry.buffer,
                entry.chance_next_6_months.label()
            );
        }
    }
    if let Some(best) = &pathways.best_match {
        println!(
            "Best match: {} ({})",
            best.program.program, best.program.province
        );
    }

    let outlook = &assessment.draw_outlook;
    if let (Some(cutoff), Some(date)) = (outlook.latest_cutoff, outlook.latest_draw_date) {
        println!(
            "\nLatest draw {} cut off at {}; cleared {} of the last {} draws",
            date, cutoff, outlook.draws_cleared, outlook.draws_considered
        );
    }

    println!("\nRecommended next steps");
    for action in &pathways.recommended_actions {
        println!("- {action}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AssessArgs {
        AssessArgs {
            reference: ReferenceArgs::default(),
            profile: None,
            age: None,
            education: EducationLevel::Secondary,
            clb: 7,
            listening: None,
            reading: None,
            writing: None,
            speaking: None,
            canadian_work_years: 0,
            foreign_work_years: 0,
            sibling_in_canada: false,
            french: false,
            canadian_credential: None,
            job_offer: false,
            provincial_nomination: false,
            spouse_education: None,
            spouse_clb: 0,
            json: false,
        }
    }

    #[test]
    fn flags_build_a_profile_with_per_skill_overrides() {
        let args = AssessArgs {
            age: Some(27),
            education: EducationLevel::Masters,
            clb: 9,
            speaking: Some(10),
            spouse_education: Some(EducationLevel::Bachelors),
            spouse_clb: 7,
            ..args()
        };

        let profile = args.profile().expect("profile from flags");

        assert_eq!(profile.age, 27);
        assert_eq!(profile.language.listening, 9);
        assert_eq!(profile.language.speaking, 10);
        let spouse = profile.spouse.expect("spouse added");
        assert_eq!(spouse.language, LanguageBands::uniform(7));
    }

    #[test]
    fn profile_file_takes_precedence_over_flags() {
        let path = std::env::temp_dir().join(format!("crs-profile-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"age": 41, "education": "doctoral", "language": {"listening": 8, "reading": 8, "writing": 8, "speaking": 8}}"#,
        )
        .expect("write profile");
        let args = AssessArgs {
            profile: Some(path.clone()),
            age: Some(20),
            ..args()
        };

        let profile = args.profile().expect("profile from file");
        let _ = fs::remove_file(&path);

        assert_eq!(profile.age, 41);
        assert_eq!(profile.education, EducationLevel::Doctoral);
    }

    #[test]
    fn missing_age_without_file_is_rejected() {
        assert!(args().profile().is_err());
    }
}
