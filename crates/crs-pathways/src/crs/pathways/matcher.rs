use std::cmp::Ordering;

use super::domain::{ChanceTier, PathwayMatch, ProgramRecord};

/// Tier for a margin, lifted to `high` when the French priority lane applies.
pub fn chance_tier(margin: i64, has_french_nclc7_plus: bool) -> ChanceTier {
    let tier = ChanceTier::from_margin(margin);
    if has_french_nclc7_plus && tier < ChanceTier::High {
        ChanceTier::High
    } else {
        tier
    }
}

/// Programs whose cutoff the score meets, ranked best chance first.
///
/// Ties on tier fall back to the larger buffer, then province and program name so the
/// ordering is reproducible across calls.
pub fn match_pathways(
    score: u32,
    has_french_nclc7_plus: bool,
    programs: &[ProgramRecord],
) -> Vec<PathwayMatch> {
    let mut matches: Vec<PathwayMatch> = programs
        .iter()
        .filter(|program| program.effective_cutoff() <= score)
        .map(|program| {
            let buffer = i64::from(score) - i64::from(program.effective_cutoff());
            PathwayMatch {
                program: program.clone(),
                chance_next_6_months: chance_tier(buffer, has_french_nclc7_plus),
                buffer,
            }
        })
        .collect();

    matches.sort_by(compare_matches);
    matches
}

fn compare_matches(a: &PathwayMatch, b: &PathwayMatch) -> Ordering {
    b.chance_next_6_months
        .cmp(&a.chance_next_6_months)
        .then_with(|| b.buffer.cmp(&a.buffer))
        .then_with(|| a.program.province.cmp(&b.program.province))
        .then_with(|| a.program.program.cmp(&b.program.program))
}

pub fn best_match(matches: &[PathwayMatch]) -> Option<PathwayMatch> {
    matches.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(province: &str, name: &str, cutoff: Option<u32>) -> ProgramRecord {
        ProgramRecord {
            province: province.to_string(),
            program: name.to_string(),
            summary: String::new(),
            url: None,
            status: "open".to_string(),
            key_requirements: None,
            crs_cutoff: cutoff,
            is_active: true,
        }
    }

    #[test]
    fn tiers_follow_margin_thresholds() {
        assert_eq!(chance_tier(80, false), ChanceTier::VeryHigh);
        assert_eq!(chance_tier(79, false), ChanceTier::High);
        assert_eq!(chance_tier(50, false), ChanceTier::High);
        assert_eq!(chance_tier(30, false), ChanceTier::Medium);
        assert_eq!(chance_tier(10, false), ChanceTier::Low);
        assert_eq!(chance_tier(9, false), ChanceTier::VeryLow);
    }

    #[test]
    fn french_lane_lifts_lower_tiers_to_high() {
        assert_eq!(chance_tier(35, true), ChanceTier::High);
        assert_eq!(chance_tier(0, true), ChanceTier::High);
        assert_eq!(chance_tier(120, true), ChanceTier::VeryHigh);
    }

    #[test]
    fn excludes_programs_above_score_and_keeps_missing_cutoffs() {
        let programs = vec![
            program("ON", "Human Capital Priorities", Some(480)),
            program("BC", "Skills Immigration", Some(520)),
            program("SK", "Occupations In-Demand", None),
        ];

        let matches = match_pathways(500, false, &programs);
        let names: Vec<&str> = matches.iter().map(|m| m.program.program.as_str()).collect();

        assert_eq!(names, vec!["Occupations In-Demand", "Human Capital Priorities"]);
        assert_eq!(matches[0].buffer, 500);
        assert_eq!(matches[1].buffer, 20);
        assert_eq!(matches[1].chance_next_6_months, ChanceTier::Low);
    }

    #[test]
    fn equal_tiers_rank_by_buffer_then_name() {
        let programs = vec![
            program("NS", "Labour Market Priorities", Some(400)),
            program("AB", "Express Entry Stream", Some(380)),
            program("MB", "Skilled Worker Overseas", Some(380)),
        ];

        let matches = match_pathways(480, false, &programs);
        let names: Vec<&str> = matches.iter().map(|m| m.program.program.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Express Entry Stream",
                "Skilled Worker Overseas",
                "Labour Market Priorities"
            ]
        );
        assert!(matches
            .iter()
            .all(|m| m.chance_next_6_months == ChanceTier::VeryHigh));
        assert_eq!(
            best_match(&matches).map(|m| m.program.province),
            Some("AB".to_string())
        );
    }

    #[test]
    fn best_match_is_none_without_candidates() {
        let matches = match_pathways(200, true, &[program("ON", "French-Speaking", Some(300))]);
        assert!(matches.is_empty());
        assert!(best_match(&matches).is_none());
    }
}
