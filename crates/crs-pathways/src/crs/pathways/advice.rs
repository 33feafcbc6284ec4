use super::domain::{ChanceTier, PathwayMatch};

pub(crate) const STRONG_SCORE: u32 = 500;
pub(crate) const COMPETITIVE_SCORE: u32 = 450;
pub(crate) const DEVELOPING_SCORE: u32 = 350;

/// Human-readable next steps; guidance only, not part of the numeric result.
pub fn recommended_actions(
    score: u32,
    has_french_nclc7_plus: bool,
    matches: &[PathwayMatch],
) -> Vec<String> {
    let mut actions = Vec::new();

    if score >= STRONG_SCORE {
        actions.push(
            "Create or refresh your Express Entry profile and gather police and medical documents"
                .to_string(),
        );
    } else if score >= COMPETITIVE_SCORE {
        actions.push(
            "Monitor upcoming draws closely; small score gains can move you above recent cutoffs"
                .to_string(),
        );
    } else {
        actions.push(
            "Retake the language test targeting CLB 9 or higher, the fastest way to add points"
                .to_string(),
        );
    }

    if score < COMPETITIVE_SCORE {
        actions.push(
            "Explore Provincial Nominee Programs; a nomination adds 600 points".to_string(),
        );
    }

    if score < DEVELOPING_SCORE {
        actions.push(
            "Build Canadian work experience; one year also unlocks transferability points"
                .to_string(),
        );
    }

    if !has_french_nclc7_plus {
        actions.push(
            "Consider French language training; NCLC 7 adds up to 50 points and priority draws"
                .to_string(),
        );
    }

    match matches.first() {
        Some(best) if best.chance_next_6_months >= ChanceTier::High => actions.push(format!(
            "Prioritize {} ({}), your strongest current match",
            best.program.program, best.program.province
        )),
        Some(_) => {}
        None => actions.push(
            "No listed program currently accepts this score; revisit after improving key factors"
                .to_string(),
        ),
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_scores_get_improvement_guidance() {
        let actions = recommended_actions(320, false, &[]);

        assert!(actions.iter().any(|action| action.contains("language test")));
        assert!(actions.iter().any(|action| action.contains("Provincial Nominee")));
        assert!(actions.iter().any(|action| action.contains("French")));
        assert!(actions.iter().any(|action| action.contains("No listed program")));
    }

    #[test]
    fn strong_french_profiles_skip_french_advice() {
        let actions = recommended_actions(530, true, &[]);

        assert!(actions[0].contains("Express Entry profile"));
        assert!(!actions.iter().any(|action| action.contains("French language training")));
    }
}
