use std::collections::BTreeSet;

use super::ScoreComponent;
use super::ScoreFactor;
use crate::workflows::screening::domain::JobProfile;
use crate::workflows::screening::extraction::ExtractedProfile;

const SKILL_POINTS: i16 = 10;
const LANGUAGE_POINTS: i16 = 5;
const EXPERIENCE_POINTS: i16 = 15;

pub(crate) fn score_profile(
    fields: &ExtractedProfile,
    cv_text: &str,
    job: &JobProfile,
) -> (Vec<ScoreComponent>, i16) {
    let mut components = Vec::new();
    let mut total: i16 = 0;

    let cv_lower = cv_text.to_lowercase();
    for skill in &job.skills {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        if cv_lower.contains(&skill.to_lowercase()) {
            components.push(ScoreComponent {
                factor: ScoreFactor::SkillMatch,
                points: SKILL_POINTS,
                note: format!("required skill '{skill}' present"),
            });
            total += SKILL_POINTS;
        }
    }

    let required = normalized_set(&job.languages);
    let spoken = normalized_set(&fields.languages);
    for language in required.intersection(&spoken) {
        components.push(ScoreComponent {
            factor: ScoreFactor::LanguageMatch,
            points: LANGUAGE_POINTS,
            note: format!("shared language '{language}'"),
        });
        total += LANGUAGE_POINTS;
    }

    if job.experience_years > 0 && fields.experience_years >= job.experience_years {
        components.push(ScoreComponent {
            factor: ScoreFactor::ExperienceMinimum,
            points: EXPERIENCE_POINTS,
            note: format!(
                "{} year(s) of experience meets the required {}",
                fields.experience_years, job.experience_years
            ),
        });
        total += EXPERIENCE_POINTS;
    }

    (components, total)
}

fn normalized_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}
