//! Deterministic match scoring and the pluggable scorer seam.
//!
//! [`ScoringEngine`] is the rule-based core: a pure additive formula over
//! extracted fields, clamped to the documented 0..=100 scale. It is wrapped
//! by [`RuleBasedScorer`], the default [`CandidateScorer`] implementation;
//! a model-backed scorer can be swapped in behind the same contract.

mod rules;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::JobProfile;
use super::extraction::{ExtractedProfile, SectionExtractor};

const SCORE_CEILING: i16 = 100;

/// Rubric factor behind one score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    SkillMatch,
    LanguageMatch,
    ExperienceMinimum,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::SkillMatch => "skill match",
            ScoreFactor::LanguageMatch => "language match",
            ScoreFactor::ExperienceMinimum => "experience minimum",
        }
    }
}

/// Discrete contribution to a match score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: i16,
    pub note: String,
}

/// Score output describing the clamped total and its contribution trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub total_score: i16,
    pub components: Vec<ScoreComponent>,
}

impl ScoreOutcome {
    pub fn rationale(&self) -> String {
        if self.components.is_empty() {
            return format!("score {}: no scoring rule matched", self.total_score);
        }
        let notes: Vec<&str> = self
            .components
            .iter()
            .map(|component| component.note.as_str())
            .collect();
        format!("score {}: {}", self.total_score, notes.join("; "))
    }
}

/// Stateless rule engine; same inputs always yield the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn score(&self, fields: &ExtractedProfile, cv_text: &str, job: &JobProfile) -> ScoreOutcome {
        let (components, total) = rules::score_profile(fields, cv_text, job);
        ScoreOutcome {
            total_score: total.clamp(0, SCORE_CEILING),
            components,
        }
    }
}

/// Guaranteed analysis shape every scorer backend must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAnalysis {
    pub score: i16,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub education: Vec<String>,
    pub experience_years: u32,
    pub rationale: String,
}

/// Best-effort analysis as returned by a model backend; every field may be
/// absent. [`PartialAnalysis::or_defaults`] is the single place missing
/// fields become safe defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialAnalysis {
    pub score: Option<i16>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub rationale: Option<String>,
}

impl PartialAnalysis {
    pub fn or_defaults(self) -> ScoreAnalysis {
        ScoreAnalysis {
            score: self.score.unwrap_or(0).clamp(0, SCORE_CEILING),
            skills: self.skills.unwrap_or_default(),
            languages: self.languages.unwrap_or_default(),
            education: self.education.unwrap_or_default(),
            experience_years: self.experience_years.unwrap_or(0),
            rationale: self.rationale.unwrap_or_default(),
        }
    }
}

/// Error raised by a scorer backend. Never fatal to a batch: the pipeline
/// retains the candidate with score 0 and a note.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("scorer backend unavailable: {0}")]
    Backend(String),
    #[error("scorer returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// The scorer seam. Implement this to swap a deterministic and a model-based
/// backend without touching the pipeline.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    async fn analyze(&self, cv_text: &str, job: &JobProfile) -> Result<ScoreAnalysis, ScorerError>;
}

/// Default backend: section extraction plus the rule engine. Pure and fast.
#[derive(Debug, Clone, Copy)]
pub struct RuleBasedScorer {
    extractor: SectionExtractor,
    engine: ScoringEngine,
}

impl RuleBasedScorer {
    pub fn new(reference_year: i32) -> Self {
        Self {
            extractor: SectionExtractor::new(reference_year),
            engine: ScoringEngine,
        }
    }
}

#[async_trait]
impl CandidateScorer for RuleBasedScorer {
    async fn analyze(&self, cv_text: &str, job: &JobProfile) -> Result<ScoreAnalysis, ScorerError> {
        let fields = self.extractor.extract(cv_text);
        let outcome = self.engine.score(&fields, cv_text, job);

        Ok(ScoreAnalysis {
            score: outcome.total_score,
            rationale: outcome.rationale(),
            skills: fields.skills,
            languages: fields.languages,
            education: fields.education,
            experience_years: fields.experience_years,
        })
    }
}
