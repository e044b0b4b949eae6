//! Heading-anchored segmentation of free-text resumes into structured fields.
//!
//! Extraction is deliberately heuristic and infallible: a document with no
//! recognizable structure yields empty fields, never an error. The pack of
//! known heading labels delimits each section; bodies run from a heading to
//! the nearest following occurrence of any other known heading, or to end of
//! text.

mod experience;
mod sections;

use serde::Serialize;

/// Fields pulled from one resume, consumed immediately by `Candidate`
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub languages: Vec<String>,
    pub experience_years: u32,
}

const SKILLS_LABEL: &str = "SKILLS";
const TECHNICAL_SKILLS_LABEL: &str = "TECHNICAL SKILLS";
const EDUCATION_LABEL: &str = "EDUCATION";
const LANGUAGES_LABEL: &str = "LANGUAGES";
const EXPERIENCE_LABEL: &str = "EXPERIENCE";

const NAME_FALLBACK: &str = "Unknown";

/// Parses one resume's raw text into an [`ExtractedProfile`].
#[derive(Debug, Clone, Copy)]
pub struct SectionExtractor {
    reference_year: i32,
}

impl SectionExtractor {
    /// `reference_year` anchors the "earliest year seen" experience fallback.
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn extract(&self, text: &str) -> ExtractedProfile {
        ExtractedProfile {
            name: extract_name(text),
            email: sections::find_email(text),
            phone: sections::find_phone(text),
            skills: extract_skills(text),
            education: extract_education(text),
            languages: extract_languages(text),
            experience_years: experience::extract_years(text, self.reference_year),
        }
    }
}

fn extract_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(NAME_FALLBACK)
        .to_string()
}

fn extract_skills(text: &str) -> Vec<String> {
    let end_labels = [EDUCATION_LABEL, LANGUAGES_LABEL, EXPERIENCE_LABEL];
    let mut section = sections::section(text, SKILLS_LABEL, &end_labels);
    if section.is_empty() {
        section = sections::section(text, TECHNICAL_SKILLS_LABEL, &end_labels);
    }
    sections::itemized(section)
}

fn extract_education(text: &str) -> Vec<String> {
    let section = sections::section(
        text,
        EDUCATION_LABEL,
        &[LANGUAGES_LABEL, SKILLS_LABEL, EXPERIENCE_LABEL],
    );
    sections::itemized(section)
}

fn extract_languages(text: &str) -> Vec<String> {
    let section = sections::section(
        text,
        LANGUAGES_LABEL,
        &[EDUCATION_LABEL, SKILLS_LABEL, EXPERIENCE_LABEL],
    );
    sections::language_list(section)
}
