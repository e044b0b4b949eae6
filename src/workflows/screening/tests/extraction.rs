use super::common::{REFERENCE_YEAR, STRONG_CV, WEAK_CV};
use crate::workflows::screening::extraction::SectionExtractor;

fn extractor() -> SectionExtractor {
    SectionExtractor::new(REFERENCE_YEAR)
}

#[test]
fn name_is_first_non_blank_line() {
    let profile = extractor().extract("\n\n  Maria Lopez  \nmaria@example.com\n");
    assert_eq!(profile.name, "Maria Lopez");
}

#[test]
fn name_falls_back_to_unknown() {
    let profile = extractor().extract("   \n\n  ");
    assert_eq!(profile.name, "Unknown");
}

#[test]
fn first_email_is_extracted() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(profile.email, "maria.lopez@example.com");
}

#[test]
fn missing_email_yields_empty_string() {
    let profile = extractor().extract("Maria Lopez\nno contact details here\n");
    assert_eq!(profile.email, "");
}

#[test]
fn stray_at_sign_is_not_an_email() {
    let profile = extractor().extract("Maria Lopez\nreach me @ the office\n");
    assert_eq!(profile.email, "");
}

#[test]
fn phone_with_plus_and_separators_is_extracted() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(profile.phone, "+54 11 4444 5678");
}

#[test]
fn short_digit_runs_are_not_phones() {
    let profile = extractor().extract("Maria Lopez\nApartment 4B, floor 12\n");
    assert_eq!(profile.phone, "");
}

#[test]
fn skills_are_bullet_stripped() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(profile.skills, vec!["Python", "Docker", "PostgreSQL"]);
}

#[test]
fn single_comma_line_is_split_into_items() {
    let text = "Maria Lopez\n\nSKILLS\nPython, Docker, Kubernetes\n\nEDUCATION\n- BSc\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.skills, vec!["Python", "Docker", "Kubernetes"]);
}

#[test]
fn education_is_bounded_by_next_heading() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(
        profile.education,
        vec!["BSc in Computer Science (University of Buenos Aires)"]
    );
}

#[test]
fn missing_languages_heading_yields_empty_list() {
    let text = "Maria Lopez\n\nSKILLS\n- Python\n";
    let profile = extractor().extract(text);
    assert!(profile.languages.is_empty());
}

#[test]
fn language_proficiency_parentheticals_are_stripped() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(profile.languages, vec!["Spanish", "English"]);
}

#[test]
fn languages_split_on_conjunction() {
    let profile = extractor().extract(WEAK_CV);
    assert_eq!(profile.languages, vec!["Spanish", "English"]);
}

#[test]
fn languages_split_on_slashes_and_semicolons() {
    let text = "Maria Lopez\n\nLANGUAGES\nSpanish / English; Portuguese (Basic)\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.languages, vec!["Spanish", "English", "Portuguese"]);
}

#[test]
fn multiline_languages_keep_one_entry_per_line() {
    let text = "Maria Lopez\n\nLANGUAGES\n- Spanish (Native)\n- English (Advanced)\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.languages, vec!["Spanish", "English"]);
}

#[test]
fn experience_sums_date_ranges_in_the_experience_section() {
    let profile = extractor().extract(STRONG_CV);
    assert_eq!(profile.experience_years, 6);
}

#[test]
fn overlapping_ranges_are_summed_without_deduplication() {
    let text = "Maria Lopez\n\nEXPERIENCE\nInitech 2010-2020\nSide project 2015-2021\n";
    let profile = extractor().extract(text);
    // 10 + 6, overlap intentionally not deduplicated.
    assert_eq!(profile.experience_years, 16);
}

#[test]
fn out_of_order_ranges_contribute_nothing() {
    // The reversed range is skipped; the earliest-year fallback then kicks in.
    let text = "Maria Lopez\n\nEXPERIENCE\nTypo range 2020-2010\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.experience_years, (REFERENCE_YEAR - 2010) as u32);
}

#[test]
fn spans_over_fifty_years_are_discarded() {
    let text = "Maria Lopez\n\nEXPERIENCE\nScanning artifact 1900-2000\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.experience_years, 0);
}

#[test]
fn stated_years_phrase_is_the_first_fallback() {
    let profile = extractor().extract(WEAK_CV);
    assert_eq!(profile.experience_years, 3);
}

#[test]
fn stated_years_above_fifty_are_discarded() {
    let text = "Maria Lopez\n\n80 years of experience\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.experience_years, 0);
}

#[test]
fn earliest_year_fallback_uses_the_reference_year() {
    let text = "Maria Lopez\n\nEXPERIENCE\nShipping software since 2015\n";
    let profile = extractor().extract(text);
    assert_eq!(profile.experience_years, (REFERENCE_YEAR - 2015) as u32);
}

#[test]
fn garbled_text_yields_defaults_not_errors() {
    let profile = extractor().extract("%$#@@@@!!!\u{0}\u{7}▒▒▒ 42");
    assert_eq!(profile.name, "%$#@@@@!!!\u{0}\u{7}▒▒▒ 42");
    assert_eq!(profile.email, "");
    assert!(profile.skills.is_empty());
    assert!(profile.languages.is_empty());
    assert_eq!(profile.experience_years, 0);
}
