//! Experience-year estimation with a three-step fallback chain.
//!
//! Individual spans above [`MAX_PLAUSIBLE_SPAN`] are treated as OCR or typo
//! noise and discarded. Overlapping or out-of-order date ranges are summed
//! as-is; the overstatement is a documented heuristic limitation.

use super::sections;

const MAX_PLAUSIBLE_SPAN: u32 = 50;

const EXPERIENCE_END_LABELS: &[&str] = &["SKILLS", "EDUCATION", "LANGUAGES"];

pub(crate) fn extract_years(text: &str, reference_year: i32) -> u32 {
    let scope = experience_scope(text);

    let mut total: u32 = 0;
    for (start, end) in year_ranges(scope) {
        if end >= start {
            let span = end - start;
            if span <= MAX_PLAUSIBLE_SPAN {
                total += span;
            }
        }
    }

    if total == 0 {
        if let Some(stated) = stated_experience_years(text) {
            if stated <= MAX_PLAUSIBLE_SPAN {
                total = stated;
            }
        }
    }

    if total == 0 {
        if let Some(earliest) = earliest_plausible_year(scope) {
            let span = reference_year - earliest;
            if span > 0 && span as u32 <= MAX_PLAUSIBLE_SPAN {
                total = span as u32;
            }
        }
    }

    total
}

/// Narrow to the experience section when a heading exists; otherwise the
/// whole document is scanned.
fn experience_scope(text: &str) -> &str {
    let section = sections::section(text, "EXPERIENCE", EXPERIENCE_END_LABELS);
    if section.is_empty() {
        text
    } else {
        section
    }
}

/// All `YYYY-YYYY` ranges (hyphen, en dash, or em dash separated).
fn year_ranges(text: &str) -> Vec<(u32, u32)> {
    let chars: Vec<char> = text.chars().collect();
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let Some((first, after_first)) = read_year(&chars, i) else {
            i += 1;
            continue;
        };

        let mut j = after_first;
        while j < chars.len() && chars[j] == ' ' {
            j += 1;
        }
        if j < chars.len() && matches!(chars[j], '-' | '–' | '—') {
            j += 1;
            while j < chars.len() && chars[j] == ' ' {
                j += 1;
            }
            if let Some((second, after_second)) = read_year(&chars, j) {
                ranges.push((first, second));
                i = after_second;
                continue;
            }
        }
        i = after_first;
    }
    ranges
}

/// A standalone four-digit number at `at`; longer digit runs are skipped.
fn read_year(chars: &[char], at: usize) -> Option<(u32, usize)> {
    if at + 4 > chars.len() {
        return None;
    }
    if at > 0 && chars[at - 1].is_ascii_digit() {
        return None;
    }
    if !chars[at..at + 4].iter().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if at + 4 < chars.len() && chars[at + 4].is_ascii_digit() {
        return None;
    }
    let value: u32 = chars[at..at + 4].iter().collect::<String>().parse().ok()?;
    Some((value, at + 4))
}

/// Matches "<N> years [of] [professional|work|industry] experience".
fn stated_experience_years(text: &str) -> Option<u32> {
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let Ok(number) = lower[digits_start..i].parse::<u32>() else {
            continue;
        };

        let mut rest = lower[i..].trim_start();
        rest = match rest.strip_prefix("years").or_else(|| rest.strip_prefix("year")) {
            Some(tail) => tail.trim_start(),
            None => continue,
        };
        if let Some(tail) = rest.strip_prefix("of") {
            rest = tail.trim_start();
        }
        for qualifier in ["professional", "work", "industry"] {
            if let Some(tail) = rest.strip_prefix(qualifier) {
                rest = tail.trim_start();
                break;
            }
        }
        if rest.starts_with("experience") {
            return Some(number);
        }
    }
    None
}

/// Earliest standalone 1900s/2000s year in scope.
fn earliest_plausible_year(text: &str) -> Option<i32> {
    let chars: Vec<char> = text.chars().collect();
    let mut earliest: Option<i32> = None;
    let mut i = 0;
    while i < chars.len() {
        if let Some((year, after)) = read_year(&chars, i) {
            if (1900..=2099).contains(&year) {
                let year = year as i32;
                earliest = Some(earliest.map_or(year, |current| current.min(year)));
            }
            i = after;
        } else {
            i += 1;
        }
    }
    earliest
}
