//! Section slicing plus the small hand-rolled matchers for contact fields.

/// Returns the body between `start_label` (case-insensitive) and the nearest
/// following occurrence of any label in `end_labels`. Empty when the start
/// label is absent; runs to end of text when no later label is found.
pub(crate) fn section<'a>(text: &'a str, start_label: &str, end_labels: &[&str]) -> &'a str {
    let upper = text.to_ascii_uppercase();
    let start_upper = start_label.to_ascii_uppercase();
    let Some(start) = upper.find(&start_upper) else {
        return "";
    };

    let body_start = start + start_label.len();
    let body = &text[body_start..];
    let upper_body = &upper[body_start..];

    let cut = end_labels
        .iter()
        .filter_map(|label| upper_body.find(&label.to_ascii_uppercase()))
        .min();

    match cut {
        Some(position) => body[..position].trim(),
        None => body.trim(),
    }
}

/// Strips leading bullet glyphs and drops blank lines.
pub(crate) fn clean_bullets<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let stripped = line.trim().trim_start_matches(['-', '•', '*', '·']).trim();
            if stripped.is_empty() {
                None
            } else {
                Some(stripped.to_string())
            }
        })
        .collect()
}

/// One item per line, except a section collapsing to a single comma-separated
/// line which is split on commas.
pub(crate) fn itemized(section: &str) -> Vec<String> {
    let lines = clean_bullets(section.lines());
    if lines.len() == 1 && lines[0].contains(',') {
        return lines[0]
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
    }
    lines
}

/// Language sections additionally shed proficiency parentheticals and accept
/// a single delimiter-separated line.
pub(crate) fn language_list(section: &str) -> Vec<String> {
    let lines = clean_bullets(section.lines());
    if lines.len() == 1 {
        return split_language_line(&lines[0]);
    }

    lines
        .iter()
        .map(|line| strip_parenthetical(line))
        .filter(|language| !language.is_empty())
        .collect()
}

fn split_language_line(line: &str) -> Vec<String> {
    line.split([',', '/', '•', ';'])
        .flat_map(split_on_and)
        .map(|piece| strip_parenthetical(piece.trim()))
        .filter(|language| !language.is_empty())
        .collect()
}

fn split_on_and(piece: &str) -> Vec<String> {
    let lower = piece.to_ascii_lowercase();
    let mut parts = Vec::new();
    let mut rest = piece;
    let mut rest_lower = lower.as_str();
    while let Some(position) = rest_lower.find(" and ") {
        parts.push(rest[..position].to_string());
        rest = &rest[position + 5..];
        rest_lower = &rest_lower[position + 5..];
    }
    parts.push(rest.to_string());
    parts
}

fn strip_parenthetical(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// First `local@domain.tld`-shaped substring, or the empty string.
pub(crate) fn find_email(text: &str) -> String {
    let bytes = text.as_bytes();
    for (at, _) in text.match_indices('@') {
        let mut start = at;
        while start > 0 && is_local_byte(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = at + 1;
        while end < bytes.len() && is_domain_byte(bytes[end]) {
            end += 1;
        }

        let local = &text[start..at];
        let domain = text[at + 1..end].trim_end_matches('.');
        if local.is_empty() || domain.is_empty() {
            continue;
        }
        let Some(dot) = domain.rfind('.') else {
            continue;
        };
        let tld = &domain[dot + 1..];
        if dot > 0 && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()) {
            return format!("{local}@{domain}");
        }
    }
    String::new()
}

fn is_local_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_domain_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-')
}

/// First digit-heavy run (optional leading `+`, spaces, hyphens, parentheses)
/// containing at least eight digits, or the empty string.
pub(crate) fn find_phone(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let run_start = i;
        let mut j = i;
        if bytes[j] == b'+' {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            let mut end = j;
            while end < bytes.len() && is_phone_byte(bytes[end]) {
                end += 1;
            }
            let digits = bytes[run_start..end]
                .iter()
                .filter(|b| b.is_ascii_digit())
                .count();
            if digits >= 8 {
                return text[run_start..end].trim().to_string();
            }
            i = end;
        } else {
            i += 1;
        }
    }
    String::new()
}

fn is_phone_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b' ' | b'-' | b'(' | b')')
}
