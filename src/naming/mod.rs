//! Turns raw company names into names Excel accepts as sheet titles.

/// Excel refuses sheet names longer than this many characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// Length kept from an over-long name before [`ELLIPSIS`] is appended.
pub const TRUNCATED_NAME_LEN: usize = 28;
pub const ELLIPSIS: &str = "...";
/// Characters Excel forbids in sheet names.
pub const FORBIDDEN_CHARS: [char; 7] = ['\\', '/', '?', '*', '[', ']', ':'];

const PLACEHOLDER_PREFIX: &str = "Company_Without_Name_";

/// Resolves the sheet-safe company name for a header.
///
/// `known_companies` is the number of groups created so far in the run; it
/// numbers the placeholder used when nothing survives sanitisation. Two
/// headers that clean up to the same text resolve to the same name and so
/// share a sheet.
pub fn resolve_company_name(raw: &str, known_companies: usize) -> String {
    let cleaned = sanitize(raw);
    let name = if cleaned.is_empty() {
        format!("{PLACEHOLDER_PREFIX}{}", known_companies + 1)
    } else {
        cleaned
    };
    truncate(name)
}

/// Removes the forbidden characters and trims surrounding whitespace.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !FORBIDDEN_CHARS.contains(ch))
        .collect::<String>()
        .trim()
        .to_string()
}

fn truncate(name: String) -> String {
    if name.chars().count() <= MAX_SHEET_NAME_LEN {
        return name;
    }
    let mut short: String = name.chars().take(TRUNCATED_NAME_LEN).collect();
    short.push_str(ELLIPSIS);
    short
}
