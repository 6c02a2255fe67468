//! Worksheet naming rules.

use std::collections::HashSet;

/// Longest worksheet name a spreadsheet accepts.
pub const MAX_SHEET_NAME: usize = 31;

const INVALID: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Makes `name` a legal worksheet name.
///
/// Invalid characters become `_`, leading and trailing apostrophes are
/// dropped and the result is cut to [`MAX_SHEET_NAME`] characters. Blank
/// names become `Sheet`.
#[must_use]
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if INVALID.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim().trim_matches('\'');
    let cut: String = trimmed.chars().take(MAX_SHEET_NAME).collect();
    let cut = cut.trim_end_matches('\'').to_string();
    if cut.is_empty() {
        "Sheet".to_string()
    } else {
        cut
    }
}

/// Hands out sanitized names, unique ignoring case.
#[derive(Debug, Default)]
pub(crate) struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    pub(crate) fn claim(&mut self, name: &str) -> String {
        let base = sanitize_sheet_name(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.taken.insert(candidate.to_lowercase()) {
            let suffix = format!("~{n}");
            let keep = MAX_SHEET_NAME - suffix.chars().count();
            candidate = format!("{}{suffix}", base.chars().take(keep).collect::<String>());
            n += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_sheet_name("by_asset_class"), "by_asset_class");
        assert_eq!(sanitize_sheet_name("Rating (S&P/Moody's)"), "Rating (S&P_Moody's)");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(sanitize_sheet_name("  "), "Sheet");
        assert_eq!(sanitize_sheet_name("[*?]"), "____");

        let long = "a".repeat(40);
        assert_eq!(sanitize_sheet_name(&long).chars().count(), MAX_SHEET_NAME);
    }

    #[test]
    fn test_claim_is_unique_ignoring_case() {
        let mut names = SheetNames::default();
        assert_eq!(names.claim("Summary"), "Summary");
        assert_eq!(names.claim("summary"), "summary~2");
        assert_eq!(names.claim("SUMMARY"), "SUMMARY~3");

        let long = "x".repeat(35);
        let first = names.claim(&long);
        let second = names.claim(&long);
        assert_eq!(first.len(), 31);
        assert_eq!(second.len(), 31);
        assert!(second.ends_with("~2"));
    }
}
