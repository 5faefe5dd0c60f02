use crate::error::{Result, TextFinderError};
use regex::Regex;

/// Optional second pattern used to pull a future build identifier out of
/// the scanned text.
///
/// The configured expression is expected to match a prefix or marker on
/// the line; the widened form (expression plus a match-rest-of-line
/// suffix) is what gets tested against each line, and the identifier
/// value is whatever remains after stripping every occurrence of the
/// original expression from the matched line.
#[derive(Debug, Clone)]
pub struct BuildIdPattern {
    original: Regex,
    widened: Regex,
}

impl BuildIdPattern {
    fn new(expr: &str) -> Result<Self> {
        let original = compile(expr)?;
        let widened = compile(&format!("{expr}.*"))?;
        Ok(Self { original, widened })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.widened.is_match(line)
    }

    /// Derives the identifier value from a line the widened pattern matched.
    pub fn derive(&self, line: &str) -> String {
        self.original.replace_all(line, "").into_owned()
    }

    pub fn as_str(&self) -> &str {
        self.original.as_str()
    }
}

/// Compiles the primary search expression.
pub fn compile(expr: &str) -> Result<Regex> {
    Regex::new(expr).map_err(|source| TextFinderError::InvalidPattern {
        pattern: expr.to_string(),
        source,
    })
}

/// Compiles the identifier expression; absent or blank input means no
/// identifier extraction.
pub fn compile_optional(expr: Option<&str>) -> Result<Option<BuildIdPattern>> {
    match expr.map(str::trim) {
        None | Some("") => Ok(None),
        Some(expr) => BuildIdPattern::new(expr).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_rejects_broken_expression() {
        let err = compile("*invalid[").unwrap_err();
        assert!(matches!(err, TextFinderError::InvalidPattern { .. }));
    }

    #[test]
    fn optional_is_absent_for_blank_input() {
        assert!(compile_optional(None).unwrap().is_none());
        assert!(compile_optional(Some("")).unwrap().is_none());
        assert!(compile_optional(Some("   ")).unwrap().is_none());
    }

    #[test]
    fn widened_pattern_matches_and_strips_marker() {
        let pattern = compile_optional(Some("^future name: ")).unwrap().unwrap();
        assert!(pattern.matches("future name: superId"));
        assert_eq!(pattern.derive("future name: superId"), "superId");
        assert!(!pattern.matches("unrelated line"));
    }
}
