//! Wildcard ignore patterns.
//!
//! `*` matches any run of characters (including `/`), `?` matches exactly one
//! character, everything else matches literally. Matching is case-sensitive
//! and anchored to the whole relative path.

use regex::Regex;

use crate::error::{TreeError, TreeResult};

#[derive(Clone, Debug)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> TreeResult<Self> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push_str("(?s)^");
        let mut buf = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|source| TreeError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Compile every pattern, failing on the first invalid one.
    pub fn compile_all<S: AsRef<str>>(patterns: &[S]) -> TreeResult<Vec<Self>> {
        patterns.iter().map(|p| Self::new(p.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, path: &str) -> bool {
        WildcardPattern::new(pattern).unwrap().matches(path)
    }

    #[test]
    fn star_spans_separators() {
        assert!(matches("*.log", "build.log"));
        assert!(matches("*.log", "logs/2024/build.log"));
        assert!(matches("target*", "target/debug/app"));
    }

    #[test]
    fn question_mark_is_one_char() {
        assert!(matches("file?.txt", "file1.txt"));
        assert!(!matches("file?.txt", "file.txt"));
        assert!(!matches("file?.txt", "file12.txt"));
    }

    #[test]
    fn match_is_anchored() {
        assert!(matches("build", "build"));
        assert!(!matches("build", "build/out"));
        assert!(!matches("build", "rebuild"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("a+b(1).txt", "a+b(1).txt"));
        assert!(!matches("a.txt", "abtxt"));
        assert!(matches("[x]", "[x]"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!matches("*.LOG", "build.log"));
    }

    #[test]
    fn compile_all_keeps_sources() {
        let patterns = WildcardPattern::compile_all(&["*.tmp", "cache/*"]).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[1].as_str(), "cache/*");
    }
}
