//! String-level convenience wrapper around compile and [`Matcher`].

use std::sync::Arc;

use crate::pattern::{
    CompileOptions, CompiledPattern, MatchResult, Matcher, PatternError, ScanMode, compile, unit,
};

/// A compiled pattern together with its own matcher.
#[derive(Debug, Clone)]
pub struct Regex {
    matcher: Matcher,
}

impl Regex {
    pub fn new(pattern: &str, options: CompileOptions) -> Result<Self, PatternError> {
        let compiled = Arc::new(compile(pattern, options)?);
        Ok(Self {
            matcher: Matcher::new(compiled),
        })
    }

    pub fn pattern(&self) -> &Arc<CompiledPattern> {
        self.matcher.pattern()
    }

    pub fn matcher(&mut self) -> &mut Matcher {
        &mut self.matcher
    }

    pub fn is_match(&mut self, text: &str) -> bool {
        self.find(text, 0).is_some()
    }

    /// Leftmost match at or after code-unit offset `start`.
    pub fn find(&mut self, text: &str, start: usize) -> Option<MatchResult> {
        let units = unit::encode(text);
        self.find_units(&units, start)
    }

    pub fn find_units(&mut self, units: &[u16], start: usize) -> Option<MatchResult> {
        self.matcher.exec(units, start, units.len(), 0, ScanMode::Scan)
    }

    /// Every non-overlapping match, left to right. When a match does not
    /// end past the offset it was searched from (an empty match, or one
    /// pulled back by `\M` in a lookbehind) the search resumes one unit on.
    pub fn find_all(&mut self, text: &str) -> Vec<MatchResult> {
        let units = unit::encode(text);
        self.find_all_units(&units)
    }

    pub fn find_all_units(&mut self, units: &[u16]) -> Vec<MatchResult> {
        let mut found = Vec::new();
        let mut start = 0;
        while start <= units.len() {
            let Some(m) = self.find_units(units, start) else {
                break;
            };
            start = if m.end() > start { m.end() } else { start + 1 };
            found.push(m);
        }
        found
    }

    /// Attach `other`'s last match over `source` for `\y` and `\Y`.
    pub fn attach_back_reference_from(&mut self, other: &Regex, source: &[u16]) {
        let names = other.pattern().names().clone();
        self.matcher
            .attach_back_reference(source, other.matcher.captures(), &names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern, CompileOptions::default()).unwrap()
    }

    #[test]
    fn find_returns_leftmost() {
        let m = re("b+").find("abbcb", 0).unwrap();
        assert_eq!(m.range(), 1..3);
        let m = re("b+").find("abbcb", 3).unwrap();
        assert_eq!(m.range(), 4..5);
    }

    #[test]
    fn find_all_skips_past_empty_matches() {
        let spans: Vec<_> = re("x*").find_all("axxb").iter().map(|m| m.range()).collect();
        assert_eq!(spans, [0..0, 1..3, 3..3, 4..4]);
    }

    #[test]
    fn find_all_advances_past_matches_behind_the_start() {
        let spans: Vec<_> = re(r"(?#1\M)")
            .find_all("ab")
            .iter()
            .map(|m| m.range())
            .collect();
        assert_eq!(spans, [0..0, 0..0, 1..1]);
    }

    #[test]
    fn find_all_words() {
        let spans: Vec<_> = re(r"\w+")
            .find_all("one, two three")
            .iter()
            .map(|m| m.range())
            .collect();
        assert_eq!(spans, [0..3, 5..8, 9..14]);
    }

    #[test]
    fn chained_back_reference() {
        let mut open = re(r"<<(?{tag}\w+)");
        let mut close = re(r"\y{tag}>>");
        let text = unit::encode("<<EOF body EOF>>");
        assert!(open.find_units(&text, 0).is_some());
        close.attach_back_reference_from(&open, &text);
        let m = close.find_units(&text, 0).unwrap();
        assert_eq!(m.range(), 11..16);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(Regex::new("a{2", CompileOptions::default()).is_err());
    }
}
