//! Capture slots and the named-group table.

use std::ops::Range;

/// Numbered capture slots, slot 0 being the whole match.
pub const NUMBERED_SLOTS: usize = 10;

/// Named capture slots, numbered independently of the numbered ones.
pub const NAMED_SLOTS: usize = 10;

/// One capture slot; `None` on either side means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Slot {
    pub fn range(&self) -> Option<Range<usize>> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(s..e),
            _ => None,
        }
    }
}

/// Capture state of one match attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureTable {
    pub numbered: [Slot; NUMBERED_SLOTS],
    pub named: [Slot; NAMED_SLOTS],
}

impl CaptureTable {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn group(&self, n: usize) -> Option<Range<usize>> {
        self.numbered.get(n).and_then(Slot::range)
    }

    pub fn named_group(&self, n: usize) -> Option<Range<usize>> {
        self.named.get(n).and_then(Slot::range)
    }
}

/// Names of the `(?{name}...)` groups of one pattern, indexed by named
/// slot, plus the `\y{name}` references that were left for match time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedGroupTable {
    names: Vec<String>,
    unresolved: Vec<String>,
}

impl NamedGroupTable {
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| u8::try_from(i).ok())
    }

    pub fn name(&self, slot: u8) -> Option<&str> {
        self.names.get(usize::from(slot)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as u8, n.as_str()))
    }

    /// Names referenced by cross-pattern back-references but not defined
    /// locally.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Slot for `name`, allocating one if there is room. A repeated name
    /// reuses its slot.
    pub(crate) fn define(&mut self, name: &str) -> Option<u8> {
        if let Some(slot) = self.lookup(name) {
            return Some(slot);
        }
        if self.names.len() >= NAMED_SLOTS {
            return None;
        }
        self.names.push(name.to_string());
        u8::try_from(self.names.len() - 1).ok()
    }

    pub(crate) fn note_unresolved(&mut self, name: &str) {
        if !self.unresolved.iter().any(|n| n == name) {
            self.unresolved.push(name.to_string());
        }
    }
}

/// A successful match: the whole-match range and every capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    captures: CaptureTable,
}

impl MatchResult {
    /// Only built from a table whose slot 0 is set.
    pub(crate) fn new(captures: CaptureTable) -> Option<Self> {
        captures.group(0).map(|_| Self { captures })
    }

    pub fn range(&self) -> Range<usize> {
        self.captures.group(0).unwrap_or_default()
    }

    pub fn start(&self) -> usize {
        self.range().start
    }

    pub fn end(&self) -> usize {
        self.range().end
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    pub fn group(&self, n: usize) -> Option<Range<usize>> {
        self.captures.group(n)
    }

    pub fn named_group(&self, n: usize) -> Option<Range<usize>> {
        self.captures.named_group(n)
    }

    /// Numbered groups 1 to 9.
    pub fn groups(&self) -> impl Iterator<Item = Option<Range<usize>>> + '_ {
        (1..NUMBERED_SLOTS).map(|n| self.group(n))
    }

    pub fn captures(&self) -> &CaptureTable {
        &self.captures
    }
}
