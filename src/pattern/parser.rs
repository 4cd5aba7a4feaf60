//! Recursive descent compiler for Colorer pattern strings.

use log::{debug, warn};
use phf::phf_map;
use thiserror::Error;

use super::alternation::{Item, restructure};
use super::ast::*;
use super::captures::{NUMBERED_SLOTS, NamedGroupTable};
use super::char_class::CharClass;
use super::unit;

/// Why a pattern failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    #[error("unclosed group")]
    UnclosedGroup,
    #[error("unbalanced ')'")]
    UnbalancedGroup,
    #[error("invalid group construct")]
    InvalidGroup,
    #[error("unclosed character class")]
    UnclosedClass,
    #[error("incomplete escape")]
    IncompleteEscape,
    #[error("invalid escape")]
    InvalidEscape,
    #[error("invalid character range")]
    InvalidRange,
    #[error("unknown group name {0:?}")]
    UnknownGroupName(String),
    #[error("malformed quantifier")]
    MalformedQuantifier,
    #[error("character class member outside the basic multilingual plane")]
    NonBmpClassMember,
}

/// A compile error with the character index in the pattern where it was
/// detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct PatternError {
    pub kind: PatternErrorKind,
    pub position: usize,
}

/// Flags that change how a pattern is compiled and matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub ignore_case: bool,
    /// `^` and `$` also match next to line terminators.
    pub multiline: bool,
    /// `.` also matches line terminators.
    pub single_line: bool,
    /// Whitespace between atoms is ignored.
    pub extended: bool,
}

impl CompileOptions {
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    pub fn multiline(mut self, yes: bool) -> Self {
        self.multiline = yes;
        self
    }

    pub fn single_line(mut self, yes: bool) -> Self {
        self.single_line = yes;
        self
    }

    pub fn extended(mut self, yes: bool) -> Self {
        self.extended = yes;
        self
    }
}

/// Escape letters that compile to a metasymbol outside classes.
static META_ESCAPES: phf::Map<char, MetaSymbol> = phf_map! {
    'd' => MetaSymbol::Digit,
    'D' => MetaSymbol::NotDigit,
    'w' => MetaSymbol::Word,
    'W' => MetaSymbol::NotWord,
    's' => MetaSymbol::Space,
    'S' => MetaSymbol::NotSpace,
    'u' => MetaSymbol::Upper,
    'l' => MetaSymbol::Lower,
    'b' => MetaSymbol::WordBoundary,
    'B' => MetaSymbol::NotWordBoundary,
    'c' => MetaSymbol::PrecededByNonLetter,
    'm' => MetaSymbol::MatchStart,
    'M' => MetaSymbol::MatchEnd,
};

/// Single-letter escapes standing for one control character.
fn control_escape(c: char) -> Option<u16> {
    match c {
        't' => Some(0x09),
        'n' => Some(0x0a),
        'r' => Some(0x0d),
        'f' => Some(0x0c),
        'a' => Some(0x07),
        'e' => Some(0x1b),
        _ => None,
    }
}

/// Compile `pattern` into an operation tree.
pub fn compile(pattern: &str, options: CompileOptions) -> Result<CompiledPattern, PatternError> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
        options,
        arena: Arena::default(),
        names: NamedGroupTable::default(),
        next_group: 1,
    };
    let body = parser.parse_sequence(false)?;
    let root = parser.arena.alloc(Op::Group {
        body,
        capture: Capture::Numbered(0),
    });
    parser.arena.adopt(body, root);

    let prefilter = prefilter(&parser.arena, body, options);
    let nodes = parser.arena.into_nodes();
    debug!(
        "compiled {pattern:?}: {} nodes, {} numbered groups, {} named groups",
        nodes.len(),
        parser.next_group - 1,
        parser.names.len()
    );
    Ok(CompiledPattern {
        nodes,
        root,
        names: parser.names,
        options,
        prefilter,
    })
}

fn prefilter(arena: &Arena, first: NodeId, options: CompileOptions) -> Prefilter {
    match arena.node(first).op {
        Op::Literal(unit) => Prefilter::Literal {
            unit,
            ignore_case: options.ignore_case,
        },
        Op::Meta(m @ (MetaSymbol::LineStart | MetaSymbol::SchemeStart)) => Prefilter::Anchor(m),
        _ => Prefilter::None,
    }
}

/// One member of a `[...]` class before it is added to the bitmap.
enum ClassMember {
    Unit(u16),
    Set(CharClass),
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    options: CompileOptions,
    arena: Arena,
    names: NamedGroupTable,
    next_group: u8,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, kind: PatternErrorKind, position: usize) -> PatternError {
        PatternError { kind, position }
    }

    /// Parse atoms up to the end of input, or up to and including the `)`
    /// closing the current group.
    fn parse_sequence(&mut self, in_group: bool) -> Result<NodeId, PatternError> {
        let mut items = Vec::new();
        loop {
            if self.options.extended {
                while self.peek().is_some_and(char::is_whitespace) {
                    self.pos += 1;
                }
            }
            let start = self.pos;
            match self.peek() {
                None if in_group => {
                    return Err(self.error(PatternErrorKind::UnclosedGroup, start));
                }
                None => break,
                Some(')') if in_group => {
                    self.pos += 1;
                    break;
                }
                Some(')') => return Err(self.error(PatternErrorKind::UnbalancedGroup, start)),
                Some('|') => {
                    self.pos += 1;
                    items.push(Item::Bar);
                }
                Some('*' | '+' | '?' | '{') => items.push(self.parse_quantifier()?),
                Some(_) => items.push(Item::Atom(self.parse_atom()?)),
            }
        }
        Ok(restructure(&mut self.arena, items))
    }

    fn parse_quantifier(&mut self) -> Result<Item, PatternError> {
        let start = self.pos;
        let (min, max) = match self.bump() {
            Some('*') => (0, None),
            Some('+') => (1, None),
            Some('?') => (0, Some(1)),
            _ => self.parse_bounds(start)?,
        };
        let lazy = self.eat('?');
        Ok(Item::Quantifier { min, max, lazy })
    }

    /// Parse the rest of `{n}`, `{n,}` or `{n,m}` after the brace.
    fn parse_bounds(&mut self, start: usize) -> Result<(u32, Option<u32>), PatternError> {
        let malformed = || PatternError {
            kind: PatternErrorKind::MalformedQuantifier,
            position: start,
        };
        let min = self.parse_decimal().ok_or_else(malformed)?;
        let max = if self.eat(',') {
            if self.peek() == Some('}') {
                None
            } else {
                Some(self.parse_decimal().ok_or_else(malformed)?)
            }
        } else {
            Some(min)
        };
        if !self.eat('}') {
            return Err(malformed());
        }
        if let Some(max) = max
            && min > max
        {
            return Err(malformed());
        }
        Ok((min, max))
    }

    /// One or more decimal digits; `None` if there are none or on overflow.
    fn parse_decimal(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            value = Some(value.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
        }
        value
    }

    fn parse_atom(&mut self) -> Result<NodeId, PatternError> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error(PatternErrorKind::IncompleteEscape, start));
        };
        let op = match c {
            '(' => return self.parse_group(start),
            '[' => return self.parse_class(),
            '\\' => return self.parse_escape(start),
            '.' => Op::Meta(MetaSymbol::AnyChar),
            '^' if self.options.multiline => Op::Meta(MetaSymbol::LineStart),
            '^' | '~' => Op::Meta(MetaSymbol::SchemeStart),
            '$' => Op::Meta(MetaSymbol::LineEnd),
            _ => return Ok(self.literal(c)),
        };
        Ok(self.arena.alloc(op))
    }

    /// A literal node. Characters outside the BMP become a non-capturing
    /// group of their two surrogates so quantifiers apply to the pair.
    fn literal(&mut self, c: char) -> NodeId {
        let mut buf = [0u16; 2];
        match *c.encode_utf16(&mut buf) {
            [unit] => self.arena.alloc(Op::Literal(unit)),
            [hi, lo] => {
                let hi = self.arena.alloc(Op::Literal(hi));
                let lo = self.arena.alloc(Op::Literal(lo));
                let body = self.arena.link(&[hi, lo]).unwrap_or(hi);
                let group = self.arena.alloc(Op::Group {
                    body,
                    capture: Capture::None,
                });
                self.arena.adopt(body, group);
                group
            }
            _ => unreachable!("a char is one or two UTF-16 units"),
        }
    }

    fn parse_group(&mut self, start: usize) -> Result<NodeId, PatternError> {
        enum Kind {
            Group(Capture),
            Look(Lookaround),
        }

        let kind = if self.eat('?') {
            let at = self.pos;
            match self.bump() {
                Some(':') => Kind::Group(Capture::None),
                Some('=') => Kind::Look(Lookaround::Ahead),
                Some('!') => Kind::Look(Lookaround::NotAhead),
                Some('#') => {
                    let n = self.parse_lookbehind_len(at)?;
                    Kind::Look(Lookaround::Behind(n))
                }
                Some('~') => {
                    let n = self.parse_lookbehind_len(at)?;
                    Kind::Look(Lookaround::NotBehind(n))
                }
                Some('{') => {
                    let name = self
                        .parse_name_rest()
                        .ok_or_else(|| self.error(PatternErrorKind::InvalidGroup, at))?;
                    Kind::Group(self.named_capture(&name))
                }
                _ => return Err(self.error(PatternErrorKind::InvalidGroup, at)),
            }
        } else {
            Kind::Group(self.numbered_capture(start))
        };

        let body = self.parse_sequence(true)?;
        let op = match kind {
            Kind::Group(capture) => Op::Group { body, capture },
            Kind::Look(kind) => Op::Look { body, kind },
        };
        let id = self.arena.alloc(op);
        self.arena.adopt(body, id);
        Ok(id)
    }

    fn parse_lookbehind_len(&mut self, at: usize) -> Result<usize, PatternError> {
        self.parse_decimal()
            .map(|n| n as usize)
            .ok_or_else(|| self.error(PatternErrorKind::InvalidGroup, at))
    }

    fn numbered_capture(&mut self, start: usize) -> Capture {
        if usize::from(self.next_group) < NUMBERED_SLOTS {
            let n = self.next_group;
            self.next_group += 1;
            Capture::Numbered(n)
        } else {
            warn!("group at position {start} exceeds {NUMBERED_SLOTS} capture slots, not capturing");
            Capture::None
        }
    }

    fn named_capture(&mut self, name: &str) -> Capture {
        if name.is_empty() {
            return Capture::None;
        }
        match self.names.define(name) {
            Some(slot) => Capture::Named(slot),
            None => {
                warn!("named group {name:?} exceeds the named capture slots, not capturing");
                Capture::None
            }
        }
    }

    /// Read `name}` after an opening brace.
    fn parse_name_rest(&mut self) -> Option<String> {
        let len = self.chars[self.pos..].iter().position(|&c| c == '}')?;
        let name: String = self.chars[self.pos..self.pos + len].iter().collect();
        self.pos += len + 1;
        Some(name)
    }

    fn parse_escape(&mut self, start: usize) -> Result<NodeId, PatternError> {
        let Some(c) = self.bump() else {
            return Err(self.error(PatternErrorKind::IncompleteEscape, start));
        };
        if let Some(&meta) = META_ESCAPES.get(&c) {
            return Ok(self.arena.alloc(Op::Meta(meta)));
        }
        let op = match c {
            'p' => {
                if !self.eat('{') {
                    return Err(self.error(PatternErrorKind::InvalidEscape, start));
                }
                let name = self
                    .parse_name_rest()
                    .ok_or_else(|| self.error(PatternErrorKind::InvalidEscape, start))?;
                match self.names.lookup(&name) {
                    Some(slot) => Op::NamedBackRef(slot),
                    None => {
                        return Err(self.error(PatternErrorKind::UnknownGroupName(name), start));
                    }
                }
            }
            'y' | 'Y' => Op::CrossRef {
                target: self.parse_cross_target(start)?,
                ignore_case: c == 'Y',
            },
            '1'..='9' if !self.peek().is_some_and(is_octal) || c > '7' => {
                Op::BackRef(c as u8 - b'0')
            }
            _ => Op::Literal(self.escaped_unit(c, start)?),
        };
        Ok(self.arena.alloc(op))
    }

    fn parse_cross_target(&mut self, start: usize) -> Result<CrossTarget, PatternError> {
        if self.eat('{') {
            let name = self
                .parse_name_rest()
                .ok_or_else(|| self.error(PatternErrorKind::InvalidEscape, start))?;
            return Ok(match self.names.lookup(&name) {
                Some(slot) => CrossTarget::Named(slot),
                None => {
                    self.names.note_unresolved(&name);
                    CrossTarget::Unresolved(name)
                }
            });
        }
        match self.bump().and_then(|c| c.to_digit(10)) {
            Some(d) => Ok(CrossTarget::Numbered(d as u8)),
            None => Err(self.error(PatternErrorKind::InvalidEscape, start)),
        }
    }

    /// The code unit denoted by the escape `\c`, with `c` already consumed.
    /// Shared by atoms and class members.
    fn escaped_unit(&mut self, c: char, start: usize) -> Result<u16, PatternError> {
        if let Some(unit) = control_escape(c) {
            return Ok(unit);
        }
        match c {
            'x' => self.parse_hex(start),
            '0'..='7' => Ok(self.parse_octal(c)),
            _ => {
                let mut buf = [0u16; 2];
                match *c.encode_utf16(&mut buf) {
                    [unit] => Ok(unit),
                    _ => Err(self.error(PatternErrorKind::InvalidEscape, start)),
                }
            }
        }
    }

    fn parse_hex(&mut self, start: usize) -> Result<u16, PatternError> {
        let invalid = PatternError {
            kind: PatternErrorKind::InvalidEscape,
            position: start,
        };
        let braced = self.eat('{');
        let mut value: u32 = 0;
        let mut digits = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
            if (!braced && digits == 2) || digits == 4 {
                break;
            }
            self.pos += 1;
            value = value * 16 + d;
            digits += 1;
        }
        let well_formed = if braced {
            digits > 0 && self.eat('}')
        } else {
            digits == 2
        };
        if !well_formed {
            return Err(invalid);
        }
        u16::try_from(value).map_err(|_| invalid)
    }

    /// Up to three octal digits starting with `first`, capped at 255.
    fn parse_octal(&mut self, first: char) -> u16 {
        let mut value = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    self.pos += 1;
                    value = value * 8 + d;
                }
                None => break,
            }
        }
        value.min(255) as u16
    }

    fn parse_class(&mut self) -> Result<NodeId, PatternError> {
        let (set, negated) = self.parse_class_body()?;
        Ok(self.arena.alloc(Op::Class {
            set: Box::new(set),
            negated,
        }))
    }

    /// Parse a class after its `[` up to and including the `]`.
    fn parse_class_body(&mut self) -> Result<(CharClass, bool), PatternError> {
        let negated = self.eat('^');
        let mut set = CharClass::new();
        loop {
            let at = self.pos;
            let Some(c) = self.peek() else {
                return Err(self.error(PatternErrorKind::UnclosedClass, at));
            };
            match c {
                ']' => {
                    self.pos += 1;
                    break;
                }
                '[' => {
                    self.pos += 1;
                    set.union(&self.parse_nested_class()?);
                }
                '&' if self.peek_at(1) == Some('&') && self.peek_at(2) == Some('[') => {
                    self.pos += 3;
                    set.intersect(&self.parse_nested_class()?);
                }
                '-' if self.peek_at(1) == Some('[') => {
                    self.pos += 2;
                    set.subtract(&self.parse_nested_class()?);
                }
                _ => match self.parse_class_member()? {
                    ClassMember::Set(other) => set.union(&other),
                    ClassMember::Unit(lo) => {
                        if self.peek() == Some('-')
                            && !matches!(self.peek_at(1), None | Some(']' | '['))
                        {
                            self.pos += 1;
                            let hi = match self.parse_class_member()? {
                                ClassMember::Unit(hi) if lo <= hi => hi,
                                _ => return Err(self.error(PatternErrorKind::InvalidRange, at)),
                            };
                            self.add_range(&mut set, lo, hi);
                        } else {
                            self.add_range(&mut set, lo, lo);
                        }
                    }
                },
            }
        }
        Ok((set, negated))
    }

    fn parse_nested_class(&mut self) -> Result<CharClass, PatternError> {
        let (mut set, negated) = self.parse_class_body()?;
        if negated {
            set.negate();
        }
        Ok(set)
    }

    fn parse_class_member(&mut self) -> Result<ClassMember, PatternError> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error(PatternErrorKind::UnclosedClass, start));
        };
        if c != '\\' {
            let mut buf = [0u16; 2];
            return match *c.encode_utf16(&mut buf) {
                [unit] => Ok(ClassMember::Unit(unit)),
                _ => Err(self.error(PatternErrorKind::NonBmpClassMember, start)),
            };
        }
        let Some(e) = self.bump() else {
            return Err(self.error(PatternErrorKind::UnclosedClass, self.pos));
        };
        let (pred, complement): (fn(u16) -> bool, bool) = match e {
            'd' => (unit::is_digit, false),
            'D' => (unit::is_digit, true),
            'w' => (unit::is_word, false),
            'W' => (unit::is_word, true),
            's' => (unit::is_space, false),
            'S' => (unit::is_space, true),
            'u' => (unit::is_upper, false),
            'l' => (unit::is_lower, false),
            // Inside a class `\b` is backspace.
            'b' => return Ok(ClassMember::Unit(0x08)),
            _ => return self.escaped_unit(e, start).map(ClassMember::Unit),
        };
        let mut set = CharClass::from_predicate(pred);
        if complement {
            set.negate();
        }
        Ok(ClassMember::Set(set))
    }

    fn add_range(&self, set: &mut CharClass, lo: u16, hi: u16) {
        set.add_range(lo, hi);
        if self.options.ignore_case {
            for c in lo..=hi {
                set.add_char(unit::to_lower(c));
                set.add_char(unit::to_upper(c));
            }
        }
    }
}

fn is_octal(c: char) -> bool {
    c.is_digit(8)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dump(s: &str) -> String {
        compile(s, CompileOptions::default())
            .unwrap_or_else(|e| panic!("{s:?}: {e}"))
            .dump()
    }

    fn err(s: &str) -> PatternError {
        compile(s, CompileOptions::default()).unwrap_err()
    }

    fn kind(s: &str) -> PatternErrorKind {
        err(s).kind
    }

    fn first_op(s: &str) -> Op {
        let p = compile(s, CompileOptions::default()).unwrap();
        let Op::Group { body, .. } = p.node(p.root()).op else {
            panic!("root is not a group");
        };
        p.node(body).op.clone()
    }

    // --- Literals ---

    #[test]
    fn literal_sequence() {
        assert_eq!(dump("ab"), "group #0\n  lit 'a'\n  lit 'b'\n");
    }

    #[test]
    fn empty_pattern_is_empty_node() {
        assert_eq!(dump(""), "group #0\n  empty\n");
    }

    #[test]
    fn non_bmp_literal_is_surrogate_pair_group() {
        assert_eq!(
            dump("😀+"),
            "group #0\n  repeat 1..inf\n    group\n      lit 0xd83d\n      lit 0xde00\n"
        );
    }

    #[test]
    fn control_escapes() {
        for (pat, unit) in [
            (r"\t", 0x09),
            (r"\n", 0x0a),
            (r"\r", 0x0d),
            (r"\f", 0x0c),
            (r"\a", 0x07),
            (r"\e", 0x1b),
        ] {
            assert!(matches!(first_op(pat), Op::Literal(u) if u == unit), "{pat}");
        }
    }

    #[test]
    fn hex_escapes() {
        assert!(matches!(first_op(r"\x41"), Op::Literal(0x41)));
        assert!(matches!(first_op(r"\x{263A}"), Op::Literal(0x263a)));
        assert_eq!(kind(r"\x4"), PatternErrorKind::InvalidEscape);
        assert_eq!(kind(r"\x{}"), PatternErrorKind::InvalidEscape);
        assert_eq!(kind(r"\x{12345}"), PatternErrorKind::InvalidEscape);
    }

    #[test]
    fn octal_and_backref_escapes() {
        assert!(matches!(first_op(r"\0"), Op::Literal(0)));
        assert!(matches!(first_op(r"\101"), Op::Literal(0x41)));
        assert!(matches!(first_op(r"\777"), Op::Literal(255)));
        assert!(matches!(first_op(r"\1"), Op::BackRef(1)));
        assert!(matches!(first_op(r"\9"), Op::BackRef(9)));
        assert!(matches!(first_op(r"\8a"), Op::BackRef(8)));
    }

    #[test]
    fn unknown_escape_is_literal() {
        assert!(matches!(first_op(r"\."), Op::Literal(0x2e)));
        assert!(matches!(first_op(r"\("), Op::Literal(0x28)));
    }

    // --- Anchors ---

    #[test]
    fn caret_depends_on_multiline() {
        assert!(matches!(first_op("^a"), Op::Meta(MetaSymbol::SchemeStart)));
        let p = compile("^a", CompileOptions::default().multiline(true)).unwrap();
        assert_eq!(p.dump(), "group #0\n  meta LineStart\n  lit 'a'\n");
        assert_eq!(p.prefilter(), Prefilter::Anchor(MetaSymbol::LineStart));
    }

    #[test]
    fn prefilter_on_leading_literal() {
        let p = compile("ab|c", CompileOptions::default()).unwrap();
        assert_eq!(p.prefilter(), Prefilter::None);
        let p = compile("xy", CompileOptions::default().ignore_case(true)).unwrap();
        assert_eq!(
            p.prefilter(),
            Prefilter::Literal {
                unit: 'x' as u16,
                ignore_case: true
            }
        );
    }

    // --- Groups ---

    #[test]
    fn group_kinds() {
        assert_eq!(
            dump("(a)(?:b)(?{n}c)(?=d)(?!e)(?#2f)(?~1g)"),
            "group #0\n  group #1\n    lit 'a'\n  group\n    lit 'b'\n  group {n}\n    lit 'c'\n  \
             look Ahead\n    lit 'd'\n  look NotAhead\n    lit 'e'\n  look Behind(2)\n    lit 'f'\n  \
             look NotBehind(1)\n    lit 'g'\n"
        );
    }

    #[test]
    fn empty_name_is_non_capturing() {
        assert_eq!(dump("(?{}a)"), "group #0\n  group\n    lit 'a'\n");
    }

    #[test]
    fn groups_past_the_cap_do_not_capture() {
        let p = compile("(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)", CompileOptions::default()).unwrap();
        let dumped = p.dump();
        assert!(dumped.contains("group #9\n    lit 'i'"));
        assert!(dumped.contains("  group\n    lit 'j'"));
    }

    #[test]
    fn duplicate_names_share_a_slot() {
        let p = compile("(?{x}a)(?{y}b)(?{x}c)", CompileOptions::default()).unwrap();
        assert_eq!(p.names().len(), 2);
        assert_eq!(p.names().lookup("y"), Some(1));
    }

    #[test]
    fn named_backref_resolves_locally() {
        assert_eq!(
            dump(r"(?{X}a)\p{X}"),
            "group #0\n  group {X}\n    lit 'a'\n  backref {X}\n"
        );
        assert_eq!(
            kind(r"\p{X}(?{X}a)"),
            PatternErrorKind::UnknownGroupName("X".to_string())
        );
    }

    #[test]
    fn cross_references() {
        let p = compile(r"(?{a}x)\y{a}\Y{b}\y3", CompileOptions::default()).unwrap();
        assert_eq!(
            p.dump(),
            "group #0\n  group {a}\n    lit 'x'\n  crossref y {a}\n  crossref Y {b}?\n  crossref y #3\n"
        );
        assert_eq!(p.names().unresolved(), ["b".to_string()]);
        assert_eq!(kind(r"\y"), PatternErrorKind::InvalidEscape);
        assert_eq!(kind(r"\y{abc"), PatternErrorKind::InvalidEscape);
    }

    // --- Alternation ---

    #[test]
    fn alternation_chain() {
        assert_eq!(
            dump("a|bc|d"),
            "group #0\n  or\n    lit 'a'\n  or\n    lit 'b'\n    lit 'c'\n  lit 'd'\n"
        );
    }

    #[test]
    fn alternation_is_scoped_by_groups() {
        assert_eq!(
            dump("x(a|b)*y"),
            "group #0\n  lit 'x'\n  repeat 0..inf\n    group #1\n      or\n        lit 'a'\n      \
             lit 'b'\n  lit 'y'\n"
        );
    }

    #[test]
    fn alternation_inside_lookahead() {
        assert_eq!(
            dump("(?=a|)"),
            "group #0\n  look Ahead\n    or\n      lit 'a'\n    empty\n"
        );
    }

    #[test]
    fn leading_and_trailing_bars() {
        assert_eq!(dump("|a"), "group #0\n  or\n    empty\n  lit 'a'\n");
        assert_eq!(dump("a|"), "group #0\n  or\n    lit 'a'\n  empty\n");
        assert_eq!(
            dump("a||b"),
            "group #0\n  or\n    lit 'a'\n  or\n    empty\n  lit 'b'\n"
        );
    }

    #[test]
    fn quantifier_after_bar_wraps_empty() {
        assert_eq!(
            dump("a|*"),
            "group #0\n  or\n    lit 'a'\n  repeat 0..inf\n    empty\n"
        );
    }

    // --- Quantifiers ---

    #[test]
    fn quantifier_forms() {
        assert_eq!(
            dump("a*b+?c?d{2}e{2,}f{2,5}?"),
            "group #0\n  repeat 0..inf\n    lit 'a'\n  repeat 1..inf lazy\n    lit 'b'\n  \
             repeat 0..1\n    lit 'c'\n  repeat 2..2\n    lit 'd'\n  repeat 2..inf\n    lit 'e'\n  \
             repeat 2..5 lazy\n    lit 'f'\n"
        );
    }

    #[test]
    fn malformed_quantifiers() {
        for pat in ["a{", "a{}", "a{,3}", "a{3,2}", "a{2", "a{x}", "a{99999999999}"] {
            assert_eq!(kind(pat), PatternErrorKind::MalformedQuantifier, "{pat}");
        }
        assert_eq!(err("ab{3,2}").position, 2);
    }

    // --- Classes ---

    #[test]
    fn class_members() {
        let Op::Class { set, negated } = first_op(r"[a-c\d_]") else {
            panic!("expected class");
        };
        assert!(!negated);
        assert!(set.contains('b' as u16));
        assert!(set.contains('7' as u16));
        assert!(set.contains('_' as u16));
        assert!(!set.contains('d' as u16));
    }

    #[test]
    fn class_trailing_dash_is_literal() {
        let Op::Class { set, .. } = first_op("[a-]") else {
            panic!("expected class");
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains('-' as u16));
    }

    #[test]
    fn class_set_algebra() {
        let Op::Class { set, .. } = first_op("[a-z-[aeiou]]") else {
            panic!("expected class");
        };
        assert!(!set.contains('e' as u16));
        assert!(set.contains('f' as u16));

        let Op::Class { set, .. } = first_op(r"[\w&&[^\d]]") else {
            panic!("expected class");
        };
        assert!(set.contains('q' as u16));
        assert!(!set.contains('3' as u16));

        let Op::Class { set, .. } = first_op("[x[0-2]]") else {
            panic!("expected class");
        };
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn class_ignore_case_duplicates() {
        let p = compile("[a-c]", CompileOptions::default().ignore_case(true)).unwrap();
        let Op::Group { body, .. } = p.node(p.root()).op else {
            panic!("root is not a group");
        };
        let Op::Class { set, .. } = &p.node(body).op else {
            panic!("expected class");
        };
        assert!(set.contains('B' as u16));
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn class_errors() {
        assert_eq!(kind("[c-a]"), PatternErrorKind::InvalidRange);
        assert_eq!(kind(r"[a-\d]"), PatternErrorKind::InvalidRange);
        assert_eq!(kind("[abc"), PatternErrorKind::UnclosedClass);
        assert_eq!(kind("[😀]"), PatternErrorKind::NonBmpClassMember);
    }

    // --- Errors ---

    #[test]
    fn unclosed_group_position() {
        assert_eq!(
            err("(a"),
            PatternError {
                kind: PatternErrorKind::UnclosedGroup,
                position: 2
            }
        );
        assert_eq!(err("(a").to_string(), "unclosed group at position 2");
    }

    #[test]
    fn group_errors() {
        assert_eq!(err("a)").kind, PatternErrorKind::UnbalancedGroup);
        assert_eq!(err("a)").position, 1);
        assert_eq!(kind("(?<a)"), PatternErrorKind::InvalidGroup);
        assert_eq!(kind("(?#a)"), PatternErrorKind::InvalidGroup);
        assert_eq!(kind("(?{abc"), PatternErrorKind::InvalidGroup);
    }

    #[test]
    fn trailing_backslash() {
        assert_eq!(
            err("ab\\"),
            PatternError {
                kind: PatternErrorKind::IncompleteEscape,
                position: 2
            }
        );
    }

    // --- Extended mode ---

    #[test]
    fn extended_skips_whitespace() {
        let p = compile("a b\n*", CompileOptions::default().extended(true)).unwrap();
        assert_eq!(p.dump(), "group #0\n  lit 'a'\n  repeat 0..inf\n    lit 'b'\n");
    }
}
