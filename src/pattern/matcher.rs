//! Backtracking matcher: runs a [`CompiledPattern`] over UTF-16 text.
//!
//! The tree is walked without native recursion. A cursor names the current
//! node and whether it is being entered from above or returned to after its
//! child chain finished. Every choice point pushes a [`Frame`] holding the
//! cursor to resume and two continuations, one for when the rest of the
//! match succeeds and one for when it fails. The order in which each node
//! kind tries its choices is what makes quantifiers greedy or lazy and
//! alternation left-biased.
//!
//! All positions are code-unit indices into the input slice.

use std::sync::Arc;

use log::{debug, trace};

use super::ast::*;
use super::captures::{CaptureTable, MatchResult, NamedGroupTable, Slot};
use super::parser::CompileOptions;
use super::unit;

/// Whether [`Matcher::exec`] may slide the start offset forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Only try a match at the start offset.
    Anchored,
    /// Try every offset from start to end, returning the leftmost match.
    Scan,
}

/// Captures and text of another pattern's match, used by `\y` and `\Y`.
#[derive(Debug, Clone)]
struct BackReference {
    text: Vec<u16>,
    captures: CaptureTable,
    names: NamedGroupTable,
}

/// Per-node state of the current `exec` call.
#[derive(Debug, Clone, Copy, Default)]
struct Scratch {
    /// Offset where a group was entered.
    start: usize,
    /// Mandatory repetitions still to do.
    counter: u32,
    /// Optional repetitions still allowed.
    spare: u32,
    /// Offset of the last unbounded repetition, for the empty-loop guard.
    last: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: Option<NodeId>,
    pos: usize,
    /// True when entering `node` from above, false when returning to it.
    entering: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Fail,
    Succeed,
    /// Continue after the saved node.
    Proceed,
    /// A greedy `{n,m}` extra repetition failed: continue after the node.
    GreedyBoundedStop,
    /// Give back the repetition taken by `GreedyBoundedStop`, then fail.
    GreedyBoundedRestore,
    /// A lazy `*`/`+` stop failed: take one more repetition.
    LazyUnboundedMore,
    /// A lazy `{n,m}` stop failed: take one more repetition.
    LazyBoundedMore,
    /// Give back the repetition taken by `LazyBoundedMore`, then fail.
    LazyBoundedRestore,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    cursor: Cursor,
    on_success: Continuation,
    on_failure: Continuation,
    /// Length of the guard trail when the frame was pushed.
    trail: usize,
}

/// Old value of a repeat's empty-loop guard, restored on backtrack.
#[derive(Debug, Clone, Copy)]
struct GuardUndo {
    node: usize,
    last: Option<usize>,
}

/// Result of visiting one node.
enum Flow {
    /// The cursor has been moved; keep walking.
    Continue,
    Fail,
    Succeed,
}

enum Attempt {
    Matched,
    Failed,
    /// The step limit ran out.
    Exhausted,
}

/// Text and bounds of one `exec` call.
struct Input<'a> {
    text: &'a [u16],
    end: usize,
    scheme_start: usize,
}

impl Input<'_> {
    /// The unit at `pos`, if it is before the end bound.
    fn at(&self, pos: usize) -> Option<u16> {
        if pos < self.end {
            self.text.get(pos).copied()
        } else {
            None
        }
    }

    fn before(&self, pos: usize) -> Option<u16> {
        pos.checked_sub(1).and_then(|p| self.text.get(p).copied())
    }
}

/// Drives one compiled pattern. Owns all per-match state, so one
/// `Matcher` per thread; the pattern itself is shared.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Arc<CompiledPattern>,
    scratch: Vec<Scratch>,
    frames: Vec<Frame>,
    trail: Vec<GuardUndo>,
    captures: CaptureTable,
    start_pinned: bool,
    end_pinned: bool,
    back: Option<BackReference>,
    step_limit: Option<u64>,
    steps: u64,
}

// ─── Public API ─────────────────────────────────────────────────────────────

impl Matcher {
    pub fn new(pattern: Arc<CompiledPattern>) -> Self {
        let scratch = vec![Scratch::default(); pattern.len()];
        Self {
            pattern,
            scratch,
            frames: Vec::new(),
            trail: Vec::new(),
            captures: CaptureTable::default(),
            start_pinned: false,
            end_pinned: false,
            back: None,
            step_limit: None,
            steps: 0,
        }
    }

    /// Give up an `exec` call after `limit` node visits.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn set_step_limit(&mut self, limit: Option<u64>) {
        self.step_limit = limit;
    }

    pub fn pattern(&self) -> &Arc<CompiledPattern> {
        &self.pattern
    }

    /// Captures of the last successful `exec`, or an empty table.
    pub fn captures(&self) -> &CaptureTable {
        &self.captures
    }

    /// Make `\y` and `\Y` refer to `captures` over `source`, as produced by
    /// another pattern whose named groups are `names`.
    pub fn attach_back_reference(
        &mut self,
        source: &[u16],
        captures: &CaptureTable,
        names: &NamedGroupTable,
    ) {
        self.back = Some(BackReference {
            text: source.to_vec(),
            captures: *captures,
            names: names.clone(),
        });
    }

    pub fn detach_back_reference(&mut self) {
        self.back = None;
    }

    /// Match against `input[..end]` starting at `start`.
    ///
    /// `scheme_start` is the offset `~` anchors to. `end` is clamped to the
    /// input length; `start > end` never matches. In [`ScanMode::Scan`] the
    /// leftmost match at or after `start` is returned.
    pub fn exec(
        &mut self,
        input: &[u16],
        start: usize,
        end: usize,
        scheme_start: usize,
        mode: ScanMode,
    ) -> Option<MatchResult> {
        let end = end.min(input.len());
        if start > end {
            return None;
        }
        let ctx = Input {
            text: input,
            end,
            scheme_start,
        };
        self.scratch.fill(Scratch::default());
        self.steps = 0;

        let last = match mode {
            ScanMode::Anchored => start,
            ScanMode::Scan => end,
        };
        for pos in start..=last {
            if !self.prefilter_accepts(&ctx, pos) {
                continue;
            }
            trace!("match attempt at {pos}");
            self.captures.clear();
            self.start_pinned = false;
            self.end_pinned = false;
            match self.attempt(&ctx, pos) {
                Attempt::Matched => return MatchResult::new(self.captures),
                Attempt::Failed => {}
                Attempt::Exhausted => {
                    debug!("step limit of {:?} reached at offset {pos}", self.step_limit);
                    break;
                }
            }
        }
        self.captures.clear();
        None
    }
}

// ─── Core matching functions ────────────────────────────────────────────────

fn descend(cur: &mut Cursor, child: NodeId) {
    cur.node = Some(child);
    cur.entering = true;
}

/// Move to the next sibling, or back up to the container.
fn advance(pattern: &CompiledPattern, cur: &mut Cursor) {
    let Some(id) = cur.node else {
        return;
    };
    let node = pattern.node(id);
    match node.next {
        Some(next) => descend(cur, next),
        None => {
            cur.node = node.parent;
            cur.entering = false;
        }
    }
}

fn repeat_atom(pattern: &CompiledPattern, cur: &Cursor) -> Option<(usize, NodeId)> {
    let id = cur.node?;
    match pattern.node(id).op {
        Op::Repeat { atom, .. } => Some((id.index(), atom)),
        _ => None,
    }
}

/// Length of `expected` if it occurs in `ctx` at `pos`.
fn compare(ctx: &Input<'_>, pos: usize, expected: &[u16], ignore_case: bool) -> Option<usize> {
    let end = pos.checked_add(expected.len())?;
    if end > ctx.end {
        return None;
    }
    let found = ctx.text.get(pos..end)?;
    let same = if ignore_case {
        found
            .iter()
            .zip(expected)
            .all(|(&a, &b)| unit::eq_ignore_case(a, b))
    } else {
        found == expected
    };
    same.then_some(expected.len())
}

/// Step over `here` if it exists and satisfies `pred`.
fn consume(here: Option<u16>, pred: impl Fn(u16) -> bool, pos: &mut usize) -> bool {
    match here {
        Some(c) if pred(c) => {
            *pos += 1;
            true
        }
        _ => false,
    }
}

fn slot_text<'t>(text: &'t [u16], slot: &Slot) -> Option<&'t [u16]> {
    let range = slot.range()?;
    text.get(range)
}

impl Matcher {
    fn prefilter_accepts(&self, ctx: &Input<'_>, pos: usize) -> bool {
        match self.pattern.prefilter() {
            Prefilter::None => true,
            Prefilter::Literal { unit, ignore_case } => ctx
                .at(pos)
                .is_some_and(|c| c == unit || (ignore_case && unit::eq_ignore_case(c, unit))),
            Prefilter::Anchor(MetaSymbol::SchemeStart) => pos == ctx.scheme_start,
            Prefilter::Anchor(_) => {
                pos == 0 || ctx.before(pos).is_some_and(unit::is_line_terminator)
            }
        }
    }

    fn save(&mut self, cursor: Cursor, on_success: Continuation, on_failure: Continuation) {
        self.frames.push(Frame {
            cursor,
            on_success,
            on_failure,
            trail: self.trail.len(),
        });
    }

    /// Set a repeat's empty-loop guard, remembering the old value.
    fn set_last(&mut self, node: usize, last: Option<usize>) {
        let old = self.scratch[node].last;
        if old != last {
            self.trail.push(GuardUndo { node, last: old });
            self.scratch[node].last = last;
        }
    }

    /// Restore every guard changed since the frame was pushed.
    fn unwind(&mut self, len: usize) {
        while self.trail.len() > len {
            if let Some(undo) = self.trail.pop() {
                self.scratch[undo.node].last = undo.last;
            }
        }
    }

    /// One match attempt anchored at `pos`.
    fn attempt(&mut self, ctx: &Input<'_>, pos: usize) -> Attempt {
        let pattern = Arc::clone(&self.pattern);
        self.frames.clear();
        self.trail.clear();
        let mut cur = Cursor {
            node: Some(pattern.root()),
            pos,
            entering: true,
        };
        let mut pending: Option<Continuation> = None;

        loop {
            let cont = match pending.take() {
                Some(cont) => cont,
                None => {
                    // Walking off the root group means the whole pattern matched.
                    let Some(id) = cur.node else {
                        pending = Some(Continuation::Succeed);
                        continue;
                    };
                    if let Some(limit) = self.step_limit {
                        self.steps += 1;
                        if self.steps > limit {
                            return Attempt::Exhausted;
                        }
                    }
                    match self.visit(&pattern, ctx, id, &mut cur) {
                        Flow::Continue => continue,
                        Flow::Fail => Continuation::Fail,
                        Flow::Succeed => Continuation::Succeed,
                    }
                }
            };

            pending = match cont {
                Continuation::Fail | Continuation::Succeed => {
                    let success = cont == Continuation::Succeed;
                    match self.frames.pop() {
                        None if success => return Attempt::Matched,
                        None => return Attempt::Failed,
                        Some(frame) => {
                            self.unwind(frame.trail);
                            cur = frame.cursor;
                            Some(if success {
                                frame.on_success
                            } else {
                                frame.on_failure
                            })
                        }
                    }
                }
                Continuation::Proceed => {
                    advance(&pattern, &mut cur);
                    None
                }
                Continuation::GreedyBoundedStop => {
                    self.save(
                        cur,
                        Continuation::Succeed,
                        Continuation::GreedyBoundedRestore,
                    );
                    advance(&pattern, &mut cur);
                    None
                }
                Continuation::GreedyBoundedRestore | Continuation::LazyBoundedRestore => {
                    if let Some((idx, _)) = repeat_atom(&pattern, &cur) {
                        self.scratch[idx].spare += 1;
                    }
                    Some(Continuation::Fail)
                }
                Continuation::LazyUnboundedMore => match repeat_atom(&pattern, &cur) {
                    Some((_, atom)) => {
                        descend(&mut cur, atom);
                        None
                    }
                    None => Some(Continuation::Fail),
                },
                Continuation::LazyBoundedMore => match repeat_atom(&pattern, &cur) {
                    Some((idx, atom)) => {
                        let spare = &mut self.scratch[idx].spare;
                        *spare = spare.saturating_sub(1);
                        self.save(cur, Continuation::Succeed, Continuation::LazyBoundedRestore);
                        descend(&mut cur, atom);
                        None
                    }
                    None => Some(Continuation::Fail),
                },
            };
        }
    }

    fn visit(
        &mut self,
        pattern: &CompiledPattern,
        ctx: &Input<'_>,
        id: NodeId,
        cur: &mut Cursor,
    ) -> Flow {
        let pos = cur.pos;
        let ignore_case = pattern.options().ignore_case;
        match &pattern.node(id).op {
            Op::Empty => {}
            Op::Literal(c) => {
                let hit = ctx
                    .at(pos)
                    .is_some_and(|u| u == *c || (ignore_case && unit::eq_ignore_case(u, *c)));
                if !hit {
                    return Flow::Fail;
                }
                cur.pos += 1;
            }
            Op::Meta(m) => {
                if !self.check_meta(*m, pattern.options(), ctx, &mut cur.pos) {
                    return Flow::Fail;
                }
            }
            Op::Class { set, negated } => match ctx.at(pos) {
                Some(u) if set.contains(u) != *negated => cur.pos += 1,
                _ => return Flow::Fail,
            },
            Op::Group { body, capture } => {
                if cur.entering {
                    self.scratch[id.index()].start = pos;
                    descend(cur, *body);
                    return Flow::Continue;
                }
                let start = self.scratch[id.index()].start;
                self.commit(*capture, start, pos);
            }
            Op::Look { body, kind } => {
                if !cur.entering {
                    return Flow::Succeed;
                }
                match *kind {
                    Lookaround::Ahead => {
                        self.save(*cur, Continuation::Proceed, Continuation::Fail);
                    }
                    Lookaround::NotAhead => {
                        self.save(*cur, Continuation::Fail, Continuation::Proceed);
                    }
                    Lookaround::Behind(n) => {
                        if pos < n {
                            return Flow::Fail;
                        }
                        self.save(*cur, Continuation::Proceed, Continuation::Fail);
                        cur.pos = pos - n;
                    }
                    Lookaround::NotBehind(n) => {
                        if pos < n {
                            advance(pattern, cur);
                            return Flow::Continue;
                        }
                        self.save(*cur, Continuation::Fail, Continuation::Proceed);
                        cur.pos = pos - n;
                    }
                }
                descend(cur, *body);
                return Flow::Continue;
            }
            Op::Or { left } => {
                if cur.entering {
                    self.save(*cur, Continuation::Succeed, Continuation::Proceed);
                    descend(cur, *left);
                    return Flow::Continue;
                }
                // The left alternative matched: skip the others.
                let mut last = id;
                while let Some(next) = pattern.node(last).next {
                    last = next;
                }
                cur.node = Some(last);
            }
            Op::Repeat {
                atom,
                min,
                max,
                lazy,
            } => {
                return self.visit_repeat(pattern, id, *atom, *min, *max, *lazy, cur);
            }
            Op::BackRef(n) => {
                let slot = self.captures.numbered.get(usize::from(*n)).copied();
                if !self.match_local(ctx, slot, cur) {
                    return Flow::Fail;
                }
            }
            Op::NamedBackRef(n) => {
                let slot = self.captures.named.get(usize::from(*n)).copied();
                if !self.match_local(ctx, slot, cur) {
                    return Flow::Fail;
                }
            }
            Op::CrossRef {
                target,
                ignore_case,
            } => {
                if !self.match_cross(pattern, ctx, target, *ignore_case, cur) {
                    return Flow::Fail;
                }
            }
        }
        advance(pattern, cur);
        Flow::Continue
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_repeat(
        &mut self,
        pattern: &CompiledPattern,
        id: NodeId,
        atom: NodeId,
        min: u32,
        max: Option<u32>,
        lazy: bool,
        cur: &mut Cursor,
    ) -> Flow {
        let idx = id.index();
        if cur.entering {
            let s = &mut self.scratch[idx];
            s.counter = min;
            s.spare = max.map_or(0, |max| max.saturating_sub(min));
            self.set_last(idx, None);
        }
        let s = &mut self.scratch[idx];
        if s.counter > 0 {
            s.counter -= 1;
            descend(cur, atom);
            return Flow::Continue;
        }

        let pos = cur.pos;
        let repeated_empty = s.last == Some(pos);
        match (max, lazy) {
            (None, false) => {
                if repeated_empty {
                    advance(pattern, cur);
                } else {
                    self.set_last(idx, Some(pos));
                    self.save(*cur, Continuation::Succeed, Continuation::Proceed);
                    descend(cur, atom);
                }
            }
            (None, true) => {
                if !repeated_empty {
                    self.set_last(idx, Some(pos));
                    self.save(*cur, Continuation::Succeed, Continuation::LazyUnboundedMore);
                }
                advance(pattern, cur);
            }
            (Some(_), false) => {
                let s = &mut self.scratch[idx];
                if s.spare > 0 {
                    s.spare -= 1;
                    self.save(*cur, Continuation::Succeed, Continuation::GreedyBoundedStop);
                    descend(cur, atom);
                } else {
                    advance(pattern, cur);
                }
            }
            (Some(_), true) => {
                if self.scratch[idx].spare > 0 {
                    self.save(*cur, Continuation::Succeed, Continuation::LazyBoundedMore);
                }
                advance(pattern, cur);
            }
        }
        Flow::Continue
    }

    fn check_meta(
        &mut self,
        meta: MetaSymbol,
        options: CompileOptions,
        ctx: &Input<'_>,
        pos: &mut usize,
    ) -> bool {
        let here = ctx.at(*pos);
        let prev = ctx.before(*pos);
        match meta {
            MetaSymbol::AnyChar => {
                let pred: fn(u16) -> bool = if options.single_line {
                    |_| true
                } else {
                    |c| !unit::is_line_terminator(c)
                };
                consume(here, pred, pos)
            }
            MetaSymbol::LineStart => *pos == 0 || prev.is_some_and(unit::is_line_terminator),
            MetaSymbol::SchemeStart => *pos == ctx.scheme_start,
            MetaSymbol::LineEnd => {
                *pos == ctx.end
                    || (options.multiline && here.is_some_and(unit::is_line_terminator))
            }
            MetaSymbol::Digit => consume(here, unit::is_digit, pos),
            MetaSymbol::NotDigit => consume(here, |c| !unit::is_digit(c), pos),
            MetaSymbol::Word => consume(here, unit::is_word, pos),
            MetaSymbol::NotWord => consume(here, |c| !unit::is_word(c), pos),
            MetaSymbol::Space => consume(here, unit::is_space, pos),
            MetaSymbol::NotSpace => consume(here, |c| !unit::is_space(c), pos),
            MetaSymbol::Upper => consume(here, unit::is_upper, pos),
            MetaSymbol::Lower => consume(here, unit::is_lower, pos),
            MetaSymbol::WordBoundary | MetaSymbol::NotWordBoundary => {
                let before = prev.is_some_and(unit::is_word);
                let after = here.is_some_and(unit::is_word);
                (before != after) == (meta == MetaSymbol::WordBoundary)
            }
            MetaSymbol::PrecededByNonLetter => {
                *pos >= ctx.end || prev.is_none_or(|c| !unit::is_letter(c))
            }
            MetaSymbol::MatchStart => {
                self.captures.numbered[0].start = Some(*pos);
                self.start_pinned = true;
                true
            }
            MetaSymbol::MatchEnd => {
                self.captures.numbered[0].end = Some(*pos);
                self.end_pinned = true;
                true
            }
        }
    }

    /// Record a group's span. Slot 0 edges pinned by `\m`/`\M` are kept.
    fn commit(&mut self, capture: Capture, start: usize, end: usize) {
        let (slot, whole) = match capture {
            Capture::None => return,
            Capture::Numbered(n) => (self.captures.numbered.get_mut(usize::from(n)), n == 0),
            Capture::Named(n) => (self.captures.named.get_mut(usize::from(n)), false),
        };
        let Some(slot) = slot else {
            return;
        };
        if !(whole && self.start_pinned) {
            slot.start = Some(start);
        }
        if !(whole && self.end_pinned) {
            slot.end = Some(end);
        }
        if let (Some(s), Some(e)) = (slot.start, slot.end)
            && e < s
        {
            slot.start = Some(e);
        }
    }

    /// `\N` and `\p{name}`: repeat text captured earlier in this match.
    fn match_local(&self, ctx: &Input<'_>, slot: Option<Slot>, cur: &mut Cursor) -> bool {
        let Some(expected) = slot.as_ref().and_then(|s| slot_text(ctx.text, s)) else {
            return false;
        };
        match compare(ctx, cur.pos, expected, false) {
            Some(len) => {
                cur.pos += len;
                true
            }
            None => false,
        }
    }

    /// `\y` and `\Y`: repeat text captured by the attached pattern.
    fn match_cross(
        &self,
        pattern: &CompiledPattern,
        ctx: &Input<'_>,
        target: &CrossTarget,
        ignore_case: bool,
        cur: &mut Cursor,
    ) -> bool {
        let Some(back) = &self.back else {
            return false;
        };
        let slot = match target {
            CrossTarget::Numbered(n) => back.captures.numbered.get(usize::from(*n)),
            CrossTarget::Named(n) => pattern
                .names()
                .name(*n)
                .and_then(|name| back.names.lookup(name))
                .and_then(|i| back.captures.named.get(usize::from(i))),
            CrossTarget::Unresolved(name) => back
                .names
                .lookup(name)
                .and_then(|i| back.captures.named.get(usize::from(i))),
        };
        let Some(expected) = slot.and_then(|s| slot_text(&back.text, s)) else {
            return false;
        };
        match compare(ctx, cur.pos, expected, ignore_case) {
            Some(len) => {
                cur.pos += len;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::compile;

    fn matcher(pattern: &str) -> Matcher {
        Matcher::new(Arc::new(compile(pattern, CompileOptions::default()).unwrap()))
    }

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn start_past_end_never_matches() {
        let text = units("abc");
        assert!(matcher("").exec(&text, 3, 2, 0, ScanMode::Scan).is_none());
    }

    #[test]
    fn end_is_clamped_to_input() {
        let text = units("abc");
        let m = matcher("c$").exec(&text, 0, 100, 0, ScanMode::Scan).unwrap();
        assert_eq!(m.range(), 2..3);
    }

    #[test]
    fn end_bound_hides_the_tail() {
        let text = units("abc");
        assert!(matcher("c").exec(&text, 0, 2, 0, ScanMode::Scan).is_none());
        let m = matcher("b$").exec(&text, 0, 2, 0, ScanMode::Scan).unwrap();
        assert_eq!(m.range(), 1..2);
    }

    #[test]
    fn failed_exec_clears_captures() {
        let text = units("ab");
        let mut m = matcher("(a)x");
        assert!(m.exec(&text, 0, 2, 0, ScanMode::Scan).is_none());
        assert_eq!(*m.captures(), CaptureTable::default());
    }

    #[test]
    fn frames_are_reused_between_calls() {
        let text = units("aaaa");
        let mut m = matcher("a*a*a*b|a");
        assert!(m.exec(&text, 0, 4, 0, ScanMode::Scan).is_some());
        let cap = m.frames.capacity();
        assert!(m.exec(&text, 0, 4, 0, ScanMode::Scan).is_some());
        assert_eq!(m.frames.capacity(), cap);
    }

    #[test]
    fn step_limit_gives_up() {
        let text = units(&"a".repeat(30));
        let mut m = matcher("(a*)*b").with_step_limit(10_000);
        assert!(m.exec(&text, 0, text.len(), 0, ScanMode::Scan).is_none());
    }

    #[test]
    fn empty_iterations_are_refused_after_backtracking() {
        let text = units("aaa");
        for pattern in ["(a?)*b", "(?:a|)+b", "(a?)*?b"] {
            let mut m = matcher(pattern).with_step_limit(10_000);
            assert!(m.exec(&text, 0, text.len(), 0, ScanMode::Scan).is_none());
            assert!(m.steps < 10_000, "{pattern} ran out of steps");
        }
    }

    #[test]
    fn prefilter_rejects_without_walking() {
        let text = units("xxxxa");
        let mut m = matcher("a").with_step_limit(5);
        let found = m.exec(&text, 0, text.len(), 0, ScanMode::Scan).unwrap();
        assert_eq!(found.range(), 4..5);
    }
}
