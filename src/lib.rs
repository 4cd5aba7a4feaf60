//! A Colorer-dialect regular expression engine.
//!
//! Patterns are compiled into an index-linked operation tree and matched by
//! a non-recursive backtracking machine over UTF-16 code units. Besides the
//! usual constructs the dialect has a scheme-start anchor `~`, match
//! boundary markers `\m`/`\M`, named groups `(?{name}...)` and
//! back-references into another pattern's match (`\y`, `\Y`).
//!
//! # Example
//!
//! ```rust
//! use cregexp::{CompileOptions, Regex};
//!
//! let mut open = Regex::new(r"<<(?{tag}\w+)", CompileOptions::default()).unwrap();
//! let mut close = Regex::new(r"\y{tag}>>", CompileOptions::default()).unwrap();
//!
//! let text: Vec<u16> = "<<EOF body EOF>>".encode_utf16().collect();
//! let start = open.find_units(&text, 0).unwrap();
//! assert_eq!(start.named_group(0), Some(2..5));
//!
//! // `\y{tag}` repeats whatever the opening pattern captured.
//! close.attach_back_reference_from(&open, &text);
//! assert_eq!(close.find_units(&text, 0).unwrap().range(), 11..16);
//! ```

pub mod highlight;
pub mod pattern;
mod regex;

pub use pattern::{
    CaptureTable, CharClass, CompileOptions, CompiledPattern, MatchResult, Matcher,
    NamedGroupTable, PatternError, PatternErrorKind, ScanMode, compile,
};
pub use regex::Regex;
