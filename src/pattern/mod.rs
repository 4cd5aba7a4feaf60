//! Colorer regular expression engine.
//!
//! Patterns compile into an operation tree ([`CompiledPattern`]) that a
//! [`Matcher`] walks with an explicit backtracking stack. Offsets are
//! UTF-16 code units.
//!
//! # Pattern syntax
//!
//! | Token            | Meaning                                              |
//! |------------------|------------------------------------------------------|
//! | `.`              | Any unit except a line terminator (any in single-line) |
//! | `^`              | Scheme start; start of line under multiline          |
//! | `$`              | End of range; also before a line terminator under multiline |
//! | `~`              | Scheme start                                         |
//! | `\d` `\D`        | Digit / non-digit                                    |
//! | `\w` `\W`        | Word unit (letter, digit, `_`) / non-word            |
//! | `\s` `\S`        | Whitespace / non-whitespace                          |
//! | `\u` `\l`        | Upper-case / lower-case letter                       |
//! | `\b` `\B`        | Word boundary / not a word boundary                  |
//! | `\c`             | Not preceded by a letter                             |
//! | `\m` `\M`        | Set the start / end of the whole match here          |
//! | `\t \n \r \f \a \e` | Control characters                                |
//! | `\xNN` `\x{N}`   | Hex code unit                                        |
//! | `\0` `\NNN`      | Octal code unit (at most 255)                        |
//! | `\1`…`\9`        | Numbered back-reference                              |
//! | `\p{name}`       | Named back-reference                                 |
//! | `\yN` `\y{name}` | Back-reference into the attached pattern's match     |
//! | `\YN` `\Y{name}` | Same, ignoring case                                  |
//! | `[…]` `[^…]`     | Class; `[…]` nested unions, `&&[…]` intersects, `-[…]` subtracts |
//! | `(…)`            | Capturing group (1 to 9)                             |
//! | `(?:…)`          | Non-capturing group                                  |
//! | `(?{name}…)`     | Named group                                          |
//! | `(?=…)` `(?!…)`  | Lookahead / negative lookahead                       |
//! | `(?#N…)` `(?~N…)`| Lookbehind / negative lookbehind N units back        |
//! | `X\|Y`           | Alternation                                          |
//! | `*` `+` `?`      | Zero or more / one or more / optional                |
//! | `{n}` `{n,}` `{n,m}` | Counted repetition                               |
//! | `…?`             | Lazy form of any quantifier                          |

mod alternation;
pub mod ast;
pub mod captures;
pub mod char_class;
pub mod matcher;
pub mod parser;
pub mod unit;


pub use ast::CompiledPattern;
pub use captures::{CaptureTable, MatchResult, NAMED_SLOTS, NUMBERED_SLOTS, NamedGroupTable};
pub use char_class::CharClass;
pub use matcher::{Matcher, ScanMode};
pub use parser::{CompileOptions, PatternError, PatternErrorKind, compile};
