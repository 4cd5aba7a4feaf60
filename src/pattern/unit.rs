//! Classification and simple case mapping of single UTF-16 code units.
//!
//! Surrogate halves are not characters on their own; every predicate
//! answers `false` for them and the case mappings leave them unchanged.

use unicode_general_category::{GeneralCategory, get_general_category};

fn as_char(c: u16) -> Option<char> {
    char::from_u32(u32::from(c))
}

fn category(c: u16) -> Option<GeneralCategory> {
    as_char(c).map(get_general_category)
}

/// Line terminators recognised by `.`, `^` and `$`.
pub fn is_line_terminator(c: u16) -> bool {
    matches!(c, 0x0a..=0x0d | 0x85 | 0x2028 | 0x2029)
}

/// Decimal digits only; superscripts, fractions and numerals like `Ⅻ` are not.
pub fn is_digit(c: u16) -> bool {
    category(c) == Some(GeneralCategory::DecimalNumber)
}

pub fn is_word(c: u16) -> bool {
    c == u16::from(b'_') || is_letter(c) || is_digit(c)
}

pub fn is_space(c: u16) -> bool {
    as_char(c).is_some_and(char::is_whitespace)
}

pub fn is_upper(c: u16) -> bool {
    category(c) == Some(GeneralCategory::UppercaseLetter)
}

pub fn is_lower(c: u16) -> bool {
    category(c) == Some(GeneralCategory::LowercaseLetter)
}

/// Any of the letter categories `Lu`, `Ll`, `Lt`, `Lm` and `Lo`.
pub fn is_letter(c: u16) -> bool {
    matches!(
        category(c),
        Some(
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
    )
}

/// Map a single BMP mapping back to one code unit, or `None` when the
/// mapping expands or leaves the BMP.
fn single_unit(mut it: impl Iterator<Item = char>) -> Option<u16> {
    let first = it.next()?;
    if it.next().is_some() {
        return None;
    }
    u16::try_from(u32::from(first)).ok()
}

/// Simple lower-case mapping. Characters whose mapping is not a single
/// BMP code unit are returned unchanged.
pub fn to_lower(c: u16) -> u16 {
    as_char(c)
        .and_then(|ch| single_unit(ch.to_lowercase()))
        .unwrap_or(c)
}

/// Simple upper-case mapping, see [`to_lower`].
pub fn to_upper(c: u16) -> u16 {
    as_char(c)
        .and_then(|ch| single_unit(ch.to_uppercase()))
        .unwrap_or(c)
}

pub fn eq_ignore_case(a: u16, b: u16) -> bool {
    a == b || to_lower(a) == to_lower(b) || to_upper(a) == to_upper(b)
}

/// Encode a string as UTF-16 code units.
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode a span of code units, replacing unpaired surrogates.
pub fn slice_to_string(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}
