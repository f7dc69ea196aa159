//! Character constants and classification helpers used by the decoders.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

pub const DOUBLE_QUOTE: char = '"';
pub const DOLLAR_SIGN: char = '$';
pub const SINGLE_QUOTE: char = '\'';
pub const DOT: char = '.';
pub const BACKSLASH: char = '\\';
pub const UNDERSCORE: char = '_';
pub const BACKTICK: char = '`';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

/// Highest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// The character starting at byte `offset`, if any.
#[inline]
pub fn char_at(text: &str, offset: usize) -> Option<char> {
    text.get(offset..)?.chars().next()
}

/// The character ending just before byte `offset`, if any.
#[inline]
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    text.get(..offset)?.chars().next_back()
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character is an octal digit (0-7).
#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

/// Check if a character is a binary digit (0-1).
#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Check if a character is a hex digit.
#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// The numeric value of a digit in any radix up to 36: `0-9`, then `a-z`
/// (either case) for 10 through 35.
#[inline]
pub fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(ch as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// A character that may never sit next to a numeric separator in a literal
/// of the given radix: the radix prefix letters, the exponent marker, the
/// decimal point and another separator.
#[inline]
pub fn is_forbidden_separator_sibling(radix: u32, ch: char) -> bool {
    if radix == 16 {
        matches!(ch, DOT | 'X' | 'x' | UNDERSCORE)
    } else {
        matches!(ch, DOT | 'B' | 'b' | 'E' | 'e' | 'O' | 'o' | UNDERSCORE)
    }
}

/// Whether `ch` may follow a numeric separator in a literal of the given radix.
#[inline]
pub fn is_allowed_separator_sibling(radix: u32, ch: char) -> bool {
    match radix {
        16 => is_hex_digit(ch),
        10 => is_digit(ch),
        8 => is_octal_digit(ch),
        _ => is_binary_digit(ch),
    }
}
