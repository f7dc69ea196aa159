//! Decoding a single backslash escape.

use crate::char_codes::*;
use crate::hex::{read_code_point, read_hex_char};
use litscan_core::Position;
use litscan_diagnostics::ErrorHandler;
use tracing::trace;

/// What one escape sequence decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// A single character.
    Char(char),
    /// A UTF-16 surrogate code unit from `\uD800`-`\uDFFF`. Pairs are joined
    /// by the string scanner.
    Surrogate(u16),
    /// Nothing, as for a line continuation.
    Empty,
    /// An escape that cannot be decoded. In templates this is not an error
    /// by itself; elsewhere the problem has already been reported.
    Invalid,
}

/// Decode the escape whose backslash is at `pos`.
///
/// In templates (`in_template`) malformed escapes come back as
/// [`Escape::Invalid`] without a report; elsewhere they are reported to
/// `handler`.
pub fn read_escaped_char<H: ErrorHandler>(
    text: &str,
    pos: Position,
    in_template: bool,
    handler: &mut H,
) -> Result<(Escape, Position), H::Error> {
    let throw_on_invalid = !in_template;
    let pos = pos.advance(BACKSLASH.len_utf8());
    let Some(ch) = char_at(text, pos.offset) else {
        return Ok((Escape::Empty, pos));
    };
    let after = pos.advance(ch.len_utf8());
    trace!(escape = ?ch, ?pos, "decoding escape");

    let decoded = match ch {
        'n' => (Escape::Char('\n'), after),
        'r' => (Escape::Char('\r'), after),
        't' => (Escape::Char('\t'), after),
        'b' => (Escape::Char('\u{8}'), after),
        'v' => (Escape::Char('\u{b}'), after),
        'f' => (Escape::Char('\u{c}'), after),
        'x' => {
            let hex = read_hex_char(text, after, 2, false, throw_on_invalid, handler)?;
            let escape = hex
                .code
                .and_then(char::from_u32)
                .map_or(Escape::Invalid, Escape::Char);
            (escape, hex.pos)
        }
        'u' => {
            let hex = read_code_point(text, after, throw_on_invalid, handler)?;
            (hex.code.map_or(Escape::Invalid, code_point_escape), hex.pos)
        }
        CARRIAGE_RETURN => {
            let end = if char_at(text, after.offset) == Some(LINE_FEED) {
                after.advance(1)
            } else {
                after
            };
            (Escape::Empty, end.new_line_at(end.offset))
        }
        LINE_FEED => (Escape::Empty, after.new_line_at(after.offset)),
        LINE_SEPARATOR | PARAGRAPH_SEPARATOR => (Escape::Empty, after),
        '8' | '9' => {
            if in_template {
                (Escape::Invalid, after)
            } else {
                handler.strict_numeric_escape(pos)?;
                (Escape::Char(ch), after)
            }
        }
        '0'..='7' => read_legacy_octal(text, pos, in_template, handler)?,
        _ => (Escape::Char(ch), after),
    };
    Ok(decoded)
}

/// `\0` through `\377`. `pos` is on the first digit.
///
/// Anything other than a lone `\0` not followed by `8`/`9` is a legacy octal
/// escape, reported outside templates. The byte is decoded either way.
fn read_legacy_octal<H: ErrorHandler>(
    text: &str,
    pos: Position,
    in_template: bool,
    handler: &mut H,
) -> Result<(Escape, Position), H::Error> {
    let digits = text
        .get(pos.offset..)
        .unwrap_or_default()
        .chars()
        .take(3)
        .take_while(|&c| is_octal_digit(c))
        .count();
    let mut run = &text[pos.offset..pos.offset + digits];
    let mut value = octal_value(run);
    if value > 0xFF {
        run = &run[..run.len() - 1];
        value = octal_value(run);
    }

    let end = pos.advance(run.len());
    let next = char_at(text, end.offset);
    if (run != "0" || matches!(next, Some('8' | '9'))) && !in_template {
        handler.strict_numeric_escape(pos)?;
    }
    // `value` is at most 0o377 here.
    Ok((Escape::Char(char::from(value as u8)), end))
}

fn octal_value(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, digit| acc * 8 + u32::from(digit - b'0'))
}

fn code_point_escape(code: u32) -> Escape {
    match char::from_u32(code) {
        Some(ch) => Escape::Char(ch),
        None => match u16::try_from(code) {
            // char::from_u32 only rejects surrogates below 0x10000.
            Ok(unit) => Escape::Surrogate(unit),
            Err(_) => Escape::Invalid,
        },
    }
}
