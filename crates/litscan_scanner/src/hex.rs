//! Hex escapes (`\xHH`) and code point escapes (`\uHHHH`, `\u{H...}`).

use crate::char_codes::*;
use crate::int::{read_int, IntOptions, SeparatorPolicy};
use litscan_core::Position;
use litscan_diagnostics::ErrorHandler;
use tracing::trace;

/// A hex value read from an escape, with the position reading stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexParse {
    pub code: Option<u32>,
    pub pos: Position,
}

/// Read `len` hex digits starting at `pos`, the first byte after the escape
/// letter (or after `{` for braced code points).
///
/// On failure, with `throw_on_invalid` the problem is reported as an invalid
/// escape sequence at `pos`. Without it nothing is reported and the returned
/// position is rewound to `pos - 1`, the byte just before the digits. Callers
/// rely on this: the escape decoder resumes there, so in lenient mode the
/// escape letter is scanned again as ordinary text.
pub fn read_hex_char<H: ErrorHandler>(
    text: &str,
    pos: Position,
    len: usize,
    force_len: bool,
    throw_on_invalid: bool,
    handler: &mut H,
) -> Result<HexParse, H::Error> {
    let mut options = IntOptions::new(16)
        .with_max_len(len)
        .separators(SeparatorPolicy::Disallowed)
        .bail_on_error(!throw_on_invalid);
    options.force_len = force_len;

    let parsed = read_int(text, pos, options, handler)?;
    if parsed.value.is_some() {
        return Ok(HexParse {
            code: parsed.value.map(saturate_u32),
            pos: parsed.pos,
        });
    }

    if throw_on_invalid {
        handler.invalid_escape_sequence(pos)?;
        Ok(HexParse {
            code: None,
            pos: parsed.pos,
        })
    } else {
        let rewound = pos.at(pos.offset.saturating_sub(1));
        trace!(?pos, ?rewound, "lenient hex escape backed off");
        Ok(HexParse {
            code: None,
            pos: rewound,
        })
    }
}

/// Read a code point escape body starting at `pos`, just after the `u`.
///
/// `{` starts a braced escape whose digits run up to the first `}`; the
/// value must not exceed `0x10FFFF`. Anything else must be exactly four hex
/// digits.
pub fn read_code_point<H: ErrorHandler>(
    text: &str,
    pos: Position,
    throw_on_invalid: bool,
    handler: &mut H,
) -> Result<HexParse, H::Error> {
    if char_at(text, pos.offset) != Some(OPEN_BRACE) {
        return read_hex_char(text, pos, 4, false, throw_on_invalid, handler);
    }

    let body = pos.advance(1);
    // A missing `}` leaves no room for digits, which fails like an empty body.
    let len = text
        .get(body.offset..)
        .and_then(|rest| memchr::memchr(CLOSE_BRACE as u8, rest.as_bytes()))
        .unwrap_or(0);
    let parsed = read_hex_char(text, body, len, true, throw_on_invalid, handler)?;
    let after = parsed.pos.advance(1);

    match parsed.code {
        Some(code) if code > MAX_CODE_POINT => {
            if throw_on_invalid {
                handler.invalid_code_point(after)?;
                Ok(HexParse {
                    code: Some(code),
                    pos: after,
                })
            } else {
                Ok(HexParse {
                    code: None,
                    pos: after,
                })
            }
        }
        code => Ok(HexParse { code, pos: after }),
    }
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscan_diagnostics::{DecodeErrorKind, DiagnosticCollector};

    fn hex(text: &str, len: usize, strict: bool) -> (HexParse, Vec<DecodeErrorKind>) {
        let mut collector = DiagnosticCollector::new();
        let start = Position::new(1, 0, 1);
        let parsed = read_hex_char(text, start, len, false, strict, &mut collector).unwrap();
        (parsed, collector.kinds())
    }

    fn code_point(text: &str, strict: bool) -> (HexParse, Vec<DecodeErrorKind>) {
        let mut collector = DiagnosticCollector::new();
        let start = Position::new(1, 0, 1);
        let parsed = read_code_point(text, start, strict, &mut collector).unwrap();
        (parsed, collector.kinds())
    }

    #[test]
    fn test_two_hex_digits() {
        let (parsed, errors) = hex("x41", 2, true);
        assert_eq!(parsed.code, Some(0x41));
        assert_eq!(parsed.pos.offset, 3);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_short_hex_strict_reports() {
        let (parsed, errors) = hex("x1", 2, true);
        assert_eq!(parsed.code, None);
        assert_eq!(parsed.pos.offset, 2);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidEscapeSequence]);
    }

    #[test]
    fn test_short_hex_lenient_rewinds() {
        let (parsed, errors) = hex("x1", 2, false);
        assert_eq!(parsed.code, None);
        assert_eq!(parsed.pos.offset, 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_separator_in_hex_escape() {
        let (strict, errors) = hex("x_1", 2, true);
        assert_eq!(strict.code, Some(1));
        assert_eq!(errors, vec![DecodeErrorKind::SeparatorInEscapeSequence]);

        let (lenient, errors) = hex("x_1", 2, false);
        assert_eq!(lenient.code, None);
        assert_eq!(lenient.pos.offset, 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_four_digit_code_point() {
        let (parsed, errors) = code_point("u0041", true);
        assert_eq!(parsed.code, Some(0x41));
        assert_eq!(parsed.pos.offset, 5);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_braced_code_point() {
        let (parsed, errors) = code_point("u{1F600}", true);
        assert_eq!(parsed.code, Some(0x1F600));
        assert_eq!(parsed.pos.offset, 8);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_braced_code_point_out_of_range() {
        let (strict, errors) = code_point("u{110000}", true);
        assert_eq!(strict.code, Some(0x110000));
        assert_eq!(strict.pos.offset, 9);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidCodePoint]);

        let (lenient, errors) = code_point("u{110000}", false);
        assert_eq!(lenient.code, None);
        assert_eq!(lenient.pos.offset, 9);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_braced_code_point_with_bad_digit() {
        let (strict, errors) = code_point("u{4g}", true);
        assert_eq!(strict.code, None);
        assert_eq!(strict.pos.offset, 5);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidEscapeSequence]);

        // Lenient: back off onto the brace, then step past it.
        let (lenient, _) = code_point("u{4g}", false);
        assert_eq!(lenient.code, None);
        assert_eq!(lenient.pos.offset, 2);
    }

    #[test]
    fn test_braced_code_point_with_wide_char() {
        // `é` is two bytes; reading must stop on the `}` at offset 4.
        let (strict, errors) = code_point("u{é}\"", true);
        assert_eq!(strict.code, None);
        assert_eq!(strict.pos.offset, 5);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidEscapeSequence]);

        let (mixed, _) = code_point("u{4é}\"", true);
        assert_eq!(mixed.code, None);
        assert_eq!(mixed.pos.offset, 6);

        let (lenient, errors) = code_point("u{é}\"", false);
        assert_eq!(lenient.code, None);
        assert_eq!(lenient.pos.offset, 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_and_unclosed_braces() {
        let (empty, errors) = code_point("u{}", true);
        assert_eq!(empty.code, None);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidEscapeSequence]);

        let (unclosed, errors) = code_point("u{41", true);
        assert_eq!(unclosed.code, None);
        assert_eq!(unclosed.pos.offset, 3);
        assert_eq!(errors, vec![DecodeErrorKind::InvalidEscapeSequence]);
    }
}
