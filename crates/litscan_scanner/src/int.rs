//! Reading digit runs in radix 2, 8, 10 or 16.
//!
//! This is the leaf of the decoder stack. Numeric literals read their digits
//! through it directly; hex and unicode escapes go through it with separators
//! disallowed.

use crate::char_codes::*;
use litscan_core::Position;
use litscan_diagnostics::ErrorHandler;
use tracing::trace;

/// How `_` inside a digit run is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorPolicy {
    /// `_` is never allowed here; seeing one is reported.
    Disallowed,
    /// `_` is a numeric separator, allowed between two digits.
    Allowed,
    /// `_` is just another non-digit and ends the run.
    Bail,
}

/// Parameters for [`read_int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntOptions {
    /// 2, 8, 10 or 16.
    pub radix: u32,
    /// Maximum number of bytes to read. `None` reads until the first non-digit.
    pub max_len: Option<usize>,
    /// Keep reading through out-of-range characters so that exactly
    /// `max_len` bytes are consumed; the result is then a failure.
    pub force_len: bool,
    pub separators: SeparatorPolicy,
    /// Stop with a failure at a bad separator instead of reporting it.
    pub bail_on_error: bool,
}

impl IntOptions {
    pub fn new(radix: u32) -> Self {
        debug_assert!(matches!(radix, 2 | 8 | 10 | 16));
        Self {
            radix,
            max_len: None,
            force_len: false,
            separators: SeparatorPolicy::Allowed,
            bail_on_error: false,
        }
    }

    pub fn with_max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    /// Read exactly `len` bytes.
    pub fn exact(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self.force_len = true;
        self
    }

    pub fn separators(mut self, policy: SeparatorPolicy) -> Self {
        self.separators = policy;
        self
    }

    pub fn bail_on_error(mut self, bail: bool) -> Self {
        self.bail_on_error = bail;
        self
    }
}

/// Outcome of [`read_int`].
///
/// A `None` value does not mean nothing was consumed: `pos` is always where
/// reading stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntParse {
    pub value: Option<u64>,
    pub pos: Position,
}

impl IntParse {
    fn failed(pos: Position) -> Self {
        Self { value: None, pos }
    }
}

/// Read a run of digits starting at `pos`.
///
/// The value accumulates left to right and saturates at `u64::MAX`. The read
/// fails when nothing was consumed, when `max_len` is set and a different
/// number of bytes was consumed, or when `force_len` had to step over a
/// non-digit. A character that would cross the `max_len` boundary is never
/// consumed.
pub fn read_int<H: ErrorHandler>(
    text: &str,
    pos: Position,
    options: IntOptions,
    handler: &mut H,
) -> Result<IntParse, H::Error> {
    let IntOptions {
        radix,
        max_len,
        force_len,
        separators,
        bail_on_error,
    } = options;
    let start = pos.offset;
    let mut pos = pos;
    let mut invalid = false;
    let mut total: u64 = 0;
    let limit = max_len.map(|len| start + len);

    while limit.map_or(true, |limit| pos.offset < limit) {
        let Some(ch) = char_at(text, pos.offset) else {
            break;
        };
        if limit.map_or(false, |limit| pos.offset + ch.len_utf8() > limit) {
            break;
        }

        if ch == UNDERSCORE && separators != SeparatorPolicy::Bail {
            match separators {
                SeparatorPolicy::Disallowed => {
                    if bail_on_error {
                        return Ok(IntParse::failed(pos));
                    }
                    handler.separator_in_escape_sequence(pos)?;
                }
                _ => {
                    let prev = char_before(text, pos.offset);
                    let next = char_at(text, pos.offset + 1);
                    let misplaced = next.map_or(true, |n| !is_allowed_separator_sibling(radix, n))
                        || prev.map_or(false, |p| is_forbidden_separator_sibling(radix, p))
                        || next.map_or(false, |n| is_forbidden_separator_sibling(radix, n));
                    if misplaced {
                        if bail_on_error {
                            return Ok(IntParse::failed(pos));
                        }
                        handler.unexpected_separator_placement(pos)?;
                    }
                }
            }
            pos = pos.advance(1);
            continue;
        }

        let val = match digit_value(ch) {
            Some(val) if val < radix => val,
            _ => {
                if is_digit(ch) && handler.invalid_digit(pos, radix)? {
                    0
                } else if force_len {
                    invalid = true;
                    0
                } else {
                    break;
                }
            }
        };
        pos = pos.advance(ch.len_utf8());
        total = total
            .saturating_mul(u64::from(radix))
            .saturating_add(u64::from(val));
    }

    let consumed = pos.offset - start;
    if consumed == 0 || max_len.map_or(false, |len| consumed != len) || invalid {
        trace!(radix, ?pos, "digit run rejected");
        return Ok(IntParse::failed(pos));
    }
    Ok(IntParse {
        value: Some(total),
        pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscan_diagnostics::{DecodeErrorKind, DiagnosticCollector, StrictHandler};

    fn read(text: &str, options: IntOptions) -> (IntParse, Vec<DecodeErrorKind>) {
        let mut collector = DiagnosticCollector::new();
        let parsed = read_int(text, Position::start(), options, &mut collector).unwrap();
        (parsed, collector.kinds())
    }

    #[test]
    fn test_reads_each_radix() {
        assert_eq!(read("1010", IntOptions::new(2)).0.value, Some(10));
        assert_eq!(read("777", IntOptions::new(8)).0.value, Some(511));
        assert_eq!(read("1234", IntOptions::new(10)).0.value, Some(1234));
        assert_eq!(read("fF", IntOptions::new(16)).0.value, Some(255));
    }

    #[test]
    fn test_stops_at_first_non_digit() {
        let (parsed, errors) = read("12;", IntOptions::new(10));
        assert_eq!(parsed.value, Some(12));
        assert_eq!(parsed.pos.offset, 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_run_fails() {
        let (parsed, _) = read("g", IntOptions::new(16));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 0);
    }

    #[test]
    fn test_max_len_must_match() {
        let (parsed, _) = read("4142", IntOptions::new(16).with_max_len(2));
        assert_eq!(parsed.value, Some(0x41));
        assert_eq!(parsed.pos.offset, 2);

        let (short, _) = read("4", IntOptions::new(16).with_max_len(2));
        assert_eq!(short.value, None);
        assert_eq!(short.pos.offset, 1);
    }

    #[test]
    fn test_force_len_consumes_invalid_char() {
        let (parsed, _) = read("4z1}", IntOptions::new(16).exact(3));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 3);
    }

    #[test]
    fn test_max_len_counts_bytes() {
        // `é` is two bytes and fills the whole budget.
        let (parsed, _) = read("é}\"", IntOptions::new(16).exact(2));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 2);

        let (parsed, _) = read("4é}", IntOptions::new(16).exact(3));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 3);
    }

    #[test]
    fn test_wide_char_never_crosses_max_len() {
        let (parsed, _) = read("1é", IntOptions::new(16).exact(2));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 1);
    }

    #[test]
    fn test_separator_allowed() {
        let (parsed, errors) = read("1_000", IntOptions::new(10));
        assert_eq!(parsed.value, Some(1000));
        assert_eq!(parsed.pos.offset, 5);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_separator_bail_policy_ends_run() {
        let (parsed, errors) = read("1_0", IntOptions::new(10).separators(SeparatorPolicy::Bail));
        assert_eq!(parsed.value, Some(1));
        assert_eq!(parsed.pos.offset, 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_trailing_separator_reported() {
        let mut collector = DiagnosticCollector::new();
        let parsed = read_int("12_", Position::start(), IntOptions::new(10), &mut collector).unwrap();
        assert_eq!(parsed.value, Some(12));
        assert_eq!(parsed.pos.offset, 3);
        assert_eq!(collector.kinds(), vec![DecodeErrorKind::UnexpectedSeparatorPlacement]);
        assert_eq!(collector.errors()[0].position.offset, 2);
    }

    #[test]
    fn test_separator_bail_on_error() {
        let (parsed, errors) = read("1__0", IntOptions::new(10).bail_on_error(true));
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.pos.offset, 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_disallowed_separator_reported_and_skipped() {
        let options = IntOptions::new(16)
            .with_max_len(2)
            .separators(SeparatorPolicy::Disallowed);
        let (parsed, errors) = read("_1", options);
        assert_eq!(parsed.value, Some(1));
        assert_eq!(errors, vec![DecodeErrorKind::SeparatorInEscapeSequence]);
    }

    #[test]
    fn test_invalid_digit_ends_run_by_default() {
        let (parsed, errors) = read("1791", IntOptions::new(8));
        assert_eq!(parsed.value, Some(0o17));
        assert_eq!(parsed.pos.offset, 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_invalid_digit_recovery() {
        let mut collector = DiagnosticCollector::new().recover_invalid_digits(true);
        let parsed = read_int("191", Position::start(), IntOptions::new(8), &mut collector).unwrap();
        // The 9 is read as a 0.
        assert_eq!(parsed.value, Some(0o101));
        assert_eq!(parsed.pos.offset, 3);
        assert_eq!(collector.kinds(), vec![DecodeErrorKind::InvalidDigit { radix: 8 }]);
        assert_eq!(collector.errors()[0].position.offset, 1);
    }

    #[test]
    fn test_strict_handler_aborts_on_bad_separator() {
        let err = read_int("1__0", Position::start(), IntOptions::new(10), &mut StrictHandler)
            .unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedSeparatorPlacement);
        assert_eq!(err.position.offset, 1);
    }

    #[test]
    fn test_value_saturates() {
        let (parsed, _) = read("ffffffffffffffffffff", IntOptions::new(16));
        assert_eq!(parsed.value, Some(u64::MAX));
        assert_eq!(parsed.pos.offset, 20);
    }
}
