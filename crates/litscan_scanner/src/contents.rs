//! Walking the body of a string or template literal.

use crate::char_codes::*;
use crate::escape::{read_escaped_char, Escape};
use litscan_core::Position;
use litscan_diagnostics::ErrorHandler;
use tracing::trace;

/// Which delimiter the literal body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `` `...` ``, ending at a backtick or at `${`.
    Template,
}

impl StringKind {
    /// The kind opened by a quote character.
    pub fn from_quote(quote: char) -> Option<Self> {
        match quote {
            SINGLE_QUOTE => Some(StringKind::Single),
            DOUBLE_QUOTE => Some(StringKind::Double),
            BACKTICK => Some(StringKind::Template),
            _ => None,
        }
    }

    #[inline]
    pub fn is_template(self) -> bool {
        self == StringKind::Template
    }

    fn is_end(self, ch: char, text: &str, offset: usize) -> bool {
        match self {
            StringKind::Single => ch == SINGLE_QUOTE,
            StringKind::Double => ch == DOUBLE_QUOTE,
            StringKind::Template => {
                ch == BACKTICK
                    || (ch == DOLLAR_SIGN && char_at(text, offset + 1) == Some(OPEN_BRACE))
            }
        }
    }
}

/// The decoded body of a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The body with escapes resolved.
    pub text: String,
    /// Where scanning stopped: on the closing delimiter, or at end of input.
    pub end: Position,
    /// The backslash of the first escape that could not be decoded.
    pub first_invalid: Option<Position>,
}

/// [`ScanResult`] with the redundant `contains_invalid` flag some callers
/// still expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyScanResult {
    pub text: String,
    pub end: Position,
    pub first_invalid: Option<Position>,
    pub contains_invalid: bool,
}

impl From<ScanResult> for LegacyScanResult {
    fn from(result: ScanResult) -> Self {
        Self {
            contains_invalid: result.first_invalid.is_some(),
            text: result.text,
            end: result.end,
            first_invalid: result.first_invalid,
        }
    }
}

/// Decode the body of a literal of the given kind, starting at `start`
/// (just after the opening delimiter).
///
/// Stops on the closing delimiter without consuming it. End of input is
/// reported as unterminated, at `start`, and stops the scan. A raw line
/// break in a quoted string is reported the same way but scanning goes on
/// past it; in a template it becomes `\n`.
pub fn read_string_contents<H: ErrorHandler>(
    kind: StringKind,
    text: &str,
    start: Position,
    handler: &mut H,
) -> Result<ScanResult, H::Error> {
    trace!(?kind, ?start, "reading string contents");
    let mut out = DecodedText::default();
    let mut first_invalid = None;
    let mut pos = start;
    let mut chunk_start = pos.offset;

    loop {
        let Some(ch) = char_at(text, pos.offset) else {
            handler.unterminated(start)?;
            out.push_str(slice(text, chunk_start, pos.offset));
            break;
        };

        if kind.is_end(ch, text, pos.offset) {
            out.push_str(slice(text, chunk_start, pos.offset));
            break;
        }

        match ch {
            BACKSLASH => {
                out.push_str(slice(text, chunk_start, pos.offset));
                let (escape, next) = read_escaped_char(text, pos, kind.is_template(), handler)?;
                match escape {
                    Escape::Char(c) => out.push(c),
                    Escape::Surrogate(unit) => out.push_code_unit(unit),
                    Escape::Empty => {}
                    Escape::Invalid => {
                        if first_invalid.is_none() {
                            trace!(?pos, "first invalid escape");
                            first_invalid = Some(pos);
                        }
                    }
                }
                pos = next;
                chunk_start = pos.offset;
            }
            LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                pos = pos.new_line_at(pos.offset + ch.len_utf8());
            }
            CARRIAGE_RETURN | LINE_FEED => {
                let next = line_break_end(text, ch, pos.offset);
                if kind.is_template() {
                    out.push_str(slice(text, chunk_start, pos.offset));
                    out.push(LINE_FEED);
                    chunk_start = next;
                } else {
                    handler.unterminated(start)?;
                }
                pos = pos.new_line_at(next);
            }
            _ => {
                pos = pos.advance(ch.len_utf8());
            }
        }
    }

    Ok(ScanResult {
        text: out.finish(),
        end: pos,
        first_invalid,
    })
}

/// Offset just past a CR, LF or CRLF starting at `offset`.
fn line_break_end(text: &str, ch: char, offset: usize) -> usize {
    let next = offset + 1;
    if ch == CARRIAGE_RETURN && char_at(text, next) == Some(LINE_FEED) {
        next + 1
    } else {
        next
    }
}

fn slice(text: &str, from: usize, to: usize) -> &str {
    text.get(from..to).unwrap_or_default()
}

/// Output buffer that joins escaped surrogate pairs.
///
/// A high surrogate is held back until the next piece of output. If that is
/// the matching low surrogate the two become one character; anything else
/// turns the held surrogate into U+FFFD.
#[derive(Default)]
struct DecodedText {
    text: String,
    high_surrogate: Option<u16>,
}

impl DecodedText {
    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.flush_surrogate();
        self.text.push_str(s);
    }

    fn push(&mut self, ch: char) {
        self.flush_surrogate();
        self.text.push(ch);
    }

    fn push_code_unit(&mut self, unit: u16) {
        match (self.high_surrogate.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let mut units = char::decode_utf16([high, unit]);
                let ch = units
                    .next()
                    .and_then(Result::ok)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.text.push(ch);
            }
            (held, 0xD800..=0xDBFF) => {
                if held.is_some() {
                    self.text.push(char::REPLACEMENT_CHARACTER);
                }
                self.high_surrogate = Some(unit);
            }
            (held, _) => {
                if held.is_some() {
                    self.text.push(char::REPLACEMENT_CHARACTER);
                }
                self.text.push(char::REPLACEMENT_CHARACTER);
            }
        }
    }

    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.text.push(char::REPLACEMENT_CHARACTER);
        }
    }

    fn finish(mut self) -> String {
        self.flush_surrogate();
        self.text
    }
}
