//! Typed decode errors.

use crate::{format_message, messages, Diagnostic, DiagnosticMessage};
use litscan_core::Position;
use miette::SourceSpan;
use thiserror::Error;

/// Every condition the decoders can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// End of input (or a raw line break in a quoted string) before the closing delimiter.
    Unterminated,
    /// Legacy octal escape, or `\8`/`\9`, outside a template.
    StrictNumericEscape,
    /// A `\x` or `\u` escape without the digits it needs.
    InvalidEscapeSequence,
    /// A braced code point above `0x10FFFF`.
    InvalidCodePoint,
    /// `_` inside a hex or unicode escape.
    SeparatorInEscapeSequence,
    /// `_` that is not between two digits.
    UnexpectedSeparatorPlacement,
    /// A decimal digit that is too large for the radix being read.
    InvalidDigit { radix: u32 },
}

impl DecodeErrorKind {
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            DecodeErrorKind::Unterminated => &messages::UNTERMINATED_STRING_LITERAL,
            DecodeErrorKind::StrictNumericEscape => &messages::OCTAL_ESCAPE_IN_STRICT_MODE,
            DecodeErrorKind::InvalidEscapeSequence => &messages::BAD_CHARACTER_ESCAPE_SEQUENCE,
            DecodeErrorKind::InvalidCodePoint => &messages::CODE_POINT_OUT_OF_BOUNDS,
            DecodeErrorKind::SeparatorInEscapeSequence => {
                &messages::NUMERIC_SEPARATOR_IN_ESCAPE_SEQUENCE
            }
            DecodeErrorKind::UnexpectedSeparatorPlacement => {
                &messages::UNEXPECTED_NUMERIC_SEPARATOR
            }
            DecodeErrorKind::InvalidDigit { .. } => &messages::DIGIT_EXPECTED_FOR_RADIX_0,
        }
    }

    pub fn code(&self) -> u32 {
        self.message().code
    }

    /// The message text with any placeholders filled in.
    pub fn message_text(&self) -> String {
        match self {
            DecodeErrorKind::InvalidDigit { radix } => {
                format_message(self.message().message, &[&radix.to_string()])
            }
            _ => self.message().message.to_string(),
        }
    }
}

/// A reported problem, tied to the position it was reported at.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
#[error("{text} ({position})")]
#[diagnostic(code(litscan::decode))]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub position: Position,
    text: String,
    #[label("here")]
    span: SourceSpan,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, position: Position) -> Self {
        Self {
            kind,
            position,
            text: kind.message_text(),
            span: SourceSpan::from((position.offset, 0)),
        }
    }

    /// Convert into a located [`Diagnostic`].
    pub fn to_diagnostic(&self, file: Option<String>) -> Diagnostic {
        let mut diagnostic = Diagnostic::with_location(
            file,
            self.position.span_to(self.position),
            self.kind.message(),
            &[],
        );
        diagnostic.message_text = self.text.clone();
        diagnostic
    }
}
