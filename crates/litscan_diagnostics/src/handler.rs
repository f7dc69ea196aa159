//! The error-reporting contract used by the literal decoders.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::DiagnosticCollection;
use litscan_core::Position;
use std::convert::Infallible;
use tracing::debug;

/// Receives every problem the decoders find.
///
/// Each method either records the problem and returns `Ok`, in which case
/// decoding carries on with the recovery documented at the call site, or
/// returns `Err` to abort. The error is propagated unchanged out of whichever
/// entry point the caller used.
pub trait ErrorHandler {
    type Error;

    /// The literal starting at `start` has no closing delimiter.
    fn unterminated(&mut self, start: Position) -> Result<(), Self::Error>;

    /// Legacy octal escape, or `\8`/`\9`, outside a template.
    fn strict_numeric_escape(&mut self, pos: Position) -> Result<(), Self::Error>;

    /// A `\x` or `\u` escape is missing its digits.
    fn invalid_escape_sequence(&mut self, pos: Position) -> Result<(), Self::Error>;

    /// A `\u{...}` value is above `0x10FFFF`.
    fn invalid_code_point(&mut self, pos: Position) -> Result<(), Self::Error>;

    /// A `_` appeared where numeric separators are never allowed.
    fn separator_in_escape_sequence(&mut self, pos: Position) -> Result<(), Self::Error>;

    /// A `_` is not surrounded by two digits.
    fn unexpected_separator_placement(&mut self, pos: Position) -> Result<(), Self::Error>;

    /// A decimal digit at `pos` is out of range for `radix`.
    ///
    /// Returning `Ok(true)` asks the integer reader to treat the digit as `0`
    /// and keep going; `Ok(false)` ends the digit run there.
    fn invalid_digit(&mut self, pos: Position, radix: u32) -> Result<bool, Self::Error>;
}

impl<H: ErrorHandler + ?Sized> ErrorHandler for &mut H {
    type Error = H::Error;

    fn unterminated(&mut self, start: Position) -> Result<(), Self::Error> {
        (**self).unterminated(start)
    }

    fn strict_numeric_escape(&mut self, pos: Position) -> Result<(), Self::Error> {
        (**self).strict_numeric_escape(pos)
    }

    fn invalid_escape_sequence(&mut self, pos: Position) -> Result<(), Self::Error> {
        (**self).invalid_escape_sequence(pos)
    }

    fn invalid_code_point(&mut self, pos: Position) -> Result<(), Self::Error> {
        (**self).invalid_code_point(pos)
    }

    fn separator_in_escape_sequence(&mut self, pos: Position) -> Result<(), Self::Error> {
        (**self).separator_in_escape_sequence(pos)
    }

    fn unexpected_separator_placement(&mut self, pos: Position) -> Result<(), Self::Error> {
        (**self).unexpected_separator_placement(pos)
    }

    fn invalid_digit(&mut self, pos: Position, radix: u32) -> Result<bool, Self::Error> {
        (**self).invalid_digit(pos, radix)
    }
}

/// Permissive handler: records every report and never aborts.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    file: Option<String>,
    recover_invalid_digits: bool,
    errors: Vec<DecodeError>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a file name to the diagnostics produced by [`Self::into_diagnostics`].
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Whether out-of-range decimal digits should be read as `0` instead of
    /// ending the digit run. Off by default.
    pub fn recover_invalid_digits(mut self, recover: bool) -> Self {
        self.recover_invalid_digits = recover;
        self
    }

    /// Everything reported so far, in report order.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    pub fn kinds(&self) -> Vec<DecodeErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_diagnostics(self) -> DiagnosticCollection {
        let mut collection = DiagnosticCollection::new();
        for error in &self.errors {
            collection.add(error.to_diagnostic(self.file.clone()));
        }
        collection
    }

    fn record(&mut self, kind: DecodeErrorKind, pos: Position) {
        debug!(?kind, ?pos, "recording decode diagnostic");
        self.errors.push(DecodeError::new(kind, pos));
    }
}

impl ErrorHandler for DiagnosticCollector {
    type Error = Infallible;

    fn unterminated(&mut self, start: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::Unterminated, start);
        Ok(())
    }

    fn strict_numeric_escape(&mut self, pos: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::StrictNumericEscape, pos);
        Ok(())
    }

    fn invalid_escape_sequence(&mut self, pos: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::InvalidEscapeSequence, pos);
        Ok(())
    }

    fn invalid_code_point(&mut self, pos: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::InvalidCodePoint, pos);
        Ok(())
    }

    fn separator_in_escape_sequence(&mut self, pos: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::SeparatorInEscapeSequence, pos);
        Ok(())
    }

    fn unexpected_separator_placement(&mut self, pos: Position) -> Result<(), Infallible> {
        self.record(DecodeErrorKind::UnexpectedSeparatorPlacement, pos);
        Ok(())
    }

    fn invalid_digit(&mut self, pos: Position, radix: u32) -> Result<bool, Infallible> {
        if self.recover_invalid_digits {
            self.record(DecodeErrorKind::InvalidDigit { radix }, pos);
        }
        Ok(self.recover_invalid_digits)
    }
}

/// Hard-failing handler: the first report becomes an `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictHandler;

impl StrictHandler {
    fn raise(kind: DecodeErrorKind, pos: Position) -> DecodeError {
        debug!(?kind, ?pos, "aborting decode");
        DecodeError::new(kind, pos)
    }
}

impl ErrorHandler for StrictHandler {
    type Error = DecodeError;

    fn unterminated(&mut self, start: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::Unterminated, start))
    }

    fn strict_numeric_escape(&mut self, pos: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::StrictNumericEscape, pos))
    }

    fn invalid_escape_sequence(&mut self, pos: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::InvalidEscapeSequence, pos))
    }

    fn invalid_code_point(&mut self, pos: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::InvalidCodePoint, pos))
    }

    fn separator_in_escape_sequence(&mut self, pos: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::SeparatorInEscapeSequence, pos))
    }

    fn unexpected_separator_placement(&mut self, pos: Position) -> Result<(), DecodeError> {
        Err(Self::raise(DecodeErrorKind::UnexpectedSeparatorPlacement, pos))
    }

    /// Out-of-range digits simply end the run; there is nothing to recover.
    fn invalid_digit(&mut self, _pos: Position, _radix: u32) -> Result<bool, DecodeError> {
        Ok(false)
    }
}
