//! litscan_scanner: Decoding the contents of string, template and numeric
//! literals.
//!
//! The decoders are layered, each one built on the next:
//! - [`read_string_contents`] walks a whole literal body
//! - [`read_escaped_char`] decodes one backslash escape
//! - [`read_hex_char`] / [`read_code_point`] read hex and code point escapes
//! - [`read_int`] reads a digit run in radix 2, 8, 10 or 16
//!
//! Every function takes the source text by reference and a [`Position`] by
//! value, and returns the position it stopped at. Problems go to the
//! caller's [`ErrorHandler`](litscan_diagnostics::ErrorHandler).
//!
//! [`Position`]: litscan_core::Position

mod char_codes;
mod contents;
mod escape;
mod hex;
mod int;

pub use contents::{read_string_contents, LegacyScanResult, ScanResult, StringKind};
pub use escape::{read_escaped_char, Escape};
pub use hex::{read_code_point, read_hex_char, HexParse};
pub use int::{read_int, IntOptions, IntParse, SeparatorPolicy};
