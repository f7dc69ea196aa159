//! litscan_core: Core types for the litscan literal decoder.
//!
//! Provides the `Position` cursor threaded through every decoding routine
//! and the text spans used to point diagnostics back into the source.

pub mod position;
pub mod text;

// Re-export commonly used types
pub use position::Position;
pub use text::{TextPos, TextSpan};
