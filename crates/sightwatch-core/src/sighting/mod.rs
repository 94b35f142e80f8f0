//! Sighting report field extraction module.

pub mod anchors;
mod parser;

pub use anchors::{Anchor, Field, ValueSplit, ANCHORS};
pub use parser::{
    char_prefix, extract_description, ParseResult, SightingParser, DESCRIPTION_END_MARKERS,
    DESCRIPTION_LABEL, FREE_FORM_LIMIT,
};

/// Trait for sighting report parsers.
///
/// Parsing is total: every input, including the empty string, yields a
/// record with every field set (to a sentinel when nothing matched).
pub trait FieldParser: Send + Sync {
    /// Parse report fields from extracted text.
    fn parse(&self, text: &str, filename: &str) -> ParseResult;
}
