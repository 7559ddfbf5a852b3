//! Error types for descriptor parsing and font construction

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while building a font from a descriptor
///
/// All variants are fatal to construction. Anomalies in otherwise
/// well-formed descriptors (unknown codepoints, orphan kerning pairs)
/// degrade silently instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// A mandatory header line is missing from the descriptor
    #[error("descriptor is missing the `{0}` header line")]
    MissingHeader(&'static str),

    /// A glyph id exceeds the configured maximum
    #[error("glyph id {id} exceeds the maximum id {max}")]
    GlyphIdOutOfRange {
        /// The offending id as declared in the descriptor
        id: u32,
        /// The configured maximum id
        max: u16,
    },

    /// A numeric field failed to parse
    #[error("invalid `{field}` field in a `{line}` line: {source}")]
    InvalidField {
        /// Kind of line being parsed
        line: &'static str,
        /// Name of the positional field
        field: &'static str,
        /// Underlying parse failure
        source: std::num::ParseIntError,
    },

    /// A line ended before all mandatory fields were read
    #[error("`{line}` line is missing the `{field}` field")]
    TruncatedLine {
        /// Kind of line being parsed
        line: &'static str,
        /// Name of the missing positional field
        field: &'static str,
    },
}
