//! Conversion error types.

/// Error raised inside the conversion pipeline.
///
/// [`Converter::convert`](crate::Converter::convert) never returns these;
/// they surface only through [`Converter::try_convert`](crate::Converter::try_convert).
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input contains a character that cannot appear in an HTML document.
    #[error("invalid character at byte offset {offset}")]
    InvalidCharacter {
        /// Byte offset of the offending character.
        offset: usize,
    },

    /// Input exceeds the configured size limit.
    #[error("input is {len} bytes, limit is {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Writing markup failed (e.g. an invalid timestamp format).
    #[error("failed to write markup: {0}")]
    Format(#[from] std::fmt::Error),

    /// A pipeline stage panicked.
    #[error("internal conversion failure: {0}")]
    Internal(String),
}
