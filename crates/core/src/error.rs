//! Error types for the compression library.
//!
//! All operations return structured errors rather than panicking.
//! Codec calls either succeed with a complete result or fail with a single
//! typed error; no partial output is ever returned.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Empty input: encode was handed nothing to work with
/// - Bit I/O: reading/writing bits or header fields in byte buffers
/// - RLE: malformed run-length streams
/// - Huffman: malformed containers or codec construction failures
#[derive(Debug, Error)]
pub enum Error {
    /// Encode called with a zero-length buffer. Huffman cannot build a tree
    /// from it and RLE has nothing to classify; the caller must handle this.
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// Bit I/O operation failed (e.g., reading a field past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// RLE stream error (e.g., run payload cut short)
    #[error("RLE stream error: {0}")]
    Rle(#[from] RleError),

    /// Huffman codec error (e.g., truncated table, unknown code)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),
}

impl Error {
    /// Whether this error means the decoder was given a damaged or truncated
    /// compressed stream (as opposed to an encode-side failure).
    pub fn is_malformed_stream(&self) -> bool {
        match self {
            Error::EmptyInput => false,
            Error::BitIo(BitIoError::UnexpectedEof { .. }) => true,
            Error::BitIo(_) => false,
            Error::Rle(_) => true,
            Error::Huffman(e) => !matches!(e, HuffmanError::CodeTooLong { .. }),
        }
    }
}

/// Bit-level I/O and header-field errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of stream: need {needed} bytes at offset {offset}, have {available}")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Header field width outside the supported 1..=8 byte range
    #[error("invalid field width: {0} (must be 1..=8)")]
    InvalidFieldWidth(usize),

    /// Value does not fit in the requested field width
    #[error("value {value} does not fit in a {width}-byte field")]
    FieldOverflow { value: u64, width: usize },
}

/// RLE stream errors.
#[derive(Debug, Error)]
pub enum RleError {
    /// A service byte promised more payload than the stream contains
    #[error("run payload truncated: expected {expected} bytes, {available} remain")]
    TruncatedRun { expected: usize, available: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Container too short to hold the bit-count and table-size fields
    #[error("container header truncated: {actual} bytes, need at least {required}")]
    TruncatedHeader { required: usize, actual: usize },

    /// Declared table size inconsistent with the buffer, or an entry runs
    /// past the end of the table region
    #[error("code table truncated: table claims {claimed} bytes, {available} available")]
    TruncatedTable { claimed: usize, available: usize },

    /// A table entry declared a zero-bit code
    #[error("zero-length code for symbol {symbol:#04x}")]
    EmptyCode { symbol: u8 },

    /// Significant-bit count exceeds the bits actually present in the payload
    #[error("significant bit count {declared} exceeds available payload bits {available}")]
    BitCountOverrun { declared: u64, available: u64 },

    /// All significant bits consumed but the bit buffer still holds an
    /// incomplete code
    #[error("{bits} trailing bits do not form a known code")]
    DanglingBits { bits: usize },

    /// During encode, a code grew past the one-byte length field
    #[error("code length {length} exceeds maximum 255")]
    CodeTooLong { length: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
