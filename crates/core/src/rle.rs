//! Run-length codec.
//!
//! Input is classified into two kinds of bounded runs, each preceded by a
//! one-byte header (the service byte). The compressed stream is just the
//! concatenation of runs; there is no global header.
//!
//! # Stream Format
//!
//! ```text
//! +------------------+
//! | service byte (1) |  bit 7: 1 = repeat, 0 = literal
//! |                  |  bits 6..0: count - bias
//! +------------------+
//! | payload          |  repeat:  1 symbol, emitted `count` times on decode
//! | (variable)       |  literal: `count` symbols, copied verbatim
//! +------------------+
//! ```
//!
//! A repeat run covers 2..=129 equal symbols (bias 2: stored 0 means count 2);
//! a literal run covers 1..=128 symbols each differing from its successor
//! (bias 1). A run that reaches its cap is closed and classification restarts
//! at the next symbol, so e.g. 130 equal symbols encode as a full repeat run
//! followed by a one-symbol literal.

use crate::error::{Error, Result, RleError};

/// Maximum symbols covered by one repeat run.
pub const MAX_REPEAT: usize = 129;

/// Maximum symbols covered by one literal run.
pub const MAX_LITERAL: usize = 128;

/// Service-byte bit distinguishing repeat runs from literal runs.
const REPEAT_TAG: u8 = 0x80;

/// Minimum length of a repeat run; also the repeat count bias.
const REPEAT_BIAS: usize = 2;

/// Minimum length of a literal run; also the literal count bias.
const LITERAL_BIAS: usize = 1;

/// True when the symbol at `pos` opens a repeat run.
fn repeat_starts_at(input: &[u8], pos: usize) -> bool {
    pos + 1 < input.len() && input[pos + 1] == input[pos]
}

/// Compress `input` into a concatenation of service-byte-prefixed runs.
///
/// # Errors
/// `Error::EmptyInput` if `input` is empty.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut out = Vec::with_capacity(input.len() / 2 + 2);
    let mut pos = 0;

    while pos < input.len() {
        if repeat_starts_at(input, pos) {
            let mut count = 2;
            while pos + count < input.len() && input[pos + count] == input[pos] && count < MAX_REPEAT
            {
                count += 1;
            }

            out.push(REPEAT_TAG | (count - REPEAT_BIAS) as u8);
            out.push(input[pos]);
            pos += count;
        } else {
            let start = pos;
            pos += 1;
            while pos < input.len() && pos - start < MAX_LITERAL && !repeat_starts_at(input, pos) {
                pos += 1;
            }

            out.push((pos - start - LITERAL_BIAS) as u8);
            out.extend_from_slice(&input[start..pos]);
        }
    }

    Ok(out)
}

/// Expand a run-length stream back into the original bytes.
///
/// An empty stream decodes to an empty buffer (zero runs).
///
/// # Errors
/// `RleError::TruncatedRun` if the stream ends inside a run payload.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut pos = 0;

    while pos < input.len() {
        let service = input[pos];
        pos += 1;

        if service & REPEAT_TAG != 0 {
            let count = (service & !REPEAT_TAG) as usize + REPEAT_BIAS;
            let symbol = *input.get(pos).ok_or(RleError::TruncatedRun {
                expected: 1,
                available: 0,
            })?;
            pos += 1;

            out.resize(out.len() + count, symbol);
        } else {
            let count = service as usize + LITERAL_BIAS;
            let available = input.len() - pos;
            if count > available {
                return Err(RleError::TruncatedRun {
                    expected: count,
                    available,
                }
                .into());
            }

            out.extend_from_slice(&input[pos..pos + count]);
            pos += count;
        }
    }

    Ok(out)
}
