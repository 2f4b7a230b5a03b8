//! cmpr-core: lossless byte-stream compression library
//!
//! Two independent codecs, each turning an in-memory byte buffer into a
//! self-describing compressed buffer and back:
//! - RLE: bounded repeat/literal runs behind one-byte service headers
//! - Huffman: frequency-weighted prefix codes with the code table and the
//!   significant bit count carried in the container
//!
//! # Architecture
//!
//! The modules are layered; lower layers know nothing about upper ones:
//! - `bitio`: MSB-first bit packing and fixed-width header fields
//! - `rle`: run-length codec
//! - `huffman`: Huffman codec and container
//! - `codec`: the uniform {encode, decode, postfix} contract
//!
//! # Design Principles
//!
//! - **No panics**: all failures are structured errors
//! - **No partial output**: a call returns a complete buffer or an error
//! - **Stateless codecs**: nothing survives between calls, so instances are
//!   freely shareable across threads
//! - **Deterministic**: identical input always yields an identical stream

pub mod bitio;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod rle;

// Re-export commonly used types
pub use codec::{Algorithm, Codec, HuffmanCodec, RleCodec};
pub use error::{Error, Result};
