//! Huffman codec with a self-describing container.
//!
//! Encoding builds a frequency-weighted binary tree over the symbols present
//! in the input, assigns each symbol the prefix-free code spelled by its
//! root-to-leaf path ('0' left, '1' right), and packs the per-symbol codes
//! into a bitstream. The code table travels with the payload, so decoding
//! needs no side channel.
//!
//! # Container Format
//!
//! ```text
//! +----------------------+
//! | bit count B (8)      |  u64, MSB at lowest offset
//! +----------------------+
//! | table size T (4)     |  u32, MSB at lowest offset
//! +----------------------+
//! | code table (T)       |  entries back-to-back, sorted by symbol
//! +----------------------+
//! | payload (ceil(B/8))  |  code bits MSB-first, low bits of the
//! | (variable)           |  last byte are padding
//! +----------------------+
//! ```
//!
//! Table entry:
//!
//! ```text
//! +-------------------+
//! | code length L (1) |  in bits, 1..=255
//! +-------------------+
//! | symbol (1)        |
//! +-------------------+
//! | code (ceil(L/8))  |  MSB-first, trailing bits unused
//! +-------------------+
//! ```
//!
//! # Significant Bit Count
//!
//! The payload's last byte is zero-padded to a byte boundary, and padding is
//! indistinguishable from data. `B` records exactly how many payload bits are
//! real; the decoder stops there and never interprets the padding.
//!
//! # Overhead
//!
//! The container adds `8 + 4 + T` bytes over the packed payload, so very
//! small or very high-entropy inputs come out larger than they went in.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use crate::bitio::{self, BitReader, BitWriter};
use crate::error::{Error, HuffmanError, Result};

/// Byte width of the significant-bit-count header field.
const BIT_COUNT_FIELD: usize = 8;

/// Byte width of the table-size header field.
const TABLE_SIZE_FIELD: usize = 4;

/// Offset of the code table within the container.
const TABLE_OFFSET: usize = BIT_COUNT_FIELD + TABLE_SIZE_FIELD;

/// Longest code expressible in a table entry's one-byte length field.
const MAX_CODE_BITS: usize = 255;

/// A Huffman code: the bit path from root to leaf, in emission order.
type Code = Vec<bool>;

/// Tree node. Nodes live in an arena indexed by `usize` and never escape the
/// encode call.
enum Node {
    Leaf { symbol: u8 },
    Branch { left: usize, right: usize },
}

/// Build the Huffman tree for the given frequency table.
///
/// Returns the node arena and the root index. Ties on weight are broken by
/// insertion order (leaves in symbol order, branches in creation order), which
/// keeps encoder output reproducible.
fn build_tree(freqs: &[u64; 256]) -> (Vec<Node>, usize) {
    let mut arena = Vec::with_capacity(511);

    // Min-heap on (weight, insertion sequence); Reverse flips BinaryHeap's
    // max-heap ordering.
    let mut heap = BinaryHeap::with_capacity(256);
    let mut seq = 0u64;

    for (symbol, &weight) in freqs.iter().enumerate() {
        if weight > 0 {
            arena.push(Node::Leaf {
                symbol: symbol as u8,
            });
            heap.push(Reverse((weight, seq, arena.len() - 1)));
            seq += 1;
        }
    }

    while heap.len() > 1 {
        let Reverse((left_weight, _, left)) = heap.pop().unwrap();
        let Reverse((right_weight, _, right)) = heap.pop().unwrap();

        arena.push(Node::Branch { left, right });
        heap.push(Reverse((left_weight + right_weight, seq, arena.len() - 1)));
        seq += 1;
    }

    let Reverse((_, _, root)) = heap.pop().unwrap();
    (arena, root)
}

/// Depth-first code assignment: left edges append 0, right edges append 1.
///
/// The path accumulator is threaded explicitly; nothing is shared across
/// encode calls. A root that is itself a leaf (single distinct symbol) gets
/// the one-bit code `0` so the payload still carries one bit per symbol.
fn assign_codes(
    arena: &[Node],
    index: usize,
    path: &mut Code,
    codes: &mut BTreeMap<u8, Code>,
) -> Result<()> {
    if path.len() > MAX_CODE_BITS {
        return Err(HuffmanError::CodeTooLong { length: path.len() }.into());
    }

    match arena[index] {
        Node::Leaf { symbol } => {
            let code = if path.is_empty() {
                vec![false]
            } else {
                path.clone()
            };
            codes.insert(symbol, code);
        }
        Node::Branch { left, right } => {
            path.push(false);
            assign_codes(arena, left, path, codes)?;
            path.pop();

            path.push(true);
            assign_codes(arena, right, path, codes)?;
            path.pop();
        }
    }

    Ok(())
}

/// Serialize the code table: entries back-to-back in symbol order.
fn serialize_table(codes: &BTreeMap<u8, Code>) -> Vec<u8> {
    let mut table = Vec::with_capacity(codes.len() * 3);

    for (&symbol, code) in codes {
        table.push(code.len() as u8);
        table.push(symbol);

        let mut writer = BitWriter::new();
        writer.push_bits(code);
        table.extend_from_slice(&writer.finish());
    }

    table
}

/// Parse the code table region back into the symbol-to-code mapping.
///
/// A symbol appearing twice keeps its later entry, mirroring the map
/// semantics the table was generated from.
fn parse_table(table: &[u8]) -> Result<BTreeMap<u8, Code>> {
    let mut codes = BTreeMap::new();
    let mut pos = 0;

    while pos < table.len() {
        if table.len() - pos < 2 {
            return Err(HuffmanError::TruncatedTable {
                claimed: pos + 2,
                available: table.len(),
            }
            .into());
        }

        let len_bits = table[pos] as usize;
        let symbol = table[pos + 1];
        if len_bits == 0 {
            return Err(HuffmanError::EmptyCode { symbol }.into());
        }

        let entry_end = pos + 2 + len_bits.div_ceil(8);
        if entry_end > table.len() {
            return Err(HuffmanError::TruncatedTable {
                claimed: entry_end,
                available: table.len(),
            }
            .into());
        }

        let mut reader = BitReader::new(&table[pos + 2..entry_end]);
        let mut code = Code::with_capacity(len_bits);
        for _ in 0..len_bits {
            code.push(reader.read_bit()?);
        }

        codes.insert(symbol, code);
        pos = entry_end;
    }

    Ok(codes)
}

/// Compress `input` into a self-describing Huffman container.
///
/// # Errors
/// - `Error::EmptyInput` if `input` is empty
/// - `HuffmanError::CodeTooLong` if a code exceeds 255 bits
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut freqs = [0u64; 256];
    for &byte in input {
        freqs[byte as usize] += 1;
    }

    let (arena, root) = build_tree(&freqs);
    let mut codes = BTreeMap::new();
    assign_codes(&arena, root, &mut Code::new(), &mut codes)?;

    // Phase 1: table segment, with its size prepended.
    let mut table = serialize_table(&codes);
    let table_size = table.len() as u64;
    bitio::insert_field(&mut table, 0, table_size, TABLE_SIZE_FIELD)?;

    // Phase 2: pack the per-symbol codes into the payload bitstream.
    let mut writer = BitWriter::new();
    for &byte in input {
        writer.push_bits(&codes[&byte]);
    }
    let bit_count = writer.bit_len() as u64;

    // Phase 3: concatenate and prepend the significant bit count.
    let mut out = table;
    out.extend_from_slice(&writer.finish());
    bitio::insert_field(&mut out, 0, bit_count, BIT_COUNT_FIELD)?;

    Ok(out)
}

/// Decompress a Huffman container back into the original bytes.
///
/// Consumes exactly the declared number of significant bits; trailing padding
/// in the last payload byte is never decoded.
///
/// # Errors
/// All failures are malformed-stream conditions: truncated header or table,
/// a table size inconsistent with the buffer, a bit count larger than the
/// payload, or leftover bits that match no code.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() < TABLE_OFFSET {
        return Err(HuffmanError::TruncatedHeader {
            required: TABLE_OFFSET,
            actual: input.len(),
        }
        .into());
    }

    let bit_count = bitio::read_field(input, 0, BIT_COUNT_FIELD)?;
    let table_size = bitio::read_field(input, BIT_COUNT_FIELD, TABLE_SIZE_FIELD)? as usize;

    if input.len() - TABLE_OFFSET < table_size {
        return Err(HuffmanError::TruncatedTable {
            claimed: table_size,
            available: input.len() - TABLE_OFFSET,
        }
        .into());
    }

    let table_end = TABLE_OFFSET + table_size;
    let codes = parse_table(&input[TABLE_OFFSET..table_end])?;

    // Invert symbol->code for decoding: each accumulated bit pattern is
    // looked up until it lands on a code.
    let decode_map: HashMap<Code, u8> = codes
        .into_iter()
        .map(|(symbol, code)| (code, symbol))
        .collect();

    let payload = &input[table_end..];
    let available = payload.len() as u64 * 8;
    if bit_count > available {
        return Err(HuffmanError::BitCountOverrun {
            declared: bit_count,
            available,
        }
        .into());
    }

    let mut reader = BitReader::new(payload);
    let mut out = Vec::with_capacity(bit_count as usize / 8);
    let mut buffer = Code::new();

    for _ in 0..bit_count {
        buffer.push(reader.read_bit()?);
        if let Some(&symbol) = decode_map.get(&buffer) {
            out.push(symbol);
            buffer.clear();
        }
    }

    if !buffer.is_empty() {
        return Err(HuffmanError::DanglingBits {
            bits: buffer.len(),
        }
        .into());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_symbol_container_layout() {
        // Four 'A': single-leaf tree forced to code "0", B = 4, one table
        // entry (len 1, symbol 0x41, packed code 0x00) so T = 3.
        let encoded = encode(&[0x41, 0x41, 0x41, 0x41]).unwrap();
        assert_eq!(
            encoded,
            vec![
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, // B
                0x00, 0x00, 0x00, 0x03, // T
                0x01, 0x41, 0x00, // table entry
                0x00, // payload: 0000 padded
            ]
        );

        assert_eq!(decode(&encoded).unwrap(), vec![0x41; 4]);
    }

    #[test]
    fn test_two_symbol_round_trip() {
        let input = b"abbabbbab";
        let encoded = encode(input).unwrap();
        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_text_round_trip() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let encoded = encode(input).unwrap();
        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_full_alphabet_round_trip() {
        let input: Vec<u8> = (0..=255).collect();
        let encoded = encode(&input).unwrap();
        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_bit_count_matches_code_lengths() {
        let input = b"aaab";
        let encoded = encode(input).unwrap();

        // Two symbols, one-bit codes each: B = 4.
        let bit_count = bitio::read_field(&encoded, 0, BIT_COUNT_FIELD).unwrap();
        assert_eq!(bit_count, 4);
    }

    #[test]
    fn test_table_sorted_by_symbol() {
        let input = b"zyxzyzz";
        let encoded = encode(input).unwrap();
        let table_size = bitio::read_field(&encoded, BIT_COUNT_FIELD, TABLE_SIZE_FIELD).unwrap();
        let table = &encoded[TABLE_OFFSET..TABLE_OFFSET + table_size as usize];

        let mut symbols = Vec::new();
        let mut pos = 0;
        while pos < table.len() {
            let len_bits = table[pos] as usize;
            symbols.push(table[pos + 1]);
            pos += 2 + len_bits.div_ceil(8);
        }

        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        assert_eq!(symbols, sorted);
    }

    #[test]
    fn test_prefix_property() {
        // No reconstructed code may be a proper prefix of another.
        let input: Vec<u8> = b"mississippi river runs deep".repeat(3);
        let encoded = encode(&input).unwrap();

        let table_size =
            bitio::read_field(&encoded, BIT_COUNT_FIELD, TABLE_SIZE_FIELD).unwrap() as usize;
        let codes = parse_table(&encoded[TABLE_OFFSET..TABLE_OFFSET + table_size]).unwrap();

        let all: Vec<&Code> = codes.values().collect();
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(a.len() >= b.len() || **a != b[..a.len()]);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_output() {
        let input = b"determinism check: equal weights everywhere abcdabcd";
        assert_eq!(encode(input).unwrap(), encode(input).unwrap());
    }

    #[test]
    fn test_truncated_header() {
        let result = decode(&[0x00; 5]);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::TruncatedHeader { .. }))
        ));
    }

    #[test]
    fn test_truncated_table() {
        let mut encoded = encode(b"abcabc").unwrap();
        // Claim a table bigger than the remaining buffer.
        encoded[8..12].copy_from_slice(&u32::MAX.to_be_bytes());

        let result = decode(&encoded);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::TruncatedTable { .. }))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let encoded = encode(b"some payload worth truncating").unwrap();
        let result = decode(&encoded[..encoded.len() - 1]);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::BitCountOverrun { .. }))
        ));
    }

    #[test]
    fn test_zero_length_code_rejected() {
        // Hand-built container: B = 0, T = 2, table entry with length 0.
        let mut container = vec![0u8; 8];
        container.extend_from_slice(&[0x00, 0x00, 0x00, 0x02]);
        container.extend_from_slice(&[0x00, 0x41]);

        let result = decode(&container);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::EmptyCode { symbol: 0x41 }))
        ));
    }

    #[test]
    fn test_dangling_bits_rejected() {
        // Container whose payload never lands on a code: the only entry maps
        // 'A' to "01", but B claims 3 bits of an unmatchable pattern.
        let mut container = vec![0u8; 7];
        container.push(0x03); // B = 3
        container.extend_from_slice(&[0x00, 0x00, 0x00, 0x03]); // T = 3
        container.extend_from_slice(&[0x02, 0x41, 0b0100_0000]); // 'A' = "01"
        container.push(0b1110_0000); // payload: 111

        let result = decode(&container);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::DanglingBits { bits: 3 }))
        ));
    }

    #[test]
    fn test_padding_not_decoded() {
        // Seven 'x' with code "0": B = 7, payload byte 0x00 has one padding
        // bit that must not become an eighth symbol.
        let encoded = encode(&[b'x'; 7]).unwrap();
        assert_eq!(decode(&encoded).unwrap(), vec![b'x'; 7]);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        // The decoder stops at the declared bit count; bytes appended past
        // the payload never get interpreted.
        let input = b"stop at the bit count";
        let mut encoded = encode(input).unwrap();
        encoded.extend_from_slice(&[0xDE, 0xAD]);

        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_skewed_frequencies() {
        let mut input = vec![b'a'; 1000];
        input.extend_from_slice(&[b'b'; 100]);
        input.extend_from_slice(&[b'c'; 10]);
        input.push(b'd');

        let encoded = encode(&input).unwrap();
        assert_eq!(decode(&encoded).unwrap(), input);
        // Heavy skew should compress well below 8 bits/symbol.
        assert!(encoded.len() < input.len() / 2);
    }
}
