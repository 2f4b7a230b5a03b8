//! Sample input generation.
//!
//! `gen-sample` writes data with mixed compressibility so both codecs have
//! something to show: long byte runs (RLE territory, including runs past the
//! 129-symbol cap), skewed text-like sections (Huffman territory), short
//! repeating patterns, and incompressible noise.
//!
//! All randomness comes from a seeded ChaCha8 RNG; the same seed and size
//! always produce the same bytes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Generate `size_bytes` of deterministic sample data.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section: u8 = rng.gen_range(0..10);
        let remaining = size_bytes - data.len();

        match section {
            // Long single-byte runs, frequently longer than one repeat run
            // can hold
            0..=2 => {
                let symbol: u8 = rng.gen();
                let run = rng.gen_range(20..400).min(remaining);
                data.extend(std::iter::repeat(symbol).take(run));
            }

            // Skewed small alphabet: letter frequencies fall off steeply, so
            // Huffman codes spread across several lengths
            3..=5 => {
                let alphabet = b"etaoin shrdlu.";
                let len = rng.gen_range(200..2000).min(remaining);
                for _ in 0..len {
                    // Two draws, keep the smaller: earlier letters dominate
                    let idx = rng
                        .gen_range(0..alphabet.len())
                        .min(rng.gen_range(0..alphabet.len()));
                    data.push(alphabet[idx]);
                }
            }

            // Short repeating pattern
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(2..16)).map(|_| rng.gen()).collect();
                let len = rng.gen_range(100..1000).min(remaining);
                for i in 0..len {
                    data.push(pattern[i % pattern.len()]);
                }
            }

            // Incompressible noise
            _ => {
                let len = rng.gen_range(100..1000).min(remaining);
                for _ in 0..len {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate sample data and write it to `path`.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}
