//! File-level compression driver.
//!
//! Reads a source file fully into memory, runs the selected codec, and
//! writes the result next to the input. The codec's postfix tag is the file
//! naming convention: compression appends it, decompression requires it,
//! picks the codec from it, and strips it to recover the output name.

use cmpr_core::codec::{Algorithm, Codec, HUFFMAN_POSTFIX, RLE_POSTFIX};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Failures at the file-driver level.
#[derive(Debug, Error)]
pub enum WorkFileError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressing an empty file is refused before the codec ever runs
    #[error("source file is empty: {}", .0.display())]
    EmptySource(PathBuf),

    /// Decompression needs a recognized postfix to pick the codec
    #[error("no codec postfix on {} (expected {RLE_POSTFIX} or {HUFFMAN_POSTFIX})", .path.display())]
    UnknownPostfix { path: PathBuf },

    /// The codec itself failed (malformed stream on decompress)
    #[error("codec error: {0}")]
    Codec(#[from] cmpr_core::Error),
}

/// Outcome of one compress/decompress run, for the summary line.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

impl RunReport {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, WorkFileError> {
    std::fs::read(path).map_err(|source| WorkFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), WorkFileError> {
    std::fs::write(path, data).map_err(|source| WorkFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Append the codec postfix to a path, preserving any existing extension.
fn tagged_path(input: &Path, algorithm: Algorithm) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(algorithm.postfix());
    input.with_file_name(name)
}

/// Recognize the codec postfix on a path; return the codec and the path with
/// the postfix stripped.
fn untagged_path(input: &Path) -> Option<(Algorithm, PathBuf)> {
    let name = input.file_name()?.to_str()?;

    for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
        if let Some(stem) = name.strip_suffix(algorithm.postfix()) {
            if !stem.is_empty() {
                return Some((algorithm, input.with_file_name(stem)));
            }
        }
    }
    None
}

/// Compress `input` with `algorithm`, writing `<input><postfix>` (or `out`
/// when given).
pub fn compress_file(
    input: &Path,
    algorithm: Algorithm,
    out: Option<&Path>,
) -> Result<RunReport, WorkFileError> {
    let data = read_file(input)?;
    if data.is_empty() {
        return Err(WorkFileError::EmptySource(input.to_path_buf()));
    }

    let started = Instant::now();
    let compressed = algorithm.codec().encode(&data)?;
    let elapsed = started.elapsed();

    let output_path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| tagged_path(input, algorithm));
    write_file(&output_path, &compressed)?;

    Ok(RunReport {
        input_bytes: data.len() as u64,
        output_bytes: compressed.len() as u64,
        output_path,
        elapsed,
    })
}

/// Decompress `input`, inferring the codec from its postfix and stripping the
/// postfix to name the output (or writing to `out` when given).
pub fn decompress_file(input: &Path, out: Option<&Path>) -> Result<RunReport, WorkFileError> {
    let (algorithm, stripped) = untagged_path(input).ok_or_else(|| WorkFileError::UnknownPostfix {
        path: input.to_path_buf(),
    })?;

    let data = read_file(input)?;

    let started = Instant::now();
    let restored = algorithm.codec().decode(&data)?;
    let elapsed = started.elapsed();

    let output_path = out.map(Path::to_path_buf).unwrap_or(stripped);
    write_file(&output_path, &restored)?;

    Ok(RunReport {
        input_bytes: data.len() as u64,
        output_bytes: restored.len() as u64,
        output_path,
        elapsed,
    })
}
