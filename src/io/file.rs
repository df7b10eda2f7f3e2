//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and
//! gzip-compressed files through a common interface, so the rest of the
//! pipeline never has to care which it was handed.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// The gzip magic numbers.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check if a file is gzipped by looking for the magic numbers.
///
/// Files shorter than the magic are treated as plaintext, so an empty input
/// is readable rather than an error.
fn is_gzipped_file(filepath: &Path) -> io::Result<bool> {
    let file = File::open(filepath)?;
    let mut buffer = Vec::with_capacity(GZIP_MAGIC.len());
    file.take(GZIP_MAGIC.len() as u64).read_to_end(&mut buffer)?;
    Ok(buffer == GZIP_MAGIC)
}

/// Represents an input file.
///
/// This struct is used to handle read operations on an input file, both
/// plaintext and gzip-compressed. Compression is detected from the file
/// contents, not the file name.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader, transparently
    /// decompressing gzip input.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped_file(&self.filepath)? {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

/// Represents an output file.
///
/// Opening the writer truncates any existing file. A `.gz` extension switches
/// on gzip compression of the written stream.
pub struct OutputFile {
    pub filepath: PathBuf,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered writer.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let is_gzip = self
            .filepath
            .extension()
            .map_or(false, |ext| ext == "gz");
        let file = File::create(&self.filepath)?;
        let writer: Box<dyn Write> = if is_gzip {
            Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Box::new(BufWriter::new(file))
        };
        Ok(writer)
    }
}
