//! Types and methods for working with the reference genome nucleotide sequence.
//!
//! The loader here is deliberately simple: every non-header line of the input
//! is concatenated into a single uppercase sequence, so the whole reference
//! lives in one addressable coordinate space. This is the right model for
//! single-chromosome microbial references; multi-gigabase genomes would need
//! an indexed or streamed loader instead.

use bytes::Bytes;
use std::fmt;
use std::io::BufRead;
use std::ops::{Deref, Range};
use std::path::PathBuf;
use std::str;

use crate::error::PeakFastaError;
use crate::io::InputFile;
use crate::Position;

/// The marker character that starts a header line in sequence-record input.
pub const HEADER_MARKER: char = '>';

/// A newtype around raw nucleotide [`Bytes`], for making display and
/// slicing operations more convenient.
#[derive(Clone, Debug, PartialEq)]
pub struct Nucleotides(Bytes);

impl fmt::Display for Nucleotides {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Deref for Nucleotides {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Nucleotides {
    fn from(s: String) -> Self {
        Nucleotides(Bytes::from(s.into_bytes()))
    }
}

impl<'a> From<&'a str> for Nucleotides {
    fn from(s: &'a str) -> Self {
        Nucleotides(Bytes::from(s.as_bytes().to_vec()))
    }
}

impl From<Vec<u8>> for Nucleotides {
    fn from(bytes: Vec<u8>) -> Self {
        Nucleotides(Bytes::from(bytes))
    }
}

impl Nucleotides {
    /// Get the length of the nucleotide sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether this is an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single in-memory reference genome sequence.
///
/// Built by [`Genome::from_path`], which discards header lines and
/// concatenates the remaining lines into one uppercase sequence, indexed by
/// zero-based offset. The sequence is immutable for the lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    sequence: Nucleotides,
}

impl Genome {
    /// Wrap an already-assembled sequence. Mostly useful for tests and
    /// generators; real runs go through [`Genome::from_path`].
    pub fn new(sequence: Nucleotides) -> Self {
        Self { sequence }
    }

    /// Load a genome from a sequence-record text file (possibly gzipped).
    ///
    /// Lines whose raw text starts with [`HEADER_MARKER`] are discarded; all
    /// other lines are whitespace-trimmed and concatenated in file order, and
    /// the result is uppercased. The alphabet is not validated: non-ACGT
    /// characters pass through unchanged.
    pub fn from_path(filepath: impl Into<PathBuf>) -> Result<Self, PeakFastaError> {
        let input_file = InputFile::new(filepath);
        let reader = input_file.reader()?;

        let mut sequence = Vec::new();
        for result in reader.lines() {
            let line = result?;
            // the marker must be the first byte of the raw line; a line with
            // whitespace before '>' is sequence data, not a header
            if line.starts_with(HEADER_MARKER) {
                continue;
            }
            sequence.extend_from_slice(line.trim().as_bytes());
        }
        sequence.make_ascii_uppercase();

        Ok(Self {
            sequence: Nucleotides::from(sequence),
        })
    }

    /// Get the length of the genome sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Return whether the genome sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The full genome sequence.
    pub fn sequence(&self) -> &Nucleotides {
        &self.sequence
    }

    /// Extract the subsequence on the half-open interval `[start, end)`.
    ///
    /// The interval is validated against the genome length first; the slice
    /// itself is zero-copy.
    pub fn subsequence(&self, start: Position, end: Position) -> Result<Nucleotides, PeakFastaError> {
        let range = try_range(start, end, self.len())?;
        Ok(Nucleotides(self.sequence.0.slice(range)))
    }
}

/// Validates a proposed zero-based, right-exclusive range against a sequence
/// length, converting it to a `usize` range usable for slicing.
pub fn try_range(
    start: Position,
    end: Position,
    length: usize,
) -> Result<Range<usize>, PeakFastaError> {
    let valid = start >= 0 && start < end && end <= length as Position;
    if !valid {
        return Err(PeakFastaError::InvalidSequenceRange(start, end, length));
    }
    Ok(start as usize..end as usize)
}

#[cfg(test)]
mod tests {
    use super::{try_range, Genome, Nucleotides};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn write_genome_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_strips_headers_and_uppercases() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genome_file(&dir, "genome.txt", ">U00096.3 test record\nacgt\nACGT\n>another header\nacgtac\n");

        let genome = Genome::from_path(&path).expect("could not load genome");
        assert_eq!(*genome.sequence(), Nucleotides::from("ACGTACGTACGTAC"));
        assert_eq!(genome.len(), 14);
    }

    #[test]
    fn test_load_trims_line_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genome_file(&dir, "genome.txt", "  acg\t\nt ta \n");

        let genome = Genome::from_path(&path).unwrap();
        assert_eq!(*genome.sequence(), Nucleotides::from("ACGTTA"));
    }

    #[test]
    fn test_header_marker_must_be_first_byte() {
        // a line with whitespace before '>' is sequence data, matching the
        // raw-line marker check
        let dir = tempfile::tempdir().unwrap();
        let path = write_genome_file(&dir, "genome.txt", ">real header\nacgt\n >not a header\n");

        let genome = Genome::from_path(&path).unwrap();
        assert_eq!(*genome.sequence(), Nucleotides::from("ACGT>NOT A HEADER"));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_genome_file(&dir, "genome.txt", "");

        let genome = Genome::from_path(&path).unwrap();
        assert!(genome.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = Genome::from_path(dir.path().join("nope.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_gzipped_genome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.txt.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b">header\nacgtacgtac\n").unwrap();
        encoder.finish().unwrap();

        let genome = Genome::from_path(&path).unwrap();
        assert_eq!(*genome.sequence(), Nucleotides::from("ACGTACGTAC"));
    }

    #[test]
    fn test_subsequence_scenario() {
        // genome "ACGTACGTAC", peak (2, 5) -> "GTA"
        let genome = Genome::new(Nucleotides::from("ACGTACGTAC"));
        let seq = genome.subsequence(2, 5).unwrap();
        assert_eq!(seq, Nucleotides::from("GTA"));
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_subsequence_bounds() {
        let genome = Genome::new(Nucleotides::from("ACGTACGTAC"));

        // end exceeds genome length
        assert!(genome.subsequence(8, 12).is_err());
        // negative start
        assert!(genome.subsequence(-1, 4).is_err());
        // inverted and empty intervals
        assert!(genome.subsequence(5, 5).is_err());
        assert!(genome.subsequence(6, 2).is_err());

        // the full sequence is a valid interval
        assert_eq!(genome.subsequence(0, 10).unwrap().len(), 10);
    }

    #[test]
    fn test_try_range_width() {
        let range = try_range(2, 9, 10).unwrap();
        assert_eq!(range.len(), 7);
    }
}
