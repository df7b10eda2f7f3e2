//! Types and methods for reading and parsing input and writing output.

pub mod fasta;
pub mod file;
pub mod parsers;

pub use fasta::{read_fasta_entries, write_fasta_outputs, FASTA_EXTENSION};
pub use file::{InputFile, OutputFile};
pub use parsers::{read_peaks, PeakTableIterator, PEAK_TABLE_MIN_COLUMNS};
