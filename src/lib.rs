//! # peakfasta
//!
//! `peakfasta` extracts subsequences from a single reference genome given a
//! tab-separated table of transcription-factor binding peaks, and writes one
//! FASTA file per transcription factor.
//!
//! The pipeline is a linear, single-threaded transformation:
//!
//!  1. Load the genome into one in-memory uppercase sequence
//!     ([`sequences::Genome`]).
//!  2. Parse the peak table with per-row error tolerance
//!     ([`io::parsers::PeakTableIterator`]).
//!  3. Slice and group subsequences by label ([`groups::extract_sequences`]).
//!  4. Serialize the grouped results to per-label FASTA files
//!     ([`io::fasta::write_fasta_outputs`]).
//!
//! Malformed peak rows and invalid coordinate intervals are skipped with a
//! diagnostic collected in a [`reporting::Report`]; only filesystem failures
//! abort a run.

pub mod commands;
pub mod error;
pub mod groups;
pub mod io;
pub mod peaks;
pub mod reporting;
pub mod sequences;
pub mod test_utilities;

/// The type of genomic coordinates.
///
/// Signed, since peak tables can carry negative coordinates; those must be
/// caught by interval validation, not lost to unsigned parsing.
pub type Position = i64;

pub mod prelude {
    pub use crate::error::PeakFastaError;
    pub use crate::groups::{extract_sequences, ExtractedSequence, GroupedSequences};
    pub use crate::io::{
        read_fasta_entries, read_peaks, write_fasta_outputs, InputFile, OutputFile,
        PeakTableIterator,
    };
    pub use crate::peaks::PeakRecord;
    pub use crate::reporting::{CommandOutput, Report};
    pub use crate::sequences::{Genome, Nucleotides};
    pub use crate::Position;
}
