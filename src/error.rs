//! The [`PeakFastaError`] `enum` definition and error messages.
//!
use crate::Position;
use thiserror::Error;

/// The [`PeakFastaError`] defines the standard set of errors that should
/// be passed to the user.
///
/// The peak table variants carry the 1-based line number and the raw row
/// content, since those rows are skipped rather than aborting the run and the
/// diagnostic is all the user ever sees of them.
#[derive(Debug, Error)]
pub enum PeakFastaError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    FromUtf8Error(#[from] std::string::FromUtf8Error),

    // Peak table parsing errors. Row-level and recoverable: the reader
    // reports these and continues with the next row.
    #[error("[line {0}] peak table row has fewer than 5 tab-separated columns\nLine: {1}")]
    PeakTableTooFewColumns(u64, String),
    #[error("[line {0}] {1}\nLine: {2}")]
    InvalidPeakRow(u64, String, String),

    // Invalid genomic interval errors
    #[error("Range [{0}, {1}) is invalid for a genome of length {2}")]
    InvalidSequenceRange(Position, Position, usize),
}
