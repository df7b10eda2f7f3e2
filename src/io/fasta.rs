//! Writing grouped sequences as per-label FASTA files, and reading them back.
//!
//! Writing is plain two-line records with no sequence wrapping. Reading back
//! goes through the [`noodles::fasta`] parser so round-trip checks use an
//! independent implementation of the format.

use noodles::fasta::reader;
use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PeakFastaError;
use crate::groups::{ExtractedSequence, GroupedSequences};
use crate::io::file::OutputFile;

/// The file extension used for per-label outputs.
pub const FASTA_EXTENSION: &str = "fasta";

/// Write one `<label>.fasta` file per group into `outdir`.
///
/// The directory (and any missing parents) is created if absent; creation is
/// idempotent. Existing files are truncated. Each entry is written as two
/// lines, the header then the unwrapped sequence, in the group's stored
/// order. Filesystem failures abort the remaining writes.
pub fn write_fasta_outputs(
    groups: &GroupedSequences,
    outdir: &Path,
) -> Result<(), PeakFastaError> {
    create_dir_all(outdir)?;
    for (label, entries) in groups.iter() {
        let path = outdir.join(format!("{}.{}", label, FASTA_EXTENSION));
        let output_file = OutputFile::new(path);
        let mut writer = output_file.writer()?;
        for entry in entries {
            writeln!(writer, "{}", entry.header)?;
            writeln!(writer, "{}", entry.sequence)?;
        }
    }
    Ok(())
}

/// Read a FASTA file back into `(header, sequence)` entries.
///
/// Headers are reconstructed with their leading `>`. Useful for verifying
/// written outputs, or for consuming them downstream.
pub fn read_fasta_entries(
    filepath: impl Into<PathBuf>,
) -> Result<Vec<ExtractedSequence>, PeakFastaError> {
    let filepath = filepath.into();
    let mut reader = reader::Builder.build_from_path(filepath)?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let definition = record.definition();

        let mut header = String::from(">");
        header.push_str(&String::from_utf8(definition.name().to_vec())?);
        if let Some(description) = definition.description() {
            header.push(' ');
            header.push_str(&String::from_utf8(description.to_vec())?);
        }

        let sequence = record.sequence().as_ref().to_vec();
        entries.push(ExtractedSequence::new(header, sequence.into()));
    }
    Ok(entries)
}
