//! Implementations of each command in the command line tool.

use log::info;
use std::path::Path;

use crate::error::PeakFastaError;
use crate::groups::extract_sequences;
use crate::io::{read_peaks, write_fasta_outputs};
use crate::reporting::{CommandOutput, Report};
use crate::sequences::Genome;

/// Extract per-label FASTA files from a reference genome and a peak table.
///
/// Runs the full pipeline: load genome, read peaks, extract and group, write
/// one FASTA file per label. When `label` is given it is trimmed and matched
/// case-sensitively against the extracted groups; an unmatched label is a
/// deliberate early exit that writes nothing and reports the available
/// labels.
pub fn extract_fasta(
    genome_path: &Path,
    peaks_path: &Path,
    outdir: &Path,
    label: Option<&str>,
) -> Result<CommandOutput<()>, PeakFastaError> {
    let mut report = Report::new();

    info!("loading genome from {}", genome_path.display());
    let genome = Genome::from_path(genome_path)?;
    info!("loaded genome of {} bp", genome.len());

    info!("reading peak table from {}", peaks_path.display());
    let peaks = read_peaks(peaks_path, &mut report)?;
    info!("parsed {} peak records", peaks.len());

    let mut groups = extract_sequences(&peaks, &genome, &mut report);

    if let Some(label) = label {
        let wanted = label.trim();
        match groups.select_label(wanted) {
            Some(selected) => {
                info!("restricting output to label '{}'", wanted);
                groups = selected;
            }
            None => {
                let available: Vec<&str> = groups.labels().collect();
                report.add_issue(format!(
                    "label '{}' not found in peak table; available labels: {}",
                    wanted,
                    available.join(", ")
                ));
                return Ok(CommandOutput::new((), report));
            }
        }
    }

    write_fasta_outputs(&groups, outdir)?;
    info!(
        "wrote {} sequences across {} label file(s) to {}",
        groups.num_sequences(),
        groups.len(),
        outdir.display()
    );

    Ok(CommandOutput::new((), report))
}
