//! Grouping extracted sequences by transcription factor.
//!
//! [`GroupedSequences`] is insertion-ordered at both levels: groups appear in
//! the order their labels are first seen, and entries within a group keep the
//! input row order. No sorting is applied anywhere, so the output is a pure
//! function of input order.

use indexmap::IndexMap;

use crate::peaks::PeakRecord;
use crate::reporting::Report;
use crate::sequences::{Genome, Nucleotides};

/// One extracted subsequence with its synthetic FASTA header.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedSequence {
    pub header: String,
    pub sequence: Nucleotides,
}

impl ExtractedSequence {
    pub fn new(header: impl Into<String>, sequence: Nucleotides) -> Self {
        Self {
            header: header.into(),
            sequence,
        }
    }
}

/// Extracted sequences grouped by label, preserving first-seen label order
/// and input order within each label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupedSequences {
    groups: IndexMap<String, Vec<ExtractedSequence>>,
}

impl GroupedSequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the label's group, creating the group on first use.
    pub fn push(&mut self, label: impl Into<String>, entry: ExtractedSequence) {
        self.groups.entry(label.into()).or_default().push(entry);
    }

    /// The entries for one label, if the label was seen.
    pub fn get(&self, label: &str) -> Option<&[ExtractedSequence]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    /// Labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over `(label, entries)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ExtractedSequence])> {
        self.groups
            .iter()
            .map(|(label, entries)| (label.as_str(), entries.as_slice()))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of extracted sequences across all labels.
    pub fn num_sequences(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// A new set containing only the named group, if present, with its
    /// entries in their original order.
    pub fn select_label(&self, label: &str) -> Option<Self> {
        let entries = self.groups.get(label)?.clone();
        let mut groups = IndexMap::new();
        groups.insert(label.to_string(), entries);
        Some(Self { groups })
    }
}

/// Extract the genome subsequence for every valid peak record, grouping
/// results by label in input order.
///
/// Out-of-bounds or inverted intervals are skipped with a diagnostic naming
/// the offending record; they never abort the run. Each emitted entry gets a
/// synthetic header of the form `>label_start_end`.
pub fn extract_sequences(
    peaks: &[PeakRecord],
    genome: &Genome,
    report: &mut Report,
) -> GroupedSequences {
    let mut groups = GroupedSequences::new();
    for peak in peaks {
        match genome.subsequence(peak.start, peak.end) {
            Ok(sequence) => {
                let header = format!(">{}_{}_{}", peak.label, peak.start, peak.end);
                groups.push(peak.label.clone(), ExtractedSequence::new(header, sequence));
            }
            Err(error) => report.add_issue(format!("skipping peak {}: {}", peak, error)),
        }
    }
    groups
}
