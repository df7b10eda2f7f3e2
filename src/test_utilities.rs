//! Test cases and test utility functions.
//!

use rand::{thread_rng, Rng};

use crate::peaks::PeakRecord;
use crate::sequences::{Genome, Nucleotides};
use crate::Position;

/// The nucleotide alphabet used for random genomes.
pub const ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

// peak width bounds for random peaks
pub const MIN_PEAK_LEN: Position = 1;
pub const MAX_PEAK_LEN: Position = 40;

/// Build a random uppercase genome of length `length`.
pub fn random_genome(length: usize) -> Genome {
    let mut rng = thread_rng();
    let sequence: Vec<u8> = (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect();
    Genome::new(Nucleotides::from(sequence))
}

/// Build a random valid peak record on a genome of length `genome_len`.
/// 0-indexed, right exclusive.
pub fn random_peak(label: &str, genome_len: usize) -> PeakRecord {
    let mut rng = thread_rng();
    let genome_len = genome_len as Position;
    let max_len = MAX_PEAK_LEN.min(genome_len);
    let len = rng.gen_range(MIN_PEAK_LEN..=max_len);
    let start = rng.gen_range(0..=genome_len - len);
    PeakRecord::new(label, start, start + len)
}
