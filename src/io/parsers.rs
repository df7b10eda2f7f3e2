//! Peak table parsing, which wraps the [`csv`] crate's tab-delimited reading
//! with per-row error recovery.
//!
//! A malformed row is a diagnostic, not a failure: [`PeakTableIterator`]
//! yields one `Result` per row so the caller can report and skip bad rows
//! without aborting the run. Only I/O failures are escalated.

use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::PathBuf;

use crate::error::PeakFastaError;
use crate::io::file::InputFile;
use crate::peaks::PeakRecord;
use crate::reporting::Report;
use crate::Position;

/// The minimum number of tab-separated fields a peak table row must have.
pub const PEAK_TABLE_MIN_COLUMNS: usize = 5;

/// Build a tab-delimited reader over a (possibly gzipped) peak table.
///
/// The first line is a column header and is skipped unconditionally, without
/// validating its names. Field counts are not enforced at this layer, and
/// quoting is disabled so label fields pass through verbatim.
pub fn build_peak_table_reader(
    filepath: impl Into<PathBuf>,
) -> Result<Reader<Box<dyn Read>>, PeakFastaError> {
    let input_file = InputFile::new(filepath);
    let stream: Box<dyn Read> = Box::new(input_file.reader()?);

    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(stream);
    Ok(reader)
}

/// One raw peak table row: the first five tab-separated columns, in file
/// order. Only the label and the two coordinate columns are consumed
/// downstream; the leading columns exist for positional deserialization.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct PeakTableRow {
    dataset: String,
    site: String,
    tf_name: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    peak_start: Position,
    #[serde(deserialize_with = "deserialize_coordinate")]
    peak_end: Position,
}

/// Deserializes a coordinate column: parsed as a float, then truncated toward
/// zero. Fractional coordinates are accepted by upstream convention;
/// non-finite values are rejected since they have no integer counterpart.
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;
    let value: f64 = raw
        .parse()
        .map_err(|e| DeError::custom(format!("could not parse coordinate '{}': {}", raw, e)))?;
    if !value.is_finite() {
        return Err(DeError::custom(format!(
            "coordinate '{}' is not finite",
            raw
        )));
    }
    Ok(value.trunc() as Position)
}

fn raw_line(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join("\t")
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

/// Parse one peak table record into a [`PeakRecord`].
fn parse_peak_record(record: &StringRecord) -> Result<PeakRecord, PeakFastaError> {
    if record.len() < PEAK_TABLE_MIN_COLUMNS {
        return Err(PeakFastaError::PeakTableTooFewColumns(
            record_line(record),
            raw_line(record),
        ));
    }

    // trailing columns beyond the first five are ignored
    let head: StringRecord = record.iter().take(PEAK_TABLE_MIN_COLUMNS).collect();
    let row: PeakTableRow = head.deserialize(None).map_err(|e| {
        PeakFastaError::InvalidPeakRow(record_line(record), e.to_string(), raw_line(record))
    })?;

    Ok(PeakRecord::new(row.tf_name, row.peak_start, row.peak_end))
}

/// An iterator over peak table rows, yielding one [`PeakRecord`] result per
/// row.
pub struct PeakTableIterator {
    inner: StringRecordsIntoIter<Box<dyn Read>>,
}

impl std::fmt::Debug for PeakTableIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeakTableIterator").finish_non_exhaustive()
    }
}

impl PeakTableIterator {
    /// Create a new parsing iterator over a peak table file.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, PeakFastaError> {
        let reader = build_peak_table_reader(filepath)?;
        Ok(Self {
            inner: reader.into_records(),
        })
    }
}

impl Iterator for PeakTableIterator {
    type Item = Result<PeakRecord, PeakFastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(record) => Some(parse_peak_record(&record)),
            Err(e) if e.is_io_error() => Some(Err(PeakFastaError::IOError(e.into()))),
            Err(e) => {
                let line = e.position().map_or(0, |position| position.line());
                Some(Err(PeakFastaError::InvalidPeakRow(
                    line,
                    e.to_string(),
                    String::new(),
                )))
            }
        }
    }
}

/// Read all valid peak records from a peak table, preserving file order.
///
/// Row-level malformation is recorded in `report` and the row skipped; I/O
/// failures abort the read.
pub fn read_peaks(
    filepath: impl Into<PathBuf>,
    report: &mut Report,
) -> Result<Vec<PeakRecord>, PeakFastaError> {
    let mut peaks = Vec::new();
    for result in PeakTableIterator::new(filepath)? {
        match result {
            Ok(record) => peaks.push(record),
            Err(error @ PeakFastaError::IOError(_)) => return Err(error),
            Err(error) => report.add_issue(error.to_string()),
        }
    }
    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::read_peaks;
    use crate::peaks::PeakRecord;
    use crate::reporting::Report;

    const HEADER: &str = "dataset\tsite\tTF_name\tPeak_start\tPeak_end\n";

    fn write_peak_table(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("peaks.tsv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_valid_rows_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!(
            "{}d1\ts1\tCRP\t10\t25\nd2\ts2\tFNR\t5\t9\nd3\ts3\tCRP\t2\t4\n",
            HEADER
        );
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();

        assert!(report.is_empty());
        assert_eq!(
            peaks,
            vec![
                PeakRecord::new("CRP", 10, 25),
                PeakRecord::new("FNR", 5, 9),
                PeakRecord::new("CRP", 2, 4),
            ]
        );
    }

    #[test]
    fn test_float_coordinates_truncate_toward_zero() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\tCRP\t10.9\t25.2\nd\ts\tFNR\t-0.5\t3.0\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();

        assert!(report.is_empty());
        assert_eq!(peaks[0], PeakRecord::new("CRP", 10, 25));
        assert_eq!(peaks[1], PeakRecord::new("FNR", 0, 3));
    }

    #[test]
    fn test_short_row_is_skipped_with_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\tCRP\t10\t25\nd\ts\tFNR\t5\nd\ts\tArcA\t1\t4\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();

        // the malformed row never aborts the run; later rows still parse
        assert_eq!(
            peaks,
            vec![PeakRecord::new("CRP", 10, 25), PeakRecord::new("ArcA", 1, 4)]
        );
        assert_eq!(report.len(), 1);
        let issue = report.issues().next().unwrap();
        assert!(issue.contains("[line 3]"), "issue was: {}", issue);
        assert!(issue.contains("d\ts\tFNR\t5"), "issue was: {}", issue);
    }

    #[test]
    fn test_unparsable_coordinate_is_skipped_with_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\tCRP\tten\t25\nd\ts\tFNR\t5\t9\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();

        assert_eq!(peaks, vec![PeakRecord::new("FNR", 5, 9)]);
        assert_eq!(report.len(), 1);
        let issue = report.issues().next().unwrap();
        assert!(issue.contains("[line 2]"), "issue was: {}", issue);
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\tCRP\tNaN\t25\nd\ts\tFNR\tinf\t9\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();

        assert!(peaks.is_empty());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_label_is_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\t Fis \t1\t4\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();
        assert_eq!(peaks[0].label, " Fis ");
    }

    #[test]
    fn test_first_line_always_skipped() {
        // even a data-like first line is treated as the header
        let dir = tempfile::tempdir().unwrap();
        let path = write_peak_table(&dir, "d\ts\tCRP\t10\t25\nd\ts\tFNR\t5\t9\n");

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();
        assert_eq!(peaks, vec![PeakRecord::new("FNR", 5, 9)]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let table = format!("{}d\ts\tCRP\t10\t25\textra\tmore\n", HEADER);
        let path = write_peak_table(&dir, &table);

        let mut report = Report::new();
        let peaks = read_peaks(&path, &mut report).unwrap();
        assert!(report.is_empty());
        assert_eq!(peaks, vec![PeakRecord::new("CRP", 10, 25)]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = Report::new();
        assert!(read_peaks(dir.path().join("nope.tsv"), &mut report).is_err());
    }
}
