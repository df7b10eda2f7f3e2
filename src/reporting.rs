//! Types for standardized reports to the user about skipped rows and records.
//!
//! Pipeline components never print: they append issues to a [`Report`] passed
//! in by the caller. The command line tool drains the report into its log
//! sink, and tests assert directly on the collected entries.

/// The [`CommandOutput<U>`] type is generic over some data output from a
/// command, and a [`Report`] of diagnostics collected while it ran.
pub struct CommandOutput<U> {
    value: U,
    report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }

    /// The command's data output.
    pub fn value(&self) -> &U {
        &self.value
    }

    /// The diagnostics collected while the command ran.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Split into the data output and the report.
    pub fn into_parts(self) -> (U, Report) {
        (self.value, self.report)
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal issue encountered during processing.
    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    /// Iterate over the collected issues, oldest first.
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
