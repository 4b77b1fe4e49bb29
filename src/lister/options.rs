//! Options for file listing
//!
//! This module holds the configuration record that drives a single listing run.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::sink::OutputEncoding;

/// Options for configuring the listing process
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// File name must match this pattern
    pub match_file: Option<String>,

    /// File name must not match this pattern
    pub skip_file: Option<String>,

    /// Relative directory must match this pattern
    pub match_dir: Option<String>,

    /// Relative directory must not match this pattern
    pub skip_dir: Option<String>,

    /// Do not write a CSV file
    pub no_csv: bool,

    /// Do not print the summary block
    pub no_detail: bool,

    /// Explicit CSV path; a timestamped name is used when absent
    pub csv_file: Option<PathBuf>,

    /// Text encoding of the CSV file
    pub encoding: OutputEncoding,

    /// Whether the CSV carries a `size` column
    pub include_size: bool,
}

impl ListOptions {
    /// Create a new ListOptions with default values
    pub fn new() -> Self {
        Self {
            match_file: None,
            skip_file: None,
            match_dir: None,
            skip_dir: None,
            no_csv: false,
            no_detail: false,
            csv_file: None,
            encoding: OutputEncoding::Utf8,
            include_size: true,
        }
    }

    /// Set the file-match pattern; an empty pattern means no filtering
    pub fn with_match_file(mut self, pattern: Option<String>) -> Self {
        self.match_file = non_empty(pattern);
        self
    }

    /// Set the file-skip pattern
    pub fn with_skip_file(mut self, pattern: Option<String>) -> Self {
        self.skip_file = non_empty(pattern);
        self
    }

    /// Set the directory-match pattern
    pub fn with_match_dir(mut self, pattern: Option<String>) -> Self {
        self.match_dir = non_empty(pattern);
        self
    }

    /// Set the directory-skip pattern
    pub fn with_skip_dir(mut self, pattern: Option<String>) -> Self {
        self.skip_dir = non_empty(pattern);
        self
    }

    /// Set whether CSV output is suppressed
    pub fn with_no_csv(mut self, no_csv: bool) -> Self {
        self.no_csv = no_csv;
        self
    }

    /// Set whether the summary is suppressed
    pub fn with_no_detail(mut self, no_detail: bool) -> Self {
        self.no_detail = no_detail;
        self
    }

    /// Set the CSV output path
    pub fn with_csv_file(mut self, csv_file: Option<PathBuf>) -> Self {
        self.csv_file = csv_file.filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Set the CSV text encoding
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether the `size` column is written
    pub fn with_include_size(mut self, include_size: bool) -> Self {
        self.include_size = include_size;
        self
    }

    /// Create ListOptions from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let encoding = if cli.sjis {
            OutputEncoding::ShiftJis
        } else {
            OutputEncoding::Utf8
        };

        Self::new()
            .with_match_file(cli.match_file.clone())
            .with_skip_file(cli.skip_file.clone())
            .with_match_dir(cli.match_dir.clone())
            .with_skip_dir(cli.skip_dir.clone())
            .with_no_csv(cli.no_csv)
            .with_no_detail(cli.no_detail)
            .with_csv_file(cli.csv_file.clone())
            .with_encoding(encoding)
            .with_include_size(!cli.no_size)
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(pattern: Option<String>) -> Option<String> {
    pattern.filter(|p| !p.is_empty())
}
