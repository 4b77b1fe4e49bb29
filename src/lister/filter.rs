//! File filtering functionality
//!
//! This module provides regular-expression filters on file names and on the
//! directory part of each file's relative path.

use regex::Regex;

use super::entry::FileEntry;
use super::options::ListOptions;
use crate::errors::{FlistError, FlistResult};

/// Trait for file filters
pub trait FileFilter {
    /// Check if the entry passes the filter
    fn matches(&self, entry: &FileEntry) -> bool;

    /// Get the filter description
    fn description(&self) -> String;
}

/// A compiled regular expression tied to the option it came from
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
    option: &'static str,
}

impl PatternMatcher {
    /// Compile `pattern`; `option` names the flag in error messages
    pub fn new(option: &'static str, pattern: &str) -> FlistResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| FlistError::InvalidPattern {
            option,
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex, option })
    }

    /// Unanchored match anywhere in `candidate`
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn option(&self) -> &'static str {
        self.option
    }
}

/// What part of the entry a pattern is tested against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterTarget {
    /// Base file name
    FileName,
    /// Directory part of the relative path
    Directory,
}

/// Whether a pattern hit keeps or drops the entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterMode {
    Include,
    Exclude,
}

/// Filter for matching an entry against one pattern
#[derive(Debug, Clone)]
pub struct PatternFilter {
    matcher: PatternMatcher,
    target: FilterTarget,
    mode: FilterMode,
}

impl PatternFilter {
    pub fn new(matcher: PatternMatcher, target: FilterTarget, mode: FilterMode) -> Self {
        Self { matcher, target, mode }
    }
}

impl FileFilter for PatternFilter {
    fn matches(&self, entry: &FileEntry) -> bool {
        let hit = match self.target {
            FilterTarget::FileName => self.matcher.is_match(entry.file_name()),
            FilterTarget::Directory => self.matcher.is_match(&entry.dir_part()),
        };
        match self.mode {
            FilterMode::Include => hit,
            FilterMode::Exclude => !hit,
        }
    }

    fn description(&self) -> String {
        let target = match self.target {
            FilterTarget::FileName => "name",
            FilterTarget::Directory => "directory",
        };
        let verb = match self.mode {
            FilterMode::Include => "matches",
            FilterMode::Exclude => "does not match",
        };
        format!("{} {} '{}' ({})", target, verb, self.matcher.pattern(), self.matcher.option())
    }
}

/// All active filters; an entry is accepted only if every filter passes
pub struct FilterSet {
    filters: Vec<Box<dyn FileFilter>>,
}

impl FilterSet {
    /// Compile the configured patterns in order: `-md`, `-sd`, `-m`, `-s`
    pub fn from_options(options: &ListOptions) -> FlistResult<Self> {
        let specs = [
            ("-md", &options.match_dir, FilterTarget::Directory, FilterMode::Include),
            ("-sd", &options.skip_dir, FilterTarget::Directory, FilterMode::Exclude),
            ("-m", &options.match_file, FilterTarget::FileName, FilterMode::Include),
            ("-s", &options.skip_file, FilterTarget::FileName, FilterMode::Exclude),
        ];

        let mut filters: Vec<Box<dyn FileFilter>> = Vec::new();
        for (option, pattern, target, mode) in specs {
            if let Some(pattern) = pattern.as_deref().filter(|p| !p.is_empty()) {
                let matcher = PatternMatcher::new(option, pattern)?;
                filters.push(Box::new(PatternFilter::new(matcher, target, mode)));
            }
        }

        Ok(Self { filters })
    }

    /// Check the entry against every filter
    pub fn accepts(&self, entry: &FileEntry) -> bool {
        self.filters.iter().all(|filter| filter.matches(entry))
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|filter| filter.description()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entry(relative: &str) -> FileEntry {
        FileEntry::new("/root", relative, SystemTime::now(), 1)
    }

    #[test]
    fn test_pattern_matcher_is_unanchored() -> Result<(), Box<dyn std::error::Error>> {
        let matcher = PatternMatcher::new("-m", "log")?;
        assert!(matcher.is_match("b.log"));
        assert!(matcher.is_match("logbook.txt"));
        assert!(!matcher.is_match("a.txt"));

        let anchored = PatternMatcher::new("-m", r"\.log$")?;
        assert!(anchored.is_match("b.log"));
        assert!(!anchored.is_match("b.log.bak"));
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_names_option() {
        let err = PatternMatcher::new("-sd", "[unclosed").unwrap_err();
        match &err {
            FlistError::InvalidPattern { option, pattern, .. } => {
                assert_eq!(*option, "-sd");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
        assert!(err.to_string().contains("-sd"));
    }

    #[test]
    fn test_empty_filter_set_accepts_all() -> Result<(), Box<dyn std::error::Error>> {
        let filters = FilterSet::from_options(&ListOptions::new())?;
        assert!(filters.descriptions().is_empty());
        assert!(filters.accepts(&entry("anything.bin")));
        Ok(())
    }

    #[test]
    fn test_file_filters() -> Result<(), Box<dyn std::error::Error>> {
        let options = ListOptions::new()
            .with_match_file(Some(r"\.log$".to_string()))
            .with_skip_file(Some("^debug".to_string()));
        let filters = FilterSet::from_options(&options)?;

        assert!(filters.accepts(&entry("b.log")));
        assert!(filters.accepts(&entry("logs/c.log")));
        assert!(!filters.accepts(&entry("a.txt")));
        assert!(!filters.accepts(&entry("debug.log")));
        Ok(())
    }

    #[test]
    fn test_directory_filters() -> Result<(), Box<dyn std::error::Error>> {
        let options = ListOptions::new()
            .with_match_dir(Some("^logs".to_string()))
            .with_skip_dir(Some("old".to_string()));
        let filters = FilterSet::from_options(&options)?;

        assert!(filters.accepts(&entry("logs/c.log")));
        assert!(!filters.accepts(&entry("logs/old/c.log")));
        // top-level files have directory part "."
        assert!(!filters.accepts(&entry("b.log")));
        Ok(())
    }

    #[test]
    fn test_dot_directory_for_top_level() -> Result<(), Box<dyn std::error::Error>> {
        let options = ListOptions::new().with_match_dir(Some(r"^\.$".to_string()));
        let filters = FilterSet::from_options(&options)?;

        assert!(filters.accepts(&entry("b.log")));
        assert!(!filters.accepts(&entry("logs/c.log")));
        Ok(())
    }

    #[test]
    fn test_filters_compose_conjunctively() -> Result<(), Box<dyn std::error::Error>> {
        let options = ListOptions::new()
            .with_match_dir(Some("src".to_string()))
            .with_skip_dir(Some("target".to_string()))
            .with_match_file(Some(r"\.rs$".to_string()))
            .with_skip_file(Some("^test_".to_string()));
        let filters = FilterSet::from_options(&options)?;
        assert_eq!(filters.descriptions().len(), 4);

        assert!(filters.accepts(&entry("src/main.rs")));
        assert!(!filters.accepts(&entry("docs/main.rs")));
        assert!(!filters.accepts(&entry("src/target/main.rs")));
        assert!(!filters.accepts(&entry("src/main.c")));
        assert!(!filters.accepts(&entry("src/test_main.rs")));
        Ok(())
    }

    #[test]
    fn test_descriptions() -> Result<(), Box<dyn std::error::Error>> {
        let options = ListOptions::new().with_skip_file(Some("tmp".to_string()));
        let filters = FilterSet::from_options(&options)?;
        assert_eq!(filters.descriptions(), vec!["name does not match 'tmp' (-s)".to_string()]);
        Ok(())
    }
}
