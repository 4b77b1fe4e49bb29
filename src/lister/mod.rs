//! 文件列表模块
//!
//! 这个模块遍历根目录，按配置的正则表达式过滤每个文件，
//! 并把通过过滤的文件输出到控制台和 CSV。

pub mod entry;
pub mod filter;
pub mod options;
pub mod walker;

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::FlistResult;
use crate::report::RunSummary;
use crate::sink::CsvSink;

pub use self::entry::FileEntry;
pub use self::filter::{FileFilter, FilterSet};
pub use self::options::ListOptions;
pub use self::walker::FileWalker;

/// 文件列表器
///
/// Holds the compiled filters for one run.
pub struct Lister {
    filters: FilterSet,
    skip_path: Option<PathBuf>,
}

impl Lister {
    /// 编译过滤器；无效的正则表达式在这里报错
    pub fn new(options: &ListOptions) -> FlistResult<Self> {
        let filters = FilterSet::from_options(options)?;
        for description in filters.descriptions() {
            debug!("Filter: {}", description);
        }

        Ok(Self {
            filters,
            skip_path: None,
        })
    }

    /// Leave `path` out of the listing, typically the CSV being written
    pub fn with_skip_path(mut self, path: Option<PathBuf>) -> Self {
        self.skip_path = path;
        self
    }

    /// 遍历 `root`，把每个通过过滤的文件写到 `out` 和 `sink`
    pub fn run<W: Write>(
        &self,
        root: &Path,
        sink: &mut CsvSink,
        out: &mut W,
    ) -> FlistResult<RunSummary> {
        debug!("Listing files under {}", root.display());

        let mut summary = RunSummary::default();
        let walker = FileWalker::new(root).with_skip_path(self.skip_path.clone());

        for entry in walker.filter(|entry| self.filters.accepts(entry)) {
            writeln!(out, "{}", entry.relative_path().display())?;
            sink.write_row(&entry)?;
            summary.record(&entry);
        }

        debug!("Accepted {} files, {} bytes", summary.num_files(), summary.total_size());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::OutputEncoding;
    use std::fs;
    use tempfile::TempDir;

    // a.txt (10 bytes), b.log (5 bytes), logs/c.log (20 bytes)
    fn create_scenario() -> std::io::Result<TempDir> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), [b'a'; 10])?;
        fs::write(temp_dir.path().join("b.log"), [b'b'; 5])?;
        fs::create_dir(temp_dir.path().join("logs"))?;
        fs::write(temp_dir.path().join("logs").join("c.log"), [b'c'; 20])?;
        Ok(temp_dir)
    }

    fn listed(out: &[u8]) -> Vec<String> {
        let mut lines: Vec<String> = String::from_utf8_lossy(out).lines().map(String::from).collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_match_pattern() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = create_scenario()?;
        let options = ListOptions::new().with_match_file(Some(r"\.log$".to_string()));
        let lister = Lister::new(&options)?;

        let mut out = Vec::new();
        let summary = lister.run(temp_dir.path(), &mut CsvSink::disabled(), &mut out)?;

        let expected = Path::new("logs").join("c.log").display().to_string();
        assert_eq!(listed(&out), vec!["b.log".to_string(), expected]);
        assert_eq!(summary.num_files(), 2);
        assert_eq!(summary.total_size(), 25);
        Ok(())
    }

    #[test]
    fn test_skip_pattern() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = create_scenario()?;
        let options = ListOptions::new().with_skip_file(Some(r"\.log$".to_string()));
        let lister = Lister::new(&options)?;

        let mut out = Vec::new();
        let summary = lister.run(temp_dir.path(), &mut CsvSink::disabled(), &mut out)?;

        assert_eq!(listed(&out), vec!["a.txt".to_string()]);
        assert_eq!(summary.num_files(), 1);
        assert_eq!(summary.total_size(), 10);
        Ok(())
    }

    #[test]
    fn test_rows_match_summary_and_skip_output() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = create_scenario()?;
        let csv_path = temp_dir.path().join("list.csv");
        let mut sink = CsvSink::open(Some(&csv_path), OutputEncoding::Utf8, true)?;
        sink.write_header()?;

        let lister = Lister::new(&ListOptions::new())?
            .with_skip_path(sink.path().map(Path::to_path_buf));
        let mut out = Vec::new();
        let summary = lister.run(temp_dir.path(), &mut sink, &mut out)?;
        sink.close()?;

        assert_eq!(summary.num_files(), 3);
        assert_eq!(summary.total_size(), 35);
        assert!(!listed(&out).contains(&"list.csv".to_string()));

        let mut reader = csv::Reader::from_path(&csv_path)?;
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
        assert_eq!(rows.len() as u64, summary.num_files());
        for row in &rows {
            // basepath + path resolves to the listed file
            let full = Path::new(&row[0]).join(&row[1]);
            assert!(full.is_file());
            assert_eq!(Path::new(&row[0]), temp_dir.path());
            assert_eq!(fs::metadata(&full)?.len().to_string(), row[5].to_string());
        }
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_fails_before_walk() {
        let options = ListOptions::new().with_match_dir(Some("(".to_string()));
        assert!(Lister::new(&options).is_err());
    }
}
