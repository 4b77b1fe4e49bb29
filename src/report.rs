//! 运行摘要
//!
//! 累计通过过滤的文件数量和总大小，并在遍历结束后打印。

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::lister::FileEntry;

const SEPARATOR: &str = "---------------------------------------------------------";

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    num_files: u64,
    total_size: u64,
}

impl RunSummary {
    /// Fold an accepted file into the summary
    pub fn record(&mut self, entry: &FileEntry) {
        self.num_files += 1;
        self.total_size += entry.size();
    }

    pub fn num_files(&self) -> u64 {
        self.num_files
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}

/// 摘要输出
pub struct Reporter {
    root: PathBuf,
}

impl Reporter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Print the summary block stamped with the current time
    pub fn print<W: Write>(&self, summary: &RunSummary, out: &mut W) -> io::Result<()> {
        self.print_at(Local::now(), summary, out)
    }

    fn print_at<W: Write>(
        &self,
        now: DateTime<Local>,
        summary: &RunSummary,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Exec Date  : {}", now.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "Root       : {}", self.root.display())?;
        writeln!(out, "NumFiles   : {}", summary.num_files())?;
        writeln!(out, "Total Size : {}", summary.total_size())?;
        writeln!(out)?;
        Ok(())
    }
}
