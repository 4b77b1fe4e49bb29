//! 单个文件条目
//!
//! 遍历过程中每个被访问的文件都会投影为一个 `FileEntry`，
//! 写入 CSV 与控制台之后即被丢弃。

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// A visited file, relative to the listing root
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    root: PathBuf,
    relative: PathBuf,
    file_name: String,
    modified: DateTime<Local>,
    size: u64,
}

impl FileEntry {
    /// 创建新的文件条目
    pub fn new(
        root: impl Into<PathBuf>,
        relative: impl Into<PathBuf>,
        modified: SystemTime,
        size: u64,
    ) -> Self {
        let relative = relative.into();
        let file_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            root: root.into(),
            relative,
            file_name,
            modified: DateTime::from(modified),
            size,
        }
    }

    /// Absolute root of the listing
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the root
    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    /// Base file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory part of the relative path, `.` for files directly under the root
    pub fn dir_part(&self) -> String {
        match self.relative.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        }
    }

    /// Modification date as `YYYY-MM-DD`
    pub fn mod_date(&self) -> String {
        self.modified.format("%Y-%m-%d").to_string()
    }

    /// Modification time as `HH:MM:SS`
    pub fn mod_time(&self) -> String {
        self.modified.format("%H:%M:%S").to_string()
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }
}
