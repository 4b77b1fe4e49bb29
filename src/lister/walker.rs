//! 文件系统遍历功能
//!
//! 本模块提供遍历文件系统并产出文件条目的迭代器。过滤不在这里进行。

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use super::entry::FileEntry;

/// 基于迭代器的文件系统遍历器
///
/// Yields every non-directory entry under the root. Entries that cannot be
/// read are logged and skipped.
pub struct FileWalker {
    inner: walkdir::IntoIter,
    root_path: PathBuf,
    // root-relative path of a file to leave out
    skip_relative: Option<PathBuf>,
}

impl FileWalker {
    /// 使用给定的根目录创建新的 FileWalker
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root_path = root.as_ref().to_path_buf();
        let walker = WalkDir::new(&root_path).follow_links(false);

        Self {
            inner: walker.into_iter(),
            root_path,
            skip_relative: None,
        }
    }

    /// Never yield the file at `path`
    ///
    /// Both `path` and the root are resolved first, so spellings such as
    /// `out/../list.csv` still name the same file. A path outside the root
    /// or one that does not exist is ignored.
    pub fn with_skip_path(mut self, path: Option<PathBuf>) -> Self {
        self.skip_relative = path.and_then(|path| {
            let root = fs::canonicalize(&self.root_path).ok()?;
            let path = fs::canonicalize(path).ok()?;
            path.strip_prefix(&root).ok().map(Path::to_path_buf)
        });
        self
    }

    /// 将目录条目转换为文件条目，目录和不可读的条目返回 None
    fn process_entry(&self, entry: DirEntry) -> Option<FileEntry> {
        if entry.file_type().is_dir() {
            return None;
        }

        let relative = entry
            .path()
            .strip_prefix(&self.root_path)
            .unwrap_or(entry.path())
            .to_path_buf();
        if self.skip_relative.as_deref() == Some(relative.as_path()) {
            debug!("Skipping output file {}", entry.path().display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path().display(), err);
                return None;
            }
        };
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(err) => {
                debug!("Skipping {}: {}", entry.path().display(), err);
                return None;
            }
        };

        Some(FileEntry::new(&self.root_path, relative, modified, metadata.len()))
    }
}

impl Iterator for FileWalker {
    type Item = FileEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if let Some(entry) = self.process_entry(entry) {
                        return Some(entry);
                    }
                }
                Err(err) => debug!("Walk error: {}", err),
            }
        }
    }
}
