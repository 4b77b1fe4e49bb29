//! CSV 输出模块
//!
//! 负责打开目标文件（必要时创建父目录）、写入表头和数据行。
//! 每一行写入后立即刷新，进程中途终止时已写入的内容仍然有效。

pub mod encoding;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{Terminator, WriterBuilder};
use log::debug;

use crate::errors::{FlistError, FlistResult};
use crate::lister::FileEntry;

pub use self::encoding::{OutputEncoding, ShiftJisWriter};

const HEADER: [&str; 6] = ["basepath", "path", "filename", "mod-date", "mod-time", "size"];

/// Default CSV file name for a run started at `now`
pub fn default_csv_name(now: DateTime<Local>) -> String {
    now.format("filelist-%Y%m%d-%H%M%S.csv").to_string()
}

/// CSV 输出目标
///
/// A disabled sink accepts every call and writes nothing, so callers never
/// need to check whether CSV output is on.
pub struct CsvSink {
    writer: Option<csv::Writer<Box<dyn Write>>>,
    path: Option<PathBuf>,
    include_size: bool,
    header_written: bool,
}

impl CsvSink {
    /// 打开 CSV 文件并截断已有内容
    pub fn open(
        filename: Option<&Path>,
        encoding: OutputEncoding,
        include_size: bool,
    ) -> FlistResult<Self> {
        let path = match filename {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(default_csv_name(Local::now())),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!("Creating directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|source| FlistError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut open_options = OpenOptions::new();
        open_options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            open_options.mode(0o600);
        }
        let file = open_options.open(&path).map_err(|source| FlistError::OpenOutput {
            path: path.clone(),
            source,
        })?;

        debug!("Writing CSV to {}", path.display());
        let writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(encoding.wrap(file));

        Ok(Self {
            writer: Some(writer),
            path: Some(resolve_path(&path)?),
            include_size,
            header_written: false,
        })
    }

    /// A sink that writes nothing
    pub fn disabled() -> Self {
        Self {
            writer: None,
            path: None,
            include_size: true,
            header_written: false,
        }
    }

    /// Absolute path of the output file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the header row; later calls do nothing
    pub fn write_header(&mut self) -> FlistResult<()> {
        if self.header_written {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let columns = if self.include_size { &HEADER[..] } else { &HEADER[..5] };
        writer.write_record(columns)?;
        writer.flush()?;
        self.header_written = true;
        Ok(())
    }

    /// Write one data row and flush it
    pub fn write_row(&mut self, entry: &FileEntry) -> FlistResult<()> {
        if self.writer.is_none() {
            return Ok(());
        }
        self.write_header()?;

        let mut record = vec![
            entry.root().to_string_lossy().into_owned(),
            entry.relative_path().to_string_lossy().into_owned(),
            entry.file_name().to_string(),
            entry.mod_date(),
            entry.mod_time(),
        ];
        if self.include_size {
            record.push(entry.size().to_string());
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.write_record(&record)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and release the file
    pub fn close(mut self) -> FlistResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Canonical path of the opened file, falling back to a lexical absolute path
fn resolve_path(path: &Path) -> FlistResult<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}
