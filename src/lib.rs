//! 将目录下的文件清单输出为 CSV 的库
//!
//! 本库提供：
//! - 当前目录的单线程遍历
//! - 基于正则表达式的文件名/目录过滤
//! - CSV 输出（可选 Shift_JIS 编码）
//! - 文件数量与总大小的摘要
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use flist::lister::{Lister, ListOptions};
//! use flist::sink::{CsvSink, OutputEncoding};
//!
//! let options = ListOptions::new()
//!     .with_match_file(Some(r"\.log$".to_string()))
//!     .with_skip_dir(Some("^target".to_string()));
//!
//! let mut sink = CsvSink::open(None, OutputEncoding::Utf8, true).unwrap();
//! sink.write_header().unwrap();
//!
//! let lister = Lister::new(&options).unwrap()
//!     .with_skip_path(sink.path().map(|p| p.to_path_buf()));
//! let root = std::env::current_dir().unwrap();
//! let summary = lister.run(&root, &mut sink, &mut std::io::stdout()).unwrap();
//! sink.close().unwrap();
//!
//! println!("{} files, {} bytes", summary.num_files(), summary.total_size());
//! ```

pub mod cli;
pub mod errors;
pub mod lister;
pub mod report;
pub mod sink;

// Re-export main types for convenience
pub use errors::{FlistError, FlistResult};
pub use lister::Lister;
