//! flist 的命令行接口
//!
//! 本模块提供了命令行参数的解析功能。参数沿用单横线的多字母写法
//! （如 `-md`、`-sjis`），解析前先统一改写为 clap 能识别的形式。

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::lister::options::ListOptions;

/// Flags spelled as whole words, e.g. `-md` or `--md`.
const LONG_FLAGS: &[&str] = &["md", "sd", "no", "nd", "sjis", "nosize", "debug", "version", "help"];

/// Word flags that consume the following argument.
const LONG_VALUE_FLAGS: &[&str] = &["md", "sd"];

/// Single-letter flags that consume the following argument.
const SHORT_VALUE_FLAGS: &[&str] = &["m", "s", "f"];

/// List files under the current directory into a CSV file
#[derive(Parser, Debug)]
#[command(name = "flist", about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// File match pattern (regular expression)
    #[arg(short = 'm', value_name = "REGEX", allow_hyphen_values = true)]
    pub match_file: Option<String>,

    /// File skip pattern (regular expression)
    #[arg(short = 's', value_name = "REGEX", allow_hyphen_values = true)]
    pub skip_file: Option<String>,

    /// Directory match pattern (regular expression)
    #[arg(long = "md", value_name = "REGEX", allow_hyphen_values = true)]
    pub match_dir: Option<String>,

    /// Directory skip pattern (regular expression)
    #[arg(long = "sd", value_name = "REGEX", allow_hyphen_values = true)]
    pub skip_dir: Option<String>,

    /// CSV file name (default: filelist-YYYYMMDD-HHMMSS.csv)
    #[arg(short = 'f', value_name = "FILE", allow_hyphen_values = true)]
    pub csv_file: Option<PathBuf>,

    /// Do not write a CSV file
    #[arg(long = "no")]
    pub no_csv: bool,

    /// Print the file list only, without the summary
    #[arg(long = "nd")]
    pub no_detail: bool,

    /// Write the CSV file in Shift_JIS
    #[arg(long = "sjis")]
    pub sjis: bool,

    /// Omit the size column from the CSV file
    #[arg(long = "nosize")]
    pub no_size: bool,

    /// Enable debug logging
    #[arg(long = "debug")]
    pub debug: bool,

    /// Show version
    #[arg(long = "version")]
    pub version: bool,
}

impl Cli {
    /// 构建列表选项
    pub fn build_options(&self) -> ListOptions {
        ListOptions::from_cli(self)
    }

    /// 版本信息
    pub fn version_line() -> String {
        format!("flist version {}", env!("CARGO_PKG_VERSION"))
    }
}

/// Rewrites word flags to `--word` and letter flags to `-x`, so that both
/// `-md x` and `--md=x` reach clap in a form it accepts. Values following a
/// value-taking flag and everything after `--` are passed through untouched.
/// Switches also take `-no=true` and `-no=false`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expect_value = false;
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough || expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let Some(stripped) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
            normalized.push(arg);
            continue;
        };

        let (name, inline_value) = match stripped.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (stripped, None),
        };

        if LONG_FLAGS.contains(&name) {
            let takes_value = LONG_VALUE_FLAGS.contains(&name);
            expect_value = inline_value.is_none() && takes_value;
            match inline_value.filter(|_| !takes_value).and_then(parse_bool) {
                // `-no=true` sets the switch, `-no=false` leaves it off
                Some(true) => normalized.push(OsString::from(format!("--{}", name))),
                Some(false) => {}
                None => normalized.push(OsString::from(format!("--{}", stripped))),
            }
        } else if SHORT_VALUE_FLAGS.contains(&name) {
            expect_value = inline_value.is_none();
            normalized.push(OsString::from(format!("-{}", stripped)));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}

/// Boolean spellings accepted after `=` on a switch, as Go's `flag` package does
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
