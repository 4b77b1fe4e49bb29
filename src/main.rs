use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, error};

use flist::cli::{normalize_args, Cli};
use flist::lister::Lister;
use flist::report::Reporter;
use flist::sink::CsvSink;

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                eprint!("{}", err);
                std::process::exit(0);
            }
            _ => err.exit(),
        },
    };

    if cli.version {
        eprintln!("{}", Cli::version_line());
        return Ok(());
    }

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let options = cli.build_options();
    debug!("Options: {:?}", options);

    // 编译过滤器，无效的正则表达式在打开 CSV 之前报错
    let lister = Lister::new(&options).context("invalid filter pattern")?;
    let root = std::env::current_dir().context("cannot resolve current directory")?;

    // 打开 CSV；失败时只输出到控制台
    let mut open_error = None;
    let mut sink = if options.no_csv {
        CsvSink::disabled()
    } else {
        match CsvSink::open(options.csv_file.as_deref(), options.encoding, options.include_size) {
            Ok(sink) => sink,
            Err(err) => {
                error!("{}; listing to console only", err);
                open_error = Some(err);
                CsvSink::disabled()
            }
        }
    };
    sink.write_header().context("cannot write CSV header")?;

    let lister = lister.with_skip_path(sink.path().map(Path::to_path_buf));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = lister.run(&root, &mut sink, &mut out).context("listing failed")?;
    sink.close().context("cannot close CSV file")?;

    if !options.no_detail {
        Reporter::new(&root).print(&summary, &mut out)?;
    }
    out.flush()?;

    if let Some(err) = open_error {
        return Err(anyhow::Error::new(err).context("CSV output was not written"));
    }

    Ok(())
}
