use clap::ValueEnum;
use console::style;
use env_logger::fmt::Formatter;
use env_logger::{Builder, Env};
use log::{Level, LevelFilter, Record};
use std::io::{self, Write};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Coloured, human readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// Initialize logger; `RUST_LOG` takes precedence over `level`
pub fn init_logger(level: LevelFilter, format: LogFormat) {
    let default = level.to_string().to_lowercase();
    let mut builder = Builder::from_env(Env::default().filter_or("RUST_LOG", default));

    match format {
        LogFormat::Text => {
            builder.format(format_text);
        }
        LogFormat::Json => {
            builder.format(format_json);
        }
    }

    builder.init();
}

fn format_text(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let level = match record.level() {
        Level::Error => format!("{}", style("ERROR").red().bold()),
        Level::Warn => format!("{}", style("WARN ").yellow().bold()),
        Level::Info => format!("{}", style("INFO ").green()),
        Level::Debug => format!("{}", style("DEBUG").cyan()),
        Level::Trace => format!("{}", style("TRACE").dim()),
    };
    writeln!(buf, "{} {}", level, record.args())
}

fn format_json(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let line = serde_json::json!({
        "level": record.level().as_str(),
        "target": record.target(),
        "message": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}
