//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! pl0c.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for pl0c.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the PL/0 source file.
    #[arg(index = 1)]
    pub input: std::path::PathBuf,

    /// The path the selected reports are written to.
    #[arg(index = 2)]
    pub output: std::path::PathBuf,

    /// Emit the lexeme listing.
    #[arg(short = 'l', long)]
    pub lexemes: bool,

    /// Emit the generated code.
    #[arg(short = 'a', long)]
    pub assembly: bool,

    /// Execute the program and emit the machine trace.
    #[arg(short = 'v', long)]
    pub trace: bool,

    /// Specify the log level of the compiler.
    #[arg(value_enum, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of pl0c.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the compiler, e.g.,
    /// which file is compiled and how large the emitted stream is.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the compiler.
    #[value(alias("3"))]
    Debug,

    /// Log extra information. This can include more precise debug output.
    #[value(alias("4"))]
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
