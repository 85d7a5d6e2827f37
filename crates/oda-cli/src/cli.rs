//! CLI argument definitions for the ODA code tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use oda_model::UnmappedPolicy;

#[derive(Parser)]
#[command(
    name = "oda-codes",
    version,
    about = "ODA code mappings - translate DAC datasets between coding schemes",
    long_about = "Maintain the code mappings derived from OECD structure documents and\n\
                  translate DAC1/DAC2 datasets between legacy and explorer codes.\n\n\
                  Mappings are downloaded on first use and stored as JSON in the\n\
                  schemas directory (ODA_SCHEMAS_DIR or the bundled directory)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding stored mappings (default: ODA_SCHEMAS_DIR or the bundled schemas).
    #[arg(long = "schemas-dir", value_name = "DIR", global = true)]
    pub schemas_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download structure documents and rebuild the stored mappings.
    Update(UpdateArgs),

    /// Print a stored mapping, downloading it first if needed.
    Show(ShowArgs),

    /// Translate the coded columns of a CSV dataset.
    Translate(TranslateArgs),
}

#[derive(Parser)]
pub struct UpdateArgs {
    /// Mapping family to update.
    #[arg(long = "family", value_enum, default_value = "all")]
    pub family: UpdateFamilyArg,

    /// Read the structure document from a file instead of downloading it.
    ///
    /// Requires a single family.
    #[arg(long = "schema-file", value_name = "PATH")]
    pub schema_file: Option<PathBuf>,

    /// Retries for failed downloads, with exponential backoff.
    #[arg(long = "retries", value_name = "N", default_value_t = 2)]
    pub retries: u32,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Mapping name (e.g. dac1_codes_area, dac2_codes_area, area_code_corrections).
    #[arg(value_name = "MAPPING")]
    pub mapping: String,

    /// Show the mapping with keys and values swapped.
    #[arg(long = "invert")]
    pub invert: bool,
}

#[derive(Parser)]
pub struct TranslateArgs {
    /// CSV dataset with preprocessed column names.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the translated CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Which dataset series the input belongs to.
    #[arg(long = "family", value_enum, default_value = "dac2")]
    pub family: DatasetFamilyArg,

    /// Handling of codes missing from the mapping.
    #[arg(long = "unmapped", value_enum, default_value = "pass-through")]
    pub unmapped: UnmappedArg,

    /// The input was not preprocessed (conversion is then refused).
    #[arg(long = "raw")]
    pub raw: bool,

    /// Copy the dataset without converting codes.
    #[arg(long = "keep-codes")]
    pub keep_codes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UpdateFamilyArg {
    Dac1,
    Dac2,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DatasetFamilyArg {
    Dac1,
    Dac2,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnmappedArg {
    PassThrough,
    Warn,
    Fail,
}

impl From<UnmappedArg> for UnmappedPolicy {
    fn from(value: UnmappedArg) -> Self {
        match value {
            UnmappedArg::PassThrough => Self::PassThrough,
            UnmappedArg::Warn => Self::Warn,
            UnmappedArg::Fail => Self::Fail,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
