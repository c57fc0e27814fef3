//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mxmeta_cli::logging::LogFormat;
use mxmeta_core::SourceFormat;
use mxmeta_standards::VocabularyKind;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "mxmeta",
    version,
    about = "Extract crystallography metadata from mmCIF files, XDS logs and CBF headers",
    long_about = "Extract a uniform metadata tree from macromolecular crystallography files.\n\n\
                  Reads mmCIF / PDBx entries, XDS CORRECT.LP processing logs and miniCBF\n\
                  image headers, and prints the result as JSON, an indented tree or a table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    /// Extract metadata from one file.
    Extract(ExtractArgs),

    /// Look up the canonical term for a value in a vocabulary.
    Vocab(VocabArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// mmCIF file, XDS CORRECT.LP log or miniCBF image.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source format (detected from the file name and contents by default).
    #[arg(long = "format", value_enum, default_value = "auto")]
    pub format: FormatArg,

    /// Diffraction set whose statistics are reported.
    #[arg(long = "set-id", value_name = "ID")]
    pub set_id: Option<String>,

    /// Citation id to report (default: primary).
    #[arg(long = "citation", value_name = "ID")]
    pub citation: Option<String>,

    /// JSON file with import options; flags override its values.
    #[arg(long = "options", value_name = "FILE.json")]
    pub options: Option<PathBuf>,

    /// How to print the result.
    #[arg(long = "output", value_enum, default_value = "json")]
    pub output: OutputArg,

    /// Write JSON output to a file instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VocabArgs {
    /// Vocabulary to search.
    #[arg(value_enum)]
    pub kind: VocabArg,

    /// Value to canonicalize.
    pub value: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Cif,
    Xds,
    Cbf,
}

impl FormatArg {
    pub fn source_format(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Cif => Some(SourceFormat::Cif),
            FormatArg::Xds => Some(SourceFormat::Xds),
            FormatArg::Cbf => Some(SourceFormat::Cbf),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Json,
    Tree,
    Summary,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VocabArg {
    Software,
    Source,
    Detector,
    SpaceGroup,
}

impl VocabArg {
    pub fn kind(self) -> VocabularyKind {
        match self {
            VocabArg::Software => VocabularyKind::Software,
            VocabArg::Source => VocabularyKind::Source,
            VocabArg::Detector => VocabularyKind::Detector,
            VocabArg::SpaceGroup => VocabularyKind::SpaceGroup,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_flags() {
        let cli = Cli::try_parse_from([
            "mxmeta",
            "extract",
            "1abc.cif",
            "--format",
            "cif",
            "--set-id",
            "2",
            "--output",
            "tree",
        ])
        .unwrap();
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.format.source_format(), Some(SourceFormat::Cif));
        assert_eq!(args.set_id.as_deref(), Some("2"));
        assert!(args.output == OutputArg::Tree);
    }

    #[test]
    fn parses_vocab_lookup() {
        let cli = Cli::try_parse_from(["mxmeta", "vocab", "space-group", "P212121"]).unwrap();
        let Command::Vocab(args) = cli.command else {
            panic!("expected vocab");
        };
        assert_eq!(args.kind.kind(), VocabularyKind::SpaceGroup);
        assert_eq!(args.value, "P212121");
    }
}
