//! CLI argument definitions for the EMR note toolkit.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use emr_model::{EmrField, Suitability};

#[derive(Parser)]
#[command(
    name = "emr",
    version,
    about = "Section, review and export generated clinical notes",
    long_about = "Split generated clinical notes into their sections.\n\n\
                  Recognizes the six primary headings (주호소, 현병력, 과거력,\n\
                  개인력 및 사회력, 계통문진, 신체검진), drops diagnosis and plan\n\
                  sections, records evaluations, and exports the results as\n\
                  CSV or an Excel workbook."
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

    /// Allow note text in trace-level logs.
    ///
    /// Notes and transcripts are patient data; without this flag they are
    /// always redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one generated note into sections.
    Parse(ParseArgs),

    /// Show a dataset overview, or one record in detail.
    Inspect(InspectArgs),

    /// Record the evaluation of one dataset row.
    Annotate(AnnotateArgs),

    /// Export saved evaluation answers as a result CSV or workbook.
    Export(ExportArgs),

    /// List the recognized section labels.
    Labels(LabelArgs),
}

/// Extra headings reported as other sections.
#[derive(Args, Clone, Default)]
pub struct LabelArgs {
    /// Register an extra section heading (repeatable).
    #[arg(long = "extra-label", value_name = "TOKEN")]
    pub extra_labels: Vec<String>,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Note file to parse (reads stdin when omitted).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub labels: LabelArgs,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Dataset CSV or .xlsx workbook with 구분자, 대화 스크립트 and 생성결과 columns.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Show one record (zero-based row) in detail.
    #[arg(long = "row", value_name = "N")]
    pub row: Option<usize>,

    /// Show the record after --row instead (stops at the last record).
    #[arg(long = "next", requires = "row", conflicts_with = "previous")]
    pub next: bool,

    /// Show the record before --row instead (stops at the first record).
    #[arg(long = "previous", requires = "row")]
    pub previous: bool,

    /// Answers JSON used to mark saved records.
    #[arg(long = "annotations", value_name = "PATH")]
    pub annotations: Option<PathBuf>,

    #[command(flatten)]
    pub labels: LabelArgs,
}

#[derive(Parser)]
pub struct AnnotateArgs {
    /// Dataset CSV or .xlsx workbook the answers refer to.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Answers JSON keyed by zero-based row (created when missing).
    #[arg(long = "annotations", value_name = "PATH")]
    pub annotations: PathBuf,

    /// Zero-based row to save.
    #[arg(long = "row", value_name = "N")]
    pub row: usize,

    /// Five Likert scores (1-5), comma separated, in item order.
    #[arg(long = "likert", value_name = "A,B,C,D,E", value_delimiter = ',')]
    pub likert: Option<Vec<u8>>,

    /// Whether the transcript is suitable for evaluation.
    #[arg(long = "suitable", value_name = "Y|N")]
    pub suitable: Option<Suitability>,

    /// Reference EMR text for one field (repeatable); empty text clears it.
    ///
    /// FIELD is a key such as `chief_complaint` or a heading such as 주호소.
    #[arg(long = "field", value_name = "FIELD=TEXT", value_parser = parse_field)]
    pub fields: Vec<(EmrField, String)>,

    /// Move to the following row after saving.
    #[arg(long = "next")]
    pub next: bool,
}

fn parse_field(raw: &str) -> Result<(EmrField, String), String> {
    let (key, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=TEXT, got {raw}"))?;
    Ok((key.parse()?, text.to_string()))
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Dataset CSV or .xlsx workbook the answers refer to.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Answers JSON keyed by zero-based row.
    #[arg(long = "annotations", value_name = "PATH")]
    pub annotations: PathBuf,

    /// Result file to write; a .xlsx extension writes a workbook, anything else CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Export the saved records even if some are still missing.
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
    Html,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_argument_splits_on_first_equals() {
        assert_eq!(
            parse_field("chief_complaint=기침 = 3일"),
            Ok((EmrField::ChiefComplaint, "기침 = 3일".to_string()))
        );
        assert_eq!(
            parse_field("기타="),
            Ok((EmrField::Other, String::new()))
        );
        assert!(parse_field("기침").is_err());
        assert!(parse_field("family=x").is_err());
    }

    #[test]
    fn annotate_arguments_parse() {
        let cli = Cli::try_parse_from([
            "emr",
            "annotate",
            "notes.csv",
            "--annotations",
            "answers.json",
            "--row",
            "1",
            "--likert",
            "5,4,3,2,1",
            "--suitable",
            "N",
            "--field",
            "주호소=두통",
            "--next",
        ])
        .unwrap();
        let Command::Annotate(args) = cli.command else {
            panic!("expected annotate");
        };
        assert_eq!(args.row, 1);
        assert_eq!(args.likert, Some(vec![5, 4, 3, 2, 1]));
        assert_eq!(args.suitable, Some(Suitability::Unsuitable));
        assert_eq!(args.fields, vec![(EmrField::ChiefComplaint, "두통".to_string())]);
        assert!(args.next);
    }

    #[test]
    fn inspect_navigation_requires_row() {
        assert!(Cli::try_parse_from(["emr", "inspect", "notes.csv", "--next"]).is_err());
        assert!(
            Cli::try_parse_from(["emr", "inspect", "notes.csv", "--row", "0", "--next", "--previous"])
                .is_err()
        );
    }
}
