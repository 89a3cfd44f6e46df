use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Report the structure of Python source files.
    Analyze(AnalyzeArgs),
    /// Generate a pytest module for a Python source file.
    Generate(GenerateArgs),
    /// Print the JSON schema of a public record.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Source files to analyze.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Source file to generate tests for.
    pub file: PathBuf,

    /// Minimum cases per function (defaults to `generation.default_count`).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed for reproducible sample data (defaults to `generation.seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only this top-level function.
    #[arg(long, conflicts_with = "class")]
    pub function: Option<String>,

    /// Only this class.
    #[arg(long)]
    pub class: Option<String>,

    /// Write the module here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Import path of the module under test (defaults to the file stem).
    #[arg(short, long)]
    pub module: Option<String>,

    /// Generate even when the source is itself a test module.
    #[arg(long)]
    pub include_tests: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record to describe.
    #[arg(value_enum)]
    pub target: SchemaTarget,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    CodeStructure,
    TestCase,
    Config,
}
