use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{AnalyzeArgs, Commands, GenerateArgs, SchemaArgs, SchemaTarget};

/// Top-level CLI parser for the `sprout` binary.
#[derive(Debug, Parser)]
#[command(name = "sprout", version, about = "sprout - Python structure analysis and pytest scaffolding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat, SchemaTarget};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["sprout", "--format", "json", "--verbose", "analyze", "a.py"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.files, vec![PathBuf::from("a.py")]);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sprout", "schema", "test-case", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.target == SchemaTarget::TestCase
        ));
    }

    #[test]
    fn generate_options_parse() {
        let cli = Cli::try_parse_from([
            "sprout", "generate", "shop.py", "-n", "5", "--seed", "42", "--class", "Cart",
            "--module", "shop.cart", "--include-tests",
        ])
        .expect("cli should parse");

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, Some(5));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.class.as_deref(), Some("Cart"));
        assert_eq!(args.module.as_deref(), Some("shop.cart"));
        assert!(args.include_tests);
    }

    #[test]
    fn function_and_class_conflict() {
        let parsed = Cli::try_parse_from([
            "sprout", "generate", "shop.py", "--function", "f", "--class", "C",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn analyze_requires_a_file() {
        assert!(Cli::try_parse_from(["sprout", "analyze"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["sprout", "--format", "xml", "analyze", "a.py"]).is_err());
    }
}
