use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use sprout_config::SproutConfig;
use sprout_core::{AnalysisRules, CodeStructure, Language};
use sprout_parser::{SourceParser, StructuralAnalyzer, detect_language};

use crate::cli::{AnalyzeArgs, GlobalFlags, OutputFormat};
use crate::output;

/// One analyzed file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub structure: CodeStructure,
}

/// Handle `sprout analyze`.
pub fn handle(args: &AnalyzeArgs, config: &SproutConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reports = args
        .files
        .iter()
        .map(|path| analyze_file(path, &config.analysis))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match flags.format {
        OutputFormat::Json => println!("{}", output::json(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", output::structure_summary(&report.path, &report.structure));
            }
        }
    }
    Ok(())
}

/// Read, parse and analyze one file.
pub fn analyze_file(path: &Path, rules: &AnalysisRules) -> anyhow::Result<FileReport> {
    let display = path.display().to_string();
    let language = detect_language(&display).unwrap_or_else(|| {
        tracing::warn!(path = %path.display(), "unrecognized extension, parsing as Python");
        Language::Python
    });
    let parser = SourceParser::for_language(language)
        .with_context(|| format!("cannot analyze {display}"))?;

    let bytes = std::fs::read(path).with_context(|| format!("failed to read {display}"))?;
    let tree = parser
        .parse_bytes(&bytes)
        .with_context(|| format!("failed to parse {display}"))?;
    let structure = StructuralAnalyzer::new(rules.clone()).analyze(&tree);

    tracing::debug!(path = %path.display(), functions = structure.functions.len(), "analyzed file");
    Ok(FileReport {
        path: display,
        structure,
    })
}
