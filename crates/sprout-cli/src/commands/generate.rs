use std::path::Path;

use anyhow::{Context, bail};
use sprout_config::SproutConfig;
use sprout_core::{CodeStructure, TestCase};
use sprout_gen::{TemplateRenderer, TestCaseBuilder, ensure_unique_names};
use sprout_parser::is_test_module_name;

use crate::cli::{GenerateArgs, GlobalFlags, OutputFormat};
use crate::commands::analyze::analyze_file;
use crate::output;

/// Handle `sprout generate`.
pub fn handle(args: &GenerateArgs, config: &SproutConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = analyze_file(&args.file, &config.analysis)?;

    if !args.include_tests && is_test_source(&args.file, &report.structure) {
        tracing::warn!(path = %report.path, "skipping test module (pass --include-tests to override)");
        return Ok(());
    }

    let cases = build_cases(&report.structure, args, config)?;
    let rendered = match flags.format {
        OutputFormat::Json => output::json(&cases)?,
        OutputFormat::Text => {
            let module = args.module.clone().unwrap_or_else(|| module_name(&args.file));
            TemplateRenderer::new().render_module_for(&module, &cases)
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !flags.quiet {
                eprintln!("wrote {} test cases to {}", cases.len(), path.display());
            }
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn is_test_source(path: &Path, structure: &CodeStructure) -> bool {
    structure.is_test_file
        || path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_test_module_name)
}

/// Cases for the selected target, or for every top-level function and class.
pub fn build_cases(
    structure: &CodeStructure,
    args: &GenerateArgs,
    config: &SproutConfig,
) -> anyhow::Result<Vec<TestCase>> {
    let count = args.count.unwrap_or(config.generation.default_count);
    let mut builder = match args.seed.or(config.generation.seed) {
        Some(seed) => TestCaseBuilder::with_seed(seed),
        None => TestCaseBuilder::new(),
    };

    let mut cases = if let Some(name) = &args.function {
        builder
            .generate_test_cases(structure.function(name), count)
            .with_context(|| format!("no top-level function named `{name}`"))?
    } else if let Some(name) = &args.class {
        let Some(class) = structure.class(name) else {
            bail!("no class named `{name}`");
        };
        builder.generate_class_test_cases(class)
    } else {
        let mut all = Vec::new();
        for function in &structure.functions {
            all.extend(builder.generate_test_cases(Some(function), count)?);
        }
        for class in &structure.classes {
            all.extend(builder.generate_class_test_cases(class));
        }
        all
    };

    ensure_unique_names(&mut cases);
    Ok(cases)
}

/// Import path for a source file: its stem.
fn module_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("module")
        .to_string()
}
