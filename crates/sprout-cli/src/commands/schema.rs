use schemars::schema_for;
use sprout_config::SproutConfig;
use sprout_core::{CodeStructure, TestCase};

use crate::cli::{GlobalFlags, SchemaArgs, SchemaTarget};
use crate::output;

/// Handle `sprout schema`. Always JSON, whatever `--format` says.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    println!("{}", render(args.target)?);
    Ok(())
}

fn render(target: SchemaTarget) -> anyhow::Result<String> {
    match target {
        SchemaTarget::CodeStructure => output::json(&schema_for!(CodeStructure)),
        SchemaTarget::TestCase => output::json(&schema_for!(TestCase)),
        SchemaTarget::Config => output::json(&schema_for!(SproutConfig)),
    }
}
