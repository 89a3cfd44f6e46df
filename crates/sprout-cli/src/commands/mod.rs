use sprout_config::SproutConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod analyze;
pub mod generate;
pub mod schema;

/// Dispatch a parsed command to its handler.
pub fn dispatch(
    command: &Commands,
    config: &SproutConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => analyze::handle(args, config, flags),
        Commands::Generate(args) => generate::handle(args, config, flags),
        Commands::Schema(args) => schema::handle(args, flags),
    }
}
