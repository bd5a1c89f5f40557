use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};

use crate::config::manager;
use crate::context::AppContext;
use crate::display::ui;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings
    List,
    /// Set a value in the global config file
    Set {
        /// Setting name, e.g. review_model
        key: String,
        /// New value
        value: String,
    },
    /// Print the global config file location
    Path,
}

pub fn handle(ctx: &AppContext, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::List => {
            crate::utils::formatting::print_key_value_table(ctx.settings.entries());
        }
        ConfigCommands::Set { key, value } => {
            let path = manager::set_config_value(&key, &value)?;
            ui::success(&format!("Set {} = {} in {}", key, value, path.display()));
        }
        ConfigCommands::Path => {
            let path = manager::global_config_path()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
