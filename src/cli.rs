use crate::commands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ai-review-pr",
    about = "AI-powered code review and error analysis tools",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform an AI code review of a branch against a target branch
    #[command(alias = "ai-review")]
    Review(commands::review::ReviewArgs),
    /// Pick a Raygun crash report and have the assistant analyze it
    Errors(commands::errors::ErrorsArgs),
    /// Manage the stored Raygun token
    Auth(commands::auth::AuthArgs),
    /// Configuration
    Config(commands::config::ConfigArgs),
}
