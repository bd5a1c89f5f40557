use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::assistant::{self, Invocation};
use crate::constants::REVIEW_FILE_NAME;
use crate::context::AppContext;
use crate::display::ui;
use crate::git::{self, RepositoryContext};
use crate::prompt;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Path to the git repository
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Branch to review (defaults to current branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Target branch to diff against [default: main]
    #[arg(short, long)]
    pub target: Option<String>,

    /// Assistant model (overrides `review_model` from config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Don't open Review.md when the assistant finishes
    #[arg(long)]
    pub no_open: bool,
}

fn resolve_context(ctx: &AppContext, args: &ReviewArgs) -> Result<RepositoryContext> {
    let path = git::resolve_repository(&args.repo)?;
    ui::info(&format!("Reviewing repository: {}", path.display()));

    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => git::current_branch(&ctx.git, &path).context("failed to get current branch")?,
    };
    let target = args
        .target
        .clone()
        .unwrap_or_else(|| ctx.settings.default_target.clone());

    Ok(RepositoryContext {
        path,
        branch,
        target: Some(target),
    })
}

pub fn handle(ctx: &AppContext, args: ReviewArgs) -> Result<()> {
    let repo = resolve_context(ctx, &args)?;
    let target = repo
        .target
        .as_deref()
        .unwrap_or(&ctx.settings.default_target);

    ui::info(&format!(
        "Branch: {} (comparing against {})",
        repo.branch, target
    ));

    let diff = git::collect_diff(&ctx.git, &repo.path, &repo.branch, target)
        .context("failed to get diff")?;

    if diff.is_empty() {
        ui::info("No differences found between branches.");
        return Ok(());
    }

    let review_file = repo.path.join(REVIEW_FILE_NAME);
    let prompt = prompt::review_prompt(&repo.branch, target, &diff.render(), &review_file)
        .context("failed to render review prompt")?;

    ui::info("Launching assistant for review...");
    let model = args
        .model
        .as_deref()
        .unwrap_or(&ctx.settings.review_model);
    assistant::run(&Invocation {
        binary: &ctx.settings.assistant_binary,
        model,
        skip_permissions: ctx.settings.skip_permissions,
        prompt: &prompt,
        working_dir: &repo.path,
        output_file: review_file,
        open_output: ctx.settings.open_output && !args.no_open,
    })
    .context("failed to run review")?;

    ui::success("Code review complete.");
    Ok(())
}
