use anyhow::{Context, Result};
use clap::Args;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::api::client::RaygunClient;
use crate::api::models::{self, Application, CrashReportDetail, ErrorGroup};
use crate::assistant::{self, Invocation};
use crate::constants::ERROR_FILE_NAME;
use crate::context::AppContext;
use crate::display::{select, ui};
use crate::error::Error;
use crate::git::{self, GitRunner, RepositoryContext};
use crate::prompt;

#[derive(Args, Debug)]
pub struct ErrorsArgs {
    /// Path to the git repository
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Raygun API access token
    #[arg(short, long, env = "RAYGUN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Raygun project name (skips the project prompt)
    #[arg(short, long, alias = "raygun-project")]
    pub project: Option<String>,

    /// Branch to check out before analysis
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Assistant model (overrides `errors_model` from config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Don't open RaygunError.md when the assistant finishes
    #[arg(long)]
    pub no_open: bool,
}

/// The crash picked for analysis
#[derive(Debug)]
pub struct SelectedCrash {
    pub application: Application,
    pub group: ErrorGroup,
    pub detail: CrashReportDetail,
}

/// Resolve the project by name, or ask for it when no name is given
async fn choose_application<R: BufRead, W: Write>(
    client: &RaygunClient,
    count: u32,
    project: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<Application> {
    let mut applications = client
        .list_applications(count)
        .await
        .context("failed to fetch applications")?;

    if applications.is_empty() {
        return Err(Error::EmptyResult("no applications found".to_string()).into());
    }

    if let Some(name) = project {
        return applications
            .into_iter()
            .find(|app| app.name == name)
            .ok_or_else(|| Error::EmptyResult(format!("raygun project '{}' not found", name)).into());
    }

    let index = select::choose_application(&applications, input, output)?;
    Ok(applications.swap_remove(index))
}

/// Walk the user from project to a single crash occurrence.
///
/// `Ok(None)` means there was nothing to analyse, which is not a failure.
pub async fn select_crash<R: BufRead, W: Write>(
    client: &RaygunClient,
    count: u32,
    project: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<Option<SelectedCrash>> {
    let application = choose_application(client, count, project, input, output)
        .await
        .context("error selecting project")?;
    ui::info(&format!("Selected raygun project: {}", application.name));

    let groups = client
        .list_error_groups(&application.identifier)
        .await
        .context("error fetching crash reports")?;

    if groups.is_empty() {
        ui::info("No crash reports found for this project.");
        return Ok(None);
    }

    let mut active = models::active_groups(groups);
    if active.is_empty() {
        ui::info("No active crash reports found for this project.");
        return Ok(None);
    }

    let index =
        select::choose_error_group(&active, input, output).context("error selecting crash")?;
    let group = active.swap_remove(index);
    ui::info(&format!("Analyzing crash: {}", group.message));

    let detail = client
        .get_error_detail(&application.identifier, &group.identifier)
        .await
        .context("error fetching crash details")?;

    Ok(Some(SelectedCrash {
        application,
        group,
        detail,
    }))
}

pub async fn handle(ctx: &AppContext, args: ErrorsArgs) -> Result<()> {
    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout();
    analyze(ctx, args, &mut input, &mut output).await
}

/// Select a crash, optionally check out a branch, and hand the crash to the
/// assistant. Menus are written to `output` and answers read from `input`.
pub async fn analyze<R: BufRead, W: Write>(
    ctx: &AppContext,
    args: ErrorsArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let token = crate::utils::auth::resolve_token(args.token.as_deref())?;
    let path = git::resolve_repository(&args.repo)?;
    let client = RaygunClient::new(ctx.settings.raygun_api_url.clone(), token)?;

    let project = args
        .project
        .as_deref()
        .or(ctx.settings.default_project.as_deref());

    let selected = select_crash(
        &client,
        ctx.settings.application_count,
        project,
        input,
        output,
    )
    .await?;

    let Some(crash) = selected else {
        return Ok(());
    };

    if let Some(branch) = &args.branch {
        let warnings = git::checkout_branch(&ctx.git, &path, branch)
            .context("error checking out branch")?;
        for warning in &warnings {
            ui::warning(warning);
        }
        ui::success(&format!("Checked out branch: {}", branch));
    }

    let repo = RepositoryContext {
        branch: match &args.branch {
            Some(branch) => branch.clone(),
            None => analyzed_branch(&ctx.git, &path),
        },
        path,
        target: None,
    };
    crate::utils::debug::log(&format!(
        "Analyzing {} / {} on branch {}",
        crash.application.name, crash.group.identifier, repo.branch
    ));

    let analysis_file = repo.path.join(ERROR_FILE_NAME);
    let prompt = prompt::crash_prompt(&crash.detail, &analysis_file)
        .context("failed to render crash prompt")?;

    ui::info("Launching assistant for crash analysis...");
    let model = args
        .model
        .as_deref()
        .unwrap_or(&ctx.settings.errors_model);
    assistant::run(&Invocation {
        binary: &ctx.settings.assistant_binary,
        model,
        skip_permissions: ctx.settings.skip_permissions,
        prompt: &prompt,
        working_dir: &repo.path,
        output_file: analysis_file,
        open_output: ctx.settings.open_output && !args.no_open,
    })
    .context("error launching assistant analysis")?;

    ui::success("Error analysis complete");
    Ok(())
}

/// Branch name for logging only; an unborn or broken HEAD yields `HEAD`.
fn analyzed_branch(git: &dyn GitRunner, path: &Path) -> String {
    git::current_branch(git, path).unwrap_or_else(|e| {
        crate::utils::debug::log(&format!("Could not resolve current branch: {}", e));
        "HEAD".to_string()
    })
}
