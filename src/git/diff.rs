use std::path::Path;

use super::GitRunner;
use crate::error::Result;
use crate::utils::debug;

/// Stat summary and full unified diff for one branch comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub stats: String,
    pub diff: String,
}

impl DiffResult {
    /// No changes between the two refs. Not an error; the caller decides.
    pub fn is_empty(&self) -> bool {
        self.diff.trim().is_empty()
    }

    /// Combined text block handed to the prompt renderer
    pub fn render(&self) -> String {
        format!(
            "=== DIFF STATS ===\n{}\n\n=== FULL DIFF ===\n{}",
            self.stats, self.diff
        )
    }
}

/// Prefer `origin/<target>` when it resolves, otherwise the local branch name.
pub fn resolve_target_ref(git: &dyn GitRunner, repo: &Path, target: &str) -> String {
    let remote_ref = format!("origin/{}", target);
    match git.run(repo, &["rev-parse", "--verify", "--quiet", remote_ref.as_str()]) {
        Ok(_) => remote_ref,
        Err(e) => {
            debug::log(&format!(
                "{} not found ({}), falling back to {}",
                remote_ref, e, target
            ));
            target.to_string()
        }
    }
}

/// Diff `source` against `target`, merge-base first, direct comparison second.
///
/// The fallback names `source` explicitly (`target..source`) instead of
/// diffing `target` against the working tree.
pub fn collect_diff(
    git: &dyn GitRunner,
    repo: &Path,
    source: &str,
    target: &str,
) -> Result<DiffResult> {
    let target_ref = resolve_target_ref(git, repo, target);
    let merge_base_range = format!("{}...{}", target_ref, source);
    let direct_range = format!("{}..{}", target_ref, source);

    let stats = diff_with_fallback(git, repo, &["--stat"], &merge_base_range, &direct_range)?;
    let diff = diff_with_fallback(git, repo, &[], &merge_base_range, &direct_range)?;

    Ok(DiffResult { stats, diff })
}

fn diff_with_fallback(
    git: &dyn GitRunner,
    repo: &Path,
    flags: &[&str],
    preferred: &str,
    fallback: &str,
) -> Result<String> {
    let mut args = vec!["diff"];
    args.extend_from_slice(flags);

    let mut preferred_args = args.clone();
    preferred_args.push(preferred);
    match git.run(repo, &preferred_args) {
        Ok(output) => Ok(output),
        Err(e) => {
            debug::log(&format!("{} failed ({}), retrying with {}", preferred, e, fallback));
            args.push(fallback);
            git.run(repo, &args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::GitCli;
    use crate::git::testing::{RecordingGit, init_repo, run_git};

    #[test]
    fn test_prefers_remote_tracking_ref() {
        let git = RecordingGit::new(|_| false, |_| String::new());
        assert_eq!(resolve_target_ref(&git, Path::new("/repo"), "main"), "origin/main");
        assert_eq!(git.calls(), vec!["rev-parse --verify --quiet origin/main"]);
    }

    #[test]
    fn test_falls_back_to_local_branch() {
        let git = RecordingGit::new(|args| args[0] == "rev-parse", |_| String::new());
        assert_eq!(resolve_target_ref(&git, Path::new("/repo"), "dev"), "dev");
    }

    #[test]
    fn test_three_dot_failure_retries_two_dot() {
        let git = RecordingGit::new(
            |args| args.iter().any(|a| a.contains("...")),
            |args| format!("output of {}", args.join(" ")),
        );

        let result = collect_diff(&git, Path::new("/repo"), "feature", "main").unwrap();

        assert_eq!(
            git.calls(),
            vec![
                "rev-parse --verify --quiet origin/main",
                "diff --stat origin/main...feature",
                "diff --stat origin/main..feature",
                "diff origin/main...feature",
                "diff origin/main..feature",
            ]
        );
        assert_eq!(result.stats, "output of diff --stat origin/main..feature");
        assert_eq!(result.diff, "output of diff origin/main..feature");
    }

    #[test]
    fn test_both_forms_failing_is_an_error() {
        let git = RecordingGit::new(|args| args[0] == "diff", |_| String::new());
        let err = collect_diff(&git, Path::new("/repo"), "feature", "main").unwrap_err();
        assert!(matches!(err, Error::Git { .. }));
    }

    #[test]
    fn test_identical_branches_produce_empty_diff() {
        let repo = init_repo();
        run_git(repo.path(), &["branch", "feature"]);

        let result = collect_diff(&GitCli::default(), repo.path(), "feature", "main").unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_diff_against_local_target() {
        let repo = init_repo();
        run_git(repo.path(), &["checkout", "-q", "-b", "feature"]);
        std::fs::write(repo.path().join("lib.rs"), "pub fn answer() -> u32 { 42 }\n").unwrap();
        run_git(repo.path(), &["add", "lib.rs"]);
        run_git(repo.path(), &["commit", "-q", "-m", "add lib"]);

        let result = collect_diff(&GitCli::default(), repo.path(), "feature", "main").unwrap();

        assert!(!result.is_empty());
        assert!(result.stats.contains("lib.rs"));
        assert!(result.diff.contains("+pub fn answer() -> u32 { 42 }"));

        let rendered = result.render();
        assert!(rendered.starts_with("=== DIFF STATS ===\n"));
        assert!(rendered.contains("\n\n=== FULL DIFF ===\n"));
    }
}
