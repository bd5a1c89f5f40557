use crossterm::style::{Color, Stylize};
use std::ffi::OsStr;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging
pub fn set_enabled(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Check if verbose logging is enabled
pub fn is_enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Suppress informational output (warnings and errors still print)
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Log a debug message if verbose mode is enabled
pub fn log(message: &str) {
    if is_enabled() {
        eprintln!("{} {}", "DEBUG:".with(Color::Magenta).bold(), message);
    }
}

/// Render a program and its arguments as a single line for logs and errors
pub fn render_command<I, S>(program: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command_joins_args() {
        assert_eq!(
            render_command("git", ["diff", "--stat", "origin/main...feature"]),
            "git diff --stat origin/main...feature"
        );
        assert_eq!(render_command("git", Vec::<&str>::new()), "git");
    }
}
