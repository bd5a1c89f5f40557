use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::display::ui;
use crate::error::{Error, Result};
use crate::utils::debug;

const SKIP_PERMISSIONS_FLAG: &str = "--dangerously-skip-permissions";

/// One run of the external assistant CLI.
///
/// The prompt always travels as its own argv entry; no shell is involved.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub binary: &'a str,
    pub model: &'a str,
    pub skip_permissions: bool,
    pub prompt: &'a str,
    pub working_dir: &'a Path,
    /// File the assistant is asked to write
    pub output_file: PathBuf,
    pub open_output: bool,
}

impl Invocation<'_> {
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.binary);
        command.arg(format!("--model={}", self.model));
        if self.skip_permissions {
            command.arg(SKIP_PERMISSIONS_FLAG);
        }
        command.arg("-p").arg(self.prompt);
        command.current_dir(self.working_dir);
        command
    }
}

/// Run the assistant attached to this terminal, then publish its output file.
pub fn run(invocation: &Invocation<'_>) -> Result<()> {
    let mut command = invocation.command();
    let rendered = debug::render_command(
        invocation.binary,
        command
            .get_args()
            .take_while(|arg| *arg != OsStr::new("-p")),
    );
    debug::log(&format!(
        "Launching: {} -p <prompt: {} bytes> (in {})",
        rendered,
        invocation.prompt.len(),
        invocation.working_dir.display()
    ));

    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::Assistant {
            command: invocation.binary.to_string(),
            reason: format!("could not be started: {}", e),
        })?;

    if !status.success() {
        return Err(Error::Assistant {
            command: invocation.binary.to_string(),
            reason: format!("exited with {}", status),
        });
    }

    if invocation.open_output {
        publish(&invocation.output_file);
    } else if invocation.output_file.exists() {
        ui::info(&format!("Output written to {}", invocation.output_file.display()));
    }

    Ok(())
}

/// Open `path` in the platform viewer if the assistant produced it.
///
/// Returns whether an open was attempted. Viewer failures are warnings.
pub fn publish(path: &Path) -> bool {
    if !path.exists() {
        debug::log(&format!("No output file at {}", path.display()));
        return false;
    }

    ui::info(&format!("Opening output file: {}", path.display()));
    if let Err(e) = open_with_viewer(path) {
        ui::warning(&format!("Could not open {}: {}", path.display(), e));
    }
    true
}

/// Hand `path` to the desktop's default viewer (`open` on macOS, `start` on
/// Windows, `xdg-open` and its fallbacks elsewhere).
fn open_with_viewer(path: &Path) -> std::io::Result<()> {
    open::that(path)
}
