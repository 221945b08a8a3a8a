//! External editor handoff.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use shell_words::split;
use thiserror::Error;

/// Environment variables consulted for the editor command, in order.
const EDITOR_ENV_VARS: [&str; 3] = ["KDM_UPDATE_EDITOR", "VISUAL", "EDITOR"];

/// Fallback editor when no environment variable is set.
const DEFAULT_EDITOR: &str = "vi";

/// Errors from launching the external editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An editor variable was set but could not be parsed as a command line.
    #[error("failed to parse ${var}: {source}")]
    BadCommand {
        /// Variable that held the unparsable value.
        var: &'static str,
        /// Parse failure detail.
        #[source]
        source: shell_words::ParseError,
    },
    /// Terminal could not be released or restored around the child.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
    /// The editor process could not be spawned or awaited.
    #[error("failed to launch editor: {0}")]
    Launch(#[source] io::Error),
    /// The editor exited with a failure status.
    #[error("editor exited with status {code:?}")]
    Exited {
        /// Exit code, if the process reported one.
        code: Option<i32>,
    },
}

/// Capability for handing a file off to an external editor.
///
/// Injected into the app so the handoff flow is testable without spawning
/// processes.
pub trait EditorLauncher {
    /// Launch the editor on `path`, blocking until it exits.
    fn launch(&self, path: &Path) -> Result<(), EditorError>;
}

/// Resolve the editor command line from the environment.
///
/// Checks `$KDM_UPDATE_EDITOR`, `$VISUAL`, `$EDITOR` in order, skipping
/// blank values, and falls back to `vi`.
pub fn editor_command() -> Result<Vec<String>, EditorError> {
    for var in EDITOR_ENV_VARS {
        if let Ok(value) = env::var(var) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            match split(trimmed) {
                Ok(parts) if !parts.is_empty() => return Ok(parts),
                Ok(_) => continue,
                Err(source) => return Err(EditorError::BadCommand { var, source }),
            }
        }
    }
    Ok(vec![DEFAULT_EDITOR.to_string()])
}

/// Build the editor invocation for `path`.
pub fn edit_command(path: &Path) -> Result<Command, EditorError> {
    let mut parts = editor_command()?.into_iter();
    let program = parts.next().unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    let mut cmd = Command::new(program);
    cmd.args(parts);
    cmd.arg(path);
    Ok(cmd)
}

/// Launches the editor as a real child process, suspending the TUI terminal
/// state around it.
pub struct SystemEditor;

impl EditorLauncher for SystemEditor {
    fn launch(&self, path: &Path) -> Result<(), EditorError> {
        let mut cmd = edit_command(path)?;

        suspend_terminal().map_err(EditorError::Terminal)?;
        let status = cmd.status();
        resume_terminal().map_err(EditorError::Terminal)?;

        let status = status.map_err(EditorError::Launch)?;
        if status.success() {
            Ok(())
        } else {
            Err(EditorError::Exited {
                code: status.code(),
            })
        }
    }
}

fn suspend_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    io::stdout().flush()
}

fn resume_terminal() -> io::Result<()> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    io::stdout().flush()
}
