//! kdm-update - review k3s CLI-flag changes between release tags.

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use kdm_update::core::{default_config_path, Config, DiffProvider, FileDiffSource, HttpDiffSource};
use kdm_update::ui::{edit_command, handle_input, render, App, SystemEditor};

/// Compare endpoint of the k3s upstream repository.
const DEFAULT_COMPARE_URL: &str = "https://github.com/k3s-io/k3s/compare";

/// Files whose hunks are of interest by default: the agent and server CLI
/// flag definitions.
const DEFAULT_TRACKED: [&str; 2] = ["pkg/cli/cmds/agent.go", "pkg/cli/cmds/server.go"];

/// Review k3s CLI-flag changes between release tags.
#[derive(Parser, Debug)]
#[command(name = "kdm-update", version, about)]
struct Cli {
    /// Base compare URL for the remote diff endpoint
    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_COMPARE_URL)]
    base_url: String,

    /// Read the diff from a local snapshot file instead of the network
    #[arg(long = "diff-file", value_name = "PATH")]
    diff_file: Option<PathBuf>,

    /// File path whose hunks are kept (repeatable; defaults to the k3s
    /// agent/server CLI definitions)
    #[arg(long = "track", value_name = "PATH")]
    track: Vec<String>,

    /// File opened in the editor after reviewing the diff
    #[arg(long = "edit-file", value_name = "PATH", default_value = "channels.yaml")]
    edit_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Release config operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print a formatted report of the config file
    View {
        /// Path to the config file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Print a fully-populated example config
    Gen,
    /// Open the config file in the editor
    Edit {
        /// Path to the config file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// RAII guard for terminal state. Restores terminal on drop (including panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = io::stdout().flush();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config { action }) => run_config(action),
        None => run_tui(cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(default_config_path)
        .context("could not determine the home directory for the default config path")
}

fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::View { config } => {
            let path = config_path(config)?;
            let config = Config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            print!("{}", config.render_view());
            Ok(())
        }
        ConfigAction::Gen => {
            println!("{}", Config::example().to_json_pretty()?);
            Ok(())
        }
        ConfigAction::Edit { config } => {
            let path = config_path(config)?;
            let status = edit_command(&path)?
                .status()
                .context("failed to launch editor")?;
            if !status.success() {
                anyhow::bail!("editor exited with status {:?}", status.code());
            }
            Ok(())
        }
    }
}

/// Run the TUI application.
fn run_tui(cli: Cli) -> Result<()> {
    // Set panic hook to ensure terminal cleanup
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = io::stdout().flush();
        default_hook(info);
    }));

    let provider: Box<dyn DiffProvider> = match cli.diff_file {
        Some(path) => Box::new(FileDiffSource::new(path)),
        None => Box::new(HttpDiffSource::new(cli.base_url)?),
    };

    let tracked = if cli.track.is_empty() {
        DEFAULT_TRACKED.iter().map(|s| s.to_string()).collect()
    } else {
        cli.track
    };

    let mut app = App::new(provider, Box::new(SystemEditor), tracked, cli.edit_file);

    // Setup terminal with RAII guard
    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run_loop(&mut terminal, &mut app)
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Only redraw if dirty or on resize
        if app.dirty {
            terminal.draw(|frame| render(frame, app))?;
            app.clear_dirty();
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let ev = event::read()?;

            if matches!(ev, event::Event::Resize(_, _)) {
                app.mark_dirty();
            }

            handle_input(app, ev)?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
