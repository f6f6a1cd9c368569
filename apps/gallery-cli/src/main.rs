//! Flag gallery terminal front end.
//!
//! Renders the gallery as text and applies viewer commands read from
//! `--command` flags or stdin, one per line.

mod commands;
mod render;

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use gallery_core::{BackendKind, GalleryConfig, GalleryState};
use tracing_subscriber::EnvFilter;

use commands::{CommandResult, Session};

#[derive(Parser, Debug)]
#[command(name = "gallery", version, about = "Browse and tag the flags of the world")]
struct Cli {
    /// Config file (TOML or JSON); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON catalog to seed from instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Preference file location
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long, conflicts_with = "prefs")]
    ephemeral: bool,

    /// Print the composed view as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Command to run; may be repeated. Reads stdin when absent.
    #[arg(short, long = "command")]
    commands: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GalleryConfig::from_path(path)?,
        None => GalleryConfig::load_standard()?,
    };
    if let Some(path) = cli.catalog.clone() {
        config.catalog.path = Some(path);
    }
    if let Some(path) = cli.prefs.clone() {
        config.preferences.path = Some(path);
    }
    if cli.ephemeral {
        config.preferences.backend = BackendKind::Memory;
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut state = GalleryState::from_config(&config)?;

    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    state.preferences_mut().subscribe(move |_| flag.set(true));
    let flag = Rc::clone(&dirty);
    state.countries_mut().subscribe(move |_| flag.set(true));

    let mut session = Session::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_view(&mut out, &state, &session, cli.json)?;

    if cli.commands.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !handle_line(&mut out, &line, &mut state, &mut session, &dirty, cli.json)? {
                break;
            }
        }
    } else {
        for line in &cli.commands {
            if !handle_line(&mut out, line, &mut state, &mut session, &dirty, cli.json)? {
                break;
            }
        }
    }

    Ok(())
}

/// Run one command line. Returns false when the viewer asked to quit.
fn handle_line(
    out: &mut impl Write,
    line: &str,
    state: &mut GalleryState,
    session: &mut Session,
    dirty: &Cell<bool>,
    json: bool,
) -> io::Result<bool> {
    if line.trim().is_empty() {
        return Ok(true);
    }

    tracing::debug!("command: {}", line.trim());
    let hovered_before = session.hovered.clone();
    let result = commands::execute_command(line, state, session);
    let rerender = dirty.replace(false) || session.hovered != hovered_before;

    match result {
        CommandResult::Quit => return Ok(false),
        CommandResult::Show => print_view(out, state, session, json)?,
        CommandResult::Success(message) => {
            writeln!(out, "{}", message)?;
            if rerender {
                print_view(out, state, session, json)?;
            }
        }
        CommandResult::Error(message) => writeln!(out, "error: {}", message)?,
    }
    Ok(true)
}

fn print_view(
    out: &mut impl Write,
    state: &GalleryState,
    session: &Session,
    json: bool,
) -> io::Result<()> {
    let view = state.view(session.hovered.as_deref());
    if json {
        let text = serde_json::to_string_pretty(&view)?;
        writeln!(out, "{}", text)
    } else {
        write!(out, "{}", render::render_view(&view))
    }
}
