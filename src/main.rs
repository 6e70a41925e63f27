//! hlsel - highlight every occurrence of a selection in a file
//!
//! Loads the file into a headless editor, selects the first occurrence
//! of the given text and prints the file with all occurrences marked.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use highlight_selections::render;
use highlight_selections::{Config, Controller, HeadlessHost, Result, TriggerOutcome};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut dark = false;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--dark" => dark = true,
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    print_usage();
                    process::exit(2);
                }
            },
            _ => positional.push(arg),
        }
    }

    let [file, selection] = positional.as_slice() else {
        print_usage();
        process::exit(2);
    };

    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load(),
    };

    let text = fs::read_to_string(file)?;
    let mut host = HeadlessHost::new();
    host.dark_theme = dark;
    host.open(&text);
    if !host.select_text(selection) {
        tracing::warn!("{:?} does not occur in {}", selection, file);
    }

    let mut controller = Controller::new(config);
    let outcome = controller.activate(&mut host);

    let mut stdout = io::stdout();
    if let (TriggerOutcome::Applied { style, .. }, Some(document)) = (&outcome, host.document()) {
        let style_config = host.style_config(*style).cloned().unwrap_or_default();
        render::render(
            &mut stdout,
            document,
            host.regions(*style),
            &style_config,
            host.dark_theme,
        )?;
    } else if let Some(document) = host.document() {
        render::render(&mut stdout, document, &[], &Default::default(), host.dark_theme)?;
    }

    controller.deactivate(&mut host);
    Ok(())
}

fn print_usage() {
    println!("hlsel {} - highlight every occurrence of a selection", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hlsel [OPTIONS] FILE SELECTION");
    println!();
    println!("Options:");
    println!("  -c, --config FILE  Read settings from FILE instead of ~/.highlight-selections.toml");
    println!("      --dark         Use the dark theme border colour");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Logging is controlled with RUST_LOG (e.g. RUST_LOG=debug).");
}

fn print_version() {
    println!("hlsel {}", env!("CARGO_PKG_VERSION"));
}
