// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use crossterm::event::{Event, KeyEventKind};
use tracing::{info, warn, Level};

use lyrics_source::config::{ConfigEvent, ConfigWatcher, SourceSettings};
use lyrics_source::control::{ControlAction, KeyboardController};
use lyrics_source::lyrics::load_library;
use lyrics_source::source::LyricsSource;
use lyrics_source::ui::{App, TerminalRenderer, UiState};

type PreviewSource = LyricsSource<TerminalRenderer>;

fn print_usage() {
    println!("Lyrics Source - step through song lyrics line by line");
    println!();
    println!("Usage: lyrics-source [OPTIONS] <COMMAND> <SETTINGS>");
    println!();
    println!("Commands:");
    println!("  --preview <settings>      Run the terminal preview with hot reload");
    println!("  --list <settings>         List the songs the settings load");
    println!("  --project <settings> [N]  Print the renderer settings for line N (default 1)");
    println!("  --properties <settings>   Print the property sheet");
    println!("  --init <settings>         Write a settings file with default values");
    println!("  --help                    Show this help message");
    println!();
    println!("Options:");
    println!("  --log <file>              Write log output to a file");
    println!("  -v, --verbose             Enable debug logging");
}

/// Global options, removed from the argument list before command dispatch
struct Options {
    verbose: bool,
    log_file: Option<PathBuf>,
}

fn take_options(args: &mut Vec<String>) -> Result<Options> {
    let mut options = Options {
        verbose: false,
        log_file: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-v" | "--verbose" => {
                options.verbose = true;
                args.remove(i);
            }
            "--log" => {
                if i + 1 >= args.len() {
                    bail!("--log requires a file name");
                }
                options.log_file = Some(PathBuf::from(args.remove(i + 1)));
                args.remove(i);
            }
            _ => i += 1,
        }
    }

    Ok(options)
}

/// Install the log subscriber. The preview owns the terminal, so it only
/// logs when a log file is given.
fn init_logging(options: &Options, interactive: bool) -> Result<()> {
    let level = if options.verbose { Level::DEBUG } else { Level::INFO };

    match &options.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn load_settings(path: &Path) -> Result<SourceSettings> {
    if !path.exists() {
        bail!(
            "Settings file not found: {} (create one with --init)",
            path.display()
        );
    }
    SourceSettings::load(path)
}

fn list_songs(path: &Path) -> Result<()> {
    let settings = load_settings(path)?;
    let library = load_library(&settings.library_source());

    if library.is_empty() {
        println!("No lyrics found.");
        return Ok(());
    }

    for (i, song) in library.songs().iter().enumerate() {
        println!("{:3}. {} ({} lines)", i + 1, song.name(), song.len());
    }
    println!();
    println!("{} songs, {} lines", library.len(), library.total_lines());
    Ok(())
}

fn print_projection(path: &Path, line: usize) -> Result<()> {
    let settings = load_settings(path)?;
    let mut source = PreviewSource::new(&settings, TerminalRenderer::new());

    for _ in 1..line {
        source.next();
    }

    let yaml = serde_yaml::to_string(&source.projection())
        .context("Failed to serialize renderer settings")?;
    print!("{}", yaml);
    Ok(())
}

fn print_properties(path: &Path) -> Result<()> {
    let settings = load_settings(path)?;
    let properties = PreviewSource::properties(&settings);

    for property in properties.visible() {
        println!("{:<18} {:<22} {}", property.key, property.label, property.kind);
    }
    Ok(())
}

fn init_settings(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing file: {}", path.display());
    }
    PreviewSource::defaults().save(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

/// Terminal preview: keys drive the source the way host hotkeys would, and
/// edits to the settings or lyrics files are applied live
fn run_preview(path: &Path) -> Result<()> {
    let mut settings = load_settings(path)?;
    let mut source = PreviewSource::new(&settings, TerminalRenderer::new());
    info!(
        songs = source.library().len(),
        lines = source.library().total_lines(),
        "Preview started"
    );

    let mut watcher = ConfigWatcher::new(path, None)?;
    if let Err(e) = watcher.watch_lyrics(&settings) {
        warn!(error = %e, "Cannot watch lyrics folders");
    }

    let keyboard = KeyboardController::with_defaults();
    let mut app = App::new(UiState::with_help(&keyboard))?;

    while app.is_running() {
        app.draw(&mut source)?;

        if let Some(Event::Key(key)) = app.poll_event()? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = keyboard.process_key(key.code, key.modifiers) {
                    handle_action(action, &mut app, &mut source, &mut settings, &mut watcher, path);
                }
            }
        }

        for event in watcher.recv_all() {
            match event {
                ConfigEvent::Reloaded(new_settings) => {
                    settings = *new_settings;
                    apply_settings(&mut source, &settings, &mut watcher);
                    app.state_mut().set_status("Settings reloaded");
                }
                ConfigEvent::Error(e) => {
                    warn!(error = %e, "Settings reload failed");
                    app.state_mut().set_status(format!("Settings error: {}", e));
                }
                ConfigEvent::LyricsChanged(changed) if settings.affects_library(&changed) => {
                    source.reload(&settings);
                    let name = changed
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    app.state_mut().set_status(format!("Lyrics changed: {}", name));
                }
                ConfigEvent::LyricsChanged(_) => {}
            }
        }
    }

    Ok(())
}

fn handle_action(
    action: ControlAction,
    app: &mut App,
    source: &mut PreviewSource,
    settings: &mut SourceSettings,
    watcher: &mut ConfigWatcher,
    path: &Path,
) {
    if let Some(id) = action.hotkey_id() {
        source.trigger_hotkey(id, true);
        return;
    }

    match action {
        ControlAction::Reload => match SourceSettings::load(path) {
            Ok(new_settings) => {
                *settings = new_settings;
                apply_settings(source, settings, watcher);
                app.state_mut().set_status("Reloaded");
            }
            Err(e) => {
                warn!("Reload failed: {:#}", e);
                app.state_mut().set_status(format!("Reload failed: {:#}", e));
            }
        },
        ControlAction::ToggleHelp => {
            let state = app.state_mut();
            state.show_help = !state.show_help;
        }
        ControlAction::Quit => app.quit(),
        ControlAction::NextLine | ControlAction::PreviousLine | ControlAction::ToggleVisible => {}
    }
}

fn apply_settings(
    source: &mut PreviewSource,
    settings: &SourceSettings,
    watcher: &mut ConfigWatcher,
) {
    source.update(settings);
    if let Err(e) = watcher.watch_lyrics(settings) {
        warn!(error = %e, "Cannot watch lyrics folders");
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let options = take_options(&mut args)?;

    if args.is_empty() {
        println!("Lyrics Source - step through song lyrics line by line");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let command = args[0].as_str();
    if matches!(command, "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let Some(settings_path) = args.get(1).map(PathBuf::from) else {
        eprintln!("Error: {} requires a settings file", command);
        print_usage();
        std::process::exit(1);
    };

    init_logging(&options, command == "--preview")?;

    match command {
        "--preview" => run_preview(&settings_path)?,
        "--list" => list_songs(&settings_path)?,
        "--project" => {
            let line: usize = match args.get(2) {
                Some(n) => n
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid line number: {}", n))?,
                None => 1,
            };
            print_projection(&settings_path, line)?;
        }
        "--properties" => print_properties(&settings_path)?,
        "--init" => init_settings(&settings_path)?,
        _ => {
            eprintln!("Unknown option: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
