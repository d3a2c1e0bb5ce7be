//! Logging and error-report setup.
//!
//! The terminal belongs to ratatui while the app runs, so logs only go to a
//! daily rolling JSON file. `log` macros are forwarded into `tracing`, and
//! miette renders fatal start-up errors once the terminal is restored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flate2::write::GzEncoder;
use flate2::Compression;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "gasify.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

/// What the attached terminal can display.
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub truecolor: bool,
    pub colour: bool,
    pub supports_unicode: bool,
    pub is_interactive: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let support = supports_color::on(Stream::Stderr);
        let is_interactive = io::stderr().is_terminal();
        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            truecolor: support.as_ref().is_some_and(|s| s.has_16m),
            colour: support.as_ref().is_some_and(|s| s.has_basic),
            supports_unicode,
            is_interactive,
        }
    }
}

/// Install the file logger for TUI mode.
///
/// Returns the appender guard; keep it alive until exit so buffered lines
/// are flushed.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // try_init: a second call (tests) must not panic
    if tracing_subscriber::registry().with(file_layer).try_init().is_ok() {
        // No-op when tracing-subscriber already bridged `log` itself.
        tracing_log::LogTracer::init().ok();
    }

    init_miette();

    let dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!("Logging to {}", log_dir.join(LOG_FILE).display());
    guard
}

/// Gzip rotated log files from previous days.
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prefix = format!("{LOG_FILE}.");

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_rotated_log(name, &prefix, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {}", path.display()),
            Err(e) => log::warn!("Failed to compress old log {}: {}", path.display(), e),
        }
    }
}

fn is_rotated_log(name: &str, prefix: &str, today_suffix: &str) -> bool {
    name.starts_with(prefix) && !name.ends_with(today_suffix) && !name.ends_with(".gz")
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path: PathBuf = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.truecolor)
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .color(caps.is_interactive && caps.colour)
                .build(),
        )
    }))
    .ok();
}
