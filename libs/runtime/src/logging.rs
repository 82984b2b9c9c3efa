use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- level helpers --------

/// Unknown strings fall back to INFO; "off"/"none" disable the sink.
fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// True if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target
        .strip_prefix(crate_name)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

// -------- rotating file writers --------

#[derive(Clone)]
struct RotatingFile(Arc<Mutex<FileRotate<AppendCount>>>);

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

/// Writer that silently swallows records with no destination file.
struct MaybeFile(Option<RotatingFile>);

impl Write for MaybeFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

/// Routes each record to the file of the most specific subsystem section,
/// falling back to the default section's file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotatingFile>,
    by_crate: Vec<(String, RotatingFile)>,
}

impl FileRouter {
    fn resolve(&self, target: &str) -> Option<RotatingFile> {
        self.by_crate
            .iter()
            .filter(|(name, _)| matches_crate_prefix(target, name))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, f)| f.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_crate.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeFile;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeFile(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeFile(self.resolve(meta.target()))
    }
}

/// Relative log paths are anchored at `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn open_rotating_file(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<RotatingFile> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendCount::new(max_backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotatingFile(Arc::new(Mutex::new(rot))))
}

fn file_for_section(name: &str, section: &Section, base_dir: &Path) -> Option<RotatingFile> {
    if section.file.trim().is_empty() {
        return None;
    }
    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
    let path = resolve_log_path(&section.file, base_dir);

    match open_rotating_file(&path, max_bytes as usize, backups) {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!(
                "Failed to open log file for '{}': {} ({})",
                name,
                path.to_string_lossy(),
                e
            );
            None
        }
    }
}

// -------- filters --------

struct Plan<'a> {
    default: Option<&'a Section>,
    subsystems: Vec<(&'a str, &'a Section)>,
}

impl<'a> Plan<'a> {
    fn from_config(cfg: &'a LoggingConfig) -> Self {
        let mut subsystems: Vec<(&str, &Section)> = cfg
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        subsystems.sort_by(|a, b| a.0.cmp(b.0));
        Self {
            default: cfg.get(DEFAULT_SECTION),
            subsystems,
        }
    }

    fn console_targets(&self) -> Targets {
        let default = self
            .default
            .map(|s| parse_level(&s.console_level))
            .unwrap_or(LevelFilter::INFO);
        self.subsystems
            .iter()
            .fold(Targets::new().with_default(default), |t, (name, s)| {
                t.with_target(name.to_string(), parse_level(&s.console_level))
            })
    }

    /// Subsystems without their own file inherit the default file and level.
    fn file_targets(&self, router: &FileRouter) -> Targets {
        let default = match (self.default, router.default.is_some()) {
            (Some(s), true) => parse_level(&s.file_level),
            _ => LevelFilter::OFF,
        };
        self.subsystems
            .iter()
            .filter(|(_, s)| !s.file.trim().is_empty())
            .fold(Targets::new().with_default(default), |t, (name, s)| {
                t.with_target(name.to_string(), parse_level(&s.file_level))
            })
    }

    fn file_router(&self, base_dir: &Path) -> FileRouter {
        FileRouter {
            default: self
                .default
                .and_then(|s| file_for_section(DEFAULT_SECTION, s, base_dir)),
            by_crate: self
                .subsystems
                .iter()
                .filter_map(|(name, s)| {
                    file_for_section(name, s, base_dir).map(|f| (name.to_string(), f))
                })
                .collect(),
        }
    }
}

// -------- public init --------

/// Initialize the global subscriber from configuration.
/// - `cfg`: logging sections (key "default" plus per-crate sections)
/// - `base_dir`: resolves relative log file paths (usually server.home_dir)
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let plan = Plan::from_config(cfg);
    let router = plan.file_router(base_dir);

    let console = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(plan.console_targets());

    let file = (!router.is_empty()).then(|| {
        let targets = plan.file_targets(&router);
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(router)
            .with_filter(targets)
    });

    let _ = Registry::default().with(console).with(file).try_init();
}
