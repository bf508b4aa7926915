use crate::model::LogConfig;
use crate::utils::read_log_level_config;
use chrono::{Local, NaiveDate};
use env_logger::{Builder, Target, WriteStyle};
use log::{info, LevelFilter};
use shared::utils::{set_sanitize_sensitive_info, ENV_APP_LOG, ENV_LOG_LEVEL};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_ERROR_LEVEL_MOD: &[&str] = &[
    "reqwest::async_impl::client",
    "reqwest::connect",
    "hyper_util::client",
];

const LOG_FILE_PREFIX: &str = "app-";
const LOG_FILE_EXT: &str = "log";

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" | "verbose" => LevelFilter::Debug,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "critical" => LevelFilter::Error,
        // "info" => LevelFilter::Info,
        _ => LevelFilter::Info,
    }
}

/// Writes every log line to stdout and to the run's log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        self.file.flush()
    }
}

fn is_log_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == LOG_FILE_EXT)
}

/// Deletes the oldest log file while the directory holds more than `max_files`.
fn rotate_log_files(log_dir: &Path, max_files: usize) -> std::io::Result<Option<PathBuf>> {
    let mut files: Vec<(std::time::SystemTime, PathBuf)> = std::fs::read_dir(log_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_log_file(path))
        .filter_map(|path| path.metadata().and_then(|m| m.modified()).ok().map(|mtime| (mtime, path)))
        .collect();
    if files.len() <= max_files {
        return Ok(None);
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    let (_, oldest) = files.swap_remove(0);
    std::fs::remove_file(&oldest)?;
    Ok(Some(oldest))
}

/// Picks `app-YYYYMMDD-N.log` with the first free counter. Returns the new
/// file and the one removed by rotation.
pub fn prepare_log_file(log_dir: &Path, max_files: usize, date: NaiveDate) -> std::io::Result<(PathBuf, Option<PathBuf>)> {
    std::fs::create_dir_all(log_dir)?;
    let removed = rotate_log_files(log_dir, max_files)?;
    let stamp = date.format("%Y%m%d");
    let mut counter = 1usize;
    loop {
        let candidate = log_dir.join(format!("{LOG_FILE_PREFIX}{stamp}-{counter}.{LOG_FILE_EXT}"));
        if !candidate.exists() {
            return Ok((candidate, removed));
        }
        counter += 1;
    }
}

fn resolve_log_level(user_log_level: Option<&String>, config: &LogConfig) -> String {
    // priority  CLI-Argument, Env-Var, Config, Default
    user_log_level
        .map(ToString::to_string)
        .or_else(|| std::env::var(ENV_APP_LOG).ok())
        .or_else(|| std::env::var(ENV_LOG_LEVEL).ok())
        .filter(|level| !level.trim().is_empty())
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

fn apply_log_levels(log_builder: &mut Builder, log_level: &str) -> Vec<String> {
    let mut log_levels = vec![];
    if log_level.contains('=') {
        for pair in log_level.split(',') {
            if pair.contains('=') {
                let mut kv_iter = pair.split('=').map(str::trim);
                if let (Some(module), Some(level)) = (kv_iter.next(), kv_iter.next()) {
                    let level = get_log_level(level);
                    log_levels.push(format!("{module}={level}"));
                    log_builder.filter_module(module, level);
                }
            } else {
                let level = get_log_level(pair);
                log_levels.push(level.to_string());
                log_builder.filter_level(level);
            }
        }
    } else {
        let level = get_log_level(log_level);
        log_builder.filter_level(level);
        log_levels.push(level.to_string());
    }
    log_levels
}

/// Initializes the logger and returns the log file of this run, if any.
pub fn init_logger(user_log_level: Option<&String>, config_file: &str) -> Option<PathBuf> {
    let config = read_log_level_config(Path::new(config_file))
        .map(|cfg| LogConfig::from(&cfg))
        .unwrap_or_default();
    set_sanitize_sensitive_info(config.sanitize_sensitive_info);

    let mut log_builder = Builder::from_default_env();
    let mut log_file = None;
    let mut rotated = None;
    let mut file_error = None;

    if let Some(log_dir) = config.log_dir.as_deref() {
        match prepare_log_file(Path::new(log_dir), config.max_log_files, Local::now().date_naive())
            .and_then(|(path, removed)| {
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                Ok((path, removed, file))
            }) {
            Ok((path, removed, file)) => {
                log_builder.target(Target::Pipe(Box::new(TeeWriter { file })));
                log_builder.write_style(WriteStyle::Never);
                log_file = Some(path);
                rotated = removed;
            }
            Err(err) => {
                log_builder.target(Target::Stdout);
                file_error = Some(err);
            }
        }
    } else {
        log_builder.target(Target::Stdout);
    }

    let log_level = resolve_log_level(user_log_level, &config);
    let log_levels = apply_log_levels(&mut log_builder, &log_level);
    for module in LOG_ERROR_LEVEL_MOD {
        log_builder.filter_module(module, LevelFilter::Error);
    }
    log_builder.init();
    info!("Log Level {}", &log_levels.join(", "));
    if let Some(removed) = rotated {
        info!("Removed old log file {}", removed.display());
    }
    if let Some(err) = file_error {
        log::warn!("Can't create log file, logging to console only: {err}");
    }
    log_file
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};

    #[test]
    fn test_level_aliases() {
        assert_eq!(get_log_level("VERBOSE"), LevelFilter::Debug);
        assert_eq!(get_log_level("warning"), LevelFilter::Warn);
        assert_eq!(get_log_level("critical"), LevelFilter::Error);
        assert_eq!(get_log_level("unknown"), LevelFilter::Info);
    }

    #[test]
    fn test_module_levels() {
        let mut builder = Builder::new();
        let levels = apply_log_levels(&mut builder, "info,plexport::processing=debug");
        assert_eq!(levels, vec!["INFO".to_string(), "plexport::processing=DEBUG".to_string()]);
    }

    #[test]
    fn test_cli_level_wins() {
        let config = LogConfig { log_level: Some("debug".to_string()), ..LogConfig::default() };
        let cli = "trace".to_string();
        assert_eq!(resolve_log_level(Some(&cli), &config), "trace");
    }

    #[test]
    fn test_log_file_counter() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let (first, removed) = prepare_log_file(dir.path(), 10, date).unwrap();
        assert_eq!(first, dir.path().join("app-20240501-1.log"));
        assert!(removed.is_none());
        std::fs::write(&first, "x").unwrap();
        let (second, _) = prepare_log_file(dir.path(), 10, date).unwrap();
        assert_eq!(second, dir.path().join("app-20240501-2.log"));
    }

    #[test]
    fn test_oldest_log_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        for (idx, name) in ["app-20240101-1.log", "app-20240102-1.log", "app-20240103-1.log"].iter().enumerate() {
            let path = dir.path().join(name);
            std::fs::write(&path, "x").unwrap();
            set_file_mtime(&path, FileTime::from_unix_time(1_700_000_000 + i64::try_from(idx).unwrap() * 100, 0)).unwrap();
        }
        let date = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let (next, removed) = prepare_log_file(dir.path(), 2, date).unwrap();
        assert_eq!(removed, Some(dir.path().join("app-20240101-1.log")));
        assert_eq!(next, dir.path().join("app-20240104-1.log"));
        assert!(!dir.path().join("app-20240101-1.log").exists());
    }
}
