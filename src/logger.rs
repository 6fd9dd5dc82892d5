//! Session logger, the `log` backend installed by the `inpainter` binary.
//!
//! Every record goes to a single log file that is **truncated at each run**,
//! so it only ever holds output from the most recent invocation. Records at
//! or above the console level are mirrored to stderr.
//!
//! Default log location (override with `--log-file`):
//!   Windows:  `%APPDATA%\Inpainter\inpainter.log`
//!   Linux:    `~/.local/share/Inpainter/inpainter.log`
//!   macOS:    `~/Library/Application Support/Inpainter/inpainter.log`
//!
//! Library code only uses the `log` macros; without `init()` they are no-ops.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns the path to the current session log file.
pub fn log_path() -> Option<&'static PathBuf> {
    LOG_PATH.get()
}

/// Write a line to the session log.  Silently ignores I/O errors so that
/// logging never crashes the tool.
pub fn write_line(line: &str) {
    if let Some(mutex) = LOG_FILE.get()
        && let Ok(mut file) = mutex.lock()
    {
        let _ = writeln!(file, "{}", line);
    }
}

struct SessionLogger {
    console: LevelFilter,
}

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(&timestamp(), record);
        write_line(&line);
        if record.level() <= self.console {
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(mutex) = LOG_FILE.get()
            && let Ok(mut file) = mutex.lock()
        {
            let _ = file.flush();
        }
    }
}

fn format_record(ts: &str, record: &Record) -> String {
    format!("[{}] [{}] {}", ts, record.level(), record.args())
}

/// Initialise the session logger.  Call once, before any logging.
///
/// * Creates (or truncates) the log file; failure to open it is reported on
///   stderr and logging continues console-only.
/// * The file receives DEBUG and above; stderr receives `console` and above.
/// * Installs a panic hook that writes the panic message to the log before
///   running the default handler.
pub fn init(path_override: Option<PathBuf>, console: LevelFilter) {
    let path = path_override.unwrap_or_else(log_file_path);

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path);

    match file {
        Ok(f) => {
            let _ = LOG_PATH.set(path.clone());
            let _ = LOG_FILE.set(Mutex::new(f));
        }
        Err(e) => {
            eprintln!("[logger] Failed to open log file {:?}: {}", path, e);
        }
    }

    let max = console.max(LevelFilter::Debug);
    if log::set_boxed_logger(Box::new(SessionLogger { console })).is_ok() {
        log::set_max_level(max);
    }

    write_line(&format!(
        "=== inpainter session started {} ===",
        human_timestamp()
    ));
    if let Some(p) = log_path() {
        write_line(&format!("Log file: {}", p.display()));
    }
    write_line("");

    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        write_line(&format!("[{}] [PANIC] {}", timestamp(), info));
        prev(info);
    }));
}

fn log_file_path() -> PathBuf {
    data_dir().join("Inpainter").join("inpainter.log")
}

/// Platform data directory (without the app sub-folder).
fn data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata);
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support");
        }
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort: current working directory
    PathBuf::from(".")
}

/// HH:MM:SS (UTC) within the current day.
fn timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => clock_time(d.as_secs()),
        Err(_) => "??:??:??".to_string(),
    }
}

fn clock_time(secs: u64) -> String {
    let h = (secs % 86400) / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

fn human_timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => format!("(unix {})", d.as_secs()),
        Err(_) => "(unknown time)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_wraps_per_day() {
        assert_eq!(clock_time(0), "00:00:00");
        assert_eq!(clock_time(86_400 + 3_661), "01:01:01");
        assert_eq!(clock_time(86_399), "23:59:59");
    }

    #[test]
    fn records_are_level_tagged() {
        let line = format_record(
            "12:00:00",
            &Record::builder()
                .args(format_args!("pass {} - boundary size {}", 3, 17))
                .level(log::Level::Debug)
                .build(),
        );
        assert_eq!(line, "[12:00:00] [DEBUG] pass 3 - boundary size 17");
    }
}
