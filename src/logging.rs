use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Log topics accepted by `--debug-filter`.
pub const TOPICS: [&str; 5] = ["match", "agent", "bot", "powerup", "food"];

#[derive(Debug)]
struct ChaserLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl ChaserLogger {
    fn topic_enabled(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            // Filters only gate the chatty levels
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

impl log::Log for ChaserLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m",
            log::Level::Warn => "\x1B[33m",
            log::Level::Info => "\x1B[32m",
            log::Level::Debug => "\x1B[36m",
            log::Level::Trace => "\x1B[35m",
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<ChaserLogger> = OnceLock::new();

/// Install the logger. `debug_filter` is a comma-separated list of topics.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ChaserLogger {
        level,
        debug_filters: debug_filter.map(|s| parse_filters(&s)),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn parse_filters(filter_str: &str) -> HashSet<String> {
    filter_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Map a `--log-level` value to a filter; unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Topic macros. A leading format string logs as-is; the agent/time form
// prefixes the agent tag and simulated seconds.
#[macro_export]
macro_rules! debug_match {
    ($($arg:tt)*) => {
        log::debug!(target: "match", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_agent {
    ($agent:expr, $now:expr, $($arg:tt)*) => {
        log::debug!(target: "agent", "[{}][t={:07.3}] {}", $agent.tag(), $now, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_bot {
    ($fmt:literal $($arg:tt)*) => {
        log::debug!(target: "bot", $fmt $($arg)*)
    };
    ($agent:expr, $now:expr, $($arg:tt)*) => {
        log::debug!(target: "bot", "[{}][t={:07.3}] {}", $agent.tag(), $now, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_powerup {
    ($fmt:literal $($arg:tt)*) => {
        log::debug!(target: "powerup", $fmt $($arg)*)
    };
    ($agent:expr, $now:expr, $($arg:tt)*) => {
        log::debug!(target: "powerup", "[{}][t={:07.3}] {}", $agent.tag(), $now, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_food {
    ($($arg:tt)*) => {
        log::debug!(target: "food", $($arg)*)
    };
}
