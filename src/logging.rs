use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics accepted by `--debug-filter`.
pub const DEBUG_TOPICS: [&str; 5] = ["motion", "collision", "score", "state", "shop"];

// Custom logger structure
#[derive(Debug)]
struct GameLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl GameLogger {
    // Debug and trace records only pass when their target is a requested topic
    fn topic_enabled(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => {
                filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f))
            }
            _ => true,
        }
    }
}

impl log::Log for GameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut stdout = io::stdout().lock();
        // Nothing sensible to do if stdout is gone
        let _ = writeln!(
            stdout,
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<GameLogger> = OnceLock::new();

fn parse_filters(debug_filter: Option<String>) -> Option<HashSet<String>> {
    debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    })
}

/// Parse a `--log-level` value, falling back to info.
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

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| GameLogger {
        level,
        debug_filters: parse_filters(debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Topic macros. `frame => ...` prefixes the message with the simulation frame.
#[macro_export]
macro_rules! debug_motion {
    ($frame:expr => $($arg:tt)*) => {
        log::debug!(target: "motion", "[F{:05}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "motion", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_collision {
    ($frame:expr => $($arg:tt)*) => {
        log::debug!(target: "collision", "[F{:05}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "collision", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_score {
    ($frame:expr => $($arg:tt)*) => {
        log::debug!(target: "score", "[F{:05}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "score", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_state {
    ($frame:expr => $($arg:tt)*) => {
        log::debug!(target: "state", "[F{:05}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "state", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_shop {
    ($($arg:tt)*) => {
        log::debug!(target: "shop", "{}", format_args!($($arg)*))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, MetadataBuilder};

    fn logger(level: LevelFilter, filter: Option<&str>) -> GameLogger {
        GameLogger {
            level,
            debug_filters: parse_filters(filter.map(str::to_string)),
        }
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        MetadataBuilder::new().level(level).target(target).build()
    }

    #[test]
    fn test_level_gate() {
        let l = logger(LevelFilter::Info, None);
        assert!(log::Log::enabled(&l, &meta(Level::Warn, "game")));
        assert!(!log::Log::enabled(&l, &meta(Level::Debug, "motion")));
    }

    #[test]
    fn test_debug_topics_filter() {
        let l = logger(LevelFilter::Debug, Some("motion, shop"));
        assert!(log::Log::enabled(&l, &meta(Level::Debug, "motion")));
        assert!(log::Log::enabled(&l, &meta(Level::Debug, "shop")));
        assert!(!log::Log::enabled(&l, &meta(Level::Debug, "collision")));
        // Info and above ignore the topic filter
        assert!(log::Log::enabled(&l, &meta(Level::Info, "collision")));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_known_topics() {
        assert!(DEBUG_TOPICS.contains(&"collision"));
    }
}
