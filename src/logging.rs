// Minimal stdout logger behind the `log` facade.
// Lines look like: `   1.234s [INFO] toon_up::session - format 640x480 ...`

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

/// Prints every enabled record to stdout with the time since start-up.
pub struct StdoutLogger {
    start: OnceLock<Instant>,
}

impl StdoutLogger {
    pub const fn new() -> Self {
        Self { start: OnceLock::new() }
    }

    fn elapsed_secs(&self) -> f32 {
        self.start.get_or_init(Instant::now).elapsed().as_secs_f32()
    }

    /// The text written for one record.
    pub fn format_record(&self, record: &Record) -> String {
        format!(
            "{:>8.3}s [{}] {} - {}",
            self.elapsed_secs(),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Default for StdoutLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", self.format_record(record));
        }
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Install the stdout logger once per process. Later calls only adjust the level.
pub fn init_logger(level: LevelFilter) {
    static LOGGER: StdoutLogger = StdoutLogger::new();
    // Start the clock now, not at the first message.
    LOGGER.start.get_or_init(Instant::now);
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line_has_level_target_and_message() {
        let logger = StdoutLogger::new();
        let record = log::RecordBuilder::new()
            .level(log::Level::Warn)
            .target("toon_up::edge")
            .args(format_args!("slow frame"))
            .build();
        let line = logger.format_record(&record);
        assert!(line.ends_with("[WARN] toon_up::edge - slow frame"), "{line}");
        assert!(line.trim_start().starts_with("0."), "{line}");
    }

    #[test]
    fn init_is_repeatable() {
        init_logger(LevelFilter::Debug);
        init_logger(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
