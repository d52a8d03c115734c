use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to the browser console, errors and warnings to
/// their own console methods so devtools can filter them.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            Level::Error => crate::log_error(&line),
            Level::Warn => crate::log_warn(&line),
            Level::Info | Level::Debug | Level::Trace => crate::log(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger. Calling it again only adjusts the level.
pub fn init_logger(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
