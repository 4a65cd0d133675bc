use log::{Level, LevelFilter};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tag = match record.level() {
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::Trace => "Trace",
        };

        // Stdout carries the scan report, so everything else goes to stderr.
        eprintln!("[{}] {}", tag, record.args());
    }

    fn flush(&self) {}
}

pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // Result is ignored since a second call only means the logger is already set.
    let _ = log::set_logger(&LOGGER).map(|_| log::set_max_level(level));
}
