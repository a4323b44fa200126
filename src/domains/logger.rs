use chrono::Utc;
use log::{error as log_error, info as log_info, warn as log_warn};
use std::sync::Arc;

/// Logging port injected into the synchronizers. Intentionally small and
/// non-fallible: a failed log line must never become a failed cycle.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// File-backed adapter writing through `fast_log`'s rolling appender.
pub struct FileLogger;

impl FileLogger {
    /// Initialize the fast_log file logger at the given path.
    pub fn init(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(
            fast_log::config::Config::new()
                .console()
                .file(path)
                .level(log::LevelFilter::Info),
        )?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}
