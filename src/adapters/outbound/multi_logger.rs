use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards to a primary and an optional secondary DomainLogger, so file and
/// console output can be combined without changing the port.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// Initialize a combined logger: file logger with console attached, falling
/// back to console alone if the file sink cannot be set up.
pub fn init_combined_logger(path: &str) -> Arc<dyn DomainLogger> {
    let console = crate::adapters::outbound::init_console_logger();
    match crate::adapters::outbound::file_logger::init_file_logger(path) {
        Ok(file_logger) => {
            Arc::new(MultiLogger::new(file_logger, Some(console))) as Arc<dyn DomainLogger>
        }
        Err(_) => console as Arc<dyn DomainLogger>,
    }
}
