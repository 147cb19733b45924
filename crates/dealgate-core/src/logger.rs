//! Verbosity-gated logging and notifications

use dealgate_config::SettingsHandle;
use dealgate_host_api::Notifier;
use dealgate_util::LogVerbosity;
use std::sync::Arc;
use tracing::{error, info};

/// Routes gate messages to the log and, at verbose level, to the host's
/// notification channel. Verbosity is read on every call.
#[derive(Clone)]
pub struct GateLogger {
    settings: SettingsHandle,
    notifier: Arc<dyn Notifier>,
}

impl GateLogger {
    pub fn new(settings: SettingsHandle, notifier: Arc<dyn Notifier>) -> Self {
        Self { settings, notifier }
    }

    pub fn verbosity(&self) -> LogVerbosity {
        self.settings.log_verbosity()
    }

    /// Diagnostic line; suppressed entirely when silent
    pub fn log(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        let verbosity = self.verbosity();

        if verbosity >= LogVerbosity::Basic {
            info!(target: "dealgate", "{}", message);
        }
        if verbosity == LogVerbosity::Verbose {
            self.notifier.notify(message);
        }
    }

    /// Host integration failure; always reaches the log
    pub fn failure(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        error!(target: "dealgate", "{}", message);

        if self.verbosity() == LogVerbosity::Verbose {
            self.notifier.notify(message);
        }
    }
}

impl std::fmt::Debug for GateLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateLogger")
            .field("verbosity", &self.verbosity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealgate_config::Settings;
    use dealgate_host_api::RecordingNotifier;

    fn logger_at(verbosity: LogVerbosity) -> (GateLogger, SettingsHandle, RecordingNotifier) {
        let mut settings = Settings::default();
        settings.economy.log_verbosity = verbosity;
        let handle = SettingsHandle::new(settings);
        let notifier = RecordingNotifier::new();
        let logger = GateLogger::new(handle.clone(), Arc::new(notifier.clone()));
        (logger, handle, notifier)
    }

    #[test]
    fn test_notifications_only_when_verbose() {
        for (verbosity, expected) in [
            (LogVerbosity::Silent, 0),
            (LogVerbosity::Basic, 0),
            (LogVerbosity::Verbose, 1),
        ] {
            let (logger, _, notifier) = logger_at(verbosity);
            logger.log("offer checked");
            assert_eq!(notifier.messages().len(), expected, "{:?}", verbosity);
        }
    }

    #[test]
    fn test_verbosity_read_at_call_time() {
        let (logger, handle, notifier) = logger_at(LogVerbosity::Silent);
        logger.log("first");

        let mut settings = handle.current();
        settings.economy.log_verbosity = LogVerbosity::Verbose;
        handle.replace(settings);
        logger.log("second");

        assert_eq!(notifier.messages(), vec!["second".to_string()]);
    }

    #[test]
    fn test_failure_not_forwarded_below_verbose() {
        let (logger, _, notifier) = logger_at(LogVerbosity::Basic);
        logger.failure("adapter broke");
        assert!(notifier.messages().is_empty());

        let (logger, _, notifier) = logger_at(LogVerbosity::Verbose);
        logger.failure("adapter broke");
        assert_eq!(notifier.messages().len(), 1);
    }
}
