//! Diagnostics sink for non-fatal construction warnings.
//!
//! # Design
//! Warnings (currently only degraded construction from an empty
//! configuration literal) go through an explicit sink passed in at root
//! construction rather than an ambient global. The default sink forwards
//! to the `log` facade behind a constructor-supplied on/off flag, so the
//! emission decision is a parameter of the owning application.

use std::sync::Arc;

/// Receiver for non-fatal warnings raised during tree construction.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default sink: forwards warnings to `log::warn!` when enabled.
pub struct LogDiagnostics {
    enabled: bool,
}

impl LogDiagnostics {
    pub fn new(enabled: bool) -> Self {
        LogDiagnostics { enabled }
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        LogDiagnostics::new(true)
    }
}

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        if self.enabled {
            log::warn!(target: "apitree", "{message}");
        }
    }
}

/// Sink that drops every warning.
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _message: &str) {}
}

pub(crate) fn default_sink() -> Arc<dyn Diagnostics> {
    Arc::new(LogDiagnostics::default())
}

#[cfg(test)]
pub(crate) mod capture {
    use super::Diagnostics;
    use std::sync::Mutex;

    /// Test sink that records warnings for assertion.
    #[derive(Default)]
    pub struct CaptureDiagnostics {
        pub messages: Mutex<Vec<String>>,
    }

    impl Diagnostics for CaptureDiagnostics {
        fn warn(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}
