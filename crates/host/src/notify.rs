//! User-visible notification seam
//!
//! The host surfaces non-fatal conditions as notifications rather than
//! errors. The trait keeps the session testable and lets each embedding
//! route notices to its own surface (editor toast, terminal, test buffer).

use tracing::{error, info, warn};

pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default notifier: structured log records only.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!(component = "notifier", event = "notify.info", message);
    }

    fn warn(&self, message: &str) {
        warn!(component = "notifier", event = "notify.warn", message);
    }

    fn error(&self, message: &str) {
        error!(component = "notifier", event = "notify.error", message);
    }
}
