//! Signal handling: cooperative shutdown only, per `spec.md` §5. A
//! SIGINT/SIGTERM flips a shared flag; the dispatcher checks it
//! between jobs and after waking from its poll sleep. There is no
//! mid-job cancellation — a job that is already running completes or
//! crashes on its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

/// Installs a `ctrlc` handler that flips the returned flag to `true`
/// on interrupt. Registration failure (e.g. a handler already
/// installed in-process) is logged and otherwise ignored — the worker
/// still runs, it just won't shut down cooperatively on that signal.
pub fn install() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);

    if let Err(e) = ctrlc::set_handler(move || {
        warn!("shutdown signal received, draining current job before exit");
        flag.store(false, Ordering::SeqCst);
    }) {
        warn!(error = %e, "failed to install signal handler");
    }

    running
}
