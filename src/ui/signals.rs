use crate::error::{Md2ProjectError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Exit status used when the user forces termination.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Counts Ctrl+C presses. The first asks the writer to stop after the
/// current file; the second terminates the process.
pub struct GracefulShutdown {
    interrupts: Arc<AtomicUsize>,
}

impl GracefulShutdown {
    /// Installs the process-wide Ctrl+C handler. Can only succeed once per process.
    pub fn new() -> Result<Self> {
        let interrupts = Arc::new(AtomicUsize::new(0));
        let handler_interrupts = Arc::clone(&interrupts);

        ctrlc::set_handler(move || {
            if handler_interrupts.fetch_add(1, Ordering::SeqCst) == 0 {
                eprintln!("\n🛑 Stopping after the current file (Ctrl+C again to abort now)");
            } else {
                eprintln!("\n💀 Aborting");
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        })
        .map_err(|e| Md2ProjectError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { interrupts })
    }

    /// Same flag without touching the process signal handler.
    pub fn new_for_test() -> Self {
        Self {
            interrupts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.interrupts.load(Ordering::SeqCst) == 0
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(Md2ProjectError::Cancelled)
        }
    }

    pub fn request_shutdown(&self) {
        self.interrupts.fetch_add(1, Ordering::SeqCst);
    }
}
