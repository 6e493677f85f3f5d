// Ctrl+C suppression for the lifetime of an interactive session

use crate::log_debug;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used when an unsuppressed interrupt terminates the process
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// While alive, SIGINT is ignored so only the exit command ends the session.
/// Dropping the guard restores the default "interrupt terminates" behaviour.
///
/// The process-wide handler can be registered only once, so create one guard
/// per process.
pub struct InterruptGuard {
	suppressed: Arc<AtomicBool>,
}

impl InterruptGuard {
	pub fn install() -> Result<Self> {
		let guard = Self::detached();
		let suppressed = guard.suppressed.clone();

		ctrlc::set_handler(move || {
			if !suppressed.load(Ordering::SeqCst) {
				std::process::exit(INTERRUPT_EXIT_CODE);
			}
		})
		.context("Failed to install Ctrl+C handler")?;

		log_debug!("Ctrl+C is suppressed for this session");
		Ok(guard)
	}

	// Suppression state without a registered handler
	fn detached() -> Self {
		Self {
			suppressed: Arc::new(AtomicBool::new(true)),
		}
	}

	#[cfg(test)]
	fn is_suppressing(&self) -> bool {
		self.suppressed.load(Ordering::SeqCst)
	}

	// Shared view of the suppression flag, as seen by the signal handler
	#[cfg(test)]
	fn flag(&self) -> Arc<AtomicBool> {
		self.suppressed.clone()
	}
}

impl Drop for InterruptGuard {
	fn drop(&mut self) {
		self.suppressed.store(false, Ordering::SeqCst);
	}
}
