//! Single-flight guard for user-triggered network operations.

use std::sync::atomic::{AtomicBool, Ordering};

use resumate_core::error::{ResumateError, Result};

/// Allows at most one operation of a kind to be in flight.
///
/// A second caller is rejected immediately with [`ResumateError::Busy`]
/// instead of waiting.
#[derive(Debug)]
pub struct SingleFlight {
    operation: &'static str,
    running: AtomicBool,
}

impl SingleFlight {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            running: AtomicBool::new(false),
        }
    }

    /// Claims the slot, or fails if it is already taken.
    pub fn begin(&self) -> Result<FlightGuard<'_>> {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("{} rejected: already in progress", self.operation);
            return Err(ResumateError::Busy {
                operation: self.operation,
            });
        }
        Ok(FlightGuard { flight: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Releases the slot when dropped, including on early return or panic.
#[derive(Debug)]
#[must_use]
pub struct FlightGuard<'a> {
    flight: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flight.running.store(false, Ordering::SeqCst);
    }
}
