//! One-shot interrupt flag.
//!
//! The caller creates an `Interrupt`, hands a clone to the engine and keeps
//! one for whatever raises it (typically a Ctrl-C handler). The walk checks
//! it before every entry; once raised it stays raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the interrupt. Safe to call from any thread, any number of times.
    ///
    /// Returns true if this call was the one that raised it.
    pub fn trigger(&self) -> bool {
        !self.flag.swap(true, Ordering::SeqCst)
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
