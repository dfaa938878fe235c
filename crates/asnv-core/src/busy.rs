use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Gate that admits at most one in-flight operation at a time.
///
/// Clones share the same flag, so a client handed to a spawned task still
/// observes (and blocks) work started through any other clone.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a guard obtained from this flag is alive
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Marks the flag busy, or returns `None` if it already is
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Clears the owning [`BusyFlag`] when dropped, on every exit path.
#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
