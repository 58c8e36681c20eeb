use std::fmt;

use log::warn;
use sysinfo::System;

pub const DEFAULT_MIN_FREE_MEMORY_MB: u64 = 64;
const DEFAULT_CHECK_INTERVAL: usize = 500;

/// Stops a streaming read once available memory drops below a floor.
///
/// Memory is only queried every `check_interval` rows.
pub struct MemoryGuard {
    min_free_bytes: u64,
    check_interval: usize,
    rows_since_check: usize,
    probe: Box<dyn FnMut() -> u64>,
}

impl MemoryGuard {
    pub fn new(min_free_mb: u64) -> Self {
        let mut system = System::new();
        Self::with_probe(min_free_mb, DEFAULT_CHECK_INTERVAL, move || {
            system.refresh_memory();
            system.available_memory()
        })
    }

    /// Guard that never trips.
    pub fn disabled() -> Self {
        Self::with_probe(0, usize::MAX, || u64::MAX)
    }

    pub fn with_probe<F>(min_free_mb: u64, check_interval: usize, probe: F) -> Self
    where
        F: FnMut() -> u64 + 'static,
    {
        Self {
            min_free_bytes: min_free_mb.saturating_mul(1024 * 1024),
            check_interval: check_interval.max(1),
            rows_since_check: 0,
            probe: Box::new(probe),
        }
    }

    /// Called once per row read. Returns the reason to stop when memory is
    /// below the floor.
    pub fn check(&mut self) -> Option<String> {
        if self.min_free_bytes == 0 {
            return None;
        }
        self.rows_since_check += 1;
        if self.rows_since_check < self.check_interval {
            return None;
        }
        self.rows_since_check = 0;
        let available = (self.probe)();
        if available >= self.min_free_bytes {
            return None;
        }
        let reason = format!(
            "available memory {} MiB below the {} MiB floor",
            available / (1024 * 1024),
            self.min_free_bytes / (1024 * 1024)
        );
        warn!("Stopping sample early: {reason}");
        Some(reason)
    }
}

impl fmt::Debug for MemoryGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGuard")
            .field("min_free_bytes", &self.min_free_bytes)
            .field("check_interval", &self.check_interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trips_only_on_check_interval_when_memory_is_low() {
        let mut guard = MemoryGuard::with_probe(10, 3, || 1024);
        assert!(guard.check().is_none());
        assert!(guard.check().is_none());
        let reason = guard.check().expect("guard trips");
        assert!(reason.contains("below the 10 MiB floor"));
    }

    #[test]
    fn plenty_of_memory_never_trips() {
        let mut guard = MemoryGuard::with_probe(1, 1, || u64::MAX);
        for _ in 0..10 {
            assert!(guard.check().is_none());
        }
        let mut disabled = MemoryGuard::disabled();
        assert!(disabled.check().is_none());
    }
}
