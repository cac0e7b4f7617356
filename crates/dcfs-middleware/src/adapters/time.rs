use crate::ports::outbound::TimeSource;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Wall-clock time source with a monotonic floor.
///
/// Returns `max(now, previous + 1)`, so timestamps from one process never
/// repeat or go backwards, even if the system clock does.
#[derive(Debug, Default)]
pub struct SystemTimeSource {
    last: AtomicI64,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_nanos(&self) -> i64 {
        let wall = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                Some(wall.max(prev.saturating_add(1)))
            })
            .unwrap_or_else(|prev| prev);
        wall.max(previous.saturating_add(1))
    }
}
