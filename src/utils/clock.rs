//! Injected time source for message timestamps and achievement timing

use chrono::{DateTime, Duration, Local, TimeZone};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for anything that stamps or times user actions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Wall-clock label shown next to chat bubbles (`HH:MM`)
    fn time_label(&self) -> String {
        self.now().format("%H:%M").to_string()
    }
}

/// Clock backed by the system's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    start: DateTime<Local>,
    offset_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            start,
            offset_ms: AtomicI64::new(0),
        }
    }

    /// Start at the given local wall-clock time on 2024-01-01
    pub fn at(hour: u32, minute: u32) -> Self {
        let start = Local
            .with_ymd_and_hms(2024, 1, 1, hour, minute, 0)
            .earliest()
            .unwrap_or_else(Local::now);
        Self::new(start)
    }

    pub fn advance(&self, by: std::time::Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.offset_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.start + Duration::milliseconds(self.offset_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_label_and_advance() {
        let clock = ManualClock::at(9, 5);
        assert_eq!(clock.time_label(), "09:05");

        clock.advance(std::time::Duration::from_secs(61 * 60));
        assert_eq!(clock.time_label(), "10:06");
    }

    #[test]
    fn test_system_clock_label_shape() {
        let label = SystemClock.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
