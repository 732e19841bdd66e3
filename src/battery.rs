//! Battery level counter and the periodic notification scheduler.
//!
//! The scheduler is polled from the main loop. It owns the level and the
//! timer deadline, so nothing here needs locking: `poll` is the only writer.
//!
//! ```text
//!   start(now)          poll(now < deadline)
//!       │                    ┌──┐
//!       ▼                    ▼  │
//!     Idle ──(now ≥ deadline)──► Due ──poll: step, publish, rearm──► Idle
//! ```

use crate::config::BATTERY_LEVEL_MAX;

/// Battery percentage, always within `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Returns `None` when `percent` is above 100.
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= BATTERY_LEVEL_MAX {
            Some(Self(percent))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next value of the counter: +1, wrapping from 100 to 0.
    pub const fn step(self) -> Self {
        if self.0 >= BATTERY_LEVEL_MAX {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }
}

/// Receiver of published battery levels (the GATT characteristic).
///
/// Publishing is fire-and-forget: a sink with no subscribed peer just drops
/// the notification.
pub trait LevelSink {
    fn publish(&mut self, level: BatteryLevel);
}

/// Non-blocking interval timer driven by an external millisecond clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationTimer {
    interval_ms: u64,
    deadline_ms: u64,
}

impl NotificationTimer {
    pub const fn start(now_ms: u64, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline_ms: now_ms + interval_ms,
        }
    }

    pub const fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Arm the next expiry one interval after `now_ms`.
    pub fn rearm(&mut self, now_ms: u64) {
        self.deadline_ms = now_ms + self.interval_ms;
    }

    pub const fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

/// Steps the battery level once per expired interval and publishes it.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationScheduler {
    timer: NotificationTimer,
    level: BatteryLevel,
}

impl NotificationScheduler {
    pub const fn start(now_ms: u64, interval_ms: u64, seed: BatteryLevel) -> Self {
        Self {
            timer: NotificationTimer::start(now_ms, interval_ms),
            level: seed,
        }
    }

    /// Perform one step-and-publish if the deadline has passed.
    ///
    /// Returns the published level, or `None` while idle.
    pub fn poll<S: LevelSink>(&mut self, now_ms: u64, sink: &mut S) -> Option<BatteryLevel> {
        if !self.timer.is_expired(now_ms) {
            return None;
        }

        self.level = self.level.step();
        sink.publish(self.level);
        self.timer.rearm(now_ms);
        Some(self.level)
    }

    pub fn deadline_ms(&self) -> u64 {
        self.timer.deadline_ms()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
