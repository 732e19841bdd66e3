//! Application context shared by startup and the main loop.
//!
//! Device name, connection flag and battery counter live here instead of
//! in globals, and are handed to the loop explicitly.

use crate::battery::{BatteryLevel, LevelSink, NotificationScheduler};
use crate::ble::service::{ConnectionFlag, ConnectionState};
use crate::identity::DeviceIdentity;

pub struct AppContext<'a> {
    identity: &'a DeviceIdentity,
    connection: &'a ConnectionFlag,
    scheduler: NotificationScheduler,
}

impl<'a> AppContext<'a> {
    /// Start the notification schedule at `now_ms`.
    pub fn new(
        identity: &'a DeviceIdentity,
        connection: &'a ConnectionFlag,
        now_ms: u64,
        interval_ms: u64,
        seed: BatteryLevel,
    ) -> Self {
        Self {
            identity,
            connection,
            scheduler: NotificationScheduler::start(now_ms, interval_ms, seed),
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        self.identity
    }

    /// Informational only: publishing is not gated on the link.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// One iteration of the steady-state loop.
    pub fn poll<S: LevelSink>(&mut self, now_ms: u64, sink: &mut S) -> Option<BatteryLevel> {
        self.scheduler.poll(now_ms, sink)
    }

    /// Instant (ms) at which the next `poll` has work to do.
    pub fn next_deadline_ms(&self) -> u64 {
        self.scheduler.deadline_ms()
    }
}
