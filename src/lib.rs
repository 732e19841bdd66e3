//! Test-only library interface for bas-beacon.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required): identity derivation,
//! the battery notification scheduler, the Battery Service model and
//! the QR code layout/renderer.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod battery;
pub mod config;
pub mod identity;

// ═══════════════════════════════════════════════════════════════════════════
// Subsystem Re-exports
// ═══════════════════════════════════════════════════════════════════════════

// Internal module paths for the actual implementations
#[path = "ble/service.rs"]
mod ble_service_impl;

#[path = "ui/layout.rs"]
mod ui_layout_impl;
#[path = "ui/qr.rs"]
mod ui_qr_impl;

pub mod ble {
    pub mod service {
        pub use crate::ble_service_impl::*;
    }
}

pub mod ui {
    pub mod layout {
        pub use crate::ui_layout_impl::*;
    }
    pub mod qr {
        pub use crate::ui_qr_impl::*;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - application context
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::app::AppContext;
    use super::battery::{BatteryLevel, LevelSink};
    use super::ble::service::{ConnectionFlag, ConnectionListener, ConnectionState};
    use super::identity::DeviceIdentity;

    #[derive(Default)]
    struct Published(Vec<u8>);

    impl LevelSink for Published {
        fn publish(&mut self, level: BatteryLevel) {
            self.0.push(level.get());
        }
    }

    #[test]
    fn app_context_tracks_deadline() {
        let identity = DeviceIdentity::derive("TestBT", 0).unwrap();
        let flag = ConnectionFlag::new();
        let mut app = AppContext::new(&identity, &flag, 100, 5_000, BatteryLevel::new(57).unwrap());
        let mut sink = Published::default();

        assert_eq!(app.next_deadline_ms(), 5_100);
        assert_eq!(app.poll(5_099, &mut sink), None);
        assert_eq!(app.poll(5_100, &mut sink).map(BatteryLevel::get), Some(58));
        assert_eq!(app.next_deadline_ms(), 10_100);
    }

    #[test]
    fn app_context_reports_connection_without_gating() {
        let identity = DeviceIdentity::derive("TestBT", 0).unwrap();
        let flag = ConnectionFlag::new();
        let mut app = AppContext::new(&identity, &flag, 0, 10, BatteryLevel::new(0).unwrap());
        let mut sink = Published::default();

        assert_eq!(app.connection_state(), ConnectionState::Disconnected);
        app.poll(10, &mut sink);
        flag.on_connect();
        assert_eq!(app.connection_state(), ConnectionState::Connected);
        app.poll(20, &mut sink);
        assert_eq!(sink.0, [1, 2]);
        assert_eq!(app.identity().as_str(), "TestBT-0");
    }
}
