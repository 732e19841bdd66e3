//! Battery Service declaration and connection bookkeeping.
//!
//! The GATT layout is described by a static [`PeripheralServiceDescriptor`]
//! that the SoftDevice server registers at startup. Connection events
//! arrive from the BLE task through the [`ConnectionListener`] interface.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::{
    BATTERY_LEVEL_DESCRIPTION, BATTERY_LEVEL_UUID, BATTERY_SERVICE_UUID, USER_DESCRIPTION_UUID,
};

/// Capabilities of a GATT characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharacteristicProps {
    pub read: bool,
    pub notify: bool,
}

/// One service with one characteristic and its user description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralServiceDescriptor {
    pub service_uuid: u16,
    pub characteristic_uuid: u16,
    pub props: CharacteristicProps,
    pub description_uuid: u16,
    pub description: &'static str,
    /// Length of the characteristic value in bytes.
    pub value_len: usize,
}

/// Battery Service (0x180F) exposing Battery Level (0x2A19, read + notify).
pub const BATTERY_SERVICE: PeripheralServiceDescriptor = PeripheralServiceDescriptor {
    service_uuid: BATTERY_SERVICE_UUID,
    characteristic_uuid: BATTERY_LEVEL_UUID,
    props: CharacteristicProps {
        read: true,
        notify: true,
    },
    description_uuid: USER_DESCRIPTION_UUID,
    description: BATTERY_LEVEL_DESCRIPTION,
    value_len: 1,
};

/// Link state as last reported by the BLE stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Connection event handler registered with the peripheral task.
pub trait ConnectionListener {
    fn on_connect(&self);
    fn on_disconnect(&self);
}

/// Single-word connection flag.
///
/// Written from the BLE task, readable from any context.
pub struct ConnectionFlag {
    connected: AtomicBool,
}

impl ConnectionFlag {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ConnectionState {
        if self.connected.load(Ordering::Acquire) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }
}

impl Default for ConnectionFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionListener for ConnectionFlag {
    fn on_connect(&self) {
        self.connected.store(true, Ordering::Release);
    }

    fn on_disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}
