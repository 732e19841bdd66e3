//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Service model** - the Battery Service declaration and the
//!    connection flag updated from stack events.
//! 2. **GATT server** - registers the service with the SoftDevice and
//!    publishes the battery level (set value + notify).
//! 3. **Peripheral task** - advertises (flags, service UUID and name via
//!    the SoftDevice advertisement builder), serves one connection at a time
//!    and reports connect/disconnect to the registered listener.

pub mod peripheral;
pub mod server;
pub mod service;
