//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, protocol constants and rendering parameters
//! live here so they can be tuned in one place. Nothing is read at runtime.

// Identity

/// Type tag prefixed to the advertised device name (`TestBT-<id>`).
pub const DEVICE_TYPE_TAG: &str = "TestBT";

/// Capacity of the identity string: tag + '-' + up to 8 decimal digits
/// (the folded id is 24 bits wide) with headroom.
pub const IDENTITY_CAPACITY: usize = 32;

const _: () = assert!(DEVICE_TYPE_TAG.len() + 1 + 8 <= IDENTITY_CAPACITY);

// Battery notifications

/// Interval between battery level notifications (ms).
pub const NOTIFY_INTERVAL_MS: u64 = 5000;

/// Battery level the counter starts from.
pub const BATTERY_LEVEL_SEED: u8 = 57;

/// Upper bound of the battery level (percent).
pub const BATTERY_LEVEL_MAX: u8 = 100;

// BLE

/// Battery Service (16-bit SIG UUID).
pub const BATTERY_SERVICE_UUID: u16 = 0x180F;

/// Battery Level characteristic (16-bit SIG UUID).
pub const BATTERY_LEVEL_UUID: u16 = 0x2A19;

/// Characteristic User Description descriptor (16-bit SIG UUID).
pub const USER_DESCRIPTION_UUID: u16 = 0x2901;

/// Value of the user description attached to the battery level.
pub const BATTERY_LEVEL_DESCRIPTION: &str = "Percentage 0 - 100";

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

/// Bytes left for the local name in a legacy advertisement after the flags
/// (3) and the one-entry 16-bit service list (4), minus its own header (2).
pub const ADV_NAME_ROOM: usize = 31 - 3 - 4 - 2;

const _: () = assert!(DEVICE_TYPE_TAG.len() + 1 + 8 <= ADV_NAME_ROOM);

// QR code

/// Fixed QR symbol version. Version 3 is a 29x29 module matrix.
pub const QR_VERSION: u8 = 3;

/// Size of one QR module on screen (pixels).
/// 2 px keeps the 31-module footprint inside the 64 px portrait OLED.
pub const QR_MODULE_SIZE: u32 = 2;

/// Vertical space (in text lines) budgeted for the code label.
pub const LABEL_RESERVED_LINES: u32 = 5;

/// Distance (in text lines) from the bottom of the code to the label top.
pub const LABEL_GAP_LINES: u32 = 2;

// Display
//
// SSD1306 128x64 OLED on TWIM0, mounted in portrait (64x128 logical).
// Pins are peripheral singletons, so they are taken in `main` rather than
// named here:
//
//   I²C SDA  → P0.26
//   I²C SCL  → P0.27
