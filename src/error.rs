//! Unified error type for bas-beacon.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;
use nrf_softdevice::ble::gatt_server::RegisterError;
use nrf_softdevice::ble::peripheral::AdvertiseError;

use crate::ui::qr::RenderError;

/// Top-level error type used across the application.
#[derive(Debug, Format)]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    /// The identity does not fit in the fixed QR version.
    QrCapacity,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, Format)]
pub enum BleError {
    /// GATT service, characteristic or descriptor registration failed.
    RegisterFailed,
    /// Advertising could not start.
    AdvertiseFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<RegisterError> for Error {
    fn from(_: RegisterError) -> Self {
        Error::Ble(BleError::RegisterFailed)
    }
}

impl From<AdvertiseError> for Error {
    fn from(_: AdvertiseError) -> Self {
        Error::Ble(BleError::AdvertiseFailed)
    }
}

impl<E> From<RenderError<E>> for Error {
    fn from(e: RenderError<E>) -> Self {
        match e {
            RenderError::Encoding => Error::QrCapacity,
            RenderError::Display(_) => Error::Display,
        }
    }
}
