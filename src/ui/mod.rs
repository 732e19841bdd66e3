//! User interface subsystem - a one-shot QR code on the OLED.
//!
//! At boot the device identity is encoded as a QR code and drawn once,
//! with the identity string printed underneath. The screen is not
//! refreshed afterwards.
//!
//! ## Components
//!
//! - **Layout**: pixel geometry of the code and label
//! - **QR**: encoding and drawing against any `DrawTarget`
//! - **Display**: SSD1306 128×64 OLED via I²C, portrait orientation

pub mod display;
pub mod layout;
pub mod qr;
