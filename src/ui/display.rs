//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::BinaryColor;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::QR_MODULE_SIZE;
use crate::error::Error;
use crate::identity::DeviceIdentity;
use crate::ui::qr::{self, QrStyle};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 in portrait (64×128) and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate90)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

/// Black screen, white quiet zone, black modules, white label.
fn qr_style() -> QrStyle<'static, BinaryColor> {
    QrStyle {
        module_size: QR_MODULE_SIZE,
        font: &FONT_4X6,
        background: BinaryColor::Off,
        light: BinaryColor::On,
        dark: BinaryColor::Off,
        text: BinaryColor::On,
    }
}

/// Render the identity QR code and push the frame to the panel.
pub fn show_identity<I2C>(display: &mut Display<I2C>, identity: &DeviceIdentity) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let layout = qr::render_identity(display, identity.as_str(), &qr_style())?;
    defmt::debug!(
        "QR at ({}, {}), {} px",
        layout.offset.x,
        layout.offset.y,
        layout.pixel_size
    );
    display.flush().map_err(|_| Error::Display)
}
