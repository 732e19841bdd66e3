//! One-shot QR code rendering of the device identity.
//!
//! The bit matrix comes from `qrcodegen-no-heap` (fixed version, medium
//! ECC, no ECC boost); placement comes from [`QrLayout`]. Drawing goes
//! through any `embedded-graphics` target, so the same code renders on the
//! OLED and on a recording target in tests.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use qrcodegen_no_heap::{DataTooLong, QrCode, QrCodeEcc, Version};

use crate::config::QR_VERSION;
use crate::ui::layout::QrLayout;

/// Scratch/output buffer length for the fixed QR version.
pub const QR_BUFFER_LEN: usize = Version::new(QR_VERSION).buffer_len();

/// Square boolean matrix; `true` is a dark module.
pub trait ModuleGrid {
    /// Side length in modules.
    fn size(&self) -> u32;
    fn is_dark(&self, x: u32, y: u32) -> bool;
}

impl ModuleGrid for QrCode<'_> {
    fn size(&self) -> u32 {
        QrCode::size(self) as u32
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.get_module(x as i32, y as i32)
    }
}

/// Colours, font and module size for a render pass.
#[derive(Clone, Copy)]
pub struct QrStyle<'a, C> {
    pub module_size: u32,
    pub font: &'a MonoFont<'a>,
    /// Screen background.
    pub background: C,
    /// Quiet zone and light modules.
    pub light: C,
    pub dark: C,
    pub text: C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderError<E> {
    /// The text does not fit in the fixed QR version.
    Encoding,
    Display(E),
}

impl<E> From<DataTooLong> for RenderError<E> {
    fn from(_: DataTooLong) -> Self {
        RenderError::Encoding
    }
}

/// Encode `text` at the fixed version and medium error correction.
pub fn encode<'b>(
    text: &str,
    tempbuffer: &mut [u8],
    outbuffer: &'b mut [u8],
) -> Result<QrCode<'b>, DataTooLong> {
    let version = Version::new(QR_VERSION);
    QrCode::encode_text(
        text,
        tempbuffer,
        outbuffer,
        QrCodeEcc::Medium,
        version,
        version,
        None,
        false,
    )
}

/// Clear the screen and draw `grid` centred with `text` underneath.
pub fn draw_code<D, G>(
    display: &mut D,
    grid: &G,
    text: &str,
    style: &QrStyle<'_, D::Color>,
) -> Result<QrLayout, D::Error>
where
    D: DrawTarget,
    G: ModuleGrid + ?Sized,
{
    let modules = grid.size();
    let layout = QrLayout::compute(
        display.bounding_box().size,
        modules,
        style.module_size,
        style.font.character_size.height,
    );

    display.clear(style.background)?;

    layout
        .quiet_zone()
        .into_styled(PrimitiveStyle::with_fill(style.light))
        .draw(display)?;

    let dark = PrimitiveStyle::with_fill(style.dark);
    for y in 0..modules {
        for x in 0..modules {
            if grid.is_dark(x, y) {
                layout.module(x, y).into_styled(dark).draw(display)?;
            }
        }
    }

    let label_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(
        text,
        layout.label_anchor,
        MonoTextStyle::new(style.font, style.text),
        label_style,
    )
    .draw(display)?;

    Ok(layout)
}

/// Encode `text` and draw it. Nothing is drawn if encoding fails.
pub fn render_identity<D>(
    display: &mut D,
    text: &str,
    style: &QrStyle<'_, D::Color>,
) -> Result<QrLayout, RenderError<D::Error>>
where
    D: DrawTarget,
{
    let mut tempbuffer = [0u8; QR_BUFFER_LEN];
    let mut outbuffer = [0u8; QR_BUFFER_LEN];
    let code = encode(text, &mut tempbuffer, &mut outbuffer)?;

    draw_code(display, &code, text, style).map_err(RenderError::Display)
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
