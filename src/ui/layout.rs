//! Placement of a QR code and its label on a display.
//!
//! The code is drawn with a one-module quiet zone on every side, centred
//! horizontally. Vertically, `LABEL_RESERVED_LINES` text lines are budgeted
//! below the code and the code is then pushed down by one line:
//!
//! ```text
//! pixel_size = (modules + 2) * module_size
//! offset_x   = (width  - pixel_size) / 2
//! offset_y   = (height - pixel_size - line_height * 5) / 2 + line_height
//! label_top  = offset_y + pixel_size + line_height * 2
//! ```

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::{LABEL_GAP_LINES, LABEL_RESERVED_LINES};

/// Pixel geometry of one rendered code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QrLayout {
    /// Side of the code including the quiet zone (pixels).
    pub pixel_size: u32,
    /// Side of one module (pixels).
    pub module_size: u32,
    /// Top-left corner of the quiet zone.
    pub offset: Point,
    /// Center-top anchor of the label text.
    pub label_anchor: Point,
}

impl QrLayout {
    /// Lay out a `modules`×`modules` code on a display of `display` size.
    ///
    /// Offsets use floor division and go negative when the code does not
    /// fit; drawing then clips at the display edge.
    pub fn compute(display: Size, modules: u32, module_size: u32, line_height: u32) -> Self {
        let pixel_size = (modules + 2) * module_size;

        let width = display.width as i32;
        let height = display.height as i32;
        let side = pixel_size as i32;
        let line = line_height as i32;

        let offset_x = (width - side).div_euclid(2);
        let offset_y = (height - side - line * LABEL_RESERVED_LINES as i32).div_euclid(2) + line;

        let label_anchor = Point::new(
            width / 2,
            offset_y + side + line * LABEL_GAP_LINES as i32,
        );

        Self {
            pixel_size,
            module_size,
            offset: Point::new(offset_x, offset_y),
            label_anchor,
        }
    }

    /// Light square behind the code, quiet zone included.
    pub fn quiet_zone(&self) -> Rectangle {
        Rectangle::new(self.offset, Size::new_equal(self.pixel_size))
    }

    /// Square painted for the dark module at matrix cell (`x`, `y`).
    pub fn module(&self, x: u32, y: u32) -> Rectangle {
        let m = self.module_size as i32;
        let top_left = Point::new(
            (x as i32 + 1) * m + self.offset.x,
            (y as i32 + 1) * m + self.offset.y,
        );
        Rectangle::new(top_left, Size::new_equal(self.module_size))
    }
}
