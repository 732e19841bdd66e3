//! Integration tests for bas-beacon host-testable logic.

use core::convert::Infallible;

use bas_beacon::app::AppContext;
use bas_beacon::battery::{BatteryLevel, LevelSink};
use bas_beacon::ble::service::{ConnectionFlag, ConnectionListener, ConnectionState, BATTERY_SERVICE};
use bas_beacon::config::{
    ADV_NAME_ROOM, BATTERY_LEVEL_SEED, DEVICE_TYPE_TAG, IDENTITY_CAPACITY, NOTIFY_INTERVAL_MS,
    QR_MODULE_SIZE,
};
use bas_beacon::identity::DeviceIdentity;
use bas_beacon::ui::qr::{render_identity, QrStyle, RenderError};
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};

/// Stands in for the GATT characteristic: remembers every notification.
#[derive(Default)]
struct Characteristic {
    notified: Vec<u8>,
}

impl LevelSink for Characteristic {
    fn publish(&mut self, level: BatteryLevel) {
        self.notified.push(level.get());
    }
}

/// 64x128 portrait panel that keeps a framebuffer.
struct Panel {
    pixels: [[bool; 64]; 128],
}

impl Panel {
    fn new() -> Self {
        Self {
            pixels: [[false; 64]; 128],
        }
    }
}

impl OriginDimensions for Panel {
    fn size(&self) -> Size {
        Size::new(64, 128)
    }
}

impl DrawTarget for Panel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let area = self.bounding_box();
        for Pixel(p, color) in pixels {
            if area.contains(p) {
                self.pixels[p.y as usize][p.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

/// Panel whose bus has gone away: every draw fails.
struct DetachedPanel;

#[derive(Debug, PartialEq)]
struct BusError;

impl OriginDimensions for DetachedPanel {
    fn size(&self) -> Size {
        Size::new(64, 128)
    }
}

impl DrawTarget for DetachedPanel {
    type Color = BinaryColor;
    type Error = BusError;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(BusError)
    }

    fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
        Err(BusError)
    }
}

fn beacon_style() -> QrStyle<'static, BinaryColor> {
    QrStyle {
        module_size: QR_MODULE_SIZE,
        font: &FONT_4X6,
        background: BinaryColor::Off,
        light: BinaryColor::On,
        dark: BinaryColor::Off,
        text: BinaryColor::On,
    }
}

#[test]
fn beacon_end_to_end() {
    // Top three address bytes 0xD2, 0x04, 0x00 fold to 0x0004D2 = 1234.
    let identity = DeviceIdentity::derive(DEVICE_TYPE_TAG, 0xD204_0000_0000).unwrap();
    assert_eq!(identity.as_str(), "TestBT-1234");
    assert_eq!(BATTERY_SERVICE.service_uuid, 0x180F);
    assert!(identity.as_str().len() <= ADV_NAME_ROOM);

    let flag = ConnectionFlag::new();
    let seed = BatteryLevel::new(BATTERY_LEVEL_SEED).unwrap();
    let mut app = AppContext::new(&identity, &flag, 0, NOTIFY_INTERVAL_MS, seed);
    let mut characteristic = Characteristic::default();

    flag.on_connect();
    let mut now = NOTIFY_INTERVAL_MS;
    assert_eq!(app.poll(now, &mut characteristic).map(BatteryLevel::get), Some(58));

    flag.on_disconnect();
    assert_eq!(app.connection_state(), ConnectionState::Disconnected);
    now += NOTIFY_INTERVAL_MS;
    app.poll(now, &mut characteristic);

    flag.on_connect();
    now += NOTIFY_INTERVAL_MS;
    app.poll(now, &mut characteristic);

    assert_eq!(characteristic.notified, [58, 59, 60]);
}

#[test]
fn level_period_is_101_notifications() {
    let identity = DeviceIdentity::derive(DEVICE_TYPE_TAG, 0).unwrap();
    let flag = ConnectionFlag::new();
    let seed = BatteryLevel::new(BATTERY_LEVEL_SEED).unwrap();
    let mut app = AppContext::new(&identity, &flag, 0, NOTIFY_INTERVAL_MS, seed);
    let mut characteristic = Characteristic::default();

    for i in 1..=202 {
        app.poll(i * NOTIFY_INTERVAL_MS, &mut characteristic);
    }

    let n = &characteristic.notified;
    assert_eq!(n.len(), 202);
    assert_eq!(n[42], 100);
    assert_eq!(n[43], 0);
    assert_eq!(n[43 + 101], 0);
    assert_eq!(&n[..101], &n[101..]);
}

#[test]
fn polling_faster_than_interval_publishes_once_per_interval() {
    let identity = DeviceIdentity::derive(DEVICE_TYPE_TAG, 0).unwrap();
    let flag = ConnectionFlag::new();
    let seed = BatteryLevel::new(BATTERY_LEVEL_SEED).unwrap();
    let mut app = AppContext::new(&identity, &flag, 0, NOTIFY_INTERVAL_MS, seed);
    let mut characteristic = Characteristic::default();

    // One poll per millisecond for 20 s.
    for now in 0..20_000 {
        app.poll(now, &mut characteristic);
    }
    assert_eq!(characteristic.notified.len(), 3);
    assert!(characteristic.notified.len() as u64 <= 20_000 / NOTIFY_INTERVAL_MS);
}

#[test]
fn identity_with_oversized_tag_is_rejected_not_truncated() {
    let tag = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    assert!(tag.len() + 1 + 8 > IDENTITY_CAPACITY);
    assert_eq!(DeviceIdentity::derive(tag, 0xFFFF_FF00_0000), None);
}

#[test]
fn display_failure_is_reported_as_display_error() {
    let identity = DeviceIdentity::derive(DEVICE_TYPE_TAG, 0xD204_0000_0000).unwrap();
    let result = render_identity(&mut DetachedPanel, identity.as_str(), &beacon_style());
    assert_eq!(result, Err(RenderError::Display(BusError)));
}

#[test]
fn over_capacity_text_fails_before_touching_display() {
    // Version 3 / medium holds 42 bytes; encoding fails before any draw call,
    // so the failing panel is never reached.
    let text = [b'x'; 60];
    let text = core::str::from_utf8(&text).unwrap();
    let result = render_identity(&mut DetachedPanel, text, &beacon_style());
    assert_eq!(result, Err(RenderError::Encoding));
}

#[test]
fn identity_qr_fits_portrait_oled() {
    let identity = DeviceIdentity::derive(DEVICE_TYPE_TAG, 0xFFFF_FF00_0000).unwrap();
    let mut panel = Panel::new();

    let layout = render_identity(&mut panel, identity.as_str(), &beacon_style()).unwrap();
    let screen = Rectangle::new(Point::zero(), Size::new(64, 128));
    let zone = layout.quiet_zone();
    assert!(screen.contains(zone.top_left));
    assert!(screen.contains(zone.bottom_right().unwrap()));

    // Quiet zone corners stay light; finder pattern corner is dark.
    let Point { x, y } = zone.top_left;
    assert!(panel.pixels[y as usize][x as usize]);
    let m = QR_MODULE_SIZE as i32;
    assert!(!panel.pixels[(y + m) as usize][(x + m) as usize]);

    // Label pixels appear below the code, inside the panel.
    let label_rows = &panel.pixels[layout.label_anchor.y as usize..];
    assert!(label_rows.iter().any(|row| row.iter().any(|&on| on)));
    let between = &panel.pixels[(y + layout.pixel_size as i32) as usize..layout.label_anchor.y as usize];
    assert!(between.iter().all(|row| row.iter().all(|&on| !on)));
}
