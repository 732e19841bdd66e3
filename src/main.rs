//! bas-beacon firmware entry point (nRF52840 + S140 SoftDevice).
//!
//! Startup, in order:
//!
//! 1. Derive the device identity from the FICR device address.
//! 2. Stop the raw RADIO peripheral so the SoftDevice owns the radio.
//! 3. Enable the SoftDevice under the identity, register the Battery
//!    Service and start advertising.
//! 4. Start the 5 s battery notification schedule.
//! 5. Bring up the OLED.
//! 6. Draw the identity QR code once.
//!
//! After that the main task only services the notification schedule.
//!
//! The BLE stack is only linked with the `embedded` feature; the binary's
//! `required-features` keeps cargo from building it without one.

#![no_std]
#![no_main]

mod app;
mod battery;
mod ble;
mod config;
mod error;
mod identity;
mod ui;

use core::mem;

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::{bind_interrupts, pac, peripherals, twim};
use embassy_time::{Instant, Timer};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::app::AppContext;
use crate::battery::BatteryLevel;
use crate::ble::server::{BatteryPublisher, BatteryServer};
use crate::ble::service::{ConnectionFlag, BATTERY_SERVICE};
use crate::config::{BATTERY_LEVEL_SEED, DEVICE_TYPE_TAG, NOTIFY_INTERVAL_MS};
use crate::error::Error;
use crate::identity::DeviceIdentity;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Connection state, written by the peripheral task.
static CONNECTION: ConnectionFlag = ConnectionFlag::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn peripheral_task(
    sd: &'static Softdevice,
    server: &'static BatteryServer,
    name: &'static str,
) -> ! {
    ble::peripheral::run(sd, server, name, &CONNECTION).await
}

/// 48-bit factory device address from FICR.
fn hardware_id() -> u64 {
    let low = pac::FICR.deviceaddr(0).read();
    let high = pac::FICR.deviceaddr(1).read() & 0xFFFF;
    (u64::from(high) << 32) | u64::from(low)
}

/// Make sure no raw-radio user holds the RADIO before the SoftDevice does.
fn disable_raw_radio() {
    pac::RADIO.tasks_disable().write_value(1);
}

fn softdevice_config(name: &'static str) -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: name.as_ptr() as _,
            current_len: name.len() as u16,
            max_len: name.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("bas-beacon starting");

    // SoftDevice reserves interrupt priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    static IDENTITY: StaticCell<DeviceIdentity> = StaticCell::new();
    let identity: &'static DeviceIdentity =
        IDENTITY.init(unwrap!(DeviceIdentity::derive(DEVICE_TYPE_TAG, hardware_id())));
    info!("device id: {}", identity.as_str());

    disable_raw_radio();

    let sd = Softdevice::enable(&softdevice_config(identity.as_str()));

    let seed = unwrap!(BatteryLevel::new(BATTERY_LEVEL_SEED));
    static SERVER: StaticCell<BatteryServer> = StaticCell::new();
    let server = match BatteryServer::new(sd, &BATTERY_SERVICE, seed) {
        Ok(server) => SERVER.init(server),
        Err(e) => defmt::panic!("GATT registration failed: {}", Error::from(e)),
    };
    let sd: &'static Softdevice = sd;

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(peripheral_task(sd, server, identity.as_str())));

    let mut app = AppContext::new(
        identity,
        &CONNECTION,
        Instant::now().as_millis(),
        NOTIFY_INTERVAL_MS,
        seed,
    );

    interrupt::TWISPI0.set_priority(Priority::P3);
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);

    let mut display = unwrap!(ui::display::init(i2c));

    match ui::display::show_identity(&mut display, app.identity()) {
        Ok(()) => info!("QR code rendered"),
        Err(Error::QrCapacity) => warn!("identity does not fit the QR code, skipping render"),
        Err(e) => defmt::panic!("display render failed: {}", e),
    }

    let mut publisher = BatteryPublisher::new(sd, server);
    loop {
        Timer::at(Instant::from_millis(app.next_deadline_ms())).await;
        if let Some(level) = app.poll(Instant::now().as_millis(), &mut publisher) {
            debug!("battery level {} ({})", level, app.connection_state());
        }
    }
}
