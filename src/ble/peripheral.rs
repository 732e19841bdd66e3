//! Connectable advertising and connection lifecycle.
//!
//! One link at a time: advertise, serve GATT until the peer leaves, then
//! advertise again. The current link is kept in a critical-section mutex
//! so the main loop can notify on it.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::peripheral::{self, ConnectableAdvertisement};
use nrf_softdevice::ble::{gatt_server, Connection};
use nrf_softdevice::Softdevice;

use crate::ble::server::BatteryServer;
use crate::ble::service::{ConnectionListener, BATTERY_SERVICE};
use crate::config::{ADV_NAME_ROOM, BLE_ADV_INTERVAL};
use crate::error::Error;

static ACTIVE_LINK: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

/// Connection of the currently attached central, if any.
pub fn active_link() -> Option<Connection> {
    ACTIVE_LINK.lock(|link| link.borrow().clone())
}

fn set_active_link(conn: Option<Connection>) {
    ACTIVE_LINK.lock(|link| *link.borrow_mut() = conn);
}

/// Flags, the battery service UUID and the local name.
///
/// `adapt_name` falls back to a shortened name if it does not fit.
fn adv_data(name: &str) -> LegacyAdvertisementPayload {
    LegacyAdvertisementBuilder::new()
        .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
        .services_16(
            ServiceList::Complete,
            &[ServiceUuid16::from_u16(BATTERY_SERVICE.service_uuid)],
        )
        .adapt_name(name)
        .build()
}

fn scan_data(name: &str) -> LegacyAdvertisementPayload {
    LegacyAdvertisementBuilder::new().adapt_name(name).build()
}

/// Advertise the battery service under `name` and serve connections forever.
///
/// Advertising failure is fatal: without it the beacon has no purpose.
pub async fn run<L>(
    sd: &'static Softdevice,
    server: &'static BatteryServer,
    name: &'static str,
    listener: &L,
) -> !
where
    L: ConnectionListener + ?Sized,
{
    if name.len() > ADV_NAME_ROOM {
        warn!("name {} is advertised shortened", name);
    }
    let adv_payload = adv_data(name);
    let scan_payload = scan_data(name);
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    info!("advertising as {}", name);

    loop {
        let adv = ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv_payload,
            scan_data: &scan_payload,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => defmt::panic!("advertising failed: {}", Error::from(e)),
        };

        info!("central connected");
        set_active_link(Some(conn.clone()));
        listener.on_connect();

        let reason = gatt_server::run(&conn, server, |_| {}).await;

        set_active_link(None);
        listener.on_disconnect();
        info!("central disconnected: {}", reason);
    }
}
