//! SoftDevice GATT server for the Battery Service.
//!
//! Built with the runtime `ServiceBuilder` rather than the
//! `#[gatt_service]` macro so the layout comes straight from
//! [`PeripheralServiceDescriptor`] and the user description descriptor
//! (0x2901) can be attached.

use defmt::{debug, info, warn};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{
    self, NotifyValueError, RegisterError, SetValueError, WriteOp,
};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use crate::battery::{BatteryLevel, LevelSink};
use crate::ble::peripheral;
use crate::ble::service::PeripheralServiceDescriptor;

/// Attribute handles of the registered battery characteristic.
pub struct BatteryServer {
    value_handle: u16,
    cccd_handle: u16,
}

impl BatteryServer {
    /// Register `desc` with the SoftDevice, starting at `initial`.
    pub fn new(
        sd: &mut Softdevice,
        desc: &PeripheralServiceDescriptor,
        initial: BatteryLevel,
    ) -> Result<Self, RegisterError> {
        let mut service_builder = ServiceBuilder::new(sd, Uuid::new_16(desc.service_uuid))?;

        let mut props = Properties::new();
        if desc.props.read {
            props = props.read();
        }
        if desc.props.notify {
            props = props.notify();
        }

        let mut characteristic_builder = service_builder.add_characteristic(
            Uuid::new_16(desc.characteristic_uuid),
            Attribute::new([initial.get()]),
            Metadata::new(props),
        )?;

        // Read-only user description.
        characteristic_builder.add_descriptor(
            Uuid::new_16(desc.description_uuid),
            Attribute::new(desc.description.as_bytes()).write_security(SecurityMode::NoAccess),
        )?;

        let handles = characteristic_builder.build();
        let _service_handle = service_builder.build();

        info!(
            "GATT service {:04x} registered (value handle {})",
            desc.service_uuid, handles.value_handle
        );

        Ok(Self {
            value_handle: handles.value_handle,
            cccd_handle: handles.cccd_handle,
        })
    }

    pub fn set_level(&self, sd: &Softdevice, level: BatteryLevel) -> Result<(), SetValueError> {
        gatt_server::set_value(sd, self.value_handle, &[level.get()])
    }

    pub fn notify_level(
        &self,
        conn: &Connection,
        level: BatteryLevel,
    ) -> Result<(), NotifyValueError> {
        gatt_server::notify_value(conn, self.value_handle, &[level.get()])
    }
}

impl gatt_server::Server for BatteryServer {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if handle == self.cccd_handle && !data.is_empty() {
            info!("battery notifications enabled: {}", data[0] & 0x01 != 0);
        }
        None
    }
}

/// Publishes battery levels to the characteristic and the active peer.
pub struct BatteryPublisher<'a> {
    sd: &'a Softdevice,
    server: &'a BatteryServer,
}

impl<'a> BatteryPublisher<'a> {
    pub fn new(sd: &'a Softdevice, server: &'a BatteryServer) -> Self {
        Self { sd, server }
    }
}

impl LevelSink for BatteryPublisher<'_> {
    fn publish(&mut self, level: BatteryLevel) {
        if let Err(e) = self.server.set_level(self.sd, level) {
            warn!("battery level update failed: {}", e);
        }

        // Notify whoever is connected; without a subscriber this is a no-op.
        if let Some(conn) = peripheral::active_link() {
            if self.server.notify_level(&conn, level).is_err() {
                debug!("battery notify dropped (peer not subscribed)");
            }
        }
    }
}
