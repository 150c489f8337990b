//! `hidapi` passthrough backend.
//!
//! Opens the bound device through hidraw and hands its input reports over undecoded as
//! [`InputKind::RawReport`]. Report decoding and output encoding belong to per-family
//! drivers layered on top; this backend only owns the handle.

use crate::device::Controller;
use crate::driver::{DriverBackend, DriverError, DriverSpec};
use crate::event::InputKind;
use crate::identity::{DeviceIdentity, GamepadType};
use crate::options::Options;
use hidapi::{DeviceInfo, HidApi, HidDevice};
use tracing::{debug, warn};

/// Maximum number of reports drained per `poll()` call.
const MAX_REPORTS_PER_TICK: usize = 32;

const REPORT_BUF_LEN: usize = 64;

/// hidraw leaves the kernel driver attached, so a `detach_kernel_driver` request has no
/// effect here; it is reported at `warn` when a driver is opened.
pub struct HidBackend {
    api: HidApi,
}

impl HidBackend {
    pub fn new() -> Result<Self, DriverError> {
        Ok(Self { api: HidApi::new()? })
    }

    pub fn from_api(api: HidApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &HidApi {
        &self.api
    }

    /// List attached devices we can identify, one entry per physical device.
    ///
    /// Generic USB devices are matched on the configured interface; everything else keeps
    /// the first interface hidapi reports.
    pub fn probe(&self, options: &Options) -> Vec<(DeviceIdentity, DeviceInfo)> {
        let mut found: Vec<(DeviceIdentity, DeviceInfo)> = Vec::new();

        for info in self.api.device_list() {
            let Some(identity) = DeviceIdentity::identify(info.vendor_id(), info.product_id(), options)
            else {
                continue;
            };

            if identity.kind == GamepadType::GenericUsb {
                let wanted = options
                    .find_generic_usb_spec(identity.vendor_id, identity.product_id)
                    .map(|s| i32::from(s.interface));
                if wanted != Some(info.interface_number()) {
                    continue;
                }
            }

            let key = InterfaceKey::of(info);
            if found.iter().any(|(_, other)| InterfaceKey::of(other).same_device(&key)) {
                continue;
            }

            debug!(
                "Found {} at {} (interface {})",
                identity,
                info.path().to_string_lossy(),
                info.interface_number()
            );
            found.push((identity, info.clone()));
        }

        found
    }
}

/// What `probe` compares to tell interfaces of one device from separate devices.
#[derive(Clone, Copy, Debug)]
struct InterfaceKey<'a> {
    vendor_id: u16,
    product_id: u16,
    serial: Option<&'a str>,
    interface: i32,
}

impl<'a> InterfaceKey<'a> {
    fn of(info: &'a DeviceInfo) -> Self {
        Self {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial: info.serial_number().filter(|s| !s.is_empty()),
            interface: info.interface_number(),
        }
    }

    /// Serials decide when both sides have one. Without them only a different interface of
    /// the same model counts as the same device, so identical serial-less pads stay apart.
    fn same_device(&self, other: &Self) -> bool {
        if self.vendor_id != other.vendor_id || self.product_id != other.product_id {
            return false;
        }
        match (self.serial, other.serial) {
            (Some(a), Some(b)) => a == b,
            _ => self.interface != other.interface,
        }
    }
}

impl DriverBackend for HidBackend {
    type Bus = DeviceInfo;

    fn open(&self, info: &DeviceInfo, spec: &DriverSpec) -> Result<Box<dyn Controller>, DriverError> {
        match spec {
            DriverSpec::Xbox360Wireless { .. } => {
                return Err(DriverError::Unsupported("per-slot wireless binding over hidraw"));
            }
            DriverSpec::GenericUsb { interface, .. } => {
                if info.interface_number() != i32::from(*interface) {
                    return Err(DriverError::InterfaceMismatch {
                        wanted: *interface,
                        found: info.interface_number(),
                    });
                }
            }
            _ => {}
        }

        if spec.detach_kernel_driver() == Some(true) {
            warn!(
                "{}: hidraw keeps the kernel driver bound, ignoring detach request",
                info.path().to_string_lossy()
            );
        }

        let device = info.open_device(&self.api)?;
        // Polled from a host-controlled loop.
        device.set_blocking_mode(false)?;

        Ok(Box::new(HidController::new(info, spec, device)))
    }
}

/// Raw-report controller over an open hidraw handle.
pub struct HidController {
    id: String,
    name: String,
    raw: HidDevice,
    buf: [u8; REPORT_BUF_LEN],
}

impl HidController {
    fn new(info: &DeviceInfo, spec: &DriverSpec, raw: HidDevice) -> Self {
        Self {
            id: format!(
                "hid:{:04x}:{:04x}:{}",
                info.vendor_id(),
                info.product_id(),
                info.path().to_string_lossy()
            ),
            name: format!(
                "{} ({})",
                info.product_string().unwrap_or("Unknown"),
                spec.driver_name()
            ),
            raw,
            buf: [0; REPORT_BUF_LEN],
        }
    }
}

impl Controller for HidController {
    fn poll(&mut self) -> Vec<InputKind> {
        let mut events = Vec::new();

        for _ in 0..MAX_REPORTS_PER_TICK {
            match self.raw.read(&mut self.buf) {
                Ok(0) => break,
                Ok(size) => events.push(InputKind::RawReport {
                    data: self.buf[..size].to_vec(),
                }),
                Err(e) => {
                    warn!("{} read error: {}", self.name, e);
                    break;
                }
            }
        }

        events
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_rumble(&mut self, _strong: u8, _weak: u8) -> Result<(), DriverError> {
        Err(DriverError::Unsupported("rumble on a raw passthrough"))
    }
}
