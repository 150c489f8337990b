//! Device classification and binding.
//!
//! [`classify`] decides, without touching the bus, which driver family a device needs,
//! the constructor parameters drawn from the [`Options`], and whether the device binds
//! as one controller or as one controller per wireless slot.
//!
//! [`Resolver`] applies that decision through a [`DriverBackend`]:
//! - [`Resolver::bind_one`] yields exactly one handle. A wireless receiver is bound on
//!   the slot named by `options.wireless_id`.
//! - [`Resolver::bind_all`] yields every handle the device can carry: four for a wireless
//!   receiver (slots 0..=3, whatever `wireless_id` says), one for everything else.
//!
//! Both entry points fail the same way for devices that cannot be bound at all.

use crate::device::ControllerHandle;
use crate::driver::{DriverBackend, DriverError, DriverSpec, Xbox360Peripherals};
use crate::identity::{DeviceIdentity, GamepadType};
use crate::options::{Options, MAX_WIRELESS_SLOT};
use tracing::{debug, info};

/// Diagnostic for the Play&Charge cable.
pub const PLAY_N_CHARGE_MESSAGE: &str = "The Xbox360 Play&Charge cable is for recharging only, \
it does not transmit data, so it can't be supported. You have to get a wireless receiver:\n\
\n  * http://www.xbox.com/en-ca/hardware/x/xbox360wirelessgamingreceiver/";

/// Optional driver families compiled into this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Wiimote support (libcwiid).
    pub wiimote: bool,
}

impl Capabilities {
    /// Capabilities of the running binary.
    pub const fn detect() -> Self {
        Self {
            wiimote: cfg!(feature = "wiimote"),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Coarse failure class, for callers that react differently to each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The device can never be bound (it carries no data).
    UnsupportedByDesign,
    /// Support exists but was not compiled into this build.
    UnsupportedInBuild,
    /// The options lack something this device needs.
    UnresolvableConfiguration,
    /// The backend failed to construct the driver.
    DriverFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("{device}: {}", PLAY_N_CHARGE_MESSAGE)]
    ChargeOnly { device: String },

    #[error("{device}: {feature} support is not available, it was not compiled into this build (enable the `{feature}` feature)")]
    FeatureUnavailable {
        device: String,
        feature: &'static str,
    },

    #[error("{device}: no generic USB spec configured for {vendor_id:04x}:{product_id:04x}")]
    NoGenericUsbSpec {
        device: String,
        vendor_id: u16,
        product_id: u16,
    },

    #[error("{device}: wireless slot {slot} is out of range (0-3)")]
    WirelessSlotOutOfRange { device: String, slot: u8 },

    #[error("{device}: {source}")]
    Driver {
        device: String,
        #[source]
        source: DriverError,
    },
}

impl BindError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BindError::ChargeOnly { .. } => FailureKind::UnsupportedByDesign,
            BindError::FeatureUnavailable { .. } => FailureKind::UnsupportedInBuild,
            BindError::NoGenericUsbSpec { .. } | BindError::WirelessSlotOutOfRange { .. } => {
                FailureKind::UnresolvableConfiguration
            }
            BindError::Driver { .. } => FailureKind::DriverFailed,
        }
    }

    /// The device the failure is about, as shown to the operator.
    pub fn device(&self) -> &str {
        match self {
            BindError::ChargeOnly { device }
            | BindError::FeatureUnavailable { device, .. }
            | BindError::NoGenericUsbSpec { device, .. }
            | BindError::WirelessSlotOutOfRange { device, .. }
            | BindError::Driver { device, .. } => device,
        }
    }
}

/// Outcome of classifying a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindingPlan {
    /// One driver, whichever entry point is used.
    Single(DriverSpec),
    /// A wireless receiver: one driver per slot.
    PerSlot { detach: bool },
}

impl BindingPlan {
    /// Spec for a single bind. Receivers bind on `wireless_id`.
    pub fn one(&self, identity: &DeviceIdentity, options: &Options) -> Result<DriverSpec, BindError> {
        match self {
            BindingPlan::Single(spec) => Ok(spec.clone()),
            BindingPlan::PerSlot { detach } => {
                let slot = options.wireless_id;
                if slot > MAX_WIRELESS_SLOT {
                    return Err(BindError::WirelessSlotOutOfRange {
                        device: identity.to_string(),
                        slot,
                    });
                }
                Ok(DriverSpec::Xbox360Wireless {
                    slot,
                    detach: *detach,
                })
            }
        }
    }

    /// Specs for binding everything the device carries, in slot order.
    pub fn all(&self) -> Vec<DriverSpec> {
        match self {
            BindingPlan::Single(spec) => vec![spec.clone()],
            BindingPlan::PerSlot { detach } => (0..=MAX_WIRELESS_SLOT)
                .map(|slot| DriverSpec::Xbox360Wireless {
                    slot,
                    detach: *detach,
                })
                .collect(),
        }
    }
}

/// Decide how `identity` binds under `options`.
pub fn classify(
    identity: &DeviceIdentity,
    options: &Options,
    capabilities: Capabilities,
) -> Result<BindingPlan, BindError> {
    let detach = options.detach_kernel_driver;

    let spec = match identity.kind {
        GamepadType::Xbox360PlayNCharge => {
            return Err(BindError::ChargeOnly {
                device: identity.to_string(),
            });
        }

        GamepadType::Xbox | GamepadType::XboxMat => DriverSpec::Xbox { detach },

        GamepadType::Xbox360 | GamepadType::Xbox360Guitar => DriverSpec::Xbox360 {
            peripherals: Xbox360Peripherals {
                chatpad: options.chatpad.clone(),
                headset: options.headset.clone(),
            },
            detach,
        },

        GamepadType::Xbox360Wireless => return Ok(BindingPlan::PerSlot { detach }),

        GamepadType::XboxOneWireless => DriverSpec::XboxOneWireless { detach },
        GamepadType::Firestorm => DriverSpec::Firestorm { vsb: false, detach },
        GamepadType::FirestormVsb => DriverSpec::Firestorm { vsb: true, detach },
        GamepadType::SaitekP2500 => DriverSpec::SaitekP2500 { detach },
        GamepadType::LogitechF310 => DriverSpec::LogitechF310 { detach },
        GamepadType::Playstation3Usb => DriverSpec::Playstation3Usb { detach },
        GamepadType::HamaCrux => DriverSpec::HamaCrux { detach },

        GamepadType::Wiimote => {
            if !capabilities.wiimote {
                return Err(BindError::FeatureUnavailable {
                    device: identity.to_string(),
                    feature: "wiimote",
                });
            }
            DriverSpec::Wiimote
        }

        GamepadType::GenericUsb => {
            let spec = options
                .find_generic_usb_spec(identity.vendor_id, identity.product_id)
                .ok_or_else(|| BindError::NoGenericUsbSpec {
                    device: identity.to_string(),
                    vendor_id: identity.vendor_id,
                    product_id: identity.product_id,
                })?;
            DriverSpec::GenericUsb {
                interface: spec.interface,
                endpoint: spec.endpoint,
                detach,
            }
        }
    };

    Ok(BindingPlan::Single(spec))
}

/// Binds classified devices through a driver backend.
///
/// Holds nothing between calls except the backend and the capability snapshot taken at
/// construction.
pub struct Resolver<B> {
    backend: B,
    capabilities: Capabilities,
}

impl<B: DriverBackend> Resolver<B> {
    pub fn new(backend: B) -> Self {
        Self::with_capabilities(backend, Capabilities::detect())
    }

    pub fn with_capabilities(backend: B, capabilities: Capabilities) -> Self {
        Self {
            backend,
            capabilities,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Bind exactly one controller to the device.
    pub fn bind_one(
        &self,
        identity: &DeviceIdentity,
        bus: &B::Bus,
        options: &Options,
    ) -> Result<ControllerHandle, BindError> {
        let plan = classify(identity, options, self.capabilities)?;
        let spec = plan.one(identity, options)?;
        self.construct(identity, bus, spec)
    }

    /// Bind every controller the device carries.
    pub fn bind_all(
        &self,
        identity: &DeviceIdentity,
        bus: &B::Bus,
        options: &Options,
    ) -> Result<Vec<ControllerHandle>, BindError> {
        let plan = classify(identity, options, self.capabilities)?;
        plan.all()
            .into_iter()
            .map(|spec| self.construct(identity, bus, spec))
            .collect()
    }

    fn construct(
        &self,
        identity: &DeviceIdentity,
        bus: &B::Bus,
        spec: DriverSpec,
    ) -> Result<ControllerHandle, BindError> {
        debug!("Constructing {} driver for {}: {:?}", spec.driver_name(), identity, spec);
        let controller = self
            .backend
            .open(bus, &spec)
            .map_err(|source| BindError::Driver {
                device: identity.to_string(),
                source,
            })?;
        info!("Bound {} to {} ({})", identity, controller.id(), spec.driver_name());
        Ok(ControllerHandle::new(identity.kind, spec, controller))
    }
}
