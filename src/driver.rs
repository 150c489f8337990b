//! Driver construction contract.
//!
//! [`DriverSpec`] is the closed set of driver families together with exactly the
//! parameters each family's constructor needs. A [`DriverBackend`] turns a spec plus a
//! bus handle into a live [`Controller`].

use crate::device::Controller;
use crate::options::{ChatpadOptions, HeadsetOptions};

/// Peripherals that can hang off a wired Xbox 360 pad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Xbox360Peripherals {
    pub chatpad: ChatpadOptions,
    pub headset: HeadsetOptions,
}

/// Which driver to construct, with the parameters it takes.
///
/// `detach` is the kernel-driver detach request from the options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverSpec {
    /// Original Xbox pads and dance mats.
    Xbox { detach: bool },
    /// Wired Xbox 360 pads and guitars.
    Xbox360 {
        peripherals: Xbox360Peripherals,
        detach: bool,
    },
    /// One slot of an Xbox 360 wireless receiver.
    Xbox360Wireless { slot: u8, detach: bool },
    XboxOneWireless { detach: bool },
    /// Firestorm Dual Power; `vsb` selects the vibrating variant's report layout.
    Firestorm { vsb: bool, detach: bool },
    SaitekP2500 { detach: bool },
    LogitechF310 { detach: bool },
    Playstation3Usb { detach: bool },
    HamaCrux { detach: bool },
    /// Wiimote. Talks over Bluetooth through libcwiid, so no bus parameters.
    Wiimote,
    GenericUsb {
        interface: u8,
        endpoint: u8,
        detach: bool,
    },
}

impl DriverSpec {
    /// Short driver name, used in logs and handle ids.
    pub fn driver_name(&self) -> &'static str {
        match self {
            DriverSpec::Xbox { .. } => "xbox",
            DriverSpec::Xbox360 { .. } => "xbox360",
            DriverSpec::Xbox360Wireless { .. } => "xbox360-wireless",
            DriverSpec::XboxOneWireless { .. } => "xboxone-wireless",
            DriverSpec::Firestorm { .. } => "firestorm",
            DriverSpec::SaitekP2500 { .. } => "saitek-p2500",
            DriverSpec::LogitechF310 { .. } => "logitech-f310",
            DriverSpec::Playstation3Usb { .. } => "playstation3-usb",
            DriverSpec::HamaCrux { .. } => "hama-crux",
            DriverSpec::Wiimote => "wiimote",
            DriverSpec::GenericUsb { .. } => "generic-usb",
        }
    }

    /// Kernel-driver detach request, for the families that claim a USB interface.
    pub fn detach_kernel_driver(&self) -> Option<bool> {
        match *self {
            DriverSpec::Xbox { detach }
            | DriverSpec::Xbox360 { detach, .. }
            | DriverSpec::Xbox360Wireless { detach, .. }
            | DriverSpec::XboxOneWireless { detach }
            | DriverSpec::Firestorm { detach, .. }
            | DriverSpec::SaitekP2500 { detach }
            | DriverSpec::LogitechF310 { detach }
            | DriverSpec::Playstation3Usb { detach }
            | DriverSpec::HamaCrux { detach }
            | DriverSpec::GenericUsb { detach, .. } => Some(detach),
            DriverSpec::Wiimote => None,
        }
    }
}

/// Failure reported by a driver constructor or a live driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to open device: {0}")]
    Open(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("interface {wanted} not available (device exposes interface {found})")]
    InterfaceMismatch { wanted: u8, found: i32 },

    #[error("driver does not support {0}")]
    Unsupported(&'static str),

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(feature = "hid")]
impl From<hidapi::HidError> for DriverError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") || msg.contains("EACCES") {
            DriverError::PermissionDenied(msg)
        } else {
            DriverError::Io(msg)
        }
    }
}

/// Builds live controllers from driver specs.
///
/// `Bus` is whatever the backend uses to address one physical device; the resolver passes
/// it through untouched.
pub trait DriverBackend {
    type Bus: ?Sized;

    fn open(&self, bus: &Self::Bus, spec: &DriverSpec) -> Result<Box<dyn Controller>, DriverError>;
}
