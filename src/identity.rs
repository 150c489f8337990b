//! Hardware identity tags.
//!
//! A [`DeviceIdentity`] is what enumeration hands to the resolver: the family a device
//! belongs to ([`GamepadType`]) plus the vendor/product ids seen on the bus.
//!
//! [`KNOWN_DEVICES`] maps well-known vid/pid pairs to their family. Devices outside the
//! table can still be driven through the generic USB family when the options carry a
//! [`GenericUsbSpec`](crate::options::GenericUsbSpec) for them.

use crate::options::Options;
use std::fmt;
use std::str::FromStr;

/// Closed set of device families the resolver knows how to bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadType {
    /// Original Xbox pad.
    Xbox,
    /// Xbox dance mat (same wire protocol as [`GamepadType::Xbox`]).
    XboxMat,
    /// Wired Xbox 360 pad.
    Xbox360,
    /// Wired Xbox 360 guitar.
    Xbox360Guitar,
    /// Xbox 360 wireless receiver, multiplexing up to four pads.
    Xbox360Wireless,
    /// Xbox One wireless pad.
    XboxOneWireless,
    /// ThrustMaster Firestorm Dual Power.
    Firestorm,
    /// ThrustMaster Firestorm Dual Power, vibrating variant.
    FirestormVsb,
    SaitekP2500,
    LogitechF310,
    Playstation3Usb,
    HamaCrux,
    /// Nintendo Wiimote, driven through libcwiid rather than the USB bus.
    Wiimote,
    /// Xbox 360 Play&Charge cable. Carries power only.
    Xbox360PlayNCharge,
    /// Any other pad, driven from a configured interface/endpoint pair.
    GenericUsb,
}

impl GamepadType {
    pub const ALL: &'static [GamepadType] = &[
        GamepadType::Xbox,
        GamepadType::XboxMat,
        GamepadType::Xbox360,
        GamepadType::Xbox360Guitar,
        GamepadType::Xbox360Wireless,
        GamepadType::XboxOneWireless,
        GamepadType::Firestorm,
        GamepadType::FirestormVsb,
        GamepadType::SaitekP2500,
        GamepadType::LogitechF310,
        GamepadType::Playstation3Usb,
        GamepadType::HamaCrux,
        GamepadType::Wiimote,
        GamepadType::Xbox360PlayNCharge,
        GamepadType::GenericUsb,
    ];

    /// Name used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            GamepadType::Xbox => "xbox",
            GamepadType::XboxMat => "xbox-mat",
            GamepadType::Xbox360 => "xbox360",
            GamepadType::Xbox360Guitar => "xbox360-guitar",
            GamepadType::Xbox360Wireless => "xbox360-wireless",
            GamepadType::XboxOneWireless => "xboxone-wireless",
            GamepadType::Firestorm => "firestorm",
            GamepadType::FirestormVsb => "firestorm-vsb",
            GamepadType::SaitekP2500 => "saitek-p2500",
            GamepadType::LogitechF310 => "logitech-f310",
            GamepadType::Playstation3Usb => "playstation3-usb",
            GamepadType::HamaCrux => "hama-crux",
            GamepadType::Wiimote => "wiimote",
            GamepadType::Xbox360PlayNCharge => "xbox360-play-n-charge",
            GamepadType::GenericUsb => "generic-usb",
        }
    }
}

impl fmt::Display for GamepadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a family name does not match any [`GamepadType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gamepad type \"{0}\"")]
pub struct UnknownGamepadType(pub String);

impl FromStr for GamepadType {
    type Err = UnknownGamepadType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GamepadType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownGamepadType(s.to_string()))
    }
}

/// Recognized identity of one device on the bus.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    pub kind: GamepadType,
    pub vendor_id: u16,
    pub product_id: u16,
    /// Display name (table entry or the product string reported by the device).
    pub name: String,
}

impl DeviceIdentity {
    pub fn new(kind: GamepadType, vendor_id: u16, product_id: u16, name: impl Into<String>) -> Self {
        Self {
            kind,
            vendor_id,
            product_id,
            name: name.into(),
        }
    }

    /// Classify a raw vid/pid pair.
    ///
    /// The built-in table wins; otherwise a configured generic USB spec for the pair makes
    /// it a [`GamepadType::GenericUsb`] device. Anything else is not a pad we know.
    pub fn identify(vendor_id: u16, product_id: u16, options: &Options) -> Option<Self> {
        if let Some(known) = find_known_device(vendor_id, product_id) {
            return Some(Self::new(known.kind, vendor_id, product_id, known.name));
        }
        options
            .find_generic_usb_spec(vendor_id, product_id)
            .map(|_| {
                Self::new(
                    GamepadType::GenericUsb,
                    vendor_id,
                    product_id,
                    format!("Generic USB device {vendor_id:04x}:{product_id:04x}"),
                )
            })
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{:04x}:{:04x}] ({})",
            self.name, self.vendor_id, self.product_id, self.kind
        )
    }
}

/// Table entry for a pad with a fixed vid/pid.
#[derive(Debug, Clone, Copy)]
pub struct KnownDevice {
    pub kind: GamepadType,
    pub vendor_id: u16,
    pub product_id: u16,
    pub name: &'static str,
}

const fn known(kind: GamepadType, vendor_id: u16, product_id: u16, name: &'static str) -> KnownDevice {
    KnownDevice {
        kind,
        vendor_id,
        product_id,
        name,
    }
}

pub const VENDOR_MICROSOFT: u16 = 0x045e;
pub const VENDOR_LOGITECH: u16 = 0x046d;
pub const VENDOR_THRUSTMASTER: u16 = 0x044f;
pub const VENDOR_MADCATZ: u16 = 0x0738;
pub const VENDOR_SAITEK: u16 = 0x06a3;
pub const VENDOR_SONY: u16 = 0x054c;
pub const VENDOR_NINTENDO: u16 = 0x057e;

/// Pads recognized without any configuration.
pub const KNOWN_DEVICES: &[KnownDevice] = &[
    known(GamepadType::Xbox, VENDOR_MICROSOFT, 0x0202, "Microsoft X-Box pad v1 (US)"),
    known(GamepadType::Xbox, VENDOR_MICROSOFT, 0x0285, "Microsoft X-Box pad (Japan)"),
    known(GamepadType::Xbox, VENDOR_MICROSOFT, 0x0287, "Microsoft Xbox Controller S"),
    known(GamepadType::Xbox, VENDOR_MICROSOFT, 0x0289, "Microsoft X-Box pad v2 (US)"),
    known(GamepadType::Xbox, VENDOR_LOGITECH, 0xca84, "Logitech Xbox Cordless Controller"),
    known(GamepadType::Xbox, VENDOR_LOGITECH, 0xca88, "Logitech Compact Controller for Xbox"),
    known(GamepadType::XboxMat, VENDOR_MADCATZ, 0x4540, "Mad Catz Beat Pad"),
    known(GamepadType::XboxMat, VENDOR_MADCATZ, 0x6040, "Mad Catz Beat Pad Pro"),
    known(GamepadType::XboxMat, 0x0c12, 0x8809, "RedOctane Xbox Dance Pad"),
    known(GamepadType::XboxMat, 0x12ab, 0x8809, "Xbox DDR dancepad"),
    known(GamepadType::Xbox360, VENDOR_MICROSOFT, 0x028e, "Microsoft Xbox 360 Controller"),
    known(GamepadType::Xbox360, VENDOR_MADCATZ, 0x4716, "Mad Catz Wired Xbox 360 Controller"),
    known(GamepadType::Xbox360, VENDOR_MADCATZ, 0x4726, "Mad Catz Xbox 360 Controller"),
    known(GamepadType::Xbox360, VENDOR_LOGITECH, 0xc21d, "Logitech Gamepad F310 (XInput)"),
    known(GamepadType::Xbox360Guitar, 0x1430, 0x4748, "RedOctane Guitar Hero X-plorer"),
    known(GamepadType::Xbox360Guitar, 0x1bad, 0x0002, "Harmonix Guitar for Xbox 360"),
    known(GamepadType::Xbox360Wireless, VENDOR_MICROSOFT, 0x0291, "Microsoft Xbox 360 Wireless Receiver"),
    known(GamepadType::Xbox360Wireless, VENDOR_MICROSOFT, 0x0719, "Microsoft Xbox 360 Wireless Receiver"),
    known(GamepadType::Xbox360PlayNCharge, VENDOR_MICROSOFT, 0x028f, "Microsoft Xbox 360 Play&Charge cable"),
    known(GamepadType::XboxOneWireless, VENDOR_MICROSOFT, 0x02d1, "Microsoft Xbox One Controller"),
    known(GamepadType::XboxOneWireless, VENDOR_MICROSOFT, 0x02dd, "Microsoft Xbox One Controller (2015)"),
    known(GamepadType::Firestorm, VENDOR_THRUSTMASTER, 0xb304, "ThrustMaster Firestorm Dual Power"),
    known(GamepadType::FirestormVsb, VENDOR_THRUSTMASTER, 0xb312, "ThrustMaster Firestorm Dual Power (vibrating)"),
    known(GamepadType::SaitekP2500, VENDOR_SAITEK, 0xff0c, "Saitek P2500 Rumble Force Pad"),
    known(GamepadType::LogitechF310, VENDOR_LOGITECH, 0xc216, "Logitech Gamepad F310 (DirectInput)"),
    known(GamepadType::Playstation3Usb, VENDOR_SONY, 0x0268, "Sony PlayStation 3 Controller"),
    known(GamepadType::Wiimote, VENDOR_NINTENDO, 0x0306, "Nintendo Wiimote"),
];

/// Find the table entry for a vid/pid pair.
pub fn find_known_device(vendor_id: u16, product_id: u16) -> Option<&'static KnownDevice> {
    KNOWN_DEVICES
        .iter()
        .find(|d| d.vendor_id == vendor_id && d.product_id == product_id)
}
