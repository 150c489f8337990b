//! Runtime options consulted while binding.
//!
//! [`Options`] is an immutable snapshot: build it once (defaults, a config file via
//! [`Options::load`], or by hand) and pass it by reference to every bind call.
//!
//! Config files are TOML or JSON, chosen by extension. Every field is optional:
//!
//! ```toml
//! detach_kernel_driver = true
//! wireless_id = 1
//! generic_usb_specs = [
//!     "vid=0x0079,pid=0x0006,if=0,ep=1",
//!     { vendor_id = 0x1234, product_id = 0x5678, interface = 1, endpoint = 2 },
//! ]
//!
//! [chatpad]
//! enabled = true
//!
//! [headset]
//! enabled = true
//! dump = "/tmp/headset.raw"
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Highest wireless slot a receiver exposes.
pub const MAX_WIRELESS_SLOT: u8 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format for {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid generic USB spec \"{spec}\": {reason}")]
    InvalidGenericUsbSpec { spec: String, reason: String },

    #[error("wireless_id {0} is out of range (0-3)")]
    WirelessIdOutOfRange(u8),

    #[error("more than one generic USB spec for {vendor_id:04x}:{product_id:04x}")]
    DuplicateGenericUsbSpec { vendor_id: u16, product_id: u16 },
}

/// Chatpad (clip-on keyboard) toggles for wired Xbox 360 pads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatpadOptions {
    pub enabled: bool,
    /// Skip the chatpad init sequence (for pads that are already initialized).
    pub no_init: bool,
    pub debug: bool,
}

/// Headset toggles for wired Xbox 360 pads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadsetOptions {
    pub enabled: bool,
    pub debug: bool,
    /// Write microphone data to this file.
    pub dump: Option<PathBuf>,
    /// Play this file through the headset speaker.
    pub play: Option<PathBuf>,
}

/// Interface/endpoint pair used to drive an otherwise unlisted pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenericUsbSpec {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    pub endpoint: u8,
}

impl GenericUsbSpec {
    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

fn parse_number<T: TryFrom<u32>>(spec: &str, key: &str, value: &str) -> Result<T, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidGenericUsbSpec {
        spec: spec.to_string(),
        reason,
    };
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| invalid(format!("\"{value}\" is not a number for {key}")))?;

    T::try_from(parsed).map_err(|_| invalid(format!("{value} is out of range for {key}")))
}

/// Parses the command-line form `vid=0x045e,pid=0x028e,if=0,ep=1`.
impl FromStr for GenericUsbSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidGenericUsbSpec {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        let (mut vid, mut pid, mut iface, mut ep) = (None, None, None, None);
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(&format!("expected key=value, got \"{part}\"")))?;
            match key.trim() {
                "vid" | "vendor" => vid = Some(parse_number::<u16>(s, "vid", value)?),
                "pid" | "product" => pid = Some(parse_number::<u16>(s, "pid", value)?),
                "if" | "interface" => iface = Some(parse_number::<u8>(s, "if", value)?),
                "ep" | "endpoint" => ep = Some(parse_number::<u8>(s, "ep", value)?),
                other => return Err(invalid(&format!("unknown key \"{other}\""))),
            }
        }

        Ok(GenericUsbSpec {
            vendor_id: vid.ok_or_else(|| invalid("missing vid"))?,
            product_id: pid.ok_or_else(|| invalid("missing pid"))?,
            interface: iface.ok_or_else(|| invalid("missing if"))?,
            endpoint: ep.ok_or_else(|| invalid("missing ep"))?,
        })
    }
}

/// Accepts either a table with the four fields or the short string form.
impl<'de> Deserialize<'de> for GenericUsbSpec {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SpecRepr {
            Short(String),
            Table {
                vendor_id: u16,
                product_id: u16,
                interface: u8,
                endpoint: u8,
            },
        }

        match SpecRepr::deserialize(d)? {
            SpecRepr::Short(s) => s.parse().map_err(serde::de::Error::custom),
            SpecRepr::Table {
                vendor_id,
                product_id,
                interface,
                endpoint,
            } => Ok(GenericUsbSpec {
                vendor_id,
                product_id,
                interface,
                endpoint,
            }),
        }
    }
}

/// Options snapshot passed to every bind call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Ask drivers to detach the kernel driver before claiming the interface.
    pub detach_kernel_driver: bool,
    pub chatpad: ChatpadOptions,
    pub headset: HeadsetOptions,
    /// Slot bound by single binds on a wireless receiver.
    pub wireless_id: u8,
    pub generic_usb_specs: Vec<GenericUsbSpec>,
}

impl Options {
    /// Load options from a `.toml` or `.json` file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let options: Options = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        options.validate()?;
        tracing::debug!(
            path = %path.display(),
            generic_specs = options.generic_usb_specs.len(),
            "loaded options"
        );
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wireless_id > MAX_WIRELESS_SLOT {
            return Err(ConfigError::WirelessIdOutOfRange(self.wireless_id));
        }
        for (i, a) in self.generic_usb_specs.iter().enumerate() {
            if self.generic_usb_specs[i + 1..]
                .iter()
                .any(|b| b.matches(a.vendor_id, a.product_id))
            {
                return Err(ConfigError::DuplicateGenericUsbSpec {
                    vendor_id: a.vendor_id,
                    product_id: a.product_id,
                });
            }
        }
        Ok(())
    }

    /// Look up the interface/endpoint pair configured for a vid/pid.
    pub fn find_generic_usb_spec(&self, vendor_id: u16, product_id: u16) -> Option<&GenericUsbSpec> {
        self.generic_usb_specs
            .iter()
            .find(|s| s.matches(vendor_id, product_id))
    }
}
