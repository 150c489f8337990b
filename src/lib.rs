//! padbind — decides which gamepad driver to bind to a connected device.
//!
//! Given a recognized [`DeviceIdentity`], a bus handle, and an [`Options`] snapshot, the
//! [`Resolver`] picks the driver family, builds it through a [`DriverBackend`], and hands
//! back owned [`ControllerHandle`]s. Devices that can't be bound (a charge-only cable, a
//! family compiled out of this build, a generic pad with no configured interface) come
//! back as a [`BindError`] saying so.
//!
//! ```
//! use padbind::backends::virtual_input::{VirtualBackend, VirtualBus};
//! use padbind::{DeviceIdentity, GamepadType, Options, Resolver};
//!
//! let resolver = Resolver::new(VirtualBackend::new());
//! let receiver = DeviceIdentity::new(GamepadType::Xbox360Wireless, 0x045e, 0x0719, "receiver");
//! let bus = VirtualBus::new("usb:1-2");
//!
//! let handles = resolver.bind_all(&receiver, &bus, &Options::default()).unwrap();
//! assert_eq!(handles.len(), 4);
//! ```

pub mod backends;
pub mod device;
pub mod driver;
pub mod event;
pub mod identity;
pub mod manager;
pub mod options;
pub mod resolver;
pub mod snapshot;

pub use device::*;
pub use driver::*;
pub use event::*;
pub use identity::{DeviceIdentity, GamepadType};
pub use manager::*;
pub use options::*;
pub use resolver::*;
pub use snapshot::*;
