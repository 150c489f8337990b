//! Driver backends.
//!
//! Implementations of [`DriverBackend`](crate::driver::DriverBackend).
//!
//! # Feature flags
//! - **`hid`** — enables the `hidapi` passthrough backend (default).
//!
//! The virtual backend is always built; it needs no hardware.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_input;
