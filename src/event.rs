//! Events emitted by bound controllers.
//!
//! Controllers represent input changes as small, driver-agnostic deltas ([`InputKind`])
//! and the manager timestamps them ([`InputEvent`]).
//!
//! ## Value conventions
//! - **Axes:** normalized to `[-1.0, 1.0]`. Triggers map released to `-1.0`.
//! - **Buttons:** boolean state expressed as press/release edges.
//! - **Hats (D-pad):** `-1` = neutral, `0..7` = 8-way directions (Up = 0, clockwise).
//! - **Connection:** wireless slots report when a pad pairs or drops. A handle bound to an
//!   empty slot stays dormant until a `Connection { connected: true }` arrives.
//! - **Raw reports:** backends that do not decode reports (the HID passthrough) hand the
//!   bytes over untouched.

/// Per-controller input change (delta).
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A continuous channel changed.
    AxisMoved { axis: u16, value: f32 },

    /// A button transitioned to pressed.
    ButtonPressed { button: u16 },

    /// A button transitioned to released.
    ButtonReleased { button: u16 },

    /// A hat (D-pad) changed.
    ///
    /// `value`: `-1` = neutral, `0..7` = directions (Up = 0, clockwise).
    HatChanged { hat: u16, value: i16 },

    /// The pad behind this handle came online or went away.
    Connection { connected: bool },

    /// Undecoded input report, including the report id byte when the device uses one.
    RawReport { data: Vec<u8> },
}

/// Timestamped input event captured by the manager.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: std::time::Instant,
    /// The actual input change.
    pub kind: InputKind,
}

impl InputEvent {
    /// Stamp `kind` with the current instant.
    pub fn now(kind: InputKind) -> Self {
        Self {
            at: std::time::Instant::now(),
            kind,
        }
    }
}
