//! Per-tick snapshot of controller states.
//!
//! [`Snapshot`] is an **owned**, read-only view of every bound controller at a point in
//! time. It is produced by [`ControllerManager::snapshot`](crate::manager::ControllerManager::snapshot)
//! and reflects the manager's last-known state; it does not poll.
//!
//! Keys are controller ids (see [`Controller::id`](crate::device::Controller::id)).

use crate::event::InputKind;
use std::collections::HashMap;

/// Accumulated state of one controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceState {
    pub axes: HashMap<u16, f32>,
    pub buttons: HashMap<u16, bool>,
    pub hats: HashMap<u16, i16>,
    /// `None` until the controller reports its connection state.
    pub connected: Option<bool>,
    /// Size of the last raw report, for passthrough controllers.
    pub last_report_len: Option<usize>,
}

impl DeviceState {
    /// Fold one delta into the state.
    pub fn apply(&mut self, kind: &InputKind) {
        match kind {
            InputKind::AxisMoved { axis, value } => {
                self.axes.insert(*axis, *value);
            }
            InputKind::ButtonPressed { button } => {
                self.buttons.insert(*button, true);
            }
            InputKind::ButtonReleased { button } => {
                self.buttons.insert(*button, false);
            }
            InputKind::HatChanged { hat, value } => {
                self.hats.insert(*hat, *value);
            }
            InputKind::Connection { connected } => {
                self.connected = Some(*connected);
                if !connected {
                    self.axes.clear();
                    self.buttons.clear();
                    self.hats.clear();
                }
            }
            InputKind::RawReport { data } => {
                self.last_report_len = Some(data.len());
            }
        }
    }

    /// Value of an axis (0.0 if never reported).
    pub fn get_axis(&self, axis: u16) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// State of a button (false if never reported).
    pub fn get_button(&self, button: u16) -> bool {
        self.buttons.get(&button).copied().unwrap_or(false)
    }

    /// Value of a hat (-1, neutral, if never reported).
    pub fn get_hat(&self, hat: u16) -> i16 {
        self.hats.get(&hat).copied().unwrap_or(-1)
    }
}

/// Owned snapshot of controller states (`controller id → DeviceState`).
#[derive(Clone, Debug, Default)]
pub struct Snapshot(pub HashMap<String, DeviceState>);

impl Snapshot {
    #[inline]
    pub fn get(&self, id: &str) -> Option<&DeviceState> {
        self.0.get(id)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DeviceState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn into_inner(self) -> HashMap<String, DeviceState> {
        self.0
    }
}
