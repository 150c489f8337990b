//! Controller trait and the owned handle returned by the resolver.

use crate::driver::{DriverError, DriverSpec};
use crate::event::InputKind;
use crate::identity::GamepadType;

/// A live driver bound to one physical or logical pad.
///
/// Implementations own whatever bus resources they claimed while being constructed and
/// release them on drop.
pub trait Controller: Send {
    /// Drain pending input deltas. Never blocks.
    fn poll(&mut self) -> Vec<InputKind>;

    /// Human-readable driver name.
    fn name(&self) -> &str;

    /// Stable id, unique among the handles of one bus device.
    fn id(&self) -> &str;

    /// Set rumble motor strength. Drivers without motors accept and ignore it.
    fn set_rumble(&mut self, _strong: u8, _weak: u8) -> Result<(), DriverError> {
        Ok(())
    }

    /// Set the LED/ring pattern. Drivers without LEDs accept and ignore it.
    fn set_led(&mut self, _status: u8) -> Result<(), DriverError> {
        Ok(())
    }
}

/// A controller bound by the resolver, together with the parameters it was built from.
///
/// Handles are move-only: the caller owns the driver and drops it when the session ends.
pub struct ControllerHandle {
    device: GamepadType,
    spec: DriverSpec,
    controller: Box<dyn Controller>,
}

impl ControllerHandle {
    pub(crate) fn new(device: GamepadType, spec: DriverSpec, controller: Box<dyn Controller>) -> Self {
        Self {
            device,
            spec,
            controller,
        }
    }

    /// The identity tag this handle was resolved from.
    pub fn device(&self) -> GamepadType {
        self.device
    }

    /// Constructor parameters handed to the backend.
    pub fn spec(&self) -> &DriverSpec {
        &self.spec
    }

    /// Wireless slot, for handles bound through a wireless receiver.
    pub fn slot(&self) -> Option<u8> {
        match self.spec {
            DriverSpec::Xbox360Wireless { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn controller(&self) -> &dyn Controller {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn Controller {
        self.controller.as_mut()
    }

    pub fn into_controller(self) -> Box<dyn Controller> {
        self.controller
    }

    pub fn id(&self) -> &str {
        self.controller.id()
    }

    pub fn name(&self) -> &str {
        self.controller.name()
    }

    pub fn poll(&mut self) -> Vec<InputKind> {
        self.controller.poll()
    }
}

impl std::fmt::Debug for ControllerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerHandle")
            .field("device", &self.device)
            .field("spec", &self.spec)
            .field("id", &self.controller.id())
            .finish()
    }
}
