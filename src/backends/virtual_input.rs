//! In-memory backend.
//!
//! [`VirtualBackend`] builds [`VirtualController`]s that remember the [`DriverSpec`] they
//! were built from, replay injected input, and record output requests. A [`VirtualBus`]
//! stands in for the bus handle and can be told to refuse construction, which is how
//! driver failures are exercised without hardware.

use crate::device::Controller;
use crate::driver::{DriverBackend, DriverError, DriverSpec};
use crate::event::InputKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Pending input per controller id, shared between a bus and the controllers built on it.
pub type VirtualFeed = Arc<Mutex<HashMap<String, Vec<InputKind>>>>;

/// Stand-in for a bus device.
#[derive(Clone, Debug, Default)]
pub struct VirtualBus {
    /// Bus path; becomes the prefix of every controller id built on it.
    pub path: String,
    /// When set, every open on this bus fails with this message.
    pub refuse: Option<String>,
    /// Input queued for controllers built on this bus.
    pub feed: VirtualFeed,
}

impl VirtualBus {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn refusing(path: &str, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            refuse: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Queue an input delta for the controller bound to the whole bus.
    pub fn push(&self, kind: InputKind) {
        self.push_to(&self.path, kind);
    }

    /// Queue an input delta for the controller with id `id` (`"{path}:{slot}"` for
    /// wireless slots).
    pub fn push_to(&self, id: &str, kind: InputKind) {
        if let Ok(mut feed) = self.feed.lock() {
            feed.entry(id.to_string()).or_default().push(kind);
        }
    }
}

/// Backend producing [`VirtualController`]s.
#[derive(Debug, Default)]
pub struct VirtualBackend {
    opened: AtomicUsize,
}

impl VirtualBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of controllers constructed so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }
}

impl DriverBackend for VirtualBackend {
    type Bus = VirtualBus;

    fn open(&self, bus: &VirtualBus, spec: &DriverSpec) -> Result<Box<dyn Controller>, DriverError> {
        if let Some(reason) = &bus.refuse {
            return Err(DriverError::Open(reason.clone()));
        }
        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(VirtualController::new(bus, spec.clone())))
    }
}

/// Controller built by [`VirtualBackend`].
pub struct VirtualController {
    id: String,
    name: String,
    spec: DriverSpec,
    feed: VirtualFeed,
    rumble: Option<(u8, u8)>,
    led: Option<u8>,
}

impl VirtualController {
    pub fn new(bus: &VirtualBus, spec: DriverSpec) -> Self {
        let id = match spec {
            DriverSpec::Xbox360Wireless { slot, .. } => format!("{}:{}", bus.path, slot),
            _ => bus.path.clone(),
        };
        Self {
            name: format!("Virtual {}", spec.driver_name()),
            id,
            spec,
            feed: Arc::clone(&bus.feed),
            rumble: None,
            led: None,
        }
    }

    pub fn spec(&self) -> &DriverSpec {
        &self.spec
    }

    /// Last rumble request, if any.
    pub fn rumble(&self) -> Option<(u8, u8)> {
        self.rumble
    }

    /// Last LED request, if any.
    pub fn led(&self) -> Option<u8> {
        self.led
    }
}

impl Controller for VirtualController {
    fn poll(&mut self) -> Vec<InputKind> {
        match self.feed.lock() {
            Ok(mut feed) => feed.remove(&self.id).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_rumble(&mut self, strong: u8, weak: u8) -> Result<(), DriverError> {
        self.rumble = Some((strong, weak));
        Ok(())
    }

    fn set_led(&mut self, status: u8) -> Result<(), DriverError> {
        self.led = Some(status);
        Ok(())
    }
}
