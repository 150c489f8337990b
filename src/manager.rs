//! Long-running owner of bound controllers.
//!
//! [`ControllerManager`] is what a daemon keeps around: it binds devices as they are
//! identified, polls every handle, and folds input into a [`Snapshot`].
//!
//! Every managed handle has a distinct id. Binding the same bus twice is legal for the
//! resolver, but the manager refuses the second handle with [`AttachError::AlreadyAttached`].

use crate::device::ControllerHandle;
use crate::driver::DriverBackend;
use crate::event::InputEvent;
use crate::identity::DeviceIdentity;
use crate::options::Options;
use crate::resolver::{BindError, FailureKind, Resolver};
use crate::snapshot::{DeviceState, Snapshot};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("{0} is already attached")]
    AlreadyAttached(String),
}

impl AttachError {
    /// Failure class of a bind error; `None` for an id clash.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            AttachError::Bind(e) => Some(e.kind()),
            AttachError::AlreadyAttached(_) => None,
        }
    }
}

struct Entry {
    handle: ControllerHandle,
    state: DeviceState,
}

pub struct ControllerManager<B> {
    resolver: Resolver<B>,
    entries: Vec<Entry>,
}

impl<B: DriverBackend> ControllerManager<B> {
    pub fn new(resolver: Resolver<B>) -> Self {
        Self {
            resolver,
            entries: Vec::new(),
        }
    }

    pub fn resolver(&self) -> &Resolver<B> {
        &self.resolver
    }

    /// Bind every controller the device carries. Returns how many were added.
    ///
    /// Nothing is added if any of the new ids is already managed.
    pub fn attach(
        &mut self,
        identity: &DeviceIdentity,
        bus: &B::Bus,
        options: &Options,
    ) -> Result<usize, AttachError> {
        let handles = self
            .resolver
            .bind_all(identity, bus, options)
            .map_err(|e| {
                warn!("Not binding {}: {}", identity, e);
                e
            })?;
        if let Some(clash) = handles.iter().find(|h| self.contains(h.id())) {
            warn!("Not binding {}: {} is already attached", identity, clash.id());
            return Err(AttachError::AlreadyAttached(clash.id().to_string()));
        }
        let count = handles.len();
        for handle in handles {
            self.add(handle)?;
        }
        Ok(count)
    }

    /// Bind a single controller to the device. Returns its id.
    pub fn attach_one(
        &mut self,
        identity: &DeviceIdentity,
        bus: &B::Bus,
        options: &Options,
    ) -> Result<String, AttachError> {
        let handle = self
            .resolver
            .bind_one(identity, bus, options)
            .map_err(|e| {
                warn!("Not binding {}: {}", identity, e);
                e
            })?;
        let id = handle.id().to_string();
        self.add(handle)?;
        Ok(id)
    }

    /// Take ownership of an already bound handle.
    ///
    /// A handle whose id is already managed is dropped and reported.
    pub fn add(&mut self, handle: ControllerHandle) -> Result<(), AttachError> {
        if self.contains(handle.id()) {
            return Err(AttachError::AlreadyAttached(handle.id().to_string()));
        }
        self.entries.push(Entry {
            handle,
            state: DeviceState::default(),
        });
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.handle.id() == id)
    }

    /// Release the handle with this id, if managed.
    pub fn detach(&mut self, id: &str) -> Option<ControllerHandle> {
        let index = self.entries.iter().position(|e| e.handle.id() == id)?;
        info!("Released {}", id);
        Some(self.entries.remove(index).handle)
    }

    pub fn handles(&self) -> impl Iterator<Item = &ControllerHandle> {
        self.entries.iter().map(|e| &e.handle)
    }

    pub fn handles_mut(&mut self) -> impl Iterator<Item = &mut ControllerHandle> {
        self.entries.iter_mut().map(|e| &mut e.handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Poll every controller, update the tracked state, and return `(id, event)` pairs.
    pub fn poll_events(&mut self) -> Vec<(String, InputEvent)> {
        let mut events = Vec::new();
        for entry in self.entries.iter_mut() {
            for kind in entry.handle.poll() {
                entry.state.apply(&kind);
                events.push((entry.handle.id().to_string(), InputEvent::now(kind)));
            }
        }
        events
    }

    /// Last-known state of every controller.
    pub fn snapshot(&self) -> Snapshot {
        let map: HashMap<String, DeviceState> = self
            .entries
            .iter()
            .map(|e| (e.handle.id().to_string(), e.state.clone()))
            .collect();
        Snapshot(map)
    }
}
