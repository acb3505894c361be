//! Sine mover module
//!
//! Bobs every entity the spawner currently tracks along the Y axis. The
//! dependency on the spawner is injected at construction as a capability
//! handle; the mover only ever calls [`Spawner::spawned`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::time::FrameClock;
use crate::module::{CapabilitySet, Module, SharedModule};
use crate::modules::spawner::Spawner;
use crate::world::SharedWorld;

/// Capability interface for modules that animate entities.
pub trait Mover: Module {
    /// Begin moving tracked entities.
    fn start(&mut self);

    /// Stop moving. Positions are left wherever the last update put them.
    fn stop(&mut self);

    /// Whether the mover is currently active.
    fn is_moving(&self) -> bool;
}

/// Offsets tracked entities vertically along a sine wave while active.
pub struct SineMover {
    world: SharedWorld,
    spawner: Rc<RefCell<dyn Spawner>>,
    frame_clock: Rc<RefCell<FrameClock>>,
    active: bool,
    elapsed: f32,
}

impl SineMover {
    /// Peak vertical offset applied per update.
    pub const AMPLITUDE: f32 = 0.1;

    /// Create a mover over the spawner's entities. Inactive until
    /// [`Mover::start`].
    pub fn new(
        world: SharedWorld,
        spawner: Rc<RefCell<dyn Spawner>>,
        frame_clock: Rc<RefCell<FrameClock>>,
    ) -> Self {
        Self {
            world,
            spawner,
            frame_clock,
            active: false,
            elapsed: 0.0,
        }
    }

    /// Wave time accumulated while active, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Module for SineMover {
    fn update(&mut self, _delta: Option<f32>) {
        if !self.active {
            return;
        }

        // Follows the shared frame clock; the delta parameter is accepted by
        // the contract but not consulted.
        self.elapsed += self.frame_clock.borrow().delta();
        let offset = self.elapsed.sin() * Self::AMPLITUDE;

        let spawner = self.spawner.borrow();
        let mut world = self.world.borrow_mut();
        for &entity in spawner.spawned() {
            if let Some(object) = world.get_mut(entity) {
                // The baseline is whatever Y the object has right now, so
                // successive updates compound into a drifting oscillation
                // rather than a fixed wave around the spawn point.
                object.transform.position.y += offset;
            }
        }
    }

    fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet) {
        capabilities.provide::<dyn Mover>(handle.clone());
    }
}

impl Mover for SineMover {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_moving(&self) -> bool {
        self.active
    }
}
