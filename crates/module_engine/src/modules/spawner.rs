//! Interval spawner module
//!
//! Clones a prototype object into the world at a fixed cadence while active.
//! The spawn check is a polled comparison against an injected [`Clock`], not a
//! scheduled timer, and at most one object is spawned per update call.

use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::foundation::math::{Quat, Vec3};
use crate::foundation::time::{Clock, SystemClock};
use crate::module::{CapabilitySet, Module, SharedModule};
use crate::world::{Entity, GameObject, SharedWorld};

/// Capability interface for modules that create entities over time.
pub trait Spawner: Module {
    /// Begin spawning. Also resets the interval timer, so the first spawn
    /// lands a full interval after the call rather than immediately.
    fn start(&mut self);

    /// Stop spawning. Already spawned entities are untouched.
    fn stop(&mut self);

    /// Whether the spawner is currently active.
    fn is_spawning(&self) -> bool;

    /// Total entities spawned since construction.
    fn spawn_count(&self) -> usize;

    /// Handles of every spawned entity, oldest first.
    ///
    /// Views the live collection, not a snapshot; the slice grows across
    /// updates and entries are never removed.
    fn spawned(&self) -> &[Entity];
}

/// Spawns one clone of a prototype per elapsed interval while active.
pub struct IntervalSpawner {
    world: SharedWorld,
    prototype: GameObject,
    clock: Rc<dyn Clock>,
    last_spawn: Instant,
    interval: Duration,
    active: bool,
    spawned: Vec<Entity>,
}

impl std::fmt::Debug for IntervalSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalSpawner")
            .field("last_spawn", &self.last_spawn)
            .field("interval", &self.interval)
            .field("active", &self.active)
            .field("spawned", &self.spawned)
            .finish_non_exhaustive()
    }
}

impl IntervalSpawner {
    /// Time between spawns.
    pub const SPAWN_INTERVAL: Duration = Duration::from_secs(1);

    /// Half-width of the cube new objects are placed in, per axis.
    pub const SPAWN_RANGE: f32 = 10.0;

    /// Create a spawner driven by the wall clock.
    ///
    /// `spawn_immediately` enables the spawner from construction; otherwise
    /// it stays idle until [`Spawner::start`].
    pub fn new(world: SharedWorld, prototype: GameObject, spawn_immediately: bool) -> Self {
        Self::with_clock(world, prototype, spawn_immediately, Rc::new(SystemClock))
    }

    /// Create a spawner polling the given clock. Tests inject a
    /// [`crate::foundation::time::ManualClock`] here.
    pub fn with_clock(
        world: SharedWorld,
        prototype: GameObject,
        spawn_immediately: bool,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let last_spawn = clock.now();
        Self {
            world,
            prototype,
            clock,
            last_spawn,
            interval: Self::SPAWN_INTERVAL,
            active: spawn_immediately,
            spawned: Vec::new(),
        }
    }

    fn random_position() -> Vec3 {
        let mut rng = rand::thread_rng();
        Vec3::new(
            rng.gen_range(-Self::SPAWN_RANGE..Self::SPAWN_RANGE),
            rng.gen_range(-Self::SPAWN_RANGE..Self::SPAWN_RANGE),
            rng.gen_range(-Self::SPAWN_RANGE..Self::SPAWN_RANGE),
        )
    }
}

impl Module for IntervalSpawner {
    fn update(&mut self, _delta: Option<f32>) {
        if !self.active {
            return;
        }

        let now = self.clock.now();
        if now.saturating_duration_since(self.last_spawn) < self.interval {
            return;
        }

        // One spawn per update regardless of overshoot; missed intervals are
        // not backfilled.
        let entity = self.world.borrow_mut().instantiate(
            &self.prototype,
            Self::random_position(),
            Quat::identity(),
        );
        self.spawned.push(entity);
        self.last_spawn = now;
        log::debug!("spawned `{}` #{}", self.prototype.name, self.spawned.len());
    }

    fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet) {
        capabilities.provide::<dyn Spawner>(handle.clone());
    }
}

impl Spawner for IntervalSpawner {
    fn start(&mut self) {
        self.active = true;
        // Restarting waits out a fresh interval instead of bursting.
        self.last_spawn = self.clock.now();
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_spawning(&self) -> bool {
        self.active
    }

    fn spawn_count(&self) -> usize {
        self.spawned.len()
    }

    fn spawned(&self) -> &[Entity] {
        &self.spawned
    }
}
