//! # Module Engine
//!
//! A small composition toolkit demonstrating the module pattern: behavior
//! lives in plain modules driven by a periodic update call, a per-scene
//! factory resolves modules by capability interface, and a registry owned by
//! the application tracks factories across scenes.
//!
//! ## Design
//!
//! - **Modules** are constructed RAII-style with dependencies injected
//!   through the constructor, and updated by one orchestrator in an explicit
//!   order. Everything is single-threaded; ordering is the only
//!   synchronization.
//! - **Capabilities** are the trait objects a module declares at
//!   registration; lookup is a map probe, not a type scan.
//! - **The world** is a minimal entity store standing in for a host engine's
//!   scene graph.
//!
//! ## Quick Start
//!
//! ```
//! use module_engine::prelude::*;
//!
//! # fn main() -> Result<(), module_engine::factory::FactoryError> {
//! let mut registry = FactoryRegistry::new();
//! let factory = registry.create_factory(SceneId::in_build(0, "scenes/sample.scene"));
//! let world = World::new().into_shared();
//!
//! let spawner = factory
//!     .borrow_mut()
//!     .add_module(IntervalSpawner::new(world.clone(), GameObject::new("cube"), true))?;
//!
//! // Tick loop: the orchestrator drives modules in a fixed order.
//! spawner.borrow_mut().update(None);
//!
//! // Anything else finds modules by capability.
//! let found = registry.find_first_in_all::<dyn Spawner>();
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod factory;
pub mod foundation;
pub mod module;
pub mod modules;
pub mod registry;
pub mod scene;
pub mod world;

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::factory::{FactoryError, ModuleFactory};
    pub use crate::foundation::math::{Quat, Transform, Vec3};
    pub use crate::foundation::time::{Clock, FrameClock, ManualClock, SystemClock, Timer};
    pub use crate::module::{CapabilitySet, Module, SharedModule};
    pub use crate::modules::{IntervalSpawner, Mover, SineMover, Spawner};
    pub use crate::registry::{FactoryRegistry, SharedFactory};
    pub use crate::scene::SceneId;
    pub use crate::world::{Entity, GameObject, SharedWorld, World};
}
