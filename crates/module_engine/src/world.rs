//! World and entity handles
//!
//! A minimal stand-in for the host engine's scene graph: a slotmap of game
//! objects addressed by stable [`Entity`] keys. The spawner clones a
//! prototype into it, the mover mutates transforms through it. There is no
//! removal path; the tracked population only grows for the scene's lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Quat, Transform, Vec3};

new_key_type! {
    /// Stable handle to a game object in a [`World`].
    pub struct Entity;
}

/// A named object with a transform, also usable as a spawn prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Display name, copied from the prototype on instantiation.
    pub name: String,

    /// Position, rotation, and scale in world space.
    pub transform: Transform,
}

impl GameObject {
    /// Create an object at the origin with an identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
        }
    }

    /// Create an object with an explicit transform.
    pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

/// Shared handle to a world, cloned into every module that reads or writes it.
///
/// All access happens on one thread in orchestrator-controlled order, so a
/// `RefCell` is all the coordination required.
pub type SharedWorld = Rc<RefCell<World>>;

/// Container of all game objects in a scene.
#[derive(Default)]
pub struct World {
    objects: SlotMap<Entity, GameObject>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the world in a shared handle.
    pub fn into_shared(self) -> SharedWorld {
        Rc::new(RefCell::new(self))
    }

    /// Clone `prototype` into the world at `position` with `rotation`.
    ///
    /// Returns the handle of the new object. Mirrors prefab instantiation:
    /// the prototype itself is never part of the world.
    pub fn instantiate(&mut self, prototype: &GameObject, position: Vec3, rotation: Quat) -> Entity {
        let mut object = prototype.clone();
        object.transform.position = position;
        object.transform.rotation = rotation;
        self.objects.insert(object)
    }

    /// Look up an object by handle.
    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        self.objects.get(entity)
    }

    /// Look up an object for mutation.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut GameObject> {
        self.objects.get_mut(entity)
    }

    /// Whether `entity` refers to a live object.
    pub fn contains(&self, entity: Entity) -> bool {
        self.objects.contains_key(entity)
    }

    /// Number of objects in the world.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all objects and their handles.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &GameObject)> {
        self.objects.iter()
    }
}
