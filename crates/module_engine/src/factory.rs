//! Module factory
//!
//! A per-scene container that owns the handles of every registered module and
//! resolves them by capability interface. The expected lifecycle is: create
//! the factory when the scene loads, register every module immediately after
//! construction, then only look things up for the rest of the scene's life.

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::module::{CapabilitySet, Module, SharedModule};
use crate::scene::SceneId;

/// Errors raised by module registration.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// A module of the same concrete type is already registered in this
    /// factory. Registration is one-per-concrete-type; hitting this means the
    /// scene's setup code is wrong and must be fixed, not retried.
    #[error("module of type `{0}` is already registered in this factory")]
    DuplicateModule(&'static str),
}

struct ModuleEntry {
    type_id: TypeId,
    type_name: &'static str,
    module: Rc<RefCell<dyn Module>>,
}

/// Per-scene registry of modules, resolvable by capability interface.
pub struct ModuleFactory {
    scene: SceneId,
    modules: Vec<ModuleEntry>,
    capabilities: CapabilitySet,
}

impl ModuleFactory {
    /// Create an empty factory scoped to `scene`.
    ///
    /// Factories participating in cross-scene lookup should be created
    /// through [`crate::registry::FactoryRegistry::create_factory`] instead,
    /// which records them.
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            modules: Vec::new(),
            capabilities: CapabilitySet::new(),
        }
    }

    /// The scene this factory is scoped to.
    pub fn scene(&self) -> &SceneId {
        &self.scene
    }

    /// Register a module and return its shared handle.
    ///
    /// The module's [`Module::declare_capabilities`] hook runs as part of
    /// registration, so lookups resolve as soon as this returns. At most one
    /// module of a given concrete type may live in a factory; a second
    /// registration fails with [`FactoryError::DuplicateModule`].
    pub fn add_module<M: Module>(&mut self, module: M) -> Result<SharedModule<M>, FactoryError> {
        let type_id = TypeId::of::<M>();
        let type_name = type_name::<M>();
        if self.modules.iter().any(|entry| entry.type_id == type_id) {
            return Err(FactoryError::DuplicateModule(type_name));
        }

        let handle = Rc::new(RefCell::new(module));
        M::declare_capabilities(&handle, &mut self.capabilities);
        self.modules.push(ModuleEntry {
            type_id,
            type_name,
            module: handle.clone(),
        });
        log::debug!("registered module `{type_name}` in scene {}", self.scene);
        Ok(handle)
    }

    /// Construct a module with `Default` and register it.
    ///
    /// Convenience over [`ModuleFactory::add_module`] for modules without
    /// constructor dependencies.
    pub fn create_module<M: Module + Default>(&mut self) -> Result<SharedModule<M>, FactoryError> {
        self.add_module(M::default())
    }

    /// Resolve the module serving capability `C`, typically a `dyn Trait`.
    ///
    /// Returns `None` when no registered module declared `C`; callers that
    /// require the capability are expected to fail their own setup loudly.
    pub fn try_get_module<C: ?Sized + 'static>(&self) -> Option<Rc<RefCell<C>>> {
        self.capabilities.get::<C>()
    }

    /// Type-erased handles of every registered module, in registration order.
    pub fn modules(&self) -> impl Iterator<Item = Rc<RefCell<dyn Module>>> + '_ {
        self.modules.iter().map(|entry| entry.module.clone())
    }

    /// Concrete type names of every registered module, in registration order.
    pub fn module_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|entry| entry.type_name)
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Pulse {
        fn beats(&self) -> u32;
    }

    #[derive(Debug, Default)]
    struct Heartbeat {
        beats: u32,
    }

    impl Pulse for Heartbeat {
        fn beats(&self) -> u32 {
            self.beats
        }
    }

    impl Module for Heartbeat {
        fn update(&mut self, _delta: Option<f32>) {
            self.beats += 1;
        }

        fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet) {
            capabilities.provide::<dyn Pulse>(handle.clone());
        }
    }

    #[derive(Default)]
    struct Silent;

    impl Module for Silent {
        fn update(&mut self, _delta: Option<f32>) {}
    }

    fn test_scene() -> SceneId {
        SceneId::in_build(0, "scenes/test.scene")
    }

    #[test]
    fn test_duplicate_concrete_type_is_rejected() {
        let mut factory = ModuleFactory::new(test_scene());
        factory.add_module(Heartbeat::default()).unwrap();

        let err = factory.add_module(Heartbeat::default()).unwrap_err();
        assert!(matches!(err, FactoryError::DuplicateModule(_)));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_distinct_types_are_independently_resolvable() {
        let mut factory = ModuleFactory::new(test_scene());
        let registered = factory.add_module(Heartbeat::default()).unwrap();
        factory.add_module(Silent).unwrap();

        assert_eq!(factory.len(), 2);
        let found = factory
            .try_get_module::<dyn Pulse>()
            .expect("declared capability should resolve");

        // Lookup returns the registered instance, not a copy.
        registered.borrow_mut().update(None);
        assert_eq!(found.borrow().beats(), 1);
    }

    #[test]
    fn test_undeclared_capability_returns_none() {
        let mut factory = ModuleFactory::new(test_scene());
        factory.add_module(Silent).unwrap();

        assert!(factory.try_get_module::<dyn Pulse>().is_none());
    }

    #[test]
    fn test_create_module_registers_default() {
        let mut factory = ModuleFactory::new(test_scene());
        factory.create_module::<Heartbeat>().unwrap();

        assert!(factory.try_get_module::<dyn Pulse>().is_some());
        assert!(matches!(
            factory.create_module::<Heartbeat>(),
            Err(FactoryError::DuplicateModule(_))
        ));
    }

    #[test]
    fn test_modules_iterate_in_registration_order() {
        let mut factory = ModuleFactory::new(test_scene());
        factory.add_module(Heartbeat::default()).unwrap();
        factory.add_module(Silent).unwrap();

        let names: Vec<_> = factory.module_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Heartbeat"));
        assert!(names[1].ends_with("Silent"));
    }
}
