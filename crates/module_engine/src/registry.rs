//! Cross-scene factory registry
//!
//! Tracks every [`ModuleFactory`] the application has created, scoped to the
//! orchestrator that owns the registry rather than process-wide state. When a
//! scene is torn down, [`FactoryRegistry::release_scene`] drops its entry, so
//! reloads do not accumulate stale factories.

use std::cell::RefCell;
use std::rc::Rc;

use crate::factory::ModuleFactory;
use crate::scene::SceneId;

/// Shared handle to a factory, held by the registry and the scene's owner.
pub type SharedFactory = Rc<RefCell<ModuleFactory>>;

/// Registry of all factories across all loaded scenes.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: Vec<SharedFactory>,
}

impl FactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory scoped to `scene` and record it for lookup.
    pub fn create_factory(&mut self, scene: SceneId) -> SharedFactory {
        log::debug!("creating module factory for scene {scene}");
        let factory = Rc::new(RefCell::new(ModuleFactory::new(scene)));
        self.factories.push(Rc::clone(&factory));
        factory
    }

    /// Every recorded factory, in creation order.
    pub fn factories(&self) -> &[SharedFactory] {
        &self.factories
    }

    /// Find every module serving capability `C` across all scenes.
    ///
    /// Ignores scene scoping entirely, so this is only safe for modules used
    /// as process-wide singletons. Prefer
    /// [`FactoryRegistry::find_factory_in_scene`] when the scene is known.
    pub fn find_in_all<C: ?Sized + 'static>(&self) -> Vec<Rc<RefCell<C>>> {
        self.factories
            .iter()
            .filter_map(|factory| factory.borrow().try_get_module::<C>())
            .collect()
    }

    /// Find the first module serving capability `C` across all scenes.
    ///
    /// Same scoping caveat as [`FactoryRegistry::find_in_all`].
    pub fn find_first_in_all<C: ?Sized + 'static>(&self) -> Option<Rc<RefCell<C>>> {
        self.factories
            .iter()
            .find_map(|factory| factory.borrow().try_get_module::<C>())
    }

    /// Find the factory belonging to `scene`.
    ///
    /// Scenes in the build are matched by build index, path-only scenes by
    /// path; the discriminators never cross.
    pub fn find_factory_in_scene(&self, scene: &SceneId) -> Option<SharedFactory> {
        self.factories
            .iter()
            .find(|factory| factory.borrow().scene().matches(scene))
            .cloned()
    }

    /// Drop the factory recorded for `scene`, if any.
    ///
    /// Call when a scene is unloaded or reloaded; returns whether an entry
    /// was removed.
    pub fn release_scene(&mut self, scene: &SceneId) -> bool {
        let before = self.factories.len();
        self.factories
            .retain(|factory| !factory.borrow().scene().matches(scene));
        before != self.factories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{CapabilitySet, Module, SharedModule};

    trait Beacon {
        fn scene_tag(&self) -> u32;
    }

    struct BeaconModule {
        tag: u32,
    }

    impl Beacon for BeaconModule {
        fn scene_tag(&self) -> u32 {
            self.tag
        }
    }

    impl Module for BeaconModule {
        fn update(&mut self, _delta: Option<f32>) {}

        fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet) {
            capabilities.provide::<dyn Beacon>(handle.clone());
        }
    }

    #[test]
    fn test_find_in_all_spans_scenes() {
        let mut registry = FactoryRegistry::new();
        let first = registry.create_factory(SceneId::in_build(0, "scenes/a.scene"));
        let second = registry.create_factory(SceneId::in_build(1, "scenes/b.scene"));

        first
            .borrow_mut()
            .add_module(BeaconModule { tag: 0 })
            .unwrap();
        second
            .borrow_mut()
            .add_module(BeaconModule { tag: 1 })
            .unwrap();

        let all = registry.find_in_all::<dyn Beacon>();
        assert_eq!(all.len(), 2);

        let found = registry
            .find_first_in_all::<dyn Beacon>()
            .expect("two scenes declare the capability");
        assert_eq!(found.borrow().scene_tag(), 0);
    }

    #[test]
    fn test_find_first_in_all_empty_registry() {
        let registry = FactoryRegistry::new();
        assert!(registry.find_first_in_all::<dyn Beacon>().is_none());
        assert!(registry.find_in_all::<dyn Beacon>().is_empty());
    }

    #[test]
    fn test_find_factory_by_build_index_and_path() {
        let mut registry = FactoryRegistry::new();
        registry.create_factory(SceneId::in_build(4, "scenes/level.scene"));
        registry.create_factory(SceneId::from_path("bundles/extra.scene"));

        let by_index = registry
            .find_factory_in_scene(&SceneId::in_build(4, "any/path.scene"))
            .expect("in-build scene should match by index");
        assert_eq!(by_index.borrow().scene().build_index(), Some(4));

        let by_path = registry
            .find_factory_in_scene(&SceneId::from_path("bundles/extra.scene"))
            .expect("unbuilt scene should match by path");
        assert_eq!(by_path.borrow().scene().build_index(), None);

        assert!(registry
            .find_factory_in_scene(&SceneId::in_build(9, "bundles/extra.scene"))
            .is_none());
    }

    #[test]
    fn test_release_scene_drops_exactly_one_entry() {
        let mut registry = FactoryRegistry::new();
        registry.create_factory(SceneId::in_build(0, "scenes/a.scene"));
        registry.create_factory(SceneId::in_build(1, "scenes/b.scene"));

        assert!(registry.release_scene(&SceneId::in_build(0, "scenes/a.scene")));
        assert_eq!(registry.factories().len(), 1);
        assert!(!registry.release_scene(&SceneId::in_build(0, "scenes/a.scene")));
    }
}
