//! Module contract and capability declaration
//!
//! A module is a self-contained behavior unit driven by a periodic update
//! call. Modules are constructed RAII-style (fully usable once built, with
//! dependencies injected through the constructor) and are updated by a single
//! orchestrator in an explicit order, so a module never has to defend against
//! concurrent access.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a module.
///
/// The orchestrator owns modules through these handles; the factory and any
/// dependent modules hold non-exclusive clones.
pub type SharedModule<M> = Rc<RefCell<M>>;

/// Base contract every module implements.
pub trait Module: 'static {
    /// Advance the module by one tick.
    ///
    /// Called at a regular interval by the orchestrator, which controls the
    /// order so a module's dependencies have already been updated. `delta` is
    /// an optional caller-computed frame delta in seconds; modules that track
    /// an ambient clock instead may ignore it. Must be a no-op while the
    /// module is internally disabled, and must not fail.
    fn update(&mut self, delta: Option<f32>);

    /// Declare the capability interfaces this module answers lookups for.
    ///
    /// Invoked once when the module is registered with a factory. The default
    /// declares nothing, which makes the module updatable but not resolvable
    /// through [`CapabilitySet::get`].
    fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet)
    where
        Self: Sized,
    {
        let _ = (handle, capabilities);
    }
}

/// Map from capability interface to the module handle serving it.
///
/// Replaces reflection-style "is this concrete type assignable" scans: each
/// module registers the trait objects it wants to be found as, and lookup is
/// a single map probe keyed by the capability's `TypeId`.
#[derive(Default)]
pub struct CapabilitySet {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under capability `C`, typically a `dyn Trait` type.
    ///
    /// A later registration for the same capability replaces the earlier one;
    /// the factory's one-module-per-concrete-type rule keeps this from
    /// happening between distinct modules of the same type.
    pub fn provide<C: ?Sized + 'static>(&mut self, handle: Rc<RefCell<C>>) {
        self.entries.insert(TypeId::of::<C>(), Box::new(handle));
    }

    /// Look up the handle registered under capability `C`, if any.
    pub fn get<C: ?Sized + 'static>(&self) -> Option<Rc<RefCell<C>>> {
        self.entries
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.downcast_ref::<Rc<RefCell<C>>>())
            .cloned()
    }

    /// Whether capability `C` has a provider.
    pub fn contains<C: ?Sized + 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<C>())
    }

    /// Number of declared capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no capabilities are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Counter {
        fn value(&self) -> u32;
    }

    struct TickCounter {
        ticks: u32,
    }

    impl Counter for TickCounter {
        fn value(&self) -> u32 {
            self.ticks
        }
    }

    impl Module for TickCounter {
        fn update(&mut self, _delta: Option<f32>) {
            self.ticks += 1;
        }

        fn declare_capabilities(handle: &SharedModule<Self>, capabilities: &mut CapabilitySet) {
            capabilities.provide::<dyn Counter>(handle.clone());
        }
    }

    #[test]
    fn test_capability_roundtrip() {
        let mut capabilities = CapabilitySet::new();
        let handle = Rc::new(RefCell::new(TickCounter { ticks: 0 }));
        TickCounter::declare_capabilities(&handle, &mut capabilities);

        let found = capabilities
            .get::<dyn Counter>()
            .expect("declared capability should resolve");
        handle.borrow_mut().update(None);
        assert_eq!(found.borrow().value(), 1);
    }

    #[test]
    fn test_undeclared_capability_is_absent() {
        let capabilities = CapabilitySet::new();
        assert!(capabilities.get::<dyn Counter>().is_none());
        // Concrete types were never declared either; the map just misses.
        assert!(capabilities.get::<TickCounter>().is_none());
        assert!(capabilities.is_empty());
    }
}
