//! Demo game assembly
//!
//! Builds one scene's worth of modules, wires the view to them by capability,
//! and runs a fixed-rate headless tick loop. Stands in for a host engine's
//! scene bootstrap and UI.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use module_engine::config::{Config, ConfigError};
use module_engine::factory::FactoryError;
use module_engine::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors the demo can hit while assembling or running.
#[derive(Debug, Error)]
pub enum GameError {
    /// Module registration failed.
    #[error("module registration failed: {0}")]
    Factory(#[from] FactoryError),

    /// The demo config could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The view could not find a module it depends on.
    #[error("no `{0}` module registered in any scene")]
    ModuleMissing(&'static str),
}

/// Tunables for the demo run, loaded from `demo.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Total frames to simulate before exiting.
    pub frames: u64,
    /// Seconds each frame sleeps for, approximating a fixed tick rate.
    pub tick_seconds: f32,
    /// Whether the spawner is active from the first frame.
    pub spawn_immediately: bool,
    /// Frame at which the mover is switched on, as a toggle press would.
    pub mover_start_frame: u64,
    /// Frame at which the spawner is switched off again.
    pub spawner_stop_frame: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            tick_seconds: 1.0 / 60.0,
            spawn_immediately: true,
            mover_start_frame: 60,
            spawner_stop_frame: 240,
        }
    }
}

impl Config for DemoConfig {}

/// The view side of the demo: holds capability handles it resolved through
/// the registry, never concrete module types.
pub struct StatusView {
    spawner: Rc<RefCell<dyn Spawner>>,
    mover: Rc<RefCell<dyn Mover>>,
}

impl std::fmt::Debug for StatusView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusView").finish_non_exhaustive()
    }
}

impl StatusView {
    /// Locate the modules the view needs across every registered scene.
    /// Fails loudly when a module is absent rather than running blind.
    pub fn attach(registry: &FactoryRegistry) -> Result<Self, GameError> {
        let spawner = registry
            .find_first_in_all::<dyn Spawner>()
            .ok_or(GameError::ModuleMissing("Spawner"))?;
        let mover = registry
            .find_first_in_all::<dyn Mover>()
            .ok_or(GameError::ModuleMissing("Mover"))?;
        Ok(Self { spawner, mover })
    }

    /// Flip the mover, like a UI toggle button.
    pub fn toggle_mover(&self) {
        let mut mover = self.mover.borrow_mut();
        if mover.is_moving() {
            mover.stop();
        } else {
            mover.start();
        }
    }

    /// Flip the spawner.
    pub fn toggle_spawner(&self) {
        let mut spawner = self.spawner.borrow_mut();
        if spawner.is_spawning() {
            spawner.stop();
        } else {
            spawner.start();
        }
    }

    /// One status line with everything the demo UI would show.
    pub fn log_status(&self, frame: u64, fps: f32) {
        let spawner = self.spawner.borrow();
        let mover = self.mover.borrow();
        log::info!(
            "frame {frame}: {} spawned, spawning={}, moving={}, {fps:.1} fps",
            spawner.spawn_count(),
            spawner.is_spawning(),
            mover.is_moving(),
        );
    }
}

/// Owns the registry, the world, and the module handles the tick loop drives.
pub struct Game {
    config: DemoConfig,
    registry: FactoryRegistry,
    world: SharedWorld,
    frame_clock: Rc<RefCell<FrameClock>>,
    spawner: Rc<RefCell<IntervalSpawner>>,
    mover: Rc<RefCell<SineMover>>,
}

impl Game {
    /// Assemble the demo scene: one factory, a spawner, and a mover wired to
    /// the spawner's capability handle.
    pub fn new(config: DemoConfig) -> Result<Self, GameError> {
        let mut registry = FactoryRegistry::new();
        let factory = registry.create_factory(SceneId::in_build(0, "scenes/sample.scene"));
        let world = World::new().into_shared();
        let frame_clock = Rc::new(RefCell::new(FrameClock::new()));

        // The spawner must be registered before the mover is constructed;
        // the mover takes its handle at construction time.
        let spawner = factory.borrow_mut().add_module(IntervalSpawner::new(
            world.clone(),
            GameObject::new("cube"),
            config.spawn_immediately,
        ))?;
        let mover = factory.borrow_mut().add_module(SineMover::new(
            world.clone(),
            spawner.clone(),
            frame_clock.clone(),
        ))?;

        log::info!(
            "scene assembled: {} modules in {}",
            factory.borrow().len(),
            factory.borrow().scene()
        );

        Ok(Self {
            config,
            registry,
            world,
            frame_clock,
            spawner,
            mover,
        })
    }

    /// The registry, for views resolving modules by capability.
    pub fn registry(&self) -> &FactoryRegistry {
        &self.registry
    }

    /// Run the fixed-rate loop to completion.
    pub fn run(&mut self) -> Result<(), GameError> {
        let view = StatusView::attach(&self.registry)?;
        let mut timer = Timer::new();
        let tick = Duration::from_secs_f32(self.config.tick_seconds);
        let status_every = (1.0 / self.config.tick_seconds).round() as u64;
        let mut frame = 0u64;

        while frame < self.config.frames {
            std::thread::sleep(tick);
            timer.update();
            self.frame_clock
                .borrow_mut()
                .begin_frame(timer.delta_time());

            // Scripted toggles standing in for button presses.
            if frame == self.config.mover_start_frame {
                view.toggle_mover();
                log::info!("mover toggled on at frame {frame}");
            }
            if frame == self.config.spawner_stop_frame {
                view.toggle_spawner();
                log::info!("spawner toggled off at frame {frame}");
            }

            // Update order is fixed: producers before consumers.
            self.spawner.borrow_mut().update(None);
            self.mover.borrow_mut().update(None);

            if status_every > 0 && frame % status_every == 0 {
                view.log_status(frame, timer.average_fps());
            }
            frame += 1;
        }

        log::info!(
            "demo finished: {} entities in the world after {} frames",
            self.world.borrow().len(),
            frame
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_attach_fails_without_modules() {
        let registry = FactoryRegistry::new();
        let err = StatusView::attach(&registry).unwrap_err();
        assert!(matches!(err, GameError::ModuleMissing("Spawner")));
    }

    #[test]
    fn test_game_assembles_both_modules() {
        let game = Game::new(DemoConfig::default()).unwrap();
        let view = StatusView::attach(game.registry()).unwrap();

        assert!(view.spawner.borrow().is_spawning());
        assert!(!view.mover.borrow().is_moving());
        view.toggle_mover();
        assert!(view.mover.borrow().is_moving());
    }

    #[test]
    fn test_config_defaults_are_sane() {
        let config = DemoConfig::default();
        assert!(config.frames > 0);
        assert!(config.tick_seconds > 0.0);
        assert!(config.mover_start_frame < config.frames);
    }
}
