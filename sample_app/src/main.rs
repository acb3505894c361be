//! Module pattern demo
//!
//! Headless sample that assembles a spawner and a mover in one scene and
//! drives them through a fixed-rate loop, with scripted toggles standing in
//! for UI buttons. Run with `RUST_LOG=debug` to watch individual spawns.

mod game;

use game::{DemoConfig, Game, GameError};
use module_engine::config::Config;
use module_engine::foundation::logging;

fn main() -> Result<(), GameError> {
    logging::init();
    log::info!("starting module pattern demo");

    let config = DemoConfig::load_or_default("demo.toml")?;
    log::debug!("config: {config:?}");

    let mut game = Game::new(config)?;
    game.run()?;
    Ok(())
}
