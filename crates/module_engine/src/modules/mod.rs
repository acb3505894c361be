//! Built-in sample modules
//!
//! The two modules the sample composes: a spawner that produces entities and
//! a mover that animates them. The mover depends on the spawner through the
//! [`Spawner`] capability only, injected at construction.

pub mod mover;
pub mod spawner;

pub use mover::{Mover, SineMover};
pub use spawner::{IntervalSpawner, Spawner};
