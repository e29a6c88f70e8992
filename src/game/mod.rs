//! The simulation core: world state, the tick algorithm and the scheduler.
//!
//! Nothing in here reads input devices or draws; hosts feed intents in
//! through [`World::start`] and [`World::buffer_direction`], drive
//! [`GameEngine::tick`] when [`TickClock::maybe_tick`] says a step is due,
//! and hand [`World::snapshot`] to a renderer.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod world;

pub use clock::TickClock;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Collision, GameEngine, TickOutcome};
pub use error::ConfigError;
pub use grid::{Cell, Snake};
pub use world::{Phase, Snapshot, World};
