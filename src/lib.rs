//! Terminal snake built around an authoritative grid simulation core.
//!
//! The [`game`] module owns the simulation: world state, the tick algorithm
//! and the tick scheduler. It has no I/O or rendering dependencies and can be
//! driven programmatically. The remaining modules are the interactive host:
//! [`input`] maps key events to game intents, [`render`] draws a world
//! snapshot, [`metrics`] tracks session counters and [`modes`] runs the
//! terminal event loop.

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
