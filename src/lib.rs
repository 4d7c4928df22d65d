//! Simulation core of a fixed-formation shooter.
//!
//! - `entities`: pure data for every game object and the session aggregate
//! - `config`: named constants and the validated `Config`
//! - `pool`: fixed-capacity bullet ring buffer
//! - `compute`: per-frame rules (formation, targeting, collisions, lifecycle)
//! - `snapshot`: read-only view handed to renderers
//!
//! The library performs no I/O; the `invaders` binary is the terminal shell.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod pool;
pub mod snapshot;

pub use compute::{update, Intents};
pub use config::Config;
pub use entities::{GameEvent, GameStatus, Session};
pub use error::ConfigError;
pub use snapshot::WorldSnapshot;
