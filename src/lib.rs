//! Two snakes on a wrapping grid, racing for food against the clock.
//!
//! The library holds the simulation only. A frontend feeds one [`input::InputFrame`]
//! per frame into [`game::MatchLoop::tick`] and draws the returned snapshot.

pub mod agent;
pub mod bot;
pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod pathfinder;
pub mod powerup;
pub mod snapshot;
pub mod types;

pub use config::MatchConfig;
pub use error::ConfigError;
pub use game::{MatchLoop, TickOutcome};
pub use input::{InputFrame, Intent};
pub use snapshot::{EndReason, MatchEvent, MatchResult, RenderSnapshot};
pub use types::{AgentId, Cell, Direction};
