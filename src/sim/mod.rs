//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Entities owned by `GameState`, cross-referenced by id
//! - No rendering, input polling or file I/O

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::Rect;
pub use player::MoveIntent;
pub use rng::GameRng;
pub use snapshot::{Drawable, PlayerPose, Snapshot, Visual};
pub use state::{
    Cloud, GamePhase, GameState, Mob, MobFacing, Platform, PlatformMode, Player, Powerup,
    PowerupKind,
};
pub use tick::{TickInput, tick};
