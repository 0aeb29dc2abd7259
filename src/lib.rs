//! Jumpy - An endless vertical-scrolling jumper
//!
//! Core modules:
//! - `sim`: Simulation (player physics, spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScoreStore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Simulated milliseconds per tick
    pub const TICK_MS: f32 = 1000.0 / TICK_HZ as f32;

    /// Screen dimensions (y grows downward, origin at top-left)
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 800.0;

    /// Player hitbox size
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Player spawn point (mid-bottom of the hitbox)
    pub const PLAYER_SPAWN: (f32, f32) = (50.0, HEIGHT / 2.0 + 150.0);
    /// Horizontal clamp margin from either screen edge
    pub const EDGE_MARGIN: f32 = 10.0;

    /// Platform height (all platforms share it)
    pub const PLATFORM_HEIGHT: f32 = 60.0;
    /// Tile widths used for the starting layout
    pub const PLATFORM_TILE_WIDTHS: [f32; 2] = [100.0, 201.0];
    /// Starting layout (top-left corners), ground excluded
    pub const PLATFORM_LAYOUT: [(f32, f32); 4] = [
        (WIDTH / 2.0, HEIGHT * 3.0 / 4.0 - 100.0),
        (125.0, HEIGHT - 350.0),
        (350.0, 200.0),
        (175.0, 100.0),
    ];

    /// Power-up size and gap above its platform
    pub const POWERUP_WIDTH: f32 = 41.0;
    pub const POWERUP_HEIGHT: f32 = 40.0;
    pub const POWERUP_GAP: f32 = 5.0;

    /// Mob sprite bounds (same for both facings)
    pub const MOB_WIDTH: f32 = 60.0;
    pub const MOB_HEIGHT: f32 = 80.0;
    /// Mobs spawn and despawn this far outside the screen
    pub const MOB_MARGIN: f32 = 30.0;
    pub const MOB_SPAWN_Y: f32 = 240.0;
    /// Vertical bob velocity bound
    pub const MOB_BOB_LIMIT: f32 = 3.0;
    pub const MOB_BOB_ACCEL: f32 = 0.5;

    /// Cloud base size before scaling
    pub const CLOUD_WIDTH: f32 = 160.0;
    pub const CLOUD_HEIGHT: f32 = 80.0;
    /// Clouds are removed once their top passes this world-space line
    pub const CLOUD_DESPAWN_Y: f32 = 1200.0;

    /// Camera scrolls while the player's top is at or above this line
    pub const SCROLL_TRIGGER_Y: f32 = HEIGHT / 4.0;
    /// Minimum scroll per tick while the camera follows the player
    pub const MIN_SCROLL: f32 = 4.0;
    pub const MIN_CLOUD_SCROLL: f32 = 2.0;
    /// Player is "below the screen" past this line
    pub const FALL_LINE_Y: f32 = HEIGHT + 20.0;
    /// Minimum upward scroll while the player falls out of view
    pub const MIN_FALL_SCROLL: f32 = 10.0;

    /// Player animation frame period (ms)
    pub const ANIM_FRAME_MS: f32 = 200.0;
}

/// Convert a tick count to simulated milliseconds
#[inline]
pub fn ticks_to_ms(ticks: u64) -> f32 {
    ticks as f32 * consts::TICK_MS
}

/// Convert milliseconds to whole ticks (nearest, at least one)
#[inline]
pub fn ms_to_ticks(ms: f32) -> u64 {
    (ms / consts::TICK_MS).round().max(1.0) as u64
}
