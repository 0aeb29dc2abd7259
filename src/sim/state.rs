//! Game state and core simulation types
//!
//! A `GameState` is one round. It owns every entity; entities refer to each
//! other only by id.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::rng::GameRng;
use super::spawn;
use crate::Tuning;
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Round ended, nothing moves any more
    GameOver,
}

/// Ground-surface mode, chosen while standing on the ground platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformMode {
    #[default]
    Normal,
    Snow,
    Rock,
}

impl PlatformMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformMode::Normal => "Normal",
            PlatformMode::Snow => "Snow",
            PlatformMode::Rock => "Rock",
        }
    }

    /// Horizontal friction coefficient (negative, scales velocity)
    pub fn friction(&self) -> f32 {
        match self {
            PlatformMode::Normal => -0.1,
            PlatformMode::Snow => -0.04,
            PlatformMode::Rock => -0.17,
        }
    }

    /// Points for each platform scrolled off the bottom
    pub fn score_increment(&self) -> u64 {
        match self {
            PlatformMode::Normal => 10,
            PlatformMode::Snow => 15,
            PlatformMode::Rock => 5,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Mid-bottom of the hitbox
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Hitbox, re-synced from `pos` at the end of each kinematics step
    pub rect: Rect,
    /// In the air after a jump (cleared on landing or boost)
    pub jumping: bool,
    /// Boost power-up in effect
    pub boosted: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            rect: Rect::from_midbottom(pos, PLAYER_WIDTH, PLAYER_HEIGHT),
            jumping: false,
            boosted: false,
        }
    }

    /// Re-anchor the hitbox to the current position
    #[inline]
    pub fn sync_rect(&mut self) {
        self.rect = Rect::from_midbottom(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT);
    }
}

/// A platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Boost,
}

/// A power-up sitting on a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    /// Parent platform (non-owning)
    pub platform: u32,
    pub rect: Rect,
}

impl Powerup {
    pub fn new(id: u32, kind: PowerupKind, platform: &Platform) -> Self {
        let mut powerup = Self {
            id,
            kind,
            platform: platform.id,
            rect: Rect::new(0.0, 0.0, POWERUP_WIDTH, POWERUP_HEIGHT),
        };
        powerup.anchor(&platform.rect);
        powerup
    }

    /// Centre above the platform, a small gap over its top
    pub fn anchor(&mut self, platform: &Rect) {
        self.rect.x = platform.center().x - self.rect.w / 2.0;
        self.rect.y = platform.top() - POWERUP_GAP - self.rect.h;
    }
}

/// Which way a mob's bob is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobFacing {
    Up,
    Down,
}

/// A flying enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: u32,
    pub rect: Rect,
    /// Horizontal speed (constant)
    pub vx: f32,
    /// Vertical bob velocity
    pub vy: f32,
    /// Vertical bob acceleration, flips sign at the bob limit
    pub dy: f32,
    pub facing: MobFacing,
}

impl Mob {
    /// Mob entering from the left or right edge
    pub fn new(id: u32, from_left: bool, speed: f32) -> Self {
        let center_x = if from_left {
            -MOB_MARGIN
        } else {
            WIDTH + MOB_MARGIN
        };
        let vx = if from_left { speed.abs() } else { -speed.abs() };
        let mut rect = Rect::from_center(Vec2::new(center_x, 0.0), MOB_WIDTH, MOB_HEIGHT);
        rect.y = MOB_SPAWN_Y;
        Self {
            id,
            rect,
            vx,
            vy: 0.0,
            dy: MOB_BOB_ACCEL,
            facing: MobFacing::Up,
        }
    }

    /// Drift sideways and bob up and down
    pub fn update(&mut self) {
        self.rect.x += self.vx;
        self.vy += self.dy;
        if self.vy.abs() > MOB_BOB_LIMIT {
            self.dy = -self.dy;
        }
        self.facing = if self.dy < 0.0 {
            MobFacing::Up
        } else {
            MobFacing::Down
        };
        self.rect.y += self.vy;
    }

    /// Fully outside the horizontal despawn margin
    pub fn is_gone(&self) -> bool {
        self.rect.right() < -MOB_MARGIN || self.rect.left() > WIDTH + MOB_MARGIN
    }
}

/// Background cloud (no gameplay effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub id: u32,
    pub rect: Rect,
    pub scale: f32,
}

impl Cloud {
    pub fn is_gone(&self) -> bool {
        self.rect.top() > CLOUD_DESPAWN_Y
    }
}

/// One round of play
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance table for this round
    pub tuning: Tuning,
    pub rng: GameRng,
    pub player: Player,
    /// Platforms in creation order
    pub platforms: Vec<Platform>,
    pub powerups: Vec<Powerup>,
    pub mobs: Vec<Mob>,
    pub clouds: Vec<Cloud>,
    pub score: u64,
    /// Current ground-surface mode
    pub mode: PlatformMode,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick of the last mob spawn
    pub last_mob_tick: u64,
    /// The starting ground platform, while it is still alive
    pub ground_id: Option<u32>,
    /// Tick at which a pending death turns into game over
    pub death_at: Option<u64>,
    /// Consecutive ticks spent below the screen
    pub fall_ticks: u32,
    /// Mode-change hint shown until the first input
    pub show_mode_hint: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New round with an entropy-seeded RNG
    pub fn new(tuning: Tuning) -> Self {
        Self::with_rng(GameRng::from_entropy(), tuning)
    }

    /// New round with a fixed seed
    pub fn with_seed(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(GameRng::seeded(seed), tuning)
    }

    fn with_rng(rng: GameRng, tuning: Tuning) -> Self {
        let mut state = Self {
            tuning,
            rng,
            player: Player::default(),
            platforms: Vec::new(),
            powerups: Vec::new(),
            mobs: Vec::new(),
            clouds: Vec::new(),
            score: 0,
            mode: PlatformMode::Normal,
            phase: GamePhase::Playing,
            time_ticks: 0,
            last_mob_tick: 0,
            ground_id: None,
            death_at: None,
            fall_ticks: 0,
            show_mode_hint: true,
            next_id: 1,
        };

        spawn::seed_layout(&mut state);
        log::info!(
            "Round started (seed {}, {} platforms)",
            state.rng.seed(),
            state.platforms.len()
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up a platform by id
    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Player overlaps the ground platform
    pub fn on_ground(&self) -> bool {
        self.ground_id
            .and_then(|id| self.platform(id))
            .is_some_and(|ground| self.player.rect.intersects(&ground.rect))
    }

    /// Switch ground-surface mode; only allowed while on the ground platform
    pub fn select_mode(&mut self, mode: PlatformMode) -> bool {
        if !self.on_ground() {
            return false;
        }
        if self.mode != mode {
            log::info!("Mode changed: {} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
        }
        true
    }

    /// Player touched a mob and the round is about to end
    pub fn is_dying(&self) -> bool {
        self.death_at.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Final score, available once the round has ended
    pub fn final_score(&self) -> Option<u64> {
        self.is_over().then_some(self.score)
    }

    /// End the round
    pub fn game_over(&mut self, reason: &str) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            self.death_at = None;
            log::info!(
                "Game over ({}): score {} after {} ticks",
                reason,
                self.score,
                self.time_ticks
            );
        }
    }

    /// Drop power-ups whose platform no longer exists
    pub fn drop_orphaned_powerups(&mut self) {
        let platforms = &self.platforms;
        self.powerups
            .retain(|pu| platforms.iter().any(|p| p.id == pu.platform));
    }
}
