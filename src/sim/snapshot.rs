//! Render-ready view of a round
//!
//! Everything a renderer needs for one frame, ordered back to front.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GamePhase, GameState, MobFacing, PlatformMode, Player, PowerupKind};
use crate::consts::ANIM_FRAME_MS;
use crate::ticks_to_ms;

/// Draw layers, back to front
pub const LAYER_CLOUDS: u8 = 0;
pub const LAYER_PLATFORMS: u8 = 1;
pub const LAYER_ACTORS: u8 = 2;

/// Player sprite pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    Standing,
    WalkingLeft,
    WalkingRight,
    Jumping,
}

impl PlayerPose {
    pub fn of(player: &Player) -> Self {
        if player.jumping {
            PlayerPose::Jumping
        } else if player.vel.x > 0.0 {
            PlayerPose::WalkingRight
        } else if player.vel.x < 0.0 {
            PlayerPose::WalkingLeft
        } else {
            PlayerPose::Standing
        }
    }
}

/// What to draw for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Cloud { scale: f32 },
    /// Platforms take their look from the round's mode
    Platform { theme: PlatformMode },
    Powerup { kind: PowerupKind },
    Player { pose: PlayerPose, frame: u32, boosted: bool },
    Mob { facing: MobFacing },
}

/// A drawable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawable {
    pub layer: u8,
    pub rect: Rect,
    pub visual: Visual,
}

/// One frame's worth of state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub mode: PlatformMode,
    pub show_mode_hint: bool,
    /// Sorted by layer (stable within a layer)
    pub drawables: Vec<Drawable>,
}

impl GameState {
    /// Build the render view for the current tick
    pub fn snapshot(&self) -> Snapshot {
        let mut drawables = Vec::with_capacity(
            self.clouds.len() + self.platforms.len() + self.powerups.len() + self.mobs.len() + 1,
        );

        for cloud in &self.clouds {
            drawables.push(Drawable {
                layer: LAYER_CLOUDS,
                rect: cloud.rect,
                visual: Visual::Cloud { scale: cloud.scale },
            });
        }
        for platform in &self.platforms {
            drawables.push(Drawable {
                layer: LAYER_PLATFORMS,
                rect: platform.rect,
                visual: Visual::Platform { theme: self.mode },
            });
        }
        for pu in &self.powerups {
            drawables.push(Drawable {
                layer: LAYER_PLATFORMS,
                rect: pu.rect,
                visual: Visual::Powerup { kind: pu.kind },
            });
        }

        let frame = (ticks_to_ms(self.time_ticks) / ANIM_FRAME_MS) as u32 % 2;
        drawables.push(Drawable {
            layer: LAYER_ACTORS,
            rect: self.player.rect,
            visual: Visual::Player {
                pose: PlayerPose::of(&self.player),
                frame,
                boosted: self.player.boosted,
            },
        });
        for mob in &self.mobs {
            drawables.push(Drawable {
                layer: LAYER_ACTORS,
                rect: mob.rect,
                visual: Visual::Mob { facing: mob.facing },
            });
        }

        drawables.sort_by_key(|d| d.layer);

        Snapshot {
            phase: self.phase,
            score: self.score,
            mode: self.mode,
            show_mode_hint: self.show_mode_hint,
            drawables,
        }
    }
}
