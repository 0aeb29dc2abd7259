//! Player kinematics
//!
//! Velocities and accelerations are per tick, not per second.

use glam::Vec2;

use super::state::{Platform, Player};
use crate::Tuning;
use crate::consts::*;

/// Movement intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Jump key went up this tick
    pub jump_released: bool,
}

impl Player {
    /// Integrate one tick of movement, then apply jump input
    pub fn update(
        &mut self,
        intent: MoveIntent,
        friction: f32,
        tuning: &Tuning,
        platforms: &[Platform],
    ) {
        self.integrate(intent, friction, tuning);

        // Boost ends as soon as the player is moving upward on its own
        if self.vel.y < 0.0 {
            self.boosted = false;
        }

        self.sync_rect();

        if intent.jump_pressed {
            self.jump(tuning, platforms);
        }
        if intent.jump_released {
            self.jump_cut(tuning);
        }
    }

    /// Semi-implicit Euler step with horizontal friction and edge clamping
    pub fn integrate(&mut self, intent: MoveIntent, friction: f32, tuning: &Tuning) {
        self.acc = Vec2::new(0.0, tuning.gravity);
        if intent.left {
            self.acc.x = -tuning.run_accel;
        }
        if intent.right {
            self.acc.x = tuning.run_accel;
        }

        self.acc.x += self.vel.x * friction;
        self.vel += self.acc;
        if self.vel.x.abs() < tuning.stiction {
            self.vel.x = 0.0;
        }
        self.pos += self.vel + 0.5 * self.acc;

        self.pos.x = self.pos.x.clamp(EDGE_MARGIN, WIDTH - EDGE_MARGIN);
    }

    /// Something solid sits just under the feet
    pub fn is_supported(&self, platforms: &[Platform]) -> bool {
        let probe = self.rect.offset(0.0, 2.0);
        platforms.iter().any(|p| probe.intersects(&p.rect))
    }

    /// Start a jump if standing on a platform. Returns true if it fired.
    pub fn jump(&mut self, tuning: &Tuning, platforms: &[Platform]) -> bool {
        if self.jumping || !self.is_supported(platforms) {
            return false;
        }
        self.jumping = true;
        self.vel.y -= tuning.jump_impulse;
        true
    }

    /// Cap upward speed when the jump key is released early
    pub fn jump_cut(&mut self, tuning: &Tuning) {
        if self.jumping && self.vel.y < -tuning.jump_cut_speed {
            self.vel.y = -tuning.jump_cut_speed;
        }
    }
}
