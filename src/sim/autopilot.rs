//! Idle/demo autopilot
//!
//! A fixed heuristic: hop toward the nearest reachable platform above, keep
//! away from mobs, and jump whenever standing on something.

use super::state::{GameState, Platform};
use super::tick::TickInput;

/// Highest a plain jump can carry the feet (25² / 2·0.8 ≈ 390, with margin)
const JUMP_REACH: f32 = 340.0;
/// Dead zone around the steering target
const STEER_DEADBAND: f32 = 8.0;
/// Mobs closer than this (horizontally) are avoided
const MOB_AVOID_RANGE: f32 = 140.0;

/// Pick a platform worth aiming at: the closest one above within reach,
/// otherwise the closest one below
fn target_platform(state: &GameState) -> Option<&Platform> {
    let feet = state.player.pos.y;
    let above = state
        .platforms
        .iter()
        .filter(|p| p.rect.top() < feet - 20.0 && feet - p.rect.top() < JUMP_REACH)
        .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));
    above.or_else(|| {
        state
            .platforms
            .iter()
            .filter(|p| p.rect.top() >= feet)
            .min_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
    })
}

/// Build this tick's input for the current state
pub fn drive(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput::default();

    let mut steer_x = target_platform(state).map(|p| p.rect.center().x);

    // Nearby mob overrides the platform target
    let threat = state
        .mobs
        .iter()
        .map(|m| m.rect.center())
        .filter(|c| (c.x - player.pos.x).abs() < MOB_AVOID_RANGE)
        .filter(|c| (c.y - player.rect.center().y).abs() < MOB_AVOID_RANGE)
        .min_by(|a, b| {
            (a.x - player.pos.x)
                .abs()
                .total_cmp(&(b.x - player.pos.x).abs())
        });
    if let Some(mob) = threat {
        steer_x = Some(if mob.x < player.pos.x {
            player.pos.x + MOB_AVOID_RANGE
        } else {
            player.pos.x - MOB_AVOID_RANGE
        });
    }

    if let Some(x) = steer_x {
        let dx = x - player.pos.x;
        input.left = dx < -STEER_DEADBAND;
        input.right = dx > STEER_DEADBAND;
    }

    if !player.jumping && player.vel.y == 0.0 && player.is_supported(&state.platforms) {
        input.jump_pressed = true;
    }

    input
}
