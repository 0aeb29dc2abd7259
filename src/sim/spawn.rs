//! Procedural spawning: platforms, mobs, clouds

use super::geometry::Rect;
use super::state::{Cloud, GameState, Mob, Platform, Powerup, PowerupKind};
use crate::consts::*;
use crate::ticks_to_ms;

/// Add a platform, rolling for a power-up on top of it. Returns its id.
pub fn add_platform(state: &mut GameState, x: f32, y: f32, width: f32) -> u32 {
    let id = state.next_entity_id();
    let platform = Platform {
        id,
        rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
    };

    if state.rng.percent(state.tuning.powerup_chance) {
        let pu_id = state.next_entity_id();
        let powerup = Powerup::new(pu_id, PowerupKind::Boost, &platform);
        state.powerups.push(powerup);
        log::debug!("Power-up {} placed on platform {}", pu_id, id);
    }

    state.platforms.push(platform);
    id
}

/// Pick one of the layout tile widths
fn tile_width(state: &mut GameState) -> f32 {
    state
        .rng
        .choose(&PLATFORM_TILE_WIDTHS)
        .copied()
        .unwrap_or(PLATFORM_TILE_WIDTHS[0])
}

/// Starting layout: the ground platform plus the fixed platform list
pub fn seed_layout(state: &mut GameState) {
    let width = tile_width(state);
    let ground = add_platform(state, 0.0, HEIGHT - PLATFORM_HEIGHT, width);
    state.ground_id = Some(ground);

    for &(x, y) in PLATFORM_LAYOUT.iter() {
        let width = tile_width(state);
        add_platform(state, x, y, width);
    }
}

/// Spawn platforms above the screen until the minimum count is reached
pub fn top_up_platforms(state: &mut GameState) {
    while state.platforms.len() < state.tuning.min_platforms {
        let width = state.rng.range(50, 100) as f32;
        let x = state.rng.range(0, (WIDTH - width) as i32) as f32;
        let y = state.rng.range(-75, -30) as f32;
        let id = add_platform(state, x, y, width);
        log::debug!("Platform {} spawned at ({}, {}) width {}", id, x, y, width);
    }
}

/// Spawn a mob once the (jittered) interval has elapsed
pub fn maybe_spawn_mob(state: &mut GameState) -> bool {
    let jitter = state
        .rng
        .choose(&state.tuning.mob_jitter_ms)
        .copied()
        .unwrap_or(0.0);
    let elapsed_ms = ticks_to_ms(state.time_ticks.saturating_sub(state.last_mob_tick));
    if elapsed_ms <= state.tuning.mob_interval_ms + jitter {
        return false;
    }

    state.last_mob_tick = state.time_ticks;
    spawn_mob(state);
    true
}

/// Spawn a mob at a random edge
pub fn spawn_mob(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let from_left = state.rng.coin();
    let speed = state
        .rng
        .range(state.tuning.mob_speed_min, state.tuning.mob_speed_max) as f32;
    state.mobs.push(Mob::new(id, from_left, speed));
    log::debug!(
        "Mob {} spawned from the {} (speed {})",
        id,
        if from_left { "left" } else { "right" },
        speed
    );
    id
}

/// Roll for a background cloud
pub fn maybe_spawn_cloud(state: &mut GameState) -> bool {
    if !state.rng.percent(state.tuning.cloud_chance) {
        return false;
    }

    let id = state.next_entity_id();
    let scale = state.rng.range(50, 100) as f32 / 100.0;
    let w = CLOUD_WIDTH * scale;
    let h = CLOUD_HEIGHT * scale;
    let x = state.rng.range(w as i32, (WIDTH - w) as i32) as f32;
    let y = state.rng.range(-500, -50) as f32;
    state.clouds.push(Cloud {
        id,
        rect: Rect::new(x, y, w, h),
        scale,
    });
    true
}
