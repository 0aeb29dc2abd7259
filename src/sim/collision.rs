//! Collision queries between the player and the world
//!
//! Sprites are irregular, so mob contact uses hitboxes shrunk from the
//! sprite bounds. Platforms and power-ups use their full rectangles.

use super::geometry::Rect;
use super::state::{Mob, Platform, Player, Powerup};

/// Player hitbox shrink (x, y) for mob contact
pub const PLAYER_HITBOX_INSET: (f32, f32) = (10.0, 6.0);
/// Mob hitbox shrink (x, y). Contact needs |dx| < 40 and |dy| < 64 between
/// centres, inside the 60x80 sprite overlap.
pub const MOB_HITBOX_INSET: (f32, f32) = (10.0, 10.0);

/// Indices of platforms overlapping `rect`, in collection order
pub fn overlapping_platforms(rect: &Rect, platforms: &[Platform]) -> Vec<usize> {
    platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| rect.intersects(&p.rect))
        .map(|(i, _)| i)
        .collect()
}

/// Among overlapping platforms, the one lowest on screen (first wins ties)
pub fn lowest_platform(hits: &[usize], platforms: &[Platform]) -> Option<usize> {
    let mut lowest: Option<usize> = None;
    for &i in hits {
        match lowest {
            Some(l) if platforms[i].rect.bottom() <= platforms[l].rect.bottom() => {}
            _ => lowest = Some(i),
        }
    }
    lowest
}

/// Platform the player should land on this tick, if any
pub fn landing_target(player: &Player, platforms: &[Platform]) -> Option<usize> {
    if player.boosted || player.vel.y < 0.0 {
        return None;
    }
    let hits = overlapping_platforms(&player.rect, platforms);
    let lowest = lowest_platform(&hits, platforms)?;
    let rect = &platforms[lowest].rect;
    (rect.spans_x(player.pos.x) && player.pos.y < rect.centery()).then_some(lowest)
}

/// First mob touching the player
pub fn touching_mob(player: &Player, mobs: &[Mob]) -> Option<u32> {
    let body = player
        .rect
        .inset(PLAYER_HITBOX_INSET.0, PLAYER_HITBOX_INSET.1);
    mobs.iter()
        .find(|m| {
            body.intersects(&m.rect.inset(MOB_HITBOX_INSET.0, MOB_HITBOX_INSET.1))
        })
        .map(|m| m.id)
}

/// Indices of power-ups overlapping the player
pub fn touching_powerups(player: &Player, powerups: &[Powerup]) -> Vec<usize> {
    powerups
        .iter()
        .enumerate()
        .filter(|(_, pu)| player.rect.intersects(&pu.rect))
        .map(|(i, _)| i)
        .collect()
}
