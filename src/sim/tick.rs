//! Fixed timestep simulation tick
//!
//! Core game loop. Step order matters: landing reads the position the
//! kinematics just produced, scrolling reads the landing result, and the
//! platform top-up runs before the fall check.

use super::autopilot;
use super::collision::{landing_target, touching_mob, touching_powerups};
use super::player::MoveIntent;
use super::spawn;
use super::state::{GamePhase, GameState, PlatformMode, PowerupKind};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Jump key went up this tick
    pub jump_released: bool,
    /// Ground-surface mode request (honoured only on the ground platform)
    pub select_mode: Option<PlatformMode>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Any intent at all (used to dismiss the mode hint)
    pub fn is_active(&self) -> bool {
        self.left || self.right || self.jump_pressed || self.jump_released
            || self.select_mode.is_some()
    }

    fn intent(&self) -> MoveIntent {
        MoveIntent {
            left: self.left,
            right: self.right,
            jump_pressed: self.jump_pressed,
            jump_released: self.jump_released,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    // Touched a mob: the world stays frozen until the delay runs out
    if let Some(deadline) = state.death_at {
        state.time_ticks += 1;
        if state.time_ticks >= deadline {
            state.game_over("hit by mob");
        }
        return;
    }

    let input = if input.idle_mode {
        autopilot::drive(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    if input.is_active() {
        state.show_mode_hint = false;
    }
    if let Some(mode) = input.select_mode {
        state.select_mode(mode);
    }

    // Player kinematics
    let friction = state.mode.friction();
    state
        .player
        .update(input.intent(), friction, &state.tuning, &state.platforms);

    update_entities(state);

    if spawn::maybe_spawn_mob(state) {
        log::debug!("{} mobs alive", state.mobs.len());
    }

    // 1. Mob contact ends the round after a short delay
    if let Some(mob_id) = touching_mob(&state.player, &state.mobs) {
        let delay = state.tuning.death_delay_ticks();
        log::info!("Player hit mob {} at tick {}", mob_id, state.time_ticks);
        state.death_at = Some(state.time_ticks + delay);
        return;
    }

    // 2. Landing
    resolve_landing(state);

    // 3. Camera follows the player upward
    if state.player.rect.top() <= SCROLL_TRIGGER_Y {
        spawn::maybe_spawn_cloud(state);
        scroll_world(state);
    }

    // 4. Power-ups
    collect_powerups(state);

    // 5. Keep enough platforms around
    spawn::top_up_platforms(state);

    // 6. Player fell out of view
    if state.player.rect.bottom() > FALL_LINE_Y {
        state.fall_ticks += 1;
        scroll_after_fall(state);
    } else {
        state.fall_ticks = 0;
    }

    // 7. Terminal conditions
    if state.platforms.is_empty() {
        state.game_over("no platforms left");
    } else if state.fall_ticks > state.tuning.fall_grace_ticks {
        state.game_over("fell");
    }
}

/// Per-entity updates: mobs move, power-ups follow their platform, clouds expire
fn update_entities(state: &mut GameState) {
    for mob in &mut state.mobs {
        mob.update();
    }
    state.mobs.retain(|m| {
        let gone = m.is_gone();
        if gone {
            log::debug!("Mob {} left the screen", m.id);
        }
        !gone
    });

    state.drop_orphaned_powerups();
    let platforms = &state.platforms;
    for pu in &mut state.powerups {
        if let Some(platform) = platforms.iter().find(|p| p.id == pu.platform) {
            pu.anchor(&platform.rect);
        }
    }

    state.clouds.retain(|c| !c.is_gone());
}

/// Snap the player onto the platform under its feet
fn resolve_landing(state: &mut GameState) {
    if let Some(idx) = landing_target(&state.player, &state.platforms) {
        let top = state.platforms[idx].rect.top();
        let player = &mut state.player;
        player.jumping = false;
        player.pos.y = top;
        player.vel.y = 0.0;
    }
}

/// Move the world down while the player climbs, scoring platforms that leave
pub(crate) fn scroll_world(state: &mut GameState) {
    let delta = state.player.vel.y.abs().max(MIN_SCROLL);
    let cloud_delta = (state.player.vel.y / 2.0).abs().max(MIN_CLOUD_SCROLL);

    state.player.pos.y += delta;

    let increment = state.mode.score_increment();
    let before = state.platforms.len();
    for platform in &mut state.platforms {
        platform.rect.y += delta;
    }
    state.platforms.retain(|p| p.rect.top() <= HEIGHT);
    let passed = (before - state.platforms.len()) as u64;
    if passed > 0 {
        state.score += passed * increment;
        log::debug!("{} platforms passed, score {}", passed, state.score);
        state.drop_orphaned_powerups();
        forget_ground(state);
    }

    for mob in &mut state.mobs {
        mob.rect.y += delta;
    }
    for cloud in &mut state.clouds {
        cloud.rect.y += cloud_delta;
    }
}

/// Pick up any power-up the player touches
fn collect_powerups(state: &mut GameState) {
    let hits = touching_powerups(&state.player, &state.powerups);
    // Remove back to front so earlier indices stay valid
    for &idx in hits.iter().rev() {
        let pu = state.powerups.remove(idx);
        match pu.kind {
            PowerupKind::Boost => {
                let player = &mut state.player;
                player.boosted = true;
                player.vel.y = -state.tuning.boost_speed;
                player.jumping = false;
                log::debug!("Boost collected at tick {}", state.time_ticks);
            }
        }
    }
}

/// Pull everything up while the player drops below the screen
fn scroll_after_fall(state: &mut GameState) {
    let delta = state.player.vel.y.max(MIN_FALL_SCROLL);

    // Hitbox only; the position keeps falling
    state.player.rect.y -= delta;

    for platform in &mut state.platforms {
        platform.rect.y -= delta;
    }
    state.platforms.retain(|p| p.rect.bottom() >= 0.0);
    state.drop_orphaned_powerups();
    forget_ground(state);

    for pu in &mut state.powerups {
        pu.rect.y -= delta;
    }
    state.powerups.retain(|pu| pu.rect.bottom() >= 0.0);

    for mob in &mut state.mobs {
        mob.rect.y -= delta;
    }
    state.mobs.retain(|m| m.rect.bottom() >= 0.0);

    for cloud in &mut state.clouds {
        cloud.rect.y -= delta;
    }
    state.clouds.retain(|c| c.rect.bottom() >= 0.0);
}

/// Clear the ground handle once the ground platform is gone
fn forget_ground(state: &mut GameState) {
    if let Some(id) = state.ground_id {
        if state.platform(id).is_none() {
            log::debug!("Ground platform scrolled away");
            state.ground_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Cloud, Mob, Platform, Powerup};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Round without power-ups, so nothing launches the player unexpectedly
    fn fresh(seed: u64) -> GameState {
        let tuning = Tuning {
            powerup_chance: 0,
            ..Tuning::default()
        };
        GameState::with_seed(seed, tuning)
    }

    /// Round with no platforms or spawns in the way
    fn empty_world(seed: u64) -> GameState {
        let tuning = Tuning {
            powerup_chance: 0,
            cloud_chance: 0,
            ..Tuning::default()
        };
        let mut state = GameState::with_seed(seed, tuning);
        state.platforms.clear();
        state.powerups.clear();
        state.ground_id = None;
        state
    }

    fn push_platform(state: &mut GameState, x: f32, y: f32, w: f32) -> u32 {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            rect: Rect::new(x, y, w, PLATFORM_HEIGHT),
        });
        id
    }

    fn push_cloud(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.clouds.push(Cloud {
            id,
            rect: Rect::new(x, y, CLOUD_WIDTH, CLOUD_HEIGHT),
            scale: 1.0,
        });
        id
    }

    fn cloud(state: &GameState, id: u32) -> Option<&Cloud> {
        state.clouds.iter().find(|c| c.id == id)
    }

    fn place_player(state: &mut GameState, x: f32, y: f32) {
        state.player.pos = Vec2::new(x, y);
        state.player.vel = Vec2::ZERO;
        state.player.sync_rect();
    }

    #[test]
    fn test_first_tick_tops_up_platforms() {
        let mut state = fresh(12345);
        assert_eq!(state.platforms.len(), 5);
        tick(&mut state, &TickInput::default());
        assert!(state.platforms.len() >= 6);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_player_settles_on_ground() {
        let mut state = fresh(7);
        let ground = state.platform(state.ground_id.unwrap()).unwrap().rect;
        place_player(&mut state, ground.center().x, ground.top() - 30.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.pos.y, ground.top());
        assert_eq!(state.player.vel.y, 0.0);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_jump_off_ground() {
        let mut state = fresh(7);
        let ground = state.platform(state.ground_id.unwrap()).unwrap().rect;
        place_player(&mut state, ground.center().x, ground.top() - 30.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }

        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(state.player.jumping);
        tick(&mut state, &TickInput::default());
        assert!(state.player.pos.y < ground.top());
    }

    #[test]
    fn test_jump_in_air_ignored() {
        let mut state = empty_world(3);
        push_platform(&mut state, 0.0, 700.0, 100.0);
        place_player(&mut state, 300.0, 400.0);
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(!state.player.jumping);
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_boost_overrides_landing() {
        let mut state = empty_world(3);
        push_platform(&mut state, 100.0, 500.0, 200.0);
        place_player(&mut state, 200.0, 505.0);
        state.player.vel.y = 2.0;
        state.player.boosted = true;
        tick(&mut state, &TickInput::default());
        assert!(state.player.boosted);
        assert!(state.player.pos.y > 505.0);
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_score_accrual_three_platforms() {
        let mut state = empty_world(3);
        for x in [0.0, 150.0, 300.0] {
            push_platform(&mut state, x, HEIGHT - 2.0, 100.0);
        }
        // High enough to trigger the camera scroll
        place_player(&mut state, 240.0, 150.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 30);
        assert!(state.platforms.len() >= 6);
    }

    #[test]
    fn test_score_increment_follows_mode() {
        let mut state = empty_world(3);
        state.mode = PlatformMode::Snow;
        push_platform(&mut state, 0.0, HEIGHT - 2.0, 100.0);
        place_player(&mut state, 240.0, 150.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_scroll_moves_world_down() {
        let mut state = empty_world(3);
        let id = push_platform(&mut state, 0.0, 300.0, 100.0);
        state.mobs.push(Mob::new(99, true, 2.0));
        let mob_y = state.mobs[0].rect.y;
        place_player(&mut state, 240.0, 150.0);
        state.player.vel.y = -12.0;

        scroll_world(&mut state);
        assert_eq!(state.platform(id).unwrap().rect.y, 312.0);
        assert_eq!(state.mobs[0].rect.y, mob_y + 12.0);
        assert_eq!(state.player.pos.y, 162.0);
    }

    #[test]
    fn test_scroll_has_floor() {
        let mut state = empty_world(3);
        let id = push_platform(&mut state, 0.0, 300.0, 100.0);
        place_player(&mut state, 240.0, 150.0);
        state.player.vel.y = -1.0;
        scroll_world(&mut state);
        assert_eq!(state.platform(id).unwrap().rect.y, 300.0 + MIN_SCROLL);
    }

    #[test]
    fn test_clouds_scroll_at_half_speed() {
        let mut state = empty_world(3);
        let pid = push_platform(&mut state, 0.0, 300.0, 100.0);
        let cid = push_cloud(&mut state, 100.0, -100.0);
        place_player(&mut state, 240.0, 150.0);

        state.player.vel.y = -12.0;
        scroll_world(&mut state);
        assert_eq!(state.platform(pid).unwrap().rect.y, 312.0);
        assert_eq!(cloud(&state, cid).unwrap().rect.y, -94.0);

        // Slow climb still drifts clouds by the floor
        state.player.vel.y = -1.0;
        scroll_world(&mut state);
        assert_eq!(cloud(&state, cid).unwrap().rect.y, -94.0 + MIN_CLOUD_SCROLL);
    }

    #[test]
    fn test_clouds_despawn_past_fixed_line() {
        let mut state = empty_world(3);
        push_platform(&mut state, 0.0, 300.0, 100.0);
        // Below the screen but not past the despawn line
        let below_screen = push_cloud(&mut state, 100.0, HEIGHT + 100.0);
        let on_line = push_cloud(&mut state, 100.0, CLOUD_DESPAWN_Y);
        let past_line = push_cloud(&mut state, 100.0, CLOUD_DESPAWN_Y + 0.5);
        place_player(&mut state, 240.0, 500.0);

        tick(&mut state, &TickInput::default());
        assert!(cloud(&state, below_screen).is_some());
        assert!(cloud(&state, on_line).is_some());
        assert!(cloud(&state, past_line).is_none());
    }

    #[test]
    fn test_clouds_spawn_only_while_scrolling() {
        let tuning = Tuning {
            powerup_chance: 0,
            cloud_chance: 100,
            ..Tuning::default()
        };
        let mut state = GameState::with_seed(3, tuning);
        state.platforms.clear();
        state.ground_id = None;
        push_platform(&mut state, 0.0, 600.0, 100.0);

        // Top of the player well below the scroll line
        place_player(&mut state, 240.0, 500.0);
        tick(&mut state, &TickInput::default());
        assert!(state.clouds.is_empty());

        place_player(&mut state, 240.0, 150.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.clouds.len(), 1);
    }

    #[test]
    fn test_boost_pickup() {
        let mut state = empty_world(3);
        let pid = push_platform(&mut state, 150.0, 500.0, 100.0);
        let pu_id = state.next_entity_id();
        let pu = Powerup::new(pu_id, PowerupKind::Boost, state.platform(pid).unwrap());
        let target = pu.rect.center();
        state.powerups.push(pu);

        // Player hovering in the power-up, still falling slowly
        place_player(&mut state, target.x, target.y + 20.0);
        tick(&mut state, &TickInput::default());

        assert!(state.powerups.is_empty());
        assert!(state.player.boosted);
        assert_eq!(state.player.vel.y, -state.tuning.boost_speed);
        assert!(!state.player.jumping);
        assert!(state.platform(pid).is_some());

        // Rising on its own the next tick clears the boost flag
        tick(&mut state, &TickInput::default());
        assert!(!state.player.boosted);
    }

    #[test]
    fn test_powerup_removed_with_platform() {
        let mut state = empty_world(3);
        let pid = push_platform(&mut state, 0.0, HEIGHT - 2.0, 100.0);
        let pu_id = state.next_entity_id();
        let pu = Powerup::new(pu_id, PowerupKind::Boost, state.platform(pid).unwrap());
        state.powerups.push(pu);
        place_player(&mut state, 400.0, 150.0);
        tick(&mut state, &TickInput::default());
        assert!(state.platform(pid).is_none());
        assert!(state.powerups.iter().all(|pu| pu.id != pu_id));
    }

    #[test]
    fn test_mob_hit_defers_game_over() {
        let mut state = fresh(5);
        let player = state.player.rect;
        let mut mob = Mob::new(77, true, 0.0);
        mob.rect.x = player.x;
        mob.rect.y = player.y;
        state.mobs.push(mob);

        tick(&mut state, &TickInput::default());
        assert!(state.is_dying());
        assert_eq!(state.phase, GamePhase::Playing);

        let frozen = state.player.pos;
        let delay = state.tuning.death_delay_ticks();
        for _ in 0..delay {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.pos, frozen);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score(), Some(0));
    }

    #[test]
    fn test_game_over_is_final() {
        let mut state = fresh(5);
        tick(&mut state, &TickInput::default());
        state.game_over("test");

        let pos = state.player.pos;
        let platforms = state.platforms.len();
        let ticks = state.time_ticks;
        for _ in 0..100 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    jump_pressed: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.platforms.len(), platforms);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_fall_ends_round() {
        let mut state = empty_world(3);
        place_player(&mut state, 240.0, HEIGHT + 50.0);
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default());
            if state.is_over() {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_fall_scroll_lifts_world() {
        let mut state = empty_world(3);
        let id = push_platform(&mut state, 0.0, 300.0, 100.0);
        place_player(&mut state, 240.0, HEIGHT + 50.0);
        state.player.vel.y = 4.0;
        scroll_after_fall(&mut state);
        assert_eq!(state.platform(id).unwrap().rect.y, 300.0 - MIN_FALL_SCROLL);
    }

    #[test]
    fn test_fall_scroll_drops_entities_above_screen() {
        let mut state = empty_world(3);
        let pid = push_platform(&mut state, 0.0, 300.0, 100.0);
        let doomed_platform = push_platform(&mut state, 0.0, 5.0 - PLATFORM_HEIGHT, 100.0);

        let mut doomed_pu = Powerup::new(90, PowerupKind::Boost, state.platform(pid).unwrap());
        doomed_pu.rect.y = 5.0 - POWERUP_HEIGHT;
        let mut kept_pu = Powerup::new(91, PowerupKind::Boost, state.platform(pid).unwrap());
        kept_pu.rect.y = 50.0 - POWERUP_HEIGHT;
        state.powerups.extend([doomed_pu, kept_pu]);

        let mut doomed_mob = Mob::new(92, true, 2.0);
        doomed_mob.rect.y = 5.0 - MOB_HEIGHT;
        let mut kept_mob = Mob::new(93, true, 2.0);
        kept_mob.rect.y = 0.0;
        state.mobs.extend([doomed_mob, kept_mob]);

        let doomed_cloud = push_cloud(&mut state, 100.0, 5.0 - CLOUD_HEIGHT);
        let kept_cloud = push_cloud(&mut state, 100.0, 0.0);

        place_player(&mut state, 240.0, HEIGHT + 50.0);
        state.player.vel.y = 4.0;
        scroll_after_fall(&mut state);

        assert!(state.platform(doomed_platform).is_none());
        assert_eq!(state.platform(pid).unwrap().rect.y, 300.0 - MIN_FALL_SCROLL);

        let pu_ids: Vec<u32> = state.powerups.iter().map(|pu| pu.id).collect();
        assert_eq!(pu_ids, vec![91]);
        assert_eq!(state.powerups[0].rect.bottom(), 50.0 - MIN_FALL_SCROLL);

        let mob_ids: Vec<u32> = state.mobs.iter().map(|m| m.id).collect();
        assert_eq!(mob_ids, vec![93]);
        assert_eq!(state.mobs[0].rect.y, -MIN_FALL_SCROLL);

        assert!(cloud(&state, doomed_cloud).is_none());
        assert_eq!(cloud(&state, kept_cloud).unwrap().rect.y, -MIN_FALL_SCROLL);
    }

    #[test]
    fn test_mode_select_on_ground_only() {
        let mut state = fresh(7);
        let ground = state.platform(state.ground_id.unwrap()).unwrap().rect;
        place_player(&mut state, ground.center().x, ground.top() - 30.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.show_mode_hint);

        tick(
            &mut state,
            &TickInput {
                select_mode: Some(PlatformMode::Snow),
                ..Default::default()
            },
        );
        assert_eq!(state.mode, PlatformMode::Snow);
        assert!(!state.show_mode_hint);

        place_player(&mut state, 240.0, 300.0);
        tick(
            &mut state,
            &TickInput {
                select_mode: Some(PlatformMode::Rock),
                ..Default::default()
            },
        );
        assert_eq!(state.mode, PlatformMode::Snow);
    }

    #[test]
    fn test_mob_spawns_after_interval() {
        let mut state = fresh(21);
        let ground = state.platform(state.ground_id.unwrap()).unwrap().rect;
        place_player(&mut state, ground.center().x, ground.top() - 30.0);
        // 7 seconds of standing still
        for _ in 0..420 {
            tick(&mut state, &TickInput::default());
            if !state.mobs.is_empty() || state.is_dying() {
                break;
            }
        }
        assert!(!state.mobs.is_empty() || state.is_dying());
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen_and_platforms_floor(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = fresh(seed);
            for (left, right, jump_pressed, jump_released) in inputs {
                let input = TickInput { left, right, jump_pressed, jump_released, ..Default::default() };
                tick(&mut state, &input);
                prop_assert!(state.player.pos.x >= EDGE_MARGIN);
                prop_assert!(state.player.pos.x <= WIDTH - EDGE_MARGIN);
                if state.phase == GamePhase::Playing && !state.is_dying() {
                    prop_assert!(state.platforms.len() >= state.tuning.min_platforms
                        || state.fall_ticks > 0);
                }
            }
        }

        #[test]
        fn prop_jump_cut_never_speeds_up(vel_y in -80.0f32..20.0, jumping in any::<bool>()) {
            let tuning = Tuning::default();
            let mut player = crate::sim::state::Player::default();
            player.vel.y = vel_y;
            player.jumping = jumping;
            player.jump_cut(&tuning);
            prop_assert!(player.vel.y >= vel_y);
            prop_assert!(player.vel.y == vel_y || player.vel.y == -tuning.jump_cut_speed);
        }
    }
}
