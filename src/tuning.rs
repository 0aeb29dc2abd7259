//! Game balance tuning
//!
//! Loaded from a JSON file when one is supplied; any missing field falls back
//! to the built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Data-driven balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Horizontal acceleration while a direction is held
    pub run_accel: f32,
    /// Horizontal speeds below this snap to zero
    pub stiction: f32,
    /// Upward velocity added by a jump
    pub jump_impulse: f32,
    /// Upward speed cap applied when jump is released early
    pub jump_cut_speed: f32,
    /// Upward velocity set by a boost pickup
    pub boost_speed: f32,

    // === Spawning ===
    /// Minimum number of platforms kept alive
    pub min_platforms: usize,
    /// Chance (percent) a new platform carries a power-up
    pub powerup_chance: u32,
    /// Chance (percent) per scrolling tick to spawn a cloud
    pub cloud_chance: u32,
    /// Base time between mob spawns (ms)
    pub mob_interval_ms: f32,
    /// Jitter added to the mob interval on each check (ms)
    pub mob_jitter_ms: Vec<f32>,
    /// Horizontal mob speed range (inclusive, whole units)
    pub mob_speed_min: i32,
    pub mob_speed_max: i32,

    // === Round end ===
    /// Delay between touching a mob and game over (ms)
    pub death_delay_ms: f32,
    /// Ticks the player may stay below the screen before the round ends
    pub fall_grace_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            run_accel: 1.5,
            stiction: 0.1,
            jump_impulse: 25.0,
            jump_cut_speed: 10.0,
            boost_speed: 60.0,

            min_platforms: 6,
            powerup_chance: 2,
            cloud_chance: 2,
            mob_interval_ms: 5000.0,
            mob_jitter_ms: vec![-1000.0, -500.0, 0.0, 500.0, 1000.0],
            mob_speed_min: 2,
            mob_speed_max: 4,

            death_delay_ms: 200.0,
            fall_grace_ticks: 120,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would make the generators misbehave
    fn sanitize(&mut self) {
        if self.mob_jitter_ms.is_empty() {
            self.mob_jitter_ms.push(0.0);
        }
        if self.mob_speed_max < self.mob_speed_min {
            std::mem::swap(&mut self.mob_speed_min, &mut self.mob_speed_max);
        }
        self.powerup_chance = self.powerup_chance.min(100);
        self.cloud_chance = self.cloud_chance.min(100);
    }

    /// Death delay expressed in ticks
    pub fn death_delay_ticks(&self) -> u64 {
        crate::ms_to_ticks(self.death_delay_ms)
    }
}
