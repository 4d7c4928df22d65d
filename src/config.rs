/// Game configuration: every tunable number the simulation reads.
///
/// `Config::default()` is built from the constants in [`consts`]. A config
/// file only needs to name the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default values, in world units (pixels of an 800x800 playfield) and seconds.
pub mod consts {
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
    /// Horizontal margin the formation turns around at.
    pub const SCREEN_PADDING: f32 = 32.0;

    pub const ENEMY_ROWS: usize = 5;
    pub const ENEMY_COLUMNS: usize = 10;
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_SPACING: f32 = 20.0;
    /// Top edge of the first formation row.
    pub const FORMATION_TOP: f32 = 80.0;

    /// Ticks between two single-row formation steps.
    pub const ENEMY_MOVE_EVERY: u64 = 15;
    /// Ticks between two enemy shots.
    pub const ENEMY_FIRE_EVERY: u64 = 60;
    /// Ticks between enemy sprite frame flips.
    pub const ANIMATION_EVERY: u64 = 25;

    pub const BULLET_CAPACITY: usize = 10;
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 800.0;
    pub const ENEMY_BULLET_SPEED: f32 = 400.0;

    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Gap between the player's bottom edge and the bottom of the screen.
    pub const PLAYER_BOTTOM_MARGIN: f32 = 8.0;
    /// Seconds between two player shots.
    pub const SHOOT_DELAY: f32 = 0.3;

    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 70.0;
    pub const BARRIER_HEIGHT: f32 = 50.0;
    pub const BARRIER_TOP: f32 = 600.0;

    pub const STARTING_LIVES: u32 = 3;
    pub const SCORE_PER_KILL: u32 = 100;
}

use consts::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub screen_padding: f32,

    pub enemy_rows: usize,
    pub enemy_columns: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_spacing: f32,
    pub formation_top: f32,

    pub enemy_move_every: u64,
    pub enemy_fire_every: u64,
    pub animation_every: u64,

    pub bullet_capacity: usize,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_margin: f32,
    pub shoot_delay: f32,

    pub barrier_count: usize,
    pub barrier_width: f32,
    pub barrier_height: f32,
    pub barrier_top: f32,

    pub starting_lives: u32,
    pub score_per_kill: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            screen_padding: SCREEN_PADDING,
            enemy_rows: ENEMY_ROWS,
            enemy_columns: ENEMY_COLUMNS,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_spacing: ENEMY_SPACING,
            formation_top: FORMATION_TOP,
            enemy_move_every: ENEMY_MOVE_EVERY,
            enemy_fire_every: ENEMY_FIRE_EVERY,
            animation_every: ANIMATION_EVERY,
            bullet_capacity: BULLET_CAPACITY,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            shoot_delay: SHOOT_DELAY,
            barrier_count: BARRIER_COUNT,
            barrier_width: BARRIER_WIDTH,
            barrier_height: BARRIER_HEIGHT,
            barrier_top: BARRIER_TOP,
            starting_lives: STARTING_LIVES,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl Config {
    /// Total number of enemy slots in the formation.
    pub fn enemy_count(&self) -> usize {
        self.enemy_rows * self.enemy_columns
    }

    /// Width of the formation as laid out at session start.
    pub fn formation_width(&self) -> f32 {
        let columns = self.enemy_columns as f32;
        columns * self.enemy_width + (columns - 1.0).max(0.0) * self.enemy_spacing
    }

    pub fn formation_height(&self) -> f32 {
        let rows = self.enemy_rows as f32;
        rows * self.enemy_height + (rows - 1.0).max(0.0) * self.enemy_spacing
    }

    /// Reject any configuration the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_rows == 0 || self.enemy_columns == 0 {
            return Err(ConfigError::EmptyFormation {
                rows: self.enemy_rows,
                columns: self.enemy_columns,
            });
        }
        if self.bullet_capacity == 0 {
            return Err(ConfigError::ZeroBulletCapacity);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroStartingLives);
        }

        let cadences = [
            ("enemy_move_every", self.enemy_move_every),
            ("enemy_fire_every", self.enemy_fire_every),
            ("animation_every", self.animation_every),
        ];
        for (field, value) in cadences {
            if value == 0 {
                return Err(ConfigError::ZeroCadence { field });
            }
        }

        let positives = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("player_bullet_speed", self.player_bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("barrier_width", self.barrier_width),
            ("barrier_height", self.barrier_height),
        ];
        for (field, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        // Zero is fine for these, negative or NaN is not.
        let non_negatives = [
            ("screen_padding", self.screen_padding),
            ("enemy_spacing", self.enemy_spacing),
            ("formation_top", self.formation_top),
            ("player_bottom_margin", self.player_bottom_margin),
            ("shoot_delay", self.shoot_delay),
            ("barrier_top", self.barrier_top),
        ];
        for (field, value) in non_negatives {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let available = self.screen_width - 2.0 * self.screen_padding;
        let needed = self.formation_width();
        if needed > available {
            return Err(ConfigError::FormationTooWide { needed, available });
        }

        let needed = self.formation_top + self.formation_height();
        if needed > self.screen_height {
            return Err(ConfigError::FormationTooTall {
                needed,
                available: self.screen_height,
            });
        }

        Ok(())
    }
}
