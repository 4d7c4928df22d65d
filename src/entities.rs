/// Game entity types. Plain data; the rules live in `compute`.
///
/// Rules that mutate these types live in `compute`; the bullet ring buffer
/// lives in `pool`.

use serde::Serialize;

use crate::config::Config;
use crate::pool::BulletPool;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units. `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict intersection: touching edges do not count, the shared area
    /// must be non-zero.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Which sprite the renderer should pick for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Facing {
    Idle,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub rect: Rect,
    /// Seconds until the next shot is allowed. Never negative.
    pub shooting_cooldown: f32,
    /// Horizontal speed in units per second (negative = leftward).
    pub velocity: f32,
}

impl Player {
    pub fn facing(&self) -> Facing {
        if self.velocity < 0.0 {
            Facing::Left
        } else if self.velocity > 0.0 {
            Facing::Right
        } else {
            Facing::Idle
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Sprite family; does not affect scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Squid,
    Crab,
    Octopus,
}

impl EnemyKind {
    /// Classic arrangement: one row of squids, two of crabs, octopuses below.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => EnemyKind::Squid,
            1 | 2 => EnemyKind::Crab,
            _ => EnemyKind::Octopus,
        }
    }
}

/// One slot of the formation grid. Dead enemies keep their slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Enemy {
    pub rect: Rect,
    pub alive: bool,
    pub kind: EnemyKind,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical speed in units per second. Negative travels up (player shot),
    /// positive travels down (enemy shot).
    pub velocity: f32,
    pub active: bool,
}

impl Bullet {
    /// Owner implied by the direction of travel.
    pub fn owner(&self) -> BulletOwner {
        if self.velocity < 0.0 {
            BulletOwner::Player
        } else {
            BulletOwner::Enemy
        }
    }
}

// ── Barriers ──────────────────────────────────────────────────────────────────

/// Number of hits that take a barrier from `New` to `Destroyed`.
pub const DAMAGE_STEPS: u8 = 3;

/// Barrier damage ladder. Ordered, only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DamageLevel {
    #[default]
    New,
    SmallDamage,
    HardDamage,
    Destroyed,
}

impl DamageLevel {
    /// The level one hit later; `Destroyed` stays `Destroyed`.
    pub fn next(self) -> Self {
        match self {
            DamageLevel::New => DamageLevel::SmallDamage,
            DamageLevel::SmallDamage => DamageLevel::HardDamage,
            DamageLevel::HardDamage | DamageLevel::Destroyed => DamageLevel::Destroyed,
        }
    }

    /// Hits taken so far, `0..=DAMAGE_STEPS`.
    pub fn hits(self) -> u8 {
        match self {
            DamageLevel::New => 0,
            DamageLevel::SmallDamage => 1,
            DamageLevel::HardDamage => 2,
            DamageLevel::Destroyed => DAMAGE_STEPS,
        }
    }

    pub fn is_destroyed(self) -> bool {
        self == DamageLevel::Destroyed
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Barrier {
    pub rect: Rect,
    pub damage: DamageLevel,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Side effects for the shell to turn into sound or visual cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    ShotFired { owner: BulletOwner },
    /// Index into the formation grid (`row * columns + column`).
    EnemyKilled { index: usize },
    PlayerHit { lives_left: u32 },
    BarrierDamaged { index: usize, level: DamageLevel },
    GameOver { score: u32 },
    /// The last enemy of the formation died.
    FormationCleared { score: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    /// Lives ran out.
    GameOver,
    /// Formation wiped out.
    Won,
}

/// The entire game session. Every collection has a fixed length decided at
/// construction; nothing is allocated or freed while playing.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// Validated once by `Session::new`; read through `Session::config`.
    pub(crate) config: Config,
    pub player: Player,
    /// Row-major grid, `enemy_rows * enemy_columns` slots.
    pub enemies: Vec<Enemy>,
    pub bullets: BulletPool,
    /// Left to right.
    pub barriers: Vec<Barrier>,
    pub score: u32,
    pub lives: u32,
    /// Formation row due to step next.
    pub moving_row: usize,
    /// +1 moving right, -1 moving left.
    pub shift_direction: i32,
    /// Ticks simulated since the last full restart.
    pub frame_counter: u64,
    /// Enemy sprite frame, 0 or 1.
    pub animation_frame: usize,
    pub status: GameStatus,
}

impl Session {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Lost or won: nothing moves until a restart.
    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}
