//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; the presentation layer
//! only ever reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use crate::HighScore;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu shown, no simulation
    Start,
    /// Active gameplay
    Playing,
    /// Simulation frozen, overlay shown
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// pH reached zero
    Dissolved,
    /// Touched the lava floor
    Fell,
}

/// Coin types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinKind {
    /// Raises pH and score (drawn white)
    Limestone,
    /// Lowers pH and score (drawn gray)
    HeavyMetal,
}

/// Notable things that happened during a tick, drained by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    CoinCollected { kind: CoinKind },
    GameOver {
        cause: GameOverCause,
        score: i64,
        new_high_score: bool,
    },
    SessionReset,
}

/// Visible extent of the world in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Which character image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteFrame {
    Idle,
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Walk cycle length in ticks (two frames of ten ticks each)
const WALK_CYCLE_TICKS: u32 = 20;

/// The water droplet
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner in world coordinates
    pub pos: Vec2,
    /// x is the realized horizontal delta of the last tick (facing only)
    pub vel: Vec2,
    pub size: Vec2,
    /// In the air since the last jump; blocks a second jump
    pub airborne: bool,
    /// Touched the floor or a platform this tick
    pub grounded: bool,
    pub score: i64,
    /// Ticks spent walking on solid ground (cosmetic)
    pub walk_ticks: u32,
}

impl Player {
    /// Fresh player at the spawn point
    pub fn spawn(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(tuning.spawn_x, viewport.height - tuning.spawn_height),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            airborne: false,
            grounded: false,
            score: 0,
            walk_ticks: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Place the player so its feet rest on `top`
    pub fn stand_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
    }

    /// Advance or restart the walk cycle
    pub fn advance_walk_cycle(&mut self, walking: bool) {
        if self.airborne || !walking {
            self.walk_ticks = 0;
        } else {
            self.walk_ticks = self.walk_ticks.wrapping_add(1);
        }
    }

    pub fn sprite_frame(&self) -> SpriteFrame {
        if self.airborne || self.walk_ticks % WALK_CYCLE_TICKS < WALK_CYCLE_TICKS / 2 {
            SpriteFrame::Idle
        } else {
            SpriteFrame::Step
        }
    }

    pub fn facing(&self) -> Facing {
        if self.vel.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// A static platform
#[derive(Debug, Clone)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Coins have already been spawned on this platform
    pub coins_generated: bool,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            pos,
            size,
            color,
            coins_generated: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub kind: CoinKind,
    /// Spin angle in radians (cosmetic)
    pub spin: f32,
}

/// Spin speed in radians per tick
const COIN_SPIN_RATE: f32 = 0.1;

impl Coin {
    pub fn new(pos: Vec2, radius: f32, kind: CoinKind) -> Self {
        Self {
            pos,
            radius,
            kind,
            spin: 0.0,
        }
    }

    pub fn advance_spin(&mut self) {
        self.spin += COIN_SPIN_RATE;
        if self.spin >= std::f32::consts::TAU {
            self.spin = 0.0;
        }
    }

    /// Horizontal radius of the spinning ellipse
    pub fn apparent_width(&self) -> f32 {
        self.radius * (1.0 - 0.5 * self.spin.sin().abs())
    }
}

/// World pH, stored in tenths so repeated ±0.1 steps stay exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhLevel(u32);

impl PhLevel {
    pub fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub fn tenths(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f32 {
        self.0 as f32 / 10.0
    }

    pub fn raise(&mut self, tenths: u32) {
        self.0 = self.0.saturating_add(tenths);
    }

    /// Lower, clamping at zero
    pub fn lower(&mut self, tenths: u32) {
        self.0 = self.0.saturating_sub(tenths);
    }

    pub fn is_depleted(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for PhLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Horizontal scroll offset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Center on the player, never scrolling left of the world origin
    pub fn follow(&mut self, player_x: f32, viewport_width: f32) {
        self.x = (player_x - viewport_width / 2.0).max(0.0);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Ticks played in the current session
    pub time_ticks: u64,
    pub player: Player,
    /// Sorted by ascending x
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub ph: PhLevel,
    pub camera: Camera,
    pub high_score: HighScore,
    /// Ticks since the session ended (drives the explosion sprite)
    pub explosion_ticks: u32,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the start screen
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&tuning, viewport),
            ph: PhLevel::from_tenths(tuning.start_ph_tenths),
            tuning,
            viewport,
            phase: GamePhase::Start,
            time_ticks: 0,
            platforms: Vec::new(),
            coins: Vec::new(),
            camera: Camera::default(),
            high_score: HighScore::new(),
            explosion_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Put the session back to its initial values (keeps phase, RNG and high score)
    pub fn reset_session(&mut self) {
        self.player = Player::spawn(&self.tuning, self.viewport);
        self.ph = PhLevel::from_tenths(self.tuning.start_ph_tenths);
        self.camera = Camera::default();
        self.time_ticks = 0;
        self.platforms.clear();
        self.coins.clear();
        self.explosion_ticks = 0;
    }

    /// Screen y of the lava floor surface
    pub fn floor_line(&self) -> f32 {
        self.viewport.height - self.tuning.floor_height
    }

    /// Highest allowed platform top
    pub fn global_min_height(&self) -> f32 {
        self.viewport.height / 2.0
    }

    /// Lowest allowed platform top
    pub fn global_max_height(&self) -> f32 {
        self.viewport.height - self.tuning.max_height_margin
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the explosion should still be drawn
    pub fn explosion_visible(&self) -> bool {
        self.phase == GamePhase::GameOver && self.explosion_ticks < self.tuning.explosion_ticks
    }
}
