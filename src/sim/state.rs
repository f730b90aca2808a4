//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], owned by the
//! caller and handed to every operation by reference.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::input::InputLatch;
use crate::Settings;

/// One half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing toward this side (-1 left, +1 right)
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// CPU difficulty tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "med" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Top-level game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Menu: choose one or two players
    SelectingPlayers,
    /// Menu: choose CPU difficulty (one-player only)
    SelectingDifficulty,
    /// Match running; the ball may or may not be in play
    Active { paused: bool },
    /// A side reached the win score; only reset leaves this phase
    Won { side: Side },
}

/// A paddle (top edge at `y`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

impl Paddle {
    pub fn new(side: Side, settings: &Settings) -> Self {
        Self {
            side,
            x: settings.paddle_x(side),
            y: settings.centered_paddle_y(),
            score: 0,
        }
    }

    pub fn center_y(&self, settings: &Settings) -> f32 {
        self.y + settings.paddle.height / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Target magnitude of `vel` (base speed times multiplier)
    pub speed: f32,
    /// Speed floor, ratcheted up by paddle hits
    pub base_speed: f32,
    /// Stacked power-up boost, reset by any collision
    pub power_up_multiplier: f32,
    pub in_play: bool,
}

impl Ball {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: settings.center(),
            vel: Vec2::ZERO,
            speed: settings.ball.start_speed,
            base_speed: settings.ball.start_speed,
            power_up_multiplier: 1.0,
            in_play: false,
        }
    }

    /// Take the ball out of play, back at center with default speeds
    pub fn stop(&mut self, settings: &Settings) {
        *self = Self::new(settings);
    }

    /// Drop any power-up boost and return `vel` to the base speed
    pub fn clear_boost(&mut self) {
        self.power_up_multiplier = 1.0;
        self.speed = self.base_speed;
        self.vel = crate::rescale_velocity(self.vel, self.speed);
    }

    /// Stack a boost factor on top of the current multiplier
    pub fn apply_boost(&mut self, factor: f32) {
        self.power_up_multiplier *= factor;
        self.speed = self.base_speed * self.power_up_multiplier;
        self.vel = crate::rescale_velocity(self.vel, self.speed);
    }
}

/// Trail sample for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Seconds since the sample was taken
    pub age: f32,
}

/// Bounded FIFO of recent ball positions (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a fresh sample, evicting the oldest beyond capacity
    pub fn record(&mut self, pos: Vec2) {
        self.points.push_back(TrailPoint { pos, age: 0.0 });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn age_all(&mut self, dt: f32) {
        for point in &mut self.points {
            point.age += dt;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}

/// A speed pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
    pub speed_boost: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    /// Side driven by the CPU; `None` in two-player mode
    pub cpu_side: Option<Side>,
    pub difficulty: Difficulty,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub trail: Trail,
    /// Active pickups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    pub input: InputLatch,
    /// Attract mode: the CPU also drives the human side(s)
    pub autopilot: bool,
    /// Side that scored the most recent point, until the next serve
    pub last_scorer: Option<Side>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session at the player-selection menu
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            left: Paddle::new(Side::Left, &settings),
            right: Paddle::new(Side::Right, &settings),
            ball: Ball::new(&settings),
            trail: Trail::new(settings.trail_length),
            power_ups: Vec::with_capacity(settings.power_ups.max_active),
            seed,
            phase: Phase::SelectingPlayers,
            cpu_side: Some(Side::Left),
            difficulty: Difficulty::default(),
            input: InputLatch::default(),
            autopilot: false,
            last_scorer: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.paddle(side).score
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Won { side } => Some(side),
            _ => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Active { paused: true })
    }

    /// Whether paddles (and the ball, if in play) advance this tick
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Active { paused: false } | Phase::Won { .. })
    }

    /// Is this side steered by the CPU this tick?
    pub fn is_cpu_controlled(&self, side: Side) -> bool {
        self.autopilot || self.cpu_side == Some(side)
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn center_paddles(&mut self) {
        let y = self.settings.centered_paddle_y();
        self.left.y = y;
        self.right.y = y;
    }

    /// Queue a notification for the audio collaborator
    ///
    /// The queue holds at most `MAX_PENDING_EVENTS`; the oldest entry is
    /// dropped when a consumer never drains it.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= crate::consts::MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand all pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
