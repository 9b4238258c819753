//! Game state and the entity registry
//!
//! `GameState` owns every entity collection. Components never hold on to
//! another component's collection; the tick hands them what they need.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::acid::AcidDroplet;
use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use super::snake::SkySnake;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused,
    /// The snake's last segment was shot
    Won,
    /// Player health reached zero
    Lost,
}

/// A static solid surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }

    /// Full-width floor along the bottom edge
    pub fn ground() -> Self {
        Self::new(
            0.0,
            SCREEN_HEIGHT - GROUND_THICKNESS,
            SCREEN_WIDTH,
            GROUND_THICKNESS,
        )
    }
}

/// Snake food. Also a (painful) foothold for the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub rect: Rect,
    pub alive: bool,
}

impl Food {
    pub fn at(center: Vec2) -> Self {
        Self {
            rect: Rect::square_at(center, FOOD_SIZE),
            alive: true,
        }
    }

    /// Somewhere on screen, at least `FOOD_SPAWN_MARGIN` from the edges
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let x = rng.random_range(FOOD_SPAWN_MARGIN..=SCREEN_WIDTH as i32 - FOOD_SPAWN_MARGIN);
        let y = rng.random_range(FOOD_SPAWN_MARGIN..=SCREEN_HEIGHT as i32 - FOOD_SPAWN_MARGIN);
        Self::at(Vec2::new(x as f32, y as f32))
    }
}

/// Slingshot charge (mouse held down)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Charge {
    pub charging: bool,
    pub power: f32,
    /// Last known aim point, for the trajectory preview
    pub aim: Option<Vec2>,
}

impl Charge {
    pub fn begin(&mut self) {
        self.charging = true;
        self.power = 0.0;
    }

    /// Ramp power; call once per tick
    pub fn ramp(&mut self) {
        if self.charging {
            self.power = (self.power + CHARGE_RATE).min(MAX_CHARGE);
        }
    }

    /// Stop charging and hand back the accumulated power
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        self.charging = false;
        Some(self.power)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub charge: Charge,
    pub player: Player,
    pub snake: SkySnake,
    pub platforms: Vec<Platform>,
    pub food: Vec<Food>,
    pub acid: Vec<AcidDroplet>,
    pub projectiles: Vec<Projectile>,
    /// Set by a quit command; the runner stops after this tick
    pub quit_requested: bool,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            charge: Charge::default(),
            player: Player::new(),
            snake: SkySnake::new(),
            platforms: Vec::new(),
            food: Vec::new(),
            acid: Vec::new(),
            projectiles: Vec::new(),
            quit_requested: false,
        };
        state.populate();
        state
    }

    /// Ground plus the starting food
    fn populate(&mut self) {
        self.platforms.push(Platform::ground());
        for _ in 0..FOOD_COUNT {
            let food = Food::random(&mut self.rng);
            self.food.push(food);
        }
    }

    /// Rebuild the player, the snake and all transient collections. The RNG
    /// keeps running so a restarted session does not replay the last one.
    pub fn restart(&mut self) {
        log::info!("Restarting session (seed {})", self.seed);
        self.player = Player::new();
        self.snake = SkySnake::new();
        self.platforms.clear();
        self.food.clear();
        self.acid.clear();
        self.projectiles.clear();
        self.charge = Charge::default();
        self.populate();
        self.set_phase(GamePhase::Running);
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Game phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub fn spawn_food(&mut self) {
        let food = Food::random(&mut self.rng);
        self.food.push(food);
    }

    /// Remove everything flagged dead during the tick
    pub fn sweep(&mut self) {
        self.food.retain(|f| f.alive);
        self.acid.retain(|a| a.alive);
        self.projectiles.retain(|p| p.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.platforms, vec![Platform::ground()]);
        assert_eq!(state.food.len(), FOOD_COUNT);
        assert!(state.acid.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_food_spawns_inside_margin() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            let c = Food::random(&mut rng).rect.center();
            assert!(c.x >= 50.0 && c.x <= SCREEN_WIDTH - 50.0);
            assert!(c.y >= 50.0 && c.y <= SCREEN_HEIGHT - 50.0);
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_charge_ramps_to_cap() {
        let mut charge = Charge::default();
        charge.ramp();
        assert_eq!(charge.power, 0.0);

        charge.begin();
        for _ in 0..10 {
            charge.ramp();
        }
        assert_eq!(charge.power, 40.0);
        for _ in 0..100 {
            charge.ramp();
        }
        assert_eq!(charge.power, MAX_CHARGE);
        assert_eq!(charge.release(), Some(MAX_CHARGE));
        assert_eq!(charge.release(), None);
    }

    #[test]
    fn test_sweep_removes_dead() {
        let mut state = GameState::new(3);
        state.food[0].alive = false;
        state.acid.push(AcidDroplet::new(Vec2::new(10.0, 10.0)));
        state.acid[0].destroy();
        state.sweep();
        assert_eq!(state.food.len(), FOOD_COUNT - 1);
        assert!(state.acid.is_empty());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(5);
        state.player.health = 0.0;
        state.snake.shrink();
        state.acid.push(AcidDroplet::new(Vec2::new(10.0, 10.0)));
        state.phase = GamePhase::Lost;

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.snake.segments.len(), SNAKE_START_SEGMENTS);
        assert!(state.acid.is_empty());
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.food.len(), FOOD_COUNT);
    }
}
