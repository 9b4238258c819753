//! Fixed timestep simulation tick
//!
//! Runs every component once per tick in a fixed order:
//! player, snake, acid, projectiles. Entities destroyed along the way are
//! only flagged; the sweep at the end of the tick removes them.

use glam::Vec2;

use super::player::PlayerControls;
use super::projectile::AmmoType;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Cheat keys for testing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugCommand {
    /// Top one ammo type up to `DEBUG_AMMO_REFILL`
    RefillAmmo(AmmoType),
    Heal,
    GrowSnake,
    ShrinkSnake,
    SpawnFood,
    SpeedUpSnake,
    SlowDownSnake,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    pub select_ammo: Option<AmmoType>,
    pub quit: bool,
    /// Start over (only from Won/Lost)
    pub restart: bool,
    /// Mouse pressed: start charging
    pub charge_start: bool,
    /// Mouse released here: fire with the accumulated charge
    pub fire_at: Option<Vec2>,
    /// Current mouse position (trajectory preview)
    pub aim: Option<Vec2>,
    pub debug: Option<DebugCommand>,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn controls(&self) -> PlayerControls {
        PlayerControls {
            left: self.move_left,
            right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.quit {
        log::info!("Quit requested");
        state.quit_requested = true;
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Running => state.set_phase(GamePhase::Paused),
            GamePhase::Paused => state.set_phase(GamePhase::Running),
            _ => {}
        }
    }

    if input.restart && matches!(state.phase, GamePhase::Won | GamePhase::Lost) {
        state.restart();
    }

    if state.phase != GamePhase::Running {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    if let Some(ammo) = input.select_ammo {
        state.player.current_ammo = ammo;
    }
    if let Some(command) = input.debug {
        apply_debug(state, command);
    }

    if input.aim.is_some() {
        state.charge.aim = input.aim;
    }
    if input.charge_start {
        state.charge.begin();
    }
    if let Some(target) = input.fire_at {
        if let Some(power) = state.charge.release() {
            state.projectiles.extend(state.player.shoot(target, power));
        }
    }

    let GameState {
        player,
        snake,
        platforms,
        food,
        acid,
        projectiles,
        rng,
        ..
    } = state;

    // Player reads projectiles before they move this tick
    player.update(input.controls(), platforms, projectiles, &snake.segments, acid, food);

    snake.update(food, acid, projectiles, rng);

    for droplet in acid.iter_mut() {
        droplet.update(platforms, &snake.segments, projectiles);
    }

    for i in 0..projectiles.len() {
        let (before, rest) = projectiles.split_at_mut(i);
        let Some((current, after)) = rest.split_first_mut() else {
            break;
        };
        current.update(
            platforms,
            &mut snake.segments,
            acid,
            before.iter().chain(after.iter()),
        );
    }

    let snake_defeated = projectiles.iter().any(|p| p.defeated_snake);
    let player_dead = player.is_dead();

    state.sweep();

    if snake_defeated {
        log::info!("SkySnake defeated after {} ticks", state.time_ticks);
        state.set_phase(GamePhase::Won);
    } else if player_dead {
        log::info!("Player died after {} ticks", state.time_ticks);
        state.set_phase(GamePhase::Lost);
    }

    state.charge.ramp();
    state.time_ticks += 1;
}

fn apply_debug(state: &mut GameState, command: DebugCommand) {
    log::debug!("Debug command {:?}", command);
    match command {
        DebugCommand::RefillAmmo(ammo) => state.player.ammo.set(ammo, DEBUG_AMMO_REFILL),
        DebugCommand::Heal => state.player.heal(DEBUG_HEAL),
        DebugCommand::GrowSnake => state.snake.grow(),
        DebugCommand::ShrinkSnake => {
            state.snake.shrink();
        }
        DebugCommand::SpawnFood => state.spawn_food(),
        DebugCommand::SpeedUpSnake => {
            state.snake.scale_speed(1.1, SNAKE_MIN_SPEED, SNAKE_MAX_SPEED)
        }
        DebugCommand::SlowDownSnake => {
            state.snake.scale_speed(0.9, SNAKE_MIN_SPEED, SNAKE_MAX_SPEED)
        }
    }
}

/// Synthesize input for idle/demo mode: collect spent rounds, keep a loaded
/// ammo type selected, and lob charged shots at the snake's head.
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let px = state.player.center().x;

    let nearest_pickup = state
        .projectiles
        .iter()
        .filter(|p| p.is_pickable())
        .map(|p| p.pos.x)
        .min_by(|a, b| (a - px).abs().total_cmp(&(b - px).abs()));
    if let Some(x) = nearest_pickup {
        input.move_left = x < px - PLAYER_SPEED;
        input.move_right = x > px + PLAYER_SPEED;
    }

    let ammo = &state.player.ammo;
    let loaded = if ammo.get(state.player.current_ammo) > 0 {
        Some(state.player.current_ammo)
    } else {
        AmmoType::ALL.into_iter().find(|a| ammo.get(*a) > 0)
    };
    let Some(loaded) = loaded else {
        return input;
    };
    input.select_ammo = Some(loaded);

    let target = state.snake.head_rect().map(|r| r.center());
    input.aim = target;
    if !state.charge.charging {
        input.charge_start = true;
    } else if state.charge.power >= AUTOPILOT_FIRE_POWER {
        input.fire_at = target;
    }
    input
}
