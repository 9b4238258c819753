//! Per-tick snapshot for the presentation layer
//!
//! Flattens the game state into draw data: one coloured rect per entity,
//! the HUD line and the aiming preview. Nothing here feeds back into the
//! simulation.

use glam::Vec2;
use serde::Serialize;

use crate::colors::{self, Rgb};
use crate::consts::*;
use crate::sim::{AmmoCounts, AmmoType, GamePhase, GameState, Rect, preview_trajectory};

/// A filled rectangle to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub rect: Rect,
    pub color: Rgb,
}

impl EntityView {
    fn new(rect: Rect, color: Rgb) -> Self {
        Self { rect, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub ammo_type: AmmoType,
    pub ammo: AmmoCounts,
    /// Health as a whole percentage of the maximum
    pub health_percent: u32,
    pub charging: bool,
    pub power: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: EntityView,
    pub platforms: Vec<EntityView>,
    pub food: Vec<EntityView>,
    pub acid: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    /// Head first
    pub snake: Vec<EntityView>,
    pub hud: Hud,
    /// Only while charging with a known aim point
    pub trajectory: Vec<Vec2>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| {
                let color = if p.is_platform {
                    colors::CYAN
                } else {
                    p.ammo.color()
                };
                EntityView::new(p.rect(), color)
            })
            .collect();

        let trajectory = match state.charge.aim {
            Some(aim) if state.charge.charging => {
                preview_trajectory(player.center(), aim, state.charge.power, player.current_ammo)
            }
            _ => Vec::new(),
        };

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            player: EntityView::new(player.rect, colors::WHITE),
            platforms: state
                .platforms
                .iter()
                .map(|p| EntityView::new(p.rect, colors::GREY))
                .collect(),
            food: state
                .food
                .iter()
                .map(|f| EntityView::new(f.rect, colors::ORANGE))
                .collect(),
            acid: state
                .acid
                .iter()
                .map(|a| EntityView::new(a.rect(), colors::NEON_GREEN))
                .collect(),
            projectiles,
            snake: state
                .snake
                .segments
                .iter()
                .map(|s| EntityView::new(s.rect(), colors::RED))
                .collect(),
            hud: Hud {
                ammo_type: player.current_ammo,
                ammo: player.ammo,
                health_percent: (player.health / PLAYER_MAX_HEALTH * 100.0).round() as u32,
                charging: state.charge.charging,
                power: state.charge.power,
            },
            trajectory,
        }
    }

    /// One-line status text, e.g. `Ammo: regular (10) | Health: 100%`
    pub fn status_line(&self) -> String {
        format!(
            "Ammo: {} ({}) | Health: {}%",
            self.hud.ammo_type.as_str(),
            self.hud.ammo.get(self.hud.ammo_type),
            self.hud.health_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Projectile;

    #[test]
    fn test_capture_fresh_state() {
        let state = GameState::new(12345);
        let view = FrameView::capture(&state);
        assert_eq!(view.phase, GamePhase::Running);
        assert_eq!(view.platforms.len(), 1);
        assert_eq!(view.food.len(), FOOD_COUNT);
        assert_eq!(view.snake.len(), SNAKE_START_SEGMENTS);
        assert!(view.snake.iter().all(|s| s.color == colors::RED));
        assert!(view.trajectory.is_empty());
        assert_eq!(view.status_line(), "Ammo: regular (10) | Health: 100%");
    }

    #[test]
    fn test_feathershot_platform_drawn_larger() {
        let mut state = GameState::new(1);
        let mut platform = Projectile::new(
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
            AmmoType::Feathershot,
        );
        platform.is_platform = true;
        platform.stopped = true;
        state.projectiles.push(platform);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(600.0, 300.0), Vec2::ZERO, AmmoType::Bouncy));

        let view = FrameView::capture(&state);
        assert_eq!(view.projectiles[0].rect.w, FEATHERSHOT_PLATFORM_SIZE);
        assert_eq!(view.projectiles[0].color, colors::CYAN);
        assert_eq!(view.projectiles[1].rect.w, PROJECTILE_SIZE);
        assert_eq!(view.projectiles[1].color, colors::PURPLE);
    }

    #[test]
    fn test_trajectory_only_while_charging() {
        let mut state = GameState::new(1);
        state.charge.aim = Some(state.player.center() + Vec2::new(200.0, -200.0));
        assert!(FrameView::capture(&state).trajectory.is_empty());

        state.charge.begin();
        state.charge.power = 50.0;
        let view = FrameView::capture(&state);
        assert!(!view.trajectory.is_empty());
        assert!(view.trajectory.len() <= TRAJECTORY_PREVIEW_POINTS);
        assert_eq!(view.trajectory[0], state.player.center());
    }

    #[test]
    fn test_health_percent_rounds() {
        let mut state = GameState::new(1);
        state.player.health = 91.67;
        assert_eq!(FrameView::capture(&state).hud.health_percent, 92);
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(7);
        let json = serde_json::to_value(FrameView::capture(&state)).unwrap();
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["hud"]["ammo_type"], "Regular");
        assert_eq!(json["hud"]["ammo"]["bouncy"], 5);
        assert_eq!(json["snake"].as_array().map(Vec::len), Some(SNAKE_START_SEGMENTS));
    }
}
