//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable update order (player, snake, acid, projectiles)
//! - No rendering or platform dependencies

pub mod acid;
pub mod collision;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod snake;
pub mod state;
pub mod tick;

pub use acid::AcidDroplet;
pub use collision::{fall_damage, is_off_screen, screen_bounds};
pub use player::{AmmoCounts, Player, PlayerControls};
pub use projectile::{AmmoType, Projectile, launch_velocity, preview_trajectory};
pub use rect::Rect;
pub use snake::{PositionHistory, Segment, SkySnake};
pub use state::{Charge, Food, GamePhase, GameState, Platform};
pub use tick::{DebugCommand, TickInput, tick};
