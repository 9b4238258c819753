//! SkySnake - a single-screen slingshot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `view`: Per-tick snapshot handed to the render/UI layer

pub mod sim;
pub mod view;

pub use view::FrameView;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_POWER: f32 = -12.0;
    pub const PLAYER_GRAVITY: f32 = 0.5;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Spawn centre is this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET_Y: f32 = 50.0;

    /// Falls shorter than this are free
    pub const FALL_DAMAGE_THRESHOLD: f32 = 100.0;
    /// Damage = fall_height / SCREEN_HEIGHT * FALL_DAMAGE_FACTOR
    pub const FALL_DAMAGE_FACTOR: f32 = 45.0;
    /// Slack above a platform top that still counts as landing
    pub const LANDING_TOLERANCE: f32 = 2.0;
    /// Depth of the "stand on top" band for food and feathershot platforms
    pub const STANDING_BAND: f32 = 10.0;

    /// Health drift per tick while standing on things
    pub const FOOD_STANDING_DAMAGE: f32 = 2.0 / 60.0;
    pub const FEATHERSHOT_STANDING_HEAL: f32 = 1.0 / 60.0;
    /// Contact damage
    pub const SNAKE_CONTACT_DAMAGE: f32 = 0.666;
    pub const ACID_HIT_DAMAGE: f32 = 10.0;

    /// Starting ammo
    pub const START_AMMO_REGULAR: u32 = 10;
    pub const START_AMMO_BOUNCY: u32 = 5;
    pub const START_AMMO_PIERCING: u32 = 3;
    pub const START_AMMO_FEATHERSHOT: u32 = 2;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const FEATHERSHOT_PLATFORM_SIZE: f32 = 30.0;
    pub const PROJECTILE_GRAVITY: f32 = 0.5;
    pub const FEATHERSHOT_GRAVITY: f32 = 0.3;
    /// Launch speed = power * POWER_SCALE * ammo multiplier
    pub const POWER_SCALE: f32 = 0.2;
    pub const BOUNCE_DAMPING: f32 = 0.8;
    pub const MAX_BOUNCES: u32 = 3;
    /// 60 seconds at 60 ticks/s
    pub const FEATHERSHOT_PLATFORM_LIFETIME: u32 = 3600;

    /// Snake defaults
    pub const SNAKE_SEGMENT_SIZE: f32 = 20.0;
    pub const SNAKE_START_SEGMENTS: usize = 6;
    pub const SNAKE_START_SPEED: f32 = 5.0;
    pub const SNAKE_SPACING_FRAMES: usize = 4;
    pub const SNAKE_HISTORY_CAPACITY: usize = 200;
    pub const ACID_DROP_INTERVAL: u32 = 180;
    /// Chance per tick of a random heading change (~once a second)
    pub const SNAKE_TURN_CHANCE: f32 = 0.0167;
    pub const SNAKE_MAX_TURN_DEGREES: f32 = 45.0;
    /// Debug speed controls
    pub const SNAKE_MAX_SPEED: f32 = 20.0;
    pub const SNAKE_MIN_SPEED: f32 = 1.0;

    /// Acid droplet defaults
    pub const ACID_SIZE: f32 = 10.0;
    pub const ACID_START_VY: f32 = 5.0;
    pub const ACID_GRAVITY: f32 = 0.5;

    /// Food defaults
    pub const FOOD_SIZE: f32 = 20.0;
    pub const FOOD_COUNT: usize = 3;
    /// Food never spawns closer than this to a screen edge
    pub const FOOD_SPAWN_MARGIN: i32 = 50;

    /// Ground platform thickness (spans the full width at the bottom)
    pub const GROUND_THICKNESS: f32 = 20.0;

    /// Slingshot charge
    pub const CHARGE_RATE: f32 = 4.0;
    pub const MAX_CHARGE: f32 = 100.0;
    pub const TRAJECTORY_PREVIEW_POINTS: usize = 30;
    /// Gravity used by the preview regardless of ammo
    pub const TRAJECTORY_PREVIEW_GRAVITY: f32 = 0.5;

    /// Demo autopilot fires once the charge reaches this
    pub const AUTOPILOT_FIRE_POWER: f32 = 60.0;

    /// Debug refill level
    pub const DEBUG_AMMO_REFILL: u32 = 10;
    pub const DEBUG_HEAL: f32 = 5.0;
}

/// Colour palette (RGB)
pub mod colors {
    pub type Rgb = [u8; 3];

    pub const WHITE: Rgb = [255, 255, 255];
    pub const RED: Rgb = [255, 0, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const GREY: Rgb = [128, 128, 128];
    pub const ORANGE: Rgb = [255, 165, 0];
    pub const NEON_GREEN: Rgb = [57, 255, 20];
    pub const CYAN: Rgb = [0, 255, 255];
    pub const PURPLE: Rgb = [128, 0, 128];
}

/// Rotate a vector by `degrees` (positive = clockwise on a y-down screen)
#[inline]
pub fn rotate_vector(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_vector_quarter_turn() {
        let v = rotate_vector(Vec2::new(5.0, 0.0), 90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_vector_keeps_length() {
        let v = Vec2::new(3.0, -4.0);
        for deg in [-45.0, -10.0, 0.0, 17.5, 45.0] {
            assert!((rotate_vector(v, deg).length() - 5.0).abs() < 1e-4);
        }
    }
}
