//! Slingshot projectiles
//!
//! A projectile flies ballistically until it stops on a platform, leaves the
//! screen, or hits the snake. What happens on a platform depends on the ammo:
//! bouncy rounds bounce a few times, everything else stops dead. Feathershot
//! rounds turn into a temporary platform at the top of their arc.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::acid::AcidDroplet;
use super::collision::{is_off_screen, lands_on};
use super::rect::Rect;
use super::snake::Segment;
use super::state::Platform;
use crate::colors::{self, Rgb};
use crate::consts::*;

/// Ammo types, selected with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmmoType {
    #[default]
    Regular,
    Bouncy,
    Piercing,
    Feathershot,
}

impl AmmoType {
    pub const ALL: [AmmoType; 4] = [
        AmmoType::Regular,
        AmmoType::Bouncy,
        AmmoType::Piercing,
        AmmoType::Feathershot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmmoType::Regular => "regular",
            AmmoType::Bouncy => "bouncy",
            AmmoType::Piercing => "piercing",
            AmmoType::Feathershot => "feathershot",
        }
    }

    /// Launch speed multiplier
    pub fn velocity_multiplier(&self) -> f32 {
        match self {
            AmmoType::Regular => 1.0,
            AmmoType::Bouncy => 1.2,
            AmmoType::Piercing => 1.5,
            AmmoType::Feathershot => 0.8,
        }
    }

    pub fn gravity(&self) -> f32 {
        match self {
            AmmoType::Feathershot => FEATHERSHOT_GRAVITY,
            _ => PROJECTILE_GRAVITY,
        }
    }

    pub fn max_bounces(&self) -> u32 {
        match self {
            AmmoType::Bouncy => MAX_BOUNCES,
            _ => 0,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            AmmoType::Regular => colors::RED,
            AmmoType::Bouncy => colors::PURPLE,
            AmmoType::Piercing => colors::GREEN,
            AmmoType::Feathershot => colors::CYAN,
        }
    }
}

/// Launch velocity for a shot from `origin` toward `target`.
///
/// Returns `None` when the target is the origin (no direction).
pub fn launch_velocity(origin: Vec2, target: Vec2, power: f32, ammo: AmmoType) -> Option<Vec2> {
    let delta = target - origin;
    let distance = delta.length();
    if distance <= 0.0 {
        return None;
    }
    let speed = power * POWER_SCALE * ammo.velocity_multiplier();
    Some(delta / distance * speed)
}

/// Ballistic forecast for the aiming overlay. Informational only: always uses
/// the default gravity and ignores collisions.
pub fn preview_trajectory(origin: Vec2, target: Vec2, power: f32, ammo: AmmoType) -> Vec<Vec2> {
    let Some(vel) = launch_velocity(origin, target, power, ammo) else {
        return Vec::new();
    };
    let bounds = super::collision::screen_bounds();
    (0..TRAJECTORY_PREVIEW_POINTS)
        .map(|t| {
            let t = t as f32;
            origin + vel * t + Vec2::new(0.0, 0.5 * TRAJECTORY_PREVIEW_GRAVITY * t * t)
        })
        .filter(|p| {
            p.x >= bounds.left()
                && p.x <= bounds.right()
                && p.y >= bounds.top()
                && p.y <= bounds.bottom()
        })
        .collect()
}

/// A projectile entity
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub ammo: AmmoType,
    /// No longer integrating (resting on a platform, or a feathershot platform)
    pub stopped: bool,
    /// Feathershot transformed into a standable platform
    pub is_platform: bool,
    pub bounces: u32,
    pub max_bounces: u32,
    /// Vertical velocity at the end of the previous update (apex detection)
    pub prev_vy: f32,
    /// Ticks spent as a platform
    pub platform_timer: u32,
    /// Set by the hit that kills the snake's last segment
    pub defeated_snake: bool,
    /// Cleared when the projectile is destroyed; swept at end of tick
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, ammo: AmmoType) -> Self {
        Self {
            pos,
            vel,
            gravity: ammo.gravity(),
            ammo,
            stopped: false,
            is_platform: false,
            bounces: 0,
            max_bounces: ammo.max_bounces(),
            prev_vy: vel.y,
            platform_timer: 0,
            defeated_snake: false,
            alive: true,
        }
    }

    /// Fire from `origin` at `target` with the given charge. `None` for a zero-length aim.
    pub fn shoot(origin: Vec2, target: Vec2, power: f32, ammo: AmmoType) -> Option<Self> {
        launch_velocity(origin, target, power, ammo).map(|vel| Self::new(origin, vel, ammo))
    }

    pub fn size(&self) -> f32 {
        if self.is_platform {
            FEATHERSHOT_PLATFORM_SIZE
        } else {
            PROJECTILE_SIZE
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, self.size())
    }

    /// Stopped on the ground and waiting to be picked up
    pub fn is_pickable(&self) -> bool {
        self.alive && self.stopped && !self.is_platform
    }

    /// A live feathershot platform others can stand on, bounce off, or destroy
    pub fn is_live_platform(&self) -> bool {
        self.alive && self.is_platform
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }

    fn halt(&mut self) {
        self.stopped = true;
        self.vel = Vec2::ZERO;
    }

    /// Advance one tick.
    ///
    /// `segments` is the snake's chain; hits remove its tail in place.
    /// `siblings` are the other projectiles (only their live platforms matter).
    /// Acid is accepted to keep the update signature uniform but never collides.
    pub fn update<'a>(
        &mut self,
        platforms: &[Platform],
        segments: &mut Vec<Segment>,
        _acid: &[AcidDroplet],
        siblings: impl Iterator<Item = &'a Projectile>,
    ) {
        if !self.alive {
            return;
        }

        if !self.stopped {
            log::debug!(
                "Updating {} projectile: pos={:?} vel={:?}",
                self.ammo.as_str(),
                self.pos,
                self.vel
            );
            self.pos += self.vel;
            self.vel.y += self.gravity;

            self.hit_snake(segments);
            if !self.alive {
                return;
            }

            if self.ammo == AmmoType::Feathershot && !self.is_platform {
                // Apex: vertical velocity turns from rising (or level) to falling
                if self.prev_vy <= 0.0 && self.vel.y > 0.0 {
                    self.become_platform();
                }
            }

            self.resolve_platforms(platforms, siblings);

            self.prev_vy = self.vel.y;

            if is_off_screen(&self.rect()) {
                self.destroy();
                return;
            }
        }

        if self.is_platform {
            self.platform_timer += 1;
            if self.platform_timer >= FEATHERSHOT_PLATFORM_LIFETIME {
                log::debug!("Feathershot platform expired at {:?}", self.pos);
                self.destroy();
            }
        }
    }

    fn hit_snake(&mut self, segments: &mut Vec<Segment>) {
        if self.is_platform {
            return;
        }
        let mut i = 0;
        while i < segments.len() {
            if self.rect().intersects(&segments[i].rect()) {
                if segments.len() > 1 {
                    segments.pop();
                    log::info!("Removed segment, new length: {}", segments.len());
                    if self.ammo != AmmoType::Piercing {
                        self.destroy();
                        return;
                    }
                } else {
                    log::info!("Defeating snake");
                    self.defeated_snake = true;
                    self.destroy();
                    return;
                }
            }
            i += 1;
        }
    }

    fn become_platform(&mut self) {
        log::debug!("Feathershot became a platform at {:?}", self.pos);
        self.halt();
        self.is_platform = true;
        self.platform_timer = 0;
    }

    fn resolve_platforms<'a>(
        &mut self,
        platforms: &[Platform],
        siblings: impl Iterator<Item = &'a Projectile>,
    ) {
        match self.ammo {
            AmmoType::Bouncy => {
                for platform in platforms {
                    self.bounce_off(&platform.rect);
                }
                for sibling in siblings {
                    if sibling.is_live_platform() {
                        self.bounce_off(&sibling.rect());
                    }
                }
            }
            // Piercing, regular and feathershot all stop on static platforms only
            AmmoType::Piercing | AmmoType::Regular | AmmoType::Feathershot => {
                for platform in platforms {
                    if lands_on(&self.rect(), self.vel.y, &platform.rect, 0.0) {
                        self.halt();
                    }
                }
            }
        }
    }

    fn bounce_off(&mut self, surface: &Rect) {
        if !lands_on(&self.rect(), self.vel.y, surface, 0.0) {
            return;
        }
        self.pos.y = surface.top() - self.size() / 2.0;
        self.vel.y = -self.vel.y * BOUNCE_DAMPING;
        self.bounces += 1;
        if self.bounces >= self.max_bounces {
            self.halt();
        }
    }
}
