//! The player avatar
//!
//! Walks, jumps, lands on platforms (taking fall damage), stands on food
//! and feathershot platforms, collects spent projectiles and fires new ones.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::acid::AcidDroplet;
use super::collision::{fall_damage, in_standing_band, lands_on, rests_on, screen_bounds};
use super::projectile::{AmmoType, Projectile};
use super::rect::Rect;
use super::snake::Segment;
use super::state::{Food, Platform};
use crate::consts::*;

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Rounds left per ammo type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoCounts {
    pub regular: u32,
    pub bouncy: u32,
    pub piercing: u32,
    pub feathershot: u32,
}

impl Default for AmmoCounts {
    fn default() -> Self {
        Self {
            regular: START_AMMO_REGULAR,
            bouncy: START_AMMO_BOUNCY,
            piercing: START_AMMO_PIERCING,
            feathershot: START_AMMO_FEATHERSHOT,
        }
    }
}

impl AmmoCounts {
    pub fn get(&self, ammo: AmmoType) -> u32 {
        match ammo {
            AmmoType::Regular => self.regular,
            AmmoType::Bouncy => self.bouncy,
            AmmoType::Piercing => self.piercing,
            AmmoType::Feathershot => self.feathershot,
        }
    }

    fn slot(&mut self, ammo: AmmoType) -> &mut u32 {
        match ammo {
            AmmoType::Regular => &mut self.regular,
            AmmoType::Bouncy => &mut self.bouncy,
            AmmoType::Piercing => &mut self.piercing,
            AmmoType::Feathershot => &mut self.feathershot,
        }
    }

    pub fn set(&mut self, ammo: AmmoType, count: u32) {
        *self.slot(ammo) = count;
    }

    pub fn add(&mut self, ammo: AmmoType) {
        *self.slot(ammo) += 1;
    }

    /// Take one round. Returns false if there was none.
    pub fn take(&mut self, ammo: AmmoType) -> bool {
        let slot = self.slot(ammo);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vy: f32,
    /// Always within [0, PLAYER_MAX_HEALTH]
    pub health: f32,
    pub current_ammo: AmmoType,
    pub ammo: AmmoCounts,
    /// Top edge at the last tick the player was grounded (fall height reference)
    pub last_y: f32,
    pub on_ground: bool,
    pub on_food: bool,
    pub on_feathershot: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let spawn = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PLAYER_SPAWN_OFFSET_Y);
        let rect = Rect::square_at(spawn, PLAYER_SIZE);
        Self {
            rect,
            vy: 0.0,
            health: PLAYER_MAX_HEALTH,
            current_ammo: AmmoType::Regular,
            ammo: AmmoCounts::default(),
            last_y: rect.y,
            on_ground: false,
            on_food: false,
            on_feathershot: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, PLAYER_MAX_HEALTH);
    }

    fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, PLAYER_MAX_HEALTH);
    }

    /// Advance one tick.
    ///
    /// Picked-up projectiles and acid that hits the player are flagged dead
    /// in their collections; the caller sweeps them.
    pub fn update(
        &mut self,
        controls: PlayerControls,
        platforms: &[Platform],
        projectiles: &mut [Projectile],
        segments: &[Segment],
        acid: &mut [AcidDroplet],
        food: &[Food],
    ) {
        if controls.left {
            self.rect.x -= PLAYER_SPEED;
        }
        if controls.right {
            self.rect.x += PLAYER_SPEED;
        }
        if controls.jump && self.on_ground {
            self.vy = PLAYER_JUMP_POWER;
            self.on_ground = false;
        }

        self.vy += PLAYER_GRAVITY;
        self.rect.y += self.vy;

        self.on_ground = false;
        self.on_food = false;
        self.on_feathershot = false;

        for platform in platforms {
            if lands_on(&self.rect, self.vy, &platform.rect, LANDING_TOLERANCE) {
                self.rect.set_bottom(platform.rect.top());
                self.vy = 0.0;
                self.on_ground = true;
                let fall_height = self.rect.y - self.last_y;
                let dmg = fall_damage(fall_height);
                if dmg > 0.0 {
                    log::info!("Fell {:.0}px, taking {:.2} damage", fall_height, dmg);
                    self.damage(dmg);
                }
            } else if rests_on(&self.rect, self.vy, &platform.rect, LANDING_TOLERANCE) {
                self.on_ground = true;
            }
        }

        for item in food.iter().filter(|f| f.alive) {
            if in_standing_band(&self.rect, self.vy, &item.rect, STANDING_BAND) {
                self.on_food = true;
                self.on_ground = true;
                self.vy = 0.0;
                self.rect.set_bottom(item.rect.top());
            }
        }

        for proj in projectiles.iter().filter(|p| p.is_live_platform()) {
            let surface = proj.rect();
            if in_standing_band(&self.rect, self.vy, &surface, STANDING_BAND) {
                self.on_feathershot = true;
                self.on_ground = true;
                self.vy = 0.0;
                self.rect.set_bottom(surface.top());
            }
        }

        if self.on_ground {
            self.last_y = self.rect.y;
        }

        if self.on_food {
            self.damage(FOOD_STANDING_DAMAGE);
        }
        if self.on_feathershot {
            self.heal(FEATHERSHOT_STANDING_HEAL);
        }
        log::debug!("Player health: {}", self.health);

        for segment in segments {
            if self.rect.intersects(&segment.rect()) {
                self.damage(SNAKE_CONTACT_DAMAGE);
            }
        }

        for droplet in acid.iter_mut().filter(|a| a.alive) {
            if self.rect.intersects(&droplet.rect()) {
                self.damage(ACID_HIT_DAMAGE);
                droplet.destroy();
            }
        }

        for proj in projectiles.iter_mut().filter(|p| p.is_pickable()) {
            if self.rect.intersects(&proj.rect()) {
                self.ammo.add(proj.ammo);
                proj.destroy();
                log::debug!("Picked up {} round", proj.ammo.as_str());
            }
        }

        self.rect.clamp_within(&screen_bounds());
    }

    /// Fire the current ammo toward `target` with the given charge.
    ///
    /// Needs a round of the current type; the round is spent even when the
    /// target is the player's own centre and nothing is launched.
    pub fn shoot(&mut self, target: Vec2, power: f32) -> Option<Projectile> {
        let ammo = self.current_ammo;
        if !self.ammo.take(ammo) {
            log::warn!("Cannot shoot: No ammo for {}", ammo.as_str());
            return None;
        }
        let projectile = Projectile::shoot(self.center(), target, power, ammo);
        if projectile.is_some() {
            log::info!("Shooting {} projectile with power {}", ammo.as_str(), power);
        }
        projectile
    }
}
