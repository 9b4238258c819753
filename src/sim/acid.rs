//! Acid droplets dropped by the snake

use glam::Vec2;

use super::projectile::Projectile;
use super::rect::Rect;
use super::snake::Segment;
use super::state::Platform;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct AcidDroplet {
    /// Centre position
    pub pos: Vec2,
    pub vy: f32,
    pub gravity: f32,
    pub alive: bool,
}

impl AcidDroplet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vy: ACID_START_VY,
            gravity: ACID_GRAVITY,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, ACID_SIZE)
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }

    /// Fall one tick. Acid eats through every feathershot platform it
    /// touches and splashes on static platforms. Snake segments are passed
    /// along with the rest of the world but acid never collides with them.
    pub fn update(
        &mut self,
        platforms: &[Platform],
        _segments: &[Segment],
        feathershot_platforms: &mut [Projectile],
    ) {
        if !self.alive {
            return;
        }

        self.pos.y += self.vy;
        self.vy += self.gravity;
        let rect = self.rect();

        let mut dissolved = false;
        for platform in feathershot_platforms
            .iter_mut()
            .filter(|p| p.is_live_platform() && rect.intersects(&p.rect()))
        {
            log::debug!("Acid dissolved a feathershot platform at {:?}", platform.pos);
            platform.destroy();
            dissolved = true;
        }
        if dissolved {
            self.destroy();
            return;
        }

        if platforms.iter().any(|p| rect.intersects(&p.rect)) {
            self.destroy();
            return;
        }

        if rect.top() > SCREEN_HEIGHT {
            self.destroy();
        }
    }
}
