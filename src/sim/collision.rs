//! Surface contact tests shared by every falling entity
//!
//! Platforms only act as floors: a mover is caught when it crosses a
//! surface's top edge while moving down. Side and ceiling contacts are
//! ignored.

use super::rect::Rect;
use crate::consts::*;

/// The full screen as a rect
pub fn screen_bounds() -> Rect {
    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Downward landing test.
///
/// `vy` is the velocity already applied this tick, so `bottom - vy` is where the
/// mover's bottom edge was before the move. The mover lands if it overlaps the
/// surface and that previous bottom was at or above the surface top (+ `tolerance`).
pub fn lands_on(mover: &Rect, vy: f32, surface: &Rect, tolerance: f32) -> bool {
    mover.intersects(surface) && vy > 0.0 && mover.bottom() - vy <= surface.top() + tolerance
}

/// Resting contact: overlapping, not moving vertically, bottom within `tolerance` of the top
pub fn rests_on(mover: &Rect, vy: f32, surface: &Rect, tolerance: f32) -> bool {
    mover.intersects(surface) && vy == 0.0 && mover.bottom() <= surface.top() + tolerance
}

/// Narrow "standing on top" band used for food and feathershot platforms.
///
/// Does not require a full rect overlap: the bottom edge must be inside
/// `(top, top + band]` with some horizontal overlap.
pub fn in_standing_band(mover: &Rect, vy: f32, surface: &Rect, band: f32) -> bool {
    vy > 0.0
        && mover.bottom() > surface.top()
        && mover.bottom() <= surface.top() + band
        && mover.overlaps_horizontally(surface)
}

/// Fully outside the screen to the left, right or below. Leaving through the top is allowed.
pub fn is_off_screen(rect: &Rect) -> bool {
    rect.left() > SCREEN_WIDTH || rect.right() < 0.0 || rect.top() > SCREEN_HEIGHT
}

/// Damage for landing after falling `fall_height` pixels (0 below the threshold)
pub fn fall_damage(fall_height: f32) -> f32 {
    if fall_height > FALL_DAMAGE_THRESHOLD {
        fall_height / SCREEN_HEIGHT * FALL_DAMAGE_FACTOR
    } else {
        0.0
    }
}
