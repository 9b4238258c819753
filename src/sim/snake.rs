//! The SkySnake enemy
//!
//! Only the head is steered. Every body segment replays the head's path a
//! fixed number of frames late, read back from a bounded position history.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::acid::AcidDroplet;
use super::projectile::Projectile;
use super::rect::Rect;
use super::state::Food;
use crate::consts::*;
use crate::rotate_vector;

/// Fixed-capacity ring of recent head positions (newest at the back)
#[derive(Debug, Clone)]
pub struct PositionHistory {
    positions: VecDeque<Vec2>,
    capacity: usize,
}

impl PositionHistory {
    /// A full history where every entry is `start`
    pub fn filled(start: Vec2, capacity: usize) -> Self {
        Self {
            positions: std::iter::repeat_n(start, capacity).collect(),
            capacity,
        }
    }

    /// Record a position, evicting the oldest once full
    pub fn push(&mut self, pos: Vec2) {
        self.positions.push_back(pos);
        while self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    /// Position `frames_ago` ticks back (0 = newest)
    pub fn back(&self, frames_ago: usize) -> Option<Vec2> {
        let len = self.positions.len();
        if frames_ago >= len {
            return None;
        }
        self.positions.get(len - 1 - frames_ago).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One body square of the snake (index 0 is the head)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
}

impl Segment {
    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, SNAKE_SEGMENT_SIZE)
    }
}

#[derive(Debug, Clone)]
pub struct SkySnake {
    /// Steering point; segment 0 trails it by `SNAKE_SPACING_FRAMES + 1` ticks
    pub head_pos: Vec2,
    pub velocity: Vec2,
    pub history: PositionHistory,
    /// Never empty
    pub segments: Vec<Segment>,
    pub drop_timer: u32,
}

impl Default for SkySnake {
    fn default() -> Self {
        Self::new()
    }
}

impl SkySnake {
    pub fn new() -> Self {
        let start = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        Self {
            head_pos: start,
            velocity: Vec2::new(SNAKE_START_SPEED, 0.0),
            history: PositionHistory::filled(start, SNAKE_HISTORY_CAPACITY),
            segments: vec![Segment { pos: start }; SNAKE_START_SEGMENTS],
            drop_timer: 0,
        }
    }

    pub fn head_rect(&self) -> Option<Rect> {
        self.segments.first().map(Segment::rect)
    }

    /// Append a segment on top of the current tail
    pub fn grow(&mut self) {
        if let Some(&tail) = self.segments.last() {
            self.segments.push(tail);
        }
    }

    /// Drop the tail segment. The head is never removed.
    pub fn shrink(&mut self) -> bool {
        if self.segments.len() > 1 {
            self.segments.pop();
            true
        } else {
            false
        }
    }

    /// Scale speed by `factor`, keeping it within `[min, max]`
    pub fn scale_speed(&mut self, factor: f32, min: f32, max: f32) {
        let speed = self.velocity.length();
        if speed > 0.0 {
            let new_speed = (speed * factor).clamp(min, max);
            self.velocity *= new_speed / speed;
        }
    }

    /// Advance one tick: move, eat, drop acid, maybe turn
    pub fn update<R: Rng>(
        &mut self,
        food: &mut Vec<Food>,
        acid: &mut Vec<AcidDroplet>,
        projectiles: &mut [Projectile],
        rng: &mut R,
    ) {
        self.move_head();
        self.history.push(self.head_pos);
        self.follow_trail();
        self.eat(food, projectiles, rng);
        self.drop_acid(acid, rng);

        if rng.random::<f32>() < SNAKE_TURN_CHANCE {
            let angle = rng.random_range(-SNAKE_MAX_TURN_DEGREES..=SNAKE_MAX_TURN_DEGREES);
            self.velocity = rotate_vector(self.velocity, angle);
        }
    }

    /// Move the head and reflect off the screen edges (no clamping)
    fn move_head(&mut self) {
        self.head_pos += self.velocity;
        if self.head_pos.x < 0.0 || self.head_pos.x > SCREEN_WIDTH {
            self.velocity.x = -self.velocity.x;
        }
        if self.head_pos.y < 0.0 || self.head_pos.y > SCREEN_HEIGHT {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Place each segment where the head was `(i + 1) * spacing + 1` ticks ago.
    /// The oldest history entry is never used, so segments past that depth hold still.
    fn follow_trail(&mut self) {
        for (i, segment) in self.segments.iter_mut().enumerate() {
            let frames_ago = (i + 1) * SNAKE_SPACING_FRAMES;
            if frames_ago + 1 >= self.history.len() {
                continue;
            }
            if let Some(pos) = self.history.back(frames_ago) {
                segment.pos = pos;
            }
        }
    }

    fn eat<R: Rng>(&mut self, food: &mut Vec<Food>, projectiles: &mut [Projectile], rng: &mut R) {
        let Some(head) = self.head_rect() else {
            return;
        };

        let mut respawned = Vec::new();
        for item in food.iter_mut().filter(|f| f.alive) {
            if head.intersects(&item.rect) {
                item.alive = false;
                respawned.push(Food::random(rng));
                self.grow();
                log::debug!("Snake ate food, length {}", self.segments.len());
            }
        }
        food.extend(respawned);

        for proj in projectiles.iter_mut().filter(|p| p.is_live_platform()) {
            if head.intersects(&proj.rect()) {
                proj.destroy();
                self.grow();
                log::debug!(
                    "Snake swallowed a feathershot platform, length {}",
                    self.segments.len()
                );
            }
        }
    }

    fn drop_acid<R: Rng>(&mut self, acid: &mut Vec<AcidDroplet>, rng: &mut R) {
        self.drop_timer += 1;
        if self.drop_timer >= ACID_DROP_INTERVAL {
            self.drop_timer = 0;
            if let Some(segment) = self.segments.choose(rng) {
                acid.push(AcidDroplet::new(segment.rect().bottom_center()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::AmmoType;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_history_is_bounded() {
        let mut history = PositionHistory::filled(Vec2::ZERO, 200);
        for i in 0..250 {
            history.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(history.len(), 200);
        assert_eq!(history.back(0), Some(Vec2::new(249.0, 0.0)));
        assert_eq!(history.back(199), Some(Vec2::new(50.0, 0.0)));
        assert_eq!(history.back(200), None);
    }

    #[test]
    fn test_new_snake() {
        let snake = SkySnake::new();
        assert_eq!(snake.segments.len(), SNAKE_START_SEGMENTS);
        assert_eq!(snake.history.len(), SNAKE_HISTORY_CAPACITY);
        assert_eq!(snake.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_segments_follow_the_head_path() {
        let mut snake = SkySnake::new();
        let start = snake.head_pos;
        for _ in 0..40 {
            snake.move_head();
            snake.history.push(snake.head_pos);
            snake.follow_trail();
        }
        // Head has moved 40 * 5 px; segment i lags (i + 1) * 4 ticks
        assert_eq!(snake.head_pos, start + Vec2::new(200.0, 0.0));
        for (i, segment) in snake.segments.iter().enumerate() {
            let lag = ((i + 1) * SNAKE_SPACING_FRAMES) as f32;
            assert_eq!(segment.pos, start + Vec2::new(200.0 - 5.0 * lag, 0.0));
        }
    }

    #[test]
    fn test_segments_beyond_history_hold_position() {
        let mut snake = SkySnake::new();
        // 60 segments: the last ones need more than 200 frames of history
        for _ in 0..54 {
            snake.grow();
        }
        let parked = snake.segments[59].pos;
        snake.velocity = Vec2::new(1.0, 0.0);
        for _ in 0..10 {
            snake.move_head();
            snake.history.push(snake.head_pos);
            snake.follow_trail();
        }
        assert_eq!(snake.segments[59].pos, parked);
        assert_ne!(snake.segments[0].pos, parked);
    }

    #[test]
    fn test_head_reflects_off_edges() {
        let mut snake = SkySnake::new();
        snake.head_pos = Vec2::new(SCREEN_WIDTH - 2.0, 10.0);
        snake.velocity = Vec2::new(5.0, -20.0);
        snake.move_head();
        assert_eq!(snake.velocity, Vec2::new(-5.0, 20.0));
        // Not clamped back on screen
        assert!(snake.head_pos.x > SCREEN_WIDTH);
    }

    #[test]
    fn test_eating_food_grows_and_respawns() {
        let mut snake = SkySnake::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut food = vec![Food::at(snake.head_pos)];
        let mut acid = Vec::new();
        snake.update(&mut food, &mut acid, &mut [], &mut rng);

        assert_eq!(snake.segments.len(), SNAKE_START_SEGMENTS + 1);
        assert_eq!(food.len(), 2);
        assert!(!food[0].alive);
        assert!(food[1].alive);
    }

    #[test]
    fn test_swallowing_feathershot_platform() {
        let mut snake = SkySnake::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut platform = Projectile::new(snake.head_pos, Vec2::ZERO, AmmoType::Feathershot);
        platform.is_platform = true;
        platform.stopped = true;
        let mut projectiles = vec![platform];

        snake.update(&mut Vec::new(), &mut Vec::new(), &mut projectiles, &mut rng);
        assert!(!projectiles[0].alive);
        assert_eq!(snake.segments.len(), SNAKE_START_SEGMENTS + 1);
    }

    #[test]
    fn test_acid_drops_every_interval() {
        let mut snake = SkySnake::new();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut acid = Vec::new();
        for _ in 0..ACID_DROP_INTERVAL - 1 {
            snake.update(&mut Vec::new(), &mut acid, &mut [], &mut rng);
        }
        assert!(acid.is_empty());

        snake.update(&mut Vec::new(), &mut acid, &mut [], &mut rng);
        assert_eq!(acid.len(), 1);
        assert_eq!(snake.drop_timer, 0);

        // Dropped from the bottom-centre of one of the segments
        let drop = acid[0].pos;
        assert!(
            snake
                .segments
                .iter()
                .any(|s| s.rect().bottom_center() == drop)
        );
    }

    #[test]
    fn test_random_turns_keep_speed() {
        let mut snake = SkySnake::new();
        let mut rng = Pcg32::seed_from_u64(2024);
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let mut turns = 0;
        for _ in 0..2000 {
            // Keep the head away from the edges so only turns change the heading
            snake.head_pos = center;
            let before = snake.velocity;
            snake.update(&mut Vec::new(), &mut Vec::new(), &mut [], &mut rng);

            assert!((snake.velocity.length() - SNAKE_START_SPEED).abs() < 1e-3);
            let angle = before.angle_to(snake.velocity).to_degrees();
            assert!(angle.abs() <= SNAKE_MAX_TURN_DEGREES + 1e-3);
            if angle.abs() > 1e-3 {
                turns += 1;
            }
        }
        assert!(turns > 0);
    }

    #[test]
    fn test_shrink_keeps_head() {
        let mut snake = SkySnake::new();
        while snake.shrink() {}
        assert_eq!(snake.segments.len(), 1);
        assert!(!snake.shrink());
    }

    #[test]
    fn test_scale_speed_limits() {
        let mut snake = SkySnake::new();
        for _ in 0..50 {
            snake.scale_speed(1.1, SNAKE_MIN_SPEED, SNAKE_MAX_SPEED);
        }
        assert!((snake.velocity.length() - SNAKE_MAX_SPEED).abs() < 1e-3);
        for _ in 0..100 {
            snake.scale_speed(0.9, SNAKE_MIN_SPEED, SNAKE_MAX_SPEED);
        }
        assert!((snake.velocity.length() - SNAKE_MIN_SPEED).abs() < 1e-3);
    }
}
