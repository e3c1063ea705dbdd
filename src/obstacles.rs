//! Scrolling obstacle pairs: spawn cadence, despawn, collision and scoring.

use rand::Rng;

use crate::config::{
    PIPE_GAP, PIPE_SPAWN_INTERVAL, PIPE_SPEED, PIPE_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::geometry::{Rect, circle_intersects_rect};
use crate::player::Player;
use crate::surface::{PIPE, Surface};

/// Lowest and highest gap center a pair may spawn with (middle half of the
/// playfield).
pub const GAP_CENTER_MIN: i32 = SCREEN_HEIGHT as i32 / 4;
pub const GAP_CENTER_MAX: i32 = SCREEN_HEIGHT as i32 * 3 / 4;

/// Active obstacles in spawn order. Pairs are pushed top first, then bottom.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Rect>,
    spawn_timer: u32,
    scored: bool,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.scored = false;
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Advance one frame. Returns the gap center of the pair spawned this
    /// frame, if any.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Option<f32> {
        let mut spawned = None;

        self.spawn_timer += 1;
        if self.spawn_timer >= PIPE_SPAWN_INTERVAL {
            let gap_center = rng.random_range(GAP_CENTER_MIN..=GAP_CENTER_MAX) as f32;
            self.spawn_pair(gap_center);
            self.spawn_timer = 0;
            self.scored = false;
            spawned = Some(gap_center);
        }

        // Fully past the left edge
        self.obstacles.retain(|o| o.x >= -PIPE_WIDTH);
        for obstacle in &mut self.obstacles {
            obstacle.x -= PIPE_SPEED;
        }

        spawned
    }

    /// Push a top/bottom pair at the right edge of the playfield.
    pub fn spawn_pair(&mut self, gap_center: f32) {
        let top_height = gap_center - PIPE_GAP / 2.0;
        let bottom_y = gap_center + PIPE_GAP / 2.0;
        let bottom_height = SCREEN_HEIGHT - bottom_y;

        log::debug!("spawning pair with gap center {gap_center}");
        self.obstacles.push(Rect::new(SCREEN_WIDTH, 0.0, PIPE_WIDTH, top_height));
        self.obstacles.push(Rect::new(SCREEN_WIDTH, bottom_y, PIPE_WIDTH, bottom_height));
    }

    pub fn check_collision(&self, player: &Player) -> bool {
        self.obstacles
            .iter()
            .any(|o| circle_intersects_rect(player.position, player.radius(), o))
    }

    /// Count the oldest obstacle once its right edge is behind the player.
    ///
    /// Only the oldest entry is inspected; pairs pass the player in spawn
    /// order and the flag is cleared again when the next pair spawns.
    pub fn try_score(&mut self, player: &Player, score: &mut u32) -> bool {
        match self.obstacles.first() {
            Some(oldest) if !self.scored && oldest.right() < player.position.x => {
                *score += 1;
                self.scored = true;
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for obstacle in &self.obstacles {
            surface.fill_rect(*obstacle, PIPE);
        }
    }

    #[cfg(test)]
    pub(crate) fn with_obstacles(obstacles: Vec<Rect>) -> Self {
        Self {
            obstacles,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = ObstacleField::new();
        assert!(field.obstacles().is_empty());
        assert_eq!(field.spawn_timer(), 0);
        assert!(!field.is_scored());
    }

    #[test]
    fn test_spawn_at_exact_interval() {
        let mut field = ObstacleField::new();
        let mut rng = rng();

        for _ in 0..PIPE_SPAWN_INTERVAL - 1 {
            assert_eq!(field.update(&mut rng), None);
        }
        assert!(field.obstacles().is_empty());
        assert_eq!(field.spawn_timer(), PIPE_SPAWN_INTERVAL - 1);

        assert!(field.update(&mut rng).is_some());
        assert_eq!(field.obstacles().len(), 2);
        assert_eq!(field.spawn_timer(), 0);
        // Spawned at the right edge and scrolled once in the same frame
        assert_eq!(field.obstacles()[0].x, SCREEN_WIDTH - PIPE_SPEED);
    }

    #[test]
    fn test_spawn_resets_scored_flag() {
        let mut field = ObstacleField::new();
        field.scored = true;
        field.spawn_timer = PIPE_SPAWN_INTERVAL - 1;
        field.update(&mut rng());
        assert!(!field.is_scored());
    }

    #[test]
    fn test_pair_geometry() {
        let mut field = ObstacleField::new();
        field.spawn_pair(300.0);
        let [top, bottom] = field.obstacles() else {
            panic!("expected one pair");
        };
        assert_eq!(*top, Rect::new(SCREEN_WIDTH, 0.0, PIPE_WIDTH, 225.0));
        assert_eq!(*bottom, Rect::new(SCREEN_WIDTH, 375.0, PIPE_WIDTH, 345.0));
    }

    #[test]
    fn test_prune_boundary() {
        let mut field = ObstacleField::with_obstacles(vec![
            Rect::new(-(PIPE_WIDTH + 0.1), 0.0, PIPE_WIDTH, 100.0),
            Rect::new(-PIPE_WIDTH + 0.1, 0.0, PIPE_WIDTH, 100.0),
        ]);
        field.update(&mut rng());
        assert_eq!(field.obstacles().len(), 1);
        assert_eq!(field.obstacles()[0].x, -PIPE_WIDTH + 0.1 - PIPE_SPEED);
    }

    #[test]
    fn test_prune_does_not_skip_neighbours() {
        let gone = Rect::new(-200.0, 0.0, PIPE_WIDTH, 10.0);
        let kept = Rect::new(500.0, 0.0, PIPE_WIDTH, 10.0);
        let mut field = ObstacleField::with_obstacles(vec![gone, gone, kept, gone, kept]);
        field.update(&mut rng());
        assert_eq!(field.obstacles().len(), 2);
        assert!(field.obstacles().iter().all(|o| o.x == 500.0 - PIPE_SPEED));
    }

    #[test]
    fn test_collision_with_top_pipe() {
        let mut field = ObstacleField::new();
        field.spawn_pair(360.0);
        let mut player = Player::new();
        player.position = Vec2::new(SCREEN_WIDTH + 10.0, 100.0);
        assert!(field.check_collision(&player));

        // Centered in the gap: clear of both
        player.position.y = 360.0;
        assert!(!field.check_collision(&player));
    }

    #[test]
    fn test_no_collision_when_empty() {
        assert!(!ObstacleField::new().check_collision(&Player::new()));
    }

    #[test]
    fn test_try_score_once_per_pair() {
        let mut field = ObstacleField::with_obstacles(vec![
            Rect::new(40.0, 0.0, PIPE_WIDTH, 100.0),
            Rect::new(40.0, 250.0, PIPE_WIDTH, 470.0),
        ]);
        let player = Player::new();
        let mut score = 0;

        assert!(field.try_score(&player, &mut score));
        assert_eq!(score, 1);
        assert!(field.is_scored());

        assert!(!field.try_score(&player, &mut score));
        assert_eq!(score, 1);
    }

    #[test]
    fn test_try_score_not_yet_passed() {
        // Right edge exactly at the player's x does not count
        let mut field = ObstacleField::with_obstacles(vec![Rect::new(50.0, 0.0, PIPE_WIDTH, 100.0)]);
        let mut score = 3;
        assert!(!field.try_score(&Player::new(), &mut score));
        assert_eq!(score, 3);
    }

    #[test]
    fn test_try_score_empty_field() {
        let mut score = 0;
        assert!(!ObstacleField::new().try_score(&Player::new(), &mut score));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut field = ObstacleField::with_obstacles(vec![Rect::new(10.0, 0.0, 5.0, 5.0)]);
        field.spawn_timer = 42;
        field.scored = true;

        field.reset();
        let once = field.clone();
        field.reset();
        assert_eq!(field.obstacles(), once.obstacles());
        assert_eq!(field.spawn_timer(), 0);
        assert!(!field.is_scored());
        assert_eq!(once.spawn_timer(), 0);
    }

    #[test]
    fn test_draw_one_rect_per_obstacle() {
        let mut field = ObstacleField::new();
        field.spawn_pair(400.0);
        let mut rec = crate::surface::Recording::default();
        field.draw(&mut rec);
        assert_eq!(rec.rects.len(), 2);
        assert!(rec.rects.iter().all(|(_, c)| *c == PIPE));
    }

    proptest! {
        #[test]
        fn spawned_pairs_fill_the_column(seed in any::<u64>(), frames in 1u32..2000) {
            let mut field = ObstacleField::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..frames {
                field.update(&mut rng);
            }
            for pair in field.obstacles().chunks(2) {
                let [top, bottom] = pair else {
                    panic!("obstacles must come in pairs");
                };
                prop_assert_eq!(top.x, bottom.x);
                prop_assert_eq!(top.width, bottom.width);
                prop_assert_eq!(top.y, 0.0);
                prop_assert!((top.height + PIPE_GAP + bottom.height - SCREEN_HEIGHT).abs() < 1e-3);
                let center = top.height + PIPE_GAP / 2.0;
                prop_assert!(center >= GAP_CENTER_MIN as f32 && center <= GAP_CENTER_MAX as f32);
            }
        }
    }
}
