use glam::Vec2;

use crate::config::{GRAVITY, JUMP_POWER, PLAYER_RADIUS, PLAYER_START_X, SCREEN_HEIGHT};
use crate::surface::{INK, Surface};

/// The falling circle the player steers.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Vertical velocity in pixels/frame (positive = downward).
    pub velocity: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Self::start_position(),
            velocity: 0.0,
        }
    }

    fn start_position() -> Vec2 {
        Vec2::new(PLAYER_START_X, SCREEN_HEIGHT / 2.0)
    }

    pub fn reset(&mut self) {
        self.position = Self::start_position();
        self.velocity = 0.0;
    }

    /// Integrate one frame. A jump overrides the velocity after the move, so
    /// it takes effect from the next frame on.
    pub fn update(&mut self, jump: bool) {
        self.velocity += GRAVITY;
        self.position.y += self.velocity;

        if jump {
            self.velocity = JUMP_POWER;
        }
    }

    pub fn radius(&self) -> f32 {
        PLAYER_RADIUS
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.position.y + PLAYER_RADIUS > SCREEN_HEIGHT || self.position.y - PLAYER_RADIUS < 0.0
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.position, PLAYER_RADIUS, INK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_player_at_start() {
        let player = Player::new();
        assert_eq!(player.position, Vec2::new(100.0, 360.0));
        assert_eq!(player.velocity, 0.0);
        assert!(!player.is_out_of_bounds());
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut player = Player::new();
        player.update(false);
        assert_eq!(player.velocity, GRAVITY);
        assert_eq!(player.position.y, 360.0 + GRAVITY);

        player.update(false);
        assert_eq!(player.velocity, 2.0 * GRAVITY);
        assert_eq!(player.position.y, 360.0 + 3.0 * GRAVITY);
    }

    #[test]
    fn test_jump_sets_velocity_exactly() {
        let mut player = Player::new();
        player.velocity = 5.0;
        let y = player.position.y;
        player.update(true);
        assert_eq!(player.velocity, JUMP_POWER);
        // The move used the pre-jump velocity
        assert_eq!(player.position.y, y + 5.0 + GRAVITY);
    }

    #[test]
    fn test_out_of_bounds_top_and_bottom() {
        let mut player = Player::new();
        player.position.y = PLAYER_RADIUS - 0.5;
        assert!(player.is_out_of_bounds());

        player.position.y = SCREEN_HEIGHT - PLAYER_RADIUS + 0.5;
        assert!(player.is_out_of_bounds());

        player.position.y = PLAYER_RADIUS;
        assert!(!player.is_out_of_bounds());
        player.position.y = SCREEN_HEIGHT - PLAYER_RADIUS;
        assert!(!player.is_out_of_bounds());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut player = Player::new();
        player.position = Vec2::new(3.0, -40.0);
        player.velocity = 12.0;

        player.reset();
        let once = player.clone();
        player.reset();
        assert_eq!(player, once);
        assert_eq!(player, Player::new());
    }

    #[test]
    fn test_draw_emits_one_circle() {
        let mut rec = crate::surface::Recording::default();
        Player::new().draw(&mut rec);
        assert_eq!(rec.circles, vec![(Vec2::new(100.0, 360.0), PLAYER_RADIUS, INK)]);
    }

    proptest! {
        #[test]
        fn velocity_follows_gravity_or_jump(v in -20.0f32..20.0, jump in any::<bool>()) {
            let mut player = Player::new();
            player.velocity = v;
            player.update(jump);
            if jump {
                prop_assert_eq!(player.velocity, JUMP_POWER);
            } else {
                prop_assert_eq!(player.velocity, v + GRAVITY);
            }
        }
    }
}
