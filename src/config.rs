//! Compiled-in game tuning.
//!
//! All distances are in logical playfield pixels; all rates are per frame.

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;
pub const FPS: u32 = 60;

pub const GRAVITY: f32 = 0.5;
/// Velocity override applied on a jump (negative = upward).
pub const JUMP_POWER: f32 = -8.0;

pub const PIPE_SPEED: f32 = 3.0;
/// Vertical opening between the top and bottom obstacle of a pair.
pub const PIPE_GAP: f32 = 150.0;
pub const PIPE_WIDTH: f32 = 50.0;
/// Frames between two pair spawns.
pub const PIPE_SPAWN_INTERVAL: u32 = 120;

pub const PLAYER_RADIUS: f32 = 15.0;
pub const PLAYER_START_X: f32 = 100.0;

/// Pairs to pass before the run counts as cleared.
pub const CLEAR_SCORE: u32 = 5;

pub const TITLE: &str = "FLAPPY BIRD";
