//! Flappy Gate - a Flappy Bird clone for the terminal
//!
//! Core modules:
//! - `game`: session state machine and per-frame dispatch
//! - `player`, `obstacles`: the simulation itself
//! - `surface`: drawing interface the game renders through
//! - `pixel_buf`: half-block terminal backend for `surface`
//! - `audio`: synthesized sound cues

pub mod audio;
pub mod config;
pub mod game;
pub mod geometry;
pub mod obstacles;
pub mod pixel_buf;
pub mod player;
pub mod surface;

pub use game::{FrameEvent, Game, GameState, Input, Session};
pub use obstacles::ObstacleField;
pub use player::Player;
