//! Session state machine and per-frame dispatch.

use rand::Rng;

use crate::config::{CLEAR_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH, TITLE};
use crate::obstacles::ObstacleField;
use crate::player::Player;
use crate::surface::{Align, BACKGROUND, GOLD, INK, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ready,
    Playing,
    GameOver,
    GameClear,
}

/// Buttons pressed since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub confirm: bool,
    pub jump: bool,
}

/// Things that happened during one [`Game::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    Started,
    Restarted,
    Jumped,
    /// Carries the score after the increment.
    Scored(u32),
    Crashed,
    Cleared,
}

/// Everything that outlives a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: GameState,
    pub score: u32,
    /// Highest score reached in this process; never persisted.
    pub best: u32,
    /// Cleared on the first start and never set again, so the title screen
    /// shows at most once.
    pub first_time: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: GameState::Ready,
            score: 0,
            best: 0,
            first_time: true,
        }
    }
}

pub struct Game<R> {
    pub session: Session,
    pub player: Player,
    pub field: ObstacleField,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(rng: R) -> Self {
        Self {
            session: Session::default(),
            player: Player::new(),
            field: ObstacleField::new(),
            rng,
        }
    }

    pub fn update(&mut self, input: Input) -> Vec<FrameEvent> {
        let mut events = Vec::new();

        match self.session.state {
            GameState::Ready => {
                if input.confirm {
                    self.session.first_time = false;
                    self.transition(GameState::Playing);
                    events.push(FrameEvent::Started);
                }
            }
            GameState::Playing => self.update_playing(input, &mut events),
            GameState::GameOver | GameState::GameClear => {
                if input.confirm {
                    self.restart();
                    events.push(FrameEvent::Restarted);
                }
            }
        }

        events
    }

    /// Move, then test for a crash, then score, then test for a clear.
    ///
    /// The score check still runs after a crash, and a clear reached in that
    /// same frame replaces the game over.
    fn update_playing(&mut self, input: Input, events: &mut Vec<FrameEvent>) {
        self.player.update(input.jump);
        if input.jump {
            events.push(FrameEvent::Jumped);
        }
        self.field.update(&mut self.rng);

        if self.field.check_collision(&self.player) || self.player.is_out_of_bounds() {
            self.transition(GameState::GameOver);
            events.push(FrameEvent::Crashed);
        }

        if self.field.try_score(&self.player, &mut self.session.score) {
            log::debug!("scored, now {}", self.session.score);
            events.push(FrameEvent::Scored(self.session.score));
        }

        if self.session.score >= CLEAR_SCORE {
            self.transition(GameState::GameClear);
            events.push(FrameEvent::Cleared);
        }

        if self.session.state != GameState::Playing {
            self.session.best = self.session.best.max(self.session.score);
        }
    }

    fn restart(&mut self) {
        self.player.reset();
        self.field.reset();
        self.session.score = 0;
        self.transition(GameState::Playing);
    }

    fn transition(&mut self, next: GameState) {
        log::info!("{:?} -> {:?} (score {})", self.session.state, next, self.session.score);
        self.session.state = next;
    }
}

impl<R> Game<R> {
    pub fn draw(&self, surface: &mut impl Surface) {
        let cx = SCREEN_WIDTH / 2.0;
        let cy = SCREEN_HEIGHT / 2.0;
        let score = self.session.score;
        let best = self.session.best;

        surface.clear(BACKGROUND);

        match self.session.state {
            GameState::Playing => {
                self.player.draw(surface);
                self.field.draw(surface);
                surface.draw_text(&score.to_string(), 10.0, 10.0, 30, Align::Left, INK);
            }
            GameState::Ready => {
                if self.session.first_time {
                    surface.draw_text(TITLE, cx, cy - 100.0, 50, Align::Center, INK);
                    surface.draw_text("Press 'ENTER' to start", cx, cy, 20, Align::Center, INK);
                }
            }
            GameState::GameOver => {
                surface.draw_text("GAME OVER", cx, cy - 50.0, 50, Align::Center, INK);
                surface.draw_text(&format!("Score: {score}"), cx, cy, 25, Align::Center, INK);
                surface.draw_text(&format!("Best: {best}"), cx, cy + 25.0, 20, Align::Center, INK);
                surface.draw_text(
                    "Press 'ENTER' to Restart",
                    cx,
                    cy + 50.0,
                    20,
                    Align::Center,
                    INK,
                );
            }
            GameState::GameClear => {
                surface.draw_text("GAME CLEAR!!", cx, cy - 50.0, 50, Align::Center, GOLD);
                surface.draw_text(
                    &format!("Final Score: {score}"),
                    cx,
                    cy,
                    25,
                    Align::Center,
                    INK,
                );
                surface.draw_text(&format!("Best: {best}"), cx, cy + 25.0, 20, Align::Center, INK);
                surface.draw_text(
                    "Press 'ENTER' to Play Again",
                    cx,
                    cy + 50.0,
                    20,
                    Align::Center,
                    INK,
                );
            }
        }
    }
}
