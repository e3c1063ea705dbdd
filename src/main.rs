use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use flappy_gate::audio::{Audio, Cue};
use flappy_gate::config::FPS;
use flappy_gate::pixel_buf::PixelBuf;
use flappy_gate::{Game, Input};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::io::{self, Stdout, stdout};
use std::time::{Duration, Instant};

// ── Terminal ────────────────────────────────────────────────────────────────

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

// ── Input ───────────────────────────────────────────────────────────────────

/// Drain pending terminal events. `None` means the player asked to quit.
fn poll_input(buf: &mut PixelBuf) -> io::Result<Option<Input>> {
    let mut input = Input::default();

    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                KeyCode::Enter => input.confirm = true,
                KeyCode::Char(' ') => input.jump = true,
                _ => {}
            },
            Event::Resize(cols, rows) => {
                log::debug!("terminal resized to {cols}x{rows}");
                buf.resize(cols as usize, rows as usize * 2);
            }
            _ => {}
        }
    }

    Ok(Some(input))
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    env_logger::init();

    let seed: u64 = rand::rng().random();
    log::info!("flappy-gate starting, seed {seed}");

    // Before raw mode: backends may complain on stderr while probing devices
    let audio = Audio::open();

    let mut term = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;
    log::info!("terminal {cols}x{rows}");

    let mut buf = PixelBuf::for_terminal(cols, rows);
    let mut game = Game::new(Pcg32::seed_from_u64(seed));

    let frame_dur = Duration::from_secs(1) / FPS;

    loop {
        let frame_start = Instant::now();

        // Input
        let Some(input) = poll_input(&mut buf)? else {
            break;
        };

        // Update
        for event in game.update(input) {
            if let Some(cue) = Cue::for_event(event) {
                audio.play(cue);
            }
        }

        // Render
        game.draw(&mut buf);
        buf.render(&mut term.out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }

    drop(term);
    log::info!("flappy-gate exiting, best score {}", game.session.best);
    Ok(())
}
