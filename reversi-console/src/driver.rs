//! The event loop: keyboard lines in, session calls out, on a steady tick.

use crate::config::ConsoleConfig;
use crate::input::{self, Command};
use crate::view::TextView;
use anyhow::Result;
use reversi_core::{GameSession, Millis, Observer};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Forward stdin lines to a channel from a background thread.
/// The channel disconnects when stdin closes.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// What the loop should do after a batch of commands.
enum Flow {
    Continue,
    NewGame,
    Quit,
}

fn apply<O: Observer>(session: &mut GameSession<O>, command: Command, now: Millis) -> Flow {
    match command {
        Command::MoveCursor { dx, dy } => session.move_cursor(dx, dy),
        Command::Place => {
            session.attempt_place(now);
        }
        Command::ToggleTimed => session.toggle_timed_mode(now),
        Command::TogglePause => session.toggle_pause(now),
        Command::NewGame if session.is_game_over() => return Flow::NewGame,
        Command::NewGame => debug!("new game ignored while a game is running"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Play games until the player quits or `lines` disconnects.
pub fn run<W: Write>(config: &ConsoleConfig, lines: Receiver<String>, out: W) -> Result<()> {
    let start = Instant::now();
    let now = || start.elapsed().as_millis() as Millis;
    let poll = Duration::from_millis(config.poll_interval_ms.max(1));
    let mut view = TextView::new(out);

    loop {
        view.reset();
        let mut session = GameSession::new(&config.session, now(), &mut view);
        let mut next_flash = now() + config.flash_interval_ms;
        session.observer_mut().flush()?;

        let flow = loop {
            let flow = match lines.recv_timeout(poll) {
                Ok(line) => {
                    let mut flow = Flow::Continue;
                    for command in input::decode(&line) {
                        flow = apply(&mut session, command, now());
                        if !matches!(flow, Flow::Continue) {
                            break;
                        }
                    }
                    flow
                }
                Err(RecvTimeoutError::Timeout) => Flow::Continue,
                Err(RecvTimeoutError::Disconnected) => Flow::Quit,
            };

            let t = now();
            session.tick(t);
            if t >= next_flash {
                session.flash_cursor();
                next_flash = t + config.flash_interval_ms;
            }
            session.observer_mut().flush()?;

            if !matches!(flow, Flow::Continue) {
                break flow;
            }
        };

        match flow {
            Flow::NewGame => info!("starting a new game"),
            _ => return Ok(()),
        }
    }
}
