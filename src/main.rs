//! Motion Tetris runner (default binary).
//!
//! Keyboard and gesture feed share one command channel. The loop renders,
//! waits for input until the next tick, then advances the session by one
//! tick on a monotonic millisecond clock.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use motion_tetris::core::{GameSession, GameSnapshot};
use motion_tetris::gesture::{GestureFeed, GestureSource};
use motion_tetris::input::{
    handle_key_event, merge_signals, CommandSource, KeyInput, KeyboardQueue,
};
use motion_tetris::term::{
    FpsCounter, FrameBuffer, GameView, GestureStatusView, HudView, TerminalRenderer, Viewport,
};
use motion_tetris::types::TICK_MS;
use motion_tetris::AppConfig;

fn main() -> Result<()> {
    init_tracing()?;

    let config = AppConfig::from_env();
    let feed = match config.gesture.clone() {
        Some(server) => Some(GestureFeed::start(server).context("starting gesture feed")?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, feed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a subscriber only when a log file is configured; the terminal is
/// in raw mode and owned by the renderer.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("MOTION_TETRIS_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let filter =
        EnvFilter::try_from_env("MOTION_TETRIS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    mut feed: Option<GestureFeed>,
) -> Result<()> {
    let mut session = GameSession::new(config.session);
    if let Some(feed) = &feed {
        info!(addr = %feed.addr(), "gesture feed enabled");
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut fps = FpsCounter::new();

    let mut keyboard = KeyboardQueue::new();
    let mut gestures = GestureSource::default();

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        let frame_ms = now_ms();
        let hud = HudView {
            fps: fps.value(),
            gesture: feed.as_ref().map(|_| {
                let current = gestures.current(frame_ms);
                GestureStatusView {
                    connected: gestures.has_seen_frames(),
                    reading: current.map(|f| f.command),
                    hands: current.map(|f| f.hands).unwrap_or(0),
                }
            }),
        };
        let layout = view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb, &layout)?;
        fps.frame(frame_ms);

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match handle_key_event(key) {
                    Some(KeyInput::Quit) => return Ok(()),
                    Some(KeyInput::Restart) => {
                        session.reset();
                        keyboard.clear();
                        gestures.clear();
                        info!("session restarted");
                    }
                    Some(KeyInput::ToggleFastDrop) => {
                        let on = keyboard.toggle_fast_drop();
                        debug!(on, "keyboard fast drop");
                    }
                    Some(KeyInput::Command(command)) => keyboard.push(command),
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let tick_ms = now_ms();

            if let Some(feed) = feed.as_mut() {
                if let Some(frame) = feed.latest(tick_ms) {
                    gestures.observe(frame);
                }
            }

            let mut sources: [&mut dyn CommandSource; 2] = [&mut keyboard, &mut gestures];
            let signal = merge_signals(&mut sources, tick_ms);
            let outcome = session.tick(signal, tick_ms);

            if let Some(lock) = session.take_last_event() {
                if lock.lines_cleared > 0 {
                    // Hook point for a line-clear sound cue.
                    debug!(lines = lock.lines_cleared, gained = lock.score_gained, "line clear");
                }
            }
            // Game over can only start on the tick that locked the last piece.
            if outcome.game_over && outcome.lock.is_some() {
                info!(score = session.score(), lines = session.lines_cleared_total(), "game over");
            }
        }
    }
}
