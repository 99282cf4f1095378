//! Interactive terminal animation.
//!
//! One evaluator step is taken per frame and the chain is redrawn, with a
//! status line under the canvas. Input is polled between frames so the
//! frame period stays close to the configured interval.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use normal_modes::{DisplacementPair, MotionEvaluator, PhysicalParameters};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::render::Renderer;
use crate::session::Session;

/// Rows kept free below the canvas for the status line.
const STATUS_ROWS: u16 = 1;

const KEY_HELP: &str = "  (q quit, r restart, space pause)";

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep animating.
    Continue,
    /// Stop and restore the terminal.
    Quit,
}

/// Animation state, independent of the terminal.
#[derive(Debug, Clone)]
pub struct Animation {
    params: PhysicalParameters,
    evaluator: MotionEvaluator,
    renderer: Renderer,
    color: bool,
    paused: bool,
}

impl Animation {
    /// New animation at `t = 0`.
    #[must_use]
    pub const fn new(
        params: PhysicalParameters,
        evaluator: MotionEvaluator,
        renderer: Renderer,
        color: bool,
    ) -> Self {
        Self {
            params,
            evaluator,
            renderer,
            color,
            paused: false,
        }
    }

    /// The evaluator driving the motion.
    #[must_use]
    pub const fn evaluator(&self) -> &MotionEvaluator {
        &self.evaluator
    }

    /// Whether time is frozen.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current renderer.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Applies a terminal event.
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.renderer
                    .resize(*width, height.saturating_sub(STATUS_ROWS));
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Control::Quit,
            KeyCode::Char('r') => {
                info!("animation restarted");
                self.evaluator.reset();
                Control::Continue
            }
            KeyCode::Char(' ' | 'p') => {
                self.paused = !self.paused;
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    /// Advances one frame unless paused and returns the displacements to draw.
    pub fn tick(&mut self) -> DisplacementPair {
        if self.paused {
            self.evaluator.current()
        } else {
            self.evaluator.step()
        }
    }

    /// Text shown under the canvas, cut to the canvas width.
    ///
    /// The key help is appended only when the whole line still fits.
    #[must_use]
    pub fn status_line(&self, pair: DisplacementPair) -> String {
        let modes = self.evaluator.modes();
        let state = if self.paused { "[paused]  " } else { "" };
        let mut line = format!(
            "{state}t = {:.2}  x1 = {:+.3}  x2 = {:+.3}  omega1 = {:.3}  omega2 = {:.3}",
            self.evaluator.elapsed(),
            pair.x1,
            pair.x2,
            modes.omega1(),
            modes.omega2(),
        );

        let width = usize::from(self.renderer.size().0);
        if line.chars().count() + KEY_HELP.len() <= width {
            line.push_str(KEY_HELP);
        }
        line.chars().take(width).collect()
    }

    /// Queues one full frame on `out`.
    ///
    /// # Errors
    ///
    /// I/O failures on `out`.
    pub fn draw<W: Write>(&self, out: &mut W, pair: DisplacementPair) -> io::Result<()> {
        let canvas = self.renderer.render(&self.params, pair);
        for (row, cells) in canvas.rows().enumerate() {
            let line = if self.color {
                canvas.styled_row(row)
            } else {
                cells.iter().map(|cell| cell.ch).collect()
            };
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(out, MoveTo(0, row), Print(line))?;
        }

        let (_, height) = self.renderer.size();
        queue!(
            out,
            MoveTo(0, height),
            Clear(ClearType::CurrentLine),
            Print(self.status_line(pair))
        )?;
        out.flush()
    }
}

/// Raw mode and alternate screen for as long as it lives.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(mut out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { out })
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs the animation until the user quits.
///
/// When `session` is given it is saved as running before the first frame
/// and marked stopped after the terminal is restored.
///
/// # Errors
///
/// Terminal I/O failures. Session write failures are logged, not returned.
pub fn run(
    mut animation: Animation,
    interval: Duration,
    session: Option<(Session, PathBuf)>,
) -> Result<()> {
    if let Some((session, path)) = &session {
        if let Err(err) = session.save(path) {
            warn!(error = %err, "could not save session");
        }
    }

    let (width, height) = terminal::size()?;
    animation.handle_event(&Event::Resize(width, height));
    info!(width, height, ?interval, "animation started");

    let outcome = animate(&mut animation, interval);

    if let Some((session, path)) = session {
        if let Err(err) = session.mark_stopped(&path) {
            warn!(error = %err, "could not update session");
        }
    }
    info!(
        steps = animation.evaluator().steps(),
        elapsed = animation.evaluator().elapsed(),
        "animation stopped"
    );
    outcome
}

fn animate(animation: &mut Animation, interval: Duration) -> Result<()> {
    let mut guard = TerminalGuard::enter(io::stdout())?;

    loop {
        let deadline = Instant::now() + interval;
        let pair = animation.tick();
        animation.draw(&mut guard.out, pair)?;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                execute!(guard.out, Clear(ClearType::All))?;
            }
            if animation.handle_event(&event) == Control::Quit {
                return Ok(());
            }
        }
    }
}
