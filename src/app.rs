//! Application layer.
//!
//! [`Session`] owns everything a round needs (game state, scheduler, input
//! router, view) and reacts to events and clock readings without touching the
//! terminal. [`App`] wraps a session with the terminal: it polls events until
//! the next tick deadline, steps the session and flushes frames.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::config::Config;
use crate::core::GameState;
use crate::engine::FixedTimestep;
use crate::input::{control_action, InputCode, InputEvent, InputRouter, Keymap, CONTROL_CODES};
use crate::signals::{self, SignalFlags};
use crate::term::{terminal_size, FrameBuffer, GameView, Hud, TerminalRenderer};
use crate::types::{Action, SLOW_MOTION, SUPER_SLOW_MOTION};

/// What the surrounding loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    /// Pause and hand the terminal back until the user returns.
    Suspend,
    /// Like [`Control::Suspend`], showing the key bindings.
    Help,
    /// Treat as a window change and repaint everything.
    Redraw,
}

pub struct Session {
    config: Config,
    game: GameState,
    scheduler: FixedTimestep,
    router: InputRouter,
    view: GameView,
}

impl Session {
    /// Start a session on a `width` x `height` terminal (ignored when the
    /// config fixes the size).
    pub fn new(config: Config, width: u32, height: u32, now: Instant) -> Self {
        let keymap = build_keymap(config.keymap.as_deref());
        let (width, height) = config.size.unwrap_or((width, height));
        let game = GameState::new(config.round_settings(), width, height);
        let scheduler = FixedTimestep::with_fps(config.fps, now);
        let view = GameView::new(config.color);

        Self {
            config,
            game,
            scheduler,
            router: InputRouter::new(keymap),
            view,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn scheduler(&self) -> &FixedTimestep {
        &self.scheduler
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.game.width()
    }

    pub fn height(&self) -> u32 {
        self.game.height()
    }

    /// Route one decoded event and apply the resulting actions.
    pub fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Control {
        let routed = self.router.route(event, self.width(), self.height());
        if let Some(line) = routed.submitted {
            log::debug!("prompt: {line:?}");
        }

        let mut control = Control::Continue;
        for action in routed.actions {
            let next = self.apply(action, now);
            if control == Control::Continue || next == Control::Quit {
                control = next;
            }
        }
        control
    }

    /// Dispatch one action tag.
    pub fn apply(&mut self, action: Action, now: Instant) -> Control {
        match action {
            Action::Quit => return Control::Quit,
            Action::Suspend => return Control::Suspend,
            Action::Help => return Control::Help,
            Action::Redraw => return Control::Redraw,
            Action::Reset => self.reset(now),
            Action::Float | Action::HoldStart | Action::HoldEnd => {
                self.game.apply_action(action);
            }
            Action::ToggleColor => {
                let on = self.view.toggle_color();
                log::debug!("colour {}", if on { "on" } else { "off" });
            }
            Action::SlowMotion => self.scheduler.toggle_time_scale(SLOW_MOTION),
            Action::SuperSlowMotion => self.scheduler.toggle_time_scale(SUPER_SLOW_MOTION),
            // The router already opened the prompt.
            Action::Prompt => {}
        }
        Control::Continue
    }

    /// Run every fixed step due at `now`. Returns the number of steps.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let game = &mut self.game;
        self.scheduler.tick(now, |dt| {
            game.update(dt);
        })
    }

    pub fn render_into(&self, fb: &mut FrameBuffer) {
        let hud = Hud {
            fps: self.scheduler.fps(),
            time_scale: self.scheduler.time_scale(),
            prompt: Some(self.router.prompt()),
        };
        self.view.render_into(&self.game, &hud, fb);
    }

    /// New round with fresh settings, keeping the high score.
    pub fn reset(&mut self, now: Instant) {
        self.game.reset(self.config.round_settings());
        self.scheduler.reset(now);
    }

    /// The terminal changed size (or a redraw was forced).
    ///
    /// Starts a new round sized to the terminal unless the size is fixed.
    pub fn resize(&mut self, width: u32, height: u32, now: Instant) {
        if self.config.size.is_some() {
            return;
        }
        log::info!("resize to {width}x{height}");
        self.game.resize(self.config.round_settings(), width, height);
        self.scheduler.reset(now);
    }

    pub fn pause(&mut self) {
        log::info!("paused");
        self.scheduler.pause();
    }

    pub fn resume(&mut self, now: Instant) {
        log::info!("resumed");
        self.scheduler.resume(now);
    }
}

/// Default bindings with `overrides` (the `FLOATYBOX_KEYMAP` syntax) applied.
pub fn build_keymap(overrides: Option<&str>) -> Keymap {
    let mut keymap = Keymap::default();
    if let Some(overrides) = overrides {
        let applied = keymap.apply_overrides(overrides);
        log::info!("applied {applied} keymap override(s)");
    }
    keymap
}

/// Key binding listing for the help screen and `--help`.
pub fn key_bindings(keymap: &Keymap) -> String {
    let mut out = String::from("Key Bindings:\n");
    for action in Action::ALL {
        let mut codes: Vec<String> = CONTROL_CODES
            .iter()
            .filter(|c| control_action(**c) == Some(action))
            .map(|c| c.label())
            .collect();
        codes.extend(keymap.codes_for(action).into_iter().map(InputCode::label));
        if codes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {:<36} {}", codes.join(", "), action.description());
    }
    out
}

pub struct App {
    session: Session,
    fb: FrameBuffer,
    signals: SignalFlags,
}

impl App {
    /// Session sized to the current terminal.
    pub fn new(config: Config) -> Result<Self> {
        let (w, h) = terminal_size()?;
        let session = Session::new(config, w as u32, h as u32, Instant::now());
        Ok(Self {
            session,
            fb: FrameBuffer::new(w, h),
            signals: SignalFlags::register()?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until quit. The terminal must already be entered.
    pub fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let mut deadline = Instant::now();

        loop {
            // Signals, then input with timeout until next tick.
            loop {
                let control = match self.signal_control() {
                    Control::Continue => {
                        let timeout = deadline.saturating_duration_since(Instant::now());
                        if !event::poll(timeout)? {
                            break;
                        }
                        self.read_event(term)?
                    }
                    control => control,
                };
                if self.dispatch(term, control)? {
                    return Ok(());
                }
            }

            // Tick.
            let started = Instant::now();
            self.session.tick(started);
            self.session.render_into(&mut self.fb);
            term.draw_swap(&mut self.fb)?;
            deadline = self.session.scheduler().next_deadline(started, Instant::now());
        }
    }

    fn signal_control(&self) -> Control {
        if self.signals.take_terminate() {
            log::info!("terminated by signal");
            Control::Quit
        } else if self.signals.take_suspend() {
            Control::Suspend
        } else {
            Control::Continue
        }
    }

    fn read_event(&mut self, term: &mut TerminalRenderer) -> Result<Control> {
        Ok(match event::read()? {
            Event::Resize(w, h) => {
                self.session.resize(w as u32, h as u32, Instant::now());
                term.invalidate();
                Control::Continue
            }
            ev => {
                let input = InputEvent::from_crossterm(&ev, self.session.height());
                self.session.handle_event(&input, Instant::now())
            }
        })
    }

    /// Act on `control`. Returns true when the loop should stop.
    fn dispatch(&mut self, term: &mut TerminalRenderer, control: Control) -> Result<bool> {
        match control {
            Control::Continue => {}
            Control::Quit => return Ok(true),
            Control::Suspend => self.suspend(term)?,
            Control::Help => {
                let mut text = key_bindings(self.session.router().keymap());
                text.push_str("\npress <enter> to resume");
                self.pause(term, &text)?;
            }
            Control::Redraw => self.redraw(term)?,
        }
        Ok(false)
    }

    /// Hand the terminal back to the shell and stop until continued.
    fn suspend(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        self.session.pause();
        term.exit()?;

        log::info!("stopping");
        if let Err(err) = signals::stop_process() {
            log::debug!("cannot stop ({err}), waiting for enter");
            wait_for_enter("floatybox paused, press <enter> to resume")?;
        }

        term.enter()?;
        self.session.resume(Instant::now());
        self.redraw(term)
    }

    /// Leave the terminal, print `message` and wait for Enter.
    fn pause(&mut self, term: &mut TerminalRenderer, message: &str) -> Result<()> {
        self.session.pause();
        term.exit()?;
        wait_for_enter(message)?;
        term.enter()?;
        self.session.resume(Instant::now());
        self.redraw(term)
    }

    fn redraw(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let (w, h) = terminal_size()?;
        self.session.resize(w as u32, h as u32, Instant::now());
        term.invalidate();
        Ok(())
    }
}

fn wait_for_enter(message: &str) -> Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{message}")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
