//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results are collected through an "inbox" channel:
//! - Spawned tasks send `UiEvent`s directly to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//! - The navigator reports destinations through the same inbox, so
//!   navigation is fire-and-forget for whoever requests it

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use postern_core::config::Config;
use postern_core::routes::{Navigator, Route};
use postern_core::session::SessionProvider;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::account::{AccountEvent, SignOutPhase};
use crate::state::TuiState;
use crate::{render, terminal, update};

/// Tick cadence while something is animating or outstanding.
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Poll cadence when idle. Longer timeout reduces CPU usage when nothing is
/// happening.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Navigator that reports destinations back into the runtime inbox.
///
/// `go_to` never blocks; the reducer picks the route up as a `Navigated`
/// event on the next frame.
pub struct ChannelNavigator {
    tx: UiEventSender,
}

impl Navigator for ChannelNavigator {
    fn go_to(&self, route: Route) {
        let _ = self.tx.send(UiEvent::Navigated(route));
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct TuiRuntime<P: SessionProvider> {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: TuiState,
    /// Session provider; the only collaborator that touches session state.
    provider: Arc<P>,
    /// Navigation collaborator.
    navigator: Arc<dyn Navigator>,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl<P: SessionProvider> TuiRuntime<P> {
    /// Creates a new TUI runtime.
    ///
    /// Must be called from within a tokio runtime; effect execution spawns
    /// tasks onto it.
    pub fn new(config: Config, provider: P) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let navigator = Arc::new(ChannelNavigator {
            tx: inbox_tx.clone(),
        });

        Ok(Self {
            terminal,
            state: TuiState::new(config),
            provider: Arc::new(provider),
            navigator,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        // Session state is unknown until the first resolve completes; the
        // panel renders the disabled placeholder in the meantime.
        self.execute_effect(UiEffect::ResolveSession);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (inbox, terminal, tick timer).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain inbox - async results and navigation arrive here
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        // Fast tick only while the spinner is visible or a call is pending
        let animating = self.state.account.snapshot.is_resolving
            || self.state.account.phase() == SignOutPhase::ActionInFlight;
        let tick_interval = if animating {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise, block until the next tick is due
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect whose result event lands in the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::ResolveSession => {
                let provider = Arc::clone(&self.provider);
                self.spawn_effect(move || async move {
                    let result = provider.load().await.map_err(|e| format!("{e:#}"));
                    UiEvent::Account(AccountEvent::SessionResolved(result))
                });
            }
            UiEffect::SpawnSignOut => {
                let provider = Arc::clone(&self.provider);
                self.spawn_effect(move || async move {
                    let result = provider.end_session().await.map_err(|e| format!("{e:#}"));
                    UiEvent::Account(AccountEvent::SignOutFinished(result))
                });
            }
            UiEffect::Navigate { route } => {
                self.navigator.go_to(route);
            }
            UiEffect::OpenBrowser { url } => {
                let _ = open::that(&url);
            }
        }
    }
}

impl<P: SessionProvider> Drop for TuiRuntime<P> {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
