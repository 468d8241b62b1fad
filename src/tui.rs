//! Terminal wrapper.
//!
//! [`Tui`] owns the ratatui terminal, raw mode and the alternate screen, and
//! feeds key, paste, tick and render events into a channel from a background
//! task.

use std::io::Stdout;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::cursor;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, EventStream, KeyCode,
    KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// How long the event task gets to notice cancellation before it is aborted.
const ABORT_AFTER: Duration = Duration::from_millis(500);
const GIVE_UP_AFTER: Duration = Duration::from_secs(2);

pub type Backend = CrosstermBackend<Stdout>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    Error(String),
    Tick,
    Render,
    Paste(String),
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

impl Event {
    /// Translate a terminal event. Key releases, focus changes and mouse
    /// events have no meaning here and yield `None`.
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Press => None,
            // Raw mode swallows SIGINT, so ctrl+c is turned back into a quit.
            CrosstermEvent::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                Some(Self::Quit)
            }
            CrosstermEvent::Key(key) => Some(Self::Key(key)),
            CrosstermEvent::Paste(text) => Some(Self::Paste(text)),
            CrosstermEvent::Resize(width, height) => Some(Self::Resize(width, height)),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Mouse(_) => {
                None
            }
        }
    }
}

pub struct Tui {
    terminal: Terminal<Backend>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
    title: String,
}

impl Tui {
    /// Create a new TUI with the given frame and tick rates, in events per second.
    pub fn new(frame_rate: f64, tick_rate: f64) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal: Terminal::new(Backend::new(std::io::stdout()))?,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate,
            tick_rate,
            title: String::new(),
        })
    }

    /// Window title set on every `enter`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enter raw mode and the alternate screen, then start the event task.
    pub fn enter(&mut self) -> color_eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        if !self.title.is_empty() {
            crossterm::execute!(std::io::stdout(), SetTitle(&self.title))?;
        }

        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        self.task = tokio::spawn(Self::pump_events(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            Duration::from_secs_f64(1.0 / self.tick_rate),
            Duration::from_secs_f64(1.0 / self.frame_rate),
        ));
        Ok(())
    }

    /// Stop the event task and restore the terminal.
    pub fn exit(&mut self) -> color_eyre::Result<()> {
        self.stop_task()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(
                std::io::stdout(),
                DisableBracketedPaste,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Hand the terminal back to the shell and stop the process (ctrl+z).
    /// Execution continues here once the shell resumes it.
    pub fn suspend(&mut self) -> color_eyre::Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    pub fn resume(&mut self) -> color_eyre::Result<()> {
        debug!("Resuming after suspend");
        self.enter()
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn stop_task(&mut self) -> color_eyre::Result<()> {
        self.cancellation_token.cancel();
        let started = Instant::now();
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            let waited = started.elapsed();
            if waited >= GIVE_UP_AFTER {
                return Err(eyre!("Terminal event task did not stop"));
            }
            if waited >= ABORT_AFTER {
                self.task.abort();
            }
        }
        Ok(())
    }

    async fn pump_events(
        event_tx: UnboundedSender<Event>,
        cancellation_token: CancellationToken,
        tick_every: Duration,
        render_every: Duration,
    ) {
        let mut terminal_events = EventStream::new();
        let mut ticks = interval(tick_every);
        let mut frames = interval(render_every);

        #[cfg(unix)]
        {
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                        let _ = event_tx.send(Event::Quit);
                    }
                    Err(e) => warn!("Failed to install SIGTERM handler: {e}"),
                }
            });
        }

        loop {
            let event = tokio::select! {
                () = cancellation_token.cancelled() => break,
                _ = ticks.tick() => Event::Tick,
                _ = frames.tick() => Event::Render,
                next = terminal_events.next().fuse() => match next {
                    Some(Ok(raw)) => match Event::from_terminal(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(e)) => Event::Error(e.to_string()),
                    None => break,
                },
            };
            if event_tx.send(event).is_err() {
                break;
            }
        }
    }
}

impl Deref for Tui {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!("Failed to restore terminal: {e}");
        }
    }
}
