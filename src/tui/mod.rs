use std::io::{self, stdout, Stdout};
use std::sync::Arc;

use crate::game::{Round, Screen};
use crate::words::{FetchStatus, WordSource};

use crossterm::{execute, terminal::*};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use actions::Action;
use tokio_util::sync::CancellationToken;

mod actions;
mod events;
mod ui;

/// How often a resolved word may be rejected for being too long before
/// the fetch as a whole is treated as failed.
const MAX_FETCH_ATTEMPTS: u32 = 5;

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore().unwrap();
        original_hook(panic_info);
    }));
}

/// Initialize the terminal
pub fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

pub struct App {
    exit: bool,
    screen: Screen,
    round: Round,
    fetch: FetchStatus,
    fetch_attempts: u32,
    error: Option<String>,
    source: Arc<dyn WordSource>,
    action_tx: mpsc::UnboundedSender<Option<Action>>,
    action_rx: mpsc::UnboundedReceiver<Option<Action>>,
    token: CancellationToken,
    fetch_token: Option<CancellationToken>,
}

impl App {
    pub fn init(source: Arc<dyn WordSource>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        App {
            exit: false,
            screen: Screen::FirstGame,
            round: Round::default(),
            fetch: FetchStatus::Idle,
            fetch_attempts: 0,
            error: None,
            source,
            action_tx,
            action_rx,
            token: CancellationToken::new(),
            fetch_token: None,
        }
    }

    /// runs the application's main loop until the user quits
    pub async fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        let task = self.handle_events(self.action_tx.clone());

        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;

            if let Some(action) = self.action_rx.recv().await {
                self.update(action);
            }
        }
        task.abort();
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.size());
    }
}
