//! UI event loop and key handling

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use crate::{
    config::Config,
    form::NewCycleForm,
    state::{AppState, CountdownDisplay},
    ui::{self, Page},
    utils::shutdown_signal,
};

/// Terminal title shown when no cycle is active.
pub const APP_TITLE: &str = "focus-timer";

/// The interactive application: owns the form, the current page, and the
/// terminal session. All user-initiated state mutation goes through here.
pub struct App {
    state: Arc<AppState>,
    form: NewCycleForm,
    page: Page,
    should_quit: bool,
}

impl App {
    pub fn new(state: Arc<AppState>, config: &Config) -> Self {
        Self {
            state,
            form: NewCycleForm::new(config.suggestions.clone()),
            page: Page::Timer,
            should_quit: false,
        }
    }

    /// Enter the terminal session, run the event loop, and always restore the
    /// terminal on the way out.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle(APP_TITLE))
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to build terminal")?;

        let result = self.event_loop(&mut terminal).await;

        if let Err(e) = restore_terminal() {
            error!("Failed to restore terminal: {}", e);
        }

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut countdown_rx = self.state.watch_countdown();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key)?;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(anyhow::Error::new(e).context("terminal event stream failed"));
                        }
                        None => break,
                    }
                }
                changed = countdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.sync_title()?;
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let cycles = self.state.cycles_snapshot().map_err(anyhow::Error::msg)?;
        let countdown = self.state.countdown().map_err(anyhow::Error::msg)?;

        let view = ui::View {
            page: self.page,
            form: &self.form,
            cycles: &cycles,
            countdown: &countdown,
        };
        terminal
            .draw(|frame| ui::draw(frame, &view))
            .context("failed to draw frame")?;

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => self.page = Page::Timer,
            KeyCode::F(2) => self.page = Page::History,
            KeyCode::Esc => self.interrupt()?,
            _ => match self.page {
                Page::Timer => self.handle_form_key(key)?,
                Page::History => {
                    if key.code == KeyCode::Char('q') {
                        self.should_quit = true;
                    }
                }
            },
        }

        Ok(())
    }

    /// Form editing keys. Both fields are disabled while a cycle is active.
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let form_enabled = self
            .state
            .active_cycle()
            .map_err(anyhow::Error::msg)?
            .is_none();
        if !form_enabled {
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Up => self.form.step_up(),
            KeyCode::Down => self.form.step_down(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.submit()?,
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }

        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        let Some(new_cycle) = self.form.submit() else {
            debug!("Form validation failed: {:?}", self.form.errors());
            return Ok(());
        };

        self.state
            .start_cycle(new_cycle)
            .map_err(anyhow::Error::msg)?;
        Ok(())
    }

    fn interrupt(&mut self) -> Result<()> {
        self.state
            .interrupt_active_cycle()
            .map_err(anyhow::Error::msg)?;
        Ok(())
    }

    /// Mirror the countdown into the terminal title while a cycle is active;
    /// restore the application name otherwise.
    fn sync_title(&self) -> Result<()> {
        let countdown = self.state.countdown().map_err(anyhow::Error::msg)?;
        let active_cycle = self.state.active_cycle().map_err(anyhow::Error::msg)?;

        let title = if countdown.is_active() {
            CountdownDisplay::derive(active_cycle.as_ref(), countdown.seconds_passed).clock()
        } else {
            APP_TITLE.to_string()
        };

        execute!(io::stdout(), SetTitle(title)).context("failed to set terminal title")?;
        Ok(())
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("failed to leave alternate screen")?;
    Ok(())
}
