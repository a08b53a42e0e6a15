use std::{
    io::{self, Stdout},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{heatmap, scatter, ChartRenderer, ChartStyle, DismissPolicy};
use crate::log_info;
use crate::models::{AbsenceMatrix, ChartKind};

const ENABLE_LOGS: bool = true;

type Screen = Terminal<CrosstermBackend<Stdout>>;

/// Draws charts on the alternate screen, leaving the prompt screen untouched.
pub struct TerminalRenderer {
    style: ChartStyle,
    policy: DismissPolicy,
    screen: Option<Screen>,
}

impl TerminalRenderer {
    pub fn new(style: ChartStyle, policy: DismissPolicy) -> Self {
        Self {
            style,
            policy,
            screen: None,
        }
    }
}

fn enter(screen: &mut Option<Screen>) -> Result<&mut Screen> {
    if screen.is_none() {
        enable_raw_mode().context("failed to enable raw mode")?;
        match open_screen() {
            Ok(terminal) => *screen = Some(terminal),
            Err(err) => {
                // Nothing owns the terminal yet, so Drop will not restore it.
                let _ = io::stdout().execute(LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err);
            }
        }
    }
    screen
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("terminal not initialised"))
}

fn open_screen() -> Result<Screen> {
    io::stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialise terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;
    terminal.clear().context("failed to clear terminal")?;
    Ok(terminal)
}

fn leave(screen: &mut Option<Screen>) -> Result<()> {
    let Some(mut terminal) = screen.take() else {
        return Ok(());
    };
    // Keys pressed while the chart was up must not leak into the next answer.
    while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
        event::read().context("failed to read terminal event")?;
    }
    disable_raw_mode().context("failed to disable raw mode")?;
    terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, matrix: &AbsenceMatrix, kind: ChartKind) -> Result<()> {
        let style = &self.style;
        let terminal = enter(&mut self.screen)?;
        terminal
            .draw(|frame| {
                let area = frame.area();
                match kind {
                    ChartKind::Scatter => scatter::draw(frame, area, matrix, style),
                    ChartKind::Heatmap => heatmap::draw(frame, area, matrix, style),
                }
            })
            .with_context(|| format!("failed to draw {} chart", kind.display_name()))?;
        log_info!("Rendered {} chart", kind.display_name());
        Ok(())
    }

    fn dismiss(&mut self) -> Result<()> {
        if self.screen.is_none() {
            return Ok(());
        }
        match self.policy {
            DismissPolicy::Pause { millis } => thread::sleep(Duration::from_millis(millis)),
            DismissPolicy::UntilKeypress => wait_for_key()?,
        }
        leave(&mut self.screen)?;
        log_info!("Chart dismissed");
        Ok(())
    }

    fn blank(&mut self, duration: Duration) -> Result<()> {
        enter(&mut self.screen)?
            .clear()
            .context("failed to clear terminal")?;
        thread::sleep(duration);
        leave(&mut self.screen)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if self.screen.is_some() {
            if let Err(err) = leave(&mut self.screen) {
                log::error!("Failed to restore terminal: {err:#}");
            }
        }
    }
}
