//! Main TUI application state and logic

use crate::checker::Outcome;
use crate::snapshot::CacheId;
use crate::verify::Verification;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Caches,
    Stats,
    Results,
}

impl FocusedPane {
    /// Move focus to the next pane (caches -> stats -> results)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Caches => FocusedPane::Stats,
            FocusedPane::Stats => FocusedPane::Results,
            FocusedPane::Results => FocusedPane::Caches,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Caches => FocusedPane::Results,
            FocusedPane::Stats => FocusedPane::Caches,
            FocusedPane::Results => FocusedPane::Stats,
        }
    }
}

/// The main application state
pub struct App {
    /// The finished verification being browsed
    pub verification: Verification,

    /// Cache ids in snapshot order
    pub cache_ids: Vec<CacheId>,

    /// Index into `cache_ids`
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub caches_scroll: usize,
    pub stats_scroll: usize,
    pub results_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(verification: Verification) -> Self {
        let cache_ids = verification.snapshot.cache_ids().collect();
        let status_message = format!("Verified {}", verification.source);
        App {
            verification,
            cache_ids,
            selected: 0,
            focused_pane: FocusedPane::Caches,
            caches_scroll: 0,
            stats_scroll: 0,
            results_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn selected_cache(&self) -> Option<CacheId> {
        self.cache_ids.get(self.selected).copied()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[0]);

        // Right column: Statistics (top) | Checks (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(columns[1]);

        let selected_cache = self.selected_cache();
        let verification = &self.verification;

        super::panes::render_caches_pane(
            frame,
            columns[0],
            super::panes::CachesRenderData {
                cache_ids: &self.cache_ids,
                stats: &verification.stats,
                checks: &verification.checks,
                selected: self.selected,
            },
            self.focused_pane == FocusedPane::Caches,
            &mut self.caches_scroll,
        );

        super::panes::render_stats_pane(
            frame,
            right_rows[0],
            selected_cache.and_then(|id| verification.stats.get(id)),
            self.focused_pane == FocusedPane::Stats,
            &mut self.stats_scroll,
        );

        super::panes::render_results_pane(
            frame,
            right_rows[1],
            &verification.checks,
            selected_cache,
            self.focused_pane == FocusedPane::Results,
            &mut self.results_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.cache_ids.len(),
            verification.checks.violations.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE),
            KeyCode::PageDown => self.scroll_down(PAGE),
            KeyCode::Home => {
                self.select(0);
            }
            KeyCode::End => {
                self.select(self.cache_ids.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    fn scroll_up(&mut self, n: usize) {
        match self.focused_pane {
            FocusedPane::Caches => self.select(self.selected.saturating_sub(n)),
            FocusedPane::Stats => self.stats_scroll = self.stats_scroll.saturating_sub(n),
            FocusedPane::Results => self.results_scroll = self.results_scroll.saturating_sub(n),
        }
    }

    fn scroll_down(&mut self, n: usize) {
        match self.focused_pane {
            FocusedPane::Caches => {
                let last = self.cache_ids.len().saturating_sub(1);
                self.select(self.selected.saturating_add(n).min(last));
            }
            // Clamped against content height at render time
            FocusedPane::Stats => self.stats_scroll = self.stats_scroll.saturating_add(n),
            FocusedPane::Results => self.results_scroll = self.results_scroll.saturating_add(n),
        }
    }

    fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        self.selected = index;
        self.stats_scroll = 0;
        self.results_scroll = 0;
        if let Some(id) = self.selected_cache() {
            self.status_message = match self.verification.checks.cache_verdict(id) {
                Outcome::Pass => format!("Cache {} passed", id),
                Outcome::Fail { violations } => {
                    format!("Cache {} has {} violation(s)", id, violations)
                }
                Outcome::Skipped => format!("Cache {} not checked (stopped at first)", id),
            };
        }
    }
}
