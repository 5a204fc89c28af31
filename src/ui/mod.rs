//! Terminal dashboard using ratatui
//!
//! Layout, top to bottom:
//! - Header (title, period, last refresh, auto-refresh state)
//! - Section tabs and the active section's sub-tabs
//! - Key metrics row
//! - Panels of the active tab, two per row
//! - Key help

mod components;
mod refresh;

pub use refresh::{RefreshTimer, DEFAULT_REFRESH_INTERVAL};

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::dataset::DatasetAssembler;
use crate::filter::DashboardFilter;
use crate::view::{self, Metric, Section, Tab};

/// Longest wait for input before redrawing
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Everything the dashboard shows, independent of the terminal
pub struct DashboardState {
    filter: DashboardFilter,
    data: DatasetAssembler,
    metrics: Vec<Metric>,
    sections: Vec<Section>,
    section: usize,
    tab: usize,
    last_refresh: DateTime<Local>,
    refreshes: u64,
    timer: RefreshTimer,
}

impl DashboardState {
    pub fn new(filter: DashboardFilter, refresh: Option<Duration>) -> Result<Self> {
        let data = DatasetAssembler::build();
        let metrics = view::key_metrics(&data, &filter)?;
        let sections = view::build_sections(&data, &filter);

        Ok(Self {
            filter,
            data,
            metrics,
            sections,
            section: 0,
            tab: 0,
            last_refresh: Local::now(),
            refreshes: 0,
            timer: RefreshTimer::new(refresh, Instant::now()),
        })
    }

    /// Reassemble the datasets and views, keeping the current position
    pub fn rebuild(&mut self) -> Result<()> {
        self.data = DatasetAssembler::build();
        self.metrics = view::key_metrics(&self.data, &self.filter)?;
        self.sections = view::build_sections(&self.data, &self.filter);
        self.section = self.section.min(self.sections.len().saturating_sub(1));
        self.tab = self.tab.min(self.tab_count().saturating_sub(1));
        self.last_refresh = Local::now();
        self.refreshes += 1;
        debug!("Dashboard rebuilt ({} refreshes)", self.refreshes);
        Ok(())
    }

    pub fn filter(&self) -> &DashboardFilter {
        &self.filter
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    pub fn tab_index(&self) -> usize {
        self.tab
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.sections.get(self.section)
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current_section().and_then(|s| s.tabs.get(self.tab))
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    fn tab_count(&self) -> usize {
        self.current_section().map(|s| s.tabs.len()).unwrap_or(0)
    }

    fn select_section(&mut self, index: usize) {
        self.section = index;
        self.tab = 0;
    }

    pub fn next_section(&mut self) {
        if !self.sections.is_empty() {
            self.select_section((self.section + 1) % self.sections.len());
        }
    }

    pub fn previous_section(&mut self) {
        if !self.sections.is_empty() {
            let len = self.sections.len();
            self.select_section((self.section + len - 1) % len);
        }
    }

    pub fn next_tab(&mut self) {
        let count = self.tab_count();
        if count > 0 {
            self.tab = (self.tab + 1) % count;
        }
    }

    pub fn previous_tab(&mut self) {
        let count = self.tab_count();
        if count > 0 {
            self.tab = (self.tab + count - 1) % count;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<Action> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),
            KeyCode::Right | KeyCode::Char('l') => self.next_section(),
            KeyCode::Left | KeyCode::Char('h') => self.previous_section(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.next_tab(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.previous_tab(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < self.sections.len() {
                    self.select_section(index);
                }
            }
            KeyCode::Char('r') => {
                self.rebuild()?;
                self.timer.reset(Instant::now());
            }
            KeyCode::Char('a') => {
                let active = self.timer.toggle(Instant::now());
                info!("Auto-refresh {}", if active { "enabled" } else { "disabled" });
            }
            _ => {}
        }
        Ok(Action::Continue)
    }

    /// Rebuild if the refresh timer expired; returns whether it did
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.timer.is_due(now) {
            return Ok(false);
        }
        self.rebuild()?;
        self.timer.reset(now);
        Ok(true)
    }

    /// How long the event loop may wait for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.timer
            .time_until_due(now)
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL))
    }
}

/// Full-screen dashboard bound to the terminal
pub struct DashboardApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: DashboardState,
}

impl DashboardApp {
    /// Enter the alternate screen and take over the terminal
    pub fn new(state: DashboardState) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, state })
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Header
                    Constraint::Length(1), // Section tabs
                    Constraint::Length(1), // Sub-tabs
                    Constraint::Length(4), // Key metrics
                    Constraint::Min(8),    // Panels
                    Constraint::Length(1), // Help
                ])
                .split(frame.area());

            components::render_header(frame, chunks[0], state);
            components::render_section_tabs(frame, chunks[1], state);
            components::render_sub_tabs(frame, chunks[2], state);
            components::render_metrics(frame, chunks[3], state.metrics());
            if let Some(tab) = state.current_tab() {
                components::render_tab(frame, chunks[4], tab);
            }
            components::render_help(frame, chunks[5]);
        })?;

        Ok(())
    }

    /// Run the event loop until the user quits, then restore the terminal
    pub fn run(mut self) -> Result<()> {
        info!(
            "Dashboard started with {} sections",
            self.state.sections().len()
        );

        loop {
            self.draw()?;

            let now = Instant::now();
            if self.state.tick(now)? {
                continue;
            }

            if event::poll(self.state.poll_timeout(now))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && self.state.handle_key(key.code)? == Action::Quit
                    {
                        break;
                    }
                }
            }
        }

        self.restore()
    }

    /// Restore terminal without waiting
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{resolve_filter, FilterSelection, FocusArea};

    fn state() -> DashboardState {
        DashboardState::new(DashboardFilter::default(), None).unwrap()
    }

    #[test]
    fn test_section_navigation_wraps() {
        let mut state = state();
        assert_eq!(state.current_section().unwrap().title, "Évolution");

        state.previous_section();
        assert_eq!(state.current_section().unwrap().title, "Synthèse");
        state.next_section();
        assert_eq!(state.section_index(), 0);
    }

    #[test]
    fn test_tab_resets_on_section_change() {
        let mut state = state();
        state.next_tab();
        state.next_tab();
        assert_eq!(state.current_tab().unwrap().title, "Impacts sociaux");
        state.next_tab();
        assert_eq!(state.tab_index(), 0);

        state.next_tab();
        state.next_section();
        assert_eq!(state.tab_index(), 0);
        assert_eq!(state.current_tab().unwrap().title, "Cartographie");
    }

    #[test]
    fn test_keys() {
        let mut state = state();
        assert_eq!(state.handle_key(KeyCode::Char('3')).unwrap(), Action::Continue);
        assert_eq!(state.current_section().unwrap().title, "Politiques");
        assert_eq!(state.handle_key(KeyCode::Char('9')).unwrap(), Action::Continue);
        assert_eq!(state.section_index(), 2);

        state.handle_key(KeyCode::Char('r')).unwrap();
        assert_eq!(state.refreshes(), 1);

        assert!(!state.timer().is_active());
        state.handle_key(KeyCode::Char('a')).unwrap();
        assert!(state.timer().is_active());

        assert_eq!(state.handle_key(KeyCode::Char('q')).unwrap(), Action::Quit);
        assert_eq!(state.handle_key(KeyCode::Esc).unwrap(), Action::Quit);
    }

    #[test]
    fn test_tick_rebuilds_when_due() {
        let mut state = DashboardState::new(
            DashboardFilter::default(),
            Some(Duration::from_secs(60)),
        )
        .unwrap();
        let now = Instant::now();
        assert!(!state.tick(now).unwrap());
        assert!(state.poll_timeout(now) <= IDLE_POLL);

        assert!(state.tick(now + Duration::from_secs(61)).unwrap());
        assert_eq!(state.refreshes(), 1);
        assert!(!state.tick(now + Duration::from_secs(62)).unwrap());
    }

    #[test]
    fn test_filtered_state_has_fewer_sections() {
        let filter = resolve_filter(FilterSelection {
            focus: Some(vec![FocusArea::Territories]),
            ..Default::default()
        })
        .unwrap();
        let state = DashboardState::new(filter, None).unwrap();
        let titles: Vec<&str> = state.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Territoires", "Stratégie", "Synthèse"]);
        assert_eq!(state.filter().focus, vec![FocusArea::Territories]);
    }
}
