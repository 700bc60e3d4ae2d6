use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use probsim_core::AppInfo;
use probsim_core::model::experiment::Experiment;
use probsim_core::sampler::OutcomeSource;
use probsim_ui::panel::{
    Accent, INSTRUCTIONS, PanelDescriptor, RESET_HOTKEY, RESET_LABEL, WINDOW_TITLE,
    built_in_panels,
};
use probsim_ui::{BoardView, PanelView};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::{debug, info};

use crate::controller::{Command, SimulatorController};
use crate::platform::glyph::glyph_lines;
use crate::scheduler::TimerQueue;

/// Upper bound on how long input polling blocks when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Dismiss,
    Quit,
}

/// Maps a key press to an action. While a notice is open only dismissal and
/// quitting are accepted.
pub fn map_key(key: KeyEvent, notice_open: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if notice_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&RESET_HOTKEY) => {
            Some(Action::Command(Command::Reset))
        }
        KeyCode::Char(c) => {
            experiment_for_hotkey(c).map(|experiment| Action::Command(Command::Run(experiment)))
        }
        _ => None,
    }
}

pub struct TerminalApp<S> {
    controller: SimulatorController<S>,
    view: BoardView,
    timers: TimerQueue,
    quit: bool,
}

impl<S: OutcomeSource> TerminalApp<S> {
    pub fn new(controller: SimulatorController<S>) -> Self {
        Self {
            controller,
            view: BoardView::new(),
            timers: TimerQueue::new(),
            quit: false,
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Command(command) => {
                let progress = self
                    .controller
                    .handle(command, &mut self.view, &mut self.timers);
                debug!(?command, ?progress, "command handled");
            }
            Action::Dismiss => {
                self.view.dismiss_notice();
            }
            Action::Quit => self.quit = true,
        }
    }

    /// Runs every timer that is due at `now`.
    pub fn fire_due_timers(&mut self, now: Instant) {
        while let Some(task) = self.timers.pop_due(now) {
            self.controller
                .on_timer(task, &mut self.view, &mut self.timers);
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.quit {
            terminal
                .draw(|frame| render(frame, &self.view))
                .context("drawing frame")?;

            let timeout = self
                .timers
                .time_until_next(Instant::now())
                .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));
            if event::poll(timeout).context("polling terminal input")? {
                if let Event::Key(key) = event::read().context("reading terminal input")? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = map_key(key, self.view.notice().is_some()) {
                            self.apply(action);
                        }
                    }
                }
            }
            self.fire_due_timers(Instant::now());
        }
        Ok(())
    }
}

/// Raw-mode alternate screen, restored on drop.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub fn run<S: OutcomeSource>(controller: SimulatorController<S>) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let mut app = TerminalApp::new(controller);
    info!("terminal front end started");
    let result = app.run(guard.terminal_mut());
    info!("terminal front end stopped");
    result
}

pub fn render(frame: &mut Frame, view: &BoardView) {
    let [title_area, intro_area, panels_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        WINDOW_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let intro: Vec<Line> = INSTRUCTIONS.lines().map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(intro).alignment(Alignment::Center),
        intro_area,
    );

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(panels_area);
    for (panel, area) in built_in_panels().iter().zip(columns.iter()) {
        render_panel(frame, *area, panel, view.panel(panel.experiment));
    }

    let footer = Line::from(vec![
        Span::styled(
            format!(" [{RESET_HOTKEY}] {RESET_LABEL} "),
            Style::default().bg(Color::Gray).fg(Color::Black),
        ),
        Span::raw("  [q] Quit  "),
        Span::styled(
            format!("{} {}", AppInfo::name(), AppInfo::version()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), footer_area);

    if let Some(notice) = view.notice() {
        let area = centered_overlay(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let lines = vec![
            Line::from(notice.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] OK",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(notice.title.as_str());
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &PanelDescriptor, state: &PanelView) {
    let accent = accent_color(panel.accent);
    let mut lines = vec![
        Line::from(panel.probability),
        Line::from(panel.sample_space),
        Line::from(""),
        Line::from(Span::styled(
            format!(" [{}] {} ", panel.hotkey, panel.button),
            Style::default().bg(accent).fg(Color::Black),
        )),
        Line::from(""),
        Line::from(Span::styled(
            state.result.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(state.event_space_line()),
        Line::from(""),
    ];
    if let Some(image) = &state.image {
        lines.extend(glyph_lines(image.outcome).into_iter().map(Line::from));
        lines.push(Line::from(Span::styled(
            image.file_name(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            panel.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::LightBlue => Color::LightBlue,
        Accent::LightGreen => Color::LightGreen,
        Accent::LightYellow => Color::LightYellow,
    }
}

fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

/// Panel whose hotkey is `c`, if any.
pub fn experiment_for_hotkey(c: char) -> Option<Experiment> {
    built_in_panels()
        .iter()
        .find(|panel| panel.hotkey == c)
        .map(|panel| panel.experiment)
}
