//! Main TUI application state and event loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::client::PlanService;
use crate::error::ClientError;
use crate::plan::{PlanController, PlanResponse, RequestToken, ResultsView};
use crate::preferences::PreferenceStore;
use crate::theme::{Theme, ThemeManager};

use super::views::{draw_plan_view, Pane, PlanViewState};
use super::widgets::{draw_command_palette, draw_modal, draw_status_bar, StatusTone};

const PAGE_JUMP: isize = 5;

/// Configuration for launching the TUI
pub struct TuiConfig {
    /// Plan service used for goal submissions
    pub service: Arc<dyn PlanService>,

    /// Where the theme preference lives (None disables persistence)
    pub preferences: Option<PreferenceStore>,

    /// Delay before the completion overlay appears
    pub completion_delay: Duration,

    /// Event poll interval
    pub tick: Duration,

    /// Text to pre-fill the goal input with
    pub initial_goal: Option<String>,
}

/// Outcome of a background plan request
struct PlanDelivery {
    token: RequestToken,
    outcome: Result<PlanResponse, ClientError>,
}

/// Main application state
pub struct App {
    controller: PlanController,
    view_state: PlanViewState,
    themes: ThemeManager,

    service: Arc<dyn PlanService>,
    runtime: Handle,
    deliveries_tx: mpsc::UnboundedSender<PlanDelivery>,
    deliveries_rx: mpsc::UnboundedReceiver<PlanDelivery>,

    /// Blocking alert; swallows the next key press
    alert: Option<String>,

    /// Status message and tone
    status_message: String,
    status_tone: StatusTone,

    /// Command mode state
    command_mode: bool,
    command_buffer: String,

    should_quit: bool,
    tick: Duration,
}

impl App {
    fn new(config: TuiConfig, runtime: Handle) -> Self {
        let (deliveries_tx, deliveries_rx) = mpsc::unbounded_channel();

        let mut controller = PlanController::new(config.completion_delay);
        if let Some(goal) = config.initial_goal {
            controller.set_goal_input(goal);
        }

        Self {
            controller,
            view_state: PlanViewState::new(),
            themes: ThemeManager::load(config.preferences),
            service: config.service,
            runtime,
            deliveries_tx,
            deliveries_rx,
            alert: None,
            status_message: "Type a goal and press Enter · Ctrl+C to quit".to_string(),
            status_tone: StatusTone::Info,
            command_mode: false,
            command_buffer: String::new(),
            should_quit: false,
            tick: config.tick,
        }
    }

    fn set_status<S: Into<String>>(&mut self, message: S, tone: StatusTone) {
        self.status_message = message.into();
        self.status_tone = tone;
    }

    fn submit_goal(&mut self) {
        let request = match self.controller.submit_goal() {
            Ok(request) => request,
            Err(e) => {
                self.alert = Some(e.to_string());
                return;
            }
        };
        self.view_state.reset_selection(0);
        self.set_status(format!("Generating plan for \"{}\"…", request.goal), StatusTone::Info);

        let service = Arc::clone(&self.service);
        let tx = self.deliveries_tx.clone();
        self.runtime.spawn(async move {
            let outcome = service.create_plan(&request.goal).await;
            // Receiver only disappears when the app is shutting down
            let _ = tx.send(PlanDelivery {
                token: request.token,
                outcome,
            });
        });
    }

    fn apply_delivery(&mut self, delivery: PlanDelivery) {
        if !self.controller.resolve(delivery.token, delivery.outcome) {
            return;
        }

        let cards = self.controller.cards().len();
        self.view_state.reset_selection(cards);
        if self.controller.progress_visible() {
            self.view_state.active_pane = Pane::Tasks;
            self.set_status(
                format!("{} tasks · Space to mark done", cards),
                StatusTone::Success,
            );
        } else if matches!(self.controller.view(), ResultsView::Error(_)) {
            self.set_status("Plan generation failed", StatusTone::Error);
        } else {
            self.set_status("The plan has no tasks", StatusTone::Warning);
        }
    }

    /// Drain finished requests and fire any due completion signal
    fn poll_background(&mut self, now: Instant) {
        while let Ok(delivery) = self.deliveries_rx.try_recv() {
            self.apply_delivery(delivery);
        }
        if self.controller.poll_completion(now) {
            self.close_command_palette();
            self.set_status("All tasks completed!", StatusTone::Success);
        }
    }

    fn toggle_selected(&mut self) {
        let Some(index) = self.view_state.selected() else {
            return;
        };
        if let Some(checked) = self.controller.toggle_task(index, Instant::now()) {
            let verb = if checked { "Completed" } else { "Reopened" };
            let header = self.controller.cards()[index].task.header();
            let label = self.controller.progress().label();
            self.set_status(format!("{} {} · {}", verb, header, label), StatusTone::Info);
        }
    }

    fn select_theme(&mut self, theme: Theme) {
        self.themes.apply_theme(theme);
        self.set_status(format!("Theme: {}", theme.label()), StatusTone::Info);
    }

    fn reset_for_new_task(&mut self) {
        self.controller.reset_for_new_task();
        self.close_command_palette();
        self.view_state.reset_selection(0);
        self.view_state.active_pane = Pane::Input;
        self.set_status("Ready for a new goal", StatusTone::Info);
    }

    fn close_command_palette(&mut self) {
        self.command_mode = false;
        self.command_buffer.clear();
    }

    fn enter_command_mode(&mut self) {
        self.command_mode = true;
        self.command_buffer.clear();
        self.set_status(":", StatusTone::Info);
    }

    fn execute_command(&mut self, command: &str) {
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("theme" | "t"), Some(name)) => match name.parse::<Theme>() {
                Ok(theme) => self.select_theme(theme),
                Err(e) => self.set_status(e, StatusTone::Error),
            },
            (Some("new" | "n"), None) => self.reset_for_new_task(),
            (Some("generate" | "g"), None) => self.submit_goal(),
            (Some("q" | "quit"), None) => self.should_quit = true,
            _ => {
                self.set_status(format!("Unknown command: {}", command), StatusTone::Error);
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.close_command_palette();
                self.set_status("Command canceled", StatusTone::Info);
            }
            KeyCode::Enter => {
                let command = self.command_buffer.trim().to_string();
                self.close_command_palette();
                if command.is_empty() {
                    self.set_status("Empty command", StatusTone::Info);
                } else {
                    self.execute_command(&command);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_goal(),
            KeyCode::Tab | KeyCode::Esc => self.view_state.cycle_pane(),
            KeyCode::Backspace => self.controller.pop_goal_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_goal_char(c)
            }
            _ => {}
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) {
        let cards = self.controller.cards().len();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(':') => self.enter_command_mode(),
            KeyCode::Tab | KeyCode::Char('i') => self.view_state.cycle_pane(),
            KeyCode::Down | KeyCode::Char('j') => self.view_state.move_selection(1, cards),
            KeyCode::Up | KeyCode::Char('k') => self.view_state.move_selection(-1, cards),
            KeyCode::PageDown => self.view_state.move_selection(PAGE_JUMP, cards),
            KeyCode::PageUp => self.view_state.move_selection(-PAGE_JUMP, cards),
            KeyCode::Home | KeyCode::Char('g') => self.view_state.reset_selection(cards),
            KeyCode::End | KeyCode::Char('G') => {
                self.view_state.move_selection(isize::MAX / 2, cards)
            }
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('1') => self.select_theme(Theme::Light),
            KeyCode::Char('2') => self.select_theme(Theme::Dark),
            KeyCode::Char('3') => self.select_theme(Theme::Pink),
            KeyCode::Char('n') => self.reset_for_new_task(),
            KeyCode::Char('r') => self.submit_goal(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.alert.take().is_some() {
            return;
        }

        if self.controller.overlay_visible() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('n')) {
                self.reset_for_new_task();
            }
            return;
        }

        if self.command_mode {
            self.handle_command_key(key);
            return;
        }

        match self.view_state.active_pane {
            Pane::Input => self.handle_input_key(key),
            Pane::Tasks => self.handle_tasks_key(key),
        }
    }

    fn help_line(&self) -> &'static str {
        match self.view_state.active_pane {
            Pane::Input => "Keys: Enter generate · Tab/Esc tasks · Ctrl+C quit",
            Pane::Tasks => {
                "Keys: j/k nav · Space done · 1/2/3 theme · r regenerate · n new · Tab goal · : cmd · q quit"
            }
        }
    }
}

/// Run the TUI with the given configuration
pub fn run_tui(config: TuiConfig) -> Result<()> {
    let mut app = App::new(config, Handle::current());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    cleanup_terminal(terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        app.poll_background(Instant::now());

        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(app.tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    debug!("leaving event loop");
    Ok(())
}

fn draw_ui(frame: &mut Frame<'_>, app: &mut App) {
    let theme = app.themes.active();
    let palette = theme.palette();
    let area = frame.size();

    // Background
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        area,
    );

    // Layout: main content + status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(10), Constraint::Length(4)].as_ref())
        .split(area);

    draw_plan_view(
        frame,
        chunks[0],
        &app.controller,
        &mut app.view_state,
        theme,
        &palette,
    );

    draw_status_bar(
        frame,
        chunks[1],
        &app.status_message,
        app.status_tone,
        app.help_line(),
        &palette,
    );

    if app.command_mode {
        draw_command_palette(frame, area, &app.command_buffer, &palette);
    }

    if app.controller.overlay_visible() {
        let progress = *app.controller.progress();
        draw_modal(
            frame,
            area,
            "Congratulations!",
            vec![
                Line::styled(
                    "🎉 You completed every task in your plan!",
                    Style::default()
                        .fg(palette.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(format!(
                    "{} of {} tasks done",
                    progress.completed(),
                    progress.total()
                )),
            ],
            "[Enter] Add another task",
            palette.success,
            &palette,
        );
    }

    if let Some(message) = &app.alert {
        draw_modal(
            frame,
            area,
            "Alert",
            vec![Line::from(message.clone())],
            "Press any key to continue",
            palette.error,
            &palette,
        );
    }
}

fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeService {
        calls: Arc<AtomicU32>,
        response: PlanResponse,
    }

    #[async_trait]
    impl PlanService for FakeService {
        async fn create_plan(&self, _goal: &str) -> Result<PlanResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn test_app(preferences: Option<PreferenceStore>) -> (App, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let response = serde_json::from_str(
            r#"{"project_name":"Website Launch","tasks":[
                {"task_id":1,"task_name":"Design","description":"Create mockups","timeline_days":3,"dependencies":[]},
                {"task_id":2,"task_name":"Build","description":"Implement site","timeline_days":5,"dependencies":[1]}
            ]}"#,
        )
        .unwrap();
        let config = TuiConfig {
            service: Arc::new(FakeService {
                calls: Arc::clone(&calls),
                response,
            }),
            preferences,
            completion_delay: Duration::ZERO,
            tick: Duration::from_millis(10),
            initial_goal: None,
        };
        (App::new(config, Handle::current()), calls)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn settle(app: &mut App) {
        let delivery = app.deliveries_rx.recv().await.unwrap();
        app.apply_delivery(delivery);
    }

    #[tokio::test]
    async fn test_blank_goal_raises_alert_without_request() {
        let (mut app, calls) = test_app(None);
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.alert.as_deref(), Some("Please enter a goal."));
        assert!(!app.controller.is_loading());

        // Any key dismisses the alert and is otherwise ignored
        press(&mut app, KeyCode::Char('x'));
        assert!(app.alert.is_none());
        assert_eq!(app.controller.goal_input(), "   ");

        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_check_all_and_start_over() {
        let (mut app, calls) = test_app(None);
        type_text(&mut app, "Launch website");
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.is_loading());

        settle(&mut app).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.controller.cards().len(), 2);
        assert!(app.view_state.active_pane == Pane::Tasks);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.controller.progress().percentage(), 100);

        app.poll_background(Instant::now());
        assert!(app.controller.overlay_visible());

        // Keys other than the reset action leave the overlay up
        press(&mut app, KeyCode::Char('j'));
        assert!(app.controller.overlay_visible());

        press(&mut app, KeyCode::Enter);
        assert!(!app.controller.overlay_visible());
        assert!(app.controller.cards().is_empty());
        assert_eq!(app.controller.goal_input(), "");
        assert!(app.view_state.active_pane == Pane::Input);
    }

    #[tokio::test]
    async fn test_completion_closes_command_palette() {
        let (mut app, _) = test_app(None);
        type_text(&mut app, "Launch website");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "the");
        assert!(app.command_mode);

        app.poll_background(Instant::now());
        assert!(app.controller.overlay_visible());
        assert!(!app.command_mode);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "new goal");
        assert!(!app.command_mode);
        assert!(app.command_buffer.is_empty());
        assert_eq!(app.controller.goal_input(), "new goal");
    }

    #[tokio::test]
    async fn test_reset_command_leaves_palette_closed() {
        let (mut app, _) = test_app(None);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "new");
        press(&mut app, KeyCode::Enter);
        assert!(!app.command_mode);
        assert!(app.view_state.active_pane == Pane::Input);

        type_text(&mut app, "Plan a trip");
        assert_eq!(app.controller.goal_input(), "Plan a trip");
    }

    #[tokio::test]
    async fn test_theme_keys_persist_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let (mut app, _) = test_app(Some(PreferenceStore::new(&path)));
        assert_eq!(app.themes.active(), Theme::Light);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.themes.active(), Theme::Pink);

        let (reloaded, _) = test_app(Some(PreferenceStore::new(&path)));
        assert_eq!(reloaded.themes.active(), Theme::Pink);
    }

    #[tokio::test]
    async fn test_theme_command() {
        let (mut app, _) = test_app(None);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "theme dark");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.themes.active(), Theme::Dark);

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "theme neon");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.themes.active(), Theme::Dark);
        assert!(app.status_message.starts_with("Unknown theme"));
    }
}
