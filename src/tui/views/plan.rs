//! Plan view - goal input, task cards and the progress bar

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::plan::{PlanController, ResultsView, TaskCard};
use crate::theme::{Palette, Theme};
use crate::tui::widgets::themed_block;
use crate::tui::{ellipsize, wrap_text};

/// Which pane receives keys
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Input,
    Tasks,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Input => Pane::Tasks,
            Pane::Tasks => Pane::Input,
        }
    }
}

/// UI-only state layered over the controller
#[derive(Default)]
pub struct PlanViewState {
    pub active_pane: Pane,
    pub tasks_state: ListState,
}

impl PlanViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle_pane(&mut self) {
        self.active_pane = self.active_pane.next();
    }

    /// Select the first card of a freshly rendered plan
    pub fn reset_selection(&mut self, card_count: usize) {
        self.tasks_state
            .select(if card_count > 0 { Some(0) } else { None });
    }

    pub fn move_selection(&mut self, delta: isize, card_count: usize) {
        if card_count == 0 {
            return;
        }
        let current = self.tasks_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, card_count as isize - 1) as usize;
        self.tasks_state.select(Some(next));
    }

    pub fn selected(&self) -> Option<usize> {
        self.tasks_state.selected()
    }
}

fn border_for(active: bool, palette: &Palette) -> ratatui::style::Color {
    if active {
        palette.focus
    } else {
        palette.accent
    }
}

/// Theme selector: the active theme is highlighted
pub fn draw_header(frame: &mut Frame<'_>, area: Rect, theme: Theme, palette: &Palette) {
    let mut spans = vec![Span::styled(
        "Goal Planner  ",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    )];
    for (idx, candidate) in Theme::ALL.iter().enumerate() {
        let label = format!(" {} {} ", idx + 1, candidate.label());
        let style = if *candidate == theme {
            Style::default()
                .bg(palette.focus)
                .fg(palette.panel)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(themed_block("Theme", palette.accent, palette));
    frame.render_widget(paragraph, area);
}

pub fn draw_goal_input(
    frame: &mut Frame<'_>,
    area: Rect,
    goal: &str,
    state: &PlanViewState,
    palette: &Palette,
) {
    let active = state.active_pane == Pane::Input;
    let cursor = if active { "▏" } else { "" };
    let content = if goal.is_empty() && !active {
        Line::styled(
            "What do you want to achieve?",
            Style::default().fg(palette.muted),
        )
    } else {
        Line::from(format!("{}{}", goal, cursor))
    };

    let paragraph = Paragraph::new(content)
        .block(themed_block("Goal", border_for(active, palette), palette));
    frame.render_widget(paragraph, area);
}

fn card_item(card: &TaskCard, width: usize, palette: &Palette) -> ListItem<'static> {
    let base = if card.checked {
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(palette.text)
    };
    let checkbox = if card.checked { "[x] " } else { "[ ] " };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            checkbox,
            if card.checked {
                base.fg(palette.success)
            } else {
                base
            },
        ),
        Span::styled(
            ellipsize(&card.task.header(), width.saturating_sub(4)),
            base.add_modifier(Modifier::BOLD),
        ),
    ])];

    for line in wrap_text(&card.task.description, width.saturating_sub(4)) {
        lines.push(Line::styled(format!("    {}", line), base));
    }
    lines.push(Line::from(vec![
        Span::styled("    Timeline: ", base.add_modifier(Modifier::BOLD)),
        Span::styled(card.task.timeline_label(), base),
        Span::styled(" | Dependencies: ", base.add_modifier(Modifier::BOLD)),
        Span::styled(card.task.dependencies_label(), base),
    ]));
    lines.push(Line::default());

    ListItem::new(lines)
}

pub fn draw_results(
    frame: &mut Frame<'_>,
    area: Rect,
    controller: &PlanController,
    state: &mut PlanViewState,
    palette: &Palette,
) {
    let border = border_for(state.active_pane == Pane::Tasks, palette);

    match controller.view() {
        ResultsView::Empty => {
            let paragraph = Paragraph::new(Line::styled(
                "Type a goal and press Enter to generate a plan",
                Style::default().fg(palette.muted),
            ))
            .block(themed_block("Plan", palette.accent, palette));
            frame.render_widget(paragraph, area);
        }
        ResultsView::Loading => {
            let paragraph = Paragraph::new(Line::styled(
                "⏳ Generating plan…",
                Style::default()
                    .fg(palette.focus)
                    .add_modifier(Modifier::BOLD),
            ))
            .block(themed_block("Plan", palette.accent, palette));
            frame.render_widget(paragraph, area);
        }
        ResultsView::Error(message) => {
            let paragraph = Paragraph::new(Line::styled(
                message.clone(),
                Style::default().fg(palette.error),
            ))
            .block(themed_block("Plan", palette.error, palette))
            .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        ResultsView::Plan(plan) => {
            let width = area.width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = plan
                .cards
                .iter()
                .map(|card| card_item(card, width, palette))
                .collect();

            let list = List::new(items)
                .block(themed_block(plan.title.clone(), border, palette))
                .highlight_style(Style::default().bg(palette.highlight));
            frame.render_stateful_widget(list, area, &mut state.tasks_state);
        }
    }
}

pub fn draw_progress(frame: &mut Frame<'_>, area: Rect, controller: &PlanController, palette: &Palette) {
    let progress = controller.progress();
    let gauge = Gauge::default()
        .block(themed_block("Progress", palette.accent, palette))
        .gauge_style(Style::default().fg(palette.success).bg(palette.highlight))
        .percent(progress.percentage())
        .label(progress.label());
    frame.render_widget(gauge, area);
}

/// Draw the full plan view
pub fn draw_plan_view(
    frame: &mut Frame<'_>,
    area: Rect,
    controller: &PlanController,
    state: &mut PlanViewState,
    theme: Theme,
    palette: &Palette,
) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
    ];
    if controller.progress_visible() {
        constraints.push(Constraint::Length(3));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_header(frame, chunks[0], theme, palette);
    draw_goal_input(frame, chunks[1], controller.goal_input(), state, palette);
    draw_results(frame, chunks[2], controller, state, palette);
    if controller.progress_visible() {
        draw_progress(frame, chunks[3], controller, palette);
    }
}
