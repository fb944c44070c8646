//! Reusable TUI widgets

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::Palette;

/// Status message tone for styling
#[derive(Clone, Copy, Default)]
pub enum StatusTone {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl StatusTone {
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            StatusTone::Info => palette.focus,
            StatusTone::Success => palette.success,
            StatusTone::Error => palette.error,
            StatusTone::Warning => Color::Yellow,
        }
    }
}

/// Create a themed block with consistent styling
pub fn themed_block(title: impl Into<String>, border_color: Color, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.into(),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(palette.panel).fg(palette.text))
}

/// Create a centered rectangle for modal dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);
    let vertical_chunk = popup_layout[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical_chunk)[1]
}

/// Draw a modal with a title, body lines and a key hint
pub fn draw_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    body: Vec<Line<'static>>,
    hint: &str,
    border_color: Color,
    palette: &Palette,
) {
    let popup = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::default()];
    lines.extend(body);
    lines.push(Line::default());
    lines.push(Line::styled(
        hint.to_string(),
        Style::default().fg(palette.muted),
    ));

    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(themed_block(title, border_color, palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}

/// Draw a command palette at the bottom of the screen
pub fn draw_command_palette(frame: &mut Frame<'_>, area: Rect, buffer: &str, palette: &Palette) {
    let height = 3;
    if area.height < height + 2 {
        return;
    }
    let popup = Rect {
        x: area.x + 2,
        y: area.y + area.height - height - 1,
        width: area.width.saturating_sub(4),
        height,
    };
    frame.render_widget(Clear, popup);
    let block = themed_block("Command", palette.accent, palette);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    let paragraph = Paragraph::new(format!(":{}", buffer))
        .style(Style::default().bg(palette.panel).fg(palette.text))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Draw a status bar with message and help text
pub fn draw_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    message: &str,
    tone: StatusTone,
    help_line: &str,
    palette: &Palette,
) {
    let info = Line::styled(
        message.to_string(),
        Style::default()
            .fg(tone.color(palette))
            .add_modifier(Modifier::BOLD),
    );
    let help = Line::styled(help_line.to_string(), Style::default().fg(palette.muted));

    let paragraph = Paragraph::new(vec![info, help])
        .style(Style::default().bg(palette.panel).fg(palette.text))
        .block(themed_block("Status", palette.accent, palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
