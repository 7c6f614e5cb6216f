pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppMode, AppState},
    ui::theme::{Theme, resolved_theme},
};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("metcast"));
        frame.render_widget(warning, area);
        return;
    }

    let theme = resolved_theme(state);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    widgets::header::render(frame, rows[0], state, theme);
    widgets::current::render(frame, middle[0], state, theme);
    widgets::pollution::render(frame, middle[1], state, theme);
    widgets::daily::render(frame, rows[2], state, theme);
    render_footer(frame, rows[3], state, theme);

    if state.search.open {
        widgets::search::render(frame, centered_rect(60, 4, area), state, theme);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let muted = Style::default().fg(theme.muted_text);
    let mut spans = vec![Span::styled(
        "q quit · r refresh · f/c units · t day zone · / search",
        muted,
    )];
    let message = state.status.clone().or_else(|| {
        (state.mode == AppMode::Loading)
            .then(|| state.target.as_ref().map(|t| format!("Loading {t}…")))
            .flatten()
    });
    if let Some(message) = message {
        spans.push(Span::styled("  ·  ", muted));
        spans.push(Span::styled(message, Style::default().fg(theme.warning)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
