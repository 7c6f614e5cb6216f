use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{app::state::AppState, ui::theme::Theme};

use super::shared::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    frame.render_widget(Clear, area);
    let block = panel_block(" Search ".to_string(), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let query = if state.search.query.is_empty() {
        Span::styled("city name or lat,lon", Style::default().fg(theme.muted_text))
    } else {
        Span::styled(
            state.search.query.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            query,
            Span::styled("▏", Style::default().fg(theme.accent)),
        ]),
        Line::from(Span::styled(
            "Enter search · empty Enter clears · Esc cancel",
            Style::default().fg(theme.muted_text),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
