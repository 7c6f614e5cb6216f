use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    ui::theme::{Theme, aqi_color},
};

use super::shared::{aqi_trend, panel_block};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let block = panel_block(" Air quality ".to_string(), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bundle = state.weather.as_ref();
    let trend = bundle
        .and_then(|b| b.pollution_forecast.as_deref())
        .filter(|points| !points.is_empty());
    let [body, trend_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(if trend.is_some() { 2 } else { 0 }),
    ])
    .areas(inner);

    match bundle.and_then(|b| b.pollution.as_ref()) {
        Some(snapshot) => {
            let mut lines = vec![Line::from(Span::styled(
                snapshot.headline(),
                Style::default()
                    .fg(aqi_color(&theme, snapshot.aqi))
                    .add_modifier(Modifier::BOLD),
            ))];
            // Two readings per line.
            for pair in snapshot.component_rows().chunks(2) {
                let spans = pair
                    .iter()
                    .flat_map(|(name, value)| {
                        [
                            Span::styled(format!("{name:>5} "), Style::default().fg(theme.muted_text)),
                            Span::styled(format!("{value:<8}"), Style::default().fg(theme.text)),
                        ]
                    })
                    .collect::<Vec<_>>();
                lines.push(Line::from(spans));
            }
            frame.render_widget(Paragraph::new(lines), body);
        }
        None => {
            let message = Paragraph::new("No air quality data")
                .style(Style::default().fg(theme.muted_text));
            frame.render_widget(message, body);
        }
    }

    if let Some(points) = trend {
        let lines = vec![
            Line::from(Span::styled(
                "Forecast",
                Style::default().fg(theme.muted_text),
            )),
            Line::from(Span::styled(
                aqi_trend(points, usize::from(trend_area.width)),
                Style::default().fg(theme.accent),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), trend_area);
    }
}
