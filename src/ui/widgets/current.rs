use chrono::Utc;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{ConditionsSummary, icon_category, icon_glyph, summarize_conditions},
    ui::theme::{Theme, icon_color, temp_color},
};

use super::shared::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let block = panel_block(" Now ".to_string(), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(current) = state
        .weather
        .as_ref()
        .and_then(|bundle| bundle.current.as_ref())
    else {
        let message = Paragraph::new("No current conditions")
            .style(Style::default().fg(theme.muted_text));
        frame.render_widget(message, inner);
        return;
    };

    let forecast = state.weather.as_ref().and_then(|b| b.forecast.as_ref());
    let summary = summarize_conditions(current, forecast, Utc::now(), state.units);
    let icon = current.primary_icon();
    let headline_color =
        icon.map_or(theme.accent, |code| icon_color(&theme, icon_category(code)));

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", icon_glyph(icon, state.icon_mode)),
            Style::default().fg(headline_color),
        ),
        Span::styled(
            summary.temp.clone(),
            Style::default()
                .fg(temp_color(&theme, current.temp_c))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", summary.description.clone().unwrap_or_default()),
            Style::default().fg(theme.text),
        ),
    ])];
    lines.extend(detail_lines(&summary, theme));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn detail_lines(summary: &ConditionsSummary, theme: Theme) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.muted_text));
    let value = |text: String| Span::styled(text, Style::default().fg(theme.text));

    let mut lines = vec![Line::from(vec![
        label("Feels like "),
        value(summary.feels_like.clone()),
    ])];
    if let (Some(min), Some(max)) = (&summary.min_temp, &summary.max_temp) {
        lines.push(Line::from(vec![
            label("Min "),
            Span::styled(min.clone(), Style::default().fg(theme.temp_cold)),
            label("  Max "),
            Span::styled(max.clone(), Style::default().fg(theme.temp_hot)),
        ]));
    }
    lines.push(Line::from(vec![
        label("Humidity "),
        value(summary.humidity.clone()),
        label("  Pressure "),
        value(summary.pressure.clone()),
    ]));
    let optional = [
        ("Wind ", &summary.wind),
        ("Clouds ", &summary.clouds),
        ("Rain ", &summary.rain),
        ("Snow ", &summary.snow),
    ];
    for (name, text) in optional {
        if let Some(text) = text.as_ref().filter(|text| !text.is_empty()) {
            lines.push(Line::from(vec![label(name), value(text.clone())]));
        }
    }
    lines
}
