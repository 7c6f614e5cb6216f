use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::{GeoSummary, Units, summarize_geo},
    ui::theme::Theme,
};

use super::shared::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let title = match (&state.weather, &state.target) {
        (Some(bundle), _) => bundle.title(),
        (None, Some(target)) => target.to_string(),
        (None, None) => "metcast".to_string(),
    };
    let block = panel_block(format!(" {title} "), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let geo = state
        .weather
        .as_ref()
        .and_then(|bundle| bundle.current.as_ref())
        .map(|current| summarize_geo(current, &Local::now()));

    let mut lines = vec![status_line(state, theme)];
    if let Some(geo) = geo {
        lines.push(sun_line(&geo, theme));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn status_line(state: &AppState, theme: Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.muted_text);
    let units = match state.units {
        Units::Celsius => "°C",
        Units::Fahrenheit => "°F",
    };
    let mode = match state.mode {
        AppMode::Loading => Span::styled("Loading…", Style::default().fg(theme.warning)),
        AppMode::Empty => Span::styled("No data", Style::default().fg(theme.danger)),
        AppMode::Ready | AppMode::Quit => {
            let updated = state.last_success.map_or_else(
                || "Updated".to_string(),
                |at| format!("Updated {}", at.with_timezone(&Local).format("%H:%M")),
            );
            Span::styled(updated, Style::default().fg(theme.success))
        }
    };
    let mut spans = vec![
        mode,
        Span::styled("  ·  ", muted),
        Span::styled(units, Style::default().fg(theme.accent)),
        Span::styled("  ·  days in ", muted),
        Span::styled(state.day_zone.label(), Style::default().fg(theme.accent)),
    ];
    if state.fetch_in_flight && state.mode == AppMode::Ready {
        spans.push(Span::styled("  ·  refreshing", muted));
    }
    Line::from(spans)
}

fn sun_line(geo: &GeoSummary, theme: Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.muted_text);
    let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(geo.location.clone(), value)];
    if let (Some(rise), Some(set), Some(rise_there), Some(set_there)) = (
        &geo.sunrise,
        &geo.sunset,
        &geo.sunrise_local,
        &geo.sunset_local,
    ) {
        spans.extend([
            Span::styled("  Sunrise ", muted),
            Span::styled(rise.clone(), value),
            Span::styled(format!(" ({rise_there} there)"), muted),
            Span::styled("  Sunset ", muted),
            Span::styled(set.clone(), value),
            Span::styled(format!(" ({set_there} there)"), muted),
        ]);
    }
    spans.extend([
        Span::styled("  Offset ", muted),
        Span::styled(geo.time_offset.clone(), value),
    ]);
    Line::from(spans)
}
