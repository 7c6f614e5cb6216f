#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::{
        forecast::{Clip, DaySummary, SLOTS_PER_DAY},
        weather::{icon_category, icon_glyph, temp_string},
    },
    ui::theme::{Theme, icon_color, temp_color},
};

use super::shared::panel_block;

const DAY_WIDTH: u16 = 9;
const TEMP_WIDTH: u16 = 5;
const COLUMN_SPACING: u16 = 1;
const MAX_BAR_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let block = panel_block(format!(" 5-Day Forecast ({}) ", state.day_zone.label()), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.days.is_empty() {
        let message = Paragraph::new("No forecast data").style(Style::default().fg(theme.muted_text));
        frame.render_widget(message, inner);
        return;
    }

    let strip_width = strip_width(state.icon_mode);
    let fixed = DAY_WIDTH + strip_width + 2 * TEMP_WIDTH + 4 * COLUMN_SPACING;
    let bar_width = usize::from(inner.width.saturating_sub(fixed)).min(MAX_BAR_WIDTH);

    let rows = state
        .days
        .iter()
        .take(usize::from(inner.height.saturating_sub(1)))
        .map(|day| day_row(day, state, theme, bar_width))
        .collect::<Vec<_>>();
    let widths = [
        Constraint::Length(DAY_WIDTH),
        Constraint::Length(strip_width),
        Constraint::Length(TEMP_WIDTH),
        Constraint::Length(bar_width as u16),
        Constraint::Length(TEMP_WIDTH),
    ];
    let header = Row::new(["Day", "3-hourly", "Low", "Range", "High"])
        .style(Style::default().fg(theme.muted_text));
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING);
    frame.render_widget(table, inner);
}

fn strip_width(mode: IconMode) -> u16 {
    let glyph = match mode {
        IconMode::Ascii => 3,
        IconMode::Unicode => 1,
    };
    (glyph * SLOTS_PER_DAY + SLOTS_PER_DAY - 1) as u16
}

fn day_row(day: &DaySummary, state: &AppState, theme: Theme, bar_width: usize) -> Row<'static> {
    let label = if state.is_today(day) {
        "Today".to_string()
    } else {
        state.day_label(day)
    };
    let cells = vec![
        Cell::from(label),
        Cell::from(icon_strip(day, state.icon_mode, theme)),
        Cell::from(temp_string(day.min_temp_c, state.units))
            .style(Style::default().fg(temp_color(&theme, day.min_temp_c))),
        Cell::from(range_bar(day.clip, bar_width, theme)),
        Cell::from(temp_string(day.max_temp_c, state.units))
            .style(Style::default().fg(temp_color(&theme, day.max_temp_c))),
    ];
    let row = Row::new(cells);
    if state.is_today(day) {
        row.style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        row
    }
}

fn icon_strip(day: &DaySummary, mode: IconMode, theme: Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(day.slots.len() * 2);
    for (idx, slot) in day.slots.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let icon = slot.icon.as_deref();
        let color = icon.map_or(theme.muted_text, |code| icon_color(&theme, icon_category(code)));
        spans.push(Span::styled(icon_glyph(icon, mode), Style::default().fg(color)));
    }
    Line::from(spans)
}

/// Filled cell range `[start, end)` for a day's bar in a track of `width`
/// cells. A non-finite clip leaves that end of the bar uninset.
pub fn bar_bounds(clip: Clip, width: usize) -> (usize, usize) {
    let inset = |fraction: f32| -> usize {
        if fraction.is_finite() {
            (fraction.clamp(0.0, 1.0) * width as f32).round() as usize
        } else {
            0
        }
    };
    let start = inset(clip.leading).min(width);
    let end = width.saturating_sub(inset(clip.trailing)).max(start);
    (start, end)
}

fn range_bar(clip: Clip, width: usize, theme: Theme) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    let (start, end) = bar_bounds(clip, width);
    // A day pinned to one temperature still gets a single cell.
    let start = start.min(width - 1);
    let fill = end.saturating_sub(start).max(1);
    let after = width - start - fill;
    Line::from(vec![
        Span::styled("·".repeat(start), Style::default().fg(theme.range_track)),
        Span::styled("█".repeat(fill), Style::default().fg(theme.accent)),
        Span::styled("·".repeat(after), Style::default().fg(theme.range_track)),
    ])
}

#[cfg(test)]
mod tests {
    use super::{bar_bounds, strip_width};
    use crate::{cli::IconMode, domain::forecast::Clip};

    fn clip(leading: f32, trailing: f32) -> Clip {
        Clip { leading, trailing }
    }

    #[test]
    fn full_range_fills_the_track() {
        assert_eq!(bar_bounds(clip(0.0, 0.0), 20), (0, 20));
    }

    #[test]
    fn insets_scale_with_width() {
        assert_eq!(bar_bounds(clip(0.25, 0.5), 20), (5, 10));
        assert_eq!(bar_bounds(clip(0.5, 0.0), 10), (5, 10));
    }

    #[test]
    fn nan_clip_means_no_inset() {
        assert_eq!(bar_bounds(clip(f32::NAN, f32::NAN), 12), (0, 12));
    }

    #[test]
    fn overlapping_insets_collapse_to_empty() {
        let (start, end) = bar_bounds(clip(0.8, 0.8), 10);
        assert_eq!(start, end);
    }

    #[test]
    fn strip_fits_eight_glyphs_with_separators() {
        assert_eq!(strip_width(IconMode::Unicode), 15);
        assert_eq!(strip_width(IconMode::Ascii), 31);
    }
}
