#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::{domain::pollution::AqiPoint, ui::theme::Theme};

pub(super) fn panel_style(theme: Theme) -> Style {
    Style::default().fg(theme.text).bg(theme.surface)
}

pub(super) fn panel_block(title: String, theme: Theme) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(panel_style(theme))
        .border_style(Style::default().fg(theme.border).bg(theme.surface))
}

/// One bar per column on a fixed 1..=5 scale, resampling `points` to `width`.
pub(super) fn aqi_trend(points: &[AqiPoint], width: usize) -> String {
    const BARS: [char; 5] = ['▁', '▃', '▄', '▆', '█'];
    if points.is_empty() || width == 0 {
        return String::new();
    }
    let columns = width.min(points.len());
    (0..columns)
        .map(|idx| {
            let src = (idx * points.len() / columns).min(points.len() - 1);
            let level = usize::from(points[src].aqi.0.clamp(1, 5)) - 1;
            BARS[level]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::aqi_trend;
    use crate::domain::pollution::{AirQualityIndex, AqiPoint};

    fn points(levels: &[u8]) -> Vec<AqiPoint> {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        levels
            .iter()
            .enumerate()
            .map(|(idx, level)| AqiPoint {
                time: start + Duration::hours(idx as i64),
                aqi: AirQualityIndex(*level),
            })
            .collect()
    }

    #[test]
    fn trend_is_empty_without_points_or_room() {
        assert_eq!(aqi_trend(&[], 8), "");
        assert_eq!(aqi_trend(&points(&[1, 2]), 0), "");
    }

    #[test]
    fn trend_uses_a_fixed_scale() {
        assert_eq!(aqi_trend(&points(&[1, 2, 3, 4, 5]), 10), "▁▃▄▆█");
        assert_eq!(aqi_trend(&points(&[3, 3]), 2), "▄▄");
    }

    #[test]
    fn trend_resamples_to_width() {
        let trend = aqi_trend(&points(&[1, 1, 5, 5]), 2);
        assert_eq!(trend, "▁█");
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        assert_eq!(aqi_trend(&points(&[0, 9]), 2), "▁█");
    }
}
