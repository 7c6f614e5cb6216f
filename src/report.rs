//! Plain-text rendering of a bundle for `--one-shot`.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    cli::IconMode,
    domain::{
        forecast::DaySummary,
        weather::{
            Units, WeatherBundle, icon_glyph, summarize_conditions, summarize_geo, temp_string,
        },
    },
};

/// Formats `bundle` with days bucketed and times shown in `tz`.
pub fn render_report<Tz>(
    bundle: &WeatherBundle,
    tz: &Tz,
    units: Units,
    icon_mode: IconMode,
    now: DateTime<Utc>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut lines = vec![bundle.title()];

    if let Some(current) = &bundle.current {
        let geo = summarize_geo(current, &now.with_timezone(tz));
        let mut sun = geo.location;
        if let (Some(rise), Some(set)) = (geo.sunrise, geo.sunset) {
            sun.push_str(&format!("  sunrise {rise}  sunset {set}"));
        }
        sun.push_str(&format!("  ({})", geo.time_offset));
        lines.push(sun);

        let summary = summarize_conditions(current, bundle.forecast.as_ref(), now, units);
        lines.push(String::new());
        lines.push(format!(
            "Now: {} {}  (feels like {})",
            summary.temp,
            summary.description.unwrap_or_default(),
            summary.feels_like
        ));
        if let (Some(min), Some(max)) = (summary.min_temp, summary.max_temp) {
            lines.push(format!("Min {min}  Max {max}"));
        }
        lines.push(format!(
            "Humidity {}  Pressure {}",
            summary.humidity, summary.pressure
        ));
        for (label, value) in [
            ("Wind", summary.wind),
            ("Clouds", summary.clouds),
            ("Rain", summary.rain),
            ("Snow", summary.snow),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                lines.push(format!("{label} {value}"));
            }
        }
    }

    if let Some(pollution) = &bundle.pollution {
        lines.push(String::new());
        lines.push(pollution.headline());
        let components = pollution
            .component_rows()
            .into_iter()
            .map(|(name, value)| format!("{name} {value}"))
            .collect::<Vec<_>>();
        if !components.is_empty() {
            lines.push(format!("  {}", components.join("  ")));
        }
    }

    let days = bundle.five_day(tz);
    if !days.is_empty() {
        lines.push(String::new());
        lines.push("5-day forecast".to_string());
        lines.extend(days.iter().map(|day| day_line(day, tz, units, icon_mode)));
    }

    lines.join("\n")
}

fn day_line<Tz: TimeZone>(day: &DaySummary, tz: &Tz, units: Units, icon_mode: IconMode) -> String
where
    Tz::Offset: fmt::Display,
{
    let strip = day
        .slots
        .iter()
        .map(|slot| icon_glyph(slot.icon.as_deref(), icon_mode))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}  {}  {}..{}",
        day.date.with_timezone(tz).format("%a %d"),
        strip,
        temp_string(day.min_temp_c, units),
        temp_string(day.max_temp_c, units)
    )
}
