#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use ratatui::style::Color;

use crate::{
    app::state::AppState,
    domain::{
        pollution::AirQualityIndex,
        weather::{WeatherCategory, icon_category},
    },
};

mod capability;

pub use capability::detect_color_capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub surface: Color,
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub temp_freezing: Color,
    pub temp_cold: Color,
    pub temp_mild: Color,
    pub temp_warm: Color,
    pub temp_hot: Color,
    pub range_track: Color,
}

/// Palette keyed on the current sky, reduced to what the terminal can show.
pub fn theme_for(category: WeatherCategory, capability: ColorCapability) -> Theme {
    let (surface, accent): (Rgb, Rgb) = match category {
        WeatherCategory::Clear => ((13, 53, 102), (255, 215, 117)),
        WeatherCategory::Cloudy => ((25, 36, 51), (210, 223, 235)),
        WeatherCategory::Rain => ((17, 47, 88), (153, 214, 255)),
        WeatherCategory::Snow => ((27, 51, 77), (237, 247, 255)),
        WeatherCategory::Fog => ((30, 34, 40), (216, 220, 224)),
        WeatherCategory::Thunder => ((28, 25, 66), (255, 223, 112)),
        WeatherCategory::Unknown => ((20, 26, 40), (180, 200, 220)),
    };
    let q = |rgb: Rgb| quantize(Color::Rgb(rgb.0, rgb.1, rgb.2), capability);

    Theme {
        surface: q(surface),
        accent: q(accent),
        text: q((236, 242, 248)),
        muted_text: q((150, 165, 182)),
        border: q(mix_rgb(surface, accent, 0.45)),
        info: q((110, 190, 255)),
        success: q((120, 220, 140)),
        warning: q((250, 200, 90)),
        danger: q((245, 95, 95)),
        temp_freezing: q((170, 200, 255)),
        temp_cold: q((105, 170, 250)),
        temp_mild: q((140, 225, 170)),
        temp_warm: q((250, 205, 100)),
        temp_hot: q((250, 120, 80)),
        range_track: q(mix_rgb(surface, (236, 242, 248), 0.25)),
    }
}

/// Theme for whatever the app is currently showing.
pub fn resolved_theme(state: &AppState) -> Theme {
    let category = state
        .weather
        .as_ref()
        .and_then(|bundle| bundle.current.as_ref())
        .and_then(|current| current.primary_icon())
        .map_or(WeatherCategory::Unknown, icon_category);
    theme_for(category, detect_color_capability())
}

pub fn icon_color(theme: &Theme, category: WeatherCategory) -> Color {
    match category {
        WeatherCategory::Clear => theme.warning,
        WeatherCategory::Cloudy | WeatherCategory::Fog => theme.muted_text,
        WeatherCategory::Rain => theme.info,
        WeatherCategory::Snow => theme.text,
        WeatherCategory::Thunder => theme.danger,
        WeatherCategory::Unknown => theme.accent,
    }
}

/// Band colour for a temperature in Celsius.
pub fn temp_color(theme: &Theme, temp_c: f32) -> Color {
    if temp_c <= -8.0 {
        theme.temp_freezing
    } else if temp_c <= 2.0 {
        theme.temp_cold
    } else if temp_c <= 16.0 {
        theme.temp_mild
    } else if temp_c <= 28.0 {
        theme.temp_warm
    } else {
        theme.temp_hot
    }
}

pub fn aqi_color(theme: &Theme, aqi: AirQualityIndex) -> Color {
    match aqi.0 {
        1 => theme.success,
        2 => theme.temp_mild,
        3 => theme.warning,
        4 | 5 => theme.danger,
        _ => theme.muted_text,
    }
}

fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let (rf, gf, bf) = (
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    // (dark, bright) pairs for each 60° sector starting at red.
    const SECTORS: [(Color, Color); 6] = [
        (Color::Red, Color::LightRed),
        (Color::Yellow, Color::LightYellow),
        (Color::Green, Color::LightGreen),
        (Color::Cyan, Color::LightCyan),
        (Color::Blue, Color::LightBlue),
        (Color::Magenta, Color::LightMagenta),
    ];
    let sector = (((hue + 30.0).rem_euclid(360.0)) / 60.0) as usize % SECTORS.len();
    let (dark, bright) = SECTORS[sector];
    if light >= 0.55 { bright } else { dark }
}
