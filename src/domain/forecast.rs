//! Folds the 3-hourly forecast feed into one summary per calendar day.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Number of 3-hour slots in a day's icon strip.
pub const SLOTS_PER_DAY: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub min_temp_c: f32,
    pub max_temp_c: f32,
    pub icon: Option<String>,
    pub sunrise: Option<DateTime<Utc>>,
}

/// One cell of a day's icon strip. Padding cells carry neither field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    pub time: Option<DateTime<Utc>>,
    pub icon: Option<String>,
}

impl Slot {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.time.is_none() && self.icon.is_none()
    }
}

/// Normalized distances of a day's extremes from the range-wide extremes.
///
/// Both are NaN when every day shares one temperature.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clip {
    pub leading: f32,
    pub trailing: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: DateTime<Utc>,
    pub min_temp_c: f32,
    pub max_temp_c: f32,
    pub slots: Vec<Slot>,
    pub sunrise: Option<DateTime<Utc>>,
    pub clip: Clip,
}

impl DaySummary {
    fn seeded(sample: ForecastSample) -> Self {
        Self {
            date: sample.timestamp,
            min_temp_c: sample.min_temp_c,
            max_temp_c: sample.max_temp_c,
            slots: vec![Slot {
                time: Some(sample.timestamp),
                icon: sample.icon,
            }],
            sunrise: sample.sunrise,
            clip: Clip::default(),
        }
    }

    fn absorb(self, sample: ForecastSample) -> Self {
        let mut slots = self.slots;
        slots.push(Slot {
            time: Some(sample.timestamp),
            icon: sample.icon,
        });
        Self {
            date: self.date,
            min_temp_c: self.min_temp_c.min(sample.min_temp_c),
            max_temp_c: self.max_temp_c.max(sample.max_temp_c),
            slots,
            sunrise: self.sunrise.or(sample.sunrise),
            clip: self.clip,
        }
    }

    /// True when `date` falls on the same calendar day as `now` in `now`'s zone.
    pub fn is_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
    }

    #[must_use]
    pub fn real_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_placeholder()).count()
    }
}

/// Merges `samples` into per-day summaries, one per calendar day of `tz`.
///
/// Input order does not matter; samples are stably sorted by timestamp first.
/// Every returned day has exactly [`SLOTS_PER_DAY`] slots.
pub fn aggregate<Tz, I>(samples: I, tz: &Tz) -> Vec<DaySummary>
where
    Tz: TimeZone,
    I: IntoIterator<Item = ForecastSample>,
{
    let mut sorted: Vec<ForecastSample> = samples.into_iter().collect();
    sorted.sort_by_key(|sample| sample.timestamp);

    let mut days = merge_by_day(sorted, tz);
    pad_boundaries(&mut days);
    normalize_clips(&mut days);
    days
}

fn merge_by_day<Tz: TimeZone>(sorted: Vec<ForecastSample>, tz: &Tz) -> Vec<DaySummary> {
    let mut days: Vec<DaySummary> = Vec::new();
    let mut current_day: Option<NaiveDate> = None;

    for sample in sorted {
        let day = sample.timestamp.with_timezone(tz).date_naive();
        if current_day == Some(day) {
            if let Some(last) = days.pop() {
                days.push(last.absorb(sample));
            }
        } else {
            current_day = Some(day);
            days.push(DaySummary::seeded(sample));
        }
    }

    days
}

fn pad_boundaries(days: &mut [DaySummary]) {
    let Some(last_idx) = days.len().checked_sub(1) else {
        return;
    };

    let first = &mut days[0];
    let missing = SLOTS_PER_DAY.saturating_sub(first.slots.len());
    if missing > 0 {
        first
            .slots
            .splice(0..0, std::iter::repeat_n(Slot::default(), missing));
    }

    // A DST transition can leave an interior day one slot long or short.
    if last_idx > 1 {
        for day in &mut days[1..last_idx] {
            day.slots.resize(SLOTS_PER_DAY, Slot::default());
        }
    }

    let last = &mut days[last_idx];
    if last.slots.len() < SLOTS_PER_DAY {
        last.slots.resize(SLOTS_PER_DAY, Slot::default());
    }

    for day in days.iter_mut() {
        day.slots.truncate(SLOTS_PER_DAY);
    }
}

fn normalize_clips(days: &mut [DaySummary]) {
    if days.is_empty() {
        return;
    }

    let global_min = days
        .iter()
        .map(|d| d.min_temp_c)
        .fold(f32::INFINITY, f32::min);
    let global_max = days
        .iter()
        .map(|d| d.max_temp_c)
        .fold(f32::NEG_INFINITY, f32::max);
    let span = global_max - global_min;

    for day in days {
        day.clip = Clip {
            leading: (day.min_temp_c - global_min) / span,
            trailing: (global_max - day.max_temp_c) / span,
        };
    }
}

/// Decoded 3-hour forecast record, keeping the record's own min/max range.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temp_c: f32,
    pub temp_min_c: f32,
    pub temp_max_c: f32,
    pub icon: Option<String>,
    pub sunrise: Option<DateTime<Utc>>,
}

impl ForecastPoint {
    /// The aggregator input for this record, pinned to its instantaneous temperature.
    #[must_use]
    pub fn sample(&self) -> ForecastSample {
        ForecastSample {
            timestamp: self.timestamp,
            min_temp_c: self.temp_c,
            max_temp_c: self.temp_c,
            icon: self.icon.clone(),
            sunrise: self.sunrise,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
    /// Forecast city's offset from UTC in seconds.
    pub utc_offset_secs: i32,
}

impl ForecastSeries {
    pub fn five_day<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DaySummary> {
        aggregate(self.points.iter().map(ForecastPoint::sample), tz)
    }

    #[must_use]
    pub fn extremes_within(&self, within: Duration, now: DateTime<Utc>) -> Option<(f32, f32)> {
        window_extremes(&self.points, within, now)
    }
}

/// Lowest `temp_min_c` and highest `temp_max_c` among points at most
/// `within` ahead of `now`. Points already in the past are included.
#[must_use]
pub fn window_extremes(
    points: &[ForecastPoint],
    within: Duration,
    now: DateTime<Utc>,
) -> Option<(f32, f32)> {
    let mut window = points.iter().filter(|p| p.timestamp - now <= within);
    let first = window.next()?;
    Some(window.fold((first.temp_min_c, first.temp_max_c), |(lo, hi), p| {
        (lo.min(p.temp_min_c), hi.max(p.temp_max_c))
    }))
}
