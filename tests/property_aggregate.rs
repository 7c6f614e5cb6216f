use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use metcast::domain::forecast::{ForecastSample, SLOTS_PER_DAY, aggregate};
use proptest::prelude::*;

const TEN_DAYS_SECS: i64 = 10 * 24 * 3600;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap()
}

fn sample(timestamp: DateTime<Utc>, temp: f32) -> ForecastSample {
    ForecastSample {
        timestamp,
        min_temp_c: temp,
        max_temp_c: temp,
        icon: Some("03d".to_string()),
        sunrise: None,
    }
}

fn zone() -> impl Strategy<Value = FixedOffset> {
    (-12i32..=14).prop_map(|hours| FixedOffset::east_opt(hours * 3600).unwrap())
}

/// Distinct timestamps within ten days, each with a temperature.
fn scattered_samples() -> impl Strategy<Value = Vec<ForecastSample>> {
    prop::collection::btree_set(0..TEN_DAYS_SECS, 0..60).prop_flat_map(|offsets| {
        let offsets = offsets.into_iter().collect::<Vec<_>>();
        let len = offsets.len();
        prop::collection::vec(-40.0f32..50.0, len).prop_map(move |temps| {
            offsets
                .iter()
                .zip(temps)
                .map(|(offset, temp)| sample(base() + Duration::seconds(*offset), temp))
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn every_day_has_eight_ordered_slots(samples in scattered_samples(), tz in zone()) {
        let days = aggregate(samples, &tz);
        for day in &days {
            prop_assert_eq!(day.slots.len(), SLOTS_PER_DAY);
            prop_assert!(day.min_temp_c <= day.max_temp_c);
        }
        for pair in days.windows(2) {
            prop_assert!(
                pair[0].date.with_timezone(&tz).date_naive()
                    < pair[1].date.with_timezone(&tz).date_naive()
            );
        }
    }

    #[test]
    fn one_day_per_distinct_local_date(samples in scattered_samples(), tz in zone()) {
        let dates = samples
            .iter()
            .map(|s| s.timestamp.with_timezone(&tz).date_naive())
            .collect::<BTreeSet<_>>();
        let days = aggregate(samples, &tz);
        prop_assert_eq!(days.len(), dates.len());
    }

    #[test]
    fn input_order_does_not_matter(
        samples in scattered_samples().prop_shuffle(),
        tz in zone(),
    ) {
        let mut sorted = samples.clone();
        sorted.sort_by_key(|s| s.timestamp);
        let shuffled = aggregate(samples, &tz);
        let ordered = aggregate(sorted, &tz);
        // Debug output compares NaN clips as equal.
        prop_assert_eq!(format!("{shuffled:?}"), format!("{ordered:?}"));
    }

    #[test]
    fn clips_are_unit_fractions_or_nan(samples in scattered_samples(), tz in zone()) {
        let days = aggregate(samples, &tz);
        let flat = days
            .first()
            .is_some_and(|first| days.iter().all(|d| {
                d.min_temp_c == first.min_temp_c && d.max_temp_c == first.min_temp_c
            }));
        for day in &days {
            if flat {
                prop_assert!(day.clip.leading.is_nan());
                prop_assert!(day.clip.trailing.is_nan());
            } else {
                prop_assert!((0.0..=1.0).contains(&day.clip.leading));
                prop_assert!((0.0..=1.0).contains(&day.clip.trailing));
            }
        }
    }

    #[test]
    fn regular_series_keeps_every_sample(
        start_offset in 0i64..(24 * 3600),
        count in 1usize..45,
        tz in zone(),
    ) {
        let start = base() + Duration::seconds(start_offset);
        let samples = (0..count)
            .map(|idx| sample(start + Duration::hours(3 * idx as i64), idx as f32))
            .collect::<Vec<_>>();
        let days = aggregate(samples, &tz);

        let real = days.iter().map(|d| d.real_slot_count()).sum::<usize>();
        prop_assert_eq!(real, count);

        // Padding sits before the first sample and after the last one.
        let first = &days[0];
        let leading = SLOTS_PER_DAY - first.real_slot_count();
        prop_assert!(first.slots[..leading].iter().all(|s| s.is_placeholder()));
        if days.len() > 1 {
            let last = &days[days.len() - 1];
            let kept = last.real_slot_count();
            prop_assert!(last.slots[..kept].iter().all(|s| !s.is_placeholder()));
            prop_assert!(last.slots[kept..].iter().all(|s| s.is_placeholder()));
        }
    }
}

#[test]
fn no_samples_no_days() {
    assert!(aggregate(Vec::new(), &Utc).is_empty());
}
