//! X-axis tick placement and labeling.
//!
//! Positions are in axis units: the sample index for categorical axes, Unix
//! seconds for date axes.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

/// Most labels a categorical axis shows before thinning them out.
pub const MAX_CATEGORICAL_TICKS: usize = 10;

/// Concise locator targets this many ticks.
pub const MIN_CONCISE_TICKS: usize = 4;
pub const MAX_CONCISE_TICKS: usize = 8;

/// Candidate concise intervals, smallest first.
const CONCISE_STEPS: &[i64] = &[
    HOUR,
    2 * HOUR,
    3 * HOUR,
    4 * HOUR,
    6 * HOUR,
    12 * HOUR,
    DAY,
    2 * DAY,
    7 * DAY,
    14 * DAY,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    /// May contain `\n`; each line is drawn separately.
    pub label: String,
}

/// Ticks plus an optional axis-wide offset label (year/month context).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSet {
    pub ticks: Vec<Tick>,
    pub offset: Option<String>,
}

/// Evenly thinned raw labels at their sample index.
pub fn categorical(labels: &[String]) -> TickSet {
    let step = labels.len().div_ceil(MAX_CATEGORICAL_TICKS).max(1);

    let ticks = labels
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, label)| Tick {
            position: i as f64,
            label: label.clone(),
        })
        .collect();

    TickSet {
        ticks,
        offset: None,
    }
}

/// Date ticks at the smallest "nice" interval that keeps at most
/// [`MAX_CONCISE_TICKS`] inside `start..=end`, labeled with only the component
/// that changes.
pub fn concise(start: DateTime<Utc>, end: DateTime<Utc>) -> TickSet {
    let (from, to) = (start.timestamp(), end.timestamp());

    let step = CONCISE_STEPS
        .iter()
        .copied()
        .find(|&step| aligned(from, to, step).count() <= MAX_CONCISE_TICKS)
        .unwrap_or(CONCISE_STEPS[CONCISE_STEPS.len() - 1]);

    let times: Vec<DateTime<Utc>> = aligned(from, to, step).filter_map(to_utc).collect();

    let ticks = times
        .iter()
        .map(|t| Tick {
            position: t.timestamp() as f64,
            label: concise_label(t, step),
        })
        .collect();

    let offset = times.last().map(|last| {
        if step < DAY {
            last.format("%Y-%b-%d").to_string()
        } else {
            last.format("%Y-%b").to_string()
        }
    });

    TickSet { ticks, offset }
}

/// A tick at every hour divisible by `hours`, labeled `"%b %d\n%H:%M"`.
pub fn fixed_interval(start: DateTime<Utc>, end: DateTime<Utc>, hours: u32) -> TickSet {
    let step = i64::from(hours.max(1)) * HOUR;

    let ticks = aligned(start.timestamp(), end.timestamp(), step)
        .filter_map(to_utc)
        .map(|t| Tick {
            position: t.timestamp() as f64,
            label: interval_label(&t),
        })
        .collect();

    TickSet {
        ticks,
        offset: None,
    }
}

pub fn interval_label(t: &DateTime<Utc>) -> String {
    t.format("%b %d\n%H:%M").to_string()
}

fn concise_label(t: &DateTime<Utc>, step: i64) -> String {
    if step < DAY {
        if t.hour() == 0 && t.minute() == 0 {
            t.format("%b-%d").to_string()
        } else {
            t.format("%H:%M").to_string()
        }
    } else if t.day() == 1 && t.month() == 1 {
        t.format("%Y").to_string()
    } else if t.day() == 1 {
        t.format("%b").to_string()
    } else {
        t.format("%d").to_string()
    }
}

/// Multiples of `step` seconds (counted from the epoch, so from midnight UTC)
/// within `from..=to`.
fn aligned(from: i64, to: i64, step: i64) -> impl Iterator<Item = i64> {
    let first = from.div_euclid(step) * step;
    let first = if first < from { first + step } else { first };

    (0..)
        .map(move |k| first + k * step)
        .take_while(move |&ts| ts <= to)
}

fn to_utc(ts: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(ts, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        crate::series::parse_timestamp(s).unwrap()
    }

    fn labels(set: &TickSet) -> Vec<&str> {
        set.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn categorical_shows_every_label_when_few() {
        let raw: Vec<String> = (0..5).map(|h| format!("2025-06-05T0{h}:00")).collect();
        let set = categorical(&raw);

        assert_eq!(set.ticks.len(), 5);
        assert_eq!(set.ticks[3].position, 3.0);
        assert_eq!(set.ticks[3].label, "2025-06-05T03:00");
        assert!(set.offset.is_none());
    }

    #[test]
    fn categorical_thins_long_series() {
        let raw: Vec<String> = (0..168).map(|i| i.to_string()).collect();
        let set = categorical(&raw);

        assert!(set.ticks.len() <= MAX_CATEGORICAL_TICKS);
        assert_eq!(set.ticks[0].label, "0");
        assert_eq!(set.ticks[1].label, "17");
    }

    #[test]
    fn concise_one_day_uses_hour_labels_with_date_at_midnight() {
        let set = concise(utc("2025-06-05T00:00"), utc("2025-06-05T23:00"));

        assert!(set.ticks.len() >= MIN_CONCISE_TICKS);
        assert!(set.ticks.len() <= MAX_CONCISE_TICKS);
        assert_eq!(
            labels(&set),
            vec!["Jun-05", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
        );
        assert_eq!(set.offset.as_deref(), Some("2025-Jun-05"));
    }

    #[test]
    fn concise_week_uses_day_labels() {
        let set = concise(utc("2025-06-05T00:00"), utc("2025-06-11T23:00"));

        assert_eq!(labels(&set), vec!["05", "06", "07", "08", "09", "10", "11"]);
        assert_eq!(set.offset.as_deref(), Some("2025-Jun"));
    }

    #[test]
    fn concise_marks_month_and_year_boundaries() {
        let set = concise(utc("2024-12-28T00:00"), utc("2025-01-03T00:00"));
        let l = labels(&set);

        assert!(l.contains(&"2025"));
        assert!(l.contains(&"29"));

        let set = concise(utc("2025-05-29T00:00"), utc("2025-06-03T00:00"));
        assert!(labels(&set).contains(&"Jun"));
    }

    #[test]
    fn concise_never_exceeds_maximum() {
        let start = utc("2025-06-01T00:00");
        for days in 1..=16 {
            let end = start + chrono::Duration::days(days);
            let set = concise(start, end);
            assert!(set.ticks.len() <= MAX_CONCISE_TICKS, "{days} days");
            assert!(!set.ticks.is_empty(), "{days} days");
        }
    }

    #[test]
    fn fixed_interval_ticks_every_six_hours() {
        let set = fixed_interval(utc("2025-06-05T01:00"), utc("2025-06-06T00:00"), 6);

        assert_eq!(
            labels(&set),
            vec![
                "Jun 05\n06:00",
                "Jun 05\n12:00",
                "Jun 05\n18:00",
                "Jun 06\n00:00"
            ]
        );
        assert_eq!(
            set.ticks[0].position,
            utc("2025-06-05T06:00").timestamp() as f64
        );
    }

    #[test]
    fn aligned_handles_negative_timestamps() {
        let ticks: Vec<i64> = aligned(-7000, 0, HOUR).collect();
        assert_eq!(ticks, vec![-3600, 0]);
    }
}
