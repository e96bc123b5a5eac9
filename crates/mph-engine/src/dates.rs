//! Diagnosis-date comparisons over partially known dates.
//!
//! Two questions come up throughout the rule chains: which tumor was
//! diagnosed first, and were the diagnoses more than some number of days or
//! years apart. Both must answer conservatively when date components are
//! unknown, returning an indeterminate answer rather than guessing.

use chrono::NaiveDate;
use mph_types::PartialDate;

/// Relative order of two diagnosis dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxOrder {
    /// The available components cannot establish an order.
    Indeterminate,
    /// The first date is later than the second.
    FirstLater,
    /// The second date is later than the first.
    SecondLater,
    /// Both dates are fully known and identical.
    Same,
}

/// Answer to a "more than N days/years apart" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apart {
    /// The available components cannot decide.
    Indeterminate,
    /// The gap is certainly within the threshold.
    Within,
    /// The gap certainly exceeds the threshold.
    Exceeds,
}

/// Orders two diagnosis dates component by component.
///
/// Years decide when they differ; equal known components fall through to
/// the next finer component. Any unknown component needed to decide yields
/// [`DxOrder::Indeterminate`].
pub fn compare_diagnosis_dates(first: PartialDate, second: PartialDate) -> DxOrder {
    let (y1, y2) = match (first.year, second.year) {
        (Some(a), Some(b)) => (a, b),
        _ => return DxOrder::Indeterminate,
    };
    if y1 != y2 {
        return if y1 > y2 {
            DxOrder::FirstLater
        } else {
            DxOrder::SecondLater
        };
    }
    let (m1, m2) = match (first.month, second.month) {
        (Some(a), Some(b)) => (a, b),
        _ => return DxOrder::Indeterminate,
    };
    if m1 != m2 {
        return if m1 > m2 {
            DxOrder::FirstLater
        } else {
            DxOrder::SecondLater
        };
    }
    let (d1, d2) = match (first.day, second.day) {
        (Some(a), Some(b)) => (a, b),
        _ => return DxOrder::Indeterminate,
    };
    if d1 != d2 {
        if d1 > d2 {
            DxOrder::FirstLater
        } else {
            DxOrder::SecondLater
        }
    } else {
        DxOrder::Same
    }
}

/// Decides whether two diagnoses were more than `threshold` days apart.
///
/// Each partial date expands to the interval of calendar days it could
/// denote (unknown month ranges over the whole year, unknown day over the
/// whole month). The question is answered only when every possible pair of
/// concrete dates agrees.
pub fn days_apart(first: PartialDate, second: PartialDate, threshold: i64) -> Apart {
    let (a_min, a_max) = match possible_interval(first) {
        Some(bounds) => bounds,
        None => return Apart::Indeterminate,
    };
    let (b_min, b_max) = match possible_interval(second) {
        Some(bounds) => bounds,
        None => return Apart::Indeterminate,
    };

    // Smallest possible gap is zero when the intervals overlap.
    let min_gap = if a_min <= b_max && b_min <= a_max {
        0
    } else if a_min > b_max {
        (a_min - b_max).num_days()
    } else {
        (b_min - a_max).num_days()
    };
    let max_gap = (a_max - b_min)
        .num_days()
        .abs()
        .max((b_max - a_min).num_days().abs());

    if min_gap > threshold {
        Apart::Exceeds
    } else if max_gap <= threshold {
        Apart::Within
    } else {
        Apart::Indeterminate
    }
}

/// Decides whether two diagnoses were more than `threshold` years apart.
///
/// A year difference beyond the threshold decides immediately; a difference
/// exactly at the threshold refines on month and then day of the later
/// versus the earlier diagnosis.
pub fn years_apart(first: PartialDate, second: PartialDate, threshold: u16) -> Apart {
    let (y1, y2) = match (first.year, second.year) {
        (Some(a), Some(b)) => (a, b),
        _ => return Apart::Indeterminate,
    };
    let diff = y1.abs_diff(y2);
    if diff > threshold {
        return Apart::Exceeds;
    }
    if diff < threshold {
        return Apart::Within;
    }
    let (later, earlier) = if y1 > y2 {
        (first, second)
    } else {
        (second, first)
    };
    let (lm, em) = match (later.month, earlier.month) {
        (Some(a), Some(b)) => (a, b),
        _ => return Apart::Indeterminate,
    };
    if lm != em {
        return if lm > em { Apart::Exceeds } else { Apart::Within };
    }
    let (ld, ed) = match (later.day, earlier.day) {
        (Some(a), Some(b)) => (a, b),
        _ => return Apart::Indeterminate,
    };
    if ld > ed {
        Apart::Exceeds
    } else {
        Apart::Within
    }
}

/// The earliest and latest calendar days a partial date could denote.
fn possible_interval(date: PartialDate) -> Option<(NaiveDate, NaiveDate)> {
    let year = i32::from(date.year?);
    let (min_month, max_month) = match date.month {
        Some(m) => (u32::from(m), u32::from(m)),
        None => (1, 12),
    };
    let earliest = match date.day {
        Some(d) => clamped_date(year, min_month, u32::from(d)),
        None => clamped_date(year, min_month, 1),
    };
    let latest = match date.day {
        Some(d) => clamped_date(year, max_month, u32::from(d)),
        None => clamped_date(year, max_month, 31),
    };
    Some((earliest?, latest?))
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        // day beyond the short month, fall back to its last day
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        next.map(|d| d.pred_opt().unwrap_or(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> PartialDate {
        PartialDate::new(Some(y), Some(m), Some(d))
    }

    #[test]
    fn test_order_by_year_month_day() {
        assert_eq!(
            compare_diagnosis_dates(date(2016, 1, 1), date(2015, 12, 31)),
            DxOrder::FirstLater
        );
        assert_eq!(
            compare_diagnosis_dates(date(2015, 4, 1), date(2015, 9, 1)),
            DxOrder::SecondLater
        );
        assert_eq!(
            compare_diagnosis_dates(date(2015, 4, 12), date(2015, 4, 12)),
            DxOrder::Same
        );
    }

    #[test]
    fn test_order_indeterminate_on_missing_components() {
        let partial = PartialDate::new(Some(2015), None, None);
        assert_eq!(
            compare_diagnosis_dates(partial, date(2015, 6, 1)),
            DxOrder::Indeterminate
        );
        assert_eq!(
            compare_diagnosis_dates(PartialDate::UNKNOWN, date(2015, 6, 1)),
            DxOrder::Indeterminate
        );
        // Years differ, order is decidable without months
        assert_eq!(
            compare_diagnosis_dates(PartialDate::new(Some(2016), None, None), date(2015, 6, 1)),
            DxOrder::FirstLater
        );
    }

    #[test]
    fn test_days_apart_with_full_dates() {
        assert_eq!(
            days_apart(date(2015, 1, 1), date(2015, 2, 15), 60),
            Apart::Within
        );
        assert_eq!(
            days_apart(date(2015, 1, 1), date(2015, 6, 1), 60),
            Apart::Exceeds
        );
        assert_eq!(
            days_apart(date(2015, 3, 2), date(2015, 1, 1), 60),
            Apart::Within
        );
    }

    #[test]
    fn test_days_apart_month_only() {
        // January versus April of the same year: the gap could be 60 days
        // (Jan 31 to Apr 1) or 119 (Jan 1 to Apr 30)
        let jan = PartialDate::new(Some(2015), Some(1), None);
        let apr = PartialDate::new(Some(2015), Some(4), None);
        assert_eq!(days_apart(jan, apr, 60), Apart::Indeterminate);

        // February versus May: even the closest pair exceeds 60 days
        let feb = PartialDate::new(Some(2015), Some(2), None);
        let may = PartialDate::new(Some(2015), Some(5), None);
        assert_eq!(days_apart(feb, may, 60), Apart::Exceeds);

        // Same month is certainly within 60 days
        assert_eq!(days_apart(jan, jan, 60), Apart::Within);
    }

    #[test]
    fn test_days_apart_requires_years() {
        let no_year = PartialDate::new(None, Some(3), Some(1));
        assert_eq!(days_apart(no_year, date(2015, 3, 1), 60), Apart::Indeterminate);
    }

    #[test]
    fn test_years_apart_beyond_and_below() {
        let a = PartialDate::new(Some(2009), None, None);
        let b = PartialDate::new(Some(2015), None, None);
        assert_eq!(years_apart(a, b, 3), Apart::Exceeds);
        assert_eq!(years_apart(a, a, 3), Apart::Within);
    }

    #[test]
    fn test_years_apart_at_boundary_refines_on_months() {
        let early = date(2012, 3, 10);
        let late_over = date(2015, 7, 1);
        let late_under = date(2015, 1, 20);
        assert_eq!(years_apart(early, late_over, 3), Apart::Exceeds);
        assert_eq!(years_apart(early, late_under, 3), Apart::Within);

        let late_no_month = PartialDate::new(Some(2015), None, None);
        assert_eq!(years_apart(early, late_no_month, 3), Apart::Indeterminate);
    }

    #[test]
    fn test_years_apart_boundary_same_month_uses_days() {
        let early = date(2012, 3, 10);
        assert_eq!(years_apart(early, date(2015, 3, 25), 3), Apart::Exceeds);
        assert_eq!(years_apart(early, date(2015, 3, 10), 3), Apart::Within);
        assert_eq!(years_apart(early, date(2015, 3, 2), 3), Apart::Within);
    }
}
