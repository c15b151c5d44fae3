use chrono::NaiveDateTime;

use crate::{
    evaluate::{QuerySpan, limit_nanos},
    rule::{RegulationKind, Rule},
};

impl Rule {
    /// Fraction of `[start, end)` during which parking is allowed, in `[0, 1]`.
    ///
    /// An empty or inverted interval has coverage 0. An interval the rule
    /// does not touch has coverage 1.
    pub fn coverage(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        let Some(span) = QuerySpan::new(start, end) else {
            return 0.0;
        };

        if !self.days.applies_on(span.day) {
            return 1.0;
        }

        let overlap = match self.hours.restricting_window() {
            None => span.duration,
            Some(window) => span.overlap(window),
        };
        if overlap == 0 {
            return 1.0;
        }

        let duration = span.duration as f64;
        let free = (span.duration - overlap) as f64;

        match self.kind {
            RegulationKind::NoParking | RegulationKind::Unclassified => free / duration,
            RegulationKind::TimeLimited { minutes } => {
                let allowed = limit_nanos(minutes).min(overlap) as f64;
                ((free + allowed) / duration).min(1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::rule::{ActiveDays, ParsedHours, TimeWindow, WeekdaySet};

    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        at_s(day, h, m, 0)
    }

    fn at_s(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn weekdays(window: TimeWindow, kind: RegulationKind) -> Rule {
        Rule {
            days: ActiveDays::Only(WeekdaySet::from_days(1..=5).unwrap()),
            hours: ParsedHours::Matched(window),
            kind,
        }
    }

    #[test]
    fn no_parking_partial_overlap() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(1, 8, 0), at(1, 10, 0)), 0.5);
    }

    #[test]
    fn no_parking_full_overlap_is_zero() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(1, 10, 0), at(1, 12, 0)), 0.0);
    }

    #[test]
    fn outside_window_is_fully_free() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(1, 20, 0), at(1, 21, 0)), 1.0);
    }

    #[test]
    fn excluded_day_is_fully_free() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(7, 10, 0), at(7, 12, 0)), 1.0);
    }

    #[test]
    fn empty_interval_is_zero() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(1, 10, 0), at(1, 10, 0)), 0.0);
        assert_eq!(r.coverage(at(1, 12, 0), at(1, 10, 0)), 0.0);
    }

    #[test]
    fn sub_minute_interval_outside_window_is_free() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        assert_eq!(r.coverage(at_s(1, 20, 0, 10), at_s(1, 20, 0, 50)), 1.0);
    }

    #[test]
    fn sub_minute_interval_crossing_window_start() {
        // 20 of 50 seconds fall under no-parking.
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        let c = r.coverage(at_s(1, 8, 59, 30), at_s(1, 9, 0, 20));
        assert!((c - 0.6).abs() < 1e-9);
    }

    #[test]
    fn time_limit_allows_part_of_overlap() {
        let r = weekdays(
            TimeWindow::new(540, 1080),
            RegulationKind::TimeLimited { minutes: 120 },
        );
        assert_eq!(r.coverage(at(1, 9, 0), at(1, 13, 0)), 0.5);
    }

    #[test]
    fn time_limit_longer_than_overlap_is_free() {
        let r = weekdays(
            TimeWindow::new(540, 1080),
            RegulationKind::TimeLimited { minutes: 240 },
        );
        assert_eq!(r.coverage(at(1, 8, 0), at(1, 10, 0)), 1.0);
    }

    #[test]
    fn time_limit_mixed_with_free_minutes() {
        // 60 free + min(30, 120) allowed out of 180.
        let r = weekdays(
            TimeWindow::new(540, 1080),
            RegulationKind::TimeLimited { minutes: 30 },
        );
        let c = r.coverage(at(1, 8, 0), at(1, 11, 0));
        assert!((c - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unclassified_treated_like_no_parking() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::Unclassified);
        assert_eq!(r.coverage(at(1, 8, 0), at(1, 10, 0)), 0.5);
    }

    #[test]
    fn all_day_rule_covers_whole_interval() {
        let r = weekdays(TimeWindow::ALL_DAY, RegulationKind::NoParking);
        assert_eq!(r.coverage(at(1, 1, 0), at(1, 2, 0)), 0.0);

        let limited = weekdays(TimeWindow::ALL_DAY, RegulationKind::TimeLimited { minutes: 60 });
        assert_eq!(limited.coverage(at(1, 1, 0), at(1, 5, 0)), 0.25);
    }

    #[test]
    fn overnight_window_evening_piece() {
        let r = weekdays(TimeWindow::new(1320, 360), RegulationKind::NoParking);
        assert_eq!(r.coverage(at(2, 21, 0), at(2, 23, 0)), 0.5);
        assert_eq!(r.coverage(at(2, 5, 0), at(2, 7, 0)), 0.5);
    }

    #[test]
    fn wider_interval_never_raises_no_parking_coverage() {
        let r = weekdays(TimeWindow::new(540, 1080), RegulationKind::NoParking);
        let start = at(1, 8, 0);
        let mut previous = r.coverage(start, at(1, 9, 0));
        for hour in 10..=18 {
            let c = r.coverage(start, at(1, hour, 0));
            assert!(c <= previous);
            previous = c;
        }
    }
}
