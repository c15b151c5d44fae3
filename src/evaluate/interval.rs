use chrono::NaiveDateTime;

use crate::{evaluate::QuerySpan, rule::Rule};

impl Rule {
    /// Whether any part of `[start, end)` falls under the regulation.
    ///
    /// Only the start day's membership is checked: an overnight rule from the
    /// previous day does not make its early-morning minutes intersect.
    pub fn intersects_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let Some(span) = QuerySpan::new(start, end) else {
            return false;
        };

        if !self.days.applies_on(span.day) {
            return false;
        }

        match self.hours.restricting_window() {
            None => true,
            Some(window) => span.overlap(window) > 0,
        }
    }
}
