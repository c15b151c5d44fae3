use chrono::NaiveDateTime;

use crate::{
    evaluate::{day_index, minute_of_day},
    rule::Rule,
};

impl Rule {
    /// Whether the regulation is in force at `at`.
    ///
    /// The post-midnight part of an overnight window belongs to the previous
    /// day, so it only counts when yesterday is an active day.
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        let today = day_index(at.date());

        let Some(window) = self.hours.restricting_window() else {
            return self.days.applies_on(today);
        };

        let minute = minute_of_day(at);
        window.segments().any(|seg| {
            let owner = if seg.carried_over { (today + 6) % 7 } else { today };
            seg.contains(minute) && self.days.applies_on(owner)
        })
    }
}
