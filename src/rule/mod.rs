pub mod classify;
pub mod days;
pub mod hours;

use crate::{record::RegulationRecord, rule::classify::Classifier};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Non-empty set of weekday indices, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Build from a bitmask (bit `n` = day `n`). An empty mask is not a set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        let bits = bits & 0x7f;
        (bits != 0).then_some(Self(bits))
    }

    pub fn contains(self, day: u8) -> bool {
        day < 7 && self.0 & (1 << day) != 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..7).filter(move |d| self.contains(*d))
    }

    /// Collect day indices; out-of-range indices are dropped.
    pub fn from_days(days: impl IntoIterator<Item = u8>) -> Option<Self> {
        let bits = days
            .into_iter()
            .filter(|d| *d < 7)
            .fold(0u8, |acc, d| acc | (1 << d));
        Self::from_bits(bits)
    }
}

/// Which weekdays a regulation applies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveDays {
    /// No day constraint could be read; the rule applies every day.
    Unrestricted,
    Only(WeekdaySet),
}

impl ActiveDays {
    pub fn applies_on(self, day: u8) -> bool {
        match self {
            ActiveDays::Unrestricted => true,
            ActiveDays::Only(set) => set.contains(day),
        }
    }
}

/// Minutes since local midnight. `end <= start` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    pub const ALL_DAY: TimeWindow = TimeWindow {
        start: 0,
        end: MINUTES_PER_DAY,
    };

    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_all_day(self) -> bool {
        self == Self::ALL_DAY
    }

    pub fn is_overnight(self) -> bool {
        self.end <= self.start
    }

    /// Split into half-open, non-wrapping pieces of a single day.
    ///
    /// An overnight window yields its evening piece `[start, 1440)` followed
    /// by the `[0, end)` piece that carries over from the previous day.
    pub fn segments(self) -> impl Iterator<Item = Segment> {
        let (first, carried) = if self.is_overnight() {
            (
                Segment {
                    start: self.start,
                    end: MINUTES_PER_DAY,
                    carried_over: false,
                },
                Some(Segment {
                    start: 0,
                    end: self.end,
                    carried_over: true,
                }),
            )
        } else {
            (
                Segment {
                    start: self.start,
                    end: self.end,
                    carried_over: false,
                },
                None,
            )
        };

        std::iter::once(first).chain(carried)
    }
}

/// A `[start, end)` run of minutes within one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
    /// Set for the post-midnight part of an overnight window, which belongs
    /// to the previous day's rule.
    pub carried_over: bool,
}

impl Segment {
    pub fn contains(self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Length of the intersection with `[start, end)`.
    pub fn overlap(self, start: u32, end: u32) -> u32 {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        hi.saturating_sub(lo)
    }
}

/// Outcome of reading an `hours` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedHours {
    Matched(TimeWindow),
    /// Text was present but not in a known format. Restriction unknown.
    Unparseable,
}

impl ParsedHours {
    /// The window that actually narrows the day, if any. Both the all-day
    /// window and unparseable text impose no time restriction.
    pub fn restricting_window(self) -> Option<TimeWindow> {
        match self {
            ParsedHours::Matched(w) if !w.is_all_day() => Some(w),
            _ => None,
        }
    }
}

/// What a regulation does to parking while it is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulationKind {
    /// No parking or tow-away: regulated minutes are unavailable.
    NoParking,
    /// A vehicle may stay for at most `minutes` of the regulated time.
    TimeLimited { minutes: u32 },
    /// Nothing recognisable; regulated minutes are treated as unavailable.
    Unclassified,
}

/// A record's regulation text parsed into structured form.
///
/// Rules are derived from the record on every evaluation and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub days: ActiveDays,
    pub hours: ParsedHours,
    pub kind: RegulationKind,
}

impl Rule {
    pub fn parse(record: &RegulationRecord, classifier: &Classifier) -> Self {
        Self {
            days: days::parse_days(record.days.as_deref()),
            hours: hours::parse_time_range(record.hours.as_deref()),
            kind: classifier.classify(record),
        }
    }
}
