pub mod coverage;
pub mod interval;
pub mod point;

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{
    config::EvaluatorBuilder,
    error::{Error, Result},
    record::RegulationRecord,
    rule::{MINUTES_PER_DAY, Rule, TimeWindow, classify::Classifier},
};

/// Weekday index, 0 = Sunday.
pub(crate) fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub(crate) fn minute_of_day(at: NaiveDateTime) -> u32 {
    at.hour() * 60 + at.minute()
}

const NANOS_PER_MINUTE: u64 = 60_000_000_000;
const NANOS_PER_DAY: u64 = MINUTES_PER_DAY as u64 * NANOS_PER_MINUTE;

/// Minutes of `[start, end)` that fall inside `window`, counting both pieces
/// of an overnight window.
pub fn overlap_minutes(window: TimeWindow, start: u32, end: u32) -> u32 {
    let nanos = overlap_nanos(
        window,
        u64::from(start) * NANOS_PER_MINUTE,
        u64::from(end) * NANOS_PER_MINUTE,
    );
    (nanos / NANOS_PER_MINUTE) as u32
}

/// Nanoseconds of `[start, end)` inside `window`; bounds are nanoseconds
/// since midnight.
pub(crate) fn overlap_nanos(window: TimeWindow, start: u64, end: u64) -> u64 {
    window
        .segments()
        .map(|seg| {
            let lo = (u64::from(seg.start) * NANOS_PER_MINUTE).max(start);
            let hi = (u64::from(seg.end) * NANOS_PER_MINUTE).min(end);
            hi.saturating_sub(lo)
        })
        .sum()
}

fn nanos_of_day(at: NaiveDateTime) -> u64 {
    let nanos = u64::from(at.num_seconds_from_midnight()) * 1_000_000_000
        + u64::from(at.nanosecond());
    // A leap second reports more than 1e9 nanoseconds.
    nanos.min(NANOS_PER_DAY - 1)
}

/// A query interval reduced to nanoseconds of its starting day.
///
/// An end on a later day is clamped to midnight for overlap purposes;
/// `duration` keeps the real length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuerySpan {
    pub day: u8,
    pub start: u64,
    pub end: u64,
    pub duration: u64,
}

impl QuerySpan {
    /// `None` when `end <= start`.
    pub(crate) fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        if end <= start {
            return None;
        }
        let duration = u64::try_from((end - start).num_nanoseconds()?).ok()?;

        let first = nanos_of_day(start);
        Some(Self {
            day: day_index(start.date()),
            start: first,
            end: first.saturating_add(duration).min(NANOS_PER_DAY),
            duration,
        })
    }

    /// Nanoseconds of the span inside `window`.
    pub(crate) fn overlap(&self, window: TimeWindow) -> u64 {
        overlap_nanos(window, self.start, self.end)
    }
}

/// A time limit of `minutes`, in nanoseconds.
pub(crate) fn limit_nanos(minutes: u32) -> u64 {
    u64::from(minutes) * NANOS_PER_MINUTE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    Point,
    Interval,
}

impl FromStr for EvaluationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(EvaluationMode::Point),
            "interval" => Ok(EvaluationMode::Interval),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// The moment or span the display layer wants evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Point(NaiveDateTime),
    /// Assumed to lie within one calendar day.
    Interval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Query {
    pub fn point(at: NaiveDateTime) -> Self {
        Query::Point(at)
    }

    pub fn interval(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Query::Interval { start, end }
    }

    /// Build a query from UI selections. Point mode ignores `end`.
    pub fn from_mode(
        mode: EvaluationMode,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Result<Self> {
        match mode {
            EvaluationMode::Point => Ok(Query::Point(start)),
            EvaluationMode::Interval => Ok(Query::Interval {
                start,
                end: end.ok_or(Error::MissingEnd)?,
            }),
        }
    }

    pub fn mode(&self) -> EvaluationMode {
        match self {
            Query::Point(_) => EvaluationMode::Point,
            Query::Interval { .. } => EvaluationMode::Interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationResult {
    Point { active: bool },
    Interval { active: bool, coverage: f64 },
}

impl EvaluationResult {
    pub fn active(&self) -> bool {
        match *self {
            EvaluationResult::Point { active } | EvaluationResult::Interval { active, .. } => active,
        }
    }

    /// Fraction of the interval during which parking is allowed.
    pub fn coverage(&self) -> Option<f64> {
        match *self {
            EvaluationResult::Point { .. } => None,
            EvaluationResult::Interval { coverage, .. } => Some(coverage),
        }
    }
}

/// Parses records and evaluates them against queries.
///
/// Holds only immutable configuration, so one evaluator can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    classifier: Classifier,
}

impl Evaluator {
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub(crate) fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn rule(&self, record: &RegulationRecord) -> Rule {
        Rule::parse(record, &self.classifier)
    }

    pub fn is_active_at(&self, record: &RegulationRecord, at: NaiveDateTime) -> bool {
        self.rule(record).is_active_at(at)
    }

    pub fn intersects_range(
        &self,
        record: &RegulationRecord,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        self.rule(record).intersects_range(start, end)
    }

    pub fn calculate_coverage(
        &self,
        record: &RegulationRecord,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> f64 {
        self.rule(record).coverage(start, end)
    }

    pub fn evaluate(&self, record: &RegulationRecord, query: &Query) -> EvaluationResult {
        let rule = self.rule(record);
        match *query {
            Query::Point(at) => EvaluationResult::Point {
                active: rule.is_active_at(at),
            },
            Query::Interval { start, end } => EvaluationResult::Interval {
                active: rule.intersects_range(start, end),
                coverage: rule.coverage(start, end),
            },
        }
    }

    /// Evaluate every record, keeping input order.
    pub fn evaluate_all<'a, I>(&self, records: I, query: &Query) -> Vec<EvaluationResult>
    where
        I: IntoIterator<Item = &'a RegulationRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let result = self.evaluate(record, query);
                log::trace!("record {i}: {result:?}");
                result
            })
            .collect()
    }
}
