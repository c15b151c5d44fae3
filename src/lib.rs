//! Curb parking regulation engine.
//!
//! Reads the free-text `days` and `hours` attributes of a regulation record
//! into structured rules, then answers whether the regulation is in force at
//! a moment, whether it touches an interval, and what fraction of an
//! interval is still legal to park in.
//!
//! ```
//! use chrono::NaiveDate;
//! use curbside::{RegulationRecord, calculate_coverage};
//!
//! let record = RegulationRecord::new()
//!     .with_days("M-F")
//!     .with_hours("0900-1800")
//!     .with_regulation("No parking 9am-6pm");
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let start = monday.and_hms_opt(8, 0, 0).unwrap();
//! let end = monday.and_hms_opt(10, 0, 0).unwrap();
//!
//! assert_eq!(calculate_coverage(&record, start, end), 0.5);
//! ```

pub mod config;
pub mod error;
pub mod evaluate;
pub mod record;
pub mod rule;

use std::sync::LazyLock;

use chrono::NaiveDateTime;

pub use crate::{
    config::EvaluatorBuilder,
    error::{Error, Result},
    evaluate::{EvaluationMode, EvaluationResult, Evaluator, Query, overlap_minutes},
    record::{HourLimit, RegulationRecord, records_from_geojson},
    rule::{
        ActiveDays,
        ParsedHours,
        RegulationKind,
        Rule,
        TimeWindow,
        WeekdaySet,
        days::parse_days,
        hours::parse_time_range,
    },
};

static DEFAULT_EVALUATOR: LazyLock<Evaluator> = LazyLock::new(Evaluator::default);

/// Whether the record's regulation is in force at `at`.
pub fn is_active_at(record: &RegulationRecord, at: NaiveDateTime) -> bool {
    DEFAULT_EVALUATOR.is_active_at(record, at)
}

/// Whether the record's regulation touches `[start, end)`. Both instants
/// are expected on the same calendar day.
pub fn intersects_range(record: &RegulationRecord, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    DEFAULT_EVALUATOR.intersects_range(record, start, end)
}

/// Fraction of `[start, end)` during which parking is allowed under the
/// record's regulation.
pub fn calculate_coverage(record: &RegulationRecord, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    DEFAULT_EVALUATOR.calculate_coverage(record, start, end)
}

/// Evaluate a batch of records with the default configuration.
pub fn evaluate_all(records: &[RegulationRecord], query: &Query) -> Vec<EvaluationResult> {
    DEFAULT_EVALUATOR.evaluate_all(records, query)
}
