use std::{borrow::Cow, sync::LazyLock};

use regex::{Regex, RegexBuilder};

use crate::{record::RegulationRecord, rule::RegulationKind};

/// Matched case-insensitively against the `regulation` text.
pub const DEFAULT_NO_PARKING_PATTERN: &str = r"\bno[\s-]*(?:parking|stopping)\b|\btow[\s-]*away\b";

static DEFAULT_NO_PARKING: LazyLock<Regex> = LazyLock::new(|| {
    compile_no_parking(DEFAULT_NO_PARKING_PATTERN).expect("default no-parking pattern compiles")
});

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern compiles"));

pub(crate) fn compile_no_parking(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// First run of digits in `text`, if it fits a `u32`.
pub fn first_integer(text: &str) -> Option<u32> {
    FIRST_INTEGER.find(text)?.as_str().parse().ok()
}

/// Decides what a regulation means for parking once it is in force.
#[derive(Debug, Clone)]
pub struct Classifier {
    no_parking: Regex,
    hours_fallback: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            no_parking: DEFAULT_NO_PARKING.clone(),
            hours_fallback: true,
        }
    }
}

impl Classifier {
    pub(crate) fn new(no_parking: Regex, hours_fallback: bool) -> Self {
        Self {
            no_parking,
            hours_fallback,
        }
    }

    pub fn is_no_parking(&self, text: &str) -> bool {
        self.no_parking.is_match(text)
    }

    pub fn classify(&self, record: &RegulationRecord) -> RegulationKind {
        if record
            .regulation
            .as_deref()
            .is_some_and(|text| self.is_no_parking(text))
        {
            return RegulationKind::NoParking;
        }

        match self.limit_minutes(record) {
            Some(minutes) => RegulationKind::TimeLimited { minutes },
            None => RegulationKind::Unclassified,
        }
    }

    /// Hour limit in minutes, read from `hrlimit` or, when that is absent or
    /// blank, from the `hours` text.
    pub fn limit_minutes(&self, record: &RegulationRecord) -> Option<u32> {
        let text: Cow<'_, str> = match record.hrlimit.as_ref().map(|l| l.as_text()) {
            Some(text) if !text.trim().is_empty() => text,
            _ if self.hours_fallback => Cow::Borrowed(record.hours.as_deref()?),
            _ => return None,
        };

        first_integer(&text).map(|hours| hours.saturating_mul(60))
    }
}
