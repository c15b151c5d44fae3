use nom::{
    IResult,
    Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, value},
    sequence::separated_pair,
};

use crate::rule::{ActiveDays, WeekdaySet};

// Two-letter forms come before their one-letter prefixes.
fn weekday(input: &str) -> IResult<&str, u8> {
    alt((
        value(0, tag("SU")),
        value(1, tag("MO")),
        value(1, tag("M")),
        value(2, tag("TU")),
        value(3, tag("WE")),
        value(3, tag("W")),
        value(4, tag("TH")),
        value(5, tag("FR")),
        value(5, tag("F")),
        value(6, tag("SA")),
    ))
    .parse(input)
}

/// A whole token: a single day, or an inclusive `START-END` range.
fn day_token(input: &str) -> IResult<&str, (u8, u8)> {
    all_consuming(alt((
        separated_pair(weekday, char('-'), weekday),
        map(weekday, |d| (d, d)),
    )))
    .parse(input)
}

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

/// Parse a `days` attribute such as `"M-F"` or `"SA,SU"`.
///
/// Unknown tokens are skipped. When nothing usable remains the result is
/// [`ActiveDays::Unrestricted`], never an empty set.
///
/// Ranges do not wrap the week: `FR-MO` adds no days.
pub fn parse_days<'a>(raw: impl Into<Option<&'a str>>) -> ActiveDays {
    let Some(raw) = raw.into() else {
        return ActiveDays::Unrestricted;
    };

    let upper = raw.to_ascii_uppercase();
    let mut bits = 0u8;

    for token in upper.split(is_separator).filter(|t| !t.is_empty()) {
        match day_token(token) {
            Ok((_, (start, end))) => {
                for day in start..=end {
                    bits |= 1 << day;
                }
            }
            Err(_) => log::debug!("skipping unrecognized day token '{token}'"),
        }
    }

    WeekdaySet::from_bits(bits).map_or(ActiveDays::Unrestricted, ActiveDays::Only)
}
