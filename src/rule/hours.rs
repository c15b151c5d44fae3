use nom::{
    IResult,
    Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map_res, opt, value},
    sequence::{preceded, separated_pair},
};

use crate::rule::{MINUTES_PER_DAY, ParsedHours, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// One side of a `H[:MM][am|pm]` range, as written.
#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    meridiem: Option<Meridiem>,
}

impl Clock {
    fn minute_of_day(self) -> Option<u32> {
        if self.minute >= 60 {
            return None;
        }
        let hour = match self.meridiem {
            Some(_) if !(1..=12).contains(&self.hour) => return None,
            Some(Meridiem::Pm) if self.hour != 12 => self.hour + 12,
            Some(Meridiem::Am) if self.hour == 12 => 0,
            _ => self.hour,
        };
        let total = hour * 60 + self.minute;
        (total <= MINUTES_PER_DAY).then_some(total)
    }
}

fn digits(min: usize, max: usize, input: &str) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u32>(),
    )
    .parse(input)
}

/// `HHMM-HHMM`, each side 3 or 4 digits with no meridiem.
fn military_range(input: &str) -> IResult<&str, (u32, u32)> {
    all_consuming(separated_pair(
        |i| digits(3, 4, i),
        char('-'),
        |i| digits(3, 4, i),
    ))
    .parse(input)
}

fn meridiem(input: &str) -> IResult<&str, Meridiem> {
    alt((value(Meridiem::Am, tag("am")), value(Meridiem::Pm, tag("pm")))).parse(input)
}

fn clock(input: &str) -> IResult<&str, Clock> {
    let (input, hour) = digits(1, 2, input)?;
    let (input, minute) = opt(preceded(char(':'), |i| digits(2, 2, i))).parse(input)?;
    let (input, meridiem) = opt(meridiem).parse(input)?;
    Ok((
        input,
        Clock {
            hour,
            minute: minute.unwrap_or(0),
            meridiem,
        },
    ))
}

/// `H[:MM][am|pm]-H[:MM][am|pm]`.
fn clock_range(input: &str) -> IResult<&str, (Clock, Clock)> {
    all_consuming(separated_pair(clock, char('-'), clock)).parse(input)
}

fn military_minutes(hhmm: u32) -> Option<u32> {
    let (hour, minute) = (hhmm / 100, hhmm % 100);
    let total = hour * 60 + minute;
    (minute < 60 && total <= MINUTES_PER_DAY).then_some(total)
}

fn military_window((start, end): (u32, u32)) -> Option<TimeWindow> {
    Some(window(military_minutes(start)?, military_minutes(end)?))
}

fn clock_window((mut start, end): (Clock, Clock)) -> Option<TimeWindow> {
    // "10-6am": the bare start is taken to be in the afternoon when the
    // written end time is earlier than the written start.
    if start.meridiem.is_none()
        && end.meridiem.is_some()
        && (end.hour, end.minute) < (start.hour, start.minute)
        // A bare 12 is already noon; shifting it would give midnight.
        && start.hour < 12
    {
        start.hour += 12;
    }
    Some(window(start.minute_of_day()?, end.minute_of_day()?))
}

// A start of 24:00 is the next midnight.
fn window(start: u32, end: u32) -> TimeWindow {
    TimeWindow::new(start % MINUTES_PER_DAY, end)
}

/// Parse an `hours` attribute into a time window.
///
/// Absent or blank text, and text mentioning "anytime" or "24 hr", is the
/// all-day window. Text in neither supported format is
/// [`ParsedHours::Unparseable`].
pub fn parse_time_range<'a>(raw: impl Into<Option<&'a str>>) -> ParsedHours {
    let Some(raw) = raw.into() else {
        return ParsedHours::Matched(TimeWindow::ALL_DAY);
    };

    let lower = raw.to_ascii_lowercase();
    if lower.trim().is_empty() || lower.contains("anytime") || lower.contains("24 hr") {
        return ParsedHours::Matched(TimeWindow::ALL_DAY);
    }

    let compact: String = lower.chars().filter(|c| !c.is_whitespace()).collect();

    let parsed = match military_range(&compact) {
        Ok((_, range)) => military_window(range),
        Err(_) => match clock_range(&compact) {
            Ok((_, range)) => clock_window(range),
            Err(_) => None,
        },
    };

    match parsed {
        Some(window) => ParsedHours::Matched(window),
        None => {
            log::debug!("unparseable hours '{raw}'");
            ParsedHours::Unparseable
        }
    }
}
