use anyhow::ensure;
use chrono::NaiveDate;
use std::fmt;

pub const RANGE_SEPARATOR: &str = " ~ ";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn starting_at(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Self> {
        ensure!(end >= start, "range end {end} is before start {start}");
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn format(&self) -> Option<String> {
        let (start, end) = (self.start?, self.end?);
        Some(format!(
            "{}{RANGE_SEPARATOR}{}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        ))
    }

    pub fn parse(value: &str) -> Option<Self> {
        let (start, end) = value.split_once(RANGE_SEPARATOR)?;
        let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT).ok()?;
        Self::new(start, end).ok()
    }

    pub fn contains_strictly(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date > start && date < end,
            _ => false,
        }
    }

    pub fn is_bound(&self, date: NaiveDate) -> bool {
        self.start == Some(date) || self.end == Some(date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Some(s) => f.write_str(&s),
            None => match self.start {
                Some(start) => write!(f, "{}{RANGE_SEPARATOR}", start.format(DATE_FORMAT)),
                None => Ok(()),
            },
        }
    }
}

/// Splits a custom period into buy/sell parts the way the backend expects.
///
/// Each side is trimmed and a missing side is empty, so free text such as
/// `"2024년 여름"` lands entirely in the buy date.
pub fn split_period(value: &str) -> (String, String) {
    let mut parts = value.split(RANGE_SEPARATOR).map(str::trim);
    let buy = parts.next().unwrap_or_default().to_string();
    let sell = parts.next().unwrap_or_default().to_string();
    (buy, sell)
}
