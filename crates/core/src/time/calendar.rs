use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> anyhow::Result<Self> {
        anyhow::ensure!((1..=12).contains(&month), "month out of range: {month}");
        NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("year out of range: {year}"))?;
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructors validate the year/month pair.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Weekday of the 1st, Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn prev_month(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next_month(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }

    pub fn next_year(&self) -> Self {
        Self {
            year: self.year + 1,
            month: self.month,
        }
    }

    pub fn with_month(&self, month: u32) -> anyhow::Result<Self> {
        Self::new(self.year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}년 {}월", self.year, self.month)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn first_weekday_counts_from_sunday() {
        // 2025-01-01 is a Wednesday.
        assert_eq!(YearMonth::new(2025, 1).unwrap().first_weekday(), 3);
        // 2026-02-01 is a Sunday.
        assert_eq!(YearMonth::new(2026, 2).unwrap().first_weekday(), 0);
    }

    #[test]
    fn month_stepping_wraps_years() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.prev_month(), YearMonth::new(2024, 12).unwrap());
        assert_eq!(jan.prev_month().next_month(), jan);
        assert_eq!(jan.next_year().year(), 2026);
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
        assert!(YearMonth::new(2025, 1).unwrap().date(32).is_none());
    }
}
