use crate::picker::{CellState, DateRangePicker, PickerMode};
use std::fmt;

const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

pub struct PickerView<'a>(pub &'a DateRangePicker);

impl fmt::Display for PickerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.mode() {
            PickerMode::Day => self.fmt_days(f),
            PickerMode::YearMonth => self.fmt_year_month(f),
        }
    }
}

impl PickerView<'_> {
    fn fmt_days(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let picker = self.0;
        writeln!(f, "  <   {} ▾   >", picker.shown())?;

        for w in WEEKDAYS {
            write!(f, " {w} ")?;
        }
        writeln!(f)?;

        for (i, cell) in picker.grid().iter().enumerate() {
            match cell {
                None => write!(f, "    ")?,
                Some(c) => match c.state {
                    CellState::Selected => write!(f, "[{:>2}]", c.day)?,
                    CellState::InRange => write!(f, "·{:>2}·", c.day)?,
                    CellState::Plain => write!(f, " {:>2} ", c.day)?,
                },
            }
            if i % 7 == 6 {
                writeln!(f)?;
            }
        }
        if picker.grid().len() % 7 != 0 {
            writeln!(f)?;
        }

        writeln!(f, "시작일과 종료일을 선택하세요        초기화")
    }

    fn fmt_year_month(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.shown();
        writeln!(f, "  <   {}년   >", shown.year())?;
        for month in 1..=12u32 {
            let label = format!("{month}월");
            if month == shown.month() {
                write!(f, "[{label:^5}]")?;
            } else {
                write!(f, " {label:^5} ")?;
            }
            if month % 3 == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn picker() -> DateRangePicker {
        DateRangePicker::new("", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
    }

    #[test]
    fn day_mode_shows_header_and_selection() {
        let mut p = picker();
        p.click_day(3).unwrap();
        p.click_day(5).unwrap();
        let out = PickerView(&p).to_string();
        assert!(out.contains("2025년 1월"));
        assert!(out.contains("[ 3]"));
        assert!(out.contains("· 4·"));
        assert!(out.contains("[ 5]"));
        assert!(out.contains(" 31 "));
    }

    #[test]
    fn year_month_mode_highlights_current_month() {
        let mut p = picker();
        p.open_year_month();
        let out = PickerView(&p).to_string();
        assert!(out.contains("2025년"));
        assert!(out.contains("[ 1월  ]"));
        assert_eq!(out.lines().count(), 5);
    }
}
