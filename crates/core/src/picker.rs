//! Calendar range picker: two clicks select a start/end pair.

use crate::domain::date_range::DateRange;
use crate::time::calendar::YearMonth;
use anyhow::Context;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Day,
    YearMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Plain,
    Selected,
    InRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub state: CellState,
}

#[derive(Debug, Clone)]
pub struct DateRangePicker {
    shown: YearMonth,
    range: DateRange,
    mode: PickerMode,
}

impl DateRangePicker {
    /// Opens on `today`'s month, or on the start month of `value` when it
    /// already holds a complete range.
    pub fn new(value: &str, today: NaiveDate) -> Self {
        let seeded = DateRange::parse(value);
        let shown = seeded
            .and_then(|r| r.start())
            .map(YearMonth::of)
            .unwrap_or_else(|| YearMonth::of(today));

        Self {
            shown,
            range: seeded.unwrap_or_default(),
            mode: PickerMode::Day,
        }
    }

    pub fn shown(&self) -> YearMonth {
        self.shown
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    // Some(range) only on the click that completes it.
    pub fn click_day(&mut self, day: u32) -> anyhow::Result<Option<String>> {
        let selected = self
            .shown
            .date(day)
            .with_context(|| format!("{} has no day {day}", self.shown))?;

        match self.range.start() {
            None => self.range = DateRange::starting_at(selected),
            Some(_) if self.range.is_complete() => self.range = DateRange::starting_at(selected),
            Some(start) if selected < start => self.range = DateRange::starting_at(selected),
            Some(start) => {
                self.range = DateRange::new(start, selected)?;
                let formatted = self.range.format();
                tracing::debug!(range = ?formatted, "date range committed");
                return Ok(formatted);
            }
        }
        Ok(None)
    }

    pub fn reset(&mut self) -> String {
        self.range = DateRange::empty();
        String::new()
    }

    pub fn prev_month(&mut self) {
        self.shown = self.shown.prev_month();
    }

    pub fn next_month(&mut self) {
        self.shown = self.shown.next_month();
    }

    pub fn open_year_month(&mut self) {
        self.mode = PickerMode::YearMonth;
    }

    pub fn close_year_month(&mut self) {
        self.mode = PickerMode::Day;
    }

    pub fn prev_year(&mut self) {
        self.shown = self.shown.prev_year();
    }

    pub fn next_year(&mut self) {
        self.shown = self.shown.next_year();
    }

    pub fn pick_month(&mut self, month: u32) -> anyhow::Result<()> {
        self.shown = self.shown.with_month(month)?;
        self.mode = PickerMode::Day;
        Ok(())
    }

    pub fn grid(&self) -> Vec<Option<DayCell>> {
        let blanks = self.shown.first_weekday() as usize;
        let days = self.shown.days();
        let mut out = Vec::with_capacity(blanks + days as usize);
        out.extend(std::iter::repeat(None).take(blanks));

        for day in 1..=days {
            let Some(date) = self.shown.date(day) else {
                continue;
            };
            let state = if self.range.is_bound(date) {
                CellState::Selected
            } else if self.range.contains_strictly(date) {
                CellState::InRange
            } else {
                CellState::Plain
            };
            out.push(Some(DayCell { day, state }));
        }
        out
    }
}
