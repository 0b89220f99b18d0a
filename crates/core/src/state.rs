use crate::domain::form::{InvestmentFormData, StockDetail, StockDetailUpdate, CUSTOM_PERIOD};
use anyhow::Context;
use std::collections::BTreeSet;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Back {
    Moved,
    // Already on step 1.
    LeftForm,
}

#[derive(Debug, Clone)]
pub struct FormState {
    step: u8,
    pub form: InvestmentFormData,
    pub stock_input: String,
    show_custom_period: BTreeSet<usize>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            form: InvestmentFormData::default(),
            stock_input: String::new(),
            show_custom_period: BTreeSet::new(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_custom_input_shown(&self, index: usize) -> bool {
        self.show_custom_period.contains(&index)
    }

    pub fn next_step(&mut self) {
        if self.step < LAST_STEP {
            self.step += 1;
        }
    }

    pub fn prev_step(&mut self) -> Back {
        if self.step > FIRST_STEP {
            self.step -= 1;
            Back::Moved
        } else {
            Back::LeftForm
        }
    }

    // False for empty or duplicate names.
    pub fn add_stock(&mut self) -> bool {
        let name = self.stock_input.trim().to_string();
        if name.is_empty() || self.form.stocks.iter().any(|s| s.name == name) {
            return false;
        }
        self.form.stocks.push(StockDetail::new(name));
        self.stock_input.clear();
        true
    }

    pub fn remove_stock(&mut self, name: &str) -> bool {
        let Some(index) = self.form.stocks.iter().position(|s| s.name == name) else {
            return false;
        };
        self.form.stocks.remove(index);

        // Toggles are keyed by position, so shift the ones after the removed ticker.
        self.show_custom_period = self
            .show_custom_period
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        true
    }

    pub fn update_stock_detail(
        &mut self,
        index: usize,
        update: StockDetailUpdate,
    ) -> anyhow::Result<()> {
        self.stock_mut(index)?.apply(update);
        Ok(())
    }

    pub fn toggle_stock_pattern(&mut self, index: usize, pattern: &str) -> anyhow::Result<()> {
        let stock = self.stock_mut(index)?;
        toggle(&mut stock.patterns, pattern);
        Ok(())
    }

    pub fn toggle_decision_basis(&mut self, option: &str) {
        toggle(&mut self.form.decision_basis, option);
    }

    pub fn toggle_custom_input(&mut self, index: usize) -> anyhow::Result<()> {
        let shown = !self.show_custom_period.contains(&index);
        let stock = self.stock_mut(index)?;
        if shown {
            stock.period = CUSTOM_PERIOD.to_string();
            self.show_custom_period.insert(index);
        } else {
            if stock.uses_custom_period() {
                stock.period.clear();
            }
            self.show_custom_period.remove(&index);
        }
        Ok(())
    }

    pub fn is_next_disabled(&self) -> bool {
        match self.step {
            1 => self.form.stocks.is_empty(),
            2 => self.form.stocks.iter().any(|s| {
                s.period.is_empty() || (s.uses_custom_period() && s.custom_period.trim().is_empty())
            }),
            _ => self.form.decision_basis.is_empty(),
        }
    }

    fn stock_mut(&mut self, index: usize) -> anyhow::Result<&mut StockDetail> {
        let len = self.form.stocks.len();
        self.form
            .stocks
            .get_mut(index)
            .with_context(|| format!("no stock at index {index} (have {len})"))
    }
}

fn toggle(tags: &mut Vec<String>, tag: &str) {
    if let Some(pos) = tags.iter().position(|t| t == tag) {
        tags.remove(pos);
    } else {
        tags.push(tag.to_string());
    }
}
