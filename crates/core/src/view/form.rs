use crate::domain::form::{PositionStatus, DECISION_OPTIONS, TRADE_PATTERNS, TRADE_PERIODS};
use crate::picker::DateRangePicker;
use crate::state::{FormState, LAST_STEP};
use crate::view::picker::PickerView;
use crate::view::{chip, RULE};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Advance,
    Analyze,
}

/// Three-step form. Holds no state of its own: the caller owns the form
/// state and one picker per ticker whose custom editor is open.
pub struct FormView<'a> {
    pub state: &'a FormState,
    pub pickers: &'a BTreeMap<usize, DateRangePicker>,
}

impl<'a> FormView<'a> {
    pub fn new(state: &'a FormState, pickers: &'a BTreeMap<usize, DateRangePicker>) -> Self {
        Self { state, pickers }
    }

    pub fn next_action(&self) -> NextAction {
        if self.state.step() == LAST_STEP {
            NextAction::Analyze
        } else {
            NextAction::Advance
        }
    }

    pub fn next_label(&self) -> &'static str {
        match self.next_action() {
            NextAction::Analyze => "복기 노트 생성하기",
            NextAction::Advance => "다음으로 넘어가기",
        }
    }

    fn fmt_progress(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.state.step() as usize;
        let total = LAST_STEP as usize;
        let filled = step * 12 / total;
        writeln!(
            f,
            "< {}{} {step}/{total}",
            "█".repeat(filled),
            "░".repeat(12 - filled)
        )
    }

    fn fmt_step_one(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "이번에 복기할 종목은 무엇인가요?")?;
        writeln!(f, "투자 판단을 되돌아보고 싶은 모든 대상을 추가해주세요.")?;
        writeln!(f)?;
        let input = if self.state.stock_input.is_empty() {
            "종목명 입력 (예: 삼성전자)"
        } else {
            self.state.stock_input.as_str()
        };
        writeln!(f, "> {input}  [+]")?;
        writeln!(f, "{}", "·".repeat(32))?;
        for stock in &self.state.form.stocks {
            writeln!(f, "  {}  [-]", stock.name)?;
        }
        Ok(())
    }

    fn fmt_step_two(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "종목별 거래 상황을 알려주세요.")?;
        writeln!(
            f,
            "기간을 입력하면 시장 상황과 연동하여 더 좋은 결과를 낼 수 있습니다."
        )?;

        for (idx, stock) in self.state.form.stocks.iter().enumerate() {
            writeln!(f, "{RULE}")?;
            let statuses = [PositionStatus::Holding, PositionStatus::Sold]
                .iter()
                .map(|s| chip(s.label(), stock.status == *s))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "#{} {}   {statuses}", idx + 1, stock.name)?;

            let shown = self.state.is_custom_input_shown(idx);
            writeln!(f, "언제 거래했나요?   {}", chip("직접 입력", shown))?;
            let periods = TRADE_PERIODS
                .iter()
                .map(|p| chip(p, stock.period == *p))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "  {periods}")?;

            if shown {
                let text = if stock.custom_period.is_empty() {
                    "분석 기간 (예: 2024년 여름 등)"
                } else {
                    stock.custom_period.as_str()
                };
                writeln!(f, "  기간: {text}")?;
                if let Some(picker) = self.pickers.get(&idx) {
                    write!(f, "{}", PickerView(picker))?;
                }
            }

            writeln!(f, "매매 패턴 (중복 가능)")?;
            let patterns = TRADE_PATTERNS
                .iter()
                .map(|p| chip(p, stock.patterns.iter().any(|s| s == p)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "  {patterns}")?;
        }
        writeln!(f, "{RULE}")
    }

    fn fmt_step_three(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "투자 결정의 핵심 근거는 무엇이었나요?")?;
        for (i, option) in DECISION_OPTIONS.iter().enumerate() {
            let on = self.state.form.decision_basis.iter().any(|s| s == option);
            writeln!(f, "{:>2}. {}", i + 1, chip(option, on))?;
        }
        Ok(())
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_progress(f)?;
        writeln!(f)?;
        match self.state.step() {
            1 => self.fmt_step_one(f)?,
            2 => self.fmt_step_two(f)?,
            _ => self.fmt_step_three(f)?,
        }
        writeln!(f)?;
        let disabled = if self.state.is_next_disabled() {
            " (비활성)"
        } else {
            ""
        };
        writeln!(f, "[ {} → ]{disabled}", self.next_label())
    }
}
