use anyhow::{bail, Context};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use wildcard_core::domain::form::{
    PositionStatus, StockDetailUpdate, DECISION_OPTIONS, TRADE_PATTERNS, TRADE_PERIODS,
};
use wildcard_core::picker::DateRangePicker;
use wildcard_core::state::{FormState, FIRST_STEP};
use wildcard_core::view::form::FormView;

pub const HELP: &str = "\
명령어 (번호는 1부터)
  <종목명>                 종목 추가 (1단계)
  /rm <종목명>             종목 삭제
  /status <n> holding|sold 보유 상태
  /period <n> <k>          거래 기간 선택 (1-5)
  /custom <n>              직접 입력 열기/닫기
  /text <n> <기간>          직접 입력 기간 텍스트
  /cal <n> <일>            달력에서 날짜 클릭
  /cal <n> prev|next       이전/다음 달
  /cal <n> years|days      연·월 선택 열기/닫기
  /cal <n> prev-year|next-year
  /cal <n> month <m>       월 선택
  /cal <n> reset           선택 초기화
  /pattern <n> <k>         매매 패턴 토글 (1-6)
  /basis <k>               결정 근거 토글 (1-8)
  /next  /back  /quit  /help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Day(u32),
    PrevMonth,
    NextMonth,
    OpenYearMonth,
    CloseYearMonth,
    PrevYear,
    NextYear,
    Month(u32),
    Reset,
}

/// Stock and option numbers are already zero-based here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Next,
    Back,
    Quit,
    Help,
    Add(String),
    Remove(String),
    Status { stock: usize, status: PositionStatus },
    Period { stock: usize, option: usize },
    Custom(usize),
    Text { stock: usize, text: String },
    Pattern { stock: usize, option: usize },
    Basis(usize),
    Picker { stock: usize, action: PickerAction },
}

impl FormCommand {
    pub fn parse(line: &str, step: u8) -> anyhow::Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            if step != FIRST_STEP {
                bail!("unknown input {line:?} (try /help)");
            }
            return Ok(Self::Add(line.to_string()));
        };

        let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
        let args = args.trim();
        let cmd = match name {
            "next" => Self::Next,
            "back" => Self::Back,
            "quit" | "q" => Self::Quit,
            "help" | "h" => Self::Help,
            "rm" => {
                if args.is_empty() {
                    bail!("/rm needs a ticker name");
                }
                Self::Remove(args.to_string())
            }
            "status" => {
                let (stock, rest) = stock_arg(args)?;
                let status = match rest {
                    "holding" | "보유" => PositionStatus::Holding,
                    "sold" | "매도" => PositionStatus::Sold,
                    other => bail!("unknown status {other:?} (holding|sold)"),
                };
                Self::Status { stock, status }
            }
            "period" => {
                let (stock, rest) = stock_arg(args)?;
                Self::Period {
                    stock,
                    option: ordinal(rest)?,
                }
            }
            "custom" => Self::Custom(ordinal(args)?),
            "text" => {
                let (stock, rest) = stock_arg(args)?;
                Self::Text {
                    stock,
                    text: rest.to_string(),
                }
            }
            "pattern" => {
                let (stock, rest) = stock_arg(args)?;
                Self::Pattern {
                    stock,
                    option: ordinal(rest)?,
                }
            }
            "basis" => Self::Basis(ordinal(args)?),
            "cal" => {
                let (stock, rest) = stock_arg(args)?;
                Self::Picker {
                    stock,
                    action: picker_action(rest)?,
                }
            }
            other => bail!("unknown command /{other} (try /help)"),
        };
        Ok(cmd)
    }
}

fn picker_action(args: &str) -> anyhow::Result<PickerAction> {
    let action = match args.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["prev"] => PickerAction::PrevMonth,
        ["next"] => PickerAction::NextMonth,
        ["years"] => PickerAction::OpenYearMonth,
        ["days"] => PickerAction::CloseYearMonth,
        ["prev-year"] => PickerAction::PrevYear,
        ["next-year"] => PickerAction::NextYear,
        ["reset"] => PickerAction::Reset,
        ["month", m] => PickerAction::Month(m.parse().with_context(|| format!("bad month {m:?}"))?),
        [d] => PickerAction::Day(d.parse().with_context(|| format!("bad calendar action {d:?}"))?),
        _ => bail!("bad calendar action {args:?}"),
    };
    Ok(action)
}

fn stock_arg(args: &str) -> anyhow::Result<(usize, &str)> {
    let (n, rest) = args.split_once(' ').unwrap_or((args, ""));
    Ok((ordinal(n)?, rest.trim()))
}

fn ordinal(s: &str) -> anyhow::Result<usize> {
    let n: usize = s
        .trim()
        .parse()
        .with_context(|| format!("expected a number, got {s:?}"))?;
    if n == 0 {
        bail!("numbers start at 1");
    }
    Ok(n - 1)
}

#[derive(Debug, Clone)]
pub struct FormSession {
    pub state: FormState,
    pub pickers: BTreeMap<usize, DateRangePicker>,
    today: NaiveDate,
}

impl FormSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: FormState::new(),
            pickers: BTreeMap::new(),
            today,
        }
    }

    pub fn view(&self) -> FormView<'_> {
        FormView::new(&self.state, &self.pickers)
    }

    // Navigation commands are left to the caller.
    pub fn apply(&mut self, cmd: FormCommand) -> anyhow::Result<()> {
        match cmd {
            FormCommand::Next | FormCommand::Back | FormCommand::Quit | FormCommand::Help => {}
            FormCommand::Add(name) => {
                self.state.stock_input = name;
                if !self.state.add_stock() {
                    bail!("ticker is empty or already added");
                }
            }
            FormCommand::Remove(name) => {
                let index = self.state.form.stocks.iter().position(|s| s.name == name);
                if !self.state.remove_stock(&name) {
                    bail!("no ticker named {name:?}");
                }
                if let Some(index) = index {
                    self.pickers = std::mem::take(&mut self.pickers)
                        .into_iter()
                        .filter(|(i, _)| *i != index)
                        .map(|(i, p)| if i > index { (i - 1, p) } else { (i, p) })
                        .collect();
                }
            }
            FormCommand::Status { stock, status } => {
                self.state
                    .update_stock_detail(stock, StockDetailUpdate::status(status))?;
            }
            FormCommand::Period { stock, option } => {
                let period = TRADE_PERIODS
                    .get(option)
                    .with_context(|| format!("no trade period #{}", option + 1))?;
                if self.state.is_custom_input_shown(stock) {
                    self.state.toggle_custom_input(stock)?;
                    self.pickers.remove(&stock);
                }
                self.state
                    .update_stock_detail(stock, StockDetailUpdate::period(*period))?;
            }
            FormCommand::Custom(stock) => {
                self.state.toggle_custom_input(stock)?;
                if self.state.is_custom_input_shown(stock) {
                    let value = &self.state.form.stocks[stock].custom_period;
                    self.pickers
                        .insert(stock, DateRangePicker::new(value, self.today));
                } else {
                    self.pickers.remove(&stock);
                }
            }
            FormCommand::Text { stock, text } => {
                self.state
                    .update_stock_detail(stock, StockDetailUpdate::custom_period(text))?;
            }
            FormCommand::Pattern { stock, option } => {
                let pattern = TRADE_PATTERNS
                    .get(option)
                    .with_context(|| format!("no trade pattern #{}", option + 1))?;
                self.state.toggle_stock_pattern(stock, pattern)?;
            }
            FormCommand::Basis(option) => {
                let basis = DECISION_OPTIONS
                    .get(option)
                    .with_context(|| format!("no decision basis #{}", option + 1))?;
                self.state.toggle_decision_basis(basis);
            }
            FormCommand::Picker { stock, action } => self.apply_picker(stock, action)?,
        }
        Ok(())
    }

    fn apply_picker(&mut self, stock: usize, action: PickerAction) -> anyhow::Result<()> {
        let picker = self
            .pickers
            .get_mut(&stock)
            .with_context(|| format!("custom period editor for #{} is not open", stock + 1))?;

        let value = match action {
            PickerAction::Day(day) => picker.click_day(day)?,
            PickerAction::Reset => Some(picker.reset()),
            PickerAction::PrevMonth => {
                picker.prev_month();
                None
            }
            PickerAction::NextMonth => {
                picker.next_month();
                None
            }
            PickerAction::OpenYearMonth => {
                picker.open_year_month();
                None
            }
            PickerAction::CloseYearMonth => {
                picker.close_year_month();
                None
            }
            PickerAction::PrevYear => {
                picker.prev_year();
                None
            }
            PickerAction::NextYear => {
                picker.next_year();
                None
            }
            PickerAction::Month(month) => {
                picker.pick_month(month)?;
                None
            }
        };

        if let Some(value) = value {
            self.state
                .update_stock_detail(stock, StockDetailUpdate::custom_period(value))?;
        }
        Ok(())
    }
}
