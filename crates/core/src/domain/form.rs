use serde::{Deserialize, Serialize};

/// Period chip that switches a ticker to free-text / picker input.
pub const CUSTOM_PERIOD: &str = "직접 입력";

pub const TRADE_PERIODS: [&str; 5] = [
    "1주일 이내",
    "1개월 이내",
    "3개월 이내",
    "6개월 이내",
    "1년 이상",
];

pub const TRADE_PATTERNS: [&str; 6] = [
    "추격 매수",
    "물타기",
    "손절 지연",
    "잦은 단타",
    "조급한 익절",
    "몰빵 투자",
];

pub const DECISION_OPTIONS: [&str; 8] = [
    "뉴스·기사",
    "지인·커뮤니티 추천",
    "유튜브·SNS",
    "차트·기술적 분석",
    "실적·재무제표",
    "급등 흐름 (놓치기 싫어서)",
    "전고점 대비 저렴해서",
    "직감",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    #[default]
    Holding,
    Sold,
}

impl PositionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Holding => "holding",
            Self::Sold => "sold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Holding => "보유 중",
            Self::Sold => "매도 완료",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    pub name: String,
    #[serde(default)]
    pub status: PositionStatus,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub custom_period: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl StockDetail {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn uses_custom_period(&self) -> bool {
        self.period == CUSTOM_PERIOD
    }

    pub fn apply(&mut self, update: StockDetailUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(period) = update.period {
            self.period = period;
        }
        if let Some(custom_period) = update.custom_period {
            self.custom_period = custom_period;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockDetailUpdate {
    pub status: Option<PositionStatus>,
    pub period: Option<String>,
    pub custom_period: Option<String>,
}

impl StockDetailUpdate {
    pub fn status(status: PositionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn period(period: impl Into<String>) -> Self {
        Self {
            period: Some(period.into()),
            ..Default::default()
        }
    }

    pub fn custom_period(value: impl Into<String>) -> Self {
        Self {
            custom_period: Some(value.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentFormData {
    #[serde(default)]
    pub stocks: Vec<StockDetail>,
    #[serde(default)]
    pub decision_basis: Vec<String>,
}

impl InvestmentFormData {
    // The latest ticker is the one sent for analysis.
    pub fn latest_stock(&self) -> Option<&StockDetail> {
        self.stocks.last()
    }

    /// Sample portfolio behind the home screen's quick-analysis entry.
    pub fn quick_sample() -> Self {
        let mut tesla = StockDetail::new("테슬라");
        tesla.status = PositionStatus::Sold;
        tesla.period = TRADE_PERIODS[1].to_string();
        tesla.patterns = vec![TRADE_PATTERNS[0].to_string()];

        let mut nvidia = StockDetail::new("엔비디아");
        nvidia.period = TRADE_PERIODS[2].to_string();
        nvidia.patterns = vec![TRADE_PATTERNS[1].to_string()];

        let mut samsung = StockDetail::new("삼성전자");
        samsung.period = CUSTOM_PERIOD.to_string();
        samsung.custom_period = "2025-01-03 ~ 2025-02-10".to_string();
        samsung.patterns = vec![TRADE_PATTERNS[2].to_string(), TRADE_PATTERNS[1].to_string()];

        Self {
            stocks: vec![tesla, nvidia, samsung],
            decision_basis: vec![DECISION_OPTIONS[0].to_string(), DECISION_OPTIONS[6].to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_detail_serializes_with_camel_case_keys() {
        let mut stock = StockDetail::new("삼성전자");
        stock.period = CUSTOM_PERIOD.to_string();
        stock.custom_period = "2025-01-03 ~ 2025-01-10".to_string();

        let v = serde_json::to_value(&stock).unwrap();
        assert_eq!(
            v,
            json!({
                "name": "삼성전자",
                "status": "holding",
                "period": "직접 입력",
                "customPeriod": "2025-01-03 ~ 2025-01-10",
                "patterns": [],
            })
        );
    }

    #[test]
    fn form_data_accepts_missing_optional_fields() {
        let parsed: InvestmentFormData = serde_json::from_value(json!({
            "stocks": [{"name": "카카오", "status": "sold"}],
        }))
        .unwrap();
        assert_eq!(parsed.stocks[0].status, PositionStatus::Sold);
        assert!(parsed.stocks[0].period.is_empty());
        assert!(parsed.decision_basis.is_empty());
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut stock = StockDetail::new("카카오");
        stock.period = TRADE_PERIODS[0].to_string();
        stock.apply(StockDetailUpdate::status(PositionStatus::Sold));
        assert_eq!(stock.status, PositionStatus::Sold);
        assert_eq!(stock.period, TRADE_PERIODS[0]);
    }

    #[test]
    fn quick_sample_ends_with_custom_ranged_stock() {
        let sample = InvestmentFormData::quick_sample();
        let latest = sample.latest_stock().unwrap();
        assert!(latest.uses_custom_period());
        assert!(!latest.custom_period.is_empty());
    }
}
