use std::fmt;

pub const BRAND: &str = "WILDCARD";

pub struct SplashView;

impl fmt::Display for SplashView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        ┌─────┐")?;
        writeln!(f, "        │  W  │")?;
        writeln!(f, "        └─────┘")?;
        writeln!(f)?;
        writeln!(f, "       {BRAND}")?;
        writeln!(f, "  LOSS ANALYSIS ENGINE")?;
        writeln!(f)?;
        writeln!(f, "투자 패턴 분석의 새로운 기준")
    }
}

pub struct LoadingView;

impl fmt::Display for LoadingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "◌ 노트를 정리하고 있습니다")?;
        writeln!(f, "기록된 매매 데이터와 시장 상황을")?;
        writeln!(f, "정밀하게 대조하고 있습니다.")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    StartAnalysis,
    QuickAnalysis,
}

pub struct RecentNote {
    pub name: &'static str,
    pub date: &'static str,
    pub kind: &'static str,
}

pub const RECENT_NOTES: [RecentNote; 3] = [
    RecentNote {
        name: "삼성전자 외 2건",
        date: "2025.02.10",
        kind: "포트폴리오 분석",
    },
    RecentNote {
        name: "테슬라",
        date: "2025.01.24",
        kind: "매매 패턴 분석",
    },
    RecentNote {
        name: "엔비디아",
        date: "2025.01.05",
        kind: "추격 매수 분석",
    },
];

pub struct HomeView;

impl HomeView {
    pub fn choose(input: &str) -> Option<HomeAction> {
        match input.trim() {
            "1" => Some(HomeAction::StartAnalysis),
            "2" => Some(HomeAction::QuickAnalysis),
            _ => None,
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[W] {BRAND}")?;
        writeln!(f)?;
        writeln!(f, "당신의 선택이")?;
        writeln!(f, "최고의 자산이 되도록")?;
        writeln!(f, "와일드카드가 당신의 투자 여정을 함께 기록합니다.")?;
        writeln!(f)?;
        writeln!(f, "1) AI 투자 결정 복기 시작  ─ 포트폴리오 중심의 다중 분석 지원")?;
        writeln!(f)?;
        writeln!(f, "나의 분석 노트 12건 | 학습 성취도 84%")?;
        writeln!(f)?;
        writeln!(f, "최근 복기 노트")?;
        for (i, note) in RECENT_NOTES.iter().enumerate() {
            let marker = if i == 0 { "2)" } else { "  " };
            writeln!(f, "{marker} {} · {} • {}", note.name, note.date, note.kind)?;
        }
        Ok(())
    }
}
