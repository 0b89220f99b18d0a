use crate::domain::analysis::AnalysisResult;
use crate::view::cards::{
    ActionMissionCard, CognitiveBiasCard, DecisionProblemCard, InvestorPersonaCard,
};
use crate::view::radar::RadarChart;
use crate::view::RULE;
use std::fmt;

/// Full analysis report; sections the backend did not send are skipped.
pub struct ResultView<'a>(pub &'a AnalysisResult);

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lp = self.0.learning_pattern();
        let tutor = self.0.learning_tutor();
        let mut sections = 0;

        if let Some(character) = &lp.investor_character {
            writeln!(f, "{RULE}\n나의 투자 페르소나")?;
            write!(f, "{}", InvestorPersonaCard(character))?;
            sections += 1;
        }
        if let Some(metrics) = &lp.profile_metrics {
            writeln!(f, "{RULE}\n투자 성향 프로필")?;
            write!(f, "{}", RadarChart(metrics))?;
            sections += 1;
        }
        if let Some(cognitive) = &lp.cognitive_analysis {
            writeln!(f, "{RULE}\n인지 편향 분석")?;
            write!(f, "{}", CognitiveBiasCard(cognitive))?;
            sections += 1;
        }
        if !lp.decision_problems.is_empty() {
            writeln!(f, "{RULE}\n의사결정 문제")?;
            write!(f, "{}", DecisionProblemCard(&lp.decision_problems))?;
            sections += 1;
        }
        if let Some(tutor) = &tutor {
            if !tutor.action_missions.is_empty() {
                writeln!(f, "{RULE}\n행동 미션")?;
                write!(f, "{}", ActionMissionCard(&tutor.action_missions))?;
                sections += 1;
            }
            if let Some(path) = &tutor.custom_learning_path {
                writeln!(f, "{RULE}\n맞춤 학습 경로")?;
                writeln!(f, "{}", path.path_summary)?;
                for (i, step) in path.practice_steps.iter().enumerate() {
                    writeln!(f, "  {}. {step}", i + 1)?;
                }
                if !path.recommended_topics.is_empty() {
                    writeln!(f, "  추천 주제: {}", path.recommended_topics.join(", "))?;
                }
                sections += 1;
            }
            if let Some(advisor) = &tutor.investment_advisor {
                if !advisor.advisor_message.is_empty() {
                    writeln!(f, "{RULE}\n투자 어드바이저")?;
                    writeln!(f, "{}", advisor.advisor_message)?;
                    for question in &advisor.recommended_questions {
                        writeln!(f, "  ? {question}")?;
                    }
                    sections += 1;
                }
            }
        }

        if sections == 0 {
            writeln!(f, "표시할 분석 결과가 없습니다.")?;
        }
        writeln!(f, "{RULE}")
    }
}
