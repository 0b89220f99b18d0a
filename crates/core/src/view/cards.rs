use crate::domain::analysis::{ActionMission, CognitiveAnalysis, DecisionProblem, InvestorCharacter};
use std::fmt;

pub struct CognitiveBiasCard<'a>(pub &'a CognitiveAnalysis);

impl fmt::Display for CognitiveBiasCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = &self.0.primary_bias;
        writeln!(f, "주요 편향")?;
        writeln!(f, "  {} ({})", primary.name, primary.english)?;
        writeln!(f, "  {}", primary.description)?;
        writeln!(f, "  💥 영향: {}", primary.impact)?;

        if !self.0.secondary_biases.is_empty() {
            writeln!(f, "보조 편향")?;
            for bias in &self.0.secondary_biases {
                writeln!(f, "  • {} ({})", bias.name, bias.english)?;
                writeln!(f, "    {}", bias.description)?;
            }
        }
        Ok(())
    }
}

pub struct InvestorPersonaCard<'a>(pub &'a InvestorCharacter);

impl fmt::Display for InvestorPersonaCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "【 {} 】", self.0.kind)?;
        writeln!(f, "{}", self.0.description)?;
        writeln!(f, "#{}", self.0.behavioral_bias)
    }
}

/// Missions in ascending priority; ties keep backend order.
pub struct ActionMissionCard<'a>(pub &'a [ActionMission]);

impl ActionMissionCard<'_> {
    pub fn sorted(&self) -> Vec<&ActionMission> {
        let mut missions: Vec<_> = self.0.iter().collect();
        missions.sort_by_key(|m| m.priority);
        missions
    }
}

impl fmt::Display for ActionMissionCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mission in self.sorted() {
            writeln!(f, "#{} 📋 {}", mission.priority, mission.title)?;
            writeln!(f, "   {}", mission.description)?;
            writeln!(f, "   🎯 목표: {}", mission.behavioral_target)?;
            writeln!(f, "   ✨ 기대효과: {}", mission.expected_outcome)?;
            writeln!(
                f,
                "   (난이도 {}) (효과 {})",
                mission.difficulty_level().label(),
                mission.impact_level().label()
            )?;
        }
        Ok(())
    }
}

pub struct DecisionProblemCard<'a>(pub &'a [DecisionProblem]);

impl DecisionProblemCard<'_> {
    pub fn frequency_indicator(dots: usize) -> String {
        (0..3).map(|i| if i < dots { '●' } else { '○' }).collect()
    }
}

impl fmt::Display for DecisionProblemCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for problem in self.0 {
            writeln!(
                f,
                "{}   빈도 {}",
                problem.problem_type,
                Self::frequency_indicator(problem.frequency_level().dots())
            )?;
            writeln!(f, "  😰 심리적 트리거: {}", problem.psychological_trigger)?;
            writeln!(f, "  📍 발생 상황: {}", problem.situation)?;
            writeln!(f, "  💭 그 순간의 생각: \"{}\"", problem.thought_pattern)?;
            writeln!(f, "  ⚡ 결과: {}", problem.consequence)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Bias;

    fn mission(id: &str, priority: i64) -> ActionMission {
        ActionMission {
            mission_id: id.to_string(),
            priority,
            title: format!("title {id}"),
            description: String::new(),
            behavioral_target: String::new(),
            expected_outcome: String::new(),
            difficulty: "hard".to_string(),
            estimated_impact: "low".to_string(),
        }
    }

    #[test]
    fn missions_sort_by_priority_stably() {
        let missions = vec![mission("M3", 3), mission("M1a", 1), mission("M2", 2), mission("M1b", 1)];
        let card = ActionMissionCard(&missions);
        let ids: Vec<_> = card.sorted().into_iter().map(|m| m.mission_id.as_str()).collect();
        assert_eq!(ids, vec!["M1a", "M1b", "M2", "M3"]);

        let out = card.to_string();
        assert!(out.find("title M1a").unwrap() < out.find("title M3").unwrap());
        assert!(out.contains("(난이도 어려움) (효과 낮음)"));
    }

    #[test]
    fn frequency_indicator_fills_dots() {
        assert_eq!(DecisionProblemCard::frequency_indicator(1), "●○○");
        assert_eq!(DecisionProblemCard::frequency_indicator(3), "●●●");
    }

    #[test]
    fn bias_card_hides_empty_secondary_list() {
        let bias = |name: &str| Bias {
            name: name.to_string(),
            english: "Confirmation Bias".to_string(),
            description: "d".to_string(),
            impact: "i".to_string(),
        };
        let mut analysis = CognitiveAnalysis {
            primary_bias: bias("확증 편향"),
            secondary_biases: vec![],
        };
        assert!(!CognitiveBiasCard(&analysis).to_string().contains("보조 편향"));

        analysis.secondary_biases.push(bias("앵커링 효과"));
        let out = CognitiveBiasCard(&analysis).to_string();
        assert!(out.contains("보조 편향"));
        assert!(out.contains("• 앵커링 효과"));
    }

    #[test]
    fn persona_card_tags_behavioral_bias() {
        let character = InvestorCharacter {
            kind: "바겐 헌터".to_string(),
            description: "저렴할 때를 노리는 투자자".to_string(),
            behavioral_bias: "anchoring_effect".to_string(),
        };
        let out = InvestorPersonaCard(&character).to_string();
        assert!(out.contains("【 바겐 헌터 】"));
        assert!(out.contains("#anchoring_effect"));
    }
}
