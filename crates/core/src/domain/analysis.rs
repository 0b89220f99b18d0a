use crate::domain::null_as_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw analysis payload returned by `/v1/analyze`.
///
/// The backend owns this shape, so the client keeps the JSON as-is and only
/// decodes the sections it displays. A malformed section reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    pub fn from_value(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }

    pub fn request_id(&self) -> Option<&str> {
        self.0.get("request_id").and_then(Value::as_str)
    }

    pub fn learning_pattern_value(&self) -> Value {
        match self.0.get("learning_pattern_analysis") {
            Some(v @ Value::Object(_)) => v.clone(),
            _ => Value::Object(Default::default()),
        }
    }

    pub fn learning_pattern(&self) -> LearningPattern {
        let lpa = self.learning_pattern_value();
        LearningPattern {
            investor_character: section(&lpa, "investor_character"),
            profile_metrics: section(&lpa, "profile_metrics"),
            cognitive_analysis: section(&lpa, "cognitive_analysis"),
            decision_problems: section(&lpa, "decision_problems").unwrap_or_default(),
        }
    }

    /// The backend nests the tutor output under `n10_loss_review_report`;
    /// a top-level `learning_tutor` is accepted too.
    pub fn learning_tutor(&self) -> Option<LearningTutor> {
        self.0
            .get("n10_loss_review_report")
            .and_then(|report| section(report, "learning_tutor"))
            .or_else(|| section(&self.0, "learning_tutor"))
    }

    pub fn action_missions(&self) -> Vec<ActionMission> {
        self.learning_tutor()
            .map(|t| t.action_missions)
            .unwrap_or_default()
    }
}

fn section<T: DeserializeOwned>(parent: &Value, key: &str) -> Option<T> {
    let v = parent.get(key)?;
    if v.is_null() {
        return None;
    }
    match serde_json::from_value::<T>(v.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!(section = key, error = %e, "analysis section did not decode; skipping");
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LearningPattern {
    pub investor_character: Option<InvestorCharacter>,
    pub profile_metrics: Option<ProfileMetrics>,
    pub cognitive_analysis: Option<CognitiveAnalysis>,
    pub decision_problems: Vec<DecisionProblem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorCharacter {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub behavioral_bias: String,
}

pub type ProfileMetrics = BTreeMap<String, ProfileMetric>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileMetric {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub bias_detected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitiveAnalysis {
    pub primary_bias: Bias,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secondary_biases: Vec<Bias>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bias {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionProblem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub problem_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub psychological_trigger: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub situation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thought_pattern: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consequence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency: String,
}

impl DecisionProblem {
    pub fn frequency_level(&self) -> Level {
        Level::parse(&self.frequency)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningTutor {
    #[serde(default)]
    pub custom_learning_path: Option<LearningPath>,
    #[serde(default)]
    pub investment_advisor: Option<InvestmentAdvisor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_missions: Vec<ActionMission>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningPath {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub practice_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_topics: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentAdvisor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub advisor_message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionMission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mission_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub behavioral_target: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_outcome: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_impact: String,
}

impl ActionMission {
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty)
    }

    pub fn impact_level(&self) -> Level {
        Level::parse(&self.estimated_impact)
    }
}

/// low / medium / high; anything else reads as medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "낮음",
            Self::Medium => "보통",
            Self::High => "높음",
        }
    }

    pub fn dots(&self) -> usize {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "쉬움",
            Self::Medium => "보통",
            Self::Hard => "어려움",
        }
    }
}
