use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Standard,
    /// Reflection question; options carry solutions instead of a right answer.
    Personality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuizKind,
    pub options: Vec<QuizOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer_index: Option<usize>,
}

impl Quiz {
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.correct_answer_index.map(|correct| correct == index)
    }
}

/// Reshapes a `/v1/quiz` response into display quizzes.
///
/// Never fails: a missing or non-array `quiz_set.quizzes` yields an empty
/// list, and each field falls back to an empty string or index 0.
pub fn normalize_quizzes(response: &Value) -> Vec<Quiz> {
    let Some(quizzes) = response
        .get("quiz_set")
        .and_then(|set| set.get("quizzes"))
        .and_then(Value::as_array)
    else {
        tracing::debug!("quiz response has no quizzes array");
        return Vec::new();
    };

    quizzes.iter().map(normalize_quiz).collect()
}

fn normalize_quiz(raw: &Value) -> Quiz {
    let kind = match raw.get("quiz_type").and_then(Value::as_str) {
        Some("reflection") => QuizKind::Personality,
        _ => QuizKind::Standard,
    };

    let options = raw
        .get("options")
        .and_then(Value::as_array)
        .map(|opts| opts.iter().map(normalize_option).collect())
        .unwrap_or_default();

    let correct_index = raw
        .get("correct_answer_index")
        .and_then(as_index)
        .unwrap_or(0);

    Quiz {
        question: lenient_string(raw.get("question")),
        kind,
        options,
        correct_answer_index: (kind == QuizKind::Standard).then_some(correct_index),
    }
}

fn normalize_option(raw: &Value) -> QuizOption {
    if let Value::String(text) = raw {
        return QuizOption {
            text: text.clone(),
            solution: None,
        };
    }

    let solution = lenient_string(raw.get("solution"));
    QuizOption {
        text: lenient_string(raw.get("text")),
        solution: (!solution.is_empty()).then_some(solution),
    }
}

fn lenient_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

// Any number would pass through on the wire, but a negative or fractional
// index cannot address an option, so it is treated like a missing one (0).
fn as_index(v: &Value) -> Option<usize> {
    if let Some(n) = v.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = v.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64).then_some(f as usize)
}
