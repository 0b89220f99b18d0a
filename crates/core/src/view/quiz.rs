use crate::domain::quiz::{Quiz, QuizKind};
use std::fmt;

pub struct QuizView<'a> {
    pub number: usize,
    pub quiz: &'a Quiz,
}

impl fmt::Display for QuizView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.quiz.kind {
            QuizKind::Standard => "퀴즈",
            QuizKind::Personality => "성찰",
        };
        writeln!(f, "Q{} [{tag}] {}", self.number, self.quiz.question)?;
        for (i, option) in self.quiz.options.iter().enumerate() {
            writeln!(f, "  {}) {}", i + 1, option.text)?;
        }
        Ok(())
    }
}

pub struct AnswerView<'a> {
    pub quiz: &'a Quiz,
    pub index: usize,
}

impl fmt::Display for AnswerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quiz.is_correct(self.index) {
            Some(true) => writeln!(f, "✅ 정답입니다!"),
            Some(false) => {
                let answer = self
                    .quiz
                    .correct_answer_index
                    .and_then(|i| self.quiz.options.get(i))
                    .map(|o| o.text.as_str())
                    .unwrap_or("");
                writeln!(f, "❌ 아쉬워요. 정답: {answer}")
            }
            None => match self
                .quiz
                .options
                .get(self.index)
                .and_then(|o| o.solution.as_deref())
            {
                Some(solution) => writeln!(f, "💡 {solution}"),
                None => writeln!(f, "💡 좋은 선택이에요. 다음 거래에서 실천해보세요."),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::QuizOption;

    fn option(text: &str, solution: Option<&str>) -> QuizOption {
        QuizOption {
            text: text.to_string(),
            solution: solution.map(str::to_string),
        }
    }

    #[test]
    fn standard_answer_feedback() {
        let quiz = Quiz {
            question: "가장 중요한 손실 원인은?".to_string(),
            kind: QuizKind::Standard,
            options: vec![option("정보 검증 부족", None), option("추세 오판", None)],
            correct_answer_index: Some(0),
        };
        assert!(QuizView { number: 1, quiz: &quiz }.to_string().contains("2) 추세 오판"));
        assert!(AnswerView { quiz: &quiz, index: 0 }.to_string().contains("정답입니다"));
        assert!(AnswerView { quiz: &quiz, index: 1 }
            .to_string()
            .contains("정답: 정보 검증 부족"));
    }

    #[test]
    fn personality_answer_shows_solution() {
        let quiz = Quiz {
            question: "다음 거래에서 우선 보완할 행동은?".to_string(),
            kind: QuizKind::Personality,
            options: vec![option("리스크 한도 설정", Some("최대 손실 범위를 정하세요.")), option("기록", None)],
            correct_answer_index: None,
        };
        assert!(QuizView { number: 3, quiz: &quiz }.to_string().starts_with("Q3 [성찰]"));
        assert_eq!(
            AnswerView { quiz: &quiz, index: 0 }.to_string().trim(),
            "💡 최대 손실 범위를 정하세요."
        );
        assert!(AnswerView { quiz: &quiz, index: 1 }.to_string().contains("좋은 선택"));
    }
}
