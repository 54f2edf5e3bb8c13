//! Submitted answer value object.

use super::definition::QuestionType;
use serde::{Deserialize, Serialize};

/// One applicant answer, keyed by question id in a submission map.
///
/// The HTTP layer validates requiredness, option bounds and text length
/// before this type is constructed; evaluation dispatches on the
/// questionnaire definition's question type, not the submitted one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answer {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    pub selected_option_ids: Vec<usize>,
    pub text_answer: String,
}

impl Answer {
    /// An answer to a choice question.
    pub fn choice(selected_option_ids: Vec<usize>) -> Self {
        Self {
            question_type: None,
            selected_option_ids,
            text_answer: String::new(),
        }
    }

    /// An answer to a text question.
    pub fn text(text_answer: impl Into<String>) -> Self {
        Self {
            question_type: None,
            selected_option_ids: Vec::new(),
            text_answer: text_answer.into(),
        }
    }

    /// Whether the answer carries any content for the given question type.
    pub fn is_answered(&self, question_type: QuestionType) -> bool {
        if question_type.is_choice() {
            !self.selected_option_ids.is_empty()
        } else {
            !self.text_answer.trim().is_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_answered_choice() {
        assert!(Answer::choice(vec![0]).is_answered(QuestionType::SingleChoice));
        assert!(!Answer::choice(vec![]).is_answered(QuestionType::MultipleChoice));
    }

    #[test]
    fn test_is_answered_text() {
        assert!(Answer::text("hello").is_answered(QuestionType::Text));
        assert!(!Answer::text("   ").is_answered(QuestionType::Text));
    }

    #[test]
    fn test_deserializes_from_submission_json() {
        let answer: Answer = serde_json::from_str(
            r#"{"type": "single_choice", "selected_option_ids": [1], "text_answer": ""}"#,
        )
        .unwrap();
        assert_eq!(answer.question_type, Some(QuestionType::SingleChoice));
        assert_eq!(answer.selected_option_ids, vec![1]);
    }
}
