//! Questionnaire definition entities.
//!
//! Definitions are authored by the server operator (TOML on disk, loaded by
//! the infrastructure layer) and rendered to applicants in their own
//! language. Option scores are operator-only data: the applicant-facing
//! [`QuestionnaireView`] never contains them.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language an applicant sees the questionnaire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    #[default]
    En,
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            other => Err(DomainError::UnknownLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Zh => write!(f, "zh"),
            Language::En => write!(f, "en"),
        }
    }
}

/// How a question is answered and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    SingleChoice,
    MultipleChoice,
    Text,
}

impl QuestionType {
    /// Choice questions are scored locally and deterministically.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

impl FromStr for QuestionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_choice" => Ok(QuestionType::SingleChoice),
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "text" => Ok(QuestionType::Text),
            other => Err(DomainError::UnknownQuestionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "single_choice"),
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::Text => write!(f, "text"),
        }
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionOption {
    pub text_zh: String,
    pub text_en: String,
    pub score: u32,
}

impl QuestionOption {
    pub fn text(&self, language: Language) -> &str {
        bilingual(language, &self.text_zh, &self.text_en)
    }
}

/// Input metadata for a text question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInputSpec {
    pub placeholder_zh: String,
    pub placeholder_en: String,
}

impl TextInputSpec {
    pub fn placeholder(&self, language: Language) -> &str {
        bilingual(language, &self.placeholder_zh, &self.placeholder_en)
    }
}

/// One question of the registration questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    pub id: u32,
    pub question_zh: String,
    pub question_en: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<TextInputSpec>,
}

impl Question {
    /// Question text in the given language, falling back to the other
    /// language when a translation is missing.
    pub fn text(&self, language: Language) -> &str {
        bilingual(language, &self.question_zh, &self.question_en)
    }

    /// Question text as presented to the scoring model: both language
    /// variants when both are configured, so the grader sees the same text
    /// the applicant saw regardless of UI language.
    pub fn prompt_text(&self) -> String {
        match (self.question_zh.trim(), self.question_en.trim()) {
            ("", en) => en.to_string(),
            (zh, "") => zh.to_string(),
            (zh, en) => format!("{zh} / {en}"),
        }
    }
}

/// The full questionnaire an applicant must pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireDefinition {
    pub enabled: bool,
    pub pass_score: u32,
    pub auto_approve_on_pass: bool,
    /// Fallback maximum for text questions without an explicit `max_score`.
    pub default_text_max_score: u32,
    /// Fallback scoring rule for text questions without their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_rule: Option<String>,
    pub questions: Vec<Question>,
}

impl Default for QuestionnaireDefinition {
    fn default() -> Self {
        Self {
            enabled: false,
            pass_score: 60,
            auto_approve_on_pass: false,
            default_text_max_score: 20,
            scoring_rule: None,
            questions: Vec::new(),
        }
    }
}

impl QuestionnaireDefinition {
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Resolve the maximum score of a question: its explicit override, else
    /// the sum of its option scores, else the global text default.
    pub fn max_score_for(&self, question: &Question) -> u32 {
        if let Some(max) = question.max_score {
            return max;
        }
        if !question.options.is_empty() {
            return question
                .options
                .iter()
                .fold(0u32, |acc, o| acc.saturating_add(o.score));
        }
        self.default_text_max_score
    }

    /// Resolve the scoring rule of a text question: its own, else the
    /// global rule, else empty.
    pub fn scoring_rule_for<'a>(&'a self, question: &'a Question) -> &'a str {
        question
            .scoring_rule
            .as_deref()
            .or(self.scoring_rule.as_deref())
            .unwrap_or("")
    }

    /// The applicant-facing shape of the questionnaire. Option ids are
    /// positional; option scores are never included.
    pub fn view(&self, language: Language) -> QuestionnaireView {
        QuestionnaireView {
            enabled: self.enabled,
            pass_score: self.pass_score,
            questions: self
                .questions
                .iter()
                .map(|q| QuestionView {
                    id: q.id,
                    question: q.text(language).to_string(),
                    question_type: q.question_type,
                    required: q.required,
                    input: q.input.as_ref().map(|i| TextInputView {
                        placeholder: i.placeholder(language).to_string(),
                    }),
                    options: q
                        .options
                        .iter()
                        .enumerate()
                        .map(|(id, o)| OptionView {
                            id,
                            text: o.text(language).to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Applicant-facing questionnaire (no scoring data).
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub enabled: bool,
    pub pass_score: u32,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<TextInputView>,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextInputView {
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub id: usize,
    pub text: String,
}

fn bilingual<'a>(language: Language, zh: &'a str, en: &'a str) -> &'a str {
    let (preferred, fallback) = match language {
        Language::Zh => (zh, en),
        Language::En => (en, zh),
    };
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question() -> Question {
        Question {
            id: 1,
            question_zh: "您是如何得知本服务器的？".to_string(),
            question_en: "How did you hear about our server?".to_string(),
            question_type: QuestionType::SingleChoice,
            required: true,
            options: vec![
                QuestionOption {
                    text_zh: "朋友推荐".to_string(),
                    text_en: "Friend recommendation".to_string(),
                    score: 10,
                },
                QuestionOption {
                    text_zh: "社交媒体".to_string(),
                    text_en: "Social media".to_string(),
                    score: 8,
                },
            ],
            ..Question::default()
        }
    }

    fn text_question() -> Question {
        Question {
            id: 2,
            question_en: "Tell us about yourself.".to_string(),
            question_type: QuestionType::Text,
            ..Question::default()
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_question_type_serde_names() {
        let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple_choice\"");
        assert_eq!("text".parse::<QuestionType>().unwrap(), QuestionType::Text);
    }

    #[test]
    fn test_bilingual_fallback() {
        let q = text_question();
        // No Chinese text configured: both languages fall back to English.
        assert_eq!(q.text(Language::Zh), "Tell us about yourself.");
        assert_eq!(q.text(Language::En), "Tell us about yourself.");
    }

    #[test]
    fn test_prompt_text_joins_both_languages() {
        let q = choice_question();
        assert_eq!(
            q.prompt_text(),
            "您是如何得知本服务器的？ / How did you hear about our server?"
        );
        assert_eq!(text_question().prompt_text(), "Tell us about yourself.");
    }

    #[test]
    fn test_max_score_resolution() {
        let mut definition = QuestionnaireDefinition::default();
        definition.questions = vec![choice_question(), text_question()];

        // Sum of option scores for choice questions.
        assert_eq!(definition.max_score_for(&definition.questions[0]), 18);
        // Global text default when nothing is configured.
        assert_eq!(definition.max_score_for(&definition.questions[1]), 20);

        // Explicit override wins.
        let mut overridden = text_question();
        overridden.max_score = Some(30);
        assert_eq!(definition.max_score_for(&overridden), 30);
    }

    #[test]
    fn test_scoring_rule_resolution() {
        let mut definition = QuestionnaireDefinition {
            scoring_rule: Some("global rule".to_string()),
            ..QuestionnaireDefinition::default()
        };
        let mut q = text_question();
        assert_eq!(definition.scoring_rule_for(&q), "global rule");

        q.scoring_rule = Some("own rule".to_string());
        assert_eq!(definition.scoring_rule_for(&q), "own rule");

        definition.scoring_rule = None;
        q.scoring_rule = None;
        assert_eq!(definition.scoring_rule_for(&q), "");
    }

    #[test]
    fn test_view_hides_option_scores() {
        let definition = QuestionnaireDefinition {
            enabled: true,
            questions: vec![choice_question()],
            ..QuestionnaireDefinition::default()
        };
        let view = definition.view(Language::En);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.to_string().contains("Friend recommendation"));
        assert!(!json.to_string().contains("score\":10"));

        let options = &json["questions"][0]["options"];
        assert_eq!(options[0]["id"], 0);
        assert_eq!(options[1]["id"], 1);
        assert!(options[0].get("score").is_none());
    }

    #[test]
    fn test_view_localizes_placeholder() {
        let mut q = text_question();
        q.input = Some(TextInputSpec {
            placeholder_zh: "简单介绍".to_string(),
            placeholder_en: "A short introduction".to_string(),
        });
        let definition = QuestionnaireDefinition {
            enabled: true,
            questions: vec![q],
            ..QuestionnaireDefinition::default()
        };
        let view = definition.view(Language::Zh);
        assert_eq!(view.questions[0].input.as_ref().unwrap().placeholder, "简单介绍");
    }
}
