//! Questionnaire definition, answers and evaluation records.

pub mod answer;
pub mod definition;
pub mod result;
pub mod scoring;

pub use answer::Answer;
pub use definition::{
    Language, Question, QuestionOption, QuestionType, QuestionnaireDefinition, TextInputSpec,
};
pub use result::{QuestionScoreDetail, QuestionnaireResult};
pub use scoring::score_choice_answer;
