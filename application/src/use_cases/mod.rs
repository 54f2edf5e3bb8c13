//! Use cases: the operations the application exposes.

pub mod evaluate_questionnaire;
