//! Questionnaire definition storage.

pub mod store;

pub use store::{QuestionnaireStore, StoreError};
