//! Application layer for gatewarden
//!
//! Use cases and ports. The orchestrating logic lives here; the adapters
//! that talk to the outside world (scoring providers, config files) live in
//! the infrastructure layer and plug into the ports defined in this crate.

pub mod ports;
pub mod use_cases;

pub use ports::essay_scorer::EssayScorer;
pub use use_cases::evaluate_questionnaire::EvaluateQuestionnaireUseCase;
