//! Evaluate Questionnaire use case
//!
//! Orchestrates scoring of one submission: choice questions are scored
//! locally and deterministically, text questions fan out to the essay
//! scorer port, and everything folds into a single auditable result.

use crate::ports::essay_scorer::EssayScorer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use warden_domain::{
    Answer, QuestionScoreDetail, QuestionnaireDefinition, QuestionnaireResult, ScoringRequest,
    score_choice_answer,
};

/// Use case for evaluating a questionnaire submission.
///
/// Every question in the definition produces exactly one
/// [`QuestionScoreDetail`], in definition order, even when some of them
/// require manual review; the full record is what a human reviewer reads.
pub struct EvaluateQuestionnaireUseCase<S: EssayScorer + 'static> {
    scorer: Arc<S>,
}

impl<S: EssayScorer + 'static> EvaluateQuestionnaireUseCase<S> {
    pub fn new(scorer: Arc<S>) -> Self {
        Self { scorer }
    }

    /// Evaluate a submission against the questionnaire definition.
    ///
    /// Text questions are scored concurrently; the process-wide in-flight
    /// bound is enforced by the scorer itself, not here.
    pub async fn execute(
        &self,
        definition: &QuestionnaireDefinition,
        answers: &HashMap<u32, Answer>,
    ) -> QuestionnaireResult {
        if !definition.enabled {
            debug!("questionnaire disabled, passing submission through");
            return QuestionnaireResult::pass_through(definition.pass_score);
        }

        info!(questions = definition.questions.len(), "evaluating questionnaire submission");

        // One slot per question so details come out in definition order
        // regardless of which scoring task finishes first.
        let mut details: Vec<Option<QuestionScoreDetail>> =
            Vec::with_capacity(definition.questions.len());
        let mut join_set = JoinSet::new();

        for (slot, question) in definition.questions.iter().enumerate() {
            let max_score = definition.max_score_for(question);
            let answer = answers.get(&question.id);

            match answer {
                Some(answer) if answer.is_answered(question.question_type) => {
                    if question.question_type.is_choice() {
                        let score = score_choice_answer(
                            question,
                            &answer.selected_option_ids,
                            max_score,
                        );
                        details.push(Some(QuestionScoreDetail::local(
                            question.id,
                            question.question_type,
                            score,
                            max_score,
                            "Deterministic option scoring",
                        )));
                    } else {
                        let request = ScoringRequest::new(
                            question.id,
                            &question.prompt_text(),
                            &answer.text_answer,
                            definition.scoring_rule_for(question),
                            max_score,
                        );
                        let scorer = Arc::clone(&self.scorer);
                        let question_id = question.id;
                        let question_type = question.question_type;
                        details.push(None);
                        join_set.spawn(async move {
                            let result = scorer.score(&request).await;
                            (slot, question_id, question_type, max_score, result)
                        });
                    }
                }
                _ => {
                    details.push(Some(QuestionScoreDetail::local(
                        question.id,
                        question.question_type,
                        0,
                        max_score,
                        "No answer submitted",
                    )));
                }
            }
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, question_id, question_type, max_score, result)) => {
                    details[slot] = Some(QuestionScoreDetail::from_remote(
                        question_id,
                        question_type,
                        max_score,
                        result,
                    ));
                }
                Err(e) => {
                    warn!("scoring task join error: {e}");
                }
            }
        }

        // A slot can only still be empty if its scoring task died; record
        // that as a manual-review detail rather than dropping the question
        // from the audit trail.
        let details: Vec<QuestionScoreDetail> = details
            .into_iter()
            .enumerate()
            .map(|(slot, detail)| {
                detail.unwrap_or_else(|| {
                    let question = &definition.questions[slot];
                    QuestionScoreDetail::from_remote(
                        question.id,
                        question.question_type,
                        definition.max_score_for(question),
                        warden_domain::ScoringResult::manual_review(
                            "Scoring task failed, requires manual review",
                        ),
                    )
                })
            })
            .collect();

        let result = QuestionnaireResult::new(definition.pass_score, details);
        info!(
            score = result.score,
            passed = result.passed,
            manual_review_required = result.manual_review_required,
            "questionnaire evaluated"
        );
        result
    }
}
