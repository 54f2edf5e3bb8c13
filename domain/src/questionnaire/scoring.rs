//! Deterministic local scoring for choice questions.

use super::definition::Question;

/// Sum the configured score of each selected option, clamped to
/// `[0, max_score]`. Option ids are positional; ids outside the option list
/// are ignored.
pub fn score_choice_answer(question: &Question, selected_option_ids: &[usize], max_score: u32) -> u32 {
    let total = selected_option_ids
        .iter()
        .filter_map(|&id| question.options.get(id))
        .fold(0u32, |acc, option| acc.saturating_add(option.score));
    total.min(max_score)
}
