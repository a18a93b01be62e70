use serde::Serialize;

use crate::{DreamType, QuizAnswer, ScoreVector};

use super::questions::{Question, QuestionKind, QUESTION_BANK};

const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireResult {
    pub scores: ScoreVector,
    pub top: DreamType,
}

/// Accumulates option points per dream type over the fixed question bank.
/// Answers referencing unknown questions or options contribute nothing;
/// they are logged and skipped rather than surfaced as errors.
#[derive(Debug, Clone)]
pub struct QuestionnaireScorer {
    bank: &'static [Question],
}

impl QuestionnaireScorer {
    pub fn new() -> Self {
        Self {
            bank: QUESTION_BANK,
        }
    }

    pub fn score(&self, answers: &[QuizAnswer]) -> QuestionnaireResult {
        let mut scores = ScoreVector::default();

        for answer in answers {
            let question = match self.bank.iter().find(|q| q.id == answer.question_id) {
                Some(question) => question,
                None => {
                    tracing::warn!(
                        question_id = answer.question_id,
                        "answer references unknown question"
                    );
                    continue;
                }
            };

            if question.kind != QuestionKind::Choice {
                continue;
            }

            let answer_id = match answer.answer_id.as_deref() {
                Some(answer_id) => answer_id,
                None => continue,
            };

            let option = match question.options.iter().find(|o| o.id == answer_id) {
                Some(option) => option,
                None => {
                    tracing::warn!(
                        question_id = answer.question_id,
                        answer_id,
                        "answer references unknown option"
                    );
                    continue;
                }
            };

            for (dream_type, points) in option.awards {
                scores.add(*dream_type, *points);
            }
        }

        let top = select_top(&scores, answers);
        QuestionnaireResult { scores, top }
    }
}

impl Default for QuestionnaireScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Winner selection with a reproducible tie-break: tied types are ordered
/// by the fixed priority ranking, then indexed by a stable hash of the
/// canonical answer set. Identical answer sets always resolve identically,
/// whatever order they were submitted in.
fn select_top(scores: &ScoreVector, answers: &[QuizAnswer]) -> DreamType {
    let max = scores.max_score();
    let mut tied: Vec<DreamType> = scores
        .entries()
        .iter()
        .filter(|(_, score)| (max - score).abs() < SCORE_EPSILON)
        .map(|(dream_type, _)| *dream_type)
        .collect();
    tied.sort_by_key(|dream_type| dream_type.priority_rank());

    if tied.len() == 1 {
        return tied[0];
    }

    let hash = answer_set_hash(answers);
    tied[(hash % tied.len() as u64) as usize]
}

/// Order-independent fold of the scored answer references. Text-only
/// answers carry no option id and are excluded, matching their zero score
/// contribution.
fn answer_set_hash(answers: &[QuizAnswer]) -> u64 {
    let mut keys: Vec<String> = answers
        .iter()
        .filter_map(|answer| {
            answer
                .answer_id
                .as_deref()
                .map(|answer_id| format!("{}:{}", answer.question_id, answer_id))
        })
        .collect();
    keys.sort();
    stable_hash64(&keys.join("|"))
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
