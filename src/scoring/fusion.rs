use crate::config::FusionConfig;
use crate::{DreamType, ScoreVector};

const SCORE_EPSILON: f64 = 1e-9;

/// Blends the questionnaire and fortune score vectors into the final
/// classification. Inputs are combined as-is; the two subsystems run on
/// different natural scales and no normalization is applied.
#[derive(Debug, Clone)]
pub struct FusionScorer {
    weights: FusionConfig,
}

impl FusionScorer {
    pub fn new(weights: FusionConfig) -> Self {
        Self { weights }
    }

    pub fn fuse(
        &self,
        questionnaire: &ScoreVector,
        fortune: &ScoreVector,
    ) -> (DreamType, ScoreVector) {
        let mut combined = ScoreVector::default();
        for dream_type in DreamType::ALL {
            combined.add(
                dream_type,
                questionnaire.get(dream_type) * self.weights.questionnaire_weight
                    + fortune.get(dream_type) * self.weights.fortune_weight,
            );
        }

        (select_winner(&combined), combined)
    }
}

/// Maximum combined score wins; scores within floating-point equality of
/// the maximum fall to the fixed priority ranking.
fn select_winner(combined: &ScoreVector) -> DreamType {
    let max = combined.max_score();
    let mut tied: Vec<DreamType> = combined
        .entries()
        .iter()
        .filter(|(_, score)| (max - score).abs() < SCORE_EPSILON)
        .map(|(dream_type, _)| *dream_type)
        .collect();
    tied.sort_by_key(|dream_type| dream_type.priority_rank());
    tied[0]
}
