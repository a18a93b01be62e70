use std::cmp::Ordering;

use serde::Serialize;

use crate::config::FortunePoints;
use crate::{BirthDate, DreamType, ScoreVector};

use super::kyusei::{star_for, NineStar};
use super::numerology::{life_path_number, life_path_profile, LifePath};
use super::pillars::{four_pillars, FourPillars};
use super::stem::{day_stem, HeavenlyStem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FortuneDreamType {
    pub primary: DreamType,
    pub secondary: DreamType,
    pub all_scores: ScoreVector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FortuneDiagnosis {
    pub bazi: FourPillars,
    pub kyusei: NineStar,
    pub numerology: LifePath,
    pub dream_type: FortuneDreamType,
}

/// Composes the stem, pillar, star, and numerology calculators and turns
/// their outputs into a score over the nine dream types.
#[derive(Debug, Clone)]
pub struct FortuneEngine {
    points: FortunePoints,
}

impl FortuneEngine {
    pub fn new(points: FortunePoints) -> Self {
        Self { points }
    }

    pub fn diagnose(&self, date: &BirthDate) -> FortuneDiagnosis {
        let bazi = four_pillars(date);
        let stem = day_stem(date);
        let star = star_for(date.year, date.month);
        let number = life_path_number(date);

        let all_scores = self.score(&bazi, stem, star, number);
        let (primary, secondary) = rank_top_two(&all_scores);

        FortuneDiagnosis {
            bazi,
            kyusei: *star,
            numerology: *life_path_profile(number),
            dream_type: FortuneDreamType {
                primary,
                secondary,
                all_scores,
            },
        }
    }

    fn score(
        &self,
        bazi: &FourPillars,
        stem: &HeavenlyStem,
        star: &NineStar,
        life_path: u32,
    ) -> ScoreVector {
        let mut scores = ScoreVector::default();
        let dominant = bazi.element_balance.dominant();

        for dream_type in DreamType::ALL {
            let element = dream_type.element();
            if element == dominant {
                scores.add(dream_type, self.points.dominant_element);
            }
            if element == stem.element {
                scores.add(dream_type, self.points.stem_element);
            }
            if element == star.element {
                scores.add(dream_type, self.points.star_element);
            }
        }

        scores.add(life_path_dream_type(life_path), self.points.life_path);
        scores
    }
}

/// Life-path number → dream type awarded the numerology points.
pub fn life_path_dream_type(number: u32) -> DreamType {
    match number {
        1 => DreamType::Phoenix,
        2 => DreamType::Deer,
        3 => DreamType::Kitsune,
        4 => DreamType::Turtle,
        5 => DreamType::Pegasus,
        6 => DreamType::Elephant,
        7 => DreamType::Wolf,
        8 => DreamType::Dragon,
        9 => DreamType::Shark,
        11 => DreamType::Kitsune,
        22 => DreamType::Turtle,
        33 => DreamType::Elephant,
        _ => DreamType::Phoenix,
    }
}

fn rank_top_two(scores: &ScoreVector) -> (DreamType, DreamType) {
    let mut ranked = scores.entries();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.priority_rank().cmp(&b.0.priority_rank()))
    });
    (ranked[0].0, ranked[1].0)
}
