use serde::{Deserialize, Serialize};

use crate::{BirthDate, Element};

use super::stem::{day_stem_index, days_since_epoch, HEAVENLY_STEMS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarthlyBranch {
    pub glyph: &'static str,
    pub animal: &'static str,
    pub element: Element,
}

/// The twelve earthly branches in cycle order.
pub const EARTHLY_BRANCHES: [EarthlyBranch; 12] = [
    EarthlyBranch { glyph: "子", animal: "rat", element: Element::Water },
    EarthlyBranch { glyph: "丑", animal: "ox", element: Element::Earth },
    EarthlyBranch { glyph: "寅", animal: "tiger", element: Element::Wood },
    EarthlyBranch { glyph: "卯", animal: "rabbit", element: Element::Wood },
    EarthlyBranch { glyph: "辰", animal: "dragon", element: Element::Earth },
    EarthlyBranch { glyph: "巳", animal: "snake", element: Element::Fire },
    EarthlyBranch { glyph: "午", animal: "horse", element: Element::Fire },
    EarthlyBranch { glyph: "未", animal: "goat", element: Element::Earth },
    EarthlyBranch { glyph: "申", animal: "monkey", element: Element::Metal },
    EarthlyBranch { glyph: "酉", animal: "rooster", element: Element::Metal },
    EarthlyBranch { glyph: "戌", animal: "dog", element: Element::Earth },
    EarthlyBranch { glyph: "亥", animal: "pig", element: Element::Water },
];

/// Branch of the stem-cycle anchor day: 1900-01-01 was 甲戌, and 戌 sits at
/// index 10 of the branch cycle.
const EPOCH_BRANCH_INDEX: i64 = 10;

/// 1984 opened a sexagenary cycle as the 甲子 year; both year cycles are
/// anchored with an offset of 4.
const YEAR_CYCLE_OFFSET: i64 = 4;

/// The first solar month is the 寅 month, branch index 2.
const FIRST_MONTH_BRANCH_INDEX: i64 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBalance {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
}

impl ElementBalance {
    pub fn add(&mut self, element: Element) {
        match element {
            Element::Wood => self.wood += 1,
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Metal => self.metal += 1,
            Element::Water => self.water += 1,
        }
    }

    pub fn count(&self, element: Element) -> u32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn total(&self) -> u32 {
        self.wood + self.fire + self.earth + self.metal + self.water
    }

    /// Most frequent element; ties fall to the earlier entry of the fixed
    /// wood, fire, earth, metal, water order.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        let mut best_count = self.count(best);
        for element in Element::ALL {
            if self.count(element) > best_count {
                best = element;
                best_count = self.count(element);
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourPillars {
    pub year_pillar: String,
    pub month_pillar: String,
    pub day_pillar: String,
    pub element_balance: ElementBalance,
}

/// Derive the year/month/day pillars and the element histogram over their
/// six components (three stems, three branches).
pub fn four_pillars(date: &BirthDate) -> FourPillars {
    let year_stem_idx = (date.year as i64 - YEAR_CYCLE_OFFSET).rem_euclid(10) as usize;
    let year_branch_idx = (date.year as i64 - YEAR_CYCLE_OFFSET).rem_euclid(12) as usize;

    let month_branch_idx =
        (date.month as i64 - 1 + FIRST_MONTH_BRANCH_INDEX).rem_euclid(12) as usize;
    // Five-tigers rule: the first month's stem follows from the year stem.
    let first_month_stem = (year_stem_idx as i64 % 5) * 2 + 2;
    let month_stem_idx = (first_month_stem + date.month as i64 - 1).rem_euclid(10) as usize;

    let day_stem_idx = day_stem_index(date);
    let day_branch_idx = (days_since_epoch(date) + EPOCH_BRANCH_INDEX).rem_euclid(12) as usize;

    let mut balance = ElementBalance::default();
    for stem_idx in [year_stem_idx, month_stem_idx, day_stem_idx] {
        balance.add(HEAVENLY_STEMS[stem_idx].element);
    }
    for branch_idx in [year_branch_idx, month_branch_idx, day_branch_idx] {
        balance.add(EARTHLY_BRANCHES[branch_idx].element);
    }

    FourPillars {
        year_pillar: pillar_label(year_stem_idx, year_branch_idx),
        month_pillar: pillar_label(month_stem_idx, month_branch_idx),
        day_pillar: pillar_label(day_stem_idx, day_branch_idx),
        element_balance: balance,
    }
}

fn pillar_label(stem_idx: usize, branch_idx: usize) -> String {
    format!(
        "{}{}",
        HEAVENLY_STEMS[stem_idx].glyph,
        EARTHLY_BRANCHES[branch_idx].glyph
    )
}
