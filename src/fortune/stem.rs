use serde::{Deserialize, Serialize};

use crate::{BirthDate, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeavenlyStem {
    pub glyph: &'static str,
    pub element: Element,
    pub polarity: Polarity,
    pub keywords: &'static [&'static str],
    pub description: &'static str,
}

/// The ten heavenly stems in cycle order. 1900-01-01 was a 甲 day, so the
/// cycle is anchored with 甲 at index 0.
pub const HEAVENLY_STEMS: [HeavenlyStem; 10] = [
    HeavenlyStem {
        glyph: "甲",
        element: Element::Wood,
        polarity: Polarity::Yang,
        keywords: &["pioneer", "upright", "growth"],
        description: "A towering tree. Breaks through the soil first and keeps reaching upward, whatever the weather.",
    },
    HeavenlyStem {
        glyph: "乙",
        element: Element::Wood,
        polarity: Polarity::Yin,
        keywords: &["flexible", "artistic", "resilient"],
        description: "A winding vine. Bends around every obstacle and blooms in places nobody planted it.",
    },
    HeavenlyStem {
        glyph: "丙",
        element: Element::Fire,
        polarity: Polarity::Yang,
        keywords: &["radiant", "generous", "public"],
        description: "The midday sun. Warms everyone in sight and cannot help being noticed.",
    },
    HeavenlyStem {
        glyph: "丁",
        element: Element::Fire,
        polarity: Polarity::Yin,
        keywords: &["focused", "devoted", "subtle"],
        description: "A lantern flame. Gives quiet, steady light to the few gathered close around it.",
    },
    HeavenlyStem {
        glyph: "戊",
        element: Element::Earth,
        polarity: Polarity::Yang,
        keywords: &["steadfast", "protective", "broad"],
        description: "A mountain ridge. Stands unmoved while seasons and opinions pass over it.",
    },
    HeavenlyStem {
        glyph: "己",
        element: Element::Earth,
        polarity: Polarity::Yin,
        keywords: &["nurturing", "practical", "modest"],
        description: "Tilled field soil. Accepts every seed and patiently turns it into harvest.",
    },
    HeavenlyStem {
        glyph: "庚",
        element: Element::Metal,
        polarity: Polarity::Yang,
        keywords: &["decisive", "just", "tempered"],
        description: "Raw sword steel. Cuts cleanly and grows sharper under hard use.",
    },
    HeavenlyStem {
        glyph: "辛",
        element: Element::Metal,
        polarity: Polarity::Yin,
        keywords: &["refined", "precise", "proud"],
        description: "A finished jewel. Small, polished, and unwilling to settle for almost.",
    },
    HeavenlyStem {
        glyph: "壬",
        element: Element::Water,
        polarity: Polarity::Yang,
        keywords: &["expansive", "daring", "restless"],
        description: "The open ocean. Vast ambitions, strong currents, no interest in staying still.",
    },
    HeavenlyStem {
        glyph: "癸",
        element: Element::Water,
        polarity: Polarity::Yin,
        keywords: &["intuitive", "gentle", "persistent"],
        description: "Night rain. Soaks in unseen and changes the landscape by morning.",
    },
];

/// Day count since 1970-01-01 in the proleptic Gregorian calendar.
/// Pure integer arithmetic, total for any (year, month, day) triple.
pub const fn day_number(year: i32, month: u32, day: u32) -> i64 {
    let y = (if month <= 2 { year - 1 } else { year }) as i64;
    let m = month as i64;
    let d = day as i64;
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Anchor of the stem cycle: 1900-01-01 (a 甲戌 day).
const EPOCH_DAY: i64 = day_number(1900, 1, 1);

/// Signed day distance from the cycle anchor.
pub fn days_since_epoch(date: &BirthDate) -> i64 {
    day_number(date.year, date.month, date.day) - EPOCH_DAY
}

pub fn day_stem_index(date: &BirthDate) -> usize {
    days_since_epoch(date).rem_euclid(10) as usize
}

pub fn day_stem(date: &BirthDate) -> &'static HeavenlyStem {
    &HEAVENLY_STEMS[day_stem_index(date)]
}
