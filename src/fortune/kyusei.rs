use serde::Serialize;

use crate::Element;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NineStar {
    pub number: u8,
    pub name: &'static str,
    pub element: Element,
    pub character: &'static str,
}

pub const NINE_STARS: [NineStar; 9] = [
    NineStar {
        number: 1,
        name: "One White Water",
        element: Element::Water,
        character: "Adaptable and deep. Flows around obstacles, absorbs hardship quietly, and carves canyons given time.",
    },
    NineStar {
        number: 2,
        name: "Two Black Earth",
        element: Element::Earth,
        character: "Nurturing and methodical. The one who shows up early, feeds everyone, and finishes what others start.",
    },
    NineStar {
        number: 3,
        name: "Three Jade Wood",
        element: Element::Wood,
        character: "Thunder in spring. Bursts with first moves and loud beginnings; patience arrives later, if at all.",
    },
    NineStar {
        number: 4,
        name: "Four Green Wood",
        element: Element::Wood,
        character: "Wind through branches. Gentle, persuasive, and sociable; carries seeds of ideas into distant fields.",
    },
    NineStar {
        number: 5,
        name: "Five Yellow Earth",
        element: Element::Earth,
        character: "The center of the board. Gravity itself; everything orbits them whether they ask for it or not.",
    },
    NineStar {
        number: 6,
        name: "Six White Metal",
        element: Element::Metal,
        character: "Heaven's discipline. Principled, exacting, and happiest with a code of conduct and a summit to take.",
    },
    NineStar {
        number: 7,
        name: "Seven Red Metal",
        element: Element::Metal,
        character: "The lake at dusk. Charming, playful, persuasive; wins the room first and the argument second.",
    },
    NineStar {
        number: 8,
        name: "Eight White Earth",
        element: Element::Earth,
        character: "The still mountain. Accumulates slowly, changes rarely, and moves decisively when it finally does.",
    },
    NineStar {
        number: 9,
        name: "Nine Purple Fire",
        element: Element::Fire,
        character: "The brilliant flame. Expressive, passionate, and visible from far away; burns hottest mid-performance.",
    },
];

/// The traditional solar year begins at risshun, in early February. The
/// calculator works at month precision, so the boundary is rounded to whole
/// months: January belongs to the previous year's star, February does not.
const FIRST_SOLAR_MONTH: u32 = 2;

/// Star for a birth year and month. The year's digits are reduced to a
/// single digit and subtracted from 11; 10 wraps to 1 (e.g. 2000 → 2 →
/// Nine Purple, 1990 → 1 → One White).
pub fn star_for(year: i32, month: u32) -> &'static NineStar {
    let effective_year = if month < FIRST_SOLAR_MONTH {
        year - 1
    } else {
        year
    };

    let reduced = reduce_to_single_digit(effective_year.unsigned_abs() as u64);
    let mut number = 11 - reduced as i64;
    if number > 9 {
        number -= 9;
    }

    &NINE_STARS[(number - 1) as usize]
}

fn reduce_to_single_digit(mut value: u64) -> u64 {
    while value > 9 {
        value = digit_sum(value);
    }
    value
}

fn digit_sum(mut value: u64) -> u64 {
    let mut sum = 0;
    while value > 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}
