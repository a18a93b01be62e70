use serde::Serialize;

use crate::BirthDate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifePath {
    pub number: u32,
    pub name: &'static str,
    pub mission: &'static str,
}

pub const LIFE_PATHS: [LifePath; 12] = [
    LifePath {
        number: 1,
        name: "The Pioneer",
        mission: "Go first. Your dreams ask you to start things nobody has dared to start and to stand alone long enough for others to follow.",
    },
    LifePath {
        number: 2,
        name: "The Mediator",
        mission: "Hold the middle. You are here to weave partnerships and soften edges; your dream comes true through another person's hands too.",
    },
    LifePath {
        number: 3,
        name: "The Storyteller",
        mission: "Say it out loud. Joy, humor, and expression are not decoration on your path; they are the path.",
    },
    LifePath {
        number: 4,
        name: "The Builder",
        mission: "Lay foundations. Your calling is the patient architecture of real things: schedules, houses, institutions, trust.",
    },
    LifePath {
        number: 5,
        name: "The Adventurer",
        mission: "Keep moving. Freedom is your raw material; turn restlessness into exploration instead of escape.",
    },
    LifePath {
        number: 6,
        name: "The Guardian",
        mission: "Tend the hearth. Responsibility finds you early; your dream ripens inside the care you give a home, a team, a garden.",
    },
    LifePath {
        number: 7,
        name: "The Seeker",
        mission: "Go deeper. Solitude and study are not loneliness for you; they are where your answers have been waiting.",
    },
    LifePath {
        number: 8,
        name: "The Achiever",
        mission: "Wield power well. Ambition, money, and influence pass through your hands; your work is to aim them at something worthy.",
    },
    LifePath {
        number: 9,
        name: "The Humanitarian",
        mission: "Give it away. Your path completes a long cycle; what you have gathered is meant to be handed on.",
    },
    LifePath {
        number: 11,
        name: "The Illuminator",
        mission: "Carry the lantern. You sense what others cannot yet see; your task is to translate intuition into something people can use.",
    },
    LifePath {
        number: 22,
        name: "The Master Builder",
        mission: "Dream in stone. You can take the most improbable vision and give it walls, beams, and a front door.",
    },
    LifePath {
        number: 33,
        name: "The Master Teacher",
        mission: "Raise everyone. Your fulfillment arrives through lifting others; teaching is how your own dream breathes.",
    },
];

/// Digit-sum reduction of the birth date. Intermediate sums of 11, 22, or
/// 33 stop the reduction and are kept as master numbers.
pub fn life_path_number(date: &BirthDate) -> u32 {
    let total = digit_sum(date.year.unsigned_abs() as u64)
        + digit_sum(date.month as u64)
        + digit_sum(date.day as u64);
    reduce(total) as u32
}

pub fn life_path_profile(number: u32) -> &'static LifePath {
    LIFE_PATHS
        .iter()
        .find(|path| path.number == number)
        .unwrap_or(&LIFE_PATHS[0])
}

fn reduce(mut value: u64) -> u64 {
    while value > 9 && !is_master(value) {
        value = digit_sum(value);
    }
    value
}

fn is_master(value: u64) -> bool {
    matches!(value, 11 | 22 | 33)
}

fn digit_sum(mut value: u64) -> u64 {
    let mut sum = 0;
    while value > 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}
