use crate::DreamType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Choice,
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct AnswerOption {
    pub id: &'static str,
    pub label: &'static str,
    pub awards: &'static [(DreamType, f64)],
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: u32,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

/// The fixed quiz: eight scored choice questions and two free-text
/// questions. Text answers never contribute points.
pub const QUESTION_BANK: &[Question] = &[
    Question {
        id: 1,
        kind: QuestionKind::Choice,
        prompt: "When you wake from a vivid dream, what lingers?",
        options: &[
            AnswerOption {
                id: "a",
                label: "The urge to chase it right now",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "A detail everyone else would miss",
                awards: &[(DreamType::Deer, 1.0), (DreamType::Kitsune, 1.0)],
            },
            AnswerOption {
                id: "c",
                label: "A map of a place that doesn't exist",
                awards: &[(DreamType::Pegasus, 2.0)],
            },
            AnswerOption {
                id: "d",
                label: "Nothing — I'm already back asleep",
                awards: &[(DreamType::Turtle, 1.0), (DreamType::Elephant, 1.0)],
            },
        ],
    },
    Question {
        id: 2,
        kind: QuestionKind::Choice,
        prompt: "Your dream project gets funded tomorrow. First move?",
        options: &[
            AnswerOption {
                id: "a",
                label: "Call the whole crew together",
                awards: &[(DreamType::Wolf, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "Draft the ten-year plan",
                awards: &[(DreamType::Dragon, 2.0)],
            },
            AnswerOption {
                id: "c",
                label: "Start over from zero, but louder",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "d",
                label: "Quietly pour the foundation first",
                awards: &[(DreamType::Elephant, 1.0), (DreamType::Turtle, 1.0)],
            },
        ],
    },
    Question {
        id: 3,
        kind: QuestionKind::Choice,
        prompt: "Pick a nighttime landscape.",
        options: &[
            AnswerOption {
                id: "a",
                label: "A moonlit open ocean",
                awards: &[(DreamType::Shark, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "A bamboo grove in the rain",
                awards: &[(DreamType::Deer, 2.0)],
            },
            AnswerOption {
                id: "c",
                label: "A volcano glowing on the horizon",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
        ],
    },
    Question {
        id: 4,
        kind: QuestionKind::Choice,
        prompt: "How do you handle a rival?",
        options: &[
            AnswerOption {
                id: "a",
                label: "Outlast them",
                awards: &[(DreamType::Turtle, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "Outsmart them",
                awards: &[(DreamType::Kitsune, 2.0)],
            },
            AnswerOption {
                id: "c",
                label: "Outshine them",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "d",
                label: "Invite them into the pack",
                awards: &[(DreamType::Wolf, 1.0), (DreamType::Elephant, 1.0)],
            },
        ],
    },
    Question {
        id: 5,
        kind: QuestionKind::Choice,
        prompt: "Which compliment lands deepest?",
        options: &[
            AnswerOption {
                id: "a",
                label: "You never gave up",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "You saw it coming",
                awards: &[(DreamType::Shark, 1.0), (DreamType::Deer, 1.0)],
            },
            AnswerOption {
                id: "c",
                label: "You built this for all of us",
                awards: &[(DreamType::Elephant, 2.0)],
            },
            AnswerOption {
                id: "d",
                label: "You made it look effortless",
                awards: &[(DreamType::Pegasus, 1.0), (DreamType::Kitsune, 1.0)],
            },
        ],
    },
    Question {
        id: 6,
        kind: QuestionKind::Choice,
        prompt: "Your ideal morning after a big win?",
        options: &[
            AnswerOption {
                id: "a",
                label: "Already chasing the next summit",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "A long breakfast with everyone who helped",
                awards: &[(DreamType::Wolf, 1.0), (DreamType::Elephant, 1.0)],
            },
            AnswerOption {
                id: "c",
                label: "A solitary walk to let it sink in",
                awards: &[(DreamType::Deer, 1.0), (DreamType::Turtle, 1.0)],
            },
        ],
    },
    Question {
        id: 7,
        kind: QuestionKind::Choice,
        prompt: "A locked door stands between you and the dream.",
        options: &[
            AnswerOption {
                id: "a",
                label: "Find the keyholder and charm them",
                awards: &[(DreamType::Kitsune, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "Burn it down",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "c",
                label: "Fly over the wall instead",
                awards: &[(DreamType::Pegasus, 2.0)],
            },
            AnswerOption {
                id: "d",
                label: "Wait. Doors always open eventually",
                awards: &[(DreamType::Turtle, 2.0)],
            },
        ],
    },
    Question {
        id: 8,
        kind: QuestionKind::Choice,
        prompt: "What should be written on your banner?",
        options: &[
            AnswerOption {
                id: "a",
                label: "Again, from the ashes",
                awards: &[(DreamType::Phoenix, 2.0)],
            },
            AnswerOption {
                id: "b",
                label: "Further than the horizon",
                awards: &[(DreamType::Pegasus, 1.0), (DreamType::Dragon, 1.0)],
            },
            AnswerOption {
                id: "c",
                label: "Steady as stone",
                awards: &[(DreamType::Elephant, 1.0), (DreamType::Turtle, 1.0)],
            },
        ],
    },
    Question {
        id: 9,
        kind: QuestionKind::Text,
        prompt: "Describe the dream you remember most clearly.",
        options: &[],
    },
    Question {
        id: 10,
        kind: QuestionKind::Text,
        prompt: "If one dream had to come true this year, what would it be?",
        options: &[],
    },
];

pub fn find_question(question_id: u32) -> Option<&'static Question> {
    QUESTION_BANK.iter().find(|question| question.id == question_id)
}
