pub mod config;
pub mod fortune;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::config::DiagnosisConfig;
use crate::fortune::{FortuneDiagnosis, FortuneEngine};
use crate::scoring::{FusionScorer, QuestionnaireResult, QuestionnaireScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DreamType {
    Phoenix,
    Kitsune,
    Pegasus,
    Elephant,
    Deer,
    Dragon,
    Turtle,
    Shark,
    Wolf,
}

impl DreamType {
    pub const ALL: [DreamType; 9] = [
        DreamType::Phoenix,
        DreamType::Kitsune,
        DreamType::Pegasus,
        DreamType::Elephant,
        DreamType::Deer,
        DreamType::Dragon,
        DreamType::Turtle,
        DreamType::Shark,
        DreamType::Wolf,
    ];

    pub fn id(self) -> &'static str {
        self.profile().id
    }

    /// Fixed total order used by every tie-break. Lower rank wins.
    pub fn priority_rank(self) -> usize {
        match self {
            DreamType::Phoenix => 0,
            DreamType::Dragon => 1,
            DreamType::Kitsune => 2,
            DreamType::Pegasus => 3,
            DreamType::Wolf => 4,
            DreamType::Deer => 5,
            DreamType::Elephant => 6,
            DreamType::Shark => 7,
            DreamType::Turtle => 8,
        }
    }

    pub fn element(self) -> Element {
        self.profile().element
    }

    pub fn profile(self) -> &'static DreamTypeProfile {
        match self {
            DreamType::Phoenix => &PROFILES[0],
            DreamType::Kitsune => &PROFILES[1],
            DreamType::Pegasus => &PROFILES[2],
            DreamType::Elephant => &PROFILES[3],
            DreamType::Deer => &PROFILES[4],
            DreamType::Dragon => &PROFILES[5],
            DreamType::Turtle => &PROFILES[6],
            DreamType::Shark => &PROFILES[7],
            DreamType::Wolf => &PROFILES[8],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DreamTypeProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub element: Element,
    pub icon: &'static str,
    pub color: &'static str,
    pub keywords: &'static [&'static str],
    pub strengths: &'static [&'static str],
    pub advice: &'static str,
}

pub const PROFILES: [DreamTypeProfile; 9] = [
    DreamTypeProfile {
        id: "phoenix",
        display_name: "Phoenix",
        element: Element::Fire,
        icon: "🔥",
        color: "#e85d3a",
        keywords: &["rebirth", "ambition", "radiance"],
        strengths: &[
            "Turns setbacks into fuel",
            "Inspires the people around them",
            "Commits fully once a goal is chosen",
        ],
        advice: "Your dreams burn brightest after a failure. Let one project end completely before you light the next one.",
    },
    DreamTypeProfile {
        id: "kitsune",
        display_name: "Kitsune",
        element: Element::Fire,
        icon: "🦊",
        color: "#f2a03d",
        keywords: &["wit", "transformation", "curiosity"],
        strengths: &[
            "Reads a room in seconds",
            "Finds the unconventional route",
            "Learns new skills for the joy of it",
        ],
        advice: "You shapeshift to fit every audience. Keep one dream that belongs only to you, untouched by applause.",
    },
    DreamTypeProfile {
        id: "pegasus",
        display_name: "Pegasus",
        element: Element::Wood,
        icon: "🪽",
        color: "#7fb4e8",
        keywords: &["freedom", "imagination", "ascent"],
        strengths: &[
            "Sees the horizon others miss",
            "Moves fast once inspired",
            "Refuses to be fenced in",
        ],
        advice: "Altitude is your habitat, but landings make the journey real. Pick one idea this season and carry it to the ground.",
    },
    DreamTypeProfile {
        id: "elephant",
        display_name: "Elephant",
        element: Element::Earth,
        icon: "🐘",
        color: "#9a8f7a",
        keywords: &["memory", "loyalty", "patience"],
        strengths: &[
            "Never forgets a promise",
            "Carries weight without complaint",
            "Builds things that outlast trends",
        ],
        advice: "You carry everyone's burdens along with your own. Set one load down each week and walk lighter toward your dream.",
    },
    DreamTypeProfile {
        id: "deer",
        display_name: "Deer",
        element: Element::Wood,
        icon: "🦌",
        color: "#a7c48a",
        keywords: &["grace", "sensitivity", "renewal"],
        strengths: &[
            "Notices small changes early",
            "Moves gently through conflict",
            "Grows back stronger every spring",
        ],
        advice: "Your quiet attentiveness is a compass. Trust the first flicker of unease and step toward what feels alive.",
    },
    DreamTypeProfile {
        id: "dragon",
        display_name: "Dragon",
        element: Element::Metal,
        icon: "🐉",
        color: "#6d7fb3",
        keywords: &["power", "vision", "storm"],
        strengths: &[
            "Thinks in decades, not days",
            "Unafraid of large stakes",
            "Rallies others behind a banner",
        ],
        advice: "Great weather follows you, calm and storm alike. Tell the people closest to you which season they are in.",
    },
    DreamTypeProfile {
        id: "turtle",
        display_name: "Turtle",
        element: Element::Earth,
        icon: "🐢",
        color: "#5e8f6e",
        keywords: &["endurance", "wisdom", "shelter"],
        strengths: &[
            "Outlasts every rival",
            "Keeps a calm center under pressure",
            "Knows when not to move",
        ],
        advice: "Slowness is your strategy, not your flaw. Announce your pace out loud so no one mistakes patience for absence.",
    },
    DreamTypeProfile {
        id: "shark",
        display_name: "Shark",
        element: Element::Water,
        icon: "🦈",
        color: "#4a7e9c",
        keywords: &["instinct", "momentum", "depth"],
        strengths: &[
            "Acts the moment others hesitate",
            "Senses opportunity from far away",
            "Keeps moving through dark water",
        ],
        advice: "Forward is the only direction you know. Schedule still water on purpose, and let a dream catch up with you.",
    },
    DreamTypeProfile {
        id: "wolf",
        display_name: "Wolf",
        element: Element::Metal,
        icon: "🐺",
        color: "#8d93a6",
        keywords: &["pack", "instinct", "devotion"],
        strengths: &[
            "Fierce on behalf of their people",
            "Thrives on shared goals",
            "Communicates without words",
        ],
        advice: "You run strongest in a pack, yet your dream has a solo stretch. Walk it alone and bring the story back home.",
    },
];

/// Complete score mapping over the nine dream types. Always carries all
/// nine keys; entries are non-negative accumulations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub phoenix: f64,
    pub kitsune: f64,
    pub pegasus: f64,
    pub elephant: f64,
    pub deer: f64,
    pub dragon: f64,
    pub turtle: f64,
    pub shark: f64,
    pub wolf: f64,
}

impl ScoreVector {
    pub fn get(&self, dream_type: DreamType) -> f64 {
        match dream_type {
            DreamType::Phoenix => self.phoenix,
            DreamType::Kitsune => self.kitsune,
            DreamType::Pegasus => self.pegasus,
            DreamType::Elephant => self.elephant,
            DreamType::Deer => self.deer,
            DreamType::Dragon => self.dragon,
            DreamType::Turtle => self.turtle,
            DreamType::Shark => self.shark,
            DreamType::Wolf => self.wolf,
        }
    }

    pub fn add(&mut self, dream_type: DreamType, points: f64) {
        let slot = match dream_type {
            DreamType::Phoenix => &mut self.phoenix,
            DreamType::Kitsune => &mut self.kitsune,
            DreamType::Pegasus => &mut self.pegasus,
            DreamType::Elephant => &mut self.elephant,
            DreamType::Deer => &mut self.deer,
            DreamType::Dragon => &mut self.dragon,
            DreamType::Turtle => &mut self.turtle,
            DreamType::Shark => &mut self.shark,
            DreamType::Wolf => &mut self.wolf,
        };
        *slot += points;
    }

    /// Entries in catalog order, all nine keys present.
    pub fn entries(&self) -> [(DreamType, f64); 9] {
        [
            (DreamType::Phoenix, self.phoenix),
            (DreamType::Kitsune, self.kitsune),
            (DreamType::Pegasus, self.pegasus),
            (DreamType::Elephant, self.elephant),
            (DreamType::Deer, self.deer),
            (DreamType::Dragon, self.dragon),
            (DreamType::Turtle, self.turtle),
            (DreamType::Shark, self.shark),
            (DreamType::Wolf, self.wolf),
        ]
    }

    pub fn max_score(&self) -> f64 {
        self.entries()
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: u32,
    pub answer_id: Option<String>,
    pub text_answer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DiagnosisInput {
    pub name: Option<String>,
    pub birth_date: BirthDate,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisOutput {
    pub dream_type: DreamType,
    pub questionnaire: QuestionnaireResult,
    pub fortune: FortuneDiagnosis,
    pub combined_scores: ScoreVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub message: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmTrace {
    pub model: String,
    pub latency_ms: u128,
    pub prompt_summary: String,
    pub prompt: String,
    pub raw_response: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

fn load_diagnosis_config() -> DiagnosisConfig {
    DiagnosisConfig::load(None)
        .map(|(config, _)| config)
        .unwrap_or_default()
}

pub fn diagnose(input: &DiagnosisInput) -> DiagnosisOutput {
    let config = load_diagnosis_config();
    diagnose_with_config(input, &config)
}

pub fn diagnose_with_config(input: &DiagnosisInput, config: &DiagnosisConfig) -> DiagnosisOutput {
    let questionnaire = QuestionnaireScorer::new().score(&input.answers);
    let fortune = FortuneEngine::new(config.fortune.clone()).diagnose(&input.birth_date);

    let fusion = FusionScorer::new(config.fusion.clone());
    let (dream_type, combined_scores) =
        fusion.fuse(&questionnaire.scores, &fortune.dream_type.all_scores);

    DiagnosisOutput {
        dream_type,
        questionnaire,
        fortune,
        combined_scores,
    }
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
