pub mod fusion;
pub mod questionnaire;
pub mod questions;

pub use fusion::FusionScorer;
pub use questionnaire::{QuestionnaireResult, QuestionnaireScorer};
pub use questions::{find_question, AnswerOption, Question, QuestionKind, QUESTION_BANK};
