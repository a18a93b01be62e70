use serde::{Deserialize, Serialize};

use dream_gacha::fortune::{FourPillars, LifePath, NineStar};
use dream_gacha::scoring::{find_question, QuestionKind, QUESTION_BANK};
use dream_gacha::{
    BirthDate, DiagnosisInput, DiagnosisOutput, LlmMessage, LlmTrace, QuizAnswer, ScoreVector,
};

#[derive(Debug, Deserialize)]
pub struct ApiBirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApiQuizAnswer {
    pub question_id: u32,
    pub answer_id: Option<String>,
    pub text_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiDiagnosisRequest {
    pub name: Option<String>,
    pub birth_date: Option<ApiBirthDate>,
    pub answers: Option<Vec<ApiQuizAnswer>>,
    pub request_id: Option<String>,
    pub use_ai: Option<bool>,
}

impl ApiDiagnosisRequest {
    /// Boundary validation lives here; the scoring core assumes its inputs
    /// were checked.
    pub fn into_input(self) -> Result<DiagnosisInput, String> {
        let birth_date = self
            .birth_date
            .ok_or_else(|| "birth_date is required".to_string())?;
        if !(1..=12).contains(&birth_date.month) {
            return Err(format!("invalid month (1-12): {}", birth_date.month));
        }
        if !(1..=31).contains(&birth_date.day) {
            return Err(format!("invalid day (1-31): {}", birth_date.day));
        }

        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let answers = self
            .answers
            .unwrap_or_default()
            .into_iter()
            .map(|answer| QuizAnswer {
                question_id: answer.question_id,
                answer_id: answer.answer_id,
                text_answer: answer.text_answer,
            })
            .collect();

        Ok(DiagnosisInput {
            name,
            birth_date: BirthDate {
                year: birth_date.year,
                month: birth_date.month,
                day: birth_date.day,
            },
            answers,
        })
    }
}

/// Unknown references score zero in the core; the API surfaces them as
/// warnings so a misconfigured quiz front end shows up quickly.
pub fn answer_warnings(input: &DiagnosisInput) -> Vec<String> {
    let mut warnings = Vec::new();
    for answer in &input.answers {
        match find_question(answer.question_id) {
            None => warnings.push(format!("unknown question id: {}", answer.question_id)),
            Some(question) if question.kind == QuestionKind::Choice => {
                if let Some(answer_id) = answer.answer_id.as_deref() {
                    if !question.options.iter().any(|option| option.id == answer_id) {
                        warnings.push(format!(
                            "unknown option '{}' for question {}",
                            answer_id, answer.question_id
                        ));
                    }
                }
            }
            Some(_) => {}
        }
    }
    warnings
}

#[derive(Debug, Serialize)]
pub struct ApiQuestionOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ApiQuestion {
    pub id: u32,
    pub kind: String,
    pub prompt: String,
    pub options: Vec<ApiQuestionOption>,
}

/// The quiz as shown to players; point awards stay server-side.
pub fn question_catalog() -> Vec<ApiQuestion> {
    QUESTION_BANK
        .iter()
        .map(|question| ApiQuestion {
            id: question.id,
            kind: match question.kind {
                QuestionKind::Choice => "choice".to_string(),
                QuestionKind::Text => "text".to_string(),
            },
            prompt: question.prompt.to_string(),
            options: question
                .options
                .iter()
                .map(|option| ApiQuestionOption {
                    id: option.id.to_string(),
                    label: option.label.to_string(),
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ApiDiagnosisResponse {
    pub request_id: String,
    pub dream_type: String,
    pub display_name: String,
    pub element: String,
    pub icon: String,
    pub color: String,
    pub keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub advice: String,
    pub questionnaire_top: String,
    pub questionnaire_scores: ScoreVector,
    pub fortune_primary: String,
    pub fortune_secondary: String,
    pub fortune_scores: ScoreVector,
    pub combined_scores: ScoreVector,
    pub bazi: FourPillars,
    pub kyusei: NineStar,
    pub numerology: LifePath,
    pub message: Option<LlmMessage>,
    pub llm_trace: Option<LlmTrace>,
    pub warnings: Vec<String>,
}

impl ApiDiagnosisResponse {
    pub fn from_output(
        output: DiagnosisOutput,
        message: Option<LlmMessage>,
        llm_trace: Option<LlmTrace>,
        warnings: Vec<String>,
        request_id: String,
    ) -> Self {
        let profile = output.dream_type.profile();
        Self {
            request_id,
            dream_type: profile.id.to_string(),
            display_name: profile.display_name.to_string(),
            element: profile.element.label().to_string(),
            icon: profile.icon.to_string(),
            color: profile.color.to_string(),
            keywords: profile.keywords.iter().map(|k| k.to_string()).collect(),
            strengths: profile.strengths.iter().map(|s| s.to_string()).collect(),
            advice: profile.advice.to_string(),
            questionnaire_top: output.questionnaire.top.id().to_string(),
            questionnaire_scores: output.questionnaire.scores,
            fortune_primary: output.fortune.dream_type.primary.id().to_string(),
            fortune_secondary: output.fortune.dream_type.secondary.id().to_string(),
            fortune_scores: output.fortune.dream_type.all_scores.clone(),
            combined_scores: output.combined_scores,
            bazi: output.fortune.bazi,
            kyusei: output.fortune.kyusei,
            numerology: output.fortune.numerology,
            message,
            llm_trace,
            warnings,
        }
    }
}
