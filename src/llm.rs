use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::{Duration, Instant};

use dream_gacha::config::LlmConfig;
use dream_gacha::{DiagnosisOutput, LlmMessage, LlmTrace};

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_highlights: usize,
}

pub struct ComposedMessage {
    pub message: LlmMessage,
    pub trace: LlmTrace,
}

impl LlmClient {
    pub fn from_env(model_override: Option<String>, config: &LlmConfig) -> Option<Self> {
        let api_key = env::var("LLM_API_KEY").ok()?;
        let api_base =
            env::var("LLM_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = model_override
            .or_else(|| env::var("LLM_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            api_base,
            model,
            max_highlights: config.max_highlights,
        })
    }

    pub async fn compose_message(
        &self,
        name: Option<&str>,
        output: &DiagnosisOutput,
    ) -> Result<ComposedMessage, String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let prompt = build_reading_prompt(name, output);
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: 0.7,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.clone(),
                },
            ],
        };

        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| format!("LLM request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| String::new());
            let detail = error_body.trim();
            if detail.is_empty() {
                return Err(format!("LLM API error: {}", status));
            }
            return Err(format!("LLM API error: {} {}", status, detail));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| format!("LLM response parse failed: {}", err))?;
        let latency_ms = started.elapsed().as_millis();

        let content = body
            .choices
            .first()
            .ok_or_else(|| "LLM response missing choices".to_string())?
            .message
            .content
            .trim()
            .to_string();

        let json = extract_json(&content).ok_or_else(|| "LLM response missing JSON".to_string())?;
        let mut message: LlmMessage = serde_json::from_str(&json)
            .map_err(|err| format!("LLM JSON parse failed: {}", err))?;

        message.message = message.message.trim().to_string();
        if message.message.is_empty() {
            return Err("LLM returned an empty message".to_string());
        }
        message.highlights = message
            .highlights
            .into_iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .take(self.max_highlights)
            .collect();

        let profile = output.dream_type.profile();
        let trace = LlmTrace {
            model: self.model.clone(),
            latency_ms,
            prompt_summary: format!(
                "{} reading for {}",
                profile.display_name,
                name.unwrap_or("a guest")
            ),
            prompt,
            raw_response: content,
            prompt_tokens: body.usage.as_ref().and_then(|usage| usage.prompt_tokens),
            completion_tokens: body
                .usage
                .as_ref()
                .and_then(|usage| usage.completion_tokens),
            total_tokens: body.usage.as_ref().and_then(|usage| usage.total_tokens),
        };

        Ok(ComposedMessage { message, trace })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

fn system_prompt() -> String {
    let prompt = r#"You are a warm, concise fortune writer for a dream-type diagnosis.
Return a single JSON object with these fields:
- message (string, 3-5 sentences, second person, no emoji)
- highlights (array of 2-4 short phrases suitable as card captions)
Rules:
- Output JSON only, no markdown or commentary.
- Ground every sentence in the reading provided; never invent new facts.
"#;
    prompt.to_string()
}

fn build_reading_prompt(name: Option<&str>, output: &DiagnosisOutput) -> String {
    let profile = output.dream_type.profile();
    let bazi = &output.fortune.bazi;
    let star = &output.fortune.kyusei;
    let numerology = &output.fortune.numerology;

    format!(
        "Name: {}\nDream type: {} ({} element)\nKeywords: {}\nStrengths: {}\nAdvice: {}\n\
         Four pillars: year {} / month {} / day {}\n\
         Element balance: wood {} fire {} earth {} metal {} water {}\n\
         Nine star: {} — {}\nLife path {}: {} — {}",
        name.unwrap_or("a guest"),
        profile.display_name,
        profile.element.label(),
        profile.keywords.join(", "),
        profile.strengths.join("; "),
        profile.advice,
        bazi.year_pillar,
        bazi.month_pillar,
        bazi.day_pillar,
        bazi.element_balance.wood,
        bazi.element_balance.fire,
        bazi.element_balance.earth,
        bazi.element_balance.metal,
        bazi.element_balance.water,
        star.name,
        star.character,
        numerology.number,
        numerology.name,
        numerology.mission,
    )
}

fn extract_json(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(text[start..=end].to_string())
}
