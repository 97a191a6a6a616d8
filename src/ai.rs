use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::models::{AnalysisResult, ChatTurn, ResumeDocument, Speaker};

/// Environment variable holding the service credential. Read once at startup;
/// absence degrades every operation instead of crashing.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const DEFAULT_FAST_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_DEEP_MODEL: &str = "gemini-3-pro-preview";

/// How much of a job description is embedded in the interviewer persona.
const PERSONA_DESCRIPTION_LIMIT: usize = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const KEY_MISSING_SUMMARY: &str =
    "API key missing — set GEMINI_API_KEY to enable AI features.";
pub const SUMMARY_FAILED: &str = "Failed to generate summary. Please try again.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API key missing (set {API_KEY_VAR})")]
    MissingCredential,
    #[error("AI service request failed: {0}")]
    Service(String),
    #[error("AI response did not match the expected shape: {0}")]
    Schema(String),
}

/// Which configured model a request should hit. The fast tier serves text
/// generation and chat; the deep tier serves the schema-validated analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Fast,
    Deep,
}

// --- Provider trait ---

pub trait Provider {
    fn complete(&self, tier: ModelTier, prompt: &str) -> Result<String, GatewayError>;

    fn complete_structured(
        &self,
        tier: ModelTier,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GatewayError>;

    fn chat(
        &self,
        system: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, GatewayError>;
}

// --- Gemini provider ---

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

pub struct GeminiProvider {
    api_key: String,
    fast_model: String,
    deep_model: String,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, fast_model: String, deep_model: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            api_key,
            fast_model,
            deep_model,
            client,
        }
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Deep => &self.deep_model,
        }
    }

    fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String, GatewayError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .map_err(|e| GatewayError::Service(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GatewayError::Service(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(GatewayError::Service(extract_api_error(status, &body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Service(format!("unreadable response body: {e}")))?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GatewayError::Service("no content in response".to_string()));
        }
        Ok(text)
    }
}

/// Pull the human-readable message out of an API error body when possible.
fn extract_api_error(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = v["error"]["message"].as_str() {
            return msg.to_string();
        }
    }
    format!("HTTP {status}: {body}")
}

impl Provider for GeminiProvider {
    fn complete(&self, tier: ModelTier, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: None,
        };
        self.generate(self.model_for(tier), &request)
    }

    fn complete_structured(
        &self,
        tier: ModelTier,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };
        self.generate(self.model_for(tier), &request)
    }

    fn chat(
        &self,
        system: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, GatewayError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: turn.speaker.wire_role(),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Speaker::User.wire_role(),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let request = GenerateRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            }),
            generation_config: None,
        };
        self.generate(self.model_for(ModelTier::Fast), &request)
    }
}

// --- Conversation handle ---

/// Accumulated context of one multi-turn interview. Only real exchanges enter
/// the history; fallback text shown to the user never does.
pub struct Conversation {
    system: String,
    history: Vec<ChatTurn>,
}

impl Conversation {
    fn new(system: String) -> Self {
        Self {
            system,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }
}

// --- Gateway ---

/// Sole boundary between application state and the generative-language
/// service. Text-generation operations degrade to fallback strings; the
/// schema-validated analysis and session start fail loudly.
pub struct Gateway {
    provider: Option<Box<dyn Provider>>,
}

impl Gateway {
    /// Reads the credential from the environment. A missing key yields a
    /// gateway whose operations degrade per their individual policies.
    pub fn from_env(fast_model: String, deep_model: String) -> Self {
        let provider = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                Box::new(GeminiProvider::new(key, fast_model, deep_model)) as Box<dyn Provider>
            });
        Self { provider }
    }

    pub fn with_provider(provider: Box<dyn Provider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn disconnected() -> Self {
        Self { provider: None }
    }

    pub fn has_credentials(&self) -> bool {
        self.provider.is_some()
    }

    /// Best effort: returns a sentinel on a missing key and a user-facing
    /// fallback on service failure. Never fails.
    pub fn generate_summary(&self, document: &ResumeDocument) -> String {
        let Some(provider) = self.provider.as_deref() else {
            return KEY_MISSING_SUMMARY.to_string();
        };
        match provider.complete(ModelTier::Fast, &summary_prompt(document)) {
            Ok(text) => text.trim().to_string(),
            Err(_) => SUMMARY_FAILED.to_string(),
        }
    }

    /// Best effort: the input comes back unchanged on any failure, so the
    /// caller can never lose the text it already had.
    pub fn enhance_bullet(&self, text: &str) -> String {
        let Some(provider) = self.provider.as_deref() else {
            return text.to_string();
        };
        match provider.complete(ModelTier::Fast, &enhance_prompt(text)) {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            _ => text.to_string(),
        }
    }

    /// Schema-validated: fails loudly so the caller can show an explicit
    /// error instead of stale or partial results.
    pub fn analyze_match(
        &self,
        document: &ResumeDocument,
        job_description: &str,
    ) -> Result<AnalysisResult, GatewayError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let resume_text = serde_json::to_string(document)
            .map_err(|e| GatewayError::Schema(format!("failed to serialize resume: {e}")))?;
        let prompt = analyze_prompt(&resume_text, job_description);

        let reply = provider.complete_structured(ModelTier::Deep, &prompt, analysis_schema())?;
        parse_analysis(&reply)
    }

    /// Opens a multi-turn context with the hiring-manager persona. Fails
    /// loudly on a missing credential; the caller blocks session start.
    pub fn start_interview(&self, job_description: &str) -> Result<Conversation, GatewayError> {
        if self.provider.is_none() {
            return Err(GatewayError::MissingCredential);
        }
        Ok(Conversation::new(interviewer_persona(job_description)))
    }

    /// One user turn against the accumulated conversation. On success both
    /// sides of the exchange join the history; on failure the history is left
    /// exactly as it was.
    pub fn interview_turn(
        &self,
        conversation: &mut Conversation,
        message: &str,
    ) -> Result<String, GatewayError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let reply = provider.chat(&conversation.system, &conversation.history, message)?;
        conversation.history.push(ChatTurn::user(message));
        conversation.history.push(ChatTurn::assistant(reply.clone()));
        Ok(reply)
    }
}

// --- Prompts and schema ---

fn summary_prompt(document: &ResumeDocument) -> String {
    let experience = document
        .experience
        .iter()
        .map(|e| format!("{} at {}: {}", e.role, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following professional experience and skills, write a compelling, \
         professional summary (3-4 sentences) for a resume.\n\n\
         Experience:\n{}\n\n\
         Skills: {}\n\n\
         Keep it impactful, ATS-friendly, and professional.",
        experience,
        document.skills.join(", ")
    )
}

fn enhance_prompt(text: &str) -> String {
    format!(
        "Rewrite the following resume bullet point to be more professional, \
         action-oriented, and impactful. Use strong action verbs and quantify results \
         if implied. Keep it concise. Return only the rewritten text.\n\n\
         Original: \"{}\"",
        text
    )
}

fn analyze_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "Analyze the compatibility between this resume and the job description.\n\n\
         Resume: {}\n\n\
         Job Description: {}\n\n\
         Provide a compatibility score, missing keywords, and specific suggestions.",
        resume_text, job_description
    )
}

/// Required output shape for the analysis call, declared to the service so
/// the response comes back as JSON matching `AnalysisResult`.
fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "NUMBER",
                "description": "Compatibility score from 0 to 100"
            },
            "missingKeywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Important keywords from the job description missing in the resume"
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Actionable advice to improve the resume for this job"
            },
            "summary": {
                "type": "STRING",
                "description": "A brief analysis summary"
            }
        },
        "required": ["score", "missingKeywords", "suggestions", "summary"]
    })
}

fn parse_analysis(text: &str) -> Result<AnalysisResult, GatewayError> {
    let result: AnalysisResult = serde_json::from_str(text.trim())
        .map_err(|e| GatewayError::Schema(e.to_string()))?;
    if !(0.0..=100.0).contains(&result.score) {
        return Err(GatewayError::Schema(format!(
            "score {} outside 0-100",
            result.score
        )));
    }
    Ok(result)
}

fn interviewer_persona(job_description: &str) -> String {
    format!(
        "You are a professional hiring manager interviewing a candidate for a job with \
         the following description: \"{}...\". \
         Start by asking a relevant question. Wait for the user's response. \
         After the user responds, briefly evaluate their answer (constructive feedback), \
         then ask the next question. Keep the tone professional but encouraging.",
        truncate_chars(job_description, PERSONA_DESCRIPTION_LIMIT)
    )
}

/// Truncate on a char boundary; byte slicing would panic mid-codepoint.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Experience;

    struct CannedProvider {
        reply: Result<String, ()>,
    }

    impl CannedProvider {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self { reply: Err(()) }
        }

        fn answer(&self) -> Result<String, GatewayError> {
            self.reply
                .clone()
                .map_err(|_| GatewayError::Service("boom".into()))
        }
    }

    impl Provider for CannedProvider {
        fn complete(&self, _tier: ModelTier, _prompt: &str) -> Result<String, GatewayError> {
            self.answer()
        }

        fn complete_structured(
            &self,
            _tier: ModelTier,
            _prompt: &str,
            _schema: Value,
        ) -> Result<String, GatewayError> {
            self.answer()
        }

        fn chat(
            &self,
            _system: &str,
            _history: &[ChatTurn],
            _message: &str,
        ) -> Result<String, GatewayError> {
            self.answer()
        }
    }

    fn sample_document() -> ResumeDocument {
        ResumeDocument {
            full_name: "Ada".into(),
            skills: vec!["Rust".into(), "SQL".into()],
            experience: vec![Experience {
                id: "e1".into(),
                company: "Acme".into(),
                role: "Engineer".into(),
                description: "Built things".into(),
                ..Experience::default()
            }],
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_summary_prompt_embeds_experience_and_skills() {
        let prompt = summary_prompt(&sample_document());
        assert!(prompt.contains("Engineer at Acme: Built things"));
        assert!(prompt.contains("Rust, SQL"));
    }

    #[test]
    fn test_persona_truncates_long_descriptions() {
        let long = "x".repeat(5000);
        let persona = interviewer_persona(&long);
        assert!(persona.contains(&"x".repeat(1000)));
        assert!(!persona.contains(&"x".repeat(1001)));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        let s = "日本語テキスト";
        assert_eq!(truncate_chars(s, 3), "日本語");
        assert_eq!(truncate_chars("short", 1000), "short");
    }

    #[test]
    fn test_parse_analysis_conformant() {
        let text = r#"{"score":82,"missingKeywords":["Kubernetes"],"suggestions":["Add metrics"],"summary":"Good fit"}"#;
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.score, 82.0);
        assert_eq!(result.missing_keywords, vec!["Kubernetes"]);
        assert_eq!(result.suggestions, vec!["Add metrics"]);
        assert_eq!(result.summary, "Good fit");
    }

    #[test]
    fn test_parse_analysis_missing_field_is_schema_error() {
        let text = r#"{"score":82,"suggestions":[],"summary":"Good fit"}"#;
        assert!(matches!(
            parse_analysis(text),
            Err(GatewayError::Schema(_))
        ));
    }

    #[test]
    fn test_parse_analysis_rejects_out_of_range_score() {
        let text = r#"{"score":140,"missingKeywords":[],"suggestions":[],"summary":"?"}"#;
        assert!(matches!(
            parse_analysis(text),
            Err(GatewayError::Schema(_))
        ));
    }

    #[test]
    fn test_disconnected_gateway_degrades_per_policy() {
        let gateway = Gateway::disconnected();
        let document = sample_document();

        assert_eq!(gateway.generate_summary(&document), KEY_MISSING_SUMMARY);
        assert_eq!(gateway.enhance_bullet("shipped stuff"), "shipped stuff");
        assert!(matches!(
            gateway.analyze_match(&document, "any"),
            Err(GatewayError::MissingCredential)
        ));
        assert!(matches!(
            gateway.start_interview("any"),
            Err(GatewayError::MissingCredential)
        ));
    }

    #[test]
    fn test_from_env_with_key_has_credentials() {
        unsafe {
            env::set_var(API_KEY_VAR, "test-key");
        }
        let gateway = Gateway::from_env(
            DEFAULT_FAST_MODEL.to_string(),
            DEFAULT_DEEP_MODEL.to_string(),
        );
        assert!(gateway.has_credentials());
    }

    #[test]
    fn test_summary_falls_back_on_service_error() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::failing()));
        assert_eq!(gateway.generate_summary(&sample_document()), SUMMARY_FAILED);
    }

    #[test]
    fn test_enhance_returns_input_on_service_error() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::failing()));
        assert_eq!(gateway.enhance_bullet("original text"), "original text");
    }

    #[test]
    fn test_enhance_returns_input_on_empty_reply() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::ok("  ")));
        assert_eq!(gateway.enhance_bullet("original text"), "original text");
    }

    #[test]
    fn test_analyze_match_populates_state_exactly() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::ok(
            r#"{"score":82,"missingKeywords":["Kubernetes"],"suggestions":["Add metrics"],"summary":"Good fit"}"#,
        )));
        let result = gateway.analyze_match(&sample_document(), "job text").unwrap();
        assert_eq!(result.score, 82.0);
        assert_eq!(result.missing_keywords, vec!["Kubernetes"]);
    }

    #[test]
    fn test_analyze_match_propagates_schema_violation() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::ok("not json")));
        assert!(matches!(
            gateway.analyze_match(&sample_document(), "job text"),
            Err(GatewayError::Schema(_))
        ));
    }

    #[test]
    fn test_interview_turn_extends_history_in_order() {
        let gateway = Gateway::with_provider(Box::new(CannedProvider::ok("Tell me more.")));
        let mut conversation = gateway.start_interview("We need a Rust engineer").unwrap();

        let reply = gateway
            .interview_turn(&mut conversation, "I led a migration")
            .unwrap();
        assert_eq!(reply, "Tell me more.");

        let history = conversation.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].speaker, Speaker::User);
        assert_eq!(history[0].text, "I led a migration");
        assert_eq!(history[1].speaker, Speaker::Assistant);
        assert_eq!(history[1].text, "Tell me more.");
    }

    #[test]
    fn test_failed_turn_leaves_history_untouched() {
        let started = Gateway::with_provider(Box::new(CannedProvider::ok("hi")));
        let mut conversation = started.start_interview("desc").unwrap();

        let failing = Gateway::with_provider(Box::new(CannedProvider::failing()));
        assert!(failing.interview_turn(&mut conversation, "hello").is_err());
        assert!(conversation.history().is_empty());
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: "hello".into(),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: "persona".into(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: analysis_schema(),
            }),
        };
        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["contents"][0]["role"], "user");
        assert!(v["systemInstruction"]["parts"][0]["text"].is_string());
        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            v["generationConfig"]["responseSchema"]["required"][0],
            "score"
        );
    }

    #[test]
    fn test_plain_request_omits_optional_sections() {
        let request = GenerateRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: None,
        };
        let v = serde_json::to_value(&request).unwrap();
        assert!(v.get("systemInstruction").is_none());
        assert!(v.get("generationConfig").is_none());
    }
}
