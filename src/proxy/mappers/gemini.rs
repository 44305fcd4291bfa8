// Gemini generateContent wrapping/unwrapping
use serde::Deserialize;
use serde_json::{json, Value};

/// Instruction prompt sent with every request. It pins the exact JSON shape
/// the model must return, including the six feature keys and the tri-state
/// availability values, and forbids markdown fencing in the reply.
pub const SYSTEM_PROMPT: &str = r#"You are an automotive data assistant. The user will provide a car make and model. Find the most accurate, up-to-date information for the Netherlands market using Google Search.
Return *only* a valid JSON object matching this exact structure:
{
  "price": 12345,
  "range": 450,
  "link": "https://www.example.nl",
  "features": {
    "physicalAC": { "available": "true"|"false"|"trim", "note": "Standard" },
    "wirelessCarPlay": { "available": "true"|"false"|"trim", "note": "On Comfort trim" },
    "wirelessCharging": { "available": "true"|"false"|"trim", "note": "Not available" },
    "driverDisplay": { "available": "true"|"false"|"trim", "note": "Standard" },
    "hud": { "available": "true"|"false"|"trim", "note": "Premium pack" },
    "sunroof": { "available": "true"|"false"|"trim", "note": "Premium pack" }
  }
}
Do not include ```json markdown wrappers or any other text before or after the JSON object."#;

/// Build the generateContent request body: the user query as a single content
/// part, search grounding enabled, and the fixed system instruction.
pub fn build_payload(user_query: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": user_query }] }],
        "tools": [{ "google_search": {} }],
        "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] }
    })
}

/// Upstream reply, deserialized defensively: the service may omit any level.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, or `None` if any level is absent.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Strip a leading ```json fence and a trailing ``` fence, if present.
/// Exact prefix/suffix match only; a fence elsewhere in the text is kept.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
