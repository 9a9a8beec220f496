use serde::{Deserialize, Serialize};
use ureq::{Agent, AgentBuilder};

use super::model::{LanguageModel, ModelError};
use crate::core::config::{AiSettings, Provider};

pub fn client_for(settings: &AiSettings) -> Result<Box<dyn LanguageModel>, ModelError> {
    let client: Box<dyn LanguageModel> = match settings.provider {
        Provider::OpenAi => Box::new(OpenAiClient::from_settings(settings)?),
        Provider::Google => Box::new(GeminiClient::from_settings(settings)?),
    };
    Ok(client)
}

fn agent(settings: &AiSettings) -> Agent {
    AgentBuilder::new().timeout(settings.timeout).build()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    agent: Agent,
    api_key: String,
    model: String,
    url: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn from_settings(settings: &AiSettings) -> Result<Self, ModelError> {
        let api_key = settings.api_key.clone().ok_or(ModelError::Unconfigured)?;
        Ok(Self {
            agent: agent(settings),
            api_key,
            model: settings.model.clone(),
            url: settings.api_url.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }
}

impl LanguageModel for OpenAiClient {
    fn complete(&self, instructions: &str, user_text: &str) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response: ChatResponse = self
            .agent
            .post(&self.url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)?
            .into_json()
            .map_err(|e| ModelError::MalformedReply(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::MalformedReply("response has no choices".to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiReplyContent,
}

#[derive(Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    #[serde(default)]
    text: String,
}

/// Google `generateContent` endpoint; the key travels as a query parameter.
pub struct GeminiClient {
    agent: Agent,
    api_key: String,
    url: String,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    pub fn from_settings(settings: &AiSettings) -> Result<Self, ModelError> {
        let api_key = settings.api_key.clone().ok_or(ModelError::Unconfigured)?;
        Ok(Self {
            agent: agent(settings),
            api_key,
            url: settings.api_url.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }
}

impl LanguageModel for GeminiClient {
    fn complete(&self, instructions: &str, user_text: &str) -> Result<String, ModelError> {
        let request = GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart { text: instructions }],
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: user_text }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        };

        let response: GeminiResponse = self
            .agent
            .post(&self.url)
            .query("key", &self.api_key)
            .send_json(&request)?
            .into_json()
            .map_err(|e| ModelError::MalformedReply(e.to_string()))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ModelError::MalformedReply("response has no candidates".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(provider: Provider, api_key: Option<&str>) -> AiSettings {
        AiSettings {
            api_key: api_key.map(str::to_string),
            provider,
            model: "test-model".to_string(),
            api_url: "http://localhost/v1/chat/completions".to_string(),
            max_tokens: 16,
            temperature: 0.0,
            timeout: Duration::from_millis(500),
        }
    }

    #[test]
    fn test_client_requires_key() {
        assert!(matches!(
            OpenAiClient::from_settings(&settings(Provider::OpenAi, None)),
            Err(ModelError::Unconfigured)
        ));
        assert!(matches!(
            GeminiClient::from_settings(&settings(Provider::Google, None)),
            Err(ModelError::Unconfigured)
        ));
    }

    #[test]
    fn test_request_shapes() {
        let chat = serde_json::to_value(ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 5,
            temperature: 0.5,
        })
        .unwrap();
        assert_eq!(chat["messages"][0]["role"], "user");
        assert_eq!(chat["max_tokens"], 5);

        let gemini = serde_json::to_value(GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart { text: "sys" }],
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 5,
                temperature: 0.5,
            },
        })
        .unwrap();
        assert_eq!(gemini["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(gemini["generationConfig"]["maxOutputTokens"], 5);
        assert_eq!(gemini["systemInstruction"]["parts"][0]["text"], "sys");
    }

    #[test]
    fn test_reply_decoding() {
        let chat: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"pwd"}}]}"#).unwrap();
        assert_eq!(chat.choices[0].message.content.as_deref(), Some("pwd"));

        let gemini: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"cpu"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(gemini.candidates[0].content.parts[0].text, "cpu");
    }
}
