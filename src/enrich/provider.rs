//! Per-provider request adapters.
//!
//! Each provider owns its endpoint, model, credential variable, and wire
//! schema.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 512;

/// Request/response dialect spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiSchema {
    /// `POST /chat/completions`, bearer auth, reply at `choices[0].message.content`.
    OpenaiChat,
    /// `POST /v1/messages`, `x-api-key` auth, reply at `content[0].text`.
    AnthropicMessages,
}

impl ApiSchema {
    /// JSON body for a single user-role prompt at temperature 0.
    pub fn request_body(self, model: &str, prompt: &str) -> Value {
        let messages = json!([{ "role": "user", "content": prompt }]);
        match self {
            ApiSchema::OpenaiChat => json!({
                "model": model,
                "messages": messages,
                "temperature": 0,
            }),
            ApiSchema::AnthropicMessages => json!({
                "model": model,
                "max_tokens": ANTHROPIC_MAX_TOKENS,
                "messages": messages,
                "temperature": 0,
            }),
        }
    }

    pub fn auth_headers(self, credential: &str) -> Vec<(&'static str, String)> {
        match self {
            ApiSchema::OpenaiChat => vec![("Authorization", format!("Bearer {credential}"))],
            ApiSchema::AnthropicMessages => vec![
                ("x-api-key", credential.to_string()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
        }
    }

    /// Trimmed text of the first choice; blank text counts as missing.
    pub fn extract_text(self, body: &Value) -> Option<String> {
        let pointer = match self {
            ApiSchema::OpenaiChat => "/choices/0/message/content",
            ApiSchema::AnthropicMessages => "/content/0/text",
        };
        body.pointer(pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Provider settings as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub name: String,
    pub url: String,
    pub model: String,
    /// Environment variable holding the credential.
    pub api_key_env: String,
    #[serde(default = "default_schema")]
    pub schema: ApiSchema,
}

fn default_schema() -> ApiSchema {
    ApiSchema::OpenaiChat
}

impl ProviderConfig {
    pub fn openai() -> Self {
        Self {
            name: "openai".to_string(),
            url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            schema: ApiSchema::OpenaiChat,
        }
    }

    pub fn openrouter() -> Self {
        Self {
            name: "openrouter".to_string(),
            url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "openai/gpt-3.5-turbo".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            schema: ApiSchema::OpenaiChat,
        }
    }

    /// Resolve the credential from the environment. Blank values count as unset.
    pub fn resolve(&self) -> Provider {
        let credential = std::env::var(&self.api_key_env)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Provider {
            name: self.name.clone(),
            url: self.url.clone(),
            model: self.model.clone(),
            schema: self.schema,
            credential,
        }
    }
}

/// A provider with its credential resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub url: String,
    pub model: String,
    pub schema: ApiSchema,
    pub credential: Option<String>,
}

impl Provider {
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }
}

// Credentials are never printed.
impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("model", &self.model)
            .field("schema", &self.schema)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_body_has_single_user_message_at_temperature_zero() {
        let body = ApiSchema::OpenaiChat.request_body("gpt-3.5-turbo", "hello");
        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0,
            })
        );
    }

    #[test]
    fn anthropic_body_carries_max_tokens() {
        let body = ApiSchema::AnthropicMessages.request_body("claude-haiku", "hi");
        assert_eq!(body["max_tokens"], json!(ANTHROPIC_MAX_TOKENS));
        assert_eq!(body["messages"][0]["content"], json!("hi"));
    }

    #[test]
    fn extract_text_follows_each_schema() {
        let openai = json!({"choices": [{"message": {"content": "  Thanks!\n"}}]});
        assert_eq!(
            ApiSchema::OpenaiChat.extract_text(&openai).as_deref(),
            Some("Thanks!")
        );
        let anthropic = json!({"content": [{"type": "text", "text": "Cheers"}]});
        assert_eq!(
            ApiSchema::AnthropicMessages.extract_text(&anthropic).as_deref(),
            Some("Cheers")
        );
        assert_eq!(ApiSchema::OpenaiChat.extract_text(&anthropic), None);
        let blank = json!({"choices": [{"message": {"content": "   "}}]});
        assert_eq!(ApiSchema::OpenaiChat.extract_text(&blank), None);
    }

    #[test]
    fn auth_headers_match_schema() {
        assert_eq!(
            ApiSchema::OpenaiChat.auth_headers("k"),
            vec![("Authorization", "Bearer k".to_string())]
        );
        let headers = ApiSchema::AnthropicMessages.auth_headers("k");
        assert!(headers.contains(&("x-api-key", "k".to_string())));
    }

    #[test]
    fn debug_output_hides_credential() {
        let mut provider = ProviderConfig::openai().resolve();
        provider.credential = Some("sk-secret".to_string());
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("configured: true"));
    }

    #[test]
    fn schema_names_are_snake_case() {
        let schema: ApiSchema = serde_json::from_str("\"anthropic_messages\"").unwrap();
        assert_eq!(schema, ApiSchema::AnthropicMessages);
    }
}
