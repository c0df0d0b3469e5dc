use crate::domain::ports::DescriptionGenerator;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TRIES: u32 = 6;

/// 固定描述，不呼叫外部服務
#[derive(Debug, Clone)]
pub struct StaticDescription {
    label: String,
}

impl StaticDescription {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    pub fn text(&self) -> String {
        format!("{}: xxx tickets available for the game.", self.label)
    }
}

#[async_trait]
impl DescriptionGenerator for StaticDescription {
    async fn generate(&self, _promo: Option<&str>, _time: Option<&str>, _recent: &[String]) -> Result<String> {
        Ok(self.text())
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// OpenAI-compatible chat completion client.
#[derive(Debug, Clone)]
pub struct ChatDescriptionGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    label: String,
    max_tries: u32,
    backoff: Duration,
}

impl ChatDescriptionGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            label: label.into(),
            max_tries: DEFAULT_MAX_TRIES,
            backoff: Duration::from_secs(1),
        }
    }

    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries.max(1);
        self
    }

    /// First wait after a 429; doubles on each further one.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn context(recent: &[String]) -> String {
        let examples = if recent.is_empty() {
            "- None yet!".to_string()
        } else {
            recent.iter().map(|d| format!("- {}", d)).collect::<Vec<_>>().join("\n")
        };
        format!(
            "You are generating descriptions for tickets that have been donated.\n\
             Avoid repeating common words and phrases in these recent descriptions:\n{}",
            examples
        )
    }

    fn prompt(&self, promo: Option<&str>, time: Option<&str>) -> String {
        format!(
            "Generate a short description. It should exactly word for word begin with \
             {label}: xxx tickets available for the game. LEAVE THE xxx IN!\n\
             Then write a short and sweet description that is not cringy and does not mention \
             family and friends. Do not mention the exact time.\n\
             Limit it to 1 short sentence!\n\
             If there is a promo available write a kid friendly description for it within that \
             sentence. Refer to 'the tickets' or 'the event', never 'our events' or 'our tickets'.\n\
             Do not refer to promo sponsors.\n\
             Do not refer to \"your purchase\" or anything along those lines.\n\
             If it is a light hearted event, include a pun.\n\n\
             - **Promo:** {promo}\n\
             - **Time:** {time}\n",
            label = self.label,
            promo = promo.unwrap_or("No promo available"),
            time = time.unwrap_or("TBD"),
        )
    }
}

#[async_trait]
impl DescriptionGenerator for ChatDescriptionGenerator {
    async fn generate(&self, promo: Option<&str>, time: Option<&str>, recent: &[String]) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Self::context(recent),
                },
                ChatMessage {
                    role: "user",
                    content: self.prompt(promo, time),
                },
            ],
        };

        let mut wait = self.backoff;
        for attempt in 1..=self.max_tries {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                tracing::debug!("⏳ Rate limited ({}/{}), waiting {:?}", attempt, self.max_tries, wait);
                if attempt < self.max_tries {
                    tokio::time::sleep(wait).await;
                    wait *= 2;
                }
                continue;
            }
            if !status.is_success() {
                return Err(EtlError::DescriptionError {
                    message: format!("HTTP {}", status),
                });
            }

            let body: ChatResponse = response.json().await?;
            return body
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .ok_or_else(|| EtlError::DescriptionError {
                    message: "empty completion".to_string(),
                });
        }

        Err(EtlError::DescriptionError {
            message: format!("still rate limited after {} tries", self.max_tries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn generator(server: &MockServer) -> ChatDescriptionGenerator {
        ChatDescriptionGenerator::new(server.url("/v1/chat/completions"), DEFAULT_MODEL, "test-key", "MLB")
            .with_backoff(Duration::ZERO)
            .with_max_tries(3)
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("Bobblehead Night")
                .body_contains("- earlier text");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "  MLB: xxx tickets available for the game. Bobbleheads!  "}}]
            }));
        });

        let text = generator(&server)
            .generate(Some("Bobblehead Night"), Some("7:05 PM"), &["earlier text".to_string()])
            .await
            .unwrap();

        assert_eq!(text, "MLB: xxx tickets available for the game. Bobbleheads!");
        mock.assert();
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_is_an_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429);
        });

        let result = generator(&server).generate(None, None, &[]).await;

        assert!(matches!(result, Err(EtlError::DescriptionError { .. })));
        mock.assert_hits(3);
    }

    #[tokio::test]
    async fn test_static_description_uses_league_label() {
        let text = StaticDescription::new("NHL").generate(None, None, &[]).await.unwrap();
        assert_eq!(text, "NHL: xxx tickets available for the game.");
    }
}
