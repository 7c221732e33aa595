use super::{AssistError, AssistProvider};
use crate::config::AssistConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gemini `generateContent` client. Authenticates with an API key header and
/// optionally pins the response MIME type to JSON.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    http: reqwest::Client,
    config: AssistConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    #[must_use]
    pub fn new(config: AssistConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }
}

#[async_trait]
impl AssistProvider for GeminiProvider {
    #[tracing::instrument(level = "debug", skip(self, prompt))]
    async fn generate(&self, prompt: &str, json: bool) -> Result<String, AssistError> {
        let request = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: json
                .then_some(GenerationConfig { response_mime_type: "application/json" }),
        };

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.config.endpoint, self.config.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        if !response.status().is_success() {
            return Err(AssistError::Rejected(format!("model endpoint returned {}", response.status())));
        }

        let generated: GenerateResponse = response.json().await.map_err(anyhow::Error::from)?;
        let text = generated
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssistError::Empty);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(AssistConfig {
            endpoint: server.uri(),
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
        })
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}],
        })
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("A candlelit rooftop dinner.")))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let text = provider.generate("Suggest a date idea", false).await.unwrap();
        assert_eq!(text, "A candlelit rooftop dinner.");
    }

    #[tokio::test]
    async fn test_json_mode_sets_response_mime_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(body_string_contains("application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("[{\"title\": \"Picnic\"}]")))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let text = provider.generate("Suggest ideas", true).await.unwrap();
        assert_eq!(text, "[{\"title\": \"Picnic\"}]");
    }

    #[tokio::test]
    async fn test_empty_candidates_are_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(provider.generate("Anything", false).await, Err(AssistError::Empty)));
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({"error": {"message": "quota"}})))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(matches!(provider.generate("Anything", false).await, Err(AssistError::Rejected(_))));
    }
}
