// Upstream client implementation

use reqwest::{header, Client, Response};
use serde_json::Value;

// Production environment endpoint
const GENERATIVE_LANGUAGE_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Client against the production endpoint. No request timeout is
    /// configured: the caller waits as long as the upstream takes.
    pub fn new() -> Self {
        Self::with_base_url(GENERATIVE_LANGUAGE_BASE_URL)
    }

    /// Client against an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Build the generateContent URL: model id in the path, credential as a
    /// query parameter.
    fn build_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, model, api_key
        )
    }

    /// Issue the single generateContent POST. One attempt, no retry.
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<Response, reqwest::Error> {
        let url = self.build_url(model, api_key);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        self.http_client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = UpstreamClient::new();
        let url = client.build_url("gemini-2.5-flash-preview-09-2025", "secret");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent?key=secret"
        );
    }

    #[test]
    fn test_build_url_with_override() {
        let client = UpstreamClient::with_base_url("http://127.0.0.1:9000");
        let url = client.build_url("gemini-2.5-flash-preview-09-2025", "k");
        assert_eq!(
            url,
            "http://127.0.0.1:9000/gemini-2.5-flash-preview-09-2025:generateContent?key=k"
        );
    }
}
