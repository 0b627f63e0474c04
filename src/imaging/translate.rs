//! Label translation over the translation HTTP API.

use serde::Deserialize;
use serde_json::json;

use crate::config::TranslationConfig;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    #[serde(default)]
    translated_text: String,
}

pub struct TranslationClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    source_language: String,
    target_language: String,
}

impl TranslationClient {
    pub fn new(config: &TranslationConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create translation HTTP client");

        Self {
            http_client,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
        }
    }

    /// Translate a batch of short texts. Empty translations are dropped.
    pub async fn translate(&self, texts: &[String]) -> anyhow::Result<Vec<String>> {
        let payload = json!({
            "q": texts,
            "source": self.source_language,
            "target": self.target_language,
            "format": "text",
        });

        let mut request = self
            .http_client
            .post(format!("{}/language/translate/v2", self.endpoint))
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?.error_for_status()?;
        let translated: TranslateResponse = response.json().await?;

        Ok(translated
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .filter(|t| !t.is_empty())
            .collect())
    }
}
