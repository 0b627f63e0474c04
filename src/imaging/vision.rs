//! Label detection over the vision HTTP API.

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;
use serde_json::json;

use crate::config::VisionConfig;

/// One label annotation from the vision API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResult {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
}

pub struct VisionClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    max_results: u32,
}

impl VisionClient {
    pub fn new(config: &VisionConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create vision HTTP client");

        Self {
            http_client,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        }
    }

    /// Run label detection on raw image bytes. Returns annotations in API
    /// order; scoring and compaction happen in the caller.
    pub async fn detect_labels(&self, image: &[u8]) -> anyhow::Result<Vec<LabelAnnotation>> {
        let payload = json!({
            "requests": [{
                "image": { "content": general_purpose::STANDARD.encode(image) },
                "features": [{ "type": "LABEL_DETECTION", "maxResults": self.max_results }],
            }]
        });

        let mut request = self.http_client.post(format!("{}/v1/images:annotate", self.endpoint)).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?.error_for_status()?;
        let annotate: AnnotateResponse = response.json().await?;

        Ok(annotate.responses.into_iter().next().map(|r| r.label_annotations).unwrap_or_default())
    }
}
