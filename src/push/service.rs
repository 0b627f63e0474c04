//! HTTP delivery of push messages, FCM v1 wire format.

use std::collections::HashMap;

use metrics::counter;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::PushConfig;

/// A notification to fan out to a set of device tokens.
#[derive(Debug, Clone)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub data: Option<HashMap<String, String>>,
}

/// Per-token delivery outcome counts for one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryCounts {
    pub success: usize,
    pub failure: usize,
}

pub struct PushService {
    http_client: reqwest::Client,
    endpoint: String,
    project_id: String,
    auth_token: Option<String>,
}

impl PushService {
    pub fn new(config: &PushConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create push HTTP client");

        Self {
            http_client,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/v1/projects/{}/messages:send", self.endpoint, self.project_id)
    }

    /// Deliver one message to every token concurrently. Each token either
    /// succeeds or is counted as failed; the fan-out itself never errors.
    pub async fn send_to_tokens(&self, tokens: &[String], message: &PushMessage) -> DeliveryCounts {
        let sends = tokens.iter().map(|token| self.send_one(token, message));
        let outcomes = futures::future::join_all(sends).await;

        let success = outcomes.iter().filter(|delivered| **delivered).count();
        let failure = outcomes.len() - success;

        counter!("midas_push_deliveries_total", "outcome" => "success").increment(success as u64);
        counter!("midas_push_deliveries_total", "outcome" => "failure").increment(failure as u64);
        debug!(success, failure, "Push fan-out completed");

        DeliveryCounts { success, failure }
    }

    async fn send_one(&self, token: &str, message: &PushMessage) -> bool {
        let mut payload = json!({
            "message": {
                "token": token,
                "notification": {
                    "title": message.title,
                    "body": message.body,
                },
            }
        });
        if let Some(data) = &message.data {
            payload["message"]["data"] = json!(data);
        }

        let mut request = self.http_client.post(self.send_url()).json(&payload);
        if let Some(auth_token) = &self.auth_token {
            request = request.bearer_auth(auth_token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Push delivery failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Push delivery failed (network error)");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_push_config(endpoint: &str) -> PushConfig {
        crate::test_utils::install_crypto_provider();
        PushConfig {
            endpoint: endpoint.parse().unwrap(),
            project_id: "test-project".to_string(),
            auth_token: Some("test-bearer".to_string()),
            timeout: Duration::from_secs(2),
            default_title: "MIDAS notification".to_string(),
        }
    }

    fn message() -> PushMessage {
        PushMessage {
            title: "Alert".to_string(),
            body: "Something happened".to_string(),
            data: None,
        }
    }

    #[tokio::test]
    async fn test_all_tokens_delivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/test-project/messages:send"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;

        let service = PushService::new(&test_push_config(&server.uri()));
        let tokens = vec!["t1".to_string(), "t2".to_string(), "t3".to_string()];

        let counts = service.send_to_tokens(&tokens, &message()).await;
        assert_eq!(counts, DeliveryCounts { success: 3, failure: 0 });
    }

    #[tokio::test]
    async fn test_partial_failure_is_counted_per_token() {
        let server = MockServer::start().await;
        // The stale token is rejected, everything else goes through
        Mock::given(method("POST"))
            .and(path("/v1/projects/test-project/messages:send"))
            .and(body_string_contains("stale-token"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/test-project/messages:send"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let service = PushService::new(&test_push_config(&server.uri()));
        let tokens = vec!["good-1".to_string(), "stale-token".to_string(), "good-2".to_string()];

        let counts = service.send_to_tokens(&tokens, &message()).await;
        assert_eq!(counts, DeliveryCounts { success: 2, failure: 1 });
    }

    #[tokio::test]
    async fn test_network_error_counts_as_failure() {
        // Point to a port that's not listening
        let service = PushService::new(&test_push_config("http://127.0.0.1:1"));
        let tokens = vec!["t1".to_string()];

        let counts = service.send_to_tokens(&tokens, &message()).await;
        assert_eq!(counts, DeliveryCounts { success: 0, failure: 1 });
    }

    #[tokio::test]
    async fn test_data_payload_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/test-project/messages:send"))
            .and(body_string_contains("\"event\":\"fall\""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = PushService::new(&test_push_config(&server.uri()));
        let msg = PushMessage {
            data: Some(HashMap::from([("event".to_string(), "fall".to_string())])),
            ..message()
        };

        let counts = service.send_to_tokens(&["t1".to_string()], &msg).await;
        assert_eq!(counts, DeliveryCounts { success: 1, failure: 0 });
    }
}
