use crate::{
    config::Config,
    constants::FALLBACK_REPLY,
    errors::{AssistantError, AssistantResult},
    logging::{log_backend_call, BackendCallLog},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    response: String,
}

/// Turns one user utterance into one assistant reply.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    url: String,
}

impl BackendClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> AssistantResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> AssistantResult<Self> {
        Self::new(
            config.backend_url.trim(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `text` and returns the reply. Never fails: any error is logged
    /// and replaced by [`FALLBACK_REPLY`].
    pub async fn send_message(&self, text: &str) -> String {
        match self.try_send_message(text).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Error connecting to the backend: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    pub async fn try_send_message(&self, text: &str) -> AssistantResult<String> {
        let started = Instant::now();
        let mut status = None;
        let result = self.exchange(text, &mut status).await;

        log_backend_call(&BackendCallLog {
            endpoint: self.url.clone(),
            request_chars: text.chars().count(),
            response_status: status,
            response_time_ms: started.elapsed().as_millis(),
        });

        result
    }

    async fn exchange(&self, text: &str, status: &mut Option<u16>) -> AssistantResult<String> {
        let response = self
            .client
            .post(&self.url)
            .json(&CommandRequest { text })
            .send()
            .await?;

        let code = response.status();
        *status = Some(code.as_u16());
        if !code.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::api_error(format!(
                "Backend returned error: {} - {}",
                code, error_text
            )));
        }

        let body: CommandResponse = response.json().await.map_err(|e| {
            AssistantError::api_error(format!("Failed to parse backend response: {}", e))
        })?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer, timeout: Option<Duration>) -> BackendClient {
        BackendClient::new(format!("{}/process-command", server.uri()), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/process-command"))
            .and(body_json(json!({ "text": "play jazz" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Playing jazz"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None);
        assert_eq!(client.send_message("play jazz").await, "Playing jazz");
    }

    #[tokio::test]
    async fn test_extra_fields_are_ignored() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "It is sunny in Berlin.",
                "intent": "get_weather"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None);
        assert_eq!(
            client.try_send_message("weather in Berlin").await.unwrap(),
            "It is sunny in Berlin."
        );
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None);
        let err = client.try_send_message("weather?").await.unwrap_err();
        assert!(matches!(err, AssistantError::Api(_)));
        assert_eq!(client.send_message("weather?").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_missing_response_field_falls_back() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "hi" })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None);
        assert_eq!(client.send_message("hi").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_non_json_body_falls_back() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>down</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None);
        assert_eq!(client.send_message("hi").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back() {
        let client = BackendClient::new("http://127.0.0.1:1/process-command", None).unwrap();
        let err = client.try_send_message("weather?").await.unwrap_err();
        assert!(matches!(err, AssistantError::Http(_)));
        assert_eq!(client.send_message("weather?").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "too late" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some(Duration::from_millis(200)));
        assert_eq!(client.send_message("weather?").await, FALLBACK_REPLY);
    }

    #[test]
    fn test_from_config_trims_url() {
        let mut config = Config::default();
        config.backend_url = " http://localhost:8000/process-command ".to_string();
        let client = BackendClient::from_config(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:8000/process-command");
    }
}
