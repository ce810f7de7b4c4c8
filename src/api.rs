use crate::state::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Failure of one HTTP exchange with the backend.
///
/// `Transport` covers everything that kept a well-formed answer from
/// arriving (network, DNS, an undecodable body). `Application` is a
/// well-formed answer in which the backend itself reported failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Application(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

fn invalid_body(err: serde_json::Error) -> ApiError {
    ApiError::Transport(format!("invalid response body: {err}"))
}

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewMessage<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct Greeting {
    message: String,
}

fn reported_error(error: Option<String>) -> ApiError {
    ApiError::Application(error.unwrap_or_else(|| "backend reported a failure".to_string()))
}

/// Thin client over the backend's JSON endpoints. Constructed once at
/// startup and handed to the components that talk to the network.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base
            .join(path)
            .expect("endpoint paths are static and valid")
    }

    /// Fetches the stored messages, in whatever order the backend returns
    /// them. Error bodies still carry the backend's `error` field even on
    /// non-2xx statuses, so the body is decoded unconditionally.
    pub async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        let body = self
            .http
            .get(self.endpoint("/api/messages"))
            .send()
            .await?
            .text()
            .await?;
        let list: MessageList = serde_json::from_str(&body).map_err(invalid_body)?;
        if list.success {
            Ok(list.messages)
        } else {
            Err(reported_error(list.error))
        }
    }

    /// Posts one new message. The caller is responsible for trimming and
    /// rejecting empty input before this is reached.
    pub async fn submit_message(&self, content: &str) -> Result<(), ApiError> {
        let body = self
            .http
            .post(self.endpoint("/api/messages"))
            .json(&NewMessage { message: content })
            .send()
            .await?
            .text()
            .await?;
        let ack: Ack = serde_json::from_str(&body).map_err(invalid_body)?;
        if ack.success {
            Ok(())
        } else {
            Err(reported_error(ack.error))
        }
    }

    pub async fn greeting(&self) -> Result<String, ApiError> {
        let body = self
            .http
            .get(self.endpoint("/api/hello"))
            .send()
            .await?
            .text()
            .await?;
        let greeting: Greeting = serde_json::from_str(&body).map_err(invalid_body)?;
        Ok(greeting.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            reqwest::Client::new(),
            Url::parse("http://localhost:8080").unwrap(),
        )
    }

    #[test]
    fn endpoints_resolve_against_base() {
        let client = client();
        assert_eq!(
            client.endpoint("/api/messages").as_str(),
            "http://localhost:8080/api/messages"
        );
        assert_eq!(
            client.endpoint("/api/hello").as_str(),
            "http://localhost:8080/api/hello"
        );
    }

    #[test]
    fn decodes_message_list() {
        let body = r#"{
            "success": true,
            "messages": [
                {"id": 7, "content": "hi there", "timestamp": "2024-05-01T10:30:00Z"}
            ],
            "count": 1
        }"#;
        let list: MessageList = serde_json::from_str(body).unwrap();
        assert!(list.success);
        assert_eq!(list.messages.len(), 1);
        assert_eq!(list.messages[0].id, 7);
        assert_eq!(list.messages[0].content, "hi there");
    }

    #[test]
    fn empty_list_decodes_to_no_messages() {
        let body = r#"{"success": true, "messages": [], "count": 0}"#;
        let list: MessageList = serde_json::from_str(body).unwrap();
        assert!(list.success);
        assert!(list.messages.is_empty());
    }

    #[test]
    fn backend_failure_maps_to_application_error() {
        let body = r#"{"success": false, "error": "too long"}"#;
        let ack: Ack = serde_json::from_str(body).unwrap();
        assert!(!ack.success);
        let err = reported_error(ack.error);
        assert!(matches!(&err, ApiError::Application(text) if text == "too long"));
        assert_eq!(err.to_string(), "too long");
    }

    #[test]
    fn error_body_without_success_field_still_fails() {
        // The backend's 4xx/5xx bodies carry only an error string.
        let body = r#"{"error": "Message cannot be empty"}"#;
        let ack: Ack = serde_json::from_str(body).unwrap();
        assert!(!ack.success);
        assert_eq!(
            reported_error(ack.error).to_string(),
            "Message cannot be empty"
        );
    }

    #[test]
    fn failure_without_error_text_gets_a_generic_one() {
        let err = reported_error(None);
        assert!(matches!(err, ApiError::Application(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn new_message_serializes_with_message_key() {
        let json = serde_json::to_string(&NewMessage { message: "hello" }).unwrap();
        assert_eq!(json, r#"{"message":"hello"}"#);
    }

    #[test]
    fn garbage_body_is_a_transport_error() {
        let err = serde_json::from_str::<Ack>("<html>502</html>")
            .map_err(invalid_body)
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn decodes_greeting() {
        let body = r#"{"message": "\n\nHello from the backend"}"#;
        let greeting: Greeting = serde_json::from_str(body).unwrap();
        assert_eq!(greeting.message, "\n\nHello from the backend");
    }
}
