//! HTTP implementation of the chat backend API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, ConversationApi};
use super::models::{AccessToken, ChatTurn, Credentials, FeedbackOutcome, Generation};
use crate::error::{ApiError, Result};
use crate::session::TokenStore;

/// Per-request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback when a 429 carries no usable Retry-After
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// reqwest-backed client for the chat backend.
///
/// Reads the token store before every request and attaches the token as a
/// bearer credential. A 401 comes back as [`ApiError::Unauthorized`]; reacting
/// to it is left to the caller.
pub struct ChatClient {
    http: HttpClient,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ChatClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request, attaching the stored token if there is one
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        Ok(match self.tokens.get()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and decode a JSON success body
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        let response = self.send(builder, path).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Send a request whose success body is not needed
    async fn execute_unit(&self, builder: RequestBuilder, path: &str) -> Result<()> {
        let response = self.send(builder, path).await?;
        // Drain so the connection can be reused
        let _ = response.bytes().await;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} -> {}", path, status);

        if status.is_success() {
            return Ok(response);
        }
        Err(Self::status_error(status, response).await.into())
    }

    /// Map a non-2xx response to an [`ApiError`], keeping the server's message
    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);

        match status {
            StatusCode::FORBIDDEN => ApiError::Forbidden(detail),
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::rate_limited(Duration::from_secs(retry_after), detail)
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(detail)
            }
            status if status.is_server_error() => ApiError::ServerError(detail),
            status => ApiError::Unexpected {
                status: status.as_u16(),
                detail,
            },
        }
    }
}

/// Pull the human-readable message out of an error body.
///
/// The backend answers with `{"detail": "..."}`, or for validation failures
/// `{"detail": [{"msg": "...", ...}]}`. Anything else is returned as text.
fn extract_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(msg),
        }) => msg,
        Ok(ErrorBody {
            detail: serde_json::Value::Array(items),
        }) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string()),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl AuthApi for ChatClient {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        // OAuth2 password form: the email travels as `username`
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let builder = self.request(Method::POST, "/login")?.form(&form);
        self.execute(builder, "/login").await
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let builder = self.request(Method::POST, "/register")?.json(credentials);
        self.execute_unit(builder, "/register").await
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    user_input: &'a str,
}

#[derive(Serialize)]
struct FeedbackRequest<'a> {
    user_input: &'a str,
    model_response: &'a str,
    corrected_response: &'a str,
}

#[async_trait]
impl ConversationApi for ChatClient {
    async fn generate(&self, query: &str) -> Result<Generation> {
        let builder = self
            .request(Method::POST, "/generate")?
            .json(&GenerateRequest { user_input: query });
        self.execute(builder, "/generate").await
    }

    async fn submit_feedback(&self, turn: &ChatTurn, correction: &str) -> Result<FeedbackOutcome> {
        let body = FeedbackRequest {
            user_input: &turn.user_input,
            model_response: &turn.ai_response,
            corrected_response: correction,
        };
        let builder = self.request(Method::POST, "/feedback")?.json(&body);
        self.execute(builder, "/feedback").await
    }

    async fn chat_history(&self) -> Result<Vec<ChatTurn>> {
        let builder = self.request(Method::GET, "/chat-history")?;
        self.execute(builder, "/chat-history").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::session::MemoryTokenStore;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(url: &str, token: Option<&str>) -> ChatClient {
        let store: Arc<dyn TokenStore> = match token {
            Some(t) => Arc::new(MemoryTokenStore::with_token(t)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        ChatClient::new(url, store).unwrap()
    }

    #[test]
    fn test_client_creation_trims_slash() {
        let client = client_for("http://localhost:8000/", None);
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_extract_detail_variants() {
        assert_eq!(
            extract_detail(r#"{"detail":"Email already registered"}"#),
            "Email already registered"
        );
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#),
            "field required"
        );
        assert_eq!(extract_detail("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(extract_detail(""), "");
    }

    #[tokio::test]
    async fn test_attaches_stored_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_header("authorization", "Bearer T-123")
            .with_status(200)
            .with_body(r#"{"response":"hi"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T-123"));
        let generation = client.generate("hello").await.unwrap();

        assert_eq!(generation.response, "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/chat-history")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let history = client.chat_history().await.unwrap();

        assert!(history.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_is_read_per_request() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/chat-history")
            .match_header("authorization", "Bearer first")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/chat-history")
            .match_header("authorization", "Bearer second")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("first"));
        let client = ChatClient::new(server.url(), store.clone()).unwrap();

        client.chat_history().await.unwrap();
        store.set("second").unwrap();
        client.chat_history().await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_tagged_and_side_effect_free() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(401)
            .with_body(r#"{"detail":"Could not validate credentials"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let client = ChatClient::new(server.url(), store.clone()).unwrap();
        let err = client.generate("hello").await.unwrap_err();

        assert!(err.is_unauthorized());
        // The client itself never touches the store
        assert_eq!(store.get().unwrap().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_login_posts_oauth_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "ada@example.com".into()),
                Matcher::UrlEncoded("password".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"T","token_type":"bearer"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let token = client
            .login(&Credentials::new("ada@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(token.access_token, "T");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_bad_request_carries_detail() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/register")
            .match_body(Matcher::Json(
                json!({"email": "ada@example.com", "password": "secret"}),
            ))
            .with_status(400)
            .with_body(r#"{"detail":"Email already registered"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .register(&Credentials::new("ada@example.com", "secret"))
            .await
            .unwrap_err();

        assert_eq!(err.detail(), Some("Email already registered"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_feedback_body_pairs_turn_and_correction() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/feedback")
            .match_body(Matcher::Json(json!({
                "user_input": "hello",
                "model_response": "hi",
                "corrected_response": "hello there"
            })))
            .with_status(200)
            .with_body(r#"{"status":"Model fine-tuned","loss":1.5}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T"));
        let outcome = client
            .submit_feedback(&ChatTurn::new("hello", "hi"), "hello there")
            .await
            .unwrap();

        assert_eq!(outcome.status, "Model fine-tuned");
        assert_eq!(outcome.loss, Some(1.5));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_user_input() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_body(Matcher::Json(json!({"user_input": "hello"})))
            .with_status(200)
            .with_body(r#"{"response":"hi"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T"));
        client.generate("hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _forbidden = server
            .mock("GET", "/chat-history")
            .with_status(403)
            .create_async()
            .await;
        let _server_error = server
            .mock("POST", "/generate")
            .with_status(500)
            .with_body(r#"{"detail":"CUDA out of memory"}"#)
            .create_async()
            .await;
        let _limited = server
            .mock("POST", "/feedback")
            .with_status(429)
            .with_header("retry-after", "12")
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T"));

        let err = client.chat_history().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Forbidden(_))));
        assert_eq!(err.detail(), None);

        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::ServerError(_))));
        assert_eq!(err.detail(), Some("CUDA out of memory"));

        let err = client
            .submit_feedback(&ChatTurn::new("a", "b"), "c")
            .await
            .unwrap_err();
        match &err {
            Error::Api(ApiError::RateLimit { retry_after, .. }) => {
                assert_eq!(*retry_after, Duration::from_secs(12))
            }
            other => panic!("Expected RateLimit, got {:?}", other),
        }
        assert_eq!(err.detail(), Some("Too many requests. Try again in 12s."));
    }

    #[tokio::test]
    async fn test_server_detail_kept_for_every_failing_status() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server.url(), Some("T"));

        for status in [403, 409, 429] {
            let mock = server
                .mock("POST", "/generate")
                .with_status(status)
                .with_body(r#"{"detail":"server says no"}"#)
                .create_async()
                .await;

            let err = client.generate("x").await.unwrap_err();
            assert_eq!(err.detail(), Some("server says no"), "status {}", status);
            assert!(!err.is_unauthorized());

            mock.remove_async().await;
        }
    }

    #[tokio::test]
    async fn test_unmapped_status_is_unexpected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/chat-history")
            .with_status(405)
            .with_body(r#"{"detail":"Method Not Allowed"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T"));
        let err = client.chat_history().await.unwrap_err();

        match err {
            Error::Api(ApiError::Unexpected { status, ref detail }) => {
                assert_eq!(status, 405);
                assert_eq!(detail, "Method Not Allowed");
            }
            other => panic!("Expected Unexpected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("T"));
        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on port 9 locally
        let client = client_for("http://127.0.0.1:9", None);
        let err = client.chat_history().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Network(_))));
    }
}
