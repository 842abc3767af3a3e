use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::error::ApiError;
use super::types::{CreateGenerationRequest, GenerationRecord};

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Transport seam consumed by the job monitor.
///
/// `get` is idempotent and may be issued repeatedly for the same id;
/// `create` is not and is issued at most once per attempt.
pub trait GenerationApi {
    async fn create(&self, req: &CreateGenerationRequest) -> Result<GenerationRecord, ApiError>;
    async fn get(&self, id: u64) -> Result<GenerationRecord, ApiError>;
}

/// HTTP client for the generation service.
pub struct GenerationClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GenerationClient {
    /// Create a client for the given base URL (useful for testing).
    pub fn with_base_url(token: Option<String>, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url,
            token,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// List recent generations for the authenticated account.
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<GenerationRecord>, ApiError> {
        let response = self
            .request(self.client.get(format!("{}/generations/", self.base_url)))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Map a response to the typed record or the error taxonomy.
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| "An error occurred".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }
}

impl GenerationApi for GenerationClient {
    async fn create(&self, req: &CreateGenerationRequest) -> Result<GenerationRecord, ApiError> {
        let response = self
            .request(self.client.post(format!("{}/generations/", self.base_url)))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get(&self, id: u64) -> Result<GenerationRecord, ApiError> {
        let response = self
            .request(self.client.get(format!("{}/generations/{id}", self.base_url)))
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{GenerationKind, GenerationStatus};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_request() -> CreateGenerationRequest {
        CreateGenerationRequest {
            input_text: "ॐ नमो भगवते वासुदेवाय".into(),
            language: "sanskrit".into(),
            voice_style: "devotional".into(),
            selected_voice: "krishna".into(),
            generation_type: GenerationKind::TtsMantra,
        }
    }

    fn record_body(id: u64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "status": status,
            "input_text": "ॐ नमो भगवते वासुदेवाय",
            "language": "sanskrit",
            "voice_style": "devotional",
            "selected_voice": "krishna",
            "audio_url": if status == "completed" { Some("https://cdn.example.com/audio/1.wav") } else { None },
            "video_url": null,
            "created_at": "2024-01-15T10:30:00Z",
            "completed_at": if status == "completed" { Some("2024-01-15T10:32:00Z") } else { None },
        })
    }

    #[tokio::test]
    async fn create_returns_record_on_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generations/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(record_body(1, "pending")))
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let record = client.create(&create_request()).await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.status, GenerationStatus::Pending);
    }

    #[tokio::test]
    async fn create_sends_bearer_token_when_authenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generations/"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(record_body(2, "pending")))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GenerationClient::with_base_url(Some("secret-token".into()), server.uri());
        client.create(&create_request()).await.unwrap();
    }

    #[tokio::test]
    async fn create_surfaces_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generations/"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "detail": "Generation limit reached. Please upgrade your plan."
            })))
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let err = client.create(&create_request()).await.unwrap_err();
        match err {
            ApiError::Api { status, detail } => {
                assert_eq!(status, 403);
                assert_eq!(detail, "Generation limit reached. Please upgrade your plan.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_maps_to_generic_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generations/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let err = client.create(&create_request()).await.unwrap_err();
        match err {
            ApiError::Api { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, "An error occurred");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_returns_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generations/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_body(5, "completed")))
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let record = client.get(5).await.unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.status, GenerationStatus::Completed);
        assert!(record.audio_url.is_some());
    }

    #[tokio::test]
    async fn get_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generations/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "detail": "Generation not found"
            })))
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let err = client.get(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn list_passes_pagination_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generations/"))
            .and(query_param("skip", "10"))
            .and(query_param("limit", "5"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([record_body(11, "completed"), record_body(12, "pending")])),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::with_base_url(None, server.uri());
        let records = client.list(10, 5).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 11);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = GenerationClient::with_base_url(None, "http://127.0.0.1:1".to_string());
        let err = client.get(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
