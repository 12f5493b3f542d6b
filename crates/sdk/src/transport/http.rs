//! HTTP transport layer for the DANDI SDK.

use crate::config::ClientConfig;
use crate::error::{DandiError, DandiResult};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> DandiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("dandi-sdk/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Build a URL for the given path.
    ///
    /// The path is appended to the base URL rather than resolved against it,
    /// so a base like `https://host/prefix` keeps its prefix.
    fn build_url(&self, path: &str) -> DandiResult<url::Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let full = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Ok(url::Url::parse(&full)?)
    }

    /// Send a request and decode a successful JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> DandiResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "archive API returned an error");
            return Err(DandiError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> DandiResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        self.execute(self.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    ///
    /// Pairs are encoded in order and keys may repeat.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> DandiResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        self.execute(self.client.get(url).query(query)).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> DandiResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        self.execute(self.client.post(url).json(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestRequest {
        sql: String,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            timeout: Duration::from_secs(30),
        })
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/filter-options/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/api/filter-options/").await.unwrap();
        assert_eq!(result.message, "success");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_with_repeated_query_keys() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/search/"))
            .and(query_param("species", "Mus musculus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        let query = vec![
            ("species", "Mus musculus".to_string()),
            ("species", "Homo sapiens".to_string()),
        ];
        let _: serde_json::Value = transport.get_with_query("/api/search/", &query).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("species=Mus+musculus&species=Homo+sapiens")
        );
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sql/execute/"))
            .and(body_json(serde_json::json!({"sql": "SELECT 1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "executed".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let request = TestRequest {
            sql: "SELECT 1".to_string(),
        };
        let result: TestResponse = transport.post("/api/sql/execute/", &request).await.unwrap();
        assert_eq!(result.message, "executed");
    }

    #[tokio::test]
    async fn test_error_on_400() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sql/execute/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Only SELECT queries are allowed"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: DandiResult<TestResponse> = transport
            .post("/api/sql/execute/", &serde_json::json!({"sql": "DROP TABLE x"}))
            .await;
        match result {
            Err(DandiError::Api { status, message, .. }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Only SELECT queries are allowed");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_on_404() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: DandiResult<TestResponse> = transport.get("/api/missing/").await;
        assert_eq!(result.unwrap_err().status(), Some(404));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_json_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/filter-options/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: DandiResult<serde_json::Value> = transport.get("/api/filter-options/").await;
        let err = result.unwrap_err();
        assert!(matches!(err, DandiError::Json(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let transport = HttpTransport::new(create_config("http://127.0.0.1:9")).unwrap();

        let result: DandiResult<serde_json::Value> = transport.get("/api/search/").await;
        assert!(matches!(result, Err(DandiError::Http(_))));
    }

    #[test]
    fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8000")).unwrap();

        let url = transport.build_url("/api/search/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/search/");
    }

    #[test]
    fn test_build_url_keeps_path_prefix() {
        let transport = HttpTransport::new(create_config("https://example.org/archive/")).unwrap();

        let url = transport.build_url("/api/sql/schema/").unwrap();
        assert_eq!(url.as_str(), "https://example.org/archive/api/sql/schema/");
    }
}
