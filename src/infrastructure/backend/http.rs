//! Backend speaking the search relevance REST API over HTTP

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::payload::{
    error_reason, experiment_request, extract_entity_id, judgment_request, query_set_request,
    search_configuration_request, CreateRequest, CAT_INDICES_PATH,
};
use crate::domain::experiment::ExperimentDraft;
use crate::domain::judgment::JudgmentDraft;
use crate::domain::query_set::QuerySetDraft;
use crate::domain::search_configuration::SearchConfigurationDraft;
use crate::domain::{DomainError, EntityBackend, EntityId, IndexCatalog, IndexInfo};

/// Basic auth credentials sent with every request
#[derive(Debug, Clone)]
struct BasicAuth {
    username: String,
    password: Option<String>,
}

/// HTTP implementation of [`EntityBackend`] and [`IndexCatalog`]
#[derive(Debug, Clone)]
pub struct HttpEntityBackend {
    client: reqwest::Client,
    base_url: String,
    auth: Option<BasicAuth>,
}

impl HttpEntityBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password,
        });
        self
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, auth.password.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to parse response: {}", e)))
    }

    async fn create(&self, request: CreateRequest) -> Result<EntityId, DomainError> {
        debug!(method = %request.method, path = request.path, "Sending creation request");

        let builder = self.request(request.method, request.path).json(&request.body);
        let response = self.send(builder).await.inspect_err(|e| {
            warn!(path = request.path, error = %e, "Creation request failed");
        })?;

        extract_entity_id(&response, request.id_field)
    }
}

/// Map a non-success status onto the error category the submission flow reports
fn status_error(status: StatusCode, body: &str) -> DomainError {
    let reason = error_reason(body);

    match status {
        StatusCode::FORBIDDEN => {
            let status_reason = status.canonical_reason().unwrap_or("Forbidden");
            match reason {
                Some(reason) => DomainError::forbidden(format!("{}: {}", status_reason, reason)),
                None => DomainError::forbidden(status_reason),
            }
        }
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
            DomainError::validation(reason.unwrap_or_else(|| body.to_string()))
        }
        _ => DomainError::transport(format!("HTTP {}: {}", status, body)),
    }
}

#[async_trait]
impl EntityBackend for HttpEntityBackend {
    async fn create_query_set(&self, draft: &QuerySetDraft) -> Result<EntityId, DomainError> {
        self.create(query_set_request(draft)).await
    }

    async fn create_search_configuration(
        &self,
        draft: &SearchConfigurationDraft,
    ) -> Result<EntityId, DomainError> {
        self.create(search_configuration_request(draft)).await
    }

    async fn create_judgment(&self, draft: &JudgmentDraft) -> Result<EntityId, DomainError> {
        self.create(judgment_request(draft)).await
    }

    async fn create_experiment(&self, draft: &ExperimentDraft) -> Result<EntityId, DomainError> {
        self.create(experiment_request(draft)).await
    }
}

/// Row of `_cat/indices`; numeric columns arrive as strings
#[derive(Debug, Deserialize)]
struct CatIndex {
    index: String,
    health: Option<String>,
    #[serde(rename = "docs.count")]
    docs_count: Option<String>,
}

#[async_trait]
impl IndexCatalog for HttpEntityBackend {
    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DomainError> {
        let response = self.send(self.request(Method::GET, CAT_INDICES_PATH)).await?;
        let rows: Vec<CatIndex> = serde_json::from_value(response)
            .map_err(|e| DomainError::transport(format!("Unexpected index listing: {}", e)))?;

        let mut indexes: Vec<IndexInfo> = rows
            .into_iter()
            .filter(|row| !row.index.starts_with('.'))
            .map(|row| IndexInfo {
                name: row.index,
                health: row.health,
                docs_count: row.docs_count.and_then(|count| count.parse().ok()),
            })
            .collect();
        indexes.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(indexes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query_set::QueryRecord;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpEntityBackend {
        HttpEntityBackend::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn query_set() -> QuerySetDraft {
        let mut draft = QuerySetDraft::new();
        draft.name = "Sampled".to_string();
        draft.description = "Top queries".to_string();
        draft
    }

    #[tokio::test]
    async fn test_created_id_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_plugins/_search_relevance/query_sets"))
            .and(body_partial_json(json!({"name": "Sampled", "querySetSize": 10})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"query_set_id": "qs-1", "query_set_result": "CREATED"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let id = backend(&server).create_query_set(&query_set()).await.unwrap();
        assert_eq!(id.as_str(), "qs-1");
    }

    #[tokio::test]
    async fn test_forbidden_is_reported_as_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/_plugins/_search_relevance/query_sets"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .expect(1)
            .mount(&server)
            .await;

        let draft = query_set().with_queries(vec![QueryRecord::new("shoes", "")]);
        let error = backend(&server).create_query_set(&draft).await.unwrap_err();

        assert_eq!(error, DomainError::forbidden("Forbidden"));
    }

    #[tokio::test]
    async fn test_bad_request_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/_plugins/_search_relevance/experiments"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"type": "illegal_argument_exception", "reason": "query set not found"},
                "status": 400
            })))
            .mount(&server)
            .await;

        let error = backend(&server)
            .create_experiment(&ExperimentDraft::default())
            .await
            .unwrap_err();

        assert_eq!(error, DomainError::validation("query set not found"));
    }

    #[tokio::test]
    async fn test_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/_plugins/_search_relevance/judgments"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let error = backend(&server)
            .create_judgment(&JudgmentDraft::new())
            .await
            .unwrap_err();

        assert!(matches!(error, DomainError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_basic_auth_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/_plugins/_search_relevance/search_configurations"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "sc-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend(&server).with_basic_auth("admin", Some("admin".to_string()));
        let id = backend
            .create_search_configuration(&SearchConfigurationDraft::new())
            .await
            .unwrap();

        assert_eq!(id.as_str(), "sc-1");
    }

    #[tokio::test]
    async fn test_list_indexes_hides_system_indexes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_cat/indices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"index": "products", "health": "green", "docs.count": "1200"},
                {"index": ".plugins-ml-config", "health": "green", "docs.count": "1"},
                {"index": "catalog", "health": "yellow", "docs.count": null}
            ])))
            .mount(&server)
            .await;

        let indexes = backend(&server).list_indexes().await.unwrap();

        let names: Vec<_> = indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["catalog", "products"]);
        assert_eq!(indexes[1].docs_count, Some(1200));
        assert_eq!(indexes[0].docs_count, None);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        let backend = HttpEntityBackend::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let error = backend.create_query_set(&query_set()).await.unwrap_err();
        assert!(matches!(error, DomainError::Transport { .. }));
    }
}
