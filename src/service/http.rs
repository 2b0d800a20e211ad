//! HTTP data service client
//!
//! JSON-over-HTTP implementation of [`LabelService`]. One shared
//! `reqwest::Client` is reused for every request (connection pooling).

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::models::{Label, LabelId};
use crate::service::LabelService;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Serialize)]
struct CreateLabelRequest<'a> {
    name: &'a str,
    color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateItemLabelsRequest<'a> {
    label_ids: &'a [LabelId],
}

/// [`LabelService`] backed by a remote JSON API
#[derive(Debug, Clone)]
pub struct HttpLabelService {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpLabelService {
    /// Client with default settings and no authentication
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(reqwest::Client::new(), base_url, None)
    }

    /// Client built from configuration (timeout, token, base URL)
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(client, &config.base_url, config.api_token.clone())
    }

    /// Client reusing an existing `reqwest::Client`
    ///
    /// # Errors
    /// * `ServiceError::InvalidUrl` if `base_url` does not parse or cannot
    ///   carry path segments (e.g. `mailto:`)
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_token: Option<String>,
    ) -> Result<Self, ServiceError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_token,
        })
    }

    /// Base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, builder: RequestBuilder) -> Result<String, ServiceError> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::warn!(
                status_code = status_code,
                error_body = %body,
                "Data service returned error status"
            );

            return Err(ServiceError::Status {
                status: status_code,
                body,
            });
        }

        Ok(response.text().await?)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, body = %body, "Malformed data service response");
            ServiceError::Decode(e)
        })
    }
}

/// Map a 404 onto a domain-specific not-found error
fn not_found_as(err: ServiceError, not_found: impl FnOnce() -> ServiceError) -> ServiceError {
    match err {
        ServiceError::Status { status: 404, .. } => not_found(),
        other => other,
    }
}

#[async_trait]
impl LabelService for HttpLabelService {
    async fn fetch_labels(&self) -> Result<Vec<Label>, ServiceError> {
        let url = self.endpoint(&["labels"])?;
        tracing::debug!(url = %url, "Fetching label catalog");

        let body = self.send(self.request(Method::GET, url)).await?;
        let labels: Vec<Label> = Self::decode(&body)?;

        tracing::debug!(count = labels.len(), "Fetched label catalog");
        Ok(labels)
    }

    async fn create_label(
        &self,
        name: &str,
        color_hex: &str,
        description: Option<&str>,
    ) -> Result<Label, ServiceError> {
        let url = self.endpoint(&["labels"])?;
        tracing::debug!(url = %url, name = %name, color = %color_hex, "Creating label");

        let payload = CreateLabelRequest {
            name,
            color: color_hex,
            description,
        };
        let body = self
            .send(self.request(Method::POST, url).json(&payload))
            .await?;
        Self::decode(&body)
    }

    async fn delete_label(&self, label_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["labels", label_id])?;
        tracing::debug!(url = %url, label_id = %label_id, "Deleting label");

        self.send(self.request(Method::DELETE, url))
            .await
            .map_err(|e| not_found_as(e, || ServiceError::LabelNotFound(label_id.to_string())))?;
        Ok(())
    }

    async fn update_item_labels(
        &self,
        item_id: &str,
        label_ids: &[LabelId],
    ) -> Result<Vec<Label>, ServiceError> {
        let url = self.endpoint(&["items", item_id, "labels"])?;
        tracing::debug!(
            url = %url,
            item_id = %item_id,
            label_count = label_ids.len(),
            "Updating item labels"
        );

        let payload = UpdateItemLabelsRequest { label_ids };
        let body = self
            .send(self.request(Method::PUT, url).json(&payload))
            .await
            .map_err(|e| not_found_as(e, || ServiceError::ItemNotFound(item_id.to_string())))?;
        Self::decode(&body)
    }
}
