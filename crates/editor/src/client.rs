//! HTTP client for the section API

use async_trait::async_trait;
use homestretch_core::{HomepageId, SectionId};
use homestretch_sections::{CreateSection, ImageSlot, ReorderEntry, Section, UpdateSection};
use reqwest::{Client, Method, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{ImageFile, SectionApi};
use crate::error::{ApiErrorBody, ClientError};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default server address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

const RESOURCE: &str = "/api/homepage-sections";

// ============================================================================
// SectionClient
// ============================================================================

/// Typed client for `/api/homepage-sections`
///
/// Reads are retried once on a transport failure; mutations are sent once.
#[derive(Debug, Clone)]
pub struct SectionClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SectionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homestretch-editor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, RESOURCE, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ========================================================================
    // Generic request helpers
    // ========================================================================

    /// GET with a single retry on transport failure
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = match self.request(Method::GET, path).send().await {
            Ok(response) => response,
            Err(first) => {
                let first = ClientError::from(first);
                if !first.is_transport() {
                    return Err(first);
                }
                tracing::debug!(path, error = %first, "GET failed, retrying once");
                self.request(Method::GET, path).send().await?
            }
        };
        Self::handle_response(response).await
    }

    async fn send_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Send a request whose success carries no body (204)
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Parse(e.to_string()))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.json::<ApiErrorBody>().await.ok();
        let err = ClientError::from_status(status, body);
        tracing::debug!(status, error = %err, "request failed");
        err
    }
}

#[async_trait]
impl SectionApi for SectionClient {
    async fn list_sections(&self, homepage_id: Option<HomepageId>) -> Result<Vec<Section>, ClientError> {
        match homepage_id {
            Some(id) => self.get(&format!("?homepageId={id}")).await,
            None => self.get("").await,
        }
    }

    async fn list_by_type(&self, section_type: &str) -> Result<Vec<Section>, ClientError> {
        self.get(&format!("/types/{section_type}")).await
    }

    async fn get_section(&self, id: SectionId) -> Result<Section, ClientError> {
        self.get(&format!("/{id}")).await
    }

    async fn get_hero(&self) -> Result<Section, ClientError> {
        self.get("/hero").await
    }

    async fn create_section(&self, input: &CreateSection) -> Result<Section, ClientError> {
        self.send_json(Method::POST, "", input).await
    }

    async fn update_section(&self, id: SectionId, patch: &UpdateSection) -> Result<Section, ClientError> {
        self.send_json(Method::PATCH, &format!("/{id}"), patch).await
    }

    async fn update_hero(&self, patch: &UpdateSection) -> Result<Section, ClientError> {
        self.send_json(Method::PUT, "/hero", patch).await
    }

    async fn reorder_sections(&self, entries: &[ReorderEntry]) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::POST, "/reorder").json(entries))
            .await
    }

    async fn delete_section(&self, id: SectionId) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/{id}")))
            .await
    }

    async fn upload_image(
        &self,
        id: SectionId,
        slot: ImageSlot,
        image: ImageFile,
    ) -> Result<Section, ClientError> {
        let content_type = image.content_type();
        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let path = format!("/{id}/{}", slot.route_segment());
        let response = self
            .request(Method::POST, &path)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

// ============================================================================
// Tests
// ============================================================================
