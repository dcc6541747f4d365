pub mod dto;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::error::AppError;
use crate::models::{Resource, ResourceDescriptor};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("DASHBOARD_API_BASE")
            .map_err(|_| AppError::Config("DASHBOARD_API_BASE is not set".to_string()))?;
        let timeout = match env::var("DASHBOARD_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("DASHBOARD_API_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
        })
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub items: Vec<Resource>,
    /// Server-reported total, when the endpoint paginates server-side.
    pub total_items: Option<usize>,
}

#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(&self, descriptor: &ResourceDescriptor) -> Result<ListPage, AppError>;
    async fn get(&self, descriptor: &ResourceDescriptor, id: &str) -> Result<Resource, AppError>;
    async fn create(&self, descriptor: &ResourceDescriptor, body: &Resource) -> Result<Resource, AppError>;
    async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        id: &str,
        body: &Resource,
    ) -> Result<Resource, AppError>;
    async fn delete(&self, descriptor: &ResourceDescriptor, id: &str) -> Result<(), AppError>;
}

pub struct HttpResourceApi {
    client: Client,
    base_url: Url,
}

impl HttpResourceApi {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("Invalid API base URL {}", config.base_url)));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    /// Joins a path template onto the base URL, substituting `{id}` as an
    /// encoded path segment.
    fn url(&self, template: &str, id: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config(format!("Invalid API base URL {}", self.base_url)))?;
            segments.pop_if_empty();
            for segment in template.trim_start_matches('/').split('/') {
                match (segment, id) {
                    ("{id}", Some(id)) => segments.push(id),
                    _ => segments.push(segment),
                };
            }
        }
        Ok(url)
    }

    fn endpoint(
        descriptor: &ResourceDescriptor,
        template: Option<&'static str>,
        operation: &'static str,
    ) -> Result<&'static str, AppError> {
        template.ok_or(AppError::Unsupported {
            resource: descriptor.name,
            operation,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn parse_envelope(body: &str) -> Result<dto::Envelope, AppError> {
        serde_json::from_str::<dto::Envelope>(body).map_err(|e| AppError::Parse(e.to_string()))
    }

    /// Single-record responses come either wrapped (`{ "data": {...} }`) or bare.
    fn parse_single(descriptor: &ResourceDescriptor, body: &str) -> Result<Resource, AppError> {
        let mut envelope = Self::parse_envelope(body)?;
        match envelope.body.remove(descriptor.collection_key) {
            Some(Value::Object(map)) => Ok(Resource::from(map)),
            Some(other) => Err(AppError::Parse(format!(
                "expected an object under `{}`, got {}",
                descriptor.collection_key, other
            ))),
            None => Ok(Resource::from(envelope.body)),
        }
    }

    fn parse_saved(descriptor: &ResourceDescriptor, body: &str, sent: &Resource) -> Result<Resource, AppError> {
        if body.trim().is_empty() {
            return Ok(sent.clone());
        }
        Self::parse_single(descriptor, body)
    }
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn list(&self, descriptor: &ResourceDescriptor) -> Result<ListPage, AppError> {
        let url = self.url(descriptor.endpoints.list, None)?;
        let body = self.send(self.client.get(url)).await?;
        let mut envelope = Self::parse_envelope(&body)?;

        let raw_items = match envelope.body.remove(descriptor.collection_key) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(AppError::Parse(format!(
                    "`{}` is not an array",
                    descriptor.collection_key
                )));
            }
            None => {
                return Err(AppError::Parse(format!(
                    "missing `{}` array",
                    descriptor.collection_key
                )));
            }
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for (index, raw) in raw_items.into_iter().enumerate() {
            match Resource::try_from(raw) {
                Ok(item) if item.id(descriptor.id_field).is_some() => items.push(item),
                Ok(_) => {
                    tracing::warn!("Skipping {} item {}: no `{}`", descriptor.name, index, descriptor.id_field);
                }
                Err(value) => {
                    tracing::warn!("Skipping {} item {}: not an object ({})", descriptor.name, index, value);
                }
            }
        }

        let total_items = envelope
            .pagination
            .and_then(|p| p.total_items)
            .map(|n| n as usize);

        Ok(ListPage { items, total_items })
    }

    async fn get(&self, descriptor: &ResourceDescriptor, id: &str) -> Result<Resource, AppError> {
        let template = Self::endpoint(descriptor, descriptor.endpoints.get, "get")?;
        let url = self.url(template, Some(id))?;
        let body = self.send(self.client.get(url)).await?;
        Self::parse_single(descriptor, &body)
    }

    async fn create(&self, descriptor: &ResourceDescriptor, body: &Resource) -> Result<Resource, AppError> {
        let template = Self::endpoint(descriptor, descriptor.endpoints.create, "create")?;
        let url = self.url(template, None)?;
        let mut payload = body.clone();
        payload.remove(descriptor.id_field);

        let response = self.send(self.client.post(url).json(&payload)).await?;
        Self::parse_saved(descriptor, &response, &payload)
    }

    async fn update(
        &self,
        descriptor: &ResourceDescriptor,
        id: &str,
        body: &Resource,
    ) -> Result<Resource, AppError> {
        let template = Self::endpoint(descriptor, descriptor.endpoints.update, "update")?;
        let url = self.url(template, Some(id))?;

        let response = self.send(self.client.put(url).json(body)).await?;
        Self::parse_saved(descriptor, &response, body)
    }

    async fn delete(&self, descriptor: &ResourceDescriptor, id: &str) -> Result<(), AppError> {
        let template = Self::endpoint(descriptor, descriptor.endpoints.delete, "delete")?;
        let url = self.url(template, Some(id))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

/// Backend stand-in that holds nothing: lists are empty and writes echo back.
pub struct NoopResourceApi;

#[async_trait]
impl ResourceApi for NoopResourceApi {
    async fn list(&self, _descriptor: &ResourceDescriptor) -> Result<ListPage, AppError> {
        Ok(ListPage::default())
    }

    async fn get(&self, descriptor: &ResourceDescriptor, id: &str) -> Result<Resource, AppError> {
        let mut resource = Resource::new();
        resource.insert(descriptor.id_field, Value::String(id.to_string()));
        Ok(resource)
    }

    async fn create(&self, _descriptor: &ResourceDescriptor, body: &Resource) -> Result<Resource, AppError> {
        Ok(body.clone())
    }

    async fn update(
        &self,
        _descriptor: &ResourceDescriptor,
        _id: &str,
        body: &Resource,
    ) -> Result<Resource, AppError> {
        Ok(body.clone())
    }

    async fn delete(&self, _descriptor: &ResourceDescriptor, _id: &str) -> Result<(), AppError> {
        Ok(())
    }
}
