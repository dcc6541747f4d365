use std::sync::Arc;

use crate::catalog;
use crate::client::{ApiConfig, HttpResourceApi, ResourceApi};
use crate::error::AppError;
use crate::form::ResourceForm;
use crate::view::ResourceListView;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ResourceApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self { api }
    }

    pub fn from_config(config: ApiConfig) -> Result<Self, AppError> {
        let api = HttpResourceApi::new(config)?;
        Ok(Self::new(Arc::new(api)))
    }

    /// Mounts the list view for `resource`, which runs its first fetch.
    pub async fn list_view(&self, resource: &str) -> Result<ResourceListView, AppError> {
        let descriptor = catalog::find(resource)?;
        Ok(ResourceListView::mount(descriptor, self.api.clone()).await)
    }

    pub fn create_form(&self, resource: &str) -> Result<ResourceForm, AppError> {
        let descriptor = catalog::find(resource)?;
        if descriptor.endpoints.create.is_none() {
            return Err(AppError::Unsupported {
                resource: descriptor.name,
                operation: "create",
            });
        }
        Ok(ResourceForm::create(descriptor, self.api.clone()))
    }

    pub async fn edit_form(&self, resource: &str, id: &str) -> Result<ResourceForm, AppError> {
        let descriptor = catalog::find(resource)?;
        if descriptor.endpoints.update.is_none() {
            return Err(AppError::Unsupported {
                resource: descriptor.name,
                operation: "update",
            });
        }
        ResourceForm::edit(descriptor, self.api.clone(), id).await
    }
}
