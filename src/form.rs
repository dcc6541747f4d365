use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::client::ResourceApi;
use crate::error::AppError;
use crate::models::{FieldKind, Resource, ResourceDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Controlled form for creating or editing one resource. Holds the whole
/// field mapping and submits it as the request body.
pub struct ResourceForm {
    descriptor: &'static ResourceDescriptor,
    api: Arc<dyn ResourceApi>,
    mode: FormMode,
    values: Resource,
}

impl ResourceForm {
    pub fn create(descriptor: &'static ResourceDescriptor, api: Arc<dyn ResourceApi>) -> Self {
        Self {
            descriptor,
            api,
            mode: FormMode::Create,
            values: Resource::new(),
        }
    }

    /// Loads the existing record so it can be edited in place.
    pub async fn edit(
        descriptor: &'static ResourceDescriptor,
        api: Arc<dyn ResourceApi>,
        id: &str,
    ) -> Result<Self, AppError> {
        let values = api.get(descriptor, id).await?;
        Ok(Self {
            descriptor,
            api,
            mode: FormMode::Edit { id: id.to_string() },
            values,
        })
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &Resource {
        &self.values
    }

    /// Sets a field from user-entered text, typed by the field definition.
    pub fn set(&mut self, field: &str, raw: &str) -> Result<(), AppError> {
        let def = self.descriptor.field(field).ok_or_else(|| {
            AppError::Validation(format!("{} has no field `{}`", self.descriptor.name, field))
        })?;

        let value = match def.kind {
            FieldKind::Boolean => Value::Bool(parse_bool(raw).ok_or_else(|| {
                AppError::Validation(format!("{} must be yes or no, got `{}`", def.label, raw))
            })?),
            FieldKind::Text | FieldKind::LongText | FieldKind::Email | FieldKind::Reference => {
                Value::String(raw.to_string())
            }
        };
        self.values.insert(def.name, value);
        Ok(())
    }

    pub fn set_value(&mut self, field: &str, value: Value) {
        self.values.insert(field, value);
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = self
            .descriptor
            .fields
            .iter()
            .filter(|f| f.required && is_blank(self.values.get(f.name)))
            .map(|f| f.label)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!("Required: {}", missing.join(", "))))
        }
    }

    /// Validates and sends the form. On success the saved record is returned
    /// and the caller moves on; failures are logged and returned.
    pub async fn submit(&self) -> Result<Resource, AppError> {
        self.validate()?;

        let result = match &self.mode {
            FormMode::Create => self.api.create(self.descriptor, &self.values).await,
            FormMode::Edit { id } => self.api.update(self.descriptor, id, &self.values).await,
        };

        match &result {
            Ok(saved) => info!(
                "Saved {} {}",
                self.descriptor.name,
                saved.id(self.descriptor.id_field).unwrap_or_default()
            ),
            Err(e) => error!("Failed to save {}: {}", self.descriptor.name, e),
        }
        result
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
