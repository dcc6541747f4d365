use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record exchanged with the backend: field name to JSON value,
/// in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifier as text. Numeric ids are rendered, anything else is `None`.
    pub fn id(&self, id_field: &str) -> Option<String> {
        match self.0.get(id_field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn display_value(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::Bool(true)) => "Yes".to_string(),
            Some(Value::Bool(false)) => "No".to_string(),
            Some(other) => search_fragment(other),
        }
    }

    /// Lower-cased concatenation of every field value, used by the list filter.
    pub fn search_text(&self) -> String {
        self.0
            .values()
            .map(search_fragment)
            .collect::<String>()
            .to_lowercase()
    }
}

fn search_fragment(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

impl From<Map<String, Value>> for Resource {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        Value::Object(resource.0)
    }
}

impl TryFrom<Value> for Resource {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
