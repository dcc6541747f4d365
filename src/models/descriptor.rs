/// Declarative description of one backend resource: where it lives and how
/// its list view and form look.
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub id_field: &'static str,
    /// Envelope key holding the payload, e.g. `data` in `{ "data": [...] }`.
    pub collection_key: &'static str,
    pub endpoints: Endpoints,
    pub columns: &'static [Column],
    pub fields: &'static [FieldDef],
    pub count_source: CountSource,
}

/// Path templates relative to the API base. `{id}` is replaced by the
/// resource identifier.
#[derive(Debug)]
pub struct Endpoints {
    pub list: &'static str,
    pub get: Option<&'static str>,
    pub create: Option<&'static str>,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
}

#[derive(Debug)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Boolean,
    /// Identifier of another resource. Shown and submitted as-is.
    Reference,
}

/// Which number the pagination control reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// Items left after the client-side search filter.
    Filtered,
    /// `pagination.totalItems` from the list response; ignores the search.
    ServerTotal,
}

impl ResourceDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
