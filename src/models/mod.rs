pub mod descriptor;
pub mod resource;

pub use descriptor::{Column, CountSource, Endpoints, FieldDef, FieldKind, ResourceDescriptor};
pub use resource::Resource;
