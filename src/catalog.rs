//! Per-resource configuration for every list view and form in the dashboard.

use crate::error::AppError;
use crate::models::{Column, CountSource, Endpoints, FieldDef, FieldKind, ResourceDescriptor};

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldDef {
    FieldDef { name, label, kind, required }
}

const fn column(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

pub static FAQ: ResourceDescriptor = ResourceDescriptor {
    name: "faq",
    label: "FAQs",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/faq",
        get: Some("/api/faq/{id}"),
        create: Some("/api/faq/create"),
        update: Some("/api/faq/update/{id}"),
        delete: Some("/api/faq/{id}"),
    },
    columns: &[column("question", "Question"), column("answer", "Answer")],
    fields: &[
        field("question", "Question", FieldKind::Text, true),
        field("answer", "Answer", FieldKind::LongText, true),
    ],
    count_source: CountSource::Filtered,
};

pub static CONTACT: ResourceDescriptor = ResourceDescriptor {
    name: "contact",
    label: "Contacts",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/contact",
        get: None,
        create: None,
        update: None,
        delete: Some("/api/contact/{id}"),
    },
    columns: &[
        column("name", "Name"),
        column("email", "Email"),
        column("phone", "Phone"),
        column("subject", "Subject"),
        column("message", "Message"),
    ],
    fields: &[],
    count_source: CountSource::Filtered,
};

pub static CONNECT_WITH_US: ResourceDescriptor = ResourceDescriptor {
    name: "connect-with-us",
    label: "Connect With Us Queries",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/connect-with-us/",
        get: None,
        create: None,
        update: None,
        delete: Some("/api/connect-with-us/{id}"),
    },
    columns: &[
        column("name", "Name"),
        column("email", "Email"),
        column("phone", "Phone"),
        column("courseId", "Course"),
        column("message", "Message"),
    ],
    fields: &[],
    count_source: CountSource::ServerTotal,
};

pub static SECTION: ResourceDescriptor = ResourceDescriptor {
    name: "section",
    label: "Sections",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/section",
        get: Some("/api/section/{id}"),
        create: Some("/api/section/create"),
        update: Some("/api/section/update/{id}"),
        delete: Some("/api/section/{id}"),
    },
    columns: &[
        column("title", "Title"),
        column("slug", "Slug"),
        column("isActive", "Active"),
    ],
    fields: &[
        field("title", "Title", FieldKind::Text, true),
        field("slug", "Slug", FieldKind::Text, true),
        field("content", "Content", FieldKind::LongText, false),
        field("isActive", "Active", FieldKind::Boolean, false),
    ],
    count_source: CountSource::Filtered,
};

pub static TEMPLATE: ResourceDescriptor = ResourceDescriptor {
    name: "template",
    label: "Templates",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/template",
        get: Some("/api/template/{id}"),
        create: Some("/api/template/create"),
        update: Some("/api/template/update/{id}"),
        delete: Some("/api/template/{id}"),
    },
    columns: &[column("name", "Name"), column("subject", "Subject")],
    fields: &[
        field("name", "Name", FieldKind::Text, true),
        field("subject", "Subject", FieldKind::Text, true),
        field("body", "Body", FieldKind::LongText, true),
    ],
    count_source: CountSource::Filtered,
};

pub static COURSE: ResourceDescriptor = ResourceDescriptor {
    name: "course",
    label: "Courses",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/course",
        get: Some("/api/course/{id}"),
        create: Some("/api/course/create"),
        update: Some("/api/course/update/{id}"),
        delete: Some("/api/course/{id}"),
    },
    columns: &[
        column("title", "Title"),
        column("category", "Category"),
        column("instructor", "Instructor"),
        column("isPublished", "Published"),
    ],
    fields: &[
        field("title", "Title", FieldKind::Text, true),
        field("category", "Category", FieldKind::Text, false),
        field("instructor", "Instructor", FieldKind::Text, false),
        field("description", "Description", FieldKind::LongText, false),
        field("isPublished", "Published", FieldKind::Boolean, false),
    ],
    count_source: CountSource::Filtered,
};

pub static LEAD: ResourceDescriptor = ResourceDescriptor {
    name: "lead",
    label: "Leads",
    id_field: "_id",
    collection_key: "data",
    endpoints: Endpoints {
        list: "/api/lead",
        get: Some("/api/lead/{id}"),
        create: Some("/api/lead/create"),
        update: Some("/api/lead/update/{id}"),
        delete: Some("/api/lead/{id}"),
    },
    columns: &[
        column("name", "Name"),
        column("email", "Email"),
        column("phone", "Phone"),
        column("status", "Status"),
        column("courseId", "Course"),
    ],
    fields: &[
        field("name", "Name", FieldKind::Text, true),
        field("email", "Email", FieldKind::Email, true),
        field("phone", "Phone", FieldKind::Text, false),
        field("status", "Status", FieldKind::Text, false),
        field("courseId", "Course", FieldKind::Reference, false),
        field("eventId", "Event", FieldKind::Reference, false),
    ],
    count_source: CountSource::Filtered,
};

pub static CATALOG: [&ResourceDescriptor; 7] = [
    &FAQ,
    &CONTACT,
    &CONNECT_WITH_US,
    &SECTION,
    &TEMPLATE,
    &COURSE,
    &LEAD,
];

pub fn find(name: &str) -> Result<&'static ResourceDescriptor, AppError> {
    CATALOG
        .iter()
        .copied()
        .find(|d| d.name == name)
        .ok_or_else(|| AppError::UnknownResource(name.to_string()))
}
