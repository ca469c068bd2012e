//! JSON export of fact containers.

use serde::Serialize;

use crate::dataitem::DataItem;
use crate::semdata::SemanticData;

/// One exported property with its serialized values.
#[derive(Debug, Clone, Serialize)]
pub struct ExportFact {
    pub property: String,
    pub values: Vec<ExportValue>,
}

/// One exported value; subobject containers nest recursively.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ExportValue {
    Number(f64),
    Boolean(bool),
    Text(String),
    Time(String),
    Page(String),
    Error(Vec<String>),
    Container(ExportDocument),
}

/// The exported form of one container.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub subject: String,
    pub facts: Vec<ExportFact>,
}

/// Project a container into its export form.
pub fn to_document(data: &SemanticData) -> ExportDocument {
    let mut facts: Vec<ExportFact> = Vec::new();
    for property in data.properties() {
        let values = data
            .get_property_values(property)
            .iter()
            .map(to_value)
            .collect();
        facts.push(ExportFact {
            property: property.key().to_string(),
            values,
        });
    }
    ExportDocument {
        subject: data.subject().key(),
        facts,
    }
}

fn to_value(item: &DataItem) -> ExportValue {
    match item {
        DataItem::Number(n) => ExportValue::Number(*n),
        DataItem::Boolean(b) => ExportValue::Boolean(*b),
        DataItem::Blob(s) => ExportValue::Text(s.clone()),
        DataItem::Time(t) => ExportValue::Time(t.to_string()),
        DataItem::WikiPage(subject) => ExportValue::Page(subject.key()),
        DataItem::Error(messages) => ExportValue::Error(messages.clone()),
        DataItem::Container(sub) => ExportValue::Container(to_document(sub)),
    }
}

/// Serialize a container to a JSON string.
pub fn export_json(data: &SemanticData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_document(data))
}
