//! Subjects and per-parse fact containers.
//!
//! A [`SemanticData`] container is owned by one parse pass: it is created
//! empty (subject = the page being parsed), populated by annotation calls,
//! and handed to the store when the page is saved. Nothing here touches
//! persistent storage.

mod subject;
mod subobject;

use indexmap::IndexMap;

use crate::dataitem::DataItem;
use crate::property::Property;

pub use subject::Subject;
pub use subobject::{HashIdGenerator, Subobject, SubobjectError};

/// The facts collected for one subject during a parse pass.
///
/// Property order and per-property value order follow annotation order;
/// exact duplicate (property, value) pairs are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticData {
    subject: Subject,
    facts: IndexMap<Property, Vec<DataItem>>,
    errors: Vec<String>,
}

impl SemanticData {
    /// A fresh, empty container for the given subject.
    pub fn new(subject: Subject) -> SemanticData {
        SemanticData {
            subject,
            facts: IndexMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Append one value for a property.
    ///
    /// Inverse properties never reach the container; the attempt is recorded
    /// as an error instead. Exact duplicates are dropped silently.
    pub fn add_property_value(&mut self, property: Property, item: DataItem) {
        if property.is_inverse() {
            self.errors.push(format!(
                "Property `{}` has inverted notation and cannot be annotated",
                property.label()
            ));
            return;
        }
        let values = self.facts.entry(property).or_default();
        if !values.contains(&item) {
            values.push(item);
        }
    }

    /// All values recorded for a property; empty when absent.
    pub fn get_property_values(&self, property: &Property) -> &[DataItem] {
        self.facts.get(property).map_or(&[], Vec::as_slice)
    }

    pub fn has_property(&self, property: &Property) -> bool {
        self.facts.contains_key(property)
    }

    /// Properties in annotation order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.facts.keys()
    }

    /// Flattened (property, value) pairs in annotation order.
    pub fn fact_pairs(&self) -> impl Iterator<Item = (&Property, &DataItem)> {
        self.facts
            .iter()
            .flat_map(|(prop, values)| values.iter().map(move |v| (prop, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
