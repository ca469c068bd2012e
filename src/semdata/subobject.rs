//! Subobjects: secondary subjects anchored to a parent page.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::base::Title;
use crate::dataitem::DataItem;
use crate::datavalue::DataValue;
use crate::property::{BuiltinProperty, Property};

use super::{SemanticData, Subject};

/// Errors raised while assembling a subobject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubobjectError {
    #[error("subobject identifier must not be empty")]
    EmptyIdentifier,
}

/// Derives a deterministic subobject identifier from an ordered parameter
/// list.
///
/// Two invocations with the same parameters in the same order agree on the
/// identifier; reordering the parameters changes it.
pub struct HashIdGenerator {
    pairs: Vec<(String, Vec<String>)>,
    prefix: String,
}

impl HashIdGenerator {
    pub fn new(pairs: Vec<(String, Vec<String>)>, prefix: impl Into<String>) -> HashIdGenerator {
        HashIdGenerator {
            pairs,
            prefix: prefix.into(),
        }
    }

    /// Prefix plus a truncated hex digest of the serialized parameter list.
    pub fn generate_id(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, values) in &self.pairs {
            hasher.update(name.as_bytes());
            hasher.update([0x1f]);
            for value in values {
                hasher.update(value.as_bytes());
                hasher.update([0x1e]);
            }
        }
        let digest = hex::encode(hasher.finalize());
        format!("{}{}", self.prefix, &digest[..16])
    }
}

/// Builder for one subobject and its fact container.
pub struct Subobject {
    title: Title,
    data: Option<SemanticData>,
    errors: Vec<String>,
}

impl Subobject {
    /// A builder anchored to the given parent page.
    pub fn new(title: Title) -> Subobject {
        Subobject {
            title,
            data: None,
            errors: Vec::new(),
        }
    }

    /// Initialize the fact container for the given identifier.
    pub fn set_semantic_data(&mut self, id: &str) -> Result<(), SubobjectError> {
        if id.trim().is_empty() {
            return Err(SubobjectError::EmptyIdentifier);
        }
        let subject = Subject::subobject(self.title.clone(), id);
        self.data = Some(SemanticData::new(subject));
        Ok(())
    }

    /// Delegate identifier derivation to the generator.
    pub fn generate_id(&self, generator: &HashIdGenerator) -> String {
        generator.generate_id()
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.data.as_ref().map(SemanticData::subject)
    }

    /// Record one constructed value on the subobject's own container.
    ///
    /// Calls before [`Subobject::set_semantic_data`] accumulate an error
    /// instead of panicking.
    pub fn add_data_value(&mut self, value: DataValue) {
        match self.data.as_mut() {
            Some(data) => value.add_to(data),
            None => self
                .errors
                .push("subobject container was not initialized".to_string()),
        }
    }

    /// The property under which the container attaches to the parent.
    pub fn property(&self) -> Property {
        Property::builtin(BuiltinProperty::HasSubobject)
    }

    /// The finished container as a single composite value.
    pub fn container(&self) -> Option<DataItem> {
        self.data
            .as_ref()
            .map(|data| DataItem::Container(Box::new(data.clone())))
    }

    /// Own errors merged with the container's.
    pub fn errors(&self) -> Vec<String> {
        let mut all = self.errors.clone();
        if let Some(data) = &self.data {
            all.extend_from_slice(data.errors());
        }
        all
    }
}
