//! Construction of typed values from raw wiki input.
//!
//! User input never fails hard here: a value that cannot be constructed is
//! still returned as a [`DataValue`] carrying an error item and messages, so
//! callers can render the problem inline and the store can index it.

use rustc_hash::FxHashMap;

use crate::base::{Namespace, Title};
use crate::dataitem::{DataItem, TypeId, WikiTime};
use crate::property::{BuiltinProperty, Property};
use crate::semdata::{SemanticData, Subject};

/// A typed value constructed from one annotation.
#[derive(Debug, Clone)]
pub struct DataValue {
    property: Option<Property>,
    item: DataItem,
    raw: String,
    caption: Option<String>,
    subject: Subject,
    errors: Vec<String>,
}

impl DataValue {
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    pub fn item(&self) -> &DataItem {
        &self.item
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The subject this value was constructed for.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Caption if given, else the raw input; used for inline rendering.
    pub fn display_text(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.raw)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.property.is_some() && self.errors.is_empty() && !self.item.is_error()
    }

    pub(crate) fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Apply this value to a container.
    ///
    /// Valid values append their item; invalid ones additionally record a
    /// `_ERRP` fact pointing at the offending property's page, so the error
    /// stays queryable. Recording happens here and not in the store, which
    /// keeps duplicates out. Values without a resolved property only carry
    /// their messages over.
    pub fn add_to(&self, data: &mut SemanticData) {
        let Some(property) = &self.property else {
            for error in &self.errors {
                data.add_error(error.clone());
            }
            return;
        };
        if property.is_inverse() {
            return;
        }
        data.add_property_value(property.clone(), self.item.clone());
        if !self.is_valid() {
            for error in &self.errors {
                data.add_error(error.clone());
            }
            if let Some(page) = property.as_wiki_page() {
                data.add_property_value(
                    Property::builtin(BuiltinProperty::HasImproperValue),
                    DataItem::WikiPage(Subject::page(page)),
                );
            }
        }
    }
}

/// Builds [`DataValue`]s, consulting declared property types.
///
/// Builtin properties use their fixed type. User properties fall back to
/// [`TypeId::Page`] unless a `_TYPE` declaration was loaded into the factory
/// via [`DataValueFactory::declare_type`].
#[derive(Debug, Default)]
pub struct DataValueFactory {
    declared: FxHashMap<Property, TypeId>,
}

impl DataValueFactory {
    pub fn new() -> DataValueFactory {
        DataValueFactory::default()
    }

    /// Record a property's declared type, normally read off its `_TYPE`
    /// facts by the caller.
    pub fn declare_type(&mut self, property: Property, type_id: TypeId) {
        self.declared.insert(property, type_id);
    }

    /// The type a value for this property parses as.
    pub fn type_for(&self, property: &Property) -> TypeId {
        property
            .fixed_type()
            .or_else(|| self.declared.get(property).copied())
            .unwrap_or(TypeId::Page)
    }

    /// Resolve a property label and construct a value for it.
    ///
    /// Resolution failure yields a property-less value carrying the message;
    /// the caller decides whether anything reaches a container.
    pub fn new_property_value(
        &self,
        label: &str,
        raw: &str,
        caption: Option<&str>,
        subject: &Subject,
    ) -> DataValue {
        match Property::user_property(label) {
            Ok(property) => self.new_property_object_value(property, raw, caption, subject),
            Err(error) => DataValue {
                property: None,
                item: DataItem::Error(vec![error.to_string()]),
                raw: raw.to_string(),
                caption: caption.map(str::to_string),
                subject: subject.clone(),
                errors: vec![error.to_string()],
            },
        }
    }

    /// Construct a value for an already-resolved property.
    pub fn new_property_object_value(
        &self,
        property: Property,
        raw: &str,
        caption: Option<&str>,
        subject: &Subject,
    ) -> DataValue {
        let (item, errors) = match parse_typed(self.type_for(&property), raw) {
            Ok(item) => (retarget_namespace(&property, item), Vec::new()),
            Err(message) => (DataItem::Error(vec![message.clone()]), vec![message]),
        };
        DataValue {
            property: Some(property),
            item,
            raw: raw.to_string(),
            caption: caption.map(str::to_string),
            subject: subject.clone(),
            errors,
        }
    }
}

/// Page values for `_TYPE` name a type declaration page; an unprefixed
/// value like `Number` resolves into the type namespace.
fn retarget_namespace(property: &Property, item: DataItem) -> DataItem {
    if *property != Property::Builtin(BuiltinProperty::HasType) {
        return item;
    }
    match item {
        DataItem::WikiPage(subject) if subject.title().namespace() == Namespace::MAIN => {
            DataItem::WikiPage(Subject::page(Title::from_db_key(
                Namespace::TYPE,
                subject.title().db_key(),
            )))
        }
        other => other,
    }
}

/// Parse a raw user string as the given type.
fn parse_typed(type_id: TypeId, raw: &str) -> Result<DataItem, String> {
    let trimmed = raw.trim();
    match type_id {
        TypeId::Number => {
            let cleaned: String = trimmed
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            cleaned
                .parse::<f64>()
                .map(DataItem::Number)
                .map_err(|_| format!("`{trimmed}` is not a number"))
        }
        TypeId::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(DataItem::Boolean(true)),
            "false" | "f" | "no" | "n" | "0" => Ok(DataItem::Boolean(false)),
            _ => Err(format!("`{trimmed}` is not a boolean")),
        },
        TypeId::Time => {
            let parsed = if trimmed.len() == 14 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                WikiTime::from_timestamp14(trimmed)
            } else {
                WikiTime::from_display(trimmed)
            };
            parsed.map(DataItem::Time).map_err(|e| e.to_string())
        }
        TypeId::Text => Ok(DataItem::Blob(trimmed.to_string())),
        TypeId::Page => Title::from_prefixed_text(trimmed)
            .map(|title| DataItem::WikiPage(Subject::page(title)))
            .map_err(|e| format!("`{trimmed}` is not a valid page name: {e}")),
    }
}

/// Annotate a container from raw markup input: resolve the property label,
/// construct the value, and apply it.
///
/// Inverse properties are rejected with a user-visible message and the
/// container stays untouched; the constructed value object is returned either
/// way so callers can render errors inline.
pub fn annotate(
    data: &mut SemanticData,
    factory: &DataValueFactory,
    label: &str,
    raw: &str,
    caption: Option<&str>,
) -> DataValue {
    let subject = data.subject().clone();
    match Property::user_property(label) {
        Err(error) => DataValue {
            property: None,
            item: DataItem::Error(vec![error.to_string()]),
            raw: raw.to_string(),
            caption: caption.map(str::to_string),
            subject,
            errors: vec![error.to_string()],
        },
        Ok(property) if property.is_inverse() => {
            let mut value =
                factory.new_property_object_value(property, raw, caption, &subject);
            value.add_error(
                "Properties with inverted notation cannot be used for annotation",
            );
            value
        }
        Ok(property) => {
            let value = factory.new_property_object_value(property, raw, caption, &subject);
            value.add_to(data);
            value
        }
    }
}
