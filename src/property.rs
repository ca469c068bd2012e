//! Named predicates: builtin and user-declared properties.
//!
//! Builtin properties carry fixed ids (`_MDAT`, `_TYPE`, …) and a fixed value
//! type; user properties are identified by their declaration page key. A
//! leading `-` on a user label marks the inverse reading of the property,
//! which can be queried but never annotated directly.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{Namespace, Title, TitleError, to_db_key};
use crate::dataitem::TypeId;

/// Errors raised while resolving a user-supplied property label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("invalid property name: {0}")]
    InvalidLabel(#[from] TitleError),
}

/// System-defined properties with reserved ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinProperty {
    /// `_MDAT` - time of the last edit
    ModificationDate,
    /// `_CDAT` - time of the first revision
    CreationDate,
    /// `_NEWP` - whether the last edit created the page
    IsNewPage,
    /// `_LEDT` - user page of the last editor
    LastEditor,
    /// `_TYPE` - declared value type of a property page
    HasType,
    /// `_PVAL` - allowed value declared on a property page
    AllowsValue,
    /// `_CONV` - conversion factor declared on a type page
    ConversionFactor,
    /// `_ERRP` - records that a page carries an improper value for a property
    HasImproperValue,
    /// `_SKEY` - explicit sort key
    SortKey,
    /// `_SOBJ` - attaches a subobject container to its parent page
    HasSubobject,
}

impl BuiltinProperty {
    pub const ALL: &'static [BuiltinProperty] = &[
        BuiltinProperty::ModificationDate,
        BuiltinProperty::CreationDate,
        BuiltinProperty::IsNewPage,
        BuiltinProperty::LastEditor,
        BuiltinProperty::HasType,
        BuiltinProperty::AllowsValue,
        BuiltinProperty::ConversionFactor,
        BuiltinProperty::HasImproperValue,
        BuiltinProperty::SortKey,
        BuiltinProperty::HasSubobject,
    ];

    /// The reserved id stored on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            BuiltinProperty::ModificationDate => "_MDAT",
            BuiltinProperty::CreationDate => "_CDAT",
            BuiltinProperty::IsNewPage => "_NEWP",
            BuiltinProperty::LastEditor => "_LEDT",
            BuiltinProperty::HasType => "_TYPE",
            BuiltinProperty::AllowsValue => "_PVAL",
            BuiltinProperty::ConversionFactor => "_CONV",
            BuiltinProperty::HasImproperValue => "_ERRP",
            BuiltinProperty::SortKey => "_SKEY",
            BuiltinProperty::HasSubobject => "_SOBJ",
        }
    }

    /// Canonical user-visible label.
    pub fn label(&self) -> &'static str {
        match self {
            BuiltinProperty::ModificationDate => "Modification date",
            BuiltinProperty::CreationDate => "Creation date",
            BuiltinProperty::IsNewPage => "Is a new page",
            BuiltinProperty::LastEditor => "Last editor is",
            BuiltinProperty::HasType => "Has type",
            BuiltinProperty::AllowsValue => "Allows value",
            BuiltinProperty::ConversionFactor => "Corresponds to",
            BuiltinProperty::HasImproperValue => "Has improper value for",
            BuiltinProperty::SortKey => "Has sort key",
            BuiltinProperty::HasSubobject => "Has subobject",
        }
    }

    /// The fixed value type of this property.
    pub fn type_id(&self) -> TypeId {
        match self {
            BuiltinProperty::ModificationDate | BuiltinProperty::CreationDate => TypeId::Time,
            BuiltinProperty::IsNewPage => TypeId::Boolean,
            BuiltinProperty::LastEditor
            | BuiltinProperty::HasType
            | BuiltinProperty::HasImproperValue
            | BuiltinProperty::HasSubobject => TypeId::Page,
            BuiltinProperty::AllowsValue
            | BuiltinProperty::ConversionFactor
            | BuiltinProperty::SortKey => TypeId::Text,
        }
    }

    pub fn from_id(id: &str) -> Option<BuiltinProperty> {
        Self::ALL.iter().find(|p| p.id() == id).copied()
    }

    pub fn from_label(label: &str) -> Option<BuiltinProperty> {
        Self::ALL.iter().find(|p| p.label() == label).copied()
    }
}

/// A named predicate, system-defined or user-declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    Builtin(BuiltinProperty),
    User { key: SmolStr, inverse: bool },
}

impl Property {
    pub fn builtin(builtin: BuiltinProperty) -> Property {
        Property::Builtin(builtin)
    }

    /// A user property by db key, non-inverse.
    pub fn user(key: &str) -> Property {
        Property::User {
            key: SmolStr::from(to_db_key(key)),
            inverse: false,
        }
    }

    /// Resolve a label as it appears in wiki markup.
    ///
    /// Builtin labels take the privileged path; a leading `-` flags the
    /// inverse reading; anything that would not make a valid property page
    /// title is rejected.
    pub fn user_property(label: &str) -> Result<Property, PropertyError> {
        let trimmed = label.trim();
        let (inverse, name) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };
        if !inverse {
            if let Some(builtin) = BuiltinProperty::from_label(name) {
                return Ok(Property::Builtin(builtin));
            }
        }
        let title = Title::new(Namespace::PROPERTY, name)?;
        Ok(Property::User {
            key: SmolStr::from(title.db_key()),
            inverse,
        })
    }

    /// Storage key: reserved id for builtins, db key for user properties.
    pub fn key(&self) -> &str {
        match self {
            Property::Builtin(b) => b.id(),
            Property::User { key, .. } => key,
        }
    }

    /// User-visible label.
    pub fn label(&self) -> String {
        match self {
            Property::Builtin(b) => b.label().to_string(),
            Property::User { key, .. } => key.replace('_', " "),
        }
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self, Property::User { .. })
    }

    /// Inverse properties cannot be annotated directly.
    pub fn is_inverse(&self) -> bool {
        matches!(self, Property::User { inverse: true, .. })
    }

    /// The fixed type for builtins; `None` for user properties, whose type
    /// comes from their `_TYPE` declaration.
    pub fn fixed_type(&self) -> Option<TypeId> {
        match self {
            Property::Builtin(b) => Some(b.type_id()),
            Property::User { .. } => None,
        }
    }

    /// The property's own declaration page. Inverse readings have no page of
    /// their own.
    pub fn as_wiki_page(&self) -> Option<Title> {
        if self.is_inverse() {
            return None;
        }
        match self {
            Property::Builtin(b) => Some(Title::from_db_key(
                Namespace::PROPERTY,
                &to_db_key(b.label()),
            )),
            Property::User { key, .. } => Some(Title::from_db_key(Namespace::PROPERTY, key)),
        }
    }
}
