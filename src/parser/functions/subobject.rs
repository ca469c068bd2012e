//! The `{{#subobject}}` parser function.

use crate::context::ParserData;
use crate::datavalue::DataValueFactory;
use crate::property::{BuiltinProperty, Property};
use crate::semdata::{HashIdGenerator, Subobject};

use super::super::params::ParamList;
use super::{ParserFunction, render_errors};

/// Values the lead argument may take to request an anonymous identifier.
fn is_anonymous(first: Option<&str>) -> bool {
    matches!(first, None | Some("") | Some("-"))
}

/// Creates a subobject from named parameters and attaches it to the page
/// being parsed.
pub struct SubobjectParserFunction {
    factory: DataValueFactory,
    object_reference: bool,
}

impl SubobjectParserFunction {
    pub fn new(factory: DataValueFactory) -> SubobjectParserFunction {
        SubobjectParserFunction {
            factory,
            object_reference: false,
        }
    }

    /// Enable injection of an object reference pointing back at the parent
    /// page. The reference applies once per invocation and only when the
    /// caller supplied an explicit identifier.
    pub fn with_object_reference(mut self, object_reference: bool) -> SubobjectParserFunction {
        self.object_reference = object_reference;
        self
    }

    /// Identifier per the configured mode: explicit lead argument, or a
    /// deterministic digest of the (possibly augmented) parameter list.
    fn resolve_id(&self, params: &mut ParamList, parent: &str) -> String {
        let first = params.get_first().map(str::to_string);
        let anonymous = is_anonymous(first.as_deref());

        if self.object_reference && !anonymous {
            // The back-link participates in the digest.
            if let Some(first) = &first {
                params.add_parameter(first, parent);
            }
        }

        if self.object_reference || anonymous {
            HashIdGenerator::new(params.to_pairs(), "_").generate_id()
        } else {
            first.unwrap_or_default()
        }
    }
}

/// Resolve `@sortby`: copy the named property's values into `@sortkey`,
/// then drop the directive. A `@sortby` referencing an absent parameter
/// leaves `@sortkey` unset.
fn apply_sort_by(pairs: &mut Vec<(String, Vec<String>)>) {
    let Some(position) = pairs.iter().position(|(name, _)| name == "@sortby") else {
        return;
    };
    let (_, mut directive_values) = pairs.remove(position);
    let Some(property) = directive_values.pop() else {
        return;
    };
    let Some(values) = pairs
        .iter()
        .find(|(name, _)| *name == property)
        .map(|(_, values)| values.clone())
    else {
        return;
    };
    match pairs.iter_mut().find(|(name, _)| name == "@sortkey") {
        Some(entry) => entry.1 = values,
        None => pairs.push(("@sortkey".to_string(), values)),
    }
}

impl ParserFunction for SubobjectParserFunction {
    fn name(&self) -> &'static str {
        "subobject"
    }

    fn handle(&self, params: ParamList, ctx: &mut ParserData<'_>) -> String {
        let mut params = params;
        let parent_text = ctx.title().prefixed_text();
        let id = self.resolve_id(&mut params, &parent_text);

        let mut subobject = Subobject::new(ctx.title().clone());
        if let Err(error) = subobject.set_semantic_data(&id) {
            params.add_error(error.to_string());
        }

        for extra in params.unkeyed().to_vec() {
            params.add_error(format!("missing value for parameter `{extra}`"));
        }

        let parent_subject = ctx.semantic_data().subject().clone();
        let mut pairs = params.to_pairs();
        apply_sort_by(&mut pairs);

        for (name, values) in pairs {
            for value in values {
                let data_value = if name == "@sortkey" {
                    self.factory.new_property_object_value(
                        Property::builtin(BuiltinProperty::SortKey),
                        &value,
                        None,
                        &parent_subject,
                    )
                } else {
                    self.factory
                        .new_property_value(&name, &value, None, &parent_subject)
                };
                subobject.add_data_value(data_value);
            }
        }

        // Attach the finished container to the parent page.
        let parent = ctx.semantic_data_mut();
        if let Some(container) = subobject.container() {
            parent.add_property_value(subobject.property(), container);
        }

        let mut errors = subobject.errors();
        errors.extend(parent.errors().iter().cloned());
        errors.extend(params.errors().iter().cloned());
        render_errors(&errors)
    }
}
