pub mod fixtures;

use pagefacts::base::{Namespace, Title};
use pagefacts::config::Settings;
use pagefacts::context::{ParserData, ParserOutput};
use pagefacts::dataitem::DataItem;
use pagefacts::property::{BuiltinProperty, Property};
use pagefacts::registry::Extension;
use pagefacts::semdata::SemanticData;
use pagefacts::store::MemoryStore;

/// A title in the main namespace.
pub fn main_title(name: &str) -> Title {
    Title::new(Namespace::MAIN, name).unwrap()
}

/// Run one text through the registered parser functions for one page,
/// returning the rendered text and the populated output slot.
pub fn parse_page(
    store: &MemoryStore,
    settings: Settings,
    title: Title,
    text: &str,
) -> (String, ParserOutput) {
    let extension = Extension::new(settings);
    let registry = extension.register_parser_functions(store);
    let mut output = ParserOutput::new();
    let mut ctx = ParserData::new(title, &mut output);
    let rendered = extension.process(&registry, &mut ctx, text);
    (rendered, output)
}

/// The subobject containers attached to the parsed page.
pub fn attached_subobjects(output: &ParserOutput) -> Vec<SemanticData> {
    let Some(data) = output.semantic_data() else {
        return Vec::new();
    };
    let property = Property::builtin(BuiltinProperty::HasSubobject);
    data.get_property_values(&property)
        .iter()
        .filter_map(|item| match item {
            DataItem::Container(container) => Some((**container).clone()),
            _ => None,
        })
        .collect()
}
