//! Behavior of the `{{#subobject}}` parser function, end to end.

use rstest::rstest;

use pagefacts::config::Settings;
use pagefacts::context::{ParserData, ParserOutput};
use pagefacts::dataitem::DataItem;
use pagefacts::datavalue::DataValueFactory;
use pagefacts::parser::FunctionRegistry;
use pagefacts::parser::functions::SubobjectParserFunction;
use pagefacts::parser::process_text;
use pagefacts::property::{BuiltinProperty, Property};
use pagefacts::semdata::HashIdGenerator;
use pagefacts::store::MemoryStore;

use crate::helpers::{attached_subobjects, fixtures, main_title, parse_page};

fn parse(text: &str) -> (String, pagefacts::context::ParserOutput) {
    let store = MemoryStore::new();
    parse_page(&store, Settings::default(), main_title("Berlin"), text)
}

#[rstest]
#[case::empty_lead(fixtures::ANONYMOUS_SUBOBJECT)]
#[case::placeholder_lead(fixtures::PLACEHOLDER_SUBOBJECT)]
fn test_anonymous_identifier_is_derived(#[case] text: &str) {
    let (_, output) = parse(text);
    let subobjects = attached_subobjects(&output);
    assert_eq!(subobjects.len(), 1);

    let name = subobjects[0].subject().subobject_name().unwrap().to_string();
    assert!(name.starts_with('_'), "derived ids are prefixed: {name}");

    // The digest covers exactly the named parameter list.
    let expected = HashIdGenerator::new(
        vec![("Has age".to_string(), vec!["42".to_string()])],
        "_",
    )
    .generate_id();
    assert_eq!(name, expected);
}

#[test]
fn test_identical_parameters_agree_on_identifier() {
    let (_, first) = parse(fixtures::ANONYMOUS_SUBOBJECT);
    let (_, second) = parse(fixtures::ANONYMOUS_SUBOBJECT);
    assert_eq!(
        attached_subobjects(&first)[0].subject(),
        attached_subobjects(&second)[0].subject()
    );
}

#[test]
fn test_parameter_order_changes_identifier() {
    let (_, forward) = parse("{{#subobject:|A=1|B=2}}");
    let (_, reversed) = parse("{{#subobject:|B=2|A=1}}");
    assert_ne!(
        attached_subobjects(&forward)[0].subject(),
        attached_subobjects(&reversed)[0].subject()
    );
}

#[test]
fn test_explicit_identifier_used_verbatim() {
    let (_, output) = parse(fixtures::NAMED_SUBOBJECT);
    let subobjects = attached_subobjects(&output);
    assert_eq!(
        subobjects[0].subject().subobject_name(),
        Some("employment")
    );
}

#[test]
fn test_parameters_become_annotations() {
    let (_, output) = parse(fixtures::NAMED_SUBOBJECT);
    let subobject = &attached_subobjects(&output)[0];
    assert!(subobject.has_property(&Property::user("Has employer")));
    assert!(subobject.has_property(&Property::user("Has salary")));
}

#[test]
fn test_sortby_copies_named_property_into_sort_key() {
    let (_, output) = parse(fixtures::SORTBY_PRESENT);
    let subobject = &attached_subobjects(&output)[0];
    let sort_key = Property::builtin(BuiltinProperty::SortKey);
    assert_eq!(
        subobject.get_property_values(&sort_key),
        [DataItem::Blob("Ada".to_string())]
    );
    // The directive itself never becomes an annotation.
    assert!(!subobject.has_property(&Property::user("@sortby")));
}

#[test]
fn test_sortby_with_absent_property_leaves_sort_key_unset() {
    let (_, output) = parse(fixtures::SORTBY_ABSENT);
    let subobject = &attached_subobjects(&output)[0];
    let sort_key = Property::builtin(BuiltinProperty::SortKey);
    assert!(subobject.get_property_values(&sort_key).is_empty());
}

#[test]
fn test_malformed_parameters_render_errors_inline() {
    let (rendered, output) = parse(fixtures::MALFORMED_SUBOBJECT);
    assert!(rendered.contains("error"));
    // The well-formed parameter still made it in.
    let subobject = &attached_subobjects(&output)[0];
    assert!(subobject.has_property(&Property::user("Has age")));
}

#[test]
fn test_surrounding_text_untouched() {
    let (rendered, _) = parse(fixtures::EMBEDDED_SUBOBJECT);
    assert!(rendered.starts_with("Employment record: "));
    assert!(rendered.ends_with(" filed."));
}

#[test]
fn test_object_reference_injects_back_link_and_hashes() {
    let registry = {
        let mut registry = FunctionRegistry::new();
        registry.register(Box::new(
            SubobjectParserFunction::new(DataValueFactory::new()).with_object_reference(true),
        ));
        registry
    };

    let mut output = ParserOutput::new();
    let mut ctx = ParserData::new(main_title("Berlin"), &mut output);
    process_text("{{#subobject:located|Has area=891}}", &registry, &mut ctx);

    let subobject = &attached_subobjects(&output)[0];
    // Explicit id plus reference mode still derives a digest id.
    let name = subobject.subject().subobject_name().unwrap();
    assert!(name.starts_with('_'));
    // The synthetic parameter annotates the parent page under the lead name.
    let back_link = Property::user("located");
    assert_eq!(
        subobject.get_property_values(&back_link),
        [DataItem::WikiPage(pagefacts::semdata::Subject::page(
            main_title("Berlin")
        ))]
    );
}

#[test]
fn test_object_reference_is_ignored_for_anonymous_ids() {
    let registry = {
        let mut registry = FunctionRegistry::new();
        registry.register(Box::new(
            SubobjectParserFunction::new(DataValueFactory::new()).with_object_reference(true),
        ));
        registry
    };

    let mut output = ParserOutput::new();
    let mut ctx = ParserData::new(main_title("Berlin"), &mut output);
    process_text(fixtures::ANONYMOUS_SUBOBJECT, &registry, &mut ctx);

    let subobject = &attached_subobjects(&output)[0];
    // No lead name to inject under; only the real parameter annotates.
    let properties: Vec<String> =
        subobject.properties().map(|p| p.label()).collect();
    assert_eq!(properties, vec!["Has age".to_string()]);
}
