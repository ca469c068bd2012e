//! `{{#ask}}` and `{{#show}}` against the in-memory store.

use pagefacts::config::Settings;
use pagefacts::dataitem::DataItem;
use pagefacts::property::Property;
use pagefacts::semdata::{SemanticData, Subject};
use pagefacts::store::{MemoryStore, Store};

use crate::helpers::{main_title, parse_page};

fn populated_store() -> MemoryStore {
    let store = MemoryStore::new();

    let mut germany = SemanticData::new(Subject::page(main_title("Germany")));
    germany.add_property_value(
        Property::user("Has capital"),
        DataItem::WikiPage(Subject::page(main_title("Berlin"))),
    );
    store.update_data(&germany).unwrap();

    let mut berlin = SemanticData::new(Subject::page(main_title("Berlin")));
    berlin.add_property_value(Property::user("Has area"), DataItem::Number(891.7));
    store.update_data(&berlin).unwrap();

    store
}

#[test]
fn test_ask_renders_matching_subjects() {
    let store = populated_store();
    let (rendered, _) = parse_page(
        &store,
        Settings::default(),
        main_title("Sandbox"),
        "{{#ask: [[Has capital::Berlin]]}}",
    );
    assert_eq!(rendered, "Germany");
}

#[test]
fn test_ask_with_printout() {
    let store = populated_store();
    let (rendered, _) = parse_page(
        &store,
        Settings::default(),
        main_title("Sandbox"),
        "{{#ask: [[Berlin]] |?Has area}}",
    );
    assert_eq!(rendered, "Berlin (891.7)");
}

#[test]
fn test_show_is_an_ask_over_one_page() {
    let store = populated_store();
    let (rendered, _) = parse_page(
        &store,
        Settings::default(),
        main_title("Sandbox"),
        "{{#show: Berlin |?Has area}}",
    );
    assert_eq!(rendered, "Berlin (891.7)");
}

#[test]
fn test_disabled_queries_render_notice() {
    let store = populated_store();
    let settings = Settings::default().with_query_enabled(false);
    let (rendered, _) = parse_page(
        &store,
        settings,
        main_title("Sandbox"),
        "{{#ask: [[Has capital::Berlin]]}}",
    );
    assert!(rendered.contains("disabled"));
}

#[test]
fn test_unsupported_condition_renders_error() {
    let store = populated_store();
    let (rendered, _) = parse_page(
        &store,
        Settings::default(),
        main_title("Sandbox"),
        "{{#ask: Berlin OR Hamburg}}",
    );
    assert!(rendered.contains("error"));
}

#[test]
fn test_missing_condition_renders_error() {
    let store = populated_store();
    let (rendered, _) = parse_page(
        &store,
        Settings::default(),
        main_title("Sandbox"),
        "{{#ask:}}",
    );
    assert!(rendered.contains("error"));
}
