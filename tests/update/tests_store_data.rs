//! The save pipeline: special properties, change detection, job fan-out.

use pagefacts::base::{Namespace, Title};
use pagefacts::config::Settings;
use pagefacts::context::ParserOutput;
use pagefacts::dataitem::{DataItem, WikiTime};
use pagefacts::property::{BuiltinProperty, Property};
use pagefacts::semdata::{SemanticData, Subject};
use pagefacts::store::{MemoryStore, Store};
use pagefacts::update::{DataUpdater, MemoryJobQueue, PageInfo, UpdateJob};

use crate::helpers::main_title;

fn property_title(name: &str) -> Title {
    Title::new(Namespace::PROPERTY, name).unwrap()
}

fn type_title(name: &str) -> Title {
    Title::new(Namespace::TYPE, name).unwrap()
}

fn type_page_item(name: &str) -> DataItem {
    DataItem::WikiPage(Subject::page(type_title(name)))
}

fn output_with(data: SemanticData) -> ParserOutput {
    let mut output = ParserOutput::new();
    output.set_semantic_data(data);
    output
}

fn job_titles(queue: &MemoryJobQueue) -> Vec<String> {
    queue
        .jobs()
        .iter()
        .map(UpdateJob::title)
        .map(Title::prefixed_text)
        .collect()
}

/// Store state: `Property:Has_population` typed Number, used by Berlin,
/// with Atlantis recorded as carrying an improper value for it.
fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let property_page = Subject::page(property_title("Has population"));

    let mut declaration = SemanticData::new(property_page.clone());
    declaration.add_property_value(
        Property::builtin(BuiltinProperty::HasType),
        type_page_item("Number"),
    );
    store.update_data(&declaration).unwrap();

    let mut berlin = SemanticData::new(Subject::page(main_title("Berlin")));
    berlin.add_property_value(Property::user("Has population"), DataItem::Number(3.6e6));
    store.update_data(&berlin).unwrap();

    let mut atlantis = SemanticData::new(Subject::page(main_title("Atlantis")));
    atlantis.add_property_value(
        Property::builtin(BuiltinProperty::HasImproperValue),
        DataItem::WikiPage(property_page),
    );
    store.update_data(&atlantis).unwrap();

    store
}

#[test]
fn test_unprocessed_namespace_clears_stored_data() {
    let store = MemoryStore::new();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = Title::new(Namespace::USER, "Visitor").unwrap();
    let subject = Subject::page(title.clone());

    // Prior state exists, and the new parse collected annotations.
    let mut prior = SemanticData::new(subject.clone());
    prior.add_property_value(Property::user("Has role"), DataItem::Blob("admin".into()));
    store.update_data(&prior).unwrap();

    let mut collected = SemanticData::new(subject.clone());
    collected.add_property_value(Property::user("Has role"), DataItem::Blob("admin".into()));
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    // Everything was dropped, regardless of what the markup requested.
    assert!(
        store
            .get_property_values(&subject, &Property::user("Has role"))
            .unwrap()
            .is_empty()
    );
    assert!(output.semantic_data().unwrap().is_empty());
    assert!(queue.jobs().is_empty());
}

#[test]
fn test_special_properties_filled_from_page_info() {
    let store = MemoryStore::new();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default().with_page_special_properties(vec![
        BuiltinProperty::ModificationDate,
        BuiltinProperty::CreationDate,
        BuiltinProperty::IsNewPage,
        BuiltinProperty::LastEditor,
    ]);
    let title = main_title("Berlin");
    let info = PageInfo {
        modified: Some("20140228120503".to_string()),
        created: Some("20010115080000".to_string()),
        is_new: false,
        last_editor: Some("Ada".to_string()),
    };

    let mut output = ParserOutput::new();
    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &info, true)
        .unwrap();

    let data = output.semantic_data().unwrap();
    assert_eq!(
        data.get_property_values(&Property::builtin(BuiltinProperty::ModificationDate)),
        [DataItem::Time(
            WikiTime::from_timestamp14("20140228120503").unwrap()
        )]
    );
    assert_eq!(
        data.get_property_values(&Property::builtin(BuiltinProperty::IsNewPage)),
        [DataItem::Boolean(false)]
    );
    let editor = data.get_property_values(&Property::builtin(BuiltinProperty::LastEditor));
    assert_eq!(
        editor,
        [DataItem::WikiPage(Subject::page(
            Title::new(Namespace::USER, "Ada").unwrap()
        ))]
    );
}

#[test]
fn test_existing_annotation_is_not_recomputed() {
    let store = MemoryStore::new();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = main_title("Berlin");

    // The parse already annotated a modification date.
    let pinned = DataItem::Time(WikiTime::from_timestamp14("19991231235959").unwrap());
    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::ModificationDate),
        pinned.clone(),
    );
    let mut output = output_with(collected);

    let info = PageInfo {
        modified: Some("20140228120503".to_string()),
        ..PageInfo::default()
    };
    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &info, true)
        .unwrap();

    assert_eq!(
        output
            .semantic_data()
            .unwrap()
            .get_property_values(&Property::builtin(BuiltinProperty::ModificationDate)),
        [pinned]
    );
}

#[test]
fn test_duplicate_special_property_configuration_computed_once() {
    let store = MemoryStore::new();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default().with_page_special_properties(vec![
        BuiltinProperty::IsNewPage,
        BuiltinProperty::IsNewPage,
    ]);
    let title = main_title("Berlin");

    let mut output = ParserOutput::new();
    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    let values = output
        .semantic_data()
        .unwrap()
        .get_property_values(&Property::builtin(BuiltinProperty::IsNewPage))
        .to_vec();
    assert_eq!(values, vec![DataItem::Boolean(false)]);
}

#[test]
fn test_changed_property_type_enqueues_dependents() {
    let store = seeded_store();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = property_title("Has population");

    // The declaration page now says Text instead of Number.
    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::HasType),
        type_page_item("Text"),
    );
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    let titles = job_titles(&queue);
    assert!(titles.contains(&"Berlin".to_string()), "{titles:?}");
    assert!(titles.contains(&"Atlantis".to_string()), "{titles:?}");

    // The new declaration was persisted after the comparison reads.
    let stored = store
        .get_property_values(
            &Subject::page(title),
            &Property::builtin(BuiltinProperty::HasType),
        )
        .unwrap();
    assert_eq!(stored, vec![type_page_item("Text")]);
}

#[test]
fn test_unchanged_declaration_enqueues_nothing() {
    let store = seeded_store();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = property_title("Has population");

    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::HasType),
        type_page_item("Number"),
    );
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    assert!(queue.batches().is_empty());
}

#[test]
fn test_job_creation_can_be_suppressed() {
    let store = seeded_store();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = property_title("Has population");

    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::HasType),
        type_page_item("Text"),
    );
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), false)
        .unwrap();
    assert!(queue.jobs().is_empty());

    // The disabled feature flag suppresses jobs the same way.
    let store = seeded_store();
    let settings = Settings::default().with_update_jobs(false);
    let mut output = output_with({
        let mut data = SemanticData::new(Subject::page(title.clone()));
        data.add_property_value(
            Property::builtin(BuiltinProperty::HasType),
            type_page_item("Text"),
        );
        data
    });
    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();
    assert!(queue.jobs().is_empty());
}

#[test]
fn test_changed_allowed_values_enqueue_dependents() {
    let store = seeded_store();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = property_title("Has population");

    // Type unchanged, but an allowed-values declaration appeared.
    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::HasType),
        type_page_item("Number"),
    );
    collected.add_property_value(
        Property::builtin(BuiltinProperty::AllowsValue),
        DataItem::Blob("1".into()),
    );
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    assert!(job_titles(&queue).contains(&"Berlin".to_string()));
}

#[test]
fn test_changed_conversion_factor_cascades_through_type() {
    let store = seeded_store();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = type_title("Number");

    // The type page gains a conversion factor it did not have before.
    let mut collected = SemanticData::new(Subject::page(title.clone()));
    collected.add_property_value(
        Property::builtin(BuiltinProperty::ConversionFactor),
        DataItem::Blob("0.001 k".into()),
    );
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    let titles = job_titles(&queue);
    // The declaring property page, its users, and its error holders.
    assert!(
        titles.contains(&"Property:Has population".to_string()),
        "{titles:?}"
    );
    assert!(titles.contains(&"Berlin".to_string()), "{titles:?}");
    assert!(titles.contains(&"Atlantis".to_string()), "{titles:?}");
}

#[test]
fn test_main_namespace_save_persists_collected_facts() {
    let store = MemoryStore::new();
    let queue = MemoryJobQueue::new();
    let settings = Settings::default();
    let title = main_title("Berlin");
    let subject = Subject::page(title.clone());

    let mut collected = SemanticData::new(subject.clone());
    collected.add_property_value(Property::user("Has area"), DataItem::Number(891.7));
    let mut output = output_with(collected);

    DataUpdater::new(&store, &queue, &settings)
        .store_data(&mut output, &title, &PageInfo::default(), true)
        .unwrap();

    assert_eq!(
        store
            .get_property_values(&subject, &Property::user("Has area"))
            .unwrap(),
        vec![DataItem::Number(891.7)]
    );
    assert!(queue.jobs().is_empty());
}
