//! The save pipeline.
//!
//! When a page parse completes, [`DataUpdater::store_data`] fills in special
//! properties from page metadata, diffs declaration properties against the
//! store, fans out update jobs to dependent pages when a declaration
//! changed, and persists (or clears) the container.

mod job;

use rustc_hash::FxHashSet;

use crate::base::{Namespace, Title};
use crate::config::Settings;
use crate::context::ParserOutput;
use crate::dataitem::{DataItem, WikiTime, equal_data_items};
use crate::property::{BuiltinProperty, Property};
use crate::semdata::{SemanticData, Subject};
use crate::store::{Store, StoreError};

pub use job::{JobQueue, JobQueueError, MemoryJobQueue, UpdateJob};

/// Errors raised by the save pipeline; all fallibility comes from the store
/// and the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] JobQueueError),
}

/// Page and revision metadata the host passes in at save time.
#[derive(Debug, Clone, Default)]
pub struct PageInfo {
    /// Timestamp of the revision being saved, `YYYYMMDDhhmmss`.
    pub modified: Option<String>,
    /// Timestamp of the page's first revision.
    pub created: Option<String>,
    /// Whether this save created the page.
    pub is_new: bool,
    /// Name of the user who made the last edit.
    pub last_editor: Option<String>,
}

/// Persists parse results and cascades declaration changes.
pub struct DataUpdater<'a> {
    store: &'a dyn Store,
    queue: &'a dyn JobQueue,
    settings: &'a Settings,
}

impl<'a> DataUpdater<'a> {
    pub fn new(
        store: &'a dyn Store,
        queue: &'a dyn JobQueue,
        settings: &'a Settings,
    ) -> DataUpdater<'a> {
        DataUpdater {
            store,
            queue,
            settings,
        }
    }

    /// Store the collected semantic data for a saved page, clearing out any
    /// outdated entries.
    ///
    /// When the saved page declares a property or a data type and `make_jobs`
    /// is set, changed declarations trigger one update job per dependent
    /// page. The store reads for that comparison must happen before the
    /// store update; even finding the uses of a property fails after its
    /// type changed.
    pub fn store_data(
        &self,
        output: &mut ParserOutput,
        title: &Title,
        info: &PageInfo,
        make_jobs: bool,
    ) -> Result<(), UpdateError> {
        let namespace = title.namespace();
        let process_semantics = self.settings.is_semantics_processed(namespace);

        let subject = Subject::page(title.clone());
        let mut data = output
            .take_semantic_data()
            .unwrap_or_else(|| SemanticData::new(subject.clone()));

        if process_semantics {
            self.add_special_properties(&mut data, info);
        } else {
            // Found data, but all further operations act as if it was empty.
            data = SemanticData::new(data.subject().clone());
        }

        let make_jobs = make_jobs && self.settings.update_jobs_enabled();
        let mut jobs: Vec<UpdateJob> = Vec::new();
        let dirty = if make_jobs && namespace == Namespace::PROPERTY {
            self.check_property_declarations(&data, &mut jobs, title)?
        } else if make_jobs && namespace == Namespace::TYPE {
            self.check_type_declarations(&data, &mut jobs, title)?
        } else {
            false
        };

        if process_semantics {
            self.store.update_data(&data)?;
        } else {
            self.store.clear_data(data.subject())?;
        }
        output.set_semantic_data(data);

        if dirty {
            tracing::debug!(
                page = %title,
                jobs = jobs.len(),
                "declaration changed, enqueuing dependent updates"
            );
            self.queue.batch_insert(jobs)?;
        }

        Ok(())
    }

    /// Fill unpopulated special properties from page metadata. Each property
    /// is computed at most once per save; first match wins when the
    /// configuration lists one twice.
    fn add_special_properties(&self, data: &mut SemanticData, info: &PageInfo) {
        let mut seen: FxHashSet<BuiltinProperty> = FxHashSet::default();
        for &builtin in self.settings.page_special_properties() {
            if !seen.insert(builtin) {
                continue;
            }
            let property = Property::builtin(builtin);
            if !data.get_property_values(&property).is_empty() {
                continue;
            }
            let value = match builtin {
                BuiltinProperty::ModificationDate => info
                    .modified
                    .as_deref()
                    .and_then(|stamp| WikiTime::from_timestamp14(stamp).ok())
                    .map(DataItem::Time),
                BuiltinProperty::CreationDate => info
                    .created
                    .as_deref()
                    .and_then(|stamp| WikiTime::from_timestamp14(stamp).ok())
                    .map(DataItem::Time),
                BuiltinProperty::IsNewPage => Some(DataItem::Boolean(info.is_new)),
                BuiltinProperty::LastEditor => info.last_editor.as_deref().and_then(|name| {
                    Title::new(Namespace::USER, name)
                        .ok()
                        .map(|user_page| DataItem::WikiPage(Subject::page(user_page)))
                }),
                // Other builtins are not derivable from page metadata.
                _ => None,
            };
            if let Some(value) = value {
                data.add_property_value(property, value);
            }
        }
    }

    /// A property page: dirty when its type or any configured declaration
    /// property changed since the last save.
    fn check_property_declarations(
        &self,
        data: &SemanticData,
        jobs: &mut Vec<UpdateJob>,
        title: &Title,
    ) -> Result<bool, StoreError> {
        let type_property = Property::builtin(BuiltinProperty::HasType);
        let old_type = self.store.get_property_values(data.subject(), &type_property)?;
        let mut dirty = !equal_data_items(&old_type, data.get_property_values(&type_property));

        if !dirty {
            for &declaration in self.settings.declaration_properties() {
                let property = Property::builtin(declaration);
                let old = self.store.get_property_values(data.subject(), &property)?;
                dirty = dirty || !equal_data_items(&old, data.get_property_values(&property));
            }
        }

        if dirty {
            let property = Property::user(title.db_key());
            self.collect_dependents(&property, data.subject(), jobs)?;
        }
        Ok(dirty)
    }

    /// A type page: dirty when its conversion factors changed. Every
    /// property declared with this type is re-queued, along with every page
    /// using one of those properties.
    fn check_type_declarations(
        &self,
        data: &SemanticData,
        jobs: &mut Vec<UpdateJob>,
        title: &Title,
    ) -> Result<bool, StoreError> {
        let conversion = Property::builtin(BuiltinProperty::ConversionFactor);
        let old = self.store.get_property_values(data.subject(), &conversion)?;
        let dirty = !equal_data_items(&old, data.get_property_values(&conversion));

        if dirty {
            let type_property = Property::builtin(BuiltinProperty::HasType);
            let type_page = DataItem::WikiPage(Subject::page(title.clone()));
            // TODO: this enumerates every affected page in one pass; large
            // installations need incremental dispatch before this can scale.
            let property_pages = self
                .store
                .get_property_subjects(&type_property, Some(&type_page))?;
            for property_page in property_pages {
                jobs.push(UpdateJob::new(property_page.title().clone()));
                let property = Property::user(property_page.title().db_key());
                self.collect_dependents(&property, &property_page, jobs)?;
            }
        }
        Ok(dirty)
    }

    /// One job per page using the property, plus every page recorded as
    /// carrying an improper value for it.
    fn collect_dependents(
        &self,
        property: &Property,
        declaration_subject: &Subject,
        jobs: &mut Vec<UpdateJob>,
    ) -> Result<(), StoreError> {
        for subject in self.store.get_all_property_subjects(property)? {
            jobs.push(UpdateJob::new(subject.title().clone()));
        }
        let improper = Property::builtin(BuiltinProperty::HasImproperValue);
        let declaration_page = DataItem::WikiPage(declaration_subject.clone());
        for subject in self
            .store
            .get_property_subjects(&improper, Some(&declaration_page))?
        {
            jobs.push(UpdateJob::new(subject.title().clone()));
        }
        Ok(())
    }
}
