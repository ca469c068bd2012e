//! In-memory reference store.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::Title;
use crate::dataitem::DataItem;
use crate::property::Property;
use crate::query::{Query, QueryResult, QueryRow};
use crate::semdata::{SemanticData, Subject};

use super::{Store, StoreError};

/// A [`Store`] backed by process memory.
///
/// Good enough for tests and single-process installations; every read scans,
/// every write replaces the subject's fact set wholesale.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<FxHashMap<Subject, IndexMap<Property, Vec<DataItem>>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Number of subjects currently stored.
    pub fn subject_count(&self) -> usize {
        self.inner.read().len()
    }

    fn write_container(
        map: &mut FxHashMap<Subject, IndexMap<Property, Vec<DataItem>>>,
        data: &SemanticData,
    ) {
        let mut facts: IndexMap<Property, Vec<DataItem>> = IndexMap::new();
        for (property, item) in data.fact_pairs() {
            facts
                .entry(property.clone())
                .or_default()
                .push(item.clone());
            // Subobject containers become subjects of their own.
            if let DataItem::Container(sub) = item {
                Self::write_container(map, sub);
            }
        }
        map.insert(data.subject().clone(), facts);
    }

    fn sorted(mut subjects: Vec<Subject>) -> Vec<Subject> {
        subjects.sort_by_key(Subject::key);
        subjects
    }
}

impl Store for MemoryStore {
    fn get_property_values(
        &self,
        subject: &Subject,
        property: &Property,
    ) -> Result<Vec<DataItem>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .get(subject)
            .and_then(|facts| facts.get(property))
            .cloned()
            .unwrap_or_default())
    }

    fn get_all_property_subjects(
        &self,
        property: &Property,
    ) -> Result<Vec<Subject>, StoreError> {
        self.get_property_subjects(property, None)
    }

    fn get_property_subjects(
        &self,
        property: &Property,
        value: Option<&DataItem>,
    ) -> Result<Vec<Subject>, StoreError> {
        let inner = self.inner.read();
        let subjects = inner
            .iter()
            .filter(|(_, facts)| {
                facts.get(property).is_some_and(|values| match value {
                    Some(wanted) => values.contains(wanted),
                    None => !values.is_empty(),
                })
            })
            .map(|(subject, _)| subject.clone())
            .collect();
        Ok(Self::sorted(subjects))
    }

    fn update_data(&self, data: &SemanticData) -> Result<(), StoreError> {
        tracing::trace!(subject = %data.subject(), "updating stored data");
        let mut inner = self.inner.write();
        Self::write_container(&mut inner, data);
        Ok(())
    }

    fn clear_data(&self, subject: &Subject) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner.remove(subject);
        if !subject.is_subobject() {
            // Dropping a page takes its subobjects with it.
            inner.retain(|stored, _| stored.title() != subject.title() || stored == subject);
        }
        Ok(())
    }

    fn get_query_result(&self, query: &Query) -> Result<QueryResult, StoreError> {
        let condition = query.condition.trim();
        let inner_text = condition
            .strip_prefix("[[")
            .and_then(|c| c.strip_suffix("]]"))
            .ok_or_else(|| StoreError::UnsupportedQuery(condition.to_string()))?;

        let matched: Vec<Subject> = if let Some((label, wanted)) = inner_text.split_once("::") {
            let property = Property::user_property(label)
                .map_err(|_| StoreError::UnsupportedQuery(condition.to_string()))?;
            let wanted = wanted.trim();
            let inner = self.inner.read();
            let subjects = inner
                .iter()
                .filter(|(_, facts)| {
                    facts.get(&property).is_some_and(|values| {
                        values.iter().any(|v| v.display_text() == wanted)
                    })
                })
                .map(|(subject, _)| subject.clone())
                .collect();
            Self::sorted(subjects)
        } else {
            let title = Title::from_prefixed_text(inner_text)
                .map_err(|_| StoreError::UnsupportedQuery(condition.to_string()))?;
            let subject = Subject::page(title);
            let inner = self.inner.read();
            if inner.contains_key(&subject) {
                vec![subject]
            } else {
                Vec::new()
            }
        };

        let total = matched.len();
        let offset = query.offset.min(total);
        let end = match query.limit {
            Some(limit) => (offset + limit).min(total),
            None => total,
        };
        let rows = matched[offset..end]
            .iter()
            .map(|subject| {
                let printouts = query
                    .printouts
                    .iter()
                    .map(|label| match Property::user_property(label) {
                        Ok(property) => self
                            .get_property_values(subject, &property)
                            .unwrap_or_default()
                            .iter()
                            .map(DataItem::display_text)
                            .collect(),
                        Err(_) => Vec::new(),
                    })
                    .collect();
                QueryRow {
                    subject: subject.clone(),
                    printouts,
                }
            })
            .collect();

        Ok(QueryResult {
            rows,
            has_further_results: end < total,
        })
    }
}
