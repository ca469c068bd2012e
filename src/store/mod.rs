//! Persistence seam.
//!
//! [`Store`] is the narrow interface the rest of the library talks to; the
//! backend behind it (SQL tables, triple store, …) is the host's business.
//! [`MemoryStore`] is the reference implementation used by tests and small
//! installations.

mod error;
mod memory;
mod title_lookup;

use crate::dataitem::DataItem;
use crate::property::Property;
use crate::query::{Query, QueryResult};
use crate::semdata::{SemanticData, Subject};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use title_lookup::{CategoryRow, MemoryPageStore, PageRow, PageStore, TitleLookup};

/// The external persistence and query backend.
pub trait Store {
    /// Values previously persisted for one (subject, property) pair.
    fn get_property_values(
        &self,
        subject: &Subject,
        property: &Property,
    ) -> Result<Vec<DataItem>, StoreError>;

    /// Every subject that carries the property, with any value.
    fn get_all_property_subjects(&self, property: &Property)
    -> Result<Vec<Subject>, StoreError>;

    /// Subjects carrying the property with the given value; `None` matches
    /// any value.
    fn get_property_subjects(
        &self,
        property: &Property,
        value: Option<&DataItem>,
    ) -> Result<Vec<Subject>, StoreError>;

    /// Replace everything stored for the container's subject with the
    /// container's facts. Subobject containers are stored under their own
    /// subjects.
    fn update_data(&self, data: &SemanticData) -> Result<(), StoreError>;

    /// Drop everything stored for the subject, including its subobjects.
    fn clear_data(&self, subject: &Subject) -> Result<(), StoreError>;

    /// Answer a query.
    fn get_query_result(&self, query: &Query) -> Result<QueryResult, StoreError>;
}
