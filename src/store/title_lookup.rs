//! Namespace-scoped title selection.
//!
//! A straight projection of the two backing tables (generic pages vs
//! categories) onto a uniform title list. The category namespace reads the
//! category table; every other namespace filters the page table.

use smol_str::SmolStr;

use crate::base::{Namespace, Title};

use super::StoreError;

/// One row of the generic page table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub id: u64,
    pub namespace: Namespace,
    pub title: SmolStr,
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: u64,
    pub title: SmolStr,
}

/// Access to the two backing tables.
pub trait PageStore {
    fn pages(&self) -> Vec<PageRow>;
    fn categories(&self) -> Vec<CategoryRow>;
}

/// Selects titles from a [`PageStore`], one namespace at a time.
pub struct TitleLookup<'a, D: PageStore + ?Sized> {
    db: &'a D,
    namespace: Option<Namespace>,
}

impl<'a, D: PageStore + ?Sized> TitleLookup<'a, D> {
    pub fn new(db: &'a D) -> TitleLookup<'a, D> {
        TitleLookup {
            db,
            namespace: None,
        }
    }

    /// Restrict subsequent selections to one namespace.
    pub fn by_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Every title in the selected namespace.
    ///
    /// Fails fast when no namespace was selected; an unrestricted scan over
    /// the page table is never what a caller wants.
    pub fn select_all(&self) -> Result<Vec<Title>, StoreError> {
        let namespace = self.namespace.ok_or(StoreError::MissingNamespace)?;
        Ok(self.rows_in(namespace, None))
    }

    /// Titles whose row id falls in `start..=end`, ordered by id.
    pub fn select_by_id_range(&self, start: u64, end: u64) -> Result<Vec<Title>, StoreError> {
        let namespace = self.namespace.ok_or(StoreError::MissingNamespace)?;
        Ok(self.rows_in(namespace, Some((start, end))))
    }

    /// The highest row id of the backing table. Defaults to the page table
    /// when no namespace was selected.
    pub fn select_max_id(&self) -> u64 {
        if self.namespace == Some(Namespace::CATEGORY) {
            self.db
                .categories()
                .iter()
                .map(|row| row.id)
                .max()
                .unwrap_or(0)
        } else {
            self.db.pages().iter().map(|row| row.id).max().unwrap_or(0)
        }
    }

    fn rows_in(&self, namespace: Namespace, id_range: Option<(u64, u64)>) -> Vec<Title> {
        let in_range = |id: u64| id_range.is_none_or(|(start, end)| id >= start && id <= end);
        if namespace == Namespace::CATEGORY {
            let mut rows: Vec<CategoryRow> = self
                .db
                .categories()
                .into_iter()
                .filter(|row| in_range(row.id))
                .collect();
            rows.sort_by_key(|row| row.id);
            rows.iter()
                .map(|row| Title::from_db_key(Namespace::CATEGORY, &row.title))
                .collect()
        } else {
            let mut rows: Vec<PageRow> = self
                .db
                .pages()
                .into_iter()
                .filter(|row| row.namespace == namespace && in_range(row.id))
                .collect();
            rows.sort_by_key(|row| row.id);
            rows.iter()
                .map(|row| Title::from_db_key(row.namespace, &row.title))
                .collect()
        }
    }
}

/// A [`PageStore`] over plain vectors, for tests and small tools.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: Vec<PageRow>,
    categories: Vec<CategoryRow>,
}

impl MemoryPageStore {
    pub fn new() -> MemoryPageStore {
        MemoryPageStore::default()
    }

    pub fn add_page(&mut self, id: u64, namespace: Namespace, title: &str) {
        self.pages.push(PageRow {
            id,
            namespace,
            title: SmolStr::from(title),
        });
    }

    pub fn add_category(&mut self, id: u64, title: &str) {
        self.categories.push(CategoryRow {
            id,
            title: SmolStr::from(title),
        });
    }
}

impl PageStore for MemoryPageStore {
    fn pages(&self) -> Vec<PageRow> {
        self.pages.clone()
    }

    fn categories(&self) -> Vec<CategoryRow> {
        self.categories.clone()
    }
}
