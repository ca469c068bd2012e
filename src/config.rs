//! Explicit configuration settings.
//!
//! The host hands one [`Settings`] value to everything at construction time;
//! there is no global state. Defaults follow the shipped configuration of
//! the annotation extension.

use rustc_hash::FxHashSet;

use crate::base::Namespace;
use crate::property::BuiltinProperty;

/// Feature flags and per-namespace behavior.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Namespaces whose pages get their annotations processed and stored.
    processed_namespaces: FxHashSet<Namespace>,
    /// Properties whose change on a property page forces dependent pages to
    /// be recomputed, checked in addition to `_TYPE`.
    declaration_properties: Vec<BuiltinProperty>,
    /// Special properties computed from page metadata on every save.
    page_special_properties: Vec<BuiltinProperty>,
    /// Whether saves may enqueue asynchronous update jobs.
    enable_update_jobs: bool,
    /// Whether `{{#ask}}` / `{{#show}}` answer queries.
    query_enabled: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        let processed_namespaces = [
            Namespace::MAIN,
            Namespace::FILE,
            Namespace::HELP,
            Namespace::CATEGORY,
            Namespace::PROPERTY,
            Namespace::TYPE,
            Namespace::CONCEPT,
        ]
        .into_iter()
        .collect();
        Settings {
            processed_namespaces,
            declaration_properties: vec![BuiltinProperty::AllowsValue],
            page_special_properties: vec![BuiltinProperty::ModificationDate],
            enable_update_jobs: true,
            query_enabled: true,
        }
    }
}

impl Settings {
    pub fn new() -> Settings {
        Settings::default()
    }

    /// Whether pages in this namespace carry semantic data at all.
    pub fn is_semantics_processed(&self, namespace: Namespace) -> bool {
        self.processed_namespaces.contains(&namespace)
    }

    pub fn declaration_properties(&self) -> &[BuiltinProperty] {
        &self.declaration_properties
    }

    pub fn page_special_properties(&self) -> &[BuiltinProperty] {
        &self.page_special_properties
    }

    pub fn update_jobs_enabled(&self) -> bool {
        self.enable_update_jobs
    }

    pub fn query_enabled(&self) -> bool {
        self.query_enabled
    }

    // Builder-style setters, mostly for tests and host wiring.

    pub fn with_processed_namespace(mut self, namespace: Namespace) -> Settings {
        self.processed_namespaces.insert(namespace);
        self
    }

    pub fn without_processed_namespace(mut self, namespace: Namespace) -> Settings {
        self.processed_namespaces.remove(&namespace);
        self
    }

    pub fn with_declaration_properties(mut self, properties: Vec<BuiltinProperty>) -> Settings {
        self.declaration_properties = properties;
        self
    }

    pub fn with_page_special_properties(mut self, properties: Vec<BuiltinProperty>) -> Settings {
        self.page_special_properties = properties;
        self
    }

    pub fn with_update_jobs(mut self, enabled: bool) -> Settings {
        self.enable_update_jobs = enabled;
        self
    }

    pub fn with_query_enabled(mut self, enabled: bool) -> Settings {
        self.query_enabled = enabled;
        self
    }
}
