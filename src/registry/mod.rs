//! Extension bootstrap.
//!
//! Registers everything the host needs to know about: named special pages,
//! API modules, job kinds, hook handlers, and the parser functions. The
//! registries are plain data the host iterates during its own setup; handler
//! behavior behind special pages and API modules lives host-side.

use rustc_hash::FxHashMap;

use crate::base::Title;
use crate::config::Settings;
use crate::context::ParserData;
use crate::datavalue::DataValueFactory;
use crate::parser::FunctionRegistry;
use crate::parser::functions::{AskParserFunction, ShowParserFunction, SubobjectParserFunction};
use crate::semdata::SemanticData;
use crate::store::Store;

/// Extension points the host fires into this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    PageSaved,
    PageMoved,
    PageDeleted,
    PagePurged,
    OutputRendering,
    StatsCollection,
    SchemaUpdate,
}

/// What a hook handler gets to see.
#[derive(Default)]
pub struct HookContext<'a> {
    pub title: Option<&'a Title>,
    pub data: Option<&'a SemanticData>,
}

type Handler = Box<dyn Fn(&HookContext<'_>) -> bool>;

/// Named extension points, each bound to any number of handlers.
#[derive(Default)]
pub struct HookRegistry {
    handlers: FxHashMap<HookEvent, Vec<Handler>>,
}

impl HookRegistry {
    pub fn new() -> HookRegistry {
        HookRegistry::default()
    }

    pub fn register(
        &mut self,
        event: HookEvent,
        handler: impl Fn(&HookContext<'_>) -> bool + 'static,
    ) {
        self.handlers
            .entry(event)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run every handler bound to the event; the event succeeds only when
    /// all handlers do.
    pub fn run(&self, event: HookEvent, ctx: &HookContext<'_>) -> bool {
        self.handlers
            .get(&event)
            .map(|handlers| handlers.iter().all(|handler| handler(ctx)))
            .unwrap_or(true)
    }

    pub fn handler_count(&self, event: HookEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }
}

/// One special page known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialPageEntry {
    pub name: &'static str,
    pub handler: &'static str,
    pub group: Option<&'static str>,
}

/// One API module known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiModuleEntry {
    pub name: &'static str,
    pub handler: &'static str,
}

/// The assembled extension: registries the host consumes during setup.
pub struct Extension {
    settings: Settings,
    special_pages: Vec<SpecialPageEntry>,
    api_modules: Vec<ApiModuleEntry>,
    job_kinds: Vec<&'static str>,
    pub hooks: HookRegistry,
}

impl Extension {
    /// Build the default registration set for the given settings.
    pub fn new(settings: Settings) -> Extension {
        Extension {
            settings,
            special_pages: default_special_pages(),
            api_modules: default_api_modules(),
            job_kinds: vec!["semantic-update", "semantic-refresh", "semantic-dispatch"],
            hooks: HookRegistry::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn special_pages(&self) -> &[SpecialPageEntry] {
        &self.special_pages
    }

    pub fn api_modules(&self) -> &[ApiModuleEntry] {
        &self.api_modules
    }

    pub fn job_kinds(&self) -> &[&'static str] {
        &self.job_kinds
    }

    /// Register the parser functions against the given store.
    ///
    /// `{{#ask}}` and `{{#show}}` honor the query feature flag; the
    /// subobject function gets its own value factory.
    pub fn register_parser_functions<'s>(&self, store: &'s dyn Store) -> FunctionRegistry<'s> {
        let mut registry = FunctionRegistry::new();
        registry.register(Box::new(SubobjectParserFunction::new(
            DataValueFactory::new(),
        )));
        registry.register(Box::new(AskParserFunction::new(
            store,
            self.settings.query_enabled(),
        )));
        registry.register(Box::new(ShowParserFunction::new(
            store,
            self.settings.query_enabled(),
        )));
        tracing::debug!(functions = ?registry.names(), "registered parser functions");
        registry
    }

    /// Render one text in the context of one page, through the registered
    /// parser functions.
    pub fn process(
        &self,
        registry: &FunctionRegistry<'_>,
        ctx: &mut ParserData<'_>,
        text: &str,
    ) -> String {
        crate::parser::process_text(text, registry, ctx)
    }
}

fn default_special_pages() -> Vec<SpecialPageEntry> {
    vec![
        SpecialPageEntry {
            name: "Ask",
            handler: "special::AskPage",
            group: Some("semantic"),
        },
        SpecialPageEntry {
            name: "Browse",
            handler: "special::BrowsePage",
            group: Some("semantic"),
        },
        SpecialPageEntry {
            name: "PageProperty",
            handler: "special::PagePropertyPage",
            group: Some("semantic"),
        },
        SpecialPageEntry {
            name: "SearchByProperty",
            handler: "special::SearchByPropertyPage",
            group: Some("semantic"),
        },
        SpecialPageEntry {
            name: "Properties",
            handler: "special::PropertiesPage",
            group: Some("pages"),
        },
        SpecialPageEntry {
            name: "UnusedProperties",
            handler: "special::UnusedPropertiesPage",
            group: Some("maintenance"),
        },
        SpecialPageEntry {
            name: "WantedProperties",
            handler: "special::WantedPropertiesPage",
            group: Some("maintenance"),
        },
        SpecialPageEntry {
            name: "Types",
            handler: "special::TypesPage",
            group: Some("pages"),
        },
        SpecialPageEntry {
            name: "Concepts",
            handler: "special::ConceptsPage",
            group: Some("pages"),
        },
        SpecialPageEntry {
            name: "SemanticStatistics",
            handler: "special::StatisticsPage",
            group: Some("wiki"),
        },
        SpecialPageEntry {
            name: "ExportRDF",
            handler: "special::ExportPage",
            group: Some("semantic"),
        },
        SpecialPageEntry {
            name: "URIResolver",
            handler: "special::UriResolverPage",
            group: None,
        },
    ]
}

fn default_api_modules() -> Vec<ApiModuleEntry> {
    vec![
        ApiModuleEntry {
            name: "info",
            handler: "api::Info",
        },
        ApiModuleEntry {
            name: "ask",
            handler: "api::Ask",
        },
        ApiModuleEntry {
            name: "askargs",
            handler: "api::AskArgs",
        },
        ApiModuleEntry {
            name: "browse",
            handler: "api::Browse",
        },
    ]
}
