//! # pagefacts-base
//!
//! Core library for wiki semantic annotation: markup parsing, fact
//! containers, and change-driven updates.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! registry  → Extension bootstrap (hooks, special pages, parser functions)
//!   ↓
//! update    → Save pipeline: special properties, change detection, job fan-out
//!   ↓
//! parser    → Logos lexer, function-invocation scanner, parameter lists
//!   ↓
//! store     → Store trait, in-memory backend, title lookup
//!   ↓
//! datavalue → User-string to typed-value construction, error capture
//!   ↓
//! semdata   → Subject, SemanticData container, Subobject builder
//!   ↓
//! dataitem  → Typed hashable data items, multiset hash equality
//!   ↓
//! base      → Primitives (Namespace, Title, text normalization)
//! ```
//!
//! `config` (Settings) and `context` (per-parse ParserData) sit beside the
//! stack; `query` carries the thin query description the store answers.

// ============================================================================
// MODULES (dependency order: base → dataitem → semdata → datavalue → store
//          → parser → update → registry)
// ============================================================================

/// Foundation types: Namespace, Title, text normalization
pub mod base;

/// Typed, hashable semantic values and multiset equality
pub mod dataitem;

/// Named predicates: builtin and user-declared properties
pub mod property;

/// Subjects, per-parse fact containers, subobject builder
pub mod semdata;

/// Construction of typed values from raw wiki input
pub mod datavalue;

/// Explicit per-parse context (title + output slot)
pub mod context;

/// Thin query description answered by the store
pub mod query;

/// Persistence seam: Store trait, in-memory backend, title lookup
pub mod store;

/// Parser: logos lexer, function-invocation scanner, parser functions
pub mod parser;

/// Save pipeline: special properties, change detection, update jobs
pub mod update;

/// Extension bootstrap: hooks, special pages, API modules, job kinds
pub mod registry;

/// Explicit configuration settings
pub mod config;

/// Interchange formats: JSON export of fact containers
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{Namespace, Title, TitleError};
pub use config::Settings;
pub use dataitem::{DataItem, TypeId, WikiTime, equal_data_items};
pub use property::{BuiltinProperty, Property};
pub use semdata::{SemanticData, Subject, Subobject};
