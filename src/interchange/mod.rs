//! Interchange formats for fact containers.
//!
//! Currently a stable JSON document per container, for export pipelines and
//! debugging. Enabled by the `interchange` feature.

mod json;

pub use json::{ExportDocument, ExportFact, ExportValue, export_json, to_document};
