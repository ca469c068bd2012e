//! The `{{#ask}}` parser function.

use crate::context::ParserData;
use crate::query::{Query, QueryResult};
use crate::store::Store;

use super::super::params::ParamList;
use super::{ParserFunction, render_errors};

const DISABLED_MESSAGE: &str = "Semantic queries have been disabled for this wiki.";

/// Answers inline queries by delegating to the store.
pub struct AskParserFunction<'s> {
    store: &'s dyn Store,
    query_enabled: bool,
}

impl<'s> AskParserFunction<'s> {
    pub fn new(store: &'s dyn Store, query_enabled: bool) -> AskParserFunction<'s> {
        AskParserFunction {
            store,
            query_enabled,
        }
    }
}

/// Assemble a [`Query`] from function parameters: the lead argument is the
/// condition, `?Property` arguments become printouts, `limit`/`offset` are
/// taken from named parameters.
pub(super) fn query_from_params(condition: String, params: &ParamList) -> Query {
    let mut query = Query::new(condition);
    for arg in params.unkeyed() {
        if let Some(printout) = arg.strip_prefix('?') {
            query.printouts.push(printout.trim().to_string());
        }
    }
    if let Some(values) = params.get("limit") {
        query.limit = values.last().and_then(|v| v.parse().ok());
    }
    if let Some(values) = params.get("offset") {
        query.offset = values
            .last()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
    }
    query
}

/// Render a result as plain inline text: one entry per subject, printout
/// values in parentheses, an ellipsis marker when the limit cut results off.
pub(super) fn render_result(result: &QueryResult) -> String {
    let mut entries: Vec<String> = result
        .rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row
                .printouts
                .iter()
                .filter(|values| !values.is_empty())
                .map(|values| values.join(", "))
                .collect();
            if values.is_empty() {
                row.subject.display_text()
            } else {
                format!("{} ({})", row.subject.display_text(), values.join("; "))
            }
        })
        .collect();
    if result.has_further_results {
        entries.push("…".to_string());
    }
    entries.join(", ")
}

impl ParserFunction for AskParserFunction<'_> {
    fn name(&self) -> &'static str {
        "ask"
    }

    fn handle(&self, params: ParamList, _ctx: &mut ParserData<'_>) -> String {
        if !self.query_enabled {
            return DISABLED_MESSAGE.to_string();
        }
        let condition = match params.get_first() {
            Some(condition) if !condition.is_empty() => condition.to_string(),
            _ => return render_errors(&["no query condition given".to_string()]),
        };
        let query = query_from_params(condition, &params);
        match self.store.get_query_result(&query) {
            Ok(result) => render_result(&result),
            Err(error) => render_errors(&[error.to_string()]),
        }
    }
}
