//! The `{{#show}}` parser function: an ask over a single page.

use crate::context::ParserData;
use crate::store::Store;

use super::super::params::ParamList;
use super::ask::{query_from_params, render_result};
use super::{ParserFunction, render_errors};

const DISABLED_MESSAGE: &str = "Semantic queries have been disabled for this wiki.";

pub struct ShowParserFunction<'s> {
    store: &'s dyn Store,
    query_enabled: bool,
}

impl<'s> ShowParserFunction<'s> {
    pub fn new(store: &'s dyn Store, query_enabled: bool) -> ShowParserFunction<'s> {
        ShowParserFunction {
            store,
            query_enabled,
        }
    }
}

impl ParserFunction for ShowParserFunction<'_> {
    fn name(&self) -> &'static str {
        "show"
    }

    fn handle(&self, params: ParamList, _ctx: &mut ParserData<'_>) -> String {
        if !self.query_enabled {
            return DISABLED_MESSAGE.to_string();
        }
        let page = match params.get_first() {
            Some(page) if !page.is_empty() => page.to_string(),
            _ => return render_errors(&["no page given".to_string()]),
        };
        let query = query_from_params(format!("[[{page}]]"), &params);
        match self.store.get_query_result(&query) {
            Ok(result) => render_result(&result),
            Err(error) => render_errors(&[error.to_string()]),
        }
    }
}
