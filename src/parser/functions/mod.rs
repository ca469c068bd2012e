//! Parser functions and their registry.

mod ask;
mod show;
mod subobject;

use rustc_hash::FxHashMap;

use crate::context::ParserData;

use super::params::ParamList;

pub use ask::AskParserFunction;
pub use show::ShowParserFunction;
pub use subobject::SubobjectParserFunction;

/// One `{{#name: …}}` handler.
///
/// Handlers return the rendered replacement text; user-input problems are
/// rendered inline and never abort the surrounding parse.
pub trait ParserFunction {
    fn name(&self) -> &'static str;

    fn handle(&self, params: ParamList, ctx: &mut ParserData<'_>) -> String;
}

/// Dispatch table from function name to handler.
#[derive(Default)]
pub struct FunctionRegistry<'a> {
    functions: FxHashMap<&'static str, Box<dyn ParserFunction + 'a>>,
}

impl<'a> FunctionRegistry<'a> {
    pub fn new() -> FunctionRegistry<'a> {
        FunctionRegistry {
            functions: FxHashMap::default(),
        }
    }

    pub fn register(&mut self, function: Box<dyn ParserFunction + 'a>) {
        self.functions.insert(function.name(), function);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn ParserFunction + 'a)> {
        self.functions.get(name).map(Box::as_ref)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Render accumulated error messages as inline wiki text.
///
/// Empty input renders to the empty string so clean invocations leave no
/// trace in the page.
pub fn render_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut unique: Vec<&str> = Vec::new();
    for error in errors {
        if !unique.contains(&error.as_str()) {
            unique.push(error);
        }
    }
    format!(
        "<strong class=\"error\">{}</strong>",
        unique.join("; ")
    )
}
