//! Balanced-brace extraction of parser-function invocations.

use text_size::{TextRange, TextSize};

use crate::context::ParserData;

use super::functions::FunctionRegistry;
use super::lexer::{Lexer, MarkupToken};
use super::params::ParamList;

/// One `{{#name: …}}` occurrence in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    /// Raw `|`-separated arguments, nested templates kept verbatim.
    pub args: Vec<String>,
    /// The byte range of the whole invocation, delimiters included.
    pub range: TextRange,
}

impl Invocation {
    pub fn params(&self) -> ParamList {
        ParamList::from_raw_args(&self.args)
    }
}

/// Extract all top-level parser-function invocations.
///
/// Only templates whose head starts with `#` count; ordinary template
/// transclusions and unbalanced braces pass through as text. Arguments are
/// split at pipes of the outermost level, so nested templates stay intact
/// inside argument values.
pub fn scan_functions(text: &str) -> Vec<Invocation> {
    let mut invocations = Vec::new();
    let mut depth = 0usize;
    let mut start = TextSize::new(0);
    let mut args: Vec<String> = Vec::new();
    let mut current = String::new();

    for token in Lexer::new(text) {
        match token.kind {
            MarkupToken::TemplateOpen => {
                if depth == 0 {
                    start = token.offset;
                    args.clear();
                    current.clear();
                } else {
                    current.push_str(token.text);
                }
                depth += 1;
            }
            MarkupToken::TemplateClose if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    args.push(std::mem::take(&mut current));
                    let end = token.offset + TextSize::of(token.text);
                    if let Some(invocation) =
                        finish_invocation(std::mem::take(&mut args), TextRange::new(start, end))
                    {
                        invocations.push(invocation);
                    }
                } else {
                    current.push_str(token.text);
                }
            }
            MarkupToken::Pipe if depth == 1 => {
                args.push(std::mem::take(&mut current));
            }
            _ if depth > 0 => current.push_str(token.text),
            _ => {}
        }
    }

    invocations
}

/// Turn the collected argument slices into an invocation, or reject the
/// template when its head is not a `#function: …` call.
fn finish_invocation(mut args: Vec<String>, range: TextRange) -> Option<Invocation> {
    let head = args.first()?.trim();
    let rest = head.strip_prefix('#')?;
    let (name, lead_arg) = match rest.split_once(':') {
        Some((name, lead)) => (name.trim().to_string(), Some(lead.trim().to_string())),
        None => (rest.trim().to_string(), None),
    };
    if name.is_empty() {
        return None;
    }
    args[0] = lead_arg.unwrap_or_default();
    Some(Invocation { name, args, range })
}

/// Run every registered function over the text, splicing rendered output in
/// place of its invocation. Unregistered functions stay verbatim.
pub fn process_text(
    text: &str,
    registry: &FunctionRegistry<'_>,
    ctx: &mut ParserData<'_>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for invocation in scan_functions(text) {
        let Some(function) = registry.get(&invocation.name) else {
            continue;
        };
        let start = usize::from(invocation.range.start());
        let end = usize::from(invocation.range.end());
        output.push_str(&text[cursor..start]);
        output.push_str(&function.handle(invocation.params(), ctx));
        cursor = end;
    }
    output.push_str(&text[cursor..]);
    output
}
