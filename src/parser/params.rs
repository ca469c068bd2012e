//! Parser-function parameter lists.
//!
//! Raw `|`-separated arguments are split into one positional lead argument,
//! named `key=value` parameters (repeats accumulate), and leftover bare
//! arguments. Malformed parameters accumulate as errors and never abort the
//! surrounding function.

use indexmap::IndexMap;

/// An ordered parameter list for one function invocation.
#[derive(Debug, Clone, Default)]
pub struct ParamList {
    first: Option<String>,
    named: IndexMap<String, Vec<String>>,
    unkeyed: Vec<String>,
    errors: Vec<String>,
}

impl ParamList {
    /// Split raw arguments as they came out of the invocation scanner.
    pub fn from_raw_args<I, S>(args: I) -> ParamList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = ParamList::default();
        for (index, raw) in args.into_iter().enumerate() {
            let raw = raw.as_ref().trim();
            match raw.split_once('=') {
                Some((name, value)) => {
                    let name = name.trim();
                    if name.is_empty() {
                        list.errors
                            .push(format!("parameter name missing in `{raw}`"));
                    } else {
                        list.add_parameter(name, value.trim());
                    }
                }
                None if index == 0 => list.first = Some(raw.to_string()),
                None => list.unkeyed.push(raw.to_string()),
            }
        }
        list
    }

    /// The positional lead argument, if the invocation had one.
    pub fn get_first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    /// Append one named parameter value.
    pub fn add_parameter(&mut self, name: &str, value: &str) {
        self.named
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&Vec<String>> {
        self.named.get(name)
    }

    /// Named parameters as ordered (name, values) pairs.
    pub fn to_pairs(&self) -> Vec<(String, Vec<String>)> {
        self.named
            .iter()
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect()
    }

    /// Bare arguments that were neither first nor named.
    pub fn unkeyed(&self) -> &[String] {
        &self.unkeyed
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
