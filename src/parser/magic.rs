//! Behavior-switch magic words.
//!
//! `__NOFACTBOX__` and `__SHOWFACTBOX__` control factbox rendering for one
//! page. They are removed from the text and recorded on the parse output for
//! the rendering stage to pick up.

use crate::context::ParserOutput;

/// The magic words this extension claims.
pub const MAGIC_WORDS: &[&str] = &["NOFACTBOX", "SHOWFACTBOX"];

/// Remove all known magic words from the text, recording the discovered ones
/// on the parse output. Returns the stripped text.
pub fn strip_magic_words(text: &str, output: &mut ParserOutput) -> String {
    let mut found: Vec<String> = Vec::new();
    let mut result = text.to_string();
    for word in MAGIC_WORDS {
        let marker = format!("__{word}__");
        if result.contains(&marker) {
            result = result.replace(&marker, "");
            found.push((*word).to_string());
        }
    }
    output.set_magic_words(found);
    result
}
