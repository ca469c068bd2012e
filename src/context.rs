//! Explicit per-parse context.
//!
//! Instead of stashing the fact container on a shared mutable host object,
//! the container lives in a [`ParserOutput`] slot that is threaded through
//! every call working on the current parse. [`ParserData`] bundles the slot
//! with the page title and owns the get-or-create logic.

use crate::base::Title;
use crate::semdata::{SemanticData, Subject};

/// The per-parse side channel: at most one fact container, plus any magic
/// words discovered while stripping the text.
#[derive(Debug, Default)]
pub struct ParserOutput {
    data: Option<SemanticData>,
    magic_words: Vec<String>,
}

impl ParserOutput {
    pub fn new() -> ParserOutput {
        ParserOutput::default()
    }

    pub fn semantic_data(&self) -> Option<&SemanticData> {
        self.data.as_ref()
    }

    pub fn set_semantic_data(&mut self, data: SemanticData) {
        self.data = Some(data);
    }

    pub fn take_semantic_data(&mut self) -> Option<SemanticData> {
        self.data.take()
    }

    pub fn magic_words(&self) -> &[String] {
        &self.magic_words
    }

    pub fn set_magic_words(&mut self, words: Vec<String>) {
        self.magic_words = words;
    }
}

/// Parse context: the page being parsed plus its output slot.
pub struct ParserData<'a> {
    title: Title,
    output: &'a mut ParserOutput,
}

impl<'a> ParserData<'a> {
    pub fn new(title: Title, output: &'a mut ParserOutput) -> ParserData<'a> {
        ParserData { title, output }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    /// The container for this parse, created empty on first access with the
    /// current page as subject.
    pub fn semantic_data_mut(&mut self) -> &mut SemanticData {
        let subject = Subject::page(self.title.clone());
        self.output
            .data
            .get_or_insert_with(|| SemanticData::new(subject))
    }

    pub fn semantic_data(&mut self) -> &SemanticData {
        self.semantic_data_mut()
    }

    /// Replace the container wholesale.
    pub fn set_data(&mut self, data: SemanticData) {
        self.output.set_semantic_data(data);
    }

    /// Replace the container with a fresh empty one for the current page.
    pub fn clear_data(&mut self) {
        let subject = Subject::page(self.title.clone());
        self.output.set_semantic_data(SemanticData::new(subject));
    }

    /// Errors accumulated on the container so far.
    pub fn errors(&mut self) -> Vec<String> {
        self.semantic_data().errors().to_vec()
    }
}
