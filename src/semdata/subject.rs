//! Fact-owning identities.

use smol_str::SmolStr;

use crate::base::Title;

/// A page, or a subobject of a page, as the owner of semantic facts.
///
/// Immutable once constructed. A subobject subject is its parent page plus
/// the subobject identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    title: Title,
    subobject: SmolStr,
}

impl Subject {
    /// The page itself.
    pub fn page(title: Title) -> Subject {
        Subject {
            title,
            subobject: SmolStr::default(),
        }
    }

    /// A named subobject anchored to a page.
    pub fn subobject(title: Title, name: &str) -> Subject {
        Subject {
            title,
            subobject: SmolStr::from(name),
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn subobject_name(&self) -> Option<&str> {
        if self.subobject.is_empty() {
            None
        } else {
            Some(&self.subobject)
        }
    }

    pub fn is_subobject(&self) -> bool {
        !self.subobject.is_empty()
    }

    /// Stable storage key: `ns#dbkey` plus the subobject fragment.
    pub fn key(&self) -> String {
        match self.subobject_name() {
            Some(name) => format!(
                "{}#{}#{}",
                self.title.namespace().id(),
                self.title.db_key(),
                name
            ),
            None => format!("{}#{}", self.title.namespace().id(), self.title.db_key()),
        }
    }

    /// Rendering form: prefixed title plus `#fragment` for subobjects.
    pub fn display_text(&self) -> String {
        match self.subobject_name() {
            Some(name) => format!("{}#{}", self.title.prefixed_text(), name),
            None => self.title.prefixed_text(),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}
