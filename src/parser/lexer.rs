//! Logos-based lexer for wikitext template syntax.
//!
//! Only the tokens the function scanner cares about are distinguished;
//! everything else is plain text.

use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: MarkupToken,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, MarkupToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: MarkupToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match token {
            Ok(t) => t,
            // Logos only errs on input no pattern covers; treat it as text.
            Err(()) => MarkupToken::Text,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec.
#[allow(dead_code)]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum for template markup.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken {
    #[token("{{")]
    TemplateOpen,

    #[token("}}")]
    TemplateClose,

    #[token("|")]
    Pipe,

    /// A lone brace that is not part of a template delimiter.
    #[regex(r"[{}]")]
    StrayBrace,

    /// Anything else, greedily.
    #[regex(r"[^{}|]+")]
    Text,
}
