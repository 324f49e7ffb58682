//! The contract between the heuristics and a morphological analyzer.

use std::sync::Arc;

use crate::{AnalyzerError, tag::TagPattern};

/// A token's location in the analyzed text, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub len: usize,
}

impl TokenSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// The analysis of one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLemma {
    pub lemma: String,
    pub tag: String,
}

/// Tokenizer, tagger and generator for one language.
///
/// Implementations are shared between threads but the heuristics only ever
/// call them from one lane at a time.
pub trait Analyzer: Send + Sync {
    /// Split `text` into sentences of token spans. Spans must lie on
    /// character boundaries of `text`.
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<TokenSpan>>, AnalyzerError>;

    /// Tag the forms of one sentence; the output is aligned with `forms`.
    fn tag(&self, forms: &[&str]) -> Result<Vec<TaggedLemma>, AnalyzerError>;

    /// Inflect `lemma` into every form whose tag matches `pattern`. An unknown
    /// lemma yields no forms rather than an error.
    fn generate(&self, lemma: &str, pattern: &TagPattern) -> Result<Vec<String>, AnalyzerError>;
}

impl<T> Analyzer for Arc<T>
where
    T: Analyzer + ?Sized,
{
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<TokenSpan>>, AnalyzerError> {
        self.as_ref().tokenize(text)
    }

    fn tag(&self, forms: &[&str]) -> Result<Vec<TaggedLemma>, AnalyzerError> {
        self.as_ref().tag(forms)
    }

    fn generate(&self, lemma: &str, pattern: &TagPattern) -> Result<Vec<String>, AnalyzerError> {
        self.as_ref().generate(lemma, pattern)
    }
}
