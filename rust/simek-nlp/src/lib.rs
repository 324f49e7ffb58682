//! # šimek NLP: keyword-anchored morphological heuristics
//!
//! The bot reacts to a handful of sentence shapes in Czech chat messages. It
//! does not parse sentences; it tags them with a morphological analyzer and
//! inspects the tags of the words around one keyword.
//!
//! ## Core Ideas
//!
//! - **Positional tags**: every token carries a fixed-length tag where each
//!   position encodes one grammatical feature. A [`tag::TagPattern`] wildcards
//!   the positions a heuristic does not care about.
//! - **One sentence per keyword**: the [`sentence::SentenceParser`] returns only
//!   the sentence containing the keyword, tracking whether it was quoted.
//! - **Heuristics over features**: [`reference::resolve`] and
//!   [`help::needs_help`] combine a few tag features into a yes/no answer.
//! - **The analyzer is a collaborator**: tokenization, tagging and inflection
//!   sit behind the [`analyzer::Analyzer`] trait; [`lexicon::Lexicon`] is a
//!   dictionary-backed implementation.
//!
//! ## Architecture
//!
//! ```text
//! Text → lower-case, strip emoji → Analyzer (sentences, tags)
//!   → SentenceParser (keyword sentence, nesting)
//!     → resolve / needs_help (tag features)
//!       → NlpWorker (runs it all on one lane)
//! ```

pub mod analyzer;
pub mod error;
pub mod help;
pub mod lexicon;
pub mod reference;
pub mod sentence;
pub mod tag;
pub mod text;
pub mod token;
pub mod worker;

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;

pub use analyzer::{Analyzer, TaggedLemma, TokenSpan};
pub use error::{AnalyzerError, NlpError, TagPatternError};
pub use help::needs_help;
pub use lexicon::{Lexicon, LexiconEntry};
pub use reference::{Copula, SelfReference, resolve};
pub use sentence::{ParsedSentence, SentenceParser};
pub use tag::TagPattern;
pub use token::Token;
pub use worker::NlpWorker;
