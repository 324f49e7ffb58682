//! A dictionary-backed [Analyzer].
//!
//! A [Lexicon] knows a fixed list of `{ form, lemma, tag }` entries, the same
//! triples a MorfFlex dictionary is made of. Tagging looks forms up, and
//! generation walks the entries of a lemma. Anything not in the dictionary is
//! classified by its characters alone.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    AnalyzerError,
    analyzer::{Analyzer, TaggedLemma, TokenSpan},
    tag::TagPattern,
};

/// Tag for punctuation not in the dictionary
pub const UNKNOWN_PUNCTUATION_TAG: &str = "Z:-------------";
/// Tag for numbers written in digits
pub const NUMBER_TAG: &str = "C=-------------";
/// Tag for words not in the dictionary
pub const UNKNOWN_WORD_TAG: &str = "X@-------------";

const SENTENCE_TERMINALS: [char; 4] = ['.', '!', '?', '…'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub form: String,
    pub lemma: String,
    pub tag: String,
}

impl LexiconEntry {
    pub fn new(form: &str, lemma: &str, tag: &str) -> Self {
        Self {
            form: form.to_owned(),
            lemma: lemma.to_owned(),
            tag: tag.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LexiconFile {
    entries: Vec<LexiconEntry>,
}

/// An in-memory morphological dictionary.
///
/// When a form has several analyses the first entry wins during tagging; all
/// of them take part in generation.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    by_form: HashMap<String, usize>,
    by_lemma: HashMap<String, Vec<usize>>,
}

impl Lexicon {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut lexicon = Self::default();
        for entry in entries {
            lexicon.insert(entry);
        }
        lexicon
    }

    /// Parse a lexicon from its JSON form: `{ "entries": [{ "form", "lemma",
    /// "tag" }, ...] }`
    pub fn from_json(json: &str) -> Result<Self, AnalyzerError> {
        let file: LexiconFile =
            serde_json::from_str(json).map_err(|error| AnalyzerError::Lexicon(format!("{error}")))?;
        Ok(Self::from_entries(file.entries))
    }

    pub fn load(path: &Path) -> Result<Self, AnalyzerError> {
        let json = std::fs::read_to_string(path).map_err(|error| {
            AnalyzerError::Lexicon(format!("unable to read {}: {error}", path.display()))
        })?;
        let lexicon = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    pub fn to_json(&self) -> Result<String, AnalyzerError> {
        serde_json::to_string_pretty(&LexiconFile {
            entries: self.entries.clone(),
        })
        .map_err(|error| AnalyzerError::Lexicon(format!("{error}")))
    }

    pub fn insert(&mut self, mut entry: LexiconEntry) {
        entry.form = entry.form.to_lowercase();
        let index = self.entries.len();
        self.by_form.entry(entry.form.clone()).or_insert(index);
        self.by_lemma
            .entry(entry.lemma.clone())
            .or_default()
            .push(index);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    fn analyze(&self, form: &str) -> TaggedLemma {
        if let Some(entry) = self
            .by_form
            .get(&form.to_lowercase())
            .and_then(|index| self.entries.get(*index))
        {
            return TaggedLemma {
                lemma: entry.lemma.clone(),
                tag: entry.tag.clone(),
            };
        }

        let tag = if !form.is_empty() && form.chars().all(|value| value.is_numeric()) {
            NUMBER_TAG
        } else if form.chars().any(char::is_alphanumeric) {
            UNKNOWN_WORD_TAG
        } else {
            UNKNOWN_PUNCTUATION_TAG
        };

        TaggedLemma {
            lemma: form.to_owned(),
            tag: tag.to_owned(),
        }
    }
}

impl Analyzer for Lexicon {
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<TokenSpan>>, AnalyzerError> {
        let mut sentences = Vec::new();
        let mut sentence = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, value)) = chars.next() {
            if value == '\n' {
                if !sentence.is_empty() {
                    sentences.push(std::mem::take(&mut sentence));
                }
                continue;
            }

            if value.is_whitespace() {
                continue;
            }

            if value.is_alphanumeric() {
                let mut end = start + value.len_utf8();
                while let Some((offset, next)) = chars.peek().copied() {
                    if !next.is_alphanumeric() {
                        break;
                    }
                    end = offset + next.len_utf8();
                    chars.next();
                }
                sentence.push(TokenSpan {
                    start,
                    len: end - start,
                });
                continue;
            }

            sentence.push(TokenSpan {
                start,
                len: value.len_utf8(),
            });

            // A run like "?!" or "..." ends the sentence at its last mark
            let run_continues = chars
                .peek()
                .is_some_and(|(_, next)| SENTENCE_TERMINALS.contains(next));
            if SENTENCE_TERMINALS.contains(&value) && !run_continues {
                sentences.push(std::mem::take(&mut sentence));
            }
        }

        if !sentence.is_empty() {
            sentences.push(sentence);
        }

        Ok(sentences)
    }

    fn tag(&self, forms: &[&str]) -> Result<Vec<TaggedLemma>, AnalyzerError> {
        Ok(forms.iter().map(|form| self.analyze(form)).collect())
    }

    fn generate(&self, lemma: &str, pattern: &TagPattern) -> Result<Vec<String>, AnalyzerError> {
        let mut forms: Vec<String> = Vec::new();
        for entry in self
            .by_lemma
            .get(lemma)
            .into_iter()
            .flatten()
            .filter_map(|index| self.entries.get(*index))
        {
            if pattern.matches(&entry.tag) && !forms.contains(&entry.form) {
                forms.push(entry.form.clone());
            }
        }
        Ok(forms)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::helpers::czech_test_lexicon;

    fn sentences<'a>(text: &'a str, spans: &[Vec<TokenSpan>]) -> Vec<Vec<&'a str>> {
        spans
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .map(|span| &text[span.start..span.end()])
                    .collect()
            })
            .collect()
    }

    #[test]
    fn it_splits_words_punctuation_and_sentences() -> Result<()> {
        let lexicon = Lexicon::default();
        let text = "ahoj, jsem tady! co ty...\nnic";

        let spans = lexicon.tokenize(text)?;

        assert_eq!(
            sentences(text, &spans),
            vec![
                vec!["ahoj", ",", "jsem", "tady", "!"],
                vec!["co", "ty", ".", ".", "."],
                vec!["nic"],
            ]
        );
        Ok(())
    }

    #[test]
    fn it_keeps_multibyte_words_whole() -> Result<()> {
        let lexicon = Lexicon::default();
        let text = "žluťoučký kůň";

        let spans = lexicon.tokenize(text)?;

        assert_eq!(sentences(text, &spans), vec![vec!["žluťoučký", "kůň"]]);
        Ok(())
    }

    #[test]
    fn it_classifies_unknown_forms() -> Result<()> {
        let lexicon = Lexicon::default();

        let tagged = lexicon.tag(&["42", "\"", "kekw"])?;

        assert_eq!(
            tagged,
            vec![
                TaggedLemma {
                    lemma: "42".into(),
                    tag: NUMBER_TAG.into()
                },
                TaggedLemma {
                    lemma: "\"".into(),
                    tag: UNKNOWN_PUNCTUATION_TAG.into()
                },
                TaggedLemma {
                    lemma: "kekw".into(),
                    tag: UNKNOWN_WORD_TAG.into()
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn it_generates_only_forms_matching_the_pattern() -> Result<()> {
        let lexicon = czech_test_lexicon();

        let vocative = lexicon.generate("programátor", &TagPattern::new("NNMS5"))?;
        let singular = lexicon.generate("programátor", &TagPattern::new("NN*S"))?;
        let unknown = lexicon.generate("kočka", &TagPattern::new("NN*S5"))?;

        assert_eq!(vocative, vec!["programátore".to_string()]);
        assert_eq!(singular.len(), 3);
        assert!(unknown.is_empty());
        Ok(())
    }

    #[test]
    fn it_survives_a_json_round_trip() -> Result<()> {
        let lexicon = czech_test_lexicon();

        let restored = Lexicon::from_json(&lexicon.to_json()?)?;

        assert_eq!(restored.entries(), lexicon.entries());
        Ok(())
    }

    #[test]
    fn it_reports_a_malformed_lexicon() {
        let result = Lexicon::from_json("{ \"entries\": 42 }");
        assert!(matches!(result, Err(AnalyzerError::Lexicon(_))));
    }
}
