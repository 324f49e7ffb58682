//! Finding the sentence a keyword was used in.

use crate::{
    AnalyzerError, NlpError,
    analyzer::{Analyzer, TokenSpan},
    text::normalize,
    token::Token,
};

/// Punctuation that opens and closes a quotation
pub const NESTING_MARK: &str = "\"";

/// The sentence containing a keyword.
///
/// The default value stands for "no keyword found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSentence {
    /// Tokens of the matched sentence, never spanning two sentences
    pub tokens: Vec<Token>,
    /// Tokens of the whole input, punctuation included. Zero when no
    /// keyword was found.
    pub total_word_count: usize,
    /// Index into `tokens` just past the keyword
    pub keyword_index: usize,
    /// Whether the keyword appeared inside a quotation
    pub keyword_was_nested: bool,
}

impl ParsedSentence {
    pub fn is_match(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// The tokens following the keyword
    pub fn after_keyword(&self) -> &[Token] {
        &self.tokens[self.keyword_index.min(self.tokens.len())..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordMatch {
    /// Compare keywords with the surface form
    #[default]
    Form,
    /// Compare keywords with the dictionary form
    Lemma,
}

/// Scans text for the first sentence containing one of its keywords.
///
/// ```rust
/// use simek_nlp::{Lexicon, SentenceParser};
///
/// let parser = SentenceParser::new(&["jsem"]).after_keyword();
/// let parsed = parser.parse(&Lexicon::default(), "ahoj. jsem tady.").unwrap();
///
/// assert_eq!(parsed.tokens.len(), 1);
/// assert_eq!(parsed.tokens[0].text, "tady");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceParser<'a> {
    keywords: &'a [&'a str],
    after_keyword: bool,
    match_by: KeywordMatch,
}

impl<'a> SentenceParser<'a> {
    pub fn new(keywords: &'a [&'a str]) -> Self {
        Self {
            keywords,
            after_keyword: false,
            match_by: KeywordMatch::Form,
        }
    }

    /// Collect only the tokens that follow the keyword
    pub fn after_keyword(mut self) -> Self {
        self.after_keyword = true;
        self
    }

    /// Match keywords against lemmas instead of surface forms
    pub fn by_lemma(mut self) -> Self {
        self.match_by = KeywordMatch::Lemma;
        self
    }

    fn is_keyword(&self, token: &Token) -> bool {
        let candidate = match self.match_by {
            KeywordMatch::Form => &token.text,
            KeywordMatch::Lemma => &token.lemma,
        };
        self.keywords.contains(&candidate.as_str())
    }

    pub fn parse<A>(&self, analyzer: &A, text: &str) -> Result<ParsedSentence, NlpError>
    where
        A: Analyzer + ?Sized,
    {
        let text = normalize(text);

        let sentences = analyzer.tokenize(&text)?;
        let total_word_count: usize = sentences.iter().map(Vec::len).sum();

        let mut window: Vec<Token> = Vec::new();
        let mut keyword_index = 0;
        let mut keyword_was_nested = false;
        let mut nested = false;
        let mut found = false;
        let mut cursor = 0;

        'sentences: for spans in &sentences {
            let forms = spans
                .iter()
                .map(|span| slice(&text, span))
                .collect::<Result<Vec<_>, _>>()?;
            let tagged = analyzer.tag(&forms)?;
            if tagged.len() != forms.len() {
                return Err(AnalyzerError::Malformed(format!(
                    "{} tags for {} tokens",
                    tagged.len(),
                    forms.len()
                ))
                .into());
            }

            found = false;
            window.clear();
            let mut sentence_end = false;

            for ((span, form), analysis) in spans.iter().zip(forms).zip(tagged) {
                if sentence_end {
                    found = false;
                    sentence_end = false;
                    window.clear();
                }

                let token = Token {
                    text_before: text.get(cursor..span.start).unwrap_or_default().to_owned(),
                    lemma: analysis.lemma,
                    tag: analysis.tag,
                    text: form.to_owned(),
                };
                cursor = cursor.max(span.end());

                if token.is_punctuation() {
                    if token.text == NESTING_MARK {
                        nested = !nested;
                    }
                    sentence_end = true;
                    if found && !window.is_empty() {
                        break 'sentences;
                    }
                    continue;
                }

                let is_keyword = self.is_keyword(&token);
                if !self.after_keyword || found {
                    window.push(token);
                }
                if is_keyword {
                    found = true;
                    keyword_was_nested = nested;
                    keyword_index = window.len();
                }
            }

            if found {
                break;
            }
        }

        if !found {
            return Ok(ParsedSentence::default());
        }

        if self.after_keyword {
            // Everything collected follows the keyword
            keyword_index = 0;
        }

        Ok(ParsedSentence {
            tokens: window,
            total_word_count,
            keyword_index,
            keyword_was_nested,
        })
    }
}

/// Find the sentence of `text` containing one of `keywords`.
pub fn parse<A>(
    analyzer: &A,
    text: &str,
    keywords: &[&str],
    after_keyword: bool,
    match_by_lemma: bool,
) -> Result<ParsedSentence, NlpError>
where
    A: Analyzer + ?Sized,
{
    let mut parser = SentenceParser::new(keywords);
    if after_keyword {
        parser = parser.after_keyword();
    }
    if match_by_lemma {
        parser = parser.by_lemma();
    }
    parser.parse(analyzer, text)
}

fn slice<'t>(text: &'t str, span: &TokenSpan) -> Result<&'t str, AnalyzerError> {
    text.get(span.start..span.end()).ok_or_else(|| {
        AnalyzerError::Malformed(format!(
            "token span {}..{} does not fit a text of {} bytes",
            span.start,
            span.end(),
            text.len()
        ))
    })
}
