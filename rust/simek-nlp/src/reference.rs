//! Recognizing "jsem X" and "jsi X", where X is a noun phrase describing the
//! speaker or the bot.

use std::{fmt, str::FromStr};

use crate::{
    NlpError,
    analyzer::Analyzer,
    sentence::SentenceParser,
    tag::{CASE_POSITION, TagPattern, VOCATIVE, substitute},
    token::{Token, render_phrase},
};

const SINGULAR_NOMINATIVE_NOUN: TagPattern = TagPattern::new("NN*S1");
const PRESENT_VERB: TagPattern = TagPattern::new("VB");
const PAST_ACTIVE_VERB: TagPattern = TagPattern::new("Vp******R");

/// The present-tense forms of "to be" that introduce a self-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Copula {
    /// "I am"
    Jsem,
    /// "you are"
    Jsi,
}

impl Copula {
    pub fn as_str(&self) -> &'static str {
        match self {
            Copula::Jsem => "jsem",
            Copula::Jsi => "jsi",
        }
    }
}

impl fmt::Display for Copula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Copula {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "jsem" => Ok(Copula::Jsem),
            "jsi" => Ok(Copula::Jsi),
            other => Err(format!("'{other}' is not one of: jsem, jsi")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfReference {
    pub is_self_reference: bool,
    /// The words following the copula, possibly in vocative
    pub phrase: String,
    /// Tokens of the whole message, punctuation included
    pub word_count: usize,
}

/// Decide whether `text` says "jsem/jsi <singular noun>" without another
/// finite verb in the sentence, and extract the phrase after the copula.
///
/// With `convert_to_vocative` every singular nominative noun of the sentence
/// is inflected into vocative so the phrase can be used to address someone.
/// Nouns the analyzer cannot inflect are kept as they are.
pub fn resolve<A>(
    analyzer: &A,
    text: &str,
    copula: Copula,
    convert_to_vocative: bool,
) -> Result<SelfReference, NlpError>
where
    A: Analyzer + ?Sized,
{
    let keyword = [copula.as_str()];
    let mut parsed = SentenceParser::new(&keyword).parse(analyzer, text)?;
    if !parsed.is_match() {
        return Ok(SelfReference::default());
    }

    let is_other_verb = |token: &Token, pattern: &TagPattern| {
        token.text != copula.as_str() && token.matches(pattern)
    };
    let noun_present = parsed
        .tokens
        .iter()
        .any(|token| token.matches(&SINGULAR_NOMINATIVE_NOUN));
    let present_verb_present = parsed
        .tokens
        .iter()
        .any(|token| is_other_verb(token, &PRESENT_VERB));
    let past_verb_present = parsed
        .tokens
        .iter()
        .any(|token| is_other_verb(token, &PAST_ACTIVE_VERB));

    if convert_to_vocative {
        to_vocative(analyzer, &mut parsed.tokens);
    }

    Ok(SelfReference {
        is_self_reference: noun_present && !present_verb_present && !past_verb_present,
        phrase: render_phrase(parsed.after_keyword()),
        word_count: parsed.total_word_count,
    })
}

fn to_vocative<A>(analyzer: &A, tokens: &mut [Token])
where
    A: Analyzer + ?Sized,
{
    for token in tokens
        .iter_mut()
        .filter(|token| token.matches(&SINGULAR_NOMINATIVE_NOUN))
    {
        let target = substitute(&token.tag, CASE_POSITION, VOCATIVE);
        let pattern = match target.parse::<TagPattern>() {
            Ok(pattern) => pattern,
            Err(error) => {
                tracing::warn!("Cannot inflect '{}': {error}", token.text);
                continue;
            }
        };

        match analyzer.generate(&token.lemma, &pattern) {
            Ok(forms) => match forms.into_iter().next() {
                Some(form) => token.text = form,
                None => tracing::warn!("No vocative form of '{}' ({target})", token.lemma),
            },
            Err(error) => {
                tracing::warn!("Failed to generate vocative of '{}': {error}", token.lemma)
            }
        }
    }
}
