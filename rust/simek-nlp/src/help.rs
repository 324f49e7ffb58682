//! Recognizing pleas for help.

use crate::{
    NlpError, analyzer::Analyzer, sentence::SentenceParser, tag::TagPattern, token::Token,
};

/// Lemmas of the help noun and the help verb
pub const HELP_LEMMAS: [&str; 3] = ["pomoc", "pomoci", "pomoct"];

const FIRST_PERSON_PRONOUN: &str = "já";
const COPULA_LEMMA: &str = "být";

const NOUN: TagPattern = TagPattern::new("NN");
const INFINITIVE: TagPattern = TagPattern::new("Vf");
const IMPERATIVE: TagPattern = TagPattern::new("Vi");
const AFFIRMATIVE_SECOND_PERSON_IMPERATIVE: TagPattern = TagPattern::new("Vi-****2**A");
const PRONOUN: TagPattern = TagPattern::new("P");
const PAST_VERB: TagPattern = TagPattern::new("V*******R");
const NEGATED_VERB: TagPattern = TagPattern::new("V*********N");
const FIRST_PERSON_PRESENT_VERB: TagPattern = TagPattern::new("VB-S***1P");
const AFFIRMATIVE_FIRST_PERSON_PRESENT_VERB: TagPattern = TagPattern::new("VB-S***1P*A");

fn is_help_word(token: &Token) -> bool {
    HELP_LEMMAS.contains(&token.lemma.as_str())
}

fn is_help_form(token: &Token) -> bool {
    is_help_word(token) && [NOUN, INFINITIVE, IMPERATIVE].iter().any(|form| token.matches(form))
}

/// Decide whether `text` asks for help: "pomoc!", "pomoz mi", "potřebuju
/// pomoc". Quoted pleas, pleas in the past tense and negated ones do not
/// count.
pub fn needs_help<A>(analyzer: &A, text: &str) -> Result<bool, NlpError>
where
    A: Analyzer + ?Sized,
{
    let parsed = SentenceParser::new(&HELP_LEMMAS)
        .by_lemma()
        .parse(analyzer, text)?;
    let tokens = &parsed.tokens;

    if parsed.keyword_was_nested || tokens.is_empty() {
        return Ok(false);
    }

    if !tokens.iter().any(is_help_form) {
        return Ok(false);
    }

    if tokens.len() == 1 {
        return Ok(true);
    }

    if tokens
        .iter()
        .any(|token| token.matches(&PAST_VERB) || token.matches(&NEGATED_VERB))
    {
        return Ok(false);
    }

    // "jsem pomoc" is not a plea, with or without "já"
    let is_own_verb =
        |token: &Token, pattern: &TagPattern| token.matches(pattern) && token.lemma != COPULA_LEMMA;

    let speaker = tokens
        .iter()
        .any(|token| token.lemma == FIRST_PERSON_PRONOUN && token.matches(&PRONOUN));
    let first_person_verb = tokens
        .iter()
        .any(|token| is_own_verb(token, &FIRST_PERSON_PRESENT_VERB));
    let plea = tokens
        .iter()
        .any(|token| is_help_word(token) && token.matches(&AFFIRMATIVE_SECOND_PERSON_IMPERATIVE));
    if speaker && (first_person_verb || plea) {
        return Ok(true);
    }

    Ok(tokens
        .iter()
        .any(|token| is_own_verb(token, &AFFIRMATIVE_FIRST_PERSON_PRESENT_VERB)))
}
