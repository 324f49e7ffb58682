use crate::tag::{TagPattern, is_sentence_boundary};

/// One analyzed word (or punctuation mark) of the input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// The literal text between the previous token and this one
    pub text_before: String,
    /// Dictionary form
    pub lemma: String,
    /// Positional morphological tag
    pub tag: String,
    /// Surface form as it appeared in the (lower-cased) input
    pub text: String,
}

impl Token {
    pub fn matches(&self, pattern: &TagPattern) -> bool {
        pattern.matches(&self.tag)
    }

    pub fn is_punctuation(&self) -> bool {
        is_sentence_boundary(&self.tag)
    }
}

/// Join tokens back into text. The first token is rendered bare and every
/// following token keeps the separator that preceded it in the input.
pub fn render_phrase(tokens: &[Token]) -> String {
    let mut phrase = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            phrase.push_str(&token.text_before);
        }
        phrase.push_str(&token.text);
    }
    phrase
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn token(text_before: &str, text: &str) -> Token {
        Token {
            text_before: text_before.into(),
            lemma: text.into(),
            tag: "NNMS1-----A----".into(),
            text: text.into(),
        }
    }

    #[test]
    fn it_renders_with_original_separators() {
        let tokens = [
            token("   ", "starý"),
            token(" ", "dobrý"),
            token("  ", "programátor"),
        ];

        assert_eq!(render_phrase(&tokens), "starý dobrý  programátor");
        assert_eq!(render_phrase(&[]), "");
    }
}
