//! Positional morphological tags and the patterns that match them.
//!
//! A tag is a fixed-length string where every position encodes one
//! grammatical feature, following the Prague Dependency Treebank convention:
//!
//! | Position | Feature | Example values |
//! |---|---|---|
//! | 0 | part of speech | `N` noun, `V` verb, `P` pronoun, `Z` punctuation |
//! | 1 | detailed part of speech | `N` common noun, `B` present verb, `p` past participle, `f` infinitive, `i` imperative |
//! | 2 | gender | `M`, `F`, `N`, `Y` |
//! | 3 | number | `S` singular, `P` plural |
//! | 4 | case | `1` nominative … `5` vocative … `7` instrumental |
//! | 7 | person | `1`, `2`, `3` |
//! | 8 | tense | `P` present, `R` past |
//! | 10 | negation | `A` affirmative, `N` negated |
//! | 11 | voice | `A` active, `P` passive |
//!
//! A [TagPattern] mirrors that layout with `*` standing for "any value".

use std::{fmt, str::FromStr};

use crate::TagPatternError;

/// The longest tag (and therefore pattern) this crate deals with
pub const MAX_TAG_LEN: usize = 16;

/// Marks a position a pattern does not constrain
pub const WILDCARD: char = '*';

/// Tag position holding grammatical case
pub const CASE_POSITION: usize = 4;

/// Case value for the vocative
pub const VOCATIVE: char = '5';

/// Part of speech of punctuation tokens
pub const PUNCTUATION: char = 'Z';

/// A compiled positional pattern. Position `i` is either a required
/// character or a wildcard; positions past the end of the pattern text are
/// wildcards.
///
/// ```rust
/// use simek_nlp::TagPattern;
///
/// const SINGULAR_NOMINATIVE_NOUN: TagPattern = TagPattern::new("NN*S1");
///
/// assert!(SINGULAR_NOMINATIVE_NOUN.matches("NNMS1-----A----"));
/// assert!(!SINGULAR_NOMINATIVE_NOUN.matches("NNMS5-----A----"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagPattern([Option<char>; MAX_TAG_LEN]);

impl TagPattern {
    /// Compile a pattern known at build time. Patterns are ASCII and at most
    /// [MAX_TAG_LEN] long; anything else fails const evaluation.
    pub const fn new(pattern: &'static str) -> Self {
        let bytes = pattern.as_bytes();
        assert!(
            bytes.len() <= MAX_TAG_LEN,
            "tag pattern is longer than MAX_TAG_LEN"
        );

        let mut positions = [None; MAX_TAG_LEN];
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii(), "compile-time tag patterns are ASCII");
            if bytes[i] != WILDCARD as u8 {
                positions[i] = Some(bytes[i] as char);
            }
            i += 1;
        }

        Self(positions)
    }

    /// True iff every constrained position of the pattern holds the same
    /// character in `tag`. A tag too short to have a constrained position
    /// does not match.
    pub fn matches(&self, tag: &str) -> bool {
        let mut tag = tag.chars();
        for expected in self.0.iter() {
            let actual = tag.next();
            if let Some(expected) = expected {
                if actual != Some(*expected) {
                    return false;
                }
            }
        }
        true
    }
}

impl FromStr for TagPattern {
    type Err = TagPatternError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let len = pattern.chars().count();
        if len > MAX_TAG_LEN {
            return Err(TagPatternError::TooLong {
                pattern: pattern.to_owned(),
                len,
            });
        }

        let mut positions = [None; MAX_TAG_LEN];
        for (slot, value) in positions.iter_mut().zip(pattern.chars()) {
            if value != WILDCARD {
                *slot = Some(value);
            }
        }
        Ok(Self(positions))
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .0
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        for position in &self.0[..len] {
            write!(f, "{}", position.unwrap_or(WILDCARD))?;
        }
        Ok(())
    }
}

impl fmt::Debug for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagPattern(\"{self}\")")
    }
}

/// Punctuation tokens separate sentences
pub fn is_sentence_boundary(tag: &str) -> bool {
    tag.starts_with(PUNCTUATION)
}

/// Replace the feature at `position` of `tag` with `value`. A tag too short
/// to have that position is returned unchanged.
pub fn substitute(tag: &str, position: usize, value: char) -> String {
    tag.chars()
        .enumerate()
        .map(|(i, current)| if i == position { value } else { current })
        .collect()
}
