/// Code point ranges treated as emoji and removed before analysis
const EMOJI_RANGES: [(char, char); 6] = [
    ('\u{1F600}', '\u{1F64F}'),
    ('\u{1F300}', '\u{1F5FF}'),
    ('\u{1F680}', '\u{1F6FF}'),
    ('\u{1F1E0}', '\u{1F1FF}'),
    ('\u{2702}', '\u{27B0}'),
    ('\u{24C2}', '\u{1F251}'),
];

pub fn is_emoji(value: char) -> bool {
    EMOJI_RANGES
        .iter()
        .any(|(first, last)| (*first..=*last).contains(&value))
}

/// Remove every emoji character, leaving surrounding whitespace in place
pub fn strip_emojis(text: &str) -> String {
    text.chars().filter(|value| !is_emoji(*value)).collect()
}

/// The form the heuristics analyze: lower-cased, emoji removed
pub fn normalize(text: &str) -> String {
    strip_emojis(&text.to_lowercase())
}
