//! Text parsing utilities for song strings and model replies

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Pattern for "(feat. X)" or "[ft. X]"
    static ref FEAT_BRACKET_PATTERN: Regex = Regex::new(
        r"(?i)\s*[\[\(]\s*(?:feat\.?|ft\.?|featuring)\s+[^\]\)]+[\]\)]"
    ).unwrap();

    // Pattern for a trailing "ft. X" without brackets
    static ref FEAT_TRAILING_PATTERN: Regex = Regex::new(
        r"(?i)\s+(?:feat\.|ft\.|featuring)\s+.*$"
    ).unwrap();

    // Markdown code fence around a model reply
    static ref CODE_FENCE_PATTERN: Regex = Regex::new(
        r"(?s)```(?:json|JSON)?\s*(.*?)\s*```"
    ).unwrap();
}

/// Lowercase, fold diacritics and collapse everything that is not a letter
/// or digit into single spaces. "Rosalía" and "rosalia" normalize alike.
pub fn normalize_words(text: &str) -> String {
    let folded = deunicode::deunicode(&text.to_lowercase()).to_lowercase();
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word phrase match on normalized text.
///
/// `haystack` must already be normalized; `phrase` is normalized here.
/// "eve" matches "eve" and "kaikai kitan eve" but not "steve lacy".
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let phrase = normalize_words(phrase);
    if phrase.is_empty() {
        return false;
    }
    let padded = format!(" {} ", haystack);
    padded.contains(&format!(" {} ", phrase))
}

/// Strip featured-artist credits from a title
pub fn remove_featured(title: &str) -> String {
    let result = FEAT_BRACKET_PATTERN.replace_all(title, "");
    let result = FEAT_TRAILING_PATTERN.replace_all(&result, "");
    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull the JSON object out of a chat reply.
///
/// Replies may wrap the object in a code fence or surround it with prose.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let body = CODE_FENCE_PATTERN
        .captures(reply)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply);

    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

/// Percent-encode a path or query component
pub fn url_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}
