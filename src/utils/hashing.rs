//! Short xxh3 digests used as song identities and placeholder ids

use xxhash_rust::xxh3::xxh3_64;

use crate::models::SongRef;

const DIGEST_LEN: usize = 11;

fn digest(bytes: &[u8]) -> String {
    let mut hex = format!("{:016x}", xxh3_64(bytes));
    hex.truncate(DIGEST_LEN);
    hex
}

/// Fold a song ref down to lowercase ASCII alphanumerics.
///
/// Refs with no alphanumerics at all ("!!!", "...") keep their lowercased,
/// space-stripped form so they still hash apart from each other.
fn fold(song: &str) -> String {
    let ascii = deunicode::deunicode(song).to_lowercase();
    let folded: String = ascii.chars().filter(char::is_ascii_alphanumeric).collect();
    if folded.is_empty() {
        ascii.split_whitespace().collect()
    } else {
        folded
    }
}

/// Identity of an "Artist - Title" string.
///
/// "Tiësto - The Business" and "tiesto - the business" map to the same key,
/// which is what playlist de-duplication compares. Artist and title are
/// folded apart so "AB - C" and "A - BC" stay distinct.
pub fn song_key(song: &str) -> String {
    let parsed = SongRef::parse(song);
    let artist = parsed.artist.as_deref().map(fold).unwrap_or_default();
    digest(format!("{}|{}", artist, fold(&parsed.title)).as_bytes())
}

/// Raw hash of an arbitrary string, no normalization
pub fn short_hash(input: &str) -> String {
    digest(input.as_bytes())
}
