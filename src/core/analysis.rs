//! Taste inference: language and genre detection for seed songs

use std::collections::HashMap;

use crate::models::{Genre, Language, SongRef};
use crate::utils::parsers::{contains_phrase, normalize_words};

/// Known artists per language, checked in order
static ARTIST_LANGUAGES: &[(Language, &[&str])] = &[
    (
        Language::Hindi,
        &[
            "arijit singh",
            "shreya ghoshal",
            "sonu nigam",
            "atif aslam",
            "rahat fateh ali khan",
            "armaan malik",
            "sunidhi chauhan",
            "alka yagnik",
            "udit narayan",
            "kumar sanu",
            "kishore kumar",
            "lata mangeshkar",
            "mohammed rafi",
            "asha bhosle",
            "diljit dosanjh",
            "badshah",
            "guru randhawa",
            "honey singh",
            "neha kakkar",
            "tulsi kumar",
            "asees kaur",
        ],
    ),
    (
        Language::Spanish,
        &[
            "bad bunny",
            "rosalía",
            "j balvin",
            "maluma",
            "ozuna",
            "karol g",
            "sebastian yatra",
            "daddy yankee",
            "luis fonsi",
            "anuel aa",
            "shakira",
            "manu chao",
            "jesse & joy",
            "mana",
            "pablo alboran",
        ],
    ),
    (
        Language::Korean,
        &[
            "bts",
            "blackpink",
            "twice",
            "stray kids",
            "itzy",
            "aespa",
            "newjeans",
            "ive",
            "red velvet",
            "girls generation",
            "snsd",
            "bigbang",
            "exo",
            "seventeen",
            "nct",
            "lisa",
            "jennie",
            "jisoo",
            "rose",
        ],
    ),
    (
        Language::Japanese,
        &[
            "kenshi yonezu",
            "official hige dandism",
            "aimyon",
            "yoasobi",
            "king gnu",
            "lisa",
            "fujii kaze",
            "eve",
            "radwimps",
            "one ok rock",
            "x japan",
            "babymetal",
        ],
    ),
    (
        Language::French,
        &[
            "stromae",
            "christine and the queens",
            "angèle",
            "indila",
            "tal",
            "zaz",
            "louane",
            "dadju",
            "soprano",
            "bigflo & oli",
        ],
    ),
];

static HINDI_INDICATORS: &[&str] = &[
    "bollywood", "dil", "pyaar", "ishq", "zindagi", "sapna", "mohabbat",
];

static SPANISH_INDICATORS: &[&str] = &["reggaeton", "corazón", "amor", "vida", "noche", "tiempo"];

/// Genre keywords, first match wins
static GENRE_KEYWORDS: &[(Genre, &[&str])] = &[
    (
        Genre::Bollywood,
        &[
            "arijit singh",
            "shreya ghoshal",
            "sonu nigam",
            "atif aslam",
            "rahat fateh ali khan",
            "armaan malik",
            "sunidhi chauhan",
            "bollywood",
        ],
    ),
    (
        Genre::Pop,
        &[
            "taylor swift",
            "ariana grande",
            "billie eilish",
            "dua lipa",
            "olivia rodrigo",
            "the weeknd",
            "bruno mars",
            "ed sheeran",
            "harry styles",
            "benson boone",
            "miley cyrus",
            "selena gomez",
            "justin bieber",
        ],
    ),
    (
        Genre::Rock,
        &[
            "coldplay",
            "imagine dragons",
            "onerepublic",
            "maroon 5",
            "linkin park",
            "foo fighters",
            "red hot chili peppers",
            "arctic monkeys",
            "the killers",
            "muse",
        ],
    ),
    (
        Genre::HipHop,
        &[
            "drake",
            "kendrick lamar",
            "eminem",
            "kanye west",
            "travis scott",
            "post malone",
            "j. cole",
            "future",
            "lil wayne",
            "jay-z",
            "nas",
        ],
    ),
    (
        Genre::Electronic,
        &[
            "calvin harris",
            "david guetta",
            "skrillex",
            "deadmau5",
            "tiesto",
            "martin garrix",
            "avicii",
            "diplo",
            "flume",
        ],
    ),
    (
        Genre::Rnb,
        &[
            "beyoncé",
            "john legend",
            "alicia keys",
            "usher",
            "chris brown",
            "the weeknd",
            "frank ocean",
            "sza",
            "daniel caesar",
        ],
    ),
    (
        Genre::Indie,
        &[
            "arctic monkeys",
            "vampire weekend",
            "tame impala",
            "the strokes",
            "foster the people",
            "mgmt",
            "alt-j",
            "glass animals",
        ],
    ),
    (
        Genre::Reggaeton,
        &[
            "bad bunny",
            "j balvin",
            "maluma",
            "ozuna",
            "daddy yankee",
            "luis fonsi",
            "karol g",
            "anuel aa",
        ],
    ),
    (
        Genre::Kpop,
        &[
            "bts",
            "blackpink",
            "twice",
            "stray kids",
            "itzy",
            "aespa",
            "newjeans",
            "ive",
            "red velvet",
            "seventeen",
        ],
    ),
];

fn count_matches(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| contains_phrase(text, w)).count()
}

/// Guess the language of a song.
///
/// A known artist decides outright. Otherwise the song needs at least two
/// Hindi or Spanish indicator words to leave the English default.
pub fn detect_language(title: &str, artist: &str) -> Language {
    let artist_norm = normalize_words(artist);
    if !artist_norm.is_empty() {
        for (language, artists) in ARTIST_LANGUAGES {
            if artists.iter().any(|known| contains_phrase(&artist_norm, known)) {
                return *language;
            }
        }
    }

    let text = normalize_words(&format!("{} {}", title, artist));
    if count_matches(&text, HINDI_INDICATORS) > 1 {
        return Language::Hindi;
    }
    if count_matches(&text, SPANISH_INDICATORS) > 1 {
        return Language::Spanish;
    }

    Language::English
}

/// Guess the genre of a song, `pop` when nothing matches
pub fn detect_genre(title: &str, artist: &str) -> Genre {
    let text = normalize_words(&format!("{} {}", title, artist));
    GENRE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_phrase(&text, k)))
        .map(|(genre, _)| *genre)
        .unwrap_or(Genre::Pop)
}

/// Weighted view of a seed list
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    /// (language, count) in order of first appearance
    languages: Vec<(Language, usize)>,
    /// (genre, count) in order of first appearance
    genres: Vec<(Genre, usize)>,
    artists: HashMap<String, usize>,
    total: usize,
}

fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

/// Highest count wins; a tie keeps the earlier entry
fn top<K: Copy>(counts: &[(K, usize)]) -> Option<K> {
    counts
        .iter()
        .fold(None::<(K, usize)>, |best, &(k, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((k, n)),
        })
        .map(|(k, _)| k)
}

impl TasteProfile {
    pub fn from_seeds(seeds: &[String]) -> Self {
        let mut profile = TasteProfile::default();

        for seed in seeds {
            let song = SongRef::parse(seed);
            let artist = song.artist_or_empty();
            bump(&mut profile.languages, detect_language(&song.title, artist));
            bump(&mut profile.genres, detect_genre(&song.title, artist));
            if !artist.is_empty() {
                *profile.artists.entry(artist.to_lowercase()).or_insert(0) += 1;
            }
            profile.total += 1;
        }

        profile
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn primary_language(&self) -> Language {
        top(&self.languages).unwrap_or(Language::English)
    }

    /// Languages, heaviest first; equal counts keep seed order
    pub fn languages_by_weight(&self) -> Vec<(Language, usize)> {
        let mut langs = self.languages.clone();
        langs.sort_by(|a, b| b.1.cmp(&a.1));
        langs
    }

    /// Genres, heaviest first; equal counts keep seed order
    pub fn genres_by_weight(&self) -> Vec<(Genre, usize)> {
        let mut genres = self.genres.clone();
        genres.sort_by(|a, b| b.1.cmp(&a.1));
        genres
    }

    pub fn dominant_genre(&self) -> Genre {
        top(&self.genres).unwrap_or(Genre::Pop)
    }

    pub fn is_multilingual(&self) -> bool {
        self.languages.len() > 1
    }

    /// Distinct artists among the seeds
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language_by_artist() {
        assert_eq!(detect_language("Tum Hi Ho", "Arijit Singh"), Language::Hindi);
        assert_eq!(detect_language("Con Altura", "Rosalia"), Language::Spanish);
        assert_eq!(detect_language("Con Altura", "ROSALÍA"), Language::Spanish);
        assert_eq!(detect_language("Dynamite", "BTS"), Language::Korean);
        assert_eq!(detect_language("Lemon", "Kenshi Yonezu"), Language::Japanese);
        assert_eq!(detect_language("Tilted", "Christine and the Queens"), Language::French);
    }

    #[test]
    fn test_artist_match_is_whole_word() {
        // "eve" (japanese) must not fire inside "steve", nor "tal" inside "tally"
        assert_eq!(detect_language("Bad Habit", "Steve Lacy"), Language::English);
        assert_eq!(detect_language("Song", "Tally Hall"), Language::English);
        assert_eq!(detect_language("Kaikai Kitan", "Eve"), Language::Japanese);
    }

    #[test]
    fn test_lisa_resolves_to_first_table() {
        assert_eq!(detect_language("Money", "LISA"), Language::Korean);
    }

    #[test]
    fn test_detect_language_by_indicators() {
        assert_eq!(detect_language("Dil Ka Ishq", "Unknown"), Language::Hindi);
        assert_eq!(detect_language("Amor de mi Vida", "Unknown"), Language::Spanish);
        // a single indicator is not enough
        assert_eq!(detect_language("Amor", "Unknown"), Language::English);
    }

    #[test]
    fn test_detect_genre() {
        assert_eq!(detect_genre("Tum Hi Ho", "Arijit Singh"), Genre::Bollywood);
        assert_eq!(detect_genre("Enemy", "Imagine Dragons"), Genre::Rock);
        assert_eq!(detect_genre("HUMBLE.", "Kendrick Lamar"), Genre::HipHop);
        assert_eq!(detect_genre("Levels", "Avicii"), Genre::Electronic);
        assert_eq!(detect_genre("Levels", "Tiësto"), Genre::Electronic);
        assert_eq!(detect_genre("Kill Bill", "SZA"), Genre::Rnb);
        assert_eq!(detect_genre("Feel It Still", "Tame Impala"), Genre::Indie);
        assert_eq!(detect_genre("Gasolina", "Daddy Yankee"), Genre::Reggaeton);
        assert_eq!(detect_genre("Dynamite", "BTS"), Genre::Kpop);
        assert_eq!(detect_genre("Something", "Nobody Known"), Genre::Pop);
    }

    #[test]
    fn test_genre_order_decides_overlaps() {
        // the weeknd appears under pop and rnb; pop is checked first
        assert_eq!(detect_genre("Die For You", "The Weeknd"), Genre::Pop);
        // arctic monkeys is rock before indie
        assert_eq!(detect_genre("505", "Arctic Monkeys"), Genre::Rock);
        // "nas" must not fire inside "jonas"
        assert_eq!(detect_genre("Sucker", "Jonas Brothers"), Genre::Pop);
    }

    fn seeds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_profile_primary_language() {
        let profile = TasteProfile::from_seeds(&seeds(&[
            "Arijit Singh - Tum Hi Ho",
            "Taylor Swift - Anti-Hero",
            "Shreya Ghoshal - Ghoomar",
        ]));
        assert_eq!(profile.primary_language(), Language::Hindi);
        assert!(profile.is_multilingual());
        assert_eq!(profile.total(), 3);
        assert_eq!(profile.artist_count(), 3);
    }

    #[test]
    fn test_profile_tie_goes_to_first_seen() {
        let profile = TasteProfile::from_seeds(&seeds(&["BTS - Butter", "Drake - God's Plan"]));
        assert_eq!(profile.primary_language(), Language::Korean);
        let profile = TasteProfile::from_seeds(&seeds(&["Drake - God's Plan", "BTS - Butter"]));
        assert_eq!(profile.primary_language(), Language::English);
    }

    #[test]
    fn test_profile_empty() {
        let profile = TasteProfile::from_seeds(&[]);
        assert_eq!(profile.primary_language(), Language::English);
        assert_eq!(profile.dominant_genre(), Genre::Pop);
        assert!(!profile.is_multilingual());
    }

    #[test]
    fn test_profile_genre_weights() {
        let profile = TasteProfile::from_seeds(&seeds(&[
            "Drake - God's Plan",
            "Coldplay - Fix You",
            "Travis Scott - SICKO MODE",
        ]));
        assert_eq!(profile.dominant_genre(), Genre::HipHop);
        let genres = profile.genres_by_weight();
        assert_eq!(genres[0], (Genre::HipHop, 2));
        assert_eq!(genres[1], (Genre::Rock, 1));
    }
}
