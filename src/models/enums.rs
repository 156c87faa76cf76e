//! Enums for Loomi

use serde::{Deserialize, Serialize};

/// Playlist mood. The set is fixed at exactly five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mix,
    Focus,
    Motivation,
    Emotional,
    Workout,
}

impl Category {
    /// All categories, in the order playlists are generated and returned
    pub const ALL: [Category; 5] = [
        Category::Mix,
        Category::Focus,
        Category::Motivation,
        Category::Emotional,
        Category::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mix => "Mix",
            Category::Focus => "Focus",
            Category::Motivation => "Motivation",
            Category::Emotional => "Emotional",
            Category::Workout => "Workout",
        }
    }

    /// Lowercase form used in generated playlist ids
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Mix => "mix",
            Category::Focus => "focus",
            Category::Motivation => "motivation",
            Category::Emotional => "emotional",
            Category::Workout => "workout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mix" => Some(Category::Mix),
            "focus" => Some(Category::Focus),
            "motivation" => Some(Category::Motivation),
            "emotional" => Some(Category::Emotional),
            "workout" => Some(Category::Workout),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Mix => "A diverse mix based on the user's taste",
            Category::Focus => "Concentration and work music",
            Category::Motivation => "Upbeat and inspiring tracks",
            Category::Emotional => "Deep, meaningful, and emotional songs",
            Category::Workout => "High-energy exercise music",
        }
    }

    /// Genres this mood draws from, most wanted first
    pub fn preferred_genres(&self) -> &'static [Genre] {
        match self {
            Category::Mix => &[Genre::Pop, Genre::Rock, Genre::Rnb, Genre::Indie],
            Category::Focus => &[Genre::Indie, Genre::Electronic, Genre::Pop, Genre::Rnb],
            Category::Motivation => &[Genre::Rock, Genre::HipHop, Genre::Pop, Genre::Electronic],
            Category::Emotional => &[Genre::Rnb, Genre::Pop, Genre::Indie, Genre::Rock],
            Category::Workout => &[Genre::HipHop, Genre::Electronic, Genre::Rock, Genre::Pop],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of a song, as far as the heuristic can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Spanish,
    Korean,
    Japanese,
    French,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Spanish => "spanish",
            Language::Korean => "korean",
            Language::Japanese => "japanese",
            Language::French => "french",
        }
    }
}

/// Genre buckets of the curated catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "bollywood")]
    Bollywood,
    #[serde(rename = "pop")]
    Pop,
    #[serde(rename = "rock")]
    Rock,
    #[serde(rename = "hip-hop")]
    HipHop,
    #[serde(rename = "rnb")]
    Rnb,
    #[serde(rename = "indie")]
    Indie,
    #[serde(rename = "electronic")]
    Electronic,
    #[serde(rename = "reggaeton")]
    Reggaeton,
    #[serde(rename = "kpop")]
    Kpop,
    #[serde(rename = "jpop")]
    Jpop,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Bollywood => "bollywood",
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::HipHop => "hip-hop",
            Genre::Rnb => "rnb",
            Genre::Indie => "indie",
            Genre::Electronic => "electronic",
            Genre::Reggaeton => "reggaeton",
            Genre::Kpop => "kpop",
            Genre::Jpop => "jpop",
        }
    }
}

/// Cookie consent decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    Accepted,
    Declined,
}

impl ConsentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentState::Accepted => "accepted",
            ConsentState::Declined => "declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(ConsentState::Accepted),
            "declined" => Some(ConsentState::Declined),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_set_is_fixed() {
        assert_eq!(Category::ALL.len(), 5);
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
            assert_eq!(category.slug(), category.as_str().to_lowercase());
        }
        assert_eq!(Category::from_str(" workout "), Some(Category::Workout));
        assert_eq!(Category::from_str("Chill"), None);
    }

    #[test]
    fn test_category_serializes_with_exact_names() {
        let json = serde_json::to_string(&Category::Emotional).unwrap();
        assert_eq!(json, "\"Emotional\"");
    }

    #[test]
    fn test_genre_wire_names() {
        assert_eq!(serde_json::to_string(&Genre::HipHop).unwrap(), "\"hip-hop\"");
        assert_eq!(Genre::HipHop.as_str(), "hip-hop");
        assert_eq!(serde_json::to_string(&Language::Korean).unwrap(), "\"korean\"");
    }
}
