//! Curated song table the heuristic generator samples from
//!
//! Languages and genres are kept in declaration order; generation relies on
//! that order for its deterministic parts.

use crate::models::{Genre, Language};

type GenreTable = &'static [(Genre, &'static [&'static str])];

static CATALOG: &[(Language, GenreTable)] = &[
    (
        Language::English,
        &[
            (
                Genre::Pop,
                &[
                    "Billie Eilish - What Was I Made For",
                    "Dua Lipa - Houdini",
                    "The Weeknd - Blinding Lights",
                    "Taylor Swift - Anti-Hero",
                    "Harry Styles - As It Was",
                    "Olivia Rodrigo - Vampire",
                    "Miley Cyrus - Flowers",
                    "SZA - Good Days",
                    "Lizzo - About Damn Time",
                    "Glass Animals - Heat Waves",
                    "Tate McRae - Greedy",
                    "Sabrina Carpenter - Espresso",
                    "Chappell Roan - Good Luck, Babe!",
                    "Gracie Abrams - That's So True",
                    "Teddy Swims - Lose Control",
                    "Noah Kahan - Stick Season",
                    "Joji - Glimpse of Us",
                    "Steve Lacy - Bad Habit",
                    "Charlie Puth - Left and Right",
                    "Lana Del Rey - A&W",
                    "Adele - Easy On Me",
                    "Sam Smith - Unholy",
                    "Lewis Capaldi - Forget Me",
                    "Doja Cat - Paint The Town Red",
                    "Ariana Grande - Yes, And?",
                    "Ed Sheeran - Eyes Closed",
                    "Bruno Mars - Die With A Smile",
                    "Post Malone - Chemical",
                    "The Weeknd - Popular",
                    "Billie Eilish - LUNCH",
                    "Taylor Swift - Fortnight",
                    "Sabrina Carpenter - Please Please Please",
                    "Chappell Roan - Pink Pony Club",
                    "Charli XCX - 360",
                    "Benson Boone - Beautiful Things",
                    "Tyla - Water",
                    "Ice Spice - Think U The Shit",
                    "Shaboozey - A Bar Song",
                ],
            ),
            (
                Genre::Rock,
                &[
                    "Imagine Dragons - Enemy",
                    "OneRepublic - I Ain't Worried",
                    "Coldplay - Viva La Vida",
                    "Maroon 5 - Sugar",
                    "Arctic Monkeys - Do I Wanna Know?",
                    "The Killers - Mr. Brightside",
                    "Linkin Park - In the End",
                    "Foo Fighters - Everlong",
                    "Red Hot Chili Peppers - Under The Bridge",
                    "Muse - Uprising",
                    "Green Day - Boulevard of Broken Dreams",
                    "Paramore - Still Into You",
                    "Fall Out Boy - Sugar, We're Goin Down",
                    "My Chemical Romance - Welcome to the Black Parade",
                    "Imagine Dragons - Believer",
                    "OneRepublic - Counting Stars",
                    "Coldplay - Fix You",
                    "Imagine Dragons - Thunder",
                    "Twenty One Pilots - Heathens",
                    "Panic! At The Disco - High Hopes",
                    "The Neighbourhood - Sweater Weather",
                    "Foster the People - Pumped Up Kicks",
                    "Kings of Leon - Use Somebody",
                    "The Strokes - Last Nite",
                ],
            ),
            (
                Genre::HipHop,
                &[
                    "Drake - God's Plan",
                    "Kendrick Lamar - HUMBLE.",
                    "Travis Scott - FE!N",
                    "Post Malone - White Iverson",
                    "Future - Life Is Good",
                    "Drake - Rich Flex",
                    "Kendrick Lamar - Not Like Us",
                    "21 Savage - a lot",
                    "J. Cole - No Role Modelz",
                    "Lil Baby - Drip Too Hard",
                    "Gunna - pushin P",
                    "Tyler, The Creator - EARFQUAKE",
                    "Mac Miller - Good News",
                    "XXXTentacion - SAD!",
                    "Juice WRLD - Lucid Dreams",
                    "Playboi Carti - FE!N",
                    "Travis Scott - SICKO MODE",
                    "Future - Mask Off",
                    "Lil Wayne - A Milli",
                    "Childish Gambino - This Is America",
                    "Drake - First Person Shooter",
                    "Metro Boomin - Superhero",
                    "Central Cee - Doja",
                    "Ice Spice - Munch",
                ],
            ),
            (
                Genre::Rnb,
                &[
                    "SZA - Kill Bill",
                    "The Weeknd - Die For You",
                    "Summer Walker - Girls Need Love",
                    "Giveon - Heartbreak Anniversary",
                    "Daniel Caesar - Best Part",
                    "H.E.R. - Focus",
                    "Frank Ocean - Thinking Bout You",
                    "Khalid - Location",
                    "John Legend - All of Me",
                    "Beyoncé - Crazy in Love",
                    "Alicia Keys - Fallin'",
                    "Usher - Yeah!",
                    "Chris Brown - Under The Influence",
                    "Bryson Tiller - Don't",
                    "Tory Lanez - LUV",
                    "PinkPantheress - Boy's a liar",
                    "Brent Favre - Wasteland",
                    "Steve Lacy - Dark Red",
                    "Kali Uchis - telepatía",
                    "Omar Apollo - Evergreen",
                ],
            ),
            (
                Genre::Indie,
                &[
                    "Arctic Monkeys - 505",
                    "Tame Impala - The Less I Know The Better",
                    "Glass Animals - Heat Waves",
                    "Foster the People - Pumped Up Kicks",
                    "MGMT - Electric Feel",
                    "Alt-J - Left Hand Free",
                    "The Strokes - Last Nite",
                    "Vampire Weekend - A-Punk",
                    "Phoenix - 1901",
                    "Two Door Cinema Club - What You Know",
                    "Cage the Elephant - Come a Little Closer",
                    "Portugal. The Man - Feel It Still",
                    "Mac DeMarco - Chamber of Reflection",
                    "Beach House - Space Song",
                    "Tame Impala - Borderline",
                    "The 1975 - Somebody Else",
                    "Clairo - Pretty Girl",
                    "Rex Orange County - Loving Is Easy",
                    "Boy Pablo - Everytime",
                    "Cuco - Lo Que Siento",
                ],
            ),
            (
                Genre::Electronic,
                &[
                    "Calvin Harris - Miracle",
                    "Swedish House Mafia - Don't You Worry Child",
                    "Avicii - Wake Me Up",
                    "David Guetta - I'm Good",
                    "Martin Garrix - Animals",
                    "Tiësto - The Business",
                    "Disclosure - Latch",
                    "ODESZA - Say My Name",
                    "Flume - Never Be Like You",
                    "Deadmau5 - Ghosts 'n' Stuff",
                    "Skrillex - Bangarang",
                    "Justice - D.A.N.C.E.",
                    "Porter Robinson - Language",
                    "Madeon - All My Friends",
                    "Zedd - Clarity",
                    "Diplo - Revolution",
                    "Calvin Harris - Feel So Close",
                    "Swedish House Mafia - Greyhound",
                    "Avicii - Levels",
                    "Martin Garrix - High on Life",
                ],
            ),
        ],
    ),
    (
        Language::Hindi,
        &[
            (
                Genre::Bollywood,
                &[
                    "Arijit Singh - Tum Hi Ho",
                    "Shreya Ghoshal - Nagada Sang Dhol",
                    "Sonu Nigam - Kal Ho Naa Ho",
                    "Arijit Singh - Kesariya",
                    "A.R. Rahman - Enna Sona",
                    "Arijit Singh - Ve Maahi",
                    "Shreya Ghoshal - Deewani Mastani",
                    "Rahat Fateh Ali Khan - Jag Ghoomeya",
                    "Armaan Malik - Bol Do Na Zara",
                    "Arijit Singh - Apna Bana Le",
                    "Arijit Singh - Channa Mereya",
                    "Shreya Ghoshal - Ghoomar",
                    "Jubin Nautiyal - Lut Gaye",
                    "Arijit Singh - Hawayein",
                    "Asees Kaur - Ve Maahi",
                    "Arijit Singh - Phir Bhi Tumko Chaahunga",
                    "Shreya Ghoshal - Manwa Laage",
                    "Darshan Raval - Tera Zikr",
                ],
            ),
            (
                Genre::Pop,
                &[
                    "Diljit Dosanjh - G.O.A.T",
                    "Badshah - Genda Phool",
                    "Guru Randhawa - Lahore",
                    "Honey Singh - Blue Eyes",
                    "Diljit Dosanjh - Born to Shine",
                    "Badshah - Mercy",
                    "Guru Randhawa - Made in India",
                    "AP Dhillon - Brown Munde",
                ],
            ),
        ],
    ),
    (
        Language::Spanish,
        &[
            (
                Genre::Pop,
                &[
                    "Bad Bunny - Tití Me Preguntó",
                    "Rosalía - Con Altura",
                    "J Balvin - Mi Gente",
                    "Maluma - Felices los 4",
                    "Ozuna - Baila Baila Baila",
                    "Karol G - Tusa",
                    "Sebastian Yatra - Traicionera",
                    "Camila Cabello - Havana",
                    "Shakira - Hips Don't Lie",
                    "Jesse & Joy - Corre!",
                    "Pablo Alborán - Solamente Tú",
                    "Manu Chao - Me Gustas Tú",
                ],
            ),
            (
                Genre::Reggaeton,
                &[
                    "Daddy Yankee - Gasolina",
                    "Luis Fonsi - Despacito",
                    "Bad Bunny - Yo Perreo Sola",
                    "J Balvin - Ginza",
                    "Maluma - Corazón",
                    "Ozuna - Te Boté",
                    "Karol G - Bichota",
                    "Anuel AA - Ella Quiere Beber",
                    "Nicky Jam - El Perdón",
                    "Wisin & Yandel - Rakata",
                    "Don Omar - Danza Kuduro",
                    "Farruko - Pepas",
                ],
            ),
        ],
    ),
    (
        Language::Korean,
        &[(
            Genre::Kpop,
            &[
                "BTS - Dynamite",
                "BLACKPINK - DDU-DU DDU-DU",
                "NewJeans - Super Shy",
                "IVE - LOVE DIVE",
                "TWICE - The Feels",
                "Stray Kids - God's Menu",
                "ITZY - WANNABE",
                "aespa - Next Level",
                "BTS - Butter",
                "BLACKPINK - Kill This Love",
                "NewJeans - Attention",
                "IVE - Eleven",
                "Red Velvet - Psycho",
                "SEVENTEEN - God of Music",
                "NCT Dream - Hot Sauce",
                "(G)I-DLE - Tomboy",
                "LE SSERAFIM - ANTIFRAGILE",
                "Girls' Generation - Gee",
                "Big Bang - Fantastic Baby",
                "EXO - Love Shot",
            ],
        )],
    ),
    (
        Language::Japanese,
        &[(
            Genre::Jpop,
            &[
                "Kenshi Yonezu - Lemon",
                "Official HIGE DANdism - Pretender",
                "Aimyon - Marigold",
                "YOASOBI - Yoru ni Kakeru",
                "King Gnu - Hakujitsu",
                "LiSA - Gurenge",
                "Fujii Kaze - Shinunoga E-Wa",
                "Eve - Kaikai Kitan",
                "RADWIMPS - Zen Zen Zense",
                "ONE OK ROCK - The Beginning",
                "Hikaru Utada - First Love",
                "Ayumi Hamasaki - M",
            ],
        )],
    ),
    (
        Language::French,
        &[(
            Genre::Pop,
            &[
                "Stromae - Alors on Danse",
                "Christine and the Queens - Tilted",
                "Angèle - Balance ton quoi",
                "Indila - Dernière Danse",
                "Tal - Le Sens de la Vie",
                "Zaz - Je veux",
                "Louane - Avenir",
                "Dadju - Reine",
                "Soprano - Cosmo",
                "Bigflo & Oli - Dommage",
            ],
        )],
    ),
];

/// Languages in declaration order
pub fn languages() -> impl Iterator<Item = Language> {
    CATALOG.iter().map(|(language, _)| *language)
}

fn genre_table(language: Language) -> GenreTable {
    CATALOG
        .iter()
        .find(|(l, _)| *l == language)
        .map(|(_, table)| *table)
        .unwrap_or(&[])
}

/// Genres available for a language, in declaration order
pub fn genres(language: Language) -> Vec<Genre> {
    genre_table(language).iter().map(|(genre, _)| *genre).collect()
}

pub fn has_genre(language: Language, genre: Genre) -> bool {
    genre_table(language).iter().any(|(g, _)| *g == genre)
}

/// Songs of one language/genre bucket; empty when the bucket does not exist
pub fn songs(language: Language, genre: Genre) -> &'static [&'static str] {
    genre_table(language)
        .iter()
        .find(|(g, _)| *g == genre)
        .map(|(_, songs)| *songs)
        .unwrap_or(&[])
}

/// Every song of a language, genre order
pub fn all_songs(language: Language) -> Vec<&'static str> {
    genre_table(language)
        .iter()
        .flat_map(|(_, songs)| songs.iter().copied())
        .collect()
}
