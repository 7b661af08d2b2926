//! Fixed vocabularies used by the detector, extractor and classifier.

use std::sync::LazyLock;

use crate::lexicon::Lexicon;

/// States, in lookup priority order.
pub const STATES: [&str; 18] = [
    "Maharashtra",
    "Punjab",
    "Haryana",
    "Gujarat",
    "Rajasthan",
    "Karnataka",
    "Tamil Nadu",
    "Andhra Pradesh",
    "Telangana",
    "Uttar Pradesh",
    "Madhya Pradesh",
    "West Bengal",
    "Bihar",
    "Odisha",
    "Kerala",
    "Assam",
    "Jharkhand",
    "Chhattisgarh",
];

/// Districts, consulted only when no state matches.
pub const DISTRICTS: [&str; 18] = [
    "Pune",
    "Mumbai",
    "Nagpur",
    "Nashik",
    "Aurangabad",
    "Bangalore",
    "Chennai",
    "Hyderabad",
    "Ahmedabad",
    "Jaipur",
    "Ludhiana",
    "Amritsar",
    "Chandigarh",
    "Kolkata",
    "Delhi",
    "Lucknow",
    "Kanpur",
    "Indore",
];

/// Code-mixed marker words; matched as substrings of tokens, not whole words.
pub const HINGLISH_MARKERS: [&str; 37] = [
    "tum", "main", "mein", "kar", "hai", "ho", "ka", "ki", "ke", "aap", "kya", "kon", "kaun",
    "chahiye", "batao", "kaise", "kyu", "kyun", "namaste", "shukriya", "dhanyawad", "haan",
    "nahi", "theek", "accha", "bolo", "puch", "dikha", "bata", "mujhe", "mujh", "tumhe", "aapko",
    "iska", "uska", "ye", "wo",
];

/// Built lexicon for a fixed word list.
macro_rules! lexicon {
    ($(#[$meta:meta])* $name:ident, [$($word:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub static $name: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new(&[$($word),+]));
    };
}

/// State lexicon.
pub static STATE_LEXICON: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new(&STATES));
/// District lexicon.
pub static DISTRICT_LEXICON: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new(&DISTRICTS));

lexicon!(
    /// Phrases that refer back to the previous reply.
    FOLLOW_UP_MARKERS,
    [
        "kyu",
        "kyun",
        "why",
        "kaise",
        "how",
        "matlab",
        "mean",
        "samjha nahi",
        "didn't understand",
        "phir se",
        "again",
        "iska matlab",
        "what do you mean",
    ]
);

lexicon!(
    /// Question words for the question-about-data test.
    QUESTION_WORDS,
    ["kyu", "kyun", "why", "kaise", "how", "kis liye", "for what"]
);

lexicon!(
    /// Words that point at data already shown.
    DATA_REFERENCES,
    ["data", "dikhaya", "showed", "display", "bataya"]
);

lexicon!(
    /// Words that signal a data request.
    DATA_INDICATORS,
    [
        "data",
        "show",
        "get",
        "find",
        "chahiye",
        "batao",
        "dikhao",
        "level",
        "levels",
        "recharge",
        "extraction",
        "de do",
        "bata do",
    ]
);

lexicon!(
    /// Phrases signalling the user is lost.
    CONFUSION_MARKERS,
    [
        "samajh nahi",
        "samjha nahi",
        "confused",
        "clear nahi",
        "don't understand",
        "kya matlab",
        "what mean",
        "galat",
    ]
);

lexicon!(
    /// Why/how markers used inside follow-up resolution.
    WHY_MARKERS,
    ["why", "kyu", "kyun", "how", "kaise"]
);

lexicon!(
    /// Generic words for a location.
    LOCATION_WORDS,
    ["location", "jagah"]
);

lexicon!(
    /// Generic words for a year.
    YEAR_WORDS,
    ["year", "years", "saal"]
);

lexicon!(
    /// Recharge component markers.
    RECHARGE_MARKERS,
    ["recharge", "rainfall"]
);

lexicon!(
    /// Extraction component markers.
    EXTRACTION_MARKERS,
    ["extraction", "pumping", "usage"]
);

lexicon!(
    /// Stage component markers.
    STAGE_MARKERS,
    ["level", "levels", "stage", "depth"]
);

lexicon!(
    /// Non-monsoon period markers, checked before monsoon ones.
    NON_MONSOON_MARKERS,
    ["non monsoon", "nonmonsoon", "rabi"]
);

lexicon!(
    /// Monsoon period markers.
    MONSOON_MARKERS,
    ["monsoon", "kharif", "barish"]
);
