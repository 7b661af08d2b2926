//! Canned reply text in both registers.

use ingres_core::{FinancialYear, Language};

/// Fixed replies for one language register.
#[derive(Debug)]
pub struct Replies {
    /// Greeting variants
    pub greetings: [&'static str; 3],
    /// Answer to "who are you"
    pub identity: &'static str,
    /// Answer to "what can you do"
    pub capabilities: &'static str,
    /// Thanks variants
    pub thanks: [&'static str; 3],
    /// Help text when nothing else matched
    pub help: &'static str,
    /// Prompt asking the user to rephrase
    pub clarification: &'static str,
    /// Follow-up with no earlier action to refer to
    pub unclear_reference: &'static str,
    /// Location justification when no earlier request can be quoted
    pub location_justification: &'static str,
    /// Follow-up that fits no specific explanation
    pub generic_explanation: &'static str,
}

const ENGLISH: Replies = Replies {
    greetings: [
        "Hello! I'm INGRES Virtual Assistant, your guide to India's groundwater data! 😊",
        "Greetings! How can I help you with groundwater information today?",
        "Hello there! Ready to explore India's water resources data?",
    ],
    identity: "I'm INGRES Virtual Assistant! 🌊 I specialize in providing comprehensive groundwater data \
               for all Indian states and districts. I can help you with water recharge rates, extraction levels, \
               seasonal variations, and historical trends. Just name any location in India!",
    capabilities: "I can help you with! 📊\n\n\
                   • Groundwater recharge data for any location\n\
                   • Water extraction and usage statistics\n\
                   • Monsoon vs Non-monsoon comparisons\n\
                   • Historical data trends (multiple years)\n\
                   • Water availability stages\n\n\
                   Just specify a location and I'll provide comprehensive data!",
    thanks: [
        "You're welcome! Feel free to ask about any location's water data! 😊",
        "My pleasure! Always here to help with groundwater information! 💧",
        "Glad to help! Need data for any other location?",
    ],
    help: "I'm INGRES Assistant, your groundwater data expert! 💧\n\n\
           Try asking:\n\
           • 'Show Maharashtra water data'\n\
           • 'Punjab recharge levels for 2023'\n\
           • 'What's Mumbai's extraction rate'\n\n\
           Just name any Indian state or district!",
    clarification: "I didn't quite understand what you're asking. 🤔\n\n\
                    Are you trying to:\n\
                    • Get groundwater data for a state/district?\n\
                    • Ask about my previous response?\n\
                    • Get some other information?\n\n\
                    Please provide more details!",
    unclear_reference: "I'm not sure what you're referring to. Could you please clarify your question?",
    location_justification: "I showed the data based on your request. \
                             If you'd like data for a different location, please specify!",
    generic_explanation: "I took that action based on your previous message. \
                          If something isn't clear or you need something different, please let me know!",
};

const HINGLISH: Replies = Replies {
    greetings: [
        "Namaste! Main INGRES Virtual Assistant hu! 😊 India ke groundwater data me madad kar sakta hu.",
        "Hello ji! Kaisa hai aap? Main yaha hu groundwater data ke liye help karne!",
        "Namaste! Batayiye kaunsa state ya district ka paani ka data chahiye?",
    ],
    identity: "Main INGRES Virtual Assistant hu! 🌊 India ke sabhi states aur districts ka groundwater data provide karta hu. \
               Main aapko water recharge, extraction levels, aur seasonal variations ke baare me bata sakta hu. \
               Kisi bhi location ka naam batao aur main uska complete water data de dunga!",
    capabilities: "Main ye sab kar sakta hu! 💧\n\n\
                   • Kisi bhi state/district ka water recharge data\n\
                   • Groundwater extraction levels\n\
                   • Monsoon vs Non-monsoon comparison\n\
                   • Different years ka historical data\n\
                   • Water stage aur availability info\n\n\
                   Bas location aur year batao, baki main sambhal lunga!",
    thanks: [
        "Aapka swagat hai! 😊 Kabhi bhi help chahiye toh yaad karna!",
        "Koi baat nahi ji! Groundwater data ke liye hamesha ready! 💧",
        "Welcome! Aur kuch puchna ho toh bejhijhak pucho!",
    ],
    help: "Main INGRES Assistant hu, India ke groundwater expert! 💧\n\n\
           Mujhse pucho:\n\
           • 'Maharashtra ka water data dikhao'\n\
           • 'Punjab 2023 ka recharge batao'\n\
           • 'Mumbai ka extraction level kya hai'\n\n\
           Koi bhi state ya district ka naam batao!",
    clarification: "Mujhe samajh nahi aaya ki aap kya puch rahe hain. 🤔\n\n\
                    Kya aap ye puchna chahte hain:\n\
                    • Kisi state/district ka groundwater data?\n\
                    • Mere previous response ke baare me koi question?\n\
                    • Kuch aur information?\n\n\
                    Please thoda detail me batayiye!",
    unclear_reference: "Sorry, mujhe samajh nahi aaya ki aap kis baare me puch rahe ho. \
                        Kya aap phir se puch sakte ho?",
    location_justification: "Maine jo location ka data dikhaya, wo aapke request ke according tha. \
                             Agar aapko kisi aur jagah ka data chahiye, bas naam batao!",
    generic_explanation: "Main aapke previous message ke response me ye action liya tha. \
                          Agar kuch clear nahi hai ya aapko kuch aur chahiye, please batayiye!",
};

/// Reply table for `language`.
pub fn replies(language: Language) -> &'static Replies {
    match language {
        Language::English => &ENGLISH,
        Language::Hinglish => &HINGLISH,
    }
}

/// Explains why `location` was shown, quoting the request that asked for it.
pub fn location_justification(language: Language, location: &str, quoted: &str) -> String {
    match language {
        Language::English => format!(
            "I showed {location}'s data because you requested it when you said \"{quoted}\". \
             If you'd like data for a different location, just let me know! 😊"
        ),
        Language::Hinglish => format!(
            "Maine {location} ka data isliye dikhaya kyunki aapne \"{quoted}\" me {location} ka data manga tha. \
             Agar aapko kisi aur location ka data chahiye, toh batayiye - main uska data bhi de sakta hu! 😊"
        ),
    }
}

/// Explains the default-year policy for `year`, offering the two years before it.
pub fn year_explanation(language: Language, year: FinancialYear) -> String {
    let (start, end) = (year.start_year(), year.end_year());
    let earlier = year.previous();
    let earliest = earlier.previous();

    match language {
        Language::English => format!(
            "I showed {year} data because:\n\n\
             1. It's the current financial year (April {start} - March {end})\n\
             2. You didn't specify a particular year\n\
             3. Latest data is usually most relevant\n\n\
             If you'd like data for a different year (like {earlier}, {earliest}), just let me know! 📅"
        ),
        Language::Hinglish => format!(
            "Maine {year} ka data isliye dikhaya kyunki:\n\n\
             1. Ye current financial year hai (April {start} - March {end})\n\
             2. Aapne koi specific year nahi bataya tha\n\
             3. Latest data usually sabse relevant hota hai\n\n\
             Agar aapko kisi aur year ka data chahiye (jaise {earlier}, {earliest}), toh bas batao! \
             Main wo bhi de sakta hu. 📅"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_explanation_spans_financial_year() {
        let text = year_explanation(Language::English, FinancialYear::starting(2024));
        assert!(text.starts_with("I showed 2024-2025 data because:"));
        assert!(text.contains("(April 2024 - March 2025)"));
        assert!(text.contains("(like 2023-2024, 2022-2023)"));
    }

    #[test]
    fn test_hinglish_year_explanation() {
        let text = year_explanation(Language::Hinglish, FinancialYear::starting(2026));
        assert!(text.starts_with("Maine 2026-2027 ka data"));
        assert!(text.contains("(April 2026 - March 2027)"));
        assert!(text.contains("jaise 2025-2026, 2024-2025"));
    }

    #[test]
    fn test_location_justification_quotes_request() {
        let text = location_justification(Language::English, "Pune", "Pune data please");
        assert_eq!(
            text,
            "I showed Pune's data because you requested it when you said \"Pune data please\". \
             If you'd like data for a different location, just let me know! 😊"
        );
    }

    #[test]
    fn test_tables_differ_by_language() {
        assert_ne!(
            replies(Language::English).clarification,
            replies(Language::Hinglish).clarification
        );
        assert!(replies(Language::Hinglish).greetings[0].starts_with("Namaste!"));
    }
}
