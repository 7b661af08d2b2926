//! Bilingual rendering of data replies and engine-level prompts.

use ingres_core::{Language, StructuredQuery};

use crate::mock_data::{DataRecord, UNIT};

/// Prompts asking for a location, per language.
pub const LOCATION_REQUESTS: [[&str; 3]; 2] = [
    [
        "Please specify a location! Like Maharashtra, Punjab, Delhi or any district. 🗺️",
        "Which state or district's data would you like? Name the location and I'll get the data! 📍",
        "I need a location first! State or district name - like Mumbai, Pune, Chennai... 🌍",
    ],
    [
        "Location batao please! Jaise Maharashtra, Punjab, Delhi ya koi district. 🗺️",
        "Kaunse state ya district ka data chahiye? Naam batao toh main data de sakta hu! 📍",
        "Pehle location toh batao! State ya district ka naam - jaise Mumbai, Pune, Chennai... 🌍",
    ],
];

/// Location prompts for `language`.
pub fn location_requests(language: Language) -> &'static [&'static str; 3] {
    match language {
        Language::English => &LOCATION_REQUESTS[0],
        Language::Hinglish => &LOCATION_REQUESTS[1],
    }
}

/// Help text for an empty message.
pub fn fallback_text(language: Language) -> &'static str {
    match language {
        Language::English => {
            "I'm INGRES Assistant! Ask me about India's groundwater data. \
             Specify a location and I'll provide the information! 💧"
        }
        Language::Hinglish => {
            "Main INGRES Assistant hu! India ke groundwater data ke liye puch sakte ho. \
             Location batao aur main data de dunga! 💧"
        }
    }
}

/// Apology sent when a turn fails internally.
pub fn apology(language: Language) -> &'static str {
    match language {
        Language::English => {
            "Sorry, I'm having some technical difficulties. Could you please try again?"
        }
        Language::Hinglish => {
            "Sorry, abhi kuch technical problem aa rahi hai. Kya aap thodi der baad phir se try kar sakte ho?"
        }
    }
}

/// Renders `records` for `query` at `location`.
pub fn format_data_reply(records: &[DataRecord], query: &StructuredQuery, location: &str) -> String {
    let year = &query.year;
    if records.is_empty() {
        return match query.language {
            Language::English => {
                format!("No data found for {location} in {year}. Try another year or location?")
            }
            Language::Hinglish => format!(
                "{location} ke liye {year} ka data nahi mila. Kisi aur year ya location ke liye try karo?"
            ),
        };
    }

    let total: f64 = records.iter().map(DataRecord::numeric_value).sum();
    let count = records.len();
    let points = records
        .iter()
        .map(|record| format!("• {}: {} {}", record.name, record.value, record.unit))
        .collect::<Vec<_>>()
        .join("\n");
    let component = query.component.as_str();
    let heading = component.to_uppercase();

    match query.language {
        Language::Hinglish => {
            let mut reply = format!(
                "📊 **{location} ka {heading} Data** ({year})\n\n\
                 🔹 **Total**: {total:.2} {UNIT}\n\
                 🔹 **Records**: {count}\n\n\
                 {points}\n\n\
                 📍 {location} | 📅 {year} | 🔄 {component}\n\n"
            );
            if query.year_was_defaulted {
                reply.push_str(&format!(
                    "ℹ️ *Note: Maine current year ({year}) ka data dikhaya hai kyunki aapne year specify nahi kiya tha. \
                     Agar koi aur year chahiye toh batao!*\n\n"
                ));
            }
            reply.push_str(
                "Aur kuch chahiye? Different year, location ya component ka data manga sakte ho! 😊",
            );
            reply
        }
        Language::English => {
            let mut reply = format!(
                "📊 **{heading} Data for {location}** ({year})\n\n\
                 🔹 **Total Value**: {total:.2} {UNIT}\n\
                 🔹 **Records Found**: {count}\n\n\
                 {points}\n\n\
                 📍 Location: {location}\n\
                 📅 Year: {year}\n\
                 🔄 Component: {component}\n\n"
            );
            if query.year_was_defaulted {
                reply.push_str(&format!(
                    "ℹ️ *Note: I've shown current year ({year}) data as you didn't specify a year. \
                     Let me know if you need data for a different year!*\n\n"
                ));
            }
            reply.push_str("Need more? You can ask for different years, locations, or components! 😊");
            reply
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::generate;
    use ingres_core::{Component, IntentType, Period};

    fn query(language: Language, defaulted: bool) -> StructuredQuery {
        StructuredQuery {
            intent_type: IntentType::DataQuery,
            location: Some("Pune".to_owned()),
            component: Component::Recharge,
            year: "2024-2025".to_owned(),
            period: Period::Annual,
            language,
            confidence: 0.7,
            year_was_defaulted: defaulted,
        }
    }

    #[test]
    fn test_english_summary() {
        let query = query(Language::English, false);
        let records = generate("Pune", Component::Recharge, "2024-2025", Period::Annual);
        let reply = format_data_reply(&records, &query, "Pune");

        assert!(reply.starts_with("📊 **RECHARGE Data for Pune** (2024-2025)\n\n"));
        assert!(reply.contains("🔹 **Total Value**: 3139.20 MCM\n"));
        assert!(reply.contains("🔹 **Records Found**: 3\n"));
        assert!(reply.contains("• Pune recharge (Monsoon): 981.00 MCM\n"));
        assert!(reply.contains("📍 Location: Pune\n📅 Year: 2024-2025\n🔄 Component: recharge"));
        assert!(!reply.contains("Note:"));
        assert!(reply.ends_with("components! 😊"));
    }

    #[test]
    fn test_defaulted_year_note() {
        let query = query(Language::English, true);
        let records = generate("Pune", Component::Recharge, "2024-2025", Period::Annual);
        let reply = format_data_reply(&records, &query, "Pune");
        assert!(reply.contains(
            "ℹ️ *Note: I've shown current year (2024-2025) data as you didn't specify a year. "
        ));
    }

    #[test]
    fn test_hinglish_summary() {
        let query = query(Language::Hinglish, true);
        let records = generate("Pune", Component::Recharge, "2024-2025", Period::Annual);
        let reply = format_data_reply(&records, &query, "Pune");

        assert!(reply.starts_with("📊 **Pune ka RECHARGE Data** (2024-2025)"));
        assert!(reply.contains("🔹 **Total**: 3139.20 MCM"));
        assert!(reply.contains("📍 Pune | 📅 2024-2025 | 🔄 recharge"));
        assert!(reply.contains("Maine current year (2024-2025) ka data dikhaya hai"));
    }

    #[test]
    fn test_no_data_message() {
        let reply = format_data_reply(&[], &query(Language::Hinglish, false), "Pune");
        assert_eq!(
            reply,
            "Pune ke liye 2024-2025 ka data nahi mila. Kisi aur year ya location ke liye try karo?"
        );
    }

    #[test]
    fn test_prompts_per_language() {
        assert!(location_requests(Language::English)[0].starts_with("Please specify"));
        assert!(location_requests(Language::Hinglish)[0].starts_with("Location batao"));
        assert_ne!(apology(Language::English), apology(Language::Hinglish));
        assert!(fallback_text(Language::Hinglish).starts_with("Main INGRES Assistant hu!"));
    }
}
