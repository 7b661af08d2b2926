//! Slot extraction from free text.

use ingres_core::{Component, Period};
use regex::Regex;
use std::sync::LazyLock;

use crate::lexicon::TokenizedText;
use crate::vocabulary::{
    DISTRICT_LEXICON, EXTRACTION_MARKERS, MONSOON_MARKERS, NON_MONSOON_MARKERS, RECHARGE_MARKERS,
    STAGE_MARKERS, STATE_LEXICON,
};

/// Financial-year label such as `2022-23` or `2022-2023`, returned verbatim.
///
/// ASCII digits only; a prefix like `FY` may touch the label.
#[allow(clippy::expect_used, reason = "Regex pattern is known to be valid")]
static FINANCIAL_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{4}-[0-9]{2,4})(?:[^0-9]|$)").expect("Valid regex")
});

/// Single calendar year between 2010 and 2029, not preceded by another digit.
#[allow(clippy::expect_used, reason = "Regex pattern is known to be valid")]
static SINGLE_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])(20[12][0-9])").expect("Valid regex"));

/// Query parameters found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entities {
    /// Canonical state or district name
    pub location: Option<&'static str>,
    /// Component, if one was named
    pub component: Option<Component>,
    /// Year label, if one was written
    pub year: Option<String>,
    /// Period; annual unless a season was named
    pub period: Period,
}

/// Extracts location, component, year and period from free text.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityExtractor;

impl EntityExtractor {
    /// Extracts every entity from `text`.
    pub fn extract(&self, text: &str) -> Entities {
        let tokens = TokenizedText::new(text);
        Entities {
            location: Self::location_in(&tokens),
            component: Self::component_in(&tokens),
            year: Self::extract_year(text),
            period: Self::period_in(&tokens),
        }
    }

    /// First state in list order, then first district in list order.
    pub fn extract_location(text: &str) -> Option<&'static str> {
        Self::location_in(&TokenizedText::new(text))
    }

    /// Component named in `text`, checked recharge, extraction, stage.
    pub fn extract_component(text: &str) -> Option<Component> {
        Self::component_in(&TokenizedText::new(text))
    }

    /// Year label: a financial-year form verbatim, else a single year `Y` as `Y-(Y+1)`.
    pub fn extract_year(text: &str) -> Option<String> {
        if let Some(found) = FINANCIAL_YEAR_REGEX
            .captures(text)
            .and_then(|captures| captures.get(1))
        {
            return Some(found.as_str().to_owned());
        }

        SINGLE_YEAR_REGEX
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|found| found.as_str().parse::<i32>().ok())
            .map(|year| format!("{year}-{}", year + 1))
    }

    /// Period named in `text`, non-monsoon before monsoon, annual by default.
    pub fn extract_period(text: &str) -> Period {
        Self::period_in(&TokenizedText::new(text))
    }

    pub(crate) fn location_in(tokens: &TokenizedText) -> Option<&'static str> {
        STATE_LEXICON
            .first_match(tokens)
            .or_else(|| DISTRICT_LEXICON.first_match(tokens))
    }

    pub(crate) fn component_in(tokens: &TokenizedText) -> Option<Component> {
        if RECHARGE_MARKERS.matches(tokens) {
            Some(Component::Recharge)
        } else if EXTRACTION_MARKERS.matches(tokens) {
            Some(Component::Extraction)
        } else if STAGE_MARKERS.matches(tokens) {
            Some(Component::Stage)
        } else {
            None
        }
    }

    fn period_in(tokens: &TokenizedText) -> Period {
        if NON_MONSOON_MARKERS.matches(tokens) {
            Period::NonMonsoon
        } else if MONSOON_MARKERS.matches(tokens) {
            Period::Monsoon
        } else {
            Period::Annual
        }
    }
}
