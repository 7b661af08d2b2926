use chrono::{Datelike as _, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language register the user is writing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Plain English
    #[default]
    English,
    /// Hindi-English code-mixed register (Latin or Devanagari script)
    Hinglish,
}

impl Language {
    /// Wire label of this register.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hinglish => "hinglish",
        }
    }

    /// Parses a label reported by an upstream classifier.
    ///
    /// Plain Hindi is folded into the code-mixed register.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "hinglish" | "hindi" | "hi" => Some(Self::Hinglish),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Groundwater quantity being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Groundwater recharge
    #[default]
    Recharge,
    /// Groundwater extraction
    Extraction,
    /// Stage of extraction / water level
    Stage,
}

impl Component {
    /// Wire label of this component.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recharge => "recharge",
            Self::Extraction => "extraction",
            Self::Stage => "stage",
        }
    }

    /// Parses a component label or one of its synonyms.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        match lower.as_str() {
            "recharge" | "rainfall" => Some(Self::Recharge),
            "extraction" | "pumping" | "usage" => Some(Self::Extraction),
            "stage" | "level" | "depth" => Some(Self::Stage),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seasonal window of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    /// Kharif season
    #[serde(rename = "monsoon")]
    Monsoon,
    /// Rabi season
    #[serde(rename = "non-monsoon")]
    NonMonsoon,
    /// Whole year
    #[default]
    #[serde(rename = "annual")]
    Annual,
}

impl Period {
    /// Wire label of this period.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monsoon => "monsoon",
            Self::NonMonsoon => "non-monsoon",
            Self::Annual => "annual",
        }
    }

    /// Parses a period label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "monsoon" | "kharif" => Some(Self::Monsoon),
            "non-monsoon" | "non monsoon" | "nonmonsoon" | "rabi" => Some(Self::NonMonsoon),
            "annual" | "yearly" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indian financial year, April through March.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FinancialYear {
    start: i32,
}

impl FinancialYear {
    /// Financial year beginning in April of `start`.
    pub fn starting(start: i32) -> Self {
        Self { start }
    }

    /// Financial year that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    /// Financial year containing today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Calendar year in which this financial year starts.
    pub fn start_year(self) -> i32 {
        self.start
    }

    /// Calendar year in which this financial year ends.
    pub fn end_year(self) -> i32 {
        self.start + 1
    }

    /// The financial year before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::starting(self.start - 1)
    }

    /// Parses the leading four-digit year of a `YYYY-YYYY` or `YYYY-YY` label.
    pub fn parse_label(label: &str) -> Option<Self> {
        let head = label.trim().get(..4)?;
        head.parse::<i32>().ok().map(Self::starting)
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end_year())
    }
}

/// Year used when the user did not name one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultYear {
    /// The financial year containing the date of the turn
    #[default]
    CurrentFinancialYear,
    /// A fixed label from configuration
    Fixed(String),
}

impl DefaultYear {
    /// Resolves the label to use for a turn happening now.
    pub fn resolve(&self) -> String {
        match self {
            Self::CurrentFinancialYear => FinancialYear::current().to_string(),
            Self::Fixed(label) => label.clone(),
        }
    }

    /// Financial year behind the resolved label.
    pub fn financial_year(&self) -> FinancialYear {
        match self {
            Self::CurrentFinancialYear => FinancialYear::current(),
            Self::Fixed(label) => {
                FinancialYear::parse_label(label).unwrap_or_else(FinancialYear::current)
            }
        }
    }
}

/// Coarse intent category of a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    /// Canned or generated conversational reply
    Conversation,
    /// Request for the user to clarify
    Clarification,
    /// Structured groundwater data request
    DataQuery,
}

/// Structured data request extracted from a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    /// Always `data_query` for queries handed to the synthesizer
    pub intent_type: IntentType,
    /// Canonical state or district name, if one was recognized
    pub location: Option<String>,
    /// Requested component
    pub component: Component,
    /// Financial year label, `YYYY-YYYY` unless the user wrote another form
    pub year: String,
    /// Requested seasonal window
    pub period: Period,
    /// Register the reply should be written in
    pub language: Language,
    /// Classifier confidence in [0, 1]
    pub confidence: f32,
    /// Whether `year` came from the default rather than the message
    pub year_was_defaulted: bool,
}

impl StructuredQuery {
    /// Whether the query can be answered without asking for a location.
    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty())
    }
}

/// A reply that is returned verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Reply text
    pub text: String,
    /// Register the text is written in
    pub language: Language,
    /// Confidence of the branch that produced it
    pub confidence: f32,
}

impl Utterance {
    /// Creates a new utterance.
    pub fn new(text: impl Into<String>, language: Language, confidence: f32) -> Self {
        Self {
            text: text.into(),
            language,
            confidence,
        }
    }
}

/// Outcome of classification, consumed by the response synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Structured data request
    DataQuery(StructuredQuery),
    /// Conversational reply
    Conversation(Utterance),
    /// Clarification prompt
    Clarification(Utterance),
}

impl Intent {
    /// Coarse category of this intent.
    pub fn intent_type(&self) -> IntentType {
        match self {
            Self::DataQuery(_) => IntentType::DataQuery,
            Self::Conversation(_) => IntentType::Conversation,
            Self::Clarification(_) => IntentType::Clarification,
        }
    }

    /// Register the reply should use.
    pub fn language(&self) -> Language {
        match self {
            Self::DataQuery(query) => query.language,
            Self::Conversation(utterance) | Self::Clarification(utterance) => utterance.language,
        }
    }

    /// Confidence attached by the producing branch.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::DataQuery(query) => query.confidence,
            Self::Conversation(utterance) | Self::Clarification(utterance) => {
                utterance.confidence
            }
        }
    }
}

/// Reply type reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Conversational reply
    Conversation,
    /// Clarification prompt
    Clarification,
    /// Data summary
    Data,
    /// Prompt asking for a location
    LocationRequest,
    /// Plain help text
    Text,
    /// Apology after an internal failure
    Error,
}

impl ReplyKind {
    /// Wire label of this reply kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Clarification => "clarification",
            Self::Data => "data",
            Self::LocationRequest => "location_request",
            Self::Text => "text",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
