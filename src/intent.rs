use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationIntent {
    Greeting,
    VerifyRequest,
    ConsultationRequest,
    NewsRequest,
    Default,
}

impl ConversationIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationIntent::Greeting => "greeting",
            ConversationIntent::VerifyRequest => "verify_request",
            ConversationIntent::ConsultationRequest => "consultation_request",
            ConversationIntent::NewsRequest => "news_request",
            ConversationIntent::Default => "default",
        }
    }
}

impl fmt::Display for ConversationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "greetings"];
const VERIFY_WORDS: &[&str] = &[
    "verify", "check", "real", "fake", "true", "false", "fact", "myth",
];
const CONSULTATION_WORDS: &[&str] = &[
    "doctor",
    "consult",
    "appointment",
    "book",
    "medical help",
    "professional",
    "symptom",
];
const NEWS_WORDS: &[&str] = &["news", "latest", "update", "recent"];

/// One row of the routing table.
///
/// `keywords` matches whole words on the lower-cased message. `raw_substring`
/// is tested case-sensitively against the message exactly as received.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: ConversationIntent,
    keywords: Regex,
    raw_substring: Option<&'static str>,
}

impl IntentRule {
    fn new(
        intent: ConversationIntent,
        words: &[&str],
        raw_substring: Option<&'static str>,
    ) -> Self {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let keywords = Regex::new(&format!(r"\b({})\b", alternation))
            .unwrap_or_else(|e| panic!("invalid keyword pattern for {}: {}", intent, e));
        Self {
            intent,
            keywords,
            raw_substring,
        }
    }

    pub fn matches(&self, message: &str, message_lower: &str) -> bool {
        self.keywords.is_match(message_lower)
            || self
                .raw_substring
                .is_some_and(|needle| message.contains(needle))
    }

    pub fn pattern(&self) -> &str {
        self.keywords.as_str()
    }
}

/// First-match-wins intent classification over a fixed priority table
#[derive(Debug, Clone)]
pub struct IntentRouter {
    rules: Vec<IntentRule>,
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentRouter {
    pub fn new() -> Self {
        Self {
            rules: vec![
                IntentRule::new(ConversationIntent::Greeting, GREETING_WORDS, None),
                IntentRule::new(ConversationIntent::VerifyRequest, VERIFY_WORDS, Some("http")),
                IntentRule::new(
                    ConversationIntent::ConsultationRequest,
                    CONSULTATION_WORDS,
                    None,
                ),
                IntentRule::new(ConversationIntent::NewsRequest, NEWS_WORDS, None),
            ],
        }
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn route(&self, message: &str) -> ConversationIntent {
        let message_lower = message.to_lowercase();
        let intent = self
            .rules
            .iter()
            .find(|rule| rule.matches(message, &message_lower))
            .map(|rule| rule.intent)
            .unwrap_or(ConversationIntent::Default);
        log::debug!("Routed message to intent: {}", intent);
        intent
    }
}
