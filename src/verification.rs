use crate::domain_utils::DomainUtils;
use crate::registry::Registries;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TRUSTED_CONFIDENCE: f64 = 0.9;
pub const UNTRUSTED_DOMAIN_CONFIDENCE: f64 = 0.6;
pub const NO_SIGNAL_CONFIDENCE: f64 = 0.5;
const PHRASE_BASE_CONFIDENCE: f64 = 0.3;
const PHRASE_STEP_CONFIDENCE: f64 = 0.1;
const PHRASE_MAX_CONFIDENCE: f64 = 0.9;

const EMPTY_INPUT_MESSAGE: &str = "Please provide text or upload a file to verify.";
const MISLEADING_MESSAGE: &str =
    "This content contains language commonly found in misleading health claims.";
const INSUFFICIENT_MESSAGE: &str =
    "We don't have enough information to verify this content definitively.";
const SOURCE_REQUEST_DETAIL: &str =
    "For more accurate verification, please provide a link to the original source.";
const FILE_LIMITATION_DETAIL: &str = "File analysis is limited in this demo version. For a complete verification, please include the text content or source URL.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRequest {
    pub text: Option<String>,
    pub has_file: bool,
}

impl VerificationRequest {
    pub fn new(text: Option<&str>, has_file: bool) -> Self {
        Self {
            text: text.map(str::to_string),
            has_file,
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(Some(text), false)
    }

    fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Tri-state reliability verdict. Serialized as `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Reliability {
    Reliable,
    Unreliable,
    Unknown,
}

impl From<Option<bool>> for Reliability {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Reliability::Reliable,
            Some(false) => Reliability::Unreliable,
            None => Reliability::Unknown,
        }
    }
}

impl From<Reliability> for Option<bool> {
    fn from(value: Reliability) -> Self {
        match value {
            Reliability::Reliable => Some(true),
            Reliability::Unreliable => Some(false),
            Reliability::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// A verdict was computed; says nothing about whether the content is true.
    pub verified: bool,
    pub is_reliable: Reliability,
    pub confidence: f64,
    pub message: String,
    pub details: Vec<String>,
}

impl VerificationResult {
    fn empty_input() -> Self {
        Self {
            verified: false,
            is_reliable: Reliability::Unreliable,
            confidence: 0.0,
            message: EMPTY_INPUT_MESSAGE.to_string(),
            details: Vec::new(),
        }
    }
}

/// Confidence for `matched` distinct misleading phrases
pub fn phrase_confidence(matched: usize) -> f64 {
    (PHRASE_BASE_CONFIDENCE + PHRASE_STEP_CONFIDENCE * matched as f64).min(PHRASE_MAX_CONFIDENCE)
}

/// Deterministic trusted-domain and lexicon heuristic
#[derive(Debug, Clone)]
pub struct ReliabilityClassifier {
    registries: Arc<Registries>,
}

impl ReliabilityClassifier {
    pub fn new(registries: Arc<Registries>) -> Self {
        Self { registries }
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn classify(&self, request: &VerificationRequest) -> VerificationResult {
        if !request.has_text() && !request.has_file {
            log::debug!("Verification requested with no text and no file");
            return VerificationResult::empty_input();
        }

        let text = request.text.as_deref().unwrap_or("");
        let mut details = Vec::new();

        let domain = if text.is_empty() {
            None
        } else {
            DomainUtils::extract_url_domain(text)
        };

        if let Some(domain) = domain.as_deref() {
            if self.registries.trusted_domains.contains(domain) {
                log::debug!("Trusted domain short-circuit: {}", domain);
                details.push(format!(
                    "Domain {} is on our list of trusted health information providers.",
                    domain
                ));
                return VerificationResult {
                    verified: true,
                    is_reliable: Reliability::Reliable,
                    confidence: TRUSTED_CONFIDENCE,
                    message: format!(
                        "This content is from {}, which is a trusted health information source.",
                        domain
                    ),
                    details,
                };
            }
        }

        let hits = self.registries.lexicon.matches(text);
        for phrase in &hits {
            details.push(format!("Found potentially misleading phrase: '{}'", phrase));
        }

        let (is_reliable, confidence, message) = if !hits.is_empty() {
            (
                Reliability::Unreliable,
                phrase_confidence(hits.len()),
                MISLEADING_MESSAGE.to_string(),
            )
        } else if let Some(domain) = domain.as_deref() {
            (
                Reliability::Unreliable,
                UNTRUSTED_DOMAIN_CONFIDENCE,
                format!(
                    "This content is from {}, which is not in our database of verified health sources.",
                    domain
                ),
            )
        } else {
            details.push(SOURCE_REQUEST_DETAIL.to_string());
            (
                Reliability::Unknown,
                NO_SIGNAL_CONFIDENCE,
                INSUFFICIENT_MESSAGE.to_string(),
            )
        };

        // Attachments are acknowledged but never inspected
        if request.has_file {
            details.push(FILE_LIMITATION_DETAIL.to_string());
        }

        log::debug!(
            "Verdict {:?} (confidence {:.2}, {} phrase hits, domain {:?})",
            is_reliable,
            confidence,
            hits.len(),
            domain
        );

        VerificationResult {
            verified: true,
            is_reliable,
            confidence,
            message,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_TRUSTED_DOMAINS;

    fn classifier() -> ReliabilityClassifier {
        ReliabilityClassifier::new(Arc::new(Registries::builtin()))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input_is_terminal() {
        let result = classifier().classify(&VerificationRequest::new(Some(""), false));
        assert!(!result.verified);
        assert_eq!(result.is_reliable, Reliability::Unreliable);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.message.is_empty());
        assert!(result.details.is_empty());

        let result = classifier().classify(&VerificationRequest::new(None, false));
        assert!(!result.verified);
    }

    #[test]
    fn test_every_trusted_domain_short_circuits() {
        let classifier = classifier();
        for domain in DEFAULT_TRUSTED_DOMAINS {
            let url = format!("https://{}/path", domain);
            let result = classifier.classify(&VerificationRequest::text(&url));
            assert!(result.verified, "{}", url);
            assert_eq!(result.is_reliable, Reliability::Reliable, "{}", url);
            assert!(approx(result.confidence, 0.9), "{}", url);
            assert_eq!(result.details.len(), 1);
            assert!(result.details[0].contains(domain));
        }
    }

    #[test]
    fn test_www_prefix_is_ignored() {
        let classifier = classifier();
        let with_www = classifier.classify(&VerificationRequest::text("https://www.who.int"));
        let without = classifier.classify(&VerificationRequest::text("https://who.int"));
        assert_eq!(with_www, without);
        assert!(with_www.message.contains("who.int"));
    }

    #[test]
    fn test_scheme_without_authority_is_not_trusted() {
        let classifier = classifier();
        for text in ["http:who.int", "https:/cdc.gov", r"https:\\nih.gov"] {
            let result = classifier.classify(&VerificationRequest::text(text));
            assert_eq!(result.is_reliable, Reliability::Unknown, "{}", text);
            assert!(approx(result.confidence, 0.5), "{}", text);
        }
    }

    #[test]
    fn test_trusted_domain_skips_lexicon() {
        let result = classifier()
            .classify(&VerificationRequest::text("https://cdc.gov/miracle-cure?q=toxic"));
        assert_eq!(result.is_reliable, Reliability::Reliable);
        assert_eq!(result.details.len(), 1);
    }

    #[test]
    fn test_phrase_confidence_scales_and_caps() {
        let classifier = classifier();
        let cases = [
            ("This miracle cure works", 1),
            ("A miracle cure and secret remedy", 2),
            ("miracle cure, secret remedy, ancient remedy, toxic", 4),
            (
                "miracle cure secret remedy doctors hate this big pharma hides toxic natural cure chemical free ancient remedy",
                8,
            ),
        ];

        for (text, n) in cases {
            let result = classifier.classify(&VerificationRequest::text(text));
            assert_eq!(result.is_reliable, Reliability::Unreliable, "{}", text);
            assert_eq!(result.details.len(), n, "{}", text);
            let expected = (0.3 + 0.1 * n as f64).min(0.9);
            assert!(approx(result.confidence, expected), "{}", text);
            assert!(result.confidence <= 0.9);
            assert!(result.confidence >= 0.3);
        }
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let result =
            classifier().classify(&VerificationRequest::text("Toxic! TOXIC! toxic everywhere"));
        assert_eq!(result.details, vec!["Found potentially misleading phrase: 'toxic'"]);
        assert!(approx(result.confidence, 0.4));
    }

    #[test]
    fn test_untrusted_domain() {
        let result = classifier().classify(&VerificationRequest::text("http://example.com/article"));
        assert_eq!(result.is_reliable, Reliability::Unreliable);
        assert!(approx(result.confidence, 0.6));
        assert!(result.message.contains("example.com"));
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_untrusted_domain_with_phrase_uses_phrase_branch() {
        let result =
            classifier().classify(&VerificationRequest::text("https://example.com/miracle cure"));
        assert_eq!(result.is_reliable, Reliability::Unreliable);
        assert!(approx(result.confidence, 0.4));
        assert_eq!(result.message, MISLEADING_MESSAGE);
    }

    #[test]
    fn test_no_signal_is_unknown() {
        let result = classifier().classify(&VerificationRequest::text("Vitamin C helps colds"));
        assert_eq!(result.is_reliable, Reliability::Unknown);
        assert!(approx(result.confidence, 0.5));
        assert_eq!(result.details, vec![SOURCE_REQUEST_DETAIL.to_string()]);
    }

    #[test]
    fn test_file_only() {
        let result = classifier().classify(&VerificationRequest::new(None, true));
        assert!(result.verified);
        assert_eq!(result.is_reliable, Reliability::Unknown);
        assert!(approx(result.confidence, 0.5));
        assert_eq!(
            result.details,
            vec![
                SOURCE_REQUEST_DETAIL.to_string(),
                FILE_LIMITATION_DETAIL.to_string()
            ]
        );
    }

    #[test]
    fn test_file_note_appended_to_phrase_branch() {
        let result = classifier().classify(&VerificationRequest::new(Some("secret remedy"), true));
        assert_eq!(result.details.len(), 2);
        assert_eq!(result.details[1], FILE_LIMITATION_DETAIL);
    }

    #[test]
    fn test_file_note_not_added_on_trusted_short_circuit() {
        let result =
            classifier().classify(&VerificationRequest::new(Some("https://nih.gov"), true));
        assert_eq!(result.is_reliable, Reliability::Reliable);
        assert_eq!(result.details.len(), 1);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = classifier();
        let request = VerificationRequest::new(Some("They don't want you to know this"), true);
        let first = classifier.classify(&request);
        for _ in 0..5 {
            assert_eq!(classifier.classify(&request), first);
        }
    }

    #[test]
    fn test_reliability_serializes_as_nullable_bool() {
        let result = classifier().classify(&VerificationRequest::text("hello there"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_reliable"], serde_json::Value::Null);
        assert_eq!(json["verified"], serde_json::Value::Bool(true));

        let parsed: VerificationResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.is_reliable, Reliability::Unknown);
    }
}
