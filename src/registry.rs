use crate::config::RegistryConfig;
use crate::domain_utils::DomainUtils;
use std::collections::HashSet;

/// Authoritative health information sources
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "who.int",
    "cdc.gov",
    "nih.gov",
    "mayoclinic.org",
    "healthline.com",
    "webmd.com",
    "medlineplus.gov",
    "hopkinsmedicine.org",
    "clevelandclinic.org",
    "health.harvard.edu",
];

/// Phrases commonly found in false health claims
pub const DEFAULT_MISLEADING_PHRASES: &[&str] = &[
    "miracle cure",
    "secret remedy",
    "doctors hate this",
    "they don't want you to know",
    "big pharma hides",
    "cancer cure suppressed",
    "incredible breakthrough",
    "revolutionary treatment",
    "ancient remedy",
    "toxic",
    "chemical free",
    "natural cure",
    "proven by research",
];

/// Lower-cased, `www.`-stripped trusted domains. Exact membership only.
#[derive(Debug, Clone, Default)]
pub struct TrustedDomainSet {
    domains: HashSet<String>,
}

impl TrustedDomainSet {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| DomainUtils::canonicalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Domains in sorted order, for display
    pub fn sorted(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.domains.iter().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }
}

/// Ordered, de-duplicated list of lower-case misleading phrases
#[derive(Debug, Clone, Default)]
pub struct MisleadingPhraseLexicon {
    phrases: Vec<String>,
}

impl MisleadingPhraseLexicon {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if phrase.is_empty() {
                continue;
            }
            if seen.insert(phrase.clone()) {
                ordered.push(phrase);
            }
        }
        Self { phrases: ordered }
    }

    /// Distinct phrases present in `text`, in lexicon order.
    /// A phrase repeated in the text is reported once.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        let text_lower = text.to_lowercase();
        self.phrases
            .iter()
            .filter(|phrase| text_lower.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Reference data shared read-only by every classifier call
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub trusted_domains: TrustedDomainSet,
    pub lexicon: MisleadingPhraseLexicon,
}

impl Registries {
    pub fn from_config(config: &RegistryConfig) -> Self {
        let registries = Self {
            trusted_domains: TrustedDomainSet::new(&config.trusted_domains),
            lexicon: MisleadingPhraseLexicon::new(&config.misleading_phrases),
        };
        log::info!(
            "Loaded {} trusted domains and {} misleading phrases",
            registries.trusted_domains.len(),
            registries.lexicon.len()
        );
        registries
    }

    pub fn builtin() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}
