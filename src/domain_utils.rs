use url::Url;

/// Minimal domain utilities for the URL normalizer
pub struct DomainUtils;

impl DomainUtils {
    /// Canonicalize domain (lowercase, remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.trim().to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }

    /// Extract the canonical domain when the whole text is a URL.
    ///
    /// The text must parse as an absolute URL with both a scheme and a
    /// `//` authority. A URL embedded in a longer sentence is not detected.
    pub fn extract_url_domain(text: &str) -> Option<String> {
        let text = text.trim();
        let url = match Url::parse(text) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Not a URL ({}): {:?}", e, text);
                return None;
            }
        };

        if url.scheme().is_empty() {
            return None;
        }

        // The parser invents a host for `http:who.int` and `https:\\host`
        let has_authority = text
            .get(url.scheme().len() + 1..)
            .is_some_and(|rest| rest.starts_with("//"));
        if !has_authority {
            log::debug!("URL without authority: {:?}", text);
            return None;
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Some(Self::canonicalize_domain(host)),
            _ => None,
        }
    }
}
