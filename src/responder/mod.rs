pub mod defaults;

use crate::config::TemplateConfig;
use crate::intent::ConversationIntent;
use crate::verification::{Reliability, VerificationResult};
use rand::Rng;
use std::sync::Arc;

/// Source of template choices. Replace with a fixed chooser for exact replies.
pub trait TemplateChooser: Send + Sync {
    /// Index in `0..len`; `len` is never zero.
    fn choose(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl TemplateChooser for RandomChooser {
    fn choose(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same slot (wrapping on short pools)
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedChooser(pub usize);

impl TemplateChooser for FixedChooser {
    fn choose(&self, len: usize) -> usize {
        self.0 % len
    }
}

#[derive(Debug, Clone)]
pub struct ResponseTemplates {
    pub greetings: Vec<String>,
    pub reliable: Vec<String>,
    pub unreliable: Vec<String>,
    pub uncertain: Vec<String>,
    pub follow_ups: Vec<String>,
    pub could_not_verify: String,
    pub consultation: String,
    pub news: String,
    pub fallback: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self::from_config(&TemplateConfig::default())
    }
}

impl ResponseTemplates {
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self {
            greetings: config.greetings.clone(),
            reliable: config.reliable.clone(),
            unreliable: config.unreliable.clone(),
            uncertain: config.uncertain.clone(),
            follow_ups: config.follow_ups.clone(),
            could_not_verify: config.could_not_verify.clone(),
            consultation: config.consultation.clone(),
            news: config.news.clone(),
            fallback: config.fallback.clone(),
        }
    }

    fn verdict_pool(&self, reliability: Reliability) -> &[String] {
        match reliability {
            Reliability::Reliable => &self.reliable,
            Reliability::Unreliable => &self.unreliable,
            Reliability::Unknown => &self.uncertain,
        }
    }
}

/// Builds the user-facing reply for a routed message. Holds no conversation state.
#[derive(Clone)]
pub struct ResponseComposer {
    templates: ResponseTemplates,
    chooser: Arc<dyn TemplateChooser>,
}

impl ResponseComposer {
    pub fn new(templates: ResponseTemplates, chooser: Arc<dyn TemplateChooser>) -> Self {
        Self { templates, chooser }
    }

    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }

    fn pick<'a>(&self, pool: &'a [String]) -> &'a str {
        if pool.is_empty() {
            return "";
        }
        let index = self.chooser.choose(pool.len());
        pool.get(index).map(String::as_str).unwrap_or_default()
    }

    /// `verification` is only consulted for [`ConversationIntent::VerifyRequest`].
    pub fn compose(
        &self,
        intent: ConversationIntent,
        verification: Option<&VerificationResult>,
    ) -> String {
        match intent {
            ConversationIntent::Greeting => self.pick(&self.templates.greetings).to_string(),
            ConversationIntent::VerifyRequest => match verification {
                Some(result) if result.verified => self.compose_verdict(result),
                _ => self.templates.could_not_verify.clone(),
            },
            ConversationIntent::ConsultationRequest => self.templates.consultation.clone(),
            ConversationIntent::NewsRequest => self.templates.news.clone(),
            ConversationIntent::Default => self.templates.fallback.clone(),
        }
    }

    fn compose_verdict(&self, result: &VerificationResult) -> String {
        let mut response = format!(
            "{}\n\n{}",
            self.pick(self.templates.verdict_pool(result.is_reliable)),
            result.message
        );

        if !result.details.is_empty() {
            response.push_str("\n\nAdditional information:\n");
            for detail in &result.details {
                response.push_str(&format!("• {}\n", detail));
            }
        }

        response.push_str("\n\n");
        response.push_str(self.pick(&self.templates.follow_ups));
        response
    }
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
