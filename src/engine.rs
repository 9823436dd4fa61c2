use crate::config::Config;
use crate::intent::{ConversationIntent, IntentRouter};
use crate::registry::Registries;
use crate::responder::{RandomChooser, ResponseComposer, ResponseTemplates, TemplateChooser};
use crate::verification::{ReliabilityClassifier, VerificationRequest, VerificationResult};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub intent: ConversationIntent,
    pub response: String,
}

/// Entry points for collaborators: content verification and chatbot replies.
///
/// Every call is synchronous and independent; the engine can be shared
/// across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct HealthVerifyEngine {
    classifier: ReliabilityClassifier,
    router: IntentRouter,
    composer: ResponseComposer,
}

impl Default for HealthVerifyEngine {
    fn default() -> Self {
        Self::from_parts(
            Registries::builtin(),
            ResponseTemplates::default(),
            Arc::new(RandomChooser),
        )
    }
}

impl HealthVerifyEngine {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_chooser(config, Arc::new(RandomChooser))
    }

    pub fn with_chooser(
        config: &Config,
        chooser: Arc<dyn TemplateChooser>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            Registries::from_config(&config.registries),
            ResponseTemplates::from_config(&config.templates),
            chooser,
        ))
    }

    pub fn from_parts(
        registries: Registries,
        templates: ResponseTemplates,
        chooser: Arc<dyn TemplateChooser>,
    ) -> Self {
        Self {
            classifier: ReliabilityClassifier::new(Arc::new(registries)),
            router: IntentRouter::new(),
            composer: ResponseComposer::new(templates, chooser),
        }
    }

    pub fn registries(&self) -> &Registries {
        self.classifier.registries()
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub fn classify_content(&self, text: Option<&str>, has_file: bool) -> VerificationResult {
        self.classifier
            .classify(&VerificationRequest::new(text, has_file))
    }

    pub fn respond_to_message(&self, message: &str) -> String {
        self.reply(message).response
    }

    /// Reply together with the intent it was routed to
    pub fn reply(&self, message: &str) -> ChatReply {
        let intent = self.router.route(message);
        let verification = match intent {
            ConversationIntent::VerifyRequest => Some(self.classify_content(Some(message), false)),
            _ => None,
        };
        ChatReply {
            intent,
            response: self.composer.compose(intent, verification.as_ref()),
        }
    }
}
