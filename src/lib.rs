pub mod config;
pub mod domain_utils;
pub mod engine;
pub mod intent;
pub mod registry;
pub mod responder;
pub mod server;
pub mod verification;

pub use config::Config;
pub use engine::HealthVerifyEngine;
pub use intent::{ConversationIntent, IntentRouter};
pub use registry::{MisleadingPhraseLexicon, Registries, TrustedDomainSet};
pub use responder::{FixedChooser, RandomChooser, ResponseComposer, TemplateChooser};
pub use server::Server;
pub use verification::{Reliability, ReliabilityClassifier, VerificationRequest, VerificationResult};
